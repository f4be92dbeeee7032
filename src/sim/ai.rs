//! Opponent paddle controller

use super::state::Paddle;

/// Move the paddle a fraction of the way toward centering on `ball_y`.
///
/// Exponential smoothing: each frame closes `coefficient` of the remaining
/// gap. The paddle is not clamped to the field and may leave it.
pub fn track_ball(paddle: &mut Paddle, ball_y: f32, coefficient: f32) {
    paddle.y += (ball_y - paddle.center_y()) * coefficient;
}
