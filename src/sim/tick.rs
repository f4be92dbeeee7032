//! Per-frame simulation tick
//!
//! One call advances the match by one displayed frame. Magnitudes are
//! per-frame, not per-second.

use super::ai::track_ball;
use super::collision::{bounce_angle, collides, reflect_velocity};
use super::field::Field;
use super::state::{GameEvent, GameState, InputState, Paddle, Side};

/// Advance the game state by one frame.
///
/// `field` is read fresh every frame since the canvas may have been resized.
/// `now_ms` is wall-clock time, only used for power-up expiry.
pub fn tick(state: &mut GameState, input: &InputState, field: Field, now_ms: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();
    state.frame += 1;
    state.user.anchor(field);
    state.opponent.anchor(field);

    // Scoring comes first so a ball already past the goal line never
    // bounces off a paddle with its stale position
    if state.ball.pos.x - state.ball.radius < 0.0 {
        score_point(state, Side::Opponent, field, now_ms, &mut events);
    } else if state.ball.leading_x() > field.width() {
        score_point(state, Side::User, field, now_ms, &mut events);
    }

    state.ball.pos += state.ball.vel;
    state.trail.push(state.ball.pos);

    track_ball(&mut state.opponent, state.ball.pos.y, state.com_speed_coefficient);

    // Walls: flip only, the ball may overlap the edge for a frame
    let ball = &mut state.ball;
    if ball.pos.y - ball.radius < 0.0 || ball.pos.y + ball.radius > field.height() {
        ball.vel.y = -ball.vel.y;
    }

    move_user_paddle(&mut state.user, input, state.tuning.paddle_speed, field);

    resolve_paddle_hit(state, field, &mut events);

    if let Some(kind) = state
        .power_ups
        .expire(now_ms, &mut state.user, &mut state.opponent)
    {
        events.push(GameEvent::PowerUpExpired(kind));
    }

    events
}

/// Credit `scorer`, run power-up triggers and serve a fresh ball
fn score_point(
    state: &mut GameState,
    scorer: Side,
    field: Field,
    now_ms: f64,
    events: &mut Vec<GameEvent>,
) {
    state.paddle_mut(scorer).score += 1;
    events.push(GameEvent::Scored { side: scorer });
    log::debug!(
        "{:?} scored ({} - {})",
        scorer,
        state.user.score,
        state.opponent.score
    );

    let lead = state.lead(scorer);
    if state.power_ups.on_point(scorer, lead) {
        if let Some(kind) =
            state
                .power_ups
                .activate(&mut state.rng, now_ms, &mut state.user, &mut state.opponent)
        {
            events.push(GameEvent::PowerUpActivated(kind));
        }
    }

    state
        .ball
        .reset(field, state.tuning.initial_ball_speed, &mut state.rng);
    state.trail.clear();
}

/// Apply held keys to the player's paddle, keeping it inside the field
pub fn move_user_paddle(paddle: &mut Paddle, input: &InputState, speed: f32, field: Field) {
    let mut delta = 0.0;
    if input.move_up {
        delta -= speed;
    }
    if input.move_down {
        delta += speed;
    }
    if delta == 0.0 {
        return;
    }

    // An enlarged paddle can be taller than a shrunken field
    let lowest = (field.height() - paddle.height).max(0.0);
    paddle.y = (paddle.y + delta).max(0.0).min(lowest);
}

/// Bounce off the paddle guarding the half the ball's leading edge is in
fn resolve_paddle_hit(state: &mut GameState, field: Field, events: &mut Vec<GameEvent>) {
    let left_half = state.ball.leading_x() < field.center_x();
    let (side, direction) = if left_half {
        (Side::User, 1.0)
    } else {
        (Side::Opponent, -1.0)
    };

    let paddle = state.paddle(side);
    if !collides(&state.ball, paddle) {
        return;
    }

    let angle = bounce_angle(state.ball.pos.y, paddle);
    let ball = &mut state.ball;
    ball.vel = reflect_velocity(angle, ball.speed, direction);
    ball.speed = (ball.speed + state.tuning.speed_increment).min(state.tuning.max_ball_speed);

    log::debug!("{:?} paddle hit, speed now {:.1}", side, ball.speed);
    events.push(GameEvent::PaddleHit {
        side,
        speed: ball.speed,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Settings, Variant};
    use crate::sim::powerup::PowerUpKind;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn new_state(variant: Variant) -> GameState {
        let settings = Settings::from_variant(variant).with_seed(12345);
        GameState::new(&settings, &Tuning::default(), Field::default())
    }

    /// Park both paddles far off the ball's path
    fn park_paddles(state: &mut GameState) {
        state.user.y = -10_000.0;
        state.opponent.y = -10_000.0;
        state.com_speed_coefficient = 0.0;
    }

    #[test]
    fn test_integration_and_trail() {
        let mut state = new_state(Variant::Streak);
        let field = Field::default();
        let input = InputState::default();

        let events = tick(&mut state, &input, field, 0.0);
        assert!(events.is_empty());
        assert_eq!(state.ball.pos, Vec2::new(405.0, 305.0));
        assert_eq!(state.trail.len(), 1);
        assert_eq!(state.frame, 1);

        for _ in 0..20 {
            tick(&mut state, &input, field, 0.0);
        }
        assert_eq!(state.trail.len(), 7);
        assert_eq!(state.trail.newest(), Some(state.ball.pos));
    }

    #[test]
    fn test_user_scores_on_right_exit() {
        let mut state = new_state(Variant::Streak);
        park_paddles(&mut state);
        state.ball.pos = Vec2::new(795.0, 300.0);
        state.trail.push(Vec2::ZERO);

        let events = tick(&mut state, &InputState::default(), Field::default(), 0.0);

        assert!(events.contains(&GameEvent::Scored { side: Side::User }));
        assert_eq!(state.user.score, 1);
        assert_eq!(state.opponent.score, 0);
        // Reset to center, then integrated once with the flipped direction
        assert_eq!(state.ball.pos.x, 395.0);
        assert_eq!(state.ball.vel.x, -5.0);
        assert_eq!(state.trail.len(), 1);
    }

    #[test]
    fn test_opponent_scores_on_left_exit() {
        let mut state = new_state(Variant::Streak);
        park_paddles(&mut state);
        state.ball.pos = Vec2::new(9.0, 300.0);
        state.ball.vel = Vec2::new(-5.0, 0.0);
        state.ball.speed = 7.0;

        let events = tick(&mut state, &InputState::default(), Field::default(), 0.0);

        assert_eq!(events, vec![GameEvent::Scored { side: Side::Opponent }]);
        assert_eq!(state.opponent.score, 1);
        assert_eq!(state.ball.vel.x, 5.0);
        assert_eq!(state.ball.speed, 5.0);
        assert_eq!(state.ball.pos.x, 405.0);
    }

    #[test]
    fn test_scoring_precedes_paddle_collision() {
        let mut state = new_state(Variant::Streak);
        state.com_speed_coefficient = 0.0;
        // Past the goal line while still overlapping the opponent paddle
        state.ball.pos = Vec2::new(795.0, 300.0);
        assert!(crate::sim::collision::collides(&state.ball, &state.opponent));

        let events = tick(&mut state, &InputState::default(), Field::default(), 0.0);

        assert!(events.contains(&GameEvent::Scored { side: Side::User }));
        assert!(!events.iter().any(|e| matches!(e, GameEvent::PaddleHit { .. })));
    }

    #[test]
    fn test_wall_bounce_without_clamping() {
        let mut state = new_state(Variant::Streak);
        park_paddles(&mut state);
        state.ball.pos = Vec2::new(400.0, 588.0);
        state.ball.vel = Vec2::new(0.0, 5.0);

        tick(&mut state, &InputState::default(), Field::default(), 0.0);
        assert_eq!(state.ball.pos.y, 593.0);
        assert_eq!(state.ball.vel.y, -5.0);

        tick(&mut state, &InputState::default(), Field::default(), 0.0);
        assert_eq!(state.ball.pos.y, 588.0);
        assert_eq!(state.ball.vel.y, -5.0);
    }

    #[test]
    fn test_top_wall_bounce() {
        let mut state = new_state(Variant::Streak);
        park_paddles(&mut state);
        state.ball.pos = Vec2::new(400.0, 12.0);
        state.ball.vel = Vec2::new(0.0, -5.0);

        tick(&mut state, &InputState::default(), Field::default(), 0.0);
        assert_eq!(state.ball.pos.y, 7.0);
        assert_eq!(state.ball.vel.y, 5.0);
    }

    #[test]
    fn test_user_paddle_clamped_at_top() {
        let mut state = new_state(Variant::Streak);
        state.user.y = 0.0;
        let input = InputState {
            move_up: true,
            move_down: false,
        };
        tick(&mut state, &input, Field::default(), 0.0);
        assert_eq!(state.user.y, 0.0);

        state.user.y = 4.0;
        tick(&mut state, &input, Field::default(), 0.0);
        assert_eq!(state.user.y, 0.0);
    }

    #[test]
    fn test_user_paddle_clamped_at_bottom() {
        let mut paddle = Paddle::new(Side::User, Field::default(), &Tuning::default());
        let down = InputState {
            move_up: false,
            move_down: true,
        };
        paddle.y = 476.0;
        move_user_paddle(&mut paddle, &down, 8.0, Field::default());
        assert_eq!(paddle.y, 480.0);
        move_user_paddle(&mut paddle, &down, 8.0, Field::default());
        assert_eq!(paddle.y, 480.0);
    }

    #[test]
    fn test_both_keys_cancel() {
        let mut paddle = Paddle::new(Side::User, Field::default(), &Tuning::default());
        let both = InputState {
            move_up: true,
            move_down: true,
        };
        move_user_paddle(&mut paddle, &both, 8.0, Field::default());
        assert_eq!(paddle.y, 240.0);
    }

    #[test]
    fn test_enlarged_paddle_on_short_field() {
        let mut paddle = Paddle::new(Side::User, Field::default(), &Tuning::default());
        paddle.height = 240.0;
        let field = Field::new(300.0, 200.0).unwrap();
        let down = InputState {
            move_up: false,
            move_down: true,
        };
        move_user_paddle(&mut paddle, &down, 8.0, field);
        assert_eq!(paddle.y, 0.0);
    }

    #[test]
    fn test_center_hit_on_user_paddle() {
        let mut state = new_state(Variant::Streak);
        state.ball.pos = Vec2::new(30.0, 300.0);
        state.ball.vel = Vec2::new(-5.0, 0.0);

        let events = tick(&mut state, &InputState::default(), Field::default(), 0.0);

        assert_eq!(
            events,
            vec![GameEvent::PaddleHit {
                side: Side::User,
                speed: 5.2
            }]
        );
        assert_eq!(state.ball.vel, Vec2::new(5.0, 0.0));
        assert_eq!(state.ball.speed, 5.2);
    }

    #[test]
    fn test_edge_hit_on_opponent_paddle() {
        let mut state = new_state(Variant::Streak);
        state.com_speed_coefficient = 0.0;
        // Opponent spans y 240..360; hit at its bottom edge
        state.ball.pos = Vec2::new(770.0, 360.0);
        state.ball.vel = Vec2::new(5.0, 0.0);

        tick(&mut state, &InputState::default(), Field::default(), 0.0);

        let expected = 5.0 * std::f32::consts::FRAC_1_SQRT_2;
        assert!((state.ball.vel.x + expected).abs() < 1e-4);
        assert!((state.ball.vel.y - expected).abs() < 1e-4);
    }

    #[test]
    fn test_speed_capped() {
        let mut state = new_state(Variant::Streak);
        state.ball.pos = Vec2::new(30.0, 300.0);
        state.ball.vel = Vec2::new(-5.0, 0.0);
        state.ball.speed = 39.9;

        tick(&mut state, &InputState::default(), Field::default(), 0.0);
        assert_eq!(state.ball.speed, 40.0);
        assert!((state.ball.vel.x - 39.9).abs() < 1e-4);
    }

    #[test]
    fn test_opponent_tracks_ball() {
        let mut state = new_state(Variant::Streak);
        state.ball.pos = Vec2::new(400.0, 100.0);
        state.ball.vel = Vec2::ZERO;
        assert_eq!(state.com_speed_coefficient, 0.03);

        tick(&mut state, &InputState::default(), Field::default(), 0.0);
        assert!((state.opponent.y - 234.0).abs() < 1e-4);
    }

    #[test]
    fn test_streak_power_up_lifecycle() {
        let mut state = new_state(Variant::Streak);
        park_paddles(&mut state);
        let field = Field::default();
        let input = InputState::default();

        let mut activated = Vec::new();
        for point in 0..3 {
            state.ball.pos = Vec2::new(795.0, 300.0);
            state.ball.vel = Vec2::new(5.0, 0.0);
            let events = tick(&mut state, &input, field, 1000.0 * point as f64);
            activated.extend(
                events
                    .into_iter()
                    .filter(|e| matches!(e, GameEvent::PowerUpActivated(_))),
            );
        }

        assert_eq!(state.user.score, 3);
        assert_eq!(activated, vec![GameEvent::PowerUpActivated(PowerUpKind::EnlargePaddle)]);
        assert_eq!(state.user.height, 240.0);

        // Started at 2000ms, lasts 5000ms
        let events = tick(&mut state, &input, field, 7000.0);
        assert!(!events.contains(&GameEvent::PowerUpExpired(PowerUpKind::EnlargePaddle)));
        let events = tick(&mut state, &input, field, 7001.0);
        assert!(events.contains(&GameEvent::PowerUpExpired(PowerUpKind::EnlargePaddle)));
        assert_eq!(state.user.height, 120.0);
    }

    #[test]
    fn test_lead_power_up_enlarges_opponent() {
        let mut state = new_state(Variant::Lead);
        park_paddles(&mut state);
        state.opponent.score = 2;
        state.user.score = 0;
        state.ball.pos = Vec2::new(5.0, 300.0);
        state.ball.vel = Vec2::new(-5.0, 0.0);

        let events = tick(&mut state, &InputState::default(), Field::default(), 0.0);

        assert_eq!(
            events,
            vec![
                GameEvent::Scored { side: Side::Opponent },
                GameEvent::PowerUpActivated(PowerUpKind::EnlargeOpponentPaddle),
            ]
        );
        assert_eq!(state.opponent.height, 240.0);
    }

    #[test]
    fn test_resize_reanchors_opponent() {
        let mut state = new_state(Variant::Streak);
        let field = Field::new(400.0, 300.0).unwrap();
        tick(&mut state, &InputState::default(), field, 0.0);
        assert_eq!(state.opponent.x, 382.0);
    }
}
