//! Ball/paddle collision detection and response
//!
//! The ball is treated as its bounding square for overlap purposes. Edges
//! are open: a ball that only touches a paddle does not collide with it.

use std::f32::consts::FRAC_PI_4;

use glam::Vec2;

use super::state::{Ball, Paddle};

/// True if the ball's bounding square overlaps the paddle rectangle
pub fn collides(ball: &Ball, paddle: &Paddle) -> bool {
    ball.pos.x + ball.radius > paddle.left()
        && ball.pos.x - ball.radius < paddle.right()
        && ball.pos.y + ball.radius > paddle.top()
        && ball.pos.y - ball.radius < paddle.bottom()
}

/// Bounce angle for a hit at `ball_y` on `paddle`.
///
/// Linear in the offset from the paddle center: 0 at the center, ±π/4 at
/// the edges. Hits beyond the edge (possible since the ball has extent)
/// give proportionally steeper angles.
pub fn bounce_angle(ball_y: f32, paddle: &Paddle) -> f32 {
    let offset = ball_y - paddle.center_y();
    FRAC_PI_4 * (offset / (paddle.height / 2.0))
}

/// Outgoing velocity for a paddle hit.
///
/// `direction` is +1 when bouncing off the left paddle and -1 for the right.
/// The result always has magnitude `speed`.
pub fn reflect_velocity(angle: f32, speed: f32, direction: f32) -> Vec2 {
    Vec2::new(direction * speed * angle.cos(), speed * angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::field::Field;
    use crate::sim::state::Side;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    fn paddle_at(x: f32, y: f32) -> Paddle {
        let mut paddle = Paddle::new(Side::User, Field::default(), &Tuning::default());
        paddle.x = x;
        paddle.y = y;
        paddle
    }

    fn ball_at(x: f32, y: f32) -> Ball {
        let mut ball = Ball::new(Field::default(), &Tuning::default());
        ball.pos = Vec2::new(x, y);
        ball
    }

    #[test]
    fn test_overlap_detected() {
        let paddle = paddle_at(0.0, 240.0);
        assert!(collides(&ball_at(20.0, 300.0), &paddle));
    }

    #[test]
    fn test_ball_fully_inside_paddle() {
        let mut paddle = paddle_at(0.0, 240.0);
        paddle.width = 60.0;
        assert!(collides(&ball_at(30.0, 300.0), &paddle));
    }

    #[test]
    fn test_ball_fully_outside_paddle() {
        let paddle = paddle_at(0.0, 240.0);
        assert!(!collides(&ball_at(400.0, 300.0), &paddle));
        assert!(!collides(&ball_at(9.0, 100.0), &paddle));
        assert!(!collides(&ball_at(9.0, 500.0), &paddle));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        // Paddle spans x 0..18, y 240..360; ball radius 10
        let paddle = paddle_at(0.0, 240.0);
        // Left edge of ball exactly on right edge of paddle
        assert!(!collides(&ball_at(28.0, 300.0), &paddle));
        // Bottom of ball exactly on top of paddle
        assert!(!collides(&ball_at(9.0, 230.0), &paddle));
        // Top of ball exactly on bottom of paddle
        assert!(!collides(&ball_at(9.0, 370.0), &paddle));
        // A hair closer overlaps
        assert!(collides(&ball_at(27.9, 300.0), &paddle));
        assert!(collides(&ball_at(9.0, 230.1), &paddle));
    }

    #[test]
    fn test_corner_square_overlap_counts() {
        // Square approximation: the corner region counts even though the
        // true circle would miss it
        let paddle = paddle_at(0.0, 240.0);
        assert!(collides(&ball_at(25.0, 233.0), &paddle));
    }

    #[test]
    fn test_bounce_angle_range() {
        let paddle = paddle_at(0.0, 240.0);
        assert_eq!(bounce_angle(300.0, &paddle), 0.0);
        assert!((bounce_angle(360.0, &paddle) - FRAC_PI_4).abs() < 1e-6);
        assert!((bounce_angle(240.0, &paddle) + FRAC_PI_4).abs() < 1e-6);
    }

    #[test]
    fn test_reflect_direction() {
        let v = reflect_velocity(0.0, 5.0, 1.0);
        assert_eq!(v, Vec2::new(5.0, 0.0));
        let v = reflect_velocity(0.0, 5.0, -1.0);
        assert_eq!(v, Vec2::new(-5.0, 0.0));
    }

    proptest! {
        #[test]
        fn reflection_preserves_speed(
            offset in -1.0f32..1.0,
            speed in 5.0f32..40.0,
            left in any::<bool>(),
        ) {
            let paddle = paddle_at(0.0, 240.0);
            let ball_y = paddle.center_y() + offset * paddle.height / 2.0;
            let angle = bounce_angle(ball_y, &paddle);
            prop_assert!(angle.abs() <= FRAC_PI_4 + 1e-6);

            let direction = if left { 1.0 } else { -1.0 };
            let v = reflect_velocity(angle, speed, direction);
            let rel = (v.length_squared() - speed * speed).abs() / (speed * speed);
            prop_assert!(rel < 1e-5);
            prop_assert_eq!(v.x.signum(), direction);
        }
    }
}
