//! Game state and core simulation types
//!
//! One `GameState` owns every entity of a match; the tick and the renderer
//! only ever borrow it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::field::Field;
use super::powerup::{PowerUpEngine, PowerUpKind};
use super::trail::Trail;
use crate::settings::Settings;
use crate::tuning::Tuning;

/// Which paddle an entity or event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Player-controlled paddle on the left edge
    User,
    /// AI-controlled paddle on the right edge
    Opponent,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::User => Side::Opponent,
            Side::Opponent => Side::User,
        }
    }
}

/// RGBA color, channels in 0-1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const GRAY: Color = Color::rgb(0.5, 0.5, 0.5);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// CSS `rgba()` string for Canvas2D styles
    pub fn to_css(&self) -> String {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "rgba({}, {}, {}, {})",
            channel(self.r),
            channel(self.g),
            channel(self.b),
            self.a.clamp(0.0, 1.0)
        )
    }
}

/// A paddle pinned to one vertical edge of the field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: Color,
    pub score: u32,
}

impl Paddle {
    /// Create a paddle centered vertically on its side of the field
    pub fn new(side: Side, field: Field, tuning: &Tuning) -> Self {
        let mut paddle = Self {
            side,
            x: 0.0,
            y: field.center_y() - tuning.paddle_height / 2.0,
            width: tuning.paddle_width,
            height: tuning.paddle_height,
            color: Color::WHITE,
            score: 0,
        };
        paddle.anchor(field);
        paddle
    }

    /// Keep the paddle against its own edge of a (possibly resized) field
    pub fn anchor(&mut self, field: Field) {
        self.x = match self.side {
            Side::User => 0.0,
            Side::Opponent => field.width() - self.width,
        };
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Magnitude used to rebuild `vel` on paddle hits
    pub speed: f32,
}

impl Ball {
    /// Ball at the center of the field heading down-right
    pub fn new(field: Field, tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(field.center_x(), field.center_y()),
            vel: Vec2::splat(tuning.initial_ball_speed),
            radius: tuning.ball_radius,
            speed: tuning.initial_ball_speed,
        }
    }

    /// Serve again from the center line after a point.
    ///
    /// The vertical position is random within the field, the horizontal
    /// direction flips and the speed drops back to `initial_speed`. The
    /// velocity magnitude is left as it was.
    pub fn reset<R: Rng>(&mut self, field: Field, initial_speed: f32, rng: &mut R) {
        let low = self.radius;
        let high = field.height() - self.radius;
        self.pos.x = field.center_x();
        self.pos.y = if high > low {
            rng.random_range(low..high)
        } else {
            field.center_y()
        };
        self.vel.x = -self.vel.x;
        self.speed = initial_speed;
    }

    /// Right edge; decides which half (and so which paddle) the ball is in
    #[inline]
    pub fn leading_x(&self) -> f32 {
        self.pos.x + self.radius
    }
}

/// Currently held movement keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub move_up: bool,
    pub move_down: bool,
}

/// Side effects produced by a tick, consumed by audio and logging
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A point was scored by `side`
    Scored { side: Side },
    /// The ball bounced off a paddle; `speed` is the post-hit speed
    PaddleHit { side: Side, speed: f32 },
    PowerUpActivated(PowerUpKind),
    PowerUpExpired(PowerUpKind),
}

/// Complete match state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Balance values captured at session start
    pub tuning: Tuning,
    /// Player paddle (left)
    pub user: Paddle,
    /// AI paddle (right)
    pub opponent: Paddle,
    pub ball: Ball,
    /// Visual history of the ball
    pub trail: Trail,
    pub power_ups: PowerUpEngine,
    /// Opponent tracking coefficient
    pub com_speed_coefficient: f32,
    /// Frames simulated so far
    pub frame: u64,
    /// Serve heights and power-up picks
    pub rng: Pcg32,
}

impl GameState {
    /// Start a match. `tuning` is taken as already validated; `Game::new`
    /// checks it for hosts.
    pub fn new(settings: &Settings, tuning: &Tuning, field: Field) -> Self {
        let tuning = tuning.clone();
        let com_speed_coefficient = tuning.com_speed(settings.difficulty);
        log::info!(
            "New match: variant={}, difficulty={}, opponent coefficient={}, seed={}",
            settings.variant.as_str(),
            settings.difficulty.as_str(),
            com_speed_coefficient,
            settings.seed
        );
        Self {
            user: Paddle::new(Side::User, field, &tuning),
            opponent: Paddle::new(Side::Opponent, field, &tuning),
            ball: Ball::new(field, &tuning),
            trail: Trail::new(tuning.trail_length),
            power_ups: PowerUpEngine::new(settings, &tuning),
            com_speed_coefficient,
            frame: 0,
            rng: Pcg32::seed_from_u64(settings.seed),
            tuning,
        }
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::User => &self.user,
            Side::Opponent => &self.opponent,
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::User => &mut self.user,
            Side::Opponent => &mut self.opponent,
        }
    }

    /// Signed score difference from `side`'s point of view
    pub fn lead(&self, side: Side) -> i64 {
        i64::from(self.paddle(side).score) - i64::from(self.paddle(side.other()).score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_state() -> GameState {
        GameState::new(&Settings::default(), &Tuning::default(), Field::default())
    }

    #[test]
    fn test_initial_layout() {
        let state = new_state();
        assert_eq!(state.user.x, 0.0);
        assert_eq!(state.user.y, 240.0);
        assert_eq!(state.opponent.x, 782.0);
        assert_eq!(state.opponent.y, 240.0);
        assert_eq!(state.ball.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.ball.vel, Vec2::new(5.0, 5.0));
        assert_eq!(state.ball.speed, 5.0);
        assert!(state.trail.is_empty());
        assert!(state.power_ups.active().is_none());
    }

    #[test]
    fn test_difficulty_sets_opponent_coefficient() {
        let settings = Settings::default().with_difficulty(crate::settings::Difficulty::Easy);
        let state = GameState::new(&settings, &Tuning::default(), Field::default());
        assert_eq!(state.com_speed_coefficient, 0.01);
    }

    #[test]
    fn test_tuned_opponent_coefficient_survives_difficulty() {
        let tuning = Tuning::from_json(r#"{ "com_speed_coefficient": 0.2 }"#).unwrap();
        let settings = Settings::default().with_difficulty(crate::settings::Difficulty::Hard);
        let state = GameState::new(&settings, &tuning, Field::default());
        assert_eq!(state.com_speed_coefficient, 0.2);
    }

    #[test]
    fn test_ball_reset() {
        let mut state = new_state();
        state.ball.pos = Vec2::new(805.0, 42.0);
        state.ball.vel = Vec2::new(6.5, -2.0);
        state.ball.speed = 7.0;

        let mut rng = Pcg32::seed_from_u64(7);
        let field = Field::default();
        state.ball.reset(field, 5.0, &mut rng);

        assert_eq!(state.ball.pos.x, 400.0);
        assert!(state.ball.pos.y >= 10.0 && state.ball.pos.y < 590.0);
        assert_eq!(state.ball.vel, Vec2::new(-6.5, -2.0));
        assert_eq!(state.ball.speed, 5.0);
    }

    #[test]
    fn test_ball_reset_on_tiny_field_uses_center() {
        let mut ball = Ball::new(Field::default(), &Tuning::default());
        let field = Field::new(100.0, 15.0).unwrap();
        ball.reset(field, 5.0, &mut Pcg32::seed_from_u64(1));
        assert_eq!(ball.pos.y, 7.5);
    }

    #[test]
    fn test_opponent_anchor_follows_resize() {
        let mut state = new_state();
        state.opponent.anchor(Field::new(400.0, 300.0).unwrap());
        assert_eq!(state.opponent.x, 382.0);
        state.user.anchor(Field::new(400.0, 300.0).unwrap());
        assert_eq!(state.user.x, 0.0);
    }

    #[test]
    fn test_color_css() {
        assert_eq!(Color::RED.to_css(), "rgba(255, 0, 0, 1)");
        assert_eq!(Color::RED.with_alpha(0.5).to_css(), "rgba(255, 0, 0, 0.5)");
    }

    #[test]
    fn test_lead() {
        let mut state = new_state();
        state.user.score = 4;
        state.opponent.score = 1;
        assert_eq!(state.lead(Side::User), 3);
        assert_eq!(state.lead(Side::Opponent), -3);
    }
}
