//! Paddle Duel - a two-paddle arcade game on a 2D canvas
//!
//! Core modules:
//! - `sim`: Per-frame simulation (physics, collisions, opponent AI, power-ups)
//! - `renderer`: Display list generation and Canvas2D backend
//! - `platform`: Browser/native platform abstraction (input, clock)
//! - `tuning`: Data-driven game balance
//! - `settings`: Variant and difficulty selection
//! - `game`: Frame loop driver tying the simulation to its collaborators

pub mod audio;
pub mod error;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{GameError, Result};
pub use game::Game;
pub use settings::{Difficulty, Settings, Variant};
pub use tuning::Tuning;

/// Reference game constants (per-frame magnitudes)
pub mod consts {
    /// Reference field dimensions (the canvas keeps this aspect ratio)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 18.0;
    pub const PADDLE_HEIGHT: f32 = 120.0;
    /// Pixels per frame while a movement key is held
    pub const PADDLE_SPEED: f32 = 8.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_START_SPEED: f32 = 5.0;
    /// Maximum ball speed
    pub const BALL_MAX_SPEED: f32 = 40.0;
    /// Speed gained on every paddle hit (additive)
    pub const PADDLE_BOOST: f32 = 0.2;

    /// Number of ball positions kept for the fading trail
    pub const TRAIL_LENGTH: usize = 7;

    /// Power-up lifetime in milliseconds
    pub const POWER_UP_DURATION_MS: f64 = 5000.0;
    /// Height multiplier for paddle-enlarging power-ups
    pub const ENLARGE_FACTOR: f32 = 2.0;

    /// Center net
    pub const NET_WIDTH: f32 = 5.0;
    pub const NET_DASH: f32 = 10.0;
    pub const NET_SPACING: f32 = 15.0;
}
