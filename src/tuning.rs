//! Data-driven game balance
//!
//! Every magnitude the simulation applies per frame lives here. Nothing is
//! scaled by elapsed time, so game speed follows the display refresh rate.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{GameError, Result};
use crate::settings::Difficulty;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Paddles ===
    pub paddle_width: f32,
    /// Base height; power-ups multiply it and expiry restores it
    pub paddle_height: f32,
    /// Pixels per frame while a movement key is held
    pub paddle_speed: f32,

    // === Ball ===
    pub ball_radius: f32,
    pub initial_ball_speed: f32,
    pub max_ball_speed: f32,
    /// Added to ball speed on each paddle hit
    pub speed_increment: f32,

    // === Opponent ===
    /// Fraction of the distance to the ball the opponent covers each frame.
    /// `None` takes the value of the chosen difficulty.
    pub com_speed_coefficient: Option<f32>,

    // === Power-ups ===
    pub power_up_duration_ms: f64,
    pub enlarge_factor: f32,

    // === Presentation ===
    pub trail_length: usize,
    pub net_width: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_speed: PADDLE_SPEED,

            ball_radius: BALL_RADIUS,
            initial_ball_speed: BALL_START_SPEED,
            max_ball_speed: BALL_MAX_SPEED,
            speed_increment: PADDLE_BOOST,

            com_speed_coefficient: None,

            power_up_duration_ms: POWER_UP_DURATION_MS,
            enlarge_factor: ENLARGE_FACTOR,

            trail_length: TRAIL_LENGTH,
            net_width: NET_WIDTH,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON object over the defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!("Loaded tuning overrides");
        Ok(tuning)
    }

    /// Opponent coefficient: the explicit override, else the difficulty's
    pub fn com_speed(&self, difficulty: Difficulty) -> f32 {
        self.com_speed_coefficient
            .unwrap_or_else(|| difficulty.com_speed())
    }

    /// Reject values that would break the physics invariants
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("ball_radius", self.ball_radius),
            ("initial_ball_speed", self.initial_ball_speed),
            ("enlarge_factor", self.enlarge_factor),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(GameError::InvalidTuning(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        let non_negative = [
            ("paddle_speed", self.paddle_speed),
            ("speed_increment", self.speed_increment),
            ("com_speed_coefficient", self.com_speed_coefficient.unwrap_or(0.0)),
            ("net_width", self.net_width),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(GameError::InvalidTuning(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }

        if !(self.max_ball_speed >= self.initial_ball_speed) {
            return Err(GameError::InvalidTuning(format!(
                "max_ball_speed ({}) is below initial_ball_speed ({})",
                self.max_ball_speed, self.initial_ball_speed
            )));
        }
        if !(self.power_up_duration_ms.is_finite() && self.power_up_duration_ms >= 0.0) {
            return Err(GameError::InvalidTuning(format!(
                "power_up_duration_ms must not be negative, got {}",
                self.power_up_duration_ms
            )));
        }
        if self.trail_length == 0 {
            return Err(GameError::InvalidTuning("trail_length must be at least 1".into()));
        }
        Ok(())
    }
}
