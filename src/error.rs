//! Error types
//!
//! Everything the simulation consumes is generated internally, so the only
//! failures are bad lookups and bad dimensions coming from the host page.

pub type Result<T> = std::result::Result<T, GameError>;

#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Unknown difficulty `{0}` - expected Easy, Medium or Hard")]
    UnknownDifficulty(String),

    #[error("Unknown power-up `{0}`")]
    UnknownPowerUp(String),

    #[error("Unknown game variant `{0}` - expected Streak or Lead")]
    UnknownVariant(String),

    /// Field dimensions must be finite and strictly positive
    #[error("Invalid field size {width}x{height}")]
    InvalidField { width: f32, height: f32 },

    #[error("Invalid tuning : {0}")]
    InvalidTuning(String),

    #[error("Tuning parsing failed : {0}")]
    Json(#[from] serde_json::Error),
}
