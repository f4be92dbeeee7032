//! Game settings and preferences
//!
//! Chosen once at session start; nothing here is persisted.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::sim::powerup::{PowerUpKind, TriggerRule};

/// Opponent reaction tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_name(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" | "med" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(GameError::UnknownDifficulty(s.to_string())),
        }
    }

    /// Opponent tracking coefficient (fraction of the gap closed per frame)
    pub fn com_speed(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.01,
            Difficulty::Medium => 0.03,
            Difficulty::Hard => 0.05,
        }
    }
}

/// Rule sets the game ships with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Variant {
    /// Every third player point enlarges the player's paddle. Silent.
    #[default]
    Streak,
    /// A three point lead (or every third player point) enlarges the
    /// opponent's paddle. Plays sound cues.
    Lead,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Streak => "Streak",
            Variant::Lead => "Lead",
        }
    }

    pub fn from_name(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "streak" => Ok(Variant::Streak),
            "lead" => Ok(Variant::Lead),
            _ => Err(GameError::UnknownVariant(s.to_string())),
        }
    }

    /// Conditions checked after every point
    pub fn triggers(&self) -> Vec<TriggerRule> {
        match self {
            Variant::Streak => vec![TriggerRule::every_n_points(3)],
            Variant::Lead => vec![TriggerRule::LeadBy { n: 3 }, TriggerRule::every_n_points(3)],
        }
    }

    /// Power-ups a trigger may pick from
    pub fn power_ups(&self) -> Vec<PowerUpKind> {
        match self {
            Variant::Streak => vec![PowerUpKind::EnlargePaddle],
            Variant::Lead => vec![PowerUpKind::EnlargeOpponentPaddle],
        }
    }

    /// Opponent tier the variant was tuned around
    pub fn default_difficulty(&self) -> Difficulty {
        match self {
            Variant::Streak => Difficulty::Medium,
            Variant::Lead => Difficulty::Hard,
        }
    }

    /// Whether this variant plays sound cues by default
    pub fn sound_default(&self) -> bool {
        matches!(self, Variant::Lead)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub variant: Variant,
    pub difficulty: Difficulty,
    /// Power-up triggers (defaults to the variant's rules)
    pub triggers: Vec<TriggerRule>,
    /// Power-up table (defaults to the variant's table)
    pub power_ups: Vec<PowerUpKind>,
    pub sound_enabled: bool,
    /// Draw the fading ball trail
    pub trails: bool,
    /// RNG seed (ball serve height and power-up choice)
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_variant(Variant::default())
    }
}

impl Settings {
    /// Create settings from a variant (applies its rules and sound default)
    pub fn from_variant(variant: Variant) -> Self {
        Self {
            variant,
            difficulty: variant.default_difficulty(),
            triggers: variant.triggers(),
            power_ups: variant.power_ups(),
            sound_enabled: variant.sound_default(),
            trails: true,
            seed: 0,
        }
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replace the power-up table by name (e.g. from page attributes)
    pub fn with_power_ups<S: AsRef<str>>(mut self, names: &[S]) -> Result<Self> {
        self.power_ups = names
            .iter()
            .map(|name| PowerUpKind::from_name(name.as_ref()))
            .collect::<Result<_>>()?;
        Ok(self)
    }
}
