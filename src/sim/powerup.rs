//! Power-up triggers, activation and expiry
//!
//! Lifecycle: inactive -> activated by a scoring trigger -> expires after a
//! fixed duration -> effect reverted -> inactive. At most one is active.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Color, Paddle, Side};
use crate::error::{GameError, Result};
use crate::settings::Settings;
use crate::tuning::Tuning;

/// What a power-up does while active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpEffect {
    /// Multiply the player's paddle height
    EnlargeOwnPaddle,
    /// Multiply the opponent's paddle height
    EnlargeOpponentPaddle,
}

impl PowerUpEffect {
    /// Paddle the effect changes
    pub fn target(&self) -> Side {
        match self {
            PowerUpEffect::EnlargeOwnPaddle => Side::User,
            PowerUpEffect::EnlargeOpponentPaddle => Side::Opponent,
        }
    }

    /// Apply to the target paddle. Only grows a paddle that is at base
    /// height, so repeated activation never compounds.
    pub fn apply(&self, user: &mut Paddle, opponent: &mut Paddle, base_height: f32, factor: f32) {
        let paddle = self.target_mut(user, opponent);
        if paddle.height == base_height {
            paddle.height *= factor;
        }
    }

    /// Restore the target paddle to base height, whatever it is now
    pub fn revert(&self, user: &mut Paddle, opponent: &mut Paddle, base_height: f32) {
        self.target_mut(user, opponent).height = base_height;
    }

    fn target_mut<'a>(&self, user: &'a mut Paddle, opponent: &'a mut Paddle) -> &'a mut Paddle {
        match self.target() {
            Side::User => user,
            Side::Opponent => opponent,
        }
    }
}

/// Power-up definitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    EnlargePaddle,
    EnlargeOpponentPaddle,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 2] = [PowerUpKind::EnlargePaddle, PowerUpKind::EnlargeOpponentPaddle];

    /// Identifier, also shown on screen while active
    pub fn name(&self) -> &'static str {
        match self {
            PowerUpKind::EnlargePaddle => "EnlargePaddle",
            PowerUpKind::EnlargeOpponentPaddle => "EnlargeOpponentPaddle",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            PowerUpKind::EnlargePaddle | PowerUpKind::EnlargeOpponentPaddle => Color::BLUE,
        }
    }

    pub fn effect(&self) -> PowerUpEffect {
        match self {
            PowerUpKind::EnlargePaddle => PowerUpEffect::EnlargeOwnPaddle,
            PowerUpKind::EnlargeOpponentPaddle => PowerUpEffect::EnlargeOpponentPaddle,
        }
    }

    pub fn from_name(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| GameError::UnknownPowerUp(s.to_string()))
    }
}

/// Scoring condition that activates a power-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerRule {
    /// Every `n`th point scored by the player.
    ///
    /// Opponent points leave the count alone unless `reset_on_concede`.
    EveryNPoints { n: u32, reset_on_concede: bool },
    /// Whenever the scorer leads by at least `n`
    LeadBy { n: i64 },
}

impl TriggerRule {
    pub fn every_n_points(n: u32) -> Self {
        TriggerRule::EveryNPoints {
            n,
            reset_on_concede: false,
        }
    }
}

/// The power-up currently in effect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivePowerUp {
    pub kind: PowerUpKind,
    pub started_at_ms: f64,
    pub duration_ms: f64,
}

impl ActivePowerUp {
    /// Strictly past its duration
    pub fn is_expired(&self, now_ms: f64) -> bool {
        now_ms - self.started_at_ms > self.duration_ms
    }
}

/// Trigger bookkeeping plus the active power-up
#[derive(Debug, Clone)]
pub struct PowerUpEngine {
    triggers: Vec<TriggerRule>,
    /// One streak counter per trigger (unused by lead rules)
    streaks: Vec<u32>,
    table: Vec<PowerUpKind>,
    duration_ms: f64,
    base_height: f32,
    factor: f32,
    active: Option<ActivePowerUp>,
}

impl PowerUpEngine {
    pub fn new(settings: &Settings, tuning: &Tuning) -> Self {
        Self {
            streaks: vec![0; settings.triggers.len()],
            triggers: settings.triggers.clone(),
            table: settings.power_ups.clone(),
            duration_ms: tuning.power_up_duration_ms,
            base_height: tuning.paddle_height,
            factor: tuning.enlarge_factor,
            active: None,
        }
    }

    pub fn active(&self) -> Option<&ActivePowerUp> {
        self.active.as_ref()
    }

    pub fn streak(&self, trigger_index: usize) -> Option<u32> {
        self.streaks.get(trigger_index).copied()
    }

    /// Evaluate every trigger after a point. `lead` is the scorer's signed
    /// score difference after the point. Returns true if any rule fired.
    pub fn on_point(&mut self, scorer: Side, lead: i64) -> bool {
        let mut fired = false;
        for (rule, streak) in self.triggers.iter().zip(self.streaks.iter_mut()) {
            match *rule {
                TriggerRule::EveryNPoints {
                    n,
                    reset_on_concede,
                } => match scorer {
                    Side::User => {
                        *streak += 1;
                        if *streak >= n {
                            *streak = 0;
                            fired = true;
                        }
                    }
                    Side::Opponent if reset_on_concede => *streak = 0,
                    Side::Opponent => {}
                },
                TriggerRule::LeadBy { n } => {
                    if lead >= n {
                        fired = true;
                    }
                }
            }
        }
        fired
    }

    /// Pick a power-up at random and apply it.
    ///
    /// Activating while one is already active restarts the timer; if the new
    /// pick targets the other paddle the old effect is reverted first.
    pub fn activate<R: Rng>(
        &mut self,
        rng: &mut R,
        now_ms: f64,
        user: &mut Paddle,
        opponent: &mut Paddle,
    ) -> Option<PowerUpKind> {
        if self.table.is_empty() {
            return None;
        }
        let kind = self.table[rng.random_range(0..self.table.len())];

        if let Some(previous) = self.active {
            if previous.kind.effect().target() != kind.effect().target() {
                previous.kind.effect().revert(user, opponent, self.base_height);
            }
        }

        kind.effect()
            .apply(user, opponent, self.base_height, self.factor);
        self.active = Some(ActivePowerUp {
            kind,
            started_at_ms: now_ms,
            duration_ms: self.duration_ms,
        });
        log::info!("Power-up activated: {}", kind.name());
        Some(kind)
    }

    /// Deactivate once the duration has passed, restoring base height
    pub fn expire(&mut self, now_ms: f64, user: &mut Paddle, opponent: &mut Paddle) -> Option<PowerUpKind> {
        let active = self.active.filter(|a| a.is_expired(now_ms))?;
        active.kind.effect().revert(user, opponent, self.base_height);
        self.active = None;
        log::info!("Power-up expired: {}", active.kind.name());
        Some(active.kind)
    }
}
