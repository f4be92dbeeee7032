//! Match simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - One explicit `GameState` per match, no globals
//! - Seeded RNG only
//! - Field bounds passed in every frame

pub mod ai;
pub mod collision;
pub mod field;
pub mod powerup;
pub mod state;
pub mod tick;
pub mod trail;

pub use ai::track_ball;
pub use collision::{bounce_angle, collides, reflect_velocity};
pub use field::Field;
pub use powerup::{ActivePowerUp, PowerUpEffect, PowerUpEngine, PowerUpKind, TriggerRule};
pub use state::{Ball, Color, GameEvent, GameState, InputState, Paddle, Side};
pub use tick::{move_user_paddle, tick};
pub use trail::Trail;
