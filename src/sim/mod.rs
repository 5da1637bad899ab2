//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only, owned by [`GameState`]
//! - Time advances only through [`tick`]
//! - No rendering or platform dependencies

pub mod effects;
pub mod roach;
pub mod slipper;
pub mod spawner;
pub mod state;
pub mod strike;
pub mod tick;

pub use effects::{DebrisTint, Explosion, FloatingText, LabelTint, Particle, Shockwave};
pub use roach::{Behavior, HitResult, Roach, RoachConfig, RoachKind, RoachState};
pub use slipper::Slipper;
pub use state::{GameEvent, GamePhase, GameState, HudSnapshot, PendingSpawn};
pub use strike::{StrikeOutcome, press, resolve_strike};
pub use tick::{TickInput, tick};
