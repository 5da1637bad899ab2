//! Session state owned by the director
//!
//! Everything that changes during a session lives in [`GameState`]: the
//! clock, score and lives, the entity collections, the pending swarm queue
//! and the RNG every random draw comes from.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects::{Explosion, FloatingText, Particle, Shockwave};
use super::roach::{Roach, RoachKind, RoachState};
use super::slipper::Slipper;
use crate::consts::*;
use crate::tuning::{Tuning, TuningError};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start
    Ready,
    /// Active gameplay
    Running,
    /// Session ended (time ran out or lives hit zero)
    GameOver,
}

/// Notifications for the audio, presentation and UI collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    SessionStarted,
    /// An accepted strike (hit or miss)
    Impact,
    /// A hazard roach went off
    Explosion,
    SessionEnded { final_score: u64 },
}

/// Read-only values for the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub score: u64,
    /// Remaining time rounded up to whole seconds
    pub time_left: u32,
    pub lives: u8,
    pub phase: GamePhase,
}

/// A queued swarm spawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingSpawn {
    /// Survival time at which this entry fires
    pub fire_at: f32,
    pub kind: RoachKind,
}

/// Complete session state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    /// Play-area size in pixels (width, height)
    pub bounds: Vec2,
    pub phase: GamePhase,
    pub score: u64,
    /// Seconds left on the session clock
    pub time_left: f32,
    pub lives: u8,
    /// Seconds survived this session (drives difficulty)
    pub survival_time: f32,
    /// Speed multiplier for newly spawned roaches
    pub difficulty: f32,
    /// Seconds since the last regular spawn
    pub spawn_timer: f32,
    pub slipper: Slipper,
    /// Live roaches, kept in draw order
    pub roaches: Vec<Roach>,
    pub particles: Vec<Particle>,
    pub shockwaves: Vec<Shockwave>,
    pub labels: Vec<FloatingText>,
    /// Staggered swarm spawns waiting to fire
    pub pending_spawns: Vec<PendingSpawn>,
    pub explosion: Explosion,
    /// Debris cap (from settings/tuning)
    pub max_particles: usize,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed and default tuning
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    /// Create a new game state with custom tuning
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            bounds: Vec2::new(DEFAULT_WIDTH, DEFAULT_HEIGHT),
            phase: GamePhase::Ready,
            score: 0,
            time_left: tuning.time_budget,
            lives: tuning.start_lives,
            survival_time: 0.0,
            difficulty: 1.0,
            spawn_timer: 0.0,
            slipper: Slipper::new(tuning.strike_duration),
            roaches: Vec::new(),
            particles: Vec::new(),
            shockwaves: Vec::new(),
            labels: Vec::new(),
            pending_spawns: Vec::new(),
            explosion: Explosion::default(),
            max_particles: tuning.max_particles,
            events: Vec::new(),
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID (never reused)
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Update the play-area size
    pub fn resize(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.bounds = Vec2::new(width, height);
            log::info!("Play area resized to {}x{}", width, height);
        }
    }

    /// Reset everything and begin a new session
    pub fn start_session(&mut self) {
        if self.is_running() {
            return;
        }
        self.score = 0;
        self.time_left = self.tuning.time_budget;
        self.lives = self.tuning.start_lives;
        self.survival_time = 0.0;
        self.difficulty = 1.0;
        self.spawn_timer = 0.0;
        self.roaches.clear();
        self.particles.clear();
        self.shockwaves.clear();
        self.labels.clear();
        self.pending_spawns.clear();
        self.explosion = Explosion::default();
        self.slipper.striking = false;
        self.slipper.strike_elapsed = 0.0;
        self.phase = GamePhase::Running;
        self.push_event(GameEvent::SessionStarted);
        log::info!("Session started (seed {})", self.seed);
    }

    /// End the session. Only the first call after a start has any effect.
    pub fn end_session(&mut self) {
        if !self.is_running() {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.pending_spawns.clear();
        self.push_event(GameEvent::SessionEnded {
            final_score: self.score,
        });
        log::info!(
            "Session over: score {}, survived {:.1}s",
            self.score,
            self.survival_time
        );
    }

    /// Add (or remove) lives, clamped to [0, max]. Reaching zero ends the session.
    pub fn modify_lives(&mut self, delta: i32) {
        let lives = (self.lives as i32)
            .saturating_add(delta)
            .clamp(0, self.tuning.max_lives as i32);
        self.lives = lives as u8;
        if self.lives == 0 {
            self.end_session();
        }
    }

    /// Extend the session clock
    pub fn add_time(&mut self, secs: f32) {
        self.time_left = (self.time_left + secs).max(0.0);
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            score: self.score,
            time_left: self.time_left.max(0.0).ceil() as u32,
            lives: self.lives,
            phase: self.phase,
        }
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events raised since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Peek at undrained events
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Add a particle unless the cap is reached
    pub(crate) fn push_particle(&mut self, particle: Particle) {
        if self.particles.len() < self.max_particles {
            self.particles.push(particle);
        }
    }

    /// Painter's order: expired roaches first, then by ascending y
    pub fn sort_for_render(&mut self) {
        self.roaches.sort_by(|a, b| {
            let a_dead = a.state == RoachState::Expired;
            let b_dead = b.state == RoachState::Expired;
            b_dead.cmp(&a_dead).then(a.pos.y.total_cmp(&b.pos.y))
        });
    }
}
