//! Short-lived cosmetic entities: debris, chill pulses, floating labels and
//! the explosion flash/shake

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::roach::RoachKind;
use crate::consts::*;
use crate::random_range;

/// Colour lookup for a debris particle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DebrisTint {
    /// Green body fluid
    Fluid,
    /// Shell fragment in the roach's body colour
    Shell(RoachKind),
    /// White spark from a glancing hit
    Spark,
}

/// A debris particle
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub tint: DebrisTint,
    pub life: f32,
    pub max_life: f32,
    pub size: f32,
}

impl Particle {
    /// Spray outward in a random direction
    pub fn burst<R: Rng + ?Sized>(pos: Vec2, tint: DebrisTint, rng: &mut R) -> Self {
        let angle = random_range(rng, 0.0, std::f32::consts::TAU);
        let speed = random_range(rng, PARTICLE_MIN_SPEED, PARTICLE_MAX_SPEED);
        Self {
            pos,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            tint,
            life: PARTICLE_LIFETIME,
            max_life: PARTICLE_LIFETIME,
            size: random_range(rng, 2.0, 6.0),
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.life -= dt;
        if self.life <= 0.0 {
            return;
        }
        self.pos += self.vel * dt;
        // Heavy friction: splatter sticks to the floor
        self.vel *= PARTICLE_FRICTION;
    }

    pub fn is_dead(&self) -> bool {
        self.life <= 0.0
    }

    pub fn opacity(&self) -> f32 {
        (self.life / self.max_life).clamp(0.0, 1.0)
    }
}

/// Expanding chill ring
#[derive(Debug, Clone)]
pub struct Shockwave {
    pub origin: Vec2,
    pub radius: f32,
    pub max_radius: f32,
    pub speed: f32,
    pub life: f32,
    pub max_life: f32,
}

impl Shockwave {
    pub fn new(origin: Vec2, max_radius: f32) -> Self {
        Self {
            origin,
            radius: 0.0,
            max_radius,
            speed: PULSE_SPEED,
            life: PULSE_LIFETIME,
            max_life: PULSE_LIFETIME,
        }
    }

    pub fn update(&mut self, dt: f32) {
        if self.is_done() {
            return;
        }
        self.radius += self.speed * dt;
        self.life -= dt;
    }

    pub fn is_done(&self) -> bool {
        self.radius >= self.max_radius || self.life <= 0.0
    }

    pub fn opacity(&self) -> f32 {
        (self.life / self.max_life).clamp(0.0, 1.0)
    }
}

/// Floating label colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelTint {
    Heal,
    Bonus,
}

/// Text that rises and fades
#[derive(Debug, Clone)]
pub struct FloatingText {
    pub pos: Vec2,
    pub text: String,
    pub tint: LabelTint,
    pub life: f32,
    pub max_life: f32,
    /// Vertical velocity (negative = up)
    pub velocity: f32,
}

impl FloatingText {
    pub fn new(pos: Vec2, text: impl Into<String>, tint: LabelTint) -> Self {
        Self {
            pos,
            text: text.into(),
            tint,
            life: LABEL_LIFETIME,
            max_life: LABEL_LIFETIME,
            velocity: -LABEL_RISE_SPEED,
        }
    }

    pub fn update(&mut self, dt: f32) {
        if self.is_done() {
            return;
        }
        self.pos.y += self.velocity * dt;
        self.life -= dt;
    }

    pub fn is_done(&self) -> bool {
        self.life <= 0.0
    }

    pub fn opacity(&self) -> f32 {
        (self.life / self.max_life).clamp(0.0, 1.0)
    }
}

/// Screen flash + shake after a hazard detonates
#[derive(Debug, Clone, Default)]
pub struct Explosion {
    pub flash_left: f32,
    pub shake_elapsed: f32,
    pub shake_duration: f32,
    /// Current shake displacement, re-rolled every tick
    pub offset: Vec2,
}

impl Explosion {
    pub fn trigger(&mut self) {
        self.flash_left = FLASH_SECS;
        self.shake_elapsed = 0.0;
        self.shake_duration = SHAKE_SECS;
    }

    pub fn is_shaking(&self) -> bool {
        self.shake_elapsed < self.shake_duration
    }

    pub fn flash_opacity(&self) -> f32 {
        if self.flash_left > 0.0 { FLASH_OPACITY } else { 0.0 }
    }

    pub fn update<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) {
        self.flash_left = (self.flash_left - dt).max(0.0);

        if !self.is_shaking() {
            self.offset = Vec2::ZERO;
            return;
        }
        self.shake_elapsed += dt;
        if self.is_shaking() {
            let intensity = SHAKE_INTENSITY * (1.0 - self.shake_elapsed / self.shake_duration);
            self.offset = Vec2::new(
                (rng.random::<f32>() - 0.5) * intensity,
                (rng.random::<f32>() - 0.5) * intensity,
            );
        } else {
            self.offset = Vec2::ZERO;
        }
    }
}
