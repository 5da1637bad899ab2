//! Roach entities: type table, wander/flee steering and damage
//!
//! A roach spawns just outside one screen edge, wanders between interior
//! waypoints, and bolts for the nearest edge once it has been alive for
//! [`FLEE_AFTER_SECS`]. Killed roaches stay on the floor and fade out.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{deg_to_rad, normalize_angle, random_range, steer_heading, wander_jitter};

/// Closed set of roach types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoachKind {
    Common,
    Hardened,
    Elite,
    Chiller,
    Hazard,
    Mender,
    Prismatic,
}

/// Per-type spawn parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoachConfig {
    pub hp: u8,
    pub score: u32,
    /// Speed at difficulty 1.0 (pixels/s)
    pub base_speed: f32,
    pub scale: f32,
    /// Unscaled body width and height
    pub size: Vec2,
    /// Body colour (linear RGBA); prismatic overrides it with a hue cycle
    pub color: [f32; 4],
}

impl RoachKind {
    pub const ALL: [RoachKind; 7] = [
        RoachKind::Common,
        RoachKind::Hardened,
        RoachKind::Elite,
        RoachKind::Chiller,
        RoachKind::Hazard,
        RoachKind::Mender,
        RoachKind::Prismatic,
    ];

    pub fn config(self) -> RoachConfig {
        match self {
            RoachKind::Common => RoachConfig {
                hp: 1,
                score: 1,
                base_speed: 100.0,
                scale: 1.0,
                size: Vec2::new(20.0, 40.0),
                color: rgb(0x5D4037),
            },
            RoachKind::Hardened => RoachConfig {
                hp: 3,
                score: 5,
                base_speed: 150.0,
                scale: 1.2,
                size: Vec2::new(25.0, 50.0),
                color: rgb(0xB71C1C),
            },
            RoachKind::Elite => RoachConfig {
                hp: 5,
                score: 10,
                base_speed: 80.0,
                scale: 2.0,
                size: Vec2::new(40.0, 80.0),
                color: rgb(0xFFD700),
            },
            RoachKind::Chiller => RoachConfig {
                hp: 1,
                score: 2,
                base_speed: 110.0,
                scale: 1.0,
                size: Vec2::new(20.0, 40.0),
                color: rgb(0x29B6F6),
            },
            RoachKind::Hazard => RoachConfig {
                hp: 1,
                score: 0,
                base_speed: 90.0,
                scale: 1.1,
                size: Vec2::new(22.0, 45.0),
                color: rgb(0x9E9E9E),
            },
            RoachKind::Mender => RoachConfig {
                hp: 1,
                score: 1,
                base_speed: 130.0,
                scale: 0.9,
                size: Vec2::new(18.0, 38.0),
                color: rgb(0x66BB6A),
            },
            RoachKind::Prismatic => RoachConfig {
                hp: 1,
                score: 5,
                base_speed: 240.0,
                scale: 0.8,
                size: Vec2::new(18.0, 38.0),
                color: rgb(0xFFFFFF),
            },
        }
    }
}

/// Unpack a 0xRRGGBB colour into RGBA floats
pub const fn rgb(hex: u32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
        1.0,
    ]
}

/// Lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoachState {
    Alive,
    Expired,
}

/// Movement mode while alive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Behavior {
    Wander,
    Flee,
}

/// Outcome of a single hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitResult {
    Killed,
    Wounded,
    NoEffect,
}

/// A roach entity
#[derive(Debug, Clone)]
pub struct Roach {
    pub id: u32,
    pub kind: RoachKind,
    pub pos: Vec2,
    /// Heading in radians, (-π, π]
    pub heading: f32,
    /// Current effective speed
    pub speed: f32,
    /// Type speed scaled by difficulty at spawn
    pub base_speed: f32,
    pub hp: u8,
    pub max_hp: u8,
    pub score: u32,
    pub scale: f32,
    pub size: Vec2,
    pub state: RoachState,
    pub behavior: Behavior,
    pub time_since_death: f32,
    pub opacity: f32,
    pub time_alive: f32,
    /// Seconds of chill remaining (0 = not chilled)
    pub chill_timer: f32,
    pub waypoint: Vec2,
    /// Leg animation phase
    pub leg_phase: f32,
    /// Prismatic hue in degrees [0, 360)
    pub hue: f32,
    /// Set when the roach should leave the live collection
    pub remove: bool,
}

impl Roach {
    /// Create a roach at an explicit position and heading
    pub fn new(id: u32, kind: RoachKind, pos: Vec2, heading: f32, difficulty: f32) -> Self {
        let config = kind.config();
        let base_speed = config.base_speed * difficulty;
        Self {
            id,
            kind,
            pos,
            heading: normalize_angle(heading),
            speed: base_speed,
            base_speed,
            hp: config.hp,
            max_hp: config.hp,
            score: config.score,
            scale: config.scale,
            size: config.size,
            state: RoachState::Alive,
            behavior: Behavior::Wander,
            time_since_death: 0.0,
            opacity: 1.0,
            time_alive: 0.0,
            chill_timer: 0.0,
            waypoint: pos,
            leg_phase: 0.0,
            hue: 0.0,
            remove: false,
        }
    }

    /// Spawn just outside a random screen edge, heading inward
    pub fn spawn<R: Rng + ?Sized>(
        id: u32,
        kind: RoachKind,
        bounds: Vec2,
        difficulty: f32,
        rng: &mut R,
    ) -> Self {
        let (w, h) = (bounds.x, bounds.y);
        let (pos, heading_deg) = match rng.random_range(0..4u32) {
            // Top, heading down
            0 => (
                Vec2::new(random_range(rng, 0.0, w), -SPAWN_EDGE_BUFFER),
                random_range(rng, 45.0, 135.0),
            ),
            // Right, heading left
            1 => (
                Vec2::new(w + SPAWN_EDGE_BUFFER, random_range(rng, 0.0, h)),
                random_range(rng, 135.0, 225.0),
            ),
            // Bottom, heading up
            2 => (
                Vec2::new(random_range(rng, 0.0, w), h + SPAWN_EDGE_BUFFER),
                random_range(rng, 225.0, 315.0),
            ),
            // Left, heading right
            _ => (
                Vec2::new(-SPAWN_EDGE_BUFFER, random_range(rng, 0.0, h)),
                random_range(rng, -45.0, 45.0),
            ),
        };

        let mut roach = Self::new(id, kind, pos, deg_to_rad(heading_deg), difficulty);
        roach.waypoint = Vec2::new(
            random_range(rng, w * 0.2, w * 0.8),
            random_range(rng, h * 0.2, h * 0.8),
        );
        roach
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.state == RoachState::Alive
    }

    #[inline]
    pub fn is_chilled(&self) -> bool {
        self.chill_timer > 0.0
    }

    /// Hit-test radius around the roach centre
    #[inline]
    pub fn hit_radius(&self) -> f32 {
        self.size.x * self.scale
    }

    /// Start (or restart) the chill countdown. No effect on expired roaches.
    pub fn apply_chill(&mut self) {
        if !self.is_alive() {
            return;
        }
        self.chill_timer = CHILL_SECS;
        self.speed = self.base_speed * CHILL_SPEED_FACTOR;
    }

    /// Take one point of damage
    pub fn apply_hit(&mut self) -> HitResult {
        if !self.is_alive() {
            return HitResult::NoEffect;
        }
        self.hp = self.hp.saturating_sub(1);
        if self.hp == 0 {
            self.expire();
            HitResult::Killed
        } else {
            HitResult::Wounded
        }
    }

    fn expire(&mut self) {
        self.state = RoachState::Expired;
        self.hp = 0;
        self.chill_timer = 0.0;
        self.time_since_death = 0.0;
    }

    /// Advance one tick
    pub fn update<R: Rng + ?Sized>(&mut self, dt: f32, bounds: Vec2, rng: &mut R) {
        if !self.is_alive() {
            self.time_since_death += dt;
            if self.time_since_death >= FADE_OUT_SECS {
                self.opacity = 0.0;
                self.remove = true;
            } else {
                self.opacity = 1.0 - self.time_since_death / FADE_OUT_SECS;
            }
            return;
        }

        if self.kind == RoachKind::Prismatic {
            self.hue = (self.hue + 360.0 * dt).rem_euclid(360.0);
        }

        self.time_alive += dt;
        if self.time_alive > FLEE_AFTER_SECS && self.behavior == Behavior::Wander {
            self.start_fleeing(bounds, rng);
        }

        if self.is_chilled() {
            self.chill_timer = (self.chill_timer - dt).max(0.0);
        }
        self.speed = if self.is_chilled() {
            self.base_speed * CHILL_SPEED_FACTOR
        } else {
            self.base_speed
        };

        // Steer toward the waypoint
        let to_waypoint = self.waypoint - self.pos;
        let target_heading = to_waypoint.y.atan2(to_waypoint.x);
        let turn_rate = match self.behavior {
            Behavior::Wander => WANDER_TURN_RATE,
            Behavior::Flee => FLEE_TURN_RATE,
        };
        self.heading = steer_heading(self.heading, target_heading, turn_rate, dt);
        if self.behavior == Behavior::Wander {
            self.heading = normalize_angle(self.heading + wander_jitter(rng, dt));
        }

        self.pos += Vec2::new(self.heading.cos(), self.heading.sin()) * self.speed * dt;

        let anim_rate = if self.is_chilled() {
            CHILL_SPEED_FACTOR
        } else {
            1.0
        };
        self.leg_phase += LEG_PHASE_RATE * dt * anim_rate;

        match self.behavior {
            Behavior::Flee => {
                if self.pos.x < -ESCAPE_MARGIN
                    || self.pos.x > bounds.x + ESCAPE_MARGIN
                    || self.pos.y < -ESCAPE_MARGIN
                    || self.pos.y > bounds.y + ESCAPE_MARGIN
                {
                    self.remove = true;
                }
            }
            Behavior::Wander => {
                if to_waypoint.length() < WAYPOINT_REACHED_RADIUS {
                    self.waypoint = Vec2::new(
                        random_range(rng, WAYPOINT_MARGIN, bounds.x - WAYPOINT_MARGIN),
                        random_range(rng, WAYPOINT_MARGIN, bounds.y - WAYPOINT_MARGIN),
                    );
                }
            }
        }
    }

    /// Pick a far-off waypoint along the ray from the screen centre
    fn start_fleeing<R: Rng + ?Sized>(&mut self, bounds: Vec2, rng: &mut R) {
        self.behavior = Behavior::Flee;
        let outward = self.pos - bounds * 0.5;
        let dist = outward.length();
        self.waypoint = if dist > 0.0 {
            self.pos + outward / dist * FLEE_DISTANCE
        } else {
            Vec2::new(
                random_range(rng, -FLEE_SCATTER, bounds.x + FLEE_SCATTER),
                random_range(rng, -FLEE_SCATTER, bounds.y + FLEE_SCATTER),
            )
        };
        log::debug!("roach {} ({:?}) fleeing", self.id, self.kind);
    }
}
