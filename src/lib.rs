//! Roach Swat - a real-time roach-swatting arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, hit resolution, session state)
//! - `renderer`: Draw surface, scene composition and the WebGPU pipeline
//! - `frame`: Per-frame driver tying the simulation to the renderer
//! - `tuning`: Data-driven session balance
//! - `settings`: Presentation and audio preferences

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod frame;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{QualityPreset, Settings};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;
use rand::Rng;

/// Game configuration constants
pub mod consts {
    /// Default play area (until the frontend reports a real size)
    pub const DEFAULT_WIDTH: f32 = 800.0;
    pub const DEFAULT_HEIGHT: f32 = 600.0;

    /// Roach lifecycle
    pub const FLEE_AFTER_SECS: f32 = 3.0;
    pub const FADE_OUT_SECS: f32 = 3.0;
    pub const CHILL_SECS: f32 = 5.0;
    pub const CHILL_SPEED_FACTOR: f32 = 0.5;

    /// Roach spawning and steering
    pub const SPAWN_EDGE_BUFFER: f32 = 50.0;
    pub const WAYPOINT_REACHED_RADIUS: f32 = 50.0;
    pub const WAYPOINT_MARGIN: f32 = 50.0;
    pub const FLEE_DISTANCE: f32 = 2000.0;
    pub const FLEE_SCATTER: f32 = 500.0;
    pub const ESCAPE_MARGIN: f32 = 100.0;
    pub const WANDER_TURN_RATE: f32 = 2.0;
    pub const FLEE_TURN_RATE: f32 = 5.0;
    /// Peak wander jitter in radians per second
    pub const WANDER_JITTER: f32 = 2.0;
    /// Leg animation phase rate (radians per second)
    pub const LEG_PHASE_RATE: f32 = 300.0;

    /// Difficulty curve
    pub const DIFFICULTY_RAMP_SECS: f32 = 60.0;
    pub const SPAWN_INTERVAL_START: f32 = 1.5;
    pub const SPAWN_INTERVAL_FLOOR: f32 = 0.3;
    /// Seconds of survival that shave one second off the spawn interval
    pub const SPAWN_INTERVAL_DECAY_SECS: f32 = 100.0;

    /// Debris
    pub const PARTICLE_LIFETIME: f32 = 3.0;
    pub const PARTICLE_MIN_SPEED: f32 = 50.0;
    pub const PARTICLE_MAX_SPEED: f32 = 250.0;
    pub const PARTICLE_FRICTION: f32 = 0.9;
    pub const LETHAL_FLUID_PARTICLES: usize = 15;
    pub const LETHAL_SHELL_PARTICLES: usize = 5;
    pub const GLANCING_PARTICLES: usize = 3;

    /// Chill pulse
    pub const PULSE_SPEED: f32 = 800.0;
    pub const PULSE_LIFETIME: f32 = 1.0;
    /// Pulse radius relative to the longest play-area side
    pub const PULSE_REACH: f32 = 1.5;

    /// Floating labels
    pub const LABEL_LIFETIME: f32 = 1.0;
    pub const LABEL_RISE_SPEED: f32 = 50.0;

    /// Explosion presentation
    pub const FLASH_SECS: f32 = 0.1;
    pub const FLASH_OPACITY: f32 = 0.5;
    pub const SHAKE_SECS: f32 = 0.5;
    pub const SHAKE_INTENSITY: f32 = 10.0;
}

/// Uniform sample in `[min, max)`; degenerate ranges return `min`
#[inline]
pub fn random_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + rng.random::<f32>() * (max - min)
}

/// Convert degrees to radians
#[inline]
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * std::f32::consts::PI / 180.0
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (b - a).length()
}

/// Normalized angle to (-π, π]
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI { wrapped - TAU } else { wrapped }
}

/// Shortest signed rotation taking `from` onto `to`, in (-π, π]
#[inline]
pub fn shortest_angle_diff(from: f32, to: f32) -> f32 {
    normalize_angle(to - from)
}

/// Turn `heading` toward `target` by `rate * dt` of the remaining gap.
/// The fraction is capped at 1 so a long step lands on the target.
#[inline]
pub fn steer_heading(heading: f32, target: f32, rate: f32, dt: f32) -> f32 {
    let diff = shortest_angle_diff(heading, target);
    normalize_angle(heading + diff * (rate * dt).min(1.0))
}

/// Random wander wobble for one step, within `±WANDER_JITTER * dt / 2`
#[inline]
pub fn wander_jitter<R: Rng + ?Sized>(rng: &mut R, dt: f32) -> f32 {
    (rng.random::<f32>() - 0.5) * consts::WANDER_JITTER * dt
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::f32::consts::PI;

    #[test]
    fn test_deg_to_rad() {
        assert!((deg_to_rad(180.0) - PI).abs() < 1e-6);
        assert!((deg_to_rad(-45.0) + PI / 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_distance() {
        assert_eq!(distance(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn test_random_range_bounds() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..1000 {
            let v = random_range(&mut rng, 20.0, 80.0);
            assert!((20.0..80.0).contains(&v));
        }
        assert_eq!(random_range(&mut rng, 5.0, 5.0), 5.0);
    }

    #[test]
    fn test_shortest_angle_diff_wraps() {
        // 170° to -170° is a 20° turn, not 340°
        let d = shortest_angle_diff(deg_to_rad(170.0), deg_to_rad(-170.0));
        assert!((d - deg_to_rad(20.0)).abs() < 1e-4);
        // Exactly opposite resolves to +π
        let d = shortest_angle_diff(0.0, PI);
        assert!((d - PI).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_angle_diff_in_half_open_range(a in -50.0f32..50.0, b in -50.0f32..50.0) {
            let d = shortest_angle_diff(a, b);
            prop_assert!(d > -PI && d <= PI + 1e-5);
        }

        #[test]
        fn prop_steering_converges(
            a in -PI..PI,
            b in -PI..PI,
            rate in prop_oneof![Just(consts::WANDER_TURN_RATE), Just(consts::FLEE_TURN_RATE)],
        ) {
            // Never overshoots and closes the gap
            let mut heading = a;
            for _ in 0..600 {
                let gap = shortest_angle_diff(heading, b);
                let next = steer_heading(heading, b, rate, 1.0 / 60.0);
                let next_gap = shortest_angle_diff(next, b);
                prop_assert!(next_gap.abs() <= gap.abs() + 1e-5);
                prop_assert!(next_gap * gap >= -1e-5, "crossed the target");
                heading = next;
            }
            prop_assert!(shortest_angle_diff(heading, b).abs() < 1e-2);
        }

        #[test]
        fn prop_long_step_lands_on_target(a in -PI..PI, b in -PI..PI, dt in 1.0f32..5.0) {
            let heading = steer_heading(a, b, consts::FLEE_TURN_RATE, dt);
            prop_assert!(shortest_angle_diff(heading, b).abs() < 1e-4);
        }

        #[test]
        fn prop_wander_jitter_bounded(seed in any::<u64>(), dt in 0.0f32..1.0) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let bound = consts::WANDER_JITTER * dt / 2.0;
            for _ in 0..32 {
                prop_assert!(wander_jitter(&mut rng, dt).abs() <= bound + 1e-6);
            }
        }
    }
}
