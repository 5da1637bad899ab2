//! Spawn cadence, difficulty curve and roach-type selection
//!
//! The type thresholds below are hand-tuned balance values; they are kept
//! exactly as they are rather than folded into a table.

use rand::Rng;

use super::roach::{Roach, RoachKind};
use super::state::{GameState, PendingSpawn};
use crate::consts::*;

/// Chance of a hazard before and after the one-minute mark
const HAZARD_CHANCE: f32 = 0.135;
const HAZARD_CHANCE_LATE: f32 = 0.3;
/// Upper bound of the "special" band (hazard + chiller/mender/prismatic)
const SPECIAL_THRESHOLD: f32 = 0.34;
const SPECIAL_THRESHOLD_LATE: f32 = 0.5;
/// Survival time after which the late-game odds apply
const LATE_GAME_SECS: f32 = 60.0;

/// Sub-roll thresholds inside the special band
const PRISMATIC_CUTOFF: f32 = 0.44;
const CHILLER_CUTOFF: f32 = 0.73;

/// Escalation gates for the base roll
const ELITE_AFTER_SECS: f32 = 30.0;
const ELITE_ROLL: f32 = 0.95;
const HARDENED_AFTER_SECS: f32 = 10.0;
const HARDENED_ROLL: f32 = 0.8;

/// Speed multiplier applied to newly spawned roaches
pub fn difficulty_multiplier(survival_time: f32) -> f32 {
    1.0 + survival_time / DIFFICULTY_RAMP_SECS
}

/// Seconds between regular spawns
pub fn spawn_interval(survival_time: f32) -> f32 {
    (SPAWN_INTERVAL_START - survival_time / SPAWN_INTERVAL_DECAY_SECS).max(SPAWN_INTERVAL_FLOOR)
}

/// Pick a roach type from a primary roll `r` and a lazily drawn sub-roll.
///
/// Hazard and special rolls take priority over the elite/hardened
/// escalation, so late-game spawns mix both kinds of difficulty.
pub fn choose_kind(r: f32, survival_time: f32, sub_roll: impl FnOnce() -> f32) -> RoachKind {
    let late = survival_time > LATE_GAME_SECS;
    let hazard_chance = if late { HAZARD_CHANCE_LATE } else { HAZARD_CHANCE };
    let special_threshold = if late {
        SPECIAL_THRESHOLD_LATE
    } else {
        SPECIAL_THRESHOLD
    };

    if r < hazard_chance {
        RoachKind::Hazard
    } else if r < special_threshold {
        let s = sub_roll();
        if s < PRISMATIC_CUTOFF {
            RoachKind::Prismatic
        } else if s < CHILLER_CUTOFF {
            RoachKind::Chiller
        } else {
            RoachKind::Mender
        }
    } else if survival_time > ELITE_AFTER_SECS && r > ELITE_ROLL {
        RoachKind::Elite
    } else if survival_time > HARDENED_AFTER_SECS && r > HARDENED_ROLL {
        RoachKind::Hardened
    } else {
        RoachKind::Common
    }
}

/// Spawn one roach of the given kind at a random edge
pub fn spawn_roach(state: &mut GameState, kind: RoachKind) {
    let id = state.next_entity_id();
    let roach = Roach::spawn(id, kind, state.bounds, state.difficulty, &mut state.rng);
    log::debug!(
        "spawned roach {} ({:?}) at ({:.0}, {:.0})",
        id,
        kind,
        roach.pos.x,
        roach.pos.y
    );
    state.roaches.push(roach);
}

/// Regular cadence: roll a type and spawn it
pub fn spawn_random(state: &mut GameState) {
    let r: f32 = state.rng.random();
    let survival = state.survival_time;
    let rng = &mut state.rng;
    let kind = choose_kind(r, survival, || rng.random());
    spawn_roach(state, kind);
}

/// Queue the staggered swarm released by an elite kill
pub fn queue_swarm(state: &mut GameState) {
    let size = state.tuning.swarm_size;
    let first_hazard = size - state.tuning.swarm_hazards.min(size);
    let start = state.survival_time;
    let spacing = state.tuning.swarm_spacing;
    state.pending_spawns.extend((0..size).map(|i| PendingSpawn {
        fire_at: start + i as f32 * spacing,
        kind: if i >= first_hazard {
            RoachKind::Hazard
        } else {
            RoachKind::Common
        },
    }));
    log::debug!("swarm queued: {} roaches", size);
}

/// Fire every queued spawn whose time has come, in queue order
pub fn fire_pending(state: &mut GameState) {
    let now = state.survival_time;
    let (due, waiting): (Vec<PendingSpawn>, Vec<PendingSpawn>) = state
        .pending_spawns
        .drain(..)
        .partition(|p| p.fire_at <= now);
    state.pending_spawns = waiting;
    for pending in due {
        spawn_roach(state, pending.kind);
    }
}

/// Advance difficulty and the spawn accumulator; spawn when due
pub fn run(state: &mut GameState, dt: f32) {
    state.difficulty = difficulty_multiplier(state.survival_time);

    state.spawn_timer += dt;
    if state.spawn_timer > spawn_interval(state.survival_time) {
        state.spawn_timer = 0.0;
        spawn_random(state);
    }

    fire_pending(state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn never() -> f32 {
        panic!("sub-roll should not be drawn")
    }

    #[test]
    fn test_difficulty_multiplier() {
        assert_eq!(difficulty_multiplier(0.0), 1.0);
        assert_eq!(difficulty_multiplier(60.0), 2.0);
        assert_eq!(difficulty_multiplier(30.0), 1.5);
    }

    #[test]
    fn test_spawn_interval_curve() {
        assert_eq!(spawn_interval(0.0), 1.5);
        assert!((spawn_interval(50.0) - 1.0).abs() < 1e-6);
        assert_eq!(spawn_interval(120.0), 0.3);
    }

    #[test]
    fn test_choose_kind_early_game() {
        assert_eq!(choose_kind(0.1, 0.0, never), RoachKind::Hazard);
        assert_eq!(choose_kind(0.2, 0.0, || 0.1), RoachKind::Prismatic);
        assert_eq!(choose_kind(0.2, 0.0, || 0.5), RoachKind::Chiller);
        assert_eq!(choose_kind(0.2, 0.0, || 0.9), RoachKind::Mender);
        assert_eq!(choose_kind(0.99, 0.0, never), RoachKind::Common);
    }

    #[test]
    fn test_choose_kind_escalation() {
        assert_eq!(choose_kind(0.85, 5.0, never), RoachKind::Common);
        assert_eq!(choose_kind(0.85, 11.0, never), RoachKind::Hardened);
        assert_eq!(choose_kind(0.97, 20.0, never), RoachKind::Hardened);
        assert_eq!(choose_kind(0.97, 31.0, never), RoachKind::Elite);
    }

    #[test]
    fn test_choose_kind_late_game_widens_special_band() {
        // 0.2 is a hazard only after the minute mark
        assert_eq!(choose_kind(0.2, 59.0, || 0.9), RoachKind::Mender);
        assert_eq!(choose_kind(0.2, 61.0, never), RoachKind::Hazard);
        // 0.45 is special only late
        assert_eq!(choose_kind(0.45, 59.0, never), RoachKind::Common);
        assert_eq!(choose_kind(0.45, 61.0, || 0.5), RoachKind::Chiller);
        // Special rolls win over escalation
        assert_eq!(choose_kind(0.3, 100.0, || 0.0), RoachKind::Prismatic);
        assert_eq!(choose_kind(0.96, 100.0, never), RoachKind::Elite);
    }

    #[test]
    fn test_spawn_accumulator_fires_once_interval_exceeded() {
        let mut state = GameState::new(3);
        state.start_session();
        run(&mut state, 1.5);
        assert!(state.roaches.is_empty(), "accumulator must exceed, not equal");
        run(&mut state, 0.01);
        assert_eq!(state.roaches.len(), 1);
        assert_eq!(state.spawn_timer, 0.0);
    }

    #[test]
    fn test_spawned_roach_uses_current_difficulty() {
        let mut state = GameState::new(3);
        state.start_session();
        state.survival_time = 60.0;
        state.difficulty = difficulty_multiplier(60.0);
        spawn_roach(&mut state, RoachKind::Common);
        assert_eq!(state.roaches[0].base_speed, 200.0);
    }

    #[test]
    fn test_swarm_queue_and_release() {
        let mut state = GameState::new(3);
        state.start_session();
        state.survival_time = 10.0;
        queue_swarm(&mut state);
        assert_eq!(state.pending_spawns.len(), 20);
        let hazards = state
            .pending_spawns
            .iter()
            .filter(|p| p.kind == RoachKind::Hazard)
            .count();
        assert_eq!(hazards, 3);
        assert!(state.pending_spawns[17..].iter().all(|p| p.kind == RoachKind::Hazard));

        fire_pending(&mut state);
        assert_eq!(state.roaches.len(), 1);

        state.survival_time = 10.5;
        fire_pending(&mut state);
        assert_eq!(state.roaches.len(), 11);

        state.survival_time = 11.0;
        fire_pending(&mut state);
        assert_eq!(state.roaches.len(), 20);
        assert!(state.pending_spawns.is_empty());
    }

    proptest! {
        #[test]
        fn prop_spawn_interval_floor(t in 120.0f32..10_000.0) {
            prop_assert_eq!(spawn_interval(t), 0.3);
        }

        #[test]
        fn prop_difficulty_non_decreasing(a in 0.0f32..1000.0, b in 0.0f32..1000.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(difficulty_multiplier(lo) <= difficulty_multiplier(hi));
        }
    }
}
