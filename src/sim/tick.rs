//! Per-frame orchestration
//!
//! One call to [`tick`] advances the session by the frame delta: clock,
//! spawning, roach motion and culling, queued strikes, then the cosmetic
//! effects that keep running after the session ends.

use glam::Vec2;

use super::spawner;
use super::state::GameState;
use super::strike;

/// Input accumulated by the frontend between frames
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Latest pointer position (play-area pixels)
    pub pointer: Option<Vec2>,
    /// Primary presses since the last tick, oldest first
    pub presses: Vec<Vec2>,
    /// Start (or restart) request from the UI
    pub start: bool,
}

/// Advance the game state by `dt` seconds.
///
/// Returns `false` when the delta was rejected and nothing changed.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> bool {
    if dt.is_nan() || dt < 0.0 || dt > state.tuning.max_frame_dt {
        log::warn!("Discarding frame with dt {:.3}s", dt);
        return false;
    }

    if input.start {
        state.start_session();
    }
    if let Some(pointer) = input.pointer {
        state.slipper.set_position(pointer);
    }

    if state.is_running() {
        run_session(state, input, dt);
    }

    // Cosmetic effects decay regardless of phase
    state.slipper.update(dt);
    for particle in &mut state.particles {
        particle.update(dt);
    }
    state.particles.retain(|p| !p.is_dead());
    for wave in &mut state.shockwaves {
        wave.update(dt);
    }
    state.shockwaves.retain(|w| !w.is_done());
    for label in &mut state.labels {
        label.update(dt);
    }
    state.labels.retain(|l| !l.is_done());
    state.explosion.update(dt, &mut state.rng);

    state.sort_for_render();
    true
}

fn run_session(state: &mut GameState, input: &TickInput, dt: f32) {
    state.time_left -= dt;
    if state.time_left <= 0.0 {
        state.time_left = 0.0;
        state.end_session();
        return;
    }
    state.survival_time += dt;

    spawner::run(state, dt);

    let bounds = state.bounds;
    for roach in &mut state.roaches {
        roach.update(dt, bounds, &mut state.rng);
    }
    state.roaches.retain(|r| !r.remove);

    for &point in &input.presses {
        // A hazard can end the session mid-list
        if !state.is_running() {
            break;
        }
        strike::press(state, point);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::effects::{DebrisTint, Particle};
    use crate::sim::roach::{Roach, RoachKind};
    use crate::sim::state::{GameEvent, GamePhase};

    fn started(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        tick(
            &mut state,
            &TickInput {
                start: true,
                ..Default::default()
            },
            0.0,
        );
        state.drain_events();
        state
    }

    #[test]
    fn test_start_request_begins_session() {
        let mut state = GameState::new(1);
        assert!(tick(&mut state, &TickInput::default(), 0.016));
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.time_left, 60.0);

        let input = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &input, 0.016);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.drain_events(), vec![GameEvent::SessionStarted]);
    }

    #[test]
    fn test_oversized_delta_is_discarded() {
        let mut state = started(9);
        let input = TickInput {
            presses: vec![Vec2::new(100.0, 100.0)],
            ..Default::default()
        };
        assert!(!tick(&mut state, &input, 61.0));
        assert_eq!(state.time_left, 60.0);
        assert_eq!(state.phase, GamePhase::Running);
        assert!(state.events().is_empty(), "presses in a discarded tick are dropped");
        assert!(!tick(&mut state, &TickInput::default(), -0.5));
        assert!(!tick(&mut state, &TickInput::default(), f32::NAN));
    }

    #[test]
    fn test_clock_runs_out_after_sixty_seconds() {
        let mut state = started(9);
        let input = TickInput::default();
        for i in 0..60 {
            assert!(tick(&mut state, &input, 1.0));
            if i < 59 {
                assert!(state.is_running(), "ended early at tick {}", i);
            }
        }
        assert_eq!(state.time_left, 0.0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.hud().time_left, 0);
        let ended = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::SessionEnded { .. }))
            .count();
        assert_eq!(ended, 1);
    }

    #[test]
    fn test_session_end_discards_pending_swarm() {
        let mut state = started(4);
        state.survival_time = 20.0;
        spawner::queue_swarm(&mut state);
        state.time_left = 0.01;
        tick(&mut state, &TickInput::default(), 0.02);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.pending_spawns.is_empty());

        let before = state.roaches.len();
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), 0.1);
        }
        assert_eq!(state.roaches.len(), before, "nothing spawns after the end");
    }

    #[test]
    fn test_effects_keep_decaying_after_game_over() {
        let mut state = started(4);
        let mut rng = rand_pcg::Pcg32::new(0, 0);
        state.push_particle(Particle::burst(Vec2::new(300.0, 300.0), DebrisTint::Fluid, &mut rng));
        let id = state.next_entity_id();
        let frozen = Roach::new(id, RoachKind::Common, Vec2::new(400.0, 300.0), 0.0, 1.0);
        state.roaches.push(frozen);
        state.end_session();

        let life = state.particles[0].life;
        tick(&mut state, &TickInput::default(), 0.5);
        assert!(state.particles[0].life < life);
        assert_eq!(state.roaches[0].pos, Vec2::new(400.0, 300.0), "roaches stop moving");

        for _ in 0..6 {
            tick(&mut state, &TickInput::default(), 0.5);
        }
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_presses_resolve_after_motion() {
        let mut state = started(6);
        let id = state.next_entity_id();
        let roach = Roach::new(id, RoachKind::Common, Vec2::new(400.0, 300.0), 0.0, 1.0);
        state.roaches.push(roach);
        let input = TickInput {
            presses: vec![Vec2::new(400.0, 300.0)],
            ..Default::default()
        };
        tick(&mut state, &input, 0.016);
        assert_eq!(state.score, 1);
        assert_eq!(state.drain_events(), vec![GameEvent::Impact]);
        // Dead roach stays in the collection while it fades
        assert_eq!(state.roaches.len(), 1);
        assert!(!state.roaches[0].is_alive());
    }

    #[test]
    fn test_presses_ignored_before_start() {
        let mut state = GameState::new(6);
        let input = TickInput {
            presses: vec![Vec2::new(10.0, 10.0)],
            ..Default::default()
        };
        tick(&mut state, &input, 0.016);
        assert!(state.events().is_empty());
    }

    #[test]
    fn test_dead_roach_culled_after_fade() {
        let mut state = started(6);
        let id = state.next_entity_id();
        let mut roach = Roach::new(id, RoachKind::Common, Vec2::new(400.0, 300.0), 0.0, 1.0);
        roach.apply_hit();
        state.roaches.push(roach);
        for _ in 0..5 {
            tick(&mut state, &TickInput::default(), 0.5);
        }
        assert!(state.roaches.iter().any(|r| r.id == id));
        tick(&mut state, &TickInput::default(), 0.5);
        assert!(state.roaches.iter().all(|r| r.id != id));
    }

    #[test]
    fn test_same_seed_same_session() {
        let run = |seed: u64| {
            let mut state = started(seed);
            for frame in 0..600 {
                let presses = if frame % 7 == 0 {
                    vec![Vec2::new(400.0, 300.0)]
                } else {
                    Vec::new()
                };
                let input = TickInput {
                    pointer: Some(Vec2::new(400.0, 300.0)),
                    presses,
                    start: false,
                };
                tick(&mut state, &input, 1.0 / 60.0);
            }
            let positions: Vec<(u32, Vec2)> = state.roaches.iter().map(|r| (r.id, r.pos)).collect();
            (state.score, state.lives, state.particles.len(), positions)
        };
        assert_eq!(run(42), run(42));
    }

    #[test]
    fn test_roaches_spawn_over_time() {
        let mut state = started(8);
        for _ in 0..120 {
            tick(&mut state, &TickInput::default(), 1.0 / 30.0);
        }
        assert!(!state.roaches.is_empty());
        assert!(state.survival_time > 3.9);
    }

    #[test]
    fn test_roaches_kept_in_render_order() {
        let mut state = started(8);
        for _ in 0..300 {
            tick(&mut state, &TickInput::default(), 1.0 / 30.0);
        }
        for pair in state.roaches.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if a.is_alive() == b.is_alive() {
                assert!(a.pos.y <= b.pos.y);
            } else {
                assert!(!a.is_alive());
            }
        }
    }
}
