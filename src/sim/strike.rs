//! Strike resolution: target selection, damage and kill side effects

use glam::Vec2;

use super::effects::{DebrisTint, FloatingText, LabelTint, Particle, Shockwave};
use super::roach::{HitResult, RoachKind};
use super::spawner;
use super::state::{GameEvent, GameState};
use crate::consts::*;
use crate::distance;

/// What a resolved strike did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrikeOutcome {
    Miss,
    /// Target survived with this many hit points left
    Wounded { id: u32, hp_left: u8 },
    Killed { id: u32, kind: RoachKind },
}

/// Index of the nearest alive roach within reach of `point`.
///
/// Ties go to the roach that comes first in the collection, which is the
/// render order established at the end of the previous tick.
pub fn find_target(state: &GameState, point: Vec2) -> Option<usize> {
    let reach = state.tuning.strike_radius;
    let mut best: Option<(usize, f32)> = None;
    for (i, roach) in state.roaches.iter().enumerate() {
        if !roach.is_alive() {
            continue;
        }
        let dist = distance(point, roach.pos);
        if dist >= reach + roach.hit_radius() {
            continue;
        }
        if best.is_none_or(|(_, best_dist)| dist < best_dist) {
            best = Some((i, dist));
        }
    }
    best.map(|(i, _)| i)
}

/// Accept a primary press: debounce through the slipper, then resolve.
/// Returns `None` when the press was dropped.
pub fn press(state: &mut GameState, point: Vec2) -> Option<StrikeOutcome> {
    if !state.is_running() || !state.slipper.strike() {
        return None;
    }
    state.push_event(GameEvent::Impact);
    Some(resolve_strike(state, point))
}

/// Hit the nearest roach in reach of `point` and apply the consequences
pub fn resolve_strike(state: &mut GameState, point: Vec2) -> StrikeOutcome {
    let Some(index) = find_target(state, point) else {
        return StrikeOutcome::Miss;
    };

    let roach = &mut state.roaches[index];
    let (id, kind, pos, score) = (roach.id, roach.kind, roach.pos, roach.score);
    match roach.apply_hit() {
        HitResult::NoEffect => StrikeOutcome::Miss,
        HitResult::Wounded => {
            let hp_left = roach.hp;
            for _ in 0..GLANCING_PARTICLES {
                let p = Particle::burst(pos, DebrisTint::Spark, &mut state.rng);
                state.push_particle(p);
            }
            StrikeOutcome::Wounded { id, hp_left }
        }
        HitResult::Killed => {
            state.score += score as u64;
            for _ in 0..LETHAL_FLUID_PARTICLES {
                let p = Particle::burst(pos, DebrisTint::Fluid, &mut state.rng);
                state.push_particle(p);
            }
            for _ in 0..LETHAL_SHELL_PARTICLES {
                let p = Particle::burst(pos, DebrisTint::Shell(kind), &mut state.rng);
                state.push_particle(p);
            }
            log::debug!("killed roach {} ({:?}), score {}", id, kind, state.score);
            apply_kill_effect(state, kind, pos);
            StrikeOutcome::Killed { id, kind }
        }
    }
}

/// Type-specific consequences of a kill
fn apply_kill_effect(state: &mut GameState, kind: RoachKind, pos: Vec2) {
    match kind {
        RoachKind::Elite => spawner::queue_swarm(state),
        RoachKind::Chiller => {
            let reach = state.bounds.max_element() * PULSE_REACH;
            state.shockwaves.push(Shockwave::new(pos, reach));
            let mut chilled = 0;
            for roach in state.roaches.iter_mut().filter(|r| r.is_alive()) {
                if distance(pos, roach.pos) < reach {
                    roach.apply_chill();
                    chilled += 1;
                }
            }
            log::debug!("chill pulse slowed {} roaches", chilled);
        }
        RoachKind::Hazard => {
            state.explosion.trigger();
            state.push_event(GameEvent::Explosion);
            state.modify_lives(-1);
        }
        RoachKind::Mender => {
            state.modify_lives(1);
            state
                .labels
                .push(FloatingText::new(pos, "+1 HP", LabelTint::Heal));
        }
        RoachKind::Prismatic => {
            let bonus = state.tuning.time_bonus;
            state.add_time(bonus);
            state.labels.push(FloatingText::new(
                pos,
                format!("+{}s", bonus.round() as i32),
                LabelTint::Bonus,
            ));
        }
        RoachKind::Common | RoachKind::Hardened => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::roach::Roach;
    use crate::sim::state::GamePhase;

    fn running() -> GameState {
        let mut state = GameState::new(77);
        state.start_session();
        state.drain_events();
        state
    }

    fn place(state: &mut GameState, kind: RoachKind, pos: Vec2) -> u32 {
        let id = state.next_entity_id();
        state
            .roaches
            .push(Roach::new(id, kind, pos, 0.0, state.difficulty));
        id
    }

    #[test]
    fn test_miss_changes_nothing() {
        let mut state = running();
        place(&mut state, RoachKind::Common, Vec2::new(100.0, 100.0));
        // Reach is 50 + 20 * 1.0
        assert_eq!(resolve_strike(&mut state, Vec2::new(171.0, 100.0)), StrikeOutcome::Miss);
        assert!(state.roaches[0].is_alive());
        assert!(state.particles.is_empty());
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_reach_is_strict() {
        let mut state = running();
        place(&mut state, RoachKind::Common, Vec2::new(100.0, 100.0));
        assert_eq!(resolve_strike(&mut state, Vec2::new(170.0, 100.0)), StrikeOutcome::Miss);
        assert!(matches!(
            resolve_strike(&mut state, Vec2::new(169.0, 100.0)),
            StrikeOutcome::Killed { .. }
        ));
    }

    #[test]
    fn test_nearest_candidate_wins() {
        let mut state = running();
        let far = place(&mut state, RoachKind::Common, Vec2::new(130.0, 100.0));
        let near = place(&mut state, RoachKind::Common, Vec2::new(110.0, 100.0));
        let outcome = resolve_strike(&mut state, Vec2::new(100.0, 100.0));
        assert_eq!(
            outcome,
            StrikeOutcome::Killed {
                id: near,
                kind: RoachKind::Common
            }
        );
        assert!(state.roaches.iter().find(|r| r.id == far).unwrap().is_alive());
    }

    #[test]
    fn test_equidistant_tie_goes_to_first_in_order() {
        for _ in 0..3 {
            let mut state = running();
            let first = place(&mut state, RoachKind::Common, Vec2::new(80.0, 100.0));
            place(&mut state, RoachKind::Common, Vec2::new(120.0, 100.0));
            let outcome = resolve_strike(&mut state, Vec2::new(100.0, 100.0));
            assert_eq!(
                outcome,
                StrikeOutcome::Killed {
                    id: first,
                    kind: RoachKind::Common
                }
            );
        }
    }

    #[test]
    fn test_expired_roaches_are_not_candidates() {
        let mut state = running();
        place(&mut state, RoachKind::Common, Vec2::new(100.0, 100.0));
        let behind = place(&mut state, RoachKind::Common, Vec2::new(140.0, 100.0));
        resolve_strike(&mut state, Vec2::new(100.0, 100.0));
        let outcome = resolve_strike(&mut state, Vec2::new(100.0, 100.0));
        assert_eq!(
            outcome,
            StrikeOutcome::Killed {
                id: behind,
                kind: RoachKind::Common
            }
        );
    }

    #[test]
    fn test_hazard_costs_a_life() {
        let mut state = running();
        place(&mut state, RoachKind::Hazard, Vec2::new(300.0, 300.0));
        let outcome = resolve_strike(&mut state, Vec2::new(310.0, 300.0));
        assert!(matches!(outcome, StrikeOutcome::Killed { kind: RoachKind::Hazard, .. }));
        assert!(!state.roaches[0].is_alive());
        assert_eq!(state.lives, 2);
        assert_eq!(state.score, 0);
        assert!(state.explosion.is_shaking());
        assert_eq!(state.drain_events(), vec![GameEvent::Explosion]);
    }

    #[test]
    fn test_last_life_lost_ends_session() {
        let mut state = running();
        state.lives = 1;
        state.score = 40;
        place(&mut state, RoachKind::Hazard, Vec2::new(300.0, 300.0));
        resolve_strike(&mut state, Vec2::new(300.0, 300.0));
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(
            state.drain_events(),
            vec![
                GameEvent::Explosion,
                GameEvent::SessionEnded { final_score: 40 }
            ]
        );
    }

    #[test]
    fn test_elite_needs_five_hits_then_swarms() {
        let mut state = running();
        let id = place(&mut state, RoachKind::Elite, Vec2::new(400.0, 300.0));
        let strike = Vec2::new(400.0, 300.0);

        for expected_hp in (1..=4).rev() {
            assert_eq!(
                resolve_strike(&mut state, strike),
                StrikeOutcome::Wounded {
                    id,
                    hp_left: expected_hp
                }
            );
        }
        assert!(state.roaches[0].is_alive());
        assert_eq!(state.roaches[0].hp, 1);
        assert_eq!(state.score, 0);
        assert!(state.pending_spawns.is_empty());
        assert_eq!(state.particles.len(), 4 * GLANCING_PARTICLES);

        assert_eq!(
            resolve_strike(&mut state, strike),
            StrikeOutcome::Killed {
                id,
                kind: RoachKind::Elite
            }
        );
        assert_eq!(state.score, 10);
        assert_eq!(state.pending_spawns.len(), 20);
        let commons = state
            .pending_spawns
            .iter()
            .filter(|p| p.kind == RoachKind::Common)
            .count();
        assert_eq!(commons, 17);
        // Staggered, not simultaneous
        assert!(state.pending_spawns[19].fire_at > state.pending_spawns[0].fire_at);
    }

    #[test]
    fn test_chiller_slows_everyone_in_range() {
        let mut state = running();
        place(&mut state, RoachKind::Chiller, Vec2::new(400.0, 300.0));
        place(&mut state, RoachKind::Common, Vec2::new(10.0, 10.0));
        place(&mut state, RoachKind::Hardened, Vec2::new(790.0, 590.0));
        // Outside 1.5 x 800 = 1200 px from the kill
        place(&mut state, RoachKind::Common, Vec2::new(1700.0, 300.0));

        resolve_strike(&mut state, Vec2::new(400.0, 300.0));
        assert_eq!(state.shockwaves.len(), 1);
        assert_eq!(state.shockwaves[0].max_radius, 1200.0);
        assert_eq!(state.score, 2);
        assert!(state.roaches[1].is_chilled());
        assert!(state.roaches[2].is_chilled());
        assert!(!state.roaches[3].is_chilled());
        assert!(!state.roaches[0].is_chilled(), "the dead chiller stays unchilled");
    }

    #[test]
    fn test_mender_heals_with_label() {
        let mut state = running();
        state.lives = 5;
        place(&mut state, RoachKind::Mender, Vec2::new(200.0, 200.0));
        resolve_strike(&mut state, Vec2::new(200.0, 200.0));
        assert_eq!(state.lives, 5, "capped at max");
        assert_eq!(state.labels.len(), 1);
        assert_eq!(state.labels[0].text, "+1 HP");
        assert_eq!(state.labels[0].tint, LabelTint::Heal);
    }

    #[test]
    fn test_prismatic_adds_time() {
        let mut state = running();
        state.time_left = 12.0;
        place(&mut state, RoachKind::Prismatic, Vec2::new(200.0, 200.0));
        resolve_strike(&mut state, Vec2::new(200.0, 200.0));
        assert_eq!(state.time_left, 22.0);
        assert_eq!(state.score, 5);
        assert_eq!(state.labels[0].text, "+10s");
    }

    #[test]
    fn test_lethal_debris_counts() {
        let mut state = running();
        place(&mut state, RoachKind::Common, Vec2::new(200.0, 200.0));
        resolve_strike(&mut state, Vec2::new(200.0, 200.0));
        let fluid = state
            .particles
            .iter()
            .filter(|p| p.tint == DebrisTint::Fluid)
            .count();
        let shell = state
            .particles
            .iter()
            .filter(|p| p.tint == DebrisTint::Shell(RoachKind::Common))
            .count();
        assert_eq!((fluid, shell), (15, 5));
    }

    #[test]
    fn test_press_is_debounced() {
        let mut state = running();
        place(&mut state, RoachKind::Hardened, Vec2::new(200.0, 200.0));
        let point = Vec2::new(200.0, 200.0);
        assert!(press(&mut state, point).is_some());
        assert!(press(&mut state, point).is_none());
        assert_eq!(state.roaches[0].hp, 2, "debounced press never hit-tests");
        assert_eq!(state.drain_events(), vec![GameEvent::Impact]);
    }

    #[test]
    fn test_press_ignored_when_not_running() {
        let mut state = GameState::new(1);
        assert!(press(&mut state, Vec2::ZERO).is_none());
        assert!(!state.slipper.striking);
    }
}
