//! Frame loop: one simulation tick followed by the scene submission

use crate::renderer::canvas::Canvas;
use crate::renderer::scene::draw_scene;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, HudSnapshot, TickInput, tick};

/// What the frontend needs after a frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// False when the delta was discarded (the scene is still drawn)
    pub ticked: bool,
    /// Events raised during this frame, oldest first
    pub events: Vec<GameEvent>,
    pub hud: HudSnapshot,
}

/// Advance the session by `dt` seconds and draw the result
pub fn run_frame<C: Canvas + ?Sized>(
    state: &mut GameState,
    input: &TickInput,
    dt: f32,
    settings: &Settings,
    canvas: &mut C,
) -> FrameReport {
    state.max_particles = settings.max_particles().min(state.tuning.max_particles);
    let ticked = tick(state, input, dt);
    draw_scene(canvas, state, settings);
    FrameReport {
        ticked,
        events: state.drain_events(),
        hud: state.hud(),
    }
}
