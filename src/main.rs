//! Roach Swat entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, MouseEvent};

    use roach_swat::Settings;
    use roach_swat::audio::AudioManager;
    use roach_swat::frame::{FrameReport, run_frame};
    use roach_swat::renderer::{DrawList, RenderState};
    use roach_swat::sim::{GameEvent, GamePhase, GameState, TickInput};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        render_state: Option<RenderState>,
        draw_list: DrawList,
        audio: AudioManager,
        input: TickInput,
        last_time: f64,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            Self {
                state: GameState::new(seed),
                audio: AudioManager::new(&settings),
                settings,
                render_state: None,
                draw_list: DrawList::new(),
                input: TickInput::default(),
                last_time: 0.0,
            }
        }

        /// Tick, draw and hand events to the collaborators
        fn frame(&mut self, time: f64) {
            // Seconds since the previous frame; the first frame only draws
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            self.last_time = time;

            self.draw_list.clear();
            let report = run_frame(
                &mut self.state,
                &self.input,
                dt,
                &self.settings,
                &mut self.draw_list,
            );

            // Clear one-shot inputs after processing
            self.input.presses.clear();
            self.input.start = false;

            for event in &report.events {
                self.audio.handle_event(event);
            }
            self.render();
            update_hud(&report);
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(self.draw_list.vertices()) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        let (w, h) = render_state.size;
                        let logical = render_state.logical_size;
                        render_state.resize(w, h, logical);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    /// Update HUD elements in DOM
    fn update_hud(report: &FrameReport) {
        let Some(document) = document() else { return };
        let hud = &report.hud;

        set_text(&document, "hud-score", &hud.score.to_string());
        set_text(&document, "hud-time", &hud.time_left.to_string());
        set_text(&document, "hud-lives", &hud.lives.to_string());

        set_visible(&document, "start-screen", hud.phase == GamePhase::Ready);
        set_visible(&document, "hud", hud.phase == GamePhase::Running);

        for event in &report.events {
            if let GameEvent::SessionEnded { final_score } = event {
                set_text(&document, "final-score", &final_score.to_string());
            }
        }
        set_visible(&document, "game-over", hud.phase == GamePhase::GameOver);
    }

    /// CSS and backbuffer sizes for the canvas
    fn canvas_sizes(canvas: &HtmlCanvasElement) -> (Vec2, u32, u32) {
        let dpr = web_sys::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
        let client_w = canvas.client_width().max(1);
        let client_h = canvas.client_height().max(1);
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        (Vec2::new(client_w as f32, client_h as f32), width, height)
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialised".into());
        }

        log::info!("Roach Swat starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #canvas element");
            return;
        };

        // Set canvas size
        let (logical, width, height) = canvas_sizes(&canvas);
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, settings)));
        game.borrow_mut().state.resize(logical.x, logical.y);

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        match init_renderer(&instance, &canvas, width, height, logical).await {
            Some(render_state) => game.borrow_mut().render_state = Some(render_state),
            None => log::error!("WebGPU unavailable - running without graphics"),
        }

        // Hide loading indicator
        set_visible(&document, "loading", false);

        // Set up input handlers
        setup_input_handlers(&canvas, game.clone());

        // Set up start/restart buttons
        setup_start_buttons(game.clone());

        // Track window size
        setup_resize(&canvas, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Roach Swat running!");
    }

    async fn init_renderer(
        instance: &wgpu::Instance,
        canvas: &HtmlCanvasElement,
        width: u32,
        height: u32,
        logical: Vec2,
    ) -> Option<RenderState> {
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| log::error!("Failed to create surface: {}", e))
            .ok()?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| log::error!("Failed to get adapter: {}", e))
            .ok()?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width, height, logical)
            .await
            .map_err(|e| log::error!("Failed to create device: {}", e))
            .ok()
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse move - slipper follows the pointer
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
                game.borrow_mut().input.pointer = Some(pos);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse down - primary button swats
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if event.button() != 0 {
                    return;
                }
                let pos = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
                let mut g = game.borrow_mut();
                g.audio.resume();
                g.input.pointer = Some(pos);
                g.input.presses.push(pos);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_start_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = document() else { return };

        for id in ["start-btn", "restart-btn"] {
            let Some(btn) = document.get_element_by_id(id) else {
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                // Browsers only allow audio after a gesture
                g.audio.resume();
                g.input.start = true;
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (logical, width, height) = canvas_sizes(&canvas_clone);
            canvas_clone.set_width(width);
            canvas_clone.set_height(height);
            let mut g = game.borrow_mut();
            g.state.resize(logical.x, logical.y);
            if let Some(render_state) = g.render_state.as_mut() {
                render_state.resize(width, height, logical);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Roach Swat (native) starting...");
    log::info!("Running headless demo - run with `trunk serve` for the web version");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(2024);
    let tuning = match args.next() {
        Some(path) => match roach_swat::Tuning::from_file(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("{}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => roach_swat::Tuning::default(),
    };

    match demo::run(seed, tuning) {
        Ok(score) => println!("Final score: {}", score),
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless session with a scripted player
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use glam::Vec2;

    use roach_swat::frame::run_frame;
    use roach_swat::renderer::DrawList;
    use roach_swat::sim::{GameState, RoachKind, TickInput};
    use roach_swat::{Settings, Tuning, TuningError};

    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Simulated reaction time between swats
    const SWAT_EVERY: u32 = 15;
    /// Give up after this many simulated seconds
    const MAX_SECS: u32 = 600;

    /// Nearest live roach worth hitting (hazards are left alone)
    fn pick_target(state: &GameState) -> Option<Vec2> {
        let from = state.slipper.pos;
        state
            .roaches
            .iter()
            .filter(|r| r.is_alive() && r.kind != RoachKind::Hazard)
            .min_by(|a, b| from.distance(a.pos).total_cmp(&from.distance(b.pos)))
            .map(|r| r.pos)
    }

    pub fn run(seed: u64, tuning: Tuning) -> Result<u64, TuningError> {
        let mut state = GameState::with_tuning(seed, tuning)?;
        let settings = Settings::default();
        let mut canvas = DrawList::new();
        let mut input = TickInput {
            start: true,
            ..Default::default()
        };

        let frames_per_sec = (1.0 / FRAME_DT).round() as u32;
        for frame in 0..MAX_SECS * frames_per_sec {
            if frame % SWAT_EVERY == 0 {
                if let Some(target) = pick_target(&state) {
                    input.pointer = Some(target);
                    input.presses.push(target);
                }
            }

            canvas.clear();
            let report = run_frame(&mut state, &input, FRAME_DT, &settings, &mut canvas);
            input.presses.clear();
            input.start = false;

            for event in &report.events {
                log::debug!("event: {:?}", event);
            }
            if frame % frames_per_sec == 0 {
                log::info!(
                    "t={:>3}s score={} lives={} roaches={} vertices={}",
                    report.hud.time_left,
                    report.hud.score,
                    report.hud.lives,
                    state.roaches.len(),
                    canvas.len()
                );
            }
            if !state.is_running() {
                break;
            }
        }

        log::info!(
            "Demo finished: score {}, survived {:.1}s",
            state.score,
            state.survival_time
        );
        Ok(state.score)
    }
}
