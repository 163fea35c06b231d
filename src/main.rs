//! Rocket Runner entry point
//!
//! Handles platform-specific initialization and drives the session.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, KeyboardEvent, MouseEvent, PointerEvent};

    use rocket_runner::Session;
    use rocket_runner::consts::*;
    use rocket_runner::sim::{GamePhase, InputEvent, PowerUpKind};

    // Hand-off to the page's renderer, if it registered one
    #[wasm_bindgen(inline_js = "
        export function present_snapshot(json) {
            const hook = window.rocketRunnerPresent;
            if (typeof hook === 'function') {
                hook(JSON.parse(json));
            }
        }
    ")]
    extern "C" {
        fn present_snapshot(json: &str);
    }

    /// Browser-side wrapper around the session
    struct Game {
        session: Session,
        last_time: f64,
        last_phase: GamePhase,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            Self {
                session: Session::new(seed),
                last_time: 0.0,
                last_phase: GamePhase::Ready,
            }
        }

        fn update(&mut self, dt: f32) {
            self.session.update(dt);

            let phase = self.session.state().phase;
            if phase != self.last_phase {
                log::info!("Phase {:?} -> {:?}", self.last_phase, phase);
                self.last_phase = phase;
            }
        }

        fn present(&self) {
            match self.session.snapshot().to_json() {
                Ok(json) => present_snapshot(&json),
                Err(e) => log::warn!("Snapshot serialization failed: {e}"),
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            let state = self.session.state();

            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&state.score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("high-score") {
                el.set_text_content(Some(&state.high_score.best().to_string()));
            }

            for kind in PowerUpKind::ALL {
                if let Some(el) = document.get_element_by_id(&format!("effect-{}", kind.as_str())) {
                    let _ = el
                        .class_list()
                        .toggle_with_force("hidden", !state.effects.is_active(kind));
                }
            }

            // Title / game over overlay
            let playing = state.phase == GamePhase::Playing;
            let game_over = state.phase == GamePhase::GameOver;
            if let Some(el) = document.get_element_by_id("overlay") {
                let _ = el.class_list().toggle_with_force("hidden", playing);
            }
            if let Some(el) = document.get_element_by_id("overlay-title") {
                el.set_text_content(Some(if game_over { "Game Over!" } else { "Rocket Runner" }));
            }
            if let Some(el) = document.get_element_by_id("start-btn") {
                el.set_text_content(Some(if game_over { "Try Again" } else { "Start Game" }));
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Logger init failed: {e}").into());
        }

        log::info!("Rocket Runner starting...");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Session initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        setup_start_button(game.clone());
        request_animation_frame(game);

        log::info!("Rocket Runner running!");
    }

    /// Input callbacks only enqueue; the frame loop consumes
    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window - input disabled");
            return;
        };

        // Click / tap anywhere
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                game.borrow_mut().session.push_input(InputEvent::Jump);
            });
            let _ = window
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Space / up arrow
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                match event.key().as_str() {
                    " " | "ArrowUp" | "w" | "W" => {
                        event.prevent_default();
                        game.borrow_mut().session.push_input(InputEvent::Jump);
                    }
                    "Enter" => game.borrow_mut().session.push_input(InputEvent::Start),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_start_button(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("start-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                event.stop_propagation();
                game.borrow_mut().session.push_input(InputEvent::Start);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.present();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Rocket Runner (native) starting...");
    log::info!("Native mode runs a headless autopilot - serve the wasm build to play");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x5EED);
    let tuning = match args.next() {
        Some(path) => load_tuning(&path),
        None => rocket_runner::Tuning::default(),
    };

    headless::run(seed, tuning);
}

#[cfg(not(target_arch = "wasm32"))]
fn load_tuning(path: &str) -> rocket_runner::Tuning {
    let loaded = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|json| rocket_runner::Tuning::from_json(&json).map_err(|e| e.to_string()));
    match loaded {
        Ok(tuning) => {
            log::info!("Loaded tuning from {path}");
            tuning
        }
        Err(e) => {
            log::warn!("Using default tuning ({path}: {e})");
            rocket_runner::Tuning::default()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use rocket_runner::consts::*;
    use rocket_runner::sim::{GameEvent, GameState, InputEvent, ObstacleKind};
    use rocket_runner::{Session, Tuning};

    /// Ten minutes of play at most
    const MAX_TICKS: u64 = 10 * 60 * TICK_RATE as u64;
    const RUNS: u32 = 3;

    /// Jump when a ground-level obstacle is about to reach the rocket
    fn wants_jump(state: &GameState) -> bool {
        let front = PLAYER_X + PLAYER_SIZE;
        state.is_grounded()
            && state.obstacles.iter().any(|o| {
                o.kind != ObstacleKind::Floating && o.pos.x > front && o.pos.x - front < 40.0
            })
    }

    pub fn run(seed: u64, tuning: Tuning) {
        let mut session = match Session::with_tuning(seed, tuning) {
            Ok(session) => session,
            Err(e) => {
                log::warn!("Rejected tuning ({e}), using defaults");
                Session::new(seed)
            }
        };
        log::info!("Headless session with seed {seed}");

        for run in 1..=RUNS {
            session.push_input(InputEvent::Start);
            session.step();

            while session.is_running() && session.state().time_ticks < MAX_TICKS {
                if wants_jump(session.state()) {
                    session.push_input(InputEvent::Jump);
                }
                session.step();

                for event in &session.state().events {
                    if let GameEvent::PowerUpCollected { kind } = event {
                        log::info!("Run {run}: collected {}", kind.as_str());
                    }
                }
            }

            let state = session.state();
            log::info!(
                "Run {run}: score {} after {} ticks ({:.1}s)",
                state.score,
                state.time_ticks,
                state.time_ticks as f32 * SIM_DT
            );
            if session.is_running() {
                session.stop();
            }
        }

        log::info!("Best score this session: {}", session.high_score());
    }
}
