//! Paddle Duel entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use paddle_duel::audio::AudioManager;
    use paddle_duel::platform::now_ms;
    use paddle_duel::renderer::CanvasSurface;
    use paddle_duel::sim::Field;
    use paddle_duel::{Difficulty, Game, Settings, Tuning, Variant};

    /// Everything the frame callback touches
    struct App {
        game: Game,
        surface: CanvasSurface,
        audio: AudioManager,
        canvas: HtmlCanvasElement,
    }

    impl App {
        /// Refit the canvas to the window; degenerate sizes keep the old one
        fn fit_to_window(&mut self) {
            let Some(window) = web_sys::window() else { return };
            let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            match self.game.resize(width as f32, height as f32) {
                Ok(field) => {
                    self.canvas.set_width(field.width() as u32);
                    self.canvas.set_height(field.height() as u32);
                }
                Err(e) => log::warn!("Ignoring resize: {}", e),
            }
        }
    }

    /// Settings from `data-*` attributes on the canvas; bad values fall
    /// back to defaults with a warning
    fn settings_from_canvas(canvas: &HtmlCanvasElement, seed: u64) -> Settings {
        let variant = match canvas.get_attribute("data-variant") {
            Some(name) => Variant::from_name(&name).unwrap_or_else(|e| {
                log::warn!("{}", e);
                Variant::default()
            }),
            None => Variant::default(),
        };
        let mut settings = Settings::from_variant(variant).with_seed(seed);
        if let Some(name) = canvas.get_attribute("data-difficulty") {
            match Difficulty::from_name(&name) {
                Ok(difficulty) => settings = settings.with_difficulty(difficulty),
                Err(e) => log::warn!("{}", e),
            }
        }
        settings
    }

    fn tuning_from_canvas(canvas: &HtmlCanvasElement) -> Tuning {
        match canvas.get_attribute("data-tuning") {
            Some(json) => Tuning::from_json(&json).unwrap_or_else(|e| {
                log::warn!("{}", e);
                Tuning::default()
            }),
            None => Tuning::default(),
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
        log::info!("Paddle Duel starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let surface = CanvasSurface::new(&canvas).expect("no 2d context");

        let seed = js_sys::Date::now() as u64;
        let settings = settings_from_canvas(&canvas, seed);
        let tuning = tuning_from_canvas(&canvas);

        let mut audio = AudioManager::new();
        audio.set_muted(!settings.sound_enabled);

        let game = match Game::new(settings.clone(), tuning, Field::default()) {
            Ok(game) => game,
            Err(e) => {
                log::warn!("{}, using default tuning", e);
                Game::new(settings, Tuning::default(), Field::default())
                    .expect("default tuning is valid")
            }
        };

        let app = Rc::new(RefCell::new(App {
            game,
            surface,
            audio,
            canvas,
        }));
        app.borrow_mut().fit_to_window();

        setup_input_handlers(app.clone());
        setup_resize_handler(app.clone());

        request_animation_frame(app);
        log::info!("Paddle Duel running!");
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |_time: f64| {
            game_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>) {
        {
            let mut a = app.borrow_mut();
            let App {
                game,
                surface,
                audio,
                ..
            } = &mut *a;
            game.frame(now_ms(), surface, audio);
        }

        request_animation_frame(app);
    }

    fn setup_input_handlers(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else { return };

        for (event_name, pressed) in [("keydown", true), ("keyup", false)] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                app.borrow_mut().game.handle_key(&event.key(), pressed);
            });
            let _ = window
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            app.borrow_mut().fit_to_window();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Paddle Duel (native) starting...");
    log::info!("Native mode runs a headless match - serve the wasm build for the playable version");

    if let Err(e) = native::run_headless(std::env::args().skip(1).collect()) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use paddle_duel::audio::AudioManager;
    use paddle_duel::renderer::RecordingSurface;
    use paddle_duel::sim::{Field, GameEvent};
    use paddle_duel::{Game, GameError, Settings, Tuning, Variant};

    /// Nominal refresh interval used as the simulated clock
    const FRAME_MS: f64 = 1000.0 / 60.0;

    /// `paddle-duel [frames] [tuning.json]`
    pub fn run_headless(args: Vec<String>) -> Result<(), GameError> {
        let frames: u64 = args.first().and_then(|s| s.parse().ok()).unwrap_or(3600);
        let tuning = match args.get(1) {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .map_err(|e| GameError::InvalidTuning(format!("{path}: {e}")))?;
                Tuning::from_json(&json)?
            }
            None => Tuning::default(),
        };

        let settings = Settings::from_variant(Variant::Lead).with_seed(0x5EED);
        let mut game = Game::new(settings, tuning, Field::default())?;
        let mut surface = RecordingSurface::default();
        let mut audio = AudioManager::new();

        let mut hits = 0u64;
        for frame in 0..frames {
            autopilot(&mut game);
            let events = game.frame(frame as f64 * FRAME_MS, &mut surface, &mut audio);
            for event in events {
                match event {
                    GameEvent::Scored { side } => log::info!(
                        "Frame {}: {:?} scored, {} - {}",
                        frame,
                        side,
                        game.state.user.score,
                        game.state.opponent.score
                    ),
                    GameEvent::PaddleHit { .. } => hits += 1,
                    _ => {}
                }
            }
        }

        log::info!(
            "Final score {} - {} after {} frames ({} paddle hits)",
            game.state.user.score,
            game.state.opponent.score,
            frames,
            hits
        );
        Ok(())
    }

    /// Hold keys that move the player's paddle toward the ball
    fn autopilot(game: &mut Game) {
        let gap = game.state.ball.pos.y - game.state.user.center_y();
        let dead_zone = game.state.user.height / 4.0;
        game.handle_key("w", gap < -dead_zone);
        game.handle_key("s", gap > dead_zone);
    }
}
