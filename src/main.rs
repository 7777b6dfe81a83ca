//! Hippo Hop entry point
//!
//! On the web this sets up the canvas, input and the requestAnimationFrame
//! driver. Natively it runs the autopilot headless and prints a summary.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent, TouchEvent};

    use hippo_hop::audio::AudioManager;
    use hippo_hop::platform::TelegramNotifier;
    use hippo_hop::renderer::{RenderState, scene};
    use hippo_hop::sim::{GamePhase, GameSession};
    use hippo_hop::{GameConfig, GameLoop};

    /// Game instance holding all state
    struct Game {
        game_loop: GameLoop<TelegramNotifier>,
        render_state: Option<RenderState>,
        audio: AudioManager,
        /// Last values pushed to the DOM, to skip redundant writes
        shown_score: Option<u32>,
        shown_phase: Option<GamePhase>,
    }

    impl Game {
        fn new(session: GameSession) -> Self {
            Self {
                game_loop: GameLoop::new(session, TelegramNotifier),
                render_state: None,
                audio: AudioManager::new(),
                shown_score: None,
                shown_phase: None,
            }
        }

        /// Any tap, click or key: flap while running, restart once over
        fn tap(&mut self) {
            self.audio.resume();
            self.game_loop.session_mut().on_tap();
        }

        fn toggle_autopilot(&mut self) {
            let enabled = !self.game_loop.autopilot();
            self.game_loop.set_autopilot(enabled);
            log::info!("Autopilot: {}", enabled);
        }

        fn update(&mut self) {
            self.game_loop.tick();
            let events = self.game_loop.session_mut().drain_events();
            self.audio.play_events(&events);
        }

        fn render(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let vertices = scene(&self.game_loop.session().snapshot());
            match render_state.render(&vertices) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    render_state.resize(render_state.size.0, render_state.size.1);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Canvas changed size: follow it in the session and on the surface
        fn resize(&mut self, css_w: f32, css_h: f32, px_w: u32, px_h: u32) {
            if let Err(err) = self.game_loop.session_mut().resize(css_w, css_h) {
                log::warn!("Keeping playfield, resize to {}x{} rejected: {}", css_w, css_h, err);
            }
            // The surface always tracks the canvas; the playfield is whatever
            // the session accepted
            let config = self.game_loop.session().config();
            let playfield = (config.playfield_width, config.playfield_height);
            if let Some(render_state) = self.render_state.as_mut() {
                render_state.resize(px_w, px_h);
                render_state.set_playfield(playfield.0, playfield.1);
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let session = self.game_loop.session();

            let score = session.score();
            if self.shown_score != Some(score) {
                if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                    el.set_text_content(Some(&score.to_string()));
                }
                self.shown_score = Some(score);
            }

            let phase = session.phase();
            if self.shown_phase != Some(phase) {
                if let Some(el) = document.get_element_by_id("game-over") {
                    if phase == GamePhase::Ended {
                        let _ = el.set_attribute("class", "");
                        if let Some(score_el) = document.get_element_by_id("final-score") {
                            score_el.set_text_content(Some(&score.to_string()));
                        }
                    } else {
                        let _ = el.set_attribute("class", "hidden");
                    }
                }
                self.shown_phase = Some(phase);
            }
        }
    }

    /// Canvas size in CSS pixels and in device pixels
    fn canvas_size(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> (f32, f32, u32, u32) {
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width().max(1);
        let client_h = canvas.client_height().max(1);
        (
            client_w as f32,
            client_h as f32,
            (client_w as f64 * dpr) as u32,
            (client_h as f64 * dpr) as u32,
        )
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Hippo Hop starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let (css_w, css_h, width, height) = canvas_size(&window, &canvas);
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let config = GameConfig {
            seed: Some(seed),
            ..GameConfig::for_playfield(css_w, css_h)
        };
        let session = match GameSession::new(config) {
            Ok(session) => session,
            Err(err) => {
                log::warn!("Canvas {}x{} rejected ({}), using default playfield", css_w, css_h, err);
                GameSession::new(GameConfig {
                    seed: Some(seed),
                    ..GameConfig::default()
                })
                .expect("default config is valid")
            }
        };
        let playfield = (
            session.config().playfield_width,
            session.config().playfield_height,
        );
        let game = Rc::new(RefCell::new(Game::new(session)));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height, playfield).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(err) => log::error!("Failed to create device: {}", err),
        }

        setup_input_handlers(&canvas, game.clone());
        setup_resize_handler(canvas, game.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        request_animation_frame(game);

        log::info!("Hippo Hop running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse click
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().tap();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch (no synthetic mouse event afterwards)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().tap();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let window = web_sys::window().expect("no window");
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if event.repeat() {
                    return;
                }
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " | "Enter" | "ArrowUp" => {
                        event.prevent_default();
                        g.tap();
                    }
                    "i" | "I" => g.toggle_autopilot(),
                    "m" | "M" => {
                        let muted = g.audio.toggle_muted();
                        log::info!("Muted: {}", muted);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (css_w, css_h, width, height) = canvas_size(&window, &canvas);
            canvas.set_width(width);
            canvas.set_height(height);
            game.borrow_mut().resize(css_w, css_h, width, height);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// One simulation tick per display frame
    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.update();
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::init();
    log::info!("Hippo Hop (native) starting...");
    log::info!("Rendering needs a browser - run with `trunk serve`; running the autopilot headless");

    let args = native::Args::parse();
    let summary = native::run(&args)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fs;
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;
    use serde::Serialize;

    use hippo_hop::platform::LogNotifier;
    use hippo_hop::sim::GameSession;
    use hippo_hop::{GameConfig, GameLoop};

    #[derive(Parser, Debug)]
    #[command(name = "hippo-hop")]
    #[command(about = "Run the Hippo Hop autopilot headless and print a JSON summary")]
    pub struct Args {
        /// JSON game config; missing fields take the defaults
        pub config: Option<PathBuf>,
        /// Frames to simulate
        #[arg(long, default_value_t = 10_000)]
        pub ticks: u64,
    }

    #[derive(Debug, Serialize)]
    pub struct Summary {
        pub ticks: u64,
        pub runs_finished: usize,
        pub best_score: u32,
        pub scores: Vec<u32>,
        pub final_tick: u64,
        pub final_score: u32,
    }

    fn load_config(args: &Args) -> Result<GameConfig> {
        let Some(path) = &args.config else {
            return Ok(GameConfig::default());
        };
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        GameConfig::from_json(&json)
            .with_context(|| format!("invalid config: {}", path.display()))
    }

    /// Autopilot for `args.ticks` frames, restarting every finished run
    pub fn run(args: &Args) -> Result<Summary> {
        let config = load_config(args)?;
        let session = GameSession::new(config).context("failed to start session")?;
        let mut game = GameLoop::new(session, LogNotifier);
        game.set_autopilot(true);

        let mut scores = Vec::new();
        for _ in 0..args.ticks {
            if game.tick() {
                scores.push(game.session().score());
                game.session_mut().on_restart_requested();
            }
            game.session_mut().drain_events();
        }

        Ok(Summary {
            ticks: args.ticks,
            runs_finished: scores.len(),
            best_score: scores.iter().copied().max().unwrap_or(0),
            final_tick: game.session().tick_counter(),
            final_score: game.session().score(),
            scores,
        })
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_args_defaults() {
            let args = Args::try_parse_from(["hippo-hop"]).unwrap();
            assert_eq!(args.ticks, 10_000);
            assert!(args.config.is_none());
        }

        #[test]
        fn test_args_config_and_ticks() {
            let args = Args::try_parse_from(["hippo-hop", "tuning.json", "--ticks", "5"]).unwrap();
            assert_eq!(args.ticks, 5);
            assert_eq!(args.config, Some(PathBuf::from("tuning.json")));
        }

        #[test]
        fn test_unknown_flag_is_rejected() {
            assert!(Args::try_parse_from(["hippo-hop", "--tick", "5"]).is_err());
            assert!(Args::try_parse_from(["hippo-hop", "--ticks", "many"]).is_err());
        }

        #[test]
        fn test_missing_config_file_names_path() {
            let args = Args {
                config: Some(PathBuf::from("/nonexistent/hippo.json")),
                ticks: 1,
            };
            let err = run(&args).unwrap_err();
            assert!(format!("{err:#}").contains("/nonexistent/hippo.json"));
        }

        #[test]
        fn test_run_with_defaults() {
            let args = Args {
                config: None,
                ticks: 300,
            };
            let summary = run(&args).unwrap();
            assert_eq!(summary.ticks, 300);
            assert_eq!(summary.runs_finished, summary.scores.len());
            assert!(summary.final_tick <= 300);
        }
    }
}
