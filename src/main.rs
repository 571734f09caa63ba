//! Flock Sort entry point
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
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlInputElement, MouseEvent, TouchEvent};

    use flock_sort::bestscore::{self, BestScore};
    use flock_sort::sim::{GamePhase, GameState, TickEvent, TickInput, tick};
    use flock_sort::{GameSetup, Tuning};

    /// Cursor visualization
    const CURSOR_INFLUENCE_RADIUS: f64 = 30.0;
    const CURSOR_CROSS_SIZE: f64 = 12.0;
    const CURSOR_LINE_WIDTH: f64 = 2.0;
    const CANVAS_BACKGROUND_COLOR: &str = "#1a1a2e";

    /// Game instance holding all state
    struct Game {
        state: GameState,
        tuning: Tuning,
        setup: GameSetup,
        ctx: Option<CanvasRenderingContext2d>,
        canvas: HtmlCanvasElement,
        /// Live pointer position, written by input events, sampled once per tick
        pointer: Vec2,
        /// performance.now() at round start (ms)
        started_at: f64,
        /// rAF scheduling guard: false means no further frames may run
        loop_active: bool,
    }

    impl Game {
        fn new(canvas: HtmlCanvasElement, seed: u64) -> Self {
            Self {
                state: GameState::new(seed),
                tuning: Tuning::default(),
                setup: GameSetup::default(),
                ctx: None,
                canvas,
                pointer: Vec2::new(-1000.0, -1000.0),
                started_at: 0.0,
                loop_active: false,
            }
        }

        fn canvas_size(&self) -> (f32, f32) {
            (self.canvas.width() as f32, self.canvas.height() as f32)
        }

        /// Wall-clock seconds since the round started
        fn elapsed_secs(&self) -> f32 {
            ((now_ms() - self.started_at) / 1000.0) as f32
        }

        fn start_round(&mut self) {
            let (w, h) = self.canvas_size();
            // Park the pointer far off-canvas so the first ticks see no flee
            self.pointer = Vec2::new(-1000.0, -1000.0);
            self.state.start(&self.setup, w, h);
            self.started_at = now_ms();
        }

        /// Advance one frame. Returns the finish event, if any.
        fn update(&mut self) -> Option<TickEvent> {
            let (width, height) = self.canvas_size();
            let input = TickInput {
                pointer: self.pointer,
                width,
                height,
                elapsed_secs: self.elapsed_secs(),
            };
            tick(&mut self.state, &input, &self.tuning)
        }

        /// Draw the population and the cursor overlay
        fn render(&self) {
            let Some(ctx) = &self.ctx else { return };
            let (w, h) = self.canvas_size();

            ctx.set_fill_style_str(CANVAS_BACKGROUND_COLOR);
            ctx.fill_rect(0.0, 0.0, w as f64, h as f64);

            for p in &self.state.particles {
                ctx.set_fill_style_str(p.color.css());
                ctx.begin_path();
                let _ = ctx.arc(
                    p.position.x as f64,
                    p.position.y as f64,
                    p.radius as f64,
                    0.0,
                    std::f64::consts::TAU,
                );
                ctx.fill();
            }

            // Cursor: influence ring plus crosshair
            let (mx, my) = (self.pointer.x as f64, self.pointer.y as f64);
            ctx.set_line_width(CURSOR_LINE_WIDTH);
            ctx.set_line_cap("round");

            ctx.set_stroke_style_str("rgba(255, 255, 255, 0.3)");
            ctx.begin_path();
            let _ = ctx.arc(mx, my, CURSOR_INFLUENCE_RADIUS, 0.0, std::f64::consts::TAU);
            ctx.stroke();

            ctx.set_stroke_style_str("rgba(255, 255, 255, 0.9)");
            ctx.begin_path();
            ctx.move_to(mx, my - CURSOR_CROSS_SIZE);
            ctx.line_to(mx, my + CURSOR_CROSS_SIZE);
            ctx.stroke();
            ctx.begin_path();
            ctx.move_to(mx - CURSOR_CROSS_SIZE, my);
            ctx.line_to(mx + CURSOR_CROSS_SIZE, my);
            ctx.stroke();
        }

        /// Update the HUD timer element
        fn update_hud(&self) {
            if self.state.phase != GamePhase::Running {
                return;
            }
            let document = web_sys::window().unwrap().document().unwrap();
            if let Some(el) = document.get_element_by_id("timer") {
                el.set_text_content(Some(&format!("{:.1}s", self.elapsed_secs())));
            }
        }
    }

    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    fn show(document: &web_sys::Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    /// Fill the result screen and persist the best score
    fn handle_finish(elapsed_secs: f32) {
        let document = web_sys::window().unwrap().document().unwrap();

        let new_record = bestscore::record_time(elapsed_secs, js_sys::Date::now());
        if let Some(el) = document.get_element_by_id("final-time") {
            el.set_text_content(Some(&format!("{elapsed_secs:.2}s")));
        }
        if let Some(el) = document.get_element_by_id("best-time") {
            let best = BestScore::load().map(|b| b.time_secs).unwrap_or(elapsed_secs);
            el.set_text_content(Some(&format!("{best:.2}s")));
        }
        show(&document, "new-record", new_record);
        show(&document, "result-screen", true);
        show(&document, "hud", false);

        log::info!("Round finished in {elapsed_secs:.2}s (record: {new_record})");
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Flock Sort starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Canvas backing store matches its CSS size
        canvas.set_width(canvas.client_width() as u32);
        canvas.set_height(canvas.client_height() as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("2d context failed")
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(canvas.clone(), seed)));
        game.borrow_mut().ctx = Some(ctx);

        log::info!("Initialized with seed: {seed}");

        // Show the stored best on the setup screen
        if let Some(best) = BestScore::load() {
            if let Some(el) = document.get_element_by_id("setup-best") {
                el.set_text_content(Some(&format!("Best: {:.2}s", best.time_secs)));
            }
        }

        setup_pointer_tracking(&canvas, game.clone());
        setup_resize_handler(&canvas);
        setup_start_button(game.clone());
        setup_play_again_button(game.clone());

        show(&document, "setup-screen", true);
        log::info!("Flock Sort ready");
    }

    fn setup_pointer_tracking(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse move
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut().pointer =
                    Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    let x = touch.client_x() as f32 - rect.left() as f32;
                    let y = touch.client_y() as f32 - rect.top() as f32;
                    game.borrow_mut().pointer = Vec2::new(x, y);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(canvas: &HtmlCanvasElement) {
        let window = web_sys::window().unwrap();
        let canvas = canvas.clone();
        // The sim picks the new dimensions up on the next tick
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            canvas.set_width(canvas.client_width() as u32);
            canvas.set_height(canvas.client_height() as u32);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Read and validate the setup form, then start a round
    fn setup_start_button(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        if let Some(btn) = document.get_element_by_id("start-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let document = web_sys::window().unwrap().document().unwrap();

                let read_count = |id: &str| -> u32 {
                    document
                        .get_element_by_id(id)
                        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                        .and_then(|input| input.value().trim().parse().ok())
                        .unwrap_or(0)
                };

                let particles = read_count("particle-count");
                let colors = read_count("color-count");

                match GameSetup::new(particles, colors) {
                    Ok(setup) => {
                        show(&document, "setup-error", false);
                        show(&document, "setup-screen", false);
                        show(&document, "hud", true);

                        let mut g = game.borrow_mut();
                        g.setup = setup;
                        g.start_round();
                        drop(g);
                        start_loop(game.clone());
                    }
                    Err(err) => {
                        if let Some(el) = document.get_element_by_id("setup-error") {
                            el.set_text_content(Some(&err.to_string()));
                        }
                        show(&document, "setup-error", true);
                        log::warn!("Rejected setup: {err}");
                    }
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_play_again_button(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        if let Some(btn) = document.get_element_by_id("play-again-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let document = web_sys::window().unwrap().document().unwrap();
                show(&document, "result-screen", false);
                show(&document, "setup-screen", true);

                let mut g = game.borrow_mut();
                let seed = js_sys::Date::now() as u64;
                g.state.reset(seed);
                // Loop stays torn down until the next round starts
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Schedule the frame loop; guards against double scheduling
    fn start_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            if g.loop_active {
                return;
            }
            g.loop_active = true;
        }
        request_animation_frame(game);
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let finished = {
            let mut g = game.borrow_mut();
            if !g.loop_active {
                // Torn down between frames; schedule nothing further
                return;
            }

            let event = g.update();
            g.render();
            g.update_hud();

            if let Some(TickEvent::Finished { elapsed_secs }) = event {
                g.loop_active = false;
                Some(elapsed_secs)
            } else {
                None
            }
        };

        match finished {
            Some(elapsed_secs) => handle_finish(elapsed_secs),
            None => request_animation_frame(game),
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless smoke run: spawn a round and drive it with a sweeping pointer
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;

    use flock_sort::sim::{GamePhase, GameState, TickInput, check_win, tick};
    use flock_sort::{GameSetup, Tuning};

    env_logger::init();
    log::info!("Flock Sort (native) starting headless demo...");

    let setup = GameSetup::new(12, 3).expect("demo setup is valid");
    let tuning = Tuning::default();
    let (width, height) = (800.0, 600.0);

    let mut state = GameState::new(0xF10C);
    state.start(&setup, width, height);

    let fps = 60.0;
    let max_frames = 60 * 60; // one simulated minute
    for frame in 0..max_frames {
        // Sweep the pointer back and forth through the flock
        let t = frame as f32 / fps;
        let pointer = Vec2::new(
            width / 2.0 + (width / 2.5) * (t * 0.7).sin(),
            height / 2.0 + (height / 2.5) * (t * 0.4).cos(),
        );
        let input = TickInput {
            pointer,
            width,
            height,
            elapsed_secs: t,
        };
        if let Some(event) = tick(&mut state, &input, &tuning) {
            println!("Round finished: {event:?}");
            break;
        }
    }

    println!(
        "After {} frames: phase {:?}, sorted: {}",
        state.frame_count,
        state.phase,
        check_win(&state.particles, tuning.group_radius)
    );
    assert_eq!(state.particles.len(), setup.particle_count as usize);
    assert!(state.phase == GamePhase::Running || state.phase == GamePhase::Finished);
    println!("Headless demo complete");
}
