//! Shadow Dash entry point
//!
//! Wires the DOM, input, and timers to the simulation core. The browser
//! build owns two cancellable scheduled tasks - the spawn interval and the
//! animation-frame chain - and always cancels them before any state reset.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, KeyboardEvent};

    use shadow_dash::ScoreBoard;
    use shadow_dash::audio::AudioManager;
    use shadow_dash::consts::*;
    use shadow_dash::platform::web::{BrowserViewport, DomRenderer, LocalStorageStore};
    use shadow_dash::sim::{Phase, Session};

    /// Game instance: the session plus its platform sinks and timer handles
    struct Game {
        session: Session,
        renderer: DomRenderer,
        audio: AudioManager,
        store: LocalStorageStore,
        viewport: BrowserViewport,
        document: Document,
        last_time: f64,
        /// Active spawn interval, if any
        spawn_interval: Option<i32>,
        /// Pending animation frame, if any
        frame_handle: Option<i32>,
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Shadow Dash starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let Some(renderer) = DomRenderer::new(&document) else {
            log::error!("Required #game/#player elements missing - cannot start");
            return;
        };
        let Some(viewport) = BrowserViewport::new(&document) else {
            log::error!("Required #game element missing - cannot start");
            return;
        };

        let store = LocalStorageStore;
        let scores = ScoreBoard::load(&store);
        set_text(&document, "best-score", &scores.best().to_string());

        let seed = js_sys::Date::now() as u64;
        let session = Session::new(seed, &viewport, scores);
        log::info!("Session seeded with {}", seed);

        let game = Rc::new(RefCell::new(Game {
            session,
            renderer,
            audio: AudioManager::new(),
            store,
            viewport,
            document,
            last_time: 0.0,
            spawn_interval: None,
            frame_handle: None,
        }));

        setup_input(&game);
        setup_buttons(&game);
        setup_resize(&game);
        setup_cleanup(&game);

        log::info!("Shadow Dash ready");
    }

    // === Timer lifecycle ===

    fn start_timers(game: &Rc<RefCell<Game>>) {
        start_spawn_interval(game);
        schedule_frame(game);
    }

    /// Cancel the spawn interval and any pending frame. Idempotent, and
    /// always runs before a state reset so a stale callback cannot touch
    /// the next run's state.
    fn cancel_timers(game: &Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let mut g = game.borrow_mut();
        if let Some(id) = g.spawn_interval.take() {
            window.clear_interval_with_handle(id);
        }
        if let Some(id) = g.frame_handle.take() {
            let _ = window.cancel_animation_frame(id);
        }
    }

    fn start_spawn_interval(game: &Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let cb = {
            let game = game.clone();
            Closure::<dyn FnMut()>::new(move || {
                let g = &mut *game.borrow_mut();
                g.session.spawn_tick(&mut g.renderer);
            })
        };
        if let Ok(id) = window.set_interval_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            SPAWN_INTERVAL_MS,
        ) {
            game.borrow_mut().spawn_interval = Some(id);
        }
        cb.forget();
    }

    fn schedule_frame(game: &Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let cb = {
            let game = game.clone();
            Closure::once(move |time: f64| on_frame(game, time))
        };
        if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
            game.borrow_mut().frame_handle = Some(id);
        }
        cb.forget();
    }

    fn on_frame(game: Rc<RefCell<Game>>, time: f64) {
        let ended = {
            let g = &mut *game.borrow_mut();
            g.frame_handle = None;

            // A frame delivered between end() and cancellation is a no-op
            if !g.session.is_running() {
                return;
            }

            let dt = if g.last_time > 0.0 {
                time - g.last_time
            } else {
                FRAME_MS
            };
            g.last_time = time;

            let phase = g
                .session
                .frame(dt, &mut g.renderer, &mut g.store, &mut g.audio);
            let displayed = g.session.step_display();
            set_text(&g.document, "score", &format!("Score: {displayed}"));
            phase == Phase::Ended
        };

        if ended {
            finish_run(&game);
        } else {
            schedule_frame(&game);
        }
    }

    // === Session transitions ===

    fn start_session(game: &Rc<RefCell<Game>>) {
        cancel_timers(game);
        {
            let g = &mut *game.borrow_mut();
            g.session.relayout(&g.viewport, &mut g.renderer);
            g.session.start(&mut g.renderer, &mut g.audio);
            g.last_time = 0.0;
            set_text(&g.document, "score", "Score: 0");
            set_hidden(&g.document, "game-over", true);
            set_hidden(&g.document, "high-score-badge", true);
            set_hidden(&g.document, "start-screen", true);
            set_hidden(&g.document, "game", false);
        }
        start_timers(game);
    }

    fn restart_session(game: &Rc<RefCell<Game>>) {
        cancel_timers(game);
        {
            let g = &mut *game.borrow_mut();
            g.session.restart(&mut g.renderer, &mut g.store, &mut g.audio);
            g.last_time = 0.0;
            set_text(&g.document, "score", "Score: 0");
            set_hidden(&g.document, "game-over", true);
            set_hidden(&g.document, "high-score-badge", true);
        }
        start_timers(game);
    }

    /// Collision landed this frame: stop the timers and show the summary
    fn finish_run(game: &Rc<RefCell<Game>>) {
        cancel_timers(game);
        let g = game.borrow();
        let score = g.session.score();
        let best = g.session.scores().best();
        set_text(
            &g.document,
            "final-score",
            &format!("Your Score: {score} | High Score: {best}"),
        );
        set_text(&g.document, "best-score", &best.to_string());
        set_hidden(
            &g.document,
            "high-score-badge",
            !g.session.scores().is_new_best(),
        );
        set_hidden(&g.document, "game-over", false);
    }

    fn return_to_menu(game: &Rc<RefCell<Game>>) {
        cancel_timers(game);
        let g = &mut *game.borrow_mut();
        g.session.return_to_menu(&mut g.audio);
        set_hidden(&g.document, "game", true);
        set_hidden(&g.document, "game-over", true);
        set_hidden(&g.document, "high-score-badge", true);
        set_hidden(&g.document, "start-screen", false);
    }

    // === DOM wiring ===

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let classes = el.class_list();
            if hidden {
                let _ = classes.add_1("hidden");
            } else {
                let _ = classes.remove_1("hidden");
            }
        }
    }

    /// Wire a click handler on the element with the given id
    fn on_click(document: &Document, id: &str, handler: impl Fn() + 'static) {
        if let Some(el) = document.get_element_by_id(id) {
            let cb = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| handler());
            let _ = el.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref());
            cb.forget();
        }
    }

    fn setup_input(game: &Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let cb = {
            let game = game.clone();
            Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let g = &mut *game.borrow_mut();
                match event.key().as_str() {
                    "ArrowUp" | "w" => g.session.move_up(&mut g.renderer),
                    "ArrowDown" | "s" => g.session.move_down(&mut g.renderer),
                    _ => {}
                }
            })
        };
        let _ = window.add_event_listener_with_callback("keydown", cb.as_ref().unchecked_ref());
        cb.forget();
    }

    fn setup_buttons(game: &Rc<RefCell<Game>>) {
        let document = game.borrow().document.clone();

        {
            let game = game.clone();
            on_click(&document, "start-btn", move || start_session(&game));
        }
        {
            let game = game.clone();
            on_click(&document, "restart-btn", move || restart_session(&game));
        }
        {
            let game = game.clone();
            on_click(&document, "menu-btn", move || return_to_menu(&game));
        }
        {
            let game = game.clone();
            on_click(&document, "up-btn", move || {
                let g = &mut *game.borrow_mut();
                g.session.move_up(&mut g.renderer);
            });
        }
        {
            let game = game.clone();
            on_click(&document, "down-btn", move || {
                let g = &mut *game.borrow_mut();
                g.session.move_down(&mut g.renderer);
            });
        }
    }

    fn setup_resize(game: &Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let cb = {
            let game = game.clone();
            Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let g = &mut *game.borrow_mut();
                g.session.relayout(&g.viewport, &mut g.renderer);
            })
        };
        let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
        cb.forget();
    }

    fn setup_cleanup(game: &Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let cb = {
            let game = game.clone();
            Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                cancel_timers(&game);
                let g = &mut *game.borrow_mut();
                g.session.return_to_menu(&mut g.audio);
            })
        };
        let _ = window
            .add_event_listener_with_callback("beforeunload", cb.as_ref().unchecked_ref());
        cb.forget();
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
    log::info!("Shadow Dash (native) starting...");
    log::info!("The browser build is the real game - run with `trunk serve`");

    headless_demo();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive a short seeded session against no-op sinks so the native binary
/// exercises the simulation end to end.
#[cfg(not(target_arch = "wasm32"))]
fn headless_demo() {
    use shadow_dash::ScoreBoard;
    use shadow_dash::audio::AudioManager;
    use shadow_dash::consts::*;
    use shadow_dash::platform::{RenderSink, ScoreStore};
    use shadow_dash::score::BestScore;
    use shadow_dash::sim::{LaneLayout, Session, ShadowTint};

    struct NullRenderer;
    impl RenderSink for NullRenderer {
        fn set_player_position(&mut self, _lane: u32) {}
        fn spawn_shadow(&mut self, _id: u32, _lane: u32, _tint: ShadowTint) {}
        fn render_shadow(&mut self, _id: u32, _x: f32, _lane: u32) {}
        fn remove_shadow(&mut self, _id: u32) {}
        fn spawn_particles(&mut self, _x: f32, _y: f32) {}
    }

    struct NullStore;
    impl ScoreStore for NullStore {
        fn load_best(&self) -> Option<BestScore> {
            None
        }
        fn save_best(&mut self, _score: u32) {}
    }

    let mut render = NullRenderer;
    let mut store = NullStore;
    let mut audio = AudioManager::new();

    let scores = ScoreBoard::load(&store);
    let mut session = Session::with_layout(4242, LaneLayout::with_max_lane(9), scores);
    session.start(&mut render, &mut audio);

    // Ten simulated seconds: spawn on the usual cadence, tick every frame
    let mut since_spawn = 0.0f64;
    for _ in 0..625 {
        since_spawn += FRAME_MS;
        if since_spawn >= f64::from(SPAWN_INTERVAL_MS) {
            session.spawn_tick(&mut render);
            since_spawn = 0.0;
        }
        session.frame(FRAME_MS, &mut render, &mut store, &mut audio);
        if !session.is_running() {
            break;
        }
    }

    println!("Headless demo over - final score {}", session.score());
}
