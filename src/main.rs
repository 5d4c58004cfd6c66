//! Chroma Tap entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Element, HtmlCanvasElement, MouseEvent, TouchEvent};

    use chroma_tap::audio::{AudioCue, AudioManager, Mix};
    use chroma_tap::consts::SIM_DT;
    use chroma_tap::platform::web::{
        BrowserViewport, DomPresenter, RESTART_BUTTON_ID, START_BUTTON_ID, color_buttons,
    };
    use chroma_tap::platform::{PointerSource, TouchDebounce, canvas_point};
    use chroma_tap::renderer::Scene;
    use chroma_tap::session::FixedStep;
    use chroma_tap::sim::GameEvent;
    use chroma_tap::ui::{self, Presenter};
    use chroma_tap::{Session, Settings, StartError, StreamId, Tuning};

    /// Optional `<script type="application/json">` with balance overrides
    const TUNING_ELEMENT_ID: &str = "tuning";

    /// Game instance holding all state
    struct Game {
        session: Session,
        presenter: DomPresenter,
        viewport: BrowserViewport,
        audio: AudioManager,
        settings: Settings,
        step: FixedStep,
        last_time: f64,
        /// Pending animation frame of the current tick stream
        frame_handle: Option<i32>,
        debounce: TouchDebounce,
    }

    impl Game {
        fn present(&mut self, events: &[GameEvent]) {
            let layout = self.session.layout();
            ui::present(
                &mut self.presenter,
                &self.audio,
                self.session.state(),
                &layout,
                events,
            );
        }

        fn refresh(&mut self) {
            let layout = self.session.layout();
            ui::refresh(&mut self.presenter, self.session.state(), &layout);
        }

        /// Start button. Returns the new tick stream on success.
        fn start(&mut self) -> Option<StreamId> {
            // First user gesture: audio may now be created
            self.audio.unlock();

            match self.session.start(&self.viewport) {
                Ok(events) => {
                    self.present(&events);
                    self.step.reset();
                    self.last_time = 0.0;
                    self.session.active_stream()
                }
                Err(err @ StartError::PortraitOrientation) => {
                    self.presenter.notify(&err.to_string());
                    None
                }
                Err(err) => {
                    log::warn!("Start ignored: {}", err);
                    None
                }
            }
        }

        /// Restart button (game over screen)
        fn restart(&mut self) {
            self.cancel_frame();
            let events = self.session.restart();
            self.present(&events);
        }

        fn cancel_frame(&mut self) {
            if let Some(handle) = self.frame_handle.take() {
                if let Some(window) = web_sys::window() {
                    let _ = window.cancel_animation_frame(handle);
                }
            }
        }

        fn resize(&mut self) {
            self.session.resize(&self.viewport);
            let layout = self.session.layout();
            self.presenter.apply_layout(&layout);
        }

        fn toggle_mute(&mut self) {
            self.settings.muted = !self.settings.muted;
            self.settings.save();
            self.audio.set_mix(Mix::from_settings(&self.settings));
            log::info!("Muted: {}", self.settings.muted);
        }

        /// Run simulation ticks and draw
        fn update(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            self.last_time = time;

            for _ in 0..self.step.advance(dt) {
                let events = self.session.tick(SIM_DT);
                self.present(&events);
                if !self.session.state().is_playing() {
                    break;
                }
            }

            if self.session.state().is_playing() {
                let scene = Scene::build(self.session.state(), self.session.tuning().boundary_x);
                self.presenter.draw(&scene);
            }
        }
    }

    fn load_tuning(document: &web_sys::Document) -> Tuning {
        let Some(json) = document
            .get_element_by_id(TUNING_ELEMENT_ID)
            .and_then(|el| el.text_content())
        else {
            return Tuning::default();
        };
        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning override");
                tuning
            }
            Err(err) => {
                log::warn!("Ignoring tuning override: {}", err);
                Tuning::default()
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Chroma Tap starting...");

        let window = web_sys::window().expect("no window");
        let Some(presenter) = DomPresenter::new(window.clone()) else {
            log::error!("Canvas or 2D context missing - cannot start");
            return;
        };

        let tuning = load_tuning(presenter.document());
        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;

        let mut game = Game {
            session: Session::new(seed, tuning),
            presenter,
            viewport: BrowserViewport::new(window),
            audio: AudioManager::new(Mix::from_settings(&settings)),
            settings,
            step: FixedStep::default(),
            last_time: 0.0,
            frame_handle: None,
            debounce: TouchDebounce::default(),
        };
        game.resize();
        game.refresh();
        log::info!("Game initialized with seed: {}", seed);

        let canvas = game.presenter.canvas().clone();
        let buttons = color_buttons(game.presenter.document());
        let game = Rc::new(RefCell::new(game));

        setup_menu_buttons(game.clone());
        setup_canvas_input(&canvas, game.clone());
        for button in buttons {
            setup_color_button(&button, game.clone());
        }
        setup_window_handlers(game);

        log::info!("Chroma Tap ready");
    }

    fn setup_menu_buttons(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id(START_BUTTON_ID) {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let stream = game.borrow_mut().start();
                if let Some(stream) = stream {
                    start_loop(game.clone(), stream);
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id(RESTART_BUTTON_ID) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().restart();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_canvas_input(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse click (desktop)
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas_clone.get_bounding_client_rect();
                let point = canvas_point(
                    event.client_x() as f32,
                    event.client_y() as f32,
                    rect.left() as f32,
                    rect.top() as f32,
                );
                let mut g = game.borrow_mut();
                let events = g.session.handle_hit(point.x, point.y);
                g.present(&events);
            });
            let _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start (mobile); prevent_default suppresses the follow-up click
        {
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    let point = canvas_point(
                        touch.client_x() as f32,
                        touch.client_y() as f32,
                        rect.left() as f32,
                        rect.top() as f32,
                    );
                    let mut g = game.borrow_mut();
                    let events = g.session.handle_hit(point.x, point.y);
                    g.present(&events);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_color_button(button: &Element, game: Rc<RefCell<Game>>) {
        let Some(key) = button.get_attribute("data-color") else {
            log::warn!("Color button without data-color");
            return;
        };

        for (event_name, source) in [
            ("touchstart", PointerSource::Touch),
            ("click", PointerSource::Mouse),
        ] {
            let game = game.clone();
            let key = key.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                if !g.debounce.accept(source, js_sys::Date::now()) {
                    return;
                }
                let events = g.session.select_color_key(&key);
                g.present(&events);
            });
            let _ = button
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_window_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Resize and orientation changes re-layout the canvas
        for event_name in ["resize", "orientationchange"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().resize();
            });
            let _ = window
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if matches!(event.key().as_str(), "m" | "M") {
                    game.borrow_mut().toggle_mute();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Begin a tick stream, dropping any frame still pending from an older one
    fn start_loop(game: Rc<RefCell<Game>>, stream: StreamId) {
        game.borrow_mut().cancel_frame();
        request_animation_frame(game, stream);
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>, stream: StreamId) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let game_clone = game.clone();
        let closure = Closure::once(move |time: f64| {
            game_loop(game_clone, stream, time);
        });
        if let Ok(handle) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            game.borrow_mut().frame_handle = Some(handle);
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, stream: StreamId, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.frame_handle = None;

            // A newer stream (or none) owns the session now
            if !g.session.is_current(stream) {
                log::debug!("Stale tick stream {:?} stopped", stream);
                return;
            }

            g.update(time);

            if !g.session.is_current(stream) {
                return;
            }
        }

        request_animation_frame(game, stream);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use chroma_tap::audio::{AudioCue, SilentAudio};
    use chroma_tap::consts::SIM_DT;
    use chroma_tap::platform::FixedViewport;
    use chroma_tap::renderer::Scene;
    use chroma_tap::sim::{EnemyColor, GameState};
    use chroma_tap::ui::{self, PlayLayout, Presenter, ScreenLayout};
    use chroma_tap::{Session, Settings, Tuning};

    /// Ticks between scripted presses (half a second)
    const BOT_REACTION_TICKS: u64 = 30;
    /// Give up after ten minutes of simulated play
    const MAX_TICKS: u64 = 60 * 60 * 10;

    /// Logs what a browser would show
    #[derive(Default)]
    struct LogPresenter {
        frames: u64,
    }

    impl Presenter for LogPresenter {
        fn show_screens(&mut self, screens: ScreenLayout) {
            log::debug!("screens: {:?}", screens);
        }
        fn apply_layout(&mut self, layout: &PlayLayout) {
            log::debug!("canvas {}x{}", layout.canvas.x, layout.canvas.y);
        }
        fn set_hud(&mut self, score: u64, combo: u32) {
            log::debug!("score {} combo {}", score, combo);
        }
        fn highlight_color(&mut self, color: EnemyColor) {
            log::debug!("selected {:?}", color);
        }
        fn set_final_score(&mut self, score: u64) {
            log::info!("GAME OVER - final score {}", score);
        }
        fn draw(&mut self, _scene: &Scene) {
            self.frames += 1;
        }
        fn notify(&mut self, message: &str) {
            log::warn!("{}", message);
        }
    }

    /// Press the enemy closest to the boundary, switching color first if needed
    fn bot_press(session: &mut Session) -> Vec<chroma_tap::sim::GameEvent> {
        let Some(target) = session
            .state()
            .enemies
            .iter()
            .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))
            .copied()
        else {
            return Vec::new();
        };

        let mut events = Vec::new();
        if target.color != session.state().selected {
            events.extend(session.select_color(target.color));
        }
        let center = target.pos + target.size / 2.0;
        events.extend(session.handle_hit(center.x, center.y));
        events
    }

    fn summary(state: &GameState, ticks: u64) {
        log::info!(
            "{} ticks: score {}, defeated {}, live enemies {}",
            ticks,
            state.score,
            state.enemies_defeated,
            state.enemies.len()
        );
    }

    pub fn run() {
        env_logger::init();
        log::info!("Chroma Tap (native) starting...");
        log::info!("Native mode runs a scripted demo - use `trunk serve` for the web version");

        let settings = Settings::load();
        log::info!("Settings: {:?}", settings);

        let viewport = FixedViewport::desktop(1280.0, 720.0);
        let mut presenter = LogPresenter::default();
        let mut audio = SilentAudio::default();
        let mut session = Session::new(42, Tuning::default());

        session.resize(&viewport);
        ui::refresh(&mut presenter, session.state(), &session.layout());

        audio.unlock();
        match session.start(&viewport) {
            Ok(events) => ui::present(&mut presenter, &audio, session.state(), &session.layout(), &events),
            Err(err) => {
                log::error!("Could not start: {}", err);
                return;
            }
        }

        let mut ticks = 0;
        while session.state().is_playing() && ticks < MAX_TICKS {
            let mut events = session.tick(SIM_DT);
            ticks += 1;
            if ticks % BOT_REACTION_TICKS == 0 {
                events.extend(bot_press(&mut session));
            }
            ui::present(&mut presenter, &audio, session.state(), &session.layout(), &events);
            if session.state().is_playing() {
                presenter.draw(&Scene::build(session.state(), session.tuning().boundary_x));
            }
            if ticks % (60 * 30) == 0 {
                summary(session.state(), ticks);
            }
        }

        summary(session.state(), ticks);
        log::info!("{} frames drawn, {} hit cues", presenter.frames, audio.played());
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
