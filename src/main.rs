//! Rogue Arena entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};

    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent};

    use rogue_arena::input::{Command, command_for_key};
    use rogue_arena::platform::TickScheduler;
    use rogue_arena::renderer::CanvasRenderer;
    use rogue_arena::sim::{Game, GamePhase};
    use rogue_arena::{Settings, Tuning};

    /// Tick source backed by `requestAnimationFrame`
    struct RafScheduler {
        app: Weak<RefCell<App>>,
        handle: Option<i32>,
    }

    impl RafScheduler {
        fn new(app: Weak<RefCell<App>>) -> Self {
            Self { app, handle: None }
        }
    }

    impl TickScheduler for RafScheduler {
        fn request_tick(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let app = self.app.clone();
            let closure = Closure::once(move |time: f64| {
                if let Some(app) = app.upgrade() {
                    frame(&app, time);
                }
            });
            self.handle = window
                .request_animation_frame(closure.as_ref().unchecked_ref())
                .ok();
            closure.forget();
        }

        fn cancel_tick(&mut self) {
            if let (Some(window), Some(handle)) = (web_sys::window(), self.handle.take()) {
                let _ = window.cancel_animation_frame(handle);
            }
        }
    }

    /// Game instance plus presentation state
    struct App {
        game: Game<RafScheduler>,
        renderer: Option<CanvasRenderer>,
        show_fps: bool,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl App {
        fn track_fps(&mut self, time: f64) {
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            // Oldest to newest frame
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        fn draw(&self) {
            let (Some(renderer), Some(snapshot)) = (&self.renderer, self.game.snapshot()) else {
                return;
            };
            if let Err(e) = renderer.render(&snapshot) {
                log::warn!("Render error: {:?}", e);
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(snapshot) = self.game.snapshot() {
                set_text(&document, "health-value", &snapshot.health().to_string());
                set_text(&document, "level-value", &snapshot.level().to_string());
                set_text(&document, "score-value", &snapshot.score().to_string());
            }
            if self.show_fps {
                set_text(&document, "fps-value", &self.fps.to_string());
            }

            let label = match self.game.phase() {
                GamePhase::Idle => "Start",
                GamePhase::Running => "Pause",
                GamePhase::Paused => "Resume",
                GamePhase::GameOver => "",
            };
            let over = self.game.phase() == GamePhase::GameOver;
            set_text(&document, "start-game", label);
            set_visible(&document, "start-game", !over);
            set_visible(&document, "restart-game", over);
        }
    }

    fn set_text(document: &web_sys::Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(document: &web_sys::Document, id: &str, visible: bool) {
        if let Some(el) = document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let display = if visible { "block" } else { "none" };
            let _ = el.style().set_property("display", display);
        }
    }

    /// Timestamp in the same timebase as `requestAnimationFrame`
    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    /// One scheduled tick: simulate, draw, refresh the HUD
    fn frame(app: &Rc<RefCell<App>>, time: f64) {
        let mut app = app.borrow_mut();
        app.game.on_tick(time);
        app.track_fps(time);
        app.draw();
        app.update_hud();
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Rogue Arena starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let settings = Settings::load();
        let tuning = Tuning::load();

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game-canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(tuning.arena_width as u32);
        canvas.set_height(tuning.arena_height as u32);

        let renderer = match CanvasRenderer::new(&canvas, settings.rotated_walls) {
            Ok(renderer) => Some(renderer),
            Err(e) => {
                log::error!("Canvas unavailable: {:?}", e);
                None
            }
        };

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new_cyclic(|weak| {
            RefCell::new(App {
                game: Game::new(
                    seed,
                    settings.layout.clone(),
                    tuning,
                    RafScheduler::new(weak.clone()),
                ),
                renderer,
                show_fps: settings.show_fps,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            })
        });

        app.borrow_mut().game.on_game_over(|snapshot| {
            log::info!(
                "Game over: score {}, level {}",
                snapshot.score(),
                snapshot.level()
            );
        });

        log::info!("Game initialized with seed: {}", seed);

        setup_keyboard(app.clone());
        setup_buttons(app.clone());

        app.borrow().update_hud();
        log::info!("Rogue Arena ready - press space to start");
    }

    fn apply(app: &Rc<RefCell<App>>, command: Command) {
        let now = now_ms();
        let mut app = app.borrow_mut();
        match command {
            Command::Move(direction) => {
                app.game.request_move(direction);
            }
            Command::Toggle => {
                app.game.toggle(now);
            }
            Command::Restart => {
                app.game.restart(now);
            }
        }
        app.draw();
        app.update_hud();
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if let Some(command) = command_for_key(&event.key()) {
                // Keep space and arrows from scrolling the page
                event.prevent_default();
                apply(&app, command);
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(app: Rc<RefCell<App>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        for (id, command) in [("start-game", Command::Toggle), ("restart-game", Command::Restart)] {
            if let Some(btn) = document.get_element_by_id(id) {
                let app = app.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    apply(&app, command);
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use rogue_arena::platform::ManualScheduler;
    use rogue_arena::sim::Game;
    use rogue_arena::{Settings, Tuning};

    env_logger::init();
    log::info!("Rogue Arena (native) starting...");
    log::info!("Native mode runs headless - run with `trunk serve` for the web version");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let settings = Settings::load();
    let mut game = Game::new(seed, settings.layout, Tuning::load(), ManualScheduler::new());
    game.on_game_over(|snapshot| {
        log::info!(
            "Game over on '{}' after {} ticks: score {}",
            snapshot.layout_name(),
            snapshot.ticks(),
            snapshot.score()
        );
    });

    headless::run(&mut game);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use rogue_arena::platform::ManualScheduler;
    use rogue_arena::sim::{Direction, Game, World};

    /// Simulated frame cadence (~60 Hz)
    const FRAME_MS: f64 = 16.0;
    /// Two simulated minutes
    const MAX_TICKS: u64 = 7_500;
    /// Pause once mid-run to exercise resume
    const PAUSE_AT: u64 = 600;
    const PAUSE_MS: f64 = 5_000.0;
    /// Ticks between bot key presses
    const KEY_EVERY: u64 = 4;

    /// Drive `game` with an evasive bot until game over or the tick cap
    pub fn run(game: &mut Game<ManualScheduler>) {
        let mut now = 0.0;
        let mut ticks = 0u64;
        game.start(now);

        while ticks < MAX_TICKS && game.scheduler_mut().take_request() {
            now += FRAME_MS;
            ticks += 1;

            if ticks == PAUSE_AT {
                game.pause();
                now += PAUSE_MS;
                game.resume(now);
            }
            if ticks % KEY_EVERY == 0 {
                if let Some(direction) = game.world().and_then(flee_direction) {
                    game.request_move(direction);
                }
            }
            game.on_tick(now);
        }

        match game.snapshot() {
            Some(snapshot) => log::info!(
                "Stopped in {:?} after {} ticks: health {}/{}, score {}",
                snapshot.phase,
                ticks,
                snapshot.health(),
                snapshot.max_health(),
                snapshot.score()
            ),
            None => log::warn!("Run never started"),
        }
    }

    /// Step away from the nearest enemy along the dominant axis
    fn flee_direction(world: &World) -> Option<Direction> {
        let me = world.player.center();
        let nearest = world
            .enemies
            .iter()
            .map(|e| e.center())
            .min_by(|a, b| {
                a.distance_squared(me)
                    .partial_cmp(&b.distance_squared(me))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })?;

        let away = me - nearest;
        let direction = if away.x.abs() > away.y.abs() {
            if away.x > 0.0 { Direction::Right } else { Direction::Left }
        } else if away.y > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        };
        Some(direction)
    }
}
