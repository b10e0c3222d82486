//! Bubble Pop entry point
//!
//! Browser: draws on `#canvas` and pops bubbles on click.
//! Native: runs the simulation headless for a fixed number of frames.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent};

    use bubble_pop::platform::{AnimationFrameScheduler, Flow, FrameScheduler};
    use bubble_pop::renderer::CanvasSurface;
    use bubble_pop::sim::{SimEvent, Simulation};
    use bubble_pop::Settings;

    /// Game instance holding all state
    struct Game {
        sim: Simulation,
        surface: CanvasSurface,
    }

    impl Game {
        /// One animation frame
        fn frame(&mut self) -> Flow {
            let viewport = self.surface.viewport();
            let flow = self.sim.tick(viewport, &mut self.surface);

            for event in self.sim.drain_events() {
                if let SimEvent::WaveStarted { wave_size } = event {
                    log::info!("Wave {wave_size} incoming");
                }
            }
            flow
        }
    }

    /// Size the canvas to a fraction of the window
    fn fit_canvas(canvas: &HtmlCanvasElement, fill: f32) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let dimension = |v: Result<JsValue, JsValue>| {
            v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
        };
        let width = dimension(window.inner_width()) * fill;
        let height = dimension(window.inner_height()) * fill;
        canvas.set_width(width.max(0.0) as u32);
        canvas.set_height(height.max(0.0) as u32);
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Bubble Pop starting...");

        let settings = Settings::load();

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        fit_canvas(&canvas, settings.canvas_fill);
        let _ = canvas
            .style()
            .set_property("background", &settings.style.background.to_css());

        let surface = CanvasSurface::new(canvas.clone()).expect("no 2d context");
        let seed = settings
            .spawn
            .seed
            .unwrap_or_else(|| js_sys::Date::now() as u64);
        let sim = Simulation::new(&settings, seed, surface.viewport());
        let game = Rc::new(RefCell::new(Game { sim, surface }));

        setup_input_handlers(&canvas, game.clone());
        setup_resize(&canvas, settings.canvas_fill);

        AnimationFrameScheduler.run(move || game.borrow_mut().frame());

        log::info!("Bubble Pop running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Click pops the first bubble under the pointer. Events are
        // dispatched between animation frames, never during a tick.
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let point = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
            if let Some(id) = game.borrow_mut().sim.pick(point) {
                log::debug!("Click at {point} popped bubble {id}");
            }
        });
        let _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(canvas: &HtmlCanvasElement, fill: f32) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            fit_canvas(&canvas, fill);
            log::debug!("Canvas resized to {}x{}", canvas.width(), canvas.height());
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
    use std::cell::RefCell;
    use std::rc::Rc;

    use bubble_pop::platform::{BoundedTicks, FrameScheduler};
    use bubble_pop::renderer::RecordingSurface;
    use bubble_pop::sim::Simulation;
    use bubble_pop::{Settings, Viewport};

    /// Frames to simulate (about a minute at 60 Hz)
    const HEADLESS_TICKS: u64 = 3600;

    env_logger::init();
    log::info!("Bubble Pop (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    let settings = Settings::load();
    let viewport = Viewport::new(800.0, 600.0);
    let seed = settings.spawn.seed.unwrap_or(0x5eed);

    let sim = Rc::new(RefCell::new(Simulation::new(&settings, seed, viewport)));
    let surface = Rc::new(RefCell::new(RecordingSurface::new()));

    {
        let sim = sim.clone();
        let surface = surface.clone();
        BoundedTicks::new(HEADLESS_TICKS)
            .run(move || sim.borrow_mut().tick(viewport, &mut *surface.borrow_mut()));
    }

    let sim = sim.borrow();
    let stats = sim.stats();
    log::info!(
        "Ran {} ticks: wave {}, {} bubbles on screen, {} escaped, {} waves cleared",
        stats.ticks,
        sim.wave_size(),
        sim.bubbles().len(),
        stats.escaped,
        stats.waves_cleared
    );
    log::info!("Last frame issued {} draw calls", surface.borrow().commands().len());
}
