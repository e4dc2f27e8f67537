//! Bouncefield entry point
//!
//! Browser: drives the page's movable elements from `requestAnimationFrame`.
//! Native: runs a headless scene and logs what happened.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::Window;

    use bouncefield::web::DomSurface;
    use bouncefield::{BodyId, Settings, Simulation};

    type App = Rc<RefCell<Simulation<DomSurface>>>;

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Bouncefield starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        let settings = Settings::default();
        let surface = DomSurface::discover(&document, &settings);
        let sim = match Simulation::new(surface, &settings) {
            Ok(sim) => sim,
            Err(e) => {
                // Nothing on the page depends on the animation
                log::warn!("Bounce animation disabled: {}", e);
                return;
            }
        };
        let app: App = Rc::new(RefCell::new(sim));

        setup_hover(&app);
        setup_breakpoint(&window, &settings, &app);
        setup_layout_events(&window, &app);

        request_animation_frame(app);
        log::info!("Bouncefield running!");
    }

    fn listen(target: &web_sys::EventTarget, event: &str, mut handler: impl FnMut() + 'static) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| handler());
        let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Hovering a body holds it in place until the pointer leaves
    fn setup_hover(app: &App) {
        let targets: Vec<(BodyId, web_sys::HtmlElement)> = {
            let sim = app.borrow();
            sim.bodies()
                .iter()
                .filter_map(|body| {
                    let element = sim.surface().element(&body.key)?;
                    Some((body.id, element.clone()))
                })
                .collect()
        };

        for (id, element) in targets {
            let enter = app.clone();
            listen(&element, "mouseenter", move || {
                enter.borrow_mut().pointer_enter(id)
            });
            let leave = app.clone();
            listen(&element, "mouseleave", move || {
                leave.borrow_mut().pointer_leave(id)
            });
        }
    }

    fn setup_breakpoint(window: &Window, settings: &Settings, app: &App) {
        let query = format!("(max-width: {}px)", settings.compact_max_width);
        let Ok(Some(media)) = window.match_media(&query) else {
            log::warn!("matchMedia unavailable, breakpoint handling disabled");
            return;
        };

        let width = window.inner_width().ok().and_then(|w| w.as_f64());
        if width.is_some_and(|w| settings.is_compact(w as f32)) {
            app.borrow_mut().breakpoint_changed(true);
        }

        let app = app.clone();
        let media_clone = media.clone();
        listen(&media, "change", move || {
            app.borrow_mut().breakpoint_changed(media_clone.matches())
        });
    }

    fn setup_layout_events(window: &Window, app: &App) {
        let resize = app.clone();
        listen(window, "resize", move || resize.borrow_mut().relayout());

        let hide = app.clone();
        listen(window, "pagehide", move || hide.borrow_mut().teardown());
    }

    fn request_animation_frame(app: App) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            animation_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn animation_loop(app: App) {
        {
            let mut sim = app.borrow_mut();
            if sim.is_torn_down() {
                return;
            }
            sim.frame();
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use bouncefield::{FrameReport, HeadlessSurface, Settings, Simulation};

    env_logger::init();
    log::info!("Bouncefield (native) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => match Settings::load(std::path::Path::new(&path)) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };

    let mut rng = settings.rng();
    let surface = HeadlessSurface::scene(&settings.headless, &mut rng);
    let mut sim = match Simulation::new(surface, &settings) {
        Ok(sim) => sim,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let mut totals = FrameReport::default();
    for frame in 0..settings.headless.frames {
        let report = sim.frame();
        totals.ticked += report.ticked;
        totals.reflections += report.reflections;
        totals.swaps += report.swaps;
        totals.faulted.extend(report.faulted);

        if frame % 120 == 0 {
            for body in sim.bodies() {
                log::debug!(
                    "frame {} {}: offset {} velocity {}",
                    frame,
                    body.key,
                    body.offset,
                    body.velocity
                );
            }
        }
    }

    log::info!(
        "{} frames: {} ticks, {} reflections, {} swaps, {} faulted",
        sim.frames(),
        totals.ticked,
        totals.reflections,
        totals.swaps,
        totals.faulted.len()
    );
    for body in sim.bodies() {
        println!(
            "{:>10}  offset {:>16}  velocity {}",
            body.key,
            body.offset.to_string(),
            body.velocity
        );
    }

    sim.teardown();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
