//! Love Protocol entry point
//!
//! On wasm32 this mounts the page and wires browser events to the card state
//! machine. Natively it pre-renders the page to stdout.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_page {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        AddEventListenerOptions, CanvasRenderingContext2d, Document, Element, Event,
        HtmlCanvasElement, Path2d, TouchEvent,
    };

    use love_protocol::effects::{MotionPreference, backing_store};
    use love_protocol::view::{self, ids};
    use love_protocol::{Action, Page, RejectControl, SiteConfig, Size};

    /// Heart outline on a 24x24 box
    const HEART_PATH: &str = "M12 21.35l-1.45-1.32C5.4 15.36 2 12.28 2 8.5 2 5.42 4.42 3 7.5 3c1.74 0 3.41.81 4.5 2.09C13.09 3.81 14.76 3 16.5 3 19.58 3 22 5.42 22 8.5c0 3.78-3.4 6.86-8.55 11.54L12 21.35z";

    /// Page session plus the browser handles it draws with
    struct App {
        page: Page,
        document: Document,
        confetti: Option<(HtmlCanvasElement, CanvasRenderingContext2d)>,
        heart: Option<Path2d>,
        /// An animation frame is already requested
        animating: bool,
    }

    impl App {
        fn new(page: Page, document: Document) -> Self {
            let confetti = document
                .get_element_by_id(ids::CONFETTI)
                .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
                .and_then(|canvas| {
                    let ctx = canvas
                        .get_context("2d")
                        .ok()
                        .flatten()?
                        .dyn_into::<CanvasRenderingContext2d>()
                        .ok()?;
                    Some((canvas, ctx))
                });
            if confetti.is_none() {
                log::warn!("No 2D canvas available - confetti disabled");
            }
            Self {
                page,
                document,
                confetti,
                heart: Path2d::new_with_path_string(HEART_PATH).ok(),
                animating: false,
            }
        }

        /// Measure the reject button wherever it currently is
        fn measure_reject(&self) -> Option<Size> {
            let selector = format!(r#"[data-action="{}"]"#, view::ACTION_REJECT);
            let button = self.document.query_selector(&selector).ok().flatten()?;
            let rect = button.get_bounding_client_rect();
            Some(Size::new(rect.width() as f32, rect.height() as f32))
        }

        /// Re-render the card frame and body for the current stage
        fn render_card(&self) {
            let proposal = &self.page.proposal;
            if let Some(card) = self.document.get_element_by_id(ids::CARD) {
                let _ = card.set_attribute("class", &view::card::card_class(proposal.stage()));
                card.set_inner_html(&view::card::card_body(
                    &self.page.config,
                    proposal.stage(),
                    proposal.reject_control(),
                ));
            }
            self.render_reject_layer();
        }

        /// Move the floating button, creating it on first escape
        fn render_reject_layer(&self) {
            let Some(layer) = self.document.get_element_by_id(ids::REJECT_LAYER) else {
                return;
            };
            match self.page.proposal.reject_control() {
                RejectControl::Floating(pos) => {
                    if let Some(button) = layer.first_element_child() {
                        let _ = button.set_attribute("style", &view::card::floating_style(pos));
                    } else if let Some(html) =
                        view::card::floating_reject(self.page.proposal.reject_control())
                    {
                        layer.set_inner_html(&html);
                    }
                }
                RejectControl::InFlow | RejectControl::Hidden => layer.set_inner_html(""),
            }
        }

        fn render_ambient(&self) {
            if let Some(el) = self.document.get_element_by_id(ids::AMBIENT) {
                el.set_inner_html(&view::shell::ambient_sprites(&self.page.ambient));
            }
        }

        /// Draw live confetti particles
        fn draw(&self, viewport: Size) {
            let Some((canvas, ctx)) = &self.confetti else {
                return;
            };
            let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
            let (w, h, ratio) = backing_store(viewport, dpr);
            if canvas.width() != w || canvas.height() != h {
                canvas.set_width(w);
                canvas.set_height(h);
            }
            // Draw in CSS pixels on the device-resolution backing store
            let _ = ctx.set_transform(ratio, 0.0, 0.0, ratio, 0.0, 0.0);
            ctx.clear_rect(0.0, 0.0, viewport.width as f64, viewport.height as f64);

            let Some(heart) = &self.heart else { return };
            let field = &self.page.celebrations.confetti;
            for p in &field.particles {
                let Some(color) = field.palette.get(p.color) else {
                    continue;
                };
                let scale = (p.size / 24.0) as f64;
                ctx.save();
                let _ = ctx.translate(p.pos.x as f64, p.pos.y as f64);
                let _ = ctx.rotate(p.tilt as f64);
                let _ = ctx.scale(scale, scale);
                let _ = ctx.translate(-12.0, -12.0);
                ctx.set_global_alpha(p.opacity() as f64);
                ctx.set_fill_style_str(color);
                ctx.fill_with_path_2d(heart);
                ctx.restore();
            }
        }
    }

    fn viewport() -> Size {
        let Some(window) = web_sys::window() else {
            return Size::default();
        };
        let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;
        Size::new(dim(window.inner_width()), dim(window.inner_height()))
    }

    /// Same clock as animation-frame timestamps
    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }

    fn motion_preference() -> MotionPreference {
        let reduced = web_sys::window()
            .and_then(|w| w.match_media("(prefers-reduced-motion: reduce)").ok().flatten())
            .map(|mq| mq.matches())
            .unwrap_or(false);
        if reduced {
            MotionPreference::Reduced
        } else {
            MotionPreference::Full
        }
    }

    /// `data-action` of the closest actionable ancestor of the event target
    fn action_of(event: &Event) -> Option<String> {
        let target = event.target()?.dyn_into::<Element>().ok()?;
        let el = target.closest("[data-action]").ok().flatten()?;
        el.get_attribute("data-action")
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Love Protocol starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let config = SiteConfig::load();
        let motion = motion_preference();
        let seed = js_sys::Date::now() as u64;
        let page = Page::new(config, motion, seed);

        // Keep pre-rendered markup if it is there, otherwise render now
        if let Some(root) = document.get_element_by_id(ids::APP) {
            if root.child_element_count() == 0 {
                root.set_inner_html(&view::page_body(
                    &page.config,
                    &page.ambient,
                    &page.proposal,
                    None,
                ));
            }
        } else {
            log::error!("No #{} element to mount into", ids::APP);
            return;
        }

        if let Some(slot) = document.query_selector("[data-slot=year]").ok().flatten() {
            let year = js_sys::Date::new_0().get_full_year();
            slot.set_text_content(Some(&year.to_string()));
        }

        log::info!("Page mounted with seed: {} ({:?} motion)", seed, motion);

        let app = Rc::new(RefCell::new(App::new(page, document)));

        setup_action_handlers(app.clone());
        setup_resize_handler(app.clone());
        setup_teardown(app.clone());

        // Randomized background only after the first paint
        paint_frame(app);
    }

    fn paint_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            let waiting = {
                let mut a = app.borrow_mut();
                if a.page.paint_frame() {
                    a.render_ambient();
                    log::info!("Background hearts: {}", a.page.ambient.sprites().len());
                }
                !a.page.paint_gate.is_open()
            };
            if waiting {
                paint_frame(app);
            }
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn handle_dodge(app: &Rc<RefCell<App>>) {
        let mut a = app.borrow_mut();
        let was_docked = a.page.proposal.reject_control() == RejectControl::InFlow;
        let obstacle = a.measure_reject();
        if a.page.dodge(obstacle, viewport()) {
            if was_docked {
                // Pull the in-flow button out of the card
                a.render_card();
            } else {
                a.render_reject_layer();
            }
        }
    }

    fn handle_action(app: &Rc<RefCell<App>>, action: Action) {
        let changed = {
            let mut a = app.borrow_mut();
            let changed = a.page.act(action, now_ms()).is_some();
            if changed {
                a.render_card();
            }
            changed
        };
        if changed {
            request_frame(app.clone());
        }
    }

    fn setup_action_handlers(app: Rc<RefCell<App>>) {
        let document = app.borrow().document.clone();

        // Clicks on accept / envelope
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: Event| {
                match action_of(&event).as_deref() {
                    Some(view::ACTION_ACCEPT) => handle_action(&app, Action::Accept),
                    Some(view::ACTION_OPEN) => handle_action(&app, Action::OpenEnvelope),
                    _ => {}
                }
            });
            let _ = document
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer proximity on the reject button
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: Event| {
                if action_of(&event).as_deref() == Some(view::ACTION_REJECT) {
                    handle_dodge(&app);
                }
            });
            let _ = document
                .add_event_listener_with_callback("mouseover", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch: dodge instead of tapping through
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if action_of(&event).as_deref() == Some(view::ACTION_REJECT) {
                    event.prevent_default();
                    handle_dodge(&app);
                }
            });
            let options = AddEventListenerOptions::new();
            options.set_passive(false);
            let _ = document.add_event_listener_with_callback_and_add_event_listener_options(
                "touchstart",
                closure.as_ref().unchecked_ref(),
                &options,
            );
            closure.forget();
        }
    }

    fn setup_resize_handler(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: Event| {
            let mut a = app.borrow_mut();
            let obstacle = a.measure_reject();
            if a.page.resize(obstacle, viewport()) {
                a.render_reject_layer();
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_teardown(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: Event| {
            let mut a = app.borrow_mut();
            a.page.teardown();
            log::info!("Page hidden - effects cancelled");
        });
        let _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Start the effect loop unless it is already running
    fn request_frame(app: Rc<RefCell<App>>) {
        {
            let mut a = app.borrow_mut();
            if a.animating {
                return;
            }
            a.animating = true;
        }
        schedule_frame(app);
    }

    fn schedule_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            effect_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn effect_loop(app: Rc<RefCell<App>>, time: f64) {
        let active = {
            let mut a = app.borrow_mut();
            let size = viewport();
            let active = a.page.frame(time, size);
            a.draw(size);
            if !active {
                a.animating = false;
            }
            active
        };

        if active {
            schedule_frame(app);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_page::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Love Protocol (native) pre-rendering index.html");

    let config = love_protocol::SiteConfig::load();
    print!("{}", love_protocol::view::document(&config));
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
