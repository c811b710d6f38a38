//! Scroll-driven WebGL page with a draggable photo collage.
//!
//! The state machines (collage, scroll, camera, tweens) are plain Rust and
//! build on any target; the DOM wiring in `wasm` only exists on wasm32.

pub mod add_control;
pub mod camera;
pub mod collage;
pub mod config;
pub mod error;
pub mod pointer;
pub mod scroll;
pub mod tween;

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, ScrollRestoration};

    use crate::config::PageConfig;
    use crate::error::PageError;
    use crate::pointer::PointerTracker;

    pub mod animator;
    pub mod collage_view;
    pub mod dom;
    mod render;
    mod scroll_sync;

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        let window = web_sys::window().ok_or(PageError::NoWindow)?;
        let document = window.document().ok_or(PageError::NoDocument)?;

        let mut config = PageConfig::default();
        for key in config.apply_overrides(|key| dom::read_storage(&window, key)) {
            gloo::console::log!("config override", key);
        }

        // Clear scroll memory
        window.history()?.set_scroll_restoration(ScrollRestoration::Manual)?;

        let canvas: HtmlCanvasElement = dom::query(&document, config.selectors.canvas)?;
        let viewport = dom::viewport(&window)?;
        let surface = Rc::new(RefCell::new(render::RenderSurface::new(
            canvas.clone(),
            &config,
            viewport,
        )?));
        for listener in render::bind_orbit_controls(&surface) {
            listener.forget();
        }

        let scroll = scroll_sync::ScrollSynchronizer::mount(&window, &document, &canvas, &config)?;
        scroll.set_scroll_top(0.0);

        let pointer = Rc::new(RefCell::new(PointerTracker::new()));
        dom::track_pointer(&document, pointer.clone()).forget();

        let animator = Rc::new(RefCell::new(animator::Animator::new(config.tween_ms)));
        let collage = collage_view::CollageView::mount(
            &window,
            &document,
            &config,
            pointer,
            animator.clone(),
        )?;
        gloo::console::log!("collage ready, entries:", collage.entry_count() as u32);

        render::start(surface, move |now_ms| {
            // the collage view lives as long as the frame loop
            let _keep_alive = &collage;
            scroll.frame();
            animator.borrow_mut().tick(now_ms);
        })?;
        Ok(())
    }
}
