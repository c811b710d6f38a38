use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    CustomEvent, CustomEventInit, Document, Event, HtmlCanvasElement, HtmlElement, HtmlInputElement,
    HtmlTextAreaElement, KeyboardEvent, TouchEvent, WheelEvent, Window,
};

use super::dom::{self, set_style};
use crate::config::PageConfig;
use crate::error::PageResult;
use crate::scroll::{key_scroll_delta, normalize_wheel_delta, ScrollStatus, SmoothScroll, TouchDrag};

pub const SCROLL_EVENT: &str = "collage:scroll";

/// Keeps `#bodyScrollbar` scrolled by the damped model and mirrors every
/// offset change onto the content transform, the scroll-trigger hook and the
/// canvas position.
pub struct ScrollSynchronizer {
    model: Rc<RefCell<SmoothScroll>>,
    window: Window,
    container: HtmlElement,
    content: HtmlElement,
    _input: Vec<EventListener>,
}

impl ScrollSynchronizer {
    pub fn mount(
        window: &Window,
        document: &Document,
        canvas: &HtmlCanvasElement,
        config: &PageConfig,
    ) -> PageResult<Self> {
        let container: HtmlElement = dom::query(document, config.selectors.scrollbar)?;
        let content: HtmlElement = dom::query_within(&container, config.selectors.scroll_content)?;

        let mut model = SmoothScroll::new(config.scroll_damping);
        {
            let content = content.clone();
            model.add_listener(Box::new(move |status: &ScrollStatus| {
                set_style(&content, "transform", &format!("translate3d(0, {}px, 0)", -status.offset_y));
            }));
        }
        model.add_listener(Box::new(trigger_update_hook(document.clone())));
        {
            let canvas: HtmlElement = canvas.clone().unchecked_into();
            model.add_listener(Box::new(move |status: &ScrollStatus| {
                set_style(&canvas, "top", &format!("{}px", status.offset_y));
            }));
        }
        let model = Rc::new(RefCell::new(model));

        let sync = Self {
            _input: bind_input(window, document, &model),
            model,
            window: window.clone(),
            container,
            content,
        };
        sync.refresh_bounds();
        Ok(sync)
    }

    pub fn set_scroll_top(&self, value: f64) {
        self.refresh_bounds();
        self.model.borrow_mut().set_scroll_top(value);
    }

    /// Once per animation frame: re-measure, then advance the damped offset.
    pub fn frame(&self) {
        self.refresh_bounds();
        self.model.borrow_mut().step();
    }

    fn refresh_bounds(&self) {
        let Ok(viewport) = dom::viewport(&self.window) else {
            return;
        };
        let content_height = self
            .content
            .scroll_height()
            .max(self.container.client_height()) as f64;
        self.model
            .borrow_mut()
            .set_bounds(viewport.width, viewport.height, content_height);
    }
}

/// Wheel, keyboard and touch input on the whole document feed the model.
fn bind_input(window: &Window, document: &Document, model: &Rc<RefCell<SmoothScroll>>) -> Vec<EventListener> {
    let page_height = {
        let window = window.clone();
        move || dom::viewport(&window).map(|v| v.height).unwrap_or(0.0)
    };

    let wheel = {
        let model = model.clone();
        let page_height = page_height.clone();
        EventListener::new(document, "wheel", move |event: &Event| {
            if let Some(event) = event.dyn_ref::<WheelEvent>() {
                let delta = normalize_wheel_delta(event.delta_y(), event.delta_mode(), page_height());
                model.borrow_mut().scroll_by(delta);
            }
        })
    };

    let key = {
        let model = model.clone();
        let options = EventListenerOptions::enable_prevent_default();
        EventListener::new_with_options(document, "keydown", options, move |event: &Event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            // keys typed into captions and inputs stay with them
            let typing = event.target().is_some_and(|target| {
                target.has_type::<HtmlTextAreaElement>() || target.has_type::<HtmlInputElement>()
            });
            if typing || event.default_prevented() || event.ctrl_key() || event.alt_key() || event.meta_key() {
                return;
            }
            if let Some(delta) = key_scroll_delta(&event.key(), event.shift_key(), page_height()) {
                event.prevent_default();
                model.borrow_mut().scroll_by(delta);
            }
        })
    };

    let drag = Rc::new(RefCell::new(TouchDrag::default()));
    let first_touch_y = |event: &Event| {
        event
            .dyn_ref::<TouchEvent>()
            .and_then(|event| event.touches().get(0))
            .map(|touch| touch.client_y() as f64)
    };
    let touch_start = {
        let drag = drag.clone();
        EventListener::new(document, "touchstart", move |event: &Event| {
            if let Some(y) = first_touch_y(event) {
                drag.borrow_mut().start(y);
            }
        })
    };
    let touch_move = {
        let drag = drag.clone();
        let model = model.clone();
        EventListener::new(document, "touchmove", move |event: &Event| {
            let Some(y) = first_touch_y(event) else {
                return;
            };
            let delta = drag.borrow_mut().move_to(y);
            if let Some(delta) = delta {
                model.borrow_mut().scroll_by(delta);
            }
        })
    };
    let touch_end = EventListener::new(document, "touchend", move |_| drag.borrow_mut().end());

    vec![wheel, key, touch_start, touch_move, touch_end]
}

/// Tell scroll-triggered effects on the page that the offset changed.
fn trigger_update_hook(document: Document) -> impl FnMut(&ScrollStatus) {
    move |status: &ScrollStatus| {
        let init = CustomEventInit::new();
        init.set_detail(&JsValue::from_f64(status.offset_y));
        match CustomEvent::new_with_event_init_dict(SCROLL_EVENT, &init) {
            Ok(event) => {
                if let Err(err) = document.dispatch_event(&event) {
                    gloo::console::warn!("scroll hook dispatch failed", err);
                }
            }
            Err(err) => {
                gloo::console::warn!("scroll hook event failed", err);
            }
        }
    }
}
