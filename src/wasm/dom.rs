use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, MouseEvent, Window};

use crate::camera::Viewport;
use crate::config::Selectors;
use crate::error::{PageError, PageResult};
use crate::pointer::PointerTracker;

fn cast<T: JsCast>(found: Result<Option<Element>, wasm_bindgen::JsValue>, selector: &str) -> PageResult<T> {
    found?
        .ok_or_else(|| PageError::MissingElement(selector.to_owned()))?
        .dyn_into::<T>()
        .map_err(|_| PageError::WrongElementType(selector.to_owned()))
}

pub fn query<T: JsCast>(document: &Document, selector: &str) -> PageResult<T> {
    cast(document.query_selector(selector), selector)
}

pub fn query_within<T: JsCast>(root: &Element, selector: &str) -> PageResult<T> {
    cast(root.query_selector(selector), selector)
}

/// `.photoDiv` -> `photoDiv`
pub fn class_name(selector: &str) -> &str {
    selector.trim_start_matches('.')
}

pub fn now_ms(window: &Window) -> f64 {
    window.performance().map(|p| p.now()).unwrap_or(0.0)
}

pub fn viewport(window: &Window) -> PageResult<Viewport> {
    let width = window.inner_width()?.as_f64().unwrap_or(0.0);
    let height = window.inner_height()?.as_f64().unwrap_or(0.0);
    Ok(Viewport::new(width, height, window.device_pixel_ratio()))
}

pub fn read_storage(window: &Window, key: &str) -> Option<String> {
    let storage = window.local_storage().ok()??;
    storage.get_item(key).ok()?
}

pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if let Err(err) = element.style().set_property(property, value) {
        gloo::console::warn!("style update failed", property, err);
    }
}

/// Record every pointer move on the document. Runs in the capture phase so
/// element handlers further down already see this event's coordinates.
pub fn track_pointer(document: &Document, pointer: Rc<RefCell<PointerTracker>>) -> EventListener {
    let options = EventListenerOptions {
        phase: EventListenerPhase::Capture,
        passive: true,
    };
    EventListener::new_with_options(document, "pointermove", options, move |event: &Event| {
        if let Some(event) = event.dyn_ref::<MouseEvent>() {
            pointer
                .borrow_mut()
                .record(event.client_x() as f64, event.client_y() as f64);
        }
    })
}

fn element_with_class(document: &Document, tag: &str, class: &str) -> PageResult<Element> {
    let element = document.create_element(tag)?;
    element.set_attribute("class", class)?;
    Ok(element)
}

/// Build the markup of one photo entry:
///
/// ```text
/// div.photoDiv
///   div.photo
///     button.addImageButton > span.material-symbols-outlined
///     input.photoChooser[type=file]
///     img.actualPhoto
///   div.caption
///     textarea.inputText
/// ```
pub fn build_photo_entry(document: &Document, selectors: &Selectors, index: usize) -> PageResult<HtmlElement> {
    let root = element_with_class(document, "div", class_name(selectors.photo_div))?;
    let photo = element_with_class(document, "div", "photo")?;

    let button = element_with_class(document, "button", class_name(selectors.image_button))?;
    let icon = element_with_class(document, "span", "material-symbols-outlined")?;
    icon.set_text_content(Some("add_a_photo"));
    button.append_child(&icon)?;

    let chooser = element_with_class(document, "input", class_name(selectors.chooser))?;
    chooser.set_attribute("type", "file")?;
    chooser.set_attribute("name", "photoFile")?;
    chooser.set_attribute("accept", "image/png, image/gif, image/jpeg")?;
    chooser.set_attribute("style", "display:none")?;

    let image = element_with_class(document, "img", class_name(selectors.photo))?;
    image.set_attribute("alt", &format!("Photo {index}"))?;
    image.set_attribute("draggable", "false")?;

    photo.append_child(&button)?;
    photo.append_child(&chooser)?;
    photo.append_child(&image)?;

    let caption = element_with_class(document, "div", "caption")?;
    let text = element_with_class(document, "textarea", class_name(selectors.caption))?;
    for (name, value) in [
        ("name", "captionText"),
        ("placeholder", "..."),
        ("autocomplete", "off"),
        ("autocorrect", "off"),
        ("autocapitalize", "off"),
        ("spellcheck", "false"),
    ] {
        text.set_attribute(name, value)?;
    }
    caption.append_child(&text)?;

    root.append_child(&photo)?;
    root.append_child(&caption)?;
    root.dyn_into::<HtmlElement>()
        .map_err(|_| PageError::WrongElementType(selectors.photo_div.to_owned()))
}
