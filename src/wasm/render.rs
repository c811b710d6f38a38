use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, Event, HtmlCanvasElement, MouseEvent, WebGl2RenderingContext as GL};

use super::dom::{self, set_style};
use crate::camera::{OrbitControls, PerspectiveCamera, Viewport};
use crate::config::PageConfig;
use crate::error::{PageError, PageResult};

/// Transparent unless a background is set; the page shows through.
pub struct Scene {
    pub background: Option<[f32; 4]>,
}

pub struct RenderSurface {
    gl: GL,
    canvas: HtmlCanvasElement,
    camera: PerspectiveCamera,
    controls: OrbitControls,
    scene: Scene,
    max_pixel_ratio: f64,
    buffer_size: (u32, u32),
}

impl RenderSurface {
    pub fn new(canvas: HtmlCanvasElement, config: &PageConfig, viewport: Viewport) -> PageResult<Self> {
        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &"antialias".into(), &JsValue::TRUE)?;
        js_sys::Reflect::set(&options, &"alpha".into(), &JsValue::TRUE)?;
        let gl: GL = canvas
            .get_context_with_context_options("webgl2", &options)?
            .ok_or(PageError::NoWebGl2)?
            .dyn_into()
            .map_err(|_| PageError::NoWebGl2)?;
        gl.enable(GL::DEPTH_TEST);

        let mut surface = Self {
            gl,
            canvas,
            camera: PerspectiveCamera::new(&config.camera, viewport.aspect()),
            controls: OrbitControls::new(config.orbit),
            scene: Scene { background: None },
            max_pixel_ratio: config.max_pixel_ratio,
            buffer_size: (1, 1),
        };
        surface.resize(viewport);
        Ok(surface)
    }

    /// Match camera aspect, CSS size and backing store to the viewport.
    pub fn resize(&mut self, viewport: Viewport) {
        self.camera.set_aspect(viewport.aspect());
        let (width, height) = viewport.drawing_buffer_size(self.max_pixel_ratio);
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        set_style(&self.canvas, "width", &format!("{}px", viewport.width));
        set_style(&self.canvas, "height", &format!("{}px", viewport.height));
        self.buffer_size = (width, height);
    }

    /// Advance controls, draw.
    pub fn frame(&mut self) {
        if self.controls.enabled {
            self.controls.update(&mut self.camera);
        }
        self.draw();
    }

    fn draw(&self) {
        // no meshes yet: nothing reads camera.view_projection(), so a frame
        // is a viewport reset and a clear
        let (width, height) = self.buffer_size;
        self.gl.viewport(0, 0, width as i32, height as i32);
        let [r, g, b, a] = self.scene.background.unwrap_or([0.0, 0.0, 0.0, 0.0]);
        self.gl.clear_color(r, g, b, a);
        self.gl.clear(GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);
    }
}

/// Pointer drag on the canvas rotates the camera while orbit controls are on.
pub fn bind_orbit_controls(surface: &Rc<RefCell<RenderSurface>>) -> Vec<EventListener> {
    if !surface.borrow().controls.enabled {
        return Vec::new();
    }
    let canvas = surface.borrow().canvas.clone();
    let last: Rc<Cell<Option<(f64, f64)>>> = Rc::new(Cell::new(None));

    let down = {
        let last = last.clone();
        EventListener::new(&canvas, "pointerdown", move |event: &Event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                last.set(Some((event.client_x() as f64, event.client_y() as f64)));
            }
        })
    };
    let moved = {
        let last = last.clone();
        let surface = surface.clone();
        EventListener::new(&canvas, "pointermove", move |event: &Event| {
            let (Some((x0, y0)), Some(event)) = (last.get(), event.dyn_ref::<MouseEvent>()) else {
                return;
            };
            let (x, y) = (event.client_x() as f64, event.client_y() as f64);
            surface.borrow_mut().controls.rotate_by_pointer(x - x0, y - y0);
            last.set(Some((x, y)));
        })
    };
    let up = EventListener::new(&canvas, "pointerup", move |_| last.set(None));
    vec![down, moved, up]
}

/// Start the render loop. `before_render` runs first in every frame with the
/// frame timestamp; it is where scroll and tweens advance.
pub fn start<F>(surface: Rc<RefCell<RenderSurface>>, mut before_render: F) -> Result<(), JsValue>
where
    F: FnMut(f64) + 'static,
{
    let win = window().ok_or(PageError::NoWindow)?;

    // Resize surface and camera to the window
    let resize_closure = {
        let surface = surface.clone();
        let win = win.clone();
        Closure::wrap(Box::new(move || match dom::viewport(&win) {
            Ok(viewport) => surface.borrow_mut().resize(viewport),
            Err(err) => {
                gloo::console::warn!("resize skipped", err.to_string());
            }
        }) as Box<dyn FnMut()>)
    };
    win.add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())?;
    resize_closure.forget();

    // Animation loop
    // `f` holds the animation-frame closure so that we can keep calling
    // `request_animation_frame` recursively. Storing it inside an `Option`
    // allows us to create the `Closure` first and then obtain a reference to
    // it from within itself.
    let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    let loop_window = win.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |now_ms: f64| {
        before_render(now_ms);
        surface.borrow_mut().frame();

        // schedule next
        if let Some(next) = f.borrow().as_ref() {
            if let Err(err) = loop_window.request_animation_frame(next.as_ref().unchecked_ref()) {
                gloo::console::warn!("animation frame request failed", err);
            }
        }
    }) as Box<dyn FnMut(f64)>));

    if let Some(first) = g.borrow().as_ref() {
        win.request_animation_frame(first.as_ref().unchecked_ref())?;
    }

    Ok(())
}
