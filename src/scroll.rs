//! Damped virtual scrolling. The DOM side feeds wheel, key and touch input
//! and viewport sizes in; every change of the rendered offset is fanned out to listeners.

pub const DOM_DELTA_PIXEL: u32 = 0;
pub const DOM_DELTA_LINE: u32 = 1;
pub const DOM_DELTA_PAGE: u32 = 2;

const LINE_HEIGHT_PX: f64 = 40.0;
const SNAP_PX: f64 = 0.5;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollStatus {
    pub offset_y: f64,
    pub limit_y: f64,
}

/// Rectangle handed to scroll-trigger consumers: always the full viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewRect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

pub type ScrollListener = Box<dyn FnMut(&ScrollStatus)>;

/// Convert a wheel event's `deltaY` into pixels.
pub fn normalize_wheel_delta(delta_y: f64, delta_mode: u32, page_height: f64) -> f64 {
    match delta_mode {
        DOM_DELTA_LINE => delta_y * LINE_HEIGHT_PX,
        DOM_DELTA_PAGE => delta_y * page_height,
        _ => delta_y,
    }
}

/// Pixels a key press scrolls by, or `None` for keys that don't scroll.
/// `Home` and `End` overshoot and are clamped to the ends by `scroll_by`.
pub fn key_scroll_delta(key: &str, shift: bool, page_height: f64) -> Option<f64> {
    let page = (page_height - LINE_HEIGHT_PX).max(LINE_HEIGHT_PX);
    match key {
        "ArrowDown" => Some(LINE_HEIGHT_PX),
        "ArrowUp" => Some(-LINE_HEIGHT_PX),
        "PageDown" => Some(page),
        "PageUp" => Some(-page),
        " " | "Spacebar" if shift => Some(-page),
        " " | "Spacebar" => Some(page),
        "Home" => Some(f64::NEG_INFINITY),
        "End" => Some(f64::INFINITY),
        _ => None,
    }
}

/// Vertical finger drag. Moving the finger up scrolls the content down.
#[derive(Clone, Copy, Debug, Default)]
pub struct TouchDrag {
    last_y: Option<f64>,
}

impl TouchDrag {
    pub fn start(&mut self, y: f64) {
        self.last_y = Some(y);
    }

    /// Scroll delta since the last touch point. The first move without a
    /// `start` only records the position.
    pub fn move_to(&mut self, y: f64) -> Option<f64> {
        let last = self.last_y.replace(y)?;
        Some(last - y)
    }

    pub fn end(&mut self) {
        self.last_y = None;
    }
}

pub struct SmoothScroll {
    offset: f64,
    target: f64,
    limit: f64,
    viewport_width: f64,
    viewport_height: f64,
    damping: f64,
    listeners: Vec<ScrollListener>,
}

impl SmoothScroll {
    pub fn new(damping: f64) -> Self {
        Self {
            offset: 0.0,
            target: 0.0,
            limit: 0.0,
            viewport_width: 0.0,
            viewport_height: 0.0,
            damping: damping.clamp(f64::EPSILON, 1.0),
            listeners: Vec::new(),
        }
    }

    pub fn add_listener(&mut self, listener: ScrollListener) {
        self.listeners.push(listener);
    }

    /// Update the viewport and content size. The scroll limit shrinks with
    /// the content; offsets past it are pulled back.
    pub fn set_bounds(&mut self, viewport_width: f64, viewport_height: f64, content_height: f64) {
        self.viewport_width = viewport_width;
        self.viewport_height = viewport_height;
        self.limit = (content_height - viewport_height).max(0.0);
        self.target = self.target.clamp(0.0, self.limit);
        if self.offset > self.limit {
            self.offset = self.limit;
            self.notify();
        }
    }

    pub fn status(&self) -> ScrollStatus {
        ScrollStatus {
            offset_y: self.offset,
            limit_y: self.limit,
        }
    }

    pub fn scroll_top(&self) -> f64 {
        self.offset
    }

    /// Jump straight to `value`, no damping.
    pub fn set_scroll_top(&mut self, value: f64) {
        let value = value.clamp(0.0, self.limit);
        self.target = value;
        if value != self.offset {
            self.offset = value;
            self.notify();
        }
    }

    pub fn scroll_by(&mut self, delta_px: f64) {
        self.target = (self.target + delta_px).clamp(0.0, self.limit);
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn bounding_client_rect(&self) -> ViewRect {
        ViewRect {
            top: 0.0,
            left: 0.0,
            width: self.viewport_width,
            height: self.viewport_height,
        }
    }

    /// Advance one frame. Returns whether the rendered offset moved.
    pub fn step(&mut self) -> bool {
        if self.offset == self.target {
            return false;
        }
        self.offset += (self.target - self.offset) * self.damping;
        if (self.target - self.offset).abs() < SNAP_PX {
            self.offset = self.target;
        }
        self.notify();
        true
    }

    fn notify(&mut self) {
        let status = self.status();
        for listener in self.listeners.iter_mut() {
            listener(&status);
        }
    }
}
