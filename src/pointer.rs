use glam::DVec2;

/// Last pointer position seen on the document, in viewport (client) pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerTracker {
    position: DVec2,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, client_x: f64, client_y: f64) {
        self.position = DVec2::new(client_x, client_y);
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    /// Pointer position relative to the viewport centre, the frame in which
    /// dragged photos are translated.
    pub fn centered_offset(&self, viewport_width: f64, viewport_height: f64) -> DVec2 {
        self.position - DVec2::new(viewport_width / 2.0, viewport_height / 2.0)
    }
}
