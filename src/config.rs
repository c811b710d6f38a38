//! Page-wide tunables. Defaults reproduce the shipped page; a handful of
//! debug knobs can be overridden from `localStorage`.

use std::f64::consts::FRAC_PI_2;

pub const SCROLL_DAMPING_KEY: &str = "collage.debug.scroll_damping";
pub const TWEEN_MS_KEY: &str = "collage.debug.tween_ms";
pub const SWAP_DELAY_MS_KEY: &str = "collage.debug.swap_delay_ms";
pub const ORBIT_KEY: &str = "collage.debug.orbit";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraConfig {
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Position of the rig that carries the camera.
    pub rig_position: [f32; 3],
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitConfig {
    pub enabled: bool,
    pub enable_damping: bool,
    pub damping_factor: f64,
    pub max_polar_angle: f64,
    pub min_distance: f64,
    pub max_distance: f64,
    /// Radians per CSS pixel of pointer drag.
    pub rotate_speed: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Selectors {
    pub canvas: &'static str,
    pub scrollbar: &'static str,
    pub scroll_content: &'static str,
    pub collage: &'static str,
    pub add_photo: &'static str,
    pub photo_div: &'static str,
    pub image_button: &'static str,
    pub chooser: &'static str,
    pub photo: &'static str,
    pub caption: &'static str,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PageConfig {
    pub camera: CameraConfig,
    pub orbit: OrbitConfig,
    pub max_pixel_ratio: f64,
    pub scroll_damping: f64,
    pub tween_ms: f64,
    pub swap_delay_ms: u32,
    pub selectors: Selectors,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig {
                fov_y_degrees: 45.0,
                near: 0.1,
                far: 100.0,
                rig_position: [0.0, 0.0, 5.0],
            },
            orbit: OrbitConfig {
                enabled: false,
                enable_damping: true,
                damping_factor: 0.05,
                max_polar_angle: FRAC_PI_2,
                min_distance: 12.0,
                max_distance: 80.0,
                rotate_speed: 0.005,
            },
            max_pixel_ratio: 2.0,
            scroll_damping: 0.1,
            tween_ms: 250.0,
            swap_delay_ms: 50,
            selectors: Selectors {
                canvas: "canvas.webgl",
                scrollbar: "#bodyScrollbar",
                scroll_content: ".scroll-content",
                collage: "#main",
                add_photo: "#addPhoto",
                photo_div: ".photoDiv",
                image_button: ".addImageButton",
                chooser: ".photoChooser",
                photo: ".actualPhoto",
                caption: ".inputText",
            },
        }
    }
}

impl PageConfig {
    /// Apply debug overrides. `lookup` returns the raw stored value for a key;
    /// unparsable or out-of-range values are skipped. Returns the keys that
    /// took effect.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Vec<&'static str>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_owned())
                .filter(|raw| !raw.is_empty())
        };
        let mut applied = Vec::new();

        if let Some(damping) = read(SCROLL_DAMPING_KEY).and_then(|v| v.parse::<f64>().ok()) {
            if damping > 0.0 && damping <= 1.0 {
                self.scroll_damping = damping;
                applied.push(SCROLL_DAMPING_KEY);
            }
        }
        if let Some(ms) = read(TWEEN_MS_KEY).and_then(|v| v.parse::<u32>().ok()) {
            self.tween_ms = ms as f64;
            applied.push(TWEEN_MS_KEY);
        }
        if let Some(ms) = read(SWAP_DELAY_MS_KEY).and_then(|v| v.parse::<u32>().ok()) {
            self.swap_delay_ms = ms;
            applied.push(SWAP_DELAY_MS_KEY);
        }
        if let Some(flag) = read(ORBIT_KEY) {
            let enabled = match flag.as_str() {
                "1" | "true" | "on" => Some(true),
                "0" | "false" | "off" => Some(false),
                _ => None,
            };
            if let Some(enabled) = enabled {
                self.orbit.enabled = enabled;
                applied.push(ORBIT_KEY);
            }
        }
        applied
    }
}
