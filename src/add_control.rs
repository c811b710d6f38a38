//! Visual state of the "add photo" button, a pure function of whether an
//! image is waiting to be committed.

use crate::tween::{Lerp, Tween};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb { r: 255.0, g: 255.0, b: 255.0 };
    pub const NEUTRAL: Rgb = Rgb { r: 224.0, g: 224.0, b: 224.0 };

    pub fn to_css(self) -> String {
        format!(
            "rgb({}, {}, {})",
            self.r.round() as u8,
            self.g.round() as u8,
            self.b.round() as u8
        )
    }
}

/// A black `0 0 <blur>` box shadow. Zero alpha renders as `none`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    pub blur_px: f64,
    pub alpha: f64,
}

impl Shadow {
    pub const NONE: Shadow = Shadow { blur_px: 0.0, alpha: 0.0 };

    pub fn to_css(self) -> String {
        if self.alpha <= 0.0 {
            "none".to_owned()
        } else {
            format!("0 0 {}px rgba(0, 0, 0, {:.3})", self.blur_px, self.alpha)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ButtonStyle {
    pub opacity: f64,
    pub scale: f64,
    pub background: Rgb,
    pub shadow: Shadow,
    pub border_px: f64,
}

impl ButtonStyle {
    pub const DISABLED: ButtonStyle = ButtonStyle {
        opacity: 0.5,
        scale: 0.9,
        background: Rgb::NEUTRAL,
        shadow: Shadow::NONE,
        border_px: 1.0,
    };

    pub const ENABLED: ButtonStyle = ButtonStyle {
        opacity: 1.0,
        scale: 1.0,
        background: Rgb::WHITE,
        shadow: Shadow { blur_px: 3.0, alpha: 1.0 },
        border_px: 1.0,
    };

    pub fn for_pending(pending: bool) -> Self {
        if pending {
            Self::ENABLED
        } else {
            Self::DISABLED
        }
    }
}

fn mix(a: f64, b: f64, t: f64) -> f64 {
    Lerp::lerp(&a, &b, t)
}

impl Lerp for ButtonStyle {
    fn lerp(&self, to: &Self, t: f64) -> Self {
        ButtonStyle {
            opacity: mix(self.opacity, to.opacity, t),
            scale: mix(self.scale, to.scale, t),
            background: Rgb {
                r: mix(self.background.r, to.background.r, t),
                g: mix(self.background.g, to.background.g, t),
                b: mix(self.background.b, to.background.b, t),
            },
            shadow: Shadow {
                blur_px: mix(self.shadow.blur_px, to.shadow.blur_px, t),
                alpha: mix(self.shadow.alpha, to.shadow.alpha, t),
            },
            border_px: mix(self.border_px, to.border_px, t),
        }
    }
}

/// Remembers the last refresh and the tween currently driving the button.
#[derive(Clone, Debug)]
pub struct AddPhotoControl {
    enabled: bool,
    tween: Tween<ButtonStyle>,
    duration_ms: f64,
}

impl AddPhotoControl {
    /// The button starts in its disabled look; the first refresh animates
    /// from there.
    pub fn new(duration_ms: f64) -> Self {
        Self {
            enabled: false,
            tween: Tween::new(ButtonStyle::DISABLED, ButtonStyle::DISABLED, 0.0, 0.0),
            duration_ms,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Restart the tween toward the look for `pending`.
    pub fn refresh(&mut self, pending: bool, now_ms: f64) -> &Tween<ButtonStyle> {
        self.enabled = pending;
        self.tween = self
            .tween
            .retarget(ButtonStyle::for_pending(pending), now_ms, self.duration_ms);
        &self.tween
    }

    pub fn style_at(&self, now_ms: f64) -> ButtonStyle {
        self.tween.value_at(now_ms)
    }

    pub fn is_settled(&self, now_ms: f64) -> bool {
        self.tween.is_finished(now_ms)
    }
}
