use glam::DVec2;
use web_sys::HtmlElement;

use super::dom::set_style;
use crate::add_control::ButtonStyle;
use crate::tween::Tween;

struct Track<T: crate::tween::Lerp> {
    element: HtmlElement,
    tween: Tween<T>,
    settled: bool,
}

/// Drives element tweens from the render loop. One track per element and
/// property; a new tween on a tracked element picks up from what is on
/// screen.
pub struct Animator {
    duration_ms: f64,
    translations: Vec<Track<DVec2>>,
    buttons: Vec<Track<ButtonStyle>>,
}

impl Animator {
    pub fn new(duration_ms: f64) -> Self {
        Self {
            duration_ms,
            translations: Vec::new(),
            buttons: Vec::new(),
        }
    }

    pub fn translate_to(&mut self, element: &HtmlElement, to: DVec2, now_ms: f64) {
        let duration = self.duration_ms;
        match self.translations.iter_mut().find(|t| &t.element == element) {
            Some(track) => {
                track.tween = track.tween.retarget(to, now_ms, duration);
                track.settled = false;
            }
            None => self.translations.push(Track {
                element: element.clone(),
                tween: Tween::new(DVec2::ZERO, to, now_ms, duration),
                settled: false,
            }),
        }
    }

    pub fn play_button(&mut self, element: &HtmlElement, tween: Tween<ButtonStyle>) {
        match self.buttons.iter_mut().find(|t| &t.element == element) {
            Some(track) => {
                track.tween = tween;
                track.settled = false;
            }
            None => self.buttons.push(Track {
                element: element.clone(),
                tween,
                settled: false,
            }),
        }
    }

    pub fn tick(&mut self, now_ms: f64) {
        for track in self.translations.iter_mut().filter(|t| !t.settled) {
            let at = track.tween.value_at(now_ms);
            set_style(&track.element, "transform", &format!("translate({}px, {}px)", at.x, at.y));
            track.settled = track.tween.is_finished(now_ms);
        }
        for track in self.buttons.iter_mut().filter(|t| !t.settled) {
            apply_button_style(&track.element, &track.tween.value_at(now_ms));
            track.settled = track.tween.is_finished(now_ms);
        }
    }
}

fn apply_button_style(element: &HtmlElement, style: &ButtonStyle) {
    set_style(element, "opacity", &format!("{:.3}", style.opacity));
    set_style(element, "transform", &format!("scale({:.3})", style.scale));
    set_style(element, "background-color", &style.background.to_css());
    set_style(element, "box-shadow", &style.shadow.to_css());
    set_style(element, "border-width", &format!("{}px", style.border_px));
}
