//! Fixed-duration property tweens, sampled against the frame clock.

use glam::DVec2;

/// Values a tween can interpolate.
pub trait Lerp: Clone {
    fn lerp(&self, to: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(&self, to: &Self, t: f64) -> Self {
        self * (1.0 - t) + to * t
    }
}

impl Lerp for DVec2 {
    fn lerp(&self, to: &Self, t: f64) -> Self {
        DVec2::lerp(*self, *to, t)
    }
}

/// `power1.out`: quadratic ease-out.
pub fn ease_out_quad(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tween<T: Lerp> {
    from: T,
    to: T,
    start_ms: f64,
    duration_ms: f64,
}

impl<T: Lerp> Tween<T> {
    pub fn new(from: T, to: T, start_ms: f64, duration_ms: f64) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms: duration_ms.max(0.0),
        }
    }

    pub fn target(&self) -> &T {
        &self.to
    }

    pub fn progress(&self, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0)
    }

    pub fn value_at(&self, now_ms: f64) -> T {
        let p = self.progress(now_ms);
        if p >= 1.0 {
            return self.to.clone();
        }
        self.from.lerp(&self.to, ease_out_quad(p))
    }

    pub fn is_finished(&self, now_ms: f64) -> bool {
        self.progress(now_ms) >= 1.0
    }

    /// Replace this tween with one heading to `to`, starting from whatever
    /// is on screen at `now_ms`.
    pub fn retarget(&self, to: T, now_ms: f64, duration_ms: f64) -> Self {
        Tween::new(self.value_at(now_ms), to, now_ms, duration_ms)
    }
}
