//! Eased wheel scrolling.
//!
//! Wheel input moves a target offset; every frame the page scrolls from
//! where it was toward the target along a cubic ease-out.

/// Scroll position animator driven by wheel deltas.
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    /// Seconds to reach a new target.
    duration: f64,
    from: f64,
    current: f64,
    target: f64,
    elapsed: f64,
    animating: bool,
}

fn cubic_out(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

impl SmoothScroll {
    pub fn new(duration: f64) -> Self {
        Self {
            duration: duration.max(0.0),
            from: 0.0,
            current: 0.0,
            target: 0.0,
            elapsed: 0.0,
            animating: false,
        }
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Adopts the native scroll position while idle, e.g. after a keyboard
    /// scroll or a resize.
    pub fn sync(&mut self, native: f64) {
        if !self.animating {
            self.from = native;
            self.current = native;
            self.target = native;
        }
    }

    /// Adds a wheel delta to the target, clamped to `0..=max`.
    pub fn wheel(&mut self, delta: f64, max: f64) {
        let target = self.target + delta;
        self.scroll_to(target, max);
    }

    /// Animates toward an absolute offset.
    pub fn scroll_to(&mut self, target: f64, max: f64) {
        let target = target.clamp(0.0, max.max(0.0));
        if target == self.target && self.animating {
            return;
        }
        self.from = self.current;
        self.target = target;
        self.elapsed = 0.0;
        self.animating = self.from != self.target;
    }

    /// Advances by `dt` seconds. Returns the offset to scroll to, or `None`
    /// when idle.
    pub fn step(&mut self, dt: f64) -> Option<f64> {
        if !self.animating {
            return None;
        }
        self.elapsed += dt;
        let t = if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        };
        self.current = self.from + (self.target - self.from) * cubic_out(t);
        if t >= 1.0 {
            self.current = self.target;
            self.animating = false;
        }
        Some(self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheel_eases_to_target() {
        let mut scroll = SmoothScroll::new(0.6);
        scroll.sync(100.0);
        scroll.wheel(300.0, 5000.0);
        assert_eq!(scroll.target(), 400.0);

        let first = scroll.step(0.1).unwrap();
        assert!(first > 100.0 && first < 400.0);
        let mut last = first;
        while let Some(y) = scroll.step(0.1) {
            assert!(y >= last);
            last = y;
        }
        assert_eq!(last, 400.0);
        assert!(!scroll.is_animating());
    }

    #[test]
    fn test_target_clamped_to_document() {
        let mut scroll = SmoothScroll::new(0.6);
        scroll.wheel(-200.0, 1000.0);
        assert_eq!(scroll.target(), 0.0);
        assert!(scroll.step(0.1).is_none());
        scroll.wheel(5000.0, 1000.0);
        assert_eq!(scroll.target(), 1000.0);
    }

    #[test]
    fn test_wheel_mid_flight_restarts_from_current() {
        let mut scroll = SmoothScroll::new(0.6);
        scroll.wheel(600.0, 5000.0);
        let mid = scroll.step(0.2).unwrap();
        scroll.wheel(-600.0, 5000.0);
        assert_eq!(scroll.target(), 0.0);
        let next = scroll.step(0.05).unwrap();
        assert!(next < mid);
    }

    #[test]
    fn test_sync_ignored_while_animating() {
        let mut scroll = SmoothScroll::new(0.6);
        scroll.wheel(300.0, 5000.0);
        scroll.sync(50.0);
        assert_eq!(scroll.target(), 300.0);
        while scroll.step(0.1).is_some() {}
        scroll.sync(50.0);
        assert_eq!(scroll.target(), 50.0);
    }

    #[test]
    fn test_zero_duration_jumps() {
        let mut scroll = SmoothScroll::new(0.0);
        scroll.wheel(120.0, 5000.0);
        assert_eq!(scroll.step(0.016), Some(120.0));
        assert_eq!(scroll.step(0.016), None);
    }
}
