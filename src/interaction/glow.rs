use std::cell::RefCell;

use crate::motion::style::TargetRef;
use crate::motion::ticker::Steppable;
use crate::viewport::Rect;

/// Fraction of the pointer's offset from the section centre the glow
/// travels.
pub const GLOW_STRENGTH: f64 = 0.15;
/// Catch-up rate per second.
const FOLLOW_RATE: f64 = 4.0;
const SETTLE: f64 = 0.05;

/// Pointer-follow offset for the contact section glow.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Glow {
    target: (f64, f64),
    current: (f64, f64),
}

impl Glow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> (f64, f64) {
        self.current
    }

    /// Pointer moved to `(x, y)` inside `section` (same coordinate space).
    pub fn point(&mut self, x: f64, y: f64, section: Rect) {
        let (cx, cy) = section.center();
        self.target = ((x - cx) * GLOW_STRENGTH, (y - cy) * GLOW_STRENGTH);
    }

    pub fn leave(&mut self) {
        self.target = (0.0, 0.0);
    }

    pub fn is_settled(&self) -> bool {
        self.target == self.current
    }

    /// Moves toward the target. Returns the new offset while moving.
    pub fn step(&mut self, dt: f64) -> Option<(f64, f64)> {
        if self.is_settled() {
            return None;
        }
        let alpha = (dt * FOLLOW_RATE).min(1.0);
        let lerp = |from: f64, to: f64| {
            let next = from + (to - from) * alpha;
            if (to - next).abs() < SETTLE {
                to
            } else {
                next
            }
        };
        self.current = (
            lerp(self.current.0, self.target.0),
            lerp(self.current.1, self.target.1),
        );
        Some(self.current)
    }
}

/// Renders a [`Glow`] into an element from the frame ticker.
pub struct GlowDriver {
    glow: RefCell<Glow>,
    target: TargetRef,
}

impl GlowDriver {
    pub fn new(target: TargetRef) -> Self {
        Self {
            glow: RefCell::new(Glow::new()),
            target,
        }
    }

    pub fn point(&self, x: f64, y: f64, section: Rect) {
        self.glow.borrow_mut().point(x, y, section);
    }

    pub fn leave(&self) {
        self.glow.borrow_mut().leave();
    }
}

impl Steppable for GlowDriver {
    fn step(&self, dt: f64) -> bool {
        let moved = self.glow.borrow_mut().step(dt);
        if let Some((x, y)) = moved {
            self.target.update(&mut |s| {
                s.x = x;
                s.y = y;
            });
        }
        !self.glow.borrow().is_settled()
    }
}
