//! Viewport geometry and device tiers.

pub const DEFAULT_BREAKPOINT: u32 = 768;

/// Quiet period before a viewport change is reported, in milliseconds.
pub const RESIZE_DEBOUNCE_MS: f64 = 100.0;

/// Coarse device class used to scale animation intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tier {
    Mobile,
    #[default]
    Desktop,
}

impl Tier {
    pub fn from_mobile(is_mobile: bool) -> Self {
        if is_mobile {
            Tier::Mobile
        } else {
            Tier::Desktop
        }
    }

    pub fn from_width(width: f64, breakpoint: u32) -> Self {
        Self::from_mobile(width < breakpoint as f64)
    }

    pub fn is_mobile(self) -> bool {
        self == Tier::Mobile
    }
}

/// Media query matching viewports narrower than `breakpoint`.
pub fn mobile_query(breakpoint: u32) -> String {
    format!("(max-width: {}px)", breakpoint.saturating_sub(1))
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn center(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Half-open: the top edge is inside, the bottom edge is not.
    pub fn contains_y(&self, y: f64) -> bool {
        y >= self.top && y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_breakpoint() {
        assert_eq!(Tier::from_width(767.0, DEFAULT_BREAKPOINT), Tier::Mobile);
        assert_eq!(Tier::from_width(768.0, DEFAULT_BREAKPOINT), Tier::Desktop);
        assert_eq!(mobile_query(DEFAULT_BREAKPOINT), "(max-width: 767px)");
    }

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(100.0, 10.0, 50.0, 200.0);
        assert_eq!(r.bottom(), 300.0);
        assert_eq!(r.right(), 60.0);
        assert_eq!(r.center(), (35.0, 200.0));
        assert!(r.contains_y(100.0));
        assert!(!r.contains_y(300.0));
    }
}
