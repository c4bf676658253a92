use crate::motion::ease::Ease;
use crate::motion::style::{TargetRef, Vars};
use crate::motion::timeline::{Animation, Position, Timeline, TweenParams};
use crate::viewport::Rect;

/// Share of the viewport height below the scroll offset that decides the
/// active section.
pub const DEFAULT_THRESHOLD: f64 = 0.3;

pub const PILL_PADDING: f64 = 20.0;
const PILL_DURATION: f64 = 0.3;

/// Content sections reachable from the navbar, in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    Home,
    Services,
    Work,
    Contact,
}

impl SectionId {
    pub const ALL: [SectionId; 4] = [
        SectionId::Home,
        SectionId::Services,
        SectionId::Work,
        SectionId::Contact,
    ];

    /// Element id of the section.
    pub fn anchor(self) -> &'static str {
        match self {
            SectionId::Home => "home",
            SectionId::Services => "services",
            SectionId::Work => "work",
            SectionId::Contact => "contact",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SectionId::Home => "Home",
            SectionId::Services => "Services",
            SectionId::Work => "Work",
            SectionId::Contact => "Contact",
        }
    }

    pub fn href(self) -> String {
        format!("#{}", self.anchor())
    }
}

/// The section containing the line `threshold` of the viewport below the
/// scroll offset. Near the top of the page `Home` wins regardless.
///
/// `Home` spans everything above the first other section. Its own box is
/// ignored: the hero is sticky, so its measured box follows the scroll
/// offset and overlaps whatever is on screen.
pub fn active_section(
    scroll: f64,
    viewport_height: f64,
    sections: &[(SectionId, Rect)],
    threshold: f64,
) -> Option<SectionId> {
    let line = viewport_height * threshold;
    if scroll < line {
        return Some(SectionId::Home);
    }
    let probe = scroll + line;
    let home_end = sections
        .iter()
        .filter(|(id, _)| *id != SectionId::Home)
        .map(|(_, rect)| rect.top)
        .fold(f64::INFINITY, f64::min);
    sections
        .iter()
        .rev()
        .find(|(id, rect)| match id {
            SectionId::Home => probe < home_end,
            _ => rect.contains_y(probe),
        })
        .map(|(id, _)| *id)
}

/// Highlight position relative to the nav container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PillGeometry {
    pub x: f64,
    pub width: f64,
}

pub fn pill_geometry(link: Rect, nav: Rect, padding: f64) -> PillGeometry {
    PillGeometry {
        x: link.left - nav.left - padding / 2.0,
        width: link.width + padding,
    }
}

pub fn pill_tween(pill: &TargetRef, geometry: PillGeometry) -> Animation {
    Animation::new(Timeline::new().to(
        &[pill.clone()],
        Vars::new().x(geometry.x).width(geometry.width),
        TweenParams::new(PILL_DURATION, Ease::SMOOTH),
        Position::At(0.0),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::style::testing::MemoryTarget;
    use crate::motion::style::Target;

    fn page() -> Vec<(SectionId, Rect)> {
        vec![
            (SectionId::Home, Rect::new(0.0, 0.0, 1200.0, 1000.0)),
            (SectionId::Services, Rect::new(1000.0, 0.0, 1200.0, 1500.0)),
            (SectionId::Work, Rect::new(2500.0, 0.0, 1200.0, 2000.0)),
            (SectionId::Contact, Rect::new(4500.0, 0.0, 1200.0, 1000.0)),
        ]
    }

    #[test]
    fn test_home_forced_near_top() {
        let sections = vec![(SectionId::Services, Rect::new(0.0, 0.0, 100.0, 5000.0))];
        assert_eq!(
            active_section(100.0, 1000.0, &sections, DEFAULT_THRESHOLD),
            Some(SectionId::Home)
        );
    }

    #[test]
    fn test_active_section_uses_threshold_line() {
        let sections = page();
        let active = |scroll| active_section(scroll, 1000.0, &sections, DEFAULT_THRESHOLD);
        assert_eq!(active(400.0), Some(SectionId::Home));
        assert_eq!(active(700.0), Some(SectionId::Services));
        assert_eq!(active(2199.0), Some(SectionId::Services));
        assert_eq!(active(2200.0), Some(SectionId::Work));
        assert_eq!(active(4300.0), Some(SectionId::Contact));
        assert_eq!(active(6000.0), None);
    }

    #[test]
    fn test_sticky_home_does_not_shadow_later_sections() {
        let vh = 1000.0;
        let at = |scroll: f64| {
            let mut sections = page();
            // the sticky hero measures wherever the viewport currently is
            sections[0].1 = Rect::new(scroll, 0.0, 1200.0, vh);
            active_section(scroll, vh, &sections, DEFAULT_THRESHOLD)
        };
        assert_eq!(at(500.0), Some(SectionId::Home));
        assert_eq!(at(800.0), Some(SectionId::Services));
        assert_eq!(at(2200.0), Some(SectionId::Work));
        assert_eq!(at(3500.0), Some(SectionId::Work));
        assert_eq!(at(4300.0), Some(SectionId::Contact));
        assert_eq!(at(6000.0), None);
    }

    #[test]
    fn test_pill_geometry() {
        let nav = Rect::new(20.0, 300.0, 500.0, 40.0);
        let link = Rect::new(24.0, 410.0, 80.0, 32.0);
        assert_eq!(
            pill_geometry(link, nav, PILL_PADDING),
            PillGeometry {
                x: 100.0,
                width: 100.0
            }
        );
    }

    #[test]
    fn test_pill_tween_moves_highlight() {
        let pill = MemoryTarget::new();
        let target: TargetRef = pill.clone();
        let anim = pill_tween(&target, PillGeometry { x: 100.0, width: 90.0 });
        anim.play();
        while anim.step(1.0 / 60.0) {}
        assert_eq!(pill.state().x, 100.0);
        assert_eq!(pill.state().width, Some(90.0));
    }

    #[test]
    fn test_anchors() {
        let anchors: Vec<_> = SectionId::ALL.iter().map(|s| s.href()).collect();
        assert_eq!(anchors, ["#home", "#services", "#work", "#contact"]);
    }
}
