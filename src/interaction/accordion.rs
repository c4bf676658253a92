use crate::motion::config::AnimationConfig;
use crate::motion::style::{TargetRef, Vars};
use crate::motion::timeline::{Animation, Position, Timeline, TweenParams};
use crate::viewport::Tier;

/// Single-open accordion state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Accordion {
    open: Option<String>,
}

/// What a toggle changed. Both sides may be set when opening one item
/// closes another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccordionChange {
    pub closed: Option<String>,
    pub opened: Option<String>,
}

impl Accordion {
    pub fn new(open: Option<String>) -> Self {
        Self { open }
    }

    pub fn open(&self) -> Option<&str> {
        self.open.as_deref()
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.open.as_deref() == Some(id)
    }

    pub fn toggle(&mut self, id: &str) -> AccordionChange {
        match self.open.take() {
            Some(current) if current == id => AccordionChange {
                closed: Some(current),
                opened: None,
            },
            previous => {
                self.open = Some(id.to_string());
                AccordionChange {
                    closed: previous,
                    opened: Some(id.to_string()),
                }
            }
        }
    }
}

/// Animates a panel's height open or closed.
///
/// The open height is read from the panel when the transition is built, so
/// content that changed size while closed is never animated to a stale
/// value. Once open, the explicit height is dropped again. Features stagger
/// in only when opening.
pub fn panel_transition(
    panel: &TargetRef,
    features: &[TargetRef],
    open: bool,
    tier: Tier,
    config: &AnimationConfig,
) -> Animation {
    let state = panel.state();
    let natural = panel.natural_height();
    let from = state.height.unwrap_or(natural);
    let to = if open { natural } else { 0.0 };
    let duration = config.scaled_duration(tier, config.duration.medium);

    let panels = [panel.clone()];
    let mut timeline = Timeline::new().from_to(
        &panels,
        Vars::new().height(from),
        Vars::new().height(to),
        TweenParams::new(duration, config.ease.smooth),
        Position::At(0.0),
    );
    if open && !features.is_empty() {
        let stagger = config.stagger.get(tier).elements;
        timeline = timeline.from_to(
            features,
            Vars::new().opacity(0.0).y(config.travel(tier, 20.0)),
            Vars::new().opacity(1.0).y(0.0),
            TweenParams::new(duration, config.ease.smooth).stagger(stagger),
            Position::At(duration * 0.25),
        );
    }

    let animation = Animation::new(timeline);
    if open {
        let panel = panel.clone();
        animation.on_complete(move || panel.update(&mut |s| s.height = None));
    }
    animation
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::motion::style::testing::{refs, MemoryTarget};
    use crate::motion::style::Target;

    fn run(anim: &Animation) {
        anim.play();
        while anim.step(1.0 / 60.0) {}
    }

    fn closed_panel(height: f64) -> Rc<MemoryTarget> {
        let panel = MemoryTarget::with_height(height);
        panel.update(&mut |s| s.height = Some(0.0));
        panel
    }

    #[test]
    fn test_toggle_keeps_single_open() {
        let mut accordion = Accordion::new(Some("web-development".into()));
        let ids = ["web-design", "seo", "seo", "web-development", "web-design", "web-design", "seo"];
        for id in ids {
            let before = accordion.open().map(str::to_string);
            let change = accordion.toggle(id);
            assert!(accordion.open().is_none() || accordion.is_open(id));
            if before.as_deref() == Some(id) {
                assert_eq!(change.opened, None);
                assert_eq!(change.closed.as_deref(), Some(id));
            } else {
                assert_eq!(change.opened.as_deref(), Some(id));
                assert_eq!(change.closed, before);
            }
        }
    }

    #[test]
    fn test_services_scenario() {
        let config = AnimationConfig::default();
        let dev = MemoryTarget::with_height(320.0);
        let design = closed_panel(280.0);
        let mut accordion = Accordion::new(Some("web-development".into()));

        let change = accordion.toggle("web-design");
        assert_eq!(change.closed.as_deref(), Some("web-development"));
        assert_eq!(change.opened.as_deref(), Some("web-design"));

        let dev_ref: TargetRef = dev.clone();
        let design_ref: TargetRef = design.clone();
        let closing = panel_transition(&dev_ref, &[], false, Tier::Desktop, &config);
        let opening = panel_transition(&design_ref, &[], true, Tier::Desktop, &config);
        assert_eq!(dev.state().height, Some(320.0));
        assert_eq!(design.state().height, Some(0.0));
        run(&closing);
        run(&opening);
        assert_eq!(dev.state().height, Some(0.0));
        // back to its natural size
        assert_eq!(design.state().height, None);

        let change = accordion.toggle("web-design");
        assert_eq!(change.closed.as_deref(), Some("web-design"));
        assert!(accordion.open().is_none());
        let closing = panel_transition(&design_ref, &[], false, Tier::Desktop, &config);
        run(&closing);
        assert_eq!(design.state().height, Some(0.0));
    }

    #[test]
    fn test_open_height_measured_at_toggle() {
        let config = AnimationConfig::default();
        let panel = closed_panel(200.0);
        panel.set_natural_height(450.0);
        let target: TargetRef = panel.clone();
        let opening = panel_transition(&target, &[], true, Tier::Mobile, &config);
        opening.play();
        opening.step(config.scaled_duration(Tier::Mobile, config.duration.medium) * 0.99);
        let h = panel.state().height.unwrap();
        assert!(h > 400.0 && h < 450.0);
    }

    #[test]
    fn test_features_stagger_only_when_opening() {
        let config = AnimationConfig::default();
        let panel: TargetRef = closed_panel(200.0);
        let features = [MemoryTarget::new(), MemoryTarget::new()];

        let opening = panel_transition(&panel, &refs(&features), true, Tier::Desktop, &config);
        assert_eq!(features[1].state().opacity, 0.0);
        run(&opening);
        assert_eq!(features[1].state().opacity, 1.0);

        let writes = features[0].writes();
        let closing = panel_transition(&panel, &refs(&features), false, Tier::Desktop, &config);
        run(&closing);
        assert_eq!(features[0].writes(), writes);
    }
}
