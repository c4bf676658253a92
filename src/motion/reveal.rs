use super::config::AnimationConfig;
use super::ease::Ease;
use super::style::{set_will_change, TargetRef, Vars};
use super::timeline::{Animation, Position, Timeline, TweenParams};
use crate::viewport::Tier;

/// Overrides for [`build_reveal`]. Anything left unset comes from the
/// shared [`AnimationConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealOptions {
    pub from: Vars,
    pub to: Vars,
    pub stagger: Option<f64>,
    pub duration: Option<f64>,
    pub ease: Option<Ease>,
    pub use_blur: bool,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            from: Vars::new(),
            to: Vars::new(),
            stagger: None,
            duration: None,
            ease: None,
            use_blur: true,
        }
    }
}

impl RevealOptions {
    pub fn from(mut self, vars: Vars) -> Self {
        self.from = vars;
        self
    }

    pub fn to(mut self, vars: Vars) -> Self {
        self.to = vars;
        self
    }

    pub fn stagger(mut self, stagger: f64) -> Self {
        self.stagger = Some(stagger);
        self
    }

    pub fn duration(mut self, duration: f64) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = Some(ease);
        self
    }

    pub fn without_blur(mut self) -> Self {
        self.use_blur = false;
        self
    }
}

/// Hidden and visible endpoints for a reveal on `tier`.
pub fn reveal_states(opts: &RevealOptions, tier: Tier, config: &AnimationConfig) -> (Vars, Vars) {
    let defaults = &config.defaults;
    let mut hidden = Vars::new()
        .opacity(defaults.opacity.from)
        .y(config.travel(tier, defaults.y.from));
    let mut shown = Vars::new().opacity(defaults.opacity.to).y(defaults.y.to);
    // mobile never blurs
    if opts.use_blur && !tier.is_mobile() {
        let blur = config.blur.get(tier);
        hidden = hidden.blur(blur.start);
        shown = shown.blur(blur.end);
    }
    (hidden.merge(&opts.from), shown.merge(&opts.to))
}

/// Builds a reveal from hidden (offset, transparent, optionally blurred) to
/// resting state for `targets`.
///
/// The hidden state is applied right away. The returned animation is
/// paused; play it directly, bind it to a scroll trigger, or nest it into a
/// larger timeline. The will-change hint is only held while it moves.
pub fn build_reveal(
    targets: &[TargetRef],
    opts: &RevealOptions,
    tier: Tier,
    config: &AnimationConfig,
) -> Animation {
    if targets.is_empty() {
        return Animation::empty();
    }
    let (hidden, shown) = reveal_states(opts, tier, config);
    let duration = config.scaled_duration(tier, opts.duration.unwrap_or(config.duration.medium));
    let stagger = opts
        .stagger
        .unwrap_or_else(|| config.stagger.get(tier).text);
    let ease = opts.ease.unwrap_or(config.ease.smooth);

    let timeline = Timeline::new().from_to(
        targets,
        hidden,
        shown,
        TweenParams::new(duration, ease).stagger(stagger),
        Position::At(0.0),
    );
    let animation = Animation::new(timeline);

    let (a, b, c) = (targets.to_vec(), targets.to_vec(), targets.to_vec());
    animation
        .on_start(move || set_will_change(&a, true))
        .on_complete(move || set_will_change(&b, false))
        .on_reverse_complete(move || set_will_change(&c, false));
    animation
}

/// Blur for a backdrop being covered by the next section: sharp at
/// progress 0, `max_blur` px at 1. Driven by seeking, never played. Mobile
/// gets none.
pub fn phase_blur(target: &TargetRef, max_blur: f64, tier: Tier) -> Option<Animation> {
    if tier.is_mobile() {
        return None;
    }
    Some(Animation::new(Timeline::new().from_to(
        &[target.clone()],
        Vars::new().blur(0.0),
        Vars::new().blur(max_blur),
        TweenParams::new(1.0, Ease::Linear),
        Position::At(0.0),
    )))
}
