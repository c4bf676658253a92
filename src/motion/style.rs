use std::rc::Rc;

/// Properties the engine knows how to interpolate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prop {
    X,
    Y,
    YPercent,
    Opacity,
    Blur,
    Scale,
    TopRadius,
    Height,
    Width,
}

impl Prop {
    pub const ALL: [Prop; 9] = [
        Prop::X,
        Prop::Y,
        Prop::YPercent,
        Prop::Opacity,
        Prop::Blur,
        Prop::Scale,
        Prop::TopRadius,
        Prop::Height,
        Prop::Width,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// The full visual state the engine tracks for one element.
///
/// `height`/`width` of `None` mean "natural size" (no inline override).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualState {
    pub x: f64,
    pub y: f64,
    pub y_percent: f64,
    pub opacity: f64,
    pub blur: f64,
    pub scale: f64,
    pub top_radius: f64,
    pub height: Option<f64>,
    pub width: Option<f64>,
    pub will_change: bool,
}

impl Default for VisualState {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            y_percent: 0.0,
            opacity: 1.0,
            blur: 0.0,
            scale: 1.0,
            top_radius: 0.0,
            height: None,
            width: None,
            will_change: false,
        }
    }
}

impl VisualState {
    pub fn get(&self, prop: Prop) -> Option<f64> {
        match prop {
            Prop::X => Some(self.x),
            Prop::Y => Some(self.y),
            Prop::YPercent => Some(self.y_percent),
            Prop::Opacity => Some(self.opacity),
            Prop::Blur => Some(self.blur),
            Prop::Scale => Some(self.scale),
            Prop::TopRadius => Some(self.top_radius),
            Prop::Height => self.height,
            Prop::Width => self.width,
        }
    }

    pub fn set(&mut self, prop: Prop, value: f64) {
        match prop {
            Prop::X => self.x = value,
            Prop::Y => self.y = value,
            Prop::YPercent => self.y_percent = value,
            Prop::Opacity => self.opacity = value,
            Prop::Blur => self.blur = value,
            Prop::Scale => self.scale = value,
            Prop::TopRadius => self.top_radius = value,
            Prop::Height => self.height = Some(value),
            Prop::Width => self.width = Some(value),
        }
    }

    pub fn transform(&self) -> String {
        format!(
            "translate3d({}px, {}px, 0px) translateY({}%) scale({})",
            css_num(self.x),
            css_num(self.y),
            css_num(self.y_percent),
            css_num(self.scale)
        )
    }

    pub fn filter(&self) -> String {
        format!("blur({}px)", css_num(self.blur))
    }

    /// Inline style changes needed to go from `prev` to `self`.
    ///
    /// `None` values mean the property should be removed so the stylesheet
    /// applies again. Untouched properties are never written, which keeps
    /// class-based filters and sizes intact until they are animated.
    pub fn diff(&self, prev: &VisualState) -> Vec<(&'static str, Option<String>)> {
        let mut out = Vec::new();
        if self.x != prev.x
            || self.y != prev.y
            || self.y_percent != prev.y_percent
            || self.scale != prev.scale
        {
            out.push(("transform", Some(self.transform())));
        }
        if self.opacity != prev.opacity {
            out.push(("opacity", Some(css_num(self.opacity))));
        }
        if self.blur != prev.blur {
            out.push(("filter", Some(self.filter())));
        }
        if self.top_radius != prev.top_radius {
            let r = format!("{}px", css_num(self.top_radius));
            out.push(("border-top-left-radius", Some(r.clone())));
            out.push(("border-top-right-radius", Some(r)));
        }
        if self.height != prev.height {
            out.push(("height", self.height.map(|h| format!("{}px", css_num(h)))));
        }
        if self.width != prev.width {
            out.push(("width", self.width.map(|w| format!("{}px", css_num(w)))));
        }
        if self.will_change != prev.will_change {
            out.push((
                "will-change",
                self.will_change
                    .then(|| "transform, opacity, filter".to_string()),
            ));
        }
        out
    }
}

fn css_num(v: f64) -> String {
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// A partial set of property values, used for tween endpoints and overrides.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vars {
    values: [Option<f64>; 9],
}

impl Vars {
    pub const fn new() -> Self {
        Self { values: [None; 9] }
    }

    pub fn with(mut self, prop: Prop, value: f64) -> Self {
        self.values[prop.index()] = Some(value);
        self
    }

    pub fn x(self, v: f64) -> Self {
        self.with(Prop::X, v)
    }

    pub fn y(self, v: f64) -> Self {
        self.with(Prop::Y, v)
    }

    pub fn y_percent(self, v: f64) -> Self {
        self.with(Prop::YPercent, v)
    }

    pub fn opacity(self, v: f64) -> Self {
        self.with(Prop::Opacity, v)
    }

    pub fn blur(self, v: f64) -> Self {
        self.with(Prop::Blur, v)
    }

    pub fn scale(self, v: f64) -> Self {
        self.with(Prop::Scale, v)
    }

    pub fn top_radius(self, v: f64) -> Self {
        self.with(Prop::TopRadius, v)
    }

    pub fn height(self, v: f64) -> Self {
        self.with(Prop::Height, v)
    }

    pub fn width(self, v: f64) -> Self {
        self.with(Prop::Width, v)
    }

    pub fn get(&self, prop: Prop) -> Option<f64> {
        self.values[prop.index()]
    }

    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Prop, f64)> + '_ {
        Prop::ALL
            .iter()
            .filter_map(|&p| self.get(p).map(|v| (p, v)))
    }

    /// Values from `over` win; everything else is kept.
    pub fn merge(&self, over: &Vars) -> Vars {
        let mut out = *self;
        for (p, v) in over.iter() {
            out.values[p.index()] = Some(v);
        }
        out
    }

    /// Fills properties missing here with values from `fallback`.
    pub fn or(&self, fallback: &Vars) -> Vars {
        fallback.merge(self)
    }

    /// Reads the target's current value for every property set here.
    pub fn capture(&self, target: &dyn Target) -> Vars {
        let state = target.state();
        let mut out = Vars::new();
        for (p, _) in self.iter() {
            let current = match p {
                Prop::Height => state.height.unwrap_or_else(|| target.natural_height()),
                Prop::Width => state.width.unwrap_or_else(|| target.natural_width()),
                _ => state.get(p).unwrap_or_default(),
            };
            out.values[p.index()] = Some(current);
        }
        out
    }

    /// Interpolates every property present in both endpoints.
    pub fn lerp(&self, to: &Vars, t: f64) -> Vars {
        let mut out = Vars::new();
        for (p, end) in to.iter() {
            if let Some(start) = self.get(p) {
                let v = if t >= 1.0 {
                    end
                } else if t <= 0.0 {
                    start
                } else {
                    start + (end - start) * t
                };
                out.values[p.index()] = Some(v);
            }
        }
        out
    }

    pub fn apply_to(&self, state: &mut VisualState) {
        for (p, v) in self.iter() {
            state.set(p, v);
        }
    }

    pub fn apply(&self, target: &dyn Target) {
        target.update(&mut |s| self.apply_to(s));
    }
}

/// Something the engine can render into.
///
/// Implementations use interior mutability: the engine only ever holds
/// shared references to its targets.
pub trait Target {
    fn state(&self) -> VisualState;

    fn apply_state(&self, state: VisualState);

    /// Size of the content when no explicit height is set.
    fn natural_height(&self) -> f64 {
        0.0
    }

    fn natural_width(&self) -> f64 {
        0.0
    }

    fn update(&self, f: &mut dyn FnMut(&mut VisualState)) {
        let mut state = self.state();
        f(&mut state);
        self.apply_state(state);
    }
}

pub type TargetRef = Rc<dyn Target>;

pub fn set_will_change(targets: &[TargetRef], on: bool) {
    for t in targets {
        t.update(&mut |s| s.will_change = on);
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    /// In-memory target for engine tests.
    #[derive(Default)]
    pub struct MemoryTarget {
        state: Cell<VisualState>,
        natural_height: Cell<f64>,
        writes: Cell<usize>,
    }

    impl MemoryTarget {
        pub fn new() -> Rc<Self> {
            Rc::new(Self::default())
        }

        pub fn with_height(height: f64) -> Rc<Self> {
            let t = Self::default();
            t.natural_height.set(height);
            Rc::new(t)
        }

        pub fn set_natural_height(&self, height: f64) {
            self.natural_height.set(height);
        }

        pub fn writes(&self) -> usize {
            self.writes.get()
        }
    }

    impl Target for MemoryTarget {
        fn state(&self) -> VisualState {
            self.state.get()
        }

        fn apply_state(&self, state: VisualState) {
            self.writes.set(self.writes.get() + 1);
            self.state.set(state);
        }

        fn natural_height(&self) -> f64 {
            self.natural_height.get()
        }
    }

    pub fn refs(targets: &[Rc<MemoryTarget>]) -> Vec<TargetRef> {
        targets.iter().map(|t| t.clone() as TargetRef).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::testing::MemoryTarget;
    use super::*;

    #[test]
    fn test_merge_and_or() {
        let base = Vars::new().y(40.0).opacity(0.0);
        let over = Vars::new().y(100.0).blur(8.0);
        let merged = base.merge(&over);
        assert_eq!(merged.get(Prop::Y), Some(100.0));
        assert_eq!(merged.get(Prop::Opacity), Some(0.0));
        assert_eq!(merged.get(Prop::Blur), Some(8.0));

        let filled = over.or(&base);
        assert_eq!(filled.get(Prop::Y), Some(100.0));
        assert_eq!(filled.get(Prop::Opacity), Some(0.0));
    }

    #[test]
    fn test_capture_uses_natural_height_when_auto() {
        let t = MemoryTarget::with_height(320.0);
        let captured = Vars::new().height(0.0).opacity(0.5).capture(t.as_ref());
        assert_eq!(captured.get(Prop::Height), Some(320.0));
        assert_eq!(captured.get(Prop::Opacity), Some(1.0));
        assert_eq!(captured.get(Prop::X), None);
    }

    #[test]
    fn test_lerp_endpoints_exact() {
        let from = Vars::new().y(40.0).opacity(0.0);
        let to = Vars::new().y(0.0).opacity(1.0);
        assert_eq!(from.lerp(&to, 0.0), from);
        assert_eq!(from.lerp(&to, 1.0), to);
        let mid = from.lerp(&to, 0.5);
        assert_eq!(mid.get(Prop::Y), Some(20.0));
    }

    #[test]
    fn test_diff_only_writes_changed_properties() {
        let prev = VisualState::default();
        let mut next = prev;
        next.opacity = 0.5;
        let diff = next.diff(&prev);
        assert_eq!(diff, vec![("opacity", Some("0.5".to_string()))]);

        let mut next = prev;
        next.y = 12.25;
        next.will_change = true;
        let diff = next.diff(&prev);
        assert_eq!(diff.len(), 2);
        assert_eq!(
            diff[0],
            (
                "transform",
                Some("translate3d(0px, 12.25px, 0px) translateY(0%) scale(1)".to_string())
            )
        );

        // dropping back to natural size removes the inline height
        let mut sized = prev;
        sized.height = Some(120.0);
        let diff = prev.diff(&sized);
        assert_eq!(diff, vec![("height", None)]);
    }
}
