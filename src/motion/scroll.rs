//! Scroll-position triggers.
//!
//! A [`ScrollRegistry`] is owned by the page. Sections bind triggers to it
//! and get a [`Subscription`] back; dropping or disposing the subscription
//! removes the trigger.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use super::timeline::Animation;
use crate::viewport::{Rect, Tier};

/// A point on an element or on the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Center,
    Bottom,
}

impl Edge {
    fn fraction(self) -> f64 {
        match self {
            Edge::Top => 0.0,
            Edge::Center => 0.5,
            Edge::Bottom => 1.0,
        }
    }
}

/// "When the element's `element` edge meets the viewport's `viewport`
/// edge, shifted down by `offset` of the viewport height."
///
/// `Band::new(Edge::Top, Edge::Center).plus(0.2)` reads as
/// `top center+=20%`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub element: Edge,
    pub viewport: Edge,
    pub offset: f64,
}

impl Band {
    pub const fn new(element: Edge, viewport: Edge) -> Self {
        Self {
            element,
            viewport,
            offset: 0.0,
        }
    }

    pub const fn plus(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Default start for reveals. Mobile fires earlier relative to the
    /// viewport.
    pub fn reveal(tier: Tier) -> Self {
        let offset = match tier {
            Tier::Mobile => 0.1,
            Tier::Desktop => 0.2,
        };
        Band::new(Edge::Top, Edge::Center).plus(offset)
    }

    /// Scroll offset at which the band is crossed for an element at `rect`
    /// (document coordinates).
    pub fn scroll_position(&self, rect: Rect, viewport_height: f64) -> f64 {
        let element = rect.top + rect.height * self.element.fraction();
        let line = viewport_height * (self.viewport.fraction() + self.offset);
        element - line
    }
}

/// Where a bound element currently sits in document coordinates.
pub trait Measure {
    /// `None` when the element is gone; the trigger is skipped.
    fn rect(&self) -> Option<Rect>;
}

impl<F: Fn() -> Option<Rect>> Measure for F {
    fn rect(&self) -> Option<Rect> {
        self()
    }
}

pub enum TriggerAction {
    /// Play on enter, reverse on leave back.
    Toggle(Animation),
    /// Progress follows scroll. `lag` is the catch-up time in seconds.
    Scrub { animation: Animation, lag: f64 },
    None,
}

type Callback = Box<dyn FnMut()>;

pub struct TriggerSpec {
    start: Band,
    end: Option<Band>,
    action: TriggerAction,
    on_enter: Option<Callback>,
    on_leave: Option<Callback>,
    on_enter_back: Option<Callback>,
    on_leave_back: Option<Callback>,
    on_update: Option<Box<dyn FnMut(f64)>>,
}

impl fmt::Debug for TriggerSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriggerSpec")
            .field("start", &self.start)
            .field("end", &self.end)
            .finish_non_exhaustive()
    }
}

impl TriggerSpec {
    pub fn new(start: Band) -> Self {
        Self {
            start,
            end: None,
            action: TriggerAction::None,
            on_enter: None,
            on_leave: None,
            on_enter_back: None,
            on_leave_back: None,
            on_update: None,
        }
    }

    pub fn end(mut self, end: Band) -> Self {
        self.end = Some(end);
        self
    }

    pub fn toggle(mut self, animation: Animation) -> Self {
        self.action = TriggerAction::Toggle(animation);
        self
    }

    pub fn scrub(mut self, animation: Animation, lag: f64) -> Self {
        self.action = TriggerAction::Scrub {
            animation,
            lag: lag.max(0.0),
        };
        self
    }

    pub fn on_enter(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_enter = Some(Box::new(f));
        self
    }

    pub fn on_leave(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_leave = Some(Box::new(f));
        self
    }

    pub fn on_enter_back(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_enter_back = Some(Box::new(f));
        self
    }

    pub fn on_leave_back(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_leave_back = Some(Box::new(f));
        self
    }

    /// Called with the 0..=1 progress between start and end whenever it
    /// changes. Needs an end band.
    pub fn on_update(mut self, f: impl FnMut(f64) + 'static) -> Self {
        self.on_update = Some(Box::new(f));
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Before,
    Active,
    After,
}

struct Trigger {
    id: u64,
    measure: Rc<dyn Measure>,
    spec: TriggerSpec,
    phase: Phase,
    progress: Option<f64>,
    // scrub playhead
    scrubbed: f64,
    scrub_target: f64,
}

fn fire(cb: &mut Option<Callback>) {
    if let Some(f) = cb {
        f();
    }
}

impl Trigger {
    fn update(&mut self, scroll: f64, viewport_height: f64) {
        let Some(rect) = self.measure.rect() else {
            return;
        };
        let start = self.spec.start.scroll_position(rect, viewport_height);
        let end = self
            .spec
            .end
            .map(|b| b.scroll_position(rect, viewport_height).max(start));

        let phase = if scroll < start {
            Phase::Before
        } else if end.is_some_and(|end| scroll > end) {
            Phase::After
        } else {
            Phase::Active
        };

        if phase != self.phase {
            let spec = &mut self.spec;
            match (self.phase, phase) {
                (Phase::Before, Phase::Active) => fire(&mut spec.on_enter),
                (Phase::Before, Phase::After) => {
                    fire(&mut spec.on_enter);
                    fire(&mut spec.on_leave);
                }
                (Phase::Active, Phase::After) => fire(&mut spec.on_leave),
                (Phase::After, Phase::Active) => fire(&mut spec.on_enter_back),
                (Phase::Active, Phase::Before) => fire(&mut spec.on_leave_back),
                (Phase::After, Phase::Before) => {
                    fire(&mut spec.on_enter_back);
                    fire(&mut spec.on_leave_back);
                }
                _ => {}
            }
            if let TriggerAction::Toggle(animation) = &spec.action {
                match phase {
                    Phase::Before => animation.reverse(),
                    _ if self.phase == Phase::Before => animation.play(),
                    _ => {}
                }
            }
            self.phase = phase;
        }

        if let Some(end) = end {
            let progress = if end > start {
                ((scroll - start) / (end - start)).clamp(0.0, 1.0)
            } else if scroll >= start {
                1.0
            } else {
                0.0
            };
            if self.progress != Some(progress) {
                self.progress = Some(progress);
                if let Some(f) = &mut self.spec.on_update {
                    f(progress);
                }
                self.scrub_target = progress;
            }
        }
    }

    fn tick(&mut self, dt: f64) {
        let TriggerAction::Scrub { animation, lag } = &self.spec.action else {
            return;
        };
        if self.scrubbed == self.scrub_target {
            return;
        }
        let next = if *lag <= 0.0 {
            self.scrub_target
        } else {
            let alpha = (dt / lag).min(1.0);
            let next = self.scrubbed + (self.scrub_target - self.scrubbed) * alpha;
            if (self.scrub_target - next).abs() < 1e-4 {
                self.scrub_target
            } else {
                next
            }
        };
        self.scrubbed = next;
        animation.seek(next);
    }

    fn kill(&self) {
        match &self.spec.action {
            TriggerAction::Toggle(animation) => animation.kill(),
            TriggerAction::Scrub { animation, .. } => animation.kill(),
            TriggerAction::None => {}
        }
    }
}

#[derive(Default)]
struct RegistryInner {
    next_id: u64,
    triggers: Vec<Trigger>,
    // ids disposed while an update was running
    removed: Vec<u64>,
    updating: bool,
    dirty: bool,
    scroll: f64,
    viewport_height: f64,
}

/// Owns every scroll trigger on a page.
#[derive(Clone, Default)]
pub struct ScrollRegistry {
    inner: Rc<RefCell<RegistryInner>>,
}

impl fmt::Debug for ScrollRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ScrollRegistry")
            .field("triggers", &inner.triggers.len())
            .field("scroll", &inner.scroll)
            .field("viewport_height", &inner.viewport_height)
            .finish()
    }
}

impl ScrollRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registers a trigger. It is evaluated against the current scroll
    /// position on the next [`ScrollRegistry::tick`].
    pub fn bind(&self, measure: Rc<dyn Measure>, spec: TriggerSpec) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.triggers.push(Trigger {
            id,
            measure,
            spec,
            phase: Phase::Before,
            progress: None,
            scrubbed: 0.0,
            scrub_target: 0.0,
        });
        inner.dirty = true;
        Subscription {
            registry: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Re-evaluates every trigger for a new scroll position.
    ///
    /// Callbacks may bind or dispose triggers; those changes apply once the
    /// pass is done.
    pub fn update(&self, scroll: f64, viewport_height: f64) {
        let mut triggers = {
            let mut inner = self.inner.borrow_mut();
            if inner.updating {
                return;
            }
            inner.updating = true;
            inner.dirty = false;
            inner.scroll = scroll;
            inner.viewport_height = viewport_height;
            std::mem::take(&mut inner.triggers)
        };
        for trigger in triggers.iter_mut() {
            trigger.update(scroll, viewport_height);
        }
        let disposed = {
            let mut inner = self.inner.borrow_mut();
            triggers.append(&mut inner.triggers);
            let removed = std::mem::take(&mut inner.removed);
            let (disposed, kept) = triggers
                .into_iter()
                .partition::<Vec<_>, _>(|t| removed.contains(&t.id));
            inner.triggers = kept;
            inner.updating = false;
            disposed
        };
        for trigger in &disposed {
            trigger.kill();
        }
    }

    /// Per-frame work: evaluates newly bound triggers and advances scrubbed
    /// animations.
    pub fn tick(&self, dt: f64) {
        let pending = {
            let inner = self.inner.borrow();
            (inner.dirty && inner.viewport_height > 0.0)
                .then_some((inner.scroll, inner.viewport_height))
        };
        if let Some((scroll, viewport_height)) = pending {
            self.update(scroll, viewport_height);
        }
        let mut inner = self.inner.borrow_mut();
        for trigger in inner.triggers.iter_mut() {
            trigger.tick(dt);
        }
    }

    /// Drops every trigger and kills its animation.
    pub fn clear(&self) {
        let triggers = std::mem::take(&mut self.inner.borrow_mut().triggers);
        for trigger in &triggers {
            trigger.kill();
        }
    }
}

/// Keeps a trigger alive. Dropping it or calling
/// [`Subscription::dispose`] removes the trigger.
#[derive(Debug)]
pub struct Subscription {
    registry: Weak<RefCell<RegistryInner>>,
    id: u64,
}

impl Subscription {
    pub fn dispose(&self) {
        let Some(inner) = self.registry.upgrade() else {
            return;
        };
        let removed = {
            let Ok(mut inner) = inner.try_borrow_mut() else {
                log::warn!("scroll trigger {} disposed during its own update", self.id);
                return;
            };
            if inner.updating {
                inner.removed.push(self.id);
                None
            } else {
                inner
                    .triggers
                    .iter()
                    .position(|t| t.id == self.id)
                    .map(|i| inner.triggers.remove(i))
            }
        };
        if let Some(trigger) = removed {
            trigger.kill();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.dispose();
    }
}
