//! Browser side of the motion engine: element adapters and the per-page
//! scene that feeds scroll and frame events into it.

use std::cell::Cell;
use std::rc::{Rc, Weak};

use leptos::{ev, prelude::*};
use leptos_use::{
    signal_debounced, use_event_listener, use_event_listener_with_options, use_media_query,
    use_raf_fn, use_window, UseEventListenerOptions, UseRafFnCallbackArgs,
};
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, ScrollBehavior, ScrollToOptions};

use crate::content::SiteSettings;
use crate::motion::smooth::SmoothScroll;
use crate::motion::ticker::{self, Steppable};
use crate::motion::{
    Animation, Measure, Scope, ScrollRegistry, Subscription, Target, TargetRef, TriggerSpec,
    VisualState,
};
use crate::viewport::{mobile_query, Rect, Tier, RESIZE_DEBOUNCE_MS};

/// Renders engine state into an element's inline style.
///
/// The last written state is cached, so only properties that actually
/// change are touched.
pub struct ElementTarget {
    el: HtmlElement,
    state: Cell<VisualState>,
}

impl ElementTarget {
    pub fn new(el: impl Into<HtmlElement>) -> Rc<Self> {
        Self::with_state(el, VisualState::default())
    }

    /// `state` has to describe what the markup already renders.
    pub fn with_state(el: impl Into<HtmlElement>, state: VisualState) -> Rc<Self> {
        Rc::new(Self {
            el: el.into(),
            state: Cell::new(state),
        })
    }
}

impl Target for ElementTarget {
    fn state(&self) -> VisualState {
        self.state.get()
    }

    fn apply_state(&self, next: VisualState) {
        let prev = self.state.replace(next);
        let style = self.el.style();
        for (name, value) in next.diff(&prev) {
            let res = match value {
                Some(value) => style.set_property(name, &value),
                None => style.remove_property(name).map(drop),
            };
            if let Err(e) = res {
                log::debug!("couldn't write {name}: {e:?}");
            }
        }
    }

    fn natural_height(&self) -> f64 {
        self.el.scroll_height() as f64
    }

    fn natural_width(&self) -> f64 {
        self.el.offset_width() as f64
    }
}

pub fn target(el: impl Into<HtmlElement>) -> TargetRef {
    ElementTarget::new(el)
}

pub fn targets<E: Into<HtmlElement>>(els: impl IntoIterator<Item = E>) -> Vec<TargetRef> {
    els.into_iter().map(target).collect()
}

/// Layout box in document coordinates, from the offset chain. Transforms
/// are ignored, so an element being scrubbed never moves its own trigger.
pub fn document_rect(el: &HtmlElement) -> Option<Rect> {
    if !el.is_connected() {
        return None;
    }
    let (mut top, mut left) = (0.0, 0.0);
    let mut node = Some(el.clone());
    while let Some(current) = node {
        top += current.offset_top() as f64;
        left += current.offset_left() as f64;
        node = current
            .offset_parent()
            .and_then(|p| p.dyn_into::<HtmlElement>().ok());
    }
    Some(Rect::new(
        top,
        left,
        el.offset_width() as f64,
        el.offset_height() as f64,
    ))
}

/// Box relative to the viewport, transforms included.
pub fn client_rect(el: &HtmlElement) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect::new(r.top(), r.left(), r.width(), r.height())
}

struct ElementMeasure(HtmlElement);

impl Measure for ElementMeasure {
    fn rect(&self) -> Option<Rect> {
        document_rect(&self.0)
    }
}

pub fn measure(el: impl Into<HtmlElement>) -> Rc<dyn Measure> {
    Rc::new(ElementMeasure(el.into()))
}

/// Current scroll offset and viewport height.
pub fn window_metrics() -> Option<(f64, f64)> {
    let window = window();
    let scroll = window.scroll_y().ok()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some((scroll, height))
}

fn max_scroll() -> f64 {
    let height = document()
        .document_element()
        .map(|el| el.scroll_height() as f64)
        .unwrap_or_default();
    let viewport = window_metrics().map(|(_, vh)| vh).unwrap_or_default();
    (height - viewport).max(0.0)
}

/// Debounced "is this a phone-sized viewport" signal.
///
/// The first value comes straight from `matchMedia`, so anything reading
/// the tier during the first render already sees the right one. Later
/// changes settle for [`RESIZE_DEBOUNCE_MS`] before they are reported.
pub fn use_is_mobile(breakpoint: u32) -> Signal<bool> {
    let query = mobile_query(breakpoint);
    let initial = window()
        .match_media(&query)
        .ok()
        .flatten()
        .is_some_and(|list| list.matches());
    let raw = RwSignal::new(initial);

    let matches = use_media_query(query);
    Effect::watch(
        move || matches.get(),
        move |value, _, _| {
            if raw.get_untracked() != *value {
                raw.set(*value);
            }
        },
        false,
    );

    let debounced = signal_debounced(raw, RESIZE_DEBOUNCE_MS);
    Memo::new(move |_| debounced.get()).into()
}

/// Shared motion state of one page: the scroll registry, the optional
/// smooth-scroll backend, the device tier and the scroll phase the hero
/// reacts to.
#[derive(Clone, Copy)]
pub struct MotionScene {
    registry: StoredValue<ScrollRegistry, LocalStorage>,
    smooth: StoredValue<Option<SmoothScroll>, LocalStorage>,
    pub is_mobile: Signal<bool>,
    /// How far the services overlay has covered the hero, 0..=1.
    pub phase: RwSignal<f64>,
}

impl MotionScene {
    /// Creates the scene for the current page, wires window listeners and
    /// the frame loop, and provides it as context.
    pub fn provide(site: &SiteSettings) -> Self {
        let smooth = site
            .smooth_scroll
            .enabled
            .then(|| SmoothScroll::new(site.smooth_scroll.duration));
        let scene = Self {
            registry: StoredValue::new_local(ScrollRegistry::new()),
            smooth: StoredValue::new_local(smooth),
            is_mobile: use_is_mobile(site.breakpoint_px),
            phase: RwSignal::new(0.0),
        };
        provide_context(scene);

        let _ = use_event_listener(use_window(), ev::scroll, move |_| scene.sync());
        let _ = use_event_listener(use_window(), ev::resize, move |_| scene.sync());
        if site.smooth_scroll.enabled {
            let _ = use_event_listener_with_options(
                use_window(),
                ev::wheel,
                move |e| {
                    e.prevent_default();
                    let max = max_scroll();
                    scene.smooth.update_value(|s| {
                        if let Some(s) = s {
                            s.wheel(e.delta_y(), max);
                        }
                    });
                },
                UseEventListenerOptions::default().passive(false),
            );
        }

        let _ = use_raf_fn(move |args: UseRafFnCallbackArgs| {
            let dt = args.delta / 1000.0;
            ticker::tick(dt);
            scene.registry().tick(dt);
            let next = scene
                .smooth
                .try_update_value(|s| s.as_mut().and_then(|s| s.step(dt)))
                .flatten();
            if let Some(y) = next {
                window().scroll_to_with_x_and_y(0.0, y);
            }
        });

        // first evaluation once every section has bound its triggers
        request_animation_frame(move || scene.sync());

        on_cleanup(move || {
            scene.registry.try_with_value(ScrollRegistry::clear);
        });
        scene
    }

    pub fn tier(&self) -> Tier {
        Tier::from_mobile(self.is_mobile.get())
    }

    pub fn tier_untracked(&self) -> Tier {
        Tier::from_mobile(self.is_mobile.get_untracked())
    }

    pub fn registry(&self) -> ScrollRegistry {
        self.registry.get_value()
    }

    /// Feeds the current scroll position to every trigger.
    pub fn sync(&self) {
        let Some((scroll, height)) = window_metrics() else {
            return;
        };
        self.smooth.update_value(|s| {
            if let Some(s) = s {
                s.sync(scroll);
            }
        });
        self.registry().update(scroll, height);
    }

    /// Scrolls the page so `el` sits at the top of the viewport.
    pub fn scroll_to_element(&self, el: &HtmlElement) {
        if let Some(rect) = document_rect(el) {
            self.scroll_to(rect.top);
        }
    }

    /// Eased scroll to a document offset, through the smooth-scroll backend
    /// when it is enabled.
    pub fn scroll_to(&self, top: f64) {
        let smooth = self.smooth.with_value(|s| s.is_some());
        if smooth {
            let max = max_scroll();
            self.smooth.update_value(|s| {
                if let Some(s) = s {
                    s.scroll_to(top, max);
                }
            });
        } else {
            let opts = ScrollToOptions::new();
            opts.set_top(top);
            opts.set_behavior(ScrollBehavior::Smooth);
            window().scroll_to_with_scroll_to_options(&opts);
        }
    }
}

pub fn use_scene() -> MotionScene {
    expect_context::<MotionScene>()
}

/// Triggers and animations owned by one component. Released when the
/// owner is cleaned up.
#[derive(Clone, Copy)]
pub struct SectionScope {
    scope: StoredValue<Scope, LocalStorage>,
}

impl SectionScope {
    pub fn new() -> Self {
        let scope = StoredValue::new_local(Scope::new());
        on_cleanup(move || {
            scope.try_with_value(Scope::dispose);
        });
        Self { scope }
    }

    pub fn bind(&self, scene: &MotionScene, measure: Rc<dyn Measure>, spec: TriggerSpec) {
        let sub: Subscription = scene.registry().bind(measure, spec);
        self.scope.with_value(|s| s.keep(sub));
    }

    pub fn track(&self, animation: Animation) -> Animation {
        self.scope.with_value(|s| s.track(animation))
    }

    /// An element target whose inline style is restored when the scope is
    /// released, so a rebuild starts from what the markup renders.
    pub fn target(&self, el: impl Into<HtmlElement>) -> TargetRef {
        self.scope.with_value(|s| s.adopt(target(el)))
    }

    pub fn targets<E: Into<HtmlElement>>(&self, els: impl IntoIterator<Item = E>) -> Vec<TargetRef> {
        els.into_iter().map(|el| self.target(el)).collect()
    }
}

/// Hands a long-lived stepper to the frame ticker.
pub fn schedule<S: Steppable + 'static>(item: &Rc<S>) {
    let weak: Weak<dyn Steppable> = Rc::downgrade(item) as Weak<dyn Steppable>;
    ticker::schedule(weak);
}
