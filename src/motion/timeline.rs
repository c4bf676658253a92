use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use super::ease::Ease;
use super::style::{TargetRef, Vars};
use super::ticker::{self, Steppable};

/// Where a step lands on its timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position {
    /// Right after everything already added.
    End,
    /// Relative to the current end, e.g. `Offset(-0.7)` overlaps the
    /// previous step by 0.7 seconds.
    Offset(f64),
    /// Absolute time in seconds.
    At(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenParams {
    pub duration: f64,
    pub ease: Ease,
    /// Delay between consecutive targets.
    pub stagger: f64,
}

impl TweenParams {
    pub fn new(duration: f64, ease: Ease) -> Self {
        Self {
            duration,
            ease,
            stagger: 0.0,
        }
    }

    pub fn stagger(mut self, stagger: f64) -> Self {
        self.stagger = stagger;
        self
    }
}

struct Tween {
    target: TargetRef,
    from: Vars,
    to: Vars,
    ease: Ease,
    primed: bool,
}

impl Tween {
    fn render(&mut self, progress: f64, forward: bool) {
        if !self.primed {
            // nothing to restore if this step never ran forward
            if !forward {
                return;
            }
            self.from = self.from.or(&self.to.capture(self.target.as_ref()));
            self.primed = true;
        }
        let eased = self.ease.apply(progress);
        self.from.lerp(&self.to, eased).apply(self.target.as_ref());
    }
}

enum Step {
    Tween(Tween),
    Call(Box<dyn FnMut()>),
    Nested(Animation),
}

struct Entry {
    start: f64,
    duration: f64,
    step: Step,
}

/// A sequence of tweens, callbacks and nested animations laid out in time.
///
/// Built by value and handed to [`Animation::new`] for playback.
#[derive(Default)]
pub struct Timeline {
    // kept sorted by start; ties keep insertion order
    entries: Vec<Entry>,
    duration: f64,
}

impl fmt::Debug for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timeline")
            .field("entries", &self.entries.len())
            .field("duration", &self.duration)
            .finish()
    }
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn resolve(&self, pos: Position) -> f64 {
        match pos {
            Position::End => self.duration,
            Position::Offset(offset) => (self.duration + offset).max(0.0),
            Position::At(t) => t.max(0.0),
        }
    }

    fn push(&mut self, entry: Entry) {
        self.duration = self.duration.max(entry.start + entry.duration);
        let at = self.entries.partition_point(|e| e.start <= entry.start);
        self.entries.insert(at, entry);
    }

    /// Tweens each target from wherever it is when the step first runs.
    pub fn to(self, targets: &[TargetRef], to: Vars, params: TweenParams, pos: Position) -> Self {
        self.tween(targets, None, to, params, pos)
    }

    /// Tweens each target between explicit endpoints. The start state is
    /// applied immediately so elements never flash their resting state.
    pub fn from_to(
        self,
        targets: &[TargetRef],
        from: Vars,
        to: Vars,
        params: TweenParams,
        pos: Position,
    ) -> Self {
        self.tween(targets, Some(from), to, params, pos)
    }

    fn tween(
        mut self,
        targets: &[TargetRef],
        from: Option<Vars>,
        to: Vars,
        params: TweenParams,
        pos: Position,
    ) -> Self {
        let start = self.resolve(pos);
        for (i, target) in targets.iter().enumerate() {
            let tween = match from {
                Some(from) => {
                    from.apply(target.as_ref());
                    Tween {
                        from: from.or(&to.capture(target.as_ref())),
                        target: target.clone(),
                        to,
                        ease: params.ease,
                        primed: true,
                    }
                }
                None => Tween {
                    target: target.clone(),
                    from: Vars::new(),
                    to,
                    ease: params.ease,
                    primed: false,
                },
            };
            self.push(Entry {
                start: start + params.stagger * i as f64,
                duration: params.duration.max(0.0),
                step: Step::Tween(tween),
            });
        }
        self
    }

    /// Zero-length step; reverting past it restores the previous values.
    pub fn set(self, targets: &[TargetRef], vars: Vars, pos: Position) -> Self {
        self.tween(targets, None, vars, TweenParams::new(0.0, Ease::Linear), pos)
    }

    /// Runs `f` whenever forward playback crosses `pos`. The callback must
    /// not drive the timeline it belongs to.
    pub fn call(mut self, f: impl FnMut() + 'static, pos: Position) -> Self {
        let start = self.resolve(pos);
        self.push(Entry {
            start,
            duration: 0.0,
            step: Step::Call(Box::new(f)),
        });
        self
    }

    /// Sequences another animation into this one. The nested animation is
    /// driven by this timeline from then on and should not be played on its
    /// own.
    pub fn add(mut self, animation: &Animation, pos: Position) -> Self {
        let start = self.resolve(pos);
        self.push(Entry {
            start,
            duration: animation.duration(),
            step: Step::Nested(animation.clone()),
        });
        self
    }

    fn render(&mut self, prev: f64, time: f64) {
        let forward = time >= prev;
        let (lo, hi) = if forward { (prev, time) } else { (time, prev) };
        let len = self.entries.len();
        for n in 0..len {
            let i = if forward { n } else { len - 1 - n };
            let entry = &mut self.entries[i];
            if entry.start + entry.duration < lo || entry.start > hi {
                continue;
            }
            match &mut entry.step {
                Step::Tween(tween) => {
                    let p = local_progress(entry.start, entry.duration, time, forward);
                    tween.render(p, forward);
                }
                Step::Call(f) => {
                    let crossed = prev < entry.start || (prev == 0.0 && entry.start == 0.0);
                    if forward && time > prev && crossed && entry.start <= time {
                        f();
                    }
                }
                Step::Nested(animation) => {
                    animation.render_at((time - entry.start).clamp(0.0, entry.duration));
                }
            }
        }
    }
}

fn local_progress(start: f64, duration: f64, time: f64, forward: bool) -> f64 {
    if duration <= 0.0 {
        if time > start || (time == start && forward) {
            1.0
        } else {
            0.0
        }
    } else {
        ((time - start) / duration).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Playback {
    Paused,
    Forward,
    Reverse,
}

struct Core {
    timeline: Timeline,
    time: f64,
    playback: Playback,
    killed: bool,
}

#[derive(Default)]
struct Hooks {
    on_start: Option<Rc<dyn Fn()>>,
    on_complete: Option<Rc<dyn Fn()>>,
    on_reverse_complete: Option<Rc<dyn Fn()>>,
}

pub struct AnimationInner {
    core: RefCell<Core>,
    hooks: RefCell<Hooks>,
}

/// A playable handle around a [`Timeline`]. Cheap to clone; clones share
/// playback state.
#[derive(Clone)]
pub struct Animation(Rc<AnimationInner>);

impl fmt::Debug for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let core = self.0.core.borrow();
        f.debug_struct("Animation")
            .field("duration", &core.timeline.duration)
            .field("time", &core.time)
            .field("playback", &core.playback)
            .field("killed", &core.killed)
            .finish()
    }
}

impl Animation {
    pub fn new(timeline: Timeline) -> Self {
        Self(Rc::new(AnimationInner {
            core: RefCell::new(Core {
                timeline,
                time: 0.0,
                playback: Playback::Paused,
                killed: false,
            }),
            hooks: RefCell::new(Hooks::default()),
        }))
    }

    /// An animation with nothing in it. Already complete; every control is
    /// a no-op.
    pub fn empty() -> Self {
        Self::new(Timeline::new())
    }

    pub fn duration(&self) -> f64 {
        self.0.core.borrow().timeline.duration
    }

    pub fn time(&self) -> f64 {
        self.0.core.borrow().time
    }

    pub fn progress(&self) -> f64 {
        let core = self.0.core.borrow();
        if core.timeline.duration <= 0.0 {
            1.0
        } else {
            core.time / core.timeline.duration
        }
    }

    pub fn is_active(&self) -> bool {
        self.0.core.borrow().playback != Playback::Paused
    }

    pub fn is_reversed(&self) -> bool {
        self.0.core.borrow().playback == Playback::Reverse
    }

    pub fn is_killed(&self) -> bool {
        self.0.core.borrow().killed
    }

    pub fn on_start(&self, f: impl Fn() + 'static) -> &Self {
        self.0.hooks.borrow_mut().on_start = Some(Rc::new(f));
        self
    }

    pub fn on_complete(&self, f: impl Fn() + 'static) -> &Self {
        self.0.hooks.borrow_mut().on_complete = Some(Rc::new(f));
        self
    }

    pub fn on_reverse_complete(&self, f: impl Fn() + 'static) -> &Self {
        self.0.hooks.borrow_mut().on_reverse_complete = Some(Rc::new(f));
        self
    }

    pub fn play(&self) {
        self.set_playback(Playback::Forward);
    }

    pub fn reverse(&self) {
        self.set_playback(Playback::Reverse);
    }

    pub fn pause(&self) {
        self.0.core.borrow_mut().playback = Playback::Paused;
    }

    fn set_playback(&self, playback: Playback) {
        {
            let mut core = self.0.core.borrow_mut();
            if core.killed || core.timeline.duration <= 0.0 {
                return;
            }
            let at_rest = match playback {
                Playback::Forward => core.time >= core.timeline.duration,
                Playback::Reverse => core.time <= 0.0,
                Playback::Paused => true,
            };
            core.playback = if at_rest { Playback::Paused } else { playback };
            if at_rest {
                return;
            }
        }
        let weak: Weak<dyn Steppable> = Rc::downgrade(&self.0) as Weak<dyn Steppable>;
        ticker::schedule(weak);
    }

    /// Jumps to `progress` (0..=1) without changing play state.
    pub fn seek(&self, progress: f64) {
        let duration = self.duration();
        self.render_at(progress.clamp(0.0, 1.0) * duration);
    }

    /// Stops the animation for good. Elements snap to whichever end is
    /// nearer. Safe to call any number of times.
    pub fn kill(&self) {
        let target = {
            let core = self.0.core.borrow();
            if core.killed {
                return;
            }
            let duration = core.timeline.duration;
            if duration > 0.0 && core.time / duration >= 0.5 {
                duration
            } else {
                0.0
            }
        };
        self.render_at(target);
        let mut core = self.0.core.borrow_mut();
        core.killed = true;
        core.playback = Playback::Paused;
    }

    /// Advances playback by `dt` seconds. Returns whether it is still
    /// running.
    pub fn step(&self, dt: f64) -> bool {
        self.0.step(dt)
    }

    pub(crate) fn render_at(&self, time: f64) {
        self.0.render_at(time);
    }
}

impl AnimationInner {
    fn render_at(&self, time: f64) {
        let (prev, time, duration) = {
            let mut core = self.core.borrow_mut();
            let duration = core.timeline.duration;
            let prev = core.time;
            let time = time.clamp(0.0, duration);
            if time == prev || core.killed {
                return;
            }
            core.timeline.render(prev, time);
            core.time = time;
            if time >= duration && core.playback == Playback::Forward {
                core.playback = Playback::Paused;
            }
            if time <= 0.0 && core.playback == Playback::Reverse {
                core.playback = Playback::Paused;
            }
            (prev, time, duration)
        };

        let hooks = {
            let hooks = self.hooks.borrow();
            (
                hooks.on_start.clone(),
                hooks.on_complete.clone(),
                hooks.on_reverse_complete.clone(),
            )
        };
        let (on_start, on_complete, on_reverse_complete) = hooks;
        if prev <= 0.0 || prev >= duration {
            if let Some(f) = on_start {
                f();
            }
        }
        if time >= duration {
            if let Some(f) = on_complete {
                f();
            }
        } else if time <= 0.0 {
            if let Some(f) = on_reverse_complete {
                f();
            }
        }
    }
}

impl Steppable for AnimationInner {
    fn step(&self, dt: f64) -> bool {
        let next = {
            let core = self.core.borrow();
            if core.killed {
                return false;
            }
            match core.playback {
                Playback::Paused => return false,
                Playback::Forward => core.time + dt,
                Playback::Reverse => core.time - dt,
            }
        };
        self.render_at(next);
        self.core.borrow().playback != Playback::Paused
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::motion::style::testing::{refs, MemoryTarget};
    use crate::motion::style::Target;

    fn run(anim: &Animation) {
        let mut guard = 0;
        while anim.step(1.0 / 60.0) {
            guard += 1;
            assert!(guard < 10_000, "animation never settled");
        }
    }

    #[test]
    fn test_positions() {
        let t = MemoryTarget::new();
        let targets = refs(&[t]);
        let params = TweenParams::new(1.0, Ease::Linear);
        let tl = Timeline::new()
            .to(&targets, Vars::new().x(10.0), params, Position::End)
            .to(&targets, Vars::new().y(10.0), params, Position::Offset(-0.5))
            .to(&targets, Vars::new().opacity(0.0), params, Position::At(3.0));
        assert_eq!(tl.duration(), 4.0);
    }

    #[test]
    fn test_stagger_spreads_starts() {
        let a = MemoryTarget::new();
        let b = MemoryTarget::new();
        let targets = refs(&[a.clone(), b.clone()]);
        let tl = Timeline::new().from_to(
            &targets,
            Vars::new().y(40.0),
            Vars::new().y(0.0),
            TweenParams::new(1.0, Ease::Linear).stagger(0.5),
            Position::At(0.0),
        );
        assert_eq!(tl.duration(), 1.5);
        let anim = Animation::new(tl);
        anim.play();
        anim.step(0.5);
        assert_eq!(a.state().y, 20.0);
        assert_eq!(b.state().y, 40.0);
    }

    #[test]
    fn test_from_to_applies_start_immediately() {
        let t = MemoryTarget::new();
        let _tl = Timeline::new().from_to(
            &refs(&[t.clone()]),
            Vars::new().opacity(0.0).scale(1.5),
            Vars::new().opacity(0.7).scale(1.0),
            TweenParams::new(1.8, Ease::Linear),
            Position::End,
        );
        assert_eq!(t.state().opacity, 0.0);
        assert_eq!(t.state().scale, 1.5);
    }

    #[test]
    fn test_reverse_restores_captured_start() {
        let t = MemoryTarget::new();
        let targets = refs(&[t.clone()]);
        t.update(&mut |s| s.x = 5.0);
        let anim = Animation::new(Timeline::new().to(
            &targets,
            Vars::new().x(50.0),
            TweenParams::new(0.4, Ease::SMOOTH),
            Position::End,
        ));
        anim.play();
        run(&anim);
        assert_eq!(t.state().x, 50.0);
        anim.reverse();
        run(&anim);
        assert_eq!(t.state().x, 5.0);
    }

    #[test]
    fn test_set_and_call_order() {
        let t = MemoryTarget::new();
        let targets = refs(&[t.clone()]);
        let swapped = Rc::new(Cell::new(0));
        let seen = swapped.clone();
        let fast = TweenParams::new(0.2, Ease::Linear);
        let anim = Animation::new(
            Timeline::new()
                .to(&targets, Vars::new().y_percent(100.0), fast, Position::End)
                .call(move || seen.set(seen.get() + 1), Position::End)
                .set(&targets, Vars::new().y_percent(-100.0), Position::End)
                .to(&targets, Vars::new().y_percent(0.0), fast, Position::End),
        );
        anim.play();
        anim.step(0.1);
        assert_eq!(t.state().y_percent, 50.0);
        anim.step(0.15);
        assert_eq!(swapped.get(), 1);
        assert!(t.state().y_percent < 0.0);
        run(&anim);
        assert_eq!(swapped.get(), 1);
        assert_eq!(t.state().y_percent, 0.0);
    }

    #[test]
    fn test_hooks_fire_at_rest_positions() {
        let t = MemoryTarget::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let anim = Animation::new(Timeline::new().from_to(
            &refs(&[t]),
            Vars::new().opacity(0.0),
            Vars::new().opacity(1.0),
            TweenParams::new(0.3, Ease::Linear),
            Position::End,
        ));
        let (a, b, c) = (log.clone(), log.clone(), log.clone());
        anim.on_start(move || a.borrow_mut().push("start"))
            .on_complete(move || b.borrow_mut().push("complete"))
            .on_reverse_complete(move || c.borrow_mut().push("reverse"));
        anim.play();
        run(&anim);
        anim.reverse();
        run(&anim);
        assert_eq!(*log.borrow(), vec!["start", "complete", "start", "reverse"]);
    }

    #[test]
    fn test_kill_snaps_to_nearer_end() {
        let t = MemoryTarget::new();
        let targets = refs(&[t.clone()]);
        let build = || {
            Animation::new(Timeline::new().from_to(
                &targets,
                Vars::new().y(100.0),
                Vars::new().y(0.0),
                TweenParams::new(1.0, Ease::Linear),
                Position::End,
            ))
        };
        let anim = build();
        anim.play();
        anim.step(0.3);
        anim.kill();
        assert_eq!(t.state().y, 100.0);
        anim.kill();
        anim.play();
        assert!(!anim.is_active());

        let anim = build();
        anim.play();
        anim.step(0.8);
        anim.kill();
        assert_eq!(t.state().y, 0.0);
    }

    #[test]
    fn test_nested_animation_follows_parent() {
        let t = MemoryTarget::new();
        let child = Animation::new(Timeline::new().from_to(
            &refs(&[t.clone()]),
            Vars::new().opacity(0.0),
            Vars::new().opacity(1.0),
            TweenParams::new(1.0, Ease::Linear),
            Position::End,
        ));
        let parent = Animation::new(Timeline::new().add(&child, Position::At(0.5)));
        assert_eq!(parent.duration(), 1.5);
        parent.play();
        parent.step(1.0);
        assert_eq!(t.state().opacity, 0.5);
        run(&parent);
        assert_eq!(child.progress(), 1.0);
        parent.reverse();
        run(&parent);
        assert_eq!(t.state().opacity, 0.0);
    }

    #[test]
    fn test_empty_is_inert() {
        let anim = Animation::empty();
        anim.play();
        anim.reverse();
        anim.seek(0.5);
        anim.kill();
        assert!(!anim.is_active());
        assert_eq!(anim.progress(), 1.0);
    }
}
