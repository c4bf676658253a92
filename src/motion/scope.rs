use std::cell::RefCell;
use std::rc::Rc;

use super::scroll::Subscription;
use super::style::{TargetRef, VisualState};
use super::timeline::Animation;

/// Everything one component created on the shared scene. Disposing the
/// scope removes its triggers, kills its animations and puts every adopted
/// target back to the state it had when adopted, leaving the rest of the
/// page alone.
#[derive(Default)]
pub struct Scope {
    subscriptions: RefCell<Vec<Subscription>>,
    animations: RefCell<Vec<Animation>>,
    adopted: RefCell<Vec<(TargetRef, VisualState)>>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keep(&self, subscription: Subscription) {
        self.subscriptions.borrow_mut().push(subscription);
    }

    /// Tracks `animation` and hands it back for chaining.
    pub fn track(&self, animation: Animation) -> Animation {
        self.animations.borrow_mut().push(animation.clone());
        animation
    }

    /// Records the current state of `target` for [`Scope::dispose`] to
    /// restore. Must be called before anything animates it.
    pub fn adopt(&self, target: TargetRef) -> TargetRef {
        let mut adopted = self.adopted.borrow_mut();
        if !adopted.iter().any(|(t, _)| Rc::ptr_eq(t, &target)) {
            adopted.push((target.clone(), target.state()));
        }
        target
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.borrow().is_empty()
            && self.animations.borrow().is_empty()
            && self.adopted.borrow().is_empty()
    }

    pub fn dispose(&self) {
        let subscriptions = std::mem::take(&mut *self.subscriptions.borrow_mut());
        for subscription in subscriptions {
            subscription.dispose();
        }
        let animations = std::mem::take(&mut *self.animations.borrow_mut());
        for animation in animations {
            animation.kill();
        }
        let adopted = std::mem::take(&mut *self.adopted.borrow_mut());
        for (target, state) in adopted {
            target.apply_state(state);
        }
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        self.dispose();
    }
}
