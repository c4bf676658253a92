//! The shared frame driver. Anything that animates over time registers
//! here and is stepped once per frame by the page's animation loop.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Longest frame the driver will simulate, in seconds. Longer gaps are
/// clamped to this.
pub const MAX_FRAME: f64 = 0.1;

pub trait Steppable {
    /// Advances by `dt` seconds. Returns `false` once there is nothing
    /// left to do, which drops the item from the driver.
    fn step(&self, dt: f64) -> bool;
}

thread_local! {
    static ACTIVE: RefCell<Vec<Weak<dyn Steppable>>> = const { RefCell::new(Vec::new()) };
}

pub fn schedule(item: Weak<dyn Steppable>) {
    ACTIVE.with_borrow_mut(|active| {
        if !active.iter().any(|w| Weak::ptr_eq(w, &item)) {
            active.push(item);
        }
    });
}

/// Steps every scheduled item. Items scheduled while this runs are picked
/// up on the next frame.
pub fn tick(dt: f64) {
    let dt = dt.clamp(0.0, MAX_FRAME);
    let items: Vec<Rc<dyn Steppable>> = ACTIVE.with_borrow_mut(|active| {
        let items = active.iter().filter_map(Weak::upgrade).collect();
        active.clear();
        items
    });
    let mut remaining = Vec::with_capacity(items.len());
    for item in items {
        if item.step(dt) {
            remaining.push(Rc::downgrade(&item));
        }
    }
    ACTIVE.with_borrow_mut(|active| {
        for w in remaining {
            if !active.iter().any(|x| Weak::ptr_eq(x, &w)) {
                active.push(w);
            }
        }
    });
}

pub fn is_scheduled(item: &Weak<dyn Steppable>) -> bool {
    ACTIVE.with_borrow(|active| active.iter().any(|w| Weak::ptr_eq(w, item)))
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    struct Countdown(Cell<u32>);

    impl Steppable for Countdown {
        fn step(&self, _dt: f64) -> bool {
            let left = self.0.get().saturating_sub(1);
            self.0.set(left);
            left > 0
        }
    }

    #[test]
    fn test_items_drop_out_when_done() {
        let item = Rc::new(Countdown(Cell::new(2)));
        let weak: Weak<dyn Steppable> = Rc::downgrade(&item) as Weak<dyn Steppable>;
        schedule(weak.clone());
        schedule(weak.clone());
        tick(0.016);
        assert_eq!(item.0.get(), 1, "scheduling twice must not step twice");
        assert!(is_scheduled(&weak));
        tick(0.016);
        assert_eq!(item.0.get(), 0);
        assert!(!is_scheduled(&weak));
    }

    #[test]
    fn test_dropped_items_are_pruned() {
        let item = Rc::new(Countdown(Cell::new(5)));
        let weak: Weak<dyn Steppable> = Rc::downgrade(&item) as Weak<dyn Steppable>;
        schedule(weak.clone());
        drop(item);
        tick(0.016);
        assert!(!is_scheduled(&weak));
    }
}
