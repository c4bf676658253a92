use crate::motion::ease::{Ease, EaseDir};
use crate::motion::style::{TargetRef, Vars};
use crate::motion::timeline::{Animation, Position, Timeline, TweenParams};

const ROLL_HALF: f64 = 0.2;

/// Ones digit shown for the zero-based project `index`.
pub fn ones_digit(index: usize) -> char {
    char::from_digit(((index + 1) % 10) as u32, 10).unwrap_or('0')
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollDirection {
    /// Scrolling forward: the old digit leaves downward.
    Down,
    Up,
}

impl RollDirection {
    fn exit_percent(self) -> f64 {
        match self {
            RollDirection::Down => 100.0,
            RollDirection::Up => -100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitRoll {
    pub digit: char,
    pub direction: RollDirection,
}

/// The changing digit of the "0N" project counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigitCounter {
    digit: char,
}

impl Default for DigitCounter {
    fn default() -> Self {
        Self { digit: '1' }
    }
}

impl DigitCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn digit(&self) -> char {
        self.digit
    }

    /// Moves to the project at `index`. Returns the roll to perform, or
    /// `None` when the digit is already showing.
    pub fn update(&mut self, index: usize, direction: RollDirection) -> Option<DigitRoll> {
        let digit = ones_digit(index);
        if digit == self.digit {
            return None;
        }
        self.digit = digit;
        Some(DigitRoll { digit, direction })
    }
}

/// Slide the digit out, swap its text, slide the new one in from the other
/// side.
pub fn roll_timeline(
    digit: &TargetRef,
    roll: DigitRoll,
    mut swap: impl FnMut(char) + 'static,
) -> Animation {
    let targets = [digit.clone()];
    let exit = roll.direction.exit_percent();
    let value = roll.digit;
    let timeline = Timeline::new()
        .to(
            &targets,
            Vars::new().y_percent(exit),
            TweenParams::new(ROLL_HALF, Ease::Power(2, EaseDir::In)),
            Position::End,
        )
        .call(move || swap(value), Position::End)
        .set(&targets, Vars::new().y_percent(-exit), Position::End)
        .to(
            &targets,
            Vars::new().y_percent(0.0),
            TweenParams::new(ROLL_HALF, Ease::Power(2, EaseDir::Out)),
            Position::End,
        );
    Animation::new(timeline)
}

/// Rolls are played one at a time; a new roll finishes the previous one
/// first so the digit never ends up half way.
#[derive(Default)]
pub struct RollQueue {
    current: Option<Animation>,
}

impl RollQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, animation: Animation) {
        if let Some(previous) = self.current.replace(animation.clone()) {
            previous.seek(1.0);
            previous.kill();
        }
        animation.play();
    }

    pub fn kill(&mut self) {
        if let Some(previous) = self.current.take() {
            previous.kill();
        }
    }
}

impl Drop for RollQueue {
    fn drop(&mut self) {
        self.kill();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use std::rc::Rc;

    use super::*;
    use crate::motion::scroll::{Band, Edge, Measure, ScrollRegistry, TriggerSpec};
    use crate::motion::style::testing::MemoryTarget;
    use crate::motion::style::Target;
    use crate::viewport::Rect;

    #[test]
    fn test_ones_digit() {
        assert_eq!(ones_digit(0), '1');
        assert_eq!(ones_digit(1), '2');
        assert_eq!(ones_digit(8), '9');
        assert_eq!(ones_digit(9), '0');
        assert_eq!(ones_digit(10), '1');
    }

    #[test]
    fn test_digit_sequence_reverses() {
        let mut counter = DigitCounter::new();
        let forward: Vec<char> = (0..12)
            .filter_map(|i| counter.update(i, RollDirection::Down))
            .map(|r| r.digit)
            .collect();
        assert_eq!(forward, "23456789012".chars().collect::<Vec<_>>());
        let backward: Vec<char> = (0..11)
            .rev()
            .filter_map(|i| counter.update(i, RollDirection::Up))
            .map(|r| r.digit)
            .collect();
        assert_eq!(backward, "10987654321".chars().collect::<Vec<_>>());
        assert_eq!(counter.digit(), '1');
    }

    #[test]
    fn test_same_digit_does_not_roll() {
        let mut counter = DigitCounter::new();
        assert!(counter.update(0, RollDirection::Down).is_none());
        assert!(counter.update(1, RollDirection::Down).is_some());
        assert!(counter.update(1, RollDirection::Up).is_none());
    }

    #[test]
    fn test_roll_slides_out_swaps_and_returns() {
        let digit = MemoryTarget::new();
        let target: TargetRef = digit.clone();
        let text = Rc::new(Cell::new('1'));
        let label = text.clone();
        let roll = DigitRoll {
            digit: '2',
            direction: RollDirection::Down,
        };
        let anim = roll_timeline(&target, roll, move |c| label.set(c));
        assert_eq!(anim.duration(), 0.4);

        anim.play();
        anim.step(0.19);
        assert!(digit.state().y_percent > 0.0);
        assert_eq!(text.get(), '1');
        anim.step(0.02);
        assert_eq!(text.get(), '2');
        assert!(digit.state().y_percent < 0.0);
        while anim.step(1.0 / 60.0) {}
        assert_eq!(digit.state().y_percent, 0.0);
    }

    struct Works {
        counter: RefCell<DigitCounter>,
        shown: Rc<Cell<char>>,
        digit: TargetRef,
        queue: RefCell<RollQueue>,
    }

    fn roll_to(works: &Rc<Works>, index: usize, direction: RollDirection) -> impl FnMut() + 'static {
        let works = works.clone();
        move || {
            let Some(roll) = works.counter.borrow_mut().update(index, direction) else {
                return;
            };
            let label = works.shown.clone();
            let anim = roll_timeline(&works.digit, roll, move |c| label.set(c));
            works.queue.borrow_mut().start(anim);
        }
    }

    #[test]
    fn test_two_projects_scenario() {
        const VH: f64 = 1000.0;
        let registry = ScrollRegistry::new();
        let works = Rc::new(Works {
            counter: RefCell::new(DigitCounter::new()),
            shown: Rc::new(Cell::new('1')),
            digit: MemoryTarget::new(),
            queue: RefCell::new(RollQueue::new()),
        });

        let cards = [
            Rect::new(1000.0, 0.0, 600.0, 700.0),
            Rect::new(1900.0, 0.0, 600.0, 700.0),
        ];
        let mut subs = Vec::new();
        for (index, rect) in cards.into_iter().enumerate() {
            let measure: Rc<dyn Measure> = Rc::new(move || Some(rect));
            subs.push(registry.bind(
                measure,
                TriggerSpec::new(Band::new(Edge::Top, Edge::Center))
                    .end(Band::new(Edge::Bottom, Edge::Center))
                    .on_enter(roll_to(&works, index, RollDirection::Down))
                    .on_enter_back(roll_to(&works, index, RollDirection::Up)),
            ));
        }
        let finish = || {
            let current = works.queue.borrow().current.clone();
            if let Some(anim) = current {
                while anim.step(1.0 / 60.0) {}
            }
        };

        registry.update(0.0, VH);
        registry.update(600.0, VH);
        finish();
        assert_eq!(works.shown.get(), '1');

        registry.update(1500.0, VH);
        finish();
        assert_eq!(works.shown.get(), '2');

        registry.update(1000.0, VH);
        finish();
        assert_eq!(works.shown.get(), '1');
        assert_eq!(works.digit.state().y_percent, 0.0);
    }
}
