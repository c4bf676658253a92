//! A small tween engine: easing curves, timelines, a frame ticker and
//! scroll triggers. Nothing in here touches the DOM; the page renders into
//! [`Target`] implementations.

pub mod config;
pub mod ease;
pub mod reveal;
pub mod scope;
pub mod scroll;
pub mod smooth;
pub mod style;
pub mod ticker;
pub mod timeline;

pub use config::AnimationConfig;
pub use ease::Ease;
pub use reveal::{build_reveal, phase_blur, RevealOptions};
pub use scope::Scope;
pub use scroll::{Band, Edge, Measure, ScrollRegistry, Subscription, TriggerSpec};
pub use style::{Prop, Target, TargetRef, Vars, VisualState};
pub use timeline::{Animation, Position, Timeline, TweenParams};
