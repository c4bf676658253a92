//! Section interaction state: accordion, project counter, active nav
//! section, pointer glow and heading words.

pub mod accordion;
pub mod counter;
pub mod glow;
pub mod nav;
pub mod text;

pub use accordion::{Accordion, AccordionChange};
pub use counter::{DigitCounter, RollDirection};
pub use nav::SectionId;
pub use text::split_words;
