//! Page behaviors.
//!
//! Each component is constructed from the elements it needs (looked up once,
//! through [`crate::dom`]) and the capabilities it uses. A missing element makes
//! the constructor return `None`, which disables that behavior and nothing else.
//! Handlers are plain methods so tests can drive them without an event bus;
//! `mount` wires them to the bus and hands back the subscriptions.

pub mod back_to_top;
pub mod contact;
pub mod nav;
pub mod reveal;
pub mod skills;
pub mod stagger;
pub mod theme;
pub mod year;

pub use back_to_top::BackToTop;
pub use contact::{ContactForm, SubmitOutcome};
pub use nav::NavToggle;
pub use reveal::ScrollReveal;
pub use skills::SkillBars;
pub use stagger::{stagger_cards, split_words};
pub use theme::{Theme, ThemeSwitch};
pub use year::write_year;
