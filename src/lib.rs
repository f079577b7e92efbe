//! Tourguide - guided onboarding tours for ratatui applications
//!
//! The `tour` module holds the rendering-independent core: step definitions,
//! selectors, and the advancement state machine. The `ui` module carries the
//! ratatui surface (launcher button, spotlight overlay, demo screens).

pub mod config;
pub mod logging;
pub mod tour;
pub mod ui;

pub use tour::{
    BehaviorFlags, LifecycleEvent, LifecycleKind, Navigator, Page, Selector, Step,
    StepTransition, TourController, TourDefinition, TourState,
};
