//! Guided tour core: step data model, selector grammar, collaborator seams,
//! and the step-advancement state machine.

pub mod controller;
pub mod host;
pub mod selector;
pub mod step;

pub use controller::{LifecycleEvent, LifecycleKind, TourController, TourState};
pub use host::{Navigator, Page};
pub use selector::{Selector, SelectorParseError};
pub use step::{BehaviorFlags, Step, StepTransition, TourDefinition, TourDefinitionError};
