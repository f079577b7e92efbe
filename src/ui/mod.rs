pub mod launcher;
pub mod overlay;
pub mod screens;
pub mod terminal_guard;

pub use launcher::TourLauncher;
pub use overlay::TourOverlay;
pub use screens::{Screen, ScreenNavigator, ScreenPage};
