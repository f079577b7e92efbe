//! Collaborator seams between the tour controller and the host application.
//!
//! The controller never touches the terminal or the screen tree directly; it
//! sees the host through these two traits so the whole state machine can be
//! exercised with in-memory fakes.

use ratatui::layout::Rect;

use super::selector::Selector;

/// The queryable surface the tour runs over: the active screen's registered
/// targets.
pub trait Page {
    /// Resolve a selector to the target's current region, if present.
    fn locate(&self, selector: &Selector) -> Option<Rect>;

    /// Bring a region into the visible viewport, centered.
    fn scroll_into_view(&mut self, region: Rect);
}

/// Fire-and-forget navigation between application screens.
pub trait Navigator {
    /// The current location path.
    fn current_path(&self) -> &str;

    /// Request navigation to `path`. The controller never awaits completion
    /// and consumes no return value.
    fn navigate(&mut self, path: &str);
}
