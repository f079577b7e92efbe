//! The tour controller: drives the user through the step sequence,
//! synchronizing target presence, application location, and overlay state.
//!
//! All entry points take the current `Instant` so the deferred-advance timing
//! is fully deterministic under test. The controller owns exactly one pending
//! deferred advance at a time; every scheduled continuation is stamped with a
//! generation counter and discarded if the tour state has since diverged.

use std::time::{Duration, Instant};

use ratatui::layout::Position;
use tracing::{debug, warn};

use super::host::{Navigator, Page};
use super::step::{Step, TourDefinition};

/// Lifecycle callbacks emitted by the overlay rendering the tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleKind {
    /// A step's tooltip became visible
    StepShown,
    /// The user completed a step (pressed Next)
    StepCompleted,
    /// The step's target could not be located
    TargetNotFound,
    /// The tour ended (skipped, closed, or ran off the end)
    TourFinished,
}

/// One lifecycle callback: what happened, and at which step index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleEvent {
    pub kind: LifecycleKind,
    pub index: usize,
}

/// Mutable tour state, single-owner.
///
/// Invariant: `step_index` is a valid index into the step sequence while
/// `running`; it is reset to 0 whenever the tour stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TourState {
    pub running: bool,
    pub step_index: usize,
}

impl TourState {
    const STOPPED: TourState = TourState {
        running: false,
        step_index: 0,
    };
}

/// The one in-flight deferred advance. Committed (or discarded) by `tick`.
#[derive(Debug, Clone, Copy)]
struct PendingAdvance {
    next_index: usize,
    generation: u64,
    due_at: Instant,
}

/// Owns the ordered step list and the run/stop state machine.
pub struct TourController {
    steps: Vec<Step>,
    state: TourState,
    /// Bumped on every committed state change; stale continuations no-op
    generation: u64,
    pending: Option<PendingAdvance>,
    /// Settle time between deciding to advance and checking for the target
    advance_delay: Duration,
    /// Prefix for all transition routes
    base_path: String,
}

impl TourController {
    pub fn new(definition: TourDefinition, base_path: String, advance_delay: Duration) -> Self {
        Self {
            steps: definition.steps,
            state: TourState::STOPPED,
            generation: 0,
            pending: None,
            advance_delay,
            base_path,
        }
    }

    pub fn state(&self) -> TourState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// The step currently highlighted, when the tour is running.
    pub fn current_step(&self) -> Option<&Step> {
        if self.state.running {
            self.steps.get(self.state.step_index)
        } else {
            None
        }
    }

    /// Whether a deferred advance is waiting to settle.
    pub fn has_pending_advance(&self) -> bool {
        self.pending.is_some()
    }

    /// Start (or restart) the tour at step 0. Any pending advance from a
    /// prior run is cancelled.
    pub fn start(&mut self) {
        debug!("tour started");
        self.state = TourState {
            running: true,
            step_index: 0,
        };
        self.generation += 1;
        self.pending = None;
    }

    /// Stop the tour and reset the step index.
    pub fn stop(&mut self) {
        debug!("tour stopped");
        self.state = TourState::STOPPED;
        self.generation += 1;
        self.pending = None;
    }

    /// React to an overlay lifecycle callback.
    pub fn handle_lifecycle(
        &mut self,
        event: LifecycleEvent,
        now: Instant,
        navigator: &mut dyn Navigator,
    ) {
        match event.kind {
            LifecycleKind::StepCompleted | LifecycleKind::TargetNotFound => {
                self.advance_to(event.index + 1, now, navigator);
            }
            LifecycleKind::TourFinished => self.stop(),
            LifecycleKind::StepShown => {}
        }
    }

    /// React to a click anywhere on the surface. Advances one step when the
    /// current step requires an in-place click and the click landed inside
    /// its target region. Clicks during the deferred-delay settle window are
    /// ignored, not queued.
    pub fn handle_click(
        &mut self,
        position: Position,
        now: Instant,
        page: &dyn Page,
        navigator: &mut dyn Navigator,
    ) {
        if !self.state.running || self.pending.is_some() {
            return;
        }
        let Some(step) = self.steps.get(self.state.step_index) else {
            return;
        };
        if !step.click_required() {
            return;
        }
        if page
            .locate(&step.target)
            .is_some_and(|region| region.contains(position))
        {
            debug!(step = self.state.step_index, "target clicked");
            self.advance_to(self.state.step_index + 1, now, navigator);
        }
    }

    /// Begin advancing to `next`: apply the leaving step's transition (if
    /// any) and schedule the deferred target lookup. Running past the last
    /// step stops the tour.
    pub fn advance_to(&mut self, next: usize, now: Instant, navigator: &mut dyn Navigator) {
        if next >= self.steps.len() {
            self.stop();
            return;
        }

        // The step being left may declare a navigation that must happen
        // before the next target exists.
        if let Some(leaving) = next.checked_sub(1).and_then(|i| self.steps.get(i)) {
            if let Some(transition) = &leaving.transition {
                let destination = format!("{}{}", self.base_path, transition.route);
                if navigator.current_path() != destination {
                    debug!(to = %destination, "navigating before next step");
                    navigator.navigate(&destination);
                }
            }
        }

        self.pending = Some(PendingAdvance {
            next_index: next,
            generation: self.generation,
            due_at: now + self.advance_delay,
        });
    }

    /// Drive the deferred continuation. Call once per event-loop iteration.
    ///
    /// A due advance whose generation no longer matches is discarded. When
    /// the target is present the transition commits; when it is missing the
    /// step is skipped by scheduling an advance to the following index, so a
    /// chain of unreachable steps terminates at `Stopped` after at most
    /// `steps.len()` skips.
    pub fn tick(&mut self, now: Instant, page: &mut dyn Page, navigator: &mut dyn Navigator) {
        let Some(pending) = self.pending else {
            return;
        };
        if pending.generation != self.generation {
            self.pending = None;
            return;
        }
        if now < pending.due_at {
            return;
        }
        self.pending = None;

        let target = &self.steps[pending.next_index].target;
        match page.locate(target) {
            Some(region) => {
                page.scroll_into_view(region);
                self.state = TourState {
                    running: true,
                    step_index: pending.next_index,
                };
                self.generation += 1;
                debug!(step = pending.next_index, "tour advanced");
            }
            None => {
                warn!(selector = %target, step = pending.next_index, "tour target not found, skipping step");
                self.advance_to(pending.next_index + 1, now, navigator);
            }
        }
    }
}
