//! Resume events
//!
//! Background timers are unreliable while the application is suspended, so
//! the host surfaces "became visible" and "regained focus" events as a
//! compensating revalidation trigger.

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

/// A passive trigger emitted when the application returns to the foreground.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeEvent {
    /// The application became visible again.
    BecameVisible,
    /// The application window regained input focus.
    RegainedFocus,
}

/// Channel pair the host embedding uses to deliver [`ResumeEvent`]s.
pub fn resume_channel() -> (UnboundedSender<ResumeEvent>, UnboundedReceiver<ResumeEvent>) {
    unbounded_channel()
}
