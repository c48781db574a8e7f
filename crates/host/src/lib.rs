//! Host Crate - Execution Environment Primitives
//!
//! This crate provides the narrow host-environment surface the session
//! subsystem depends on:
//! - Clock abstraction (wall-clock reads, swappable for tests)
//! - Cancellable one-shot timers
//! - Resume events (application became visible / regained focus)

pub mod clock;
pub mod resume;
pub mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use resume::{ResumeEvent, resume_channel};
pub use timer::{CancelHandle, spawn_after};
