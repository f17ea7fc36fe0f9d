//! Rewind animation: a fixed-length playback from the finish time back to
//! the start time.
//!
//! - `timing` - pure interpolation (progress, lerp, one step of a run)
//! - `controller` - the state machine the presentation layer drives
//!
//! # Usage
//!
//! ```ignore
//! use std::time::Instant;
//! use rewind_core::rewind::{RewindController, StartOutcome};
//!
//! let mut controller = RewindController::default();
//! let mut ticket = match controller.start(Instant::now()) {
//!     StartOutcome::Started { ticket, .. } => Some(ticket),
//!     StartOutcome::AlreadyRunning => None,
//! };
//!
//! // Once per frame
//! while let Some(current) = ticket {
//!     let outcome = controller.tick(current, Instant::now());
//!     ticket = outcome.next;
//! }
//! ```

pub mod controller;
pub mod timing;

pub use controller::{
    FrameTicket, RewindController, RewindEvent, RewindInputs, RewindState, StartOutcome,
    TickOutcome,
};
pub use timing::{AnimationRun, Sample, Step, DEFAULT_REWIND_WINDOW};
