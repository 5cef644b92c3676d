//! urmoco Motion Coordinator
//!
//! The stateful core of the bridge: maps the control protocol's integer
//! motor-step axis space onto the arm's Cartesian pose space and executes
//! motion requests against the arm driver under a minimum inter-command
//! interval, so the hardware is never commanded faster than it can safely
//! process moves.
//!
//! - [`mapper`] - pure pose ↔ step conversion
//! - [`state`] - reference origin, axis scale, and target ownership
//! - [`limiter`] - explicit token-bucket rate limiter
//! - [`coordinator`] - admission gate, move execution, stop semantics
//! - [`startup`] - one-shot tool/payload calibration

pub mod coordinator;
pub mod error;
pub mod limiter;
pub mod mapper;
pub mod startup;
pub mod state;

pub use coordinator::{Coordinator, CoordinatorPhase, MotionParams, MoveOutcome};
pub use error::MotionError;
