//! Coordinator error type.
//!
//! Hardware-facing errors bubble up unchanged for the single triggering
//! request; there is no retry logic here. Masking a failed move behind an
//! automatic retry could desynchronize the cached target from physical
//! reality, so recovery is a process-supervision concern.

use thiserror::Error;
use urmoco_common::hal::DriverError;
use urmoco_common::types::AxisOutOfRange;

/// Error surfaced by a coordinator operation.
#[derive(Debug, Clone, Error)]
pub enum MotionError {
    /// Driver-reported failure (transport loss or rejected pose).
    #[error(transparent)]
    Driver(#[from] DriverError),

    /// Axis index outside `[0, 5]`, rejected before any hardware call.
    #[error(transparent)]
    AxisOutOfRange(#[from] AxisOutOfRange),
}
