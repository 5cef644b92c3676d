//! Arm driver trait and error types.
//!
//! This module defines:
//! - `ArmDriver` trait - Interface for pluggable arm backends
//! - `DriverError` enum - Error types for driver operations
//!
//! The motion coordinator is the single logical owner of an `ArmDriver`
//! handle and serializes all access to it behind one lock.

use crate::types::Pose;
use thiserror::Error;

/// Error types for arm driver operations.
#[derive(Debug, Clone, Error)]
pub enum DriverError {
    /// Transport / connection loss to the arm.
    #[error("hardware communication error: {0}")]
    Communication(String),

    /// Requested pose is outside the arm's safety envelope.
    #[error("motion rejected by the arm: {0}")]
    Rejected(String),
}

/// Trait defining the control surface of a 6-axis arm.
///
/// # Contracts
///
/// - `move_linear` with `wait = true` blocks until the move completes. The
///   move primitive is atomic: it either runs to completion or reports
///   failure before motion begins. Mid-motion transport loss is a
///   hardware-emergency case the driver itself must surface.
/// - `get_pose` is read-only and has no side effects on the arm.
/// - No call may be issued from two call sites simultaneously; callers
///   must serialize access.
pub trait ArmDriver: Send {
    /// Read the arm's current Cartesian pose.
    fn get_pose(&mut self) -> Result<Pose, DriverError>;

    /// Issue a linear move to `target` at the given speed (m/s) and
    /// acceleration (m/s²). Blocks until completion when `wait` is set.
    fn move_linear(
        &mut self,
        target: Pose,
        speed: f64,
        acceleration: f64,
        wait: bool,
    ) -> Result<(), DriverError>;

    /// Unconditional stop of all axes.
    fn stop_all(&mut self) -> Result<(), DriverError>;

    /// Set the tool-center-point offset.
    fn set_tool_center_point(&mut self, offset: Pose) -> Result<(), DriverError>;

    /// Set the payload mass (kg) and center of gravity (m, tool frame).
    fn set_payload(&mut self, mass_kg: f64, cog: [f64; 3]) -> Result<(), DriverError>;

    /// Enable or disable freedrive (manual positioning) mode.
    fn set_freedrive(&mut self, enabled: bool) -> Result<(), DriverError>;
}
