//! Motion state: reference origin, axis scale, and the current target.
//!
//! The origin is the physical pose corresponding to protocol zero,
//! snapshotted from the arm at startup and per-axis recalibratable. The
//! scale is immutable after construction. The target lives in protocol
//! step space and starts at zero (the scaled origin).

use urmoco_common::types::{Axis, AxisScale, Pose, StepPosition};

use crate::mapper;

/// Owned coordinate-mapping state for the coordinator.
#[derive(Debug, Clone)]
pub struct MotionState {
    origin: Pose,
    scale: AxisScale,
    target: StepPosition,
}

impl MotionState {
    /// Create state with the given reference origin (the arm's pose at
    /// startup). The target starts at protocol zero.
    pub fn new(origin: Pose, scale: AxisScale) -> Self {
        Self {
            origin,
            scale,
            target: StepPosition::default(),
        }
    }

    /// The most recently requested destination, in step space.
    #[inline]
    pub fn target(&self) -> StepPosition {
        self.target
    }

    /// Write one axis of the target. Step values are not range-checked;
    /// physical limits are the arm's concern.
    pub fn set_target_axis(&mut self, axis: Axis, value: i64) {
        self.target.set(axis, value);
    }

    /// The full target mapped into a raw pose, read at execution time.
    pub fn target_pose(&self) -> Pose {
        mapper::to_pose(&self.target, &self.origin, &self.scale)
    }

    /// Map an arm pose into step space under the current calibration.
    pub fn current_steps(&self, pose: &Pose) -> StepPosition {
        mapper::to_steps(pose, &self.origin, &self.scale)
    }

    /// Recalibrate protocol zero for one axis to the arm's current raw
    /// pose component, without moving the arm.
    pub fn zero_origin_axis(&mut self, axis: Axis, raw: f64) {
        self.origin.set(axis, raw);
    }

    /// Shift the calibration point for one axis by `delta` raw units.
    pub fn offset_origin_axis(&mut self, axis: Axis, delta: f64) {
        let shifted = self.origin.get(axis) + delta;
        self.origin.set(axis, shifted);
    }

    #[inline]
    pub fn origin(&self) -> &Pose {
        &self.origin
    }

    #[inline]
    pub fn scale(&self) -> &AxisScale {
        &self.scale
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
