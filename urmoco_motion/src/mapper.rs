//! Pure bidirectional conversion between raw arm poses and protocol-space
//! integer step positions.
//!
//! `steps = round((pose − origin) * scale)` and
//! `pose = steps / scale + origin`, element-wise. Rounding is half away
//! from zero (`f64::round`): 0.5 steps becomes 1, −0.5 becomes −1.
//!
//! `to_steps(to_pose(p)) == p` holds exactly for every integer step
//! position `p`; the reverse trip may differ from the raw pose by at most
//! `0.5 / scale[i]` per axis.

use urmoco_common::types::{Axis, AxisScale, NUM_AXES, Pose, StepPosition};

/// Map a raw pose into protocol step space.
pub fn to_steps(pose: &Pose, origin: &Pose, scale: &AxisScale) -> StepPosition {
    let mut steps = [0i64; NUM_AXES];
    for axis in Axis::ALL {
        let scaled = (pose.get(axis) - origin.get(axis)) * scale.factor(axis);
        steps[axis.index()] = scaled.round() as i64;
    }
    StepPosition(steps)
}

/// Map a protocol step position back into a raw pose.
pub fn to_pose(steps: &StepPosition, origin: &Pose, scale: &AxisScale) -> Pose {
    let mut components = [0.0f64; NUM_AXES];
    for axis in Axis::ALL {
        components[axis.index()] = steps.get(axis) as f64 / scale.factor(axis) + origin.get(axis);
    }
    Pose(components)
}

// ─── Tests ──────────────────────────────────────────────────────────
