//! Fixed-size position types shared across the workspace.
//!
//! All positions are 6-element arrays: a physical [`Pose`] in the arm's
//! native units (meters / radians) or a protocol-space [`StepPosition`] in
//! integer motor steps. Axis indices are bounds-checked once at the API
//! boundary via [`Axis`]; everything past that point indexes infallibly.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of controlled axes (3 translation + 3 rotation).
pub const NUM_AXES: usize = 6;

// ─── Axis Index ─────────────────────────────────────────────────────

/// Axis index out of the valid range `[0, 5]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("axis index {0} out of range [0, 5]")]
pub struct AxisOutOfRange(pub u8);

/// A validated axis index.
///
/// Construction is the only bounds check in the position types; a held
/// `Axis` always indexes safely into a 6-element array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Axis(u8);

impl Axis {
    /// All six axes, in order.
    pub const ALL: [Axis; NUM_AXES] = [
        Axis(0),
        Axis(1),
        Axis(2),
        Axis(3),
        Axis(4),
        Axis(5),
    ];

    /// Validate a raw protocol axis index.
    pub fn new(index: u8) -> Result<Self, AxisOutOfRange> {
        if (index as usize) < NUM_AXES {
            Ok(Axis(index))
        } else {
            Err(AxisOutOfRange(index))
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── Pose ───────────────────────────────────────────────────────────

/// A Cartesian pose in the arm's native units: `[x, y, z, rx, ry, rz]`,
/// translation in meters, rotation in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pose(pub [f64; NUM_AXES]);

impl Pose {
    #[inline]
    pub fn get(&self, axis: Axis) -> f64 {
        self.0[axis.index()]
    }

    #[inline]
    pub fn set(&mut self, axis: Axis, value: f64) {
        self.0[axis.index()] = value;
    }
}

impl From<[f64; NUM_AXES]> for Pose {
    fn from(components: [f64; NUM_AXES]) -> Self {
        Pose(components)
    }
}

// ─── Step Position ──────────────────────────────────────────────────

/// A protocol-space position: integer motor steps per axis.
///
/// Steps are scaled physical units relative to the reference origin
/// (e.g. scale 1000 on a translation axis makes one step one millimeter).
/// Physical limits are the arm's concern; step values are not range-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepPosition(pub [i64; NUM_AXES]);

impl StepPosition {
    #[inline]
    pub fn get(&self, axis: Axis) -> i64 {
        self.0[axis.index()]
    }

    #[inline]
    pub fn set(&mut self, axis: Axis, value: i64) {
        self.0[axis.index()] = value;
    }
}

// ─── Axis Scale ─────────────────────────────────────────────────────

/// Invalid per-axis scaling factor.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("scaling factor for axis {axis} must be finite and positive (got {value})")]
pub struct InvalidScale {
    pub axis: usize,
    pub value: f64,
}

/// Per-axis steps-per-physical-unit factors.
///
/// Fixed at construction; every factor is finite and strictly positive,
/// so dividing by a factor is always defined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisScale([f64; NUM_AXES]);

impl AxisScale {
    pub fn new(factors: [f64; NUM_AXES]) -> Result<Self, InvalidScale> {
        for (axis, &value) in factors.iter().enumerate() {
            if !value.is_finite() || value <= 0.0 {
                return Err(InvalidScale { axis, value });
            }
        }
        Ok(AxisScale(factors))
    }

    #[inline]
    pub fn factor(&self, axis: Axis) -> f64 {
        self.0[axis.index()]
    }

    #[inline]
    pub fn factors(&self) -> &[f64; NUM_AXES] {
        &self.0
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
