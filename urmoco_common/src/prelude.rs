//! Common re-exports for convenience.

pub use crate::config::{BridgeConfig, ConfigError, load_config, load_config_from_str};
pub use crate::hal::{ArmDriver, DriverError};
pub use crate::types::{Axis, AxisOutOfRange, AxisScale, NUM_AXES, Pose, StepPosition};
