//! Hardware abstraction layer: the arm driver trait and its error types.

pub mod driver;

pub use driver::{ArmDriver, DriverError};
