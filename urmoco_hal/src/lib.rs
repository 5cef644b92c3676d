//! urmoco HAL — arm driver implementations.
//!
//! The physical arm transport lives outside this workspace; what ships here
//! is the [`sim::SimulationArm`], a software arm for development and
//! testing. It implements the same [`urmoco_common::hal::ArmDriver`] trait
//! a physical backend would.

pub mod sim;

pub use sim::{ArmCommand, SimHandle, SimulationArm};
