//! urmoco Common Library
//!
//! Shared types and configuration loading for the urmoco workspace — the
//! bridge between a stop-motion animation control protocol (integer motor
//! steps per axis) and a 6-axis robotic arm speaking Cartesian linear moves.
//!
//! # Module Structure
//!
//! - [`types`] - Fixed-size pose / step-position / axis types
//! - [`hal`] - Arm driver trait and driver error types
//! - [`config`] - TOML configuration loading and validation
//! - [`prelude`] - Common re-exports for convenience

pub mod config;
pub mod hal;
pub mod prelude;
pub mod types;
