//! TOML configuration loading with validation.
//!
//! Loads [`BridgeConfig`] from a TOML file once at startup. Validates:
//! axis count (exactly six), scaling factor bounds, axis name uniqueness,
//! connection address shape, and motion timing parameters. Any failure is
//! fatal; the process must not proceed with a partially valid config.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::types::{AxisScale, NUM_AXES, Pose};

// ─── Error Type ─────────────────────────────────────────────────────

/// Configuration loading/validation error.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// File I/O error.
    #[error("failed to read {path}: {detail}")]
    Io { path: String, detail: String },

    /// TOML parse error.
    #[error("failed to parse configuration: {0}")]
    Parse(String),

    /// Semantic validation error.
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

// ─── Config Structs ─────────────────────────────────────────────────

/// Complete bridge configuration, as loaded from `urmoco.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct BridgeConfig {
    pub robot: RobotConfig,
    #[serde(default)]
    pub motion: MotionConfig,
    pub axes: Vec<AxisConfig>,
}

/// Arm connection and motion parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct RobotConfig {
    /// Arm controller address (hostname or IP).
    pub host: String,
    /// Linear move speed [m/s].
    #[serde(default = "default_speed")]
    pub speed: f64,
    /// Linear move acceleration [m/s²].
    #[serde(default = "default_acceleration")]
    pub acceleration: f64,
    pub tool: ToolConfig,
}

/// Tool-center-point and payload parameters, applied once at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolConfig {
    /// TCP offset pose `[x, y, z, rx, ry, rz]` [m / rad].
    pub tcp_offset: [f64; NUM_AXES],
    /// Payload mass [kg].
    pub payload_mass: f64,
    /// Payload center of gravity `[x, y, z]` [m, tool frame].
    pub payload_cog: [f64; 3],
}

/// Motion coordinator timing parameters, in seconds.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Minimum interval between admitted rate-limited moves [s].
    pub admit_interval: f64,
    /// Pause between admission and execution of a rate-limited move [s].
    pub settle_delay: f64,
    /// Pause after TCP/payload setup before accepting requests [s].
    pub setup_settle: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            admit_interval: 3.0,
            settle_delay: 2.0,
            setup_settle: 2.0,
        }
    }
}

impl MotionConfig {
    pub fn admit_interval(&self) -> Duration {
        Duration::from_secs_f64(self.admit_interval)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_secs_f64(self.settle_delay)
    }

    pub fn setup_settle(&self) -> Duration {
        Duration::from_secs_f64(self.setup_settle)
    }
}

/// One protocol axis.
#[derive(Debug, Clone, Deserialize)]
pub struct AxisConfig {
    pub name: String,
    /// Steps per physical unit (e.g. 1000.0 makes one step one millimeter
    /// on a translation axis).
    pub scaling_factor: f64,
}

// ─── Loading Functions ──────────────────────────────────────────────

/// Load and validate the bridge configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<BridgeConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.display().to_string(),
        detail: e.to_string(),
    })?;
    load_config_from_str(&raw)
}

/// Load and validate the bridge configuration from a TOML string
/// (also the test entry point).
pub fn load_config_from_str(raw: &str) -> Result<BridgeConfig, ConfigError> {
    let config: BridgeConfig =
        toml::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
    config.validate()?;
    debug!(
        host = %config.robot.host,
        axes = config.axes.len(),
        "bridge configuration loaded"
    );
    Ok(config)
}

impl BridgeConfig {
    /// Run all validation rules.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let host = self.robot.host.trim();
        if host.is_empty() || host.chars().any(char::is_whitespace) {
            return Err(ConfigError::Validation(format!(
                "malformed robot.host {:?}",
                self.robot.host
            )));
        }
        if !(self.robot.speed.is_finite() && self.robot.speed > 0.0) {
            return Err(ConfigError::Validation(format!(
                "robot.speed must be positive (got {})",
                self.robot.speed
            )));
        }
        if !(self.robot.acceleration.is_finite() && self.robot.acceleration > 0.0) {
            return Err(ConfigError::Validation(format!(
                "robot.acceleration must be positive (got {})",
                self.robot.acceleration
            )));
        }
        if !(self.robot.tool.payload_mass.is_finite() && self.robot.tool.payload_mass >= 0.0) {
            return Err(ConfigError::Validation(format!(
                "robot.tool.payload_mass must be non-negative (got {})",
                self.robot.tool.payload_mass
            )));
        }

        let m = &self.motion;
        if !(m.admit_interval.is_finite() && m.admit_interval > 0.0) {
            return Err(ConfigError::Validation(format!(
                "motion.admit_interval must be positive (got {})",
                m.admit_interval
            )));
        }
        for (name, value) in [("settle_delay", m.settle_delay), ("setup_settle", m.setup_settle)]
        {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Validation(format!(
                    "motion.{name} must be non-negative (got {value})"
                )));
            }
        }

        if self.axes.len() != NUM_AXES {
            return Err(ConfigError::Validation(format!(
                "expected exactly {} axes, got {}",
                NUM_AXES,
                self.axes.len()
            )));
        }
        let mut seen = std::collections::HashSet::new();
        for ax in &self.axes {
            if !seen.insert(ax.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate axis name {:?}",
                    ax.name
                )));
            }
        }
        // Scale bounds checked by the AxisScale constructor.
        self.scale()?;
        Ok(())
    }

    /// Build the validated per-axis scale.
    pub fn scale(&self) -> Result<AxisScale, ConfigError> {
        let mut factors = [0.0; NUM_AXES];
        for (slot, ax) in factors.iter_mut().zip(&self.axes) {
            *slot = ax.scaling_factor;
        }
        AxisScale::new(factors).map_err(|e| ConfigError::Validation(e.to_string()))
    }

    /// TCP offset as a pose.
    pub fn tcp_offset(&self) -> Pose {
        Pose(self.robot.tool.tcp_offset)
    }
}

fn default_speed() -> f64 {
    0.1
}

fn default_acceleration() -> f64 {
    0.1
}

// ─── Tests ──────────────────────────────────────────────────────────
