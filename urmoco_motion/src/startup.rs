//! One-shot arm setup.
//!
//! Applies the configured tool-center-point offset and payload, then
//! pauses for `setup_settle` so the controller finishes absorbing the new
//! parameters before any motion request is accepted. Runs once, before
//! the coordinator takes ownership of the driver.

use std::thread;

use tracing::info;
use urmoco_common::config::BridgeConfig;
use urmoco_common::hal::ArmDriver;

use crate::error::MotionError;

/// Apply tool and payload configuration to the arm.
pub fn initialize_arm<D: ArmDriver>(
    driver: &mut D,
    config: &BridgeConfig,
) -> Result<(), MotionError> {
    let tool = &config.robot.tool;
    info!(
        tcp_offset = ?tool.tcp_offset,
        payload_mass = tool.payload_mass,
        "applying tool configuration"
    );
    driver.set_tool_center_point(config.tcp_offset())?;
    driver.set_payload(tool.payload_mass, tool.payload_cog)?;

    let settle = config.motion.setup_settle();
    info!(?settle, "arm setup complete, settling");
    thread::sleep(settle);
    Ok(())
}

// ─── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use urmoco_common::config::load_config_from_str;
    use urmoco_common::hal::DriverError;
    use urmoco_common::types::Pose;
    use urmoco_hal::{ArmCommand, SimulationArm};

    fn test_config() -> BridgeConfig {
        load_config_from_str(
            r#"
[robot]
host = "192.168.1.10"

[robot.tool]
tcp_offset = [0.0, 0.0, 0.1, 0.0, 0.0, 0.0]
payload_mass = 2.0
payload_cog = [0.0, 0.1, 0.0]

[motion]
setup_settle = 0.0

[[axes]]
name = "X"
scaling_factor = 1000.0
[[axes]]
name = "Y"
scaling_factor = 1000.0
[[axes]]
name = "Z"
scaling_factor = 1000.0
[[axes]]
name = "RX"
scaling_factor = 1000.0
[[axes]]
name = "RY"
scaling_factor = 1000.0
[[axes]]
name = "RZ"
scaling_factor = 1000.0
"#,
        )
        .unwrap()
    }

    #[test]
    fn applies_tool_then_payload() {
        let mut arm = SimulationArm::default();
        let handle = arm.handle();
        initialize_arm(&mut arm, &test_config()).unwrap();
        assert_eq!(
            handle.commands(),
            vec![
                ArmCommand::SetToolCenterPoint(Pose([0.0, 0.0, 0.1, 0.0, 0.0, 0.0])),
                ArmCommand::SetPayload {
                    mass_kg: 2.0,
                    cog: [0.0, 0.1, 0.0],
                },
            ]
        );
    }

    #[test]
    fn setup_failure_surfaces() {
        let mut arm = SimulationArm::default();
        let handle = arm.handle();
        handle.inject_failure(DriverError::Communication("connection reset".into()));
        let err = initialize_arm(&mut arm, &test_config()).unwrap_err();
        assert!(matches!(
            err,
            MotionError::Driver(DriverError::Communication(_))
        ));
    }
}
