//! Simulation arm driver.
//!
//! `SimulationArm` provides a software-emulated arm for development and
//! testing without physical hardware. Moves teleport the pose to the
//! target; every issued command is recorded and inspectable through a
//! [`SimHandle`], and single-shot failures can be injected to exercise
//! error paths.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;
use urmoco_common::hal::{ArmDriver, DriverError};
use urmoco_common::types::Pose;

/// One command issued to the simulated arm, in issue order.
#[derive(Debug, Clone, PartialEq)]
pub enum ArmCommand {
    GetPose,
    MoveLinear {
        target: Pose,
        speed: f64,
        acceleration: f64,
        wait: bool,
    },
    StopAll,
    SetToolCenterPoint(Pose),
    SetPayload { mass_kg: f64, cog: [f64; 3] },
    SetFreedrive(bool),
}

#[derive(Debug, Default)]
struct SimState {
    pose: Pose,
    freedrive: bool,
    commands: Vec<ArmCommand>,
    fail_next: Option<DriverError>,
}

/// Simulated 6-axis arm implementing the `ArmDriver` trait.
pub struct SimulationArm {
    state: Arc<Mutex<SimState>>,
}

impl SimulationArm {
    /// Create a simulated arm resting at `initial_pose`.
    pub fn new(initial_pose: Pose) -> Self {
        let state = SimState {
            pose: initial_pose,
            ..Default::default()
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Inspection handle, valid after the arm is handed to a coordinator.
    pub fn handle(&self) -> SimHandle {
        SimHandle {
            state: Arc::clone(&self.state),
        }
    }

    fn check_injected(state: &mut SimState) -> Result<(), DriverError> {
        match state.fail_next.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Default for SimulationArm {
    fn default() -> Self {
        Self::new(Pose::default())
    }
}

impl ArmDriver for SimulationArm {
    fn get_pose(&mut self) -> Result<Pose, DriverError> {
        let mut state = self.state.lock();
        Self::check_injected(&mut state)?;
        state.commands.push(ArmCommand::GetPose);
        Ok(state.pose)
    }

    fn move_linear(
        &mut self,
        target: Pose,
        speed: f64,
        acceleration: f64,
        wait: bool,
    ) -> Result<(), DriverError> {
        let mut state = self.state.lock();
        Self::check_injected(&mut state)?;
        debug!(?target, speed, acceleration, wait, "sim: move_linear");
        state.commands.push(ArmCommand::MoveLinear {
            target,
            speed,
            acceleration,
            wait,
        });
        state.pose = target;
        Ok(())
    }

    fn stop_all(&mut self) -> Result<(), DriverError> {
        let mut state = self.state.lock();
        Self::check_injected(&mut state)?;
        debug!("sim: stop_all");
        state.commands.push(ArmCommand::StopAll);
        Ok(())
    }

    fn set_tool_center_point(&mut self, offset: Pose) -> Result<(), DriverError> {
        let mut state = self.state.lock();
        Self::check_injected(&mut state)?;
        debug!(?offset, "sim: set_tool_center_point");
        state.commands.push(ArmCommand::SetToolCenterPoint(offset));
        Ok(())
    }

    fn set_payload(&mut self, mass_kg: f64, cog: [f64; 3]) -> Result<(), DriverError> {
        let mut state = self.state.lock();
        Self::check_injected(&mut state)?;
        debug!(mass_kg, ?cog, "sim: set_payload");
        state.commands.push(ArmCommand::SetPayload { mass_kg, cog });
        Ok(())
    }

    fn set_freedrive(&mut self, enabled: bool) -> Result<(), DriverError> {
        let mut state = self.state.lock();
        Self::check_injected(&mut state)?;
        debug!(enabled, "sim: set_freedrive");
        state.commands.push(ArmCommand::SetFreedrive(enabled));
        state.freedrive = enabled;
        Ok(())
    }
}

/// Shared inspection handle into a [`SimulationArm`].
#[derive(Clone)]
pub struct SimHandle {
    state: Arc<Mutex<SimState>>,
}

impl SimHandle {
    /// All commands issued so far, in order.
    pub fn commands(&self) -> Vec<ArmCommand> {
        self.state.lock().commands.clone()
    }

    /// Only the `MoveLinear` commands issued so far.
    pub fn moves(&self) -> Vec<ArmCommand> {
        self.state
            .lock()
            .commands
            .iter()
            .filter(|c| matches!(c, ArmCommand::MoveLinear { .. }))
            .cloned()
            .collect()
    }

    /// Clear the command log.
    pub fn clear(&self) {
        self.state.lock().commands.clear();
    }

    /// Current simulated pose.
    pub fn pose(&self) -> Pose {
        self.state.lock().pose
    }

    /// Teleport the simulated arm (models external motion, e.g. freedrive).
    pub fn set_pose(&self, pose: Pose) {
        self.state.lock().pose = pose;
    }

    /// Whether freedrive is currently enabled.
    pub fn freedrive(&self) -> bool {
        self.state.lock().freedrive
    }

    /// Fail the next driver call with `err`, then resume normal behavior.
    pub fn inject_failure(&self, err: DriverError) {
        self.state.lock().fail_next = Some(err);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
