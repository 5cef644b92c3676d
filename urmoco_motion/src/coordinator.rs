//! Motion coordinator: the single logical owner of arm access.
//!
//! Requests may be submitted concurrently from multiple dispatch threads,
//! but only one physical move is ever in flight: the driver handle sits
//! behind one mutex (the single-slot execution lock), and an admission
//! gate enforces at-most-one pending rate-limited move.
//!
//! A non-direct move passes two suspension points before executing: the
//! token-bucket wait (one admission per `admit_interval`) and a fixed
//! `settle_delay`. Further non-direct requests arriving while a move is
//! pending coalesce into it — the pending move reads the *latest* target
//! at execution time, so rapid axis updates fold into a single move.
//!
//! A `direct` move (internal corrective moves, per-axis stop) bypasses the
//! gate entirely and can run while a rate-limited move is still pending
//! admission.

use std::thread;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, info, warn};
use urmoco_common::config::BridgeConfig;
use urmoco_common::hal::ArmDriver;
use urmoco_common::types::{Axis, AxisScale, StepPosition};

use crate::error::MotionError;
use crate::limiter::TokenBucket;
use crate::state::MotionState;

/// Observable phase of the coordinator cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorPhase {
    /// No move pending or in flight.
    Idle,
    /// A rate-limited move is awaiting admission or settling.
    RateLimited,
    /// A blocking move is in flight on the driver.
    Moving,
}

/// Result of a move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// A move was issued and ran to completion.
    Executed,
    /// Folded into an already-pending rate-limited move.
    Coalesced,
}

/// Motion execution parameters, fixed at construction.
#[derive(Debug, Clone)]
pub struct MotionParams {
    /// Linear move speed [m/s].
    pub speed: f64,
    /// Linear move acceleration [m/s²].
    pub acceleration: f64,
    /// Minimum interval between admitted rate-limited moves.
    pub admit_interval: Duration,
    /// Pause between admission and execution of a rate-limited move.
    pub settle_delay: Duration,
}

impl MotionParams {
    pub fn from_config(config: &BridgeConfig) -> Self {
        Self {
            speed: config.robot.speed,
            acceleration: config.robot.acceleration,
            admit_interval: config.motion.admit_interval(),
            settle_delay: config.motion.settle_delay(),
        }
    }
}

#[derive(Debug)]
struct Gate {
    pending: bool,
    phase: CoordinatorPhase,
}

/// The stateful motion core.
pub struct Coordinator<D: ArmDriver> {
    driver: Mutex<D>,
    state: Mutex<MotionState>,
    gate: Mutex<Gate>,
    limiter: Mutex<TokenBucket>,
    params: MotionParams,
}

impl<D: ArmDriver> Coordinator<D> {
    /// Take ownership of the driver and snapshot the arm's current pose as
    /// the reference origin (protocol zero).
    pub fn new(mut driver: D, scale: AxisScale, params: MotionParams) -> Result<Self, MotionError> {
        let origin = driver.get_pose()?;
        info!(?origin, "reference origin captured");
        Ok(Self {
            driver: Mutex::new(driver),
            state: Mutex::new(MotionState::new(origin, scale)),
            gate: Mutex::new(Gate {
                pending: false,
                phase: CoordinatorPhase::Idle,
            }),
            limiter: Mutex::new(TokenBucket::new(1, params.admit_interval)),
            params,
        })
    }

    /// Current phase (observability only).
    pub fn phase(&self) -> CoordinatorPhase {
        self.gate.lock().phase
    }

    /// The most recently requested target, in step space.
    pub fn target(&self) -> StepPosition {
        self.state.lock().target()
    }

    /// Write one axis of the target position.
    pub fn set_target_axis(&self, axis: u8, value: i64) -> Result<(), MotionError> {
        let axis = Axis::new(axis)?;
        debug!(%axis, value, "target updated");
        self.state.lock().set_target_axis(axis, value);
        Ok(())
    }

    /// Execute a move to the current target.
    ///
    /// `direct` moves run immediately. Rate-limited moves pass the
    /// admission gate and the settle delay first; if another rate-limited
    /// move is already pending, this request coalesces into it.
    pub fn request_move(&self, direct: bool) -> Result<MoveOutcome, MotionError> {
        if direct {
            self.set_phase(CoordinatorPhase::Moving);
            let result = self.execute_move();
            self.set_phase(CoordinatorPhase::Idle);
            result?;
            return Ok(MoveOutcome::Executed);
        }

        {
            let mut gate = self.gate.lock();
            if gate.pending {
                debug!("move request coalesced into pending move");
                return Ok(MoveOutcome::Coalesced);
            }
            gate.pending = true;
            gate.phase = CoordinatorPhase::RateLimited;
        }

        // Suspension point 1: admission (one token per admit_interval).
        self.limiter.lock().acquire();
        // Suspension point 2: settle, letting rapid target updates land.
        thread::sleep(self.params.settle_delay);

        {
            let mut gate = self.gate.lock();
            gate.pending = false;
            gate.phase = CoordinatorPhase::Moving;
        }
        let result = self.execute_move();
        self.set_phase(CoordinatorPhase::Idle);
        result?;
        Ok(MoveOutcome::Executed)
    }

    /// Stop the arm.
    ///
    /// Without an axis: one unconditional stop of all axes; the target is
    /// left untouched. With an axis: snap that axis' target to the arm's
    /// actual current position and issue a synchronous direct move to
    /// re-affirm the halt position, since the raw stop command does not
    /// keep the cached target consistent with the arm's resting pose.
    pub fn stop(&self, axis: Option<u8>) -> Result<(), MotionError> {
        match axis {
            None => {
                warn!("emergency stop, all axes");
                self.driver.lock().stop_all()?;
                Ok(())
            }
            Some(index) => {
                let axis = Axis::new(index)?;
                let pose = self.driver.lock().get_pose()?;
                {
                    let mut state = self.state.lock();
                    let current = state.current_steps(&pose);
                    info!(%axis, position = current.get(axis), "stop: snapping target to current position");
                    state.set_target_axis(axis, current.get(axis));
                }
                self.request_move(true)?;
                Ok(())
            }
        }
    }

    /// Enable or disable freedrive mode (operator-invoked, never
    /// rate-limited).
    pub fn enable_freedrive(&self, enabled: bool) -> Result<(), MotionError> {
        info!(enabled, "freedrive");
        self.driver.lock().set_freedrive(enabled)?;
        Ok(())
    }

    /// Recalibrate protocol zero for one axis to the arm's current
    /// position, without moving the arm.
    pub fn zero_axis_origin(&self, axis: u8) -> Result<(), MotionError> {
        let axis = Axis::new(axis)?;
        let pose = self.driver.lock().get_pose()?;
        info!(%axis, raw = pose.get(axis), "zeroing axis origin");
        self.state.lock().zero_origin_axis(axis, pose.get(axis));
        Ok(())
    }

    /// Shift the calibration point for one axis by `delta` raw units,
    /// without querying the arm.
    pub fn offset_axis_origin(&self, axis: u8, delta: f64) -> Result<(), MotionError> {
        let axis = Axis::new(axis)?;
        info!(%axis, delta, "offsetting axis origin");
        self.state.lock().offset_origin_axis(axis, delta);
        Ok(())
    }

    /// Read the arm's current position in step space.
    pub fn read_current_axis_position(&self) -> Result<StepPosition, MotionError> {
        let pose = self.driver.lock().get_pose()?;
        Ok(self.state.lock().current_steps(&pose))
    }

    /// Unscale the latest target and issue one blocking linear move.
    fn execute_move(&self) -> Result<(), MotionError> {
        // Read the target at execution time, not request time.
        let pose = self.state.lock().target_pose();
        debug!(?pose, "executing move");
        self.driver
            .lock()
            .move_linear(pose, self.params.speed, self.params.acceleration, true)?;
        Ok(())
    }

    fn set_phase(&self, phase: CoordinatorPhase) {
        self.gate.lock().phase = phase;
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
