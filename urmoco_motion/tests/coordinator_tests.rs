//! End-to-end coordinator tests against the simulation arm.
//!
//! Timing-sensitive tests use intervals wide enough (tens of ms) that
//! scheduler jitter cannot flip their outcome.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use urmoco_common::types::{Axis, AxisScale, NUM_AXES, Pose};
use urmoco_hal::{ArmCommand, SimHandle, SimulationArm};
use urmoco_motion::coordinator::{Coordinator, CoordinatorPhase, MotionParams, MoveOutcome};

fn params(admit_ms: u64, settle_ms: u64) -> MotionParams {
    MotionParams {
        speed: 0.1,
        acceleration: 0.1,
        admit_interval: Duration::from_millis(admit_ms),
        settle_delay: Duration::from_millis(settle_ms),
    }
}

fn build(initial: Pose, params: MotionParams) -> (Arc<Coordinator<SimulationArm>>, SimHandle) {
    let arm = SimulationArm::new(initial);
    let handle = arm.handle();
    let scale = AxisScale::new([1000.0; NUM_AXES]).unwrap();
    let coordinator = Coordinator::new(arm, scale, params).unwrap();
    handle.clear();
    (Arc::new(coordinator), handle)
}

#[test]
fn rate_limited_move_executes_latest_target() {
    let (coordinator, handle) = build(Pose::default(), params(30, 10));

    coordinator.set_target_axis(0, 5).unwrap();
    let outcome = coordinator.request_move(false).unwrap();
    assert_eq!(outcome, MoveOutcome::Executed);
    assert_eq!(coordinator.phase(), CoordinatorPhase::Idle);

    let moves = handle.moves();
    assert_eq!(moves.len(), 1);
    let ArmCommand::MoveLinear { target, .. } = &moves[0] else {
        panic!("expected a move");
    };
    assert!((target.0[0] - 0.005).abs() < 1e-12);
}

#[test]
fn concurrent_requests_coalesce_into_one_move() {
    // Settle window wide enough for the second request to land inside it.
    let (coordinator, handle) = build(Pose::default(), params(500, 150));

    coordinator.set_target_axis(1, 10).unwrap();
    let worker = {
        let coordinator = Arc::clone(&coordinator);
        thread::spawn(move || coordinator.request_move(false).unwrap())
    };

    // Land a second request mid-settle: update the target, ask again.
    thread::sleep(Duration::from_millis(50));
    coordinator.set_target_axis(1, 20).unwrap();
    let second = coordinator.request_move(false).unwrap();
    assert_eq!(second, MoveOutcome::Coalesced);

    assert_eq!(worker.join().unwrap(), MoveOutcome::Executed);

    // Exactly one physical move, reflecting the later target.
    let moves = handle.moves();
    assert_eq!(moves.len(), 1);
    let ArmCommand::MoveLinear { target, .. } = &moves[0] else {
        panic!("expected a move");
    };
    assert!((target.0[1] - 0.020).abs() < 1e-12, "got {}", target.0[1]);
}

#[test]
fn second_admission_waits_for_refill() {
    let (coordinator, handle) = build(Pose::default(), params(80, 0));

    coordinator.set_target_axis(0, 1).unwrap();
    coordinator.request_move(false).unwrap();

    // The bucket is now empty; the next admission must wait a full interval.
    let start = Instant::now();
    coordinator.set_target_axis(0, 2).unwrap();
    coordinator.request_move(false).unwrap();
    let elapsed = start.elapsed();

    assert!(
        elapsed >= Duration::from_millis(75),
        "second move admitted after only {elapsed:?}"
    );
    assert_eq!(handle.moves().len(), 2);
}

#[test]
fn direct_move_skips_admission() {
    let (coordinator, handle) = build(Pose::default(), params(60_000, 0));

    // Drain the bucket with one rate-limited move.
    coordinator.set_target_axis(0, 1).unwrap();
    coordinator.request_move(false).unwrap();

    // A direct move still runs immediately.
    let start = Instant::now();
    coordinator.set_target_axis(0, 2).unwrap();
    coordinator.request_move(true).unwrap();
    assert!(start.elapsed() < Duration::from_secs(5));
    assert_eq!(handle.moves().len(), 2);
}

#[test]
fn stop_axis_overrides_stale_target() {
    let (coordinator, handle) = build(Pose::default(), params(30, 0));

    // The arm was moved externally (freedrive); the cached target is stale.
    coordinator.set_target_axis(2, 50).unwrap();
    handle.set_pose(Pose([0.0, 0.0, 0.012, 0.0, 0.0, 0.0]));
    handle.clear();

    coordinator.stop(Some(2)).unwrap();

    // Target snapped to the arm's true position, affirmed with one move.
    assert_eq!(coordinator.target().get(Axis::new(2).unwrap()), 12);
    let moves = handle.moves();
    assert_eq!(moves.len(), 1);
    let ArmCommand::MoveLinear { target, .. } = &moves[0] else {
        panic!("expected a move");
    };
    assert!((target.0[2] - 0.012).abs() < 1e-12);
}

#[test]
fn recalibration_survives_subsequent_moves() {
    let initial = Pose([0.3, 0.0, 0.0, 0.0, 0.0, 0.0]);
    let (coordinator, handle) = build(initial, params(30, 0));

    // Move 25 steps out on X, then declare that spot the new zero.
    coordinator.set_target_axis(0, 25).unwrap();
    coordinator.request_move(true).unwrap();
    coordinator.zero_axis_origin(0).unwrap();
    assert_eq!(coordinator.read_current_axis_position().unwrap().0[0], 0);

    // The unchanged target (25) now means 25 steps past the NEW origin.
    coordinator.request_move(true).unwrap();
    assert!((handle.pose().0[0] - 0.350).abs() < 1e-12);
}

#[test]
fn freedrive_then_stop_resynchronizes() {
    let (coordinator, handle) = build(Pose::default(), params(30, 0));

    coordinator.enable_freedrive(true).unwrap();
    handle.set_pose(Pose([0.0, -0.007, 0.0, 0.0, 0.0, 0.0]));
    coordinator.enable_freedrive(false).unwrap();

    coordinator.stop(Some(1)).unwrap();
    assert_eq!(coordinator.target().get(Axis::new(1).unwrap()), -7);
    assert_eq!(coordinator.read_current_axis_position().unwrap().0[1], -7);
}
