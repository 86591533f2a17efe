use cadence_core::{act, wait_for_frames, wait_for_time, BoxedCommand, CommandError, CommandScheduler};
use cadence_test_fixtures::{CallLog, Counter};

fn wait(duration: f64) -> BoxedCommand {
    wait_for_time(duration).unwrap()
}

#[test]
fn runs_slots_in_order_added() {
    let scheduler = CommandScheduler::new();
    let log = CallLog::new();
    for label in ["a", "b", "c"] {
        scheduler.add([act(log.recorder(label))]);
    }
    scheduler.update(1.0).unwrap();
    assert_eq!(log.entries(), ["a", "b", "c"]);
}

#[test]
fn runs_slots_in_parallel() {
    let scheduler = CommandScheduler::new();
    let log = CallLog::new();
    scheduler.add([wait(1.0), act(log.recorder("a"))]);
    scheduler.add([wait(2.0), act(log.recorder("b"))]);
    scheduler.add([wait(3.0), act(log.recorder("c"))]);

    scheduler.update(1.0).unwrap();
    assert_eq!(log.entries(), ["a"]);
    scheduler.update(1.0).unwrap();
    assert_eq!(log.entries(), ["a", "b"]);
    scheduler.update(1.0).unwrap();
    assert_eq!(log.entries(), ["a", "b", "c"]);
    assert!(scheduler.is_empty());
}

#[test]
fn negative_delta_is_rejected() {
    let scheduler = CommandScheduler::new();
    assert!(matches!(
        scheduler.update(-1.0),
        Err(CommandError::InvalidDeltaTime { .. })
    ));
}

#[test]
fn paused_scheduler_runs_nothing() {
    let scheduler = CommandScheduler::new();
    let log = CallLog::new();
    scheduler.add([wait(1.0), act(log.recorder("a"))]);
    scheduler.set_paused(true);
    scheduler.update(1.0).unwrap();
    assert!(log.entries().is_empty());
    scheduler.set_paused(false);
    scheduler.update(1.0).unwrap();
    assert_eq!(log.entries(), ["a"]);
}

#[test]
fn slots_added_mid_update_run_in_same_pass() {
    let scheduler = CommandScheduler::new();
    let count = Counter::new();
    let (handle, inner) = (scheduler.clone(), count.clone());
    scheduler.add([act(move || {
        handle.add([act(inner.incrementer())]);
    })]);
    scheduler.update(0.0).unwrap();
    assert_eq!(count.get(), 1);
    assert!(scheduler.is_empty());
}

#[test]
fn unfinished_slots_keep_their_order() {
    let scheduler = CommandScheduler::new();
    let log = CallLog::new();
    scheduler.add([act(log.recorder("x"))]);
    scheduler.add([wait_for_frames(1).unwrap(), act(log.recorder("a"))]);
    scheduler.add([act(log.recorder("y"))]);
    scheduler.add([wait_for_frames(1).unwrap(), act(log.recorder("b"))]);

    scheduler.update(0.0).unwrap();
    assert_eq!(scheduler.len(), 2);
    scheduler.update(0.0).unwrap();
    assert_eq!(log.entries(), ["x", "y", "a", "b"]);
    assert!(scheduler.is_empty());
}
