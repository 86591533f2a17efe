use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_abs_diff_eq;
use cadence_core::{
    act, from_fn, interval, repeat, repeat_forever, wait_for_time, CommandError, CommandOperation,
    CommandQueue, CommandState,
};
use cadence_test_fixtures::{CallLog, Counter, Flag};

#[test]
fn runs_in_order_with_reentrant_push() {
    let queue = CommandQueue::new();
    let log = CallLog::new();
    let (handle, trace) = (queue.clone(), log.clone());
    queue.enqueue([
        act(move || {
            assert_eq!(trace.last(), None);
            trace.push("a");
            // a and b are already queued, so c lands behind b.
            let inner = trace.clone();
            handle.push(act(move || {
                assert_eq!(inner.last().as_deref(), Some("b"));
                inner.push("c");
            }));
        }),
        act(log.recorder("b")),
    ]);
    queue.update(1.0, CommandOperation::Normal).unwrap();
    assert_eq!(log.entries(), ["a", "b", "c"]);
}

#[test]
fn accumulates_time_across_many_updates() {
    let queue = CommandQueue::new();
    queue.push(repeat(1000, [wait_for_time(3.0).unwrap()]));
    let mut total = 0.0;
    loop {
        total += 0.1;
        if queue.update(0.1, CommandOperation::Normal).unwrap() {
            break;
        }
    }
    assert_abs_diff_eq!(total, 3000.0, epsilon = 0.005);
}

#[test]
fn pause_from_inside_a_command_stops_the_queue() {
    let queue = CommandQueue::new();
    let second = Flag::new();
    let handle = queue.clone();
    queue.enqueue([act(move || handle.set_paused(true)), act(second.setter())]);
    queue.update(1.0, CommandOperation::Normal).unwrap();
    queue.update(1.0, CommandOperation::Normal).unwrap();
    assert!(!second.get());
    queue.set_paused(false);
    queue.update(1.0, CommandOperation::Normal).unwrap();
    assert!(second.get());
}

#[test]
fn paused_queue_reports_not_done() {
    let queue = CommandQueue::new();
    queue.push(act(|| {}));
    queue.set_paused(true);
    assert!(!queue.update(1.0, CommandOperation::Normal).unwrap());
    assert_eq!(queue.len(), 1);
}

#[test]
fn fast_forward_skips_waits() {
    let queue = CommandQueue::new();
    let called = Flag::new();
    queue.enqueue([wait_for_time(100.0).unwrap(), act(called.setter())]);
    queue.update(1.0, CommandOperation::FastForward).unwrap();
    assert!(called.get());
}

#[test]
fn run_to_end_drains() {
    let queue = CommandQueue::new();
    let called = Flag::new();
    queue.enqueue([wait_for_time(100.0).unwrap(), act(called.setter())]);
    assert!(queue.run_to_end().unwrap());
    assert!(called.get());
    assert!(queue.is_empty());
}

#[test]
fn negative_or_nan_delta_is_rejected() {
    let queue = CommandQueue::new();
    assert!(matches!(
        queue.update(-1.0, CommandOperation::Normal),
        Err(CommandError::InvalidDeltaTime { .. })
    ));
    assert!(queue.update(f64::NAN, CommandOperation::Normal).is_err());
}

#[test]
fn recursive_update_fails_without_breaking_the_queue() {
    let queue = CommandQueue::new();
    let inner_result = Rc::new(RefCell::new(None));
    let (handle, slot) = (queue.clone(), inner_result.clone());
    queue.push(act(move || {
        *slot.borrow_mut() = Some(handle.update(1.0, CommandOperation::Normal));
    }));
    assert!(queue.update(1.0, CommandOperation::Normal).unwrap());

    let err = inner_result.borrow_mut().take().unwrap().unwrap_err();
    assert_eq!(err, CommandError::Reentrant { queue: queue.id() });
    assert!(!err.is_argument_error());
    assert!(!queue.is_updating());
}

#[test]
fn process_starts_next_command_without_time() {
    let queue = CommandQueue::new();
    let last_t = Rc::new(RefCell::new(-1.0));
    let sink = last_t.clone();
    queue.push(interval(move |t| *sink.borrow_mut() = t, 3.0, None).unwrap());
    queue.process();
    assert_eq!(*last_t.borrow(), 0.0);
}

#[test]
fn process_is_safe_while_updating() {
    let queue = CommandQueue::new();
    let handle = queue.clone();
    queue.push(
        interval(
            move |_| {
                handle.process();
            },
            3.0,
            None,
        )
        .unwrap(),
    );
    assert!(queue.update(1.0, CommandOperation::Normal).is_ok());
}

#[test]
fn time_is_stable_over_long_runs() {
    let queue = CommandQueue::new();
    let count = Counter::new();
    queue.push(repeat_forever([
        wait_for_time(20.0).unwrap(),
        act(count.incrementer()),
    ]));
    for _ in 0..100_000 {
        queue.update(0.1, CommandOperation::Normal).unwrap();
    }
    assert_eq!(count.get(), 500);
}

#[test]
fn accumulation_tracks_in_flight_command() {
    let queue = CommandQueue::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    queue.push(from_fn(move |delta_time, _| {
        sink.borrow_mut().push(delta_time);
        if delta_time >= 1.0 {
            CommandState::complete(delta_time - 1.0)
        } else {
            CommandState::running(delta_time)
        }
    }));
    queue.update(0.25, CommandOperation::Normal).unwrap();
    assert_eq!(queue.delta_time_accumulation(), 0.25);
    queue.update(0.75, CommandOperation::Normal).unwrap();
    assert_eq!(*seen.borrow(), [0.25, 1.0]);
    assert_eq!(queue.delta_time_accumulation(), 0.0);
}

#[test]
fn enqueue_chains() {
    let queue = CommandQueue::new();
    let count = Counter::new();
    queue
        .push(act(count.incrementer()))
        .enqueue([act(count.incrementer()), act(count.incrementer())]);
    assert_eq!(queue.len(), 3);
    queue.process();
    assert_eq!(count.get(), 3);
}
