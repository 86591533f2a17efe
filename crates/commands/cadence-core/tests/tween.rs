use approx::assert_relative_eq;
use cadence_core::tween::{
    change_from, change_from_offset, change_to, change_to_offset, oscillate, pulsate_scale,
    scale_by, scale_from,
};
use cadence_core::{BoxedCommand, CommandError, CommandOperation, CommandQueue, Ref};

type TweenFn = fn(&Ref<f64>, f64, f64, Option<cadence_core::Ease>) -> Result<BoxedCommand, CommandError>;

/// Value right after the tween starts, and after it has run its full duration.
fn endpoints(tween: TweenFn, initial: f64, arg: f64) -> (f64, f64) {
    let start = {
        let value = Ref::create(initial);
        let queue = CommandQueue::new();
        queue.push(tween(&value, arg, 3.0, None).unwrap());
        queue.process();
        value.get()
    };
    let end = {
        let value = Ref::create(initial);
        let queue = CommandQueue::new();
        queue.push(tween(&value, arg, 3.0, None).unwrap());
        queue.update(3.0, CommandOperation::Normal).unwrap();
        value.get()
    };
    (start, end)
}

#[test]
fn change_to_runs_from_current_to_target() {
    assert_eq!(endpoints(change_to, 3.0, 10.0), (3.0, 10.0));
    assert_eq!(endpoints(change_to, 0.0, 10.0).1, 10.0);
}

#[test]
fn change_from_runs_from_start_back_to_current() {
    assert_eq!(endpoints(change_from, 3.0, 10.0), (10.0, 3.0));
}

#[test]
fn change_to_offset_adds_offset() {
    assert_eq!(endpoints(change_to_offset, 3.0, 10.0), (3.0, 13.0));
}

#[test]
fn change_from_offset_returns_to_start() {
    assert_eq!(endpoints(change_from_offset, 3.0, 10.0), (13.0, 3.0));
}

#[test]
fn scale_by_multiplies() {
    assert_eq!(endpoints(scale_by, 3.0, 2.0), (3.0, 6.0));
}

#[test]
fn scale_from_returns_to_start() {
    assert_eq!(endpoints(scale_from, 3.0, 2.0), (6.0, 3.0));
}

#[test]
fn change_to_interpolates_midway() {
    let value = Ref::create(0.0);
    let queue = CommandQueue::new();
    queue.push(change_to(&value, 100.0, 1.0, None).unwrap());
    queue.update(0.25, CommandOperation::Normal).unwrap();
    assert_relative_eq!(value.get(), 25.0);
}

#[test]
fn oscillate_swings_and_settles() {
    let value = Ref::create(5.0);
    let queue = CommandQueue::new();
    queue.push(oscillate(&value, 2.0, 4.0, None).unwrap());
    queue.update(1.0, CommandOperation::Normal).unwrap();
    assert_relative_eq!(value.get(), 7.0);
    queue.update(2.0, CommandOperation::Normal).unwrap();
    assert_relative_eq!(value.get(), 3.0);
    queue.update(1.0, CommandOperation::Normal).unwrap();
    assert_relative_eq!(value.get(), 5.0, epsilon = 1e-9);
}

#[test]
fn pulsate_scale_peaks_then_returns() {
    let value = Ref::create(2.0);
    let queue = CommandQueue::new();
    queue.push(pulsate_scale(&value, 0.5, 2.0).unwrap());
    queue.update(1.0, CommandOperation::Normal).unwrap();
    assert_relative_eq!(value.get(), 3.0);
    assert!(queue.update(1.0, CommandOperation::Normal).unwrap());
    assert_relative_eq!(value.get(), 2.0);
}

#[test]
fn tweens_can_be_fast_forwarded() {
    let value = Ref::create(1.0);
    let queue = CommandQueue::new();
    queue.push(scale_by(&value, 4.0, 10.0, None).unwrap());
    queue.run_to_end().unwrap();
    assert_eq!(value.get(), 4.0);
}
