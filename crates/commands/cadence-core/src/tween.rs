//! Numeric tweens over `Ref<f64>`.
//!
//! Every tween reads its endpoints from the ref when it starts (not when it
//! is built), then interpolates between them with [`interval`].

use std::cell::Cell;
use std::f64::consts::TAU;
use std::rc::Rc;

use crate::combinators::{interval, sequence};
use crate::command::{act, BoxedCommand};
use crate::ease::{smooth, Ease};
use crate::error::CommandError;
use crate::reference::Ref;

/// Captures `(start, end)` from the ref's current value, then tweens from
/// `start` to `end`.
fn lerp_tween<E>(
    value: &Ref<f64>,
    duration: f64,
    ease: Option<Ease>,
    endpoints: E,
) -> Result<BoxedCommand, CommandError>
where
    E: Fn(f64) -> (f64, f64) + 'static,
{
    let span = Rc::new(Cell::new((0.0, 0.0)));
    let capture = {
        let span = Rc::clone(&span);
        let value = value.clone();
        act(move || span.set(endpoints(value.get())))
    };
    let value = value.clone();
    let tween = interval(
        move |t| {
            let (start, end) = span.get();
            value.set((end - start) * t + start);
        },
        duration,
        ease,
    )?;
    Ok(sequence([capture, tween]))
}

/// Tweens from the current value to `target`.
///
/// ```
/// use cadence_core::{tween, CommandOperation, CommandQueue, Ref};
///
/// let value = Ref::create(0.0);
/// let queue = CommandQueue::new();
/// queue.push(tween::change_to(&value, 100.0, 1.0, None).unwrap());
/// queue.update(0.25, CommandOperation::Normal).unwrap();
/// assert_eq!(value.get(), 25.0);
/// ```
pub fn change_to(
    value: &Ref<f64>,
    target: f64,
    duration: f64,
    ease: Option<Ease>,
) -> Result<BoxedCommand, CommandError> {
    lerp_tween(value, duration, ease, move |current| (current, target))
}

/// Jumps to `start`, then tweens back to the value held when the tween began.
pub fn change_from(
    value: &Ref<f64>,
    start: f64,
    duration: f64,
    ease: Option<Ease>,
) -> Result<BoxedCommand, CommandError> {
    lerp_tween(value, duration, ease, move |current| (start, current))
}

/// Tweens from the current value to the current value plus `offset`.
pub fn change_to_offset(
    value: &Ref<f64>,
    offset: f64,
    duration: f64,
    ease: Option<Ease>,
) -> Result<BoxedCommand, CommandError> {
    lerp_tween(value, duration, ease, move |current| (current, current + offset))
}

/// Jumps by `offset`, then tweens back to the starting value.
pub fn change_from_offset(
    value: &Ref<f64>,
    offset: f64,
    duration: f64,
    ease: Option<Ease>,
) -> Result<BoxedCommand, CommandError> {
    lerp_tween(value, duration, ease, move |current| (current + offset, current))
}

/// Tweens the value to `factor` times its starting value.
pub fn scale_by(
    value: &Ref<f64>,
    factor: f64,
    duration: f64,
    ease: Option<Ease>,
) -> Result<BoxedCommand, CommandError> {
    lerp_tween(value, duration, ease, move |current| (current, current * factor))
}

/// Jumps to `factor` times the value, then tweens back to the starting value.
pub fn scale_from(
    value: &Ref<f64>,
    factor: f64,
    duration: f64,
    ease: Option<Ease>,
) -> Result<BoxedCommand, CommandError> {
    lerp_tween(value, duration, ease, move |current| (current * factor, current))
}

/// Swings the value around its starting point: up by `amount`, down by
/// `amount`, and back, following one sine period over `duration`.
pub fn oscillate(
    value: &Ref<f64>,
    amount: f64,
    duration: f64,
    ease: Option<Ease>,
) -> Result<BoxedCommand, CommandError> {
    let base = Rc::new(Cell::new(0.0));
    let capture = {
        let base = Rc::clone(&base);
        let value = value.clone();
        act(move || base.set(value.get()))
    };
    let value = value.clone();
    let swing = interval(
        move |t| value.set(base.get() + (t * TAU).sin() * amount),
        duration,
        ease,
    )?;
    Ok(sequence([capture, swing]))
}

/// Scales the value up by `1 + amount` over the first half of `duration`,
/// then back to where it started over the second half. Both halves use
/// [`smooth`] easing.
pub fn pulsate_scale(
    value: &Ref<f64>,
    amount: f64,
    duration: f64,
) -> Result<BoxedCommand, CommandError> {
    let half = duration / 2.0;
    let base = Rc::new(Cell::new(0.0));
    let capture = {
        let base = Rc::clone(&base);
        let value = value.clone();
        act(move || base.set(value.get()))
    };
    let grow = scale_by(value, 1.0 + amount, half, Some(smooth()))?;
    let shrink = {
        let value = value.clone();
        let peak = Rc::new(Cell::new(0.0));
        let mark_peak = {
            let peak = Rc::clone(&peak);
            let value = value.clone();
            act(move || peak.set(value.get()))
        };
        let settle = interval(
            move |t| {
                let (from, to) = (peak.get(), base.get());
                value.set((to - from) * t + from);
            },
            half,
            Some(smooth()),
        )?;
        sequence([mark_peak, settle])
    };
    Ok(sequence([capture, grow, shrink]))
}
