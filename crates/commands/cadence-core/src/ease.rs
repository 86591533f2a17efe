//! Easing functions.
//!
//! An ease maps a normalised `t` in `0 <= t <= 1` onto a reshaped progress
//! value. For the eases built here `f(0) = 0` and `f(1) = 1`; some (back,
//! elastic) leave the unit range in between.

use std::f64::consts::PI;
use std::rc::Rc;

use crate::error::CommandError;

pub type Ease = Rc<dyn Fn(f64) -> f64>;

/// Pairs an ease with its weight for [`weighted_composite`].
#[derive(Clone)]
pub struct WeightedEase {
    pub weight: f64,
    pub ease: Ease,
}

/// Leaves `t` untouched.
pub fn linear() -> Ease {
    Rc::new(|t| t)
}

fn check_steps(num_steps: f64) -> Result<f64, CommandError> {
    let steps = num_steps.round();
    if steps >= 1.0 {
        Ok(steps)
    } else {
        Err(CommandError::InvalidStepCount { steps: num_steps })
    }
}

/// Quantises `t` into `num_steps + 1` levels by rounding.
pub fn round_step(num_steps: f64) -> Result<Ease, CommandError> {
    let steps = check_steps(num_steps)?;
    Ok(Rc::new(move |t| (t * steps).round() / steps))
}

/// Quantises `t` by ceiling, raising the average value over the ease.
pub fn ceil_step(num_steps: f64) -> Result<Ease, CommandError> {
    let steps = check_steps(num_steps)?;
    Ok(Rc::new(move |t| (t * steps).ceil() / steps))
}

/// Quantises `t` by flooring, lowering the average value over the ease.
pub fn floor_step(num_steps: f64) -> Result<Ease, CommandError> {
    let steps = check_steps(num_steps)?;
    Ok(Rc::new(move |t| (t * steps).floor() / steps))
}

/// Averages the output of several eases.
pub fn average_composite(eases: Vec<Ease>) -> Ease {
    Rc::new(move |t| {
        let total: f64 = eases.iter().map(|ease| ease(t)).sum();
        total / eases.len() as f64
    })
}

/// Runs eases back to back: with three eases, the first covers
/// `0 <= t < 1/3`, the second `1/3 <= t < 2/3` and the third the rest.
pub fn sequential_composite(eases: Vec<Ease>) -> Ease {
    Rc::new(move |t| {
        let count = eases.len() as f64;
        let index = (t * count).floor();
        if index >= count {
            return 1.0;
        }
        if index < 0.0 {
            return 0.0;
        }
        let sequence_length = 1.0 / count;
        let sequence_t = (t - index * sequence_length) / sequence_length;
        (eases[index as usize](sequence_t) + index) * sequence_length
    })
}

/// Averages eases using a weight per ease.
pub fn weighted_composite(eases: Vec<WeightedEase>) -> Ease {
    let total_weight: f64 = eases.iter().map(|e| e.weight).sum();
    Rc::new(move |t| {
        let weighted: f64 = eases.iter().map(|e| (e.ease)(t) * e.weight).sum();
        weighted / total_weight
    })
}

/// Pipes `t` through each ease in turn.
pub fn chain_composite(eases: Vec<Ease>) -> Ease {
    Rc::new(move |t| eases.iter().fold(t, |last, ease| ease(last)))
}

/// `in_ease` covers the first half of the range, `out_ease` the second.
pub fn in_out_ease(in_ease: Ease, out_ease: Ease) -> Ease {
    Rc::new(move |t| {
        if t < 0.5 {
            return 0.5 * in_ease(t / 0.5);
        }
        0.5 * out_ease((t - 0.5) / 0.5) + 0.5
    })
}

/// Mirrors an ease, so ease-ins become ease-outs.
pub fn flip(ease: Ease) -> Ease {
    Rc::new(move |t| 1.0 - ease(1.0 - t))
}

pub fn in_polynomial(power: f64) -> Result<Ease, CommandError> {
    if power <= 0.0 || power.is_nan() {
        return Err(CommandError::InvalidPower { power });
    }
    Ok(Rc::new(move |t: f64| t.powf(power)))
}

pub fn out_polynomial(power: f64) -> Result<Ease, CommandError> {
    Ok(flip(in_polynomial(power)?))
}

pub fn in_out_polynomial(power: f64) -> Result<Ease, CommandError> {
    Ok(in_out_ease(in_polynomial(power)?, out_polynomial(power)?))
}

// Fixed-power shorthands. The powers are constants, so these can't fail.
fn fixed_power(power: f64) -> Ease {
    Rc::new(move |t: f64| t.powf(power))
}

pub fn in_quad() -> Ease {
    fixed_power(2.0)
}
pub fn out_quad() -> Ease {
    flip(in_quad())
}
pub fn in_out_quad() -> Ease {
    in_out_ease(in_quad(), out_quad())
}

pub fn in_cubic() -> Ease {
    fixed_power(3.0)
}
pub fn out_cubic() -> Ease {
    flip(in_cubic())
}
pub fn in_out_cubic() -> Ease {
    in_out_ease(in_cubic(), out_cubic())
}

pub fn in_quart() -> Ease {
    fixed_power(4.0)
}
pub fn out_quart() -> Ease {
    flip(in_quart())
}
pub fn in_out_quart() -> Ease {
    in_out_ease(in_quart(), out_quart())
}

pub fn in_quint() -> Ease {
    fixed_power(5.0)
}
pub fn out_quint() -> Ease {
    flip(in_quint())
}
pub fn in_out_quint() -> Ease {
    in_out_ease(in_quint(), out_quint())
}

pub fn in_sin() -> Ease {
    Rc::new(|t: f64| {
        if t == 1.0 {
            return 1.0;
        }
        1.0 - (t * PI / 2.0).cos()
    })
}
pub fn out_sin() -> Ease {
    flip(in_sin())
}
pub fn in_out_sin() -> Ease {
    in_out_ease(in_sin(), out_sin())
}

/// An ease with a springy overshoot.
/// `amplitude` bounds the displacement, `period` sets the springiness.
pub fn elastic(amplitude: f64, period: f64) -> Ease {
    Rc::new(move |t: f64| {
        if t == 0.0 {
            return 0.0;
        } else if t == 1.0 {
            return 1.0;
        }
        let (amp, s) = if amplitude < 1.0 {
            (1.0, period / 4.0)
        } else {
            (amplitude, period / (2.0 * PI) * (1.0 / amplitude).asin())
        };
        let t = t - 1.0;
        -(amp * 2f64.powf(10.0 * t) * ((t - s) * 2.0 * PI / period).sin())
    })
}

pub fn in_elastic() -> Ease {
    elastic(1.0, 0.3)
}
pub fn out_elastic() -> Ease {
    flip(in_elastic())
}
pub fn in_out_elastic() -> Ease {
    in_out_ease(in_elastic(), out_elastic())
}

pub fn in_expo() -> Ease {
    Rc::new(|t: f64| {
        if t == 1.0 {
            return 1.0;
        }
        if t == 0.0 {
            return 0.0;
        }
        2f64.powf(10.0 * (t - 1.0))
    })
}
pub fn out_expo() -> Ease {
    flip(in_expo())
}
pub fn in_out_expo() -> Ease {
    in_out_ease(in_expo(), out_expo())
}

pub fn in_circ() -> Ease {
    Rc::new(|t: f64| 1.0 - (1.0 - t * t).sqrt())
}
pub fn out_circ() -> Ease {
    flip(in_circ())
}
pub fn in_out_circ() -> Ease {
    in_out_ease(in_circ(), out_circ())
}

/// Pulls back a little before shooting towards the target.
pub fn in_back(overshoot: f64) -> Ease {
    Rc::new(move |t: f64| t * t * t - t * overshoot * (t * PI).sin())
}

/// Overshoots the target before settling.
pub fn out_back(overshoot: f64) -> Ease {
    flip(in_back(overshoot))
}

pub fn in_out_back(overshoot: f64) -> Ease {
    in_out_ease(in_back(overshoot * 2.0), out_back(overshoot * 2.0))
}

pub fn in_bounce() -> Ease {
    Rc::new(|t: f64| {
        let mut t = 1.0 - t;
        if t < 1.0 / 2.75 {
            1.0 - 7.5625 * t * t
        } else if t < 2.0 / 2.75 {
            t -= 1.5 / 2.75;
            1.0 - (7.5625 * t * t + 0.75)
        } else if t < 2.5 / 2.75 {
            t -= 2.25 / 2.75;
            1.0 - (7.5625 * t * t + 0.9375)
        } else {
            t -= 2.625 / 2.75;
            1.0 - (7.5625 * t * t + 0.984375)
        }
    })
}
pub fn out_bounce() -> Ease {
    flip(in_bounce())
}
pub fn in_out_bounce() -> Ease {
    in_out_ease(in_bounce(), out_bounce())
}

/// Cubic Hermite curve from 0 to 1 with adjustable end gradients.
/// Gradients closer to zero give a smoother start/end.
pub fn hermite(start_gradient: f64, end_gradient: f64) -> Ease {
    // p(t) = (t^3 - 2t^2 + t) * m0 - 2t^3 + 3t^2 + (t^3 - t^2) * m1, with p0 = 0, p1 = 1.
    Rc::new(move |t: f64| {
        let t_sqr = t * t;
        let t_cbd = t * t * t;
        (t_cbd - 2.0 * t_sqr + t) * start_gradient - 2.0 * t_cbd
            + 3.0 * t_sqr
            + (t_cbd - t_sqr) * end_gradient
    })
}

pub fn in_hermite() -> Ease {
    hermite(0.0, 1.0)
}
pub fn out_hermite() -> Ease {
    hermite(1.0, 0.0)
}
pub fn in_out_hermite() -> Ease {
    hermite(0.0, 0.0)
}

pub fn smooth() -> Ease {
    hermite(0.0, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn catalog() -> Vec<(&'static str, Ease)> {
        vec![
            ("linear", linear()),
            ("round_step", round_step(3.0).unwrap()),
            ("ceil_step", ceil_step(3.0).unwrap()),
            ("floor_step", floor_step(3.0).unwrap()),
            ("in_polynomial", in_polynomial(10.0).unwrap()),
            ("out_polynomial", out_polynomial(10.0).unwrap()),
            ("in_out_polynomial", in_out_polynomial(10.0).unwrap()),
            ("in_quad", in_quad()),
            ("out_quad", out_quad()),
            ("in_out_quad", in_out_quad()),
            ("in_cubic", in_cubic()),
            ("out_cubic", out_cubic()),
            ("in_out_cubic", in_out_cubic()),
            ("in_quart", in_quart()),
            ("out_quart", out_quart()),
            ("in_out_quart", in_out_quart()),
            ("in_quint", in_quint()),
            ("out_quint", out_quint()),
            ("in_out_quint", in_out_quint()),
            ("in_sin", in_sin()),
            ("out_sin", out_sin()),
            ("in_out_sin", in_out_sin()),
            ("elastic", elastic(1.0, 0.3)),
            ("in_elastic", in_elastic()),
            ("out_elastic", out_elastic()),
            ("in_out_elastic", in_out_elastic()),
            ("in_expo", in_expo()),
            ("out_expo", out_expo()),
            ("in_out_expo", in_out_expo()),
            ("in_circ", in_circ()),
            ("out_circ", out_circ()),
            ("in_out_circ", in_out_circ()),
            ("in_back", in_back(0.2)),
            ("out_back", out_back(0.2)),
            ("in_out_back", in_out_back(0.2)),
            ("in_bounce", in_bounce()),
            ("out_bounce", out_bounce()),
            ("in_out_bounce", in_out_bounce()),
            ("hermite", hermite(0.0, 0.0)),
            ("in_hermite", in_hermite()),
            ("out_hermite", out_hermite()),
            ("in_out_hermite", in_out_hermite()),
            ("smooth", smooth()),
        ]
    }

    #[test]
    fn catalog_endpoints() {
        for (name, ease) in catalog() {
            assert!(ease(0.0).abs() < 1e-9, "{name}(0) = {}", ease(0.0));
            assert!((ease(1.0) - 1.0).abs() < 1e-9, "{name}(1) = {}", ease(1.0));
        }
    }

    #[test]
    fn steps_quantise() {
        let round = round_step(4.0).unwrap();
        assert_abs_diff_eq!(round(0.3), 0.25);
        let floor = floor_step(4.0).unwrap();
        assert_abs_diff_eq!(floor(0.49), 0.25);
        let ceil = ceil_step(4.0).unwrap();
        assert_abs_diff_eq!(ceil(0.26), 0.5);
    }

    #[test]
    fn invalid_arguments() {
        assert!(matches!(
            round_step(0.0),
            Err(CommandError::InvalidStepCount { .. })
        ));
        assert!(matches!(
            in_polynomial(-1.0),
            Err(CommandError::InvalidPower { .. })
        ));
    }

    #[test]
    fn composites() {
        let avg = average_composite(vec![linear(), in_quad()]);
        assert_abs_diff_eq!(avg(0.5), (0.5 + 0.25) / 2.0);

        let weighted = weighted_composite(vec![
            WeightedEase {
                weight: 3.0,
                ease: linear(),
            },
            WeightedEase {
                weight: 1.0,
                ease: in_quad(),
            },
        ]);
        assert_abs_diff_eq!(weighted(0.5), (0.5 * 3.0 + 0.25) / 4.0);

        let chained = chain_composite(vec![in_quad(), in_quad()]);
        assert_abs_diff_eq!(chained(0.5), 0.0625);

        let seq = sequential_composite(vec![linear(), linear()]);
        assert_abs_diff_eq!(seq(0.25), 0.25);
        assert_abs_diff_eq!(seq(0.75), 0.75);
        assert_abs_diff_eq!(seq(1.0), 1.0);
    }

    #[test]
    fn flip_mirrors() {
        let out = flip(in_quad());
        assert_abs_diff_eq!(out(0.25), 1.0 - 0.75 * 0.75);
    }

    #[test]
    fn smooth_is_symmetric() {
        let s = smooth();
        assert_abs_diff_eq!(s(0.5), 0.5);
        assert_abs_diff_eq!(s(0.25) + s(0.75), 1.0, epsilon = 1e-12);
    }
}
