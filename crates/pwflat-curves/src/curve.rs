//! Piecewise-flat forward curve.
//!
//! The forward rate is constant on each interval between knots:
//!
//! ```text
//!        { f[i]   if t[i-1] < u <= t[i]
//! f(u) = { extrap if u > t[n-1]
//!        { NaN    if u < 0
//! ```
//!
//! The extrapolation value defaults to NaN, signalling "undefined beyond
//! the curve"; queries past the last knot return it as-is rather than
//! failing, matching the NaN-signalling convention of the pricing layers
//! that consume curve values.
//!
//! The slice-level functions in this module operate on parallel
//! `times`/`forwards` slices without requiring an owning [`Curve`]; the
//! bootstrapper uses them to price against a candidate extrapolation
//! forward without mutating the real curve.

use serde::{Deserialize, Serialize};

use crate::error::{CurveError, CurveResult};

/// Returns true if the slice is strictly increasing.
#[must_use]
pub fn monotonic(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] < w[1])
}

/// Forward rate at time `u` over piecewise-flat knots.
///
/// Returns NaN for `u < 0`, and `extrap` when the curve is empty or `u`
/// lies past the last knot. Knot times must be strictly increasing.
#[must_use]
pub fn value(u: f64, times: &[f64], forwards: &[f64], extrap: f64) -> f64 {
    if u < 0.0 {
        return f64::NAN;
    }

    // First knot with t[i] >= u
    let i = times.partition_point(|&t| t < u);

    if i == times.len() {
        extrap
    } else {
        forwards[i]
    }
}

/// Integral of the forward rate from 0 to `u`.
///
/// Accumulates the area under the step function: full segments up to `u`
/// plus a partial final segment, which uses `extrap` when `u` lies past
/// the last knot.
#[must_use]
pub fn integral(u: f64, times: &[f64], forwards: &[f64], extrap: f64) -> f64 {
    if u < 0.0 {
        return f64::NAN;
    }
    if u == 0.0 {
        return 0.0;
    }
    if times.is_empty() {
        return u * extrap;
    }

    let mut acc = 0.0;
    let mut t_prev = 0.0;

    let mut i = 0;
    while i < times.len() && times[i] <= u {
        acc += forwards[i] * (times[i] - t_prev);
        t_prev = times[i];
        i += 1;
    }
    if (u - t_prev).abs() > f64::EPSILON {
        let rate = if i == times.len() { extrap } else { forwards[i] };
        acc += rate * (u - t_prev);
    }

    acc
}

/// Discount factor `D(u) = exp(-integral(u))`.
#[must_use]
pub fn discount(u: f64, times: &[f64], forwards: &[f64], extrap: f64) -> f64 {
    (-integral(u, times, forwards, extrap)).exp()
}

/// Spot rate: average forward rate from 0 to `u`.
///
/// Equals the forward rate itself at or before the first knot, otherwise
/// `integral(u) / u`.
#[must_use]
pub fn spot(u: f64, times: &[f64], forwards: &[f64], extrap: f64) -> f64 {
    if times.is_empty() {
        extrap
    } else if u <= times[0] {
        value(u, times, forwards, extrap)
    } else {
        integral(u, times, forwards, extrap) / u
    }
}

/// A piecewise-flat forward curve.
///
/// Owns strictly increasing knot times (all positive) with one forward
/// rate per knot, plus an extrapolation value applied past the last knot.
///
/// The curve is built up one knot at a time by [`extend`](Curve::extend),
/// typically driven by the bootstrapper; each new knot must lie strictly
/// past the current end.
///
/// # Example
///
/// ```rust
/// use pwflat_curves::Curve;
///
/// let mut curve = Curve::new();
/// curve.extend(1.0, 0.03).unwrap().extend(2.0, 0.04).unwrap();
///
/// assert_eq!(curve.value(0.5), 0.03);
/// assert_eq!(curve.value(1.5), 0.04);
/// assert!((curve.integral(2.0) - 0.07).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Curve {
    /// Knot times, strictly increasing and positive.
    times: Vec<f64>,
    /// Forward rate per knot.
    forwards: Vec<f64>,
    /// Forward rate past the last knot (NaN when undefined).
    extrapolation: f64,
}

impl Default for Curve {
    fn default() -> Self {
        Self::new()
    }
}

impl Curve {
    /// Creates an empty curve with NaN extrapolation.
    #[must_use]
    pub fn new() -> Self {
        Self {
            times: Vec::new(),
            forwards: Vec::new(),
            extrapolation: f64::NAN,
        }
    }

    /// Creates a curve from parallel knot arrays.
    ///
    /// # Arguments
    ///
    /// * `times` - Knot times, strictly increasing, first one positive
    /// * `forwards` - One forward rate per knot
    /// * `extrapolation` - Forward rate past the last knot (NaN = undefined)
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::MismatchedLengths`] if the arrays differ in
    /// length, [`CurveError::InvalidInput`] if the first time is not
    /// positive, and [`CurveError::NonMonotonicTimes`] if times are not
    /// strictly increasing. An empty curve is valid.
    pub fn with_knots(
        times: Vec<f64>,
        forwards: Vec<f64>,
        extrapolation: f64,
    ) -> CurveResult<Self> {
        if times.len() != forwards.len() {
            return Err(CurveError::MismatchedLengths {
                times: times.len(),
                values: forwards.len(),
            });
        }
        if let Some(&t0) = times.first() {
            if t0 <= 0.0 {
                return Err(CurveError::invalid_input(format!(
                    "first knot time must be positive, got {t0}"
                )));
            }
        }
        for (i, w) in times.windows(2).enumerate() {
            if w[0] >= w[1] {
                return Err(CurveError::NonMonotonicTimes {
                    index: i + 1,
                    prev: w[0],
                    current: w[1],
                });
            }
        }

        Ok(Self {
            times,
            forwards,
            extrapolation,
        })
    }

    /// Returns the number of knots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Returns true if the curve has no knots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Returns the knot times.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Returns the knot forward rates.
    #[must_use]
    pub fn forwards(&self) -> &[f64] {
        &self.forwards
    }

    /// Returns the last knot `(time, forward)`, if any.
    #[must_use]
    pub fn back(&self) -> Option<(f64, f64)> {
        match (self.times.last(), self.forwards.last()) {
            (Some(&t), Some(&f)) => Some((t, f)),
            _ => None,
        }
    }

    /// Returns the extrapolation value applied past the last knot.
    #[must_use]
    pub fn extrapolation(&self) -> f64 {
        self.extrapolation
    }

    /// Sets the extrapolation value, independent of the knots.
    pub fn set_extrapolation(&mut self, forward: f64) -> &mut Self {
        self.extrapolation = forward;
        self
    }

    /// Appends a knot.
    ///
    /// Returns `&mut self` so extensions can be chained.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::ExtendNotIncreasing`] if `t` is not strictly
    /// past the current last knot, or [`CurveError::InvalidInput`] if the
    /// first knot time is not positive.
    pub fn extend(&mut self, t: f64, f: f64) -> CurveResult<&mut Self> {
        match self.times.last() {
            Some(&last) if t <= last => {
                return Err(CurveError::ExtendNotIncreasing { last, requested: t });
            }
            None if t <= 0.0 => {
                return Err(CurveError::invalid_input(format!(
                    "first knot time must be positive, got {t}"
                )));
            }
            _ => {}
        }

        self.times.push(t);
        self.forwards.push(f);

        Ok(self)
    }

    /// Forward rate at time `u`.
    ///
    /// NaN for `u < 0`; the extrapolation value when the curve is empty or
    /// `u` lies past the last knot.
    #[must_use]
    pub fn value(&self, u: f64) -> f64 {
        value(u, &self.times, &self.forwards, self.extrapolation)
    }

    /// Integral of the forward rate from 0 to `u`.
    #[must_use]
    pub fn integral(&self, u: f64) -> f64 {
        integral(u, &self.times, &self.forwards, self.extrapolation)
    }

    /// Discount factor `D(u) = exp(-integral(u))`.
    #[must_use]
    pub fn discount(&self, u: f64) -> f64 {
        discount(u, &self.times, &self.forwards, self.extrapolation)
    }

    /// Spot rate: average forward rate from 0 to `u`.
    #[must_use]
    pub fn spot(&self, u: f64) -> f64 {
        spot(u, &self.times, &self.forwards, self.extrapolation)
    }
}
