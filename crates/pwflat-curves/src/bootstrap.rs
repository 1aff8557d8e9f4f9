//! Bootstrap: sequential calibration of a piecewise-flat forward curve.
//!
//! Each instrument adds exactly one knot to the curve: the knot time is
//! the instrument's last cash flow time, and the knot forward is the
//! constant rate on the interval from the current curve end to that time
//! which reprices the instrument to its target price.
//!
//! [`fit`] computes the knot without touching the curve; [`extend`]
//! appends it. [`build`] and [`build2`] fold [`extend`] over ordered
//! instrument sequences. All failures are local to the single step that
//! produced them and precede any mutation.

use log::{debug, trace};
use pwflat_math::solvers::{bracketed_secant, SolverConfig};
use pwflat_math::MathError;

use crate::curve::{self, Curve};
use crate::error::{CurveError, CurveResult};
use crate::instruments::Instrument;

/// Initial half-width of the root bracket around the seed forward.
const INITIAL_BRACKET_STEP: f64 = 0.001;

/// Maximum number of bracket-widening retries before giving up.
const MAX_BRACKET_ATTEMPTS: u32 = 24;

/// Seed forward used when the curve is empty and no guess is given.
const DEFAULT_SEED_FORWARD: f64 = 0.01;

/// Present value of an instrument on a curve.
///
/// Sums `cash[i] * discount(time[i])` over all cash flows. Flows past the
/// curve end discount at the curve's own extrapolation value, so the
/// result is NaN when that value is undefined.
#[must_use]
pub fn present_value<I: Instrument + ?Sized>(instrument: &I, curve: &Curve) -> f64 {
    instrument
        .times()
        .iter()
        .zip(instrument.cash())
        .map(|(&u, &c)| c * curve.discount(u))
        .sum()
}

/// Present value with a candidate extrapolation forward.
///
/// Identical to [`present_value`] except that flows past the curve end
/// discount at `extrap` instead of the curve's stored extrapolation
/// value. The curve is not mutated; the root solve in [`fit`] evaluates
/// this for each candidate forward.
#[must_use]
pub fn present_value_with<I: Instrument + ?Sized>(
    instrument: &I,
    curve: &Curve,
    extrap: f64,
) -> f64 {
    instrument
        .times()
        .iter()
        .zip(instrument.cash())
        .map(|(&u, &c)| c * curve::discount(u, curve.times(), curve.forwards(), extrap))
        .sum()
}

/// Computes the knot `(u, f)` that extends `curve` to reprice
/// `instrument` at `price`, without mutating the curve.
///
/// `u` is the instrument's last cash flow time; `f` is the constant
/// forward applied past the current curve end. Closed forms handle the
/// single-flow and two-flow cases; everything else goes through the
/// bracketed secant solver, seeded at `guess` when nonzero, else at the
/// curve's last forward (or 0.01 on an empty curve).
///
/// # Errors
///
/// - [`CurveError::EmptyInstrument`] when the instrument has no flows
/// - [`CurveError::InvalidInput`] when the cash flow times are invalid or
///   the termination does not lie past the curve end
/// - [`CurveError::Domain`] when a closed-form branch would take the
///   logarithm of a non-positive value (inconsistent price/flow signs)
/// - [`CurveError::Math`] when no root bracket can be established or the
///   solver exhausts its iteration budget
pub fn fit<I: Instrument + ?Sized>(
    instrument: &I,
    curve: &Curve,
    price: f64,
    guess: f64,
) -> CurveResult<(f64, f64)> {
    let m = instrument.len();
    if m == 0 {
        return Err(CurveError::EmptyInstrument);
    }
    if !instrument.ok() {
        return Err(CurveError::invalid_input(
            "instrument cash flow times must be non-negative and strictly increasing",
        ));
    }

    let u = instrument.times();
    let c = instrument.cash();

    // End of the current curve
    let t_ = curve.back().map_or(0.0, |(t, _)| t);
    // Last cash flow and its time
    let u_ = u[m - 1];
    let c_ = c[m - 1];

    if u_ <= t_ {
        return Err(CurveError::invalid_input(format!(
            "instrument termination {u_} must lie past the curve end {t_}"
        )));
    }

    // Discount to the end of the current curve
    let d_ = curve.discount(t_);

    // Single flow past the curve end: closed form from
    // p = pv + c D exp(-f (u - t)).
    // The m == 2 arm requires the earlier flow at or before the curve
    // end so its value is fixed. ??? m > 2 ???
    if m == 1 || (m == 2 && u[0] <= t_) {
        let pv: f64 = u[..m - 1]
            .iter()
            .zip(&c[..m - 1])
            .map(|(&uk, &ck)| ck * curve.discount(uk))
            .sum();

        let arg = (price - pv) / (c_ * d_);
        if !arg.is_finite() || arg <= 0.0 {
            return Err(CurveError::domain(format!(
                "log argument (p - pv)/(c D) = {arg} is not positive"
            )));
        }

        return Ok((u_, arg.ln() / (t_ - u_)));
    }

    // Exactly two flows at price 0: u[0] > t_ here, or the branch above
    // would have fired, so 0 = c0 exp(-f (u0 - t)) + c1 exp(-f (u1 - t)).
    if price == 0.0 && m == 2 {
        let ratio = -c[0] / c[1];
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(CurveError::domain(format!(
                "log argument -c0/c1 = {ratio} is not positive"
            )));
        }

        return Ok((u_, ratio.ln() / (u[0] - u[1])));
    }

    // General case: solve pv(f) = 0 for the extrapolation forward f
    let pv_fn = |f: f64| -price + present_value_with(instrument, curve, f);

    let seed = if guess != 0.0 {
        guess
    } else {
        curve.back().map_or(DEFAULT_SEED_FORWARD, |(_, f)| f)
    };

    let config = SolverConfig::default();
    let mut result = bracketed_secant(&pv_fn, seed, seed + INITIAL_BRACKET_STEP, &config);

    let mut width = INITIAL_BRACKET_STEP;
    let mut attempts = 0;
    while matches!(result, Err(MathError::InvalidBracket { .. })) && attempts < MAX_BRACKET_ATTEMPTS
    {
        width *= 2.0;
        attempts += 1;
        trace!("no sign change near {seed}, widening bracket to +/-{width}");
        result = bracketed_secant(&pv_fn, seed - width, seed + width, &config);
    }

    Ok((u_, result?.root))
}

/// Extends the curve by one instrument.
///
/// Computes the new knot with [`fit`] and appends it; the curve is
/// untouched when any step fails. Returns the curve for chaining.
///
/// # Errors
///
/// Everything [`fit`] reports, plus [`CurveError::ExtendNotIncreasing`]
/// from the append itself.
pub fn extend<'c, I: Instrument + ?Sized>(
    instrument: &I,
    curve: &'c mut Curve,
    price: f64,
    guess: f64,
) -> CurveResult<&'c mut Curve> {
    let (u_, f_) = fit(instrument, curve, price, guess)?;
    debug!("bootstrapped knot ({u_}, {f_})");

    curve.extend(u_, f_)
}

/// Builds a curve from an ordered sequence of instruments.
///
/// Starts from an empty curve and extends with each instrument at target
/// price 0. Instruments must be ordered so each termination lies past the
/// previous one; ordering is the caller's responsibility.
///
/// # Errors
///
/// The first failing [`extend`] aborts the build.
pub fn build(instruments: &[&dyn Instrument]) -> CurveResult<Curve> {
    let mut curve = Curve::new();
    for instrument in instruments {
        extend(*instrument, &mut curve, 0.0, 0.0)?;
    }

    Ok(curve)
}

/// Builds a curve from two ordered instrument sequences.
///
/// Consumes `primary` while each termination is strictly before the first
/// effective date of `secondary`, then consumes all of `secondary`. The
/// resulting curve spans both lists with no overlap in termination
/// ranges.
///
/// # Errors
///
/// The first failing [`extend`] aborts the build;
/// [`CurveError::EmptyInstrument`] if an instrument has no flows.
pub fn build2(
    primary: &[&dyn Instrument],
    secondary: &[&dyn Instrument],
) -> CurveResult<Curve> {
    let cutoff = match secondary.first() {
        Some(first) => first.effective()?,
        None => f64::MAX,
    };

    let mut curve = Curve::new();
    for instrument in primary {
        if instrument.termination()? >= cutoff {
            break;
        }
        extend(*instrument, &mut curve, 0.0, 0.0)?;
    }
    for instrument in secondary {
        extend(*instrument, &mut curve, 0.0, 0.0)?;
    }

    Ok(curve)
}
