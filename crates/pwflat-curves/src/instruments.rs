//! Fixed income instruments for curve bootstrap.
//!
//! An instrument is an ordered set of `(time, cash flow)` pairs. The
//! [`Instrument`] trait exposes that capability set — times, cash flows
//! and the checks derived from them — over a closed family of concrete
//! types:
//!
//! - [`CashFlows`]: owning value type, grows via `extend`
//! - [`CashFlowsView`]: non-owning view over externally owned slices
//! - [`ForwardRateAgreement`]: two flows, `-1` at effective and the
//!   implied growth factor at termination
//! - [`CashDeposit`]: a forward rate agreement effective at time 0
//! - [`portfolio`]: weighted merge of several instruments into one
//!   sorted [`CashFlows`]
//!
//! All times are year fractions from the valuation date; calendar and
//! day-count handling belong to the host layer.

use serde::{Deserialize, Serialize};

use crate::curve::monotonic;
use crate::error::{CurveError, CurveResult};

/// Capability interface over a sorted set of `(time, cash flow)` pairs.
///
/// Times must be non-negative and strictly increasing; [`ok`](Instrument::ok)
/// checks exactly that.
pub trait Instrument {
    /// Cash flow times, strictly increasing, first one non-negative.
    fn times(&self) -> &[f64];

    /// Cash flow amounts, parallel to [`times`](Instrument::times).
    fn cash(&self) -> &[f64];

    /// Returns the number of cash flows.
    fn len(&self) -> usize {
        self.times().len()
    }

    /// Returns true if the instrument has no cash flows.
    fn is_empty(&self) -> bool {
        self.times().is_empty()
    }

    /// Returns true if the times are valid: empty, or non-negative first
    /// time and strictly increasing.
    fn ok(&self) -> bool {
        let times = self.times();

        times.is_empty() || (times[0] >= 0.0 && monotonic(times))
    }

    /// First cash flow time.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::EmptyInstrument`] if there are no cash flows.
    fn effective(&self) -> CurveResult<f64> {
        self.times()
            .first()
            .copied()
            .ok_or(CurveError::EmptyInstrument)
    }

    /// Last cash flow time.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::EmptyInstrument`] if there are no cash flows.
    fn termination(&self) -> CurveResult<f64> {
        self.times()
            .last()
            .copied()
            .ok_or(CurveError::EmptyInstrument)
    }
}

/// Validates parallel time/cash arrays for instrument construction.
fn validate_flows(times: &[f64], cash: &[f64]) -> CurveResult<()> {
    if times.len() != cash.len() {
        return Err(CurveError::MismatchedLengths {
            times: times.len(),
            values: cash.len(),
        });
    }
    if let Some(&u0) = times.first() {
        if u0 < 0.0 {
            return Err(CurveError::invalid_input(format!(
                "first cash flow time must be non-negative, got {u0}"
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

    Ok(())
}

/// An owning instrument: parallel vectors of times and cash flows.
///
/// # Example
///
/// ```rust
/// use pwflat_curves::instruments::{CashFlows, Instrument};
///
/// let flows = CashFlows::from_flows(vec![0.0, 1.0], vec![-1.0, 1.05]).unwrap();
/// assert_eq!(flows.effective().unwrap(), 0.0);
/// assert_eq!(flows.termination().unwrap(), 1.0);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CashFlows {
    times: Vec<f64>,
    cash: Vec<f64>,
}

impl CashFlows {
    /// Creates an empty instrument.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an instrument from parallel time/cash arrays.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::MismatchedLengths`] on length mismatch,
    /// [`CurveError::InvalidInput`] for a negative first time, and
    /// [`CurveError::NonMonotonicTimes`] when times are not strictly
    /// increasing.
    pub fn from_flows(times: Vec<f64>, cash: Vec<f64>) -> CurveResult<Self> {
        validate_flows(&times, &cash)?;

        Ok(Self { times, cash })
    }

    /// Appends one cash flow.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::ExtendNotIncreasing`] if `u` is not strictly
    /// past the current last time, or [`CurveError::InvalidInput`] for a
    /// negative first time.
    pub fn extend(&mut self, u: f64, c: f64) -> CurveResult<&mut Self> {
        match self.times.last() {
            Some(&last) if u <= last => {
                return Err(CurveError::ExtendNotIncreasing { last, requested: u });
            }
            None if u < 0.0 => {
                return Err(CurveError::invalid_input(format!(
                    "first cash flow time must be non-negative, got {u}"
                )));
            }
            _ => {}
        }

        self.times.push(u);
        self.cash.push(c);

        Ok(self)
    }
}

impl Instrument for CashFlows {
    fn times(&self) -> &[f64] {
        &self.times
    }

    fn cash(&self) -> &[f64] {
        &self.cash
    }
}

/// A non-owning instrument view over externally owned slices.
///
/// Borrows the backing storage; the view cannot outlive it.
#[derive(Debug, Clone, Copy)]
pub struct CashFlowsView<'a> {
    times: &'a [f64],
    cash: &'a [f64],
}

impl<'a> CashFlowsView<'a> {
    /// Creates a view over parallel time/cash slices.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::MismatchedLengths`] on length mismatch,
    /// [`CurveError::InvalidInput`] for a negative first time, and
    /// [`CurveError::NonMonotonicTimes`] when times are not strictly
    /// increasing.
    pub fn new(times: &'a [f64], cash: &'a [f64]) -> CurveResult<Self> {
        validate_flows(times, cash)?;

        Ok(Self { times, cash })
    }
}

impl Instrument for CashFlowsView<'_> {
    fn times(&self) -> &[f64] {
        self.times
    }

    fn cash(&self) -> &[f64] {
        self.cash
    }
}

/// A forward rate agreement.
///
/// Two cash flows: `-1` at the effective date and
/// `exp(rate * (termination - effective))` at termination, so the
/// instrument prices to zero exactly when the curve's forward over
/// `(effective, termination]` equals `rate` (continuous compounding).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForwardRateAgreement {
    flows: CashFlows,
    rate: f64,
}

impl ForwardRateAgreement {
    /// Creates a forward rate agreement.
    ///
    /// # Arguments
    ///
    /// * `effective` - Start time, non-negative
    /// * `termination` - End time, strictly past `effective`
    /// * `rate` - Continuously compounded forward rate
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidInput`] or
    /// [`CurveError::NonMonotonicTimes`] when the times are invalid.
    pub fn new(effective: f64, termination: f64, rate: f64) -> CurveResult<Self> {
        let flows = CashFlows::from_flows(
            vec![effective, termination],
            vec![-1.0, (rate * (termination - effective)).exp()],
        )?;

        Ok(Self { flows, rate })
    }

    /// Returns the agreed forward rate.
    #[must_use]
    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl Instrument for ForwardRateAgreement {
    fn times(&self) -> &[f64] {
        self.flows.times()
    }

    fn cash(&self) -> &[f64] {
        self.flows.cash()
    }
}

/// A cash deposit: a forward rate agreement effective at time 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashDeposit {
    fra: ForwardRateAgreement,
}

impl CashDeposit {
    /// Creates a cash deposit.
    ///
    /// # Arguments
    ///
    /// * `maturity` - Deposit maturity, positive
    /// * `rate` - Continuously compounded deposit rate
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::NonMonotonicTimes`] when `maturity` is not
    /// positive.
    pub fn new(maturity: f64, rate: f64) -> CurveResult<Self> {
        Ok(Self {
            fra: ForwardRateAgreement::new(0.0, maturity, rate)?,
        })
    }

    /// Returns the deposit rate.
    #[must_use]
    pub fn rate(&self) -> f64 {
        self.fra.rate()
    }
}

impl Instrument for CashDeposit {
    fn times(&self) -> &[f64] {
        self.fra.times()
    }

    fn cash(&self) -> &[f64] {
        self.fra.cash()
    }
}

/// Total-order key for merging cash flows by time.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TimeKey(f64);

impl Eq for TimeKey {}

impl PartialOrd for TimeKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimeKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Merges weighted instruments into one sorted instrument.
///
/// Cash flows are keyed by time; flows occurring at identical times are
/// summed. With a single instrument and weight 1 this degenerates to a
/// sort-by-time pass.
///
/// # Errors
///
/// Returns [`CurveError::MismatchedLengths`] if `weights` and
/// `instruments` differ in length, and [`CurveError::InvalidInput`] if an
/// instrument fails its [`ok`](Instrument::ok) check.
pub fn portfolio(
    weights: &[f64],
    instruments: &[&dyn Instrument],
) -> CurveResult<CashFlows> {
    if weights.len() != instruments.len() {
        return Err(CurveError::MismatchedLengths {
            times: weights.len(),
            values: instruments.len(),
        });
    }

    let mut merged = std::collections::BTreeMap::<TimeKey, f64>::new();
    for (&w, inst) in weights.iter().zip(instruments) {
        if !inst.ok() {
            return Err(CurveError::invalid_input(
                "portfolio instrument has invalid cash flow times",
            ));
        }
        for (&u, &c) in inst.times().iter().zip(inst.cash()) {
            *merged.entry(TimeKey(u)).or_insert(0.0) += w * c;
        }
    }

    let mut flows = CashFlows::new();
    for (&TimeKey(u), &c) in &merged {
        flows.extend(u, c)?;
    }

    Ok(flows)
}
