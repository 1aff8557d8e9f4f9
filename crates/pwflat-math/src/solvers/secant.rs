//! Plain secant root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Plain secant root-finding algorithm.
///
/// Two-point iteration that approximates the derivative with a finite
/// difference. Does not require a bracketing interval, and therefore
/// carries no convergence guarantee: once the iteration budget is
/// exhausted the solver reports [`MathError::ConvergenceFailed`] rather
/// than returning a stale estimate.
///
/// Prefer [`bracketed_secant`](crate::solvers::bracketed_secant) when a
/// sign-changing bracket is available.
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `x0` - First initial guess
/// * `x1` - Second initial guess (should be different from x0)
/// * `config` - Solver configuration
///
/// # Returns
///
/// The root and iteration statistics, or an error if convergence fails.
///
/// # Example
///
/// ```rust
/// use pwflat_math::solvers::{secant, SolverConfig};
///
/// // Find root of x^2 - 2 (i.e., sqrt(2))
/// let f = |x: f64| x * x - 2.0;
///
/// let result = secant(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn secant<F>(f: F, x0: f64, x1: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let mut x_prev = x0;
    let mut x_curr = x1;
    let mut y_prev = f(x_prev);
    let mut y_curr = f(x_curr);

    for iteration in 0..config.max_iterations {
        if y_curr.abs() <= config.tolerance {
            return Ok(SolverResult {
                root: x_curr,
                iterations: iteration,
                residual: y_curr,
            });
        }

        // Near-parallel secant line: no usable step
        let denom = y_curr - y_prev;
        if denom.abs() < 1e-15 {
            return Err(MathError::DivisionByZero { value: denom });
        }

        let x_next = x_curr - y_curr * (x_curr - x_prev) / denom;

        x_prev = x_curr;
        y_prev = y_curr;
        x_curr = x_next;
        y_curr = f(x_curr);
    }

    Err(MathError::convergence_failed(
        config.max_iterations,
        y_curr.abs(),
    ))
}
