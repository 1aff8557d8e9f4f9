//! Bracketed secant root-finding algorithm.

use log::trace;

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Bracketed secant root-finding algorithm with bisection fallback.
///
/// Maintains a bracket `[x0, x1]` whose endpoint function values have
/// opposite signs throughout the iteration. Each step takes the secant
/// estimate through the two endpoints; if that estimate falls outside the
/// bracket, the bisection midpoint is used instead. The new point then
/// replaces the endpoint whose function value shares its sign, so the
/// bracket stays valid at every step.
///
/// Converges when `max(|f(x0)|, |f(x1)|) <= tolerance`, with the endpoint
/// of smaller residual as the result, or as soon as a new evaluation
/// meets the tolerance on its own.
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `x0` - One endpoint of the initial bracket
/// * `x1` - The other endpoint of the initial bracket
/// * `config` - Solver configuration
///
/// # Returns
///
/// The root and iteration statistics.
///
/// # Errors
///
/// Returns [`MathError::InvalidBracket`] if `f(x0)` and `f(x1)` do not
/// have opposite signs, [`MathError::InvalidInput`] for a negative
/// tolerance, and [`MathError::ConvergenceFailed`] if the iteration
/// budget runs out.
///
/// # Example
///
/// ```rust
/// use pwflat_math::solvers::{bracketed_secant, SolverConfig};
///
/// // Find root of x^2 - 2 (i.e., sqrt(2))
/// let f = |x: f64| x * x - 2.0;
///
/// let result = bracketed_secant(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn bracketed_secant<F>(f: F, x0: f64, x1: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    if config.tolerance < 0.0 {
        return Err(MathError::invalid_input(format!(
            "tolerance must be non-negative, got {}",
            config.tolerance
        )));
    }

    let mut lo = x0.min(x1);
    let mut hi = x0.max(x1);
    let mut y_lo = f(lo);
    let mut y_hi = f(hi);

    // An endpoint may already be the root
    if y_lo.abs() <= config.tolerance {
        return Ok(SolverResult {
            root: lo,
            iterations: 0,
            residual: y_lo,
        });
    }
    if y_hi.abs() <= config.tolerance {
        return Ok(SolverResult {
            root: hi,
            iterations: 0,
            residual: y_hi,
        });
    }

    // The bracket is valid only when the endpoint values straddle zero.
    if y_lo.is_sign_negative() == y_hi.is_sign_negative() {
        return Err(MathError::InvalidBracket {
            a: lo,
            b: hi,
            fa: y_lo,
            fb: y_hi,
        });
    }

    for iteration in 0..config.max_iterations {
        if y_lo.abs().max(y_hi.abs()) <= config.tolerance {
            let (root, residual) = if y_lo.abs() < y_hi.abs() {
                (lo, y_lo)
            } else {
                (hi, y_hi)
            };
            return Ok(SolverResult {
                root,
                iterations: iteration,
                residual,
            });
        }

        let mut x = (lo * y_hi - hi * y_lo) / (y_hi - y_lo);
        if x < lo || x > hi {
            trace!("secant estimate {x} outside [{lo}, {hi}], bisecting");
            x = lo / 2.0 + hi / 2.0;
        }

        let y = f(x);
        if y.abs() <= config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration + 1,
                residual: y,
            });
        }
        if y.is_sign_negative() == y_lo.is_sign_negative() {
            lo = x;
            y_lo = y;
        } else {
            hi = x;
            y_hi = y;
        }
    }

    Err(MathError::convergence_failed(
        config.max_iterations,
        y_lo.abs().min(y_hi.abs()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sqrt_2() {
        let f = |x: f64| x * x - 2.0;

        let result = bracketed_secant(f, 1.0, 2.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
    }

    #[test]
    fn test_endpoint_order_irrelevant() {
        let f = |x: f64| x * x - 2.0;

        let result = bracketed_secant(f, 2.0, 1.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
    }

    #[test]
    fn test_sin() {
        // Root of sin(x) near pi
        let f = |x: f64| x.sin();

        let result = bracketed_secant(f, 3.0, 3.5, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::PI, epsilon = 1e-10);
    }

    #[test]
    fn test_decreasing_function() {
        let f = |x: f64| 1.0 - x.exp();

        let result = bracketed_secant(f, -1.0, 1.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_invalid_bracket() {
        let f = |x: f64| x * x - 2.0;

        // Both endpoints below the root: same sign
        let err = bracketed_secant(f, 0.0, 1.0, &SolverConfig::default()).unwrap_err();

        assert!(matches!(err, MathError::InvalidBracket { .. }));
    }

    #[test]
    fn test_negative_tolerance() {
        let f = |x: f64| x;
        let config = SolverConfig::default().with_tolerance(-1.0);

        let err = bracketed_secant(f, -1.0, 1.0, &config).unwrap_err();

        assert!(matches!(err, MathError::InvalidInput { .. }));
    }

    #[test]
    fn test_iteration_budget_exhausted() {
        let f = |x: f64| x * x * x - 2.0;
        let config = SolverConfig::new(0.0, 3); // unreachable tolerance, tiny budget

        let err = bracketed_secant(f, 1.0, 2.0, &config).unwrap_err();

        assert!(matches!(err, MathError::ConvergenceFailed { .. }));
    }

    #[test]
    fn test_residual_within_tolerance() {
        // Steep function forces the bisection fallback
        let f = |x: f64| (20.0 * x).tanh() - 0.5;
        let config = SolverConfig::default().with_tolerance(1e-12);

        let result = bracketed_secant(f, -1.0, 1.0, &config).unwrap();

        assert!(result.residual.abs() <= 1e-12);
        assert!(f(result.root).abs() <= 1e-12);
    }

    #[test]
    fn test_convergence_speed() {
        let f = |x: f64| x * x - 2.0;

        let result = bracketed_secant(f, 1.0, 2.0, &SolverConfig::default()).unwrap();

        // Secant steps inside the bracket should converge well within budget
        assert!(result.iterations < 30);
    }

    proptest::proptest! {
        #[test]
        fn prop_finds_root_of_monotone_function(
            root in -5.0f64..5.0,
            scale in 0.5f64..2.0,
            w_lo in 0.1f64..3.0,
            w_hi in 0.1f64..3.0,
        ) {
            // Strictly increasing cubic with a single real root
            let f = |x: f64| {
                let d = x - root;
                scale * d * (1.0 + d * d)
            };
            let config = SolverConfig::default();

            let result = bracketed_secant(f, root - w_lo, root + w_hi, &config).unwrap();

            proptest::prop_assert!(f(result.root).abs() <= config.tolerance);
            proptest::prop_assert!((result.root - root).abs() < 1e-6);
        }
    }
}
