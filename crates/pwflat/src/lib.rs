//! # pwflat
//!
//! Piecewise-flat forward curve bootstrapping.
//!
//! This facade re-exports the public API of the workspace crates:
//!
//! - [`math`]: root-finding engine (bracketed secant, plain secant)
//! - [`curves`]: the piecewise-flat [`Curve`], fixed income instruments,
//!   and the bootstrap engine
//!
//! ## Quick Start
//!
//! ```rust
//! use pwflat::prelude::*;
//!
//! // Bootstrap a curve from a deposit and a forward rate agreement
//! let deposit = CashDeposit::new(1.0, 0.05).unwrap();
//! let fra = ForwardRateAgreement::new(1.0, 2.0, 0.06).unwrap();
//!
//! let curve = build(&[&deposit, &fra]).unwrap();
//!
//! // Both instruments reprice to zero on the bootstrapped curve
//! assert!(present_value(&deposit, &curve).abs() < 1e-9);
//! assert!(present_value(&fra, &curve).abs() < 1e-9);
//! ```

#![warn(missing_docs)]

pub use pwflat_curves as curves;
pub use pwflat_math as math;

pub use pwflat_curves::{Curve, CurveError, CurveResult};
pub use pwflat_math::{MathError, MathResult};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use pwflat_curves::prelude::*;
    pub use pwflat_math::prelude::*;
}
