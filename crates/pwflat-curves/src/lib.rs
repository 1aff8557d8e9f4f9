//! # pwflat Curves
//!
//! Piecewise-flat forward curve construction and instrument bootstrapping.
//!
//! This crate provides:
//!
//! - **Curve**: the piecewise-flat forward [`Curve`] with point lookup,
//!   integration, discounting and spot-rate derivation
//! - **Instruments**: the [`instruments::Instrument`] capability trait over
//!   cash-flow schedules, forward rate agreements, cash deposits and
//!   portfolio merges
//! - **Bootstrap**: sequential calibration that extends a curve by one
//!   instrument at a time, repricing each to a target
//!
//! ## Quick Start
//!
//! ```rust
//! use pwflat_curves::bootstrap;
//! use pwflat_curves::instruments::{CashDeposit, ForwardRateAgreement, Instrument};
//!
//! let deposit = CashDeposit::new(1.0, 0.05).unwrap();
//! let fra = ForwardRateAgreement::new(1.0, 2.0, 0.06).unwrap();
//!
//! let curve = bootstrap::build(&[&deposit, &fra]).unwrap();
//!
//! assert_eq!(curve.len(), 2);
//! assert!((curve.value(0.5) - 0.05).abs() < 1e-12);
//! assert!((curve.value(1.5) - 0.06).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]

pub mod bootstrap;
pub mod curve;
pub mod error;
pub mod instruments;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bootstrap::{build, build2, extend, fit, present_value, present_value_with};
    pub use crate::curve::Curve;
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::instruments::{
        portfolio, CashDeposit, CashFlows, CashFlowsView, ForwardRateAgreement, Instrument,
    };
}

pub use curve::Curve;
pub use error::{CurveError, CurveResult};
