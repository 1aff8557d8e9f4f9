//! # pwflat Math
//!
//! Root-finding engine for the pwflat curve bootstrapping library.
//!
//! This crate provides:
//!
//! - **Solvers**: Bracketed secant with bisection fallback, plain secant
//! - **Configuration**: Shared tolerance and iteration budget via [`solvers::SolverConfig`]
//!
//! ## Design Philosophy
//!
//! - **Typed failures**: a solver that cannot establish a bracket or runs
//!   out of iterations reports an error, never a quiet NaN
//! - **Numerical Stability**: careful handling of degenerate brackets and
//!   near-parallel secant lines

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::doc_markdown)]

pub mod error;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::solvers::{bracketed_secant, secant, SolverConfig, SolverResult};
}

pub use error::{MathError, MathResult};
