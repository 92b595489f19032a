//! Solvers for scalar equation problems.
//!
//! An [`EquationProblem`] maps a solver variable `x` to a model input and
//! computes a residual from the model output. Solvers in this module drive
//! that residual to zero and return the final model evaluation alongside the
//! root, so callers never have to re-run the model to recover the state at
//! the accepted point.
//!
//! # Solvers
//!
//! - [`regula_falsi`]: bracketed false position with Illinois weighting and
//!   a bisection safeguard
//!
//! [`EquationProblem`]: twine_core::EquationProblem

pub mod regula_falsi;
