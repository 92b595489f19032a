//! Bracketed false-position root finding.
//!
//! [`solve`] needs a bracket `[lower, upper]` over which the residual changes
//! sign. Each iteration places the next trial where the secant through the
//! bracket ends crosses zero, then keeps the sub-interval that still brackets
//! the root. When the same end is retained twice in a row its residual is
//! halved (the Illinois modification) so a convex residual cannot pin one end
//! in place. A trial that lands outside the open bracket falls back to the
//! midpoint.
//!
//! Failing to converge is not an error. The returned [`Solution`] carries a
//! [`Status`] and the model evaluation at the accepted point:
//!
//! - [`Status::Converged`]: the residual met tolerance.
//! - [`Status::BracketCollapsed`]: the bracket narrowed to `x_abs_tol` while
//!   the residual was still above tolerance, as at a discontinuity; the last
//!   trial is returned.
//! - [`Status::IterationLimitExceeded`]: the last trial is returned.
//! - [`Status::NoSolutionInBracket`]: the residual has the same sign at both
//!   ends; the end with the smaller residual is returned and no iterations run.

mod config;
mod error;

pub use config::Config;
pub use error::Error;

use twine_core::{EquationProblem, Model};

/// Outcome of a [`solve`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Converged,
    BracketCollapsed,
    IterationLimitExceeded,
    NoSolutionInBracket,
}

/// Model input and output at the accepted point.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<I, O> {
    pub input: I,
    pub output: O,
}

/// Result of a [`solve`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution<I, O> {
    pub status: Status,
    /// Solver variable at the accepted point.
    pub x: f64,
    /// Residual at the accepted point.
    pub residual: f64,
    /// Number of interior trials evaluated.
    pub iters: usize,
    pub snapshot: Snapshot<I, O>,
}

struct Trial<I, O> {
    x: f64,
    residual: f64,
    snapshot: Snapshot<I, O>,
}

impl<I, O> Trial<I, O> {
    fn into_solution(self, status: Status, iters: usize) -> Solution<I, O> {
        Solution {
            status,
            x: self.x,
            residual: self.residual,
            iters,
            snapshot: self.snapshot,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Side {
    Lower,
    Upper,
}

/// Finds `x` in `bracket` where the problem's residual is zero.
///
/// # Errors
///
/// Returns an [`Error`] if the bracket is not a finite, non-empty interval,
/// if a residual is not finite, or if the model or problem fails.
pub fn solve<M, P>(
    model: &M,
    problem: &P,
    bracket: [f64; 2],
    config: &Config,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    M::Error: std::error::Error + Send + Sync + 'static,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
    P::Error: std::error::Error + Send + Sync + 'static,
{
    let [lower, upper] = bracket;
    if !lower.is_finite() || !upper.is_finite() || lower >= upper {
        return Err(Error::InvalidBracket { lower, upper });
    }

    let evaluate = |x: f64| -> Result<Trial<M::Input, M::Output>, Error> {
        let input = problem
            .input(&[x])
            .map_err(|err| Error::Problem(Box::new(err)))?;
        let output = model
            .call(&input)
            .map_err(|err| Error::Model(Box::new(err)))?;
        let [residual] = problem
            .residuals(&input, &output)
            .map_err(|err| Error::Problem(Box::new(err)))?;
        if !residual.is_finite() {
            return Err(Error::NonFiniteResidual { x });
        }
        Ok(Trial {
            x,
            residual,
            snapshot: Snapshot { input, output },
        })
    };

    let lo = evaluate(lower)?;
    if lo.residual.abs() <= config.residual_tol {
        return Ok(lo.into_solution(Status::Converged, 0));
    }
    let hi = evaluate(upper)?;
    if hi.residual.abs() <= config.residual_tol {
        return Ok(hi.into_solution(Status::Converged, 0));
    }

    if lo.residual.signum() == hi.residual.signum() {
        tracing::trace!(lower, upper, "residual does not change sign over bracket");
        let best = if lo.residual.abs() <= hi.residual.abs() {
            lo
        } else {
            hi
        };
        return Ok(best.into_solution(Status::NoSolutionInBracket, 0));
    }

    let (mut x_lo, mut r_lo) = (lo.x, lo.residual);
    let (mut x_hi, mut r_hi) = (hi.x, hi.residual);
    let mut retained: Option<Side> = None;
    let mut last = None;

    for iter in 1..=config.max_iters {
        let mut x = (x_lo * r_hi - x_hi * r_lo) / (r_hi - r_lo);
        if !x.is_finite() || x <= x_lo || x >= x_hi {
            x = 0.5 * (x_lo + x_hi);
        }

        let trial = evaluate(x)?;
        tracing::trace!(iter, x, residual = trial.residual, "regula falsi trial");

        if trial.residual.abs() <= config.residual_tol {
            return Ok(trial.into_solution(Status::Converged, iter));
        }

        if trial.residual.signum() == r_lo.signum() {
            x_lo = x;
            r_lo = trial.residual;
            if retained == Some(Side::Upper) {
                r_hi *= 0.5;
            }
            retained = Some(Side::Upper);
        } else {
            x_hi = x;
            r_hi = trial.residual;
            if retained == Some(Side::Lower) {
                r_lo *= 0.5;
            }
            retained = Some(Side::Lower);
        }

        if x_hi - x_lo <= config.x_abs_tol {
            return Ok(trial.into_solution(Status::BracketCollapsed, iter));
        }
        last = Some(trial);
    }

    match last {
        Some(trial) => Ok(trial.into_solution(Status::IterationLimitExceeded, config.max_iters)),
        // No interior trial was allowed; report the better end.
        None if lo.residual.abs() <= hi.residual.abs() => {
            Ok(lo.into_solution(Status::IterationLimitExceeded, 0))
        }
        None => Ok(hi.into_solution(Status::IterationLimitExceeded, 0)),
    }
}
