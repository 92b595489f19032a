/// Tolerances and limits for [`solve`](super::solve).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Maximum number of interior trials.
    pub max_iters: usize,

    /// Stop once the bracket is no wider than this.
    pub x_abs_tol: f64,

    /// Converged once the residual magnitude is no larger than this.
    pub residual_tol: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_iters: 100,
            x_abs_tol: 1e-12,
            residual_tol: 1e-10,
        }
    }
}
