//! Empirical performance curves.
//!
//! Equipment models describe off-design behavior with polynomial fits over
//! one to three independent variables (temperatures, part-load ratio, lift).
//! A [`Curve<N>`] is such a fit with its arity fixed at the type level, so a
//! capacity curve that needs two variables can never be called with three.
//!
//! # Domain clamping
//!
//! Every curve carries a declared `[min, max]` domain per variable. Inputs
//! outside the domain are clamped to the nearest bound before the polynomial
//! is evaluated, so a curve never extrapolates:
//!
//! ```
//! use plant_models::support::curve::{Bounds, Curve, CurveForm};
//!
//! let cap_ft = Curve::new(
//!     "CapFT",
//!     CurveForm::Biquadratic,
//!     vec![1.0, 0.1, 0.0, -0.01, 0.0, 0.0],
//!     [Bounds::new(5.0, 10.0)?, Bounds::new(24.0, 35.0)?],
//! )?;
//!
//! assert_eq!(cap_ft.evaluate([12.0, 30.0]), cap_ft.evaluate([10.0, 30.0]));
//! # Ok::<(), plant_models::support::curve::CurveError>(())
//! ```
//!
//! The domain stays queryable through [`Curve::bounds`] so callers can report
//! when an operating point left the fitted range.
//!
//! # Named curves
//!
//! [`CurveLibrary`] holds untyped [`CurveDefinition`]s by name, the way
//! curves arrive from configuration. Models resolve the names they need into
//! typed curves once at load time with [`CurveLibrary::resolve`].

mod error;
mod form;
mod library;

pub use error::CurveError;
pub use form::CurveForm;
pub use library::{CurveDefinition, CurveLibrary};

/// Closed interval `[min, max]` for one independent variable or the output.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "[f64; 2]", into = "[f64; 2]")
)]
pub struct Bounds {
    min: f64,
    max: f64,
}

impl Bounds {
    /// Creates bounds, rejecting non-finite or inverted limits.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidDomain`] if `min > max` or either limit is not finite.
    pub fn new(min: f64, max: f64) -> Result<Self, CurveError> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(CurveError::InvalidDomain { min, max });
        }
        Ok(Self { min, max })
    }

    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Returns `value` limited to the interval.
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Returns `true` if `value` lies inside the interval, bounds included.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

impl TryFrom<[f64; 2]> for Bounds {
    type Error = CurveError;

    fn try_from([min, max]: [f64; 2]) -> Result<Self, Self::Error> {
        Self::new(min, max)
    }
}

impl From<Bounds> for [f64; 2] {
    fn from(bounds: Bounds) -> Self {
        [bounds.min, bounds.max]
    }
}

/// Optional limits applied to a curve's output after evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutputLimits {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl OutputLimits {
    fn apply(&self, value: f64) -> f64 {
        let value = self.min.map_or(value, |min| value.max(min));
        self.max.map_or(value, |max| value.min(max))
    }
}

/// A performance curve of `N` independent variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve<const N: usize> {
    name: String,
    form: CurveForm,
    coefficients: Vec<f64>,
    domain: [Bounds; N],
    output: OutputLimits,
}

impl<const N: usize> Curve<N> {
    /// Creates a curve after checking that `form` takes `N` variables and
    /// that the coefficient set matches the form.
    ///
    /// # Errors
    ///
    /// Returns a [`CurveError`] on an arity mismatch, a wrong coefficient
    /// count, or a non-finite coefficient.
    pub fn new(
        name: impl Into<String>,
        form: CurveForm,
        coefficients: Vec<f64>,
        domain: [Bounds; N],
    ) -> Result<Self, CurveError> {
        let name = name.into();
        if form.arity() != N {
            return Err(CurveError::ArityMismatch {
                name,
                expected: N,
                actual: form.arity(),
            });
        }
        form.check_coefficients(&coefficients)?;

        Ok(Self {
            name,
            form,
            coefficients,
            domain,
            output: OutputLimits::default(),
        })
    }

    /// Sets limits applied to the evaluated output.
    #[must_use]
    pub fn with_output_limits(mut self, output: OutputLimits) -> Self {
        self.output = output;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn form(&self) -> CurveForm {
        self.form
    }

    /// Returns the declared domain of each independent variable.
    #[must_use]
    pub fn bounds(&self) -> &[Bounds; N] {
        &self.domain
    }

    /// Evaluates the curve with each input clamped to its declared domain.
    #[must_use]
    pub fn evaluate(&self, vars: [f64; N]) -> f64 {
        clamped_evaluate(
            self.form,
            &self.coefficients,
            &self.domain,
            self.output,
            &vars,
        )
    }
}

/// Shared by typed curves and by-name library evaluation.
fn clamped_evaluate(
    form: CurveForm,
    coefficients: &[f64],
    domain: &[Bounds],
    output: OutputLimits,
    vars: &[f64],
) -> f64 {
    let mut clamped = [0.0; 3];
    for (slot, (value, bounds)) in clamped.iter_mut().zip(vars.iter().zip(domain)) {
        *slot = bounds.clamp(*value);
    }
    output.apply(form.polynomial(coefficients, clamped))
}
