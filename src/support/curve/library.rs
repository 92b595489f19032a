use std::collections::HashMap;

use super::{Bounds, Curve, CurveError, CurveForm, OutputLimits, clamped_evaluate};

/// An untyped curve as it arrives from configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurveDefinition {
    pub form: CurveForm,
    pub coefficients: Vec<f64>,
    /// One interval per independent variable, in `x, y, z` order.
    pub domain: Vec<Bounds>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub output: OutputLimits,
}

impl CurveDefinition {
    fn check(&self, name: &str) -> Result<(), CurveError> {
        if self.domain.len() != self.form.arity() {
            return Err(CurveError::ArityMismatch {
                name: name.to_owned(),
                expected: self.form.arity(),
                actual: self.domain.len(),
            });
        }
        self.form.check_coefficients(&self.coefficients)
    }

    fn evaluate(&self, vars: &[f64]) -> f64 {
        clamped_evaluate(
            self.form,
            &self.coefficients,
            &self.domain,
            self.output,
            vars,
        )
    }
}

/// Named performance curves shared by the models of a simulation.
///
/// The library is the load-time source of curves: models resolve names into
/// typed [`Curve`]s and keep those. The name-based [`evaluate`](Self::evaluate)
/// and [`bounds`](Self::bounds) are for callers that work with identifiers
/// directly.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "HashMap<String, CurveDefinition>", into = "HashMap<String, CurveDefinition>")
)]
pub struct CurveLibrary {
    curves: HashMap<String, CurveDefinition>,
}

impl CurveLibrary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a named curve.
    ///
    /// # Errors
    ///
    /// Returns a [`CurveError`] if the definition is inconsistent with its form.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        definition: CurveDefinition,
    ) -> Result<(), CurveError> {
        let name = name.into();
        definition.check(&name)?;
        self.curves.insert(name, definition);
        Ok(())
    }

    /// Returns the definition registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CurveDefinition> {
        self.curves.get(name)
    }

    /// Resolves `name` into a curve of exactly `N` variables.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::Unknown`] for a missing name and
    /// [`CurveError::ArityMismatch`] if the curve takes a different number of variables.
    pub fn resolve<const N: usize>(&self, name: &str) -> Result<Curve<N>, CurveError> {
        let definition = self.lookup(name)?;
        let domain: [Bounds; N] =
            definition
                .domain
                .clone()
                .try_into()
                .map_err(|_| CurveError::ArityMismatch {
                    name: name.to_owned(),
                    expected: N,
                    actual: definition.form.arity(),
                })?;

        Ok(Curve::new(
            name,
            definition.form,
            definition.coefficients.clone(),
            domain,
        )?
        .with_output_limits(definition.output))
    }

    /// Evaluates a named curve with clamped inputs.
    ///
    /// An unset name (`None`) evaluates to zero.
    ///
    /// # Errors
    ///
    /// Returns a [`CurveError`] for an unknown name or a wrong number of variables.
    pub fn evaluate(&self, name: Option<&str>, vars: &[f64]) -> Result<f64, CurveError> {
        let Some(name) = name else {
            return Ok(0.0);
        };
        let definition = self.lookup(name)?;
        if vars.len() != definition.form.arity() {
            return Err(CurveError::ArityMismatch {
                name: name.to_owned(),
                expected: definition.form.arity(),
                actual: vars.len(),
            });
        }
        Ok(definition.evaluate(vars))
    }

    /// Returns the declared domain of a named curve.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::Unknown`] for a missing name.
    pub fn bounds(&self, name: &str) -> Result<&[Bounds], CurveError> {
        Ok(&self.lookup(name)?.domain)
    }

    fn lookup(&self, name: &str) -> Result<&CurveDefinition, CurveError> {
        self.curves.get(name).ok_or_else(|| CurveError::Unknown {
            name: name.to_owned(),
        })
    }
}

impl TryFrom<HashMap<String, CurveDefinition>> for CurveLibrary {
    type Error = CurveError;

    fn try_from(curves: HashMap<String, CurveDefinition>) -> Result<Self, Self::Error> {
        let mut library = Self::new();
        for (name, definition) in curves {
            library.insert(name, definition)?;
        }
        Ok(library)
    }
}

impl From<CurveLibrary> for HashMap<String, CurveDefinition> {
    fn from(library: CurveLibrary) -> Self {
        library.curves
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn plr_curve() -> CurveDefinition {
        CurveDefinition {
            form: CurveForm::Bicubic,
            coefficients: vec![0.1, 0.0, 0.0, 0.9, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            domain: vec![Bounds::new(24.0, 35.0).unwrap(), Bounds::new(0.1, 1.0).unwrap()],
            output: OutputLimits::default(),
        }
    }

    #[test]
    fn resolves_typed_curves() {
        let mut library = CurveLibrary::new();
        library.insert("EIRFPLR", plr_curve()).unwrap();

        let curve = library.resolve::<2>("EIRFPLR").unwrap();
        assert_eq!(curve.name(), "EIRFPLR");
        assert_relative_eq!(curve.evaluate([30.0, 1.0]), 1.0);

        assert!(matches!(
            library.resolve::<3>("EIRFPLR"),
            Err(CurveError::ArityMismatch {
                expected: 3,
                actual: 2,
                ..
            })
        ));
        assert!(matches!(
            library.resolve::<2>("missing"),
            Err(CurveError::Unknown { .. })
        ));
    }

    #[test]
    fn rejects_domain_of_wrong_length() {
        let mut definition = plr_curve();
        definition.domain.pop();
        let mut library = CurveLibrary::new();
        assert!(library.insert("EIRFPLR", definition).is_err());
    }

    #[test]
    fn evaluates_by_name() {
        let mut library = CurveLibrary::new();
        library.insert("EIRFPLR", plr_curve()).unwrap();

        assert_eq!(library.evaluate(None, &[30.0, 0.5]).unwrap(), 0.0);
        assert_relative_eq!(
            library.evaluate(Some("EIRFPLR"), &[30.0, 0.0]).unwrap(),
            0.1 + 0.9 * 0.1
        );
        assert!(library.evaluate(Some("EIRFPLR"), &[30.0]).is_err());

        assert!(matches!(
            library.evaluate(Some("missing"), &[30.0, 0.5]),
            Err(CurveError::Unknown { .. })
        ));

        let bounds = library.bounds("EIRFPLR").unwrap();
        assert_eq!((bounds[1].min(), bounds[1].max()), (0.1, 1.0));
    }

    #[test]
    fn by_name_matches_resolved_curve() {
        let mut definition = plr_curve();
        definition.output = OutputLimits {
            min: Some(0.2),
            max: None,
        };
        let mut library = CurveLibrary::new();
        library.insert("EIRFPLR", definition).unwrap();
        let curve = library.resolve::<2>("EIRFPLR").unwrap();

        for vars in [[30.0, 0.5], [20.0, 0.0], [40.0, 1.5]] {
            assert_eq!(
                library.evaluate(Some("EIRFPLR"), &vars).unwrap(),
                curve.evaluate(vars)
            );
        }
    }
}
