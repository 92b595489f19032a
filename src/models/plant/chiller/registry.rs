use std::collections::HashSet;

use crate::support::{curve::CurveLibrary, diagnostics::DiagnosticSink, fluid::LiquidProperties};

use super::{
    BoundaryCheckConfig, ChillerConfig, ChillerConfigError, ChillerError, ChillerInput,
    ChillerModel, ChillerOutput, ChillerState, CondenserSolveConfig,
};

/// Identifies a chiller inside a [`ChillerRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChillerHandle(usize);

impl ChillerHandle {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A set of loaded chillers and their carried state.
///
/// All chillers share one loop fluid.
#[derive(Debug, Clone)]
pub struct ChillerRegistry<F> {
    models: Vec<ChillerModel<F>>,
    states: Vec<ChillerState>,
}

impl<F: LiquidProperties + Clone> ChillerRegistry<F> {
    /// Validates and loads every configuration.
    ///
    /// Handles are assigned in configuration order.
    ///
    /// # Errors
    ///
    /// Returns the first [`ChillerConfigError`] found, including
    /// [`ChillerConfigError::DuplicateName`] for a repeated name.
    pub fn load<'a>(
        configs: impl IntoIterator<Item = &'a ChillerConfig>,
        curves: &CurveLibrary,
        fluid: F,
        sink: &mut impl DiagnosticSink,
    ) -> Result<Self, ChillerConfigError> {
        let mut names = HashSet::new();
        let mut models = Vec::new();

        for config in configs {
            if !names.insert(config.name.as_str()) {
                return Err(ChillerConfigError::DuplicateName {
                    chiller: config.name.clone(),
                });
            }
            models.push(ChillerModel::new(config, curves, fluid.clone(), sink)?);
        }

        tracing::debug!(count = models.len(), "loaded chillers");

        let states = vec![ChillerState::default(); models.len()];
        Ok(Self { models, states })
    }
}

impl<F: LiquidProperties> ChillerRegistry<F> {
    /// Applies `solve` to every chiller.
    #[must_use]
    pub fn with_solve_config(mut self, solve: CondenserSolveConfig) -> Self {
        self.models = self
            .models
            .into_iter()
            .map(|model| model.with_solve_config(solve))
            .collect();
        self
    }

    /// Applies `checks` to every chiller.
    #[must_use]
    pub fn with_boundary_checks(mut self, checks: BoundaryCheckConfig) -> Self {
        self.models = self
            .models
            .into_iter()
            .map(|model| model.with_boundary_checks(checks))
            .collect();
        self
    }

    /// Looks up a chiller by name.
    #[must_use]
    pub fn handle(&self, name: &str) -> Option<ChillerHandle> {
        self.models
            .iter()
            .position(|model| model.name() == name)
            .map(ChillerHandle)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Returns the state carried into the chiller's next call.
    ///
    /// # Errors
    ///
    /// Returns [`ChillerError::UnknownHandle`] for a handle from another registry.
    pub fn state(&self, handle: ChillerHandle) -> Result<&ChillerState, ChillerError> {
        self.states
            .get(handle.0)
            .ok_or(ChillerError::UnknownHandle(handle.0))
    }

    /// Runs one call of the chiller behind `handle` and advances its state.
    ///
    /// # Errors
    ///
    /// Returns [`ChillerError::UnknownHandle`] for a handle from another registry.
    pub fn simulate(
        &mut self,
        handle: ChillerHandle,
        input: &ChillerInput,
        sink: &mut impl DiagnosticSink,
    ) -> Result<ChillerOutput, ChillerError> {
        let (Some(model), Some(state)) =
            (self.models.get(handle.0), self.states.get_mut(handle.0))
        else {
            return Err(ChillerError::UnknownHandle(handle.0));
        };

        let (output, next) = model.step(input, state, sink);
        *state = next;
        Ok(output)
    }
}
