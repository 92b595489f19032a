//! Reformulated-EIR chiller computation.
//!
//! Everything in here works on plain `f64` values in °C, W, kg/s and J/kg·K,
//! the units the performance curves are fitted in. The public adapter
//! converts to and from [`uom`] quantities at the boundary.

mod boundary;
mod condenser;
mod evaporator;
mod heat_recovery;
mod input;
mod output;
mod performance;
mod spec;
mod state;

#[cfg(test)]
pub(super) mod test_support;

pub use input::{ChillerInput, CondenserInlet, EvaporatorInlet, FlowLock, HeatRecoveryInlet};
pub use output::{ChillerOutput, Resolution};
pub use state::ChillerState;

pub(super) use spec::ChillerSpec;

use crate::support::{diagnostics::DiagnosticSink, fluid::LiquidProperties};

use super::{BoundaryCheckConfig, CondenserSolveConfig};

use input::Conditions;

/// Flows below this are treated as no flow [kg/s].
const MASS_FLOW_TOLERANCE: f64 = 1e-9;

/// Temperature differences below this are treated as zero [K].
const DELTA_TEMP_TOLERANCE: f64 = 1e-4;

/// False-load rates below this are dropped [W].
const SMALL_LOAD: f64 = 1.0;

/// Simulates one call of a chiller and returns its output and next state.
pub(super) fn simulate(
    spec: &ChillerSpec,
    state: &ChillerState,
    input: &ChillerInput,
    fluid: &impl LiquidProperties,
    solve: &CondenserSolveConfig,
    checks: &BoundaryCheckConfig,
    sink: &mut impl DiagnosticSink,
) -> (ChillerOutput, ChillerState) {
    let conditions = Conditions::new(input, fluid);
    let (point, resolution) = condenser::resolve(spec, state, &conditions, solve, sink);

    boundary::check(spec, &conditions, &point, checks, sink);

    let next = state.advance(&point);
    (ChillerOutput::new(input, &point, resolution), next)
}
