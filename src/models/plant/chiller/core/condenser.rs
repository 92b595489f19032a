//! Resolving the condenser outlet temperature.
//!
//! The curves are evaluated at the condenser outlet temperature, which in
//! turn depends on the heat rejected. The temperature is found by bracketed
//! false position over the range the curves are fitted for:
//!
//! 1. With no cooling requested the model is evaluated once at the condenser
//!    inlet temperature.
//! 2. Otherwise the model is evaluated at both ends of the curve range. If the
//!    computed outlet lies inside the range at both ends the residual
//!    `trial - computed` is solved for zero.
//! 3. If not, the model is evaluated at the middle of the range and once more
//!    at the outlet that produced.
//!
//! Non-convergence is never an error: the best available point is accepted
//! and a diagnostic is reported.

mod problem;

use uom::si::f64::ThermodynamicTemperature;

use crate::{
    models::plant::chiller::{CondenserSolveConfig, Resolution},
    support::{
        diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink},
        equation::regula_falsi::{self, Solution, Status},
    },
};

use super::{input::Conditions, performance::OperatingPoint, spec::ChillerSpec, state::ChillerState};

use problem::{CondenserOutletProblem, PerformanceModel};

/// Finds the operating point whose condenser outlet matches its trial value.
pub(super) fn resolve(
    spec: &ChillerSpec,
    state: &ChillerState,
    conditions: &Conditions,
    config: &CondenserSolveConfig,
    sink: &mut impl DiagnosticSink,
) -> (OperatingPoint, Resolution) {
    let model = PerformanceModel::new(spec, state, conditions);

    let (point, resolution) = if conditions.is_off() {
        (model.at(conditions.condenser.inlet), Resolution::Direct)
    } else {
        bracketed(&model, spec, conditions, config, sink)
    };

    report_flow_conditions(spec, conditions, &point, sink);
    (point, resolution)
}

fn bracketed(
    model: &PerformanceModel<'_>,
    spec: &ChillerSpec,
    conditions: &Conditions,
    config: &CondenserSolveConfig,
    sink: &mut impl DiagnosticSink,
) -> (OperatingPoint, Resolution) {
    let [lower, upper] = spec.condenser_bracket();
    let at_lower = model.at(lower);
    let at_upper = model.at(upper);

    if !(at_lower.condenser_outlet > lower && at_upper.condenser_outlet < upper) {
        let middle = model.at(0.5 * (lower + upper));
        return (
            model.at(middle.condenser_outlet),
            Resolution::FallbackAverage,
        );
    }

    let result = regula_falsi::solve(
        model,
        &CondenserOutletProblem,
        [lower, upper],
        &config.regula_falsi(),
    );
    accept(result, model, spec, conditions, sink)
}

/// Maps a solver outcome to the accepted operating point.
///
/// With the computed outlet inside the range at both ends the residual
/// changes sign, so `resolve` never produces the last two outcomes.
fn accept(
    result: Result<Solution<ThermodynamicTemperature, OperatingPoint>, regula_falsi::Error>,
    model: &PerformanceModel<'_>,
    spec: &ChillerSpec,
    conditions: &Conditions,
    sink: &mut impl DiagnosticSink,
) -> (OperatingPoint, Resolution) {
    let solution = match result {
        Ok(solution) => solution,
        Err(error) => {
            sink.report(Diagnostic::severe(
                &spec.name,
                DiagnosticKind::SolverFailed,
                format!("condenser outlet temperature iteration failed: {error}"),
            ));
            return (model.at(conditions.condenser.inlet), Resolution::Failed);
        }
    };

    let point = solution.snapshot.output;
    match solution.status {
        Status::Converged => (
            point,
            Resolution::Converged {
                iters: solution.iters,
            },
        ),
        // The outlet is pinned to within the bracket tolerance.
        Status::BracketCollapsed => {
            tracing::debug!(
                chiller = %spec.name,
                residual = solution.residual,
                "condenser outlet bracket collapsed"
            );
            (
                point,
                Resolution::Converged {
                    iters: solution.iters,
                },
            )
        }
        Status::IterationLimitExceeded => {
            if !conditions.warmup {
                sink.report(Diagnostic::recurring(
                    &spec.name,
                    DiagnosticKind::IterationLimit,
                    "iteration limit exceeded calculating condenser outlet temperature; \
                     using the non-converged temperature",
                    point.condenser_outlet,
                ));
            }
            (
                point,
                Resolution::IterationLimit {
                    iters: solution.iters,
                },
            )
        }
        Status::NoSolutionInBracket => {
            let point = model.at(conditions.condenser.inlet);
            if !conditions.warmup {
                sink.report(Diagnostic::recurring(
                    &spec.name,
                    DiagnosticKind::NoSolutionInBracket,
                    "condenser outlet temperature not bracketed by the curve limits; \
                     evaluating at the condenser inlet temperature",
                    point.condenser_outlet,
                ));
            }
            (point, Resolution::NoSolutionInBracket)
        }
    }
}

fn report_flow_conditions(
    spec: &ChillerSpec,
    conditions: &Conditions,
    point: &OperatingPoint,
    sink: &mut impl DiagnosticSink,
) {
    if point.zero_condenser_flow {
        sink.report(Diagnostic::severe(
            &spec.name,
            DiagnosticKind::ZeroCondenserFlow,
            "condenser flow is zero while the chiller is running",
        ));
    }

    if point.zero_evaporator_delta_t && !conditions.warmup {
        sink.report(Diagnostic::recurring(
            &spec.name,
            DiagnosticKind::ZeroEvaporatorDeltaT,
            "evaporator inlet equals the outlet setpoint in the modulated flow calculation",
            0.0,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;
    use twine_core::EquationProblem;
    use uom::si::temperature_interval::kelvin;

    use crate::{
        models::plant::chiller::{
            FlowMode,
            core::test_support::{conditions, spec, spec_with_flow_mode, spec_with_lift_curve},
        },
        support::{
            diagnostics::{Diagnostic, Severity},
            units::{celsius, from_celsius},
        },
    };

    /// Condenser outlet residual shifted by a constant, in K.
    struct ShiftedResidual(f64);

    impl EquationProblem<1> for ShiftedResidual {
        type Input = ThermodynamicTemperature;
        type Output = OperatingPoint;
        type Error = Infallible;

        fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
            Ok(from_celsius(x[0]))
        }

        fn residuals(
            &self,
            input: &Self::Input,
            output: &Self::Output,
        ) -> Result<[f64; 1], Self::Error> {
            Ok([celsius(*input) - output.condenser_outlet + self.0])
        }
    }

    fn solve(conditions: &Conditions) -> (OperatingPoint, Resolution, Vec<Diagnostic>) {
        solve_with(&spec(), conditions, &CondenserSolveConfig::default())
    }

    fn solve_with(
        spec: &ChillerSpec,
        conditions: &Conditions,
        config: &CondenserSolveConfig,
    ) -> (OperatingPoint, Resolution, Vec<Diagnostic>) {
        let mut diagnostics = Vec::new();
        let (point, resolution) =
            resolve(spec, &ChillerState::default(), conditions, config, &mut diagnostics);
        (point, resolution, diagnostics)
    }

    #[test]
    fn rated_chiller_at_sixty_percent_load() {
        let (point, resolution, diagnostics) = solve(&conditions(-300_000.0));

        assert!(matches!(resolution, Resolution::Converged { .. }));
        assert!(diagnostics.is_empty());
        assert!(point.part_load_ratio > 0.55 && point.part_load_ratio < 0.65);
        assert!(point.power > 0.0);
        assert!(point.condenser_rate > point.evaporator_rate);
        assert_relative_eq!(point.evaporator_rate, 300_000.0, epsilon = 1e-6);
        // Curves were evaluated at the temperature the condenser produces.
        assert_relative_eq!(point.condenser_average, point.condenser_outlet, epsilon = 1e-4);
    }

    #[test]
    fn converged_point_closes_energy_balance() {
        let spec = spec();
        let (point, _, _) = solve(&conditions(-420_000.0));

        assert_relative_eq!(
            point.condenser_rate,
            point.power * spec.compressor_heat_fraction + point.evaporator_rate + point.false_load,
            max_relative = 1e-12
        );
    }

    #[test]
    fn off_evaluates_directly() {
        let (point, resolution, diagnostics) = solve(&conditions(5_000.0));

        assert_eq!(resolution, Resolution::Direct);
        assert!(diagnostics.is_empty());
        assert_eq!(point.power, 0.0);
        assert_eq!(point.condenser_outlet, 29.4);
    }

    #[test]
    fn outlet_outside_curve_range_falls_back() {
        // Condenser water already hotter than every curve's upper limit.
        let mut conditions = conditions(-300_000.0);
        conditions.condenser.inlet = 45.0;

        let (point, resolution, _) = solve(&conditions);

        assert_eq!(resolution, Resolution::FallbackAverage);
        assert!(point.condenser_outlet > 45.0);
    }

    #[test]
    fn iteration_limit_accepts_last_trial() {
        let config = CondenserSolveConfig {
            max_iters: 1,
            ..CondenserSolveConfig::default()
        };
        let (point, resolution, diagnostics) =
            solve_with(&spec(), &conditions(-300_000.0), &config);

        assert_eq!(resolution, Resolution::IterationLimit { iters: 1 });
        assert!(point.power > 0.0);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::IterationLimit);
    }

    #[test]
    fn iteration_limit_is_quiet_during_warmup() {
        let config = CondenserSolveConfig {
            max_iters: 1,
            ..CondenserSolveConfig::default()
        };
        let mut conditions = conditions(-300_000.0);
        conditions.warmup = true;

        let (_, _, diagnostics) = solve_with(&spec(), &conditions, &config);

        assert!(diagnostics.is_empty());
    }

    #[test]
    fn zero_condenser_flow_is_severe() {
        let mut conditions = conditions(-300_000.0);
        conditions.condenser.max_available = 0.0;

        let (point, _, diagnostics) = solve(&conditions);

        assert_eq!(point.power, 0.0);
        assert!(
            diagnostics
                .iter()
                .any(|d| d.kind == DiagnosticKind::ZeroCondenserFlow)
        );
    }

    #[test]
    fn zero_evaporator_delta_t_is_reported() {
        let spec = spec_with_flow_mode(FlowMode::LeavingSetpointModulated);
        let mut conditions = conditions(-300_000.0);
        conditions.flow_locked = false;
        conditions.evaporator.inlet = conditions.evaporator.setpoint;

        let (point, _, diagnostics) =
            solve_with(&spec, &conditions, &CondenserSolveConfig::default());

        assert_eq!(point.evaporator_flow, 0.0);
        assert!(
            diagnostics
                .iter()
                .any(|d| d.kind == DiagnosticKind::ZeroEvaporatorDeltaT)
        );
    }

    #[test]
    fn converges_under_lift_part_load_curve() {
        let spec = spec_with_lift_curve();
        let config = CondenserSolveConfig::default();

        let (point, resolution, diagnostics) =
            solve_with(&spec, &conditions(-300_000.0), &config);

        assert!(matches!(resolution, Resolution::Converged { .. }));
        assert!(diagnostics.is_empty());
        assert_eq!(spec.condenser_bracket(), [20.0, 40.0]);
        assert!(point.eir_part_load_modifier > 0.0);
        // Without heat recovery the curves see the trial temperature.
        assert!(
            (point.condenser_average - point.condenser_outlet).abs()
                <= config.tolerance.get::<kelvin>()
        );
    }

    #[test]
    fn residual_without_sign_change_falls_back_to_inlet() {
        let spec = spec();
        let state = ChillerState::default();
        let conditions = conditions(-300_000.0);
        let model = PerformanceModel::new(&spec, &state, &conditions);
        let result = regula_falsi::solve(
            &model,
            &ShiftedResidual(1_000.0),
            spec.condenser_bracket(),
            &CondenserSolveConfig::default().regula_falsi(),
        );
        let mut diagnostics: Vec<Diagnostic> = Vec::new();

        let (point, resolution) = accept(result, &model, &spec, &conditions, &mut diagnostics);

        assert_eq!(resolution, Resolution::NoSolutionInBracket);
        assert_eq!(point, model.at(conditions.condenser.inlet));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::NoSolutionInBracket);
    }

    #[test]
    fn solver_error_is_severe() {
        let spec = spec();
        let state = ChillerState::default();
        let conditions = conditions(-300_000.0);
        let model = PerformanceModel::new(&spec, &state, &conditions);
        let result = regula_falsi::solve(
            &model,
            &CondenserOutletProblem,
            [40.0, 20.0],
            &CondenserSolveConfig::default().regula_falsi(),
        );
        let mut diagnostics: Vec<Diagnostic> = Vec::new();

        let (point, resolution) = accept(result, &model, &spec, &conditions, &mut diagnostics);

        assert_eq!(resolution, Resolution::Failed);
        assert_eq!(point.condenser_average, conditions.condenser.inlet);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::SolverFailed);
        assert_eq!(diagnostics[0].severity, Severity::Severe);
    }

    #[test]
    fn collapsed_bracket_is_accepted() {
        let spec = spec();
        let state = ChillerState::default();
        let conditions = conditions(-300_000.0);
        let model = PerformanceModel::new(&spec, &state, &conditions);
        let config = regula_falsi::Config {
            x_abs_tol: 5.0,
            residual_tol: 0.0,
            max_iters: 100,
        };
        let result = regula_falsi::solve(
            &model,
            &CondenserOutletProblem,
            spec.condenser_bracket(),
            &config,
        );
        let mut diagnostics: Vec<Diagnostic> = Vec::new();

        let (_, resolution) = accept(result, &model, &spec, &conditions, &mut diagnostics);

        assert!(matches!(resolution, Resolution::Converged { .. }));
        assert!(diagnostics.is_empty());
    }
}
