//! Checks of the accepted operating point against the curves.
//!
//! Curve inputs are always clamped, so an operating point outside a curve's
//! fitted range still produces numbers. These checks tell the user when that
//! happened, or when a curve went negative and was floored. They only run once
//! conditions are settled: not on the first iteration of a time step, not
//! during warm-up, and not while loop flow is unlocked.

use crate::{
    models::plant::chiller::BoundaryCheckConfig,
    support::{
        curve::Bounds,
        diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink},
    },
};

use super::{
    input::Conditions,
    performance::OperatingPoint,
    spec::{ChillerSpec, PartLoadCurve},
};

pub(super) fn check(
    spec: &ChillerSpec,
    conditions: &Conditions,
    point: &OperatingPoint,
    config: &BoundaryCheckConfig,
    sink: &mut impl DiagnosticSink,
) {
    if !point.active || conditions.first_iteration || conditions.warmup || !conditions.flow_locked {
        return;
    }
    if config.check_curve_ranges {
        check_ranges(spec, point, sink);
    }
    if config.check_negative_outputs {
        check_negative_outputs(spec, conditions, point, sink);
    }
}

fn check_ranges(spec: &ChillerSpec, point: &OperatingPoint, sink: &mut impl DiagnosticSink) {
    let [capacity_evaporator, capacity_condenser] = *spec.capacity_curve.bounds();
    let [eir_evaporator, eir_condenser] = *spec.eir_temperature_curve.bounds();
    let part_load = &spec.eir_part_load_curve;

    let mut checks = vec![
        Range {
            kind: DiagnosticKind::CapFtEvaporatorRange,
            quantity: "evaporator outlet temperature",
            curve: spec.capacity_curve.name(),
            bounds: capacity_evaporator,
            value: point.evaporator_outlet,
        },
        Range {
            kind: DiagnosticKind::EirFtEvaporatorRange,
            quantity: "evaporator outlet temperature",
            curve: spec.eir_temperature_curve.name(),
            bounds: eir_evaporator,
            value: point.evaporator_outlet,
        },
        Range {
            kind: DiagnosticKind::CapFtCondenserRange,
            quantity: "condenser outlet temperature",
            curve: spec.capacity_curve.name(),
            bounds: capacity_condenser,
            value: point.condenser_outlet,
        },
        Range {
            kind: DiagnosticKind::EirFtCondenserRange,
            quantity: "condenser outlet temperature",
            curve: spec.eir_temperature_curve.name(),
            bounds: eir_condenser,
            value: point.condenser_outlet,
        },
    ];
    if let Some(bounds) = part_load.condenser_bounds() {
        checks.push(Range {
            kind: DiagnosticKind::EirFplrCondenserRange,
            quantity: "condenser outlet temperature",
            curve: part_load.name(),
            bounds,
            value: point.condenser_outlet,
        });
    }
    checks.push(Range {
        kind: DiagnosticKind::EirFplrPartLoadRange,
        quantity: "part-load ratio",
        curve: part_load.name(),
        bounds: part_load.part_load_bounds(),
        value: point.part_load_ratio,
    });

    for range in checks.into_iter().filter(|range| !range.bounds.contains(range.value)) {
        sink.report(Diagnostic::recurring(
            &spec.name,
            range.kind,
            format!(
                "{} ({:.2}) is outside [{}, {}] of curve `{}`",
                range.quantity,
                range.value,
                range.bounds.min(),
                range.bounds.max(),
                range.curve,
            ),
            range.value,
        ));
    }
}

struct Range<'a> {
    kind: DiagnosticKind,
    quantity: &'static str,
    curve: &'a str,
    bounds: Bounds,
    value: f64,
}

/// Re-evaluates the curves at the accepted outlets, without flooring.
fn check_negative_outputs(
    spec: &ChillerSpec,
    conditions: &Conditions,
    point: &OperatingPoint,
    sink: &mut impl DiagnosticSink,
) {
    let condenser = point.condenser_outlet;
    let evaporator = point.evaporator_outlet;
    let plr = point.part_load_ratio;

    let capacity = spec
        .capacity_curve
        .evaluate([conditions.evaporator.setpoint, condenser]);
    let eir = spec.eir_temperature_curve.evaluate([evaporator, condenser]);
    let part_load = spec.part_load_modifier(condenser, evaporator, plr);

    let part_load_at = match spec.eir_part_load_curve {
        PartLoadCurve::LeavingCondenser(_) => {
            format!("condenser outlet {condenser:.2} °C and part-load ratio {plr:.3}")
        }
        PartLoadCurve::Lift(_) => format!(
            "lift {:.2} K and part-load ratio {plr:.3}",
            condenser - evaporator
        ),
    };

    let outputs = [
        (
            DiagnosticKind::CapFtNegative,
            spec.capacity_curve.name(),
            capacity,
            format!(
                "evaporator setpoint {:.2} °C and condenser outlet {condenser:.2} °C",
                conditions.evaporator.setpoint
            ),
        ),
        (
            DiagnosticKind::EirFtNegative,
            spec.eir_temperature_curve.name(),
            eir,
            format!("evaporator outlet {evaporator:.2} °C and condenser outlet {condenser:.2} °C"),
        ),
        (
            DiagnosticKind::EirFplrNegative,
            spec.eir_part_load_curve.name(),
            part_load,
            part_load_at,
        ),
    ];

    for (kind, curve, value, at) in outputs {
        if value < 0.0 {
            sink.report(Diagnostic::recurring(
                &spec.name,
                kind,
                format!("curve `{curve}` is negative ({value:.3}) at {at}; using zero"),
                value,
            ));
        }
    }
}
