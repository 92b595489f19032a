//! Chiller performance at a trial condenser temperature.

use super::{
    MASS_FLOW_TOLERANCE, SMALL_LOAD, evaporator, heat_recovery, input::Conditions,
    spec::ChillerSpec, state::ChillerState,
};

/// Everything computed for one trial condenser temperature.
///
/// Temperatures are in °C, flows in kg/s, and rates in W.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct OperatingPoint {
    /// The chiller produced cooling calculations (it was on, with flow).
    pub(super) active: bool,
    pub(super) evaporator_outlet: f64,
    pub(super) condenser_outlet: f64,
    pub(super) heat_recovery_outlet: Option<f64>,
    pub(super) evaporator_flow: f64,
    pub(super) condenser_flow: f64,
    pub(super) power: f64,
    pub(super) evaporator_rate: f64,
    pub(super) condenser_rate: f64,
    pub(super) heat_recovery_rate: f64,
    pub(super) false_load: f64,
    pub(super) part_load_ratio: f64,
    pub(super) cycling_ratio: f64,
    pub(super) capacity_modifier: f64,
    pub(super) eir_temperature_modifier: f64,
    pub(super) eir_part_load_modifier: f64,
    /// Load after limiting to what the evaporator stream can give up.
    pub(super) load: f64,
    /// Condenser temperature the curves were evaluated at.
    pub(super) condenser_average: f64,
    pub(super) possible_subcooling: Option<bool>,
    pub(super) zero_evaporator_delta_t: bool,
    pub(super) zero_condenser_flow: bool,
}

impl OperatingPoint {
    /// Inlets passed straight through with nothing transferred.
    fn idle(conditions: &Conditions) -> Self {
        Self {
            active: false,
            evaporator_outlet: conditions.evaporator.inlet,
            condenser_outlet: conditions.condenser.inlet,
            heat_recovery_outlet: conditions.heat_recovery.map(|hr| hr.inlet),
            evaporator_flow: 0.0,
            condenser_flow: 0.0,
            power: 0.0,
            evaporator_rate: 0.0,
            condenser_rate: 0.0,
            heat_recovery_rate: 0.0,
            false_load: 0.0,
            part_load_ratio: 0.0,
            cycling_ratio: 0.0,
            capacity_modifier: 0.0,
            eir_temperature_modifier: 0.0,
            eir_part_load_modifier: 0.0,
            load: conditions.load,
            condenser_average: conditions.condenser.inlet,
            possible_subcooling: None,
            zero_evaporator_delta_t: false,
            zero_condenser_flow: false,
        }
    }
}

/// Evaluates the chiller at `trial` condenser outlet temperature [°C].
///
/// Pure in its arguments; the caller decides what carries into the next call.
pub(super) fn evaluate(
    spec: &ChillerSpec,
    state: &ChillerState,
    conditions: &Conditions,
    trial: f64,
) -> OperatingPoint {
    let mut point = OperatingPoint::idle(conditions);
    let evaporator = &conditions.evaporator;
    let condenser = &conditions.condenser;

    if conditions.is_off() {
        if conditions.flow_locked {
            point.evaporator_flow = evaporator.flow;
        }
        return point;
    }

    let condenser_flow = spec.condenser_flow_max.min(condenser.max_available);
    point.condenser_flow = condenser_flow;
    if condenser_flow < MASS_FLOW_TOLERANCE {
        point.zero_condenser_flow = true;
        return point;
    }

    let heat_recovery_active = spec.heat_recovery.is_some() && conditions.heat_recovery.is_some();
    let condenser_average = state.condenser_average(heat_recovery_active, trial);
    let capacity_modifier = spec
        .capacity_curve
        .evaluate([evaporator.setpoint, condenser_average])
        .max(0.0);
    let available = spec.reference_capacity * capacity_modifier;
    point.condenser_average = condenser_average;
    point.capacity_modifier = capacity_modifier;

    if evaporator.flow == 0.0 {
        point.load = 0.0;
        return point;
    }

    // The evaporator stream can give up no more than cooling it to setpoint.
    let stream_limit =
        (evaporator.max_available * evaporator.cp * (evaporator.inlet - evaporator.setpoint))
            .max(0.0);
    let load = if conditions.load.abs() > stream_limit {
        -stream_limit
    } else {
        conditions.load
    };

    let (side, plr, cycling_ratio, false_load) = if conditions.flow_locked {
        let side = evaporator::locked(
            spec,
            evaporator,
            state.possible_subcooling(),
            load,
            available,
        );

        // Cycling below the minimum part-load ratio, false loading below the
        // minimum unloading ratio.
        let ratio = part_load_ratio(spec, side.rate, available);
        let cycling_ratio = if ratio < spec.min_plr {
            (ratio / spec.min_plr).min(1.0)
        } else {
            1.0
        };
        let plr = if available > 0.0 {
            ratio.max(spec.min_unloading_ratio)
        } else {
            ratio
        };
        let false_load = available * plr * cycling_ratio - side.rate;
        let false_load = if false_load < SMALL_LOAD { 0.0 } else { false_load };
        (side, plr, cycling_ratio, false_load)
    } else {
        let requested = part_load_ratio(spec, load.abs(), available);
        let side = evaporator::unlocked(
            spec,
            evaporator,
            conditions.setpoint_based,
            available * requested,
        );
        let plr = part_load_ratio(spec, side.rate, available);
        (side, plr, 1.0, 0.0)
    };

    let eir_temperature_modifier = spec
        .eir_temperature_curve
        .evaluate([side.outlet, condenser_average])
        .max(0.0);
    let eir_part_load_modifier = spec
        .part_load_modifier(condenser_average, side.outlet, plr)
        .max(0.0);

    let power = available / spec.reference_cop
        * eir_part_load_modifier
        * eir_temperature_modifier
        * cycling_ratio;
    let total_rejected = power * spec.compressor_heat_fraction + side.rate + false_load;

    let (condenser_rate, heat_recovery_rate, heat_recovery_outlet) =
        match (&spec.heat_recovery, &conditions.heat_recovery) {
            (Some(recovery), Some(stream)) => {
                let split =
                    heat_recovery::split(recovery, stream, condenser, condenser_flow, total_rejected);
                (split.condenser, split.recovered, Some(split.outlet))
            }
            (_, stream) => (total_rejected, 0.0, stream.map(|hr| hr.inlet)),
        };

    OperatingPoint {
        active: true,
        evaporator_outlet: side.outlet,
        condenser_outlet: condenser.inlet + condenser_rate / (condenser_flow * condenser.cp),
        heat_recovery_outlet,
        evaporator_flow: side.flow,
        condenser_flow,
        power,
        evaporator_rate: side.rate,
        condenser_rate,
        heat_recovery_rate,
        false_load,
        part_load_ratio: plr,
        cycling_ratio,
        capacity_modifier,
        eir_temperature_modifier,
        eir_part_load_modifier,
        load,
        condenser_average,
        possible_subcooling: side.possible_subcooling,
        zero_evaporator_delta_t: side.zero_delta_t,
        zero_condenser_flow: false,
    }
}

fn part_load_ratio(spec: &ChillerSpec, rate: f64, available: f64) -> f64 {
    if available > 0.0 {
        (rate / available).clamp(0.0, spec.max_plr)
    } else {
        0.0
    }
}
