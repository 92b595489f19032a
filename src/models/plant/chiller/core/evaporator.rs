//! Evaporator flow and outlet temperature for the two loop flow states.
//!
//! While loop flow is unlocked the chiller is the flow authority and sets the
//! evaporator flow from its flow mode. Once the loop locks flow, the chiller
//! takes the node flow as given and finds the outlet temperature and
//! delivered cooling subject to its low-temperature limit, the node minimum,
//! the requested load, and its maximum part-load capacity. Both paths land
//! on `Q = m·cp·(T_in - T_out)`.

use crate::models::plant::chiller::FlowMode;

use super::{
    DELTA_TEMP_TOLERANCE, MASS_FLOW_TOLERANCE, input::EvaporatorConditions, spec::ChillerSpec,
};

/// Evaporator side of an operating point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Evaporator {
    pub(super) flow: f64,
    pub(super) outlet: f64,
    pub(super) rate: f64,
    /// Set only by the flow-unlocked path.
    pub(super) possible_subcooling: Option<bool>,
    pub(super) zero_delta_t: bool,
}

/// Evaporator while the chiller sets its own flow, delivering `rate` [W].
pub(super) fn unlocked(
    spec: &ChillerSpec,
    evaporator: &EvaporatorConditions,
    setpoint_based: bool,
    rate: f64,
) -> Evaporator {
    let mut possible_subcooling = !setpoint_based;
    let available = spec.evaporator_flow_max.min(evaporator.max_available);

    match spec.flow_mode {
        FlowMode::ConstantFlow | FlowMode::NotModulated => {
            let delta_t = if available > 0.0 {
                rate / available / evaporator.cp
            } else {
                0.0
            };
            Evaporator {
                flow: available,
                outlet: evaporator.inlet - delta_t,
                rate,
                possible_subcooling: Some(possible_subcooling),
                zero_delta_t: false,
            }
        }
        FlowMode::LeavingSetpointModulated => {
            let delta_t = evaporator.inlet - evaporator.setpoint;
            if delta_t == 0.0 {
                return Evaporator {
                    flow: 0.0,
                    outlet: evaporator.inlet,
                    rate: 0.0,
                    possible_subcooling: Some(possible_subcooling),
                    zero_delta_t: true,
                };
            }

            let requested = (rate / evaporator.cp / delta_t).max(0.0);
            if requested - spec.evaporator_flow_max > MASS_FLOW_TOLERANCE {
                possible_subcooling = true;
            }
            let flow = requested.min(available);
            Evaporator {
                flow,
                outlet: evaporator.setpoint,
                rate: (flow * evaporator.cp * delta_t).max(0.0),
                possible_subcooling: Some(possible_subcooling),
                zero_delta_t: false,
            }
        }
    }
}

/// Evaporator at the loop's locked node flow.
///
/// `load` is the (negative) cooling request and `available` the capacity at
/// the current condenser temperature.
pub(super) fn locked(
    spec: &ChillerSpec,
    evaporator: &EvaporatorConditions,
    possible_subcooling: bool,
    load: f64,
    available: f64,
) -> Evaporator {
    let EvaporatorConditions {
        inlet, flow, cp, ..
    } = *evaporator;
    let demand = load.abs();

    let (mut outlet, mut rate) = if possible_subcooling {
        (inlet - demand / flow / cp, demand)
    } else {
        let rate = (flow * cp * (inlet - evaporator.setpoint)).max(0.0);
        (evaporator.setpoint, rate)
    };

    for limit in std::iter::once(spec.evaporator_low_limit).chain(evaporator.outlet_min) {
        if outlet < limit {
            outlet = if inlet - limit > DELTA_TEMP_TOLERANCE {
                limit
            } else {
                inlet
            };
            rate = flow * cp * (inlet - outlet);
        }
    }

    for cap in [demand, available * spec.max_plr] {
        if rate > cap {
            if flow > MASS_FLOW_TOLERANCE {
                rate = cap;
                outlet = inlet - rate / flow / cp;
            } else {
                rate = 0.0;
                outlet = inlet;
            }
        }
    }

    Evaporator {
        flow,
        outlet,
        rate,
        possible_subcooling: None,
        zero_delta_t: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::plant::chiller::core::test_support::{CP, spec_with_flow_mode};

    fn conditions(inlet: f64, flow: f64) -> EvaporatorConditions {
        EvaporatorConditions {
            inlet,
            flow,
            max_available: 100.0,
            setpoint: 6.67,
            outlet_min: None,
            cp: CP,
        }
    }

    #[test]
    fn constant_flow_requests_design_flow() {
        let spec = spec_with_flow_mode(FlowMode::ConstantFlow);
        let evaporator = unlocked(&spec, &conditions(12.0, 0.0), false, 300_000.0);

        assert_relative_eq!(evaporator.flow, spec.evaporator_flow_max);
        assert_relative_eq!(
            evaporator.rate,
            evaporator.flow * CP * (12.0 - evaporator.outlet),
            epsilon = 1e-6
        );
        assert_eq!(evaporator.possible_subcooling, Some(true));
    }

    #[test]
    fn modulated_flow_meets_setpoint() {
        let spec = spec_with_flow_mode(FlowMode::LeavingSetpointModulated);
        let evaporator = unlocked(&spec, &conditions(12.0, 0.0), true, 200_000.0);

        assert_relative_eq!(evaporator.outlet, 6.67);
        assert_relative_eq!(evaporator.flow, 200_000.0 / CP / (12.0 - 6.67), epsilon = 1e-9);
        assert_relative_eq!(evaporator.rate, 200_000.0, epsilon = 1e-6);
        assert_eq!(evaporator.possible_subcooling, Some(false));
    }

    #[test]
    fn modulated_flow_beyond_design_allows_subcooling() {
        let spec = spec_with_flow_mode(FlowMode::LeavingSetpointModulated);
        let evaporator = unlocked(&spec, &conditions(7.0, 0.0), true, 300_000.0);

        assert_relative_eq!(evaporator.flow, spec.evaporator_flow_max);
        assert_eq!(evaporator.possible_subcooling, Some(true));
        assert!(evaporator.rate < 300_000.0);
    }

    #[test]
    fn modulated_flow_with_no_temperature_difference() {
        let spec = spec_with_flow_mode(FlowMode::LeavingSetpointModulated);
        let evaporator = unlocked(&spec, &conditions(6.67, 0.0), true, 300_000.0);

        assert!(evaporator.zero_delta_t);
        assert_relative_eq!(evaporator.flow, 0.0);
        assert_relative_eq!(evaporator.rate, 0.0);
        assert_relative_eq!(evaporator.outlet, 6.67);
    }

    #[test]
    fn locked_flow_drives_outlet_to_setpoint() {
        let spec = spec_with_flow_mode(FlowMode::NotModulated);
        let evaporator = locked(&spec, &conditions(12.0, 10.0), false, -500_000.0, 600_000.0);

        assert_relative_eq!(evaporator.outlet, 6.67);
        assert_relative_eq!(evaporator.rate, 10.0 * CP * (12.0 - 6.67), epsilon = 1e-6);
    }

    #[test]
    fn locked_flow_caps_at_load() {
        let spec = spec_with_flow_mode(FlowMode::NotModulated);
        let evaporator = locked(&spec, &conditions(12.0, 10.0), false, -100_000.0, 600_000.0);

        assert_relative_eq!(evaporator.rate, 100_000.0, epsilon = 1e-6);
        assert_relative_eq!(evaporator.outlet, 12.0 - 100_000.0 / (10.0 * CP), epsilon = 1e-9);
    }

    #[test]
    fn locked_flow_respects_low_limit() {
        let spec = spec_with_flow_mode(FlowMode::NotModulated);
        // Subcooling to meet the load would drop well below the 2 °C limit.
        let evaporator = locked(&spec, &conditions(8.0, 5.0), true, -200_000.0, 600_000.0);

        assert_relative_eq!(evaporator.outlet, spec.evaporator_low_limit);
        assert_relative_eq!(
            evaporator.rate,
            5.0 * CP * (8.0 - spec.evaporator_low_limit),
            epsilon = 1e-6
        );
    }

    #[test]
    fn locked_flow_respects_node_minimum() {
        let spec = spec_with_flow_mode(FlowMode::NotModulated);
        let conditions = EvaporatorConditions {
            outlet_min: Some(7.5),
            ..conditions(12.0, 10.0)
        };
        let evaporator = locked(&spec, &conditions, false, -500_000.0, 600_000.0);

        assert_relative_eq!(evaporator.outlet, 7.5);
        assert_relative_eq!(evaporator.rate, 10.0 * CP * 4.5, epsilon = 1e-6);
    }

    #[test]
    fn locked_flow_caps_at_available_capacity() {
        let spec = spec_with_flow_mode(FlowMode::NotModulated);
        let evaporator = locked(&spec, &conditions(12.0, 20.0), false, -500_000.0, 250_000.0);

        assert_relative_eq!(evaporator.rate, 250_000.0 * spec.max_plr, epsilon = 1e-6);
    }

    #[test]
    fn both_flow_states_satisfy_the_same_balance() {
        let spec = spec_with_flow_mode(FlowMode::NotModulated);
        let free = unlocked(&spec, &conditions(12.0, 0.0), true, 250_000.0);

        // Lock the loop at the flow the unlocked call requested.
        let held = locked(
            &spec,
            &conditions(12.0, free.flow),
            true,
            -250_000.0,
            600_000.0,
        );

        assert_relative_eq!(held.rate, free.rate, epsilon = 1e-6);
        assert_relative_eq!(held.outlet, free.outlet, epsilon = 1e-9);
        for side in [free, held] {
            assert_relative_eq!(
                side.rate,
                side.flow * CP * (12.0 - side.outlet),
                epsilon = 1e-6
            );
        }
    }
}
