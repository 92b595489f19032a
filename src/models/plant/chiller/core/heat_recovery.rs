//! Splitting condenser heat between the condenser and a recovery stream.

use super::{
    input::{CondenserConditions, HeatRecoveryConditions},
    spec::HeatRecoverySpec,
};

/// Condenser heat after recovery.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Split {
    /// Heat left for the condenser stream [W].
    pub(super) condenser: f64,
    /// Heat taken by the recovery stream [W].
    pub(super) recovered: f64,
    /// Recovery stream outlet [°C].
    pub(super) outlet: f64,
}

/// Splits `total` condenser heat given the condenser flow.
///
/// Without a recovery setpoint the two streams are blended to a common
/// outlet temperature. With one, recovery heats its stream toward the
/// setpoint. Either way recovery is non-negative, capped at the bundle
/// capacity, and shut off when the recovery inlet exceeds its high limit.
pub(super) fn split(
    spec: &HeatRecoverySpec,
    stream: &HeatRecoveryConditions,
    condenser: &CondenserConditions,
    condenser_flow: f64,
    total: f64,
) -> Split {
    let stream_capacity = stream.flow * stream.cp;

    let mut recovered = match stream.setpoint {
        None => {
            let condenser_capacity = condenser_flow * condenser.cp;
            let combined = stream_capacity + condenser_capacity;
            let mixed_inlet =
                (stream_capacity * stream.inlet + condenser_capacity * condenser.inlet) / combined;
            let mixed_outlet = total / combined + mixed_inlet;
            (stream_capacity * (mixed_outlet - stream.inlet)).max(0.0)
        }
        Some(setpoint) => total.min((stream_capacity * (setpoint - stream.inlet)).max(0.0)),
    }
    .min(spec.capacity_limit);

    if spec
        .inlet_high_limit
        .is_some_and(|limit| stream.inlet > limit)
    {
        recovered = 0.0;
    }

    let outlet = if stream.flow > 0.0 {
        stream.inlet + recovered / stream_capacity
    } else {
        stream.inlet
    };

    Split {
        condenser: total - recovered,
        recovered,
        outlet,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    const CP: f64 = 4180.0;

    fn spec() -> HeatRecoverySpec {
        HeatRecoverySpec {
            capacity_limit: 1.0e6,
            inlet_high_limit: None,
        }
    }

    fn condenser() -> CondenserConditions {
        CondenserConditions {
            inlet: 30.0,
            max_available: 30.0,
            cp: CP,
        }
    }

    fn stream(setpoint: Option<f64>) -> HeatRecoveryConditions {
        HeatRecoveryConditions {
            inlet: 30.0,
            flow: 10.0,
            setpoint,
            cp: CP,
        }
    }

    #[test]
    fn blending_shares_heat_by_capacity_rate() {
        // Equal inlets: heat divides in proportion to m·cp.
        let split = split(&spec(), &stream(None), &condenser(), 30.0, 400_000.0);

        assert_relative_eq!(split.recovered, 100_000.0, epsilon = 1e-6);
        assert_relative_eq!(split.condenser, 300_000.0, epsilon = 1e-6);
        assert_relative_eq!(split.outlet, 30.0 + 100_000.0 / (10.0 * CP), epsilon = 1e-9);
    }

    #[test]
    fn setpoint_limits_recovery() {
        let split = split(&spec(), &stream(Some(32.0)), &condenser(), 30.0, 400_000.0);

        assert_relative_eq!(split.recovered, 10.0 * CP * 2.0, epsilon = 1e-6);
        assert_relative_eq!(split.outlet, 32.0, epsilon = 1e-9);
        assert_relative_eq!(split.recovered + split.condenser, 400_000.0, epsilon = 1e-6);
    }

    #[test]
    fn setpoint_cannot_take_more_than_total() {
        let split = split(&spec(), &stream(Some(60.0)), &condenser(), 30.0, 50_000.0);
        assert_relative_eq!(split.recovered, 50_000.0);
        assert_relative_eq!(split.condenser, 0.0);
    }

    #[test]
    fn capacity_limit_caps_recovery() {
        let spec = HeatRecoverySpec {
            capacity_limit: 20_000.0,
            inlet_high_limit: None,
        };
        let split = split(&spec, &stream(None), &condenser(), 30.0, 400_000.0);
        assert_relative_eq!(split.recovered, 20_000.0);
        assert_relative_eq!(split.condenser, 380_000.0);
    }

    #[test]
    fn hot_inlet_shuts_recovery_off() {
        let spec = HeatRecoverySpec {
            capacity_limit: 1.0e6,
            inlet_high_limit: Some(25.0),
        };
        let split = split(&spec, &stream(None), &condenser(), 30.0, 400_000.0);
        assert_relative_eq!(split.recovered, 0.0);
        assert_relative_eq!(split.condenser, 400_000.0);
        assert_relative_eq!(split.outlet, 30.0);
    }

    #[test]
    fn no_recovery_flow_keeps_inlet_temperature() {
        let stream = HeatRecoveryConditions {
            flow: 0.0,
            ..stream(None)
        };
        let split = split(&spec(), &stream, &condenser(), 30.0, 400_000.0);
        assert_relative_eq!(split.recovered, 0.0);
        assert_relative_eq!(split.outlet, 30.0);
    }
}
