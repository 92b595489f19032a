use uom::si::{
    f64::{MassRate, Power, ThermodynamicTemperature},
    mass_rate::kilogram_per_second,
    power::watt,
};

use crate::support::units::from_celsius;

use super::{input::ChillerInput, performance::OperatingPoint};

/// How the condenser outlet temperature of a call was settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Not cooling; evaluated once at the condenser inlet temperature.
    Direct,

    Converged { iters: usize },

    /// Iteration stopped at its limit; the last trial was accepted.
    IterationLimit { iters: usize },

    /// The curve range did not bracket a solution; evaluated at the condenser
    /// inlet temperature.
    NoSolutionInBracket,

    /// The computed outlet left the curve range; evaluated at the middle of the
    /// range and refined once.
    FallbackAverage,

    /// Iteration failed; evaluated at the condenser inlet temperature.
    Failed,
}

/// Result of one chiller call.
///
/// When the chiller is off, outlets equal inlets and every rate is zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChillerOutput {
    pub evaporator_outlet: ThermodynamicTemperature,
    pub condenser_outlet: ThermodynamicTemperature,

    /// Present when a heat-recovery stream was supplied.
    pub heat_recovery_outlet: Option<ThermodynamicTemperature>,

    pub evaporator_mass_flow: MassRate,
    pub condenser_mass_flow: MassRate,

    /// Electric power.
    pub power: Power,

    /// Cooling delivered to the evaporator stream.
    pub evaporator_heat_rate: Power,

    /// Heat rejected to the condenser stream.
    pub condenser_heat_rate: Power,

    pub heat_recovery_rate: Power,

    /// Capacity spent on false loading below the minimum unloading ratio.
    pub false_load_rate: Power,

    /// Load after limiting to what the evaporator stream can give up.
    pub load: Power,

    pub part_load_ratio: f64,

    /// Fraction of the step the compressor runs.
    pub cycling_ratio: f64,

    pub capacity_modifier: f64,
    pub eir_temperature_modifier: f64,
    pub eir_part_load_modifier: f64,

    pub resolution: Resolution,
}

impl ChillerOutput {
    pub(super) fn new(input: &ChillerInput, point: &OperatingPoint, resolution: Resolution) -> Self {
        let watts = Power::new::<watt>;
        let flow = MassRate::new::<kilogram_per_second>;

        // Pass inlet temperatures through untouched when nothing ran.
        let (evaporator_outlet, condenser_outlet, heat_recovery_outlet) = if point.active {
            (
                from_celsius(point.evaporator_outlet),
                from_celsius(point.condenser_outlet),
                point.heat_recovery_outlet.map(from_celsius),
            )
        } else {
            (
                input.evaporator.temperature,
                input.condenser.temperature,
                input.heat_recovery.map(|hr| hr.temperature),
            )
        };

        Self {
            evaporator_outlet,
            condenser_outlet,
            heat_recovery_outlet,
            evaporator_mass_flow: flow(point.evaporator_flow),
            condenser_mass_flow: flow(point.condenser_flow),
            power: watts(point.power),
            evaporator_heat_rate: watts(point.evaporator_rate),
            condenser_heat_rate: watts(point.condenser_rate),
            heat_recovery_rate: watts(point.heat_recovery_rate),
            false_load_rate: watts(point.false_load),
            load: watts(point.load),
            part_load_ratio: point.part_load_ratio,
            cycling_ratio: point.cycling_ratio,
            capacity_modifier: point.capacity_modifier,
            eir_temperature_modifier: point.eir_temperature_modifier,
            eir_part_load_modifier: point.eir_part_load_modifier,
            resolution,
        }
    }
}
