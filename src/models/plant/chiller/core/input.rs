use uom::si::{
    f64::{MassRate, Power, ThermodynamicTemperature},
    mass_rate::kilogram_per_second,
    power::watt,
    specific_heat_capacity::joule_per_kilogram_kelvin,
};

use crate::support::{fluid::LiquidProperties, units::celsius};

/// Loop conditions seen by a chiller for one call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChillerInput {
    /// Requested evaporator load. Negative values request cooling.
    pub load: Power,

    pub running: bool,

    /// First plant iteration of the current time step.
    pub first_iteration: bool,

    /// Warm-up days are being simulated; suppresses diagnostics.
    pub warmup: bool,

    pub flow_lock: FlowLock,

    /// The chiller is dispatched by a setpoint-based operation scheme.
    pub setpoint_based_scheme: bool,

    pub evaporator: EvaporatorInlet,
    pub condenser: CondenserInlet,

    /// Heat-recovery stream, for chillers configured with heat recovery.
    pub heat_recovery: Option<HeatRecoveryInlet>,
}

/// Whether the plant loop has settled the mass flow through the chiller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FlowLock {
    /// The chiller requests its own evaporator flow.
    #[default]
    Unlocked,

    /// Evaporator flow is fixed by the loop.
    Locked,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaporatorInlet {
    pub temperature: ThermodynamicTemperature,

    /// Current flow through the evaporator node.
    pub mass_flow: MassRate,

    /// Largest flow the loop can deliver this iteration.
    pub max_available_flow: MassRate,

    pub outlet_setpoint: ThermodynamicTemperature,

    /// Lowest outlet temperature the loop allows, if any.
    pub outlet_min: Option<ThermodynamicTemperature>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CondenserInlet {
    pub temperature: ThermodynamicTemperature,

    /// Largest flow the condenser loop can deliver this iteration.
    pub max_available_flow: MassRate,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatRecoveryInlet {
    pub temperature: ThermodynamicTemperature,
    pub mass_flow: MassRate,

    /// Heat-recovery leaving setpoint. Without one the recovered heat is
    /// found by blending the recovery and condenser streams.
    pub setpoint: Option<ThermodynamicTemperature>,
}

/// [`ChillerInput`] in curve units with fluid properties resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Conditions {
    pub(super) load: f64,
    pub(super) running: bool,
    pub(super) first_iteration: bool,
    pub(super) warmup: bool,
    pub(super) flow_locked: bool,
    pub(super) setpoint_based: bool,
    pub(super) evaporator: EvaporatorConditions,
    pub(super) condenser: CondenserConditions,
    pub(super) heat_recovery: Option<HeatRecoveryConditions>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct EvaporatorConditions {
    pub(super) inlet: f64,
    pub(super) flow: f64,
    pub(super) max_available: f64,
    pub(super) setpoint: f64,
    pub(super) outlet_min: Option<f64>,
    pub(super) cp: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct CondenserConditions {
    pub(super) inlet: f64,
    pub(super) max_available: f64,
    pub(super) cp: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct HeatRecoveryConditions {
    pub(super) inlet: f64,
    pub(super) flow: f64,
    pub(super) setpoint: Option<f64>,
    pub(super) cp: f64,
}

impl Conditions {
    pub(super) fn new(input: &ChillerInput, fluid: &impl LiquidProperties) -> Self {
        let cp = |temperature| {
            fluid
                .specific_heat(temperature)
                .get::<joule_per_kilogram_kelvin>()
        };
        let evaporator = &input.evaporator;
        let condenser = &input.condenser;

        Self {
            load: input.load.get::<watt>(),
            running: input.running,
            first_iteration: input.first_iteration,
            warmup: input.warmup,
            flow_locked: input.flow_lock == FlowLock::Locked,
            setpoint_based: input.setpoint_based_scheme,
            evaporator: EvaporatorConditions {
                inlet: celsius(evaporator.temperature),
                flow: evaporator.mass_flow.get::<kilogram_per_second>(),
                max_available: evaporator.max_available_flow.get::<kilogram_per_second>(),
                setpoint: celsius(evaporator.outlet_setpoint),
                outlet_min: evaporator.outlet_min.map(celsius),
                cp: cp(evaporator.temperature),
            },
            condenser: CondenserConditions {
                inlet: celsius(condenser.temperature),
                max_available: condenser.max_available_flow.get::<kilogram_per_second>(),
                cp: cp(condenser.temperature),
            },
            heat_recovery: input.heat_recovery.map(|hr| HeatRecoveryConditions {
                inlet: celsius(hr.temperature),
                flow: hr.mass_flow.get::<kilogram_per_second>(),
                setpoint: hr.setpoint.map(celsius),
                cp: cp(hr.temperature),
            }),
        }
    }

    /// No cooling is requested or the chiller is scheduled off.
    pub(super) fn is_off(&self) -> bool {
        self.load >= 0.0 || !self.running
    }
}
