use uom::si::{
    f64::{MassRate, Power, ThermodynamicTemperature, VolumeRate},
    mass_rate::kilogram_per_second,
    power::{kilowatt, watt},
    thermodynamic_temperature::degree_celsius,
    volume_rate::cubic_meter_per_second,
};

use crate::{
    models::plant::chiller::{
        ChillerConfig, FlowMode, HeatRecoveryConfig, PartLoadCurveType,
    },
    support::{
        curve::{Bounds, CurveDefinition, CurveForm, CurveLibrary, OutputLimits},
        fluid::{Incompressible, Water},
    },
};

use super::{
    ChillerInput, ChillerSpec, CondenserInlet, EvaporatorInlet, FlowLock,
    input::{Conditions, CondenserConditions, EvaporatorConditions},
};

/// Water heat capacity in J/kg·K.
pub(crate) const CP: f64 = 4184.0;

/// Water density in kg/m³.
pub(crate) const DENSITY: f64 = 997.047;

pub(crate) const EVAPORATOR_FLOW: f64 = 0.02 * DENSITY;

pub(crate) fn water() -> Incompressible<Water> {
    Incompressible::new().unwrap()
}

fn bounds(min: f64, max: f64) -> Bounds {
    Bounds::new(min, max).unwrap()
}

/// Linear curves equal to 1.0 at 6.67 °C / 35 °C and full load.
pub(crate) fn curves() -> CurveLibrary {
    let mut library = CurveLibrary::new();
    library
        .insert(
            "CapFT",
            CurveDefinition {
                form: CurveForm::Biquadratic,
                coefficients: vec![1.1499, 0.03, 0.0, -0.01, 0.0, 0.0],
                domain: vec![bounds(5.0, 10.0), bounds(20.0, 40.0)],
                output: OutputLimits::default(),
            },
        )
        .unwrap();
    library
        .insert(
            "EIRFT",
            CurveDefinition {
                form: CurveForm::Biquadratic,
                coefficients: vec![0.4334, -0.02, 0.0, 0.02, 0.0, 0.0],
                domain: vec![bounds(5.0, 10.0), bounds(20.0, 40.0)],
                output: OutputLimits::default(),
            },
        )
        .unwrap();
    library
        .insert(
            "EIRFPLR",
            CurveDefinition {
                form: CurveForm::Bicubic,
                coefficients: vec![0.1, 0.0, 0.0, 0.9, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
                domain: vec![bounds(20.0, 40.0), bounds(0.0, 1.0)],
                output: OutputLimits::default(),
            },
        )
        .unwrap();
    library
        .insert(
            "EIRFPLR-Lift",
            CurveDefinition {
                form: CurveForm::ChillerPartLoadWithLift,
                coefficients: vec![0.0, 0.2, 0.0, 0.8, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
                domain: vec![bounds(0.0, 2.0), bounds(0.0, 1.0), bounds(0.0, 1.0)],
                output: OutputLimits::default(),
            },
        )
        .unwrap();
    library
}

/// 500 kW, COP 5.5 chiller rated at 6.67 °C / 35 °C.
pub(crate) fn config() -> ChillerConfig {
    ChillerConfig {
        name: "Chiller 1".to_owned(),
        reference_capacity: Power::new::<kilowatt>(500.0),
        reference_cop: 5.5,
        reference_evaporator_outlet: ThermodynamicTemperature::new::<degree_celsius>(6.67),
        reference_condenser_outlet: ThermodynamicTemperature::new::<degree_celsius>(35.0),
        design_evaporator_flow: VolumeRate::new::<cubic_meter_per_second>(0.02),
        design_condenser_flow: VolumeRate::new::<cubic_meter_per_second>(0.03),
        min_part_load_ratio: 0.1,
        max_part_load_ratio: 1.0,
        optimum_part_load_ratio: 1.0,
        min_unloading_ratio: 0.2,
        compressor_heat_to_condenser: 1.0,
        evaporator_outlet_low_limit: ThermodynamicTemperature::new::<degree_celsius>(2.0),
        capacity_curve: "CapFT".to_owned(),
        eir_temperature_curve: "EIRFT".to_owned(),
        eir_part_load_curve: "EIRFPLR".to_owned(),
        part_load_curve_type: PartLoadCurveType::LeavingCondenserTemperature,
        flow_mode: FlowMode::NotModulated,
        heat_recovery: None,
    }
}

pub(crate) fn load(config: &ChillerConfig) -> ChillerSpec {
    ChillerSpec::load(config, &curves(), &water(), &mut Vec::new()).unwrap()
}

pub(crate) fn spec() -> ChillerSpec {
    load(&config())
}

pub(crate) fn spec_with_flow_mode(flow_mode: FlowMode) -> ChillerSpec {
    load(&ChillerConfig {
        flow_mode,
        ..config()
    })
}

pub(crate) fn spec_with_heat_recovery() -> ChillerSpec {
    load(&ChillerConfig {
        heat_recovery: Some(HeatRecoveryConfig {
            capacity_fraction: 1.0,
            inlet_high_limit: None,
        }),
        ..config()
    })
}

pub(crate) fn spec_with_lift_curve() -> ChillerSpec {
    load(&ChillerConfig {
        part_load_curve_type: PartLoadCurveType::Lift,
        eir_part_load_curve: "EIRFPLR-Lift".to_owned(),
        ..config()
    })
}

/// Locked design flow, 12 °C return water, 29.4 °C condenser water.
pub(super) fn conditions(load: f64) -> Conditions {
    Conditions {
        load,
        running: true,
        first_iteration: false,
        warmup: false,
        flow_locked: true,
        setpoint_based: false,
        evaporator: EvaporatorConditions {
            inlet: 12.0,
            flow: EVAPORATOR_FLOW,
            max_available: EVAPORATOR_FLOW,
            setpoint: 6.67,
            outlet_min: None,
            cp: CP,
        },
        condenser: CondenserConditions {
            inlet: 29.4,
            max_available: 100.0,
            cp: CP,
        },
        heat_recovery: None,
    }
}

/// [`conditions`] as a public input.
pub(crate) fn input(load: f64) -> ChillerInput {
    let celsius = ThermodynamicTemperature::new::<degree_celsius>;
    let flow = MassRate::new::<kilogram_per_second>;
    ChillerInput {
        load: Power::new::<watt>(load),
        running: true,
        first_iteration: false,
        warmup: false,
        flow_lock: FlowLock::Locked,
        setpoint_based_scheme: false,
        evaporator: EvaporatorInlet {
            temperature: celsius(12.0),
            mass_flow: flow(EVAPORATOR_FLOW),
            max_available_flow: flow(EVAPORATOR_FLOW),
            outlet_setpoint: celsius(6.67),
            outlet_min: None,
        },
        condenser: CondenserInlet {
            temperature: celsius(29.4),
            max_available_flow: flow(100.0),
        },
        heat_recovery: None,
    }
}
