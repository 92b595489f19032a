use uom::si::{
    f64::{TemperatureInterval, ThermodynamicTemperature},
    mass_density::kilogram_per_cubic_meter,
    power::watt,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    temperature_interval::kelvin as delta_kelvin,
    volume_rate::cubic_meter_per_second,
};

use crate::support::{
    constraint::{
        Constrained, Constraint, ConstraintError, NonNegative, StrictlyPositive, UnitInterval,
    },
    curve::{Bounds, Curve, CurveError, CurveLibrary},
    diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink},
    fluid::LiquidProperties,
    units::{TemperatureDifference, celsius, from_celsius},
};

use super::super::{ChillerConfig, ChillerConfigError, FlowMode, PartLoadCurveType};

/// Reference lift used when the reference temperatures give none [K].
pub(super) const FALLBACK_REFERENCE_LIFT: f64 = 35.0 - 6.67;

/// Curves should evaluate within this band at reference conditions.
const REFERENCE_CURVE_BAND: std::ops::RangeInclusive<f64> = 0.9..=1.1;

/// EIR part-load curve with the variables chosen by [`PartLoadCurveType`].
#[derive(Debug, Clone, PartialEq)]
pub(super) enum PartLoadCurve {
    LeavingCondenser(Curve<2>),
    Lift(Curve<3>),
}

impl PartLoadCurve {
    pub(super) fn name(&self) -> &str {
        match self {
            Self::LeavingCondenser(curve) => curve.name(),
            Self::Lift(curve) => curve.name(),
        }
    }

    /// Domain of the condenser temperature variable, if the curve has one.
    pub(super) fn condenser_bounds(&self) -> Option<Bounds> {
        match self {
            Self::LeavingCondenser(curve) => Some(curve.bounds()[0]),
            Self::Lift(_) => None,
        }
    }

    pub(super) fn part_load_bounds(&self) -> Bounds {
        match self {
            Self::LeavingCondenser(curve) => curve.bounds()[1],
            Self::Lift(curve) => curve.bounds()[1],
        }
    }
}

/// Validated, immutable chiller description in curve units.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ChillerSpec {
    pub(super) name: String,
    pub(super) reference_capacity: f64,
    pub(super) reference_cop: f64,
    pub(super) reference_evaporator_outlet: f64,
    pub(super) reference_condenser_outlet: f64,
    pub(super) reference_condenser_inlet: f64,
    pub(super) evaporator_flow_max: f64,
    pub(super) condenser_flow_max: f64,
    pub(super) min_plr: f64,
    pub(super) max_plr: f64,
    pub(super) min_unloading_ratio: f64,
    pub(super) compressor_heat_fraction: f64,
    pub(super) evaporator_low_limit: f64,
    pub(super) capacity_curve: Curve<2>,
    pub(super) eir_temperature_curve: Curve<2>,
    pub(super) eir_part_load_curve: PartLoadCurve,
    pub(super) flow_mode: FlowMode,
    pub(super) heat_recovery: Option<HeatRecoverySpec>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct HeatRecoverySpec {
    /// Most heat the recovery stream can take [W].
    pub(super) capacity_limit: f64,
    pub(super) inlet_high_limit: Option<f64>,
}

impl ChillerSpec {
    /// Validates `config`, resolves its curves, and derives reference values.
    ///
    /// Curves far from 1.0 at reference conditions are reported to `sink` as
    /// warnings; everything else that is wrong is an error.
    ///
    /// # Errors
    ///
    /// Returns a [`ChillerConfigError`] for any inconsistent parameter or curve.
    pub(crate) fn load(
        config: &ChillerConfig,
        curves: &CurveLibrary,
        fluid: &impl LiquidProperties,
        sink: &mut impl DiagnosticSink,
    ) -> Result<Self, ChillerConfigError> {
        let name = config.name.as_str();

        let reference_capacity = parameter(
            name,
            "reference capacity",
            StrictlyPositive::new(config.reference_capacity),
        )?
        .get::<watt>();
        let reference_cop = parameter(
            name,
            "reference COP",
            StrictlyPositive::new(config.reference_cop),
        )?;
        let evaporator_volume = parameter(
            name,
            "design evaporator flow",
            StrictlyPositive::new(config.design_evaporator_flow),
        )?
        .get::<cubic_meter_per_second>();
        let condenser_volume = parameter(
            name,
            "design condenser flow",
            StrictlyPositive::new(config.design_condenser_flow),
        )?
        .get::<cubic_meter_per_second>();
        let compressor_heat_fraction = parameter(
            name,
            "compressor heat to condenser fraction",
            UnitInterval::new(config.compressor_heat_to_condenser),
        )?;

        let min_plr = parameter(
            name,
            "minimum part-load ratio",
            NonNegative::new(config.min_part_load_ratio),
        )?;
        let max_plr = parameter(
            name,
            "maximum part-load ratio",
            StrictlyPositive::new(config.max_part_load_ratio),
        )?;
        if min_plr > max_plr {
            return Err(ChillerConfigError::PartLoadRange {
                chiller: name.to_owned(),
                min: min_plr,
                max: max_plr,
            });
        }
        within_part_load_range(
            name,
            "minimum unloading ratio",
            config.min_unloading_ratio,
            min_plr,
            max_plr,
        )?;
        within_part_load_range(
            name,
            "optimum part-load ratio",
            config.optimum_part_load_ratio,
            min_plr,
            max_plr,
        )?;

        let reference_evaporator_outlet = celsius(config.reference_evaporator_outlet);
        let reference_condenser_outlet = celsius(config.reference_condenser_outlet);
        let reference_lift = config
            .reference_condenser_outlet
            .minus(config.reference_evaporator_outlet);
        if reference_lift <= TemperatureInterval::new::<delta_kelvin>(0.0) {
            return Err(ChillerConfigError::ReferenceTemperatures {
                chiller: name.to_owned(),
                evaporator: reference_evaporator_outlet,
                condenser: reference_condenser_outlet,
            });
        }

        let capacity_curve = curves
            .resolve::<2>(&config.capacity_curve)
            .map_err(curve_error(name, "capacity"))?;
        let eir_temperature_curve = curves
            .resolve::<2>(&config.eir_temperature_curve)
            .map_err(curve_error(name, "EIR temperature"))?;
        let eir_part_load_curve = match config.part_load_curve_type {
            PartLoadCurveType::LeavingCondenserTemperature => PartLoadCurve::LeavingCondenser(
                curves
                    .resolve::<2>(&config.eir_part_load_curve)
                    .map_err(curve_error(name, "EIR part-load"))?,
            ),
            PartLoadCurveType::Lift => PartLoadCurve::Lift(
                curves
                    .resolve::<3>(&config.eir_part_load_curve)
                    .map_err(curve_error(name, "EIR part-load"))?,
            ),
        };

        let plr_domain = eir_part_load_curve.part_load_bounds();
        if plr_domain.min() < 0.0
            || plr_domain.min() >= plr_domain.max()
            || plr_domain.min() > 1.0
            || plr_domain.max() > 1.1
        {
            return Err(ChillerConfigError::PartLoadDomain {
                chiller: name.to_owned(),
                min: plr_domain.min(),
                max: plr_domain.max(),
            });
        }

        // Condenser temperature rise at reference capacity and design flow.
        let reference_outlet = config.reference_condenser_outlet;
        let reference_condenser_heat =
            reference_capacity * (1.0 + compressor_heat_fraction / reference_cop);
        let reference_condenser_rise = reference_condenser_heat
            / (condenser_volume
                * density(fluid, reference_outlet)
                * specific_heat(fluid, reference_outlet));
        let reference_condenser_inlet = reference_condenser_outlet - reference_condenser_rise;

        let heat_recovery = config
            .heat_recovery
            .map(|hr| -> Result<HeatRecoverySpec, ChillerConfigError> {
                let fraction = parameter(
                    name,
                    "heat recovery capacity fraction",
                    NonNegative::new(hr.capacity_fraction),
                )?;
                Ok(HeatRecoverySpec {
                    capacity_limit: fraction
                        * (reference_capacity + reference_capacity / reference_cop),
                    inlet_high_limit: hr.inlet_high_limit.map(celsius),
                })
            })
            .transpose()?;

        let spec = Self {
            name: name.to_owned(),
            reference_capacity,
            reference_cop,
            reference_evaporator_outlet,
            reference_condenser_outlet,
            reference_condenser_inlet,
            evaporator_flow_max: evaporator_volume
                * density(fluid, config.reference_evaporator_outlet),
            condenser_flow_max: condenser_volume
                * density(fluid, from_celsius(reference_condenser_inlet)),
            min_plr,
            max_plr,
            min_unloading_ratio: config.min_unloading_ratio,
            compressor_heat_fraction,
            evaporator_low_limit: celsius(config.evaporator_outlet_low_limit),
            capacity_curve,
            eir_temperature_curve,
            eir_part_load_curve,
            flow_mode: config.flow_mode,
            heat_recovery,
        };

        spec.check_part_load_sweep()?;
        spec.report_reference_values(sink);
        Ok(spec)
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    /// Condenser temperature difference used to normalize lift [K].
    pub(super) fn reference_lift(&self) -> f64 {
        let lift = self.reference_condenser_outlet - self.reference_evaporator_outlet;
        if lift > 0.0 {
            lift
        } else {
            FALLBACK_REFERENCE_LIFT
        }
    }

    /// Evaluates the EIR part-load curve without flooring its output.
    pub(super) fn part_load_modifier(&self, condenser: f64, evaporator_outlet: f64, plr: f64) -> f64 {
        match &self.eir_part_load_curve {
            PartLoadCurve::LeavingCondenser(curve) => curve.evaluate([condenser, plr]),
            PartLoadCurve::Lift(curve) => {
                let reference_lift = self.reference_lift();
                let lift = (condenser - evaporator_outlet) / reference_lift;
                let deviation =
                    (evaporator_outlet - self.reference_evaporator_outlet).abs() / reference_lift;
                curve.evaluate([lift, plr, deviation])
            }
        }
    }

    /// Range of condenser outlet temperatures covered by the curves [°C].
    pub(super) fn condenser_bracket(&self) -> [f64; 2] {
        let capacity = self.capacity_curve.bounds()[1];
        let eir = self.eir_temperature_curve.bounds()[1];
        let mut lower = capacity.min().min(eir.min());
        let mut upper = capacity.max().max(eir.max());
        if let Some(part_load) = self.eir_part_load_curve.condenser_bounds() {
            lower = lower.min(part_load.min());
            upper = upper.max(part_load.max());
        }
        [lower, upper]
    }

    /// Rejects part-load curves that go negative along the reference
    /// condenser temperature rise.
    fn check_part_load_sweep(&self) -> Result<(), ChillerConfigError> {
        let PartLoadCurve::LeavingCondenser(curve) = &self.eir_part_load_curve else {
            return Ok(());
        };
        let [condenser_domain, plr_domain] = *curve.bounds();
        let rise = self.reference_condenser_outlet - self.reference_condenser_inlet;

        for step in 0..=10_u8 {
            let fraction = f64::from(step) / 10.0;
            let condenser = condenser_domain.clamp(self.reference_condenser_inlet + rise * fraction);
            let plr = fraction.max(plr_domain.min());
            let value = curve.evaluate([condenser, plr]);
            if value < 0.0 {
                return Err(ChillerConfigError::NegativePartLoadCurve {
                    chiller: self.name.clone(),
                    condenser_temperature: condenser,
                    part_load_ratio: plr,
                    value,
                });
            }
        }
        Ok(())
    }

    fn report_reference_values(&self, sink: &mut impl DiagnosticSink) {
        let evaporator = self.reference_evaporator_outlet;
        let condenser = self.reference_condenser_outlet;
        let part_load = match &self.eir_part_load_curve {
            PartLoadCurve::LeavingCondenser(curve) => curve.evaluate([condenser, 1.0]),
            PartLoadCurve::Lift(curve) => curve.evaluate([1.0, 1.0, 0.0]),
        };

        let values = [
            (
                "capacity",
                self.capacity_curve.name(),
                self.capacity_curve.evaluate([evaporator, condenser]),
            ),
            (
                "EIR temperature",
                self.eir_temperature_curve.name(),
                self.eir_temperature_curve.evaluate([evaporator, condenser]),
            ),
            ("EIR part-load", self.eir_part_load_curve.name(), part_load),
        ];

        for (role, curve, value) in values {
            if !REFERENCE_CURVE_BAND.contains(&value) {
                sink.report(Diagnostic::warning(
                    &self.name,
                    DiagnosticKind::ReferenceCurveValue,
                    format!(
                        "{role} curve `{curve}` is {value:.3} at reference conditions; \
                         curve output should be near 1.0"
                    ),
                ));
            }
        }
    }
}

fn parameter<T, C>(
    chiller: &str,
    field: &'static str,
    value: Result<Constrained<T, C>, ConstraintError>,
) -> Result<T, ChillerConfigError>
where
    C: Constraint<T>,
{
    value
        .map(Constrained::into_inner)
        .map_err(|source| ChillerConfigError::InvalidParameter {
            chiller: chiller.to_owned(),
            field,
            source,
        })
}

fn within_part_load_range(
    chiller: &str,
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), ChillerConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ChillerConfigError::OutsidePartLoadRange {
            chiller: chiller.to_owned(),
            field,
            value,
            min,
            max,
        })
    }
}

fn curve_error(chiller: &str, role: &'static str) -> impl FnOnce(CurveError) -> ChillerConfigError {
    let chiller = chiller.to_owned();
    move |source| ChillerConfigError::Curve {
        chiller,
        role,
        source,
    }
}

fn density(fluid: &impl LiquidProperties, temperature: ThermodynamicTemperature) -> f64 {
    fluid
        .density(temperature)
        .get::<kilogram_per_cubic_meter>()
}

fn specific_heat(fluid: &impl LiquidProperties, temperature: ThermodynamicTemperature) -> f64 {
    fluid
        .specific_heat(temperature)
        .get::<joule_per_kilogram_kelvin>()
}
