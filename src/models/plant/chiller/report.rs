use uom::si::{
    f64::{Energy, Power, Time},
    power::watt,
    ratio::ratio,
};

use super::ChillerOutput;

/// Energy totals and efficiency for one timestep.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChillerReport {
    pub electric_energy: Energy,
    pub evaporator_energy: Energy,
    pub condenser_energy: Energy,
    pub heat_recovery_energy: Energy,
    pub false_load_energy: Energy,

    /// Cooling plus false load per unit of electric power, or zero while off.
    pub actual_cop: f64,
}

impl ChillerReport {
    /// Integrates `output` rates over `timestep`.
    #[must_use]
    pub fn new(output: &ChillerOutput, timestep: Time) -> Self {
        let actual_cop = if output.power > Power::new::<watt>(0.0) {
            ((output.evaporator_heat_rate + output.false_load_rate) / output.power).get::<ratio>()
        } else {
            0.0
        };

        Self {
            electric_energy: output.power * timestep,
            evaporator_energy: output.evaporator_heat_rate * timestep,
            condenser_energy: output.condenser_heat_rate * timestep,
            heat_recovery_energy: output.heat_recovery_rate * timestep,
            false_load_energy: output.false_load_rate * timestep,
            actual_cop,
        }
    }
}
