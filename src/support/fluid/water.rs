use uom::si::{
    f64::{MassDensity, SpecificHeatCapacity},
    mass_density::kilogram_per_cubic_meter,
    specific_heat_capacity::kilojoule_per_kilogram_kelvin,
};

use super::{IncompressibleFluid, IncompressibleParameters};

/// Liquid water.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Water;

impl IncompressibleFluid for Water {
    fn parameters() -> IncompressibleParameters {
        IncompressibleParameters {
            cp: SpecificHeatCapacity::new::<kilojoule_per_kilogram_kelvin>(4.184),
            density: MassDensity::new::<kilogram_per_cubic_meter>(997.047),
        }
    }
}
