use uom::si::{
    f64::{TemperatureInterval, ThermodynamicTemperature},
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin as abs_kelvin,
};

/// Extension trait for computing temperature differences.
///
/// Subtracting two [`ThermodynamicTemperature`] values in [`uom`] does not
/// yield a [`TemperatureInterval`], so approach and range calculations
/// (evaporator ΔT, chiller lift) go through [`minus`](Self::minus).
/// See [uom#380](https://github.com/iliekturtles/uom/issues/380).
pub trait TemperatureDifference {
    /// Returns the temperature difference `self - other`.
    fn minus(self, other: Self) -> TemperatureInterval;
}

impl TemperatureDifference for ThermodynamicTemperature {
    fn minus(self, other: Self) -> TemperatureInterval {
        TemperatureInterval::new::<delta_kelvin>(
            self.get::<abs_kelvin>() - other.get::<abs_kelvin>(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        temperature_interval::{degree_celsius as delta_celsius, kelvin as delta_kelvin},
        thermodynamic_temperature::{degree_celsius, degree_fahrenheit},
    };

    #[test]
    fn evaporator_range() {
        let entering = ThermodynamicTemperature::new::<degree_celsius>(12.22);
        let leaving = ThermodynamicTemperature::new::<degree_celsius>(6.67);

        assert_relative_eq!(
            entering.minus(leaving).get::<delta_kelvin>(),
            5.55,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            leaving.minus(entering).get::<delta_celsius>(),
            -5.55,
            epsilon = 1e-9
        );
    }

    #[test]
    fn mixed_scales() {
        let t_in_c = ThermodynamicTemperature::new::<degree_celsius>(25.0);
        let t_in_f = ThermodynamicTemperature::new::<degree_fahrenheit>(77.0);
        assert_relative_eq!(
            t_in_f.minus(t_in_c).get::<delta_celsius>(),
            0.0,
            epsilon = 1e-12
        );
    }
}
