use super::performance::OperatingPoint;

/// Values a chiller carries from one call to the next.
///
/// A fresh state is [`Default`]. The registry advances it after each call;
/// callers driving the [`ChillerModel`](crate::models::plant::chiller::ChillerModel)
/// directly pass the returned state into the next call.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChillerState {
    possible_subcooling: bool,
    heat_recovery_rate: f64,
    condenser_rate: f64,
    heat_recovery_outlet: f64,
    condenser_outlet: f64,
}

impl ChillerState {
    /// The last flow-unlocked call allowed the evaporator to be subcooled.
    ///
    /// While set, a flow-locked call meets the requested load exactly instead
    /// of driving the outlet to its setpoint.
    #[must_use]
    pub fn possible_subcooling(&self) -> bool {
        self.possible_subcooling
    }

    /// Condenser temperature seen by the curves [°C].
    ///
    /// With heat recovery active, this is the heat-weighted average of the
    /// previous call's recovery and condenser outlets; otherwise it is `trial`.
    pub(super) fn condenser_average(&self, heat_recovery_active: bool, trial: f64) -> f64 {
        let total = self.heat_recovery_rate + self.condenser_rate;
        if heat_recovery_active && total > 0.0 {
            (self.heat_recovery_rate * self.heat_recovery_outlet
                + self.condenser_rate * self.condenser_outlet)
                / total
        } else {
            trial
        }
    }

    /// Returns the state that follows `point`.
    pub(super) fn advance(&self, point: &OperatingPoint) -> Self {
        Self {
            possible_subcooling: point
                .possible_subcooling
                .unwrap_or(self.possible_subcooling),
            heat_recovery_rate: point.heat_recovery_rate,
            condenser_rate: point.condenser_rate,
            heat_recovery_outlet: point.heat_recovery_outlet.unwrap_or_default(),
            condenser_outlet: point.condenser_outlet,
        }
    }
}
