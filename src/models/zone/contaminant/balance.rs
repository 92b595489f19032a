//! Per-scheme solutions of the zone balance
//! `C·dc/dt = B - A·c`, with the derivative discretized over one timestep.
//!
//! Predict solves for the system load that holds the zone at a setpoint.
//! Correct solves for the concentration given the resolved system terms.
//! Both rearrange the same equation.

use super::{Scheme, ZoneContaminantState};

/// Largest `A/C` fed to the exponential.
const MAX_EXPONENT: f64 = 700.0;

/// Balance coefficients for one zone and timestep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Coefficients {
    /// Removal mass flow [kg/s].
    pub(super) removal: f64,
    /// Generation plus concentration-weighted inflow [kg/s·ppm].
    pub(super) source: f64,
    /// `ρ·V·M/Δt` [kg/s].
    pub(super) capacitance: f64,
}

impl Coefficients {
    /// Removal too small for `1 - decay` to resolve; the zero-removal limit applies.
    fn negligible_removal(&self) -> bool {
        self.removal / self.capacitance < f64::EPSILON
    }

    fn decay(&self) -> f64 {
        (-(self.removal / self.capacitance).clamp(-MAX_EXPONENT, MAX_EXPONENT)).exp()
    }
}

/// Concentration-weighted history term of the third-order difference.
fn third_order_history(state: &ZoneContaminantState) -> f64 {
    let [c1, c2, c3] = state.history();
    3.0 * c1 - 1.5 * c2 + c3 / 3.0
}

/// System load [kg/s·ppm] that holds the zone at `setpoint`.
///
/// Positive when the system must add contaminant, negative when it must remove it.
pub(super) fn predict(
    scheme: Scheme,
    state: &ZoneContaminantState,
    k: &Coefficients,
    setpoint: f64,
) -> f64 {
    let c1 = state.ppm();
    match scheme {
        Scheme::Euler => k.capacitance * (setpoint - c1) + k.removal * setpoint - k.source,
        Scheme::ThirdOrderBackwardDifference => {
            (11.0 / 6.0 * k.capacitance + k.removal) * setpoint
                - (k.source + k.capacitance * third_order_history(state))
        }
        Scheme::Analytical => {
            if k.negligible_removal() {
                k.capacitance * (setpoint - c1) - k.source
            } else {
                let decay = k.decay();
                k.removal * (setpoint - c1 * decay) / (1.0 - decay) - k.source
            }
        }
    }
}

/// Concentration [ppm] at the end of the timestep.
pub(super) fn correct(scheme: Scheme, state: &ZoneContaminantState, k: &Coefficients) -> f64 {
    let c1 = state.ppm();
    match scheme {
        Scheme::Euler => (k.capacitance * c1 + k.source) / (k.capacitance + k.removal),
        Scheme::ThirdOrderBackwardDifference => {
            (k.source + k.capacitance * third_order_history(state))
                / (11.0 / 6.0 * k.capacitance + k.removal)
        }
        Scheme::Analytical => {
            if k.negligible_removal() {
                c1 + k.source / k.capacitance
            } else {
                let steady = k.source / k.removal;
                (c1 - steady) * k.decay() + steady
            }
        }
    }
}
