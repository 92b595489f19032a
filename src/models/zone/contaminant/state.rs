use uom::si::{f64::Ratio, ratio::part_per_million};

/// Concentrations a zone carries between timesteps.
///
/// Holds the three most recent corrected values, newest first. The third-order
/// scheme reads all three; the other schemes read only the newest.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneContaminantState {
    /// [ppm]
    history: [f64; 3],
}

impl ZoneContaminantState {
    /// Seeds every history slot with `initial`, so the first steps of a run
    /// see a zone that has been at `initial` indefinitely.
    #[must_use]
    pub fn new(initial: Ratio) -> Self {
        Self::from_ppm(initial.get::<part_per_million>())
    }

    pub(super) fn from_ppm(initial: f64) -> Self {
        Self {
            history: [initial; 3],
        }
    }

    /// Concentration at the end of the previous timestep.
    #[must_use]
    pub fn concentration(&self) -> Ratio {
        Ratio::new::<part_per_million>(self.ppm())
    }

    pub(super) fn ppm(&self) -> f64 {
        self.history[0]
    }

    /// Previous values in ppm, newest first.
    pub(super) fn history(&self) -> [f64; 3] {
        self.history
    }

    /// Returns the state after a step that ended at `concentration`.
    #[must_use]
    pub fn advance(&self, concentration: Ratio) -> Self {
        self.advance_ppm(concentration.get::<part_per_million>())
    }

    pub(super) fn advance_ppm(&self, concentration: f64) -> Self {
        let [newest, older, _] = self.history;
        Self {
            history: [concentration, newest, older],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn ppm(value: f64) -> Ratio {
        Ratio::new::<part_per_million>(value)
    }

    #[test]
    fn fresh_state_seeds_every_slot() {
        let state = ZoneContaminantState::new(ppm(400.0));
        assert_eq!(state.history(), [400.0; 3]);
        assert_relative_eq!(state.concentration().get::<part_per_million>(), 400.0);
    }

    #[test]
    fn advance_rotates_history() {
        let state = ZoneContaminantState::from_ppm(400.0)
            .advance_ppm(410.0)
            .advance_ppm(420.0)
            .advance_ppm(430.0)
            .advance(ppm(440.0));

        let [newest, older, oldest] = state.history();
        assert_relative_eq!(newest, 440.0, epsilon = 1e-9);
        assert_eq!([older, oldest], [430.0, 420.0]);
    }
}
