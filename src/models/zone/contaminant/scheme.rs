/// Time discretization of the zone balance.
///
/// Chosen once per simulation; every zone steps with the same scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Scheme {
    /// First-order backward difference.
    Euler,

    /// Third-order backward difference over the last three timesteps.
    #[default]
    ThirdOrderBackwardDifference,

    /// Exact solution of the linear balance over one timestep.
    Analytical,
}
