//! # Plant Models
//!
//! Plant equipment and zone balance models built on
//! [Twine](https://github.com/isentropic-dev/twine): curve-driven component
//! performance, implicit loop variables resolved by bracketed root finding,
//! and first-order transient balances.
//!
//! ## Crate layout
//!
//! - [`models`]: Domain models, each exposed through a thin public adapter.
//! - [`support`]: Supporting utilities used by models.
//!
//! ## Utility code lifecycle
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable. Breaking changes may occur as needed.
//!
//! Utility code starts in a model's internal `core` module and moves to
//! [`support`] once more than one model (or an outside caller) needs it.
//! Only utilities at the crate level are part of the public API.

pub mod models;
pub mod support;
