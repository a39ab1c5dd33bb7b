//! Core value types of the rank-sum engine.
//!
//! - [`enums`]: closed enumerations for group tags, tail direction, exact
//!   probability mode and method selection.
//! - [`observation`]: tagged observations, their ranked form, per-group sample
//!   sizes and test results.
pub mod enums;
pub mod observation;

pub use enums::*;
pub use observation::*;
