use thiserror::Error;

use crate::data_structs::enums::Method;

/// Errors raised by the rank-sum test engine.
///
/// Every variant is a synchronous precondition failure of the call that
/// produced it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MwuError {
    /// Observation value is NaN or infinite.
    #[error("observation value must be finite, got {value}")]
    InvalidInput { value: f64 },

    /// One of the groups has no observations.
    #[error("both groups need at least one observation (n_a = {n_a}, n_b = {n_b})")]
    DegenerateSample { n_a: usize, n_b: usize },

    /// U lies outside of `[0, n_a * n_b]`.
    #[error("U = {u} is outside of [0, {max}]")]
    OutOfRange { u: f64, max: u64 },

    /// Sample sizes exceed what the method can represent.
    #[error("{method} method does not support sample sizes ({n_a}, {n_b})")]
    TooLarge {
        method: Method,
        n_a:    usize,
        n_b:    usize,
    },

    /// Exact distribution was requested for a sample with tied values.
    #[error("exact distribution is not valid for tied samples ({blocks} tie blocks)")]
    TiedSample { blocks: usize },

    /// A method produced a probability outside of `[0, 1]` or a non-finite
    /// one.
    #[error("{method} method produced an invalid probability {probability}")]
    InvalidProbability { method: Method, probability: f64 },

    /// Group label could not be parsed.
    #[error("unknown group label '{0}'")]
    UnknownGroup(String),
}

pub type MwuResult<T> = Result<T, MwuError>;
