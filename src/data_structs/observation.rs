use serde::{
    Deserialize,
    Serialize,
};

use crate::data_structs::enums::{
    Group,
    Method,
};
use crate::error::{
    MwuError,
    MwuResult,
};
use crate::getter_fn;

/// A single measurement tagged with the group it was drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub value: f64,
    pub group: Group,
}

impl Observation {
    pub fn new(
        value: f64,
        group: Group,
    ) -> Self {
        Self { value, group }
    }
}

/// An [`Observation`] with the rank it received in the pooled sample.
///
/// Tied values share the average of the positions they occupy, so `rank`
/// is fractional for even-sized tie blocks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedObservation {
    observation: Observation,
    rank:        f64,
    tie_size:    usize,
}

impl RankedObservation {
    getter_fn!(observation, Observation);
    getter_fn!(rank, f64);
    getter_fn!(tie_size, usize);

    pub(crate) fn new(
        observation: Observation,
        rank: f64,
        tie_size: usize,
    ) -> Self {
        Self {
            observation,
            rank,
            tie_size,
        }
    }

    pub fn group(&self) -> Group { self.observation.group }

    pub fn value(&self) -> f64 { self.observation.value }
}

/// Number of observations per group, group A first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SampleSizes {
    pub n_a: usize,
    pub n_b: usize,
}

impl SampleSizes {
    pub fn new(
        n_a: usize,
        n_b: usize,
    ) -> Self {
        Self { n_a, n_b }
    }

    pub fn get(
        &self,
        group: Group,
    ) -> usize {
        match group {
            Group::A => self.n_a,
            Group::B => self.n_b,
        }
    }

    /// Size of `group` followed by the size of the other group.
    pub fn oriented(
        &self,
        group: Group,
    ) -> (usize, usize) {
        (self.get(group), self.get(group.other()))
    }

    pub fn total(&self) -> usize { self.n_a + self.n_b }

    pub fn product(&self) -> u64 { self.n_a as u64 * self.n_b as u64 }

    pub fn is_degenerate(&self) -> bool { self.n_a == 0 || self.n_b == 0 }

    pub fn as_tuple(&self) -> (usize, usize) { (self.n_a, self.n_b) }
}

impl From<(usize, usize)> for SampleSizes {
    fn from(value: (usize, usize)) -> Self { Self::new(value.0, value.1) }
}

/// Outcome of a one- or two-sided test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    /// U statistic the probability was derived from.
    pub statistic:   f64,
    /// Significance probability, within `[0, 1]`.
    pub probability: f64,
    pub method:      Method,
}

impl TestResult {
    /// Fails with [`MwuError::InvalidProbability`] unless `probability`
    /// lies within `[0, 1]`.
    pub fn new(
        statistic: f64,
        probability: f64,
        method: Method,
    ) -> MwuResult<Self> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(MwuError::InvalidProbability {
                method,
                probability,
            });
        }
        Ok(Self {
            statistic,
            probability,
            method,
        })
    }

    pub fn as_tuple(&self) -> (f64, f64) { (self.statistic, self.probability) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_sizes_orientation() {
        let sizes = SampleSizes::new(5, 8);
        assert_eq!(sizes.oriented(Group::A), (5, 8));
        assert_eq!(sizes.oriented(Group::B), (8, 5));
        assert_eq!(sizes.total(), 13);
        assert_eq!(sizes.product(), 40);
        assert!(!sizes.is_degenerate());
        assert!(SampleSizes::new(0, 3).is_degenerate());
    }

    #[test]
    fn test_result_accepts_unit_interval() {
        for p in [0.0, 0.5, 1.0] {
            let result = TestResult::new(3.0, p, Method::Exact).unwrap();
            assert_eq!(result.as_tuple(), (3.0, p));
        }
    }

    #[test]
    fn test_result_rejects_invalid_probability() {
        assert_eq!(
            TestResult::new(14365.0, 1.25e11, Method::Uniform),
            Err(MwuError::InvalidProbability {
                method:      Method::Uniform,
                probability: 1.25e11,
            })
        );
        assert!(matches!(
            TestResult::new(3.0, -13.08, Method::Uniform),
            Err(MwuError::InvalidProbability { .. })
        ));
        assert!(matches!(
            TestResult::new(3.0, f64::NAN, Method::Uniform),
            Err(MwuError::InvalidProbability { .. })
        ));
    }
}
