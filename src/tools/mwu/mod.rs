//! Mann-Whitney U (Wilcoxon rank-sum) test.
//!
//! [`RankSumTester`] accumulates observations tagged with a [`Group`] and
//! answers one- and two-sided tests over them. The probability comes from
//! one of three methods:
//!
//! - [`exact`]: the exact null distribution of U from a memoized
//!   recurrence. Valid only without ties and limited to small samples.
//! - [`approx::normal_approximation_with_ties`]: normal approximation with
//!   tie-corrected variance.
//! - [`approx::uniform_approximation`]: a cheap Irwin-Hall estimate.
//!
//! Which one runs is decided by [`MwuConfig`]. With the default
//! [`Strategy::Auto`] the exact method is used when neither group holds more
//! than 8 observations and no values are tied, the normal approximation
//! otherwise.
//!
//! ```
//! use ranksum::prelude::*;
//!
//! let mut tester = RankSumTester::new();
//! tester.extend([2.0, 4.0, 5.0, 6.0, 8.0], Group::A).unwrap();
//! tester
//!     .extend([1.0, 3.0, 7.0, 9.0, 10.0, 11.0, 12.0, 13.0], Group::B)
//!     .unwrap();
//!
//! let result = tester.run_two_sided_test().unwrap();
//! assert_eq!(result.statistic, 10.0);
//! assert_eq!(result.method, Method::Exact);
//! assert!((result.probability - 0.04351204351204351).abs() < 1e-12);
//! ```
pub mod approx;
pub mod config;
pub mod exact;
pub mod ranks;

pub use approx::{
    normal_approximation,
    normal_approximation_with_ties,
    uniform_approximation,
    UNIFORM_MAX_GROUP,
};
pub use config::MwuConfig;
pub use exact::{
    exact_p,
    exact_p_unchecked,
    ExactDistribution,
};
pub use ranks::{
    one_sided_u,
    rank_observations,
    sample_sizes,
    RankedSample,
};

use log::{
    debug,
    info,
};

use crate::data_structs::{
    Group,
    Method,
    Observation,
    SampleSizes,
    Tail,
    TestResult,
};
use crate::error::{
    MwuError,
    MwuResult,
};
use crate::with_field_fn;

/// Accumulator of two-group observations.
///
/// Observations can only be appended. All queries borrow the tester
/// immutably and build their own ranking and exact tables, so a filled
/// tester can be queried from several threads at once.
#[derive(Debug, Clone, Default)]
pub struct RankSumTester {
    observations: Vec<Observation>,
    config:       MwuConfig,
}

impl RankSumTester {
    with_field_fn!(config, MwuConfig);

    pub fn new() -> Self { Self::default() }

    pub fn config(&self) -> &MwuConfig { &self.config }

    /// Appends an observation. Fails on NaN or infinite values.
    pub fn add(
        &mut self,
        value: f64,
        group: Group,
    ) -> MwuResult<()> {
        if !value.is_finite() {
            return Err(MwuError::InvalidInput { value });
        }
        self.observations.push(Observation::new(value, group));
        Ok(())
    }

    /// Appends every value to `group`, stopping at the first invalid one.
    pub fn extend<I>(
        &mut self,
        values: I,
        group: Group,
    ) -> MwuResult<()>
    where
        I: IntoIterator<Item = f64>, {
        values
            .into_iter()
            .try_for_each(|value| self.add(value, group))
    }

    /// Observations in insertion order.
    pub fn observations(&self) -> &[Observation] { &self.observations }

    pub fn len(&self) -> usize { self.observations.len() }

    pub fn is_empty(&self) -> bool { self.observations.is_empty() }

    pub fn set_sizes(&self) -> SampleSizes { sample_sizes(&self.observations) }

    pub fn ranked(&self) -> RankedSample { rank_observations(&self.observations) }

    /// Rank sums `(R_A, R_B)` of the pooled sample.
    pub fn rank_sums(&self) -> (f64, f64) {
        let sample = self.ranked();
        (sample.rank_sum(Group::A), sample.rank_sum(Group::B))
    }

    pub fn u_statistic(
        &self,
        group: Group,
    ) -> MwuResult<f64> {
        one_sided_u(&self.observations, group)
    }

    /// The smaller of the two U values and the group it belongs to. Group A
    /// wins ties.
    pub fn two_sided_u(&self) -> MwuResult<(f64, Group)> {
        let sample = self.checked_sample()?;
        Ok(smaller_u(&sample))
    }

    /// Tests whether the values of `group` are stochastically smaller than
    /// those of the other group.
    ///
    /// The probability is the lower tail of the U of `group`.
    pub fn run_one_sided_test(
        &self,
        group: Group,
    ) -> MwuResult<TestResult> {
        let sample = self.checked_sample()?;
        let sizes = sample.sizes();
        info!(
            "Performing one-sided Mann-Whitney U test for group {}: n_a={}, \
             n_b={}",
            group, sizes.n_a, sizes.n_b
        );
        let u = sample.u_statistic(group);
        self.lower_tail(&sample, group, u)
    }

    /// Doubles the one-sided probability of the group with the smaller U,
    /// capped at 1.
    pub fn run_two_sided_test(&self) -> MwuResult<TestResult> {
        let sample = self.checked_sample()?;
        let sizes = sample.sizes();
        info!(
            "Performing two-sided Mann-Whitney U test: n_a={}, n_b={}",
            sizes.n_a, sizes.n_b
        );
        let (u, group) = smaller_u(&sample);
        let one_sided = self.lower_tail(&sample, group, u)?;
        TestResult::new(
            u,
            (2.0 * one_sided.probability).min(1.0),
            one_sided.method,
        )
    }

    fn checked_sample(&self) -> MwuResult<RankedSample> {
        let sample = self.ranked();
        let sizes = sample.sizes();
        if sizes.is_degenerate() {
            return Err(MwuError::DegenerateSample {
                n_a: sizes.n_a,
                n_b: sizes.n_b,
            });
        }
        Ok(sample)
    }

    fn lower_tail(
        &self,
        sample: &RankedSample,
        group: Group,
        u: f64,
    ) -> MwuResult<TestResult> {
        let (n, m) = sample.sizes().oriented(group);
        let method = self
            .config
            .select_method(n, m, sample.tie_block_count())?;

        let probability = match method {
            Method::Exact => {
                // Untied samples have integral U
                let mut table = ExactDistribution::new(self.config.exact_mode);
                table.probability(n, m, u.round() as u64, Tail::Lower)?.1
            },
            Method::Normal => {
                normal_approximation_with_ties(
                    n,
                    m,
                    u,
                    sample.tie_correction(),
                    Tail::Lower,
                )?
                .1
            },
            Method::Uniform => uniform_approximation(n, m, u)?,
        };

        debug!(
            "Group {} (n={}, m={}): U={}, p={} via {} method",
            group, n, m, u, probability, method
        );
        TestResult::new(u, probability, method)
    }
}

fn smaller_u(sample: &RankedSample) -> (f64, Group) {
    let u_a = sample.u_statistic(Group::A);
    let u_b = sample.u_statistic(Group::B);
    if u_a <= u_b {
        (u_a, Group::A)
    }
    else {
        (u_b, Group::B)
    }
}
