use itertools::Itertools;
use log::trace;

use crate::data_structs::{
    Group,
    Observation,
    RankedObservation,
    SampleSizes,
};
use crate::error::{
    MwuError,
    MwuResult,
};

/// Pooled ranking of a two-group sample.
///
/// Ranked observations are kept in insertion order. `tie_sizes` holds the
/// size of every block of equal values in ascending value order, singletons
/// included.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedSample {
    ranked:    Vec<RankedObservation>,
    tie_sizes: Vec<usize>,
}

impl RankedSample {
    crate::getter_fn!(ranked, Vec<RankedObservation>);
    crate::getter_fn!(tie_sizes, Vec<usize>);

    pub fn len(&self) -> usize { self.ranked.len() }

    pub fn is_empty(&self) -> bool { self.ranked.is_empty() }

    pub fn sizes(&self) -> SampleSizes {
        sample_sizes(self.ranked.iter().map(|r| r.observation()))
    }

    pub fn rank_sum(
        &self,
        group: Group,
    ) -> f64 {
        self.ranked
            .iter()
            .filter(|r| r.group() == group)
            .map(|r| *r.rank())
            .sum()
    }

    /// `U = R - n(n + 1) / 2` for `group`. Zero for an empty group.
    pub fn u_statistic(
        &self,
        group: Group,
    ) -> f64 {
        let n = self.sizes().get(group) as f64;
        self.rank_sum(group) - n * (n + 1.0) / 2.0
    }

    pub fn has_ties(&self) -> bool { self.tie_sizes.iter().any(|&t| t > 1) }

    /// Number of blocks holding more than one observation.
    pub fn tie_block_count(&self) -> usize {
        self.tie_sizes.iter().filter(|&&t| t > 1).count()
    }

    /// `Σ(t³ - t)` over all tie blocks.
    pub fn tie_correction(&self) -> f64 {
        self.tie_sizes
            .iter()
            .map(|&t| {
                let t = t as f64;
                t * t * t - t
            })
            .sum()
    }
}

/// Counts observations per group.
pub fn sample_sizes<'a, I>(observations: I) -> SampleSizes
where
    I: IntoIterator<Item = &'a Observation>, {
    observations
        .into_iter()
        .fold(SampleSizes::default(), |mut sizes, obs| {
            match obs.group {
                Group::A => sizes.n_a += 1,
                Group::B => sizes.n_b += 1,
            }
            sizes
        })
}

/// Ranks the pooled sample, averaging the positions of tied values.
pub fn rank_observations(observations: &[Observation]) -> RankedSample {
    let order = (0..observations.len())
        .sorted_by(|&i, &j| {
            observations[i]
                .value
                .total_cmp(&observations[j].value)
        })
        .collect_vec();

    let mut ranks = vec![(0.0, 0usize); observations.len()];
    let mut tie_sizes = Vec::new();
    let mut position = 0usize;

    for (_, block) in &order.iter().chunk_by(|&&idx| observations[idx].value) {
        let block = block.copied().collect_vec();
        let size = block.len();
        // Mean of the 1-based positions position+1 ..= position+size
        let rank = position as f64 + (size as f64 + 1.0) / 2.0;
        for idx in block {
            ranks[idx] = (rank, size);
        }
        tie_sizes.push(size);
        position += size;
    }

    trace!(
        "Ranked {} observations into {} blocks",
        observations.len(),
        tie_sizes.len()
    );

    let ranked = observations
        .iter()
        .zip(ranks)
        .map(|(obs, (rank, size))| RankedObservation::new(*obs, rank, size))
        .collect_vec();

    RankedSample { ranked, tie_sizes }
}

/// U statistic of `group` over `observations`.
///
/// Fails with [`MwuError::DegenerateSample`] when either group is empty.
pub fn one_sided_u(
    observations: &[Observation],
    group: Group,
) -> MwuResult<f64> {
    let sizes = sample_sizes(observations);
    if sizes.is_degenerate() {
        return Err(MwuError::DegenerateSample {
            n_a: sizes.n_a,
            n_b: sizes.n_b,
        });
    }
    Ok(rank_observations(observations).u_statistic(group))
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use itertools::Itertools;
    use rand::{
        Rng,
        SeedableRng,
    };
    use rand_chacha::ChaCha8Rng;
    use rstest::rstest;

    use super::*;

    fn tagged(
        a: &[f64],
        b: &[f64],
    ) -> Vec<Observation> {
        a.iter()
            .map(|&v| Observation::new(v, Group::A))
            .chain(b.iter().map(|&v| Observation::new(v, Group::B)))
            .collect()
    }

    #[test]
    fn test_ranks_with_ties() {
        let observations = tagged(&[1.0, 2.0, 5.0], &[2.0, 2.0]);
        let sample = rank_observations(&observations);
        let ranks = sample.ranked().iter().map(|r| *r.rank()).collect_vec();
        assert_eq!(ranks, vec![1.0, 3.0, 5.0, 3.0, 3.0]);
        assert_eq!(sample.tie_sizes(), &vec![1, 3, 1]);
        assert_eq!(
            sample.ranked().iter().map(|r| *r.tie_size()).collect_vec(),
            vec![1, 3, 1, 3, 3]
        );
        assert!(sample.has_ties());
        assert_eq!(sample.tie_block_count(), 1);
        assert_approx_eq!(sample.tie_correction(), 24.0);
    }

    #[test]
    fn test_ranks_keep_insertion_order() {
        let observations = tagged(&[10.0, -3.0], &[4.0]);
        let sample = rank_observations(&observations);
        let values = sample.ranked().iter().map(|r| r.value()).collect_vec();
        assert_eq!(values, vec![10.0, -3.0, 4.0]);
        let ranks = sample.ranked().iter().map(|r| *r.rank()).collect_vec();
        assert_eq!(ranks, vec![3.0, 1.0, 2.0]);
        assert!(!sample.has_ties());
    }

    #[test]
    fn test_signed_zero_is_one_block() {
        let observations = tagged(&[-0.0], &[0.0]);
        let sample = rank_observations(&observations);
        assert_eq!(sample.tie_sizes(), &vec![2]);
        assert_approx_eq!(sample.u_statistic(Group::A), 0.5);
    }

    #[rstest]
    #[case(
        &[0.0, 6.0, 7.0, 8.0, 9.0, 10.0],
        &[1.0, 2.0, 3.0, 4.0, 5.0, 11.0],
        25.0,
        11.0
    )]
    #[case(
        &[2.0, 4.0, 5.0, 6.0, 8.0],
        &[1.0, 3.0, 7.0, 9.0, 10.0, 11.0, 12.0, 13.0],
        10.0,
        30.0
    )]
    #[case(&[1.0, 2.0], &[2.0, 3.0], 0.5, 3.5)]
    fn test_one_sided_u(
        #[case] a: &[f64],
        #[case] b: &[f64],
        #[case] u_a: f64,
        #[case] u_b: f64,
    ) {
        let observations = tagged(a, b);
        assert_approx_eq!(one_sided_u(&observations, Group::A).unwrap(), u_a);
        assert_approx_eq!(one_sided_u(&observations, Group::B).unwrap(), u_b);
    }

    #[test]
    fn test_one_sided_u_degenerate() {
        let observations = tagged(&[1.0, 2.0], &[]);
        assert_eq!(
            one_sided_u(&observations, Group::A),
            Err(MwuError::DegenerateSample { n_a: 2, n_b: 0 })
        );
    }

    #[test]
    fn test_random_samples_invariants() {
        let mut rng = ChaCha8Rng::seed_from_u64(1234);
        for _ in 0..50 {
            let n_a = rng.gen_range(1..20);
            let n_b = rng.gen_range(1..20);
            // Small integer range so ties are frequent
            let a = (0..n_a)
                .map(|_| rng.gen_range(0..10) as f64)
                .collect_vec();
            let b = (0..n_b)
                .map(|_| rng.gen_range(0..10) as f64)
                .collect_vec();
            let sample = rank_observations(&tagged(&a, &b));

            let n = (n_a + n_b) as f64;
            let rank_total: f64 = sample.ranked().iter().map(|r| *r.rank()).sum();
            assert_approx_eq!(rank_total, n * (n + 1.0) / 2.0);
            assert_approx_eq!(
                sample.u_statistic(Group::A) + sample.u_statistic(Group::B),
                (n_a * n_b) as f64
            );
            assert_eq!(sample.tie_sizes().iter().sum::<usize>(), n_a + n_b);
        }
    }
}
