//! Exact null distribution of U.
//!
//! Let `f(n_a, n_b, u)` be the number of ways to split the ranks
//! `1..=n_a + n_b` into groups of sizes `n_a` and `n_b` so that group A
//! ends up with statistic `u`. The largest rank belongs either to group A,
//! where it beats all `n_b` members of B, or to group B, where it adds
//! nothing:
//!
//! ```text
//! f(n_a, n_b, u) = f(n_a - 1, n_b, u - n_b) + f(n_a, n_b - 1, u)
//! f(0, n_b, 0) = f(n_a, 0, 0) = 1
//! f(n_a, n_b, u) = 0 for u < 0 or u > n_a * n_b
//! ```
//!
//! Counts are memoized per [`ExactDistribution`], so independent test runs
//! never share a table.
use hashbrown::HashMap;
use log::{
    debug,
    trace,
};

use crate::data_structs::{
    ExactMode,
    Method,
    Tail,
};
use crate::error::{
    MwuError,
    MwuResult,
};

/// Largest pooled sample size for which every arrangement count fits into
/// `u128`. `C(130, 65)` is about `9.5e37`.
pub const EXACT_MAX_TOTAL: usize = 130;

/// Memoized table of `f(n_a, n_b, u)`.
#[derive(Debug, Clone, Default)]
pub struct ExactDistribution {
    mode: ExactMode,
    memo: HashMap<(usize, usize, i64), u128>,
}

impl ExactDistribution {
    crate::getter_fn!(mode, ExactMode);

    pub fn new(mode: ExactMode) -> Self {
        Self {
            mode,
            memo: HashMap::new(),
        }
    }

    /// Number of memoized states.
    pub fn memo_len(&self) -> usize { self.memo.len() }

    /// Total number of arrangements, `C(n_a + n_b, n_a)`.
    ///
    /// Overflows for pooled sizes above [`EXACT_MAX_TOTAL`].
    pub fn total(
        n_a: usize,
        n_b: usize,
    ) -> u128 {
        num::integer::binomial((n_a + n_b) as u128, n_a as u128)
    }

    /// `f(n_a, n_b, u)`. Values of `u` outside the support give 0.
    ///
    /// Overflows for pooled sizes above [`EXACT_MAX_TOTAL`].
    pub fn count(
        &mut self,
        n_a: usize,
        n_b: usize,
        u: i64,
    ) -> u128 {
        if u < 0 || u as u64 > n_a as u64 * n_b as u64 {
            return 0;
        }
        // One group is empty and u == 0
        if n_a == 0 || n_b == 0 {
            return 1;
        }
        if let Some(&count) = self.memo.get(&(n_a, n_b, u)) {
            return count;
        }

        let count = self.count(n_a - 1, n_b, u - n_b as i64)
            + self.count(n_a, n_b - 1, u);
        self.memo.insert((n_a, n_b, u), count);
        count
    }

    /// Exact probability of `u` for group A with sizes `(n_a, n_b)`.
    ///
    /// Returns the arrangement count behind the probability together with
    /// the probability itself. In [`ExactMode::Point`] the count is
    /// `f(n_a, n_b, u)` and `tail` has no effect; in
    /// [`ExactMode::Cumulative`] the counts of every U at least as far into
    /// `tail` are summed.
    pub fn probability(
        &mut self,
        n_a: usize,
        n_b: usize,
        u: u64,
        tail: Tail,
    ) -> MwuResult<(u128, f64)> {
        if n_a == 0 || n_b == 0 {
            return Err(MwuError::DegenerateSample { n_a, n_b });
        }
        let max = n_a as u64 * n_b as u64;
        if u > max {
            return Err(MwuError::OutOfRange { u: u as f64, max });
        }
        if n_a + n_b > EXACT_MAX_TOTAL {
            return Err(MwuError::TooLarge {
                method: Method::Exact,
                n_a,
                n_b,
            });
        }

        let count = match (self.mode, tail) {
            (ExactMode::Point, _) => self.count(n_a, n_b, u as i64),
            (ExactMode::Cumulative, Tail::Lower) => {
                (0..=u)
                    .map(|uu| self.count(n_a, n_b, uu as i64))
                    .sum::<u128>()
            },
            (ExactMode::Cumulative, Tail::Upper) => {
                (u..=max)
                    .map(|uu| self.count(n_a, n_b, uu as i64))
                    .sum::<u128>()
            },
        };
        let total = Self::total(n_a, n_b);
        let p = count as f64 / total as f64;

        debug!(
            "Exact {:?} probability for n_a={}, n_b={}, u={}, tail={:?}: \
             {}/{} = {}",
            self.mode, n_a, n_b, u, tail, count, total, p
        );
        trace!("Exact table holds {} states", self.memo.len());
        Ok((count, p))
    }

    /// Point probability of `u` without validating the arguments.
    ///
    /// The caller guarantees `n_a, n_b >= 1` and
    /// `n_a + n_b <= EXACT_MAX_TOTAL`. A `u` outside of `[0, n_a * n_b]`
    /// is not rejected, it simply has no arrangements.
    pub fn probability_unchecked(
        &mut self,
        n_a: usize,
        n_b: usize,
        u: i64,
    ) -> f64 {
        self.count(n_a, n_b, u) as f64 / Self::total(n_a, n_b) as f64
    }
}

/// Exact point probability `P(U = u)` with a fresh table.
///
/// Returns the number of arrangements with statistic `u` and its
/// probability. Tail sums come from an [`ExactDistribution`] in
/// [`ExactMode::Cumulative`].
pub fn exact_p(
    n_a: usize,
    n_b: usize,
    u: u64,
) -> MwuResult<(u128, f64)> {
    // A point mass has no tail
    ExactDistribution::new(ExactMode::Point).probability(n_a, n_b, u, Tail::Lower)
}

/// Exact point probability of `u` with a fresh table, skipping all
/// validation.
///
/// See [`ExactDistribution::probability_unchecked`] for the preconditions
/// the caller takes over.
pub fn exact_p_unchecked(
    n_a: usize,
    n_b: usize,
    u: i64,
) -> f64 {
    ExactDistribution::new(ExactMode::Point).probability_unchecked(n_a, n_b, u)
}
