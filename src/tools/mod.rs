//! Statistical tests built on top of the crate's data structures.
//!
//! Key submodules:
//!
//! - [`mwu`]: the Mann-Whitney U / Wilcoxon rank-sum test, with exact,
//!   normal and uniform probability methods and the [`mwu::RankSumTester`]
//!   accumulator that selects between them.
pub mod mwu;
