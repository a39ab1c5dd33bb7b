//! # ranksum
//!
//! `ranksum` is a Rust library and command-line tool for the Mann-Whitney U
//! (Wilcoxon rank-sum) test. Observations from two groups are accumulated,
//! ranked with ties averaged, and the U statistic of either group is turned
//! into a significance probability.
//!
//! ## Key Features
//!
//! * **Exact null distribution**: a memoized recurrence over the number of
//!   rank arrangements producing each U ([`ExactDistribution`]), reporting
//!   either point or cumulative probabilities.
//! * **Normal approximation**: tie-corrected variance and a half-unit
//!   continuity shift ([`normal_approximation_with_ties`]).
//! * **Uniform approximation**: a cheap Irwin-Hall estimate of the rank-sum
//!   distribution ([`uniform_approximation`]).
//! * **Automatic method selection**: exact for small untied samples, normal
//!   otherwise, configurable with [`MwuConfig`].
//!
//! ## Structure
//!
//! * [`data_structs`]: group tags, observations, sample sizes and results.
//! * [`tools`]: the test itself ([`tools::mwu`]).
//! * [`error`]: the [`MwuError`] taxonomy.
//! * [`utils`]: accessor and builder macros.
//!
//! ## Usage
//!
//! ```
//! use ranksum::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut tester = RankSumTester::new();
//!     for (value, group) in [(0.0, Group::A), (1.0, Group::B), (2.0, Group::B)] {
//!         tester.add(value, group)?;
//!     }
//!     tester.extend([6.0, 7.0, 8.0], Group::A)?;
//!
//!     let sizes = tester.set_sizes();
//!     let u = tester.u_statistic(Group::A)?;
//!     println!("n_a={}, n_b={}, U_A={}", sizes.n_a, sizes.n_b, u);
//!
//!     let result = tester.run_two_sided_test()?;
//!     println!("U={}, p={}", result.statistic, result.probability);
//!     Ok(())
//! }
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod data_structs;
pub mod error;
pub mod exports;
pub mod prelude;
pub mod tools;
pub mod utils;

#[allow(unused_imports)]
use prelude::*;
