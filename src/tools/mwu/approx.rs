//! Asymptotic approximations of the null distribution of U.
use std::f64::consts::SQRT_2;

use log::debug;
use num::integer::binomial;
use statrs::function::erf::erfc;
use statrs::function::factorial::factorial;

use crate::data_structs::{
    Method,
    Tail,
};
use crate::error::{
    MwuError,
    MwuResult,
};

/// Largest group A handled by the uniform approximation. The alternating
/// Irwin-Hall sum loses about 1e-7 of absolute accuracy at this size and
/// becomes meaningless past 80.
pub const UNIFORM_MAX_GROUP: usize = 60;

fn ensure_sizes(
    n_a: usize,
    n_b: usize,
) -> MwuResult<()> {
    if n_a == 0 || n_b == 0 {
        Err(MwuError::DegenerateSample { n_a, n_b })
    }
    else {
        Ok(())
    }
}

fn standard_normal_cdf(z: f64) -> f64 { 0.5 * erfc(-z / SQRT_2) }

fn standard_normal_sf(z: f64) -> f64 { 0.5 * erfc(z / SQRT_2) }

/// Normal approximation for an untied sample.
///
/// Returns `(z, p)`. See [`normal_approximation_with_ties`].
pub fn normal_approximation(
    n_a: usize,
    n_b: usize,
    u: f64,
    tail: Tail,
) -> MwuResult<(f64, f64)> {
    normal_approximation_with_ties(n_a, n_b, u, 0.0, tail)
}

/// Normal approximation of the tail probability of `u`.
///
/// `tie_correction` is `Σ(t³ - t)` over the tie blocks of the pooled
/// sample. The half-unit continuity shift is taken on the side of `tail`:
/// `z = (u - mean - 0.5) / sd` for the lower tail and
/// `z = (u - mean + 0.5) / sd` for the upper one, so that swapping the
/// groups together with the tail gives the same probability.
///
/// A sample where every value is tied has zero variance and yields
/// `(0, 1)`.
pub fn normal_approximation_with_ties(
    n_a: usize,
    n_b: usize,
    u: f64,
    tie_correction: f64,
    tail: Tail,
) -> MwuResult<(f64, f64)> {
    ensure_sizes(n_a, n_b)?;

    let n = (n_a + n_b) as f64;
    let product = n_a as f64 * n_b as f64;
    let mean = product / 2.0;
    let variance = product * ((n + 1.0) - tie_correction / (n * (n - 1.0))) / 12.0;

    if variance <= 0.0 {
        debug!(
            "Zero variance of U for n_a={}, n_b={}: all observations tied",
            n_a, n_b
        );
        return Ok((0.0, 1.0));
    }

    let sd = variance.sqrt();
    let (z, p) = match tail {
        Tail::Lower => {
            let z = (u - mean - 0.5) / sd;
            (z, standard_normal_cdf(z))
        },
        Tail::Upper => {
            let z = (u - mean + 0.5) / sd;
            (z, standard_normal_sf(z))
        },
    };

    debug!(
        "Normal approximation for n_a={}, n_b={}, u={}, tail={:?}: \
         mean={}, var={}, z={:.4}, p={}",
        n_a, n_b, u, tail, mean, variance, z, p
    );
    Ok((z, p))
}

/// Irwin-Hall CDF, `P(X_1 + ... + X_n <= z)` for `X_i ~ U(0, 1)`.
///
/// Accurate only for `z <= n / 2`; evaluate the upper half through
/// `F(z) = 1 - F(n - z)`.
fn irwin_hall_cdf(
    z: f64,
    n: usize,
) -> f64 {
    let last = z.floor() as u64;
    let sum = (0..=last).rev().fold(0.0, |acc, k| {
        let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
        // Exact coefficients, the alternating sum cancels heavily
        let coef = binomial(n as u128, k as u128) as f64;
        sign * coef * (z - k as f64).powf(n as f64) + acc
    });
    (1.0 / factorial(n as u64)) * sum
}

/// Uniform (Irwin-Hall) approximation of the probability of `u`.
///
/// The rank sum of group A is rescaled onto a sum of `n_a` standard
/// uniform variables and the tail nearer to the rescaled value is
/// returned. Cheap and rough: far off the exact value for small or
/// unbalanced samples.
///
/// Fails with [`MwuError::TooLarge`] when `n_a` exceeds
/// [`UNIFORM_MAX_GROUP`].
pub fn uniform_approximation(
    n_a: usize,
    n_b: usize,
    u: f64,
) -> MwuResult<f64> {
    ensure_sizes(n_a, n_b)?;
    if n_a > UNIFORM_MAX_GROUP {
        return Err(MwuError::TooLarge {
            method: Method::Uniform,
            n_a,
            n_b,
        });
    }

    let n = n_a as u64;
    let m = n_b as u64;
    let rank_sum = u + (n * (n + 1) / 2) as f64;
    let a = ((m * (n + m + 1)) as f64).sqrt();
    // (n + m + 1) / m truncates, as in the historical estimator
    let b = (n as f64 / 2.0) * (1.0 - (((n + m + 1) / m) as f64).sqrt());
    let z = b + rank_sum / a;

    let p = if z < 0.0 {
        1.0
    }
    else if z > n as f64 {
        0.0
    }
    else if z > n as f64 / 2.0 {
        // Upper tail by symmetry of the Irwin-Hall distribution
        irwin_hall_cdf(n as f64 - z, n_a)
    }
    else {
        irwin_hall_cdf(z, n_a)
    };

    debug!(
        "Uniform approximation for n_a={}, n_b={}, u={}: z={:.4}, p={}",
        n_a, n_b, u, z, p
    );
    Ok(p)
}
