//! Shared fixtures for method-comparison integration tests

#![allow(dead_code)]

pub use approx::assert_relative_eq;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Comparative-method results for a 40-sample comparison (50..1550 range)
///
/// Simulated data, not a published reference dataset; expected values in
/// the tests were computed independently for this fixture.
pub const X: [f64; 40] = [
    47.7, 76.7, 115.2, 163.1, 199.9, 220.2, 258.5, 308.2, 349.4, 400.4, 416.5, 462.4, 491.8,
    526.1, 576.8, 576.9, 641.6, 650.0, 712.0, 768.6, 792.9, 815.0, 910.0, 955.4, 1006.0, 950.2,
    997.5, 1105.3, 1093.1, 1177.7, 1224.5, 1213.0, 1317.5, 1293.0, 1267.1, 1400.2, 1302.6,
    1381.6, 1568.2, 1575.5,
];

/// Candidate-method results for the same samples
pub const Y: [f64; 40] = [
    59.1, 88.0, 124.6, 169.3, 201.7, 224.6, 294.1, 300.4, 350.6, 408.2, 438.5, 455.5, 506.2,
    539.0, 563.2, 601.7, 699.8, 688.1, 708.9, 725.5, 829.2, 813.0, 857.3, 915.9, 934.1, 994.0,
    1001.3, 1054.4, 1103.8, 1140.4, 1109.9, 1231.7, 1160.4, 1278.6, 1297.0, 1330.1, 1326.4,
    1404.4, 1477.1, 1428.1,
];

/// Positive paired sample `y = intercept + slope·x` with multiplicative noise
pub fn proportional_pairs(
    n: usize,
    intercept: f64,
    slope: f64,
    cv: f64,
    seed: u64,
) -> (Vec<f64>, Vec<f64>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let x: Vec<f64> = (0..n)
        .map(|i| 10.0 + 90.0 * i as f64 / n as f64 + rng.gen_range(0.0..1.0))
        .collect();
    let y = x
        .iter()
        .map(|&v| (intercept + slope * v) * (1.0 + cv * rng.gen_range(-1.0..1.0)))
        .collect();
    (x, y)
}
