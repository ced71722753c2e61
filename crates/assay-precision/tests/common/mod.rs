//! Shared fixtures for precision-study integration tests

#![allow(dead_code)]

pub use approx::assert_relative_eq;

/// 20 days x 2 runs x 2 replicates: (day, run, value)
///
/// Simulated data, not a published reference dataset; expected values in
/// the tests were computed independently for this fixture.
pub const NESTED: [(i32, i32, f64); 80] = [
    (1, 1, 101.4), (1, 1, 101.0), (1, 2, 99.6), (1, 2, 99.6),
    (2, 1, 100.9), (2, 1, 101.4), (2, 2, 101.8), (2, 2, 101.5),
    (3, 1, 102.1), (3, 1, 102.2), (3, 2, 103.8), (3, 2, 101.9),
    (4, 1, 98.5), (4, 1, 100.6), (4, 2, 101.3), (4, 2, 101.1),
    (5, 1, 100.6), (5, 1, 99.4), (5, 2, 102.4), (5, 2, 101.1),
    (6, 1, 99.6), (6, 1, 95.6), (6, 2, 100.9), (6, 2, 97.6),
    (7, 1, 102.2), (7, 1, 103.1), (7, 2, 97.7), (7, 2, 97.7),
    (8, 1, 97.8), (8, 1, 103.5), (8, 2, 100.3), (8, 2, 97.1),
    (9, 1, 101.2), (9, 1, 101.7), (9, 2, 101.2), (9, 2, 100.9),
    (10, 1, 102.4), (10, 1, 107.0), (10, 2, 102.1), (10, 2, 100.3),
    (11, 1, 101.2), (11, 1, 101.8), (11, 2, 96.4), (11, 2, 99.6),
    (12, 1, 95.6), (12, 1, 99.7), (12, 2, 101.8), (12, 2, 98.2),
    (13, 1, 100.0), (13, 1, 101.2), (13, 2, 101.5), (13, 2, 100.6),
    (14, 1, 99.9), (14, 1, 97.7), (14, 2, 99.8), (14, 2, 99.8),
    (15, 1, 102.5), (15, 1, 103.0), (15, 2, 103.0), (15, 2, 102.1),
    (16, 1, 101.5), (16, 1, 103.5), (16, 2, 97.5), (16, 2, 100.4),
    (17, 1, 99.1), (17, 1, 97.7), (17, 2, 99.0), (17, 2, 97.9),
    (18, 1, 103.1), (18, 1, 103.8), (18, 2, 102.2), (18, 2, 104.5),
    (19, 1, 93.7), (19, 1, 98.3), (19, 2, 96.5), (19, 2, 96.2),
    (20, 1, 99.7), (20, 1, 102.1), (20, 2, 100.8), (20, 2, 101.5),
];

/// 5 runs x 5 replicates: (run, value)
///
/// Simulated data, not a published reference dataset; expected values in
/// the tests were computed independently for this fixture.
pub const SINGLE: [(i32, f64); 25] = [
    (1, 48.58), (1, 49.29), (1, 50.92), (1, 48.2), (1, 49.24),
    (2, 51.6), (2, 50.81), (2, 51.61), (2, 50.97), (2, 49.63),
    (3, 48.11), (3, 49.67), (3, 48.18), (3, 47.85), (3, 47.98),
    (4, 48.66), (4, 47.59), (4, 49.14), (4, 46.41), (4, 49.1),
    (5, 47.54), (5, 50.21), (5, 49.21), (5, 47.26), (5, 48.61),
];

/// Split rows into day, run and value columns
pub fn nested_columns(rows: &[(i32, i32, f64)]) -> (Vec<i32>, Vec<i32>, Vec<f64>) {
    (
        rows.iter().map(|r| r.0).collect(),
        rows.iter().map(|r| r.1).collect(),
        rows.iter().map(|r| r.2).collect(),
    )
}

pub fn single_columns(rows: &[(i32, f64)]) -> (Vec<i32>, Vec<f64>) {
    (rows.iter().map(|r| r.0).collect(), rows.iter().map(|r| r.1).collect())
}

/// The nested fixture with rows 5, 30 and 60 removed
pub fn unbalanced_rows() -> Vec<(i32, i32, f64)> {
    NESTED
        .iter()
        .enumerate()
        .filter(|(i, _)| ![5, 30, 60].contains(i))
        .map(|(_, row)| *row)
        .collect()
}
