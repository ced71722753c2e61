//! Regression estimators on a realistic 40-sample method comparison

mod common;

use assay_core::{Error, RegressionEstimator};
use assay_regression::{
    AngleMatrix, DemingRegression, OrdinaryLeastSquares, PassingBablokRegression,
    WeightedDemingRegression,
};
use common::*;

#[test]
fn test_deming_reference_fit() {
    let model = DemingRegression::default().calculate(&X, &Y).unwrap();
    assert_relative_eq!(model.intercept, 29.719_562_584_858_636, epsilon = 1e-8);
    assert_relative_eq!(model.slope, 0.946_883_653_746_950_6, epsilon = 1e-10);
    assert!(!model.has_slope_limits());
}

#[test]
fn test_weighted_deming_reference_fit() {
    let outcome = WeightedDemingRegression::default().fit(&X, &Y).unwrap();
    assert!(outcome.converged);
    assert_eq!(outcome.iterations, 4);
    assert_relative_eq!(outcome.value.intercept, 13.159_923_528_183_725, epsilon = 1e-5);
    assert_relative_eq!(outcome.value.slope, 0.973_283_468_122_061_9, epsilon = 1e-7);
}

#[test]
fn test_weighted_deming_single_step() {
    let outcome = WeightedDemingRegression::new(1.0, 1, 1e-6).fit(&X, &Y).unwrap();
    assert!(!outcome.converged);
    assert_relative_eq!(outcome.value.intercept, 13.160_893_001_727_914, epsilon = 1e-8);
    assert_relative_eq!(outcome.value.slope, 0.973_310_207_924_266_3, epsilon = 1e-10);
}

#[test]
fn test_passing_bablok_reference_fit() {
    let estimator = PassingBablokRegression::default();
    let model = estimator.calculate(&X, &Y).unwrap();
    assert_relative_eq!(model.slope, 0.957_802_735_584_092_3, epsilon = 1e-10);
    assert_relative_eq!(model.intercept, 15.240_127_183_809_15, epsilon = 1e-8);
    assert_relative_eq!(model.slope_lcl, 0.931_075_539_092_472_6, epsilon = 1e-10);
    assert_relative_eq!(model.slope_ucl, 0.998_622_020_118_506_4, epsilon = 1e-10);
    assert_relative_eq!(model.intercept_lcl, 4.938_983_050_847_355, epsilon = 1e-8);
    assert_relative_eq!(model.intercept_ucl, 30.902_692_155_046_765, epsilon = 1e-8);

    assert!(model.slope_lcl <= model.slope && model.slope <= model.slope_ucl);
    assert!(model.intercept_lcl <= model.intercept && model.intercept <= model.intercept_ucl);
    assert!(estimator.computes_limits());
}

#[test]
fn test_passing_bablok_angle_matrix() {
    let matrix: AngleMatrix = PassingBablokRegression::default()
        .angle_matrix(&X, &Y)
        .unwrap();
    assert_eq!(matrix.n_valid(), 780);
    assert_eq!(matrix.offset(true), 22);
}

#[test]
fn test_estimators_agree_on_identity() {
    let x: Vec<f64> = (1..=30).map(|i| i as f64 * 3.5).collect();
    let estimators: Vec<Box<dyn RegressionEstimator>> = vec![
        Box::new(OrdinaryLeastSquares),
        Box::new(DemingRegression::default()),
        Box::new(WeightedDemingRegression::default()),
        Box::new(PassingBablokRegression::default()),
    ];
    for est in &estimators {
        let model = est.calculate(&x, &x).unwrap();
        assert_relative_eq!(model.slope, 1.0, epsilon = 1e-9);
        assert!(model.intercept.abs() < 1e-7, "{} intercept {}", est.name(), model.intercept);
    }
}

#[test]
fn test_deming_family_rejects_negative_values() {
    let x = [1.0, -2.0, 3.0];
    let y = [1.0, 2.0, 3.0];
    assert!(matches!(
        DemingRegression::default().calculate(&x, &y),
        Err(Error::InvalidInput(_))
    ));
    assert!(matches!(
        WeightedDemingRegression::default().calculate(&x, &y),
        Err(Error::InvalidInput(_))
    ));
    assert!(PassingBablokRegression::default().calculate(&x, &y).is_ok());
}

#[test]
fn test_repeated_calls_are_identical() {
    let (x, y) = proportional_pairs(25, 1.0, 1.02, 0.04, 11);
    let estimators: Vec<Box<dyn RegressionEstimator>> = vec![
        Box::new(DemingRegression::default()),
        Box::new(WeightedDemingRegression::default()),
        Box::new(PassingBablokRegression::default()),
    ];
    for est in &estimators {
        let first = est.calculate(&x, &y).unwrap();
        let second = est.calculate(&x, &y).unwrap();
        assert!(first.bits_eq(&second), "{} differs between calls", est.name());
    }
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_deming_recovers_noisy_line(
            slope in 0.5f64..2.0,
            intercept in 0.0f64..5.0,
            seed in any::<u64>(),
        ) {
            let (x, y) = proportional_pairs(30, intercept, slope, 0.01, seed);
            let model = DemingRegression::default().calculate(&x, &y).unwrap();
            prop_assert!(model.slope.is_finite() && model.intercept.is_finite());
            prop_assert!((model.slope - slope).abs() < 0.2 * slope);
        }

        #[test]
        fn prop_weighted_deming_finite(
            slope in 0.5f64..2.0,
            seed in any::<u64>(),
        ) {
            let (x, y) = proportional_pairs(20, 0.5, slope, 0.03, seed);
            let model = WeightedDemingRegression::default().calculate(&x, &y).unwrap();
            prop_assert!(model.slope.is_finite() && model.intercept.is_finite());
        }

        #[test]
        fn prop_passing_bablok_limits_bracket_slope(
            shift in -50.0f64..50.0,
            seed in any::<u64>(),
        ) {
            // Shifting both methods by the same constant keeps the slope
            let (x, y) = proportional_pairs(20, 2.0, 1.1, 0.05, seed);
            let xs: Vec<f64> = x.iter().map(|v| v + shift).collect();
            let ys: Vec<f64> = y.iter().map(|v| v + shift).collect();
            let base = PassingBablokRegression::default().calculate(&x, &y).unwrap();
            let shifted = PassingBablokRegression::default().calculate(&xs, &ys).unwrap();
            prop_assert!((base.slope - shifted.slope).abs() < 1e-9);
            prop_assert!(shifted.slope_lcl <= shifted.slope);
            prop_assert!(shifted.slope <= shifted.slope_ucl);
        }
    }
}
