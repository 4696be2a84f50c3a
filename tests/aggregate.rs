use std::collections::HashSet;

use kira_qpcr::{NanPolicy, QpcrError, QuantConfig, RawReading, aggregate, aggregate_with};

fn r(sample: &str, target: &str, cq: f64) -> RawReading {
    RawReading::new(sample, target, cq)
}

#[test]
fn one_row_per_distinct_pair() {
    let readings = vec![
        r("S1", "T1", 20.0),
        r("S1", "T2", 25.0),
        r("S1", "T1", 21.0),
        r("S2", "T1", 19.0),
        r("S1", "T2", 25.5),
        r("S2", "T1", 19.5),
        r("S2", "T2", 24.0),
    ];
    let out = aggregate(&readings).unwrap();
    assert_eq!(out.len(), 4);

    let expected: HashSet<(String, String)> = readings
        .iter()
        .map(|x| (x.sample.clone(), x.target.clone()))
        .collect();
    let got: HashSet<(String, String)> = out
        .iter()
        .map(|x| (x.sample.clone(), x.target.clone()))
        .collect();
    assert_eq!(got, expected);
}

#[test]
fn first_occurrence_order_not_sorted() {
    let readings = vec![
        r("S2", "Zeta", 30.0),
        r("S1", "Beta", 22.0),
        r("S2", "Alpha", 24.0),
        r("S1", "Beta", 22.4),
        r("S2", "Zeta", 30.2),
        r("S1", "Alpha", 18.0),
    ];
    let out = aggregate(&readings).unwrap();
    let order: Vec<(&str, &str)> = out
        .iter()
        .map(|x| (x.sample.as_str(), x.target.as_str()))
        .collect();
    assert_eq!(
        order,
        vec![
            ("S2", "Zeta"),
            ("S1", "Beta"),
            ("S2", "Alpha"),
            ("S1", "Alpha")
        ]
    );

    let mut sorted = order.clone();
    sorted.sort();
    assert_ne!(order, sorted);
}

#[test]
fn mean_and_std_match_direct_computation() {
    let readings = vec![r("S1", "T1", 20.0), r("S1", "T1", 22.0)];
    let out = aggregate(&readings).unwrap();
    assert_eq!(out.len(), 1);
    assert!((out[0].mean - 21.0).abs() < 1e-12);
    assert!((out[0].std - 2f64.sqrt()).abs() < 1e-12);
}

#[test]
fn single_replicate_has_nan_std() {
    let out = aggregate(&[r("S1", "T1", 20.0)]).unwrap();
    assert!((out[0].mean - 20.0).abs() < 1e-12);
    assert!(out[0].std.is_nan());
}

#[test]
fn failed_replicate_poisons_group() {
    let readings = vec![
        r("S1", "T1", 20.0),
        r("S1", "T1", f64::NAN),
        r("S1", "T2", 24.0),
        r("S1", "T2", 24.0),
    ];
    let out = aggregate(&readings).unwrap();
    assert!(out[0].mean.is_nan());
    assert!(out[0].std.is_nan());
    assert!((out[1].mean - 24.0).abs() < 1e-12);
    assert!(out[1].std.abs() < 1e-12);
}

#[test]
fn skip_policy_ignores_failed_replicate() {
    let readings = vec![
        r("S1", "T1", 20.0),
        r("S1", "T1", f64::NAN),
        r("S1", "T1", 22.0),
    ];
    let config = QuantConfig {
        nan_policy: NanPolicy::Skip,
        threads: 1,
    };
    let out = aggregate_with(&readings, &config).unwrap();
    assert!((out[0].mean - 21.0).abs() < 1e-12);
    assert!((out[0].std - 2f64.sqrt()).abs() < 1e-12);
}

#[test]
fn empty_input_is_invalid() {
    let err = aggregate(&[]).unwrap_err();
    assert!(matches!(err, QpcrError::InvalidInput(_)));
}

#[test]
fn blank_identifiers_are_invalid() {
    let err = aggregate(&[r("", "T1", 20.0)]).unwrap_err();
    assert!(matches!(err, QpcrError::InvalidInput(_)));
    let err = aggregate(&[r("S1", "  ", 20.0)]).unwrap_err();
    assert!(matches!(err, QpcrError::InvalidInput(_)));
}

#[test]
fn input_is_left_untouched() {
    let readings = vec![r("S1", "T1", 20.0), r("S1", "T1", 22.0)];
    let before = readings.clone();
    let _ = aggregate(&readings).unwrap();
    assert_eq!(readings, before);
}

#[test]
fn columns_build_readings() {
    let readings = kira_qpcr::readings_from_columns(
        vec!["S1".to_string(), "S1".to_string()],
        vec!["T1".to_string(), "T1".to_string()],
        vec![20.0, 22.0],
    )
    .unwrap();
    assert_eq!(readings.len(), 2);
    assert!((aggregate(&readings).unwrap()[0].mean - 21.0).abs() < 1e-12);
}

#[test]
fn mismatched_columns_are_invalid() {
    let err = kira_qpcr::readings_from_columns(
        vec!["S1".to_string()],
        vec!["T1".to_string(), "T2".to_string()],
        vec![20.0],
    )
    .unwrap_err();
    assert!(matches!(err, QpcrError::InvalidInput(_)));
}
