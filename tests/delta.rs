use kira_qpcr::{
    NanPolicy, QpcrError, QuantConfig, RawReading, compute_delta_cq, compute_delta_cq_with,
};

fn r(sample: &str, target: &str, cq: f64) -> RawReading {
    RawReading::new(sample, target, cq)
}

fn scenario() -> Vec<RawReading> {
    vec![
        r("S1", "Actin", 20.0),
        r("S1", "Actin", 20.0),
        r("S1", "GeneX", 25.0),
        r("S1", "GeneX", 25.0),
        r("Cal", "Actin", 19.0),
        r("Cal", "Actin", 19.0),
        r("Cal", "GeneX", 24.0),
        r("Cal", "GeneX", 24.0),
    ]
}

#[test]
fn delta_cq_worked_example() {
    let out = compute_delta_cq(&scenario(), &["Actin"]).unwrap();
    assert_eq!(out.len(), 4);

    let s1_gene = out.iter().find(|x| x.sample == "S1" && x.target == "GeneX").unwrap();
    assert!((s1_gene.mean_ic - 20.0).abs() < 1e-12);
    assert!((s1_gene.d_cq - 5.0).abs() < 1e-12);

    let cal_gene = out.iter().find(|x| x.sample == "Cal" && x.target == "GeneX").unwrap();
    assert!((cal_gene.mean_ic - 19.0).abs() < 1e-12);
    assert!((cal_gene.d_cq - 5.0).abs() < 1e-12);
}

#[test]
fn control_rows_have_nan_d_cq() {
    let out = compute_delta_cq(&scenario(), &["Actin"]).unwrap();
    for row in &out {
        if row.target == "Actin" {
            assert!(row.d_cq.is_nan());
        } else {
            assert!(!row.d_cq.is_nan());
        }
    }
}

#[test]
fn mean_ic_constant_within_sample() {
    let readings = vec![
        r("S1", "Actin", 20.0),
        r("S1", "GeneX", 25.0),
        r("S1", "GeneY", 27.0),
        r("S2", "GeneY", 26.0),
        r("S2", "Actin", 18.0),
        r("S2", "GeneX", 23.0),
    ];
    let out = compute_delta_cq(&readings, &["Actin"]).unwrap();
    for sample in ["S1", "S2"] {
        let values: Vec<f64> = out
            .iter()
            .filter(|x| x.sample == sample)
            .map(|x| x.mean_ic)
            .collect();
        assert!(values.windows(2).all(|w| w[0] == w[1]));
    }
}

#[test]
fn mean_of_means_weights_each_control_equally() {
    // Actin has three replicates, Gapdh one; pooling would give 20.5.
    let readings = vec![
        r("S1", "Actin", 20.0),
        r("S1", "Actin", 20.0),
        r("S1", "Actin", 20.0),
        r("S1", "Gapdh", 22.0),
        r("S1", "GeneX", 26.0),
    ];
    let out = compute_delta_cq(&readings, &["Actin", "Gapdh"]).unwrap();
    let gene = out.iter().find(|x| x.target == "GeneX").unwrap();
    assert!((gene.mean_ic - 21.0).abs() < 1e-12);
    assert!((gene.d_cq - 5.0).abs() < 1e-12);
}

#[test]
fn sample_without_control_gets_nan() {
    let readings = vec![
        r("S1", "Actin", 20.0),
        r("S1", "GeneX", 25.0),
        r("S2", "GeneX", 23.0),
    ];
    let out = compute_delta_cq(&readings, &["Actin"]).unwrap();
    let s2 = out.iter().find(|x| x.sample == "S2").unwrap();
    assert!(s2.mean_ic.is_nan());
    assert!(s2.d_cq.is_nan());
}

#[test]
fn preserves_aggregate_order() {
    let readings = vec![
        r("S1", "GeneX", 25.0),
        r("S1", "Actin", 20.0),
        r("S0", "Actin", 19.0),
        r("S0", "GeneX", 24.0),
    ];
    let out = compute_delta_cq(&readings, &["Actin"]).unwrap();
    let order: Vec<(&str, &str)> = out
        .iter()
        .map(|x| (x.sample.as_str(), x.target.as_str()))
        .collect();
    assert_eq!(
        order,
        vec![
            ("S1", "GeneX"),
            ("S1", "Actin"),
            ("S0", "Actin"),
            ("S0", "GeneX")
        ]
    );
}

#[test]
fn skip_policy_applies_to_control_means() {
    let readings = vec![
        r("S1", "Actin", f64::NAN),
        r("S1", "Gapdh", 22.0),
        r("S1", "GeneX", 27.0),
    ];
    let propagated = compute_delta_cq(&readings, &["Actin", "Gapdh"]).unwrap();
    assert!(propagated[2].d_cq.is_nan());

    let config = QuantConfig {
        nan_policy: NanPolicy::Skip,
        threads: 1,
    };
    let skipped = compute_delta_cq_with(&readings, &["Actin", "Gapdh"], &config).unwrap();
    assert!((skipped[2].mean_ic - 22.0).abs() < 1e-12);
    assert!((skipped[2].d_cq - 5.0).abs() < 1e-12);
}

#[test]
fn empty_controls_are_invalid() {
    let none: [&str; 0] = [];
    let err = compute_delta_cq(&scenario(), &none).unwrap_err();
    assert!(matches!(err, QpcrError::InvalidInput(_)));

    let err = compute_delta_cq(&scenario(), &[""]).unwrap_err();
    assert!(matches!(err, QpcrError::InvalidInput(_)));
}

#[test]
fn malformed_readings_are_invalid() {
    let err = compute_delta_cq(&[], &["Actin"]).unwrap_err();
    assert!(matches!(err, QpcrError::InvalidInput(_)));
}
