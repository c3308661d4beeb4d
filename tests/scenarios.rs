//! End-to-end checks of the two demonstrations and the API boundaries.

use std::f64::consts::PI;

use circdemo::hypothesis::{rayleigh_test, v_test};
use circdemo::prelude::*;
use circdemo::scenarios::{run_config, write_plots};
use circdemo::visualization::PlotFormat;

// H0: uniform data is flagged as non-uniform
// Falsification: 1000 uniform angles, seed 42; both p-values must stay above 0.001
#[test]
fn uniform_scenario_is_not_rejected() {
    let sample = sample_uniform(1000, Some(42)).unwrap();
    assert_eq!(sample.len(), 1000);

    let result = CircularTestRunner::standard().run(&sample, PI).unwrap();
    assert!(!result.rejects_uniformity(0.001), "{result:?}");
    assert!(!result.rejects_mean_direction(0.001), "{result:?}");

    let lines = format_result(&result).unwrap();
    assert!(lines[0].starts_with("p_rayleigh = 0."));
    assert!(lines[1].starts_with("p_vtest = "));
}

// H0: clustered data passes as uniform
// Falsification: von Mises(pi, 2), n = 58; both p-values must fall below 0.001
#[test]
fn concentrated_scenario_is_rejected() {
    for seed in [42, 7, 1234] {
        let sample = sample_concentrated(PI, 2.0, 58, Some(seed)).unwrap();
        let result = CircularTestRunner::standard().run(&sample, PI).unwrap();
        assert!(result.rejects_uniformity(0.001), "seed {seed}: {result:?}");
        assert!(result.rejects_mean_direction(0.001), "seed {seed}: {result:?}");
        assert_eq!(
            format_result(&result).unwrap(),
            ["p_rayleigh = 0.000".to_string(), "p_vtest = 0.000".to_string()]
        );
    }
}

#[test]
fn vtest_does_not_reject_cluster_opposite_known_angle() {
    let sample = sample_concentrated(0.0, 4.0, 58, Some(42)).unwrap();
    let result = CircularTestRunner::standard().run(&sample, PI).unwrap();
    assert!(result.rejects_uniformity(0.001));
    assert!(result.p_vtest > 0.99, "{result:?}");
}

#[test]
fn exact_values() {
    let identical = vec![1.0; 20];
    assert!(rayleigh_test(&identical, None).unwrap() < 1e-6);

    let antipodal = [0.0, PI];
    assert!((rayleigh_test(&antipodal, None).unwrap() - 1.0).abs() < 1e-9);
    assert!((v_test(&antipodal, 0.0, None).unwrap() - 0.5).abs() < 1e-6);
}

#[test]
fn concentration_increases_resultant_length() {
    let loose = sample_concentrated(PI, 0.5, 2000, Some(11)).unwrap();
    let tight = sample_concentrated(PI, 8.0, 2000, Some(11)).unwrap();
    let r_loose = circdemo::stats::mean_resultant_length(&loose);
    let r_tight = circdemo::stats::mean_resultant_length(&tight);
    assert!(r_tight > r_loose, "{r_tight} <= {r_loose}");
}

#[test]
fn boundaries_are_invalid_arguments() {
    assert!(sample_uniform(0, Some(42)).unwrap_err().is_invalid_argument());
    assert!(sample_concentrated(PI, 0.0, 10, Some(42))
        .unwrap_err()
        .is_invalid_argument());
    assert!(format_p(-0.1).unwrap_err().is_invalid_argument());
    assert!(PlotDataBuilder::new(0).unwrap_err().is_invalid_argument());
    assert!(AngleSample::new(Vec::new()).unwrap_err().is_invalid_argument());
}

#[test]
fn plot_points_follow_sample() {
    let sample = sample_uniform(250, Some(5)).unwrap();
    let points = to_plot_points(&sample);
    assert_eq!(points.len(), 250);
    for ((x, y), angle) in points.iter().zip(sample.iter()) {
        assert!((x - angle.cos()).abs() < 1e-12);
        assert!((y - angle.sin()).abs() < 1e-12);
    }
    assert_eq!(reference_circle(1000).unwrap().points().len(), 1000);
}

#[test]
fn default_config_runs_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let config = DemoConfig::builder()
        .output_dir(dir.path())
        .plot_format(PlotFormat::Svg)
        .build();

    let outcomes = run_config(&config).unwrap();
    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].report.scenario, "uniform");
    assert_eq!(outcomes[0].report.samples, 1000);
    assert_eq!(outcomes[1].report.scenario, "concentrated");
    assert!(outcomes[1].report.result.rejects_uniformity(0.001));

    let paths = write_plots(&config.plot, &outcomes).unwrap();
    for path in &paths {
        let svg = std::fs::read_to_string(path).unwrap();
        assert!(svg.contains("Data Points"));
        assert!(svg.contains("Circle"));
    }
}

#[test]
fn yaml_config_drives_scenarios() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("demo.yaml");
    std::fs::write(
        &path,
        "reproducibility:\n  seed: 3\nconcentrated:\n  samples: 200\n  concentration: 5.0\nplot:\n  enabled: false\n",
    )
    .unwrap();

    let config = DemoConfig::load(&path).unwrap();
    assert!(!config.plot.enabled);
    let outcomes = run_config(&config).unwrap();
    assert_eq!(outcomes[1].report.samples, 200);
    assert_eq!(outcomes[1].report.seed, 3);
}
