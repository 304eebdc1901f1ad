//! Configuration parsing, defaults, presets and file loading.

use std::io::Write;

use arbor_core::Vertex;
use arbor_mcmc::config::{EnergyParams, RunConfig};

#[test]
fn empty_document_yields_the_defaults() {
    let config = RunConfig::from_yaml_str("{}").unwrap();
    assert_eq!(config.rows, 30);
    assert_eq!(config.cols, 40);
    assert_eq!(config.steps, 40_000);
    assert_eq!(config.burn_in, 0);
    assert_eq!(config.thinning, 1);
    assert_eq!(config.beta, 0.1);
    assert!(!config.periodic.rows && !config.periodic.cols);
    assert_eq!(config.params, EnergyParams::default());
    assert_eq!(config.params.winding_radius, 10);
    assert!(config.metrics_file.is_none());
    assert_eq!(config, RunConfig::default());
}

#[test]
fn explicit_fields_override_the_defaults() {
    let text = r#"
rows: 12
cols: 16
periodic:
  cols: true
steps: 5000
burn_in: 500
thinning: 25
beta: 0.4
params:
  alpha: 30.0
  gamma: 20.0
  delta: [0.0, 0.0, -30.0, 30.0, 30.0]
  vortex:
    - pivot: { row: 5, col: 5 }
      coeff: -500.0
seed_policy:
  master_seed: 42
metrics_file: out/metrics.csv
"#;
    let config = RunConfig::from_yaml_str(text).unwrap();
    assert_eq!(config.rows, 12);
    assert!(config.periodic.cols && !config.periodic.rows);
    assert_eq!(config.burn_in, 500);
    assert_eq!(config.params.vortex.len(), 1);
    assert_eq!(config.params.vortex[0].pivot, Vertex::new(5, 5));
    assert_eq!(config.params.vortex[0].coeff, -500.0);
    // Unset winding_radius still takes its default inside a partial block.
    assert_eq!(config.params.winding_radius, 10);
    assert_eq!(config.seed_policy.master_seed, 42);
    assert_eq!(
        config.metrics_file.as_deref(),
        Some(std::path::Path::new("out/metrics.csv"))
    );
}

#[test]
fn presets_match_their_documented_weights() {
    let straight = EnergyParams::straight_corridors();
    assert_eq!(straight.alpha, 30.0);
    assert_eq!(straight.gamma, 40.0);
    assert_eq!(straight.delta, [0.0, 0.0, -20.0, 30.0, 30.0]);
    assert!(straight.vortex.is_empty());

    let winding = EnergyParams::winding_corridors();
    assert_eq!(winding.alpha, 0.0);
    assert_eq!(winding.gamma, -40.0);
    assert_eq!(winding.delta, [0.0, 0.0, -30.0, 40.0, 40.0]);

    let crossroads = EnergyParams::crossroads();
    assert_eq!(crossroads.delta, [0.0, 0.0, 0.0, 30.0, -40.0]);

    let swirl = EnergyParams::vortex_swirl(Vertex::new(5, 5));
    assert_eq!(swirl.gamma, 20.0);
    assert_eq!(swirl.vortex.len(), 1);
    assert_eq!(swirl.vortex[0].coeff, -500.0);
}

#[test]
fn yaml_round_trip_preserves_the_config() {
    let mut config = RunConfig::default();
    config.params = EnergyParams::vortex_swirl(Vertex::new(3, 7));
    config.seed_policy.label = Some("roundtrip".to_string());

    let text = serde_yaml::to_string(&config).unwrap();
    let parsed = RunConfig::from_yaml_str(&text).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn load_reads_a_yaml_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "rows: 8\ncols: 9\nbeta: 0.25").unwrap();

    let config = RunConfig::load(file.path()).unwrap();
    assert_eq!(config.rows, 8);
    assert_eq!(config.cols, 9);
    assert_eq!(config.beta, 0.25);
    // Untouched fields keep their defaults.
    assert_eq!(config.steps, 40_000);
}

#[test]
fn missing_file_surfaces_a_read_error() {
    let err = RunConfig::load(std::path::Path::new("/nonexistent/run.yaml")).unwrap_err();
    assert_eq!(err.info().code, "config-read");
    assert!(err.info().context.contains_key("path"));
}

#[test]
fn malformed_yaml_surfaces_a_parse_error() {
    let err = RunConfig::from_yaml_str("rows: [not a number").unwrap_err();
    assert_eq!(err.info().code, "config-parse");
}
