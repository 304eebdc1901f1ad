use arbor_core::errors::{ArborError, ErrorInfo};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("rows", "0")
        .with_context("cols", "4")
}

#[test]
fn lattice_error_surface() {
    let err = ArborError::Lattice(sample_info("invalid-dimensions", "rows must be positive"));
    assert_eq!(err.info().code, "invalid-dimensions");
    assert!(err.info().context.contains_key("rows"));
}

#[test]
fn tree_error_surface() {
    let err = ArborError::Tree(sample_info("invalid-initial-tree", "tree is disconnected"));
    assert_eq!(err.info().code, "invalid-initial-tree");
    assert!(err.info().context.contains_key("cols"));
}

#[test]
fn energy_error_surface() {
    let err = ArborError::Energy(sample_info("degree-out-of-range", "degree 5 exceeds table"));
    assert_eq!(err.info().code, "degree-out-of-range");
}

#[test]
fn sampler_error_surface() {
    let err = ArborError::Sampler(sample_info("invalid-beta", "beta must be finite"));
    assert_eq!(err.info().code, "invalid-beta");
}

#[test]
fn error_display_includes_context_and_hint() {
    let err = ArborError::Lattice(
        ErrorInfo::new("invalid-dimensions", "rows must be positive")
            .with_context("rows", "0")
            .with_hint("pass rows >= 1"),
    );
    let rendered = err.to_string();
    assert!(rendered.contains("invalid-dimensions"));
    assert!(rendered.contains("rows=0"));
    assert!(rendered.contains("pass rows >= 1"));
}

#[test]
fn error_serde_round_trip() {
    let err = ArborError::Energy(sample_info("vortex-outside-lattice", "pivot (9, 9) not in grid"));
    let json = serde_json::to_string(&err).unwrap();
    let restored: ArborError = serde_json::from_str(&json).unwrap();
    assert_eq!(err, restored);
}
