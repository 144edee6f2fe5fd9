//! Loading and saving run configurations.

use std::fs;

use lutfit_rs::align::UnmatchedPolicy;
use lutfit_rs::runner::{run, RunConfig};
use lutfit_rs::surface::EvalStrategy;
use lutfit_rs::LutError;

fn scratch_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("lutfit-{}-{name}", std::process::id()))
}

#[test]
fn save_then_load_preserves_config() {
    let path = scratch_path("roundtrip.json");
    let config = RunConfig {
        seed: 11,
        strategy: EvalStrategy::Vectorized,
        unmatched: UnmatchedPolicy::Drop,
        ..RunConfig::default()
    };

    config.save_json(&path).unwrap();
    let loaded = RunConfig::load_json(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(loaded, config);
}

#[test]
fn partial_file_takes_defaults() {
    let path = scratch_path("partial.json");
    fs::write(
        &path,
        r#"{ "seed": 5, "unmatched": "reject", "measurement": { "true_params": [1.0, 0.0003] } }"#,
    )
    .unwrap();
    let loaded = RunConfig::load_json(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(loaded.seed, 5);
    assert_eq!(loaded.unmatched, UnmatchedPolicy::Reject);
    assert_eq!(loaded.measurement.true_params, [1.0, 0.0003]);
    assert_eq!(loaded.grid, RunConfig::default().grid);
    assert_eq!(loaded.measurement.t_step, 4.0);
}

#[test]
fn missing_and_malformed_files_are_errors() {
    let missing = RunConfig::load_json(scratch_path("does-not-exist.json"));
    assert!(matches!(missing, Err(LutError::Io(_))));

    let path = scratch_path("malformed.json");
    fs::write(&path, "{ seed: ").unwrap();
    let malformed = RunConfig::load_json(&path);
    fs::remove_file(&path).unwrap();
    assert!(matches!(malformed, Err(LutError::Json(_))));
}

#[test]
fn oversized_grid_in_file_is_a_config_error() {
    let path = scratch_path("oversized.json");
    let json = r#"{ "grid": { "p0_step": 1e-300 }, "timeline": { "step": 1e-300 } }"#;
    fs::write(&path, json).unwrap();
    let loaded = RunConfig::load_json(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert!(matches!(run(&loaded), Err(LutError::InvalidConfig(_))));
}
