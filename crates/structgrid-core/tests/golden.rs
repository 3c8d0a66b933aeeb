use std::fs;
use std::path::{Path, PathBuf};

use structgrid_core::{GridDims, Report, inspect_file};

fn repo_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
}

fn load_expected_report(dir: &str) -> Report {
    let expected_path = repo_root().join(dir).join("expected_report.json");
    let expected_json = fs::read_to_string(&expected_path).expect("read expected_report.json");
    serde_json::from_str(&expected_json).expect("parse expected report")
}

fn load_dims(dir: &str) -> GridDims {
    let grid_json = fs::read_to_string(repo_root().join(dir).join("grid.json")).expect("read grid.json");
    serde_json::from_str(&grid_json).expect("parse grid.json")
}

fn run_golden(dir: &str) {
    let input = repo_root().join(dir).join("input.bin");
    let expected = load_expected_report(dir);

    let mut actual = inspect_file(&input, load_dims(dir)).expect("inspect buffer");
    actual.generated_at = expected.generated_at.clone();
    actual.input.path = expected.input.path.clone();

    let actual_value = serde_json::to_value(actual).expect("serialize actual");
    let expected_value = serde_json::to_value(expected).expect("serialize expected");

    assert_eq!(actual_value, expected_value, "golden mismatch in {dir}");
}

#[test]
fn golden_uniform_3x2() {
    run_golden("tests/golden/uniform_3x2");
}

#[test]
fn golden_uniform_3x2_every_cell_matches() {
    let report = load_expected_report("tests/golden/uniform_3x2");
    assert_eq!(report.records.len(), 6);
    assert!(
        report
            .records
            .iter()
            .all(|cell| (cell.x, cell.y, cell.a, cell.b) == (1, 2, 3, 4))
    );
}

#[test]
fn golden_pattern_4x3() {
    run_golden("tests/golden/pattern_4x3");
}

#[test]
fn golden_trailing_2x2() {
    run_golden("tests/golden/trailing_2x2");
}

#[test]
fn golden_trailing_2x2_counts_extra_bytes() {
    let report = load_expected_report("tests/golden/trailing_2x2");
    assert_eq!(report.grid.trailing_bytes, 5);
    assert_eq!(report.input.bytes, 53);
}
