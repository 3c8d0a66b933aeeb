use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use structgrid_core::{GridDims, inspect_file};

fn main() -> ExitCode {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run() -> Result<(), String> {
    let root = PathBuf::from("tests").join("golden");
    let entries =
        fs::read_dir(&root).map_err(|err| format!("failed to read {}: {}", root.display(), err))?;

    for entry in entries {
        let entry = entry.map_err(|err| format!("failed to read entry: {}", err))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let input = path.join("input.bin");
        if !input.exists() {
            continue;
        }
        let dims = load_dims(&path.join("grid.json"))?;
        let output = path.join("expected_report.json");
        regenerate_one(&input, dims, &output)?;
    }

    Ok(())
}

fn load_dims(path: &Path) -> Result<GridDims, String> {
    let json = fs::read_to_string(path)
        .map_err(|err| format!("failed to read {}: {}", path.display(), err))?;
    serde_json::from_str(&json)
        .map_err(|err| format!("invalid grid file {}: {}", path.display(), err))
}

fn regenerate_one(input: &Path, dims: GridDims, output: &Path) -> Result<(), String> {
    let mut report = inspect_file(input, dims)
        .map_err(|err| format!("inspection failed for {}: {}", input.display(), err))?;
    report.generated_at = structgrid_core::DEFAULT_GENERATED_AT.to_string();
    report.input.path = input.display().to_string();
    let json = serde_json::to_string_pretty(&report)
        .map_err(|err| format!("JSON serialization failed: {}", err))?;
    fs::write(output, json)
        .map_err(|err| format!("failed to write {}: {}", output.display(), err))?;
    Ok(())
}
