use std::fs;
use std::path::{Path, PathBuf};

use structgrid_core::{BufferSource, GridDims, PatternSource, Record};

const TRAILING_FILL: u8 = 0xEE;

fn main() -> Result<(), String> {
    let root = PathBuf::from("tests/golden");

    let uniform = PatternSource::uniform(dims(3, 2)?, Record { x: 1, y: 2, a: 3, b: 4 })
        .map_err(|err| err.to_string())?;
    write_fixture(&root.join("uniform_3x2"), &uniform, 0)?;

    let pattern = PatternSource::new(dims(4, 3)?).map_err(|err| err.to_string())?;
    write_fixture(&root.join("pattern_4x3"), &pattern, 0)?;

    let trailing = PatternSource::new(dims(2, 2)?).map_err(|err| err.to_string())?;
    write_fixture(&root.join("trailing_2x2"), &trailing, 5)?;
    Ok(())
}

fn dims(width: usize, height: usize) -> Result<GridDims, String> {
    GridDims::new(width, height).map_err(|err| err.to_string())
}

fn write_fixture(dir: &Path, source: &PatternSource, trailing: usize) -> Result<(), String> {
    fs::create_dir_all(dir).map_err(|err| format!("failed to create {}: {}", dir.display(), err))?;

    let mut bytes = source.to_vec().map_err(|err| err.to_string())?;
    bytes.resize(bytes.len() + trailing, TRAILING_FILL);
    let input = dir.join("input.bin");
    fs::write(&input, bytes).map_err(|err| format!("failed to write {}: {}", input.display(), err))?;

    let grid = serde_json::to_string(&source.dims()).map_err(|err| err.to_string())?;
    let grid_path = dir.join("grid.json");
    fs::write(&grid_path, grid)
        .map_err(|err| format!("failed to write {}: {}", grid_path.display(), err))?;
    Ok(())
}
