use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use glob::glob;
use structgrid_core::{
    BufferSource, FileSource, GridDims, InspectError, PatternSource, Record, RecordError,
    SourceError,
};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ",
    env!("STRUCTGRID_BUILD_COMMIT"),
    ", ",
    env!("STRUCTGRID_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "structgrid")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Decode packed grid buffers (12-byte little-endian records) into typed cells.",
    long_about = None,
    after_help = "Examples:\n  structgrid grid decode allocation.bin --width 3 --height 2 -o report.json\n  structgrid grid dump allocation.bin --width 3 --height 2\n  structgrid grid fill --width 3 --height 2 -o allocation.bin"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Operations on packed grid buffers.
    Grid {
        #[command(subcommand)]
        command: GridCommands,
    },
}

#[derive(Args, Debug, Clone, Copy)]
struct DimsArgs {
    /// Grid width in cells
    #[arg(long)]
    width: usize,

    /// Grid height in cells
    #[arg(long)]
    height: usize,
}

#[derive(Subcommand, Debug)]
enum GridCommands {
    /// Decode a buffer dump and write a versioned JSON report.
    #[command(alias = "inspect")]
    Decode {
        /// Path to a raw buffer dump (a glob matching one file is accepted)
        input: PathBuf,

        #[command(flatten)]
        dims: DimsArgs,

        /// Output report path (JSON)
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        report: Option<PathBuf>,

        /// Write JSON report to stdout
        #[arg(long, conflicts_with = "report")]
        stdout: bool,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,

        /// Exit with a non-zero code if the dump is longer than the grid
        #[arg(long)]
        strict: bool,
    },
    /// Print one line per cell, column by column.
    Dump {
        /// Path to a raw buffer dump (a glob matching one file is accepted)
        input: PathBuf,

        #[command(flatten)]
        dims: DimsArgs,
    },
    /// Write a reproducible buffer dump for the given grid size.
    Fill {
        #[command(flatten)]
        dims: DimsArgs,

        /// Output buffer path
        #[arg(short = 'o', long)]
        output: PathBuf,

        /// Fill every cell with one record, given as X,Y,A,B
        #[arg(long, value_parser = parse_record)]
        uniform: Option<Record>,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Grid { command } => match command {
            GridCommands::Decode {
                input,
                dims,
                report,
                stdout,
                pretty,
                compact,
                quiet,
                strict,
            } => cmd_grid_decode(
                input,
                dims,
                DecodeOutput {
                    report,
                    stdout,
                    pretty,
                    compact,
                    quiet,
                    strict,
                },
            ),
            GridCommands::Dump { input, dims } => cmd_grid_dump(input, dims),
            GridCommands::Fill {
                dims,
                output,
                uniform,
                quiet,
            } => cmd_grid_fill(dims, output, uniform, quiet),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{:#}", err), None)
    }
}

struct DecodeOutput {
    report: Option<PathBuf>,
    stdout: bool,
    pretty: bool,
    compact: bool,
    quiet: bool,
    strict: bool,
}

fn cmd_grid_decode(input: PathBuf, dims: DimsArgs, out: DecodeOutput) -> Result<(), CliError> {
    let dims = validate_dims(dims)?;
    let resolved_input = resolve_input_path(&input)?;
    validate_input_file(&resolved_input)?;

    let report_path = if out.stdout {
        None
    } else {
        Some(out.report.ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--report or --stdout".to_string()),
            )
        })?)
    };
    if let Some(report_path) = report_path.as_ref() {
        ensure_distinct_paths(&resolved_input, report_path)?;
    }

    let rep = structgrid_core::inspect_file(&resolved_input, dims)
        .map_err(|err| inspect_failure(err, &resolved_input, dims))?;
    let json = serialize_report(&rep, out.pretty, out.compact)?;

    match report_path {
        None => print!("{}", json),
        Some(report_path) => {
            if let Some(parent) = report_path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create output directory: {}", parent.display())
                    })?;
                }
            }
            fs::write(&report_path, json)
                .with_context(|| format!("Failed to write report: {}", report_path.display()))?;
            if !out.quiet {
                eprintln!("OK: report written -> {}", report_path.display());
            }
        }
    }

    if out.strict && rep.grid.trailing_bytes > 0 {
        return Err(CliError::new(
            format!(
                "input has {} trailing bytes past the {}x{} grid",
                rep.grid.trailing_bytes,
                dims.width(),
                dims.height()
            ),
            Some("check --width/--height against the producer".to_string()),
        ));
    }
    Ok(())
}

fn cmd_grid_dump(input: PathBuf, dims: DimsArgs) -> Result<(), CliError> {
    let dims = validate_dims(dims)?;
    let resolved_input = resolve_input_path(&input)?;
    validate_input_file(&resolved_input)?;

    let source = FileSource::open(&resolved_input, dims)
        .with_context(|| format!("Failed to read input file: {}", resolved_input.display()))?;
    let bytes = source
        .to_vec()
        .with_context(|| format!("Failed to copy buffer: {}", resolved_input.display()))?;
    let grid = structgrid_core::decode_grid(&bytes, dims.width(), dims.height())
        .map_err(|err| decode_failure(&err, dims))?;

    for line in structgrid_core::format_debug_lines(&grid) {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_grid_fill(
    dims: DimsArgs,
    output: PathBuf,
    uniform: Option<Record>,
    quiet: bool,
) -> Result<(), CliError> {
    let dims = validate_dims(dims)?;
    let source = match uniform {
        Some(record) => PatternSource::uniform(dims, record),
        None => PatternSource::new(dims),
    }
    .context("Failed to fill buffer")?;
    let bytes = source.to_vec().context("Failed to copy buffer")?;

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(&output, bytes)
        .with_context(|| format!("Failed to write buffer: {}", output.display()))?;

    if !quiet {
        eprintln!(
            "OK: {}x{} buffer written -> {}",
            dims.width(),
            dims.height(),
            output.display()
        );
    }
    Ok(())
}

fn serialize_report(
    rep: &structgrid_core::Report,
    pretty: bool,
    compact: bool,
) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn inspect_failure(err: InspectError, input: &Path, dims: GridDims) -> CliError {
    match err {
        InspectError::Record(err) | InspectError::Source(SourceError::Record(err)) => {
            decode_failure(&err, dims)
        }
        InspectError::Source(err) => CliError::new(
            format!("failed to read input {}: {}", input.display(), err),
            Some("pass the path of a raw buffer dump".to_string()),
        ),
    }
}

fn decode_failure(err: &RecordError, dims: GridDims) -> CliError {
    CliError::new(
        format!("decode failed: {}", err),
        Some(format!(
            "a {}x{} grid needs {} bytes ({} per record)",
            dims.width(),
            dims.height(),
            dims.byte_len(),
            structgrid_core::RECORD_STRIDE
        )),
    )
}

fn validate_dims(dims: DimsArgs) -> Result<GridDims, CliError> {
    GridDims::new(dims.width, dims.height).map_err(|err| {
        CliError::new(
            err.to_string(),
            Some("--width and --height must both be at least 1".to_string()),
        )
    })
}

fn parse_record(value: &str) -> Result<Record, String> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    let [x, y, a, b] = parts.as_slice() else {
        return Err(format!("expected X,Y,A,B, got '{}'", value));
    };
    Ok(Record {
        x: x.parse().map_err(|err| format!("invalid x '{}': {}", x, err))?,
        y: y.parse().map_err(|err| format!("invalid y '{}': {}", y, err))?,
        a: a.parse().map_err(|err| format!("invalid a '{}': {}", a, err))?,
        b: b.parse().map_err(|err| format!("invalid b '{}': {}", b, err))?,
    })
}

fn ensure_distinct_paths(input: &Path, report_path: &Path) -> Result<(), CliError> {
    let input_abs = fs::canonicalize(input)
        .with_context(|| format!("Failed to resolve input path: {}", input.display()))?;
    let parent = match report_path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => Path::new("."),
        Some(parent) => parent,
        None => return Ok(()),
    };
    let report_dir = match fs::canonicalize(parent) {
        Ok(dir) => dir,
        // A parent that does not exist yet cannot hold the input.
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(err) => {
            return Err(anyhow::Error::new(err)
                .context(format!(
                    "Failed to resolve output path: {}",
                    report_path.display()
                ))
                .into());
        }
    };
    let file_name = report_path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Invalid report path"))?;
    if report_dir.join(file_name) == input_abs {
        return Err(CliError::new(
            format!(
                "report path must differ from input: {}",
                report_path.display()
            ),
            Some("choose a different output path".to_string()),
        ));
    }
    Ok(())
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass the path of a raw buffer dump".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("pass the path of a raw buffer dump".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        ));
    }
    if matches.len() > 1 {
        let listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let more = if matches.len() > 3 { ", ..." } else { "" };
        return Err(CliError::new(
            format!(
                "multiple files match pattern '{}' ({} matches); matches: {}{}",
                pattern,
                matches.len(),
                listed,
                more
            ),
            Some("pass a single buffer dump, or run once per file".to_string()),
        ));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::path::Path;

    use super::{inspect_failure, is_glob_pattern, parse_record};
    use structgrid_core::{GridDims, InspectError, Record, RecordError, SourceError};

    #[test]
    fn read_failure_has_no_size_hint() {
        let dims = GridDims::new(3, 2).unwrap();
        let err = InspectError::Source(SourceError::Io(io::Error::other("disk gone")));
        let cli_err = inspect_failure(err, Path::new("allocation.bin"), dims);
        assert!(cli_err.message.starts_with("failed to read input allocation.bin"));
        assert!(cli_err.message.contains("disk gone"));
        assert!(!cli_err.message.contains("decode failed"));
        assert!(!cli_err.hint.unwrap_or_default().contains("bytes"));
    }

    #[test]
    fn decode_failure_keeps_size_hint() {
        let dims = GridDims::new(3, 2).unwrap();
        let err = InspectError::Record(RecordError::BufferTooSmall {
            needed: 72,
            actual: 71,
        });
        let cli_err = inspect_failure(err, Path::new("allocation.bin"), dims);
        assert!(cli_err.message.starts_with("decode failed: buffer too small"));
        assert_eq!(
            cli_err.hint.as_deref(),
            Some("a 3x2 grid needs 72 bytes (12 per record)")
        );
    }

    #[test]
    fn parse_record_accepts_four_fields() {
        let record = parse_record("1, -2,3,4").unwrap();
        assert_eq!(record, Record { x: 1, y: -2, a: 3, b: 4 });
    }

    #[test]
    fn parse_record_rejects_wrong_arity() {
        assert!(parse_record("1,2,3").unwrap_err().contains("expected X,Y,A,B"));
    }

    #[test]
    fn parse_record_rejects_out_of_range_byte() {
        assert!(parse_record("1,2,3,256").unwrap_err().contains("invalid b"));
    }

    #[test]
    fn glob_detection() {
        assert!(is_glob_pattern("dumps/*.bin"));
        assert!(!is_glob_pattern("dumps/a.bin"));
    }
}
