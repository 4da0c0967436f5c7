use clap::Parser;
use std::path::{Path, PathBuf};

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Normalize a raw course-schedule extract into per-weekday meeting records
#[derive(Parser, Debug, Clone)]
#[command(
    name = "schedule-clean",
    about = "Normalize a raw course-schedule extract into per-weekday meeting records",
    version
)]
pub struct Settings {
    /// Raw schedule CSV to read
    pub input: PathBuf,

    /// Output JSON path (defaults to `<input stem>_cleaned.json` next to the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pipeline configuration file (JSON)
    #[arg(long, env = "SCHEDULE_CLEAN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Write compact JSON instead of indented output
    #[arg(long)]
    pub compact: bool,

    /// Also write a JSON run report (row counts and exclusion reasons)
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse CLI arguments and apply the `--debug` override.
    pub fn load() -> Self {
        Self::resolve(Settings::parse())
    }

    /// Same as [`load`](Self::load) but from an explicit argument list.
    pub fn try_load_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Settings::try_parse_from(args).map(Self::resolve)
    }

    fn resolve(mut settings: Settings) -> Self {
        // --debug overrides log level.
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// The output path to write, explicit or derived from the input name.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.input))
    }
}

/// Derive `<dir>/<stem>_cleaned.json` from the input path.
///
/// The stem is lower-cased and runs of whitespace become `_`, so
/// `2025 Fall.csv` maps to `2025_fall_cleaned.json`.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "schedule".to_string());
    let slug = stem
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase();
    let slug = if slug.is_empty() { "schedule".to_string() } else { slug };
    input.with_file_name(format!("{}_cleaned.json", slug))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
