mod bootstrap;

use anyhow::{Context, Result};
use schedule_core::config::PipelineConfig;
use schedule_core::settings::Settings;
use schedule_data::pipeline::{clean_schedule, RunReport};
use schedule_data::writer::{stage_records, stage_report, JsonStyle};

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_deref())?;

    tracing::info!("Schedule cleaner v{} starting", env!("CARGO_PKG_VERSION"));

    let report = run(&settings, &PipelineConfig::default_path())?;

    println!(
        "Processed {} course meeting records",
        report.stats.records_emitted
    );
    if let Some(output) = &report.output_path {
        println!("Output written to {}", output.display());
    }

    Ok(())
}

/// Resolve configuration, clean the input and write every requested artifact.
///
/// Nothing is written unless the whole input was processed successfully and
/// every requested artifact could be serialized.
fn run(settings: &Settings, default_config: &std::path::Path) -> Result<RunReport> {
    let config = PipelineConfig::resolve(settings.config.as_deref(), default_config)
        .context("Failed to load pipeline configuration")?;

    let output = settings.output_path();
    tracing::info!("Cleaning course data from {}...", settings.input.display());

    let mut result = clean_schedule(&settings.input, &config)
        .with_context(|| format!("Failed to clean {}", settings.input.display()))?;

    let style = if settings.compact {
        JsonStyle::Compact
    } else {
        JsonStyle::Pretty
    };
    result.report.output_path = Some(output.clone());

    // Stage every artifact before publishing any of them.
    let records = stage_records(&output, &result.records, style)?;
    let report = settings
        .report
        .as_deref()
        .map(|path| stage_report(path, &result.report))
        .transpose()?;

    if let Some(report) = report {
        let report_path = report.destination().to_path_buf();
        report.commit()?;
        tracing::info!("Run report written to {}", report_path.display());
    }
    records.commit()?;

    tracing::info!(
        "Done: {} records in {:.3}s",
        result.report.stats.records_emitted,
        result.report.elapsed_seconds
    );

    Ok(result.report)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
