use crate::cli::OutputFormat;
use crate::errors::{Result as SqattResult, ResultExt};
use crate::io::CsvRowSource;
use crate::risk::{MetricVerification, RiskMatrix};
use anyhow::Result;
use colored::Colorize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub struct VerifyConfig {
    pub components: PathBuf,
    pub thresholds: PathBuf,
    pub metrics: Vec<PathBuf>,
    pub format: OutputFormat,
}

/// Load component quadrants and quadrant thresholds into a fresh matrix.
pub fn build_matrix(components: &Path, thresholds: &Path) -> SqattResult<RiskMatrix> {
    let mut matrix = RiskMatrix::new();
    matrix
        .add_component_risk_level(CsvRowSource::from_path(components)?)
        .context(components.display().to_string())?;
    matrix
        .add_metric_thresholds(CsvRowSource::from_path(thresholds)?)
        .context(thresholds.display().to_string())?;
    Ok(matrix)
}

/// Verify each metric file in turn. The first lookup failure aborts.
pub fn verify_files<W: Write>(
    matrix: &RiskMatrix,
    metrics: &[PathBuf],
    audit: &mut W,
) -> SqattResult<Vec<MetricVerification>> {
    metrics
        .iter()
        .map(|path| {
            let rows = CsvRowSource::from_path(path)?;
            matrix
                .verify_metric_detailed(rows, audit)
                .context(path.display().to_string())
        })
        .collect()
}

pub fn handle_verify(config: VerifyConfig) -> Result<()> {
    let matrix = build_matrix(&config.components, &config.thresholds)?;
    log::info!(
        "Risk matrix holds {} component(s) across {} quadrant(s)",
        matrix.component_count(),
        matrix.quadrant_count()
    );

    let verifications = match config.format {
        OutputFormat::Text => verify_files(&matrix, &config.metrics, &mut io::stdout().lock()),
        // keep stdout clean for the JSON document
        OutputFormat::Json => verify_files(&matrix, &config.metrics, &mut io::stderr().lock()),
    };
    let verifications = verifications.map_err(|e| {
        if e.is_configuration_error() {
            anyhow::anyhow!("Risk configuration error: {}", e)
        } else {
            e.into()
        }
    })?;

    match config.format {
        OutputFormat::Text => print_summary(&verifications),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&verifications)?),
    }

    if verifications.iter().all(|v| v.compliant) {
        Ok(())
    } else {
        anyhow::bail!("Verification failed")
    }
}

fn print_summary(verifications: &[MetricVerification]) {
    println!();
    for verification in verifications {
        let status = if verification.compliant {
            "PASS".green().bold()
        } else {
            "FAIL".red().bold()
        };
        println!(
            "{} {} ({} component(s))",
            status,
            verification.metric,
            verification.outcomes.len()
        );
        for violation in verification.violations() {
            println!(
                "    {} [{}]: {} is not {}",
                violation.component, violation.quadrant, violation.observed, violation.threshold
            );
        }
    }
}
