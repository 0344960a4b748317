use crate::config;
use crate::errors::{Error, Result as SqattResult};
use crate::io::{self, CsvRowSource, Record, RowSource};
use crate::profile::{Profile, ProfileKind};
use anyhow::{Context, Result};
use std::path::PathBuf;

pub struct ProfileConfig {
    pub input: PathBuf,
    pub kind: ProfileKind,
    pub metric_column: String,
    pub weight_column: Option<String>,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

/// Feed every row into `profile`. With a weight column the metric classifies
/// and the weight accumulates; without one the metric does both.
pub fn fill_profile<S: RowSource>(
    profile: &mut Profile,
    mut rows: S,
    metric_column: &str,
    weight_column: Option<&str>,
) -> SqattResult<usize> {
    let mut count = 0;
    while let Some(record) = rows.next_record() {
        let record = record?;
        let metric = numeric_cell(&record, metric_column)?;
        match weight_column {
            Some(column) => profile.update(metric, numeric_cell(&record, column)?),
            None => profile.update_loc(metric),
        }
        count += 1;
    }
    Ok(count)
}

fn numeric_cell(record: &Record, column: &str) -> SqattResult<f64> {
    let raw = record.require(column)?;
    raw.trim()
        .parse::<f64>()
        .map_err(|_| Error::invalid_value(column, raw))
}

/// Build, print and save one profile. Returns the saved report path.
pub fn handle_profile(config: ProfileConfig) -> Result<PathBuf> {
    let settings = config::load_config(config.config.as_deref())?;
    let mut profile = settings.profile(config.kind);

    let rows = CsvRowSource::from_path(&config.input)?;
    let count = fill_profile(
        &mut profile,
        rows,
        &config.metric_column,
        config.weight_column.as_deref(),
    )
    .with_context(|| format!("Failed to profile {}", config.input.display()))?;
    log::info!(
        "Classified {} row(s) from {} into '{}'",
        count,
        config.input.display(),
        profile.name()
    );

    profile.print()?;

    let report_dir = config.output.unwrap_or(settings.report_directory);
    io::ensure_dir(&report_dir)?;
    let report_file = report_dir.join(config.kind.report_file_name());
    profile.save(&report_file)?;

    Ok(report_file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MemoryRowSource;
    use crate::profile::presets::{create_complexity_profile, create_file_size_profile};

    #[test]
    fn test_fill_with_weight_column() {
        let rows = MemoryRowSource::new(["NLOC", "CCN", "token", "PARAM"])
            .with_row(["40", "12", "300", "3"])
            .with_row(["5", "1", "20", "0"]);
        let mut profile = create_complexity_profile();

        let count = fill_profile(&mut profile, rows, "CCN", Some("NLOC")).unwrap();

        assert_eq!(count, 2);
        assert_eq!(profile.regions()[0].weight(), 5.0);
        assert_eq!(profile.regions()[2].weight(), 40.0);
        assert_eq!(profile.total_weight(), 45.0);
    }

    #[test]
    fn test_fill_without_weight_column_uses_metric() {
        let rows = MemoryRowSource::new(["filename", "code"])
            .with_row(["a.rs", "150"])
            .with_row(["b.rs", " 1200 "]);
        let mut profile = create_file_size_profile();

        fill_profile(&mut profile, rows, "code", None).unwrap();

        assert_eq!(profile.regions()[0].weight(), 150.0);
        assert_eq!(profile.regions()[3].weight(), 1200.0);
    }

    #[test]
    fn test_fill_rejects_non_numeric_metric() {
        let rows = MemoryRowSource::new(["code"]).with_row(["lots"]);
        let mut profile = create_file_size_profile();

        let err = fill_profile(&mut profile, rows, "code", None).unwrap_err();
        assert!(matches!(err, Error::InvalidMetricValue { .. }));
    }

    #[test]
    fn test_fill_reports_missing_weight_column() {
        let rows = MemoryRowSource::new(["CCN"]).with_row(["3"]);
        let mut profile = create_complexity_profile();

        let err = fill_profile(&mut profile, rows, "CCN", Some("NLOC")).unwrap_err();
        assert!(matches!(err, Error::MissingColumn { column } if column == "NLOC"));
    }
}
