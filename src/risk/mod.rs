//! Risk-quadrant compliance verification.
//!
//! A [`RiskMatrix`] knows which quadrant each component belongs to and which
//! metric thresholds apply per quadrant. Verification checks every observed
//! metric value against the threshold of its component's quadrant.
//!
//! Both tables are filled from row sources, in any order, before the first
//! verification:
//!
//! | source | header |
//! |---|---|
//! | component risk levels | `Component, Quadrant` |
//! | quadrant thresholds | `Quadrant, <metric1>, <metric2>, ...` |
//! | metric to verify | `Component, <metric>` |
//!
//! # Example
//!
//! ```rust
//! use sqatt::io::MemoryRowSource;
//! use sqatt::risk::RiskMatrix;
//!
//! let mut matrix = RiskMatrix::new();
//! matrix
//!     .add_component_risk_level(MemoryRowSource::new(["Component", "Quadrant"]).with_row(["ComponentA", "Q1"]))
//!     .unwrap();
//! matrix
//!     .add_metric_thresholds(MemoryRowSource::new(["Quadrant", "Coverage"]).with_row(["Q1", "< 80"]))
//!     .unwrap();
//!
//! let rows = MemoryRowSource::new(["Component", "Coverage"]).with_row(["ComponentA", "77"]);
//! let mut audit = Vec::new();
//! assert!(matrix.verify_metric_with_audit(rows, &mut audit).unwrap());
//! assert_eq!(String::from_utf8(audit).unwrap(), "ComponentA < 80 77\n");
//! ```

pub mod threshold;

pub use threshold::{Comparator, ThresholdExpr};

use crate::errors::{Error, Result};
use crate::io::RowSource;
use serde::Serialize;
use std::collections::HashMap;
use std::io::{self, Write};

pub const COMPONENT_COLUMN: &str = "Component";
pub const QUADRANT_COLUMN: &str = "Quadrant";

/// Outcome of checking one component's observed value.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RowOutcome {
    pub component: String,
    pub quadrant: String,
    pub threshold: ThresholdExpr,
    pub observed: f64,
    pub complies: bool,
}

/// Result of verifying one metric source.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MetricVerification {
    pub metric: String,
    pub outcomes: Vec<RowOutcome>,
    /// AND of every row's outcome; `true` for an empty source.
    pub compliant: bool,
}

impl MetricVerification {
    pub fn violations(&self) -> impl Iterator<Item = &RowOutcome> {
        self.outcomes.iter().filter(|o| !o.complies)
    }
}

/// A parsed threshold together with the cell text it was read from.
#[derive(Clone, Debug, PartialEq)]
struct ThresholdCell {
    expr: ThresholdExpr,
    text: String,
}

type QuadrantThresholds = HashMap<String, HashMap<String, ThresholdCell>>;

#[derive(Clone, Debug, Default)]
pub struct RiskMatrix {
    component_quadrant: HashMap<String, String>,
    quadrant_thresholds: QuadrantThresholds,
}

impl RiskMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign components to quadrants. A component seen twice keeps the last
    /// quadrant read.
    pub fn add_component_risk_level<S: RowSource>(&mut self, mut rows: S) -> Result<()> {
        let mut count = 0usize;
        while let Some(record) = rows.next_record() {
            let record = record?;
            let component = record.require(COMPONENT_COLUMN)?;
            let quadrant = record.require(QUADRANT_COLUMN)?;
            self.component_quadrant
                .insert(component.to_string(), quadrant.to_string());
            count += 1;
        }
        log::debug!("Read {} component risk level(s)", count);
        Ok(())
    }

    /// Read per-quadrant thresholds. Every column other than `Quadrant` names
    /// a metric; empty cells leave that metric without a threshold.
    ///
    /// The source is read in full before anything is merged, so a failing
    /// row leaves the matrix as it was.
    pub fn add_metric_thresholds<S: RowSource>(&mut self, mut rows: S) -> Result<()> {
        let mut staged: QuadrantThresholds = HashMap::new();
        let mut count = 0usize;
        while let Some(record) = rows.next_record() {
            let record = record?;
            let quadrant = record.require(QUADRANT_COLUMN)?.to_string();
            let thresholds = staged.entry(quadrant).or_default();

            for (metric, cell) in record.fields() {
                let text = cell.trim();
                if metric == QUADRANT_COLUMN || text.is_empty() {
                    continue;
                }
                let cell = ThresholdCell {
                    expr: text.parse::<ThresholdExpr>()?,
                    text: text.to_string(),
                };
                thresholds.insert(metric.to_string(), cell);
                count += 1;
            }
        }

        for (quadrant, thresholds) in staged {
            self.quadrant_thresholds
                .entry(quadrant)
                .or_default()
                .extend(thresholds);
        }
        log::debug!("Read {} quadrant metric threshold(s)", count);
        Ok(())
    }

    /// Verify the metric source, printing one audit line per row to stdout.
    pub fn verify_metric<S: RowSource>(&self, rows: S) -> Result<bool> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        self.verify_metric_with_audit(rows, &mut handle)
    }

    /// Verify the metric source, writing audit lines to `audit`.
    pub fn verify_metric_with_audit<S: RowSource, W: Write>(
        &self,
        rows: S,
        audit: &mut W,
    ) -> Result<bool> {
        self.verify_metric_detailed(rows, audit)
            .map(|verification| verification.compliant)
    }

    /// Verify every row of `rows` against its component's quadrant threshold.
    ///
    /// The metric name is the second header column. Each row writes
    /// `"<component> <threshold> <observed>"` to `audit` whether it passes or
    /// not, with threshold and value echoed as read (trimmed). A failing row
    /// does not stop verification; an unknown component, a quadrant without a
    /// threshold for the metric, or a value that is not a finite number
    /// aborts immediately.
    pub fn verify_metric_detailed<S: RowSource, W: Write>(
        &self,
        mut rows: S,
        audit: &mut W,
    ) -> Result<MetricVerification> {
        let metric = metric_label(rows.headers())?;
        let mut outcomes = Vec::new();
        let mut compliant = true;

        while let Some(record) = rows.next_record() {
            let record = record?;
            let component = record.require(COMPONENT_COLUMN)?;
            let raw = record.require(&metric)?;

            let quadrant = self.quadrant_of(component).ok_or_else(|| {
                Error::UnmappedComponent {
                    component: component.to_string(),
                }
            })?;
            let cell = self
                .quadrant_thresholds
                .get(quadrant)
                .and_then(|thresholds| thresholds.get(&metric))
                .ok_or_else(|| Error::UnmappedQuadrantMetric {
                    quadrant: quadrant.to_string(),
                    metric: metric.clone(),
                })?;
            let raw = raw.trim();
            let observed = raw
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| Error::invalid_value(&metric, raw))?;

            writeln!(audit, "{} {} {}", component, cell.text, raw)?;

            let threshold = &cell.expr;
            let complies = threshold.is_satisfied_by(observed);
            compliant = compliant && complies;
            outcomes.push(RowOutcome {
                component: component.to_string(),
                quadrant: quadrant.to_string(),
                threshold: *threshold,
                observed,
                complies,
            });
        }

        log::debug!(
            "Verified {} component(s) for '{}': {}",
            outcomes.len(),
            metric,
            if compliant { "compliant" } else { "not compliant" }
        );

        Ok(MetricVerification {
            metric,
            outcomes,
            compliant,
        })
    }

    pub fn quadrant_of(&self, component: &str) -> Option<&str> {
        self.component_quadrant.get(component).map(String::as_str)
    }

    pub fn threshold(&self, quadrant: &str, metric: &str) -> Option<&ThresholdExpr> {
        self.quadrant_thresholds
            .get(quadrant)
            .and_then(|thresholds| thresholds.get(metric))
            .map(|cell| &cell.expr)
    }

    pub fn component_count(&self) -> usize {
        self.component_quadrant.len()
    }

    pub fn quadrant_count(&self) -> usize {
        self.quadrant_thresholds.len()
    }
}

/// Second column of a `Component, <metric>` header.
fn metric_label(headers: &[String]) -> Result<String> {
    match headers {
        [component, metric] if component == COMPONENT_COLUMN => Ok(metric.clone()),
        _ => Err(Error::InvalidHeader(format!(
            "expected [\"{}\", <metric>], found {:?}",
            COMPONENT_COLUMN, headers
        ))),
    }
}
