//! Weighted metric profiles.
//!
//! A [`Profile`] is a named, ordered set of [`Region`]s forming a histogram
//! over one metric (complexity, function size, fan-in, ...) where each bucket
//! accumulates lines of code rather than a plain count.
//!
//! Every region tests every update on its own. When bounds overlap, a single
//! update lands in each matching region; the profile performs no arbitration.
//! The standard profiles in [`presets`] are strict partitions, so this only
//! matters for custom region sets.
//!
//! # Example
//!
//! ```rust
//! use sqatt::profile::{Profile, Region};
//!
//! let mut profile = Profile::new(
//!     "Complexity",
//!     vec![Region::bounded("0-5", 0.0, 5.0), Region::unbounded("6+", 6.0)],
//! );
//! profile.update(3.0, 40.0);
//! profile.update(12.0, 200.0);
//!
//! assert_eq!(profile.regions()[1].weight(), 200.0);
//! assert_eq!(profile.total_weight(), 240.0);
//! ```

pub mod presets;
pub mod region;
pub mod report;

pub use presets::{FunctionMeasurement, FunctionProfiles, ProfileKind};
pub use region::Region;
pub use report::{read_profile, ProfileReport, LOC_HEADER};

use crate::errors::{Error, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Profile {
    name: String,
    regions: Vec<Region>,
    total_weight: f64,
}

impl Profile {
    pub fn new(name: impl Into<String>, regions: Vec<Region>) -> Self {
        let profile = Self {
            name: name.into(),
            regions,
            total_weight: 0.0,
        };

        for (a, b) in profile.overlapping_regions() {
            log::debug!(
                "Profile '{}': regions '{}' and '{}' overlap, values in both are counted twice",
                profile.name,
                profile.regions[a].label(),
                profile.regions[b].label()
            );
        }

        profile
    }

    /// Classify `loc` by its own value and accumulate it.
    pub fn update_loc(&mut self, loc: f64) {
        self.total_weight += loc;
        for region in &mut self.regions {
            region.update_loc(loc);
        }
    }

    /// Classify by `metric` and accumulate `weight`.
    pub fn update(&mut self, metric: f64, weight: f64) {
        self.total_weight += weight;
        for region in &mut self.regions {
            region.update(metric, weight);
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Sum of every weight passed in, whether or not a region matched it.
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Index pairs `(i, j)`, `i < j`, of regions whose bounds intersect.
    pub fn overlapping_regions(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for (i, a) in self.regions.iter().enumerate() {
            for (j, b) in self.regions.iter().enumerate().skip(i + 1) {
                if a.overlaps(b) {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }

    /// Print the profile to stdout.
    pub fn print(&self) -> Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        self.write_summary(&mut handle)
    }

    /// Write `"<name> : loc"` followed by one `"<label> : <weight>"` line per
    /// region, in region order.
    pub fn write_summary<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "{} : loc", self.name)?;
        for region in &self.regions {
            writeln!(out, "{} : {}", region.label(), region.weight())?;
        }
        Ok(())
    }

    /// Save the profile as CSV, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .map_err(|e| Error::file_system("Failed to create profile report", path, e))?;
        let mut writer = BufWriter::new(file);
        self.write_csv(&mut writer)?;
        writer.flush()?;
        log::debug!("Saved profile '{}' to {}", self.name, path.display());
        Ok(())
    }

    /// Write the profile CSV: header `[name, "Lines Of Code"]`, then one
    /// `[label, weight]` row per region. Every field is quoted and rows end
    /// with `\n`.
    pub fn write_csv<W: Write>(&self, out: W) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b',')
            .quote_style(csv::QuoteStyle::Always)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(out);

        writer.write_record([self.name.as_str(), LOC_HEADER])?;
        for region in &self.regions {
            writer.write_record([region.label(), region.weight().to_string().as_str()])?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Snapshot of the ordered `(label, weight)` pairs.
    pub fn to_report(&self) -> ProfileReport {
        ProfileReport {
            name: self.name.clone(),
            entries: self
                .regions
                .iter()
                .map(|r| (r.label().to_string(), r.weight()))
                .collect(),
        }
    }
}
