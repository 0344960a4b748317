use crate::errors::{Error, Result};
use crate::profile::{Profile, ProfileKind, Region};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for sqatt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqattConfig {
    /// Directory profile reports are written to
    #[serde(default = "default_report_directory")]
    pub report_directory: PathBuf,

    /// Replacements for the standard profile regions
    #[serde(default)]
    pub profiles: Vec<ProfileDefinition>,
}

impl Default for SqattConfig {
    fn default() -> Self {
        Self {
            report_directory: default_report_directory(),
            profiles: Vec::new(),
        }
    }
}

fn default_report_directory() -> PathBuf {
    PathBuf::from("./reports")
}

/// Custom regions for one standard profile kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileDefinition {
    pub kind: ProfileKind,

    /// Overrides the standard display name
    #[serde(default)]
    pub name: Option<String>,

    pub regions: Vec<RegionDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionDefinition {
    pub label: String,
    pub lower: f64,
    /// Absent for an open-ended region
    #[serde(default)]
    pub upper: Option<f64>,
}

impl ProfileDefinition {
    pub fn validate(&self) -> Result<()> {
        if self.regions.is_empty() {
            return Err(Error::Configuration(format!(
                "profile '{:?}' defines no regions",
                self.kind
            )));
        }

        for region in &self.regions {
            let bounds_finite =
                region.lower.is_finite() && region.upper.map_or(true, f64::is_finite);
            if !bounds_finite {
                return Err(Error::Configuration(format!(
                    "region '{}' has a non-finite bound; omit `upper` for an open-ended region",
                    region.label
                )));
            }
            if let Some(upper) = region.upper {
                if region.lower > upper {
                    return Err(Error::Configuration(format!(
                        "region '{}' has lower bound {} above upper bound {}",
                        region.label, region.lower, upper
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn create(&self) -> Profile {
        let name = self
            .name
            .clone()
            .unwrap_or_else(|| self.kind.display_name().to_string());
        let regions = self
            .regions
            .iter()
            .map(|r| Region::new(r.label.clone(), r.lower, r.upper))
            .collect();
        Profile::new(name, regions)
    }
}

impl SqattConfig {
    pub fn validate(&self) -> Result<()> {
        self.profiles.iter().try_for_each(ProfileDefinition::validate)
    }

    /// Fresh profile for `kind`, honoring a configured override. The last
    /// definition for a kind wins.
    pub fn profile(&self, kind: ProfileKind) -> Profile {
        self.profiles
            .iter()
            .rev()
            .find(|definition| definition.kind == kind)
            .map(ProfileDefinition::create)
            .unwrap_or_else(|| kind.create())
    }
}
