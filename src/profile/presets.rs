//! Standard metric profiles.
//!
//! Each constructor returns a fresh, empty profile. Regions are strict
//! partitions of the metric range with an open-ended top bucket.

use super::{Profile, Region};
use serde::{Deserialize, Serialize};

/// The standard profile families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ProfileKind {
    FunctionSize,
    Complexity,
    FanIn,
    FanOut,
    FunctionParameters,
    FileSize,
}

impl ProfileKind {
    pub const ALL: [ProfileKind; 6] = [
        ProfileKind::FunctionSize,
        ProfileKind::Complexity,
        ProfileKind::FanIn,
        ProfileKind::FanOut,
        ProfileKind::FunctionParameters,
        ProfileKind::FileSize,
    ];

    /// Profile name as shown in reports and chart titles.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::FunctionSize => "Function size",
            Self::Complexity => "Complexity",
            Self::FanIn => "Fan in",
            Self::FanOut => "Fan out",
            Self::FunctionParameters => "Function parameters",
            Self::FileSize => "File size",
        }
    }

    /// File name the profile is saved under inside a report directory.
    pub fn report_file_name(&self) -> &'static str {
        match self {
            Self::FunctionSize => "function_size_profile.csv",
            Self::Complexity => "complexity_profile.csv",
            Self::FanIn => "fan_in_profile.csv",
            Self::FanOut => "fan_out_profile.csv",
            Self::FunctionParameters => "parameters_profile.csv",
            Self::FileSize => "file_size_profile.csv",
        }
    }

    pub fn regions(&self) -> Vec<Region> {
        match self {
            Self::FunctionSize => vec![
                Region::bounded("0-15", 0.0, 15.0),
                Region::bounded("16-30", 16.0, 30.0),
                Region::bounded("31-60", 31.0, 60.0),
                Region::unbounded("60+", 61.0),
            ],
            Self::Complexity => vec![
                Region::bounded("0-5", 0.0, 5.0),
                Region::bounded("6-10", 6.0, 10.0),
                Region::bounded("11-25", 11.0, 25.0),
                Region::unbounded("25+", 26.0),
            ],
            Self::FanIn | Self::FanOut => vec![
                Region::bounded("1-10", 1.0, 10.0),
                Region::bounded("11-20", 11.0, 20.0),
                Region::bounded("21-50", 21.0, 50.0),
                Region::unbounded("50+", 51.0),
            ],
            Self::FunctionParameters => vec![
                Region::bounded("1-2", 1.0, 2.0),
                Region::bounded("3-4", 3.0, 4.0),
                Region::bounded("5-6", 5.0, 6.0),
                Region::unbounded("6+", 7.0),
            ],
            Self::FileSize => vec![
                Region::bounded("0-200", 0.0, 200.0),
                Region::bounded("201-500", 201.0, 500.0),
                Region::bounded("501-1000", 501.0, 1000.0),
                Region::unbounded("1000+", 1001.0),
            ],
        }
    }

    pub fn create(&self) -> Profile {
        Profile::new(self.display_name(), self.regions())
    }
}

pub fn create_function_size_profile() -> Profile {
    ProfileKind::FunctionSize.create()
}

pub fn create_complexity_profile() -> Profile {
    ProfileKind::Complexity.create()
}

pub fn create_fan_in_profile() -> Profile {
    ProfileKind::FanIn.create()
}

pub fn create_fan_out_profile() -> Profile {
    ProfileKind::FanOut.create()
}

pub fn create_function_parameters_profile() -> Profile {
    ProfileKind::FunctionParameters.create()
}

pub fn create_file_size_profile() -> Profile {
    ProfileKind::FileSize.create()
}

/// Per-function measurements as reported by a function-level metrics tool.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FunctionMeasurement {
    /// Lines of code of the function body.
    pub size: f64,
    pub complexity: f64,
    pub parameters: f64,
}

/// The three function-level profiles of one analysis run.
///
/// Every measurement is weighted by the function's own size, so each profile
/// answers "how much code sits in functions of this kind".
#[derive(Clone, Debug)]
pub struct FunctionProfiles {
    pub function_size: Profile,
    pub complexity: Profile,
    pub parameters: Profile,
}

impl Default for FunctionProfiles {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionProfiles {
    pub fn new() -> Self {
        Self {
            function_size: create_function_size_profile(),
            complexity: create_complexity_profile(),
            parameters: create_function_parameters_profile(),
        }
    }

    pub fn record(&mut self, measurement: &FunctionMeasurement) {
        let weight = measurement.size;
        self.function_size.update(measurement.size, weight);
        self.complexity.update(measurement.complexity, weight);
        self.parameters.update(measurement.parameters, weight);
    }

    pub fn profiles(&self) -> [&Profile; 3] {
        [&self.function_size, &self.complexity, &self.parameters]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_no_lines_of_code(profile: &Profile) -> bool {
        profile.regions().iter().all(|r| r.weight() == 0.0) && profile.total_weight() == 0.0
    }

    #[test]
    fn test_presets_are_named_and_empty() {
        let expected = [
            (create_function_size_profile(), "Function size"),
            (create_complexity_profile(), "Complexity"),
            (create_fan_in_profile(), "Fan in"),
            (create_fan_out_profile(), "Fan out"),
            (create_function_parameters_profile(), "Function parameters"),
            (create_file_size_profile(), "File size"),
        ];

        for (profile, name) in expected {
            assert_eq!(profile.name(), name);
            assert_eq!(profile.regions().len(), 4);
            assert!(has_no_lines_of_code(&profile));
        }
    }

    #[test]
    fn test_presets_partition_their_range() {
        for kind in ProfileKind::ALL {
            let profile = kind.create();
            assert!(
                profile.overlapping_regions().is_empty(),
                "{} has overlapping regions",
                kind.display_name()
            );
            assert!(profile.regions().last().unwrap().upper().is_none());
        }
    }

    #[test]
    fn test_presets_are_independent_instances() {
        let mut first = create_complexity_profile();
        first.update(3.0, 100.0);

        let second = create_complexity_profile();
        assert!(has_no_lines_of_code(&second));
    }

    #[test]
    fn test_parameters_boundary() {
        let mut profile = create_function_parameters_profile();
        profile.update(6.0, 10.0);
        profile.update(7.0, 20.0);

        assert_eq!(profile.regions()[2].weight(), 10.0);
        assert_eq!(profile.regions()[3].weight(), 20.0);
    }

    #[test]
    fn test_function_profiles_weight_by_size() {
        let mut profiles = FunctionProfiles::new();
        profiles.record(&FunctionMeasurement {
            size: 40.0,
            complexity: 12.0,
            parameters: 3.0,
        });
        profiles.record(&FunctionMeasurement {
            size: 5.0,
            complexity: 1.0,
            parameters: 0.0,
        });

        assert_eq!(profiles.function_size.regions()[0].weight(), 5.0);
        assert_eq!(profiles.function_size.regions()[2].weight(), 40.0);
        assert_eq!(profiles.complexity.regions()[0].weight(), 5.0);
        assert_eq!(profiles.complexity.regions()[2].weight(), 40.0);
        assert_eq!(profiles.parameters.regions()[1].weight(), 40.0);
        // zero parameters falls below the first bucket but still counts in the total
        assert_eq!(profiles.parameters.total_weight(), 45.0);
        assert_eq!(profiles.profiles().len(), 3);
    }

    #[test]
    fn test_report_file_names_are_unique() {
        let mut names: Vec<&str> = ProfileKind::ALL.iter().map(|k| k.report_file_name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ProfileKind::ALL.len());
    }
}
