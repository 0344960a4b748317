// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod io;
pub mod profile;
pub mod risk;

// Re-export commonly used types
pub use crate::errors::{Error, Result};

pub use crate::io::{CsvRowSource, MemoryRowSource, Record, RowSource};

pub use crate::profile::{
    read_profile, FunctionMeasurement, FunctionProfiles, Profile, ProfileKind, ProfileReport,
    Region,
};

pub use crate::risk::{Comparator, MetricVerification, RiskMatrix, RowOutcome, ThresholdExpr};

pub use crate::config::SqattConfig;
