//! `.sqatt.toml` configuration: report directory and profile region overrides.

pub mod core;
pub mod loader;

pub use self::core::{ProfileDefinition, RegionDefinition, SqattConfig};
pub use loader::{discover_config, load_config, parse_and_validate_config, CONFIG_FILE_NAME};
