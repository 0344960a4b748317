use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = r#"# sqatt configuration

# Directory profile reports are written to
report_directory = "./reports"

# Replace the regions of a standard profile. Bounds are inclusive and a
# region without `upper` is open-ended. Kinds: function-size, complexity,
# fan-in, fan-out, function-parameters, file-size.
#
# [[profiles]]
# kind = "complexity"
# regions = [
#     { label = "0-5", lower = 0, upper = 5 },
#     { label = "6-10", lower = 6, upper = 10 },
#     { label = "11-25", lower = 11, upper = 25 },
#     { label = "25+", lower = 26 },
# ]
"#;

pub fn init_config(force: bool) -> Result<PathBuf> {
    init_config_in(Path::new("."), force)
}

pub fn init_config_in(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_file(&config_path, DEFAULT_CONFIG)?;
    println!("Created {} configuration file", CONFIG_FILE_NAME);

    Ok(config_path)
}
