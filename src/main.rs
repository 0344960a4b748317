use anyhow::Result;
use clap::Parser;
use sqatt::cli::{Cli, Commands};
use sqatt::commands::{profile::ProfileConfig, verify::VerifyConfig};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity);

    match cli.command {
        Commands::Profile {
            input,
            kind,
            metric_column,
            weight_column,
            output,
            config,
        } => {
            let report = sqatt::commands::profile::handle_profile(ProfileConfig {
                input,
                kind,
                metric_column,
                weight_column,
                output,
                config,
            })?;
            log::info!("Profile saved to {}", report.display());
            Ok(())
        }
        Commands::Verify {
            components,
            thresholds,
            metrics,
            format,
        } => sqatt::commands::verify::handle_verify(VerifyConfig {
            components,
            thresholds,
            metrics,
            format,
        }),
        Commands::Init { force } => {
            sqatt::commands::init::init_config(force)?;
            Ok(())
        }
    }
}

// RUST_LOG wins over -v when set
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
