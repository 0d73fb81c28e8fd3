pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use homewatt_core::config::{AppConfig, LogFormat};
use tracing::Level;

#[derive(Debug, Parser)]
#[command(
    name = "homewatt",
    about = "Homewatt recommendation matcher CLI",
    long_about = "Match energy-saving recommendations to products, filter them by preference, \
                  and inspect runtime configuration.",
    after_help = "Examples:\n  \
                  homewatt match --input recommendations.json --budget 2500\n  \
                  homewatt filter --input recommendations.json --preference renewable\n  \
                  homewatt doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Attach ranked products to each recommendation in a JSON file")]
    Match {
        #[arg(long, help = "JSON file with a recommendation array or {\"recommendations\": [...]}")]
        input: PathBuf,
        #[arg(long, help = "Exclude products priced above this amount")]
        budget: Option<f64>,
    },
    #[command(about = "Filter recommendations in a JSON file by user preferences")]
    Filter {
        #[arg(long, help = "JSON file with a recommendation array or {\"recommendations\": [...]}")]
        input: PathBuf,
        #[arg(long = "preference", help = "Preference identifier; repeat for several")]
        preferences: Vec<String>,
    },
    #[command(
        about = "Inspect effective configuration values with source attribution and redaction"
    )]
    Config,
    #[command(about = "Validate config and product catalog reachability")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Match { input, budget } => commands::matching::run(&input, budget),
        Command::Filter { input, preferences } => commands::filter::run(&input, &preferences),
        Command::Config => commands::config::run(),
        Command::Doctor { json } => commands::doctor::run(json),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

/// Installs the stderr subscriber at the configured level and format. Command payloads
/// own stdout.
pub fn init_logging(config: &AppConfig) {
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(log_level(config));

    match config.logging.format {
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn log_level(config: &AppConfig) -> Level {
    config.logging.level.parse::<Level>().unwrap_or(Level::INFO)
}

#[cfg(test)]
mod tests {
    use homewatt_core::config::AppConfig;
    use tracing::Level;

    use super::log_level;

    #[test]
    fn log_level_follows_configured_level() {
        let mut config = AppConfig::default();
        config.logging.level = "debug".to_string();
        assert_eq!(log_level(&config), Level::DEBUG);

        config.logging.level = "WARN".to_string();
        assert_eq!(log_level(&config), Level::WARN);
    }

    #[test]
    fn unparseable_level_falls_back_to_info() {
        let mut config = AppConfig::default();
        config.logging.level = "chatty".to_string();
        assert_eq!(log_level(&config), Level::INFO);
    }
}
