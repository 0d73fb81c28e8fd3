use std::process::ExitCode;

use homewatt_core::config::{AppConfig, LoadOptions};

fn main() -> ExitCode {
    // An invalid configuration is reported by the command itself.
    let config = AppConfig::load(LoadOptions::default()).unwrap_or_default();
    homewatt_cli::init_logging(&config);

    homewatt_cli::run()
}
