// StaleSweep - main.rs
//
// Application entry point. Handles:
// 1. Diagnostic logging initialisation
// 2. The cleanup run against the fixed-path config and run log
// 3. Process exit status
//
// There are no CLI flags and no behaviour-driving environment variables:
// everything comes from config.toml in the working directory.

use stalesweep::app;
use stalesweep::util;
use std::path::Path;

fn main() {
    util::logging::init();

    tracing::info!(version = util::constants::APP_VERSION, "StaleSweep starting");

    let exit_code = app::run::run(
        Path::new(util::constants::CONFIG_FILE_NAME),
        Path::new(util::constants::RUN_LOG_FILE_NAME),
    );

    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}
