//! Triangle demo
//!
//! Opens an 800×600 window and draws a red triangle until it is closed.
//! Command-line arguments are ignored; set `NINSIM_CONFIG` to a `.toml` or
//! `.ron` file to override the defaults.

use ninsim_engine::config::config_path_from_env;
use ninsim_engine::foundation::logging;
use ninsim_engine::prelude::*;

fn main() {
    let config = ApplicationConfig::load_from_env();

    let log_level = config
        .as_ref()
        .map_or("info", |config| config.engine.log_level.as_str());
    logging::init(log_level);

    log::info!("Starting triangle demo");
    match config_path_from_env() {
        Some(path) => log::info!("Configuration file: {}", path.display()),
        None => log::info!("No configuration file set, using defaults"),
    }

    let result = config
        .map_err(EngineError::from)
        .and_then(|config| Engine::run(&config));

    if let Err(err) = &result {
        log::error!("{err}");
    }

    std::process::exit(Engine::exit_code(&result));
}
