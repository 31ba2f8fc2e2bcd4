//! CLI probe for the weeklog core.
//!
//! # Responsibility
//! - Verify core wiring from a terminal: config loading, logging bootstrap
//!   and the pure week arithmetic.
//! - Keep output deterministic; remote transports stay external.

use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    if let Some(config_path) = std::env::args().nth(1).map(PathBuf::from) {
        let config = match weeklog_core::Config::load(&config_path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("weeklog: {err}");
                return ExitCode::FAILURE;
            }
        };

        if let Some(dir) = config.logging.dir.as_deref() {
            let level = config
                .logging
                .level
                .as_deref()
                .unwrap_or(weeklog_core::default_log_level());
            if let Err(err) = weeklog_core::init_logging(level, dir) {
                eprintln!("weeklog: {err}");
                return ExitCode::FAILURE;
            }
        }
        log::info!("event=cli_start module=cli status=ok");

        println!("daily log ref    {}", config.store.daily_log());
        println!("project registry {}", config.store.project_registry());
    }

    println!("weeklog version={}", weeklog_core::core_version());
    println!("last week    {}", weeklog_core::last_week());
    println!("current week {}", weeklog_core::current_week());
    println!("next week    {}", weeklog_core::next_week());
    ExitCode::SUCCESS
}
