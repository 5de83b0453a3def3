//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `slipways_core` linkage, configuration and database bootstrap.
//! - Keep output deterministic for quick local sanity checks.

use slipways_core::db::migrations::current_version;
use slipways_core::AppConfig;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("slipways_cli error={message}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    let config = AppConfig::from_env().map_err(|err| err.to_string())?;
    let logging = slipways_core::init_from_config(&config)?;

    println!("slipways_core ping={}", slipways_core::ping());
    println!("slipways_core version={}", slipways_core::core_version());
    println!("slipways_core environment={}", config.environment.as_str());
    println!("slipways_core logging={logging}");

    let conn = slipways_core::open_with_config(&config).map_err(|err| err.to_string())?;
    let schema = current_version(&conn).map_err(|err| err.to_string())?;
    println!("slipways_core schema_version={schema}");
    log::info!("event=cli_probe module=cli status=ok schema_version={schema}");
    Ok(())
}
