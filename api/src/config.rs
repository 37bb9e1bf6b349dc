//! Startup configuration and logger setup

use anyhow::bail;
use log::{info, warn};

use ma_shared::config::{AppConfig, Environment};

/// Initialize `env_logger`, honouring `RUST_LOG` when set
///
/// Events from the core and infra crates are emitted through `tracing` and
/// reach this logger via its `log` bridge.
pub fn init_logging(environment: Environment) {
    env_logger::init_from_env(
        env_logger::Env::new().default_filter_or(environment.default_log_filter()),
    );
}

/// Read the configuration from the environment and check it
///
/// Out-of-range values are always fatal. Other problems are fatal in
/// production and logged as warnings elsewhere.
pub fn load() -> anyhow::Result<AppConfig> {
    let config = AppConfig::from_env();

    let violations = config.limit_violations();
    if !violations.is_empty() {
        bail!("invalid configuration: {}", violations.join("; "));
    }

    let problems = config.validate();

    if problems.is_empty() {
        info!("Configuration loaded for {} environment", config.environment);
        return Ok(config);
    }

    if config.environment.is_production() {
        bail!("invalid configuration: {}", problems.join("; "));
    }

    for problem in &problems {
        warn!("Configuration: {}", problem);
    }
    Ok(config)
}
