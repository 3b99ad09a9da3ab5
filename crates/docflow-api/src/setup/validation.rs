//! Configuration validation
//!
//! Runs before telemetry, the database pool or any client is created.

use anyhow::Result;
use docflow_core::Config;

/// Validate critical configuration values.
///
/// Field-level checks live in `Config::validate`; this adds the checks that only matter
/// for a running server.
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    if config.is_production() && config.cors_origins().iter().any(|o| o == "*") {
        return Err(anyhow::anyhow!(
            "CORS configured to allow all origins (*) in production. \
            Set specific allowed origins via the CORS_ORIGINS environment variable."
        ));
    }

    if config.db_max_connections() == 0 {
        return Err(anyhow::anyhow!("Database max connections cannot be 0"));
    }

    if config.db_timeout_seconds() == 0 {
        return Err(anyhow::anyhow!("Database timeout cannot be 0"));
    }

    if config.request_timeout_secs() == 0 {
        return Err(anyhow::anyhow!("REQUEST_TIMEOUT_SECS cannot be 0"));
    }

    if config.parser_timeout_secs() >= config.request_timeout_secs() {
        tracing::warn!(
            parser_timeout_secs = config.parser_timeout_secs(),
            request_timeout_secs = config.request_timeout_secs(),
            "Parser timeout is not shorter than the request timeout; slow parses will surface as request timeouts"
        );
    }

    Ok(())
}
