use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::ledger::Principal;

/// Shortest host secret accepted for signing caller tokens.
pub const MIN_AUTH_SECRET_LEN: usize = 32;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub ledger: LedgerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
}

#[derive(Clone, Deserialize)]
pub struct LedgerConfig {
    /// Owner of a freshly deployed ledger.
    pub deployer: Principal,
    pub auth_secret: String,
    /// JSON state file; in-memory state when unset.
    pub state_path: Option<PathBuf>,
}

impl fmt::Debug for LedgerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LedgerConfig")
            .field("deployer", &self.deployer)
            .field("auth_secret", &"<redacted>")
            .field("state_path", &self.state_path)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build the configuration from any variable source.
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server = ServerConfig {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: var("PORT")
                .context("PORT not set")?
                .parse()
                .context("PORT must be a valid number")?,
            environment: var("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
        };

        let deployer = var("ORANGECOIN_DEPLOYER").context("ORANGECOIN_DEPLOYER not set")?;
        let ledger = LedgerConfig {
            deployer: Principal::new(deployer.trim())
                .context("ORANGECOIN_DEPLOYER must be a valid principal")?,
            auth_secret: var("ORANGECOIN_AUTH_SECRET").context("ORANGECOIN_AUTH_SECRET not set")?,
            state_path: var("ORANGECOIN_STATE_PATH")
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
        };

        let config = Config { server, ledger };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.port < 1024 {
            return Err(anyhow!(
                "Port must be at least 1024, got {}",
                self.server.port
            ));
        }

        let valid_environments = ["development", "staging", "production"];
        if !valid_environments.contains(&self.server.environment.as_str()) {
            return Err(anyhow!(
                "Environment must be one of: {:?}, got {}",
                valid_environments,
                self.server.environment
            ));
        }

        if self.ledger.auth_secret.len() < MIN_AUTH_SECRET_LEN {
            return Err(anyhow!(
                "ORANGECOIN_AUTH_SECRET must be at least {} bytes",
                MIN_AUTH_SECRET_LEN
            ));
        }

        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.environment == "production"
    }
}
