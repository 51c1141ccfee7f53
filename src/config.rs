//! Server configuration
//!
//! Loaded from a TOML file, then overridden by `WHITEDICE_*` environment
//! variables:
//!
//! ```toml
//! bind_addr = "0.0.0.0:8080"
//! database_path = "whitedice.db"
//! logging_path = "bot.log"
//! log_filter = "whitedice=debug"
//! bot_name = "whitedice"
//! ```

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "WHITEDICE_";

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// SQLite file; `None` keeps everything in memory
    pub database_path: Option<String>,
    /// Log file written alongside stdout
    pub logging_path: Option<PathBuf>,
    /// Default tracing filter, overridden by `RUST_LOG`
    pub log_filter: String,
    /// Name the bot posts under
    pub bot_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            database_path: None, // None = in-memory
            logging_path: Some(PathBuf::from("whitedice.log")),
            log_filter: "whitedice=info,tower_http=debug".to_string(),
            bot_name: "whitedice".to_string(),
        }
    }
}

impl Config {
    /// Defaults, then the TOML file at `path`, then the environment
    pub fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Load configuration from `path` and the environment. The file must
    /// exist.
    pub fn load(path: &Path) -> Result<Self, figment::Error> {
        if !path.is_file() {
            return Err(figment::Error::from(format!(
                "configuration file {} not found",
                path.display()
            )));
        }
        Self::figment(path).extract()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_an_error() {
        figment::Jail::expect_with(|jail| {
            let err = Config::load(&jail.directory().join("missing.toml")).unwrap_err();
            assert!(err.to_string().contains("missing.toml"), "{}", err);
            Ok(())
        });
    }

    #[test]
    fn test_defaults_fill_empty_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("whitedice.toml", "")?;
            let config = Config::load(Path::new("whitedice.toml"))?;
            assert_eq!(config, Config::default());
            Ok(())
        });
    }

    #[test]
    fn test_file_values() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "whitedice.toml",
                r#"
                bind_addr = "0.0.0.0:9000"
                database_path = "dice.db"
                bot_name = "roller"
                "#,
            )?;

            let config = Config::load(Path::new("whitedice.toml"))?;
            assert_eq!(config.bind_addr, "0.0.0.0:9000".parse().unwrap());
            assert_eq!(config.database_path.as_deref(), Some("dice.db"));
            assert_eq!(config.bot_name, "roller");
            assert_eq!(config.log_filter, Config::default().log_filter);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("whitedice.toml", r#"bot_name = "roller""#)?;
            jail.set_env("WHITEDICE_BOT_NAME", "dicey");
            jail.set_env("WHITEDICE_BIND_ADDR", "127.0.0.1:7000");

            let config = Config::load(Path::new("whitedice.toml"))?;
            assert_eq!(config.bot_name, "dicey");
            assert_eq!(config.bind_addr.port(), 7000);
            Ok(())
        });
    }

    #[test]
    fn test_bad_address_is_an_error() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("whitedice.toml", r#"bind_addr = "nowhere""#)?;
            assert!(Config::load(Path::new("whitedice.toml")).is_err());
            Ok(())
        });
    }
}
