use anyhow::Result;
use config::{Config, File as ConfigFile};
use ledger_types::validate_denom;
use std::path::{Path, PathBuf};

pub const ENV_PREFIX: &str = "LEDGER";
pub const DEFAULT_NATIVE_DENOM: &str = "stake";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub config_path: Option<PathBuf>,

    // Storage; no data dir means an in-memory store
    pub data_dir: Option<PathBuf>,
    pub flush_on_commit: bool,

    // Chain
    pub genesis_file: Option<PathBuf>,
    pub native_denom: String,

    // Logging
    pub log_level: String,
    pub log_format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_path: None,
            data_dir: None,
            flush_on_commit: false,
            genesis_file: None,
            native_denom: DEFAULT_NATIVE_DENOM.to_string(),
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// `$LEDGER_HOME/config.toml`, when `LEDGER_HOME` is set.
    pub fn default_config_path() -> Option<PathBuf> {
        std::env::var_os("LEDGER_HOME").map(|home| PathBuf::from(home).join("config.toml"))
    }

    /// Load from an optional TOML file, then `LEDGER_*` environment variables.
    pub fn load(config_path_override: Option<&Path>) -> Result<Self> {
        let resolved_path = match config_path_override {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!(
                        "Configuration file {} not found (specified via --config)",
                        path.display()
                    );
                }
                Some(path.to_path_buf())
            }
            None => Self::default_config_path().filter(|path| path.exists()),
        };

        let mut builder = Config::builder();
        if let Some(path) = &resolved_path {
            builder = builder.add_source(ConfigFile::from(path.as_path()));
        }
        builder = builder.add_source(config::Environment::with_prefix(ENV_PREFIX));
        let source = builder.build()?;

        let defaults = Self::default();
        let config = Self {
            config_path: resolved_path,
            data_dir: get_string_value(&source, &["DATA_DIR", "data_dir"]).map(PathBuf::from),
            flush_on_commit: get_bool_value(
                &source,
                &["FLUSH_ON_COMMIT", "flush_on_commit"],
                defaults.flush_on_commit,
            ),
            genesis_file: get_string_value(&source, &["GENESIS_FILE", "genesis_file"])
                .map(PathBuf::from),
            native_denom: get_string_value(&source, &["NATIVE_DENOM", "native_denom"])
                .unwrap_or(defaults.native_denom),
            log_level: get_string_value(&source, &["LOG_LEVEL", "log_level"])
                .unwrap_or(defaults.log_level),
            log_format: get_string_value(&source, &["LOG_FORMAT", "log_format"])
                .unwrap_or(defaults.log_format),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if validate_denom(&self.native_denom).is_err() {
            anyhow::bail!("NATIVE_DENOM '{}' is not a valid denomination", self.native_denom);
        }
        if self.log_level.trim().is_empty() {
            anyhow::bail!("LOG_LEVEL must not be empty");
        }
        if !matches!(self.log_format.as_str(), "pretty" | "json") {
            anyhow::bail!(
                "LOG_FORMAT must be 'pretty' or 'json', got '{}'",
                self.log_format
            );
        }
        Ok(())
    }
}

fn get_string_value(config: &Config, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| {
        config
            .get_string(key)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    })
}

fn get_bool_value(config: &Config, keys: &[&str], default: bool) -> bool {
    for key in keys {
        if let Ok(value) = config.get_bool(key) {
            return value;
        }
        if let Ok(raw) = config.get_string(key) {
            if let Ok(parsed) = raw.parse::<bool>() {
                return parsed;
            }
        }
    }
    default
}
