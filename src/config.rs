pub mod binding;
pub mod logger;
pub mod server;

use std::sync::LazyLock;

use anyhow::Context;
use config::Config;
use serde::Deserialize;

pub use binding::BindingConfig;
pub use logger::LoggerConfig;
pub use server::ServerConfig;

static APPCONFIG: LazyLock<Loaded> = LazyLock::new(|| Loaded::from_result(AppConfig::load()));

/// The process configuration, plus the load error when it fell back to
/// defaults. The error is kept so it can be logged once a subscriber exists.
struct Loaded {
    config: AppConfig,
    error: Option<anyhow::Error>,
}

impl Loaded {
    fn from_result(result: anyhow::Result<AppConfig>) -> Self {
        match result {
            Ok(config) => Self {
                config,
                error: None,
            },
            Err(err) => {
                tracing::warn!(error = %format!("{err:#}"), "falling back to default configuration");
                Self {
                    config: AppConfig::default(),
                    error: Some(err),
                }
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    binding: BindingConfig,
    #[serde(default)]
    server: ServerConfig,
    #[serde(default)]
    logger: LoggerConfig,
}

impl AppConfig {
    /// Reads `application.yaml` (optional) and `APP_`-prefixed environment
    /// variables, e.g. `APP_BINDING__DISALLOW_UNKNOWN_FIELDS=true`.
    pub fn load() -> anyhow::Result<Self> {
        Config::builder()
            .add_source(
                config::File::with_name("application")
                    .format(config::FileFormat::Yaml)
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| "Failed to read The Configuration")?
            .try_deserialize()
            .with_context(|| "Failed to deserialize The Configuration")
    }

    pub fn binding(&self) -> &BindingConfig {
        &self.binding
    }

    pub fn server(&self) -> &ServerConfig {
        &self.server
    }

    pub fn logger(&self) -> &LoggerConfig {
        &self.logger
    }
}

pub fn get() -> &'static AppConfig {
    &APPCONFIG.config
}

/// Why [`get`] fell back to defaults, if it did.
pub fn load_error() -> Option<&'static anyhow::Error> {
    APPCONFIG.error.as_ref()
}
