use serde::Deserialize;

const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Default, Deserialize)]
pub struct LoggerConfig {
    level: Option<String>,
}

impl LoggerConfig {
    pub fn level(&self) -> Option<&str> {
        self.level.as_deref()
    }

    /// Filter directive: the configured level, else `env_filter`, else `info`.
    pub fn filter(&self, env_filter: Option<String>) -> String {
        self.level()
            .map(str::to_string)
            .or(env_filter)
            .unwrap_or_else(|| DEFAULT_FILTER.to_string())
    }
}
