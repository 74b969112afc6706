use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Apply the registration form rules server-side, not just presence checks.
    pub strict_validation: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
            strict_validation: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();
        let host = std::env::var("APP_HOST").unwrap_or(defaults.host);
        let port = match std::env::var("APP_PORT") {
            Ok(v) => v
                .parse::<u16>()
                .with_context(|| format!("APP_PORT must be a port number, got {:?}", v))?,
            Err(_) => defaults.port,
        };
        let strict_validation = match std::env::var("STRICT_VALIDATION") {
            Ok(v) => parse_flag(&v)
                .with_context(|| format!("STRICT_VALIDATION must be a boolean, got {:?}", v))?,
            Err(_) => defaults.strict_validation,
        };
        Ok(Self {
            host,
            port,
            strict_validation,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_flag(raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => anyhow::bail!("unrecognized flag value {other:?}"),
    }
}
