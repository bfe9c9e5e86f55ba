//! Server configuration read from the environment (after `.env` is loaded).
//!
//! | Variable | Default |
//! |----------|---------|
//! | `BLOGCREW_HOST` | `127.0.0.1` |
//! | `BLOGCREW_PORT` | `5000` |
//! | `BLOGCREW_PROVIDER` | `anthropic` |
//! | `BLOGCREW_MODEL` | provider default |
//! | `BLOGCREW_BASE_URL` | none (OpenAI-compatible endpoints only) |
//! | `BLOGCREW_MAX_RPM` | `100` |
//! | `BLOGCREW_VERBOSE_AGENTS` | `false` |

use anyhow::{Context, Result};
use blogcrew_core::blog::{BlogSettings, DEFAULT_MAX_RPM};
use blogcrew_core::models::{LlmProvider, ModelConfig};
use std::net::{IpAddr, SocketAddr};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub model: ModelConfig,
    pub max_rpm: u32,
    pub verbose_agents: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            model: ModelConfig::default(),
            max_rpm: DEFAULT_MAX_RPM,
            verbose_agents: false,
        }
    }
}

impl ServerConfig {
    /// Read configuration from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(host) = get("BLOGCREW_HOST") {
            config.host = host.trim().to_string();
        }
        if let Some(port) = get("BLOGCREW_PORT") {
            config.port = port
                .trim()
                .parse()
                .with_context(|| format!("BLOGCREW_PORT is not a valid port: '{port}'"))?;
        }

        let provider = match get("BLOGCREW_PROVIDER") {
            Some(p) => p.parse::<LlmProvider>().context("invalid BLOGCREW_PROVIDER")?,
            None => LlmProvider::default(),
        };
        config.model = match get("BLOGCREW_MODEL") {
            Some(model) => ModelConfig::with_provider(provider, model.trim()),
            None => ModelConfig::for_provider(provider),
        };
        if let Some(base_url) = get("BLOGCREW_BASE_URL") {
            if !provider.supports_base_url() {
                tracing::warn!(%provider, "BLOGCREW_BASE_URL ignored for this provider");
            }
            config.model = config.model.with_base_url(base_url.trim());
        }

        if let Some(rpm) = get("BLOGCREW_MAX_RPM") {
            config.max_rpm = rpm
                .trim()
                .parse()
                .with_context(|| format!("BLOGCREW_MAX_RPM is not a number: '{rpm}'"))?;
            anyhow::ensure!(config.max_rpm > 0, "BLOGCREW_MAX_RPM must be greater than zero");
        }
        if let Some(verbose) = get("BLOGCREW_VERBOSE_AGENTS") {
            config.verbose_agents = matches!(
                verbose.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }

        Ok(config)
    }

    /// Socket address to listen on
    pub fn addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .with_context(|| format!("invalid listen address '{}'", self.host))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Settings for the blog crew
    pub fn blog_settings(&self) -> BlogSettings {
        BlogSettings {
            model: self.model.clone(),
            max_rpm: self.max_rpm,
            verbose: self.verbose_agents,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.addr().unwrap().to_string(), "127.0.0.1:5000");
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("BLOGCREW_HOST", "0.0.0.0"),
            ("BLOGCREW_PORT", "8080"),
            ("BLOGCREW_PROVIDER", "openai"),
            ("BLOGCREW_MODEL", "gpt-4o-mini"),
            ("BLOGCREW_BASE_URL", "http://localhost:11434/v1"),
            ("BLOGCREW_MAX_RPM", "10"),
            ("BLOGCREW_VERBOSE_AGENTS", "yes"),
        ]))
        .unwrap();

        assert_eq!(config.addr().unwrap().to_string(), "0.0.0.0:8080");
        assert_eq!(config.model.provider, LlmProvider::OpenAI);
        assert_eq!(config.model.model, "gpt-4o-mini");
        assert_eq!(config.model.base_url.as_deref(), Some("http://localhost:11434/v1"));

        let settings = config.blog_settings();
        assert_eq!(settings.max_rpm, 10);
        assert!(settings.verbose);
    }

    #[test]
    fn test_provider_default_model() {
        let config = ServerConfig::from_lookup(lookup(&[("BLOGCREW_PROVIDER", "gemini")])).unwrap();
        assert_eq!(config.model.model, "gemini-2.0-flash-exp");
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(ServerConfig::from_lookup(lookup(&[("BLOGCREW_PORT", "http")])).is_err());
        assert!(ServerConfig::from_lookup(lookup(&[("BLOGCREW_PROVIDER", "mistral")])).is_err());
        assert!(ServerConfig::from_lookup(lookup(&[("BLOGCREW_MAX_RPM", "0")])).is_err());
    }
}
