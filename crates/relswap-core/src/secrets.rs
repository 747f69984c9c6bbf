//! Source of the optional auth token and proxy endpoint.
//!
//! The core never reads the environment itself; callers hand it whatever a
//! [`SecretProvider`] returns.

use crate::config::RelswapConfig;

pub const TOKEN_ENV_VARS: [&str; 2] = ["RELSWAP_GITHUB_TOKEN", "GITHUB_TOKEN"];
pub const PROXY_ENV_VAR: &str = "RELSWAP_HTTP_PROXY";

pub trait SecretProvider {
    fn auth_token(&self) -> Option<String>;
    fn proxy_endpoint(&self) -> Option<String>;
}

/// Token from the environment; proxy from config, falling back to the environment.
#[derive(Debug, Clone, Default)]
pub struct EnvSecrets {
    config_proxy: Option<String>,
}

impl EnvSecrets {
    pub fn new(cfg: &RelswapConfig) -> Self {
        Self {
            config_proxy: cfg.http_proxy.clone(),
        }
    }
}

fn non_empty(v: String) -> Option<String> {
    let v = v.trim();
    (!v.is_empty()).then(|| v.to_string())
}

impl SecretProvider for EnvSecrets {
    fn auth_token(&self) -> Option<String> {
        TOKEN_ENV_VARS
            .iter()
            .find_map(|k| std::env::var(k).ok().and_then(non_empty))
    }

    fn proxy_endpoint(&self) -> Option<String> {
        self.config_proxy
            .clone()
            .and_then(non_empty)
            .or_else(|| std::env::var(PROXY_ENV_VAR).ok().and_then(non_empty))
    }
}

/// Fixed values; handy for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticSecrets {
    pub auth_token: Option<String>,
    pub proxy_endpoint: Option<String>,
}

impl SecretProvider for StaticSecrets {
    fn auth_token(&self) -> Option<String> {
        self.auth_token.clone()
    }

    fn proxy_endpoint(&self) -> Option<String> {
        self.proxy_endpoint.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_proxy_wins() {
        let cfg = RelswapConfig {
            http_proxy: Some(" http://proxy.local:3128 ".to_string()),
            ..RelswapConfig::default()
        };
        let s = EnvSecrets::new(&cfg);
        assert_eq!(s.proxy_endpoint().as_deref(), Some("http://proxy.local:3128"));
    }

    #[test]
    fn blank_values_are_none() {
        assert_eq!(non_empty("   ".to_string()), None);
        assert_eq!(non_empty(" t ".to_string()).as_deref(), Some("t"));
    }

    #[test]
    fn static_secrets() {
        let s = StaticSecrets {
            auth_token: Some("abc".to_string()),
            proxy_endpoint: None,
        };
        assert_eq!(s.auth_token().as_deref(), Some("abc"));
        assert!(s.proxy_endpoint().is_none());
    }
}
