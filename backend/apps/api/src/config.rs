//! Server configuration loaded from the environment

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use auth::application::config::{JWT_SECRET_LENGTH, SameSite};
use axum::http::HeaderValue;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";

#[derive(Debug)]
pub struct ApiConfig {
    /// `None` selects the in-memory account store
    pub database_url: Option<String>,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<HeaderValue>,
    pub auth: AuthConfig,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok(), cfg!(debug_assertions))
    }

    /// Build from a variable lookup. Debug builds fall back to a random JWT
    /// secret and insecure cookies; release builds require the secret.
    pub fn from_lookup<F>(lookup: F, debug: bool) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let bind_addr = var("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be a socket address")?;

        let frontend_origins = var("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .filter_map(|origin| origin.trim().parse().ok())
            .collect();

        let mut auth = if debug {
            AuthConfig::development()
        } else {
            AuthConfig::default()
        };

        match var("AUTH_JWT_SECRET") {
            Some(secret_b64) => {
                let secret = platform::crypto::from_base64(&secret_b64)
                    .context("AUTH_JWT_SECRET must be base64")?;
                if secret.len() < JWT_SECRET_LENGTH {
                    bail!("AUTH_JWT_SECRET must decode to at least {JWT_SECRET_LENGTH} bytes");
                }
                auth.jwt_secret = secret;
            }
            None if debug => {
                tracing::warn!("AUTH_JWT_SECRET not set, using a random secret");
            }
            None => bail!("AUTH_JWT_SECRET must be set in production"),
        }

        if let Some(ttl) = var("AUTH_SESSION_TTL_SECS") {
            let secs: u64 = ttl
                .trim()
                .parse()
                .context("AUTH_SESSION_TTL_SECS must be a number of seconds")?;
            if secs == 0 {
                bail!("AUTH_SESSION_TTL_SECS must be positive");
            }
            auth.session_ttl = Duration::from_secs(secs);
        }

        if let Some(name) = var("AUTH_COOKIE_NAME") {
            auth.session_cookie_name = name.trim().to_string();
        }

        if let Some(secure) = var("AUTH_COOKIE_SECURE") {
            auth.cookie_secure = parse_bool(&secure).with_context(|| {
                format!("AUTH_COOKIE_SECURE must be true or false, got {secure:?}")
            })?;
        }

        if let Some(same_site) = var("AUTH_COOKIE_SAME_SITE") {
            auth.cookie_same_site = SameSite::parse(&same_site).with_context(|| {
                format!("AUTH_COOKIE_SAME_SITE must be Strict, Lax or None, got {same_site:?}")
            })?;
        }

        if let Some(pepper_b64) = var("AUTH_PASSWORD_PEPPER") {
            let pepper = platform::crypto::from_base64(&pepper_b64)
                .context("AUTH_PASSWORD_PEPPER must be base64")?;
            auth.password_pepper = Some(pepper);
        }

        Ok(Self {
            database_url: var("DATABASE_URL"),
            bind_addr,
            frontend_origins,
            auth,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)], debug: bool) -> anyhow::Result<ApiConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| vars.get(key).cloned(), debug)
    }

    fn secret() -> String {
        platform::crypto::to_base64(&[7u8; 32])
    }

    #[test]
    fn test_debug_defaults() {
        let config = load(&[], true).unwrap();
        assert!(config.database_url.is_none());
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR.parse().unwrap());
        assert_eq!(config.frontend_origins.len(), 2);
        assert!(!config.auth.cookie_secure);
        assert_eq!(config.auth.jwt_secret.len(), JWT_SECRET_LENGTH);
        assert_eq!(config.auth.session_ttl, Duration::from_secs(86_400));
    }

    #[test]
    fn test_release_requires_secret() {
        assert!(load(&[], false).is_err());

        let config = load(&[("AUTH_JWT_SECRET", &secret())], false).unwrap();
        assert!(config.auth.cookie_secure);
        assert_eq!(config.auth.jwt_secret, vec![7u8; 32]);
    }

    #[test]
    fn test_short_secret_rejected() {
        let short = platform::crypto::to_base64(&[1u8; 16]);
        assert!(load(&[("AUTH_JWT_SECRET", &short)], true).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = load(
            &[
                ("DATABASE_URL", "postgres://localhost/auth"),
                ("BIND_ADDR", "127.0.0.1:8080"),
                ("AUTH_SESSION_TTL_SECS", "600"),
                ("AUTH_COOKIE_NAME", "sid"),
                ("AUTH_COOKIE_SECURE", "true"),
                ("AUTH_COOKIE_SAME_SITE", "strict"),
                ("AUTH_PASSWORD_PEPPER", &secret()),
                ("FRONTEND_ORIGINS", "https://app.example.com"),
            ],
            true,
        )
        .unwrap();

        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/auth"));
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.auth.session_ttl, Duration::from_secs(600));
        assert_eq!(config.auth.session_cookie_name, "sid");
        assert!(config.auth.cookie_secure);
        assert_eq!(config.auth.cookie_same_site, SameSite::Strict);
        assert!(config.auth.password_pepper.is_some());
        assert_eq!(
            config.frontend_origins,
            vec![HeaderValue::from_static("https://app.example.com")]
        );
    }

    #[test]
    fn test_invalid_values() {
        assert!(load(&[("AUTH_SESSION_TTL_SECS", "soon")], true).is_err());
        assert!(load(&[("AUTH_SESSION_TTL_SECS", "0")], true).is_err());
        assert!(load(&[("AUTH_COOKIE_SECURE", "maybe")], true).is_err());
        assert!(load(&[("BIND_ADDR", "nowhere")], true).is_err());
    }
}
