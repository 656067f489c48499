//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::cookie::CookieConfig;

use crate::domain::value_object::user_name::UserNameLimits;
use crate::domain::value_object::user_password::PASSWORD_MIN_LENGTH;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Length of generated JWT secrets
pub const JWT_SECRET_LENGTH: usize = 32;

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Path the session cookie is scoped to
    pub cookie_path: String,
    /// Token and cookie lifetime (24 hours)
    pub session_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// HS256 signing secret
    pub jwt_secret: Vec<u8>,
    /// `iss` claim written into and required from session tokens
    pub jwt_issuer: String,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    pub user_name_limits: UserNameLimits,
    /// Minimum password length accepted at sign-up
    pub password_min_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "session_token".to_string(),
            cookie_path: "/api".to_string(),
            session_ttl: Duration::from_secs(24 * 3600), // 24 hours
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            jwt_secret: Vec::new(),
            jwt_issuer: "auth".to_string(),
            password_pepper: None,
            user_name_limits: UserNameLimits::default(),
            password_min_length: PASSWORD_MIN_LENGTH,
        }
    }
}

impl AuthConfig {
    /// Create config with a random JWT secret (for development)
    pub fn with_random_secret() -> Self {
        Self {
            jwt_secret: platform::crypto::random_bytes(JWT_SECRET_LENGTH),
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Cookie settings for the session cookie
    pub fn session_cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: self.cookie_path.clone(),
            max_age_secs: Some(self.session_ttl.as_secs()),
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("session_cookie_name", &self.session_cookie_name)
            .field("cookie_path", &self.cookie_path)
            .field("session_ttl", &self.session_ttl)
            .field("cookie_secure", &self.cookie_secure)
            .field("cookie_same_site", &self.cookie_same_site)
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_issuer", &self.jwt_issuer)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .field("user_name_limits", &self.user_name_limits)
            .field("password_min_length", &self.password_min_length)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.session_cookie_name, "session_token");
        assert_eq!(config.session_ttl, Duration::from_secs(86_400));
        assert!(config.cookie_secure);
        assert_eq!(config.password_min_length, 3);
    }

    #[test]
    fn test_development_is_insecure_with_secret() {
        let config = AuthConfig::development();
        assert!(!config.cookie_secure);
        assert_eq!(config.jwt_secret.len(), JWT_SECRET_LENGTH);
    }

    #[test]
    fn test_session_cookie_carries_ttl() {
        let config = AuthConfig::development();
        let cookie = config.session_cookie().build_set_cookie("tok");
        assert!(cookie.starts_with("session_token=tok"));
        assert!(cookie.contains("Path=/api"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Max-Age=86400"));
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn test_debug_hides_secrets() {
        let config = AuthConfig {
            password_pepper: Some(b"pepper".to_vec()),
            ..AuthConfig::development()
        };
        let debug = format!("{:?}", config);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("112, 101, 112"));
    }
}
