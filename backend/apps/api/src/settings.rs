//! Runtime settings from environment variables
//!
//! `.env` is loaded by `main` before [`Settings::from_env`] runs.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use auth::application::config::{MAX_TOKEN_TTL, RateLimitConfig, SameSite};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8001";
const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";
const LOCAL_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://localhost:5173"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

/// Startup settings. Secrets are redacted from `Debug`.
#[derive(Clone)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub app_env: AppEnv,
    pub frontend_url: String,
    pub secret_key: String,
    pub token_ttl: Duration,
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
    pub admin_email: Option<String>,
    pub admin_password_reset: bool,
    pub password_pepper: Option<String>,
    pub login_rate_limit: u32,
    pub login_rate_window_secs: u64,
    pub trust_proxy_headers: bool,
    pub db_max_connections: u32,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Parse from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = get("DATABASE_URL").context("DATABASE_URL must be set")?;
        let secret_key = get("SECRET_KEY").context("SECRET_KEY must be set")?;

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be a socket address like 0.0.0.0:8001")?;

        let app_env = match get("APP_ENV").as_deref().map(str::to_ascii_lowercase) {
            None => AppEnv::Development,
            Some(v) if v == "development" || v == "dev" => AppEnv::Development,
            Some(v) if v == "production" || v == "prod" => AppEnv::Production,
            Some(other) => bail!("APP_ENV must be 'development' or 'production', got '{other}'"),
        };

        let ttl_minutes: u64 = parse_or(&get, "ACCESS_TOKEN_EXPIRE_MINUTES", 30)?;
        let max_minutes = MAX_TOKEN_TTL.as_secs() / 60;
        let token_ttl = ttl_minutes
            .checked_mul(60)
            .map(Duration::from_secs)
            .filter(|ttl| ttl_minutes > 0 && *ttl <= MAX_TOKEN_TTL)
            .with_context(|| {
                format!("ACCESS_TOKEN_EXPIRE_MINUTES must be between 1 and {max_minutes}")
            })?;

        let login_rate_limit = parse_or(&get, "LOGIN_RATE_LIMIT", 5)?;
        let login_rate_window_secs = parse_or(&get, "LOGIN_RATE_WINDOW_SECS", 60)?;
        if login_rate_limit == 0 || login_rate_window_secs == 0 {
            bail!("LOGIN_RATE_LIMIT and LOGIN_RATE_WINDOW_SECS must be positive");
        }

        Ok(Self {
            database_url,
            bind_addr,
            app_env,
            frontend_url: get("FRONTEND_URL").unwrap_or_else(|| DEFAULT_FRONTEND_URL.to_string()),
            secret_key,
            token_ttl,
            admin_username: get("ADMIN_USERNAME"),
            admin_password: get("ADMIN_PASSWORD"),
            admin_email: get("ADMIN_EMAIL"),
            admin_password_reset: parse_or(&get, "ADMIN_PASSWORD_RESET", false)?,
            password_pepper: get("PASSWORD_PEPPER"),
            login_rate_limit,
            login_rate_window_secs,
            trust_proxy_headers: parse_or(&get, "TRUST_PROXY_HEADERS", false)?,
            db_max_connections: parse_or(&get, "DB_MAX_CONNECTIONS", 5)?,
        })
    }

    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig {
            token_secret: self.secret_key.as_bytes().to_vec(),
            token_ttl: self.token_ttl,
            cookie_secure: self.app_env == AppEnv::Production,
            cookie_same_site: SameSite::Lax,
            password_pepper: self.password_pepper.as_ref().map(|p| p.as_bytes().to_vec()),
            login_rate_limit: RateLimitConfig::new(
                self.login_rate_limit,
                self.login_rate_window_secs,
            ),
            trust_proxy_headers: self.trust_proxy_headers,
            ..AuthConfig::default()
        }
    }

    /// FRONTEND_URL plus the local dev servers, deduplicated
    pub fn cors_origins(&self) -> Vec<String> {
        let mut origins = vec![self.frontend_url.trim_end_matches('/').to_string()];
        for local in LOCAL_ORIGINS {
            if !origins.iter().any(|o| o == local) {
                origins.push(local.to_string());
            }
        }
        origins
    }
}

fn parse_or<T>(get: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value")),
        None => Ok(default),
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("bind_addr", &self.bind_addr)
            .field("app_env", &self.app_env)
            .field("frontend_url", &self.frontend_url)
            .field("token_ttl", &self.token_ttl)
            .field("admin_username", &self.admin_username)
            .field("admin_password_reset", &self.admin_password_reset)
            .field("login_rate_limit", &self.login_rate_limit)
            .field("login_rate_window_secs", &self.login_rate_window_secs)
            .field("trust_proxy_headers", &self.trust_proxy_headers)
            .field("db_max_connections", &self.db_max_connections)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(pairs: &[(&str, &str)]) -> anyhow::Result<Settings> {
        let mut env: HashMap<String, String> = [
            ("DATABASE_URL", "postgres://localhost/portfolio"),
            ("SECRET_KEY", "0123456789abcdef0123456789abcdef"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        for (k, v) in pairs {
            env.insert(k.to_string(), v.to_string());
        }
        Settings::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let s = settings(&[]).unwrap();
        assert_eq!(s.bind_addr.to_string(), "0.0.0.0:8001");
        assert_eq!(s.app_env, AppEnv::Development);
        assert_eq!(s.token_ttl, Duration::from_secs(1800));
        assert_eq!(s.login_rate_limit, 5);
        assert_eq!(s.login_rate_window_secs, 60);
        assert_eq!(s.db_max_connections, 5);
        assert!(!s.trust_proxy_headers);
        assert!(!s.admin_password_reset);
        assert_eq!(s.admin_username, None);
    }

    #[test]
    fn test_required_values() {
        let err = Settings::from_lookup(|_| None).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));

        let err = Settings::from_lookup(|key| {
            (key == "DATABASE_URL").then(|| "postgres://localhost/portfolio".to_string())
        })
        .unwrap_err();
        assert!(err.to_string().contains("SECRET_KEY"));
    }

    #[test]
    fn test_blank_counts_as_unset() {
        let s = settings(&[("ADMIN_USERNAME", "  "), ("ADMIN_PASSWORD", "")]).unwrap();
        assert_eq!(s.admin_username, None);
        assert_eq!(s.admin_password, None);
    }

    #[test]
    fn test_invalid_values() {
        assert!(settings(&[("APP_ENV", "staging")]).is_err());
        assert!(settings(&[("ACCESS_TOKEN_EXPIRE_MINUTES", "soon")]).is_err());
        assert!(settings(&[("ACCESS_TOKEN_EXPIRE_MINUTES", "0")]).is_err());
        assert!(settings(&[("ACCESS_TOKEN_EXPIRE_MINUTES", "-5")]).is_err());
        assert!(settings(&[("BIND_ADDR", "nowhere")]).is_err());
        assert!(settings(&[("LOGIN_RATE_LIMIT", "0")]).is_err());
    }

    #[test]
    fn test_token_lifetime_capped_at_one_year() {
        let s = settings(&[("ACCESS_TOKEN_EXPIRE_MINUTES", "525600")]).unwrap();
        assert_eq!(s.token_ttl, MAX_TOKEN_TTL);
        assert!(s.auth_config().validate().is_ok());

        for huge in ["525601", "200000000000000000", "18446744073709551615"] {
            let err = settings(&[("ACCESS_TOKEN_EXPIRE_MINUTES", huge)]).unwrap_err();
            assert!(err.to_string().contains("ACCESS_TOKEN_EXPIRE_MINUTES"));
        }
    }

    #[test]
    fn test_auth_config() {
        let dev = settings(&[("ACCESS_TOKEN_EXPIRE_MINUTES", "15")])
            .unwrap()
            .auth_config();
        assert!(!dev.cookie_secure);
        assert_eq!(dev.token_ttl_secs(), 900);
        assert_eq!(dev.cookie_name, "access_token");

        let prod = settings(&[
            ("APP_ENV", "production"),
            ("PASSWORD_PEPPER", "pepper"),
            ("LOGIN_RATE_LIMIT", "3"),
        ])
        .unwrap()
        .auth_config();
        assert!(prod.cookie_secure);
        assert_eq!(prod.password_pepper.as_deref(), Some(b"pepper".as_slice()));
        assert_eq!(prod.login_rate_limit.max_requests, 3);
    }

    #[test]
    fn test_cors_origins() {
        let s = settings(&[("FRONTEND_URL", "https://me.dev/")]).unwrap();
        assert_eq!(
            s.cors_origins(),
            [
                "https://me.dev",
                "http://localhost:3000",
                "http://localhost:5173"
            ]
        );

        let s = settings(&[]).unwrap();
        assert_eq!(s.cors_origins().len(), 2);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let s = settings(&[("ADMIN_PASSWORD", "S3cur3!Pass1234")]).unwrap();
        let debug = format!("{s:?}");
        assert!(!debug.contains("S3cur3"));
        assert!(!debug.contains("0123456789abcdef"));
        assert!(!debug.contains("postgres://"));
    }
}
