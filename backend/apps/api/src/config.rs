//! Process configuration
//!
//! Read once at startup from the environment (after `.env`). Any invalid
//! value aborts startup.

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use base64::Engine;
use base64::engine::general_purpose;
use records::RecordsConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";
const DEFAULT_SESSION_TTL_SECS: u64 = 12 * 3600;
const DEFAULT_STORE_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// `None` runs on in-memory stores
    pub database_url: Option<String>,
    pub auth: AuthConfig,
    pub records: RecordsConfig,
    pub seed_admin_password: String,
    pub seed_viewer_password: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| get(key).filter(|v| !v.trim().is_empty());
        let release = !cfg!(debug_assertions);

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be a socket address")?;

        let session_secret = match get("SESSION_SECRET") {
            Some(encoded) => decode_secret(&encoded)?,
            None if release => bail!("SESSION_SECRET must be set in production"),
            None => {
                tracing::warn!("SESSION_SECRET not set; using a random secret");
                platform::crypto::random_secret()
            }
        };

        let session_ttl = positive_secs(
            "SESSION_TTL_SECS",
            get("SESSION_TTL_SECS"),
            DEFAULT_SESSION_TTL_SECS,
        )?;
        let store_timeout = positive_secs(
            "STORE_TIMEOUT_SECS",
            get("STORE_TIMEOUT_SECS"),
            DEFAULT_STORE_TIMEOUT_SECS,
        )?;
        let cookie_secure = match get("COOKIE_SECURE") {
            Some(raw) => parse_bool(&raw).context("COOKIE_SECURE must be true or false")?,
            None => release,
        };

        let auth = AuthConfig {
            session_secret,
            session_ttl,
            cookie_secure,
            password_pepper: get("PASSWORD_PEPPER").map(String::into_bytes),
            ..AuthConfig::default()
        };

        let records = RecordsConfig {
            store_timeout,
            cookie_secure,
            ..RecordsConfig::default()
        };

        Ok(Self {
            bind_addr,
            database_url: get("DATABASE_URL"),
            auth,
            records,
            seed_admin_password: get("SEED_ADMIN_PASSWORD")
                .unwrap_or_else(|| "admin123".to_string()),
            seed_viewer_password: get("SEED_VIEWER_PASSWORD")
                .unwrap_or_else(|| "viewer123".to_string()),
        })
    }
}

fn decode_secret(encoded: &str) -> anyhow::Result<[u8; 32]> {
    let bytes = general_purpose::STANDARD
        .decode(encoded.trim())
        .context("SESSION_SECRET must be base64")?;
    <[u8; 32]>::try_from(bytes.as_slice())
        .map_err(|_| anyhow::anyhow!("SESSION_SECRET must decode to 32 bytes"))
}

fn positive_secs(key: &str, raw: Option<String>, default: u64) -> anyhow::Result<Duration> {
    let secs = match raw {
        Some(raw) => u64::from_str(raw.trim()).with_context(|| format!("{key} must be an integer"))?,
        None => default,
    };
    if secs == 0 {
        bail!("{key} must be greater than zero");
    }
    Ok(Duration::from_secs(secs))
}

fn parse_bool(raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => bail!("not a boolean: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.bind_addr.port(), 31113);
        assert!(config.database_url.is_none());
        assert_eq!(config.auth.session_ttl, Duration::from_secs(43200));
        assert_eq!(config.records.store_timeout, Duration::from_secs(5));
        assert_eq!(config.records.page_size, 5);
        assert_eq!(config.seed_admin_password, "admin123");
        assert_eq!(config.seed_viewer_password, "viewer123");
        assert!(config.auth.pepper().is_none());
    }

    #[test]
    fn test_session_secret_is_decoded() {
        let encoded = general_purpose::STANDARD.encode([7u8; 32]);
        let config = load(&[("SESSION_SECRET", &encoded)]).unwrap();
        assert_eq!(config.auth.session_secret, [7u8; 32]);

        let short = general_purpose::STANDARD.encode([7u8; 16]);
        assert!(load(&[("SESSION_SECRET", &short)]).is_err());
        assert!(load(&[("SESSION_SECRET", "***")]).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("DATABASE_URL", "postgres://localhost/records"),
            ("SESSION_TTL_SECS", "60"),
            ("STORE_TIMEOUT_SECS", "2"),
            ("COOKIE_SECURE", "false"),
            ("PASSWORD_PEPPER", "pepper"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/records")
        );
        assert_eq!(config.auth.session_ttl, Duration::from_secs(60));
        assert_eq!(config.records.store_timeout, Duration::from_secs(2));
        assert!(!config.auth.cookie_secure);
        assert!(!config.records.cookie_secure);
        assert_eq!(config.auth.pepper(), Some(b"pepper".as_slice()));
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(load(&[("BIND_ADDR", "nowhere")]).is_err());
        assert!(load(&[("SESSION_TTL_SECS", "0")]).is_err());
        assert!(load(&[("STORE_TIMEOUT_SECS", "soon")]).is_err());
        assert!(load(&[("COOKIE_SECURE", "maybe")]).is_err());
    }
}
