//! Environment-driven configuration.
//!
//! Settings come from process environment variables, with a `.env` file
//! loaded first when present. Credentials are not validated here; a bad
//! secret fails at token acquisition, before the server starts serving.

use std::fmt;
use std::time::Duration;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub spotify: SpotifyConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Bound on a whole request cycle, applied as a transport layer.
    pub request_timeout: Duration,
}

#[derive(Clone)]
pub struct SpotifyConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

// Keeps the secret out of logs.
impl fmt::Debug for SpotifyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpotifyConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}

impl Config {
    /// Load configuration from the environment (and `.env`, if present).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let port = env_parsed("SERVER_PORT", DEFAULT_PORT);
        let timeout_secs = env_parsed("SERVER_REQUEST_TIMEOUT", DEFAULT_REQUEST_TIMEOUT_SECS);

        let client_id = std::env::var("SPOTIFY_CLIENT_ID").unwrap_or_default();
        let client_secret = std::env::var("SPOTIFY_CLIENT_SECRET").unwrap_or_default();
        let redirect_uri = std::env::var("SPOTIFY_REDIRECT_URI").unwrap_or_default();

        if client_id.is_empty() || client_secret.is_empty() {
            tracing::warn!(
                "SPOTIFY_CLIENT_ID / SPOTIFY_CLIENT_SECRET not set; \
                 token acquisition will fail at startup"
            );
        }

        Self {
            server: ServerConfig {
                port,
                request_timeout: Duration::from_secs(timeout_secs),
            },
            spotify: SpotifyConfig {
                client_id,
                client_secret,
                redirect_uri,
            },
        }
    }
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Env var tests share process state and must run serially.
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    fn clear_env() {
        for key in [
            "SERVER_PORT",
            "SERVER_REQUEST_TIMEOUT",
            "SPOTIFY_CLIENT_ID",
            "SPOTIFY_CLIENT_SECRET",
            "SPOTIFY_REDIRECT_URI",
        ] {
            unsafe {
                std::env::remove_var(key);
            }
        }
    }

    #[test]
    fn test_defaults() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();
        let cfg = Config::from_env();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.request_timeout, Duration::from_secs(30));
        assert_eq!(cfg.spotify.client_id, "");
    }

    #[test]
    fn test_env_overrides() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();
        unsafe {
            std::env::set_var("SERVER_PORT", "9090");
            std::env::set_var("SERVER_REQUEST_TIMEOUT", "5");
            std::env::set_var("SPOTIFY_CLIENT_ID", "id123");
            std::env::set_var("SPOTIFY_CLIENT_SECRET", "sekret");
        }
        let cfg = Config::from_env();
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.server.request_timeout, Duration::from_secs(5));
        assert_eq!(cfg.spotify.client_id, "id123");
        assert_eq!(cfg.spotify.client_secret, "sekret");
        clear_env();
    }

    #[test]
    fn test_unparseable_port_falls_back() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_env();
        unsafe {
            std::env::set_var("SERVER_PORT", "not-a-port");
        }
        let cfg = Config::from_env();
        assert_eq!(cfg.server.port, 8080);
        clear_env();
    }

    #[test]
    fn test_secret_redacted_in_debug() {
        let cfg = SpotifyConfig {
            client_id: "id123".into(),
            client_secret: "super_secret".into(),
            redirect_uri: "http://localhost/callback".into(),
        };
        let debug = format!("{cfg:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("super_secret"));
    }
}
