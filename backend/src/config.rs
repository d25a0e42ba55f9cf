use std::env;

use log::warn;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Maximum accepted JSON body.
pub const JSON_LIMIT: usize = 10 * 1024 * 1024;

/// Server settings, read from the environment (and `.env` when present).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Credential for the generative text service. Requests fail with
    /// "API Key is missing" while unset.
    pub api_key: Option<String>,
    pub model: String,
    pub open_browser: bool,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                warn!("Ignoring unreadable .env file: {}", e);
            }
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!("Invalid PORT {:?}, using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };
        let open_browser = lookup("OPEN_BROWSER")
            .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off"))
            .unwrap_or(true);

        Self {
            host: lookup("HOST")
                .filter(|h| !h.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            api_key: lookup("API_KEY").filter(|k| !k.trim().is_empty()),
            model: lookup("GEMINI_MODEL")
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            open_browser,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = config(&[]);
        assert_eq!(cfg.url(), "http://127.0.0.1:8080");
        assert_eq!(cfg.model, "gemini-2.5-flash");
        assert!(cfg.api_key.is_none());
        assert!(cfg.open_browser);
    }

    #[test]
    fn values_are_read_from_the_environment() {
        let cfg = config(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "9000"),
            ("API_KEY", "secret"),
            ("OPEN_BROWSER", "false"),
        ]);
        assert_eq!(cfg.url(), "http://0.0.0.0:9000");
        assert_eq!(cfg.api_key.as_deref(), Some("secret"));
        assert!(!cfg.open_browser);
    }

    #[test]
    fn bad_port_and_blank_key_fall_back() {
        let cfg = config(&[("PORT", "eighty"), ("API_KEY", "  ")]);
        assert_eq!(cfg.port, 8080);
        assert!(cfg.api_key.is_none());
    }
}
