use std::path::PathBuf;
use std::time::Duration;


pub const DEFAULT_EVENTS_BASE_URL: &str = "https://byabbe.se/on-this-day";
pub const DEFAULT_JOKE_URL: &str = "https://icanhazdadjoke.com/";
pub const DEFAULT_USER_AGENT: &str = "today-in-history (lambda)";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";


#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("{key} must be a whole number of milliseconds, got {value:?}")]
    InvalidTimeout { key: &'static str, value: String },
    #[error("{key} must not be empty")]
    Empty { key: &'static str },
}


/// Where to fetch from and how. Passed explicitly to the HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub events_base_url: String,
    pub joke_url: String,
    pub user_agent: String,
    pub events_timeout: Duration,
    pub joke_timeout: Duration,
    /// Extra PEM trust roots for the HTTP client.
    pub ca_cert: Option<PathBuf>,
    pub bind_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            events_base_url: DEFAULT_EVENTS_BASE_URL.to_string(),
            joke_url: DEFAULT_JOKE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            events_timeout: Duration::from_millis(12_000),
            joke_timeout: Duration::from_millis(8_000),
            ca_cert: None,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

impl Config {
    /// Reads `.env` (if any) and then the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        let text = |key: &'static str| -> Result<Option<String>, ConfigError> {
            match lookup(key) {
                Some(v) if v.trim().is_empty() => Err(ConfigError::Empty { key }),
                Some(v) => Ok(Some(v.trim().to_string())),
                None => Ok(None),
            }
        };
        let millis = |key: &'static str| -> Result<Option<Duration>, ConfigError> {
            text(key)?
                .map(|v| {
                    v.parse::<u64>()
                        .map(Duration::from_millis)
                        .map_err(|_| ConfigError::InvalidTimeout { key, value: v })
                })
                .transpose()
        };

        if let Some(url) = text("TODAY_EVENTS_BASE_URL")? {
            config.events_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(url) = text("TODAY_JOKE_URL")? {
            config.joke_url = url;
        }
        if let Some(agent) = text("TODAY_USER_AGENT")? {
            config.user_agent = agent;
        }
        if let Some(timeout) = millis("TODAY_EVENTS_TIMEOUT_MS")? {
            config.events_timeout = timeout;
        }
        if let Some(timeout) = millis("TODAY_JOKE_TIMEOUT_MS")? {
            config.joke_timeout = timeout;
        }
        if let Some(path) = text("TODAY_CA_CERT")? {
            config.ca_cert = Some(PathBuf::from(path));
        }
        if let Some(addr) = text("TODAY_BIND_ADDR")? {
            config.bind_addr = addr;
        }

        Ok(config)
    }

    pub fn events_url(&self, month: u32, day: u32) -> String {
        format!("{}/{}/{}/events.json", self.events_base_url, month, day)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(
            config.events_url(3, 7),
            "https://byabbe.se/on-this-day/3/7/events.json"
        );
    }

    #[test]
    fn overrides_are_applied() {
        let config = Config::from_lookup(lookup(&[
            ("TODAY_EVENTS_BASE_URL", "http://localhost:9000/days/"),
            ("TODAY_JOKE_TIMEOUT_MS", "250"),
            ("TODAY_CA_CERT", "/etc/ssl/extra.pem"),
        ]))
        .unwrap();

        assert_eq!(config.events_url(12, 12), "http://localhost:9000/days/12/12/events.json");
        assert_eq!(config.joke_timeout, Duration::from_millis(250));
        assert_eq!(config.ca_cert, Some(PathBuf::from("/etc/ssl/extra.pem")));
    }

    #[test]
    fn bad_timeout_is_rejected() {
        let err = Config::from_lookup(lookup(&[("TODAY_EVENTS_TIMEOUT_MS", "soon")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidTimeout { key: "TODAY_EVENTS_TIMEOUT_MS", .. }
        ));
    }

    #[test]
    fn blank_value_is_rejected() {
        let err = Config::from_lookup(lookup(&[("TODAY_JOKE_URL", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::Empty { key: "TODAY_JOKE_URL" }));
    }
}
