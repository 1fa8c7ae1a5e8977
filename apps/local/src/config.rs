use cviz::ColorStrategy;
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

#[derive(Clone, Debug)]
pub struct Config {
    /// Loopback address the gallery binds to
    pub host: IpAddr,
    pub port: u16,
    /// Page size when a request gives none
    pub page_limit: usize,
    pub open_browser: bool,
    pub colors: ColorStrategy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 2849,
            page_limit: cviz::pager::DEFAULT_LIMIT,
            open_browser: true,
            colors: ColorStrategy::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Config::default();

        let host = match lookup("CVIZ_HOST") {
            Some(v) => {
                let ip: IpAddr = v
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("CVIZ_HOST".to_string()))?;
                if !ip.is_loopback() {
                    return Err(ConfigError::NotLoopback(ip));
                }
                ip
            }
            None => defaults.host,
        };

        let page_limit = match lookup("CVIZ_PAGE_LIMIT") {
            Some(v) => v
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|l| *l > 0)
                .ok_or_else(|| ConfigError::InvalidValue("CVIZ_PAGE_LIMIT".to_string()))?,
            None => defaults.page_limit,
        };

        Ok(Config {
            host,
            port: lookup("CVIZ_PORT")
                .unwrap_or_else(|| defaults.port.to_string())
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("CVIZ_PORT".to_string()))?,
            page_limit,
            open_browser: match lookup("CVIZ_OPEN_BROWSER") {
                Some(v) => parse_bool(&v)
                    .ok_or_else(|| ConfigError::InvalidValue("CVIZ_OPEN_BROWSER".to_string()))?,
                None => defaults.open_browser,
            },
            colors: match lookup("CVIZ_COLORS") {
                Some(v) => v
                    .parse()
                    .map_err(|e| ConfigError::InvalidValue(format!("CVIZ_COLORS: {}", e)))?,
                None => defaults.colors,
            },
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidValue(String),
    NotLoopback(IpAddr),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue(var) => write!(f, "Invalid value for: {}", var),
            ConfigError::NotLoopback(ip) => {
                write!(f, "CVIZ_HOST must be a loopback address, got {}", ip)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
