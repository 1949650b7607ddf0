use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use tracing::{warn, Level};

// Identifiable defines common traits that can be shared by stored objects
pub trait Identifiable: Sync + Send {
    fn id(&self) -> i64;
}

// RuntimeMode selects how the catalog receives requests
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum RuntimeMode {
    Http,
    Lambda,
}

impl FromStr for RuntimeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "http" => Ok(RuntimeMode::Http),
            "lambda" => Ok(RuntimeMode::Lambda),
            other => Err(format!("unknown runtime {}", other)),
        }
    }
}

impl Display for RuntimeMode {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            RuntimeMode::Http => write!(f, "http"),
            RuntimeMode::Lambda => write!(f, "lambda"),
        }
    }
}

// Configuration abstracts config options for the catalog service
#[derive(Debug, PartialEq, Clone)]
pub struct Configuration {
    pub branch_id: String,
    pub runtime: RuntimeMode,
    pub host: String,
    pub port: u16,
    pub log_level: Level,
}

impl Configuration {
    pub fn new(branch_id: &str) -> Self {
        Configuration {
            branch_id: branch_id.to_string(),
            runtime: RuntimeMode::Http,
            host: "0.0.0.0".to_string(),
            port: 8000,
            log_level: Level::INFO,
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    // Builds configuration from any key lookup, falling back to defaults for missing
    // or unparseable values.
    pub fn from_lookup<F>(lookup: F) -> Self
        where F: Fn(&str) -> Option<String> {
        let defaults = Configuration::new(
            lookup("CATALOG_BRANCH").unwrap_or_else(|| "dev".to_string()).as_str());
        Configuration {
            runtime: parse_or(&lookup, "CATALOG_RUNTIME", defaults.runtime),
            host: lookup("CATALOG_HOST").unwrap_or(defaults.host.clone()),
            port: parse_or(&lookup, "CATALOG_PORT", defaults.port),
            log_level: parse_or(&lookup, "CATALOG_LOG_LEVEL", defaults.log_level),
            ..defaults
        }
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
    where F: Fn(&str) -> Option<String>, T: FromStr + Display {
    match lookup(key) {
        Some(raw) => match raw.parse::<T>() {
            Ok(val) => val,
            Err(_) => {
                warn!("ignoring invalid {}={:?}, using {}", key, raw, default);
                default
            }
        },
        None => default,
    }
}
