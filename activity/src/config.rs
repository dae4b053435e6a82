//! Configuration module for the history service, the Hive RPC nodes and private keys.
//!
//! Every setting has a built-in default and can be overridden from the environment
//! (a `.env` file is loaded by the binary before these are read).

use {
    crate::error::{ActivityError, ActivityResult},
    std::{env, fmt, str::FromStr, time::Duration},
};

/// Default account for the history fetcher.
pub const DEFAULT_ACCOUNT: &str = "null";
/// Default token symbol for the history fetcher.
pub const DEFAULT_SYMBOL: &str = "SIM";
/// Default account for the notification viewer when `HIVE_ACCOUNT` is unset.
pub const DEFAULT_NOTIFICATION_ACCOUNT: &str = "thecrazygm";

const DEFAULT_HISTORY_URL: &str = "https://history.hive-engine.com";
const DEFAULT_PAGE_LIMIT: usize = 500;
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_NODES: [&str; 2] = ["https://api.hive.blog", "https://api.syncad.com"];

/// Settings for the Hive Engine account history service.
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    /// Base URL; `/accountHistory` is appended per request
    pub base_url: String,
    /// Page size, fixed for a whole fetch
    pub page_limit: usize,
    /// Per-request deadline
    pub timeout: Duration,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_HISTORY_URL.to_string(),
            page_limit: DEFAULT_PAGE_LIMIT,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl HistoryConfig {
    /// Builds the configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `HIVE_ENGINE_HISTORY_URL` - Optional: history service base URL
    /// - `HISTORY_PAGE_LIMIT` - Optional: page size, must be non-zero (default: 500)
    /// - `HTTP_TIMEOUT_SECS` - Optional: request timeout in seconds (default: 30)
    pub fn from_env() -> Self {
        let base_url = env::var("HIVE_ENGINE_HISTORY_URL")
            .ok()
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_HISTORY_URL.to_string());

        let page_limit = parse_env_or("HISTORY_PAGE_LIMIT", DEFAULT_PAGE_LIMIT);
        let page_limit = if page_limit == 0 {
            log::warn!("HISTORY_PAGE_LIMIT must be non-zero, using {DEFAULT_PAGE_LIMIT}");
            DEFAULT_PAGE_LIMIT
        } else {
            page_limit
        };

        Self {
            base_url,
            page_limit,
            timeout: Duration::from_secs(parse_env_or("HTTP_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)),
        }
    }
}

/// Settings for the Hive JSON-RPC client.
#[derive(Debug, Clone)]
pub struct HiveConfig {
    /// Nodes tried in order until one answers
    pub nodes: Vec<String>,
    /// Per-request deadline
    pub timeout: Duration,
}

impl Default for HiveConfig {
    fn default() -> Self {
        Self {
            nodes: DEFAULT_NODES.iter().map(|n| n.to_string()).collect(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl HiveConfig {
    /// Builds the configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `HIVE_NODES` - Optional: comma-separated node URLs (default: api.hive.blog, api.syncad.com)
    /// - `HTTP_TIMEOUT_SECS` - Optional: request timeout in seconds (default: 30)
    pub fn from_env() -> Self {
        let nodes = parse_node_list("HIVE_NODES");
        Self {
            nodes: if nodes.is_empty() {
                Self::default().nodes
            } else {
                nodes
            },
            timeout: Duration::from_secs(parse_env_or("HTTP_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)),
        }
    }
}

/// A WIF-encoded private key read from the environment.
///
/// Only the shape is checked here; the key is never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey(String);

impl PrivateKey {
    /// Reads a key from `env_var`.
    ///
    /// Returns `Ok(None)` when the variable is unset or blank, which selects public mode.
    pub fn from_env(env_var: &str) -> ActivityResult<Option<Self>> {
        match env::var(env_var) {
            Ok(val) if !val.trim().is_empty() => val
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| ActivityError::InvalidKey(env_var.to_string())),
            _ => Ok(None),
        }
    }
}

impl FromStr for PrivateKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // base58 without 0, O, I and l
        const BASE58: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

        if s.len() != 51 || !s.starts_with('5') {
            return Err("expected a 51 character WIF key starting with '5'".to_string());
        }
        if let Some(bad) = s.chars().find(|c| !BASE58.contains(*c)) {
            return Err(format!("invalid base58 character '{bad}'"));
        }
        Ok(Self(s.to_string()))
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

/// Parses `env_var` into `T`, falling back to `default` when unset or invalid.
pub fn parse_env_or<T: FromStr>(env_var: &str, default: T) -> T {
    match env::var(env_var) {
        Ok(val) if !val.trim().is_empty() => val.trim().parse().unwrap_or_else(|_| {
            log::warn!("Invalid value '{}' in {}, using default", val.trim(), env_var);
            default
        }),
        _ => default,
    }
}

/// Parses a comma-separated list of node URLs from an environment variable.
///
/// # Returns
///
/// The URLs in the given order. Entries without an `http://` or `https://` scheme are
/// skipped with a warning. Returns an empty list if the env var is not set or empty.
pub fn parse_node_list(env_var: &str) -> Vec<String> {
    env::var(env_var)
        .ok()
        .map(|val| {
            val.split(',')
                .filter_map(|s| {
                    let trimmed = s.trim();
                    if trimmed.is_empty() {
                        return None;
                    }
                    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
                        Some(trimmed.trim_end_matches('/').to_string())
                    } else {
                        log::warn!("Invalid node URL '{}' in {}", trimmed, env_var);
                        None
                    }
                })
                .collect()
        })
        .unwrap_or_default()
}
