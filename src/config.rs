use crate::types::ClockStyle;
use anyhow::{Context, Result, anyhow};
use std::collections::HashMap;
use std::time::Duration;
use tracing::Level;

/// Bundled config for builds without a process environment (web, mobile)
const BUNDLED_CONFIG: &str = include_str!("../assets/config.env");

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_ASSISTANT_NAME: &str = "FinBot Pioneer";

/// Locale variables consulted for the clock style, highest precedence first.
const LOCALE_KEYS: [&str; 3] = ["LC_ALL", "LC_TIME", "LANG"];

#[derive(Clone, Debug, PartialEq)]
pub struct WidgetConfig {
    pub server_url: String,
    pub assistant_name: String,
    pub request_timeout: Option<Duration>,
    pub log_level: Level,
    pub clock: ClockStyle,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            assistant_name: DEFAULT_ASSISTANT_NAME.to_string(),
            request_timeout: None,
            log_level: Level::INFO,
            clock: ClockStyle::default(),
        }
    }
}

/// A resolved config plus the values that were rejected on the way.
///
/// Issues are returned rather than logged so the caller can report them once
/// a subscriber is installed.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: WidgetConfig,
    pub issues: Vec<anyhow::Error>,
}

impl WidgetConfig {
    /// Process env first, then the bundled `config.env`.
    pub fn load() -> LoadedConfig {
        let bundled = parse_env_file(BUNDLED_CONFIG);
        Self::from_lookup(|key| {
            process_var(key).or_else(|| bundled.get(key).cloned())
        })
    }

    /// Builds the config from any key lookup. Invalid values are replaced by
    /// their defaults and reported in `issues`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> LoadedConfig {
        let defaults = Self::default();
        let mut issues = Vec::new();
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let server_url = non_empty("FINBOT_SERVER_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .unwrap_or(defaults.server_url);
        let assistant_name = non_empty("FINBOT_ASSISTANT_NAME")
            .map(|name| name.trim().to_string())
            .unwrap_or(defaults.assistant_name);

        let request_timeout = match non_empty("FINBOT_REQUEST_TIMEOUT_SECS") {
            Some(raw) => parse_timeout(&raw)
                .context("ignoring FINBOT_REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|err| {
                    issues.push(err);
                    None
                }),
            None => None,
        };
        let log_level = match non_empty("FINBOT_LOG") {
            Some(raw) => parse_level(&raw)
                .context("ignoring FINBOT_LOG")
                .unwrap_or_else(|err| {
                    issues.push(err);
                    defaults.log_level
                }),
            None => defaults.log_level,
        };

        let locale_clock = || {
            LOCALE_KEYS
                .iter()
                .find_map(|&key| non_empty(key))
                .map(|locale| ClockStyle::from_locale(&locale))
                .unwrap_or(defaults.clock)
        };
        let clock = match non_empty("FINBOT_CLOCK") {
            Some(raw) => ClockStyle::parse(&raw).unwrap_or_else(|| {
                issues.push(anyhow!("ignoring FINBOT_CLOCK: `{raw}` is not 12 or 24"));
                locale_clock()
            }),
            None => locale_clock(),
        };

        LoadedConfig {
            config: Self {
                server_url,
                assistant_name,
                request_timeout,
                log_level,
                clock,
            },
            issues,
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.server_url, path.trim_start_matches('/'))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn process_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

#[cfg(target_arch = "wasm32")]
fn process_var(_key: &str) -> Option<String> {
    None
}

/// Parses `KEY=VALUE` lines, skipping blanks and `#` comments.
pub fn parse_env_file(contents: &str) -> HashMap<String, String> {
    let mut values = HashMap::new();
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            values.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    values
}

fn parse_timeout(raw: &str) -> Result<Option<Duration>> {
    let secs: u64 = raw
        .trim()
        .parse()
        .with_context(|| format!("`{raw}` is not a whole number of seconds"))?;
    Ok((secs > 0).then(|| Duration::from_secs(secs)))
}

fn parse_level(raw: &str) -> Result<Level> {
    raw.trim()
        .parse::<Level>()
        .map_err(|err| anyhow!("`{raw}` is not a log level: {err}"))
}
