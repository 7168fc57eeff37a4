//! Configuration loading from flat `key = value` files.
//!
//! The format is deliberately minimal: one pair per line, split on the first
//! `=`, whitespace trimmed from both key and value, later occurrences of a
//! key overwriting earlier ones. Lines without a `=` are skipped. There is no
//! comment, quoting, or escape syntax; everything after the first `=`
//! (including further `=` characters) belongs to the value.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Config key for the Mattermost server base URL.
pub const KEY_SERVER: &str = "mattermost.server";

/// Config key for the login name.
pub const KEY_USERNAME: &str = "mattermost.username";

/// Config key for the login password.
pub const KEY_PASSWORD: &str = "mattermost.password";

/// Config key for the incoming-webhook URL.
pub const KEY_WEBHOOK_URL: &str = "mattermost.webhook_url";

/// Characters stripped from both ends of keys and values.
const TRIM_SET: [char; 4] = [' ', '\t', '\r', '\n'];

/// Errors from loading a config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be opened or read.
    #[error("could not read config file {}: {source}", .path.display())]
    Read {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A required key never appeared in the file.
    #[error("config missing '{0}'")]
    MissingKey(&'static str),
}

/// Settings for the session-login variant.
///
/// Keys absent from the file stay empty rather than failing the load; an
/// empty credential is sent as-is and rejected by the server.
#[derive(Clone, Default)]
pub struct Config {
    /// Base URL of the Mattermost server, e.g. `https://chat.example.com`.
    pub server: String,
    /// Login name passed to `/api/v4/users/login`.
    pub username: String,
    /// Password passed to `/api/v4/users/login`.
    pub password: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("server", &self.server)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Config {
    /// Load session-login settings from a `key = value` file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read. Missing
    /// keys are not an error here.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        for (key, value) in read_pairs(path)? {
            match key.as_str() {
                KEY_SERVER => config.server = value,
                KEY_USERNAME => config.username = value,
                KEY_PASSWORD => config.password = value,
                _ => {}
            }
        }
        Ok(config)
    }
}

/// Settings for the webhook variant.
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    /// Pre-authorized incoming-webhook URL.
    pub webhook_url: String,
}

impl WebhookConfig {
    /// Load the webhook URL from a `key = value` file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read, and
    /// [`ConfigError::MissingKey`] when `mattermost.webhook_url` never
    /// appears in it.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut webhook_url = None;
        for (key, value) in read_pairs(path)? {
            if key == KEY_WEBHOOK_URL {
                webhook_url = Some(value);
            }
        }
        webhook_url
            .map(|webhook_url| Self { webhook_url })
            .ok_or(ConfigError::MissingKey(KEY_WEBHOOK_URL))
    }
}

/// Read a file and return its `key = value` pairs in order of appearance.
fn read_pairs(path: &Path) -> Result<Vec<(String, String)>, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_pairs(&contents))
}

/// Split lines on the first `=`, trimming whitespace from keys and values.
///
/// Lines without a `=` are skipped.
fn parse_pairs(contents: &str) -> Vec<(String, String)> {
    contents
        .lines()
        .filter_map(|line| {
            let (key, value) = line.split_once('=')?;
            Some((
                key.trim_matches(TRIM_SET).to_owned(),
                value.trim_matches(TRIM_SET).to_owned(),
            ))
        })
        .collect()
}
