//! Client configuration.

use std::time::Duration;

use storechat_types::ChatError;

/// Path of the chat function under the backend base URL.
pub const DEFAULT_FUNCTION_PATH: &str = "/functions/v1/chat";

/// Base URL of a locally running backend.
pub const DEFAULT_BASE_URL: &str = "http://localhost:54321";

/// Environment variables holding the backend URL, in lookup order.
pub const BASE_URL_VARS: [&str; 2] = ["SUPABASE_URL", "VITE_SUPABASE_URL"];

/// Environment variables holding the publishable key, in lookup order.
pub const KEY_VARS: [&str; 2] = ["SUPABASE_PUBLISHABLE_KEY", "VITE_SUPABASE_PUBLISHABLE_KEY"];

/// Optional override of [`DEFAULT_FUNCTION_PATH`].
pub const FUNCTION_PATH_VAR: &str = "STORECHAT_FUNCTION_PATH";

/// Optional request timeout in whole seconds.
pub const TIMEOUT_VAR: &str = "STORECHAT_TIMEOUT_SECS";

/// Where and how to reach the chat function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// Backend base URL, e.g. `https://xyz.supabase.co`.
    pub base_url: String,
    /// Publishable (anon) key, sent as a bearer token.
    pub publishable_key: String,
    /// Path of the chat function, appended to `base_url`.
    pub function_path: String,
    /// Whole-request timeout, body included. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            publishable_key: String::new(),
            function_path: DEFAULT_FUNCTION_PATH.into(),
            timeout: None,
        }
    }
}

impl ChatConfig {
    /// Configuration for `base_url` with the default function path and no timeout.
    pub fn new(base_url: impl Into<String>, publishable_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            publishable_key: publishable_key.into(),
            ..Self::default()
        }
    }

    /// Read configuration from the process environment.
    ///
    /// See [`BASE_URL_VARS`], [`KEY_VARS`], [`FUNCTION_PATH_VAR`] and [`TIMEOUT_VAR`].
    pub fn from_env() -> Result<Self, ChatError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its value.
    ///
    /// Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ChatError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let first = |names: &[&str]| names.iter().find_map(|name| get(*name));

        let base_url = first(&BASE_URL_VARS[..]).ok_or_else(|| {
            ChatError::Config(format!("one of {} must be set", BASE_URL_VARS.join(", ")))
        })?;
        let publishable_key = first(&KEY_VARS[..]).ok_or_else(|| {
            ChatError::Config(format!("one of {} must be set", KEY_VARS.join(", ")))
        })?;
        let function_path = get(FUNCTION_PATH_VAR).unwrap_or_else(|| DEFAULT_FUNCTION_PATH.into());
        let timeout = get(TIMEOUT_VAR)
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|e| ChatError::Config(format!("{TIMEOUT_VAR}={raw:?}: {e}")))
            })
            .transpose()?;

        Ok(Self {
            base_url,
            publishable_key,
            function_path,
            timeout,
        })
    }

    /// Full URL of the chat function.
    pub fn endpoint(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if self.function_path.starts_with('/') {
            format!("{base}{}", self.function_path)
        } else {
            format!("{base}/{}", self.function_path)
        }
    }
}
