//! Session Options
//!
//! Storage keys handed to the session container at construction.

use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ConfigError, ConfigResult};

pub const DEFAULT_SESSION_TOKEN_KEY: &str = "__openreplay_token";
pub const DEFAULT_SESSION_PAGENO_KEY: &str = "__openreplay_pageno";

/// Options for a session container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionOptions {
    /// Storage key of the persisted session token, removed on reset
    pub session_token_key: String,
    /// Storage key of the persisted page number
    pub session_pageno_key: String,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            session_token_key: DEFAULT_SESSION_TOKEN_KEY.to_string(),
            session_pageno_key: DEFAULT_SESSION_PAGENO_KEY.to_string(),
        }
    }
}

impl SessionOptions {
    /// Create options with explicit keys
    pub fn new(session_token_key: impl Into<String>, session_pageno_key: impl Into<String>) -> Self {
        Self {
            session_token_key: session_token_key.into(),
            session_pageno_key: session_pageno_key.into(),
        }
    }

    pub fn with_session_token_key(mut self, key: impl Into<String>) -> Self {
        self.session_token_key = key.into();
        self
    }

    pub fn with_session_pageno_key(mut self, key: impl Into<String>) -> Self {
        self.session_pageno_key = key.into();
        self
    }

    /// Parse options from TOML text; missing keys take their defaults
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let options: Self = toml::from_str(content)?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        debug!("Loading session options from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Reject keys no storage backend can address
    pub fn validate(&self) -> ConfigResult<()> {
        check_key("session_token_key", &self.session_token_key)?;
        check_key("session_pageno_key", &self.session_pageno_key)
    }
}

fn check_key(field: &'static str, key: &str) -> ConfigResult<()> {
    if key.trim().is_empty() {
        return Err(ConfigError::InvalidKey {
            field,
            reason: "key must not be empty".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_keys() {
        let options = SessionOptions::default();
        assert_eq!(options.session_token_key, "__openreplay_token");
        assert_eq!(options.session_pageno_key, "__openreplay_pageno");
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_from_toml_partial() {
        let options = SessionOptions::from_toml_str(r#"session_token_key = "my_token""#).unwrap();
        assert_eq!(options.session_token_key, "my_token");
        assert_eq!(options.session_pageno_key, DEFAULT_SESSION_PAGENO_KEY);
    }

    #[test]
    fn test_from_toml_rejects_empty_key() {
        let result = SessionOptions::from_toml_str(r#"session_pageno_key = "  ""#);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidKey { field: "session_pageno_key", .. })
        ));
    }

    #[test]
    fn test_from_toml_rejects_bad_syntax() {
        let result = SessionOptions::from_toml_str("session_token_key = ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "session_token_key = \"tok\"").unwrap();
        writeln!(file, "session_pageno_key = \"page\"").unwrap();

        let options = SessionOptions::from_file(file.path()).unwrap();
        assert_eq!(options, SessionOptions::new("tok", "page"));
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = SessionOptions::from_file(dir.path().join("missing.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_builder_setters() {
        let options = SessionOptions::default()
            .with_session_token_key("a")
            .with_session_pageno_key("b");
        assert_eq!(options, SessionOptions::new("a", "b"));
    }
}
