use std::path::Path;

use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Underlying file I/O failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML syntax or schema problem.
    #[error("{0}")]
    TomlParse(String),
}

impl ConfigError {
    /// Build a parse error with the offending path included.
    pub fn toml_parse(error: impl std::fmt::Display, path: Option<&Path>) -> Self {
        match path {
            Some(p) => {
                let clean_path = p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
                ConfigError::TomlParse(format!("Failed to parse TOML at {clean_path:?}: {error}"))
            }
            None => ConfigError::TomlParse(format!("Failed to parse TOML: {error}")),
        }
    }
}
