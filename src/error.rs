//! Error types for lazycommit modules using thiserror.

use thiserror::Error;

/// Errors from repository snapshot and commit operations.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Failed to open repository: {0}")]
    OpenRepository(#[source] git2::Error),

    #[error("No staged changes to commit. Stage files with 'git add' first.")]
    NothingStaged,

    #[error("Failed to read the git index: {0}")]
    IndexFailed(#[source] git2::Error),

    #[error("Failed to create commit: {0}")]
    CommitFailed(#[source] git2::Error),

    #[error("Git config error (missing user.name or user.email): {0}")]
    ConfigError(#[source] git2::Error),
}

/// Errors from configuration loading and persistence.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFailed(#[source] std::io::Error),

    #[error("Failed to write config file: {0}")]
    WriteFailed(#[source] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseFailed(#[source] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeFailed(#[source] toml::ser::Error),

    #[error("Invalid config value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Could not determine a config directory for this platform")]
    NoConfigDir,
}

/// Errors from the message-enhancement backends.
///
/// These never reach the user as failures: the enhancement entry point maps
/// every variant to "no enhancement" and keeps the rule-generated message.
#[derive(Error, Debug)]
pub enum EnhanceError {
    #[error("Provider '{0}' is not configured (missing API key or endpoint)")]
    NotConfigured(&'static str),

    #[error("HTTP request failed: {0}")]
    RequestFailed(#[source] reqwest::Error),

    #[error("Provider returned HTTP {status}: {body}")]
    BadStatus { status: u16, body: String },

    #[error("Provider response had an unexpected shape: {0}")]
    MalformedResponse(String),

    #[error("Provider timed out after {0} seconds")]
    Timeout(u64),
}
