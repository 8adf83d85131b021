use std::fmt;
use std::panic::Location;
use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;

/// Part of the configuration a validation failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSection {
    /// Config directory and file resolution
    Paths,
    Server,
    Logging,
    WebSocket,
    RateLimit,
}

impl ConfigSection {
    /// Table name in `config.toml`
    pub fn key(self) -> &'static str {
        match self {
            Self::Paths => "paths",
            Self::Server => "server",
            Self::Logging => "logging",
            Self::WebSocket => "websocket",
            Self::RateLimit => "rate_limit",
        }
    }
}

impl fmt::Display for ConfigSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid [{section}] config: {message} {location}")]
    Invalid {
        section: ConfigSection,
        message: String,
        location: ErrorLocation,
    },

    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[track_caller]
    pub fn invalid(section: ConfigSection, message: impl Into<String>) -> Self {
        Self::Invalid {
            section,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn paths(message: impl Into<String>) -> Self {
        Self::invalid(ConfigSection::Paths, message)
    }

    #[track_caller]
    pub fn server(message: impl Into<String>) -> Self {
        Self::invalid(ConfigSection::Server, message)
    }

    #[track_caller]
    pub fn logging(message: impl Into<String>) -> Self {
        Self::invalid(ConfigSection::Logging, message)
    }

    #[track_caller]
    pub fn websocket(message: impl Into<String>) -> Self {
        Self::invalid(ConfigSection::WebSocket, message)
    }

    #[track_caller]
    pub fn rate_limit(message: impl Into<String>) -> Self {
        Self::invalid(ConfigSection::RateLimit, message)
    }

    /// Section a validation failure came from; `None` for read and parse errors
    pub fn section(&self) -> Option<ConfigSection> {
        match self {
            Self::Invalid { section, .. } => Some(*section),
            Self::Io { .. } | Self::Toml { .. } => None,
        }
    }
}

pub type ConfigErrorResult<T> = std::result::Result<T, ConfigError>;
