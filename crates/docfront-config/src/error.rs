//! Configuration errors.

use std::path::PathBuf;

/// Errors raised while loading or validating a site configuration.
///
/// All of these are fatal: a site with an invalid configuration is never built.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse site config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid site url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid base url {0:?}: must start and end with '/'")]
    InvalidBaseUrl(String),

    #[error("Default locale {default:?} is not one of the configured locales {locales:?}")]
    DefaultLocaleNotSupported {
        default: String,
        locales: Vec<String>,
    },

    #[error("Invalid locale tag: {0:?}")]
    InvalidLocale(String),

    #[error("Locale listed more than once: {0:?}")]
    DuplicateLocale(String),

    #[error("{kind} not found: {path}")]
    MissingAsset { kind: &'static str, path: PathBuf },

    #[error("Invalid sidebar file {path}: {message}")]
    Sidebar { path: PathBuf, message: String },

    #[error("Navbar references unknown sidebar {0:?}")]
    UnknownSidebar(String),

    #[error("Sidebar {0:?} contains no documents")]
    EmptySidebar(String),

    #[error("Footer copyright has no {{year}} placeholder: {0:?}")]
    MissingYearPlaceholder(String),
}
