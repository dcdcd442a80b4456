//! CLI subcommands.

pub mod build;
pub mod check;
pub mod init;
pub mod serve;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use docfront_config::Site;

/// Load and validate the site, turning configuration errors into a fatal error.
pub fn load_site(config: &Path) -> Result<Site> {
    Site::load(config).with_context(|| format!("Invalid site configuration in {}", config.display()))
}

/// Directory holding the config file. Paths in `site.toml` are relative to it.
pub fn site_root(config: &Path) -> &Path {
    config
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
}

/// Resolve a command line path the same way as paths in `site.toml`.
pub fn resolve_from_site(config: &Path, path: PathBuf) -> PathBuf {
    if path.is_relative() {
        site_root(config).join(path)
    } else {
        path
    }
}
