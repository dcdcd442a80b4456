//! Configuration and link check command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use docfront_static::{BuildConfig, StaticBuilder};

/// Run the check command.
pub async fn run(config: &Path) -> Result<()> {
    let site = super::load_site(config)?;
    tracing::info!(
        "Site {:?} at {}",
        site.config().identity.title,
        site.config().canonical_url()
    );

    let builder = StaticBuilder::new(
        &site,
        BuildConfig {
            output_dir: PathBuf::new(),
            ..Default::default()
        },
    );
    let report = builder.check()?;

    if report.warnings > 0 || !report.broken_links.is_empty() {
        tracing::warn!(
            "{} feature card(s), {} warning(s), {} broken link(s)",
            report.features,
            report.warnings,
            report.broken_links.len()
        );
    } else {
        tracing::info!("{} feature card(s), no problems found", report.features);
    }

    Ok(())
}
