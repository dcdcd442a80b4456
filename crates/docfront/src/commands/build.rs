//! Static site build command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use docfront_static::{BuildConfig, StaticBuilder};

/// Run the build command.
pub async fn run(config: &Path, output: PathBuf, minify: bool) -> Result<()> {
    tracing::info!("Building site front...");

    let site = super::load_site(config)?;

    let output_dir = super::resolve_from_site(config, output);

    let result = StaticBuilder::new(&site, BuildConfig { output_dir, minify }).build()?;

    tracing::info!(
        "Built {} page(s) with {} feature card(s) and {} static file(s) in {}ms",
        result.pages,
        result.features,
        result.static_files,
        result.duration_ms
    );

    if result.warnings > 0 {
        tracing::warn!("{} warning(s), see above", result.warnings);
    }

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
