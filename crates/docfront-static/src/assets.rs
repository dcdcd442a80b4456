//! Asset resolution, stylesheet generation and static file copying.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// A referenced asset that could not be found. The page still renders, with
/// a placeholder where the asset would have been.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Asset not found: {path} (looked in {looked_in})")]
pub struct AssetResolutionWarning {
    /// Path as written in the configuration
    pub path: String,
    /// Where it was expected on disk
    pub looked_in: String,
}

/// Turns static asset paths into URLs, checking that they exist.
#[derive(Debug, Clone)]
pub struct AssetResolver {
    static_dir: Option<PathBuf>,
    base_url: String,
}

impl AssetResolver {
    /// Resolver backed by a static directory on disk.
    pub fn new(static_dir: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            static_dir: Some(static_dir.into()),
            base_url: base_url.into(),
        }
    }

    /// Resolver that trusts every path.
    pub fn unchecked(base_url: impl Into<String>) -> Self {
        Self {
            static_dir: None,
            base_url: base_url.into(),
        }
    }

    /// URL for a static asset. Absolute URLs pass through untouched.
    pub fn resolve(&self, path: &str) -> Result<String, AssetResolutionWarning> {
        if is_external(path) {
            return Ok(path.to_string());
        }

        let relative = path.trim_start_matches('/');
        if let Some(static_dir) = &self.static_dir {
            let file = static_dir.join(relative);
            if relative.is_empty() || !file.is_file() {
                return Err(AssetResolutionWarning {
                    path: path.to_string(),
                    looked_in: static_dir.display().to_string(),
                });
            }
        }

        Ok(format!("{}{}", self.base_url, relative))
    }

    /// Like [`resolve`](Self::resolve), but logs and returns `None` on failure.
    pub fn resolve_or_warn(&self, path: &str) -> Option<String> {
        match self.resolve(path) {
            Ok(url) => Some(url),
            Err(warning) => {
                tracing::warn!("{}", warning);
                None
            }
        }
    }
}

/// Whether a link or asset path points off-site.
pub fn is_external(path: &str) -> bool {
    path.starts_with("http://")
        || path.starts_with("https://")
        || path.starts_with("//")
        || path.starts_with("mailto:")
        || path.starts_with("data:")
}

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Generate the main CSS file.
    pub fn generate_css() -> String {
        DEFAULT_CSS.to_string()
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }

    /// Copy every file under `from` into `to`, keeping relative paths.
    /// Returns the number of files copied; a missing `from` copies nothing.
    pub fn copy_dir(from: &Path, to: &Path) -> std::io::Result<usize> {
        if !from.is_dir() {
            return Ok(0);
        }

        let mut copied = 0;
        for entry in WalkDir::new(from)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(from).unwrap_or(path);
            let target = to.join(relative);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &target)?;
            copied += 1;
        }

        Ok(copied)
    }
}

const DEFAULT_CSS: &str = r#"/* docfront homepage theme */

:root {
  --ifm-color-primary: #2e8555;
  --ifm-navbar-height: 3.75rem;
  --ifm-container-width: 1140px;
  --ifm-spacing-horizontal: 1rem;
  --ifm-font-family: system-ui, -apple-system, "Segoe UI", Roboto, sans-serif;
  --surface-light: #ffffff;
  --surface-dark: #242526;
  --text-light: #1c1e21;
  --text-dark: #e3e3e3;
}

* {
  box-sizing: border-box;
}

body {
  margin: 0;
  font-family: var(--ifm-font-family);
  color: var(--text-light);
  background: var(--surface-light);
  line-height: 1.6;
}

a {
  color: var(--ifm-color-primary);
}

/* Grid */
.container {
  max-width: var(--ifm-container-width);
  margin: 0 auto;
  padding: 0 var(--ifm-spacing-horizontal);
}

.row {
  display: flex;
  flex-wrap: wrap;
  margin: 0 calc(var(--ifm-spacing-horizontal) * -1);
}

.col {
  flex: 1 0;
  padding: 0 var(--ifm-spacing-horizontal);
}

.col--4 {
  flex: 0 0 33.333%;
  max-width: 33.333%;
}

.text--center {
  text-align: center;
}

.padding-horiz--md {
  padding-left: 1rem;
  padding-right: 1rem;
}

/* Navbar */
.navbar {
  display: flex;
  align-items: center;
  height: var(--ifm-navbar-height);
  padding: 0 1rem;
  box-shadow: 0 1px 2px rgba(0, 0, 0, 0.1);
}

.navbar--dark,
.footer--dark {
  background: var(--surface-dark);
  color: var(--text-dark);
}

.navbar--dark a,
.footer--dark a {
  color: var(--text-dark);
}

.navbar__brand {
  display: flex;
  align-items: center;
  gap: 0.5rem;
  margin-right: 1rem;
  font-weight: 700;
  text-decoration: none;
}

.navbar__logo {
  height: 2rem;
}

.navbar__items {
  display: flex;
  align-items: center;
  flex: 1;
  gap: 1rem;
}

.navbar__items--right {
  justify-content: flex-end;
}

.navbar__link {
  font-weight: 500;
  text-decoration: none;
}

/* Hero */
.hero {
  padding: 4rem 0;
  text-align: center;
  background: var(--ifm-color-primary);
  color: #ffffff;
}

.hero__title {
  font-size: 3rem;
  margin: 0;
}

.hero__subtitle {
  font-size: 1.5rem;
}

.button {
  display: inline-block;
  padding: 0.5rem 1.5rem;
  border-radius: 0.4rem;
  background: #ffffff;
  color: var(--text-light);
  font-weight: 700;
  text-decoration: none;
}

/* Features */
.features {
  display: flex;
  align-items: center;
  padding: 2rem 0;
  width: 100%;
}

.featureSvg {
  height: 200px;
  width: 200px;
}

.featureSvg--missing {
  display: inline-block;
  border: 2px dashed #8d949e;
  border-radius: 0.5rem;
}

@media (max-width: 996px) {
  .col--4 {
    flex: 0 0 100%;
    max-width: 100%;
  }
}

/* Footer */
.footer {
  padding: 2rem 1rem;
}

.footer__links {
  display: flex;
  flex-wrap: wrap;
  gap: 2rem;
  margin-bottom: 1rem;
}

.footer__title {
  font-weight: 700;
  margin-bottom: 0.5rem;
}

.footer__items {
  list-style: none;
  margin: 0;
  padding: 0;
}

.footer__copyright {
  text-align: center;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn generates_css() {
        let css = AssetPipeline::generate_css();
        assert!(css.contains(".features"));
        assert!(css.contains(".featureSvg"));
        assert!(css.contains(".navbar--dark"));
    }

    #[test]
    fn minifies_css() {
        let css = r#"
.button {
    background-color: blue;
    padding: 10px;
}
        "#;

        let minified = AssetPipeline::minify_css(css).unwrap();

        assert!(!minified.contains('\n'));
        assert!(minified.contains(".button"));
    }

    #[test]
    fn default_css_minifies() {
        assert!(AssetPipeline::minify_css(&AssetPipeline::generate_css()).is_ok());
    }

    #[test]
    fn resolves_existing_assets_under_base_url() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("img")).unwrap();
        fs::write(temp.path().join("img/terminal.png"), b"png").unwrap();

        let assets = AssetResolver::new(temp.path(), "/PowerShellAI/");

        assert_eq!(
            assets.resolve("/img/terminal.png").unwrap(),
            "/PowerShellAI/img/terminal.png"
        );
        assert_eq!(
            assets.resolve("img/terminal.png").unwrap(),
            "/PowerShellAI/img/terminal.png"
        );
    }

    #[test]
    fn reports_missing_assets() {
        let temp = tempdir().unwrap();
        let assets = AssetResolver::new(temp.path(), "/");

        let warning = assets.resolve("/img/missing.png").unwrap_err();

        assert_eq!(warning.path, "/img/missing.png");
        assert_eq!(assets.resolve_or_warn("/img/missing.png"), None);
        assert!(assets.resolve("").is_err());
    }

    #[test]
    fn external_urls_pass_through() {
        let assets = AssetResolver::new("/nonexistent", "/");

        assert_eq!(
            assets.resolve("https://example.com/a.png").unwrap(),
            "https://example.com/a.png"
        );
    }

    #[test]
    fn copies_directory_tree() {
        let temp = tempdir().unwrap();
        let from = temp.path().join("static");
        let to = temp.path().join("dist");
        fs::create_dir_all(from.join("img")).unwrap();
        fs::write(from.join("img/icon.png"), b"png").unwrap();
        fs::write(from.join("robots.txt"), "User-agent: *").unwrap();

        let copied = AssetPipeline::copy_dir(&from, &to).unwrap();

        assert_eq!(copied, 2);
        assert!(to.join("img/icon.png").is_file());
        assert!(to.join("robots.txt").is_file());
    }

    #[test]
    fn copying_missing_directory_is_a_no_op() {
        let temp = tempdir().unwrap();

        let copied = AssetPipeline::copy_dir(&temp.path().join("nope"), &temp.path().join("out")).unwrap();

        assert_eq!(copied, 0);
    }
}
