//! Loading and validating a site.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use crate::error::ConfigError;
use crate::sidebar::Sidebars;
use crate::site::SiteConfig;
use crate::theme::{NavItem, YEAR_PLACEHOLDER};

/// Directory, relative to the site root, that image and favicon paths resolve against.
const STATIC_DIR: &str = "static";

/// A validated site: its configuration plus where it lives on disk.
///
/// There are no setters. Load it once and pass it around by reference.
#[derive(Debug, Clone)]
pub struct Site {
    root: PathBuf,
    config: SiteConfig,
    sidebars: Sidebars,
}

impl Site {
    /// Load `site.toml` (or whatever `config_path` names). The site root is
    /// the directory containing the file.
    pub fn load(config_path: &Path) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
            path: config_path.to_path_buf(),
            source,
        })?;

        let root = config_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));

        let site = Self::from_toml_str(&source, root)?;
        tracing::info!("Loaded site config from {}", config_path.display());
        Ok(site)
    }

    /// Parse and validate configuration source for a site rooted at `root`.
    pub fn from_toml_str(source: &str, root: &Path) -> Result<Self, ConfigError> {
        let config: SiteConfig = toml::from_str(source)?;
        Self::from_config(config, root)
    }

    /// Validate an already parsed configuration.
    pub fn from_config(config: SiteConfig, root: &Path) -> Result<Self, ConfigError> {
        validate_identity(&config)?;
        validate_deployment(&config)?;
        validate_i18n(&config)?;

        if !config.theme.footer.copyright.contains(YEAR_PLACEHOLDER) {
            return Err(ConfigError::MissingYearPlaceholder(
                config.theme.footer.copyright.clone(),
            ));
        }

        let site = Self {
            root: root.to_path_buf(),
            sidebars: Sidebars::default(),
            config,
        };
        site.validate_assets()?;

        let sidebars = site.load_sidebars()?;
        validate_nav_sidebars(&site.config, &sidebars)?;

        Ok(Self { sidebars, ..site })
    }

    /// The configuration record.
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn sidebars(&self) -> &Sidebars {
        &self.sidebars
    }

    /// Directory holding images, the favicon and other files copied verbatim.
    pub fn static_dir(&self) -> PathBuf {
        self.root.join(STATIC_DIR)
    }

    /// Resolve a static asset path such as `/img/logo.png` to a file on disk.
    pub fn static_path(&self, path: &str) -> PathBuf {
        self.static_dir().join(path.trim_start_matches('/'))
    }

    /// Resolve a path relative to the site root.
    pub fn root_path(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }

    /// Docs source directory of the first docs preset.
    pub fn docs_dir(&self) -> Option<PathBuf> {
        self.config.docs().map(|docs| self.root_path(&docs.path))
    }

    /// Site-relative URL of a navbar item's target.
    pub fn nav_href(&self, item: &NavItem) -> String {
        match item {
            NavItem::External { href, .. } => href.clone(),
            NavItem::Sidebar { sidebar_id, .. } => {
                let route = self
                    .config
                    .docs()
                    .map(|d| d.route_base_path.as_str())
                    .unwrap_or("docs");
                // validation guarantees the sidebar exists and holds a doc
                let doc = self.sidebars.first_doc(sidebar_id).unwrap_or_default();
                self.config.url_for(&format!("{}/{}", route.trim_matches('/'), doc))
            }
        }
    }

    fn validate_assets(&self) -> Result<(), ConfigError> {
        let identity = &self.config.identity;
        require_file("Favicon", self.static_path(&identity.favicon))?;

        if let Some(logo) = &self.config.theme.navbar.logo {
            require_file("Navbar logo", self.static_path(&logo.src))?;
        }

        for css in self.config.custom_css() {
            require_file("Stylesheet", self.root_path(css))?;
        }

        if let Some(image) = &self.config.theme.image {
            let path = self.static_path(image);
            if !path.is_file() {
                tracing::warn!("Social card image not found: {}", path.display());
            }
        }

        Ok(())
    }

    fn load_sidebars(&self) -> Result<Sidebars, ConfigError> {
        let mut sidebars = Sidebars::default();

        for docs in self.config.presets.iter().filter_map(|p| p.docs.as_ref()) {
            if let Some(sidebar_path) = &docs.sidebar_path {
                let path = self.root_path(sidebar_path);
                require_file("Sidebar file", path.clone())?;
                sidebars.merge(Sidebars::load(&path)?);
                tracing::debug!("Loaded sidebars from {}", path.display());
            }
        }

        Ok(sidebars)
    }
}

fn require_file(kind: &'static str, path: PathBuf) -> Result<(), ConfigError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(ConfigError::MissingAsset { kind, path })
    }
}

fn validate_identity(config: &SiteConfig) -> Result<(), ConfigError> {
    if config.identity.title.trim().is_empty() {
        return Err(ConfigError::MissingField("title"));
    }
    if config.deployment.url.trim().is_empty() {
        return Err(ConfigError::MissingField("url"));
    }
    Ok(())
}

fn validate_deployment(config: &SiteConfig) -> Result<(), ConfigError> {
    let deployment = &config.deployment;
    let invalid = |reason: &str| ConfigError::InvalidUrl {
        url: deployment.url.clone(),
        reason: reason.to_string(),
    };

    let parsed = url::Url::parse(&deployment.url).map_err(|e| invalid(&e.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if parsed.host_str().is_none() {
        return Err(invalid("missing host"));
    }
    if parsed.path() != "/" || parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(invalid("must not carry a path; put it in base_url"));
    }

    let base = &deployment.base_url;
    if !base.starts_with('/') || !base.ends_with('/') || base.contains("//") {
        return Err(ConfigError::InvalidBaseUrl(base.clone()));
    }

    let canonical = config.canonical_url();
    url::Url::parse(&canonical).map_err(|e| ConfigError::InvalidUrl {
        url: canonical.clone(),
        reason: e.to_string(),
    })?;

    Ok(())
}

fn locale_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[a-z]{2,3}(-[A-Za-z0-9]{2,8})*$").expect("locale pattern is valid")
    })
}

fn validate_i18n(config: &SiteConfig) -> Result<(), ConfigError> {
    let i18n = &config.i18n;
    let mut seen = HashSet::new();

    for locale in &i18n.locales {
        if !locale_pattern().is_match(locale) {
            return Err(ConfigError::InvalidLocale(locale.clone()));
        }
        if !seen.insert(locale.as_str()) {
            return Err(ConfigError::DuplicateLocale(locale.clone()));
        }
    }

    if !seen.contains(i18n.default_locale.as_str()) {
        return Err(ConfigError::DefaultLocaleNotSupported {
            default: i18n.default_locale.clone(),
            locales: i18n.locales.clone(),
        });
    }

    Ok(())
}

fn validate_nav_sidebars(config: &SiteConfig, sidebars: &Sidebars) -> Result<(), ConfigError> {
    for item in &config.theme.navbar.items {
        if let NavItem::Sidebar { sidebar_id, .. } = item {
            if !sidebars.contains(sidebar_id) {
                return Err(ConfigError::UnknownSidebar(sidebar_id.clone()));
            }
            if sidebars.first_doc(sidebar_id).is_none() {
                return Err(ConfigError::EmptySidebar(sidebar_id.clone()));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::{tempdir, TempDir};

    const CONFIG: &str = r#"
title = "PowerShellAI"
tagline = "AI will not replace you, a person using AI will"
favicon = "img/favicon.ico"
url = "https://powershellai.com"
base_url = "/"
organization = "dfinke"
project = "PowerShellAI"

[i18n]
default_locale = "en"
locales = ["en"]

[[presets]]
name = "classic"

[presets.docs]
sidebar_path = "sidebars.yaml"

[presets.theme]
custom_css = "src/css/custom.css"

[theme.navbar]
title = "PowerShellAI"
logo = { alt = "My Site Logo", src = "img/icon.png" }
items = [
    { type = "sidebar", sidebar_id = "tutorialSidebar", label = "Documentation" },
    { type = "external", href = "https://github.com/ShaunLawrie/PowerShellAI", label = "GitHub", position = "right" },
]

[theme.footer]
copyright = "Copyright © {year} dfinke/PowerShellAI"
"#;

    fn site_dir() -> TempDir {
        let temp = tempdir().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("static/img")).unwrap();
        fs::create_dir_all(root.join("src/css")).unwrap();
        fs::write(root.join("static/img/favicon.ico"), b"ico").unwrap();
        fs::write(root.join("static/img/icon.png"), b"png").unwrap();
        fs::write(root.join("src/css/custom.css"), ":root {}").unwrap();
        fs::write(root.join("sidebars.yaml"), "tutorialSidebar:\n  - intro\n").unwrap();
        fs::write(root.join("site.toml"), CONFIG).unwrap();
        temp
    }

    #[test]
    fn loads_valid_site() {
        let temp = site_dir();

        let site = Site::load(&temp.path().join("site.toml")).unwrap();

        assert_eq!(site.config().identity.title, "PowerShellAI");
        assert_eq!(site.config().canonical_url(), "https://powershellai.com/");
        assert_eq!(site.root(), temp.path());
        assert_eq!(site.nav_href(&site.config().theme.navbar.items[0]), "/docs/intro");
        assert_eq!(
            site.nav_href(&site.config().theme.navbar.items[1]),
            "https://github.com/ShaunLawrie/PowerShellAI"
        );
    }

    #[test]
    fn rejects_default_locale_outside_locales() {
        let temp = site_dir();
        let source = CONFIG.replace(r#"default_locale = "en""#, r#"default_locale = "fr""#);

        let result = Site::from_toml_str(&source, temp.path());

        assert!(matches!(
            result,
            Err(ConfigError::DefaultLocaleNotSupported { ref default, .. }) if default == "fr"
        ));
    }

    #[test]
    fn rejects_duplicate_and_malformed_locales() {
        let temp = site_dir();

        let duplicate = CONFIG.replace(r#"locales = ["en"]"#, r#"locales = ["en", "en"]"#);
        assert!(matches!(
            Site::from_toml_str(&duplicate, temp.path()),
            Err(ConfigError::DuplicateLocale(_))
        ));

        let malformed = CONFIG.replace(r#"locales = ["en"]"#, r#"locales = ["en", "English"]"#);
        assert!(matches!(
            Site::from_toml_str(&malformed, temp.path()),
            Err(ConfigError::InvalidLocale(_))
        ));

        let regional = CONFIG.replace(r#"locales = ["en"]"#, r#"locales = ["en", "zh-Hans"]"#);
        assert!(Site::from_toml_str(&regional, temp.path()).is_ok());
    }

    #[test]
    fn rejects_empty_title_and_url() {
        let temp = site_dir();

        let no_title = CONFIG.replace(r#"title = "PowerShellAI""#, r#"title = """#);
        assert!(matches!(
            Site::from_toml_str(&no_title, temp.path()),
            Err(ConfigError::MissingField("title"))
        ));

        let no_url = CONFIG.replace(r#"url = "https://powershellai.com""#, r#"url = """#);
        assert!(matches!(
            Site::from_toml_str(&no_url, temp.path()),
            Err(ConfigError::MissingField("url"))
        ));
    }

    #[test]
    fn rejects_malformed_urls() {
        let temp = site_dir();

        let relative = CONFIG.replace("https://powershellai.com", "powershellai.com");
        assert!(matches!(
            Site::from_toml_str(&relative, temp.path()),
            Err(ConfigError::InvalidUrl { .. })
        ));

        let with_path = CONFIG.replace("https://powershellai.com", "https://powershellai.com/docs");
        assert!(matches!(
            Site::from_toml_str(&with_path, temp.path()),
            Err(ConfigError::InvalidUrl { .. })
        ));

        let bad_base = CONFIG.replace(r#"base_url = "/""#, r#"base_url = "docs""#);
        assert!(matches!(
            Site::from_toml_str(&bad_base, temp.path()),
            Err(ConfigError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn rejects_missing_favicon() {
        let temp = site_dir();
        fs::remove_file(temp.path().join("static/img/favicon.ico")).unwrap();

        let result = Site::load(&temp.path().join("site.toml"));

        assert!(matches!(
            result,
            Err(ConfigError::MissingAsset { kind: "Favicon", .. })
        ));
    }

    #[test]
    fn rejects_missing_stylesheet() {
        let temp = site_dir();
        fs::remove_file(temp.path().join("src/css/custom.css")).unwrap();

        let result = Site::load(&temp.path().join("site.toml"));

        assert!(matches!(
            result,
            Err(ConfigError::MissingAsset { kind: "Stylesheet", .. })
        ));
    }

    #[test]
    fn rejects_unknown_sidebar() {
        let temp = site_dir();
        fs::write(temp.path().join("sidebars.yaml"), "otherSidebar:\n  - intro\n").unwrap();

        let result = Site::load(&temp.path().join("site.toml"));

        assert!(matches!(result, Err(ConfigError::UnknownSidebar(ref id)) if id == "tutorialSidebar"));
    }

    #[test]
    fn rejects_copyright_without_year() {
        let temp = site_dir();
        let source = CONFIG.replace("{year}", "2023");

        let result = Site::from_toml_str(&source, temp.path());

        assert!(matches!(result, Err(ConfigError::MissingYearPlaceholder(_))));
    }

    #[test]
    fn reports_unreadable_config() {
        let temp = tempdir().unwrap();

        let result = Site::load(&temp.path().join("site.toml"));

        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
