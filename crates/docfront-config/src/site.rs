//! The site configuration record.

use serde::{Deserialize, Serialize};

use crate::theme::ThemeConfig;

/// Fully parsed `site.toml`.
///
/// Obtained through [`crate::Site::load`], which validates it first; a
/// `SiteConfig` reachable from a `Site` always satisfies the documented
/// invariants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(flatten)]
    pub identity: Identity,

    #[serde(flatten)]
    pub deployment: Deployment,

    #[serde(flatten)]
    pub links: LinkPolicy,

    #[serde(default)]
    pub i18n: I18n,

    /// Content presets, applied in order
    #[serde(default)]
    pub presets: Vec<Preset>,

    #[serde(default)]
    pub theme: ThemeConfig,

    /// Homepage feature cards; the built-in list is used when empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<FeatureEntry>,
}

impl SiteConfig {
    /// Site url joined with the base path, e.g. `https://example.com/docs/`.
    pub fn canonical_url(&self) -> String {
        format!(
            "{}{}",
            self.deployment.url.trim_end_matches('/'),
            self.deployment.base_url
        )
    }

    /// Join a site-relative path onto the base url. Paths that already
    /// carry the base url are returned as they are.
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with(self.deployment.base_url.as_str()) {
            return path.to_string();
        }
        format!(
            "{}{}",
            self.deployment.base_url,
            path.trim_start_matches('/')
        )
    }

    /// First preset carrying a docs section.
    pub fn docs(&self) -> Option<&DocsPreset> {
        self.presets.iter().find_map(|p| p.docs.as_ref())
    }

    /// Custom stylesheets from every preset, in preset order.
    pub fn custom_css(&self) -> impl Iterator<Item = &str> {
        self.presets
            .iter()
            .filter_map(|p| p.theme.as_ref())
            .flat_map(|t| t.custom_css.iter().map(String::as_str))
    }

    /// Value for the `lang` attribute of generated pages.
    pub fn html_lang(&self) -> &str {
        &self.i18n.default_locale
    }
}

/// What the site is called and how it presents itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub tagline: String,

    /// Favicon, relative to the static directory
    #[serde(default = "default_favicon")]
    pub favicon: String,
}

fn default_favicon() -> String {
    "img/favicon.ico".to_string()
}

/// Where the site is deployed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deployment {
    /// Production origin, without a path
    #[serde(default)]
    pub url: String,

    /// Path the site is served under
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Organization or user owning the repository
    #[serde(default)]
    pub organization: Option<String>,

    /// Repository name
    #[serde(default)]
    pub project: Option<String>,
}

fn default_base_url() -> String {
    "/".to_string()
}

/// What to do when a link target does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrokenLinkPolicy {
    /// Fail the build
    #[default]
    Throw,
    /// Log a warning and keep going
    Warn,
    /// Say nothing
    Ignore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkPolicy {
    #[serde(default)]
    pub on_broken_links: BrokenLinkPolicy,

    #[serde(default = "warn")]
    pub on_broken_markdown_links: BrokenLinkPolicy,
}

fn warn() -> BrokenLinkPolicy {
    BrokenLinkPolicy::Warn
}

/// Internationalization defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct I18n {
    pub default_locale: String,
    pub locales: Vec<String>,
}

impl Default for I18n {
    fn default() -> Self {
        Self {
            default_locale: "en".to_string(),
            locales: vec!["en".to_string()],
        }
    }
}

/// A named bundle of docs, blog and theme settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    #[serde(default = "default_preset_name")]
    pub name: String,

    #[serde(default)]
    pub docs: Option<DocsPreset>,

    #[serde(default)]
    pub blog: Option<BlogPreset>,

    #[serde(default)]
    pub theme: Option<ThemePreset>,
}

fn default_preset_name() -> String {
    "classic".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocsPreset {
    /// Docs source directory, relative to the site root
    #[serde(default = "default_docs_path")]
    pub path: String,

    /// URL segment docs are served under
    #[serde(default = "default_docs_path")]
    pub route_base_path: String,

    /// Sidebar definition file, relative to the site root
    #[serde(default)]
    pub sidebar_path: Option<String>,

    /// Base url for "edit this page" links
    #[serde(default)]
    pub edit_url: Option<String>,
}

fn default_docs_path() -> String {
    "docs".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPreset {
    #[serde(default = "default_blog_path")]
    pub path: String,

    #[serde(default)]
    pub show_reading_time: bool,

    #[serde(default)]
    pub edit_url: Option<String>,
}

fn default_blog_path() -> String {
    "blog".to_string()
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ThemePreset {
    /// Stylesheets, relative to the site root
    #[serde(default, deserialize_with = "one_or_many")]
    pub custom_css: Vec<String>,
}

/// Accept either `custom_css = "a.css"` or `custom_css = ["a.css", "b.css"]`.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(s) => vec![s],
        OneOrMany::Many(v) => v,
    })
}

/// A homepage feature card as written in `site.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureEntry {
    pub title: String,

    /// Image path, relative to the static directory
    pub image: String,

    /// Markdown fragment
    #[serde(default)]
    pub description: String,
}
