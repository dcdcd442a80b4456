//! Navbar, footer and code highlighting settings.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

/// Placeholder replaced with the current year in the footer copyright.
pub const YEAR_PLACEHOLDER: &str = "{year}";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Social card image, relative to the static directory
    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub navbar: NavBar,

    #[serde(default)]
    pub footer: Footer,

    #[serde(default)]
    pub prism: CodeTheme,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    #[default]
    Light,
    Dark,
}

impl Style {
    pub fn as_str(self) -> &'static str {
        match self {
            Style::Light => "light",
            Style::Dark => "dark",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NavBar {
    #[serde(default)]
    pub style: Style,

    /// Title next to the logo; the site title is used when empty
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub logo: Option<Logo>,

    #[serde(default)]
    pub items: Vec<NavItem>,
}

impl NavBar {
    /// Items on one side of the navbar, in declaration order.
    pub fn items_at(&self, position: NavPosition) -> impl Iterator<Item = &NavItem> {
        self.items
            .iter()
            .filter(move |item| item.position() == position)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Logo {
    #[serde(default)]
    pub alt: String,

    /// Image path, relative to the static directory
    pub src: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavPosition {
    #[default]
    Left,
    Right,
}

/// A navbar entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NavItem {
    /// Link to the first document of a sidebar
    Sidebar {
        sidebar_id: String,
        label: String,
        #[serde(default)]
        position: NavPosition,
    },

    /// Link to another site
    External {
        href: String,
        label: String,
        #[serde(default)]
        position: NavPosition,
    },
}

impl NavItem {
    pub fn label(&self) -> &str {
        match self {
            NavItem::Sidebar { label, .. } | NavItem::External { label, .. } => label,
        }
    }

    pub fn position(&self) -> NavPosition {
        match self {
            NavItem::Sidebar { position, .. } | NavItem::External { position, .. } => *position,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Footer {
    #[serde(default)]
    pub style: Style,

    #[serde(default)]
    pub links: Vec<FooterLinkGroup>,

    /// Copyright line containing [`YEAR_PLACEHOLDER`]
    #[serde(default = "default_copyright")]
    pub copyright: String,
}

fn default_copyright() -> String {
    format!("Copyright © {YEAR_PLACEHOLDER}")
}

impl Default for Footer {
    fn default() -> Self {
        Self {
            style: Style::default(),
            links: Vec::new(),
            copyright: default_copyright(),
        }
    }
}

impl Footer {
    /// Copyright line for a given year.
    pub fn copyright_for(&self, year: i32) -> String {
        self.copyright
            .replace(YEAR_PLACEHOLDER, &year.to_string())
    }

    /// Copyright line for the current local year.
    pub fn copyright_now(&self) -> String {
        self.copyright_for(chrono::Local::now().year())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FooterLinkGroup {
    pub title: String,

    #[serde(default)]
    pub items: Vec<FooterLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FooterLink {
    pub label: String,

    #[serde(flatten)]
    pub target: LinkTarget,
}

/// Where a footer link points. Written as `to = "/docs/intro"` for pages of
/// this site and `href = "https://..."` for anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LinkTarget {
    Internal { to: String },
    External { href: String },
}

impl LinkTarget {
    pub fn is_external(&self) -> bool {
        matches!(self, LinkTarget::External { .. })
    }
}

/// Syntax highlighting themes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeTheme {
    #[serde(default = "default_light_theme")]
    pub theme: String,

    #[serde(default = "default_dark_theme")]
    pub dark_theme: String,

    /// Languages loaded on top of the default set
    #[serde(default)]
    pub additional_languages: Vec<String>,
}

fn default_light_theme() -> String {
    "github".to_string()
}

fn default_dark_theme() -> String {
    "dracula".to_string()
}

impl Default for CodeTheme {
    fn default() -> Self {
        Self {
            theme: default_light_theme(),
            dark_theme: default_dark_theme(),
            additional_languages: Vec::new(),
        }
    }
}
