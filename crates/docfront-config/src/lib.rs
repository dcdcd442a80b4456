//! Site configuration for docfront.
//!
//! Loads `site.toml`, validates it against the files on disk and exposes the
//! result as an immutable [`Site`]. Nothing here is mutable after loading.

pub mod error;
pub mod sidebar;
pub mod site;
pub mod theme;

mod loader;

pub use error::ConfigError;
pub use loader::Site;
pub use sidebar::{SidebarEntry, SidebarItem, Sidebars};
pub use site::{
    BlogPreset, BrokenLinkPolicy, Deployment, DocsPreset, FeatureEntry, I18n, Identity,
    LinkPolicy, Preset, SiteConfig, ThemePreset,
};
pub use theme::{
    CodeTheme, Footer, FooterLink, FooterLinkGroup, LinkTarget, Logo, NavBar, NavItem,
    NavPosition, Style, ThemeConfig, YEAR_PLACEHOLDER,
};
