//! Sidebar definitions.
//!
//! A sidebar file maps sidebar ids to ordered item lists:
//!
//! ```yaml
//! tutorialSidebar:
//!   - intro
//!   - type: category
//!     label: Commands
//!     items:
//!       - commands/Add-ChatMessage
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// All sidebars known to a site, keyed by id.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sidebars(BTreeMap<String, Vec<SidebarItem>>);

/// One sidebar entry. A bare string is a doc id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SidebarItem {
    Doc(String),
    Entry(SidebarEntry),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SidebarEntry {
    Doc {
        id: String,
        #[serde(default)]
        label: Option<String>,
    },
    Category {
        label: String,
        #[serde(default)]
        items: Vec<SidebarItem>,
    },
    Link {
        label: String,
        href: String,
    },
}

impl SidebarItem {
    fn collect_docs<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            SidebarItem::Doc(id) | SidebarItem::Entry(SidebarEntry::Doc { id, .. }) => {
                out.push(id)
            }
            SidebarItem::Entry(SidebarEntry::Category { items, .. }) => {
                for item in items {
                    item.collect_docs(out);
                }
            }
            SidebarItem::Entry(SidebarEntry::Link { .. }) => {}
        }
    }
}

impl Sidebars {
    /// Parse a sidebar file from YAML source.
    pub fn from_yaml(source: &str) -> Result<Self, serde_yaml::Error> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(source)
    }

    /// Read and parse a sidebar file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_yaml(&content).map_err(|e| ConfigError::Sidebar {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Add the sidebars of another file. Later definitions replace earlier ones.
    pub fn merge(&mut self, other: Sidebars) {
        self.0.extend(other.0);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Doc ids of a sidebar in reading order.
    pub fn doc_ids(&self, id: &str) -> Vec<&str> {
        let mut out = Vec::new();
        if let Some(items) = self.0.get(id) {
            for item in items {
                item.collect_docs(&mut out);
            }
        }
        out
    }

    /// First document of a sidebar, which is where navbar links to it land.
    pub fn first_doc(&self, id: &str) -> Option<&str> {
        self.doc_ids(id).into_iter().next()
    }
}
