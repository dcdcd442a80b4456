//! Internal link checking.

use std::path::PathBuf;

use docfront_config::{BrokenLinkPolicy, LinkTarget, NavItem, Site};

use crate::assets::is_external;
use crate::builder::BuildError;
use crate::features::FeatureDescriptor;

/// Where a checked link was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkSource {
    Navbar,
    Footer,
    Feature,
}

impl std::fmt::Display for LinkSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            LinkSource::Navbar => "navbar",
            LinkSource::Footer => "footer",
            LinkSource::Feature => "feature description",
        })
    }
}

/// A link whose target does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokenLink {
    pub source: LinkSource,
    pub label: String,
    pub target: String,
}

impl std::fmt::Display for BrokenLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} link {:?} -> {}", self.source, self.label, self.target)
    }
}

/// Checks site-relative links against the docs and static directories.
pub struct LinkChecker<'a> {
    site: &'a Site,
    docs_dir: Option<PathBuf>,
    route_base: String,
}

impl<'a> LinkChecker<'a> {
    pub fn new(site: &'a Site) -> Self {
        let route_base = site
            .config()
            .docs()
            .map(|d| d.route_base_path.trim_matches('/').to_string())
            .unwrap_or_else(|| "docs".to_string());

        Self {
            site,
            docs_dir: site.docs_dir(),
            route_base,
        }
    }

    /// Whether a site-relative target resolves to a page or static file.
    pub fn resolves(&self, target: &str) -> bool {
        if is_external(target) || target.starts_with('#') {
            return true;
        }

        let path = target.split(['#', '?']).next().unwrap_or_default();
        let base = &self.site.config().deployment.base_url;
        let relative = path
            .strip_prefix(base.as_str())
            .or_else(|| path.strip_prefix('/'))
            .unwrap_or(path)
            .trim_end_matches('/');

        if relative.is_empty() {
            return true;
        }

        if self.route_base.is_empty() {
            // docs mounted at the site root share the namespace with static files
            if self.doc_exists(relative) {
                return true;
            }
        } else if let Some(doc_id) = relative
            .strip_prefix(self.route_base.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
        {
            return self.doc_exists(doc_id);
        }

        self.site.static_path(relative).is_file()
    }

    fn doc_exists(&self, doc_id: &str) -> bool {
        let Some(docs_dir) = &self.docs_dir else {
            return false;
        };

        ["md", "mdx"].iter().any(|ext| {
            docs_dir.join(format!("{doc_id}.{ext}")).is_file()
                || docs_dir.join(doc_id).join(format!("index.{ext}")).is_file()
        })
    }

    /// Broken navbar and footer links.
    pub fn check_navigation(&self) -> Vec<BrokenLink> {
        let theme = &self.site.config().theme;
        let mut broken = Vec::new();

        for item in &theme.navbar.items {
            if let NavItem::Sidebar { label, .. } = item {
                let target = self.site.nav_href(item);
                if !self.resolves(&target) {
                    broken.push(BrokenLink {
                        source: LinkSource::Navbar,
                        label: label.clone(),
                        target,
                    });
                }
            }
        }

        for link in theme.footer.links.iter().flat_map(|g| &g.items) {
            if let LinkTarget::Internal { to } = &link.target {
                if !self.resolves(to) {
                    broken.push(BrokenLink {
                        source: LinkSource::Footer,
                        label: link.label.clone(),
                        target: to.clone(),
                    });
                }
            }
        }

        broken
    }

    /// Broken links inside feature descriptions.
    pub fn check_features(&self, features: &[FeatureDescriptor]) -> Vec<BrokenLink> {
        let mut broken = Vec::new();

        for feature in features {
            for target in feature.description_links() {
                if !self.resolves(&target) {
                    broken.push(BrokenLink {
                        source: LinkSource::Feature,
                        label: feature.title.clone(),
                        target,
                    });
                }
            }
        }

        broken
    }
}

/// Act on broken links according to the configured policy. Returns the
/// number of warnings emitted.
pub fn apply_policy(policy: BrokenLinkPolicy, broken: Vec<BrokenLink>) -> Result<usize, BuildError> {
    if broken.is_empty() {
        return Ok(0);
    }

    match policy {
        BrokenLinkPolicy::Throw => Err(BuildError::BrokenLinks(broken)),
        BrokenLinkPolicy::Warn => {
            for link in &broken {
                tracing::warn!("Broken {}", link);
            }
            Ok(broken.len())
        }
        BrokenLinkPolicy::Ignore => Ok(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    const CONFIG: &str = r#"
title = "PowerShellAI"
url = "https://powershellai.com"

[[presets]]
docs = { sidebar_path = "sidebars.yaml" }

[theme.navbar]
items = [{ type = "sidebar", sidebar_id = "tutorialSidebar", label = "Documentation" }]

[[theme.footer.links]]
title = "Docs"
items = [
    { label = "Tutorial", to = "/docs/intro" },
    { label = "Command Reference", to = "/docs/commands/Add-ChatMessage" },
    { label = "Twitter", href = "https://twitter.com/dfinke" },
]
"#;

    fn site_dir() -> (TempDir, Site) {
        site_dir_with(CONFIG)
    }

    fn site_dir_with(config: &str) -> (TempDir, Site) {
        let temp = tempdir().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("static/img")).unwrap();
        fs::create_dir_all(root.join("docs/commands")).unwrap();
        fs::write(root.join("static/img/favicon.ico"), b"ico").unwrap();
        fs::write(root.join("sidebars.yaml"), "tutorialSidebar:\n  - intro\n").unwrap();
        fs::write(root.join("docs/intro.md"), "# Intro").unwrap();
        let site = Site::from_toml_str(config, root).unwrap();
        (temp, site)
    }

    #[test]
    fn reports_missing_footer_doc() {
        let (_temp, site) = site_dir();

        let broken = LinkChecker::new(&site).check_navigation();

        assert_eq!(
            broken,
            vec![BrokenLink {
                source: LinkSource::Footer,
                label: "Command Reference".to_string(),
                target: "/docs/commands/Add-ChatMessage".to_string(),
            }]
        );
    }

    #[test]
    fn resolves_mdx_docs_and_static_files() {
        let (temp, site) = site_dir();
        fs::write(temp.path().join("docs/commands/Add-ChatMessage.mdx"), "# Add").unwrap();
        let checker = LinkChecker::new(&site);

        assert!(checker.check_navigation().is_empty());
        assert!(checker.resolves("/img/favicon.ico"));
        assert!(checker.resolves("/"));
        assert!(checker.resolves("/docs/intro#setup"));
        assert!(!checker.resolves("/blog"));
    }

    #[test]
    fn checks_feature_description_links() {
        let (_temp, site) = site_dir();
        let features = vec![FeatureDescriptor::new(
            "Docs",
            "/img/a.png",
            "[ok](/docs/intro) [gone](/docs/missing) [ext](https://example.com)",
        )];

        let broken = LinkChecker::new(&site).check_features(&features);

        assert_eq!(broken.len(), 1);
        assert_eq!(broken[0].target, "/docs/missing");
        assert_eq!(broken[0].source, LinkSource::Feature);
    }

    #[test]
    fn policy_decides_outcome() {
        let broken = vec![BrokenLink {
            source: LinkSource::Footer,
            label: "Tutorial".to_string(),
            target: "/docs/intro".to_string(),
        }];

        assert!(matches!(
            apply_policy(BrokenLinkPolicy::Throw, broken.clone()),
            Err(BuildError::BrokenLinks(_))
        ));
        assert_eq!(apply_policy(BrokenLinkPolicy::Warn, broken.clone()).unwrap(), 1);
        assert_eq!(apply_policy(BrokenLinkPolicy::Ignore, broken).unwrap(), 0);
        assert_eq!(apply_policy(BrokenLinkPolicy::Throw, Vec::new()).unwrap(), 0);
    }

    #[test]
    fn docs_mounted_at_site_root_resolve() {
        let config = r#"
title = "PowerShellAI"
url = "https://powershellai.com"

[[presets]]
docs = { sidebar_path = "sidebars.yaml", route_base_path = "/" }

[theme.navbar]
items = [{ type = "sidebar", sidebar_id = "tutorialSidebar", label = "Docs" }]

[[theme.footer.links]]
title = "Docs"
items = [{ label = "Tutorial", to = "/intro" }]
"#;
        let (_temp, site) = site_dir_with(config);
        let checker = LinkChecker::new(&site);

        assert_eq!(site.nav_href(&site.config().theme.navbar.items[0]), "/intro");
        assert_eq!(checker.check_navigation(), Vec::new());
        assert!(checker.resolves("/img/favicon.ico"));
        assert!(!checker.resolves("/missing"));
    }
}
