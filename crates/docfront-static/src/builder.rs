//! Homepage builder.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use docfront_config::{LinkTarget, NavItem, NavPosition, Site};

use crate::assets::{is_external, AssetPipeline, AssetResolver};
use crate::features::{FeatureShowcase, RenderedShowcase};
use crate::links::{apply_policy, BrokenLink, LinkChecker};
use crate::templates::{Context, Footer, Highlight, Link, LinkGroup, Logo, Navbar, TemplateEngine};

/// Configuration for building the site front.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Output directory
    pub output_dir: PathBuf,

    /// Minify CSS output
    pub minify: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("build"),
            minify: true,
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of pages generated
    pub pages: usize,

    /// Number of feature cards rendered
    pub features: usize,

    /// Number of static files copied
    pub static_files: usize,

    /// Non-fatal problems logged during the build
    pub warnings: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Outcome of [`StaticBuilder::check`].
#[derive(Debug)]
pub struct CheckReport {
    pub features: usize,
    pub warnings: usize,
    pub broken_links: Vec<BrokenLink>,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read {path}: {message}")]
    ReadError { path: String, message: String },

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),

    #[error("Failed to serialize site config: {0}")]
    SerializeError(String),

    #[error("Found {} broken link(s): {}", .0.len(), format_links(.0))]
    BrokenLinks(Vec<BrokenLink>),
}

fn format_links(links: &[BrokenLink]) -> String {
    links
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn write_error(path: &Path, e: std::io::Error) -> BuildError {
    BuildError::WriteError(format!("{}: {}", path.display(), e))
}

/// Builds the homepage of a site.
pub struct StaticBuilder<'a> {
    site: &'a Site,
    config: BuildConfig,
    templates: TemplateEngine,
    assets: AssetResolver,
    showcase: FeatureShowcase,
}

impl<'a> StaticBuilder<'a> {
    /// Create a new builder for a loaded site.
    pub fn new(site: &'a Site, config: BuildConfig) -> Self {
        let site_config = site.config();

        Self {
            site,
            config,
            templates: TemplateEngine::new(),
            assets: AssetResolver::new(site.static_dir(), &site_config.deployment.base_url),
            showcase: FeatureShowcase::from_entries(&site_config.features),
        }
    }

    /// Validate links and render everything in memory without writing.
    pub fn check(&self) -> Result<CheckReport, BuildError> {
        let (broken_links, link_warnings) = self.broken_links()?;
        let rendered = self.showcase.render(&self.assets);
        let (_, asset_warnings) = self.render_home(&rendered)?;

        Ok(CheckReport {
            features: rendered.cards,
            warnings: rendered.issues.len() + link_warnings + asset_warnings,
            broken_links,
        })
    }

    /// Build the site front into the output directory.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();
        let output_dir = &self.config.output_dir;

        let (_, link_warnings) = self.broken_links()?;

        fs::create_dir_all(output_dir).map_err(|e| write_error(output_dir, e))?;

        let rendered = self.showcase.render(&self.assets);
        for issue in &rendered.issues {
            tracing::debug!("Feature issue: {}", issue);
        }

        let (html, asset_warnings) = self.render_home(&rendered)?;
        let index = output_dir.join("index.html");
        fs::write(&index, html).map_err(|e| write_error(&index, e))?;

        let static_files = AssetPipeline::copy_dir(&self.site.static_dir(), output_dir)
            .map_err(|e| write_error(output_dir, e))?;

        self.generate_assets()?;
        self.write_resolved_config()?;

        let duration = start.elapsed();

        Ok(BuildResult {
            pages: 1,
            features: rendered.cards,
            static_files,
            warnings: rendered.issues.len() + link_warnings + asset_warnings,
            duration_ms: duration.as_millis() as u64,
            output_dir: output_dir.clone(),
        })
    }

    /// Run the link checks, applying the configured policies. Returns what
    /// was found when the policies allow the build to continue, along with
    /// the number of links warned about.
    fn broken_links(&self) -> Result<(Vec<BrokenLink>, usize), BuildError> {
        let checker = LinkChecker::new(self.site);
        let policy = self.site.config().links;

        let navigation = checker.check_navigation();
        let features = checker.check_features(self.showcase.features());

        let warned = apply_policy(policy.on_broken_links, navigation.clone())?
            + apply_policy(policy.on_broken_markdown_links, features.clone())?;

        Ok((navigation.into_iter().chain(features).collect(), warned))
    }

    /// Render the homepage around an already rendered showcase. Also returns
    /// the number of theme assets that could not be resolved.
    fn render_home(&self, rendered: &RenderedShowcase) -> Result<(String, usize), BuildError> {
        let (context, unresolved) = self.build_context(rendered.to_html());

        let html = self
            .templates
            .render_page("home.html", &context)
            .map_err(|e: minijinja::Error| BuildError::TemplateError(e.to_string()))?;

        Ok((html, unresolved))
    }

    fn build_context(&self, content: String) -> (Context, usize) {
        let config = self.site.config();
        let theme = &config.theme;

        let mut unresolved = 0;
        let mut resolve = |path: &str| {
            let url = self.assets.resolve_or_warn(path);
            if url.is_none() {
                unresolved += 1;
            }
            url
        };

        let logo = theme.navbar.logo.as_ref().and_then(|logo| {
            resolve(&logo.src).map(|src| Logo {
                alt: logo.alt.clone(),
                src,
            })
        });
        let favicon = resolve(&config.identity.favicon);
        let image = theme
            .image
            .as_deref()
            .and_then(&mut resolve)
            .map(|path| absolute(&config.deployment.url, &path));

        let nav_links = |position: NavPosition| -> Vec<Link> {
            theme
                .navbar
                .items_at(position)
                .map(|item| Link {
                    label: item.label().to_string(),
                    href: self.site.nav_href(item),
                    external: matches!(item, NavItem::External { .. }),
                })
                .collect()
        };

        let navbar = Navbar {
            style: theme.navbar.style.as_str().to_string(),
            title: if theme.navbar.title.is_empty() {
                config.identity.title.clone()
            } else {
                theme.navbar.title.clone()
            },
            logo,
            left: nav_links(NavPosition::Left),
            right: nav_links(NavPosition::Right),
        };

        let footer = Footer {
            style: theme.footer.style.as_str().to_string(),
            groups: theme
                .footer
                .links
                .iter()
                .map(|group| LinkGroup {
                    title: group.title.clone(),
                    links: group
                        .items
                        .iter()
                        .map(|link| match &link.target {
                            LinkTarget::Internal { to } => Link {
                                label: link.label.clone(),
                                href: config.url_for(to),
                                external: false,
                            },
                            LinkTarget::External { href } => Link {
                                label: link.label.clone(),
                                href: href.clone(),
                                external: is_external(href),
                            },
                        })
                        .collect(),
                })
                .collect(),
            copyright: theme.footer.copyright_now(),
        };

        // the first docs sidebar link doubles as the hero button
        let cta = theme
            .navbar
            .items
            .iter()
            .find(|item| matches!(item, NavItem::Sidebar { .. }))
            .map(|item| Link {
                label: item.label().to_string(),
                href: self.site.nav_href(item),
                external: false,
            });

        let context = Context {
            lang: config.html_lang().to_string(),
            title: config.identity.title.clone(),
            site_title: config.identity.title.clone(),
            tagline: config.identity.tagline.clone(),
            canonical_url: config.canonical_url(),
            favicon,
            image,
            base_url: config.deployment.base_url.clone(),
            styles: self
                .stylesheets()
                .into_iter()
                .map(|(_, name)| config.url_for(&format!("assets/{}", name)))
                .collect(),
            navbar,
            footer,
            highlight: Highlight {
                theme: theme.prism.theme.clone(),
                dark_theme: theme.prism.dark_theme.clone(),
                languages: theme.prism.additional_languages.clone(),
            },
            cta,
            content,
        };

        (context, unresolved)
    }

    /// Custom stylesheets paired with their file names under `assets/`.
    /// Repeated sources are listed once. File names shared by different
    /// sources are prefixed with the stylesheet's position.
    fn stylesheets(&self) -> Vec<(&'a str, String)> {
        let mut sources: Vec<&'a str> = Vec::new();
        for css in self.site.config().custom_css() {
            if !sources.contains(&css) {
                sources.push(css);
            }
        }

        sources
            .iter()
            .enumerate()
            .map(|(index, source)| {
                let name = file_name(source);
                let shared = sources.iter().filter(|other| file_name(other) == name).count() > 1;
                let name = if shared {
                    format!("{}-{}", index, name)
                } else {
                    name.to_string()
                };
                (*source, name)
            })
            .collect()
    }

    /// Write the theme stylesheet and copy custom stylesheets.
    fn generate_assets(&self) -> Result<(), BuildError> {
        let assets_dir = self.config.output_dir.join("assets");
        fs::create_dir_all(&assets_dir).map_err(|e| write_error(&assets_dir, e))?;

        let css = AssetPipeline::generate_css();
        let css = self.minify(css);
        let main_css = assets_dir.join("main.css");
        fs::write(&main_css, css).map_err(|e| write_error(&main_css, e))?;

        for (style_path, name) in self.stylesheets() {
            let source_path = self.site.root_path(style_path);
            let content = fs::read_to_string(&source_path).map_err(|e| BuildError::ReadError {
                path: source_path.display().to_string(),
                message: e.to_string(),
            })?;

            let target = assets_dir.join(name);
            fs::write(&target, self.minify(content)).map_err(|e| write_error(&target, e))?;
            tracing::info!("Copied stylesheet from {}", style_path);
        }

        Ok(())
    }

    fn minify(&self, css: String) -> String {
        if !self.config.minify {
            return css;
        }
        match AssetPipeline::minify_css(&css) {
            Ok(minified) => minified,
            Err(e) => {
                tracing::warn!("Leaving stylesheet unminified: {}", e);
                css
            }
        }
    }

    /// Write the validated configuration next to the page for client scripts.
    fn write_resolved_config(&self) -> Result<(), BuildError> {
        let json = serde_json::to_string_pretty(self.site.config())
            .map_err(|e| BuildError::SerializeError(e.to_string()))?;

        let path = self.config.output_dir.join("site-config.json");
        fs::write(&path, json).map_err(|e| write_error(&path, e))
    }
}

fn file_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|f| f.to_str())
        .unwrap_or("custom.css")
}

/// Make a site-relative path absolute against the deployment origin.
fn absolute(origin: &str, path: &str) -> String {
    if is_external(path) {
        path.to_string()
    } else {
        format!("{}{}", origin.trim_end_matches('/'), path)
    }
}
