//! Homepage feature cards.

use docfront_config::FeatureEntry;
use pulldown_cmark::{html, Event, Options, Parser, Tag};

use crate::assets::{AssetResolutionWarning, AssetResolver};
use crate::dom::{Element, Node};

/// One feature card.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureDescriptor {
    pub title: String,
    /// Image path, relative to the static directory
    pub image: String,
    /// Markdown fragment shown under the title
    pub description: String,
}

impl FeatureDescriptor {
    pub fn new(
        title: impl Into<String>,
        image: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            image: image.into(),
            description: description.into(),
        }
    }

    /// Link destinations in the description, in order of appearance.
    pub fn description_links(&self) -> Vec<String> {
        Parser::new(&self.description)
            .filter_map(|event| match event {
                Event::Start(Tag::Link { dest_url, .. }) => Some(dest_url.to_string()),
                _ => None,
            })
            .collect()
    }
}

impl From<&FeatureEntry> for FeatureDescriptor {
    fn from(entry: &FeatureEntry) -> Self {
        Self::new(&entry.title, &entry.image, &entry.description)
    }
}

const BUILTIN_FEATURES: [(&str, &str, &str); 3] = [
    (
        "AI at Your Fingertips",
        "/img/terminal.png",
        "PowerShellAI is designed to bring the power of the bleeding edge AI tools to the terminal.",
    ),
    (
        "Integrated with the Latest Tools",
        "/img/openai.png",
        "PowerShellAI integrates with the latest APIs provided by OpenAI and can connect to private Azure OpenAI instances.",
    ),
    (
        "Open Source",
        "/img/opensource.png",
        "The project is fully open source and welcoming of community contributions.",
    ),
];

/// Something wrong with a single card. Never fatal.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureIssue {
    /// The card was left out
    MissingTitle { index: usize },
    /// The card was rendered with a placeholder image
    Asset(AssetResolutionWarning),
}

impl std::fmt::Display for FeatureIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeatureIssue::MissingTitle { index } => {
                write!(f, "feature #{} has no title and was skipped", index + 1)
            }
            FeatureIssue::Asset(warning) => write!(f, "{}", warning),
        }
    }
}

/// Output of [`FeatureShowcase::render`].
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedShowcase {
    pub node: Node,
    /// Number of cards actually rendered
    pub cards: usize,
    pub issues: Vec<FeatureIssue>,
}

impl RenderedShowcase {
    pub fn to_html(&self) -> String {
        self.node.to_html()
    }
}

/// The homepage feature section: a row of cards in list order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureShowcase {
    features: Vec<FeatureDescriptor>,
}

impl FeatureShowcase {
    pub fn new(features: Vec<FeatureDescriptor>) -> Self {
        Self { features }
    }

    /// The stock PowerShellAI feature list.
    pub fn builtin() -> Self {
        Self::new(
            BUILTIN_FEATURES
                .iter()
                .map(|(title, image, description)| FeatureDescriptor::new(*title, *image, *description))
                .collect(),
        )
    }

    /// Cards from `site.toml`, or the built-in list when none are configured.
    pub fn from_entries(entries: &[FeatureEntry]) -> Self {
        if entries.is_empty() {
            Self::builtin()
        } else {
            Self::new(entries.iter().map(FeatureDescriptor::from).collect())
        }
    }

    pub fn features(&self) -> &[FeatureDescriptor] {
        &self.features
    }

    /// Build the section tree. A bad card never prevents the others from
    /// rendering: untitled cards are dropped, unresolvable images become
    /// placeholders. Both are reported in `issues`.
    pub fn render(&self, assets: &AssetResolver) -> RenderedShowcase {
        let mut issues = Vec::new();
        let mut cards = Vec::with_capacity(self.features.len());

        for (index, feature) in self.features.iter().enumerate() {
            if feature.title.trim().is_empty() {
                tracing::warn!("Skipping feature #{}: empty title", index + 1);
                issues.push(FeatureIssue::MissingTitle { index });
                continue;
            }

            let image = match assets.resolve(&feature.image) {
                Ok(src) => Element::new("img")
                    .class("featureSvg")
                    .attr("src", src)
                    .attr("alt", &feature.title)
                    .attr("role", "img"),
                Err(warning) => {
                    tracing::warn!("{}", warning);
                    issues.push(FeatureIssue::Asset(warning));
                    placeholder(&feature.title)
                }
            };

            cards.push(render_card(feature, image));
        }

        let count = cards.len();
        let node: Node = Element::new("section")
            .class("features")
            .child(
                Element::new("div")
                    .class("container")
                    .child(Element::new("div").class("row").children(cards)),
            )
            .into();

        RenderedShowcase {
            node,
            cards: count,
            issues,
        }
    }
}

fn render_card(feature: &FeatureDescriptor, image: Element) -> Element {
    let description = render_description(&feature.description);

    Element::new("div")
        .class("col col--4")
        .child(Element::new("div").class("text--center").child(image))
        .child(
            Element::new("div")
                .class("text--center padding-horiz--md")
                .child(Element::new("h3").child(Node::text(&feature.title)))
                .child(description),
        )
}

fn placeholder(title: &str) -> Element {
    Element::new("div")
        .class("featureSvg featureSvg--missing")
        .attr("role", "img")
        .attr("aria-label", title)
}

/// Render a markdown description. A single paragraph is unwrapped into the
/// card's own `<p>`; anything longer keeps its block structure in a `<div>`.
fn render_description(markdown: &str) -> Element {
    let parser = Parser::new_ext(markdown, Options::ENABLE_STRIKETHROUGH);
    let mut rendered = String::new();
    html::push_html(&mut rendered, parser);

    let rendered = rendered.trim_end();
    let single = rendered
        .strip_prefix("<p>")
        .and_then(|s| s.strip_suffix("</p>"))
        .filter(|inner| !inner.contains("<p>"));

    match single {
        Some(inner) => Element::new("p").child(Node::Html(inner.to_string())),
        None if rendered.is_empty() => Element::new("p"),
        None => Element::new("div")
            .class("feature-description")
            .child(Node::Html(rendered.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn titles(rendered: &RenderedShowcase) -> Vec<String> {
        rendered
            .node
            .find_all("h3")
            .into_iter()
            .map(|el| Node::Element(el.clone()).text_content())
            .collect()
    }

    #[test]
    fn builtin_list_has_three_cards_in_order() {
        let rendered = FeatureShowcase::builtin().render(&AssetResolver::unchecked("/"));

        assert_eq!(rendered.cards, 3);
        assert!(rendered.issues.is_empty());
        assert_eq!(
            titles(&rendered),
            vec![
                "AI at Your Fingertips",
                "Integrated with the Latest Tools",
                "Open Source"
            ]
        );
    }

    #[test]
    fn preserves_insertion_order() {
        let showcase = FeatureShowcase::new(vec![
            FeatureDescriptor::new("A", "/img/a.png", "first"),
            FeatureDescriptor::new("B", "/img/b.png", "second"),
            FeatureDescriptor::new("C", "/img/c.png", "third"),
        ]);

        let rendered = showcase.render(&AssetResolver::unchecked("/"));

        assert_eq!(titles(&rendered), vec!["A", "B", "C"]);
    }

    #[test]
    fn rendering_is_deterministic() {
        let showcase = FeatureShowcase::builtin();
        let assets = AssetResolver::unchecked("/");

        let first = showcase.render(&assets).to_html();
        let second = showcase.render(&assets).to_html();

        assert_eq!(first, second);
    }

    #[test]
    fn empty_title_does_not_stop_other_cards() {
        let mut features = FeatureShowcase::builtin().features().to_vec();
        features[0].title = String::new();

        let rendered = FeatureShowcase::new(features).render(&AssetResolver::unchecked("/"));

        assert_eq!(rendered.cards, 2);
        assert_eq!(rendered.issues, vec![FeatureIssue::MissingTitle { index: 0 }]);
        assert_eq!(
            titles(&rendered),
            vec!["Integrated with the Latest Tools", "Open Source"]
        );
    }

    #[test]
    fn card_layout_matches_grid_classes() {
        let showcase =
            FeatureShowcase::new(vec![FeatureDescriptor::new("Open Source", "/img/os.png", "Fork it.")]);

        let html = showcase.render(&AssetResolver::unchecked("/docs/")).to_html();

        assert_eq!(
            html,
            concat!(
                r#"<section class="features"><div class="container"><div class="row">"#,
                r#"<div class="col col--4">"#,
                r#"<div class="text--center"><img class="featureSvg" src="/docs/img/os.png" alt="Open Source" role="img"></div>"#,
                r#"<div class="text--center padding-horiz--md"><h3>Open Source</h3><p>Fork it.</p></div>"#,
                r#"</div></div></div></section>"#
            )
        );
    }

    #[test]
    fn missing_image_renders_placeholder() {
        let temp = tempfile::tempdir().unwrap();
        let assets = AssetResolver::new(temp.path(), "/");
        let showcase =
            FeatureShowcase::new(vec![FeatureDescriptor::new("Open Source", "/img/missing.png", "x")]);

        let rendered = showcase.render(&assets);

        assert_eq!(rendered.cards, 1);
        assert!(matches!(rendered.issues[0], FeatureIssue::Asset(_)));
        let placeholders = rendered.node.find_by_class("featureSvg--missing");
        assert_eq!(placeholders.len(), 1);
        assert_eq!(placeholders[0].get_attr("aria-label"), Some("Open Source"));
        assert!(rendered.node.find_all("img").is_empty());
    }

    #[test]
    fn renders_markdown_descriptions() {
        let showcase = FeatureShowcase::new(vec![FeatureDescriptor::new(
            "Docs",
            "/img/docs.png",
            "Read the [tutorial](/docs/intro) & *enjoy*.",
        )]);

        let html = showcase.render(&AssetResolver::unchecked("/")).to_html();

        assert!(html.contains(r#"<p>Read the <a href="/docs/intro">tutorial</a> &amp; <em>enjoy</em>.</p>"#));
    }

    #[test]
    fn multi_paragraph_description_keeps_blocks() {
        let element = render_description("One.\n\nTwo.");

        assert!(element.has_class("feature-description"));
        assert_eq!(
            Node::Element(element).to_html(),
            "<div class=\"feature-description\"><p>One.</p>\n<p>Two.</p></div>"
        );
    }

    #[test]
    fn collects_description_links() {
        let feature = FeatureDescriptor::new(
            "Docs",
            "/img/docs.png",
            "See [intro](/docs/intro) and [GitHub](https://github.com).",
        );

        assert_eq!(
            feature.description_links(),
            vec!["/docs/intro", "https://github.com"]
        );
    }

    #[test]
    fn configured_entries_replace_builtin_list() {
        let entries = vec![FeatureEntry {
            title: "Fast".to_string(),
            image: "img/fast.png".to_string(),
            description: "Quick.".to_string(),
        }];

        assert_eq!(FeatureShowcase::from_entries(&entries).features().len(), 1);
        assert_eq!(FeatureShowcase::from_entries(&[]).features().len(), 3);
    }
}
