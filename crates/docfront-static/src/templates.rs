//! Template engine for rendering the homepage.

use minijinja::{context, Environment};

/// A link in the navbar or footer.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Link {
    /// Display label
    pub label: String,
    /// Resolved URL
    pub href: String,
    /// Opens in a new tab
    pub external: bool,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct Logo {
    pub alt: String,
    pub src: String,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct Navbar {
    /// `light` or `dark`
    pub style: String,
    pub title: String,
    pub logo: Option<Logo>,
    pub left: Vec<Link>,
    pub right: Vec<Link>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct LinkGroup {
    pub title: String,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct Footer {
    pub style: String,
    pub groups: Vec<LinkGroup>,
    pub copyright: String,
}

/// Syntax highlighting settings exposed to client scripts.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Highlight {
    pub theme: String,
    pub dark_theme: String,
    pub languages: Vec<String>,
}

/// Context for rendering a page template.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Context {
    /// Value of `<html lang>`
    pub lang: String,
    /// Page title
    pub title: String,
    /// Site title
    pub site_title: String,
    pub tagline: String,
    /// Absolute url of the page
    pub canonical_url: String,
    pub favicon: Option<String>,
    /// Social card image
    pub image: Option<String>,
    /// Base URL
    pub base_url: String,
    /// Paths to CSS stylesheets to include
    pub styles: Vec<String>,
    pub navbar: Navbar,
    pub footer: Footer,
    pub highlight: Highlight,
    /// Call to action shown under the tagline
    pub cta: Option<Link>,
    /// Rendered body HTML
    pub content: String,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with default templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        env.add_template_owned("base.html".to_string(), BASE_TEMPLATE.to_string())
            .expect("Failed to add base template");

        env.add_template_owned("home.html".to_string(), HOME_TEMPLATE.to_string())
            .expect("Failed to add home template");

        env.add_template_owned("navbar.html".to_string(), NAVBAR_TEMPLATE.to_string())
            .expect("Failed to add navbar template");

        env.add_template_owned("footer.html".to_string(), FOOTER_TEMPLATE.to_string())
            .expect("Failed to add footer template");

        Self { env }
    }

    /// Render a page using the specified template.
    pub fn render_page(
        &self,
        template: &str,
        context: &Context,
    ) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template)?;

        tmpl.render(context! {
            lang => &context.lang,
            title => &context.title,
            site_title => &context.site_title,
            tagline => &context.tagline,
            canonical_url => &context.canonical_url,
            favicon => &context.favicon,
            image => &context.image,
            base_url => &context.base_url,
            styles => &context.styles,
            navbar => &context.navbar,
            footer => &context.footer,
            highlight => &context.highlight,
            cta => &context.cta,
            content => &context.content,
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="{{ lang }}">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{% if title != site_title %}{{ title }} | {% endif %}{{ site_title }}</title>
  <meta name="description" content="{{ tagline }}">
  <meta property="og:title" content="{{ site_title }}">
  <meta property="og:url" content="{{ canonical_url }}">
  {% if image %}<meta property="og:image" content="{{ image }}">
  {% endif %}<link rel="canonical" href="{{ canonical_url }}">
  {% if favicon %}<link rel="icon" href="{{ favicon }}">
  {% endif %}<link rel="stylesheet" href="{{ base_url }}assets/main.css">
  {% for style in styles %}<link rel="stylesheet" href="{{ style }}">
  {% endfor %}
</head>
<body data-code-theme="{{ highlight.theme }}" data-code-theme-dark="{{ highlight.dark_theme }}" data-code-languages="{{ highlight.languages | join(",") }}">
  {% include "navbar.html" %}
  <main>
    {% block content %}{% endblock %}
  </main>
  {% include "footer.html" %}
</body>
</html>"##;

const HOME_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<header class="hero">
  <div class="container">
    <h1 class="hero__title">{{ site_title }}</h1>
    <p class="hero__subtitle">{{ tagline }}</p>
    {% if cta %}<a class="button" href="{{ cta.href }}">{{ cta.label }}</a>{% endif %}
  </div>
</header>
{{ content | safe }}
{% endblock %}"##;

const NAVBAR_TEMPLATE: &str = r##"<nav class="navbar navbar--{{ navbar.style }}">
  <a class="navbar__brand" href="{{ base_url }}">
    {% if navbar.logo %}<img class="navbar__logo" src="{{ navbar.logo.src }}" alt="{{ navbar.logo.alt }}">{% endif %}
    <b class="navbar__title">{{ navbar.title }}</b>
  </a>
  <div class="navbar__items">
  {% for link in navbar.left %}
    <a class="navbar__link" href="{{ link.href }}"{% if link.external %} target="_blank" rel="noopener noreferrer"{% endif %}>{{ link.label }}</a>
  {% endfor %}
  </div>
  <div class="navbar__items navbar__items--right">
  {% for link in navbar.right %}
    <a class="navbar__link" href="{{ link.href }}"{% if link.external %} target="_blank" rel="noopener noreferrer"{% endif %}>{{ link.label }}</a>
  {% endfor %}
  </div>
</nav>"##;

const FOOTER_TEMPLATE: &str = r##"<footer class="footer footer--{{ footer.style }}">
  <div class="container">
    {% if footer.groups %}
    <div class="footer__links">
    {% for group in footer.groups %}
      <div class="footer__col">
        <div class="footer__title">{{ group.title }}</div>
        <ul class="footer__items">
        {% for link in group.links %}
          <li class="footer__item"><a href="{{ link.href }}"{% if link.external %} target="_blank" rel="noopener noreferrer"{% endif %}>{{ link.label }}</a></li>
        {% endfor %}
        </ul>
      </div>
    {% endfor %}
    </div>
    {% endif %}
    <div class="footer__copyright">{{ footer.copyright }}</div>
  </div>
</footer>"##;
