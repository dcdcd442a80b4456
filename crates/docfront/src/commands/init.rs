//! Scaffold a new site.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub async fn run(config: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing docfront site...");

    let root = super::site_root(config);

    if config.exists() && !yes {
        tracing::warn!("{} already exists. Use --yes to overwrite.", config.display());
        return Ok(());
    }

    let written = scaffold(root, config, yes)?;

    tracing::info!("Initialization complete! Wrote {} file(s).", written);
    tracing::info!("Run 'docfront build' to build the site.");

    Ok(())
}

/// Write the starter files under `root`. Existing files are kept unless
/// `overwrite` is set. Returns the number of files written.
pub fn scaffold(root: &Path, config: &Path, overwrite: bool) -> Result<usize> {
    let mut written = 0;

    if write_file(config, DEFAULT_CONFIG.as_bytes(), overwrite)? {
        written += 1;
    }

    for (relative, content) in STARTER_FILES {
        if write_file(&root.join(relative), content.as_bytes(), overwrite)? {
            written += 1;
        }
    }

    for image in PLACEHOLDER_IMAGES {
        let path = root.join("static/img").join(image);
        if write_file(&path, PLACEHOLDER_PNG, overwrite)? {
            written += 1;
        }
    }

    Ok(written)
}

fn write_file(path: &Path, content: &[u8], overwrite: bool) -> Result<bool> {
    if path.exists() && !overwrite {
        tracing::debug!("Keeping existing {}", path.display());
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Created {}", path.display());

    Ok(true)
}

const STARTER_FILES: [(&str, &str); 4] = [
    ("sidebars.yaml", DEFAULT_SIDEBARS),
    ("src/css/custom.css", DEFAULT_CUSTOM_CSS),
    ("docs/intro.md", DEFAULT_INTRO),
    ("docs/commands/Add-ChatMessage.md", DEFAULT_COMMAND_DOC),
];

const PLACEHOLDER_IMAGES: [&str; 6] = [
    "favicon.ico",
    "icon.png",
    "docusaurus-social-card.jpg",
    "terminal.png",
    "openai.png",
    "opensource.png",
];

/// 1x1 transparent PNG.
const PLACEHOLDER_PNG: &[u8] = &[
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1f,
    0x15, 0xc4, 0x89, 0x00, 0x00, 0x00, 0x0a, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9c, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0d, 0x0a, 0x2d, 0xb4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
];

const DEFAULT_CONFIG: &str = r#"# docfront site configuration

title = "PowerShellAI"
tagline = "AI will not replace you, a person using AI will"
favicon = "img/favicon.ico"

# Production url and the path the site is served under
url = "https://powershellai.com"
base_url = "/"

organization = "dfinke"
project = "PowerShellAI"

# throw | warn | ignore
on_broken_links = "throw"
on_broken_markdown_links = "warn"

[i18n]
default_locale = "en"
locales = ["en"]

[[presets]]
name = "classic"

[presets.docs]
sidebar_path = "sidebars.yaml"
edit_url = "https://github.com/ShaunLawrie/PowerShellAI/tree/main/docusaurus/"

[presets.blog]
show_reading_time = true
edit_url = "https://github.com/ShaunLawrie/PowerShellAI/tree/main/docusaurus/"

[presets.theme]
custom_css = "src/css/custom.css"

[theme]
image = "img/docusaurus-social-card.jpg"

[theme.navbar]
style = "dark"
title = "PowerShellAI"
logo = { alt = "My Site Logo", src = "img/icon.png" }
items = [
    { type = "sidebar", sidebar_id = "tutorialSidebar", label = "Documentation", position = "left" },
    { type = "external", href = "https://github.com/ShaunLawrie/PowerShellAI", label = "GitHub", position = "right" },
]

[theme.footer]
style = "dark"
copyright = "Copyright © {year} dfinke/PowerShellAI"

[[theme.footer.links]]
title = "Docs"
items = [
    { label = "Tutorial", to = "/docs/intro" },
    { label = "Command Reference", to = "/docs/commands/Add-ChatMessage" },
]

[[theme.footer.links]]
title = "Community"
items = [
    { label = "Twitter", href = "https://twitter.com/dfinke" },
    { label = "YouTube", href = "https://www.youtube.com/playlist?list=PL5uoqS92stXiW1xcAyMa7BMGgX-wdl_KV" },
]

[theme.prism]
theme = "github"
dark_theme = "dracula"
additional_languages = ["powershell"]
"#;

const DEFAULT_SIDEBARS: &str = r#"tutorialSidebar:
  - intro
  - type: category
    label: Commands
    items:
      - commands/Add-ChatMessage
"#;

const DEFAULT_CUSTOM_CSS: &str = r#"/* Site-wide overrides, loaded after the theme stylesheet. */

:root {
  --ifm-color-primary: #2e8555;
}
"#;

const DEFAULT_INTRO: &str = r#"# Introduction

PowerShellAI brings AI tools to the terminal.

```powershell
Install-Module PowerShellAI
```
"#;

const DEFAULT_COMMAND_DOC: &str = r#"# Add-ChatMessage

Adds a message to the current chat session.
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use docfront_config::Site;
    use docfront_static::{BuildConfig, StaticBuilder};
    use tempfile::tempdir;

    #[test]
    fn scaffolded_site_loads_and_builds() {
        let temp = tempdir().unwrap();
        let config = temp.path().join("site.toml");

        let written = scaffold(temp.path(), &config, false).unwrap();
        assert_eq!(written, 11);

        let site = Site::load(&config).unwrap();
        assert_eq!(site.config().canonical_url(), "https://powershellai.com/");
        assert_eq!(
            site.config().theme.footer.copyright_for(2024),
            "Copyright © 2024 dfinke/PowerShellAI"
        );

        let result = StaticBuilder::new(
            &site,
            BuildConfig {
                output_dir: temp.path().join("build"),
                ..Default::default()
            },
        )
        .build()
        .unwrap();
        assert_eq!(result.features, 3);
        assert_eq!(result.warnings, 0);
        assert!(temp.path().join("build/img/docusaurus-social-card.jpg").is_file());
    }

    #[test]
    fn keeps_existing_files_unless_overwriting() {
        let temp = tempdir().unwrap();
        let config = temp.path().join("site.toml");
        fs::write(&config, "title = \"Mine\"").unwrap();

        let written = scaffold(temp.path(), &config, false).unwrap();
        assert_eq!(written, 10);
        assert_eq!(fs::read_to_string(&config).unwrap(), "title = \"Mine\"");

        let written = scaffold(temp.path(), &config, true).unwrap();
        assert_eq!(written, 11);
        assert!(fs::read_to_string(&config).unwrap().contains("PowerShellAI"));
    }
}
