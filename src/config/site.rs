//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::topics::{TopicCategory, TopicEntry, TopicSection, TopicTables};

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub assets_dir: String,
    pub markdown_dir: String,
    pub pdf_dir: String,

    // Pages
    #[serde(default)]
    pub profile: ProfileConfig,
    #[serde(default)]
    pub blog: BlogConfig,
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Navigation
    #[serde(default)]
    pub topics: TopicTables,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Folio".to_string(),
            subtitle: String::new(),
            author: "John Doe".to_string(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            assets_dir: "assets".to_string(),
            markdown_dir: "markdown".to_string(),
            pdf_dir: "pdf".to_string(),

            profile: ProfileConfig::default(),
            blog: BlogConfig::default(),
            highlight: HighlightConfig::default(),

            topics: default_topics(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Directory (relative to the site root) holding the Markdown files
    pub fn markdown_path(&self) -> String {
        format!(
            "{}/{}",
            self.assets_dir.trim_end_matches('/'),
            self.markdown_dir.trim_matches('/')
        )
    }

    /// Directory (relative to the site root) holding the PDF files
    pub fn pdf_path(&self) -> String {
        format!(
            "{}/{}",
            self.assets_dir.trim_end_matches('/'),
            self.pdf_dir.trim_matches('/')
        )
    }
}

/// Profile page content
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    pub name: String,
    pub headline: String,
    pub avatar: Option<String>,
    #[serde(default)]
    pub about: Vec<String>,
    #[serde(default)]
    pub links: Vec<ProfileLink>,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            name: "John Doe".to_string(),
            headline: "Software Developer".to_string(),
            avatar: None,
            about: Vec::new(),
            links: Vec::new(),
        }
    }
}

/// A link shown on the profile page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileLink {
    pub name: String,
    pub url: String,
}

/// Blog page configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    /// File shown when no `file` query parameter is given
    #[serde(alias = "defaultFile")]
    pub default_file: String,
    /// PDF linked beside the article, relative to the pdf directory
    #[serde(alias = "pdfFile")]
    pub pdf_file: Option<String>,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            default_file: "Angular Navigation and Routing.md".to_string(),
            pdf_file: Some("Collections_in_NET.pdf".to_string()),
        }
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            theme: "base16-ocean.dark".to_string(),
            line_number: true,
        }
    }
}

fn entry(name: &str, file_name: &str) -> TopicEntry {
    TopicEntry {
        name: name.to_string(),
        file_name: file_name.to_string(),
    }
}

/// Topic menus used when `_config.yml` does not define any
fn default_topics() -> TopicTables {
    TopicTables {
        sections: vec![
            TopicSection {
                title: "Angular".to_string(),
                categories: vec![
                    TopicCategory {
                        name: "Angular Components".to_string(),
                        file_name: Some("Angular Components.md".to_string()),
                        entries: Vec::new(),
                    },
                    TopicCategory {
                        name: "Angular Routing".to_string(),
                        file_name: None,
                        entries: vec![entry("Introduction", "Angular Navigation and Routing.md")],
                    },
                ],
            },
            TopicSection {
                title: "Node".to_string(),
                categories: vec![
                    TopicCategory {
                        name: "Introduction".to_string(),
                        file_name: Some(
                            "Relation Between Node, Js, Ecmascript, Js engine.md".to_string(),
                        ),
                        entries: Vec::new(),
                    },
                    TopicCategory {
                        name: "Authentication".to_string(),
                        file_name: None,
                        entries: vec![entry("Using Passport", "Authentication with passport.md")],
                    },
                ],
            },
            TopicSection {
                title: ".NET".to_string(),
                categories: vec![TopicCategory {
                    name: "Collections".to_string(),
                    file_name: None,
                    entries: vec![entry("Introduction", "Collections in NET.md")],
                }],
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "Folio");
        assert_eq!(config.markdown_path(), "assets/markdown");
        assert_eq!(config.pdf_path(), "assets/pdf");
        assert_eq!(
            config.blog.default_file,
            "Angular Navigation and Routing.md"
        );
        assert_eq!(config.topics.sections.len(), 3);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Portfolio
author: Test User
assets_dir: static/
blog:
  default_file: Intro.md
profile:
  name: Test User
  about:
    - First paragraph.
  links:
    - name: GitHub
      url: https://github.com/test
topics:
  sections:
    - title: Rust
      categories:
        - name: Ownership
          entries:
            - name: Basics
              fileName: Ownership Basics.md
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Portfolio");
        assert_eq!(config.markdown_path(), "static/markdown");
        assert_eq!(config.blog.default_file, "Intro.md");
        assert_eq!(config.blog.pdf_file.as_deref(), Some("Collections_in_NET.pdf"));
        assert_eq!(config.profile.links[0].name, "GitHub");
        assert_eq!(config.topics.sections.len(), 1);
        assert_eq!(
            config.topics.sections[0].categories[0].entries[0].file_name,
            "Ownership Basics.md"
        );
        assert!(config.highlight.enable);
    }

    #[test]
    fn test_unknown_keys_are_kept() {
        let config: SiteConfig = serde_yaml::from_str("analytics: UA-123\n").unwrap();
        assert!(config.extra.contains_key("analytics"));
    }
}
