//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

const CONFIG: &str = r#"# Site
title: Folio
subtitle: ''
author: John Doe
language: en

# URL
url: http://example.com
root: /

# Directory
assets_dir: assets
markdown_dir: markdown
pdf_dir: pdf

# Profile page
profile:
  name: John Doe
  headline: Software Developer
  about:
    - I write about the things I learn.
  links:
    - name: GitHub
      url: https://github.com/

# Blog page
blog:
  default_file: Getting Started.md
  pdf_file:

highlight:
  enable: true
  theme: base16-ocean.dark
  line_number: true

# Navigation menus
topics:
  sections:
    - title: Notes
      categories:
        - name: Getting Started
          file_name: Getting Started.md
        - name: Writing
          entries:
            - name: Markdown Basics
              file_name: Markdown Basics.md
"#;

const GETTING_STARTED: &str = r#"# Getting Started

Every Markdown file in `assets/markdown` can be opened on the blog page with
`/blog?file=<file name>`.

Add a file to the `topics` section of `_config.yml` to list it in the menu.
"#;

const MARKDOWN_BASICS: &str = r#"# Markdown Basics

## Lists

- Unordered items
- Start with a dash

## Code

```rust
fn main() {
    println!("Hello, world!");
}
```
"#;

const STYLE: &str = r#"body { font-family: sans-serif; margin: 0; color: #222; }
.site-header, .site-footer { padding: 1rem 2rem; background: #f5f5f5; }
.site-header nav a { margin-left: 1rem; }
main { padding: 2rem; }
.blog { display: flex; gap: 2rem; }
.topics { min-width: 14rem; }
.topics a.active { font-weight: bold; }
.loader { color: #888; }
.error { color: #b00020; }
"#;

/// Initialize a new site in the given directory
///
/// Existing files are left untouched.
pub fn init_site(target_dir: &Path) -> Result<()> {
    let assets = target_dir.join("assets");
    fs::create_dir_all(assets.join("markdown"))?;
    fs::create_dir_all(assets.join("pdf"))?;
    fs::create_dir_all(assets.join("css"))?;

    let files = [
        (target_dir.join("_config.yml"), CONFIG),
        (assets.join("markdown/Getting Started.md"), GETTING_STARTED),
        (assets.join("markdown/Markdown Basics.md"), MARKDOWN_BASICS),
        (assets.join("css/style.css"), STYLE),
    ];

    for (path, content) in files {
        if path.exists() {
            tracing::info!("Skipping existing {:?}", path);
            continue;
        }
        fs::write(&path, content)?;
        tracing::debug!("Created {:?}", path);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Folio;

    #[test]
    fn test_init_creates_loadable_site() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();

        let folio = Folio::new(dir.path()).unwrap();
        assert_eq!(folio.config.blog.default_file, "Getting Started.md");
        assert!(folio.config.blog.pdf_file.is_none());
        for file in folio.config.topics.files() {
            assert!(folio.markdown_dir.join(file).is_file(), "{file}");
        }
    }

    #[test]
    fn test_init_keeps_existing_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("_config.yml"), "title: Mine\n").unwrap();
        init_site(dir.path()).unwrap();

        let content = fs::read_to_string(dir.path().join("_config.yml")).unwrap();
        assert_eq!(content, "title: Mine\n");
        assert!(dir.path().join("assets/css/style.css").exists());
    }
}
