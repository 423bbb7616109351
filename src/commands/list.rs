//! List topics and Markdown assets

use anyhow::Result;
use walkdir::WalkDir;

use crate::content::loader::is_markdown_file;
use crate::helpers::blog_url;
use crate::Folio;

/// List site content by type
pub fn run(folio: &Folio, content_type: &str) -> Result<()> {
    match content_type {
        "topic" | "topics" => {
            let topics = &folio.config.topics;
            for section in &topics.sections {
                println!("{}:", section.title);
                for category in &section.categories {
                    match &category.file_name {
                        Some(file) => println!("  {}", describe(folio, &category.name, file)),
                        None => println!("  {}", category.name),
                    }
                    for entry in &category.entries {
                        println!("    {}", describe(folio, &entry.name, &entry.file_name));
                    }
                }
            }

            let missing = missing_topics(folio);
            if !missing.is_empty() {
                tracing::warn!("{} topic file(s) are missing", missing.len());
            }
        }
        "asset" | "assets" => {
            let assets = markdown_assets(folio)?;
            println!("Markdown files ({}):", assets.len());
            let listed = folio.config.topics.files();
            for asset in assets {
                if listed.contains(&asset.as_str()) {
                    println!("  {}", asset);
                } else {
                    println!("  {} (not in any menu)", asset);
                }
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: topic, asset",
                content_type
            );
        }
    }

    Ok(())
}

fn describe(folio: &Folio, name: &str, file: &str) -> String {
    let url = format!(
        "{}{}",
        folio.config.url.trim_end_matches('/'),
        blog_url(&folio.config, file)
    );
    if folio.markdown_dir.join(file).is_file() {
        format!("{} -> {}", name, url)
    } else {
        format!("{} -> {} (missing)", name, url)
    }
}

/// Topic files that do not exist in the markdown directory
pub fn missing_topics(folio: &Folio) -> Vec<String> {
    folio
        .config
        .topics
        .files()
        .into_iter()
        .filter(|file| !folio.markdown_dir.join(file).is_file())
        .map(str::to_string)
        .collect()
}

/// Markdown files under the markdown directory, relative and sorted
pub fn markdown_assets(folio: &Folio) -> Result<Vec<String>> {
    if !folio.markdown_dir.exists() {
        return Ok(Vec::new());
    }

    let mut assets = Vec::new();
    for entry in WalkDir::new(&folio.markdown_dir).follow_links(true) {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && is_markdown_file(path) {
            let relative = path.strip_prefix(&folio.markdown_dir).unwrap_or(path);
            assets.push(relative.to_string_lossy().replace('\\', "/"));
        }
    }
    assets.sort();
    Ok(assets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_topics() {
        let dir = tempfile::tempdir().unwrap();
        crate::commands::init::init_site(dir.path()).unwrap();
        fs::remove_file(dir.path().join("assets/markdown/Markdown Basics.md")).unwrap();

        let folio = Folio::new(dir.path()).unwrap();
        assert_eq!(missing_topics(&folio), vec!["Markdown Basics.md"]);
    }

    #[test]
    fn test_markdown_assets() {
        let dir = tempfile::tempdir().unwrap();
        crate::commands::init::init_site(dir.path()).unwrap();
        let markdown = dir.path().join("assets/markdown");
        fs::create_dir_all(markdown.join("node")).unwrap();
        fs::write(markdown.join("node/Passport.md"), "# Passport").unwrap();
        fs::write(markdown.join("notes.txt"), "skip").unwrap();

        let folio = Folio::new(dir.path()).unwrap();
        assert_eq!(
            markdown_assets(&folio).unwrap(),
            vec!["Getting Started.md", "Markdown Basics.md", "node/Passport.md"]
        );
    }

    #[test]
    fn test_unknown_type() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        assert!(run(&folio, "post").is_err());
    }
}
