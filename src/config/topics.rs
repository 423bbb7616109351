//! Topic tables for the blog navigation menus

use serde::{Deserialize, Serialize};

/// A single menu entry pointing at a Markdown file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicEntry {
    pub name: String,
    #[serde(alias = "fileName")]
    pub file_name: String,
}

/// A category groups entries; it may also link to a file of its own
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicCategory {
    pub name: String,
    #[serde(default, alias = "fileName")]
    pub file_name: Option<String>,
    #[serde(default)]
    pub entries: Vec<TopicEntry>,
}

/// One navigation menu (e.g. "Angular") made of categories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicSection {
    pub title: String,
    #[serde(default)]
    pub categories: Vec<TopicCategory>,
}

/// All navigation menus of the blog page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicTables {
    #[serde(default)]
    pub sections: Vec<TopicSection>,
}

impl TopicTables {
    /// Every file referenced by the tables, in menu order
    pub fn files(&self) -> Vec<&str> {
        let mut files = Vec::new();
        for category in self.sections.iter().flat_map(|s| &s.categories) {
            if let Some(file) = &category.file_name {
                files.push(file.as_str());
            }
            files.extend(category.entries.iter().map(|e| e.file_name.as_str()));
        }
        files
    }

    /// Display name for a file, if a menu references it
    pub fn title_for(&self, file_name: &str) -> Option<&str> {
        for category in self.sections.iter().flat_map(|s| &s.categories) {
            if category.file_name.as_deref() == Some(file_name) {
                return Some(&category.name);
            }
            if let Some(entry) = category.entries.iter().find(|e| e.file_name == file_name) {
                return Some(&entry.name);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> TopicTables {
        serde_yaml::from_str(
            r#"
sections:
  - title: Node
    categories:
      - name: Introduction
        fileName: Node Intro.md
      - name: Authentication
        entries:
          - name: Using Passport
            file_name: Authentication with passport.md
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_files_in_menu_order() {
        assert_eq!(
            tables().files(),
            vec!["Node Intro.md", "Authentication with passport.md"]
        );
    }

    #[test]
    fn test_title_for() {
        let tables = tables();
        assert_eq!(tables.title_for("Node Intro.md"), Some("Introduction"));
        assert_eq!(
            tables.title_for("Authentication with passport.md"),
            Some("Using Passport")
        );
        assert_eq!(tables.title_for("missing.md"), None);
    }

    #[test]
    fn test_category_without_entries() {
        let category: TopicCategory = serde_yaml::from_str("name: Solo\n").unwrap();
        assert!(category.entries.is_empty());
        assert!(category.file_name.is_none());
    }
}
