//! Markdown loader - resolves file names and fetches their raw text

use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Errors produced while loading Markdown content
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("invalid markdown file name: {0:?}")]
    InvalidName(String),

    #[error("failed to fetch {}: {source}", path.display())]
    Fetch {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Something that can hand out the raw text behind a path
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn read_text(&self, path: &Path) -> std::io::Result<String>;
}

/// Reads content from the local filesystem, relative to a root directory
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ContentSource for FsSource {
    async fn read_text(&self, path: &Path) -> std::io::Result<String> {
        tokio::fs::read_to_string(self.root.join(path)).await
    }
}

/// Loads Markdown files by name from a fixed base directory
#[derive(Clone)]
pub struct MarkdownLoader {
    base: PathBuf,
    source: Arc<dyn ContentSource>,
}

impl MarkdownLoader {
    /// Create a loader reading `<base>/<file name>` through `source`
    pub fn new<P: Into<PathBuf>>(base: P, source: Arc<dyn ContentSource>) -> Self {
        Self {
            base: base.into(),
            source,
        }
    }

    /// Resolve a file name to its path under the base directory
    ///
    /// Names are used verbatim (spaces included) but must stay inside the
    /// base directory.
    pub fn resolve(&self, file_name: &str) -> Result<PathBuf, LoadError> {
        let relative = Path::new(file_name);
        let escapes = file_name.is_empty()
            || relative
                .components()
                .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(LoadError::InvalidName(file_name.to_string()));
        }
        Ok(self.base.join(relative))
    }

    /// Fetch the raw Markdown text of a file
    ///
    /// A single read, no retry and no caching.
    pub async fn load(&self, file_name: &str) -> Result<String, LoadError> {
        let path = self.resolve(file_name)?;
        tracing::debug!("Fetching markdown {:?}", path);
        self.source
            .read_text(&path)
            .await
            .map_err(|source| LoadError::Fetch { path, source })
    }
}

/// Check if a file is a markdown file
pub fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}
