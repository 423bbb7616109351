//! folio-rs: a personal portfolio and Markdown blog server
//!
//! The blog page loads Markdown files by name from the site's assets
//! directory, renders them to HTML and shows them next to configurable topic
//! menus and PDF links.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod server;
pub mod templates;
pub mod view;

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use content::{FsSource, MarkdownLoader, MarkdownRenderer};
use view::ContentView;

/// The main site handle
#[derive(Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Assets directory (Markdown, PDF, styles)
    pub assets_dir: std::path::PathBuf,
    /// Markdown directory inside the assets
    pub markdown_dir: std::path::PathBuf,
}

impl Folio {
    /// Create a new instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No _config.yml in {:?}, using defaults", base_dir);
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create an instance from an already loaded configuration
    pub fn with_config(base_dir: std::path::PathBuf, config: config::SiteConfig) -> Self {
        let assets_dir = base_dir.join(&config.assets_dir);
        let markdown_dir = base_dir.join(config.markdown_path());

        Self {
            config,
            base_dir,
            assets_dir,
            markdown_dir,
        }
    }

    /// Loader reading Markdown files from this site's directory
    pub fn loader(&self) -> MarkdownLoader {
        MarkdownLoader::new(
            self.config.markdown_path(),
            Arc::new(FsSource::new(&self.base_dir)),
        )
    }

    /// Renderer using this site's highlight settings
    pub fn renderer(&self) -> MarkdownRenderer {
        MarkdownRenderer::from_config(&self.config.highlight)
    }

    /// A fresh content view over this site's topics
    pub fn content_view(&self, renderer: Arc<MarkdownRenderer>) -> ContentView {
        ContentView::new(
            self.loader(),
            renderer,
            self.config.topics.clone(),
            self.config.blog.default_file.clone(),
        )
    }
}
