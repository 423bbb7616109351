//! Content module - loading and rendering of Markdown files

pub mod loader;
mod markdown;

pub use loader::{ContentSource, FsSource, LoadError, MarkdownLoader};
pub use markdown::MarkdownRenderer;
