//! Content view - the state behind the blog page
//!
//! A navigation marks the view as loading, fetches the requested Markdown
//! file, renders it and commits the HTML. State lives in a `watch` channel so
//! that renderers subscribe to changes instead of polling fields.
//!
//! Every navigation gets a sequence number. Only the latest navigation may
//! commit its result; a slower, older fetch that resolves afterwards is
//! dropped. A failed fetch clears the loading flag and records an error.

use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;

use crate::config::TopicTables;
use crate::content::{LoadError, MarkdownLoader, MarkdownRenderer};

/// Displayable state of a content view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentState {
    /// File name of the current (or pending) document
    pub file: String,
    /// Rendered HTML of the last committed document
    pub html: String,
    pub loading: bool,
    /// Set when the last navigation failed to load
    pub error: Option<String>,
    /// Sequence number of the latest navigation
    pub sequence: u64,
}

impl ContentState {
    fn initial(file: &str) -> Self {
        Self {
            file: file.to_string(),
            html: String::new(),
            loading: false,
            error: None,
            sequence: 0,
        }
    }
}

/// Handle for an in-flight navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub sequence: u64,
    pub file: String,
}

/// Outcome of committing a navigation's result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    Applied,
    /// A newer navigation was issued; the result was dropped
    Stale,
}

/// A reusable content view parameterized by its topic tables
pub struct ContentView {
    loader: MarkdownLoader,
    renderer: Arc<MarkdownRenderer>,
    topics: TopicTables,
    default_file: String,
    state: watch::Sender<ContentState>,
}

impl ContentView {
    pub fn new(
        loader: MarkdownLoader,
        renderer: Arc<MarkdownRenderer>,
        topics: TopicTables,
        default_file: impl Into<String>,
    ) -> Self {
        let default_file = default_file.into();
        let (state, _) = watch::channel(ContentState::initial(&default_file));
        Self {
            loader,
            renderer,
            topics,
            default_file,
            state,
        }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> ContentState {
        self.state.borrow().clone()
    }

    /// Receive a notification every time the state changes
    pub fn subscribe(&self) -> watch::Receiver<ContentState> {
        self.state.subscribe()
    }

    /// Topic menus shown beside the content
    pub fn topics(&self) -> &TopicTables {
        &self.topics
    }

    /// Start a navigation to `file`; `None` or a blank name selects the default file
    ///
    /// Any other name is kept verbatim, surrounding spaces included.
    pub fn begin(&self, file: Option<&str>) -> Navigation {
        let file = match file {
            Some(name) if !name.trim().is_empty() => name.to_string(),
            _ => self.default_file.clone(),
        };

        let mut sequence = 0;
        self.state.send_modify(|state| {
            state.sequence += 1;
            state.file = file.clone();
            state.loading = true;
            state.error = None;
            sequence = state.sequence;
        });

        tracing::debug!("Navigation #{} to {:?}", sequence, file);
        Navigation { sequence, file }
    }

    /// Commit the outcome of a navigation, unless a newer one has started
    pub fn complete(&self, navigation: &Navigation, result: Result<String, LoadError>) -> Commit {
        let applied = self.state.send_if_modified(move |state| {
            if state.sequence != navigation.sequence {
                return false;
            }
            match result {
                Ok(html) => {
                    state.html = html;
                    state.error = None;
                }
                Err(err) => {
                    tracing::warn!("Failed to load {:?}: {}", navigation.file, err);
                    state.html = String::new();
                    state.error = Some(err.to_string());
                }
            }
            state.loading = false;
            true
        });

        if applied {
            Commit::Applied
        } else {
            tracing::debug!(
                "Dropping stale result of navigation #{} ({:?})",
                navigation.sequence,
                navigation.file
            );
            Commit::Stale
        }
    }

    /// Navigate: fetch, render and commit the requested file
    pub async fn navigate(&self, file: Option<&str>) -> Commit {
        let navigation = self.begin(file);
        let result = self
            .loader
            .load(&navigation.file)
            .await
            .map(|markdown| self.renderer.render(&markdown));
        self.complete(&navigation, result)
    }
}
