//! Helper functions for templates and handlers

mod url;

pub use url::*;
