//! Render a single Markdown file to HTML

use anyhow::Result;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::Folio;

/// Render `file_name` from the markdown directory, writing to `output` or stdout
pub async fn run(folio: &Folio, file_name: Option<&str>, output: Option<&Path>) -> Result<()> {
    let html = render_file(folio, file_name).await?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, html)?;
            tracing::info!("Wrote {:?}", path);
        }
        None => print!("{}", html),
    }

    Ok(())
}

/// Load and render a file through the same view the blog page uses
pub async fn render_file(folio: &Folio, file_name: Option<&str>) -> Result<String> {
    let view = folio.content_view(Arc::new(folio.renderer()));
    view.navigate(file_name).await;

    let state = view.state();
    if let Some(error) = state.error {
        anyhow::bail!(error);
    }
    Ok(state.html)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        crate::commands::init::init_site(dir.path()).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_render_default_file() {
        let dir = site();
        let folio = Folio::new(dir.path()).unwrap();
        let html = render_file(&folio, None).await.unwrap();
        assert!(html.contains("<h1>Getting Started</h1>"));
    }

    #[tokio::test]
    async fn test_render_to_output_file() {
        let dir = site();
        let folio = Folio::new(dir.path()).unwrap();
        let output = dir.path().join("out/basics.html");
        run(&folio, Some("Markdown Basics.md"), Some(&output))
            .await
            .unwrap();

        let html = fs::read_to_string(output).unwrap();
        assert!(html.contains("<h2>Lists</h2>"));
        assert!(html.contains("highlight rust"));
    }

    #[tokio::test]
    async fn test_render_missing_file_fails() {
        let dir = site();
        let folio = Folio::new(dir.path()).unwrap();
        let err = render_file(&folio, Some("Missing.md")).await.unwrap_err();
        assert!(err.to_string().contains("Missing.md"));
    }
}
