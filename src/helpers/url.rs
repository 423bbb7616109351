//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::config::SiteConfig;

/// Characters escaped inside a single path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Characters escaped inside a query parameter value
const QUERY_VALUE: &AsciiSet = &SEGMENT.add(b'&').add(b'+').add(b'=').add(b',');

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/css/style.css") // -> "/blog/css/style.css"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Encode a single path segment (file names may contain spaces)
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

/// Link to the blog page showing `file_name`
pub fn blog_url(config: &SiteConfig, file_name: &str) -> String {
    format!(
        "{}?file={}",
        url_for(config, "blog"),
        utf8_percent_encode(file_name, QUERY_VALUE)
    )
}

/// Public URL of a PDF in the assets directory
pub fn pdf_url(config: &SiteConfig, file_name: &str) -> String {
    url_for(
        config,
        &format!("assets/{}/{}", config.pdf_dir.trim_matches('/'), encode_segment(file_name)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.root = "/folio/".to_string();
        config
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "/css/style.css"), "/folio/css/style.css");
        assert_eq!(url_for(&config, ""), "/folio/");
        assert_eq!(url_for(&SiteConfig::default(), ""), "/");
    }

    #[test]
    fn test_blog_url_encodes_file_name() {
        let config = SiteConfig::default();
        assert_eq!(
            blog_url(&config, "Collections in NET.md"),
            "/blog?file=Collections%20in%20NET.md"
        );
        assert_eq!(
            blog_url(&config, "Node, Js & more.md"),
            "/blog?file=Node%2C%20Js%20%26%20more.md"
        );
    }

    #[test]
    fn test_pdf_url() {
        let config = SiteConfig::default();
        assert_eq!(
            pdf_url(&config, "Collections_in_NET.pdf"),
            "/assets/pdf/Collections_in_NET.pdf"
        );
        assert_eq!(pdf_url(&config, "a b.pdf"), "/assets/pdf/a%20b.pdf");
    }
}
