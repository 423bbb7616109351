//! Built-in page templates using the Tera template engine
//!
//! Templates are embedded in the binary; sites only provide content and
//! configuration.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::{ProfileConfig, SiteConfig, TopicTables};
use crate::view::ContentState;

/// Template renderer with the embedded folio theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new(config: &SiteConfig) -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("folio/layout.html")),
            ("profile.html", include_str!("folio/profile.html")),
            ("blog.html", include_str!("folio/blog.html")),
            (
                "partials/topics.html",
                include_str!("folio/partials/topics.html"),
            ),
            (
                "partials/loader.html",
                include_str!("folio/partials/loader.html"),
            ),
        ])?;

        tera.register_function("blog_url", make_blog_url(config.clone()));

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    /// Render the profile page
    pub fn render_profile(&self, config: &SiteConfig) -> Result<String> {
        let mut context = base_context(config);
        context.insert("profile", &ProfileData::from(&config.profile));
        self.render("profile.html", &context)
    }

    /// Render the blog page for a content state
    pub fn render_blog(&self, config: &SiteConfig, page: &BlogPage) -> Result<String> {
        let mut context = base_context(config);
        context.insert("page_title", &page.title);
        context.insert("topics", page.topics);
        context.insert("state", page.state);
        context.insert("pdf_url", &page.pdf_url);
        self.render("blog.html", &context)
    }
}

/// Everything the blog template needs besides the site config
pub struct BlogPage<'a> {
    pub title: String,
    pub topics: &'a TopicTables,
    pub state: &'a ContentState,
    pub pdf_url: Option<String>,
}

/// Tera function: `blog_url(file=...)`, the same link the CLI prints
fn make_blog_url(
    config: SiteConfig,
) -> impl Fn(&HashMap<String, tera::Value>) -> tera::Result<tera::Value> + Send + Sync {
    move |args| {
        let file = match args.get("file") {
            Some(val) => tera::try_get_value!("blog_url", "file", String, val),
            None => return Err(tera::Error::msg("blog_url requires a `file` argument")),
        };
        Ok(tera::Value::String(crate::helpers::blog_url(&config, &file)))
    }
}

fn base_context(config: &SiteConfig) -> Context {
    let mut context = Context::new();
    context.insert("config", &ConfigData::from(config));
    context.insert("root", &crate::helpers::url_for(config, ""));
    context
}

/// Site-wide values exposed to templates
#[derive(Debug, Clone, Serialize)]
pub struct ConfigData {
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub language: String,
    pub url: String,
}

impl From<&SiteConfig> for ConfigData {
    fn from(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            subtitle: config.subtitle.clone(),
            author: config.author.clone(),
            language: config.language.clone(),
            url: config.url.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileData {
    pub name: String,
    pub headline: String,
    pub avatar: Option<String>,
    pub about: Vec<String>,
    pub links: Vec<LinkData>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LinkData {
    pub name: String,
    pub url: String,
}

impl From<&ProfileConfig> for ProfileData {
    fn from(profile: &ProfileConfig) -> Self {
        Self {
            name: profile.name.clone(),
            headline: profile.headline.clone(),
            avatar: profile.avatar.clone(),
            about: profile.about.clone(),
            links: profile
                .links
                .iter()
                .map(|l| LinkData {
                    name: l.name.clone(),
                    url: l.url.clone(),
                })
                .collect(),
        }
    }
}
