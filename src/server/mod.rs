//! HTTP server for the profile and blog pages, with optional live reload

use anyhow::Result;
use axum::{
    extract::{
        ws::{Message, WebSocket},
        Query, State, WebSocketUpgrade,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::sync::broadcast;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::SiteConfig;
use crate::content::MarkdownRenderer;
use crate::helpers::pdf_url;
use crate::templates::{BlogPage, TemplateRenderer};
use crate::view::{ContentState, ContentView};
use crate::Folio;

/// Live reload script injected into HTML pages
const LIVE_RELOAD_SCRIPT: &str = r#"
<script>
(function() {
    var ws = new WebSocket('ws://' + location.host + '/__livereload');
    ws.onmessage = function(msg) {
        if (msg.data === 'reload') {
            location.reload();
        }
    };
    ws.onclose = function() {
        console.log('Live reload disconnected. Attempting to reconnect...');
        setTimeout(function() { location.reload(); }, 1000);
    };
})();
</script>
</body>
"#;

/// Site data that is swapped as a whole when the config changes
struct Site {
    folio: Folio,
    renderer: Arc<MarkdownRenderer>,
    templates: TemplateRenderer,
}

impl Site {
    fn new(folio: Folio) -> Result<Arc<Self>> {
        let renderer = Arc::new(folio.renderer());
        let templates = TemplateRenderer::new(&folio.config)?;
        Ok(Arc::new(Self {
            folio,
            renderer,
            templates,
        }))
    }
}

/// Server state
pub struct ServerState {
    site: RwLock<Arc<Site>>,
    reload_tx: broadcast::Sender<()>,
    live_reload: bool,
}

impl ServerState {
    pub fn new(folio: Folio, live_reload: bool) -> Result<Arc<Self>> {
        let (reload_tx, _) = broadcast::channel::<()>(16);
        Ok(Arc::new(Self {
            site: RwLock::new(Site::new(folio)?),
            reload_tx,
            live_reload,
        }))
    }

    fn site(&self) -> Arc<Site> {
        match self.site.read() {
            Ok(site) => site.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn replace_site(&self, folio: Folio) -> Result<()> {
        let site = Site::new(folio)?;
        match self.site.write() {
            Ok(mut guard) => *guard = site,
            Err(poisoned) => *poisoned.into_inner() = site,
        }
        Ok(())
    }

    fn page(&self, html: String) -> Response {
        if self.live_reload {
            Html(inject_live_reload(&html)).into_response()
        } else {
            Html(html).into_response()
        }
    }
}

/// Query parameters of the blog page
#[derive(Debug, Deserialize)]
pub struct ContentQuery {
    pub file: Option<String>,
}

/// Path the site is mounted at, `None` when served from `/`
fn mount_path(config: &SiteConfig) -> Option<String> {
    let root = config.root.trim_matches('/');
    if root.is_empty() {
        None
    } else {
        Some(format!("/{}", root))
    }
}

/// Settings baked into the router at startup; changing them needs a restart
pub fn restart_required(old: &SiteConfig, new: &SiteConfig) -> Vec<&'static str> {
    let mut keys = Vec::new();
    if mount_path(old) != mount_path(new) {
        keys.push("root");
    }
    if old.assets_dir != new.assets_dir {
        keys.push("assets_dir");
    }
    keys
}

/// Build the application router, mounted under the configured `root`
pub fn router(state: Arc<ServerState>) -> Router {
    let site = state.site();
    let config = &site.folio.config;

    let pages = Router::new()
        .route("/", get(profile_handler))
        .route("/blog", get(blog_handler))
        .route("/api/content", get(content_handler))
        .nest_service("/assets", ServeDir::new(&site.folio.assets_dir));

    let app = match mount_path(config) {
        Some(path) => Router::new().nest(&path, pages),
        None => pages,
    };

    app.route("/__livereload", get(livereload_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(folio: &Folio, ip: &str, port: u16, watch: bool, open: bool) -> Result<()> {
    let state = ServerState::new(folio.clone(), watch)?;
    let app = router(state.clone());

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    if watch {
        println!("Live reload enabled. Watching for changes...");
    }
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    if watch {
        let folio = folio.clone();
        let state = state.clone();
        tokio::task::spawn_blocking(move || {
            if let Err(e) = watch_and_reload(folio, state) {
                tracing::error!("File watcher error: {}", e);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Watch assets and config, reloading connected pages on change
fn watch_and_reload(folio: Folio, state: Arc<ServerState>) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    if folio.assets_dir.exists() {
        debouncer
            .watcher()
            .watch(&folio.assets_dir, RecursiveMode::Recursive)?;
        tracing::debug!("Watching: {:?}", folio.assets_dir);
    }

    let config_path = folio.base_dir.join("_config.yml");
    if config_path.exists() {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
        tracing::debug!("Watching: {:?}", config_path);
    }

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let changed: Vec<&PathBuf> = events
                    .iter()
                    .map(|e| &e.path)
                    .filter(|path| {
                        let path_str = path.to_string_lossy();
                        !path_str.contains(".DS_Store") && !path_str.ends_with('~')
                    })
                    .collect();

                if changed.is_empty() {
                    continue;
                }
                for path in &changed {
                    tracing::info!("File changed: {}", path.display());
                }

                if changed.iter().any(|path| path.ends_with("_config.yml")) {
                    let reloaded = SiteConfig::load(&config_path).and_then(|config| {
                        for key in restart_required(&folio.config, &config) {
                            tracing::warn!(
                                "`{}` changed; restart the server to apply it",
                                key
                            );
                        }
                        state.replace_site(Folio::with_config(folio.base_dir.clone(), config))
                    });
                    match reloaded {
                        Ok(()) => tracing::info!("Reloaded configuration"),
                        Err(e) => {
                            tracing::error!("Invalid configuration, keeping previous: {}", e);
                            continue;
                        }
                    }
                }

                // No connected clients is not an error
                let _ = state.reload_tx.send(());
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(e) => {
                tracing::error!("Channel error: {:?}", e);
                break;
            }
        }
    }

    Ok(())
}

/// Profile page
async fn profile_handler(State(state): State<Arc<ServerState>>) -> Response {
    let site = state.site();
    match site.templates.render_profile(&site.folio.config) {
        Ok(html) => state.page(html),
        Err(e) => render_error(e),
    }
}

/// Load, render and commit the requested file through a fresh content view
async fn load_content(site: &Site, file: Option<&str>) -> ContentView {
    let view = site.folio.content_view(site.renderer.clone());
    view.navigate(file).await;
    view
}

fn content_status(content: &ContentState) -> StatusCode {
    if content.error.is_some() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    }
}

/// Blog page: topic menus, PDF link and the requested article
async fn blog_handler(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<ContentQuery>,
) -> Response {
    let site = state.site();
    let config = &site.folio.config;
    let view = load_content(&site, query.file.as_deref()).await;
    let content = view.state();

    let title = view
        .topics()
        .title_for(&content.file)
        .map(str::to_string)
        .unwrap_or_else(|| content.file.trim_end_matches(".md").to_string());
    let page = BlogPage {
        title,
        topics: view.topics(),
        state: &content,
        pdf_url: config.blog.pdf_file.as_deref().map(|f| pdf_url(config, f)),
    };

    match site.templates.render_blog(config, &page) {
        Ok(html) => (content_status(&content), state.page(html)).into_response(),
        Err(e) => render_error(e),
    }
}

/// JSON content state used by the in-page navigation script
async fn content_handler(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<ContentQuery>,
) -> Response {
    let site = state.site();
    let content = load_content(&site, query.file.as_deref()).await.state();
    (content_status(&content), Json(content)).into_response()
}

fn render_error(e: anyhow::Error) -> Response {
    tracing::error!("Template error: {:#}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
}

/// WebSocket handler for live reload
async fn livereload_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    let reload_rx = state.reload_tx.subscribe();
    ws.on_upgrade(move |socket| handle_livereload_socket(socket, reload_rx))
}

/// Handle WebSocket connection for live reload
async fn handle_livereload_socket(mut socket: WebSocket, mut reload_rx: broadcast::Receiver<()>) {
    tracing::debug!("Live reload client connected");

    loop {
        tokio::select! {
            result = reload_rx.recv() => {
                match result {
                    Ok(_) => {
                        if socket.send(Message::Text("reload".to_string())).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
        }
    }

    tracing::debug!("Live reload client disconnected");
}

/// Inject live reload script into HTML content
fn inject_live_reload(html: &str) -> String {
    if html.contains("</body>") {
        html.replace("</body>", LIVE_RELOAD_SCRIPT)
    } else {
        format!("{}{}", html, LIVE_RELOAD_SCRIPT)
    }
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
