//! HTTP server: shared state, router, and the listen loop.
//!
//! Every response, fallbacks and errors included, carries
//! `X-Frame-Options: SAMEORIGIN`.

use crate::config::{ConfigError, SiteConfig};
use crate::pages;
use crate::routes;
use crate::scan::PhotoStore;
use axum::Router;
use axum::http::HeaderValue;
use axum::http::header::X_FRAME_OPTIONS;
use axum::routing::get;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

#[derive(Error, Debug)]
pub enum ServeError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// State shared by all handlers. Read-only after startup.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<SiteConfig>,
    pub store: PhotoStore,
    /// Rendered `about.md`, if the site root has one.
    pub about_html: Option<Arc<str>>,
}

impl AppState {
    pub fn new(config: SiteConfig) -> Self {
        let store = PhotoStore::new(&config.static_dir);
        Self {
            config: Arc::new(config),
            store,
            about_html: None,
        }
    }

    /// State for a site rooted at `root`, picking up `root/about.md`.
    pub fn load(config: SiteConfig, root: &Path) -> Result<Self, ServeError> {
        let mut state = Self::new(config);
        let about_path = root.join("about.md");
        if about_path.is_file() {
            let markdown = fs::read_to_string(&about_path)?;
            state.about_html = Some(pages::markdown_to_html(&markdown).into());
            tracing::debug!(path = %about_path.display(), "loaded about page");
        }
        Ok(state)
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/about", get(routes::about))
        .route("/portfolio", get(routes::portfolio))
        .route("/contact", get(routes::contact))
        .route("/api/photos", get(routes::api_photos))
        .route("/photos/{variant}/{filename}", get(routes::photo_file))
        .route("/view/{variant}/{filename}", get(routes::view))
        .route("/debug", get(routes::debug))
        .fallback(routes::fallback)
        .with_state(state)
        .layer(SetResponseHeaderLayer::overriding(
            X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(TraceLayer::new_for_http())
}

/// Bind the configured address and serve until Ctrl-C.
pub async fn serve(state: AppState) -> Result<(), ServeError> {
    let addr = state.config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        %addr,
        photos = %state.store.root().display(),
        development = state.config.development,
        "serving portfolio"
    );
    if state.config.access_key.is_empty() {
        tracing::warn!("ACCESS_KEY is not set; the contact form will be rejected by the form service");
    }

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    #[test]
    fn load_without_about_md() {
        let tmp = photo_store(&[]);
        let state = AppState::load(test_config(tmp.path()), tmp.path()).unwrap();
        assert!(state.about_html.is_none());
        assert_eq!(state.store.root(), tmp.path());
    }

    #[test]
    fn load_renders_about_md() {
        let tmp = photo_store(&[]);
        fs::write(tmp.path().join("about.md"), "# Behind the lens").unwrap();

        let state = AppState::load(test_config(tmp.path()), tmp.path()).unwrap();
        assert_eq!(
            state.about_html.as_deref().map(str::trim),
            Some("<h1>Behind the lens</h1>")
        );
    }
}
