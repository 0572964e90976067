//! Request handlers.
//!
//! | Route | Response |
//! |-------|----------|
//! | `GET /` | landing carousel, mobile photos |
//! | `GET /about` | about page |
//! | `GET /portfolio` | both variants, categorized |
//! | `GET /contact` | contact form with the access key |
//! | `GET /api/photos?variant=` | JSON listing, 400 on a bad variant |
//! | `GET /photos/{variant}/{filename}` | raw file, 404 on a bad variant or missing file |
//! | `GET /view/{variant}/{filename}?from=` | single photo page |
//! | `GET /debug` | masked configuration, development mode only |
//!
//! Anything else hits [`fallback`].

use crate::config::KeyFingerprint;
use crate::error::SiteError;
use crate::filter::is_about_me;
use crate::listing::{self, PhotoListing, ReturnTo};
use crate::pages;
use crate::server::AppState;
use crate::types::Variant;
use axum::Json;
use axum::body::Body;
use axum::extract::{Path, Query, Request, State};
use axum::http::Uri;
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::{Deserialize, Serialize};
use tower::ServiceExt;
use tower_http::services::ServeFile;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let photos = listing::landing_photos(&state.store);
    Html(pages::render_index(&state.config, &photos).into_string())
}

pub async fn about(State(state): State<AppState>) -> Html<String> {
    Html(pages::render_about(&state.config, state.about_html.as_deref()).into_string())
}

pub async fn portfolio(State(state): State<AppState>) -> Html<String> {
    let portfolio = listing::portfolio(&state.store);
    Html(pages::render_portfolio(&state.config, &portfolio).into_string())
}

pub async fn contact(State(state): State<AppState>) -> Html<String> {
    Html(pages::render_contact(&state.config).into_string())
}

#[derive(Debug, Deserialize)]
pub struct PhotosQuery {
    variant: Option<String>,
}

pub async fn api_photos(
    State(state): State<AppState>,
    Query(query): Query<PhotosQuery>,
) -> Result<Json<PhotoListing>, SiteError> {
    let raw = query.variant.as_deref().unwrap_or(Variant::Desktop.as_str());
    let variant = raw.parse::<Variant>().inspect_err(|_| {
        tracing::warn!(variant = raw, "rejected listing request for unknown variant");
    })?;
    Ok(Json(listing::api_listing(&state.store, variant)))
}

/// Serve a photo straight from its variant directory.
///
/// Any file in the directory is servable. Names that are not a single path
/// component are refused before touching the filesystem.
pub async fn photo_file(
    State(state): State<AppState>,
    Path((variant, filename)): Path<(String, String)>,
    request: Request,
) -> Result<Response, SiteError> {
    let variant = parse_route_variant(&variant)?;
    let Some(path) = state.store.file_path(variant, &filename) else {
        tracing::warn!(%variant, %filename, "refused file name outside the variant directory");
        return Err(SiteError::NotFound(filename));
    };
    if !path.is_file() {
        return Err(SiteError::NotFound(filename));
    }

    let response = match ServeFile::new(path).oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    };
    Ok(response.map(Body::new))
}

#[derive(Debug, Deserialize)]
pub struct ViewQuery {
    from: Option<String>,
}

/// Single photo page. The file itself is not checked; a missing file shows
/// up as a broken image served by [`photo_file`].
pub async fn view(
    State(state): State<AppState>,
    Path((variant, filename)): Path<(String, String)>,
    Query(query): Query<ViewQuery>,
) -> Result<Html<String>, SiteError> {
    let variant = parse_route_variant(&variant)?;
    let back = ReturnTo::from_param(query.from.as_deref());
    let siblings = listing::list_photos(&state.store, variant, true);
    let (prev, next) = listing::neighbors(&siblings, &filename);
    Ok(Html(
        pages::render_view(&state.config, variant, &filename, back, prev, next).into_string(),
    ))
}

/// `/debug` payload. The access key only appears as a fingerprint.
#[derive(Debug, Serialize)]
pub struct DebugInfo {
    pub version: &'static str,
    pub static_dir: String,
    pub bind: String,
    pub development: bool,
    pub redirect_not_found: bool,
    pub access_key: KeyFingerprint,
    pub variants: Vec<VariantStatus>,
}

#[derive(Debug, Serialize)]
pub struct VariantStatus {
    pub variant: Variant,
    pub exists: bool,
    /// Images in public listings.
    pub photos: usize,
    /// Images hidden by the about-me tag.
    pub hidden: usize,
}

pub async fn debug(State(state): State<AppState>) -> Result<Json<DebugInfo>, SiteError> {
    if !state.config.development {
        return Err(SiteError::NotFound("/debug".to_string()));
    }
    let variants = Variant::ALL
        .into_iter()
        .map(|variant| {
            let names = state.store.scan(variant);
            let hidden = names.iter().filter(|n| is_about_me(n)).count();
            VariantStatus {
                variant,
                exists: state.store.variant_dir(variant).is_dir(),
                photos: names.len() - hidden,
                hidden,
            }
        })
        .collect();
    let config = &state.config;
    Ok(Json(DebugInfo {
        version: env!("CARGO_PKG_VERSION"),
        static_dir: config.static_dir.clone(),
        bind: config.bind.clone(),
        development: config.development,
        redirect_not_found: config.redirect_not_found,
        access_key: config.access_key_fingerprint(),
        variants,
    }))
}

/// Unmatched routes: home, or a plain 404 when redirects are disabled.
pub async fn fallback(State(state): State<AppState>, uri: Uri) -> Response {
    if state.config.redirect_not_found {
        tracing::debug!(%uri, "unmatched route, redirecting home");
        Redirect::to("/").into_response()
    } else {
        SiteError::NotFound(uri.to_string()).into_response()
    }
}

fn parse_route_variant(raw: &str) -> Result<Variant, SiteError> {
    raw.parse::<Variant>()
        .map_err(|e| SiteError::from(e).into_not_found())
}
