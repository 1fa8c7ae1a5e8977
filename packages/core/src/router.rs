//! Axum routes for the local gallery
//!
//! `GET /cviz` renders a page of the gallery; `GET` on every other path is
//! treated as a local filesystem path and streamed back as-is.

use crate::files::{request_path, RawFile};
use crate::pager::{PageRequest, DEFAULT_LIMIT};
use crate::render::{GalleryPage, PageRenderer};
use crate::view_model::ViewModel;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub const GALLERY_PATH: &str = "/cviz";

/// Read-only state shared by every request
#[derive(Clone)]
pub struct GalleryState {
    pub model: Arc<ViewModel>,
    pub renderer: Arc<dyn PageRenderer>,
    pub default_limit: usize,
}

impl GalleryState {
    pub fn new(model: ViewModel, renderer: Arc<dyn PageRenderer>) -> Self {
        Self {
            model: Arc::new(model),
            renderer,
            default_limit: DEFAULT_LIMIT,
        }
    }

    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit.max(1);
        self
    }
}

/// Construct the gallery router
pub fn gallery_router(state: GalleryState) -> Router {
    Router::new()
        .route(GALLERY_PATH, get(gallery))
        .fallback(get(raw_file))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

#[tracing::instrument(name = "GET /cviz", skip_all)]
async fn gallery(
    State(state): State<Arc<GalleryState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let request = PageRequest::from_pairs(&pairs, state.default_limit);
    let window = request.window(state.model.objects.len());
    tracing::debug!(
        page = request.page,
        limit = request.limit,
        start = window.start,
        end = window.end,
        "Rendering gallery window"
    );

    let page = GalleryPage::new(&state.model, request, window);
    match state.renderer.render(&page) {
        Ok(body) => (
            [(header::CONTENT_TYPE, state.renderer.content_type())],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to render gallery");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

async fn raw_file(uri: Uri) -> Response {
    let path = request_path(uri.path());
    match RawFile::open(&path).await {
        Ok(file) => file.into_response(),
        Err(e) => e.into_response(),
    }
}
