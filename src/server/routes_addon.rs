use crate::server::AppContext;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use greekmovies_common::ExtraArgs;
use greekmovies_scraper::{AddonRequest, AddonResponse};

pub fn addon_routes() -> Router<AppContext> {
    Router::new()
        .route("/manifest.json", get(manifest))
        .route("/:resource/:type/:id", get(resource))
        .route("/:resource/:type/:id/:extra", get(resource_with_extra))
}

async fn manifest(State(ctx): State<AppContext>) -> impl IntoResponse {
    Json(ctx.manifest.as_ref().clone())
}

async fn resource(
    State(ctx): State<AppContext>,
    Path((resource, content_type, id)): Path<(String, String, String)>,
) -> Response {
    let request = AddonRequest::new(resource, content_type, strip_json(&id));
    respond(&ctx, request).await
}

async fn resource_with_extra(
    State(ctx): State<AppContext>,
    Path((resource, content_type, id, extra)): Path<(String, String, String, String)>,
) -> Response {
    let request = AddonRequest::new(resource, content_type, id)
        .with_extra(parse_extra(strip_json(&extra)));
    respond(&ctx, request).await
}

async fn respond(ctx: &AppContext, request: AddonRequest) -> Response {
    match ctx.coordinator.handle(&request).await {
        AddonResponse::Unsupported {} => (StatusCode::NOT_FOUND, "Not found").into_response(),
        response => Json(response).into_response(),
    }
}

/// Drop the `.json` suffix clients append to the last path segment.
fn strip_json(segment: &str) -> &str {
    segment.strip_suffix(".json").unwrap_or(segment)
}

/// Parse the form-encoded extra segment (`search=...&skip=...`).
fn parse_extra(raw: &str) -> ExtraArgs {
    let search = url::form_urlencoded::parse(raw.as_bytes())
        .find(|(key, _)| key == "search")
        .map(|(_, value)| value.into_owned());
    ExtraArgs { search }
}
