use crate::error::ApiError;
use crate::schemas::{Params, UploadForm};
use askama::Template;
use axum::body::Bytes;
use axum::extract::{RawQuery, State};
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use byteshop_core::AppService;
use byteshop_db::AppSummary;
use tower_http::trace::TraceLayer;

/// Body of `GET /`
pub const GREETING: &str = "The Byte Shop";

/// Body of a successful `POST /upload`
pub const UPLOAD_ACK: &str = "OK";

/// Shared handler state
#[derive(Clone, Debug)]
pub struct AppState {
    pub service: AppService,
}

#[derive(Template)]
#[template(path = "upload.html")]
struct UploadTemplate;

/// Build the HTTP router
#[must_use]
pub fn router(service: AppService) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/apps", get(list_apps))
        .route("/listSource", get(list_source))
        .route("/upload", get(upload_form).post(upload))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { service })
}

async fn root() -> &'static str {
    GREETING
}

async fn list_apps(State(state): State<AppState>) -> Result<Json<Vec<AppSummary>>, ApiError> {
    Ok(Json(state.service.list_apps().await?))
}

/// Missing identifiers and unknown identifiers both answer with an empty body
async fn list_source(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<String, ApiError> {
    let params = Params::from_query(query.as_deref());
    let Some(identifier) = params.get("identifier") else {
        return Ok(String::new());
    };

    Ok(state
        .service
        .get_source(identifier)
        .await?
        .unwrap_or_default())
}

async fn upload_form() -> Result<Html<String>, ApiError> {
    Ok(Html(UploadTemplate.render()?))
}

/// Fields are read from the query string first, then the body, whatever its
/// content type
async fn upload(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> Result<&'static str, ApiError> {
    let params = Params::from_query(query.as_deref()).chain(Params::parse(&body));
    let form = UploadForm::from(&params);
    state.service.upload_app(form.into()).await?;
    Ok(UPLOAD_ACK)
}
