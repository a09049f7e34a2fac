use axum::{
    extract::{rejection::PathRejection, Path, Query, State},
    http::StatusCode,
    response::{Html, Json},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::pages;
use crate::error::{ApiError, ModelError};
use crate::model::{Yarn, YarnFilter, YarnId, YarnWeight};
use crate::store::traits::YarnStore;

pub type AppState<S> = Arc<S>;

pub type PageResult = Result<Html<String>, (StatusCode, Html<String>)>;

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Query string accepted by the library page and the JSON listing
#[derive(Debug, Default, Deserialize)]
pub struct LibraryQuery {
    pub weight: Option<String>,
    pub color: Option<String>,
}

impl LibraryQuery {
    pub fn to_filter(&self) -> Result<YarnFilter, ModelError> {
        let weight = match self.weight.as_deref().map(str::trim) {
            Some(w) if !w.is_empty() => Some(w.parse::<YarnWeight>()?),
            _ => None,
        };
        let color = self
            .color
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        Ok(YarnFilter { weight, color })
    }
}

#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub total: usize,
}

fn page_error(status: StatusCode, message: &str) -> (StatusCode, Html<String>) {
    let title = status.canonical_reason().unwrap_or("Error");
    (status, Html(pages::error_page(title, message)))
}

// Page handlers

pub async fn library<S: YarnStore>(
    State(store): State<AppState<S>>,
    Query(query): Query<LibraryQuery>,
) -> PageResult {
    let filter = query
        .to_filter()
        .map_err(|e| page_error(StatusCode::BAD_REQUEST, &e.to_string()))?;

    match store.list_yarns(&filter).await {
        Ok(yarns) => Ok(Html(pages::library_page(&yarns, &filter))),
        Err(e) => {
            log::error!("Failed to load library: {:#}", e);
            Err(page_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "The yarn library could not be loaded.",
            ))
        }
    }
}

pub async fn discover() -> Html<String> {
    Html(pages::discover_page())
}

pub async fn settings() -> Html<String> {
    Html(pages::settings_page())
}

pub async fn not_found() -> (StatusCode, Html<String>) {
    page_error(StatusCode::NOT_FOUND, "There is nothing at this address.")
}

// JSON handlers

pub async fn list_yarns<S: YarnStore>(
    State(store): State<AppState<S>>,
    Query(query): Query<LibraryQuery>,
) -> Result<Json<ListResponse<Yarn>>, ApiError> {
    let filter = query.to_filter()?;
    let items = store.list_yarns(&filter).await?;
    let total = items.len();
    Ok(Json(ListResponse { items, total }))
}

pub async fn get_yarn<S: YarnStore>(
    State(store): State<AppState<S>>,
    path: Result<Path<YarnId>, PathRejection>,
) -> Result<Json<Yarn>, ApiError> {
    let Path(id) = path.map_err(|e| ApiError::InvalidPath(e.body_text()))?;
    match store.get_yarn(id).await? {
        Some(yarn) => Ok(Json(yarn)),
        None => Err(ApiError::NotFound(format!("Yarn {} not found", id))),
    }
}
