//! Material (article) endpoints

use super::auth::AdminSession;
use super::{page_slice, ApiError, PageQuery};
use crate::db::materials::{self, Material, SearchField};
use crate::AppState;
use axum::extract::{Query, State};
use axum::Json;
use hagwon_common::Error;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Substring to search for; absent or blank lists everything
    pub search: Option<String>,
    /// "title" (default) or "contents"
    pub field: Option<String>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct LatestQuery {
    #[serde(default = "default_latest_limit")]
    pub limit: i64,
}

fn default_latest_limit() -> i64 {
    5
}

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    pub title: String,
    pub contents: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    pub id: String,
    pub title: String,
    pub contents: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    pub id: Option<String>,
}

/// GET /api/materials?search=&field=title|contents&page=&page_size=
pub async fn list_materials(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Material>>, ApiError> {
    let items = match query.search.as_deref() {
        Some(term) if !term.trim().is_empty() => {
            let field = match query.field.as_deref() {
                None | Some("title") => SearchField::Title,
                Some("contents") => SearchField::Contents,
                Some(other) => {
                    return Err(
                        Error::Validation(format!("Unknown search field: {}", other)).into()
                    );
                }
            };
            materials::search(&state.db, term, field).await?
        }
        _ => materials::list(&state.db).await?,
    };

    let page = PageQuery {
        page: query.page,
        page_size: query.page_size,
    };
    Ok(Json(page_slice(items, &page)))
}

/// GET /api/materials/latest?limit=5 - announcements strip
pub async fn latest_materials(
    State(state): State<AppState>,
    Query(query): Query<LatestQuery>,
) -> Result<Json<Vec<Material>>, ApiError> {
    let items = materials::latest(&state.db, query.limit).await?;
    Ok(Json(items))
}

/// POST /api/materials - create, returns the stored record
pub async fn create_material(
    State(state): State<AppState>,
    _admin: AdminSession,
    Json(req): Json<CreateRequest>,
) -> Result<Json<Material>, ApiError> {
    let material = materials::create(&state.db, &req.title, &req.contents).await?;
    info!("Created material {}", material.id);
    Ok(Json(material))
}

/// PUT /api/materials - full-field replace, returns the stored record
pub async fn update_material(
    State(state): State<AppState>,
    _admin: AdminSession,
    Json(req): Json<UpdateRequest>,
) -> Result<Json<Material>, ApiError> {
    let material = materials::update(&state.db, &req.id, &req.title, &req.contents).await?;
    info!("Updated material {}", material.id);
    Ok(Json(material))
}

/// DELETE /api/materials?id=…
pub async fn delete_material(
    State(state): State<AppState>,
    _admin: AdminSession,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<Value>, ApiError> {
    let id = query
        .id
        .ok_or_else(|| Error::Validation("ID is required".to_string()))?;
    materials::delete(&state.db, &id).await?;
    info!("Deleted material {}", id);
    Ok(Json(json!({ "success": true })))
}
