//! Student progress record endpoints

use super::auth::AdminSession;
use super::{page_slice, ApiError, PageQuery};
use crate::db::student_records::{self, StudentRecord, StudentRecordDraft};
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::Json;
use hagwon_common::{grades, Error};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

/// Record as served to clients: the stored record plus display labels for
/// its grade tags (unknown stored values pass through as-is)
#[derive(Debug, Serialize)]
pub struct StudentRecordResponse {
    #[serde(flatten)]
    pub record: StudentRecord,
    pub grade_labels: Vec<String>,
}

impl From<StudentRecord> for StudentRecordResponse {
    fn from(record: StudentRecord) -> Self {
        let grade_labels = record
            .grade
            .iter()
            .map(|value| grades::label_for(value).to_string())
            .collect();
        Self {
            record,
            grade_labels,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub grade: Option<String>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct LatestQuery {
    #[serde(default = "default_latest_limit")]
    pub limit: i64,
}

fn default_latest_limit() -> i64 {
    8
}

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    pub title: String,
    #[serde(default)]
    pub grade: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub grade: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    pub id: Option<String>,
}

/// GET /api/student-records?grade=&page=&page_size=
pub async fn list_records(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<StudentRecordResponse>>, ApiError> {
    let items = match query.grade.as_deref() {
        Some(grade) if !grade.is_empty() => {
            student_records::list_by_grade(&state.db, grade).await?
        }
        _ => student_records::list(&state.db).await?,
    };

    let page = PageQuery {
        page: query.page,
        page_size: query.page_size,
    };
    let items = page_slice(items, &page);
    Ok(Json(items.into_iter().map(StudentRecordResponse::from).collect()))
}

/// GET /api/student-records/latest?limit=8 - front-page strip
pub async fn latest_records(
    State(state): State<AppState>,
    Query(query): Query<LatestQuery>,
) -> Result<Json<Vec<StudentRecordResponse>>, ApiError> {
    let items = student_records::latest(&state.db, query.limit).await?;
    Ok(Json(items.into_iter().map(StudentRecordResponse::from).collect()))
}

/// GET /api/student-records/:id - detail view
pub async fn get_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StudentRecordResponse>, ApiError> {
    let record = student_records::get(&state.db, &id).await?;
    Ok(Json(record.into()))
}

/// POST /api/student-records - create, returns the stored record
pub async fn create_record(
    State(state): State<AppState>,
    _admin: AdminSession,
    Json(req): Json<CreateRequest>,
) -> Result<Json<StudentRecordResponse>, ApiError> {
    let record = student_records::create(
        &state.db,
        StudentRecordDraft {
            title: req.title,
            grade: req.grade,
            images: req.images,
        },
    )
    .await?;
    info!("Created student record {}", record.id);
    Ok(Json(record.into()))
}

/// PUT /api/student-records - full-field replace, returns the stored record
pub async fn update_record(
    State(state): State<AppState>,
    _admin: AdminSession,
    Json(req): Json<UpdateRequest>,
) -> Result<Json<StudentRecordResponse>, ApiError> {
    let record = student_records::update(
        &state.db,
        &req.id,
        StudentRecordDraft {
            title: req.title,
            grade: req.grade,
            images: req.images,
        },
    )
    .await?;
    info!("Updated student record {}", record.id);
    Ok(Json(record.into()))
}

/// DELETE /api/student-records?id=…
pub async fn delete_record(
    State(state): State<AppState>,
    _admin: AdminSession,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<Value>, ApiError> {
    let id = query
        .id
        .ok_or_else(|| Error::Validation("ID is required".to_string()))?;
    student_records::delete(&state.db, &id).await?;
    info!("Deleted student record {}", id);
    Ok(Json(json!({ "success": true })))
}
