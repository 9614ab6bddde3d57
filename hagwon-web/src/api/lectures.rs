//! Lecture video entry endpoints

use super::auth::AdminSession;
use super::ApiError;
use crate::db::lectures::{self, Lecture, LectureDraft};
use crate::AppState;
use axum::extract::{Query, State};
use axum::Json;
use hagwon_common::{grades, video, Error};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Grade value to filter by (containment against each entry's tag set)
    pub grade: Option<String>,
}

/// Lecture as served to clients: the stored record plus the derived
/// embed URL and display labels, so views never re-derive them
#[derive(Debug, Serialize)]
pub struct LectureResponse {
    #[serde(flatten)]
    pub lecture: Lecture,
    pub embed_url: String,
    pub grade_labels: Vec<String>,
}

impl From<Lecture> for LectureResponse {
    fn from(lecture: Lecture) -> Self {
        let embed_url = video::embed_url(&lecture.youtube_url);
        let grade_labels = lecture
            .grade
            .iter()
            .map(|value| grades::label_for(value).to_string())
            .collect();
        Self {
            lecture,
            embed_url,
            grade_labels,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    pub title: String,
    pub description: Option<String>,
    pub youtube_url: String,
    pub grade: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub youtube_url: String,
    pub grade: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    pub id: Option<String>,
}

/// GET /api/lectures?grade=…
pub async fn list_lectures(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<LectureResponse>>, ApiError> {
    let items = match query.grade.as_deref() {
        Some(grade) if !grade.is_empty() => lectures::list_by_grade(&state.db, grade).await?,
        _ => lectures::list(&state.db).await?,
    };
    Ok(Json(items.into_iter().map(LectureResponse::from).collect()))
}

/// POST /api/lectures - create, returns the stored record
pub async fn create_lecture(
    State(state): State<AppState>,
    _admin: AdminSession,
    Json(req): Json<CreateRequest>,
) -> Result<Json<LectureResponse>, ApiError> {
    let lecture = lectures::create(
        &state.db,
        LectureDraft {
            title: req.title,
            description: req.description,
            youtube_url: req.youtube_url,
            grade: req.grade,
        },
    )
    .await?;
    info!("Created lecture {}", lecture.id);
    Ok(Json(lecture.into()))
}

/// PUT /api/lectures - full-field replace, returns the stored record
pub async fn update_lecture(
    State(state): State<AppState>,
    _admin: AdminSession,
    Json(req): Json<UpdateRequest>,
) -> Result<Json<LectureResponse>, ApiError> {
    let lecture = lectures::update(
        &state.db,
        &req.id,
        LectureDraft {
            title: req.title,
            description: req.description,
            youtube_url: req.youtube_url,
            grade: req.grade,
        },
    )
    .await?;
    info!("Updated lecture {}", lecture.id);
    Ok(Json(lecture.into()))
}

/// DELETE /api/lectures?id=…
pub async fn delete_lecture(
    State(state): State<AppState>,
    _admin: AdminSession,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<Value>, ApiError> {
    let id = query
        .id
        .ok_or_else(|| Error::Validation("ID is required".to_string()))?;
    lectures::delete(&state.db, &id).await?;
    info!("Deleted lecture {}", id);
    Ok(Json(json!({ "success": true })))
}
