//! Grade catalog endpoints

use super::ApiError;
use crate::{db, AppState};
use axum::extract::{Query, State};
use axum::Json;
use hagwon_common::grades::{self, GradeOption};
use hagwon_common::Error;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ActiveQuery {
    /// Which collection's tag usage to scan: "lectures" (default) or
    /// "student-records"
    pub scope: Option<String>,
}

/// GET /api/grades - the full fixed catalog, in display order
pub async fn list_all_grades() -> Json<Vec<GradeOption>> {
    Json(grades::GRADE_OPTIONS.to_vec())
}

/// GET /api/grades/active?scope=lectures|student-records
///
/// Catalog entries currently used by at least one record in the scoped
/// collection. Recomputed by full scan on every call.
pub async fn active_grades(
    State(state): State<AppState>,
    Query(query): Query<ActiveQuery>,
) -> Result<Json<Vec<GradeOption>>, ApiError> {
    let used = match query.scope.as_deref().unwrap_or("lectures") {
        "lectures" => db::lectures::used_grades(&state.db).await?,
        "student-records" => db::student_records::used_grades(&state.db).await?,
        other => {
            return Err(Error::Validation(format!("Unknown scope: {}", other)).into());
        }
    };

    Ok(Json(grades::active_options(&used)))
}
