//! Lecture video entry database operations

use super::{decode_list, encode_list, validate_grades};
use chrono::{DateTime, Utc};
use hagwon_common::{video, Error, Result};
use serde::Serialize;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

/// A published lecture video entry
#[derive(Debug, Clone, Serialize)]
pub struct Lecture {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    /// As pasted by the admin; normalized to the embed form at render time
    pub youtube_url: String,
    /// Grade tags; non-empty, values from the grade catalog
    pub grade: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields for create and full-replace update
#[derive(Debug, Clone)]
pub struct LectureDraft {
    pub title: String,
    pub description: Option<String>,
    pub youtube_url: String,
    pub grade: Vec<String>,
}

fn from_row(row: &SqliteRow) -> Result<Lecture> {
    let created_at_raw: String = row.get("created_at");
    let created_at = DateTime::parse_from_rfc3339(&created_at_raw)
        .map_err(|e| Error::Internal(format!("Bad created_at in lectures: {}", e)))?
        .with_timezone(&Utc);
    let grade_raw: String = row.get("grade");

    Ok(Lecture {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        youtube_url: row.get("youtube_url"),
        grade: decode_list(&grade_raw),
        created_at,
    })
}

fn validate(draft: &LectureDraft) -> Result<()> {
    if draft.title.trim().is_empty() {
        return Err(Error::Validation("Title is required".to_string()));
    }
    if video::video_id(&draft.youtube_url).is_none() {
        return Err(Error::Validation(
            "youtube_url must be a youtube.com/watch or youtu.be link".to_string(),
        ));
    }
    if draft.grade.is_empty() {
        return Err(Error::Validation("At least one grade is required".to_string()));
    }
    validate_grades(&draft.grade)
}

/// Full ordered list, newest first
pub async fn list(pool: &SqlitePool) -> Result<Vec<Lecture>> {
    let rows = sqlx::query(
        "SELECT id, title, description, youtube_url, grade, created_at
         FROM lectures ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;

    rows.iter().map(from_row).collect()
}

/// Lectures whose grade set contains `grade`
///
/// Containment, not equality: a lecture tagged for several grades matches
/// any one of them.
pub async fn list_by_grade(pool: &SqlitePool, grade: &str) -> Result<Vec<Lecture>> {
    let rows = sqlx::query(
        "SELECT id, title, description, youtube_url, grade, created_at
         FROM lectures
         WHERE EXISTS (SELECT 1 FROM json_each(lectures.grade) WHERE json_each.value = ?)
         ORDER BY created_at DESC",
    )
    .bind(grade)
    .fetch_all(pool)
    .await?;

    rows.iter().map(from_row).collect()
}

/// Flattened, deduplicated grade values across all lectures
///
/// Full scan per call; fine at the expected volume of tens to low hundreds
/// of records.
pub async fn used_grades(pool: &SqlitePool) -> Result<Vec<String>> {
    let rows = sqlx::query("SELECT grade FROM lectures")
        .fetch_all(pool)
        .await?;

    let mut used: Vec<String> = Vec::new();
    for row in &rows {
        let grade_raw: String = row.get("grade");
        for value in decode_list(&grade_raw) {
            if !used.contains(&value) {
                used.push(value);
            }
        }
    }
    Ok(used)
}

/// Fetch one lecture by id
pub async fn get(pool: &SqlitePool, id: &str) -> Result<Lecture> {
    let row = sqlx::query(
        "SELECT id, title, description, youtube_url, grade, created_at
         FROM lectures WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => from_row(&row),
        None => Err(Error::NotFound(format!("lecture {}", id))),
    }
}

/// Validate, assign id and timestamp, persist, return the stored record
pub async fn create(pool: &SqlitePool, draft: LectureDraft) -> Result<Lecture> {
    validate(&draft)?;

    let lecture = Lecture {
        id: Uuid::new_v4().to_string(),
        title: draft.title,
        description: draft.description,
        youtube_url: draft.youtube_url,
        grade: draft.grade,
        created_at: Utc::now(),
    };

    sqlx::query(
        "INSERT INTO lectures (id, title, description, youtube_url, grade, created_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&lecture.id)
    .bind(&lecture.title)
    .bind(&lecture.description)
    .bind(&lecture.youtube_url)
    .bind(encode_list(&lecture.grade)?)
    .bind(lecture.created_at.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(lecture)
}

/// Full replace of the mutable fields; created_at is never touched
pub async fn update(pool: &SqlitePool, id: &str, draft: LectureDraft) -> Result<Lecture> {
    validate(&draft)?;

    let result = sqlx::query(
        "UPDATE lectures SET title = ?, description = ?, youtube_url = ?, grade = ?
         WHERE id = ?",
    )
    .bind(&draft.title)
    .bind(&draft.description)
    .bind(&draft.youtube_url)
    .bind(encode_list(&draft.grade)?)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("lecture {}", id)));
    }

    get(pool, id).await
}

/// Hard delete; reports NotFound for an unknown id
pub async fn delete(pool: &SqlitePool, id: &str) -> Result<()> {
    let result = sqlx::query("DELETE FROM lectures WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("lecture {}", id)));
    }

    Ok(())
}
