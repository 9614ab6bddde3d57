//! Student progress record database operations

use super::{decode_list, encode_list, validate_grades};
use chrono::{DateTime, Utc};
use hagwon_common::{Error, Result};
use serde::Serialize;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

/// A student progress photo record
#[derive(Debug, Clone, Serialize)]
pub struct StudentRecord {
    pub id: String,
    pub title: String,
    /// Grade tags; may be empty, values from the grade catalog
    pub grade: Vec<String>,
    /// Ordered public URLs; index 0 is the representative image shown in
    /// list views. Deleting one image never reorders the others.
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields for create and full-replace update
#[derive(Debug, Clone)]
pub struct StudentRecordDraft {
    pub title: String,
    pub grade: Vec<String>,
    pub images: Vec<String>,
}

fn from_row(row: &SqliteRow) -> Result<StudentRecord> {
    let created_at_raw: String = row.get("created_at");
    let created_at = DateTime::parse_from_rfc3339(&created_at_raw)
        .map_err(|e| Error::Internal(format!("Bad created_at in student_records: {}", e)))?
        .with_timezone(&Utc);
    let grade_raw: String = row.get("grade");
    let images_raw: String = row.get("images");

    Ok(StudentRecord {
        id: row.get("id"),
        title: row.get("title"),
        grade: decode_list(&grade_raw),
        images: decode_list(&images_raw),
        created_at,
    })
}

fn validate(draft: &StudentRecordDraft) -> Result<()> {
    if draft.title.trim().is_empty() {
        return Err(Error::Validation("Title is required".to_string()));
    }
    if draft.images.is_empty() {
        return Err(Error::Validation("At least one image is required".to_string()));
    }
    validate_grades(&draft.grade)
}

/// Full ordered list, newest first
pub async fn list(pool: &SqlitePool) -> Result<Vec<StudentRecord>> {
    let rows = sqlx::query(
        "SELECT id, title, grade, images, created_at
         FROM student_records ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;

    rows.iter().map(from_row).collect()
}

/// Newest `limit` records, for the front-page strip
pub async fn latest(pool: &SqlitePool, limit: i64) -> Result<Vec<StudentRecord>> {
    let rows = sqlx::query(
        "SELECT id, title, grade, images, created_at
         FROM student_records ORDER BY created_at DESC LIMIT ?",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    rows.iter().map(from_row).collect()
}

/// Records whose grade set contains `grade` (containment, not equality)
pub async fn list_by_grade(pool: &SqlitePool, grade: &str) -> Result<Vec<StudentRecord>> {
    let rows = sqlx::query(
        "SELECT id, title, grade, images, created_at
         FROM student_records
         WHERE EXISTS (SELECT 1 FROM json_each(student_records.grade) WHERE json_each.value = ?)
         ORDER BY created_at DESC",
    )
    .bind(grade)
    .fetch_all(pool)
    .await?;

    rows.iter().map(from_row).collect()
}

/// Flattened, deduplicated grade values across all records
pub async fn used_grades(pool: &SqlitePool) -> Result<Vec<String>> {
    let rows = sqlx::query("SELECT grade FROM student_records")
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

/// Fetch one record by id, for the detail view
pub async fn get(pool: &SqlitePool, id: &str) -> Result<StudentRecord> {
    let row = sqlx::query(
        "SELECT id, title, grade, images, created_at FROM student_records WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => from_row(&row),
        None => Err(Error::NotFound(format!("student record {}", id))),
    }
}

/// Validate, assign id and timestamp, persist, return the stored record
pub async fn create(pool: &SqlitePool, draft: StudentRecordDraft) -> Result<StudentRecord> {
    validate(&draft)?;

    let record = StudentRecord {
        id: Uuid::new_v4().to_string(),
        title: draft.title,
        grade: draft.grade,
        images: draft.images,
        created_at: Utc::now(),
    };

    sqlx::query(
        "INSERT INTO student_records (id, title, grade, images, created_at)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&record.id)
    .bind(&record.title)
    .bind(encode_list(&record.grade)?)
    .bind(encode_list(&record.images)?)
    .bind(record.created_at.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(record)
}

/// Full replace of the mutable fields; created_at is never touched
///
/// Image order is taken as sent: dropping the first image promotes the next
/// one to representative without any reordering here.
pub async fn update(pool: &SqlitePool, id: &str, draft: StudentRecordDraft) -> Result<StudentRecord> {
    validate(&draft)?;

    let result = sqlx::query(
        "UPDATE student_records SET title = ?, grade = ?, images = ? WHERE id = ?",
    )
    .bind(&draft.title)
    .bind(encode_list(&draft.grade)?)
    .bind(encode_list(&draft.images)?)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("student record {}", id)));
    }

    get(pool, id).await
}

/// Hard delete; reports NotFound for an unknown id
pub async fn delete(pool: &SqlitePool, id: &str) -> Result<()> {
    let result = sqlx::query("DELETE FROM student_records WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("student record {}", id)));
    }

    Ok(())
}
