//! Material (article) database operations

use chrono::{DateTime, Utc};
use hagwon_common::{Error, Result};
use serde::Serialize;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

/// Published article with rich HTML contents
#[derive(Debug, Clone, Serialize)]
pub struct Material {
    pub id: String,
    pub title: String,
    /// Rich HTML text; may embed `<img>` tags pointing at uploaded media
    pub contents: String,
    pub created_at: DateTime<Utc>,
}

/// Which field a substring search runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Title,
    Contents,
}

fn from_row(row: &SqliteRow) -> Result<Material> {
    let created_at_raw: String = row.get("created_at");
    let created_at = DateTime::parse_from_rfc3339(&created_at_raw)
        .map_err(|e| Error::Internal(format!("Bad created_at in materials: {}", e)))?
        .with_timezone(&Utc);

    Ok(Material {
        id: row.get("id"),
        title: row.get("title"),
        contents: row.get("contents"),
        created_at,
    })
}

/// Full ordered list, newest first
pub async fn list(pool: &SqlitePool) -> Result<Vec<Material>> {
    let rows = sqlx::query(
        "SELECT id, title, contents, created_at FROM materials ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;

    rows.iter().map(from_row).collect()
}

/// Newest `limit` materials, for the announcements strip
pub async fn latest(pool: &SqlitePool, limit: i64) -> Result<Vec<Material>> {
    let rows = sqlx::query(
        "SELECT id, title, contents, created_at FROM materials
         ORDER BY created_at DESC LIMIT ?",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    rows.iter().map(from_row).collect()
}

/// Case-insensitive substring search against one field
///
/// An empty term returns the unfiltered list. SQLite LIKE is already
/// case-insensitive for ASCII; Korean text has no case to fold.
pub async fn search(pool: &SqlitePool, term: &str, field: SearchField) -> Result<Vec<Material>> {
    if term.trim().is_empty() {
        return list(pool).await;
    }

    let sql = match field {
        SearchField::Title => {
            "SELECT id, title, contents, created_at FROM materials
             WHERE title LIKE ? ORDER BY created_at DESC"
        }
        SearchField::Contents => {
            "SELECT id, title, contents, created_at FROM materials
             WHERE contents LIKE ? ORDER BY created_at DESC"
        }
    };

    let rows = sqlx::query(sql)
        .bind(format!("%{}%", term))
        .fetch_all(pool)
        .await?;

    rows.iter().map(from_row).collect()
}

/// Fetch one material by id
pub async fn get(pool: &SqlitePool, id: &str) -> Result<Material> {
    let row = sqlx::query("SELECT id, title, contents, created_at FROM materials WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    match row {
        Some(row) => from_row(&row),
        None => Err(Error::NotFound(format!("material {}", id))),
    }
}

/// Validate, assign id and timestamp, persist, return the stored record
pub async fn create(pool: &SqlitePool, title: &str, contents: &str) -> Result<Material> {
    if title.trim().is_empty() || contents.trim().is_empty() {
        return Err(Error::Validation("Title and contents are required".to_string()));
    }

    let material = Material {
        id: Uuid::new_v4().to_string(),
        title: title.to_string(),
        contents: contents.to_string(),
        created_at: Utc::now(),
    };

    sqlx::query("INSERT INTO materials (id, title, contents, created_at) VALUES (?, ?, ?, ?)")
        .bind(&material.id)
        .bind(&material.title)
        .bind(&material.contents)
        .bind(material.created_at.to_rfc3339())
        .execute(pool)
        .await?;

    Ok(material)
}

/// Full replace of the mutable fields; created_at is never touched
pub async fn update(pool: &SqlitePool, id: &str, title: &str, contents: &str) -> Result<Material> {
    if title.trim().is_empty() || contents.trim().is_empty() {
        return Err(Error::Validation("Title and contents are required".to_string()));
    }

    let result = sqlx::query("UPDATE materials SET title = ?, contents = ? WHERE id = ?")
        .bind(title)
        .bind(contents)
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("material {}", id)));
    }

    get(pool, id).await
}

/// Hard delete; reports NotFound for an unknown id
pub async fn delete(pool: &SqlitePool, id: &str) -> Result<()> {
    let result = sqlx::query("DELETE FROM materials WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("material {}", id)));
    }

    Ok(())
}
