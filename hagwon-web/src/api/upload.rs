//! Image upload endpoints - the media ingestion pipeline
//!
//! Multipart `file` field in, `{url, path}` out. Two call sites with
//! distinct size ceilings and storage prefixes; the pipeline itself does not
//! know which content kind the image is for. Either a public URL is
//! returned or an error is raised; there is no partial-upload state.

use super::auth::AdminSession;
use super::ApiError;
use crate::AppState;
use axum::extract::{Multipart, State};
use axum::Json;
use chrono::Utc;
use hagwon_common::Error;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// MIME types accepted by the pipeline
const ACCEPTED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Size ceiling for article images
pub const MATERIAL_IMAGE_LIMIT: usize = 5 * 1024 * 1024;

/// Size ceiling for student record images
pub const STUDENT_RECORD_IMAGE_LIMIT: usize = 10 * 1024 * 1024;

/// Request body cap: the largest ceiling plus multipart framing headroom
pub const UPLOAD_BODY_CEILING: usize = STUDENT_RECORD_IMAGE_LIMIT + 2 * 1024 * 1024;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Stable public URL for embedding in content
    pub url: String,
    /// Storage path under the media root
    pub path: String,
}

/// POST /api/upload - article images, stored under `materials/`
pub async fn upload_material_image(
    State(state): State<AppState>,
    _admin: AdminSession,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    store_upload(&state, multipart, "materials", MATERIAL_IMAGE_LIMIT).await
}

/// POST /api/upload-student-records - record images, stored under
/// `student-records/`
pub async fn upload_student_record_image(
    State(state): State<AppState>,
    _admin: AdminSession,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    store_upload(&state, multipart, "student-records", STUDENT_RECORD_IMAGE_LIMIT).await
}

async fn store_upload(
    state: &AppState,
    mut multipart: Multipart,
    prefix: &str,
    limit: usize,
) -> Result<Json<UploadResponse>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::Validation(format!("Malformed multipart request: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let mime = field.content_type().unwrap_or_default().to_string();
        let original_name = field.file_name().unwrap_or("upload").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| Error::Validation(format!("Failed to read upload: {}", e)))?;

        // Type check comes first: a wrong format is rejected regardless of
        // size
        if !ACCEPTED_IMAGE_TYPES.contains(&mime.as_str()) {
            return Err(Error::UnsupportedType {
                mime,
                accepted: ACCEPTED_IMAGE_TYPES.join(", "),
            }
            .into());
        }
        if data.len() > limit {
            return Err(Error::FileTooLarge {
                size: data.len(),
                limit,
            }
            .into());
        }

        let rel_path = format!("{}/{}", prefix, generated_name(&original_name));
        let dest = state.config.media_dir().join(&rel_path);
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Storage(format!("Failed to prepare media dir: {}", e)))?;
        }
        // Never replace an existing object; the random suffix makes a
        // collision vanishingly unlikely, so treat one as a hard failure
        if dest.exists() {
            return Err(Error::Storage(format!("Upload path collision: {}", rel_path)).into());
        }

        tokio::fs::write(&dest, &data)
            .await
            .map_err(|e| Error::Storage(format!("Failed to store image: {}", e)))?;

        let url = format!(
            "{}/media/{}",
            state.config.public_base_url.trim_end_matches('/'),
            rel_path
        );
        info!("Stored upload {} ({} bytes)", rel_path, data.len());

        return Ok(Json(UploadResponse {
            url,
            path: rel_path,
        }));
    }

    Err(Error::Validation("No file provided".to_string()).into())
}

/// Collision-resistant stored name: millisecond timestamp, random suffix,
/// original extension
fn generated_name(original_name: &str) -> String {
    let ext = Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("bin");
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(char::from)
        .collect();
    format!("{}-{}.{}", Utc::now().timestamp_millis(), suffix, ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_name_keeps_extension() {
        let name = generated_name("photo.JPG");
        assert!(name.ends_with(".JPG"));
        // timestamp-suffix.ext
        assert_eq!(name.matches('-').count(), 1);
    }

    #[test]
    fn test_generated_name_without_extension() {
        let name = generated_name("photo");
        assert!(name.ends_with(".bin"));
    }

    #[test]
    fn test_generated_names_differ() {
        assert_ne!(generated_name("a.png"), generated_name("a.png"));
    }
}
