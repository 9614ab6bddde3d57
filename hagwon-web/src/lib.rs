//! hagwon-web library - academy website content service
//!
//! Public browse API plus token-authenticated admin mutation API over the
//! shared content store, and the media upload/serving path.

use axum::Router;
use hagwon_common::config::Config;
use sqlx::SqlitePool;
use std::sync::Arc;

pub mod api;
pub mod db;
pub mod session;

use session::SessionStore;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Resolved service configuration
    pub config: Arc<Config>,
    /// Admin session tokens
    pub sessions: SessionStore,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, config: Config) -> Self {
        let sessions = SessionStore::new(config.session_ttl_minutes);
        Self {
            db,
            config: Arc::new(config),
            sessions,
        }
    }
}

/// Build application router
///
/// Reads are public; mutations and uploads check an admin session token via
/// the [`api::auth::AdminSession`] extractor. Published media is served
/// straight off the media directory.
pub fn build_router(state: AppState) -> Router {
    use axum::extract::DefaultBodyLimit;
    use axum::routing::{get, post};
    use tower_http::cors::CorsLayer;
    use tower_http::services::ServeDir;
    use tower_http::trace::TraceLayer;

    let media_dir = state.config.media_dir();

    Router::new()
        .route(
            "/api/materials",
            get(api::materials::list_materials)
                .post(api::materials::create_material)
                .put(api::materials::update_material)
                .delete(api::materials::delete_material),
        )
        .route("/api/materials/latest", get(api::materials::latest_materials))
        .route(
            "/api/lectures",
            get(api::lectures::list_lectures)
                .post(api::lectures::create_lecture)
                .put(api::lectures::update_lecture)
                .delete(api::lectures::delete_lecture),
        )
        .route(
            "/api/student-records",
            get(api::student_records::list_records)
                .post(api::student_records::create_record)
                .put(api::student_records::update_record)
                .delete(api::student_records::delete_record),
        )
        .route(
            "/api/student-records/latest",
            get(api::student_records::latest_records),
        )
        .route("/api/student-records/:id", get(api::student_records::get_record))
        .route("/api/grades", get(api::grades::list_all_grades))
        .route("/api/grades/active", get(api::grades::active_grades))
        .route("/api/upload", post(api::upload::upload_material_image))
        .route(
            "/api/upload-student-records",
            post(api::upload::upload_student_record_image),
        )
        .route("/api/admin/login", post(api::auth::login))
        .route("/api/admin/logout", post(api::auth::logout))
        .nest_service("/media", ServeDir::new(media_dir))
        .merge(api::health::health_routes())
        // Default axum body limit is 2MB; uploads need headroom for the
        // largest ceiling plus multipart framing
        .layer(DefaultBodyLimit::max(api::upload::UPLOAD_BODY_CEILING))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
