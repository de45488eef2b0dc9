pub mod admin;
pub mod catalog;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod media;
pub mod mixins;
pub mod models;
pub mod routes;
pub mod templates;
pub mod validation;

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::{catalog::Catalog, config::Config, media::MediaStore};

pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Catalog,
    pub media: MediaStore,
}

impl AppState {
    pub async fn from_config(config: Config) -> anyhow::Result<Arc<Self>> {
        let db = db::connect_and_migrate(&config.database_url).await?;
        let catalog = Catalog::new(db, config.list_per_page);
        let media = MediaStore::new(config.media_root.clone());
        Ok(Arc::new(Self { config: Arc::new(config), catalog, media }))
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let media = ServeDir::new(state.media.root());
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/", get(routes::root))
        .route("/admin", get(routes::index))
        .route("/admin/genres", get(routes::list_genres))
        .route("/admin/genres/add", get(routes::add_genre).post(routes::create_genre))
        .route("/admin/genres/{id}", get(routes::change_genre).post(routes::update_genre))
        .route(
            "/admin/genres/{id}/delete",
            get(routes::confirm_delete_genre).post(routes::delete_genre),
        )
        .route("/admin/persons", get(routes::list_persons))
        .route("/admin/persons/add", get(routes::add_person).post(routes::create_person))
        .route("/admin/persons/{id}", get(routes::change_person).post(routes::update_person))
        .route(
            "/admin/persons/{id}/delete",
            get(routes::confirm_delete_person).post(routes::delete_person),
        )
        .route("/admin/filmworks", get(routes::list_filmworks))
        .route("/admin/filmworks/add", get(routes::add_filmwork).post(routes::create_filmwork))
        .route("/admin/filmworks/{id}", get(routes::change_filmwork).post(routes::update_filmwork))
        .route(
            "/admin/filmworks/{id}/delete",
            get(routes::confirm_delete_filmwork).post(routes::delete_filmwork),
        )
        .route("/admin/filmworks/{id}/genres", post(routes::add_genre_link))
        .route("/admin/filmworks/{id}/genres/{link}/delete", post(routes::remove_genre_link))
        .route("/admin/filmworks/{id}/persons", post(routes::add_person_link))
        .route("/admin/filmworks/{id}/persons/{link}/delete", post(routes::remove_person_link))
        .nest_service("/media", media)
        .with_state(state)
        .layer(body_limit)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}
