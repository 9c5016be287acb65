use axum::{routing::get, Router};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod dashboard;
pub mod entities;
pub mod error;
pub mod fundraising;
pub mod routes;

use routes::{health_check, HealthResponse};

/// Shared handler state. The database is optional so the process can start
/// without `DB_*` settings.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub db: Option<DatabaseConnection>,
}

impl AppState {
    pub fn new(db: Option<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Store bound to this state's connection, if any.
    pub fn fundraising_events(&self) -> Option<fundraising::FundraisingEventStore> {
        self.db.clone().map(fundraising::FundraisingEventStore::new)
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(routes::health::health_check),
    components(schemas(HealthResponse)),
    tags(
        (name = "donatedesk", description = "Merchant fundraising back office")
    )
)]
pub struct ApiDoc;

pub fn create_app(state: AppState) -> Router {
    let api_doc = ApiDoc::openapi();

    let api_routes = Router::new()
        .route("/health", get(health_check))
        .with_state(state);

    let docs_router = SwaggerUi::new("/docs").url("/api-doc/openapi.json", api_doc);

    Router::new()
        .merge(api_routes)
        .merge(docs_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
