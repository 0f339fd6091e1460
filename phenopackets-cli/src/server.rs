//! HTTP front end for the structural validator.

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Query, Request},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use phenopackets::{SchemaVersion, TermFindings, ValidateError, ValidationResult};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

use crate::logging::LoggingMiddleware;

/// Field path used by `/ontology-term` when the caller gives none.
pub const DEFAULT_TERM_PATH: &str = "term";

/// Address and verbosity of the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub verbose: u8,
}

/// Hard validation failure, rendered as `400 {"error": "..."}`.
pub struct ApiError(ValidateError);

impl From<ValidateError> for ApiError {
    fn from(err: ValidateError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": self.0.to_string() })),
        )
            .into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct ValidateQuery {
    pub version: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TermQuery {
    pub path: Option<String>,
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn validate_document(
    Query(query): Query<ValidateQuery>,
    body: String,
) -> Result<Json<ValidationResult>, ApiError> {
    let version = query
        .version
        .unwrap_or_else(|| SchemaVersion::default().as_str().to_owned());
    let result = phenopackets::validate_json_str(&body, &version)?;
    tracing::debug!(
        version = %version,
        errors = result.errors().len(),
        warnings = result.warnings().len(),
        "validated request body"
    );
    Ok(Json(result))
}

async fn check_ontology_term(
    Query(query): Query<TermQuery>,
    body: String,
) -> Result<Json<TermFindings>, ApiError> {
    let term = phenopackets::parse_document(&body)?;
    let path = query.path.as_deref().unwrap_or(DEFAULT_TERM_PATH);
    Ok(Json(phenopackets::validate_ontology_term(&term, path)))
}

/// Build the application router.
#[must_use]
pub fn router(verbose: u8) -> Router {
    let logging = LoggingMiddleware::new(verbose);
    Router::new()
        .route("/health", get(health))
        .route("/validate", post(validate_document))
        .route("/ontology-term", post(check_ontology_term))
        .layer(middleware::from_fn(move |request: Request, next: Next| {
            let logging = logging.clone();
            async move { logging.handle(request, next).await }
        }))
        .layer(TraceLayer::new_for_http())
}

/// Bind and serve until the process is stopped.
///
/// # Errors
///
/// Returns an error if the address cannot be bound.
pub async fn serve(config: &ServerConfig) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", config.host, config.port))?;

    tracing::info!(addr = %listener.local_addr()?, "phenopackets server listening");
    axum::serve(listener, router(config.verbose)).await?;
    Ok(())
}
