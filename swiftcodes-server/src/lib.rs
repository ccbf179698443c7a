#![warn(clippy::dbg_macro)]

use std::fmt::Display;
use std::sync::Arc;

use actix_web::{HttpResponse, error::JsonPayloadError, http::StatusCode, web};
use serde::Serialize;

use crate::error::RegistryError;
use crate::metrics::RequestMetrics;

pub mod config;
pub mod error;
mod health;
pub mod metrics;
mod root;
pub mod service;
pub mod store;
mod swift_code;

const CARGO_NAME: &str = env!("CARGO_PKG_NAME");
const CARGO_VERSION: &str = env!("CARGO_PKG_VERSION");

const INTERNAL_ERROR_DETAIL: &str = "Internal server error";

#[derive(Serialize)]
struct ErrorBody<'a> {
    detail: &'a str,
}

fn error_body(status: StatusCode, detail: &str) -> HttpResponse {
    HttpResponse::build(status).json(ErrorBody { detail })
}

#[derive(Debug)]
pub struct ServerError {
    err: RegistryError,
}

impl Display for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.err)
    }
}

impl actix_web::error::ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match &self.err {
            RegistryError::NotFound(_) => StatusCode::NOT_FOUND,
            RegistryError::Conflict(_) => StatusCode::BAD_REQUEST,
            RegistryError::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            RegistryError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RegistryError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RegistryError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            // Store and I/O errors stay in the log; clients get a fixed detail.
            log::error!("{}", self.err);
            return error_body(status, INTERNAL_ERROR_DETAIL);
        }
        error_body(status, &self.err.to_string())
    }
}

impl From<RegistryError> for ServerError {
    fn from(err: RegistryError) -> ServerError {
        ServerError { err }
    }
}

type ServerResult = std::result::Result<HttpResponse, ServerError>;

/// Malformed or incomplete request bodies are rejected with 422.
fn json_error(err: JsonPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    let detail = err.to_string();
    actix_web::error::InternalError::from_response(
        err,
        error_body(StatusCode::UNPROCESSABLE_ENTITY, &detail),
    )
    .into()
}

/// Register the API routes.
///
/// Expects `web::Data<config::Config>` and `web::Data<Arc<RequestMetrics>>`
/// as app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .route("/", web::get().to(root::get))
        .route("/health", web::get().to(health::get))
        .route("/metrics", web::get().to(metrics::get))
        .service(
            web::scope("/v1/swift-codes")
                .route("", web::post().to(swift_code::create))
                .route("/country/{country_iso2}", web::get().to(swift_code::by_country))
                .route("/{swift_code}", web::get().to(swift_code::get))
                .route("/{swift_code}", web::delete().to(swift_code::delete)),
        );
}

/// Shared application state for [`configure`].
pub fn app_data(
    config: config::Config,
) -> Result<(web::Data<config::Config>, web::Data<Arc<RequestMetrics>>), RegistryError> {
    let metrics = Arc::new(RequestMetrics::new()?);
    Ok((web::Data::new(config), web::Data::new(metrics)))
}
