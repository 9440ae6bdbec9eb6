//! HTTP inbound adapter exposing REST endpoints.

pub mod accounts;
pub mod bearer;
pub mod error;
pub mod public;
pub mod recipes;
pub mod state;
pub mod validation;

pub use error::{ApiError, ApiResult};

use actix_web::web;
use utoipa::OpenApi;

use crate::doc::ApiDoc;

/// Register every route on the given service config.
///
/// Used by the server bootstrap and by HTTP-level tests so both always run
/// the same routing table.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(accounts::register)
        .service(accounts::login)
        .service(recipes::list_owned)
        .service(recipes::create)
        .service(recipes::remove)
        .service(recipes::toggle_public)
        .service(public::list_public)
        .service(public::mix)
        .route(
            "/api-docs/openapi.json",
            web::get().to(|| async { web::Json(ApiDoc::openapi()) }),
        );
}
