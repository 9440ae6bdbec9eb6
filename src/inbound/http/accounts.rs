//! Registration and login HTTP handlers.
//!
//! ```text
//! POST /register
//! POST /login
//! ```

use actix_web::{post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Credentials, Error, User};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::missing_field_error;
use crate::inbound::http::ApiResult;

/// Request payload for registration and login.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CredentialsRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Response payload describing a newly registered user.
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisteredUserResponse {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: Uuid,
    pub username: String,
}

impl From<User> for RegisteredUserResponse {
    fn from(value: User) -> Self {
        Self {
            id: *value.id().as_uuid(),
            username: value.username().to_string(),
        }
    }
}

/// Response payload carrying the bearer credential.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
}

fn parse_credentials(payload: CredentialsRequest) -> Result<Credentials, Error> {
    let username = payload
        .username
        .ok_or_else(|| missing_field_error("username"))?;
    let password = payload
        .password
        .ok_or_else(|| missing_field_error("password"))?;
    Credentials::try_from_parts(&username, &password)
        .map_err(|err| Error::invalid_request(err.to_string()))
}

/// Register a new user.
#[utoipa::path(
    post,
    path = "/register",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "User registered", body = RegisteredUserResponse),
        (status = 400, description = "Invalid payload or username taken", body = crate::inbound::http::ApiError)
    ),
    tags = ["accounts"],
    operation_id = "register"
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = parse_credentials(payload.into_inner())?;
    let user = state.accounts.register(&credentials).await?;
    Ok(HttpResponse::Created().json(RegisteredUserResponse::from(user)))
}

/// Exchange credentials for a bearer token.
#[utoipa::path(
    post,
    path = "/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Authenticated", body = LoginResponse),
        (status = 400, description = "Invalid payload", body = crate::inbound::http::ApiError),
        (status = 401, description = "Invalid credentials", body = crate::inbound::http::ApiError)
    ),
    tags = ["accounts"],
    operation_id = "login"
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = parse_credentials(payload.into_inner())?;
    let token = state.accounts.login(&credentials).await?;
    Ok(HttpResponse::Ok().json(LoginResponse {
        access_token: token.into(),
    }))
}
