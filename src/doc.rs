//! OpenAPI document for the REST surface.

use utoipa::OpenApi;

use crate::inbound::http;

/// Aggregated OpenAPI description served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "potluck-backend",
        description = "Recipe sharing with creative recipe mixing"
    ),
    paths(
        http::accounts::register,
        http::accounts::login,
        http::recipes::list_owned,
        http::recipes::create,
        http::recipes::remove,
        http::recipes::toggle_public,
        http::public::list_public,
        http::public::mix,
    ),
    components(schemas(
        http::accounts::CredentialsRequest,
        http::accounts::RegisteredUserResponse,
        http::accounts::LoginResponse,
        http::recipes::CreateRecipeRequest,
        http::recipes::OwnedRecipeResponse,
        http::recipes::ToggleVisibilityRequest,
        http::recipes::VisibilityResponse,
        http::public::PublicRecipeResponse,
        http::public::MixedRecipeBody,
        http::public::MixResponse,
        http::error::ApiError,
    )),
    tags(
        (name = "accounts", description = "Registration and login"),
        (name = "recipes", description = "Recipe management and mixing")
    )
)]
pub struct ApiDoc;
