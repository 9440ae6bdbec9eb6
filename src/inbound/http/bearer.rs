//! Bearer-credential extraction for authenticated handlers.
//!
//! Keep the HTTP modules focused on request/response mapping by concentrating
//! header parsing and token verification here. Handlers declare an
//! [`AuthenticatedUser`] parameter and receive a verified identity value,
//! which then travels the call chain explicitly.

use std::future::{ready, Ready};

use actix_web::http::header;
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use tracing::debug;

use crate::domain::{Error, UserId};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiError;

const BEARER_PREFIX: &str = "Bearer ";

/// Identity proven by the bearer credential on the current request.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(UserId);

impl AuthenticatedUser {
    /// The verified user id.
    pub fn user_id(&self) -> &UserId {
        &self.0
    }
}

fn extract(req: &HttpRequest) -> Result<AuthenticatedUser, ApiError> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| ApiError::from(Error::internal("http state is not configured")))?;

    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ApiError::from(Error::unauthorized("missing bearer token")))?;
    let token = header_value
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::from(Error::unauthorized("missing bearer token")))?;

    match state.tokens.verify(token) {
        Ok(user_id) => Ok(AuthenticatedUser(user_id)),
        Err(error) => {
            debug!(error = %error, "bearer token rejected");
            Err(ApiError::from(Error::unauthorized("invalid bearer token")))
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract(req))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for bearer extraction at the request level.
    use super::*;
    use crate::domain::ports::{TokenError, TokenIssuer};
    use crate::domain::AccessToken;
    use actix_web::http::StatusCode;
    use actix_web::{test, App, HttpResponse};
    use rstest::rstest;
    use std::sync::Arc;

    const KNOWN_TOKEN: &str = "known-token";
    const KNOWN_USER: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    struct SingleTokenIssuer;

    impl TokenIssuer for SingleTokenIssuer {
        fn issue(&self, _user: &UserId) -> Result<AccessToken, TokenError> {
            Ok(AccessToken::new(KNOWN_TOKEN))
        }

        fn verify(&self, token: &str) -> Result<UserId, TokenError> {
            if token == KNOWN_TOKEN {
                UserId::parse(KNOWN_USER).map_err(|_| TokenError::MissingSubject)
            } else {
                Err(TokenError::InvalidSignature)
            }
        }
    }

    fn state() -> HttpState {
        use crate::domain::ports::{InMemoryRecipeStore, InMemoryUserStore};
        use crate::domain::{OwnedRecipeService, PasswordAccountService, PublicRecipeMixService};
        use crate::domain::ports::{PasswordHashError, PasswordHasher};

        struct NoopHasher;
        impl PasswordHasher for NoopHasher {
            fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
                Ok(password.to_owned())
            }
            fn verify(&self, password: &str, stored: &str) -> Result<bool, PasswordHashError> {
                Ok(password == stored)
            }
        }

        let users = Arc::new(InMemoryUserStore::default());
        let recipes = Arc::new(InMemoryRecipeStore::new(users.clone()));
        let tokens = Arc::new(SingleTokenIssuer);
        HttpState::new(
            Arc::new(PasswordAccountService::new(
                users,
                Arc::new(NoopHasher),
                tokens.clone(),
            )),
            Arc::new(OwnedRecipeService::new(recipes.clone())),
            Arc::new(PublicRecipeMixService::new(recipes, None)),
            tokens,
        )
    }

    async fn whoami(identity: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(identity.user_id().to_string())
    }

    #[actix_web::test]
    async fn valid_tokens_resolve_the_user() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/whoami")
                .insert_header((header::AUTHORIZATION, format!("Bearer {KNOWN_TOKEN}")))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        assert_eq!(body, KNOWN_USER);
    }

    #[rstest]
    #[case::missing_header(None)]
    #[case::wrong_scheme(Some("Basic abc"))]
    #[case::empty_token(Some("Bearer "))]
    #[case::unknown_token(Some("Bearer forged"))]
    #[actix_web::test]
    async fn bad_credentials_are_unauthorised(#[case] header_value: Option<&str>) {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let mut request = test::TestRequest::get().uri("/whoami");
        if let Some(value) = header_value {
            request = request.insert_header((header::AUTHORIZATION, value));
        }
        let res = test::call_service(&app, request.to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
