//! Request-level coverage of the REST surface over in-memory adapters.

use std::sync::Arc;
use std::time::Duration;

use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use serde_json::{json, Value};

use backend::domain::ports::{
    FixtureGenerationSource, GenerationSource, InMemoryRecipeStore, InMemoryUserStore,
};
use backend::domain::{OwnedRecipeService, PasswordAccountService, PublicRecipeMixService};
use backend::inbound::http::{self, state::HttpState};
use backend::outbound::security::{Argon2Hasher, JwtTokenIssuer};

const TOKEN_SECRET: &[u8] = b"request-level-test-secret";

fn state(generator: Option<Arc<dyn GenerationSource>>) -> HttpState {
    let users = Arc::new(InMemoryUserStore::default());
    let recipes = Arc::new(InMemoryRecipeStore::new(users.clone()));
    let tokens = Arc::new(JwtTokenIssuer::new(
        TOKEN_SECRET,
        Duration::from_secs(3600),
    ));
    HttpState::new(
        Arc::new(PasswordAccountService::new(
            users,
            Arc::new(Argon2Hasher),
            tokens.clone(),
        )),
        Arc::new(OwnedRecipeService::new(recipes.clone())),
        Arc::new(PublicRecipeMixService::new(recipes, generator)),
        tokens,
    )
}

async fn init(
    state: HttpState,
) -> impl Service<Request, Response = ServiceResponse, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(http::configure),
    )
    .await
}

async fn register_and_login<S>(app: &S, username: &str, password: &str) -> String
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/register")
            .set_json(json!({ "username": username, "password": password }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED, "registration must pass");

    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/login")
            .set_json(json!({ "username": username, "password": password }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK, "login must pass");
    let body: Value = test::read_body_json(res).await;
    body["access_token"]
        .as_str()
        .expect("login response carries a token")
        .to_owned()
}

fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

#[actix_web::test]
async fn duplicate_registration_is_rejected_with_400() {
    let app = init(state(None)).await;
    let _ = register_and_login(&app, "ada", "pw").await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/register")
            .set_json(json!({ "username": "ada", "password": "other" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "conflict");
}

#[actix_web::test]
async fn login_with_wrong_password_is_unauthorised() {
    let app = init(state(None)).await;
    let _ = register_and_login(&app, "ada", "pw").await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/login")
            .set_json(json!({ "username": "ada", "password": "wrong" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn owned_listing_requires_a_bearer_token() {
    let app = init(state(None)).await;
    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/user/recipes").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn missing_is_public_field_is_a_validation_error() {
    let app = init(state(None)).await;
    let token = register_and_login(&app, "ada", "pw").await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/user/recipes")
            .insert_header(bearer(&token))
            .set_json(json!({ "title": "Soup" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(res).await;
    let id = created["id"].as_str().expect("created id").to_owned();

    let res = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/user/recipes/{id}/toggle_public"))
            .insert_header(bearer(&token))
            .set_json(json!({}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], "is_public");
}

#[actix_web::test]
async fn mix_without_public_recipes_is_not_found() {
    let generator = Arc::new(FixtureGenerationSource::replying("unused"));
    let app = init(state(Some(generator.clone()))).await;

    let res = test::call_service(&app, test::TestRequest::get().uri("/recipes/mix").to_request())
        .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(generator.requests().is_empty(), "no upstream call may happen");
}

#[actix_web::test]
async fn mix_without_a_credential_is_service_unavailable() {
    let app = init(state(None)).await;
    let token = register_and_login(&app, "ada", "pw").await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/user/recipes")
            .insert_header(bearer(&token))
            .set_json(json!({ "title": "Soup", "description": "Warm broth", "is_public": true }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = test::call_service(&app, test::TestRequest::get().uri("/recipes/mix").to_request())
        .await;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[actix_web::test]
async fn ownership_visibility_and_mixing_work_end_to_end() {
    let generator = Arc::new(FixtureGenerationSource::replying(
        "Broth Bowl\n\nWarm broth reimagined as a shared bowl.",
    ));
    let app = init(state(Some(generator.clone()))).await;

    let ada = register_and_login(&app, "ada", "pw").await;
    let bob = register_and_login(&app, "bob", "pw").await;

    // Ada stores a private recipe.
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/user/recipes")
            .insert_header(bearer(&ada))
            .set_json(json!({ "title": "Soup", "description": "Warm broth" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(res).await;
    assert_eq!(created["is_public"], false);
    let id = created["id"].as_str().expect("created id").to_owned();

    // Bob cannot delete it and learns nothing from the response.
    let res = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/user/recipes/{id}"))
            .insert_header(bearer(&bob))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Private recipes stay out of the public listing.
    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/recipes/public").to_request(),
    )
    .await;
    let listing: Value = test::read_body_json(res).await;
    assert_eq!(listing.as_array().expect("array").len(), 0);

    // Ada flips the recipe public.
    let res = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/user/recipes/{id}/toggle_public"))
            .insert_header(bearer(&ada))
            .set_json(json!({ "is_public": true }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["is_public"], true);

    // The public listing now carries the recipe with Ada's username.
    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/recipes/public").to_request(),
    )
    .await;
    let listing: Value = test::read_body_json(res).await;
    let entries = listing.as_array().expect("array");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["title"], "Soup");
    assert_eq!(entries[0]["description"], "Warm broth");
    assert_eq!(entries[0]["username"], "ada");

    // Mixing derives a recipe and the prompt cites the public record.
    let res = test::call_service(&app, test::TestRequest::get().uri("/recipes/mix").to_request())
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["creative_recipe"]["title"], "Broth Bowl");

    let requests = generator.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].prompt.matches("- Soup: Warm broth").count(), 1);

    // Ada's own listing still shows the recipe; Bob's does not.
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/user/recipes")
            .insert_header(bearer(&bob))
            .to_request(),
    )
    .await;
    let listing: Value = test::read_body_json(res).await;
    assert_eq!(listing.as_array().expect("array").len(), 0);

    // Ada deletes her recipe for good.
    let res = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/user/recipes/{id}"))
            .insert_header(bearer(&ada))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/user/recipes")
            .insert_header(bearer(&ada))
            .to_request(),
    )
    .await;
    let listing: Value = test::read_body_json(res).await;
    assert_eq!(listing.as_array().expect("array").len(), 0);
}
