//! Backend entry-point: wires persistence, credential adapters, and the REST
//! surface.

use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use diesel::{Connection, PgConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use backend::config::AppConfig;
use backend::domain::ports::GenerationSource;
use backend::domain::{OwnedRecipeService, PasswordAccountService, PublicRecipeMixService};
use backend::inbound::http::{self, state::HttpState};
use backend::outbound::generation::OpenAiChatSource;
use backend::outbound::persistence::{
    DbPool, DieselRecipeRepository, DieselUserRepository, PoolConfig,
};
use backend::outbound::security::{Argon2Hasher, JwtTokenIssuer};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;

    apply_migrations(config.database_url.clone()).await?;
    let pool = DbPool::new(PoolConfig::new(&config.database_url))
        .await
        .map_err(std::io::Error::other)?;

    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let recipes = Arc::new(DieselRecipeRepository::new(pool));
    let tokens = Arc::new(JwtTokenIssuer::new(&config.token_secret, config.token_ttl));
    let generator: Option<Arc<dyn GenerationSource>> = match &config.generation {
        Some(generation) => Some(Arc::new(
            OpenAiChatSource::new(generation).map_err(std::io::Error::other)?,
        )),
        None => None,
    };

    let state = HttpState::new(
        Arc::new(PasswordAccountService::new(
            users,
            Arc::new(Argon2Hasher),
            tokens.clone(),
        )),
        Arc::new(OwnedRecipeService::new(recipes.clone())),
        Arc::new(PublicRecipeMixService::new(recipes, generator)),
        tokens,
    );

    info!(addr = %config.bind_addr, "starting server");
    let data = web::Data::new(state);
    HttpServer::new(move || App::new().app_data(data.clone()).configure(http::configure))
        .bind(config.bind_addr)?
        .run()
        .await
}

/// Apply all pending embedded migrations on a blocking connection.
async fn apply_migrations(database_url: String) -> std::io::Result<()> {
    tokio::task::spawn_blocking(move || {
        let mut connection = PgConnection::establish(&database_url).map_err(|error| {
            std::io::Error::other(format!("database connection failed: {error}"))
        })?;
        connection
            .run_pending_migrations(MIGRATIONS)
            .map(|_| ())
            .map_err(|error| std::io::Error::other(format!("migrations failed: {error}")))
    })
    .await
    .map_err(|error| std::io::Error::other(format!("migration task failed: {error}")))?
}
