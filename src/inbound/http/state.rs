//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AccountService, MixService, RecipeService, TokenIssuer};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountService>,
    pub recipes: Arc<dyn RecipeService>,
    pub mixer: Arc<dyn MixService>,
    pub tokens: Arc<dyn TokenIssuer>,
}

impl HttpState {
    /// Construct state from the port implementations.
    pub fn new(
        accounts: Arc<dyn AccountService>,
        recipes: Arc<dyn RecipeService>,
        mixer: Arc<dyn MixService>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            accounts,
            recipes,
            mixer,
            tokens,
        }
    }
}
