//! Ownership guard for recipe mutations.
//!
//! Every operation that mutates or deletes a recipe must run this check
//! before the store writes anything. Callers report a failed check with the
//! same outcome as a missing record, so a foreign private recipe is
//! indistinguishable from a nonexistent id.

use std::fmt;

use crate::domain::recipe::Recipe;
use crate::domain::user::UserId;

/// Raised when an actor is not the owner of the recipe they target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnershipError {
    actor: UserId,
}

impl fmt::Display for OwnershipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "user {} does not own this recipe", self.actor)
    }
}

impl std::error::Error for OwnershipError {}

/// Succeed iff `actor` owns `recipe`.
pub fn authorize(actor: &UserId, recipe: &Recipe) -> Result<(), OwnershipError> {
    if recipe.owner_id() == actor {
        Ok(())
    } else {
        Err(OwnershipError { actor: *actor })
    }
}
