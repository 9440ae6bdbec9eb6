//! Recipe data model.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::user::{UserId, Username};

/// Validation errors raised by the recipe value types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeValidationError {
    /// Identifier was empty or not a UUID.
    InvalidId,
    /// Title was missing or blank once trimmed.
    EmptyTitle,
    /// Title exceeded the allowed maximum.
    TitleTooLong { max: usize },
}

impl fmt::Display for RecipeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "recipe id must be a valid UUID"),
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::TitleTooLong { max } => write!(f, "title must be at most {max} characters"),
        }
    }
}

impl std::error::Error for RecipeValidationError {}

/// Stable recipe identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(Uuid);

impl RecipeId {
    /// Validate and construct a [`RecipeId`] from string input.
    pub fn parse(id: impl AsRef<str>) -> Result<Self, RecipeValidationError> {
        Uuid::parse_str(id.as_ref().trim())
            .map(Self)
            .map_err(|_| RecipeValidationError::InvalidId)
    }

    /// Wrap an already-valid UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random [`RecipeId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Maximum allowed length for a recipe title.
pub const TITLE_MAX: usize = 120;

/// Recipe title.
///
/// ## Invariants
/// - Non-empty once trimmed, at most [`TITLE_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Title(String);

impl Title {
    /// Validate and construct a [`Title`] from owned input.
    pub fn new(title: impl Into<String>) -> Result<Self, RecipeValidationError> {
        Self::from_owned(title.into())
    }

    fn from_owned(title: String) -> Result<Self, RecipeValidationError> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(RecipeValidationError::EmptyTitle);
        }
        if trimmed.chars().count() > TITLE_MAX {
            return Err(RecipeValidationError::TitleTooLong { max: TITLE_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Title {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Title> for String {
    fn from(value: Title) -> Self {
        value.0
    }
}

impl TryFrom<String> for Title {
    type Error = RecipeValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Stored recipe record.
///
/// ## Invariants
/// - `owner_id` refers to an existing user.
/// - `id` is unique and never changes once assigned.
/// - `is_public` is toggled only through the owner's visibility operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    id: RecipeId,
    title: Title,
    description: String,
    is_public: bool,
    owner_id: UserId,
}

impl Recipe {
    /// Build a recipe from validated components.
    pub fn new(
        id: RecipeId,
        title: Title,
        description: String,
        is_public: bool,
        owner_id: UserId,
    ) -> Self {
        Self {
            id,
            title,
            description,
            is_public,
            owner_id,
        }
    }

    /// Stable recipe identifier.
    pub fn id(&self) -> &RecipeId {
        &self.id
    }

    /// Recipe title.
    pub fn title(&self) -> &Title {
        &self.title
    }

    /// Free-form description; empty when the owner supplied none.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Whether the recipe appears in the public listing.
    pub fn is_public(&self) -> bool {
        self.is_public
    }

    /// Identifier of the owning user.
    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    /// Copy of this recipe with the visibility flag replaced.
    pub fn with_visibility(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }
}

/// Owner-supplied fields for a recipe yet to be stored.
///
/// A missing description is normalised to the empty string and visibility
/// defaults to private.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDraft {
    title: Title,
    description: String,
    is_public: bool,
}

impl RecipeDraft {
    /// Build a draft, applying the description and visibility defaults.
    pub fn new(title: Title, description: Option<String>, is_public: Option<bool>) -> Self {
        Self {
            title,
            description: description.unwrap_or_default(),
            is_public: is_public.unwrap_or(false),
        }
    }

    /// Recipe title.
    pub fn title(&self) -> &Title {
        &self.title
    }

    /// Normalised description.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Requested visibility.
    pub fn is_public(&self) -> bool {
        self.is_public
    }

    /// Materialise the draft into a stored recipe for `owner_id`.
    pub fn into_recipe(self, id: RecipeId, owner_id: UserId) -> Recipe {
        Recipe::new(id, self.title, self.description, self.is_public, owner_id)
    }
}

/// Public-listing view of a recipe joined with its owner's username.
///
/// The username is resolved at read time from the user record so it always
/// matches the owner's current handle; it is never stored on the recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicRecipe {
    recipe: Recipe,
    author: Username,
}

impl PublicRecipe {
    /// Pair a public recipe with its owner's username.
    pub fn new(recipe: Recipe, author: Username) -> Self {
        Self { recipe, author }
    }

    /// The underlying recipe record.
    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    /// The owner's current username.
    pub fn author(&self) -> &Username {
        &self.author
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", RecipeValidationError::EmptyTitle)]
    #[case("   ", RecipeValidationError::EmptyTitle)]
    fn blank_titles_are_rejected(#[case] input: &str, #[case] expected: RecipeValidationError) {
        let err = Title::new(input).expect_err("blank titles must fail");
        assert_eq!(err, expected);
    }

    #[test]
    fn overlong_titles_are_rejected() {
        let err = Title::new("x".repeat(TITLE_MAX + 1)).expect_err("title must fail");
        assert_eq!(err, RecipeValidationError::TitleTooLong { max: TITLE_MAX });
    }

    #[test]
    fn titles_are_trimmed() {
        let title = Title::new("  Soup  ").expect("valid title");
        assert_eq!(title.as_ref(), "Soup");
    }

    #[test]
    fn draft_defaults_are_private_with_empty_description() {
        let draft = RecipeDraft::new(Title::new("Soup").expect("title"), None, None);
        assert_eq!(draft.description(), "");
        assert!(!draft.is_public());
    }

    #[test]
    fn draft_materialises_with_owner_and_id() {
        let owner = UserId::random();
        let id = RecipeId::random();
        let draft = RecipeDraft::new(
            Title::new("Soup").expect("title"),
            Some("Warm broth".to_owned()),
            Some(true),
        );

        let recipe = draft.into_recipe(id, owner);
        assert_eq!(recipe.id(), &id);
        assert_eq!(recipe.owner_id(), &owner);
        assert_eq!(recipe.description(), "Warm broth");
        assert!(recipe.is_public());
    }
}
