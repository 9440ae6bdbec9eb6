//! Row structs mapping Diesel query results to and from the schema.

use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{recipes, users};

/// User row as read from the `users` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
}

/// User row about to be inserted.
#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub password_hash: &'a str,
}

/// Recipe row as read from the `recipes` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RecipeRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub is_public: bool,
    pub owner_id: Uuid,
}

/// Recipe row about to be inserted.
#[derive(Debug, Insertable)]
#[diesel(table_name = recipes)]
pub struct NewRecipeRow<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub description: &'a str,
    pub is_public: bool,
    pub owner_id: Uuid,
}
