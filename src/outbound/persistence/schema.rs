//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations exactly; Diesel uses them for
//! compile-time query validation and type-safe SQL generation.

diesel::table! {
    /// Registered user accounts.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique login handle (max 32 characters).
        username -> Varchar,
        /// Argon2 PHC-format credential hash; never leaves this layer.
        password_hash -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Recipe records, private by default.
    recipes (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Recipe title (max 120 characters).
        title -> Varchar,
        /// Free-form description; empty string when none was supplied.
        description -> Text,
        /// Whether the recipe appears in the public listing.
        is_public -> Bool,
        /// Owning user; restricts user deletion.
        owner_id -> Uuid,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(recipes -> users (owner_id));
diesel::allow_tables_to_appear_in_same_query!(recipes, users);
