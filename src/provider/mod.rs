//! Client for the hosted auth/database provider.
//!
//! All durable state lives behind the provider's two REST surfaces: an
//! auth API (sessions, sign-up, admin user management) and a table API
//! (row-level CRUD with equality filters). This module defines the
//! [`DataProvider`] seam the rest of the application is written against,
//! and [`rest`] implements it over HTTP. Tests substitute an in-memory
//! double.
//!
//! Ownership enforcement rides on the filter chain: a scoped mutation
//! that matches no rows comes back as an empty result set, which callers
//! must translate into a 404 rather than a silent success.

pub mod error;
pub mod rest;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

pub use error::ProviderError;
pub use rest::RestProvider;

/// A single equality constraint on a table operation.
///
/// The provider only ever receives conjunctions of equality filters;
/// there is no other comparison operator in this system.
#[derive(Debug, Clone)]
pub struct Filter {
    pub column: String,
    pub value: String,
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl ToString) -> Self {
        Self {
            column: column.into(),
            value: value.to_string(),
        }
    }
}

/// An authenticated session returned by the provider on login.
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub user: Value,
}

/// The external auth/database provider.
///
/// Table operations return the affected rows as raw JSON; callers own the
/// typed views. Every method maps to exactly one provider request.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Exchange credentials for a session token.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, ProviderError>;

    /// Self-service registration with user metadata.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: Value,
    ) -> Result<Value, ProviderError>;

    /// Trigger a password-reset email.
    async fn send_password_reset(&self, email: &str) -> Result<(), ProviderError>;

    /// Create a user through the admin API, email pre-confirmed.
    async fn admin_create_user(
        &self,
        email: &str,
        password: &str,
        metadata: Value,
    ) -> Result<Value, ProviderError>;

    /// Update a user's email and/or metadata through the admin API.
    async fn admin_update_user(
        &self,
        user_id: &str,
        email: Option<&str>,
        metadata: Value,
    ) -> Result<Value, ProviderError>;

    /// Select rows. `columns` uses the provider's embedded-resource
    /// syntax, e.g. `"id,titre,classes(nom)"`.
    async fn select(
        &self,
        table: &str,
        columns: &str,
        filters: &[Filter],
    ) -> Result<Vec<Value>, ProviderError>;

    /// Insert a row, returning the inserted representation.
    async fn insert(&self, table: &str, row: Value) -> Result<Vec<Value>, ProviderError>;

    /// Update rows matching the filters, returning the updated rows.
    async fn update(
        &self,
        table: &str,
        changes: Value,
        filters: &[Filter],
    ) -> Result<Vec<Value>, ProviderError>;

    /// Delete rows matching the filters, returning the deleted rows.
    async fn delete(&self, table: &str, filters: &[Filter]) -> Result<Vec<Value>, ProviderError>;
}
