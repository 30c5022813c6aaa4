//! HTTP implementation of [`DataProvider`].

use reqwest::Response;
use serde_json::{Value, json};

use crate::config::provider::ProviderConfig;

use super::{DataProvider, Filter, ProviderError, Session};

/// Provider client over its REST surfaces.
///
/// One instance is created at startup and shared read-only across
/// requests; `reqwest::Client` pools connections internally.
#[derive(Clone, Debug)]
pub struct RestProvider {
    http: reqwest::Client,
    base_url: String,
    service_key: String,
}

impl RestProvider {
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            service_key: config.service_key.clone(),
        }
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authed(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }

    /// Turn a non-2xx response into a `ProviderError::Api`, pulling the
    /// message out of the provider's JSON error body when present.
    async fn check(response: Response) -> Result<Response, ProviderError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<Value>().await {
            Ok(body) => ["msg", "message", "error_description", "error"]
                .iter()
                .find_map(|key| body.get(*key).and_then(Value::as_str).map(str::to_string))
                .unwrap_or_else(|| body.to_string()),
            Err(_) => status
                .canonical_reason()
                .unwrap_or("provider error")
                .to_string(),
        };

        Err(ProviderError::api(status.as_u16(), message))
    }

    fn filter_params(columns: Option<&str>, filters: &[Filter]) -> Vec<(String, String)> {
        let mut params = Vec::with_capacity(filters.len() + 1);
        if let Some(columns) = columns {
            params.push(("select".to_string(), columns.to_string()));
        }
        for filter in filters {
            params.push((filter.column.clone(), format!("eq.{}", filter.value)));
        }
        params
    }
}

#[async_trait::async_trait]
impl DataProvider for RestProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, ProviderError> {
        let response = self
            .authed(self.http.post(self.auth_url("token")))
            .query(&[("grant_type", "password")])
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: Value,
    ) -> Result<Value, ProviderError> {
        let response = self
            .authed(self.http.post(self.auth_url("signup")))
            .json(&json!({
                "email": email,
                "password": password,
                "data": metadata,
            }))
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), ProviderError> {
        let response = self
            .authed(self.http.post(self.auth_url("recover")))
            .json(&json!({ "email": email }))
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    async fn admin_create_user(
        &self,
        email: &str,
        password: &str,
        metadata: Value,
    ) -> Result<Value, ProviderError> {
        let response = self
            .authed(self.http.post(self.auth_url("admin/users")))
            .json(&json!({
                "email": email,
                "password": password,
                "email_confirm": true,
                "user_metadata": metadata,
            }))
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    async fn admin_update_user(
        &self,
        user_id: &str,
        email: Option<&str>,
        metadata: Value,
    ) -> Result<Value, ProviderError> {
        let mut body = json!({ "user_metadata": metadata });
        if let Some(email) = email {
            body["email"] = json!(email);
        }

        let response = self
            .authed(
                self.http
                    .put(self.auth_url(&format!("admin/users/{}", user_id))),
            )
            .json(&body)
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    async fn select(
        &self,
        table: &str,
        columns: &str,
        filters: &[Filter],
    ) -> Result<Vec<Value>, ProviderError> {
        let response = self
            .authed(self.http.get(self.table_url(table)))
            .query(&Self::filter_params(Some(columns), filters))
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    async fn insert(&self, table: &str, row: Value) -> Result<Vec<Value>, ProviderError> {
        let response = self
            .authed(self.http.post(self.table_url(table)))
            .header("Prefer", "return=representation")
            .json(&json!([row]))
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    async fn update(
        &self,
        table: &str,
        changes: Value,
        filters: &[Filter],
    ) -> Result<Vec<Value>, ProviderError> {
        let response = self
            .authed(self.http.patch(self.table_url(table)))
            .header("Prefer", "return=representation")
            .query(&Self::filter_params(None, filters))
            .json(&changes)
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    async fn delete(&self, table: &str, filters: &[Filter]) -> Result<Vec<Value>, ProviderError> {
        let response = self
            .authed(self.http.delete(self.table_url(table)))
            .header("Prefer", "return=representation")
            .query(&Self::filter_params(None, filters))
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }
}
