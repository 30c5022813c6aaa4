//! Shared test harness: in-memory doubles for the two external providers
//! and helpers for building an app with a known state.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};
use uuid::Uuid;

use cartable::config::audit::AuditConfig;
use cartable::config::cors::CorsConfig;
use cartable::config::jwt::JwtConfig;
use cartable::drive::{DriveState, FileStore, StorageError, StoredFile};
use cartable::middleware::role::UserRole;
use cartable::modules::auth::model::Claims;
use cartable::provider::{DataProvider, Filter, ProviderError, Session};
use cartable::router::init_router;
use cartable::state::AppState;
use jsonwebtoken::{EncodingKey, Header, encode};

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
    }
}

/// Sign a token the way the external auth provider would; the server
/// itself only verifies.
pub fn token_for(user_id: Uuid, email: &str, role: UserRole) -> String {
    signed_token(user_id, email, role, 3600)
}

/// A token whose expiry is already in the past.
pub fn expired_token_for(user_id: Uuid, email: &str, role: UserRole) -> String {
    signed_token(user_id, email, role, -3600)
}

fn signed_token(user_id: Uuid, email: &str, role: UserRole, expires_in: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        role: role.as_str().to_string(),
        exp: (now + expires_in).max(0) as usize,
        iat: (now - 7200) as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(test_jwt_config().secret.as_bytes()),
    )
    .unwrap()
}

struct MockAccount {
    password: String,
    user: Value,
}

/// In-memory stand-in for the auth/database provider. Tables are lists of
/// JSON rows; equality filters match against stringified column values,
/// mirroring the real provider's filter chain.
#[derive(Default)]
pub struct MockProvider {
    accounts: Mutex<HashMap<String, MockAccount>>,
    tables: Mutex<HashMap<String, Vec<Value>>>,
    /// Table whose inserts fail, for audit-consistency tests.
    failing_table: Mutex<Option<String>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account and its row in the `users` table.
    pub fn add_user(&self, email: &str, password: &str, role: UserRole) -> Uuid {
        let id = Uuid::new_v4();
        let user = json!({
            "id": id.to_string(),
            "email": email,
            "role": role.as_str(),
            "nom": "Test",
            "prenom": "User",
            "user_metadata": { "role": role.as_str(), "nom": "Test", "prenom": "User" },
        });

        self.accounts.lock().unwrap().insert(
            email.to_string(),
            MockAccount {
                password: password.to_string(),
                user: user.clone(),
            },
        );
        self.seed_row("users", user);
        id
    }

    pub fn seed_row(&self, table: &str, row: Value) {
        self.tables
            .lock()
            .unwrap()
            .entry(table.to_string())
            .or_default()
            .push(row);
    }

    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.tables
            .lock()
            .unwrap()
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    pub fn fail_inserts_into(&self, table: &str) {
        *self.failing_table.lock().unwrap() = Some(table.to_string());
    }

    fn column_as_string(row: &Value, column: &str) -> Option<String> {
        row.get(column).map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    fn matches(row: &Value, filters: &[Filter]) -> bool {
        filters
            .iter()
            .all(|f| Self::column_as_string(row, &f.column).as_deref() == Some(f.value.as_str()))
    }

    /// Emulate the provider's embedded-resource select for the one join
    /// shape this system uses: `classes(...)` keyed by `classe_id`.
    fn embed_classes(&self, row: &mut Value, columns: &str) {
        if !columns.contains("classes(") {
            return;
        }
        let Some(classe_id) = Self::column_as_string(row, "classe_id") else {
            return;
        };
        let classes = self.rows("classes");
        let embedded = classes
            .iter()
            .find(|c| Self::column_as_string(c, "id").as_deref() == Some(classe_id.as_str()));
        row["classes"] = embedded.cloned().unwrap_or(Value::Null);
    }
}

#[async_trait]
impl DataProvider for MockProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, ProviderError> {
        let accounts = self.accounts.lock().unwrap();
        let account = accounts
            .get(email)
            .filter(|a| a.password == password)
            .ok_or_else(|| ProviderError::api(400, "Invalid login credentials"))?;

        let id = account.user["id"].as_str().unwrap();
        let role: UserRole = account.user["role"].as_str().unwrap().parse().unwrap();
        let token = token_for(Uuid::parse_str(id).unwrap(), email, role);

        Ok(Session {
            access_token: token,
            user: account.user.clone(),
        })
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: Value,
    ) -> Result<Value, ProviderError> {
        if self.accounts.lock().unwrap().contains_key(email) {
            return Err(ProviderError::api(400, "User already registered"));
        }

        let id = Uuid::new_v4();
        let mut user = json!({
            "id": id.to_string(),
            "email": email,
            "user_metadata": metadata,
        });
        if let Some(obj) = metadata_fields(&user["user_metadata"]) {
            for (k, v) in obj {
                user[k.as_str()] = v;
            }
        }

        self.accounts.lock().unwrap().insert(
            email.to_string(),
            MockAccount {
                password: password.to_string(),
                user: user.clone(),
            },
        );
        self.seed_row("users", user.clone());
        Ok(user)
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), ProviderError> {
        if email.is_empty() {
            return Err(ProviderError::api(400, "Email is required"));
        }
        Ok(())
    }

    async fn admin_create_user(
        &self,
        email: &str,
        password: &str,
        metadata: Value,
    ) -> Result<Value, ProviderError> {
        self.sign_up(email, password, metadata).await
    }

    async fn admin_update_user(
        &self,
        user_id: &str,
        email: Option<&str>,
        metadata: Value,
    ) -> Result<Value, ProviderError> {
        let mut accounts = self.accounts.lock().unwrap();
        let account = accounts
            .values_mut()
            .find(|a| a.user["id"].as_str() == Some(user_id))
            .ok_or_else(|| ProviderError::api(404, "User not found"))?;

        if let Some(email) = email {
            account.user["email"] = json!(email);
        }
        if let (Some(target), Some(changes)) = (
            account.user["user_metadata"].as_object_mut(),
            metadata.as_object(),
        ) {
            for (k, v) in changes {
                target.insert(k.clone(), v.clone());
            }
        }

        Ok(account.user.clone())
    }

    async fn select(
        &self,
        table: &str,
        columns: &str,
        filters: &[Filter],
    ) -> Result<Vec<Value>, ProviderError> {
        let rows = self.rows(table);
        let mut selected: Vec<Value> = rows
            .into_iter()
            .filter(|row| Self::matches(row, filters))
            .collect();

        for row in &mut selected {
            self.embed_classes(row, columns);
        }

        Ok(selected)
    }

    async fn insert(&self, table: &str, mut row: Value) -> Result<Vec<Value>, ProviderError> {
        if self.failing_table.lock().unwrap().as_deref() == Some(table) {
            return Err(ProviderError::api(500, "insert rejected"));
        }

        if row.get("id").is_none() {
            row["id"] = json!(Uuid::new_v4().to_string());
        }
        self.seed_row(table, row.clone());
        Ok(vec![row])
    }

    async fn update(
        &self,
        table: &str,
        changes: Value,
        filters: &[Filter],
    ) -> Result<Vec<Value>, ProviderError> {
        let mut tables = self.tables.lock().unwrap();
        let rows = tables.entry(table.to_string()).or_default();

        let mut updated = Vec::new();
        for row in rows.iter_mut() {
            if Self::matches(row, filters) {
                if let (Some(target), Some(source)) = (row.as_object_mut(), changes.as_object()) {
                    for (k, v) in source {
                        target.insert(k.clone(), v.clone());
                    }
                }
                updated.push(row.clone());
            }
        }
        Ok(updated)
    }

    async fn delete(&self, table: &str, filters: &[Filter]) -> Result<Vec<Value>, ProviderError> {
        let mut tables = self.tables.lock().unwrap();
        let rows = tables.entry(table.to_string()).or_default();

        let (removed, kept): (Vec<Value>, Vec<Value>) = rows
            .drain(..)
            .partition(|row| Self::matches(row, filters));
        *rows = kept;
        Ok(removed)
    }
}

fn metadata_fields(metadata: &Value) -> Option<Vec<(String, Value)>> {
    metadata
        .as_object()
        .map(|obj| obj.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
}

/// In-memory stand-in for the file-storage provider.
#[derive(Default)]
pub struct MemoryStore {
    files: Mutex<HashMap<String, (String, Vec<u8>)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, file_id: &str) -> bool {
        self.files.lock().unwrap().contains_key(file_id)
    }

    pub fn add_file(&self, file_id: &str, name: &str, content: Vec<u8>) {
        self.files
            .lock()
            .unwrap()
            .insert(file_id.to_string(), (name.to_string(), content));
    }
}

#[async_trait]
impl FileStore for MemoryStore {
    async fn upload(
        &self,
        name: &str,
        _mime_type: &str,
        content: Vec<u8>,
    ) -> Result<StoredFile, StorageError> {
        let id = Uuid::new_v4().to_string();
        self.files
            .lock()
            .unwrap()
            .insert(id.clone(), (name.to_string(), content));

        Ok(StoredFile {
            url: format!("https://drive.google.com/file/d/{}/view", id),
            name: name.to_string(),
            id,
        })
    }

    async fn delete(&self, file_id: &str) -> Result<(), StorageError> {
        self.files
            .lock()
            .unwrap()
            .remove(file_id)
            .map(|_| ())
            .ok_or(StorageError::NotFound)
    }
}

pub fn setup_test_app(provider: Arc<MockProvider>, drive: DriveState) -> axum::Router {
    setup_test_app_with_audit(provider, drive, false)
}

pub fn setup_test_app_with_audit(
    provider: Arc<MockProvider>,
    drive: DriveState,
    strict_audit: bool,
) -> axum::Router {
    let state = AppState {
        provider,
        drive,
        jwt_config: test_jwt_config(),
        cors_config: CorsConfig {
            allowed_origins: vec!["*".to_string()],
        },
        audit_config: AuditConfig {
            strict: strict_audit,
        },
    };
    init_router(state)
}

pub fn ready_drive(store: Arc<MemoryStore>) -> DriveState {
    DriveState::Ready(store)
}
