use serde_json::{Value, json};
use uuid::Uuid;

use crate::config::audit::AuditConfig;
use crate::provider::{DataProvider, Filter};
use crate::utils::errors::AppError;

use super::audit::{self, AuditAction, AuditEntry};
use super::model::{CreateUserDto, UpdateUserDto, UserRow};

const USERS_TABLE: &str = "users";
const USER_COLUMNS: &str =
    "id,email,role,nom,prenom,matieres,created_at,classe_id,classes(nom,niveau)";

pub struct UserService;

impl UserService {
    /// Create an account through the provider's admin API, then append
    /// the audit record.
    pub async fn create_user(
        provider: &dyn DataProvider,
        audit_config: &AuditConfig,
        dto: CreateUserDto,
        changed_by: Uuid,
    ) -> Result<Value, AppError> {
        let metadata = json!({
            "nom": dto.nom,
            "prenom": dto.prenom,
            "role": dto.role,
            "matieres": dto.matieres,
            "classe_id": dto.classe_id,
        });

        let user = provider
            .admin_create_user(&dto.email, &dto.password, metadata.clone())
            .await?;

        let user_id = user
            .get("id")
            .and_then(Value::as_str)
            .and_then(|s| Uuid::parse_str(s).ok())
            .ok_or_else(|| AppError::internal(anyhow::anyhow!("Provider user record has no id")))?;

        let mut new_data = metadata;
        new_data["email"] = json!(dto.email);

        audit::record(
            provider,
            audit_config,
            AuditEntry {
                user_id,
                action: AuditAction::Create,
                old_data: None,
                new_data: Some(new_data),
                changed_by,
            },
        )
        .await?;

        Ok(user)
    }

    pub async fn list_users(provider: &dyn DataProvider) -> Result<Vec<UserRow>, AppError> {
        let rows = provider.select(USERS_TABLE, USER_COLUMNS, &[]).await?;

        rows.into_iter()
            .map(|row| {
                serde_json::from_value(row)
                    .map_err(|e| AppError::internal(anyhow::anyhow!("Malformed user row: {}", e)))
            })
            .collect()
    }

    /// Update the identity in both provider surfaces (auth metadata and
    /// the public table), then audit with old and new snapshots.
    pub async fn update_user(
        provider: &dyn DataProvider,
        audit_config: &AuditConfig,
        user_id: Uuid,
        dto: UpdateUserDto,
        changed_by: Uuid,
    ) -> Result<Value, AppError> {
        let old = Self::fetch_user(provider, user_id).await?;

        let changes = serde_json::to_value(&dto)
            .map_err(|e| AppError::internal(anyhow::anyhow!("Unserializable update: {}", e)))?;

        provider
            .admin_update_user(&user_id.to_string(), dto.email.as_deref(), changes.clone())
            .await?;

        let rows = provider
            .update(
                USERS_TABLE,
                changes.clone(),
                &[Filter::eq("id", user_id)],
            )
            .await?;

        let updated = rows
            .into_iter()
            .next()
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User {} not found", user_id)))?;

        audit::record(
            provider,
            audit_config,
            AuditEntry {
                user_id,
                action: AuditAction::Update,
                old_data: Some(old),
                new_data: Some(changes),
                changed_by,
            },
        )
        .await?;

        Ok(updated)
    }

    /// Disable rather than delete: flips `active` to false in the auth
    /// metadata and audits the transition.
    pub async fn disable_user(
        provider: &dyn DataProvider,
        audit_config: &AuditConfig,
        user_id: Uuid,
        changed_by: Uuid,
    ) -> Result<(), AppError> {
        let old = Self::fetch_user(provider, user_id).await?;

        provider
            .admin_update_user(&user_id.to_string(), None, json!({ "active": false }))
            .await?;

        audit::record(
            provider,
            audit_config,
            AuditEntry {
                user_id,
                action: AuditAction::Disable,
                old_data: Some(old),
                new_data: None,
                changed_by,
            },
        )
        .await?;

        Ok(())
    }

    async fn fetch_user(provider: &dyn DataProvider, user_id: Uuid) -> Result<Value, AppError> {
        let rows = provider
            .select(USERS_TABLE, "*", &[Filter::eq("id", user_id)])
            .await?;

        rows.into_iter()
            .next()
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User {} not found", user_id)))
    }
}
