//! Append-only audit trail for identity mutations.
//!
//! Every create/update/disable of an identity writes exactly one row to
//! the provider's `user_audit` table, recording who changed what with old
//! and new snapshots. The write happens after the mutation, with no
//! transaction spanning the two: under the default best-effort policy a
//! failed audit write is logged and the mutation stands; under
//! `AUDIT_STRICT=true` the failure propagates to the caller as a 500.

use serde_json::{Value, json};
use tracing::warn;
use uuid::Uuid;

use crate::config::audit::AuditConfig;
use crate::provider::DataProvider;
use crate::utils::errors::AppError;

const AUDIT_TABLE: &str = "user_audit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    Create,
    Update,
    Disable,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Disable => "disable",
        }
    }
}

/// One audit record, ready to append.
#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub user_id: Uuid,
    pub action: AuditAction,
    pub old_data: Option<Value>,
    pub new_data: Option<Value>,
    pub changed_by: Uuid,
}

impl AuditEntry {
    fn into_row(self) -> Value {
        json!({
            "user_id": self.user_id.to_string(),
            "action": self.action.as_str(),
            "old_data": self.old_data,
            "new_data": self.new_data,
            "changed_by": self.changed_by.to_string(),
        })
    }
}

/// Append one audit record for a completed identity mutation.
pub async fn record(
    provider: &dyn DataProvider,
    config: &AuditConfig,
    entry: AuditEntry,
) -> Result<(), AppError> {
    let action = entry.action;
    let user_id = entry.user_id;

    match provider.insert(AUDIT_TABLE, entry.into_row()).await {
        Ok(_) => Ok(()),
        Err(e) if config.strict => Err(AppError::internal(anyhow::anyhow!(
            "Audit write failed for {} on {}: {}",
            action.as_str(),
            user_id,
            e
        ))),
        Err(e) => {
            warn!(
                user_id = %user_id,
                action = action.as_str(),
                error = %e,
                "Audit write failed, mutation stands"
            );
            Ok(())
        }
    }
}
