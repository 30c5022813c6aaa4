use std::env;

/// Consistency policy for the audit trail.
///
/// No transaction spans the identity mutation and the audit insert, so a
/// failed audit write leaves the two stores divergent. Best-effort mode
/// (the default) logs the failure and lets the mutation stand; strict mode
/// surfaces it as a 500 to the caller.
#[derive(Clone, Debug)]
pub struct AuditConfig {
    pub strict: bool,
}

impl AuditConfig {
    pub fn from_env() -> Self {
        Self {
            strict: env::var("AUDIT_STRICT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(false),
        }
    }
}
