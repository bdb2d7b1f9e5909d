use crate::api::error::AppError;
use crate::entities::{api_keys, organizations};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use std::fmt;

/// The four-field credential set required for a delegated user operation.
///
/// `Debug` is implemented by hand so that logging a credential set can never
/// leak signing material: every field is reduced to a presence flag. Add new
/// fields here and they stay redacted by default.
#[derive(Clone)]
pub struct DelegatedCredentials {
    pub account_address: String,
    pub private_key: String,
    pub init_code: String,
    pub deferred_action_digest: String,
}

impl fmt::Debug for DelegatedCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelegatedCredentials")
            .field("account_address", &presence(&self.account_address))
            .field("private_key", &presence(&self.private_key))
            .field("init_code", &presence(&self.init_code))
            .field("deferred_action_digest", &presence(&self.deferred_action_digest))
            .finish()
    }
}

fn presence(value: &str) -> &'static str {
    if value.is_empty() { "missing" } else { "present" }
}

fn field_present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

/// Resolve the delegated-signing credentials for `org_id`.
///
/// Each step is terminal on failure and there are no retries:
/// 1. the organization must exist;
/// 2. its latest API key (store ordering, newest `created_at`) must be
///    activated;
/// 3. the key must carry all four delegated-operation fields.
pub async fn resolve(
    db: &DatabaseConnection,
    org_id: &str,
) -> Result<DelegatedCredentials, AppError> {
    let org = organizations::Entity::find_by_id(org_id).one(db).await?;
    if org.is_none() {
        tracing::warn!(org_id, "organization not found");
        return Err(AppError::NotFound("user"));
    }

    let api_key = api_keys::Entity::find()
        .filter(api_keys::Column::OrgId.eq(org_id))
        .order_by_desc(api_keys::Column::CreatedAt)
        .one(db)
        .await?;

    tracing::info!(
        org_id,
        activated = api_key.as_ref().map(|k| k.activated),
        "API key retrieved"
    );

    let Some(api_key) = api_key.filter(|k| k.activated) else {
        return Err(AppError::Unavailable("api_key_inactive"));
    };

    // An activated key can still be mid-provisioning. Log which fields are
    // there, never their values.
    if !field_present(&api_key.account_address)
        || !field_present(&api_key.private_key)
        || !field_present(&api_key.init_code)
        || !field_present(&api_key.deferred_action_digest)
    {
        tracing::error!(
            org_id,
            account_address = field_present(&api_key.account_address),
            private_key = field_present(&api_key.private_key),
            init_code = field_present(&api_key.init_code),
            deferred_action_digest = field_present(&api_key.deferred_action_digest),
            "Missing required API key fields"
        );
        return Err(AppError::Unavailable("api_key_incomplete"));
    }

    Ok(DelegatedCredentials {
        account_address: api_key.account_address.unwrap_or_default(),
        private_key: api_key.private_key.unwrap_or_default(),
        init_code: api_key.init_code.unwrap_or_default(),
        deferred_action_digest: api_key.deferred_action_digest.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_signing_material() {
        let creds = DelegatedCredentials {
            account_address: "0xabc".to_string(),
            private_key: "super-secret".to_string(),
            init_code: "0x".to_string(),
            deferred_action_digest: "0xdeadbeef".to_string(),
        };

        let rendered = format!("{:?}", creds);
        assert!(!rendered.contains("super-secret"));
        assert!(!rendered.contains("0xdeadbeef"));
        assert!(rendered.contains("present"));
    }

    #[test]
    fn test_field_present() {
        assert!(field_present(&Some("x".to_string())));
        assert!(!field_present(&Some(String::new())));
        assert!(!field_present(&None));
    }
}
