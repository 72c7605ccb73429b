//! Membership revocation triggered by refund events.

use std::sync::Arc;

use crate::{
    config::{Config, RevokePolicy},
    error::AppError,
    service::directory::MembershipDirectory,
};

pub struct RevocationService {
    directory: Arc<dyn MembershipDirectory>,
    config: Arc<Config>,
}

impl RevocationService {
    pub fn new(directory: Arc<dyn MembershipDirectory>, config: Arc<Config>) -> Self {
        Self { directory, config }
    }

    /// Revokes a user's access per the configured policy.
    ///
    /// `StripRoles` removes the base role (when configured) and the VIP role,
    /// leaving the user in the guild; `Ban` removes them outright with the
    /// supplied reason in the audit log.
    ///
    /// # Returns
    /// - `Ok(String)` - Human-readable summary for the webhook response
    /// - `Err(AppError)` - A directory mutation failed
    pub async fn revoke(&self, user_id: u64, reason: &str) -> Result<String, AppError> {
        match self.config.revoke_policy {
            RevokePolicy::Ban => {
                self.directory.ban(user_id, reason).await?;
                tracing::info!("banned user {} ({})", user_id, reason);

                Ok(format!("User {} banned.", user_id))
            }
            RevokePolicy::StripRoles => {
                if let Some(base_role_id) = self.config.base_role_id {
                    self.directory.revoke_role(user_id, base_role_id).await?;
                }
                self.directory
                    .revoke_role(user_id, self.config.vip_role_id)
                    .await?;
                tracing::info!("stripped entitlement roles from user {} ({})", user_id, reason);

                Ok(format!("Entitlement roles removed from user {}.", user_id))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::service::mock::{test_config, MockDirectory};

    /// Tests the default strip-roles policy.
    ///
    /// Expected: base and VIP roles revoked once each, no ban issued
    #[tokio::test]
    async fn strips_both_entitlement_roles() {
        let directory = Arc::new(MockDirectory::default());
        let config = Arc::new(test_config(RevokePolicy::StripRoles));

        let service = RevocationService::new(directory.clone(), config);
        service.revoke(42, "chargeback").await.unwrap();

        assert_eq!(*directory.revoked.lock().unwrap(), vec![(42, 2), (42, 3)]);
        assert!(directory.banned.lock().unwrap().is_empty());
    }

    /// Tests the opt-in ban policy.
    ///
    /// Expected: exactly one ban carrying the supplied reason, no role calls
    #[tokio::test]
    async fn bans_with_supplied_reason() {
        let directory = Arc::new(MockDirectory::default());
        let config = Arc::new(test_config(RevokePolicy::Ban));

        let service = RevocationService::new(directory.clone(), config);
        service.revoke(42, "chargeback").await.unwrap();

        assert_eq!(
            *directory.banned.lock().unwrap(),
            vec![(42, "chargeback".to_string())]
        );
        assert!(directory.revoked.lock().unwrap().is_empty());
    }

    /// Tests strip-roles when no base role is configured.
    ///
    /// Expected: only the VIP role is revoked
    #[tokio::test]
    async fn skips_unconfigured_base_role() {
        let directory = Arc::new(MockDirectory::default());
        let mut config = test_config(RevokePolicy::StripRoles);
        config.base_role_id = None;

        let service = RevocationService::new(directory.clone(), Arc::new(config));
        service.revoke(42, "refund").await.unwrap();

        assert_eq!(*directory.revoked.lock().unwrap(), vec![(42, 3)]);
    }
}
