use chrono::TimeDelta;
use std::sync::Arc;

use crate::auth::{AuthStrategy, JwtStrategy};
use crate::config::{Config, ConfigError};
use crate::invitations::{InMemoryInvitationStore, InvitationService};
use crate::uploads::{InMemoryUploadStore, UploadStore};

/// Shared handles registered with every actix worker as `web::Data<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub jwt: Arc<JwtStrategy>,
    pub invitations: Arc<InvitationService>,
    pub uploads: Arc<dyn UploadStore>,
    pub enable_playground: bool,
}

impl AppState {
    /// Wires the in-memory stores and the `jwt` strategy from `config`.
    ///
    /// Fails with [`ConfigError::Invalid`] when the invitation lifetime cannot
    /// be represented as a duration.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let ttl = TimeDelta::try_hours(config.invitation_ttl_hours)
            .ok_or(ConfigError::Invalid("INVITATION_TTL_HOURS"))?;
        let jwt = Arc::new(JwtStrategy::new(
            &config.jwt_secret,
            config.jwt_expiration_seconds,
        ));
        let invitations = Arc::new(InvitationService::new(
            Arc::new(InMemoryInvitationStore::new()),
            Arc::clone(&jwt),
            ttl,
        ));

        Ok(Self {
            jwt,
            invitations,
            uploads: Arc::new(InMemoryUploadStore::new()),
            enable_playground: config.enable_playground,
        })
    }

    /// The strategy route guards delegate to.
    pub fn auth_strategy(&self) -> Arc<dyn AuthStrategy> {
        self.jwt.clone()
    }
}
