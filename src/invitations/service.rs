use chrono::{Duration, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;
use validator::Validate;

use super::model::{
    AcceptInvitationResponse, CreatedInvitation, Invitation, InvitationStatus, hash_token,
};
use super::store::InvitationStore;
use crate::auth::{AuthenticatedUser, JwtStrategy};
use crate::error::ApiError;

#[derive(Debug, Validate)]
struct InvitationRequest {
    #[validate(email(message = "email must be a valid address"))]
    email: String,
}

/// Invitation lifecycle: create, accept, revoke.
///
/// Accepting trades a single-use invitation token for an access token signed
/// by the `jwt` strategy.
pub struct InvitationService {
    store: Arc<dyn InvitationStore>,
    strategy: Arc<JwtStrategy>,
    ttl: Duration,
    // serialises find-then-update so a token is accepted at most once
    transition: Mutex<()>,
}

impl InvitationService {
    pub fn new(store: Arc<dyn InvitationStore>, strategy: Arc<JwtStrategy>, ttl: Duration) -> Self {
        Self {
            store,
            strategy,
            ttl,
            transition: Mutex::new(()),
        }
    }

    pub async fn create(
        &self,
        inviter: &AuthenticatedUser,
        email: &str,
    ) -> Result<CreatedInvitation, ApiError> {
        let request = InvitationRequest {
            email: email.trim().to_lowercase(),
        };
        request.validate()?;

        let _guard = self.transition.lock().await;
        let now = Utc::now();

        let duplicate = self
            .store
            .list_by_inviter(&inviter.id)
            .await
            .into_iter()
            .any(|i| i.email == request.email && i.is_open_at(now));
        if duplicate {
            return Err(ApiError::conflict(format!(
                "a pending invitation for {} already exists",
                request.email
            )));
        }

        let expires_at = now.checked_add_signed(self.ttl).ok_or_else(|| {
            ApiError::internal(format!("invitation ttl {} overflows the calendar", self.ttl))
        })?;

        let token = generate_token();
        let invitation = Invitation {
            id: Uuid::new_v4(),
            email: request.email,
            invited_by: inviter.id.clone(),
            token_hash: hash_token(&token),
            status: InvitationStatus::Pending,
            created_at: now,
            expires_at,
            accepted_at: None,
        };
        self.store.insert(invitation.clone()).await;

        tracing::info!(
            invitation_id = %invitation.id,
            invited_by = %invitation.invited_by,
            "invitation created"
        );

        Ok(CreatedInvitation {
            id: invitation.id,
            email: invitation.email,
            expires_at: invitation.expires_at,
            token,
        })
    }

    pub async fn accept(&self, token: &str) -> Result<AcceptInvitationResponse, ApiError> {
        let token_hash = hash_token(token.trim());

        let _guard = self.transition.lock().await;
        let mut invitation = self
            .store
            .find_by_token_hash(&token_hash)
            .await
            .ok_or(ApiError::NotFound("invitation"))?;

        match invitation.status {
            InvitationStatus::Accepted => {
                return Err(ApiError::conflict("invitation has already been accepted"));
            }
            InvitationStatus::Revoked => {
                return Err(ApiError::conflict("invitation has been revoked"));
            }
            InvitationStatus::Pending => {}
        }

        let now = Utc::now();
        if invitation.is_expired_at(now) {
            return Err(ApiError::conflict("invitation has expired"));
        }

        let access_token = self
            .strategy
            .issue_token(&invitation.id.to_string(), &invitation.email)?;

        invitation.status = InvitationStatus::Accepted;
        invitation.accepted_at = Some(now);
        if !self.store.update(invitation.clone()).await {
            return Err(ApiError::internal(format!(
                "invitation {} vanished during acceptance",
                invitation.id
            )));
        }

        tracing::info!(invitation_id = %invitation.id, "invitation accepted");

        Ok(AcceptInvitationResponse {
            message: "Invitation accepted".to_string(),
            access_token,
        })
    }

    /// Marks a pending invitation sent by `inviter` as revoked.
    ///
    /// Invitations sent by someone else are reported as not found. Anything no
    /// longer `Pending` is a conflict.
    pub async fn revoke(&self, inviter: &AuthenticatedUser, id: Uuid) -> Result<(), ApiError> {
        let _guard = self.transition.lock().await;
        let mut invitation = self
            .store
            .find_by_id(id)
            .await
            .filter(|i| i.invited_by == inviter.id)
            .ok_or(ApiError::NotFound("invitation"))?;

        if invitation.status != InvitationStatus::Pending {
            return Err(ApiError::conflict("only pending invitations can be revoked"));
        }

        invitation.status = InvitationStatus::Revoked;
        if !self.store.update(invitation).await {
            return Err(ApiError::internal(format!(
                "invitation {} vanished during revocation",
                id
            )));
        }

        tracing::info!(invitation_id = %id, "invitation revoked");
        Ok(())
    }

    /// Every invitation `inviter` has sent, newest first.
    pub async fn list_sent(&self, inviter: &AuthenticatedUser) -> Vec<Invitation> {
        self.store.list_by_inviter(&inviter.id).await
    }
}

fn generate_token() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}
