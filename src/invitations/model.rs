use async_graphql::{Enum, SimpleObject};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Revoked,
}

/// An invitation as stored. Only the SHA-256 of the token is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invitation {
    pub id: Uuid,
    pub email: String,
    pub invited_by: String,
    pub token_hash: String,
    pub status: InvitationStatus,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub accepted_at: Option<DateTime<Utc>>,
}

impl Invitation {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn is_open_at(&self, now: DateTime<Utc>) -> bool {
        self.status == InvitationStatus::Pending && !self.is_expired_at(now)
    }
}

pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Result of accepting an invitation.
#[derive(SimpleObject, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptInvitationResponse {
    /// Human-readable confirmation
    pub message: String,
    /// Bearer credential for the invitee, accepted by the `jwt` strategy
    pub access_token: String,
}

/// Invitation view exposed through GraphQL.
#[derive(SimpleObject, Debug, Clone)]
#[graphql(name = "Invitation")]
pub struct InvitationObject {
    pub id: Uuid,
    pub email: String,
    pub status: InvitationStatus,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub accepted_at: Option<DateTime<Utc>>,
}

impl From<Invitation> for InvitationObject {
    fn from(invitation: Invitation) -> Self {
        Self {
            id: invitation.id,
            email: invitation.email,
            status: invitation.status,
            created_at: invitation.created_at,
            expires_at: invitation.expires_at,
            accepted_at: invitation.accepted_at,
        }
    }
}

/// Returned once, on creation: the only time the plaintext token is visible.
#[derive(SimpleObject, Debug, Clone)]
pub struct CreatedInvitation {
    pub id: Uuid,
    pub email: String,
    pub expires_at: DateTime<Utc>,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn invitation(status: InvitationStatus, expires_in: Duration) -> Invitation {
        let now = Utc::now();
        Invitation {
            id: Uuid::new_v4(),
            email: "ada@example.com".to_string(),
            invited_by: "owner".to_string(),
            token_hash: hash_token("t"),
            status,
            created_at: now,
            expires_at: now + expires_in,
            accepted_at: None,
        }
    }

    #[test]
    fn test_hash_token_is_stable_hex() {
        let a = hash_token("abc");
        assert_eq!(a, hash_token("abc"));
        assert_ne!(a, hash_token("abd"));
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_open_only_when_pending_and_unexpired() {
        let now = Utc::now();
        assert!(invitation(InvitationStatus::Pending, Duration::hours(1)).is_open_at(now));
        assert!(!invitation(InvitationStatus::Pending, Duration::hours(-1)).is_open_at(now));
        assert!(!invitation(InvitationStatus::Accepted, Duration::hours(1)).is_open_at(now));
        assert!(!invitation(InvitationStatus::Revoked, Duration::hours(1)).is_open_at(now));
    }

    #[test]
    fn test_expiry_boundary_is_inclusive() {
        let inv = invitation(InvitationStatus::Pending, Duration::hours(1));
        assert!(inv.is_expired_at(inv.expires_at));
        assert!(!inv.is_expired_at(inv.expires_at - Duration::seconds(1)));
    }

    #[test]
    fn test_accept_response_serializes_camel_case() {
        let resp = AcceptInvitationResponse {
            message: "ok".to_string(),
            access_token: "jwt".to_string(),
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["accessToken"], "jwt");
        assert_eq!(json["message"], "ok");
    }
}
