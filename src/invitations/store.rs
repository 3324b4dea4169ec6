use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::model::Invitation;

/// Persistence for invitations, shared as `Arc<dyn InvitationStore>`.
///
/// Implementations only store and look up records. Status transitions and
/// their ordering belong to `InvitationService`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InvitationStore: Send + Sync {
    async fn insert(&self, invitation: Invitation);

    async fn find_by_id(&self, id: Uuid) -> Option<Invitation>;

    /// Looks up by SHA-256 hex digest; raw tokens are never stored.
    async fn find_by_token_hash(&self, token_hash: &str) -> Option<Invitation>;

    /// Replaces a stored invitation. Returns `false` if `id` is unknown.
    async fn update(&self, invitation: Invitation) -> bool;

    /// Invitations sent by `inviter`, newest first.
    async fn list_by_inviter(&self, inviter: &str) -> Vec<Invitation>;
}

#[derive(Default)]
pub struct InMemoryInvitationStore {
    invitations: RwLock<HashMap<Uuid, Invitation>>,
}

impl InMemoryInvitationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InvitationStore for InMemoryInvitationStore {
    async fn insert(&self, invitation: Invitation) {
        self.invitations
            .write()
            .await
            .insert(invitation.id, invitation);
    }

    async fn find_by_id(&self, id: Uuid) -> Option<Invitation> {
        self.invitations.read().await.get(&id).cloned()
    }

    async fn find_by_token_hash(&self, token_hash: &str) -> Option<Invitation> {
        self.invitations
            .read()
            .await
            .values()
            .find(|i| i.token_hash == token_hash)
            .cloned()
    }

    async fn update(&self, invitation: Invitation) -> bool {
        let mut invitations = self.invitations.write().await;
        match invitations.get_mut(&invitation.id) {
            Some(existing) => {
                *existing = invitation;
                true
            }
            None => false,
        }
    }

    async fn list_by_inviter(&self, inviter: &str) -> Vec<Invitation> {
        let mut found: Vec<Invitation> = self
            .invitations
            .read()
            .await
            .values()
            .filter(|i| i.invited_by == inviter)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invitations::model::{InvitationStatus, hash_token};
    use chrono::{Duration, Utc};

    fn invitation(inviter: &str, token: &str, age_minutes: i64) -> Invitation {
        let created_at = Utc::now() - Duration::minutes(age_minutes);
        Invitation {
            id: Uuid::new_v4(),
            email: format!("{}@example.com", token),
            invited_by: inviter.to_string(),
            token_hash: hash_token(token),
            status: InvitationStatus::Pending,
            created_at,
            expires_at: created_at + Duration::hours(1),
            accepted_at: None,
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let store = InMemoryInvitationStore::new();
        let inv = invitation("owner", "tok", 0);
        store.insert(inv.clone()).await;

        assert_eq!(store.find_by_id(inv.id).await, Some(inv.clone()));
        assert_eq!(store.find_by_token_hash(&hash_token("tok")).await, Some(inv));
        assert!(store.find_by_token_hash(&hash_token("other")).await.is_none());
    }

    #[tokio::test]
    async fn test_update_unknown_returns_false() {
        let store = InMemoryInvitationStore::new();
        assert!(!store.update(invitation("owner", "tok", 0)).await);
    }

    #[tokio::test]
    async fn test_update_replaces() {
        let store = InMemoryInvitationStore::new();
        let mut inv = invitation("owner", "tok", 0);
        store.insert(inv.clone()).await;

        inv.status = InvitationStatus::Revoked;
        assert!(store.update(inv.clone()).await);
        assert_eq!(
            store.find_by_id(inv.id).await.unwrap().status,
            InvitationStatus::Revoked
        );
    }

    #[tokio::test]
    async fn test_list_by_inviter_newest_first() {
        let store = InMemoryInvitationStore::new();
        let older = invitation("owner", "a", 30);
        let newer = invitation("owner", "b", 5);
        store.insert(older.clone()).await;
        store.insert(newer.clone()).await;
        store.insert(invitation("someone-else", "c", 0)).await;

        let listed = store.list_by_inviter("owner").await;
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, newer.id);
        assert_eq!(listed[1].id, older.id);
    }
}
