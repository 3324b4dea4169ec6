use async_trait::async_trait;
use tokio::sync::RwLock;

use super::dto::Upload;

/// Persistence for upload records, shared as `Arc<dyn UploadStore>`.
///
/// Records arrive already validated; stores do not re-check them.
#[async_trait]
pub trait UploadStore: Send + Sync {
    async fn insert(&self, upload: Upload);

    /// Uploads owned by `owner_id`, newest first.
    async fn list_by_owner(&self, owner_id: &str) -> Vec<Upload>;
}

#[derive(Default)]
pub struct InMemoryUploadStore {
    uploads: RwLock<Vec<Upload>>,
}

impl InMemoryUploadStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UploadStore for InMemoryUploadStore {
    async fn insert(&self, upload: Upload) {
        self.uploads.write().await.push(upload);
    }

    async fn list_by_owner(&self, owner_id: &str) -> Vec<Upload> {
        let mut owned: Vec<Upload> = self
            .uploads
            .read()
            .await
            .iter()
            .filter(|u| u.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        owned
    }
}
