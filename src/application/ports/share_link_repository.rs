use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::writings::collab::ShareLink;

#[async_trait]
pub trait ShareLinkRepository: Send + Sync {
    async fn create(
        &self,
        writing_id: Uuid,
        created_by: Uuid,
        token: &str,
        expires_at: Option<chrono::DateTime<chrono::Utc>>,
        max_users: i32,
    ) -> anyhow::Result<ShareLink>;

    async fn find_by_token(&self, token: &str) -> anyhow::Result<Option<ShareLink>>;

    async fn list_active_for_writing(&self, writing_id: Uuid) -> anyhow::Result<Vec<ShareLink>>;

    /// Soft-deactivation; returns false only when no such link exists on the
    /// writing. Deactivating an already-inactive link is a no-op success.
    async fn deactivate(&self, writing_id: Uuid, link_id: Uuid) -> anyhow::Result<bool>;
}
