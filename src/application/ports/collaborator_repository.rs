use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::writings::collab::{Collaborator, Role};

#[derive(Debug, Clone)]
pub struct CollaboratorWithUser {
    pub collaborator: Collaborator,
    pub user_name: String,
    pub user_email: String,
}

#[async_trait]
pub trait CollaboratorRepository: Send + Sync {
    async fn find(&self, writing_id: Uuid, user_id: Uuid)
    -> anyhow::Result<Option<Collaborator>>;

    /// Fails on a duplicate (writing_id, user_id) pair.
    async fn add(&self, writing_id: Uuid, user_id: Uuid, role: Role)
    -> anyhow::Result<Collaborator>;

    // Returns false if no such collaborator on this writing
    async fn remove(&self, writing_id: Uuid, collaborator_id: Uuid) -> anyhow::Result<bool>;

    /// Collaborator rows for the writing; the owner is not among them.
    async fn count_for_writing(&self, writing_id: Uuid) -> anyhow::Result<i64>;

    async fn list_with_users(&self, writing_id: Uuid)
    -> anyhow::Result<Vec<CollaboratorWithUser>>;

    async fn touch_last_active(
        &self,
        writing_id: Uuid,
        user_id: Uuid,
        now: chrono::DateTime<chrono::Utc>,
    ) -> anyhow::Result<()>;
}
