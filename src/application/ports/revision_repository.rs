use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::writings::writing::Revision;

#[async_trait]
pub trait RevisionRepository: Send + Sync {
    /// Surviving revisions for a writing, newest first (at most the retention
    /// window's worth).
    async fn list_for_writing(&self, writing_id: Uuid) -> anyhow::Result<Vec<Revision>>;

    /// Fetch one revision, scoped to its writing.
    async fn get(&self, writing_id: Uuid, revision_id: Uuid) -> anyhow::Result<Option<Revision>>;
}
