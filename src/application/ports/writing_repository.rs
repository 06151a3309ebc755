use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::writings::collab::Role;
use crate::domain::writings::writing::{Revision, Writing};

/// A writing visible to the caller through a collaborator row, with the
/// owner's summary attached.
#[derive(Debug, Clone)]
pub struct SharedWriting {
    pub writing: Writing,
    pub role: Role,
    pub owner_name: String,
    pub owner_email: String,
}

#[async_trait]
pub trait WritingRepository: Send + Sync {
    async fn create_for_user(
        &self,
        owner_id: Uuid,
        title: &str,
        content: &str,
        collection_id: Option<Uuid>,
    ) -> anyhow::Result<Writing>;

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Writing>>;

    /// Writings the user owns, newest first. `query` is a case-insensitive
    /// substring match over title, content, and the containing collection's
    /// name.
    async fn list_for_user(
        &self,
        user_id: Uuid,
        query: Option<String>,
        collection_id: Option<Uuid>,
    ) -> anyhow::Result<Vec<Writing>>;

    /// Writings where `user_id` holds a collaborator row, newest first. The
    /// writings a user owns never appear here.
    async fn list_shared_with_user(&self, user_id: Uuid) -> anyhow::Result<Vec<SharedWriting>>;

    /// Number of writings the user owns.
    async fn count_for_user(&self, owner_id: Uuid) -> anyhow::Result<i64>;

    // Returns false if not found or not owned by `owner_id`
    async fn delete_owned(&self, id: Uuid, owner_id: Uuid) -> anyhow::Result<bool>;

    /// Atomic unit behind `updateContent`: persist the new (title, content,
    /// updated_at), append the next revision (max sequence + 1), and prune
    /// revisions beyond the retention window. All three land together or not
    /// at all, and concurrent calls on the same writing are serialized.
    ///
    /// collection_id: None => untouched; Some(None) => clear; Some(Some(id)) => set.
    async fn update_content_with_revision(
        &self,
        id: Uuid,
        title: &str,
        content: &str,
        collection_id: Option<Option<Uuid>>,
    ) -> anyhow::Result<(Writing, Revision)>;
}
