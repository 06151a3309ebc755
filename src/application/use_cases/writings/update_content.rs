use uuid::Uuid;

use crate::application::access;
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::collaborator_repository::CollaboratorRepository;
use crate::application::ports::collection_repository::CollectionRepository;
use crate::application::ports::writing_repository::WritingRepository;
use crate::domain::writings::collab::Role;
use crate::domain::writings::writing::{Revision, Writing};

pub struct UpdateContent<'a, W, C, L>
where
    W: WritingRepository + ?Sized,
    C: CollaboratorRepository + ?Sized,
    L: CollectionRepository + ?Sized,
{
    pub writings: &'a W,
    pub collaborators: &'a C,
    pub collections: &'a L,
}

impl<'a, W, C, L> UpdateContent<'a, W, C, L>
where
    W: WritingRepository + ?Sized,
    C: CollaboratorRepository + ?Sized,
    L: CollectionRepository + ?Sized,
{
    /// The content-write path of the gateway: authorize, then persist the new
    /// (title, content) and its revision as one unit. The writing is left
    /// untouched if the revision cannot be recorded.
    ///
    /// collection_id: None => untouched; Some(None) => clear; Some(Some(id)) => set.
    pub async fn execute(
        &self,
        id: Uuid,
        caller_id: Uuid,
        title: &str,
        content: &str,
        collection_id: Option<Option<Uuid>>,
    ) -> ServiceResult<(Writing, Revision)> {
        if title.trim().is_empty() {
            return Err(ServiceError::InvalidArgument("title is required".into()));
        }
        let role =
            access::require_edit(self.writings, self.collaborators, id, caller_id).await?;

        // Moving a writing between collections is owner-only; editors touch
        // only title and content.
        if let Some(target) = collection_id {
            if role != Role::Owner {
                return Err(ServiceError::Forbidden);
            }
            if let Some(cid) = target {
                self.collections
                    .get_owned(cid, caller_id)
                    .await?
                    .ok_or(ServiceError::NotFound)?;
            }
        }

        let (writing, revision) = self
            .writings
            .update_content_with_revision(id, title, content, collection_id)
            .await
            .map_err(ServiceError::RevisionWriteFailed)?;

        // No-op for the owner unless they also hold a collaborator row.
        self.collaborators
            .touch_last_active(id, caller_id, chrono::Utc::now())
            .await?;

        Ok((writing, revision))
    }
}
