use uuid::Uuid;

use crate::application::access;
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::collaborator_repository::CollaboratorRepository;
use crate::application::ports::revision_repository::RevisionRepository;
use crate::application::ports::writing_repository::WritingRepository;

#[derive(Debug, Clone)]
pub struct RestoredContent {
    pub title: String,
    pub content: String,
    pub sequence_number: i64,
}

pub struct RestoreRevision<'a, W, C, R>
where
    W: WritingRepository + ?Sized,
    C: CollaboratorRepository + ?Sized,
    R: RevisionRepository + ?Sized,
{
    pub writings: &'a W,
    pub collaborators: &'a C,
    pub revisions: &'a R,
}

impl<'a, W, C, R> RestoreRevision<'a, W, C, R>
where
    W: WritingRepository + ?Sized,
    C: CollaboratorRepository + ?Sized,
    R: RevisionRepository + ?Sized,
{
    /// Restoring is a staging action: it hands back the snapshot for the
    /// client to save, and that later save is what appends the next revision.
    pub async fn execute(
        &self,
        caller_id: Uuid,
        writing_id: Uuid,
        revision_id: Uuid,
    ) -> ServiceResult<RestoredContent> {
        access::require_edit(self.writings, self.collaborators, writing_id, caller_id).await?;
        let revision = self
            .revisions
            .get(writing_id, revision_id)
            .await?
            .ok_or(ServiceError::NotFound)?;
        Ok(RestoredContent {
            title: revision.title,
            content: revision.content,
            sequence_number: revision.sequence_number,
        })
    }
}
