use uuid::Uuid;

use crate::application::access;
use crate::application::error::ServiceResult;
use crate::application::ports::collaborator_repository::CollaboratorRepository;
use crate::application::ports::revision_repository::RevisionRepository;
use crate::application::ports::writing_repository::WritingRepository;
use crate::domain::writings::writing::Revision;

pub struct ListRevisions<'a, W, C, R>
where
    W: WritingRepository + ?Sized,
    C: CollaboratorRepository + ?Sized,
    R: RevisionRepository + ?Sized,
{
    pub writings: &'a W,
    pub collaborators: &'a C,
    pub revisions: &'a R,
}

impl<'a, W, C, R> ListRevisions<'a, W, C, R>
where
    W: WritingRepository + ?Sized,
    C: CollaboratorRepository + ?Sized,
    R: RevisionRepository + ?Sized,
{
    pub async fn execute(&self, caller_id: Uuid, writing_id: Uuid) -> ServiceResult<Vec<Revision>> {
        access::require_view(self.writings, self.collaborators, writing_id, caller_id).await?;
        let items = self.revisions.list_for_writing(writing_id).await?;
        Ok(items)
    }
}
