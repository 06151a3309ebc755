use uuid::Uuid;

use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::collaborator_repository::CollaboratorRepository;
use crate::application::ports::writing_repository::WritingRepository;

pub struct RemoveCollaborator<'a, W, C>
where
    W: WritingRepository + ?Sized,
    C: CollaboratorRepository + ?Sized,
{
    pub writings: &'a W,
    pub collaborators: &'a C,
}

impl<'a, W, C> RemoveCollaborator<'a, W, C>
where
    W: WritingRepository + ?Sized,
    C: CollaboratorRepository + ?Sized,
{
    /// Strict owner check on the writing row itself: a collaborator granted an
    /// owner-equivalent role still may not evict others.
    pub async fn execute(
        &self,
        writing_id: Uuid,
        caller_id: Uuid,
        collaborator_id: Uuid,
    ) -> ServiceResult<()> {
        let writing = self
            .writings
            .get_by_id(writing_id)
            .await?
            .ok_or(ServiceError::NotFound)?;
        if writing.owner_id != caller_id {
            let visible = self
                .collaborators
                .find(writing_id, caller_id)
                .await?
                .is_some();
            return Err(if visible {
                ServiceError::Forbidden
            } else {
                ServiceError::NotFound
            });
        }
        let removed = self.collaborators.remove(writing_id, collaborator_id).await?;
        if removed {
            Ok(())
        } else {
            Err(ServiceError::NotFound)
        }
    }
}
