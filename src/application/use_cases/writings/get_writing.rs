use uuid::Uuid;

use crate::application::access;
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::collaborator_repository::CollaboratorRepository;
use crate::application::ports::writing_repository::WritingRepository;
use crate::domain::writings::collab::Role;
use crate::domain::writings::writing::Writing;

pub struct GetWriting<'a, W, C>
where
    W: WritingRepository + ?Sized,
    C: CollaboratorRepository + ?Sized,
{
    pub writings: &'a W,
    pub collaborators: &'a C,
}

impl<'a, W, C> GetWriting<'a, W, C>
where
    W: WritingRepository + ?Sized,
    C: CollaboratorRepository + ?Sized,
{
    pub async fn execute(&self, caller_id: Uuid, id: Uuid) -> ServiceResult<(Writing, Role)> {
        let role =
            access::require_view(self.writings, self.collaborators, id, caller_id).await?;
        let writing = self
            .writings
            .get_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound)?;
        Ok((writing, role))
    }
}
