use uuid::Uuid;

use crate::application::access;
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::collaborator_repository::CollaboratorRepository;
use crate::application::ports::share_link_repository::ShareLinkRepository;
use crate::application::ports::writing_repository::WritingRepository;

pub struct DeactivateLink<'a, W, C, S>
where
    W: WritingRepository + ?Sized,
    C: CollaboratorRepository + ?Sized,
    S: ShareLinkRepository + ?Sized,
{
    pub writings: &'a W,
    pub collaborators: &'a C,
    pub links: &'a S,
}

impl<'a, W, C, S> DeactivateLink<'a, W, C, S>
where
    W: WritingRepository + ?Sized,
    C: CollaboratorRepository + ?Sized,
    S: ShareLinkRepository + ?Sized,
{
    /// Idempotent: deactivating a link that is already inactive succeeds. The
    /// link row stays around for audit.
    pub async fn execute(
        &self,
        writing_id: Uuid,
        caller_id: Uuid,
        link_id: Uuid,
    ) -> ServiceResult<()> {
        access::require_owner(self.writings, self.collaborators, writing_id, caller_id).await?;
        let found = self.links.deactivate(writing_id, link_id).await?;
        if found {
            Ok(())
        } else {
            Err(ServiceError::NotFound)
        }
    }
}
