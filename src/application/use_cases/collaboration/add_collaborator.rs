use uuid::Uuid;

use crate::application::access;
use crate::application::dto::collaboration::CollaboratorDto;
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::collaborator_repository::CollaboratorRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::application::ports::writing_repository::WritingRepository;
use crate::domain::writings::collab::Role;

pub struct AddCollaborator<'a, W, C, U>
where
    W: WritingRepository + ?Sized,
    C: CollaboratorRepository + ?Sized,
    U: UserRepository + ?Sized,
{
    pub writings: &'a W,
    pub collaborators: &'a C,
    pub users: &'a U,
}

impl<'a, W, C, U> AddCollaborator<'a, W, C, U>
where
    W: WritingRepository + ?Sized,
    C: CollaboratorRepository + ?Sized,
    U: UserRepository + ?Sized,
{
    pub async fn execute(
        &self,
        writing_id: Uuid,
        caller_id: Uuid,
        invitee_email: &str,
        role: Role,
    ) -> ServiceResult<CollaboratorDto> {
        access::require_owner(self.writings, self.collaborators, writing_id, caller_id).await?;

        if !matches!(role, Role::Editor | Role::Viewer) {
            return Err(ServiceError::InvalidArgument(
                "role must be editor or viewer".into(),
            ));
        }

        let invitee = self
            .users
            .find_by_email(invitee_email)
            .await?
            .ok_or(ServiceError::UserNotFound)?;

        // The owner already holds full access without a collaborator row.
        let writing = self
            .writings
            .get_by_id(writing_id)
            .await?
            .ok_or(ServiceError::NotFound)?;
        if writing.owner_id == invitee.id {
            return Err(ServiceError::AlreadyCollaborator);
        }
        if self
            .collaborators
            .find(writing_id, invitee.id)
            .await?
            .is_some()
        {
            return Err(ServiceError::AlreadyCollaborator);
        }

        let row = self.collaborators.add(writing_id, invitee.id, role).await?;
        Ok(CollaboratorDto {
            id: row.id,
            user_id: invitee.id,
            user_name: invitee.name,
            user_email: invitee.email,
            role: row.role,
            joined_at: row.joined_at,
            last_active: row.last_active,
        })
    }
}
