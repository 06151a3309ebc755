use uuid::Uuid;

use crate::application::access;
use crate::application::dto::collaboration::{
    CollaborationOverviewDto, CollaboratorDto, ShareLinkDto,
};
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::collaborator_repository::CollaboratorRepository;
use crate::application::ports::share_link_repository::ShareLinkRepository;
use crate::application::ports::writing_repository::WritingRepository;

pub struct GetOverview<'a, W, C, S>
where
    W: WritingRepository + ?Sized,
    C: CollaboratorRepository + ?Sized,
    S: ShareLinkRepository + ?Sized,
{
    pub writings: &'a W,
    pub collaborators: &'a C,
    pub links: &'a S,
}

impl<'a, W, C, S> GetOverview<'a, W, C, S>
where
    W: WritingRepository + ?Sized,
    C: CollaboratorRepository + ?Sized,
    S: ShareLinkRepository + ?Sized,
{
    pub async fn execute(
        &self,
        caller_id: Uuid,
        writing_id: Uuid,
    ) -> ServiceResult<CollaborationOverviewDto> {
        let caller_role =
            access::require_view(self.writings, self.collaborators, writing_id, caller_id)
                .await?;
        let writing = self
            .writings
            .get_by_id(writing_id)
            .await?
            .ok_or(ServiceError::NotFound)?;

        let collaborators = self
            .collaborators
            .list_with_users(writing_id)
            .await?
            .into_iter()
            .map(|c| CollaboratorDto {
                id: c.collaborator.id,
                user_id: c.collaborator.user_id,
                user_name: c.user_name,
                user_email: c.user_email,
                role: c.collaborator.role,
                joined_at: c.collaborator.joined_at,
                last_active: c.collaborator.last_active,
            })
            .collect();

        let active_links = self
            .links
            .list_active_for_writing(writing_id)
            .await?
            .into_iter()
            .map(|l| ShareLinkDto {
                id: l.id,
                token: l.token,
                expires_at: l.expires_at,
                max_users: l.max_users,
                created_at: l.created_at,
            })
            .collect();

        Ok(CollaborationOverviewDto {
            writing_id: writing.id,
            owner_id: writing.owner_id,
            title: writing.title,
            content: writing.content,
            caller_role,
            collaborators,
            active_links,
        })
    }
}
