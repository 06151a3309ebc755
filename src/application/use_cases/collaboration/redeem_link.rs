use uuid::Uuid;

use crate::application::dto::collaboration::RedeemOutcomeDto;
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::collaborator_repository::CollaboratorRepository;
use crate::application::ports::share_link_repository::ShareLinkRepository;
use crate::application::ports::writing_repository::WritingRepository;
use crate::domain::writings::collab::Role;

pub struct RedeemLink<'a, S, W, C>
where
    S: ShareLinkRepository + ?Sized,
    W: WritingRepository + ?Sized,
    C: CollaboratorRepository + ?Sized,
{
    pub links: &'a S,
    pub writings: &'a W,
    pub collaborators: &'a C,
}

impl<'a, S, W, C> RedeemLink<'a, S, W, C>
where
    S: ShareLinkRepository + ?Sized,
    W: WritingRepository + ?Sized,
    C: CollaboratorRepository + ?Sized,
{
    /// Idempotent for anyone who already has access: the owner and existing
    /// collaborators get their current role back without a new row, so a
    /// retried redeem after a timeout is safe.
    pub async fn execute(&self, token: &str, caller_id: Uuid) -> ServiceResult<RedeemOutcomeDto> {
        let link = self
            .links
            .find_by_token(token)
            .await?
            .filter(|l| l.is_active)
            .ok_or(ServiceError::NotFound)?;
        let now = chrono::Utc::now();
        if link.is_expired(now) {
            return Err(ServiceError::LinkExpired);
        }
        let writing = self
            .writings
            .get_by_id(link.writing_id)
            .await?
            .ok_or(ServiceError::NotFound)?;

        if writing.owner_id == caller_id {
            return Ok(RedeemOutcomeDto {
                writing_id: writing.id,
                writing_title: writing.title,
                granted_role: Role::Owner,
                already_member: true,
            });
        }
        if let Some(existing) = self.collaborators.find(writing.id, caller_id).await? {
            return Ok(RedeemOutcomeDto {
                writing_id: writing.id,
                writing_title: writing.title,
                granted_role: existing.role,
                already_member: true,
            });
        }

        let count = self.collaborators.count_for_writing(writing.id).await?;
        if !link.can_admit(count, now) {
            return Err(ServiceError::LinkFull);
        }

        let row = self
            .collaborators
            .add(writing.id, caller_id, Role::Editor)
            .await?;
        Ok(RedeemOutcomeDto {
            writing_id: writing.id,
            writing_title: writing.title,
            granted_role: row.role,
            already_member: false,
        })
    }
}
