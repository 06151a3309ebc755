use crate::application::dto::collaboration::LinkPreviewDto;
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::collaborator_repository::CollaboratorRepository;
use crate::application::ports::share_link_repository::ShareLinkRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::application::ports::writing_repository::WritingRepository;

pub struct InspectLink<'a, S, W, C, U>
where
    S: ShareLinkRepository + ?Sized,
    W: WritingRepository + ?Sized,
    C: CollaboratorRepository + ?Sized,
    U: UserRepository + ?Sized,
{
    pub links: &'a S,
    pub writings: &'a W,
    pub collaborators: &'a C,
    pub users: &'a U,
}

impl<'a, S, W, C, U> InspectLink<'a, S, W, C, U>
where
    S: ShareLinkRepository + ?Sized,
    W: WritingRepository + ?Sized,
    C: CollaboratorRepository + ?Sized,
    U: UserRepository + ?Sized,
{
    /// Unauthenticated preview. Unknown and deactivated tokens are
    /// indistinguishable; expiry is reported separately so the page can say
    /// why joining is impossible.
    pub async fn execute(&self, token: &str) -> ServiceResult<LinkPreviewDto> {
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
        let creator = self
            .users
            .find_by_id(link.created_by)
            .await?
            .ok_or(ServiceError::NotFound)?;
        let count = self.collaborators.count_for_writing(link.writing_id).await?;

        Ok(LinkPreviewDto {
            writing_id: writing.id,
            writing_title: writing.title,
            writing_created_at: writing.created_at,
            creator_name: creator.name,
            // owner counts toward the cap
            current_members: count + 1,
            max_users: link.max_users,
            expires_at: link.expires_at,
            can_join: link.can_admit(count, now),
        })
    }
}
