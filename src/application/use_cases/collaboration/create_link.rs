use uuid::Uuid;

use crate::application::access;
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::collaborator_repository::CollaboratorRepository;
use crate::application::ports::share_link_repository::ShareLinkRepository;
use crate::application::ports::writing_repository::WritingRepository;
use crate::domain::writings::collab::ShareLink;

pub const DEFAULT_MAX_USERS: i32 = 3;

pub struct CreateLink<'a, W, C, S>
where
    W: WritingRepository + ?Sized,
    C: CollaboratorRepository + ?Sized,
    S: ShareLinkRepository + ?Sized,
{
    pub writings: &'a W,
    pub collaborators: &'a C,
    pub links: &'a S,
}

impl<'a, W, C, S> CreateLink<'a, W, C, S>
where
    W: WritingRepository + ?Sized,
    C: CollaboratorRepository + ?Sized,
    S: ShareLinkRepository + ?Sized,
{
    pub async fn execute(
        &self,
        writing_id: Uuid,
        caller_id: Uuid,
        token: &str,
        expires_at: Option<chrono::DateTime<chrono::Utc>>,
        max_users: Option<i32>,
    ) -> ServiceResult<ShareLink> {
        access::require_owner(self.writings, self.collaborators, writing_id, caller_id).await?;
        let max_users = max_users.unwrap_or(DEFAULT_MAX_USERS);
        if max_users < 2 {
            return Err(ServiceError::InvalidArgument(
                "max_users must be at least 2".into(),
            ));
        }
        let link = self
            .links
            .create(writing_id, caller_id, token, expires_at, max_users)
            .await?;
        Ok(link)
    }
}
