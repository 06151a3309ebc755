use uuid::Uuid;

use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::collection_repository::CollectionRepository;
use crate::application::ports::writing_repository::WritingRepository;
use crate::domain::writings::writing::Writing;

pub struct CreateWriting<'a, W, C>
where
    W: WritingRepository + ?Sized,
    C: CollectionRepository + ?Sized,
{
    pub writings: &'a W,
    pub collections: &'a C,
}

impl<'a, W, C> CreateWriting<'a, W, C>
where
    W: WritingRepository + ?Sized,
    C: CollectionRepository + ?Sized,
{
    pub async fn execute(
        &self,
        owner_id: Uuid,
        title: &str,
        content: &str,
        collection_id: Option<Uuid>,
    ) -> ServiceResult<Writing> {
        if title.trim().is_empty() {
            return Err(ServiceError::InvalidArgument("title is required".into()));
        }
        if let Some(cid) = collection_id {
            self.collections
                .get_owned(cid, owner_id)
                .await?
                .ok_or(ServiceError::NotFound)?;
        }
        let writing = self
            .writings
            .create_for_user(owner_id, title, content, collection_id)
            .await?;
        Ok(writing)
    }
}
