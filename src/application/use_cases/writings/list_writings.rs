use uuid::Uuid;

use crate::application::error::ServiceResult;
use crate::application::ports::writing_repository::WritingRepository;
use crate::domain::writings::writing::Writing;

pub struct ListWritings<'a, W: WritingRepository + ?Sized> {
    pub writings: &'a W,
}

impl<'a, W: WritingRepository + ?Sized> ListWritings<'a, W> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        query: Option<String>,
        collection_id: Option<Uuid>,
    ) -> ServiceResult<Vec<Writing>> {
        let items = self
            .writings
            .list_for_user(user_id, query, collection_id)
            .await?;
        Ok(items)
    }
}
