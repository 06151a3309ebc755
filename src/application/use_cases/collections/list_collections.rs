use uuid::Uuid;

use crate::application::error::ServiceResult;
use crate::application::ports::collection_repository::CollectionRepository;
use crate::domain::writings::writing::Collection;

pub struct ListCollections<'a, C: CollectionRepository + ?Sized> {
    pub collections: &'a C,
}

impl<'a, C: CollectionRepository + ?Sized> ListCollections<'a, C> {
    pub async fn execute(&self, owner_id: Uuid) -> ServiceResult<Vec<Collection>> {
        let items = self.collections.list_for_user(owner_id).await?;
        Ok(items)
    }
}
