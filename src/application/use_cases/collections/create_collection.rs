use uuid::Uuid;

use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::collection_repository::CollectionRepository;
use crate::domain::writings::writing::Collection;

pub struct CreateCollection<'a, C: CollectionRepository + ?Sized> {
    pub collections: &'a C,
}

impl<'a, C: CollectionRepository + ?Sized> CreateCollection<'a, C> {
    pub async fn execute(&self, owner_id: Uuid, name: &str) -> ServiceResult<Collection> {
        if name.trim().is_empty() {
            return Err(ServiceError::InvalidArgument("name is required".into()));
        }
        let collection = self.collections.create_for_user(owner_id, name).await?;
        Ok(collection)
    }
}
