use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::writings::writing::Collection;

#[async_trait]
pub trait CollectionRepository: Send + Sync {
    async fn create_for_user(&self, owner_id: Uuid, name: &str) -> anyhow::Result<Collection>;

    async fn list_for_user(&self, owner_id: Uuid) -> anyhow::Result<Vec<Collection>>;

    /// Collections with the number of writings currently filed in each.
    async fn list_with_counts(&self, owner_id: Uuid) -> anyhow::Result<Vec<(Collection, i64)>>;

    async fn get_owned(&self, id: Uuid, owner_id: Uuid) -> anyhow::Result<Option<Collection>>;
}
