use uuid::Uuid;

use crate::application::error::ServiceResult;
use crate::application::ports::collection_repository::CollectionRepository;
use crate::application::ports::writing_repository::WritingRepository;
use crate::domain::writings::writing::Collection;

#[derive(Debug, Clone)]
pub struct DashboardData {
    pub collections: Vec<(Collection, i64)>,
    pub writings_total: i64,
}

pub struct GetDashboard<'a, W, C>
where
    W: WritingRepository + ?Sized,
    C: CollectionRepository + ?Sized,
{
    pub writings: &'a W,
    pub collections: &'a C,
}

impl<'a, W, C> GetDashboard<'a, W, C>
where
    W: WritingRepository + ?Sized,
    C: CollectionRepository + ?Sized,
{
    /// The home-screen aggregate: every collection with its writing count,
    /// plus the total number of owned writings (filed or not).
    pub async fn execute(&self, user_id: Uuid) -> ServiceResult<DashboardData> {
        let collections = self.collections.list_with_counts(user_id).await?;
        let writings_total = self.writings.count_for_user(user_id).await?;
        Ok(DashboardData {
            collections,
            writings_total,
        })
    }
}
