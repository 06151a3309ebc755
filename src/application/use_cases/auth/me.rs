use uuid::Uuid;

use crate::application::error::ServiceResult;
use crate::application::ports::user_repository::{UserRepository, UserRow};

pub struct GetMe<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> GetMe<'a, R> {
    /// `None` means the token's subject no longer exists; the HTTP layer
    /// treats that as an authentication failure.
    pub async fn execute(&self, id: Uuid) -> ServiceResult<Option<UserRow>> {
        let row = self.repo.find_by_id(id).await?;
        Ok(row.map(|u| UserRow {
            id: u.id,
            email: u.email,
            name: u.name,
            password_hash: None,
        }))
    }
}
