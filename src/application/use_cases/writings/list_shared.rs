use uuid::Uuid;

use crate::application::error::ServiceResult;
use crate::application::ports::writing_repository::{SharedWriting, WritingRepository};

pub struct ListSharedWritings<'a, W: WritingRepository + ?Sized> {
    pub writings: &'a W,
}

impl<'a, W: WritingRepository + ?Sized> ListSharedWritings<'a, W> {
    /// Writings the caller can reach through a collaborator row, with the
    /// owner's summary. Owned writings live in the owned listing only.
    pub async fn execute(&self, user_id: Uuid) -> ServiceResult<Vec<SharedWriting>> {
        let items = self.writings.list_shared_with_user(user_id).await?;
        Ok(items)
    }
}
