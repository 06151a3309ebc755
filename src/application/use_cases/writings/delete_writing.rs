use uuid::Uuid;

use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::writing_repository::WritingRepository;

pub struct DeleteWriting<'a, W: WritingRepository + ?Sized> {
    pub writings: &'a W,
}

impl<'a, W: WritingRepository + ?Sized> DeleteWriting<'a, W> {
    /// Only the true owner may delete; collaborators of any role get the same
    /// `NotFound` as a stranger.
    pub async fn execute(&self, id: Uuid, caller_id: Uuid) -> ServiceResult<()> {
        let deleted = self.writings.delete_owned(id, caller_id).await?;
        if deleted {
            Ok(())
        } else {
            Err(ServiceError::NotFound)
        }
    }
}
