use uuid::Uuid;

use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::activity::{self, ActivityState};

pub struct PingActivity<'a, U: UserRepository + ?Sized> {
    pub users: &'a U,
}

impl<'a, U: UserRepository + ?Sized> PingActivity<'a, U> {
    /// Advance the caller's activity accumulator to `now` and persist it.
    pub async fn execute(
        &self,
        user_id: Uuid,
        now: chrono::DateTime<chrono::Utc>,
    ) -> ServiceResult<ActivityState> {
        let state = self
            .users
            .get_activity(user_id)
            .await?
            .ok_or(ServiceError::UserNotFound)?;
        let next = activity::advance(state, now);
        self.users.set_activity(user_id, next).await?;
        Ok(next)
    }
}
