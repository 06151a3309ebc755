use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordVerifier},
};

use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::user_repository::{UserRepository, UserRow};

pub struct Login<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl<'a, R: UserRepository + ?Sized> Login<'a, R> {
    /// `Ok(None)` covers both an unknown email and a wrong password, so the
    /// two are indistinguishable to the caller.
    pub async fn execute(&self, req: &LoginRequest) -> ServiceResult<Option<UserRow>> {
        let email = req.email.trim().to_lowercase();
        let Some(row) = self.repo.find_by_email(&email).await? else {
            return Ok(None);
        };
        let Some(hash) = row.password_hash.as_deref() else {
            return Ok(None);
        };
        let parsed = PasswordHash::new(hash)
            .map_err(|e| ServiceError::Transient(anyhow::anyhow!(e.to_string())))?;
        if Argon2::default()
            .verify_password(req.password.as_bytes(), &parsed)
            .is_err()
        {
            return Ok(None);
        }
        Ok(Some(UserRow {
            id: row.id,
            email: row.email,
            name: row.name,
            password_hash: None,
        }))
    }
}
