use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString},
};
use password_hash::rand_core::OsRng;

use crate::application::error::{ServiceError, ServiceResult};
use crate::application::ports::user_repository::{UserRepository, UserRow};

/// Shorter passwords are rejected before any hashing happens.
const MIN_PASSWORD_CHARS: usize = 8;

pub struct Register<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

impl<'a, R: UserRepository + ?Sized> Register<'a, R> {
    /// Validates, then creates the account. Emails are stored lowercased so
    /// the collaborator invite lookup matches regardless of how the address
    /// was typed.
    pub async fn execute(&self, req: &RegisterRequest) -> ServiceResult<UserRow> {
        let email = req.email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(ServiceError::InvalidArgument(
                "a valid email is required".into(),
            ));
        }
        let name = req.name.trim();
        if name.is_empty() {
            return Err(ServiceError::InvalidArgument("name is required".into()));
        }
        if req.password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(ServiceError::InvalidArgument(format!(
                "password must be at least {MIN_PASSWORD_CHARS} characters"
            )));
        }
        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(ServiceError::EmailTaken);
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(req.password.as_bytes(), &salt)
            .map_err(|e| ServiceError::Transient(anyhow::anyhow!(e.to_string())))?
            .to_string();
        let user = self.repo.create_user(&email, name, &hash).await?;
        Ok(user)
    }
}
