pub mod collaborator_repository_sqlx;
pub mod collection_repository_sqlx;
pub mod revision_repository_sqlx;
pub mod share_link_repository_sqlx;
pub mod user_repository_sqlx;
pub mod writing_repository_sqlx;
