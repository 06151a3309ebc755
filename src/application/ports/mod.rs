pub mod collaborator_repository;
pub mod collection_repository;
pub mod revision_repository;
pub mod share_link_repository;
pub mod user_repository;
pub mod writing_repository;
