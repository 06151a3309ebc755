pub mod create_writing;
pub mod delete_writing;
pub mod get_writing;
pub mod list_revisions;
pub mod list_shared;
pub mod list_writings;
pub mod restore_revision;
pub mod update_content;
