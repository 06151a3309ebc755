pub mod create_collection;
pub mod get_dashboard;
pub mod list_collections;
