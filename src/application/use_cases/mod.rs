pub mod activity;
pub mod auth;
pub mod collaboration;
pub mod collections;
pub mod writings;
