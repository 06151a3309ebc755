pub mod activity;
pub mod auth;
pub mod collaboration;
pub mod collections;
pub mod dashboard;
pub mod error;
pub mod health;
pub mod writings;
