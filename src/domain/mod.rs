pub mod users;
pub mod writings;
