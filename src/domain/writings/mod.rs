pub mod collab;
pub mod writing;
