//! SQLite storage implementation for user documents.

mod model;
mod repository;

pub use model::UserDB;
pub use repository::UserRepository;
