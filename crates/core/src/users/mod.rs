//! Users module - user documents, repository seam and service.

mod users_model;
mod users_service;
mod users_traits;

pub(crate) use users_service::load_user;

pub use users_model::{NewUser, User, UserData};
pub use users_service::UserService;
pub use users_traits::{UserRepositoryTrait, UserServiceTrait};
