//! Users module - registration, credentials and lookup.

mod password;
mod users_model;
mod users_service;
mod users_traits;


pub use password::{hash_password, verify_password};
pub use users_model::{NewUser, User};
pub use users_service::UserService;
pub use users_traits::{UserRepositoryTrait, UserServiceTrait};
