//! User and role-binding domain entities.

pub mod binding;
pub mod model;
pub mod role;

pub use binding::RoleBinding;
pub use model::{CreateUser, User};
pub use role::AppRole;
