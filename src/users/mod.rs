//! # Users
//!
//! Mutable user records keyed by `id`.

pub mod errors;
pub mod model;
pub mod service;

pub use errors::{UserError, UserResult};
pub use model::{SaveUserRequest, UserUpdate};
pub use service::UserService;
