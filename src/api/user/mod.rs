pub mod handlers;
pub mod models;
pub mod service;

pub use models::{NewUser, UserChanges};
pub use service::UserService;
