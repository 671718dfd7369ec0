pub mod handlers;
pub mod models;
pub mod service;

pub use models::{ApplicationChanges, NewApplication};
pub use service::ApplicationService;
