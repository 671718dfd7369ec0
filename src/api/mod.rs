pub mod application;
pub mod dto;
pub mod error;
pub mod health;
pub mod job;
pub mod state;
pub mod user;
pub mod validation;

use actix_web::web;

use crate::api::state::AppState;

/// Register shared app data and every API route.
pub fn configure(state: web::Data<AppState>, max_payload_size: usize) -> impl FnOnce(&mut web::ServiceConfig) {
    move |config| {
        config
            .app_data(state)
            .app_data(validation::json_config(max_payload_size))
            .app_data(validation::path_config())
            .configure(health::health_config)
            .configure(user::handlers::user_config)
            .configure(job::handlers::job_config)
            .configure(application::handlers::application_config);
    }
}
