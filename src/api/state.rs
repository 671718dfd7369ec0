use std::sync::Arc;

use crate::api::application::ApplicationService;
use crate::api::job::JobService;
use crate::api::user::UserService;
use crate::config::Environment;
use crate::db::store::Store;

/// Shared request state: one service per resource over the selected store
pub struct AppState {
    pub environment: Environment,
    pub store: Arc<dyn Store>,
    pub users: UserService,
    pub jobs: JobService,
    pub applications: ApplicationService,
}

impl AppState {
    pub fn new(environment: Environment, store: Arc<dyn Store>) -> Self {
        AppState {
            environment,
            users: UserService::new(store.clone()),
            jobs: JobService::new(store.clone()),
            applications: ApplicationService::new(store.clone()),
            store,
        }
    }
}
