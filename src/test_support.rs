//! In-memory store and app builder for handler tests.

use std::sync::{Arc, Mutex, MutexGuard};

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{middleware, web, App};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;

use crate::api::{
    self,
    application::{ApplicationChanges, NewApplication},
    job::{JobChanges, NewJob},
    state::AppState,
    user::{NewUser, UserChanges},
};
use crate::config::Environment;
use crate::db::models::{ApplicationRow, Employer, JobListing, JobRow, UserRow};
use crate::db::store::{Store, StoreError};

/// Failure the fake store should report on its next calls
#[derive(Clone, Debug)]
pub enum Failure {
    /// Backend refused the request with this message
    Rejected(String),
    /// Backend unreachable
    Unavailable,
}

#[derive(Default)]
struct Tables {
    users: Vec<UserRow>,
    jobs: Vec<JobRow>,
    applications: Vec<ApplicationRow>,
    next_id: i64,
    failure: Option<Failure>,
}

/// Cloneable handle to a shared in-memory database
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn fail_with(&self, failure: Failure) {
        self.lock().failure = Some(failure);
    }

    pub fn users(&self) -> Vec<UserRow> {
        self.lock().users.clone()
    }

    pub fn seed_user(&self, nombre: &str, email: &str, rol: &str) -> i64 {
        let mut tables = self.lock();
        let id = tables.next();
        tables.users.push(UserRow {
            id_usuario: id,
            nombre: Some(nombre.into()),
            email: Some(email.into()),
            rol: Some(rol.into()),
            fecha_creacion: Some(Utc::now()),
        });
        id
    }

    pub fn seed_job(&self, titulo: &str, empleador_id: Option<i64>) -> i64 {
        let mut tables = self.lock();
        let id = tables.next();
        tables.jobs.push(JobRow {
            id_trabajo: id,
            titulo: Some(titulo.into()),
            descripcion: Some(format!("Descripción de {titulo}")),
            ubicacion: Some("Córdoba".into()),
            empleador_id,
            fecha_publicado: Some(Utc::now()),
        });
        id
    }

    pub fn seed_application(&self, trabajo_id: i64, usuario_id: i64, oferta_pago: f64) -> i64 {
        let mut tables = self.lock();
        let id = tables.next();
        tables.applications.push(ApplicationRow {
            id_postulacion: id,
            trabajo_id: Some(trabajo_id),
            usuario_id: Some(usuario_id),
            mensaje: Some("Me interesa".into()),
            oferta_pago: Some(oferta_pago),
        });
        id
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap()
    }

    /// Lock the tables, failing first if a failure has been armed.
    fn open(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        let tables = self.lock();
        let failure = tables.failure.clone();
        match failure {
            None => Ok(tables),
            Some(Failure::Rejected(message)) => Err(StoreError::Rejected(message)),
            Some(Failure::Unavailable) => Err(StoreError::Sql(sqlx::Error::PoolTimedOut)),
        }
    }
}

impl Tables {
    fn next(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn listing(&self, job: &JobRow) -> JobListing {
        let empleador = job
            .empleador_id
            .and_then(|id| self.users.iter().find(|u| u.id_usuario == id))
            .map(|u| {
                Json(Employer {
                    id_usuario: u.id_usuario,
                    nombre: u.nombre.clone(),
                    email: u.email.clone(),
                })
            });

        JobListing {
            id_trabajo: job.id_trabajo,
            titulo: job.titulo.clone(),
            descripcion: job.descripcion.clone(),
            ubicacion: job.ubicacion.clone(),
            fecha_publicado: job.fecha_publicado,
            empleador,
        }
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.open().map(|_| ())
    }

    async fn close(&self) {}

    async fn list_users(&self) -> Result<Vec<UserRow>, StoreError> {
        Ok(self.open()?.users.clone())
    }

    async fn find_user(&self, id: i64) -> Result<Option<UserRow>, StoreError> {
        Ok(self.open()?.users.iter().find(|u| u.id_usuario == id).cloned())
    }

    async fn create_user(&self, user: &NewUser) -> Result<UserRow, StoreError> {
        let mut tables = self.open()?;
        let row = UserRow {
            id_usuario: tables.next(),
            nombre: user.nombre.clone(),
            email: user.email.clone(),
            rol: user.rol.clone(),
            fecha_creacion: Some(Utc::now()),
        };
        tables.users.push(row.clone());
        Ok(row)
    }

    async fn update_user(&self, id: i64, changes: &UserChanges) -> Result<Option<UserRow>, StoreError> {
        let mut tables = self.open()?;
        Ok(tables.users.iter_mut().find(|u| u.id_usuario == id).map(|u| {
            if changes.nombre.is_some() {
                u.nombre = changes.nombre.clone();
            }
            if changes.email.is_some() {
                u.email = changes.email.clone();
            }
            if changes.rol.is_some() {
                u.rol = changes.rol.clone();
            }
            u.clone()
        }))
    }

    async fn delete_user(&self, id: i64) -> Result<(), StoreError> {
        self.open()?.users.retain(|u| u.id_usuario != id);
        Ok(())
    }

    async fn list_jobs(&self) -> Result<Vec<JobListing>, StoreError> {
        let tables = self.open()?;
        Ok(tables.jobs.iter().map(|job| tables.listing(job)).collect())
    }

    async fn find_job(&self, id: i64) -> Result<Option<JobListing>, StoreError> {
        let tables = self.open()?;
        Ok(tables
            .jobs
            .iter()
            .find(|job| job.id_trabajo == id)
            .map(|job| tables.listing(job)))
    }

    async fn create_job(&self, job: &NewJob) -> Result<JobRow, StoreError> {
        let mut tables = self.open()?;
        let row = JobRow {
            id_trabajo: tables.next(),
            titulo: job.titulo.clone(),
            descripcion: job.descripcion.clone(),
            ubicacion: job.ubicacion.clone(),
            empleador_id: job.empleador_id,
            fecha_publicado: Some(Utc::now()),
        };
        tables.jobs.push(row.clone());
        Ok(row)
    }

    async fn update_job(&self, id: i64, changes: &JobChanges) -> Result<Option<JobRow>, StoreError> {
        let mut tables = self.open()?;
        Ok(tables.jobs.iter_mut().find(|j| j.id_trabajo == id).map(|j| {
            if changes.titulo.is_some() {
                j.titulo = changes.titulo.clone();
            }
            if changes.descripcion.is_some() {
                j.descripcion = changes.descripcion.clone();
            }
            if changes.ubicacion.is_some() {
                j.ubicacion = changes.ubicacion.clone();
            }
            j.clone()
        }))
    }

    async fn delete_job(&self, id: i64) -> Result<(), StoreError> {
        self.open()?.jobs.retain(|j| j.id_trabajo != id);
        Ok(())
    }

    async fn list_applications(&self) -> Result<Vec<ApplicationRow>, StoreError> {
        Ok(self.open()?.applications.clone())
    }

    async fn find_application(&self, id: i64) -> Result<Option<ApplicationRow>, StoreError> {
        Ok(self
            .open()?
            .applications
            .iter()
            .find(|a| a.id_postulacion == id)
            .cloned())
    }

    async fn create_application(&self, application: &NewApplication) -> Result<ApplicationRow, StoreError> {
        let mut tables = self.open()?;
        let row = ApplicationRow {
            id_postulacion: tables.next(),
            trabajo_id: application.trabajo_id,
            usuario_id: application.usuario_id,
            mensaje: application.mensaje.clone(),
            oferta_pago: application.oferta_pago,
        };
        tables.applications.push(row.clone());
        Ok(row)
    }

    async fn update_application(
        &self,
        id: i64,
        changes: &ApplicationChanges,
    ) -> Result<Option<ApplicationRow>, StoreError> {
        let mut tables = self.open()?;
        Ok(tables
            .applications
            .iter_mut()
            .find(|a| a.id_postulacion == id)
            .map(|a| {
                if changes.mensaje.is_some() {
                    a.mensaje = changes.mensaje.clone();
                }
                if changes.oferta_pago.is_some() {
                    a.oferta_pago = changes.oferta_pago;
                }
                a.clone()
            }))
    }

    async fn delete_application(&self, id: i64) -> Result<(), StoreError> {
        self.open()?.applications.retain(|a| a.id_postulacion != id);
        Ok(())
    }
}

/// Fully routed app over the given store, as `main` builds it minus middleware.
pub fn app(
    store: MemoryStore,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = web::Data::new(AppState::new(Environment::Test, Arc::new(store)));
    App::new()
        .wrap(middleware::NormalizePath::trim())
        .configure(api::configure(state, 1024 * 1024))
}
