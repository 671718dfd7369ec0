use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use tracing::debug;

use crate::api::application::{ApplicationChanges, NewApplication};
use crate::api::job::{JobChanges, NewJob};
use crate::api::user::{NewUser, UserChanges};
use crate::db::models::{ApplicationRow, JobListing, JobRow, UserRow};
use crate::db::store::{Store, StoreError};

// Column lists cast to the exact Rust types so the queries work whether the
// hosted schema uses int4 or int8 ids and timestamp or timestamptz columns.
macro_rules! user_columns {
    () => {
        "id_usuario::int8 AS id_usuario, nombre, email, rol, \
         fecha_creacion::timestamptz AS fecha_creacion"
    };
}

macro_rules! job_columns {
    () => {
        "id_trabajo::int8 AS id_trabajo, titulo, descripcion, ubicacion, \
         empleador_id::int8 AS empleador_id, fecha_publicado::timestamptz AS fecha_publicado"
    };
}

macro_rules! job_listing {
    () => {
        "SELECT t.id_trabajo::int8 AS id_trabajo, t.titulo, t.descripcion, t.ubicacion, \
                t.fecha_publicado::timestamptz AS fecha_publicado, \
                CASE WHEN u.id_usuario IS NULL THEN NULL \
                     ELSE json_build_object('id_usuario', u.id_usuario, 'nombre', u.nombre, 'email', u.email) \
                END AS empleador \
         FROM trabajo t \
         LEFT JOIN usuario u ON u.id_usuario = t.empleador_id"
    };
}

macro_rules! application_columns {
    () => {
        "id_postulacion::int8 AS id_postulacion, trabajo_id::int8 AS trabajo_id, \
         usuario_id::int8 AS usuario_id, mensaje, oferta_pago::float8 AS oferta_pago"
    };
}

/// Direct SQL access, used in production
pub struct SqlStore {
    pool: Pool<Postgres>,
}

impl SqlStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for SqlStore {
    fn backend(&self) -> &'static str {
        "sql"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }

    async fn list_users(&self) -> Result<Vec<UserRow>, StoreError> {
        let rows = sqlx::query_as::<_, UserRow>(concat!(
            "SELECT ",
            user_columns!(),
            " FROM usuario ORDER BY id_usuario ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!("Fetched {} users", rows.len());
        Ok(rows)
    }

    async fn find_user(&self, id: i64) -> Result<Option<UserRow>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(concat!(
            "SELECT ",
            user_columns!(),
            " FROM usuario WHERE id_usuario = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn create_user(&self, user: &NewUser) -> Result<UserRow, StoreError> {
        debug!("Inserting user: email={:?}, rol={:?}", user.email, user.rol);

        let row = sqlx::query_as::<_, UserRow>(concat!(
            "INSERT INTO usuario (nombre, email, rol, fecha_creacion) VALUES ($1, $2, $3, NOW()) RETURNING ",
            user_columns!()
        ))
        .bind(&user.nombre)
        .bind(&user.email)
        .bind(&user.rol)
        .fetch_one(&self.pool)
        .await?;

        debug!("User created with id={}", row.id_usuario);
        Ok(row)
    }

    async fn update_user(&self, id: i64, changes: &UserChanges) -> Result<Option<UserRow>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(concat!(
            "UPDATE usuario SET nombre = COALESCE($1, nombre), email = COALESCE($2, email), \
             rol = COALESCE($3, rol) WHERE id_usuario = $4 RETURNING ",
            user_columns!()
        ))
        .bind(&changes.nombre)
        .bind(&changes.email)
        .bind(&changes.rol)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete_user(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM usuario WHERE id_usuario = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        debug!("Deleted {} user row(s) for id={}", result.rows_affected(), id);
        Ok(())
    }

    async fn list_jobs(&self) -> Result<Vec<JobListing>, StoreError> {
        let rows = sqlx::query_as::<_, JobListing>(concat!(job_listing!(), " ORDER BY t.id_trabajo ASC"))
            .fetch_all(&self.pool)
            .await?;

        debug!("Fetched {} jobs", rows.len());
        Ok(rows)
    }

    async fn find_job(&self, id: i64) -> Result<Option<JobListing>, StoreError> {
        let row = sqlx::query_as::<_, JobListing>(concat!(job_listing!(), " WHERE t.id_trabajo = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    async fn create_job(&self, job: &NewJob) -> Result<JobRow, StoreError> {
        debug!("Inserting job: titulo={:?}, empleador_id={:?}", job.titulo, job.empleador_id);

        let row = sqlx::query_as::<_, JobRow>(concat!(
            "INSERT INTO trabajo (titulo, descripcion, ubicacion, empleador_id) VALUES ($1, $2, $3, $4) RETURNING ",
            job_columns!()
        ))
        .bind(&job.titulo)
        .bind(&job.descripcion)
        .bind(&job.ubicacion)
        .bind(job.empleador_id)
        .fetch_one(&self.pool)
        .await?;

        debug!("Job created with id={}", row.id_trabajo);
        Ok(row)
    }

    async fn update_job(&self, id: i64, changes: &JobChanges) -> Result<Option<JobRow>, StoreError> {
        let row = sqlx::query_as::<_, JobRow>(concat!(
            "UPDATE trabajo SET titulo = COALESCE($1, titulo), descripcion = COALESCE($2, descripcion), \
             ubicacion = COALESCE($3, ubicacion) WHERE id_trabajo = $4 RETURNING ",
            job_columns!()
        ))
        .bind(&changes.titulo)
        .bind(&changes.descripcion)
        .bind(&changes.ubicacion)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete_job(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM trabajo WHERE id_trabajo = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        debug!("Deleted {} job row(s) for id={}", result.rows_affected(), id);
        Ok(())
    }

    async fn list_applications(&self) -> Result<Vec<ApplicationRow>, StoreError> {
        let rows = sqlx::query_as::<_, ApplicationRow>(concat!(
            "SELECT ",
            application_columns!(),
            " FROM postulacion ORDER BY id_postulacion ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!("Fetched {} applications", rows.len());
        Ok(rows)
    }

    async fn find_application(&self, id: i64) -> Result<Option<ApplicationRow>, StoreError> {
        let row = sqlx::query_as::<_, ApplicationRow>(concat!(
            "SELECT ",
            application_columns!(),
            " FROM postulacion WHERE id_postulacion = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn create_application(&self, application: &NewApplication) -> Result<ApplicationRow, StoreError> {
        debug!(
            "Inserting application: trabajo_id={:?}, usuario_id={:?}",
            application.trabajo_id, application.usuario_id
        );

        let row = sqlx::query_as::<_, ApplicationRow>(concat!(
            "INSERT INTO postulacion (trabajo_id, usuario_id, mensaje, oferta_pago) VALUES ($1, $2, $3, $4) RETURNING ",
            application_columns!()
        ))
        .bind(application.trabajo_id)
        .bind(application.usuario_id)
        .bind(&application.mensaje)
        .bind(application.oferta_pago)
        .fetch_one(&self.pool)
        .await?;

        debug!("Application created with id={}", row.id_postulacion);
        Ok(row)
    }

    async fn update_application(
        &self,
        id: i64,
        changes: &ApplicationChanges,
    ) -> Result<Option<ApplicationRow>, StoreError> {
        let row = sqlx::query_as::<_, ApplicationRow>(concat!(
            "UPDATE postulacion SET mensaje = COALESCE($1, mensaje), \
             oferta_pago = COALESCE($2::float8, oferta_pago::float8) WHERE id_postulacion = $3 RETURNING ",
            application_columns!()
        ))
        .bind(&changes.mensaje)
        .bind(changes.oferta_pago)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete_application(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM postulacion WHERE id_postulacion = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        debug!("Deleted {} application row(s) for id={}", result.rows_affected(), id);
        Ok(())
    }
}
