use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::api::application::{ApplicationChanges, NewApplication};
use crate::api::job::{JobChanges, NewJob};
use crate::api::user::{NewUser, UserChanges};
use crate::db::models::{ApplicationRow, JobListing, JobRow, UserRow};
use crate::db::store::{Store, StoreError};

const USERS: Table = Table { name: "usuario", key: "id_usuario" };
const JOBS: Table = Table { name: "trabajo", key: "id_trabajo" };
const APPLICATIONS: Table = Table { name: "postulacion", key: "id_postulacion" };

/// Job listing projection with the employer embedded through the `empleador_id` foreign key
const JOB_LISTING_SELECT: &str =
    "id_trabajo,titulo,descripcion,ubicacion,fecha_publicado,empleador:empleador_id(id_usuario,nombre,email)";

#[derive(Clone, Copy)]
struct Table {
    name: &'static str,
    key: &'static str,
}

impl Table {
    fn order(&self) -> String {
        format!("{}.asc", self.key)
    }
}

/// Error body returned by PostgREST
#[derive(Deserialize)]
struct PostgrestError {
    message: String,
}

/// Access through the hosted REST data API (PostgREST), used outside production
pub struct RestStore {
    client: Client,
    base_url: String,
}

impl RestStore {
    /// `url` is the project URL (e.g. `https://xyz.supabase.co`); the
    /// `/rest/v1` prefix is appended here.
    pub fn new(url: &str, key: &str, timeout: Duration) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();
        let api_key = HeaderValue::from_str(key).map_err(|e| StoreError::Credentials(e.to_string()))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {key}"))
            .map_err(|e| StoreError::Credentials(e.to_string()))?;
        headers.insert("apikey", api_key);
        headers.insert(AUTHORIZATION, bearer);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: format!("{}/rest/v1", url.trim_end_matches('/')),
        })
    }

    fn table(&self, table: Table) -> String {
        format!("{}/{}", self.base_url, table.name)
    }

    fn eq(id: i64) -> String {
        format!("eq.{id}")
    }

    async fn list<T: DeserializeOwned>(&self, table: Table, select: &str) -> Result<Vec<T>, StoreError> {
        let request = self
            .client
            .get(self.table(table))
            .query(&[("select", select), ("order", table.order().as_str())]);

        let rows: Vec<T> = Self::send(request).await?.json().await?;
        debug!("Fetched {} rows from {}", rows.len(), table.name);
        Ok(rows)
    }

    async fn find<T: DeserializeOwned>(&self, table: Table, select: &str, id: i64) -> Result<Option<T>, StoreError> {
        let request = self
            .client
            .get(self.table(table))
            .query(&[("select", select), (table.key, Self::eq(id).as_str())]);

        let rows: Vec<T> = Self::send(request).await?.json().await?;
        Ok(rows.into_iter().next())
    }

    async fn insert<B, T>(&self, table: Table, body: &B) -> Result<T, StoreError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let request = self
            .client
            .post(self.table(table))
            .header("Prefer", "return=representation")
            .json(&[body]);

        let rows: Vec<T> = Self::send(request).await?.json().await?;
        rows.into_iter().next().ok_or(StoreError::MissingRow(table.name))
    }

    async fn update<B, T>(&self, table: Table, id: i64, body: &B) -> Result<Option<T>, StoreError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let request = self
            .client
            .patch(self.table(table))
            .query(&[(table.key, Self::eq(id))])
            .header("Prefer", "return=representation")
            .json(body);

        let rows: Vec<T> = Self::send(request).await?.json().await?;
        Ok(rows.into_iter().next())
    }

    async fn delete(&self, table: Table, id: i64) -> Result<(), StoreError> {
        let request = self
            .client
            .delete(self.table(table))
            .query(&[(table.key, Self::eq(id))]);

        Self::send(request).await?;
        debug!("Deleted {} row(s) matching {}={}", table.name, table.key, id);
        Ok(())
    }

    /// Send the request and turn any non-2xx answer into a rejection carrying
    /// the backend's message.
    async fn send(request: RequestBuilder) -> Result<Response, StoreError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await?;
        let message = serde_json::from_str::<PostgrestError>(&body)
            .map(|e| e.message)
            .unwrap_or_else(|_| format!("{status}: {body}"));

        warn!("REST backend answered {}: {}", status, message);
        Err(StoreError::Rejected(message))
    }
}

#[async_trait]
impl Store for RestStore {
    fn backend(&self) -> &'static str {
        "rest"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let request = self
            .client
            .get(self.table(USERS))
            .query(&[("select", USERS.key), ("limit", "1")]);

        Self::send(request).await?;
        Ok(())
    }

    async fn close(&self) {}

    async fn list_users(&self) -> Result<Vec<UserRow>, StoreError> {
        self.list(USERS, "*").await
    }

    async fn find_user(&self, id: i64) -> Result<Option<UserRow>, StoreError> {
        self.find(USERS, "*", id).await
    }

    async fn create_user(&self, user: &NewUser) -> Result<UserRow, StoreError> {
        self.insert(USERS, user).await
    }

    async fn update_user(&self, id: i64, changes: &UserChanges) -> Result<Option<UserRow>, StoreError> {
        self.update(USERS, id, changes).await
    }

    async fn delete_user(&self, id: i64) -> Result<(), StoreError> {
        self.delete(USERS, id).await
    }

    async fn list_jobs(&self) -> Result<Vec<JobListing>, StoreError> {
        self.list(JOBS, JOB_LISTING_SELECT).await
    }

    async fn find_job(&self, id: i64) -> Result<Option<JobListing>, StoreError> {
        self.find(JOBS, JOB_LISTING_SELECT, id).await
    }

    async fn create_job(&self, job: &NewJob) -> Result<JobRow, StoreError> {
        self.insert(JOBS, job).await
    }

    async fn update_job(&self, id: i64, changes: &JobChanges) -> Result<Option<JobRow>, StoreError> {
        self.update(JOBS, id, changes).await
    }

    async fn delete_job(&self, id: i64) -> Result<(), StoreError> {
        self.delete(JOBS, id).await
    }

    async fn list_applications(&self) -> Result<Vec<ApplicationRow>, StoreError> {
        self.list(APPLICATIONS, "*").await
    }

    async fn find_application(&self, id: i64) -> Result<Option<ApplicationRow>, StoreError> {
        self.find(APPLICATIONS, "*", id).await
    }

    async fn create_application(&self, application: &NewApplication) -> Result<ApplicationRow, StoreError> {
        self.insert(APPLICATIONS, application).await
    }

    async fn update_application(
        &self,
        id: i64,
        changes: &ApplicationChanges,
    ) -> Result<Option<ApplicationRow>, StoreError> {
        self.update(APPLICATIONS, id, changes).await
    }

    async fn delete_application(&self, id: i64) -> Result<(), StoreError> {
        self.delete(APPLICATIONS, id).await
    }
}
