//! # HTTP backend — `reqwest` client for the device API
//!
//! [`HttpBackend`] implements [`Backend`] against the real REST API. The same
//! code runs in the browser (reqwest's fetch backend on `wasm32`) and natively.
//!
//! Every path is joined onto the configured base URL. Calls other than login
//! and registration send `Authorization: Bearer <token>`; without a token they
//! fail with [`ApiError::NotSignedIn`] before anything is sent.
//!
//! Non-2xx answers are turned into [`ApiError::Backend`] carrying the
//! message from the `{ "error": { "message": ... } }` body.

use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response};
use serde::Serialize;
use store::{Device, DeviceFile, NewDevice, Upload};

use crate::backend::{AuthResponse, Backend, Credentials, FilesBody, Registration};
use crate::error::{backend_error, ApiError};

/// Backend client bound to one base URL and, once signed in, one token.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    base_url: String,
    token: Option<String>,
    http: reqwest::Client,
}

#[derive(Serialize)]
struct CompanyUpdate<'a> {
    company: &'a str,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            http: reqwest::Client::new(),
        }
    }

    /// Builder method to attach the session's bearer token.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        let token = self.token.as_deref().ok_or(ApiError::NotSignedIn)?;
        Ok(request.bearer_auth(token))
    }

    /// Send and map error statuses to [`ApiError::Backend`].
    async fn send(request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let reason = status.canonical_reason().unwrap_or_default();
        let body = response.text().await.unwrap_or_default();
        let error = backend_error(status.as_u16(), &body, reason);
        tracing::warn!("Backend answered {}: {}", status, error);
        Err(error)
    }
}

impl Backend for HttpBackend {
    async fn log_in(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        let request = self.http.post(self.url("/api/auth/local")).json(credentials);
        let auth: AuthResponse = Self::send(request).await?.json().await?;
        tracing::info!("Signed in as user {}", auth.user.id);
        Ok(auth)
    }

    async fn register(&self, registration: &Registration) -> Result<AuthResponse, ApiError> {
        let request = self
            .http
            .post(self.url("/api/auth/local/register"))
            .json(registration);
        let auth: AuthResponse = Self::send(request).await?.json().await?;
        tracing::info!("Registered user {}", auth.user.id);
        Ok(auth)
    }

    async fn update_company(&self, token: &str, user_id: u64, company: &str) -> Result<(), ApiError> {
        let request = self
            .http
            .put(self.url(&format!("/api/users/{user_id}")))
            .bearer_auth(token)
            .json(&CompanyUpdate { company });
        Self::send(request).await?;
        Ok(())
    }

    async fn list_devices(&self) -> Result<Vec<Device>, ApiError> {
        let request = self.authorized(self.http.get(self.url("/api/devices")))?;
        let devices: Vec<Device> = Self::send(request).await?.json().await?;
        tracing::debug!("Fetched {} devices", devices.len());
        Ok(devices)
    }

    async fn create_device(&self, device: &NewDevice) -> Result<Device, ApiError> {
        let request = self.authorized(self.http.post(self.url("/api/devices")).json(device))?;
        let created: Device = Self::send(request).await?.json().await?;
        tracing::info!("Created device {} ({})", created.id, created.device_id);
        Ok(created)
    }

    async fn delete_device(&self, id: u64) -> Result<(), ApiError> {
        let request = self.authorized(self.http.delete(self.url(&format!("/api/devices/{id}"))))?;
        Self::send(request).await?;
        tracing::info!("Deleted device {id}");
        Ok(())
    }

    async fn upload_file(&self, device: u64, upload: Upload) -> Result<DeviceFile, ApiError> {
        let mut part = Part::bytes(upload.bytes).file_name(upload.name.clone());
        if !upload.mime.is_empty() {
            part = part.mime_str(&upload.mime)?;
        }
        let form = Form::new().part("files", part);
        let request = self.authorized(
            self.http
                .post(self.url(&format!("/api/devices/{device}/upload")))
                .multipart(form),
        )?;
        let body: FilesBody = Self::send(request).await?.json().await?;
        let file = body.into_files().into_iter().next().ok_or_else(|| {
            ApiError::Unexpected(format!("upload of {} returned no file", upload.name))
        })?;
        tracing::info!("Uploaded {} to device {device}", file.name);
        Ok(file)
    }

    async fn list_files(&self, device: u64, password: &str) -> Result<Vec<DeviceFile>, ApiError> {
        let request = self.authorized(
            self.http
                .get(self.url(&format!("/api/devices/{device}/files")))
                .query(&[("password", password)]),
        )?;
        let body: FilesBody = Self::send(request).await?.json().await?;
        let files = body.into_files();
        tracing::debug!("Device {device} unlocked with {} files", files.len());
        Ok(files)
    }

    async fn delete_file(&self, id: u64) -> Result<(), ApiError> {
        let request = self.authorized(self.http.delete(self.url(&format!("/api/files/{id}"))))?;
        Self::send(request).await?;
        tracing::info!("Deleted file {id}");
        Ok(())
    }
}
