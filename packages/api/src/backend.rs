//! The [`Backend`] seam and the request/response bodies it exchanges.

use std::future::Future;

use serde::{Deserialize, Serialize};
use store::{Device, DeviceFile, NewDevice, Session, Upload, UserProfile};

use crate::error::ApiError;

/// Every call the console makes to the device backend.
///
/// Futures carry no `Send` bound: the console runs on the browser's single
/// thread and issues one request per user action.
pub trait Backend {
    /// `POST /api/auth/local`
    fn log_in(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<AuthResponse, ApiError>>;

    /// `POST /api/auth/local/register`
    fn register(
        &self,
        registration: &Registration,
    ) -> impl Future<Output = Result<AuthResponse, ApiError>>;

    /// `PUT /api/users/:id`, authorised with the token just issued.
    fn update_company(
        &self,
        token: &str,
        user_id: u64,
        company: &str,
    ) -> impl Future<Output = Result<(), ApiError>>;

    /// `GET /api/devices`
    fn list_devices(&self) -> impl Future<Output = Result<Vec<Device>, ApiError>>;

    /// `POST /api/devices`
    fn create_device(
        &self,
        device: &NewDevice,
    ) -> impl Future<Output = Result<Device, ApiError>>;

    /// `DELETE /api/devices/:id`
    fn delete_device(&self, id: u64) -> impl Future<Output = Result<(), ApiError>>;

    /// `POST /api/devices/:id/upload`, multipart field `files`.
    fn upload_file(
        &self,
        device: u64,
        upload: Upload,
    ) -> impl Future<Output = Result<DeviceFile, ApiError>>;

    /// `GET /api/devices/:id/files?password=...`
    ///
    /// The backend checks the password; a wrong one is an error response.
    fn list_files(
        &self,
        device: u64,
        password: &str,
    ) -> impl Future<Output = Result<Vec<DeviceFile>, ApiError>>;

    /// `DELETE /api/files/:id`
    fn delete_file(&self, id: u64) -> impl Future<Output = Result<(), ApiError>>;
}

/// Login body. `identifier` is the email address.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub identifier: String,
    pub password: String,
}

/// Registration body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Answer to login and registration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub jwt: String,
    pub user: AuthUser,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: u64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub company: Option<String>,
}

impl AuthResponse {
    /// Turn the answer into a session. `company` overrides whatever the
    /// backend returned (sign-up knows it before the backend echoes it).
    pub fn into_session(self, company: Option<String>) -> Session {
        Session {
            token: self.jwt,
            user: UserProfile {
                id: self.user.id.to_string(),
                user_name: self.user.username,
                email: self.user.email,
                company: company.or(self.user.company),
            },
        }
    }
}

/// `{ "files": [...] }`, or a bare array from upload endpoints that skip the wrapper.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum FilesBody {
    Wrapped { files: Vec<DeviceFile> },
    Bare(Vec<DeviceFile>),
}

impl FilesBody {
    pub(crate) fn into_files(self) -> Vec<DeviceFile> {
        match self {
            FilesBody::Wrapped { files } => files,
            FilesBody::Bare(files) => files,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_response_into_session() {
        let json = r#"{"jwt":"t0k","user":{"id":4,"username":"ops","email":"ops@example.com"}}"#;
        let auth: AuthResponse = serde_json::from_str(json).unwrap();
        let session = auth.clone().into_session(None);
        assert_eq!(session.token, "t0k");
        assert_eq!(session.user.id, "4");
        assert!(session.user.company.is_none());

        let session = auth.into_session(Some("Acme".to_string()));
        assert_eq!(session.user.company.as_deref(), Some("Acme"));
    }

    #[test]
    fn test_files_body_shapes() {
        let wrapped = r#"{"files":[{"id":1,"name":"a.pdf","mime":"application/pdf","url":"/u/a.pdf"}]}"#;
        let bare = r#"[{"id":2,"name":"b.png","url":"/u/b.png"}]"#;

        let files = serde_json::from_str::<FilesBody>(wrapped).unwrap().into_files();
        assert_eq!(files[0].id, 1);
        let files = serde_json::from_str::<FilesBody>(bare).unwrap().into_files();
        assert_eq!(files[0].name, "b.png");
    }
}
