//! Multi-step operations built on [`Backend`].
//!
//! Each workflow validates its form locally first; invalid input never
//! produces a request.

use store::validate::{validate_login, validate_new_device, validate_sign_up};
use store::{Device, NewDevice, Session, Upload};

use crate::backend::{Backend, Credentials, Registration};
use crate::error::{ApiError, ConsoleError};

/// Sign in with email and password.
pub async fn log_in<B: Backend>(
    backend: &B,
    email: &str,
    password: &str,
) -> Result<Session, ConsoleError> {
    validate_login(email, password)?;
    let credentials = Credentials {
        identifier: email.to_string(),
        password: password.to_string(),
    };
    let auth = backend.log_in(&credentials).await?;
    Ok(auth.into_session(None))
}

/// The sign-up form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SignUp {
    pub company: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Register an account, then record its company.
///
/// The company update is authorised with the token issued by registration.
/// No session is returned unless both calls succeed.
pub async fn sign_up<B: Backend>(backend: &B, form: &SignUp) -> Result<Session, ConsoleError> {
    validate_sign_up(&form.company, &form.username, &form.email, &form.password)?;
    let registration = Registration {
        username: form.username.clone(),
        email: form.email.clone(),
        password: form.password.clone(),
    };
    let auth = backend.register(&registration).await?;
    backend
        .update_company(&auth.jwt, auth.user.id, &form.company)
        .await?;
    tracing::info!("Signed up user {} for {}", auth.user.id, form.company);
    Ok(auth.into_session(Some(form.company.clone())))
}

/// Outcome of [`create_device`] once the device record exists.
#[derive(Debug)]
pub enum DeviceCreation {
    /// Device and password artifact both stored.
    Complete(Device),
    /// The device exists but its password artifact could not be uploaded.
    ArtifactMissing { device: Device, error: ApiError },
}

impl DeviceCreation {
    pub fn device(&self) -> &Device {
        match self {
            DeviceCreation::Complete(device) => device,
            DeviceCreation::ArtifactMissing { device, .. } => device,
        }
    }

    pub fn into_device(self) -> Device {
        match self {
            DeviceCreation::Complete(device) => device,
            DeviceCreation::ArtifactMissing { device, .. } => device,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, DeviceCreation::Complete(_))
    }
}

/// Create a device and upload its password artifact to it.
///
/// Fails only when validation or the create call fails. A failed artifact
/// upload still yields the device, as [`DeviceCreation::ArtifactMissing`].
pub async fn create_device<B: Backend>(
    backend: &B,
    form: &NewDevice,
) -> Result<DeviceCreation, ConsoleError> {
    validate_new_device(form)?;
    let device = backend.create_device(form).await?;
    let password = device.password.as_deref().unwrap_or(&form.password);
    let artifact = Upload::password_artifact(password);
    match backend.upload_file(device.id, artifact).await {
        Ok(_) => Ok(DeviceCreation::Complete(device)),
        Err(error) => {
            tracing::warn!(
                "Device {} created without its password file: {}",
                device.id,
                error
            );
            Ok(DeviceCreation::ArtifactMissing { device, error })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryBackend, Operation};
    use store::Field;

    fn form() -> NewDevice {
        NewDevice {
            device_id: "abcd-1234-efgh-5678".to_string(),
            device_name: "Scanner".to_string(),
            password: "Passw0rd!".to_string(),
        }
    }

    #[tokio::test]
    async fn test_log_in() {
        let backend = MemoryBackend::new().with_user("ops", "ops@example.com", "Passw0rd!");
        let session = log_in(&backend, "ops@example.com", "Passw0rd!").await.unwrap();
        assert_eq!(session.user.user_name, "ops");
        assert!(!session.token.is_empty());

        let err = log_in(&backend, "ops@example.com", "Wrong-pass1").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid identifier or password");
    }

    #[tokio::test]
    async fn test_invalid_login_sends_nothing() {
        let backend = MemoryBackend::new();
        let err = log_in(&backend, "not-an-email", "").await.unwrap_err();
        match err {
            ConsoleError::Invalid(errors) => {
                assert!(errors.for_field(Field::Email).is_some());
                assert!(errors.for_field(Field::Password).is_some());
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
        assert_eq!(backend.request_count(), 0);
    }

    #[tokio::test]
    async fn test_sign_up_records_company() {
        let backend = MemoryBackend::new();
        let form = SignUp {
            company: "Acme".to_string(),
            username: "ops".to_string(),
            email: "ops@example.com".to_string(),
            password: "Passw0rd!".to_string(),
        };
        let session = sign_up(&backend, &form).await.unwrap();
        assert_eq!(session.user.company.as_deref(), Some("Acme"));
        assert_eq!(backend.request_count(), 2);
        assert_eq!(
            backend.user("ops@example.com").unwrap().company.as_deref(),
            Some("Acme")
        );
    }

    #[tokio::test]
    async fn test_sign_up_fails_when_company_update_fails() {
        let backend = MemoryBackend::new();
        backend.fail(Operation::UpdateCompany, "Forbidden");
        let form = SignUp {
            company: "Acme".to_string(),
            username: "ops".to_string(),
            email: "ops@example.com".to_string(),
            password: "Passw0rd!".to_string(),
        };
        let err = sign_up(&backend, &form).await.unwrap_err();
        assert_eq!(err.to_string(), "Forbidden");
    }

    #[tokio::test]
    async fn test_create_device_uploads_artifact_to_new_device() {
        let backend = MemoryBackend::new().with_device("wxyz-0000-wxyz-0000", "Old", "Passw0rd!");
        let created = create_device(&backend, &form()).await.unwrap();
        assert!(created.is_complete());

        let id = created.device().id;
        let files = backend.files_of(id);
        assert_eq!(files.len(), 1);
        assert!(files[0].is_password_artifact());
        let old = backend.devices()[0].id;
        assert_eq!(backend.files_of(old).len(), 1);
        assert_eq!(backend.request_count(), 2);
    }

    #[tokio::test]
    async fn test_create_device_keeps_device_when_artifact_fails() {
        let backend = MemoryBackend::new();
        backend.fail(Operation::UploadFile, "Disk full");
        let created = create_device(&backend, &form()).await.unwrap();
        match &created {
            DeviceCreation::ArtifactMissing { device, error } => {
                assert_eq!(device.device_id, "abcd-1234-efgh-5678");
                assert_eq!(error.to_string(), "Disk full");
            }
            other => panic!("expected missing artifact, got {other:?}"),
        }
        assert_eq!(backend.devices().len(), 1);
    }

    #[tokio::test]
    async fn test_create_device_rejects_bad_id() {
        let backend = MemoryBackend::new();
        let mut bad = form();
        bad.device_id = "abcd1234".to_string();
        let err = create_device(&backend, &bad).await.unwrap_err();
        assert!(matches!(err, ConsoleError::Invalid(_)));
        assert_eq!(backend.request_count(), 0);
    }
}
