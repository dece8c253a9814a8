use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use store::{Device, DeviceFile, NewDevice, Upload};

use crate::backend::{AuthResponse, AuthUser, Backend, Credentials, Registration};
use crate::error::ApiError;

/// Backend calls, used to inject failures into [`MemoryBackend`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    LogIn,
    Register,
    UpdateCompany,
    ListDevices,
    CreateDevice,
    DeleteDevice,
    UploadFile,
    ListFiles,
    DeleteFile,
}

/// In-memory Backend for testing and offline demos.
///
/// Behaves like the REST API for the calls the console makes, counts every
/// request it serves, and can be told to fail a given operation.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    users: Vec<(AuthUser, String)>,
    devices: Vec<Device>,
    files: Vec<(u64, DeviceFile)>,
    failures: HashMap<Operation, String>,
    next_id: u64,
    requests: usize,
}

impl MemoryState {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Count the request and apply any injected failure.
    fn begin(&mut self, op: Operation) -> Result<(), ApiError> {
        self.requests += 1;
        match self.failures.get(&op) {
            Some(message) => Err(ApiError::backend(500, message.clone())),
            None => Ok(()),
        }
    }

    fn add_file(&mut self, device: u64, upload: &Upload) -> DeviceFile {
        let id = self.next_id();
        let file = DeviceFile {
            id,
            name: upload.name.clone(),
            mime: upload.mime.clone(),
            url: format!("/uploads/{id}_{}", upload.name),
            updated_at: None,
        };
        self.files.push((device, file.clone()));
        file
    }
}

fn not_found() -> ApiError {
    ApiError::backend(404, "Not Found")
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a device together with its password artifact.
    pub fn with_device(self, device_id: &str, name: &str, password: &str) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let id = state.next_id();
            state.devices.push(Device {
                id,
                device_id: device_id.to_string(),
                device_name: name.to_string(),
                password: Some(password.to_string()),
                created_at: None,
            });
            state.add_file(id, &Upload::password_artifact(password));
        }
        self
    }

    /// Seed an account.
    pub fn with_user(self, username: &str, email: &str, password: &str) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let id = state.next_id();
            let user = AuthUser {
                id,
                username: username.to_string(),
                email: email.to_string(),
                company: None,
            };
            state.users.push((user, password.to_string()));
        }
        self
    }

    /// Make every later call of `op` fail with a 500 carrying `message`.
    pub fn fail(&self, op: Operation, message: &str) {
        self.state
            .lock()
            .unwrap()
            .failures
            .insert(op, message.to_string());
    }

    pub fn clear_failures(&self) {
        self.state.lock().unwrap().failures.clear();
    }

    /// Number of calls served so far, failed ones included.
    pub fn request_count(&self) -> usize {
        self.state.lock().unwrap().requests
    }

    pub fn devices(&self) -> Vec<Device> {
        self.state.lock().unwrap().devices.clone()
    }

    pub fn files_of(&self, device: u64) -> Vec<DeviceFile> {
        self.state
            .lock()
            .unwrap()
            .files
            .iter()
            .filter(|(owner, _)| *owner == device)
            .map(|(_, file)| file.clone())
            .collect()
    }

    pub fn user(&self, email: &str) -> Option<AuthUser> {
        self.state
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|(user, _)| user.email == email)
            .map(|(user, _)| user.clone())
    }
}

impl Backend for MemoryBackend {
    async fn log_in(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.begin(Operation::LogIn)?;
        let user = state
            .users
            .iter()
            .find(|(user, password)| {
                (user.email == credentials.identifier || user.username == credentials.identifier)
                    && *password == credentials.password
            })
            .map(|(user, _)| user.clone())
            .ok_or_else(|| ApiError::backend(400, "Invalid identifier or password"))?;
        Ok(AuthResponse {
            jwt: format!("memory-token-{}", user.id),
            user,
        })
    }

    async fn register(&self, registration: &Registration) -> Result<AuthResponse, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.begin(Operation::Register)?;
        let taken = state.users.iter().any(|(user, _)| {
            user.email == registration.email || user.username == registration.username
        });
        if taken {
            return Err(ApiError::backend(400, "Email or Username are already taken"));
        }
        let user = AuthUser {
            id: state.next_id(),
            username: registration.username.clone(),
            email: registration.email.clone(),
            company: None,
        };
        state
            .users
            .push((user.clone(), registration.password.clone()));
        Ok(AuthResponse {
            jwt: format!("memory-token-{}", user.id),
            user,
        })
    }

    async fn update_company(&self, token: &str, user_id: u64, company: &str) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        state.begin(Operation::UpdateCompany)?;
        if token != format!("memory-token-{user_id}") {
            return Err(ApiError::backend(403, "Forbidden"));
        }
        let (user, _) = state
            .users
            .iter_mut()
            .find(|(user, _)| user.id == user_id)
            .ok_or_else(not_found)?;
        user.company = Some(company.to_string());
        Ok(())
    }

    async fn list_devices(&self) -> Result<Vec<Device>, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.begin(Operation::ListDevices)?;
        Ok(state.devices.clone())
    }

    async fn create_device(&self, device: &NewDevice) -> Result<Device, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.begin(Operation::CreateDevice)?;
        if state.devices.iter().any(|d| d.device_id == device.device_id) {
            return Err(ApiError::backend(400, "This attribute must be unique"));
        }
        let created = Device {
            id: state.next_id(),
            device_id: device.device_id.clone(),
            device_name: device.device_name.clone(),
            password: Some(device.password.clone()),
            created_at: None,
        };
        state.devices.push(created.clone());
        Ok(created)
    }

    async fn delete_device(&self, id: u64) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        state.begin(Operation::DeleteDevice)?;
        if !store::remove_by_id(&mut state.devices, id) {
            return Err(not_found());
        }
        state.files.retain(|(owner, _)| *owner != id);
        Ok(())
    }

    async fn upload_file(&self, device: u64, upload: Upload) -> Result<DeviceFile, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.begin(Operation::UploadFile)?;
        if !state.devices.iter().any(|d| d.id == device) {
            return Err(not_found());
        }
        Ok(state.add_file(device, &upload))
    }

    async fn list_files(&self, device: u64, password: &str) -> Result<Vec<DeviceFile>, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.begin(Operation::ListFiles)?;
        let found = state
            .devices
            .iter()
            .find(|d| d.id == device)
            .ok_or_else(not_found)?;
        if found.password.as_deref() != Some(password) {
            return Err(ApiError::backend(400, "Invalid password"));
        }
        Ok(state
            .files
            .iter()
            .filter(|(owner, _)| *owner == device)
            .map(|(_, file)| file.clone())
            .collect())
    }

    async fn delete_file(&self, id: u64) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        state.begin(Operation::DeleteFile)?;
        let before = state.files.len();
        state.files.retain(|(_, file)| file.id != id);
        if state.files.len() == before {
            return Err(not_found());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded_device_unlocks_with_its_password() {
        let backend = MemoryBackend::new().with_device("abcd-1234-efgh-5678", "Scanner", "Passw0rd!");
        let devices = backend.list_devices().await.unwrap();
        assert_eq!(devices.len(), 1);

        let files = backend.list_files(devices[0].id, "Passw0rd!").await.unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].is_password_artifact());

        let err = backend.list_files(devices[0].id, "nope").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid password");
        assert_eq!(backend.request_count(), 3);
    }

    #[tokio::test]
    async fn test_injected_failure() {
        let backend = MemoryBackend::new();
        backend.fail(Operation::ListDevices, "Service unavailable");
        let err = backend.list_devices().await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "Service unavailable");

        backend.clear_failures();
        assert!(backend.list_devices().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_device_drops_its_files() {
        let backend = MemoryBackend::new().with_device("abcd-1234-efgh-5678", "Scanner", "Passw0rd!");
        let id = backend.devices()[0].id;
        backend.delete_device(id).await.unwrap();
        assert!(backend.devices().is_empty());
        assert!(backend.files_of(id).is_empty());
        assert_eq!(backend.delete_device(id).await.unwrap_err().status(), Some(404));
    }
}
