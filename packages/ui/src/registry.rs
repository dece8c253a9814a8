//! Device registry controller: the in-memory device list behind the
//! dashboard table and the folder grid.
//!
//! The full list is fetched once and held client-side. Paging never refetches;
//! creates and deletes reconcile the local list with what the backend
//! confirmed.

use api::{ApiError, Backend, ConsoleError, DeviceCreation};
use store::{Device, NewDevice, Pagination};

#[derive(Clone, Debug)]
pub struct DeviceRegistry {
    devices: Vec<Device>,
    pagination: Pagination,
    pending_delete: Option<u64>,
    artifact_missing: Vec<u64>,
}

impl DeviceRegistry {
    pub fn new(page_size: usize) -> Self {
        Self {
            devices: Vec::new(),
            pagination: Pagination::new(page_size),
            pending_delete: None,
            artifact_missing: Vec::new(),
        }
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Devices on the current page.
    pub fn page(&self) -> &[Device] {
        self.pagination.slice(&self.devices)
    }

    pub fn current_page(&self) -> usize {
        self.pagination.current()
    }

    pub fn page_count(&self) -> usize {
        self.pagination.page_count(self.devices.len())
    }

    pub fn is_paged(&self) -> bool {
        self.pagination.is_paged(self.devices.len())
    }

    pub fn go_to(&mut self, page: usize) -> bool {
        self.pagination.go_to(page, self.devices.len())
    }

    /// Whether the device was created but its password file never arrived.
    pub fn is_artifact_missing(&self, id: u64) -> bool {
        self.artifact_missing.contains(&id)
    }

    /// Replace the list with the backend's. On failure the previous list stays.
    pub async fn refresh<B: Backend>(&mut self, backend: &B) -> Result<(), ApiError> {
        let devices = backend.list_devices().await?;
        tracing::debug!("Device list holds {} devices", devices.len());
        self.devices = devices;
        self.pagination.clamp(self.devices.len());
        Ok(())
    }

    /// Create a device with its password file and append it to the list.
    pub async fn create<B: Backend>(
        &mut self,
        backend: &B,
        form: &NewDevice,
    ) -> Result<DeviceCreation, ConsoleError> {
        let creation = api::create_device(backend, form).await?;
        let device = creation.device().clone();
        if !creation.is_complete() {
            self.artifact_missing.push(device.id);
        }
        store::insert(&mut self.devices, device);
        Ok(creation)
    }

    /// Ask for confirmation before deleting `id`. Unknown ids are ignored.
    pub fn request_delete(&mut self, id: u64) -> bool {
        if !self.devices.iter().any(|d| d.id == id) {
            return false;
        }
        self.pending_delete = Some(id);
        true
    }

    /// The device awaiting confirmation, if any.
    pub fn pending_delete(&self) -> Option<&Device> {
        let id = self.pending_delete?;
        self.devices.iter().find(|d| d.id == id)
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Delete the device awaiting confirmation.
    ///
    /// Returns the removed device, or `None` when nothing was pending. On
    /// failure the list is unchanged.
    pub async fn confirm_delete<B: Backend>(
        &mut self,
        backend: &B,
    ) -> Result<Option<Device>, ApiError> {
        let Some(id) = self.pending_delete.take() else {
            return Ok(None);
        };
        backend.delete_device(id).await?;
        let removed = self.devices.iter().position(|d| d.id == id).map(|i| self.devices.remove(i));
        self.artifact_missing.retain(|missing| *missing != id);
        self.pagination.clamp(self.devices.len());
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::{MemoryBackend, Operation};

    fn seeded(count: usize) -> MemoryBackend {
        (0..count).fold(MemoryBackend::new(), |backend, i| {
            backend.with_device(&format!("abcd-{i:04}-efgh-5678"), &format!("Device {i}"), "Passw0rd!")
        })
    }

    fn form(device_id: &str) -> NewDevice {
        NewDevice {
            device_id: device_id.to_string(),
            device_name: "Scanner".to_string(),
            password: "Passw0rd!".to_string(),
        }
    }

    #[tokio::test]
    async fn test_refresh_and_paging() {
        let backend = seeded(23);
        let mut registry = DeviceRegistry::new(10);
        registry.refresh(&backend).await.unwrap();

        assert_eq!(registry.page_count(), 3);
        assert_eq!(registry.page().len(), 10);
        assert_eq!(registry.page()[0].device_name, "Device 0");

        assert!(registry.go_to(3));
        assert_eq!(registry.page().len(), 3);
        assert!(!registry.go_to(4));
        assert!(!registry.go_to(0));
        assert_eq!(registry.current_page(), 3);
        // Paging is local.
        assert_eq!(backend.request_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_list() {
        let backend = seeded(2);
        let mut registry = DeviceRegistry::new(10);
        registry.refresh(&backend).await.unwrap();

        backend.fail(Operation::ListDevices, "Service unavailable");
        let err = registry.refresh(&backend).await.unwrap_err();
        assert_eq!(err.to_string(), "Service unavailable");
        assert_eq!(registry.devices().len(), 2);
    }

    #[tokio::test]
    async fn test_create_appends() {
        let backend = seeded(1);
        let mut registry = DeviceRegistry::new(10);
        registry.refresh(&backend).await.unwrap();

        let creation = registry.create(&backend, &form("wxyz-1111-wxyz-2222")).await.unwrap();
        assert!(creation.is_complete());
        assert_eq!(registry.devices().len(), 2);
        assert_eq!(registry.devices()[1].device_id, "wxyz-1111-wxyz-2222");
        assert!(!registry.is_artifact_missing(creation.device().id));
    }

    #[tokio::test]
    async fn test_create_flags_missing_artifact() {
        let backend = MemoryBackend::new();
        backend.fail(Operation::UploadFile, "Upload failed");
        let mut registry = DeviceRegistry::new(10);

        let creation = registry.create(&backend, &form("wxyz-1111-wxyz-2222")).await.unwrap();
        let id = creation.device().id;
        assert!(registry.is_artifact_missing(id));
        assert_eq!(registry.devices().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_create_changes_nothing() {
        let backend = MemoryBackend::new();
        let mut registry = DeviceRegistry::new(10);
        let err = registry.create(&backend, &form("bad")).await.unwrap_err();
        assert!(matches!(err, ConsoleError::Invalid(_)));
        assert!(registry.is_empty());
        assert_eq!(backend.request_count(), 0);
    }

    #[tokio::test]
    async fn test_delete_needs_confirmation() {
        let backend = seeded(2);
        let mut registry = DeviceRegistry::new(10);
        registry.refresh(&backend).await.unwrap();
        let id = registry.devices()[0].id;

        assert!(registry.request_delete(id));
        assert_eq!(registry.pending_delete().map(|d| d.id), Some(id));
        registry.cancel_delete();
        assert!(registry.pending_delete().is_none());
        assert_eq!(registry.confirm_delete(&backend).await.unwrap(), None);
        assert_eq!(registry.devices().len(), 2);
        assert_eq!(backend.request_count(), 1);

        registry.request_delete(id);
        let removed = registry.confirm_delete(&backend).await.unwrap();
        assert_eq!(removed.map(|d| d.id), Some(id));
        assert_eq!(registry.devices().len(), 1);
        assert_eq!(backend.devices().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_device() {
        let backend = seeded(1);
        let mut registry = DeviceRegistry::new(10);
        registry.refresh(&backend).await.unwrap();
        backend.fail(Operation::DeleteDevice, "Forbidden");

        let id = registry.devices()[0].id;
        registry.request_delete(id);
        assert!(registry.confirm_delete(&backend).await.is_err());
        assert_eq!(registry.devices().len(), 1);
        assert!(registry.pending_delete().is_none());
    }

    #[tokio::test]
    async fn test_delete_pulls_page_back() {
        let backend = seeded(11);
        let mut registry = DeviceRegistry::new(10);
        registry.refresh(&backend).await.unwrap();
        assert!(registry.go_to(2));

        let last = registry.page()[0].id;
        registry.request_delete(last);
        registry.confirm_delete(&backend).await.unwrap();
        assert_eq!(registry.current_page(), 1);
        assert!(!registry.is_paged());
    }
}
