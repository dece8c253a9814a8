//! Document list of an unlocked device.

use store::{Device, DeviceFile};

/// Files of one device, as returned by the unlock call and kept in sync
/// with uploads and deletes. Never fetched on its own.
///
/// Requests run outside the list; their answers are applied with
/// [`DocumentList::add_file`] and [`DocumentList::remove_file`] so changes
/// made meanwhile are kept.
#[derive(Clone, Debug, PartialEq)]
pub struct DocumentList {
    device: Device,
    files: Vec<DeviceFile>,
    pending_delete: Option<u64>,
}

impl DocumentList {
    pub fn new(device: Device, files: Vec<DeviceFile>) -> Self {
        Self {
            device,
            files,
            pending_delete: None,
        }
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn files(&self) -> &[DeviceFile] {
        &self.files
    }

    /// The password file is never offered for deletion.
    pub fn can_delete(file: &DeviceFile) -> bool {
        !file.is_password_artifact()
    }

    /// Append a stored upload. A file already listed is not added twice.
    pub fn add_file(&mut self, file: DeviceFile) {
        store::insert(&mut self.files, file);
    }

    /// Ask for confirmation before deleting `id`. Returns `false` for
    /// unknown ids and for the password file.
    pub fn request_delete(&mut self, id: u64) -> bool {
        match self.files.iter().find(|f| f.id == id) {
            Some(file) if Self::can_delete(file) => {
                self.pending_delete = Some(id);
                true
            }
            _ => false,
        }
    }

    pub fn pending_delete(&self) -> Option<&DeviceFile> {
        let id = self.pending_delete?;
        self.files.iter().find(|f| f.id == id)
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Drop a file the backend has deleted. Closes the confirmation only
    /// if it was asking about this file.
    pub fn remove_file(&mut self, id: u64) -> Option<DeviceFile> {
        if self.pending_delete == Some(id) {
            self.pending_delete = None;
        }
        let index = self.files.iter().position(|f| f.id == id)?;
        Some(self.files.remove(index))
    }

    /// URL to open `file` at, in a new tab.
    pub fn open_url(base_url: &str, file: &DeviceFile) -> String {
        store::resolve_file_url(base_url, file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::{Backend, MemoryBackend, Operation};
    use store::Upload;

    async fn unlocked(backend: &MemoryBackend) -> DocumentList {
        let device = backend.devices()[0].clone();
        let files = backend.list_files(device.id, "Passw0rd!").await.unwrap();
        DocumentList::new(device, files)
    }

    fn pdf(name: &str) -> Upload {
        Upload {
            name: name.to_string(),
            mime: "application/pdf".to_string(),
            bytes: b"%PDF-1.7".to_vec(),
        }
    }

    #[tokio::test]
    async fn test_upload_appends_once() {
        let backend = MemoryBackend::new().with_device("abcd-1234-efgh-5678", "Scanner", "Passw0rd!");
        let mut docs = unlocked(&backend).await;
        let before = backend.request_count();

        let uploaded = backend.upload_file(docs.device().id, pdf("manual.pdf")).await.unwrap();
        docs.add_file(uploaded.clone());
        docs.add_file(uploaded.clone());

        assert_eq!(docs.files().len(), 2);
        assert_eq!(docs.files()[1], uploaded);
        // No refetch after the upload.
        assert_eq!(backend.request_count(), before + 1);
    }

    #[tokio::test]
    async fn test_failed_upload_leaves_list() {
        let backend = MemoryBackend::new().with_device("abcd-1234-efgh-5678", "Scanner", "Passw0rd!");
        let docs = unlocked(&backend).await;
        backend.fail(Operation::UploadFile, "File too large");

        let err = backend.upload_file(docs.device().id, pdf("manual.pdf")).await.unwrap_err();
        assert_eq!(err.to_string(), "File too large");
        assert_eq!(docs.files().len(), 1);
    }

    #[tokio::test]
    async fn test_password_file_cannot_be_deleted() {
        let backend = MemoryBackend::new().with_device("abcd-1234-efgh-5678", "Scanner", "Passw0rd!");
        let mut docs = unlocked(&backend).await;
        let artifact = docs.files()[0].id;

        assert!(!DocumentList::can_delete(&docs.files()[0]));
        assert!(!docs.request_delete(artifact));
        assert!(docs.pending_delete().is_none());
        assert_eq!(docs.files().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_after_confirmation() {
        let backend = MemoryBackend::new().with_device("abcd-1234-efgh-5678", "Scanner", "Passw0rd!");
        let mut docs = unlocked(&backend).await;
        let uploaded = backend.upload_file(docs.device().id, pdf("manual.pdf")).await.unwrap();
        let id = uploaded.id;
        docs.add_file(uploaded);
        let before = backend.request_count();

        assert!(docs.request_delete(id));
        docs.cancel_delete();
        assert_eq!(docs.files().len(), 2);
        assert_eq!(backend.request_count(), before);

        docs.request_delete(id);
        backend.delete_file(id).await.unwrap();
        let removed = docs.remove_file(id);
        assert_eq!(removed.map(|f| f.name), Some("manual.pdf".to_string()));
        assert!(docs.pending_delete().is_none());
        assert_eq!(docs.files().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_during_upload_is_kept() {
        let backend = MemoryBackend::new().with_device("abcd-1234-efgh-5678", "Scanner", "Passw0rd!");
        let mut docs = unlocked(&backend).await;
        let device_id = docs.device().id;
        let first = backend.upload_file(device_id, pdf("a.pdf")).await.unwrap();
        let second = backend.upload_file(device_id, pdf("c.pdf")).await.unwrap();
        docs.add_file(first.clone());
        docs.add_file(second.clone());

        // An upload of b.pdf is in flight while a.pdf is deleted and c.pdf
        // is queued for deletion.
        let in_flight = backend.upload_file(device_id, pdf("b.pdf"));
        docs.request_delete(first.id);
        backend.delete_file(first.id).await.unwrap();
        docs.remove_file(first.id);
        docs.request_delete(second.id);

        docs.add_file(in_flight.await.unwrap());

        let names: Vec<&str> = docs.files().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, [".password", "c.pdf", "b.pdf"]);
        assert_eq!(docs.pending_delete().map(|f| f.id), Some(second.id));
    }

    #[test]
    fn test_removing_another_file_keeps_prompt() {
        let device = Device {
            id: 1,
            device_id: "abcd-1234-efgh-5678".to_string(),
            device_name: "Scanner".to_string(),
            password: None,
            created_at: None,
        };
        let file = |id: u64, name: &str| DeviceFile {
            id,
            name: name.to_string(),
            mime: String::new(),
            url: format!("/uploads/{id}_{name}"),
            updated_at: None,
        };
        let mut docs = DocumentList::new(device, vec![file(1, "a.pdf"), file(2, "b.pdf")]);

        docs.request_delete(2);
        assert_eq!(docs.remove_file(1).map(|f| f.id), Some(1));
        assert_eq!(docs.pending_delete().map(|f| f.id), Some(2));
        assert_eq!(docs.remove_file(1), None);
    }

    #[test]
    fn test_open_url() {
        let file = DeviceFile {
            id: 1,
            name: "manual.pdf".to_string(),
            mime: "application/pdf".to_string(),
            url: "/uploads/manual.pdf".to_string(),
            updated_at: None,
        };
        assert_eq!(
            DocumentList::open_url("http://localhost:1337/", &file),
            "http://localhost:1337/uploads/manual.pdf"
        );
    }
}
