//! Password gate in front of a device's documents.
//!
//! ```text
//! Idle --select--> PasswordPrompt --submit ok--> Unlocked
//!                  |  ^      |                      |
//!                  |  +------+ rejected             |
//!                  +--cancel--> Idle <----back------+
//! ```
//!
//! Unlocking is never cached: leaving `Unlocked` drops the device and its
//! files, and the next visit asks for the password again.

use api::{ApiError, Backend};
use store::{Device, DeviceFile};

use crate::documents::DocumentList;

#[derive(Debug, thiserror::Error)]
pub enum UnlockError {
    #[error("Password is required.")]
    PasswordRequired,

    #[error("No device is waiting for a password")]
    NotPrompting,

    #[error("Incorrect password. Please try again.")]
    Rejected(#[source] ApiError),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum FolderState {
    #[default]
    Idle,
    PasswordPrompt {
        device: Device,
        password: String,
        error: Option<String>,
    },
    Unlocked(DocumentList),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FolderGate {
    state: FolderState,
}

impl FolderGate {
    pub fn state(&self) -> &FolderState {
        &self.state
    }

    /// Start a fresh password prompt for `device`.
    pub fn select(&mut self, device: Device) {
        self.state = FolderState::PasswordPrompt {
            device,
            password: String::new(),
            error: None,
        };
    }

    pub fn set_password(&mut self, value: String) {
        if let FolderState::PasswordPrompt { password, .. } = &mut self.state {
            *password = value;
        }
    }

    /// Close the prompt without unlocking.
    pub fn cancel(&mut self) {
        if matches!(self.state, FolderState::PasswordPrompt { .. }) {
            self.state = FolderState::Idle;
        }
    }

    /// Leave the document view.
    pub fn back(&mut self) {
        self.state = FolderState::Idle;
    }

    /// Check the typed password with the backend.
    ///
    /// A blank password is refused locally. Any backend failure keeps the
    /// prompt open with an error message.
    pub async fn submit<B: Backend>(&mut self, backend: &B) -> Result<(), UnlockError> {
        let FolderState::PasswordPrompt {
            device,
            password,
            error,
        } = &mut self.state
        else {
            return Err(UnlockError::NotPrompting);
        };

        if password.trim().is_empty() {
            *error = Some(UnlockError::PasswordRequired.to_string());
            return Err(UnlockError::PasswordRequired);
        }

        match backend.list_files(device.id, password).await {
            Ok(files) => {
                tracing::info!("Unlocked device {}", device.id);
                let device = device.clone();
                self.state = FolderState::Unlocked(DocumentList::new(device, files));
                Ok(())
            }
            Err(e) => {
                let rejected = UnlockError::Rejected(e);
                *error = Some(rejected.to_string());
                Err(rejected)
            }
        }
    }

    pub fn documents(&self) -> Option<&DocumentList> {
        match &self.state {
            FolderState::Unlocked(documents) => Some(documents),
            _ => None,
        }
    }

    pub fn documents_mut(&mut self) -> Option<&mut DocumentList> {
        match &mut self.state {
            FolderState::Unlocked(documents) => Some(documents),
            _ => None,
        }
    }

    /// Id of the device whose documents are showing.
    pub fn unlocked_device(&self) -> Option<u64> {
        self.documents().map(|documents| documents.device().id)
    }

    /// Apply a finished upload for `device` to the current list.
    ///
    /// Ignored unless that device is still unlocked, so a late answer
    /// cannot reopen a folder the user has already left.
    pub fn add_document(&mut self, device: u64, file: DeviceFile) -> bool {
        match self.documents_mut() {
            Some(documents) if documents.device().id == device => {
                documents.add_file(file);
                true
            }
            _ => false,
        }
    }

    /// Apply a finished delete for `device` to the current list.
    pub fn remove_document(&mut self, device: u64, file: u64) -> Option<DeviceFile> {
        self.documents_mut()
            .filter(|documents| documents.device().id == device)?
            .remove_file(file)
    }
}
