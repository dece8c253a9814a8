mod modal_overlay;
pub use modal_overlay::{ConfirmDialog, ModalOverlay};

mod pagination;
pub use pagination::PaginationBar;

mod create_device;
pub use create_device::CreateDeviceDialog;
pub use create_device::field_error;

mod device_registry;
pub use device_registry::DeviceRegistryView;

mod device_folders;
pub use device_folders::DeviceFoldersView;

mod documents;
pub use documents::DocumentsView;
