pub mod config;
pub mod list;
pub mod models;
pub mod session;
pub mod validate;

mod memory;
pub use memory::MemoryStorage;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalStorage;

pub use config::ConsoleConfig;
pub use list::{insert, remove_by_id, Identified, Pagination};
pub use models::{
    format_timestamp, local_timestamp, resolve_file_url, Device, DeviceFile, FileKind, NewDevice,
    Upload, PASSWORD_ARTIFACT_NAME,
};
pub use session::{Session, SessionContext, SessionStorage, UserProfile};
pub use validate::{Field, FormErrors, ValidationError};
