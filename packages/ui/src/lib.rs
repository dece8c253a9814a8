//! This crate contains all shared UI for the console: the route gate, the
//! view controllers and the Dioxus components built on them.
//!
//! Controllers ([`DeviceRegistry`], [`FolderGate`], [`DocumentList`]) are
//! plain structs with async operations over any [`api::Backend`], so they are
//! tested without a renderer. Components hold them in signals.

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod gate;
pub use gate::{resolve_gate, GateDecision};

mod backend;
pub use backend::{make_backend, use_backend};

mod session;
pub use session::{
    use_config, use_session, LogoutButton, PlatformStorage, SessionProvider, SessionState,
};

pub mod notifications;
pub use notifications::{notify, report_error, use_notifications, Level, Notifications, ToastHost};

mod registry;
pub use registry::DeviceRegistry;

mod documents;
pub use documents::DocumentList;

mod folder;
pub use folder::{FolderGate, FolderState, UnlockError};

mod header;
pub use header::Header;

pub mod views;
