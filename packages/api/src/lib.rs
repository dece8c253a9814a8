//! # API crate — client for the device backend
//!
//! Everything the console sends over the wire goes through the [`Backend`]
//! trait. The browser build talks to the REST API with [`HttpBackend`]; tests
//! and offline demos use [`MemoryBackend`].
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`backend`] | The `Backend` trait and its request/response bodies |
//! | [`error`] | `ApiError` for failed calls, `ConsoleError` for validated workflows |
//! | [`http`] | `reqwest` implementation with bearer-token auth and multipart uploads |
//! | [`memory`] | In-memory implementation with request counting and failure injection |
//! | [`workflows`] | Log in, sign up, and device creation with its password artifact |

pub mod backend;
pub mod error;
pub mod http;
pub mod memory;
pub mod workflows;

pub use backend::{AuthResponse, AuthUser, Backend, Credentials, Registration};
pub use error::{ApiError, ConsoleError};
pub use http::HttpBackend;
pub use memory::{MemoryBackend, Operation};
pub use workflows::{create_device, log_in, sign_up, DeviceCreation, SignUp};
