//! Shared backend constructor for the views.
//!
//! Every view talks to the REST API through an [`api::HttpBackend`] built
//! from the configured base URL and the current session's token.

use api::HttpBackend;
use dioxus::prelude::ReadableExt;
use store::{ConsoleConfig, SessionContext, SessionStorage};

use crate::session::{use_config, use_session};

/// Create a backend client for `config`, authorised as `session`.
pub fn make_backend<S: SessionStorage>(
    config: &ConsoleConfig,
    session: &SessionContext<S>,
) -> HttpBackend {
    HttpBackend::new(config.api.base_url.clone()).with_token(session.token().map(str::to_string))
}

/// Backend for the calling component. Re-renders pick up a new token.
pub fn use_backend() -> HttpBackend {
    let config = use_config();
    let session = use_session();
    let session = session.read();
    make_backend(&config, &session)
}
