//! Session context and hooks for the UI.

use dioxus::prelude::*;
use store::{ConsoleConfig, SessionContext};

use crate::gate::LOGIN_PATH;

/// Storage the session lives in on this platform.
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformStorage = store::LocalStorage;
#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub type PlatformStorage = store::MemoryStorage;

pub type SessionState = SessionContext<PlatformStorage>;

/// Get the session context.
/// Returns a signal that updates when the user logs in or out.
pub fn use_session() -> Signal<SessionState> {
    use_context::<Signal<SessionState>>()
}

/// Get the console configuration provided by the app root.
pub fn use_config() -> ConsoleConfig {
    use_context::<ConsoleConfig>()
}

/// Provider component that restores the stored session on mount.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn SessionProvider(children: Element) -> Element {
    let session = use_signal(|| {
        let context = SessionContext::open(PlatformStorage::new());
        if let Some(session) = context.current_session() {
            tracing::info!("Restored session for user {}", session.user.id);
        }
        context
    });

    use_context_provider(|| session);

    rsx! {
        {children}
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let mut session = use_session();
    let nav = use_navigator();

    let onclick = move |_| {
        session.write().logout();
        tracing::info!("Logged out");
        nav.replace(LOGIN_PATH);
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
