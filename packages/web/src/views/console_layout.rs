//! Layout wrapping every route: the auth gate plus the header.

use dioxus::prelude::*;
use ui::{resolve_gate, use_session, Header};

use crate::Route;

/// Checks each navigation against the session before rendering the page.
#[component]
pub fn ConsoleLayout() -> Element {
    let session = use_session();
    let route = use_route::<Route>();
    let nav = use_navigator();

    let authenticated = session.read().is_authenticated();
    let path = route.to_string();

    if let Some(target) = resolve_gate(&path, authenticated).redirect() {
        tracing::debug!("Gate redirects {path} to {target}");
        nav.replace(target);
        return rsx! {};
    }

    let show_header = authenticated && !matches!(route, Route::Login {} | Route::SignUp {});

    rsx! {
        if show_header {
            Header {}
        }
        main {
            class: "console-main",
            Outlet::<Route> {}
        }
    }
}
