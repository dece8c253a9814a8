use dioxus::prelude::*;
use store::ConsoleConfig;
use tracing::Level;

use ui::{Notifications, SessionProvider, ToastHost};
use views::{ConsoleLayout, Dashboard, DeviceFolders, Login, NotFound, SignUp};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(ConsoleLayout)]
        #[route("/")]
        Root {},
        #[route("/login")]
        Login {},
        #[route("/signup")]
        SignUp {},
        #[route("/dashboard")]
        Dashboard {},
        #[route("/deviceFolderList")]
        DeviceFolders {},
        #[route("/:..segments")]
        NotFound { segments: Vec<String> },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

/// Settings compiled into the bundle. The browser has no process
/// environment, so the base URL override is read at build time.
const CONSOLE_TOML: &str = include_str!("../console.toml");

fn load_config() -> ConsoleConfig {
    let config = ConsoleConfig::from_toml(CONSOLE_TOML).unwrap_or_else(|e| {
        tracing::error!("Invalid {}, using defaults: {}", ConsoleConfig::filename(), e);
        ConsoleConfig::default()
    });
    match option_env!("DEVICE_CONSOLE_API_BASE_URL") {
        Some(base_url) => config.with_base_url(base_url),
        None => config,
    }
}

fn main() {
    dioxus::logger::init(Level::INFO).expect("failed to init logger");
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let config = use_hook(load_config);
    let notifications = use_signal(Notifications::default);

    use_context_provider(|| config);
    use_context_provider(|| notifications);

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        SessionProvider {
            Router::<Route> {}
            ToastHost {}
        }
    }
}

/// Redirect `/` to `/dashboard`. Signed-out visitors never get here.
#[component]
fn Root() -> Element {
    let nav = use_navigator();
    nav.replace(Route::Dashboard {});
    rsx! {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config_parses() {
        let config = ConsoleConfig::from_toml(CONSOLE_TOML).unwrap();
        assert_eq!(config.devices.page_size, 10);
        assert_eq!(config.folders.page_size, 12);
    }

    #[test]
    fn test_routes_match_gate_paths() {
        assert_eq!(Route::Login {}.to_string(), ui::gate::LOGIN_PATH);
        assert_eq!(Route::SignUp {}.to_string(), ui::gate::SIGNUP_PATH);
        assert_eq!(Route::Dashboard {}.to_string(), ui::gate::DASHBOARD_PATH);
        assert_eq!(Route::DeviceFolders {}.to_string(), ui::gate::FOLDERS_PATH);
    }
}
