use dioxus::prelude::*;
use store::UserProfile;

use crate::gate::{DASHBOARD_PATH, FOLDERS_PATH};
use crate::session::{use_session, LogoutButton};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

fn or_not_available(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => "Not Available".to_string(),
    }
}

/// Top bar of every signed-in page: navigation, identity and the profile card.
#[component]
pub fn Header() -> Element {
    let session = use_session();
    let mut show_profile = use_signal(|| false);

    let user = session
        .read()
        .current_session()
        .map(|s| s.user.clone())
        .unwrap_or_default();

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        header {
            class: "header",
            nav {
                class: "header__nav",
                Link { to: DASHBOARD_PATH, class: "header__link", "Dashboard" }
                Link { to: FOLDERS_PATH, class: "header__link", "Device Folder" }
            }
            div {
                class: "header__user",
                div {
                    class: "header__identity",
                    span { class: "header__name", "{user.user_name}" }
                    span { class: "header__email", "{user.email}" }
                }
                button {
                    class: "avatar",
                    title: "Profile",
                    onclick: move |_| show_profile.set(!show_profile()),
                    "{user.initial()}"
                }
            }
            if show_profile() {
                ProfileCard { user }
            }
        }
    }
}

#[component]
fn ProfileCard(user: UserProfile) -> Element {
    let rows = [
        ("User Name", or_not_available(Some(&user.user_name))),
        ("Company", or_not_available(user.company.as_deref())),
        ("Email", or_not_available(Some(&user.email))),
        ("User ID", or_not_available(Some(&user.id))),
    ];

    rsx! {
        div {
            class: "profile-card",
            div { class: "avatar avatar--large", "{user.initial()}" }
            dl {
                for (label, value) in rows {
                    div {
                        key: "{label}",
                        class: "profile-card__row",
                        dt { "{label}" }
                        dd { "{value}" }
                    }
                }
            }
            LogoutButton { class: "btn btn--danger" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_profile_fields() {
        assert_eq!(or_not_available(None), "Not Available");
        assert_eq!(or_not_available(Some("  ")), "Not Available");
        assert_eq!(or_not_available(Some("Acme")), "Acme");
    }
}
