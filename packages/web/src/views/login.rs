//! Login page view with email/password form.

use dioxus::prelude::*;
use api::ConsoleError;
use store::{Field, FormErrors};
use ui::icons::{FaEye, FaEyeSlash};
use ui::views::field_error;
use ui::{notify, report_error, use_backend, use_notifications, use_session, Icon, Level};

use crate::Route;

/// Login page component.
#[component]
pub fn Login() -> Element {
    let backend = use_backend();
    let mut session = use_session();
    let mut notifications = use_notifications();
    let nav = use_navigator();

    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut show_password = use_signal(|| false);
    let mut errors = use_signal(|| Option::<FormErrors>::None);
    let mut loading = use_signal(|| false);

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let backend = backend.clone();
        spawn(async move {
            errors.set(None);
            loading.set(true);
            let result = api::log_in(&backend, email().trim(), &password()).await;
            loading.set(false);

            match result {
                Ok(new_session) => {
                    tracing::info!("Logged in as user {}", new_session.user.id);
                    session.write().login(new_session);
                    notify(&mut notifications, Level::Success, "Login successful");
                    nav.replace(Route::Dashboard {});
                }
                Err(ConsoleError::Invalid(e)) => errors.set(Some(e)),
                Err(ConsoleError::Api(e)) => report_error(&mut notifications, "Login", &e),
            }
        });
    };

    let current_errors = errors();
    let email_error = field_error(&current_errors, Field::Email);
    let password_error = field_error(&current_errors, Field::Password);

    rsx! {
        div {
            class: "auth-page",
            form {
                class: "auth-card",
                onsubmit: handle_login,

                h1 { class: "auth-card__title", "Sign in" }
                p { class: "auth-card__subtitle", "Manage your devices and their documents" }

                div {
                    class: "field",
                    label { r#for: "login-email", "Email" }
                    input {
                        id: "login-email",
                        r#type: "email",
                        placeholder: "you@example.com",
                        value: email(),
                        oninput: move |evt: FormEvent| email.set(evt.value()),
                    }
                    if let Some(message) = email_error {
                        p { class: "field__error", "{message}" }
                    }
                }

                div {
                    class: "field",
                    label { r#for: "login-password", "Password" }
                    div {
                        class: "field__password",
                        input {
                            id: "login-password",
                            r#type: if show_password() { "text" } else { "password" },
                            value: password(),
                            oninput: move |evt: FormEvent| password.set(evt.value()),
                        }
                        button {
                            r#type: "button",
                            class: "field__toggle",
                            onclick: move |_| show_password.set(!show_password()),
                            if show_password() {
                                Icon { icon: FaEyeSlash, width: 14, height: 14 }
                            } else {
                                Icon { icon: FaEye, width: 14, height: 14 }
                            }
                        }
                    }
                    if let Some(message) = password_error {
                        p { class: "field__error", "{message}" }
                    }
                }

                button {
                    r#type: "submit",
                    class: "btn btn--primary auth-card__submit",
                    disabled: loading(),
                    if loading() { "Signing in..." } else { "Sign in" }
                }

                p {
                    class: "auth-card__switch",
                    "Don't have an account? "
                    Link { to: Route::SignUp {}, "Sign up" }
                }
            }
        }
    }
}
