//! Registration page view: account plus company.

use dioxus::prelude::*;
use api::{ConsoleError, SignUp as SignUpForm};
use store::{Field, FormErrors};
use ui::views::field_error;
use ui::{notify, report_error, use_backend, use_notifications, use_session, Level};

use crate::Route;

/// Sign-up page component.
#[component]
pub fn SignUp() -> Element {
    let backend = use_backend();
    let mut session = use_session();
    let mut notifications = use_notifications();
    let nav = use_navigator();

    let mut company = use_signal(String::new);
    let mut username = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut errors = use_signal(|| Option::<FormErrors>::None);
    let mut loading = use_signal(|| false);

    let handle_sign_up = move |evt: FormEvent| {
        evt.prevent_default();
        let backend = backend.clone();
        spawn(async move {
            let form = SignUpForm {
                company: company().trim().to_string(),
                username: username().trim().to_string(),
                email: email().trim().to_string(),
                password: password(),
            };
            errors.set(None);
            loading.set(true);
            let result = api::sign_up(&backend, &form).await;
            loading.set(false);

            match result {
                Ok(new_session) => {
                    session.write().login(new_session);
                    notify(&mut notifications, Level::Success, "Account created");
                    nav.replace(Route::Dashboard {});
                }
                Err(ConsoleError::Invalid(e)) => errors.set(Some(e)),
                Err(ConsoleError::Api(e)) => report_error(&mut notifications, "Sign up", &e),
            }
        });
    };

    let current_errors = errors();
    let fields = [
        ("signup-company", "Company", "text", Field::Company, company),
        ("signup-username", "Username", "text", Field::Username, username),
        ("signup-email", "Email", "email", Field::Email, email),
        ("signup-password", "Password", "password", Field::Password, password),
    ];

    rsx! {
        div {
            class: "auth-page",
            form {
                class: "auth-card",
                onsubmit: handle_sign_up,

                h1 { class: "auth-card__title", "Create account" }
                p { class: "auth-card__subtitle", "Register your company to start adding devices" }

                for (id, caption, kind, field, mut value) in fields {
                    div {
                        key: "{id}",
                        class: "field",
                        label { r#for: id, "{caption}" }
                        input {
                            id,
                            r#type: kind,
                            value: value(),
                            oninput: move |evt: FormEvent| value.set(evt.value()),
                        }
                        if let Some(message) = field_error(&current_errors, field) {
                            p { class: "field__error", "{message}" }
                        }
                    }
                }

                button {
                    r#type: "submit",
                    class: "btn btn--primary auth-card__submit",
                    disabled: loading(),
                    if loading() { "Creating account..." } else { "Sign up" }
                }

                p {
                    class: "auth-card__switch",
                    "Already have an account? "
                    Link { to: Route::Login {}, "Sign in" }
                }
            }
        }
    }
}
