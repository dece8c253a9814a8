use dioxus::prelude::*;
use api::{ConsoleError, DeviceCreation};
use store::validate::validate_new_device;
use store::{Field, FormErrors, NewDevice};

use crate::backend::use_backend;
use crate::icons::{FaEye, FaEyeSlash};
use crate::notifications::{notify, report_error, use_notifications, Level};
use crate::registry::DeviceRegistry;
use crate::views::ModalOverlay;
use crate::Icon;

/// Error text for `field`, if the last submit flagged it.
pub fn field_error(errors: &Option<FormErrors>, field: Field) -> Option<String> {
    errors.as_ref()?.for_field(field).map(ToString::to_string)
}

/// Modal form for registering a device.
///
/// The form is checked locally first; the backend only sees valid input.
#[component]
pub fn CreateDeviceDialog(registry: Signal<DeviceRegistry>, on_close: EventHandler<()>) -> Element {
    let backend = use_backend();
    let mut notifications = use_notifications();

    let mut device_id = use_signal(String::new);
    let mut device_name = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut show_password = use_signal(|| false);
    let mut errors = use_signal(|| Option::<FormErrors>::None);
    let mut submitting = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let backend = backend.clone();
        async move {
            let form = NewDevice {
                device_id: device_id().trim().to_string(),
                device_name: device_name().trim().to_string(),
                password: password(),
            };
            if let Err(e) = validate_new_device(&form) {
                errors.set(Some(e));
                return;
            }
            errors.set(None);
            submitting.set(true);

            let mut ctl = registry();
            let result = ctl.create(&backend, &form).await;
            registry.set(ctl);
            submitting.set(false);

            match result {
                Ok(DeviceCreation::Complete(device)) => {
                    notify(
                        &mut notifications,
                        Level::Success,
                        format!("Device {} created", device.device_id),
                    );
                    on_close.call(());
                }
                Ok(DeviceCreation::ArtifactMissing { device, error }) => {
                    tracing::error!("Password file upload failed for device {}: {}", device.id, error);
                    notify(
                        &mut notifications,
                        Level::Warning,
                        format!(
                            "Device {} created, but its password could not be stored: {}",
                            device.device_id, error
                        ),
                    );
                    on_close.call(());
                }
                Err(ConsoleError::Invalid(e)) => errors.set(Some(e)),
                Err(ConsoleError::Api(e)) => report_error(&mut notifications, "Creating device", &e),
            }
        }
    };

    let current_errors = errors();
    let id_error = field_error(&current_errors, Field::DeviceId);
    let name_error = field_error(&current_errors, Field::DeviceName);
    let password_error = field_error(&current_errors, Field::Password);

    rsx! {
        ModalOverlay {
            on_close: move |_| {
                if !submitting() {
                    on_close.call(())
                }
            },
            form {
                class: "dialog",
                onsubmit: handle_submit,
                h2 { class: "dialog__title", "Create Device" }

                div {
                    class: "field",
                    label { r#for: "device-id", "Device ID" }
                    input {
                        id: "device-id",
                        r#type: "text",
                        placeholder: "aaaa-1111-bbbb-2222",
                        value: device_id(),
                        oninput: move |evt: FormEvent| device_id.set(evt.value()),
                    }
                    if let Some(message) = id_error {
                        p { class: "field__error", "{message}" }
                    }
                }

                div {
                    class: "field",
                    label { r#for: "device-name", "Device Name" }
                    input {
                        id: "device-name",
                        r#type: "text",
                        value: device_name(),
                        oninput: move |evt: FormEvent| device_name.set(evt.value()),
                    }
                    if let Some(message) = name_error {
                        p { class: "field__error", "{message}" }
                    }
                }

                div {
                    class: "field",
                    label { r#for: "device-password", "Password" }
                    div {
                        class: "field__password",
                        input {
                            id: "device-password",
                            r#type: if show_password() { "text" } else { "password" },
                            value: password(),
                            oninput: move |evt: FormEvent| password.set(evt.value()),
                        }
                        button {
                            r#type: "button",
                            class: "field__toggle",
                            title: if show_password() { "Hide password" } else { "Show password" },
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

                div {
                    class: "dialog__actions",
                    button {
                        r#type: "button",
                        class: "btn btn--outline",
                        disabled: submitting(),
                        onclick: move |_| on_close.call(()),
                        "Cancel"
                    }
                    button {
                        r#type: "submit",
                        class: "btn btn--primary",
                        disabled: submitting(),
                        if submitting() { "Creating..." } else { "Create" }
                    }
                }
            }
        }
    }
}
