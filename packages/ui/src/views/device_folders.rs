use dioxus::prelude::*;
use store::Device;

use crate::backend::use_backend;
use crate::folder::{FolderGate, FolderState, UnlockError};
use crate::icons::{FaEye, FaEyeSlash, FaFolder, FaLock};
use crate::notifications::{report_error, use_notifications};
use crate::registry::DeviceRegistry;
use crate::session::use_config;
use crate::views::{DocumentsView, ModalOverlay, PaginationBar};
use crate::Icon;

/// Folder grid. Picking a folder asks for the device password; a correct
/// password swaps the grid for the device's documents.
#[component]
pub fn DeviceFoldersView() -> Element {
    let config = use_config();
    let backend = use_backend();
    let mut notifications = use_notifications();

    let mut registry = use_signal(|| DeviceRegistry::new(config.folders.page_size));
    let mut gate = use_signal(FolderGate::default);
    let mut loading = use_signal(|| true);

    let _loader = use_resource(move || {
        let backend = backend.clone();
        async move {
            let mut ctl = registry.peek().clone();
            if let Err(e) = ctl.refresh(&backend).await {
                report_error(&mut notifications, "Loading folders", &e);
            }
            registry.set(ctl);
            loading.set(false);
        }
    });

    let state = gate.read().state().clone();
    if let FolderState::Unlocked(_) = state {
        return rsx! {
            DocumentsView { gate }
        };
    }

    let current = registry.read();
    let cards = current.page().to_vec();
    let paged = current.is_paged();
    let page = current.current_page();
    let page_count = current.page_count();
    drop(current);

    rsx! {
        section {
            class: "folders",
            h1 { "Device Folders" }

            if loading() {
                p { class: "folders__empty", "Loading..." }
            } else if cards.is_empty() {
                p { class: "folders__empty", "No folder available" }
            }

            div {
                class: "folders__grid",
                for (id, device) in cards.into_iter().map(|d| (d.id, d)) {
                    FolderCard {
                        key: "{id}",
                        device,
                        on_open: move |device| gate.write().select(device),
                    }
                }
            }

            if paged {
                PaginationBar {
                    current: page,
                    page_count,
                    on_select: move |page| {
                        registry.write().go_to(page);
                    },
                }
            }
        }

        if let FolderState::PasswordPrompt { device, password, error } = state {
            PasswordPrompt { gate, device, password, error }
        }
    }
}

#[component]
fn FolderCard(device: Device, on_open: EventHandler<Device>) -> Element {
    let created = device
        .created_at
        .as_ref()
        .map(store::local_timestamp);

    let name = device.display_name().to_string();

    rsx! {
        button {
            class: "folder-card",
            onclick: move |_| on_open.call(device.clone()),
            Icon { icon: FaFolder, width: 40, height: 40 }
            span { class: "folder-card__name", "{name}" }
            if let Some(created) = created {
                span { class: "folder-card__meta", "{created}" }
            }
        }
    }
}

#[component]
fn PasswordPrompt(
    gate: Signal<FolderGate>,
    device: Device,
    password: String,
    error: Option<String>,
) -> Element {
    let backend = use_backend();
    let mut notifications = use_notifications();
    let mut show_password = use_signal(|| false);
    let mut submitting = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let backend = backend.clone();
        async move {
            submitting.set(true);
            let mut ctl = gate();
            let result = ctl.submit(&backend).await;
            gate.set(ctl);
            submitting.set(false);

            match result {
                Ok(()) | Err(UnlockError::PasswordRequired) => {}
                Err(UnlockError::Rejected(e)) => report_error(&mut notifications, "Unlocking folder", &e),
                Err(e) => tracing::warn!("Unlock ignored: {e}"),
            }
        }
    };

    rsx! {
        ModalOverlay {
            on_close: move |_| {
                if !submitting() {
                    gate.write().cancel();
                }
            },
            form {
                class: "dialog",
                onsubmit: handle_submit,
                h2 {
                    class: "dialog__title",
                    Icon { icon: FaLock, width: 14, height: 14 }
                    " {device.display_name()}"
                }
                div {
                    class: "field",
                    label { r#for: "folder-password", "Password" }
                    div {
                        class: "field__password",
                        input {
                            id: "folder-password",
                            r#type: if show_password() { "text" } else { "password" },
                            autofocus: true,
                            value: password,
                            oninput: move |evt: FormEvent| gate.write().set_password(evt.value()),
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
                    if let Some(message) = error {
                        p { class: "field__error", "{message}" }
                    }
                }
                div {
                    class: "dialog__actions",
                    button {
                        r#type: "button",
                        class: "btn btn--outline",
                        disabled: submitting(),
                        onclick: move |_| gate.write().cancel(),
                        "Cancel"
                    }
                    button {
                        r#type: "submit",
                        class: "btn btn--primary",
                        disabled: submitting(),
                        if submitting() { "Checking..." } else { "Open" }
                    }
                }
            }
        }
    }
}
