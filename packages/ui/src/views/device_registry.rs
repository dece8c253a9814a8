use dioxus::prelude::*;

use crate::backend::use_backend;
use crate::gate::FOLDERS_PATH;
use crate::icons::{FaPlus, FaTrash, FaTriangleExclamation};
use crate::notifications::{notify, report_error, use_notifications, Level};
use crate::registry::DeviceRegistry;
use crate::session::use_config;
use crate::views::{ConfirmDialog, CreateDeviceDialog, PaginationBar};
use crate::Icon;

/// Dashboard table of every device, with create and delete.
#[component]
pub fn DeviceRegistryView() -> Element {
    let config = use_config();
    let backend = use_backend();
    let mut notifications = use_notifications();

    let mut registry = use_signal(|| DeviceRegistry::new(config.devices.page_size));
    let mut loading = use_signal(|| true);
    let mut show_create = use_signal(|| false);
    let mut deleting = use_signal(|| false);

    // Fetch the device list on mount
    let load_backend = backend.clone();
    let _loader = use_resource(move || {
        let backend = load_backend.clone();
        async move {
            let mut ctl = registry.peek().clone();
            if let Err(e) = ctl.refresh(&backend).await {
                report_error(&mut notifications, "Loading devices", &e);
            }
            registry.set(ctl);
            loading.set(false);
        }
    });

    let handle_confirm_delete = move |_| {
        let backend = backend.clone();
        async move {
            deleting.set(true);
            let mut ctl = registry();
            match ctl.confirm_delete(&backend).await {
                Ok(Some(device)) => notify(
                    &mut notifications,
                    Level::Success,
                    format!("Device {} deleted", device.device_id),
                ),
                Ok(None) => {}
                Err(e) => report_error(&mut notifications, "Deleting device", &e),
            }
            registry.set(ctl);
            deleting.set(false);
        }
    };

    let current = registry.read();
    let rows = current.page().to_vec();
    let pending = current.pending_delete().cloned();
    let has_devices = !current.is_empty();
    let paged = current.is_paged();
    let page = current.current_page();
    let page_count = current.page_count();
    let missing: Vec<u64> = rows
        .iter()
        .filter(|d| current.is_artifact_missing(d.id))
        .map(|d| d.id)
        .collect();
    drop(current);

    rsx! {
        section {
            class: "registry",
            div {
                class: "registry__toolbar",
                h1 { "Devices" }
                div {
                    class: "registry__actions",
                    if has_devices {
                        Link { to: FOLDERS_PATH, class: "btn btn--outline", "Device Folder" }
                    }
                    button {
                        class: "btn btn--primary",
                        onclick: move |_| show_create.set(true),
                        Icon { icon: FaPlus, width: 12, height: 12 }
                        " Create Device"
                    }
                }
            }

            table {
                class: "registry__table",
                thead {
                    tr {
                        th { "Device ID" }
                        th { "Name" }
                        th { "Actions" }
                    }
                }
                tbody {
                    if loading() {
                        tr { td { colspan: "3", class: "registry__empty", "Loading..." } }
                    } else if rows.is_empty() {
                        tr { td { colspan: "3", class: "registry__empty", "No device available" } }
                    }
                    for device in rows {
                        tr {
                            key: "{device.id}",
                            td {
                                "{device.device_id}"
                                if missing.contains(&device.id) {
                                    span {
                                        class: "registry__flag",
                                        title: "Password file missing",
                                        Icon { icon: FaTriangleExclamation, width: 12, height: 12 }
                                    }
                                }
                            }
                            td { "{device.display_name()}" }
                            td {
                                button {
                                    class: "btn btn--icon btn--danger",
                                    title: "Delete device",
                                    onclick: move |_| {
                                        registry.write().request_delete(device.id);
                                    },
                                    Icon { icon: FaTrash, width: 12, height: 12 }
                                }
                            }
                        }
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

        if show_create() {
            CreateDeviceDialog {
                registry,
                on_close: move |_| show_create.set(false),
            }
        }

        if let Some(device) = pending {
            ConfirmDialog {
                title: "Delete device",
                message: format!("Are you sure you want to delete {}?", device.display_name()),
                busy: deleting(),
                on_confirm: handle_confirm_delete,
                on_cancel: move |_| registry.write().cancel_delete(),
            }
        }
    }
}
