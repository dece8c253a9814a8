use api::Backend;
use dioxus::prelude::*;
use store::{DeviceFile, FileKind, Upload};

use crate::backend::use_backend;
use crate::documents::DocumentList;
use crate::folder::FolderGate;
use crate::icons::{
    FaArrowLeft, FaFile, FaFileImage, FaFilePdf, FaFileVideo, FaFileWord, FaSpinner, FaTrash,
    FaUpload,
};
use crate::notifications::{notify, report_error, use_notifications, Level};
use crate::session::use_config;
use crate::views::ConfirmDialog;
use crate::Icon;

/// Card names longer than this are cut.
const NAME_LIMIT: usize = 20;

fn kind_icon(kind: FileKind) -> Element {
    match kind {
        FileKind::Pdf => rsx! { Icon { class: "doc-icon doc-icon--pdf", icon: FaFilePdf, width: 36, height: 36 } },
        FileKind::Word => rsx! { Icon { class: "doc-icon doc-icon--word", icon: FaFileWord, width: 36, height: 36 } },
        FileKind::Image => rsx! { Icon { class: "doc-icon doc-icon--image", icon: FaFileImage, width: 36, height: 36 } },
        FileKind::Video => rsx! { Icon { class: "doc-icon doc-icon--video", icon: FaFileVideo, width: 36, height: 36 } },
        FileKind::Other => rsx! { Icon { class: "doc-icon", icon: FaFile, width: 36, height: 36 } },
    }
}

/// Documents of the unlocked device held by `gate`.
#[component]
pub fn DocumentsView(gate: Signal<FolderGate>) -> Element {
    let config = use_config();
    let backend = use_backend();
    let mut notifications = use_notifications();
    let mut uploading = use_signal(|| false);
    let mut deleting = use_signal(|| false);

    let upload_backend = backend.clone();
    let handle_upload = move |evt: FormEvent| {
        let backend = upload_backend.clone();
        async move {
            let Some(file) = evt.files().into_iter().next() else {
                return;
            };
            let Some(device) = gate.peek().unlocked_device() else {
                return;
            };
            uploading.set(true);
            let upload = match file.read_bytes().await {
                Ok(bytes) => Upload {
                    name: file.name(),
                    mime: file.content_type().unwrap_or_default(),
                    bytes: bytes.to_vec(),
                },
                Err(e) => {
                    report_error(&mut notifications, "Reading file", &e);
                    uploading.set(false);
                    return;
                }
            };
            match backend.upload_file(device, upload).await {
                Ok(file) => {
                    let message = format!("{} uploaded", file.name);
                    gate.write().add_document(device, file);
                    notify(&mut notifications, Level::Success, message);
                }
                Err(e) => report_error(&mut notifications, "Uploading file", &e),
            }
            uploading.set(false);
        }
    };

    let handle_confirm_delete = move |_| {
        let backend = backend.clone();
        async move {
            let target = {
                let current = gate.peek();
                current
                    .documents()
                    .and_then(|docs| Some((docs.device().id, docs.pending_delete()?.id)))
            };
            let Some((device, id)) = target else {
                return;
            };
            deleting.set(true);
            match backend.delete_file(id).await {
                Ok(()) => {
                    if let Some(file) = gate.write().remove_document(device, id) {
                        notify(&mut notifications, Level::Success, format!("{} deleted", file.name));
                    }
                }
                Err(e) => {
                    // Close the prompt; the file stays listed.
                    if let Some(current) = gate.write().documents_mut() {
                        current.cancel_delete();
                    }
                    report_error(&mut notifications, "Deleting file", &e);
                }
            }
            deleting.set(false);
        }
    };

    let Some(docs) = gate.read().documents().cloned() else {
        return rsx! {};
    };
    let pending = docs.pending_delete().cloned();
    let device_name = docs.device().display_name().to_string();
    let files = docs.files().to_vec();

    rsx! {
        section {
            class: "documents",
            div {
                class: "documents__toolbar",
                button {
                    class: "btn btn--outline",
                    onclick: move |_| gate.write().back(),
                    Icon { icon: FaArrowLeft, width: 12, height: 12 }
                    " Back"
                }
                h1 { "{device_name}" }
                label {
                    class: if uploading() { "btn btn--primary btn--disabled" } else { "btn btn--primary" },
                    if uploading() {
                        Icon { class: "spin", icon: FaSpinner, width: 12, height: 12 }
                        " Uploading..."
                    } else {
                        Icon { icon: FaUpload, width: 12, height: 12 }
                        " Upload"
                    }
                    input {
                        r#type: "file",
                        class: "documents__file-input",
                        disabled: uploading(),
                        onchange: handle_upload,
                    }
                }
            }

            if files.is_empty() {
                p { class: "documents__empty", "No documents uploaded yet" }
            }

            div {
                class: "documents__grid",
                for (id, file) in files.into_iter().map(|f| (f.id, f)) {
                    DocumentCard {
                        key: "{id}",
                        base_url: config.api.base_url.clone(),
                        file,
                        on_delete: move |id| {
                            if let Some(docs) = gate.write().documents_mut() {
                                docs.request_delete(id);
                            }
                        },
                    }
                }
            }
        }

        if let Some(file) = pending {
            ConfirmDialog {
                title: "Delete document",
                message: format!("Are you sure you want to delete {}?", file.name),
                busy: deleting(),
                on_confirm: handle_confirm_delete,
                on_cancel: move |_| {
                    if let Some(docs) = gate.write().documents_mut() {
                        docs.cancel_delete();
                    }
                },
            }
        }
    }
}

#[component]
fn DocumentCard(file: DeviceFile, base_url: String, on_delete: EventHandler<u64>) -> Element {
    let id = file.id;
    let href = DocumentList::open_url(&base_url, &file);
    let short_name = file.short_name(NAME_LIMIT);
    let updated = file
        .updated_at
        .as_ref()
        .map(store::local_timestamp);

    rsx! {
        div {
            class: "doc-card",
            a {
                class: "doc-card__open",
                href: "{href}",
                target: "_blank",
                rel: "noopener noreferrer",
                title: "{file.name}",
                {kind_icon(file.kind())}
                span { class: "doc-card__name", "{short_name}" }
                if let Some(updated) = updated {
                    span { class: "doc-card__meta", "{updated}" }
                }
            }
            if DocumentList::can_delete(&file) {
                button {
                    class: "btn btn--icon btn--danger",
                    title: "Delete document",
                    onclick: move |_| on_delete.call(id),
                    Icon { icon: FaTrash, width: 12, height: 12 }
                }
            }
        }
    }
}
