use dioxus::prelude::*;

/// A full-screen overlay that centers its children in a modal card.
/// Clicking outside the card triggers `on_close`.
#[component]
pub fn ModalOverlay(on_close: EventHandler<()>, children: Element) -> Element {
    rsx! {
        div {
            class: "modal-overlay",
            onclick: move |_| on_close.call(()),
            div {
                class: "modal-card",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                {children}
            }
        }
    }
}

/// Blocking yes/no prompt. Nothing happens until one of the buttons is pressed.
#[component]
pub fn ConfirmDialog(
    title: String,
    message: String,
    #[props(default = "Delete".to_string())] confirm_label: String,
    #[props(default)] busy: bool,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    rsx! {
        ModalOverlay {
            on_close: move |_| {
                if !busy {
                    on_cancel.call(())
                }
            },
            div {
                class: "dialog",
                h2 { class: "dialog__title", "{title}" }
                p { class: "dialog__message", "{message}" }
                div {
                    class: "dialog__actions",
                    button {
                        class: "btn btn--outline",
                        disabled: busy,
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    button {
                        class: "btn btn--danger",
                        disabled: busy,
                        onclick: move |_| on_confirm.call(()),
                        if busy { "Deleting..." } else { "{confirm_label}" }
                    }
                }
            }
        }
    }
}
