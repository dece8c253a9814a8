//! Transient, dismissible notifications ("toasts").

use std::fmt::Display;
use std::time::Duration;

use dioxus::prelude::*;

use crate::icons::{FaCircleCheck, FaCircleInfo, FaTriangleExclamation, FaXmark};
use crate::session::use_config;
use crate::Icon;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    fn class(&self) -> &'static str {
        match self {
            Level::Info => "toast toast--info",
            Level::Success => "toast toast--success",
            Level::Warning => "toast toast--warning",
            Level::Error => "toast toast--error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub level: Level,
    pub message: String,
}

/// Notifications currently on screen, oldest first.
#[derive(Clone, Debug, Default)]
pub struct Notifications {
    entries: Vec<Notification>,
    next_id: u64,
}

impl Notifications {
    pub fn push(&mut self, level: Level, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        self.entries.push(Notification {
            id: self.next_id,
            level,
            message: message.into(),
        });
        self.next_id
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|n| n.id != id);
        self.entries.len() != before
    }

    pub fn entries(&self) -> &[Notification] {
        &self.entries
    }
}

pub fn use_notifications() -> Signal<Notifications> {
    use_context::<Signal<Notifications>>()
}

pub fn notify(notifications: &mut Signal<Notifications>, level: Level, message: impl Into<String>) {
    notifications.write().push(level, message);
}

/// Log a caught error and show its message.
pub fn report_error(notifications: &mut Signal<Notifications>, action: &str, error: &impl Display) {
    tracing::error!("{action} failed: {error}");
    notify(notifications, Level::Error, error.to_string());
}

async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}

/// Renders every notification in a fixed corner stack.
/// Place once near the app root so toasts outlive page changes.
#[component]
pub fn ToastHost() -> Element {
    let notifications = use_notifications();
    let entries = notifications.read().entries().to_vec();

    rsx! {
        div {
            class: "toast-stack",
            for (id, entry) in entries.into_iter().map(|n| (n.id, n)) {
                Toast { key: "{id}", notification: entry }
            }
        }
    }
}

#[component]
fn Toast(notification: Notification) -> Element {
    let mut notifications = use_notifications();
    let dismiss_after = Duration::from_secs(u64::from(use_config().notifications.dismiss_after_secs));
    let id = notification.id;

    use_hook(move || {
        spawn(async move {
            sleep(dismiss_after).await;
            notifications.write().dismiss(id);
        })
    });

    let icon = match notification.level {
        Level::Success => rsx! { Icon { icon: FaCircleCheck, width: 16, height: 16 } },
        Level::Info => rsx! { Icon { icon: FaCircleInfo, width: 16, height: 16 } },
        Level::Warning | Level::Error => {
            rsx! { Icon { icon: FaTriangleExclamation, width: 16, height: 16 } }
        }
    };

    rsx! {
        div {
            class: notification.level.class(),
            role: "status",
            {icon}
            span { class: "toast__message", "{notification.message}" }
            button {
                class: "toast__close",
                title: "Dismiss",
                onclick: move |_| {
                    notifications.write().dismiss(id);
                },
                Icon { icon: FaXmark, width: 12, height: 12 }
            }
        }
    }
}
