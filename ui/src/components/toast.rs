//! Transient notifications stacked in the corner of the screen.

use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::time::Duration;

use api::notifications::NotificationKind;
use api::notifications::NotificationSink;
use dioxus::prelude::*;

use crate::compat;

/// How long a toast stays up unless clicked away.
const TOAST_LIFETIME: Duration = Duration::from_secs(6);

static NEXT_TOAST_ID: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

/// A [`NotificationSink`] that appends to a reactive list of toasts.
#[derive(Clone, Copy, PartialEq)]
pub struct ToastSink {
    toasts: Signal<Vec<Toast>>,
}

impl ToastSink {
    pub fn new(toasts: Signal<Vec<Toast>>) -> Self {
        Self { toasts }
    }

    pub fn dismiss(&self, id: u64) {
        let mut toasts = self.toasts;
        toasts.write().retain(|t| t.id != id);
    }
}

impl NotificationSink for ToastSink {
    fn notify(&self, kind: NotificationKind, title: &str, message: &str) {
        let mut toasts = self.toasts;
        toasts.write().push(Toast {
            id: NEXT_TOAST_ID.fetch_add(1, Ordering::Relaxed),
            kind,
            title: title.to_string(),
            message: message.to_string(),
        });
    }
}

#[component]
fn ToastItem(toast: Toast, sink: ToastSink) -> Element {
    let id = toast.id;
    use_future(move || async move {
        compat::sleep(TOAST_LIFETIME).await;
        sink.dismiss(id);
    });

    let (icon, accent) = match toast.kind {
        NotificationKind::Success => ("✔", "var(--pico-ins-color)"),
        NotificationKind::Error => ("✖", "var(--pico-del-color)"),
    };

    rsx! {
        article {
            class: "toast",
            role: "status",
            style: "border-left: 4px solid {accent};",
            onclick: move |_| sink.dismiss(id),
            strong { "{icon} {toast.title}" }
            p { "{toast.message}" }
        }
    }
}

/// Renders every live toast from `sink`.
#[component]
pub fn ToastStack(sink: ToastSink) -> Element {
    let toasts = sink.toasts.read().clone();

    rsx! {
        div {
            class: "toast-stack",
            for toast in toasts {
                ToastItem {
                    key: "{toast.id}",
                    toast: toast.clone(),
                    sink,
                }
            }
        }
    }
}
