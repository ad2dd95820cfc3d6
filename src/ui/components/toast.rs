use std::time::Duration;

use dioxus::prelude::*;

use loan_offer_ranking::util::generate_id;

const TOAST_AUTO_DISMISS: Duration = Duration::from_millis(3000);
const MAX_TOASTS: usize = 5;

#[derive(Clone, Debug, PartialEq)]
pub struct ToastMessage {
    pub id: String,
    pub text: String,
}

impl ToastMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: generate_id("toast"),
            text: text.into(),
        }
    }
}

pub fn push_toast(mut toasts: Signal<Vec<ToastMessage>>, message: impl Into<String>) {
    let message = ToastMessage::new(message);
    toasts.with_mut(|entries| {
        if entries.len() >= MAX_TOASTS {
            entries.remove(0);
        }
        entries.push(message);
    });
}

#[component]
pub fn Toast() -> Element {
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let messages = toasts();

    if messages.is_empty() {
        return rsx! { Fragment {} };
    }

    rsx! {
        div { class: "toast-region",
            ul { class: "toast-stack",
                for message in messages {
                    ToastCard { key: "{message.id}", message, toasts }
                }
            }
        }
    }
}

#[component]
fn ToastCard(message: ToastMessage, toasts: Signal<Vec<ToastMessage>>) -> Element {
    let toast_id = message.id.clone();
    let dismiss_id = message.id.clone();
    let _auto_dismiss = use_future(move || {
        let mut toasts = toasts;
        let id = toast_id.clone();
        async move {
            tokio::time::sleep(TOAST_AUTO_DISMISS).await;
            toasts.with_mut(|items| items.retain(|toast| toast.id != id));
        }
    });

    rsx! {
        li { class: "toast", role: "status", aria_live: "polite", aria_atomic: "true",
            span { class: "toast-icon", "✅" }
            p { class: "toast-text", "{message.text}" }
            button {
                class: "toast-dismiss",
                aria_label: "Zamknij",
                onclick: move |_| {
                    let mut toasts = toasts;
                    toasts.with_mut(|items| items.retain(|toast| toast.id != dismiss_id));
                },
                "×"
            }
        }
    }
}
