use dioxus::prelude::*;

#[component]
pub fn ErrorState(message: String, on_retry: EventHandler<()>) -> Element {
    rsx! {
        div { class: "panel state-panel", role: "alert", aria_live: "assertive",
            span { class: "state-icon error", aria_hidden: "true", "⚠" }
            h3 { class: "state-title", "Wystąpił błąd" }
            p { class: "state-text", "{message}" }
            button {
                class: "btn-primary",
                onclick: move |_| on_retry.call(()),
                "Spróbuj ponownie"
            }
        }
    }
}
