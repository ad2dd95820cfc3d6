use dioxus::prelude::*;

const PLACEHOLDER_CARDS: usize = 5;

#[component]
pub fn LoadingSkeleton() -> Element {
    rsx! {
        div { class: "skeleton-list", aria_busy: "true", aria_label: "Ładowanie ofert",
            for index in 0..PLACEHOLDER_CARDS {
                div { key: "{index}", class: "panel skeleton-card",
                    div { class: "skeleton-row",
                        div { class: "skeleton-block avatar" }
                        div { class: "skeleton-block logo" }
                        div { class: "skeleton-lines",
                            div { class: "skeleton-block line wide" }
                            div { class: "skeleton-block line" }
                        }
                    }
                    div { class: "skeleton-row chips",
                        div { class: "skeleton-block chip" }
                        div { class: "skeleton-block chip" }
                        div { class: "skeleton-block chip" }
                    }
                }
            }
        }
    }
}
