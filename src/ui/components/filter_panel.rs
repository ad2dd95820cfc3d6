use dioxus::prelude::*;

use loan_offer_ranking::domain::AppState;

/// Tag chips drawn from the full offer set plus a reset link.
#[component]
pub fn FilterPanel() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let available = use_memo(move || state.with(|st| st.available_tags()));

    let tags = available();
    let selected = state.with(|st| st.selected_tags().to_vec());

    rsx! {
        div {
            id: "tag-filter-panel",
            class: "filter-panel",
            role: "region",
            aria_label: "Filtry według tagów",
            div { class: "chip-row",
                for tag in tags {
                    TagChip {
                        key: "{tag}",
                        active: selected.contains(&tag),
                        tag: tag.clone(),
                        on_toggle: move |tag: String| state.with_mut(|st| st.toggle_tag(&tag)),
                    }
                }
            }
            if !selected.is_empty() {
                button {
                    class: "link-button",
                    onclick: move |_| state.with_mut(|st| st.clear_tags()),
                    "Wyczyść filtry"
                }
            }
        }
    }
}

#[component]
fn TagChip(tag: String, active: bool, on_toggle: EventHandler<String>) -> Element {
    let class = if active { "chip active" } else { "chip" };
    rsx! {
        button {
            class: "{class}",
            aria_pressed: active,
            onclick: move |_| on_toggle.call(tag.clone()),
            "{tag}"
        }
    }
}
