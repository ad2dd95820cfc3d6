use dioxus::prelude::*;

use loan_offer_ranking::domain::{presentation::offers_noun, AppState, SortMode};

use super::{filter_panel::FilterPanel, offer_card::OfferCard};

#[component]
pub fn OffersList() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let mut show_filters = use_signal(|| false);

    let visible = use_memo(move || state.with(|st| st.visible_offers()));

    let offers = visible();
    let (sort_mode, selected_count) = state.with(|st| (st.sort_mode(), st.selected_tags().len()));
    let count = offers.len();
    let noun = offers_noun(count);
    let filters_open = show_filters();

    rsx! {
        div {
            div { class: "panel list-toolbar",
                div { class: "toolbar-row",
                    div { class: "result-count", role: "status", aria_live: "polite",
                        "Znaleziono "
                        strong { "{count}" }
                        " {noun}"
                    }
                    div { class: "sort-group",
                        span { class: "muted", "Sortuj:" }
                        for mode in SortMode::ALL {
                            button {
                                key: "{mode}",
                                class: if sort_mode == mode { "toggle active" } else { "toggle" },
                                aria_pressed: sort_mode == mode,
                                onclick: move |_| state.with_mut(|st| st.set_sort_mode(mode)),
                                {mode.label()}
                            }
                        }
                    }
                    button {
                        class: "btn-secondary",
                        aria_expanded: filters_open,
                        aria_controls: "tag-filter-panel",
                        onclick: move |_| show_filters.set(!filters_open),
                        "Filtry ({selected_count})"
                    }
                }
                if filters_open {
                    FilterPanel {}
                }
            }

            if offers.is_empty() {
                div { class: "panel state-panel",
                    span { class: "state-icon", aria_hidden: "true", "☹" }
                    p { class: "state-title", "Nie znaleziono ofert" }
                    p { class: "state-text", "Spróbuj zmienić kryteria wyszukiwania" }
                }
            } else {
                div { class: "offer-list", role: "list",
                    for offer in offers {
                        div { key: "{offer.id}", role: "listitem",
                            OfferCard { offer: offer.clone() }
                        }
                    }
                }
            }
        }
    }
}
