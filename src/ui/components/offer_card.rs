use std::time::Duration;

use dioxus::prelude::*;

use loan_offer_ranking::domain::{
    presentation::{amount_range_label, apr_label, period_label, rating_stars, redirect_message, Star},
    AppState, Offer,
};

use super::toast::{push_toast, ToastMessage};

/// How long the CTA stays in its pending state before the redirect is confirmed.
const REDIRECT_DELAY: Duration = Duration::from_millis(600);

#[component]
pub fn OfferCard(offer: Offer) -> Element {
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let mut redirecting = use_signal(|| false);
    let mut expanded = use_signal(|| false);

    let stars = rating_stars(offer.rating);
    let apr = apr_label(&offer);
    let amounts = amount_range_label(&offer);
    let periods = period_label(&offer);
    let pending = redirecting();
    let details_open = expanded();

    let offer_for_details = offer.clone();
    let toggle_details = move |_: MouseEvent| {
        if !details_open {
            state.with(|st| st.expand_offer(&offer_for_details));
        }
        expanded.set(!details_open);
    };

    let offer_for_cta = offer.clone();
    let open_offer = move |_: MouseEvent| {
        if redirecting() {
            return;
        }
        state.with(|st| st.record_cta_click(&offer_for_cta));
        redirecting.set(true);

        let message = redirect_message(&offer_for_cta);
        spawn(async move {
            tokio::time::sleep(REDIRECT_DELAY).await;
            redirecting.set(false);
            push_toast(toasts, message);
        });
    };

    rsx! {
        article { class: "panel offer-card", aria_label: "Oferta {offer.name}",
            div { class: "offer-body",
                div { class: "offer-aside",
                    img {
                        class: "offer-logo",
                        src: "{offer.logo}",
                        alt: "{offer.name} logo",
                        loading: "lazy",
                    }
                    div { class: "rating", aria_label: "Ocena {offer.rating} na 100",
                        div { class: "stars", aria_hidden: "true",
                            for (index, star) in stars.into_iter().enumerate() {
                                span { key: "{index}", class: star_class(star), "★" }
                            }
                        }
                        div { class: "muted",
                            "Ocena: "
                            strong { "{offer.rating}/100" }
                        }
                    }
                    if !offer.tags.is_empty() {
                        div { class: "chip-row", role: "list", aria_label: "Cechy oferty",
                            for tag in offer.tags.iter() {
                                span { key: "{tag}", class: "chip static", role: "listitem", "{tag}" }
                            }
                        }
                    }
                }
                div { class: "offer-main",
                    h3 { class: "offer-name", tabindex: 0, "{offer.name}" }
                    div { class: "offer-facts",
                        Fact { label: "Decyzja:", value: offer.decision.clone() }
                        Fact { label: "RRSO:", value: apr }
                    }
                    button {
                        class: "link-button",
                        aria_expanded: details_open,
                        onclick: toggle_details,
                        if details_open { "Ukryj szczegóły" } else { "Pokaż szczegóły" }
                    }
                    if details_open {
                        div { class: "offer-facts details",
                            Fact { label: "Kwota:", value: amounts }
                            Fact { label: "Okres:", value: periods }
                        }
                    }
                }
            }
            button {
                class: "btn-primary wide",
                disabled: pending,
                aria_label: "Sprawdź ofertę {offer.name}",
                onclick: open_offer,
                if pending { "Przekierowywanie..." } else { "Sprawdź ofertę" }
            }
        }
    }
}

#[component]
fn Fact(label: &'static str, value: String) -> Element {
    rsx! {
        div { class: "fact", role: "group",
            div { class: "fact-label", "{label}" }
            div { class: "fact-value", "{value}" }
        }
    }
}

fn star_class(star: Star) -> &'static str {
    match star {
        Star::Full => "star full",
        Star::Half => "star half",
        Star::Empty => "star",
    }
}
