use dioxus::prelude::*;

use loan_offer_ranking::domain::{
    validation::{
        decrement_amount, decrement_period, increment_amount, increment_period,
        parse_amount_input, parse_period_input, MAX_AMOUNT, MAX_PERIOD, MIN_AMOUNT, MIN_PERIOD,
    },
    AppState,
};

#[component]
pub fn InputForm() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let (amount, period, amount_error, period_error) = state.with(|st| {
        (
            st.amount(),
            st.period(),
            st.amount_error().map(|err| err.to_string()),
            st.period_error().map(|err| err.to_string()),
        )
    });

    let amount_invalid = amount_error.is_some();
    let period_invalid = period_error.is_some();
    let amount_class = if amount_invalid {
        "stepper-input invalid"
    } else {
        "stepper-input"
    };
    let period_class = if period_invalid {
        "stepper-input invalid"
    } else {
        "stepper-input"
    };

    rsx! {
        section { class: "panel input-form",
            h2 { class: "panel-title", tabindex: 0, "Ile potrzebujesz?" }
            div { class: "input-grid",
                div {
                    label { r#for: "amount", class: "field-label", "Kwota (zł)" }
                    div { class: "stepper",
                        button {
                            r#type: "button",
                            class: "stepper-button",
                            aria_label: "Zmniejsz kwotę",
                            disabled: amount <= MIN_AMOUNT,
                            onclick: move |_| state.with_mut(|st| st.set_amount(decrement_amount(amount))),
                            "−"
                        }
                        input {
                            id: "amount",
                            class: "{amount_class}",
                            r#type: "number",
                            inputmode: "numeric",
                            min: "{MIN_AMOUNT}",
                            max: "{MAX_AMOUNT}",
                            value: "{amount}",
                            aria_label: "Kwota w złotych",
                            aria_invalid: amount_invalid,
                            oninput: move |evt: FormEvent| {
                                let value = parse_amount_input(&evt.value());
                                state.with_mut(|st| st.set_amount(value));
                            },
                        }
                        button {
                            r#type: "button",
                            class: "stepper-button",
                            aria_label: "Zwiększ kwotę",
                            disabled: amount >= MAX_AMOUNT,
                            onclick: move |_| state.with_mut(|st| st.set_amount(increment_amount(amount))),
                            "+"
                        }
                    }
                    if let Some(message) = amount_error {
                        p { id: "amount-error", class: "field-error", role: "alert", "{message}" }
                    }
                }
                div {
                    label { r#for: "period", class: "field-label", "Okres (miesiące)" }
                    div { class: "stepper",
                        button {
                            r#type: "button",
                            class: "stepper-button",
                            aria_label: "Zmniejsz okres",
                            disabled: period <= MIN_PERIOD,
                            onclick: move |_| state.with_mut(|st| st.set_period(decrement_period(period))),
                            "−"
                        }
                        input {
                            id: "period",
                            class: "{period_class}",
                            r#type: "number",
                            inputmode: "numeric",
                            min: "{MIN_PERIOD}",
                            max: "{MAX_PERIOD}",
                            value: "{period}",
                            aria_label: "Okres w miesiącach",
                            aria_invalid: period_invalid,
                            oninput: move |evt: FormEvent| {
                                let value = parse_period_input(&evt.value());
                                state.with_mut(|st| st.set_period(value));
                            },
                        }
                        button {
                            r#type: "button",
                            class: "stepper-button",
                            aria_label: "Zwiększ okres",
                            disabled: period >= MAX_PERIOD,
                            onclick: move |_| state.with_mut(|st| st.set_period(increment_period(period))),
                            "+"
                        }
                    }
                    if let Some(message) = period_error {
                        p { id: "period-error", class: "field-error", role: "alert", "{message}" }
                    }
                }
            }
        }
    }
}
