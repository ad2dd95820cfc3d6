use dioxus::{prelude::*, signals::Signal};
use tracing::warn;

use loan_offer_ranking::{
    config::AppConfig,
    domain::AppState,
    infra::offers::{fetch_guarded, FetchError, OfferClient},
    util::{assets, persistence::open_event_log},
};

use crate::ui::{
    components::{
        error_state::ErrorState,
        input_form::InputForm,
        loading_skeleton::LoadingSkeleton,
        offers_list::OffersList,
        toast::{Toast, ToastMessage},
    },
    shell::Shell,
};

/// Where the offers come from. `None` when the HTTP client could not be built;
/// every load then ends in the error state.
#[derive(Clone)]
pub struct OfferFeed {
    client: Option<OfferClient>,
}

impl OfferFeed {
    fn from_config(config: &AppConfig) -> Self {
        let client = OfferClient::from_config(&config.offers)
            .map_err(|err| warn!("Failed to initialise offers client: {err}"))
            .ok();
        Self { client }
    }
}

#[component]
pub fn App() -> Element {
    let config = use_hook(|| try_consume_context::<AppConfig>().unwrap_or_default());

    let state = use_signal({
        let config = config.clone();
        move || AppState::new(open_event_log(&config.analytics))
    });
    use_context_provider(|| state);

    let feed = use_context_provider(|| OfferFeed::from_config(&config));

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts);

    use_hook(move || load_offers(state, feed));

    rsx! {
        document::Link { rel: "icon", href: assets::favicon_data_uri() }
        document::Style { "{assets::main_css()}" }
        Shell {
            InputForm {}
            Offers {}
        }
        Toast {}
    }
}

/// Switches between skeleton, error and list according to the load status.
#[component]
fn Offers() -> Element {
    let state = use_context::<Signal<AppState>>();
    let feed = use_context::<OfferFeed>();
    let status = state.with(|st| st.status().clone());

    if status.is_loading() {
        return rsx! { LoadingSkeleton {} };
    }

    if let Some(message) = status.error_message() {
        return rsx! {
            ErrorState {
                message: message.to_string(),
                on_retry: move |_| load_offers(state, feed.clone()),
            }
        };
    }

    if status.is_success() {
        return rsx! { OffersList {} };
    }

    rsx! { Fragment {} }
}

/// Starts a load cycle unless one is already running. The response is applied
/// only if no newer cycle was started in the meantime.
pub fn load_offers(mut state: Signal<AppState>, feed: OfferFeed) {
    let Some(ticket) = state.with_mut(|st| st.begin_load()) else {
        return;
    };

    spawn(async move {
        let result = match feed.client.as_ref() {
            Some(client) => fetch_guarded(client).await,
            None => Err(FetchError::Unexpected),
        };
        state.with_mut(|st| st.finish_load(ticket, result));
    });
}
