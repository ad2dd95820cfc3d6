//! `OfferClient` against a local HTTP server.

use std::time::Duration;

use axum::{http::StatusCode, routing::get, Router};
use loan_offer_ranking::{
    domain::{AppState, LoadOutcome, LoadStatus},
    infra::{
        offers::{FailureInjection, FetchError, OfferClient},
        EventLogger,
    },
};
use tokio::net::TcpListener;

const SAMPLE_OFFERS: &str = include_str!("../demos/offers.json");

async fn spawn_server(app: Router) -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

fn client(base_url: &str) -> OfferClient {
    OfferClient::with_base_url(base_url)
        .expect("valid base url")
        .with_delay(Duration::ZERO)
        .with_failure_injection(FailureInjection::disabled())
}

fn offers_router(body: &'static str) -> Router {
    Router::new().route(
        "/offers.json",
        get(move || async move { ([("content-type", "application/json")], body) }),
    )
}

#[tokio::test]
async fn fetches_and_decodes_the_offer_feed() {
    let base = spawn_server(offers_router(SAMPLE_OFFERS)).await;

    let offers = client(&base).get_offers().await.expect("offers");

    assert_eq!(offers.len(), 5);
    assert_eq!(offers[0].name, "Bank Północny");
    assert_eq!(offers[1].min_amount, 200.0);
    assert!(offers[4].tags.is_empty());
}

#[tokio::test]
async fn numeric_ids_are_read_as_strings() {
    let body = r#"[{"id":7,"name":"N","logo":"l","apr":5,"minAmount":1,"maxAmount":2,
        "minPeriod":1,"maxPeriod":2,"decision":"Online","tags":[],"rating":50}]"#;
    let base = spawn_server(offers_router(body)).await;

    let offers = client(&base).get_offers().await.expect("offers");
    assert_eq!(offers[0].id, "7");
}

#[tokio::test]
async fn non_success_status_is_reported_with_its_code() {
    let app = Router::new().route(
        "/offers.json",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let base = spawn_server(app).await;

    let err = client(&base).get_offers().await.unwrap_err();
    assert!(matches!(err, FetchError::Status(500)));
    assert_eq!(err.message(), "HTTP error! status: 500");
}

#[tokio::test]
async fn missing_feed_is_a_404() {
    let base = spawn_server(Router::new()).await;

    let err = client(&base).get_offers().await.unwrap_err();
    assert!(matches!(err, FetchError::Status(404)));
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let base = spawn_server(offers_router("{ not json")).await;

    let err = client(&base).get_offers().await.unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let err = client(&format!("http://{addr}"))
        .get_offers()
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)), "got {err:?}");
}

#[tokio::test]
async fn coordinator_loads_from_the_server_and_retries_after_failure() {
    let base = spawn_server(offers_router(SAMPLE_OFFERS)).await;
    let logger = EventLogger::in_memory();
    let mut state = AppState::new(logger.clone());

    let failing = client(&base).with_failure_injection(FailureInjection::always());
    let outcome = state.reload(&failing).await;
    assert!(matches!(outcome, Some(LoadOutcome::Failed { .. })));
    assert_eq!(
        state.status().error_message(),
        Some("Nie udało się pobrać ofert. Spróbuj ponownie później.")
    );
    assert!(state.visible_offers().is_empty());

    let outcome = state.reload(&client(&base)).await;
    assert_eq!(outcome, Some(LoadOutcome::Loaded { count: 5 }));
    assert_eq!(state.status(), &LoadStatus::Success);

    // Defaults: 5000 zł over 12 months.
    let names: Vec<_> = state
        .visible_offers()
        .into_iter()
        .map(|offer| offer.name)
        .collect();
    assert_eq!(
        names,
        [
            "Bank Północny",
            "Kredyt Rodzinny",
            "Szybka Gotówka",
            "Finanse Express",
            "Pożyczka Plus"
        ]
    );
    assert_eq!(
        state.available_tags(),
        [
            "Bez BIK",
            "Bez zaświadczeń",
            "Niskie RRSO",
            "Online",
            "Pierwsza darmowa"
        ]
    );

    let logged: Vec<_> = logger.events().iter().map(|e| e.name()).collect();
    assert_eq!(logged, ["view_list"]);
}
