//! Thin asynchronous client for the static offers feed.
//!
//! - Waits a configurable delay before every request to mimic network latency.
//! - Fails a configurable share of requests up front so retry paths can be exercised.
//! - Never caches and never retries; the caller owns retry.

use std::{
    any::Any,
    fmt,
    future::Future,
    panic::AssertUnwindSafe,
    sync::{Arc, Mutex},
    time::Duration,
};

use futures::FutureExt;
use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};
use reqwest::{Client, Url};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::OfferSourceConfig;
use crate::domain::Offer;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5173/";
pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);
pub const DEFAULT_FAILURE_RATE: f64 = 0.1;
const OFFERS_PATH: &str = "offers.json";
const USER_AGENT: &str = "loan-offer-ranking/1.0.0";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Nie udało się pobrać ofert. Spróbuj ponownie później.")]
    Unavailable,
    #[error("HTTP error! status: {0}")]
    Status(u16),
    #[error("{0}")]
    Transport(String),
    #[error("failed to decode offers: {0}")]
    Decode(String),
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("An unexpected error occurred while fetching offers.")]
    Unexpected,
}

impl FetchError {
    /// Human-readable description shown in the error state.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Converts a panic payload into the generic error; the payload itself is
    /// only written to the diagnostic log.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let detail = payload
            .downcast_ref::<&str>()
            .map(|text| text.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        warn!("Offer source aborted: {detail}");
        Self::Unexpected
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            Self::Status(status.as_u16())
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Anything that can produce the base offer set.
pub trait OfferSource {
    fn fetch_offers(&self) -> impl Future<Output = Result<Vec<Offer>, FetchError>>;
}

/// Runs `source` and folds every way it can go wrong, panics included, into a [`FetchError`].
pub async fn fetch_guarded<S: OfferSource>(source: &S) -> Result<Vec<Offer>, FetchError> {
    match AssertUnwindSafe(source.fetch_offers()).catch_unwind().await {
        Ok(result) => result,
        Err(payload) => Err(FetchError::from_panic(payload)),
    }
}

/// Randomized up-front failure with an injectable random source.
pub struct FailureInjection {
    probability: f64,
    rng: Mutex<Box<dyn RngCore + Send>>,
}

impl FailureInjection {
    pub fn new(probability: f64, rng: impl RngCore + Send + 'static) -> Self {
        Self {
            probability,
            rng: Mutex::new(Box::new(rng)),
        }
    }

    pub fn from_entropy(probability: f64) -> Self {
        Self::new(probability, StdRng::from_entropy())
    }

    pub fn seeded(probability: f64, seed: u64) -> Self {
        Self::new(probability, StdRng::seed_from_u64(seed))
    }

    pub fn disabled() -> Self {
        Self::seeded(0.0, 0)
    }

    pub fn always() -> Self {
        Self::seeded(1.0, 0)
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn should_fail(&self) -> bool {
        if self.probability <= 0.0 {
            return false;
        }
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen::<f64>() < self.probability
    }
}

impl fmt::Debug for FailureInjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FailureInjection")
            .field("probability", &self.probability)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
pub struct OfferClient {
    http: Client,
    offers_url: Url,
    delay: Duration,
    failures: Arc<FailureInjection>,
}

impl OfferClient {
    pub fn new() -> Result<Self, FetchError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base: &str) -> Result<Self, FetchError> {
        let base_url = if base.ends_with('/') {
            Url::parse(base)?
        } else {
            Url::parse(&format!("{base}/"))?
        };
        let offers_url = base_url.join(OFFERS_PATH)?;
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            offers_url,
            delay: DEFAULT_DELAY,
            failures: Arc::new(FailureInjection::from_entropy(DEFAULT_FAILURE_RATE)),
        })
    }

    pub fn from_config(config: &OfferSourceConfig) -> Result<Self, FetchError> {
        Ok(Self::with_base_url(&config.base_url)?
            .with_delay(config.simulated_delay)
            .with_failure_injection(FailureInjection::from_entropy(config.failure_rate)))
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_failure_injection(mut self, failures: FailureInjection) -> Self {
        self.failures = Arc::new(failures);
        self
    }

    pub fn offers_url(&self) -> &Url {
        &self.offers_url
    }

    pub async fn get_offers(&self) -> Result<Vec<Offer>, FetchError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if self.failures.should_fail() {
            warn!(
                probability = self.failures.probability(),
                "Simulated offers outage"
            );
            return Err(FetchError::Unavailable);
        }

        debug!("Requesting offers from {}", self.offers_url);
        let response = self
            .http
            .get(self.offers_url.clone())
            .send()
            .await?
            .error_for_status()?;
        let offers: Vec<Offer> = response.json().await?;
        info!("Fetched {} offers", offers.len());
        Ok(offers)
    }
}

impl OfferSource for OfferClient {
    async fn fetch_offers(&self) -> Result<Vec<Offer>, FetchError> {
        self.get_offers().await
    }
}
