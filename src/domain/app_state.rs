//! Application state coordinator.
//!
//! Owns the fetched base offer set plus the current query inputs and derives
//! the visible list and the tag universe from them on demand. Fetch failures
//! are folded into [`LoadStatus::Error`]; nothing escapes as an error value.

use tracing::{info, warn};

use super::{
    entities::{FilterCriteria, Offer, SortMode},
    events::AnalyticsEvent,
    ranking::{all_tags, filter_by, sort_offers},
    validation::{
        validate_amount, validate_period, ValidationError, DEFAULT_AMOUNT, DEFAULT_PERIOD,
    },
};
use crate::infra::{
    analytics::EventLogger,
    offers::{fetch_guarded, FetchError, OfferSource},
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error {
        message: String,
    },
}

impl LoadStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error { message } => Some(message.as_str()),
            _ => None,
        }
    }
}

/// Identifies one load cycle. Only the most recently issued ticket may
/// complete a load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(u64);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded { count: usize },
    Failed { message: String },
    /// A newer load was started after this one; its result was dropped.
    Stale,
}

#[derive(Clone, Debug)]
pub struct AppState {
    offers: Vec<Offer>,
    criteria: FilterCriteria,
    sort_mode: SortMode,
    status: LoadStatus,
    latest_request: u64,
    analytics: EventLogger,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(EventLogger::default())
    }
}

impl AppState {
    pub fn new(analytics: EventLogger) -> Self {
        Self {
            offers: Vec::new(),
            criteria: FilterCriteria::new(DEFAULT_AMOUNT, DEFAULT_PERIOD),
            sort_mode: SortMode::default(),
            status: LoadStatus::Idle,
            latest_request: 0,
            analytics,
        }
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// The unfiltered base set from the last successful load.
    pub fn offers(&self) -> &[Offer] {
        &self.offers
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn amount(&self) -> f64 {
        self.criteria.amount
    }

    pub fn period(&self) -> i32 {
        self.criteria.period
    }

    pub fn selected_tags(&self) -> &[String] {
        &self.criteria.selected_tags
    }

    pub fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    pub fn analytics(&self) -> &EventLogger {
        &self.analytics
    }

    /// Starts a load cycle. Returns `None` while a load is already in flight.
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        if self.status.is_loading() {
            info!("Load already in progress; ignoring request");
            return None;
        }
        self.latest_request += 1;
        self.status = LoadStatus::Loading;
        Some(LoadTicket(self.latest_request))
    }

    /// Applies the result of the load identified by `ticket`.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Offer>, FetchError>,
    ) -> LoadOutcome {
        if ticket.0 != self.latest_request {
            warn!(
                ticket = ticket.0,
                latest = self.latest_request,
                "Discarding stale offers response"
            );
            return LoadOutcome::Stale;
        }

        match result {
            Ok(offers) => {
                let count = offers.len();
                self.offers = offers;
                self.status = LoadStatus::Success;
                info!("Loaded {count} offers");
                self.analytics.log(AnalyticsEvent::ViewList { count });
                LoadOutcome::Loaded { count }
            }
            Err(err) => {
                let message = err.message();
                warn!("Failed to load offers: {message}");
                self.status = LoadStatus::Error {
                    message: message.clone(),
                };
                LoadOutcome::Failed { message }
            }
        }
    }

    /// Runs a full load cycle against `source`. `None` means a load was already running.
    pub async fn reload<S: OfferSource>(&mut self, source: &S) -> Option<LoadOutcome> {
        let ticket = self.begin_load()?;
        let result = fetch_guarded(source).await;
        Some(self.finish_load(ticket, result))
    }

    pub fn set_amount(&mut self, amount: f64) {
        self.criteria.amount = amount;
        self.log_range_change();
    }

    pub fn set_period(&mut self, period: i32) {
        self.criteria.period = period;
        self.log_range_change();
    }

    pub fn toggle_tag(&mut self, tag: &str) {
        self.criteria.toggle_tag(tag);
        self.log_tag_change();
    }

    pub fn clear_tags(&mut self) {
        self.criteria.selected_tags.clear();
        self.log_tag_change();
    }

    pub fn set_sort_mode(&mut self, mode: SortMode) {
        self.sort_mode = mode;
        self.analytics.log(AnalyticsEvent::SortChange { sort_by: mode });
    }

    pub fn expand_offer(&self, offer: &Offer) {
        self.analytics.log(AnalyticsEvent::expand_offer(offer));
    }

    pub fn record_cta_click(&self, offer: &Offer) {
        self.analytics.log(AnalyticsEvent::cta_click(offer));
    }

    /// Filtered and sorted projection of the base set; empty unless the last load succeeded.
    pub fn visible_offers(&self) -> Vec<Offer> {
        if !self.status.is_success() {
            return Vec::new();
        }
        derive_visible(&self.offers, &self.criteria, self.sort_mode)
    }

    /// Tag universe of the unfiltered base set; empty unless the last load succeeded.
    pub fn available_tags(&self) -> Vec<String> {
        if !self.status.is_success() {
            return Vec::new();
        }
        all_tags(&self.offers)
    }

    pub fn amount_error(&self) -> Option<ValidationError> {
        validate_amount(self.criteria.amount).err()
    }

    pub fn period_error(&self) -> Option<ValidationError> {
        validate_period(self.criteria.period).err()
    }

    fn log_range_change(&self) {
        self.analytics.log(AnalyticsEvent::FilterChange {
            amount: self.criteria.amount,
            period: self.criteria.period,
            tags: None,
        });
    }

    fn log_tag_change(&self) {
        self.analytics.log(AnalyticsEvent::FilterChange {
            amount: self.criteria.amount,
            period: self.criteria.period,
            tags: Some(self.criteria.selected_tags.clone()),
        });
    }
}

/// `sort(filter(offers, criteria), mode)`.
pub fn derive_visible(offers: &[Offer], criteria: &FilterCriteria, mode: SortMode) -> Vec<Offer> {
    sort_offers(&filter_by(offers, criteria), mode)
}
