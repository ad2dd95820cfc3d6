//! Ranking engine for consumer loan offers: fetch, filter, sort and tag
//! aggregation plus the state coordinator that ties them to a UI.

pub mod config;
pub mod domain;
pub mod infra;
pub mod telemetry;
pub mod util;

pub use config::AppConfig;
pub use domain::{AppState, FilterCriteria, Offer, SortMode};
pub use infra::{EventLogger, FetchError, OfferClient, OfferSource};
