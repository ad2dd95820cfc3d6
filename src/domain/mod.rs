//! Offer ranking logic and the state it runs against.

pub mod app_state;
pub mod entities;
pub mod events;
pub mod presentation;
pub mod ranking;
pub mod validation;

pub use app_state::{derive_visible, AppState, LoadOutcome, LoadStatus, LoadTicket};
pub use entities::{FilterCriteria, Offer, OfferId, SortMode};
pub use events::{AnalyticsEvent, LoggedEvent};
pub use ranking::{all_tags, filter_by, filter_offers, sort_offers};
pub use validation::ValidationError;
