pub mod analytics;
pub mod offers;

pub use analytics::{EventLogError, EventLogger, EventSink, MemoryEventLog};
pub use offers::{fetch_guarded, FailureInjection, FetchError, OfferClient, OfferSource};
