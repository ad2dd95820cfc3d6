//! Analytics events emitted on user-visible state transitions.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::entities::{Offer, SortMode};

/// The closed set of events the offer list reports.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", content = "params", rename_all = "snake_case")]
pub enum AnalyticsEvent {
    ViewList {
        count: usize,
    },
    #[serde(rename_all = "camelCase")]
    FilterChange {
        #[serde(with = "finite_or_null")]
        amount: f64,
        period: i32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tags: Option<Vec<String>>,
    },
    #[serde(rename_all = "camelCase")]
    SortChange {
        sort_by: SortMode,
    },
    #[serde(rename_all = "camelCase")]
    ExpandOffer {
        offer_id: String,
        offer_name: String,
    },
    #[serde(rename_all = "camelCase")]
    CtaClick {
        offer_id: String,
        offer_name: String,
        #[serde(with = "finite_or_null")]
        apr: f64,
    },
}

impl AnalyticsEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ViewList { .. } => "view_list",
            Self::FilterChange { .. } => "filter_change",
            Self::SortChange { .. } => "sort_change",
            Self::ExpandOffer { .. } => "expand_offer",
            Self::CtaClick { .. } => "cta_click",
        }
    }

    pub fn expand_offer(offer: &Offer) -> Self {
        Self::ExpandOffer {
            offer_id: offer.id.clone(),
            offer_name: offer.name.clone(),
        }
    }

    pub fn cta_click(offer: &Offer) -> Self {
        Self::CtaClick {
            offer_id: offer.id.clone(),
            offer_name: offer.name.clone(),
            apr: offer.apr,
        }
    }
}

/// An event as stored in the log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoggedEvent {
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub event: AnalyticsEvent,
}

impl LoggedEvent {
    pub fn now(event: AnalyticsEvent) -> Self {
        Self {
            timestamp: unix_millis(OffsetDateTime::now_utc()),
            event,
        }
    }

    pub fn name(&self) -> &'static str {
        self.event.name()
    }
}

fn unix_millis(at: OffsetDateTime) -> i64 {
    (at.unix_timestamp_nanos() / 1_000_000) as i64
}

/// JSON has no NaN or infinity: such values are written as `null` and read back as NaN.
mod finite_or_null {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn events_serialize_with_name_and_params() {
        let event = AnalyticsEvent::CtaClick {
            offer_id: "abc123".to_string(),
            offer_name: "TestOffer".to_string(),
            apr: 12.5,
        };
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({
                "name": "cta_click",
                "params": { "offerId": "abc123", "offerName": "TestOffer", "apr": 12.5 }
            })
        );

        let sort = AnalyticsEvent::SortChange {
            sort_by: SortMode::ByAprAscending,
        };
        assert_eq!(
            serde_json::to_value(&sort).unwrap(),
            json!({ "name": "sort_change", "params": { "sortBy": "apr-asc" } })
        );
    }

    #[test]
    fn filter_change_omits_tags_when_absent() {
        let event = AnalyticsEvent::FilterChange {
            amount: 1000.0,
            period: 12,
            tags: None,
        };
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({ "name": "filter_change", "params": { "amount": 1000.0, "period": 12 } })
        );
    }

    #[test]
    fn non_finite_numbers_are_stored_as_null_and_read_back() {
        let event = AnalyticsEvent::FilterChange {
            amount: f64::INFINITY,
            period: 12,
            tags: None,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            json!({ "name": "filter_change", "params": { "amount": null, "period": 12 } })
        );

        match serde_json::from_value::<AnalyticsEvent>(json).unwrap() {
            AnalyticsEvent::FilterChange { amount, period, .. } => {
                assert!(amount.is_nan());
                assert_eq!(period, 12);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn logged_events_carry_a_positive_timestamp() {
        let logged = LoggedEvent::now(AnalyticsEvent::ViewList { count: 5 });
        assert!(logged.timestamp > 0);
        assert_eq!(logged.name(), "view_list");

        let restored: LoggedEvent =
            serde_json::from_str(&serde_json::to_string(&logged).unwrap()).unwrap();
        assert_eq!(restored, logged);
    }
}
