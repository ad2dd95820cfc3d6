use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier for offers returned by the offers endpoint.
pub type OfferId = String;

/// A single loan product with its eligibility ranges, rate and rating.
///
/// Range bounds are taken as delivered: inverted or negative ranges are kept
/// and simply never match a query.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    #[serde(deserialize_with = "string_from_json")]
    pub id: OfferId,
    pub name: String,
    pub logo: String,
    pub apr: f64,
    pub min_amount: f64,
    pub max_amount: f64,
    pub min_period: i32,
    pub max_period: i32,
    pub decision: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub rating: f64,
}

impl Offer {
    pub fn accepts_amount(&self, amount: f64) -> bool {
        amount >= self.min_amount && amount <= self.max_amount
    }

    pub fn accepts_period(&self, period: i32) -> bool {
        period >= self.min_period && period <= self.max_period
    }

    /// True when the offer carries at least one of `selected`, or when nothing is selected.
    pub fn has_any_tag(&self, selected: &[String]) -> bool {
        selected.is_empty() || selected.iter().any(|tag| self.tags.contains(tag))
    }
}

/// Caller-supplied query over the base offer set.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterCriteria {
    pub amount: f64,
    pub period: i32,
    /// Insertion order is kept for display; matching ignores it.
    pub selected_tags: Vec<String>,
}

impl FilterCriteria {
    pub fn new(amount: f64, period: i32) -> Self {
        Self {
            amount,
            period,
            selected_tags: Vec::new(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn matches(&self, offer: &Offer) -> bool {
        offer.accepts_amount(self.amount)
            && offer.accepts_period(self.period)
            && offer.has_any_tag(&self.selected_tags)
    }

    pub fn is_tag_selected(&self, tag: &str) -> bool {
        self.selected_tags.iter().any(|selected| selected == tag)
    }

    /// Adds `tag` when absent, removes it otherwise.
    pub fn toggle_tag(&mut self, tag: &str) {
        if self.is_tag_selected(tag) {
            self.selected_tags.retain(|selected| selected != tag);
        } else {
            self.selected_tags.push(tag.to_string());
        }
    }
}

/// Ordering strategies for the visible offer list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortMode {
    #[serde(rename = "apr-asc")]
    ByAprAscending,
    #[default]
    #[serde(rename = "rating-desc")]
    ByRatingDescending,
}

impl SortMode {
    pub const ALL: [SortMode; 2] = [SortMode::ByRatingDescending, SortMode::ByAprAscending];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ByAprAscending => "apr-asc",
            Self::ByRatingDescending => "rating-desc",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::ByAprAscending => "Najniższe RRSO",
            Self::ByRatingDescending => "Najwyżej oceniane",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn string_from_json<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct StringOrNumber;

    impl<'de> serde::de::Visitor<'de> for StringOrNumber {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or number")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(StringOrNumber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offer_deserializes_from_camel_case_record() {
        let raw = r#"{
            "id": 7,
            "name": "Szybka Gotówka",
            "logo": "https://example.com/logo.png",
            "apr": 15.5,
            "minAmount": 1000,
            "maxAmount": 10000,
            "minPeriod": 6,
            "maxPeriod": 36,
            "decision": "online",
            "tags": ["ratalna", "online"],
            "rating": 85
        }"#;

        let offer: Offer = serde_json::from_str(raw).unwrap();
        assert_eq!(offer.id, "7");
        assert_eq!(offer.min_amount, 1000.0);
        assert_eq!(offer.max_period, 36);
        assert_eq!(offer.tags, vec!["ratalna", "online"]);
        assert_eq!(offer.rating, 85.0);
    }

    #[test]
    fn toggling_a_tag_twice_restores_the_selection() {
        let mut criteria = FilterCriteria::new(5000.0, 12).with_tags(["online"]);
        criteria.toggle_tag("ratalna");
        assert_eq!(criteria.selected_tags, vec!["online", "ratalna"]);
        criteria.toggle_tag("ratalna");
        assert_eq!(criteria.selected_tags, vec!["online"]);
    }

    #[test]
    fn sort_mode_uses_wire_names() {
        assert_eq!(
            serde_json::to_string(&SortMode::ByAprAscending).unwrap(),
            "\"apr-asc\""
        );
        assert_eq!(SortMode::default(), SortMode::ByRatingDescending);
        assert_eq!(SortMode::ByRatingDescending.to_string(), "rating-desc");
    }
}
