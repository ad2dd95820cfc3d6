//! Offer filtering, ranking and tag aggregation.
//!
//! Everything here is a pure function over a borrowed offer slice; the base
//! set is never reordered or mutated.

use std::{cmp::Ordering, collections::BTreeSet};

use super::entities::{FilterCriteria, Offer, SortMode};

/// Offers accepting `amount` and `period` that carry any of `selected_tags`.
/// Relative input order is preserved.
pub fn filter_offers(
    offers: &[Offer],
    amount: f64,
    period: i32,
    selected_tags: &[String],
) -> Vec<Offer> {
    offers
        .iter()
        .filter(|offer| {
            offer.accepts_amount(amount)
                && offer.accepts_period(period)
                && offer.has_any_tag(selected_tags)
        })
        .cloned()
        .collect()
}

/// Same as [`filter_offers`] with the inputs bundled.
pub fn filter_by(offers: &[Offer], criteria: &FilterCriteria) -> Vec<Offer> {
    offers
        .iter()
        .filter(|offer| criteria.matches(offer))
        .cloned()
        .collect()
}

/// Returns a reordered copy of `offers`. The sort is stable, so offers with
/// equal keys keep their input order.
pub fn sort_offers(offers: &[Offer], mode: SortMode) -> Vec<Offer> {
    let mut sorted = offers.to_vec();
    sorted.sort_by(|a, b| match mode {
        SortMode::ByAprAscending => compare_keys(a.apr, b.apr, false),
        SortMode::ByRatingDescending => compare_keys(a.rating, b.rating, true),
    });
    sorted
}

/// Distinct tags across `offers`, sorted by `str` ordering (UTF-8 byte order,
/// which matches code point order). Case-sensitive.
pub fn all_tags(offers: &[Offer]) -> Vec<String> {
    offers
        .iter()
        .flat_map(|offer| offer.tags.iter())
        .map(String::as_str)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

// NaN keys sort after every number in both directions.
fn compare_keys(a: f64, b: f64, descending: bool) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ordering = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
            if descending {
                ordering.reverse()
            } else {
                ordering
            }
        }
    }
}
