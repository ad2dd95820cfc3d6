//! Display strings for offer cards and the result header.

use super::entities::Offer;

/// Polish noun form for "offer" after a result count.
pub fn offers_noun(count: usize) -> &'static str {
    if count == 1 {
        "ofertę"
    } else if count < 5 {
        "oferty"
    } else {
        "ofert"
    }
}

pub fn period_label(offer: &Offer) -> String {
    if offer.min_period == offer.max_period {
        format!("{} mies.", offer.min_period)
    } else {
        format!("{}-{} mies.", offer.min_period, offer.max_period)
    }
}

pub fn apr_label(offer: &Offer) -> String {
    format!("od {:.2}%", offer.apr)
}

pub fn amount_range_label(offer: &Offer) -> String {
    format!(
        "{} - {} zł",
        group_thousands(offer.min_amount),
        group_thousands(offer.max_amount)
    )
}

pub fn redirect_message(offer: &Offer) -> String {
    format!("Przekierowano do partnera: {}", offer.name)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Star {
    Full,
    Half,
    Empty,
}

/// Five-star rendering of a 0-100 rating: one star per 20 points, a half
/// star for a remainder of 10 or more.
pub fn rating_stars(rating: f64) -> [Star; 5] {
    let full = (rating / 20.0).floor();
    let has_half = rating % 20.0 >= 10.0;
    let mut stars = [Star::Empty; 5];
    for (index, star) in stars.iter_mut().enumerate() {
        let position = index as f64;
        if position < full {
            *star = Star::Full;
        } else if position == full && has_half {
            *star = Star::Half;
        }
    }
    stars
}

/// Formats a whole amount with a space between thousands groups.
pub fn group_thousands(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }

    if rounded < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
