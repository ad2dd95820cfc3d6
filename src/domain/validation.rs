//! Advisory bounds for the amount/period form.
//!
//! A failed check is shown next to the field; filtering still runs on the raw value.

use thiserror::Error;

pub const MIN_AMOUNT: f64 = 200.0;
pub const MAX_AMOUNT: f64 = 150_000.0;
pub const AMOUNT_STEP: f64 = 500.0;
pub const MIN_PERIOD: i32 = 1;
pub const MAX_PERIOD: i32 = 60;
pub const PERIOD_STEP: i32 = 1;

pub const DEFAULT_AMOUNT: f64 = 5_000.0;
pub const DEFAULT_PERIOD: i32 = 12;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Minimalna kwota to {} zł", MIN_AMOUNT)]
    AmountTooLow,
    #[error("Maksymalna kwota to {} zł", MAX_AMOUNT)]
    AmountTooHigh,
    #[error("Minimalny okres to {} miesiąc", MIN_PERIOD)]
    PeriodTooShort,
    #[error("Maksymalny okres to {} miesięcy", MAX_PERIOD)]
    PeriodTooLong,
}

pub fn validate_amount(amount: f64) -> Result<(), ValidationError> {
    if amount < MIN_AMOUNT {
        Err(ValidationError::AmountTooLow)
    } else if amount > MAX_AMOUNT {
        Err(ValidationError::AmountTooHigh)
    } else {
        Ok(())
    }
}

pub fn validate_period(period: i32) -> Result<(), ValidationError> {
    if period < MIN_PERIOD {
        Err(ValidationError::PeriodTooShort)
    } else if period > MAX_PERIOD {
        Err(ValidationError::PeriodTooLong)
    } else {
        Ok(())
    }
}

pub fn increment_amount(amount: f64) -> f64 {
    (amount + AMOUNT_STEP).min(MAX_AMOUNT)
}

pub fn decrement_amount(amount: f64) -> f64 {
    (amount - AMOUNT_STEP).max(MIN_AMOUNT)
}

pub fn increment_period(period: i32) -> i32 {
    period.saturating_add(PERIOD_STEP).min(MAX_PERIOD)
}

pub fn decrement_period(period: i32) -> i32 {
    period.saturating_sub(PERIOD_STEP).max(MIN_PERIOD)
}

/// Parses free-form numeric input; blank or malformed text reads as zero.
pub fn parse_amount_input(raw: &str) -> f64 {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

pub fn parse_period_input(raw: &str) -> i32 {
    let trimmed = raw.trim();
    trimmed
        .parse::<i32>()
        .ok()
        .or_else(|| {
            trimmed
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .map(|value| value.trunc() as i32)
        })
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_messages_match_the_form_copy() {
        assert_eq!(
            validate_amount(199.0).unwrap_err().to_string(),
            "Minimalna kwota to 200 zł"
        );
        assert_eq!(
            validate_amount(150_001.0).unwrap_err().to_string(),
            "Maksymalna kwota to 150000 zł"
        );
        assert!(validate_amount(200.0).is_ok());
        assert!(validate_amount(150_000.0).is_ok());
    }

    #[test]
    fn period_messages_match_the_form_copy() {
        assert_eq!(
            validate_period(0).unwrap_err().to_string(),
            "Minimalny okres to 1 miesiąc"
        );
        assert_eq!(
            validate_period(61).unwrap_err().to_string(),
            "Maksymalny okres to 60 miesięcy"
        );
        assert!(validate_period(1).is_ok());
        assert!(validate_period(60).is_ok());
    }

    #[test]
    fn steppers_clamp_to_the_form_bounds() {
        assert_eq!(increment_amount(5_000.0), 5_500.0);
        assert_eq!(increment_amount(149_800.0), MAX_AMOUNT);
        assert_eq!(decrement_amount(5_000.0), 4_500.0);
        assert_eq!(decrement_amount(500.0), MIN_AMOUNT);

        assert_eq!(increment_period(12), 13);
        assert_eq!(increment_period(60), 60);
        assert_eq!(decrement_period(1), 1);
        assert_eq!(decrement_period(-4), 1);
    }

    #[test]
    fn raw_input_parsing_is_lenient() {
        assert_eq!(parse_amount_input(" 2500 "), 2_500.0);
        assert_eq!(parse_amount_input("12,5"), 12.5);
        assert_eq!(parse_amount_input("abc"), 0.0);
        assert_eq!(parse_amount_input("-300"), -300.0);
        assert_eq!(parse_period_input("24"), 24);
        assert_eq!(parse_period_input("7.9"), 7);
        assert_eq!(parse_period_input(""), 0);
    }
}
