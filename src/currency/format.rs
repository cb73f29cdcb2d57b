//! Locale-aware display formatting for amounts and percentages.
//!
//! Amounts are rounded half away from zero to two decimal places and
//! rendered with the grouping and decimal conventions of the currency:
//! Bulgarian lev and euro use comma decimals with space and dot grouping
//! respectively, US dollars use the en-US convention with a prefix sign.

use rust_decimal::{Decimal, RoundingStrategy};

/// Formats an amount for display in the given currency.
///
/// # Example
///
/// ```
/// use salary_engine::currency::format_amount;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let amount = Decimal::from_str("1551.96").unwrap();
/// assert_eq!(format_amount(amount, "BGN"), "1 551,96 лв.");
/// assert_eq!(format_amount(amount, "USD"), "$1,551.96");
/// ```
pub fn format_amount(amount: Decimal, currency: &str) -> String {
    let (negative, int_part, frac_part) = split_rounded(amount);
    let sign = if negative { "-" } else { "" };

    match currency {
        "BGN" => format!("{}{},{} лв.", sign, group_digits(&int_part, ' '), frac_part),
        "EUR" => format!("{}{},{} €", sign, group_digits(&int_part, '.'), frac_part),
        "USD" => format!("{}${}.{}", sign, group_digits(&int_part, ','), frac_part),
        _ => format!(
            "{}{},{} {}",
            sign,
            group_digits(&int_part, ' '),
            frac_part,
            currency
        ),
    }
}

/// Formats an already-scaled percentage with the given number of decimals.
///
/// The value is expected on the 0-100 scale, as the breakdown's ratio
/// fields are.
///
/// # Example
///
/// ```
/// use salary_engine::currency::format_percentage;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let ratio = Decimal::from_str("77.598").unwrap();
/// assert_eq!(format_percentage(ratio, 1), "77.6%");
/// ```
pub fn format_percentage(value: Decimal, decimals: u32) -> String {
    let mut percent =
        value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    percent.rescale(decimals);
    format!("{}%", percent)
}

/// Rounds to two decimals and splits into sign, integer, and fraction.
fn split_rounded(amount: Decimal) -> (bool, String, String) {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();

    let mut scaled = rounded.abs();
    scaled.rescale(2);

    let text = scaled.to_string();
    match text.split_once('.') {
        Some((int_part, frac_part)) => (negative, int_part.to_string(), frac_part.to_string()),
        None => (negative, text, "00".to_string()),
    }
}

/// Groups integer digits in threes with the given separator.
fn group_digits(int_part: &str, separator: char) -> String {
    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(*ch);
    }
    grouped
}
