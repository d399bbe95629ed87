//! Display helpers. Rounding happens here only, never in stored amounts.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::words::AmountInWords;

/// Two decimals with Indian digit grouping: `1234567.891` → `"12,34,567.89"`.
pub fn money(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded.abs());
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    format!("{}{}.{}", sign, group_indian(whole), fraction)
}

/// Last three digits, then groups of two.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = head
        .as_bytes()
        .rchunks(2)
        .rev()
        .filter_map(|c| std::str::from_utf8(c).ok())
        .collect();
    groups.push(tail);
    groups.join(",")
}

/// "Rupees … Only" line for the amount in words. `None` when the amount
/// has no spoken form.
pub fn amount_in_words_legend(words: &AmountInWords) -> Option<String> {
    let spelled = words.spelled()?;
    let spelled = if spelled.is_empty() { "zero" } else { spelled };
    Some(format!("Rupees {} Only", spelled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn money_groups_lakhs_and_crores() {
        assert_eq!(money(dec!(0)), "0.00");
        assert_eq!(money(dec!(999)), "999.00");
        assert_eq!(money(dec!(1000)), "1,000.00");
        assert_eq!(money(dec!(1234567.891)), "12,34,567.89");
        assert_eq!(money(dec!(123456789)), "12,34,56,789.00");
    }

    #[test]
    fn money_rounds_half_away_from_zero() {
        assert_eq!(money(dec!(306.805)), "306.81");
        assert_eq!(money(dec!(-40.005)), "-40.01");
    }

    #[test]
    fn legend_wraps_spelled_words() {
        let words = AmountInWords::Spelled("three hundred and six".to_string());
        assert_eq!(
            amount_in_words_legend(&words).as_deref(),
            Some("Rupees three hundred and six Only")
        );
        assert_eq!(
            amount_in_words_legend(&AmountInWords::Spelled(String::new())).as_deref(),
            Some("Rupees zero Only")
        );
        assert_eq!(amount_in_words_legend(&AmountInWords::Overflow), None);
    }
}
