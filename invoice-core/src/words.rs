use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::warn;

/// Text shown in place of words when an amount has too many digits.
pub const OVERFLOW_MARKER: &str = "overflow";

/// Largest amount with a spoken form (nine integer digits).
pub const MAX_SPOKEN: u64 = 999_999_999;

const UNITS: [&str; 20] = [
    "", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen",
    "eighteen", "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

/// Result of converting an amount to words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountInWords {
    /// Lowercase words without a currency name. Empty for zero.
    Spelled(String),
    /// The integer part has more than nine digits.
    Overflow,
    /// Negative amounts have no spoken form.
    Negative,
}

impl AmountInWords {
    /// The spelled words, or `None` for the overflow and negative markers.
    pub fn spelled(&self) -> Option<&str> {
        match self {
            AmountInWords::Spelled(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_overflow(&self) -> bool {
        matches!(self, AmountInWords::Overflow)
    }

    pub fn as_str(&self) -> &str {
        match self {
            AmountInWords::Spelled(s) => s,
            AmountInWords::Overflow => OVERFLOW_MARKER,
            AmountInWords::Negative => "",
        }
    }
}

impl fmt::Display for AmountInWords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Convert a monetary amount to words on the Indian scale.
///
/// The fractional part is dropped (floor) before conversion, so
/// `306.8` reads as "three hundred and six".
pub fn to_words(amount: Decimal) -> AmountInWords {
    let whole = amount.floor();
    if whole < Decimal::ZERO {
        return AmountInWords::Negative;
    }
    match whole.to_u64() {
        Some(n) => spell(n),
        None => {
            warn!(%amount, "amount too large to spell");
            AmountInWords::Overflow
        }
    }
}

/// Spell a whole number on the Indian scale.
///
/// The number is read as nine zero-padded digits split into crore (2),
/// lakh (2), thousand (2), hundred (1) and a final two-digit group. The
/// final group gets a leading "and" only when a higher group was spoken.
pub fn spell(n: u64) -> AmountInWords {
    if n > MAX_SPOKEN {
        warn!(amount = n, "amount too large to spell");
        return AmountInWords::Overflow;
    }

    let scaled = [
        (n / 10_000_000, "crore"),
        ((n / 100_000) % 100, "lakh"),
        ((n / 1_000) % 100, "thousand"),
        ((n / 100) % 10, "hundred"),
    ];
    let rest = n % 100;

    let mut words: Vec<&'static str> = Vec::new();
    for (group, scale) in scaled {
        if group != 0 {
            push_group(&mut words, group as usize);
            words.push(scale);
        }
    }
    if rest != 0 {
        if !words.is_empty() {
            words.push("and");
        }
        push_group(&mut words, rest as usize);
    }

    AmountInWords::Spelled(words.join(" "))
}

/// Push the words for a group value in 1..=99.
fn push_group(words: &mut Vec<&'static str>, group: usize) {
    if group < 20 {
        words.push(UNITS[group]);
    } else {
        words.push(TENS[group / 10]);
        if group % 10 != 0 {
            words.push(UNITS[group % 10]);
        }
    }
}
