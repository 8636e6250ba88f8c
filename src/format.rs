//! Human readable amounts.

use num_bigint::{BigInt, Sign};

/// Renders an integer amount with `decimals` fractional digits, e.g. `1500000000` with 9
/// decimals becomes `1.5`. Trailing fractional zeros are trimmed. Returns `None` when
/// `amount` is not an integer.
pub fn format_amount(amount: &str, decimals: u8) -> Option<String> {
    let value = parse_integer(amount)?;
    let digits = value.magnitude().to_string();
    let decimals = usize::from(decimals);

    let (int_part, frac_part) = if digits.len() > decimals {
        let split = digits.len() - decimals;
        (digits[..split].to_string(), digits[split..].to_string())
    } else {
        ("0".to_string(), format!("{digits:0>decimals$}"))
    };

    let frac_part = frac_part.trim_end_matches('0');
    let sign = if value.sign() == Sign::Minus { "-" } else { "" };

    Some(if frac_part.is_empty() {
        format!("{sign}{int_part}")
    } else {
        format!("{sign}{int_part}.{frac_part}")
    })
}

/// Parses a base 10 integer with an optional leading `-`. Digit separators and `+` are
/// rejected.
pub(crate) fn parse_integer(text: &str) -> Option<BigInt> {
    let text = text.trim();
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}
