//! Coin type inference from Move type strings.

use std::sync::LazyLock;

use regex::Regex;

/// Matches the opening of a `Coin<..>` or `Balance<..>` instantiation.
static WRAPPER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|::)(?:coin::Coin|balance::Balance)<").expect("static regex is valid")
});

/// Extracts the coin type wrapped by the first `Coin<T>` or `Balance<T>` in `type_str`.
///
/// Handles wrappers nested in other generics, e.g.
/// `0x2::dynamic_field::Field<0x1::type_name::TypeName, 0x2::balance::Balance<0x2::sui::SUI>>`.
/// Generic arguments of `T` itself are kept intact. Returns the input unchanged when no
/// wrapper is found or the brackets do not balance.
pub fn extract_coin_type(type_str: &str) -> String {
    WRAPPER_RE
        .find(type_str)
        .and_then(|m| generic_argument(&type_str[m.end()..]))
        .map_or_else(|| type_str.to_string(), |inner| inner.trim().to_string())
}

/// Returns the text up to the `>` closing an already opened `<`.
fn generic_argument(rest: &str) -> Option<&str> {
    let mut depth = 0usize;
    for (idx, ch) in rest.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' if depth == 0 => return (idx > 0).then(|| &rest[..idx]),
            '>' => depth -= 1,
            _ => {}
        }
    }
    None
}
