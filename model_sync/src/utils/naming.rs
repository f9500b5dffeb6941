//! Naming utilities for model_sync
//!
//! This module provides the case transformations that bridge the three naming
//! conventions in play: PascalCase model names, underscore_separated table and
//! column names, and hyphen-separated definition file names.
//!
//! All four functions insert or remove a separator only at a boundary between
//! a lowercase ASCII letter and a following uppercase ASCII letter. Identifiers
//! containing consecutive capitals or leading digits therefore do not round-trip
//! (`"HTTPServer"` becomes `"httpserver"`, which converts back to `"Httpserver"`).
//! Such identifiers are passed through unchanged rather than rejected.

/// Convert a PascalCase model name to its hyphen-separated file stem.
pub fn pascal_to_hyphen(name: &str) -> String {
    separate_words(name, '-')
}

/// Convert a PascalCase model name to its underscore_separated table name.
pub fn pascal_to_underscore(name: &str) -> String {
    separate_words(name, '_')
}

/// Normalize a camelCase column name to underscore_separated form.
pub fn camel_to_underscore(name: &str) -> String {
    separate_words(name, '_')
}

/// Derive a PascalCase model name candidate from an underscore_separated table name.
///
/// An underscore is consumed only when it precedes a lowercase ASCII letter;
/// otherwise it is kept as-is (`"user__account"` becomes `"User_Account"`).
pub fn underscore_to_pascal(name: &str) -> String {
    let mut joined = String::with_capacity(name.len());
    let mut chars = name.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '_' {
            match chars.peek() {
                Some(next) if next.is_ascii_lowercase() => {
                    joined.push(next.to_ascii_uppercase());
                    chars.next();
                }
                _ => joined.push('_'),
            }
        } else {
            joined.push(c);
        }
    }

    let mut chars = joined.chars();
    match chars.next() {
        Some(first) => {
            let mut pascal = String::with_capacity(joined.len());
            pascal.push(first.to_ascii_uppercase());
            pascal.push_str(chars.as_str());
            pascal
        }
        None => joined,
    }
}

/// Insert `separator` between a lowercase letter and a following uppercase
/// letter, then lowercase the whole string.
fn separate_words(name: &str, separator: char) -> String {
    let mut separated = String::with_capacity(name.len() + 4);
    let mut previous_lowercase = false;

    for c in name.chars() {
        if previous_lowercase && c.is_ascii_uppercase() {
            separated.push(separator);
        }
        previous_lowercase = c.is_ascii_lowercase();
        separated.push(c.to_ascii_lowercase());
    }

    separated
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[test]
    fn test_pascal_to_hyphen() {
        assert_eq!(pascal_to_hyphen("UserAccount"), "user-account");
        assert_eq!(pascal_to_hyphen("Order"), "order");
        assert_eq!(pascal_to_hyphen("OrderItemDetail"), "order-item-detail");
    }

    #[test]
    fn test_pascal_to_underscore() {
        assert_eq!(pascal_to_underscore("UserAccount"), "user_account");
        assert_eq!(pascal_to_underscore("Order"), "order");
    }

    #[test]
    fn test_camel_to_underscore() {
        assert_eq!(camel_to_underscore("lastLoginAt"), "last_login_at");
        assert_eq!(camel_to_underscore("email"), "email");
        assert_eq!(camel_to_underscore("user_id"), "user_id");
    }

    #[test]
    fn test_underscore_to_pascal() {
        assert_eq!(underscore_to_pascal("user_account"), "UserAccount");
        assert_eq!(underscore_to_pascal("order"), "Order");
        assert_eq!(underscore_to_pascal(""), "");
    }

    #[rstest]
    #[case("UserAccount")]
    #[case("Order")]
    #[case("OrderItemDetail")]
    #[case("A")]
    fn round_trips_plain_identifiers(#[case] name: &str) {
        assert_eq!(underscore_to_pascal(&pascal_to_underscore(name)), name);
    }

    // Consecutive capitals and digits are known not to round-trip.
    #[rstest]
    #[case("HTTPServer", "httpserver", "Httpserver")]
    #[case("Order2Go", "order2go", "Order2go")]
    fn acronyms_and_digits_do_not_round_trip(
        #[case] name: &str,
        #[case] underscored: &str,
        #[case] back: &str,
    ) {
        assert_eq!(pascal_to_underscore(name), underscored);
        assert_eq!(underscore_to_pascal(underscored), back);
    }

    #[test]
    fn underscore_kept_when_not_followed_by_lowercase() {
        assert_eq!(underscore_to_pascal("user__account"), "User_Account");
        assert_eq!(underscore_to_pascal("order_1"), "Order_1");
    }
}
