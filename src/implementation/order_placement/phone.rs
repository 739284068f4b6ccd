//! Phone number normalization for POS customer lookup.
//!
//! Customer rows have accumulated phone numbers in several formats over
//! time (bare digits, hyphenated, parenthesized, country-prefixed).
//! Lookups canonicalize the query and search every format a legacy row
//! might carry; matched rows are rewritten to the canonical form.

/// Canonicalizes a phone number to bare digits.
///
/// NANP numbers stored with a leading country code collapse to ten
/// digits; anything else keeps its digits as-is.
#[must_use]
pub fn format_phone_number(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.len() == 11 && digits.starts_with('1') {
        digits[1..].to_string()
    } else {
        digits
    }
}

/// Every stored format a number might appear under.
///
/// The canonical digits come first so exact matches win.
#[must_use]
pub fn phone_variations(raw: &str) -> Vec<String> {
    let canonical = format_phone_number(raw);
    let mut variations = vec![canonical.clone()];

    if canonical.len() == 10 {
        let (area, rest) = canonical.split_at(3);
        let (mid, last) = rest.split_at(3);
        variations.push(format!("1{}", canonical));
        variations.push(format!("+1{}", canonical));
        variations.push(format!("{}-{}-{}", area, mid, last));
        variations.push(format!("({}) {}-{}", area, mid, last));
    }

    let trimmed = raw.trim().to_string();
    if !trimmed.is_empty() && !variations.contains(&trimmed) {
        variations.push(trimmed);
    }
    variations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_strips_punctuation() {
        assert_eq!(format_phone_number("(416) 555-1234"), "4165551234");
    }

    #[test]
    fn test_format_drops_nanp_country_code() {
        assert_eq!(format_phone_number("+1 416 555 1234"), "4165551234");
        assert_eq!(format_phone_number("14165551234"), "4165551234");
    }

    #[test]
    fn test_format_keeps_other_lengths() {
        assert_eq!(format_phone_number("555-1234"), "5551234");
    }

    #[test]
    fn test_variations_cover_legacy_formats() {
        let variations = phone_variations("416-555-1234");

        assert!(variations.contains(&"4165551234".to_string()));
        assert!(variations.contains(&"14165551234".to_string()));
        assert!(variations.contains(&"+14165551234".to_string()));
        assert!(variations.contains(&"416-555-1234".to_string()));
        assert!(variations.contains(&"(416) 555-1234".to_string()));
    }

    #[test]
    fn test_variations_keep_unrecognized_input() {
        let variations = phone_variations("555-1234");
        assert!(variations.contains(&"5551234".to_string()));
        assert!(variations.contains(&"555-1234".to_string()));
    }
}
