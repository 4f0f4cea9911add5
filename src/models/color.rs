//! Hex color normalization for color-like placeholder values.
//!
//! Values bound to placeholders whose name suggests a color (e.g. `brandColor`,
//! `bannerBg`) are canonicalized to `#RRGGBB` / `#RGB` uppercase form when
//! they look like hex digits. Anything else is passed through untouched.

/// Case-insensitive key fragments that mark a placeholder as color-like.
const COLOR_KEY_HINTS: [&str; 7] = [
    "color",
    "colour",
    "bg",
    "background",
    "brand",
    "ctacolor",
    "bannerbg",
];

/// Returns true if the placeholder key names a color-like value.
///
/// # Examples
///
/// ```
/// use mailforge::models::color::is_color_key;
///
/// assert!(is_color_key("brandColor"));
/// assert!(is_color_key("bannerBg"));
/// assert!(!is_color_key("title"));
/// ```
#[must_use]
pub fn is_color_key(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    COLOR_KEY_HINTS.iter().any(|hint| key.contains(hint))
}

/// Normalizes a value if its key is color-like and the value is a hex color.
///
/// After trimming and stripping one optional leading `#`, a value of exactly
/// 3 or 6 hex digits becomes `#` followed by the uppercased digits. Every other
/// value, including malformed hex and empty strings, is returned unchanged.
/// The transformation is idempotent.
///
/// # Examples
///
/// ```
/// use mailforge::models::color::normalize_hex_if_color;
///
/// assert_eq!(normalize_hex_if_color("bgColor", "abc"), "#ABC");
/// assert_eq!(normalize_hex_if_color("bgColor", "#abc123"), "#ABC123");
/// assert_eq!(normalize_hex_if_color("bgColor", "notahex"), "notahex");
/// assert_eq!(normalize_hex_if_color("title", "fff"), "fff");
/// ```
#[must_use]
pub fn normalize_hex_if_color(key: &str, value: &str) -> String {
    if value.is_empty() || !is_color_key(key) {
        return value.to_string();
    }

    let trimmed = value.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

    if is_hex_digits(digits) {
        format!("#{}", digits.to_ascii_uppercase())
    } else {
        value.to_string()
    }
}

/// Checks for exactly 3 or 6 ASCII hex digits.
fn is_hex_digits(s: &str) -> bool {
    matches!(s.len(), 3 | 6) && s.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_key_detection() {
        assert!(is_color_key("ctaColor"));
        assert!(is_color_key("mediaCtaColor"));
        assert!(is_color_key("headerColour"));
        assert!(is_color_key("BACKGROUND"));
        assert!(is_color_key("brandHomeUrl"));
        assert!(!is_color_key("heroImageUrl"));
        assert!(!is_color_key(""));
    }

    #[test]
    fn test_normalize_short_and_long_hex() {
        assert_eq!(normalize_hex_if_color("bgColor", "abc"), "#ABC");
        assert_eq!(normalize_hex_if_color("bgColor", "#abc123"), "#ABC123");
        assert_eq!(normalize_hex_if_color("bannerBg", "1a2B3c"), "#1A2B3C");
    }

    #[test]
    fn test_normalize_trims_surrounding_whitespace() {
        assert_eq!(normalize_hex_if_color("brandColor", "  #ff0000 "), "#FF0000");
    }

    #[test]
    fn test_normalize_passes_through_invalid() {
        assert_eq!(normalize_hex_if_color("bgColor", "notahex"), "notahex");
        assert_eq!(normalize_hex_if_color("bgColor", "#abcd"), "#abcd");
        assert_eq!(normalize_hex_if_color("bgColor", "##abc"), "##abc");
        assert_eq!(normalize_hex_if_color("bgColor", "rgb(0,0,0)"), "rgb(0,0,0)");
        assert_eq!(normalize_hex_if_color("bgColor", ""), "");
        // Whitespace-only stays as-is, no trimming unless it normalizes
        assert_eq!(normalize_hex_if_color("bgColor", "   "), "   ");
    }

    #[test]
    fn test_normalize_ignores_non_color_keys() {
        assert_eq!(normalize_hex_if_color("title", "fff"), "fff");
        assert_eq!(normalize_hex_if_color("heroAlt", "#abc"), "#abc");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let cases = [
            ("bgColor", "abc"),
            ("bgColor", "#abc123"),
            ("bgColor", " fFf "),
            ("bgColor", "notahex"),
            ("brand", "#12"),
            ("title", "fff"),
            ("ctaColor", ""),
        ];
        for (key, value) in cases {
            let once = normalize_hex_if_color(key, value);
            let twice = normalize_hex_if_color(key, &once);
            assert_eq!(once, twice, "not idempotent for {key}={value:?}");
        }
    }
}
