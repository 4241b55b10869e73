//! API key helpers: format check and masked display.

/// Basic shape check before saving: at least 20 characters of
/// `[A-Za-z0-9._-]`. The server is the real judge.
pub fn validate_format(key: &str) -> bool {
    let key = key.trim();
    key.len() >= 20
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

/// Masked form for display: a few `*` then the last 4 (or 5 for keys longer
/// than 20) characters.
pub fn mask(key: &str) -> Option<String> {
    let chars: Vec<char> = key.chars().collect();
    if chars.is_empty() {
        return None;
    }
    let visible = if chars.len() > 20 { 5 } else { 4 };
    let visible = visible.min(chars.len());
    let stars = (chars.len() - visible).min(8);
    let tail: String = chars[chars.len() - visible..].iter().collect();
    Some(format!("{}{}", "*".repeat(stars), tail))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_format() {
        assert!(validate_format("abcDEF0123456789.-_x"));
        assert!(validate_format("  abcDEF0123456789.-_x  "));
        assert!(!validate_format("short"));
        assert!(!validate_format("abcDEF0123456789 with space"));
    }

    #[test]
    fn test_mask() {
        assert_eq!(mask("0123456789abcdefghijKLMNO").as_deref(), Some("********KLMNO"));
        assert_eq!(mask("abcdefgh").as_deref(), Some("****efgh"));
        assert_eq!(mask("abc").as_deref(), Some("abc"));
        assert_eq!(mask(""), None);
    }
}
