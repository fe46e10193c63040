/// Reduces a tax document to its ASCII digits.
///
/// Callers supply documents in whatever punctuation their locale uses
/// (`12.345.678/0001-99`, `123.456.789-00`); only the digits are stored.
/// Idempotent: a digits-only input comes back unchanged.
pub fn normalize_document(document: &str) -> String {
    document.chars().filter(char::is_ascii_digit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_punctuation() {
        assert_eq!(normalize_document("123.456.789-00"), "12345678900");
        assert_eq!(normalize_document("12.345.678/0001-99"), "12345678000199");
    }

    #[test]
    fn test_idempotent() {
        let once = normalize_document("123.456.789-00");
        assert_eq!(normalize_document(&once), once);
        assert_eq!(normalize_document("12345678900"), "12345678900");
    }

    #[test]
    fn test_non_digits_only() {
        assert_eq!(normalize_document("abc-/."), "");
    }
}
