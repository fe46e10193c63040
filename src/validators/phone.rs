/// Strips whitespace and the characters `(` `)` `-` `.` from a phone number.
///
/// Callers are expected to supply something close to E.164 already; this
/// removes common grouping punctuation and nothing else. A leading `+` and
/// the digits pass through untouched.
pub fn normalize_phone(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '(' | ')' | '-' | '.'))
        .collect()
}
