/// Reduce a phone number to its digits.
///
/// Provider addresses arrive as `whatsapp:+1 415-555-0100`; stored numbers use
/// arbitrary punctuation. Comparisons happen on the digit-only form.
///
/// # Examples
///
/// ```
/// use didx_bot::customer_db::normalize_phone;
///
/// assert_eq!(normalize_phone("whatsapp:+1 (415) 555-0100"), "14155550100");
/// assert_eq!(normalize_phone("whatsapp:"), "");
/// ```
pub fn normalize_phone(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}
