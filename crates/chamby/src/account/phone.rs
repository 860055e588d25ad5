/// Strip everything that is not a digit. Storage and comparison always use
/// the cleaned form.
pub fn clean_phone(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Display form for Mexican 10-digit numbers: `55 1234 5678`.
/// Anything that does not clean to exactly 10 digits is returned as given.
pub fn format_phone_display(input: &str) -> String {
    let digits = clean_phone(input);
    if digits.len() != 10 {
        return input.to_string();
    }
    format!("{} {} {}", &digits[0..2], &digits[2..6], &digits[6..10])
}
