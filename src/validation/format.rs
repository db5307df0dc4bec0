//! Input Formatting
//!
//! Helpers applied while the user types, before validation runs.

/// Keep digits and `+`, dropping separators and anything else
pub fn format_phone_number(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Insert `/` separators into a partially typed `DD/MM/YYYY` date
///
/// Non-digits are dropped first. Input with more than eight digits is
/// returned unchanged.
pub fn format_date_input(date: &str) -> String {
    let digits: Vec<char> = date.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() > 8 {
        return date.to_string();
    }

    let mut formatted = String::with_capacity(10);
    for (idx, digit) in digits.iter().enumerate() {
        if idx == 2 || idx == 4 {
            formatted.push('/');
        }
        formatted.push(*digit);
    }
    formatted
}
