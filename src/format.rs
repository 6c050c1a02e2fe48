// 🔢 Display formatting for the dashboard and the assistant
// Percentages to 1 decimal; AOA amounts to 2 decimals with
// comma thousands separators.

/// Currency label appended to monetary figures
pub const CURRENCY: &str = "AOA";

/// Format a percentage to one decimal place (no sign, no suffix)
pub fn percent(value: f64) -> String {
    format!("{:.1}", value)
}

/// Format a monetary amount to two decimals with thousands separators.
/// `1234567.891` becomes `"1,234,567.89"`.
pub fn amount(value: f64) -> String {
    let fixed = format!("{:.2}", value);

    let (sign, rest) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };

    // "{:.2}" always yields one '.' for finite values
    let (int_part, frac_part) = match rest.split_once('.') {
        Some(parts) => parts,
        None => (rest, "00"),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    let digits: Vec<char> = int_part.chars().collect();
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit);
    }

    format!("{}{}.{}", sign, grouped, frac_part)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_one_decimal() {
        assert_eq!(percent(98.456), "98.5");
        assert_eq!(percent(5.0), "5.0");
        assert_eq!(percent(-0.25), "-0.2");
    }

    #[test]
    fn test_amount_groups_thousands() {
        assert_eq!(amount(1_234_567.891), "1,234,567.89");
        assert_eq!(amount(1_000.0), "1,000.00");
        assert_eq!(amount(999.5), "999.50");
    }

    #[test]
    fn test_amount_small_values() {
        assert_eq!(amount(0.0), "0.00");
        assert_eq!(amount(12.3), "12.30");
    }

    #[test]
    fn test_amount_negative() {
        assert_eq!(amount(-1_234.5), "-1,234.50");
    }

    #[test]
    fn test_amount_rounding_carries_into_grouping() {
        assert_eq!(amount(999_999.999), "1,000,000.00");
    }
}
