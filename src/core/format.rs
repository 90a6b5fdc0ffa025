const ILLEGAL_FILENAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*', ' '];

/// Formats an amount as Indonesian Rupiah: `.` groups thousands, `,`
/// separates the two decimals of fractional amounts. Zero renders as an
/// empty string so that unused financial rows stay blank.
pub fn format_currency(amount: f64) -> String {
    if amount == 0.0 {
        return String::new();
    }
    if !amount.is_finite() {
        return format!("Rp {}", amount);
    }

    if amount.fract() == 0.0 {
        return format!("Rp {}", group_thousands(&format!("{:.0}", amount), '.'));
    }

    let fixed = format!("{:.2}", amount);
    let (int_part, decimals) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("Rp {},{}", group_thousands(int_part, '.'), decimals)
}

/// Quantity column text: integral values without a decimal part,
/// fractional values in their shortest natural form.
pub fn format_quantity(quantity: f64) -> String {
    if quantity.is_finite() && quantity.fract() == 0.0 {
        // `{:.0}` turns -0.0 into "-0"
        if quantity == 0.0 {
            return "0".to_string();
        }
        return format!("{:.0}", quantity);
    }
    quantity.to_string()
}

/// Replaces characters that are not allowed in file names, and spaces, with
/// underscores.
pub fn sanitize_filename(name: &str) -> String {
    name.replace(ILLEGAL_FILENAME_CHARS, "_")
}

/// Keeps a caller-supplied value to a single path segment.
pub fn strip_path_separators(segment: &str) -> String {
    segment.replace(['/', '\\'], "_")
}

fn group_thousands(digits: &str, separator: char) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    format!("{}{}", sign, grouped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_separators_are_replaced() {
        assert_eq!(strip_path_separators("x/../../escaped"), "x_.._.._escaped");
        assert_eq!(strip_path_separators(r"..\win"), ".._win");
        assert_eq!(strip_path_separators("2024 05"), "2024 05");
    }

    #[test]
    fn test_zero_is_suppressed() {
        assert_eq!(format_currency(0.0), "");
        assert_eq!(format_currency(-0.0), "");
    }

    #[test]
    fn test_integral_amounts_have_no_decimals() {
        assert_eq!(format_currency(1_000_000.0), "Rp 1.000.000");
        assert_eq!(format_currency(100.0), "Rp 100");
        assert_eq!(format_currency(1000.0), "Rp 1.000");
        assert_eq!(format_currency(-25_000.0), "Rp -25.000");
    }

    #[test]
    fn test_fractional_amounts_use_comma_decimals() {
        assert_eq!(format_currency(1234.5), "Rp 1.234,50");
        assert_eq!(format_currency(0.75), "Rp 0,75");
        assert_eq!(format_currency(1_234_567.891), "Rp 1.234.567,89");
        assert_eq!(format_currency(-1500.25), "Rp -1.500,25");
    }

    #[test]
    fn test_fractional_amounts_always_have_two_decimals() {
        for amount in [0.1, 12.3, 999.99, 1_000_000.5, 42.005] {
            let text = format_currency(amount);
            let (_, decimals) = text.rsplit_once(',').unwrap();
            assert_eq!(decimals.len(), 2, "{}", text);
        }
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(1.0), "1");
        assert_eq!(format_quantity(12.0), "12");
        assert_eq!(format_quantity(1.5), "1.5");
        assert_eq!(format_quantity(0.25), "0.25");
        assert_eq!(format_quantity(-0.0), "0");
        assert_eq!(format_quantity(1e-5), "0.00001");
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("Acme Corp"), "Acme_Corp");
        assert_eq!(sanitize_filename(r#"a<b>c:d"e/f\g|h?i*j"#), "a_b_c_d_e_f_g_h_i_j");
        assert_eq!(sanitize_filename("PT. Maju"), "PT._Maju");
    }

    #[test]
    fn test_sanitized_names_have_no_illegal_characters() {
        let sanitized = sanitize_filename(r#" <>:"/\|?* mixed name "#);
        assert!(!sanitized.chars().any(|c| r#"<>:"/\|?* "#.contains(c)));
    }
}
