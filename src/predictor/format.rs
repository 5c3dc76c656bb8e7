/// Two decimals with comma thousands separators, e.g. `1234567.891` → `"1,234,567.89"`.
/// Non-finite values render as `inf`, `-inf`, or `nan`.
pub fn format_price(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let fixed = format!("{:.2}", v.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // Negative values that round to zero keep their sign: -0.001 → "-0.00".
    let sign = if v.is_sign_negative() { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_price(0.0), "0.00");
        assert_eq!(format_price(999.0), "999.00");
        assert_eq!(format_price(1000.0), "1,000.00");
        assert_eq!(format_price(123456.0), "123,456.00");
        assert_eq!(format_price(1234567.891), "1,234,567.89");
    }

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(format_price(2.345678), "2.35");
        assert_eq!(format_price(9999.999), "10,000.00");
    }

    #[test]
    fn negative_values_keep_sign() {
        assert_eq!(format_price(-1234.5), "-1,234.50");
        assert_eq!(format_price(-0.001), "-0.00");
        assert_eq!(format_price(-0.0), "-0.00");
    }

    #[test]
    fn non_finite() {
        assert_eq!(format_price(f64::INFINITY), "inf");
        assert_eq!(format_price(f64::NEG_INFINITY), "-inf");
        assert_eq!(format_price(f64::NAN), "nan");
    }
}
