//! KPI number formatting.

/// Format a metric for display: billions and millions are shortened to one
/// decimal with a unit suffix, everything else is two decimals with comma
/// thousands separators. Total over all finite inputs; negatives take the
/// plain-number branch.
pub fn format_number(value: f64) -> String {
    if value >= 1_000_000_000.0 {
        format!("{:.1} B", value / 1_000_000_000.0)
    } else if value >= 1_000_000.0 {
        format!("{:.1} M", value / 1_000_000.0)
    } else {
        group_thousands(value)
    }
}

/// Fixed two-decimal rendering with comma-grouped integer digits,
/// e.g. `12345.678` → `"12,345.68"`.
fn group_thousands(value: f64) -> String {
    let fixed = format!("{value:.2}");
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}{grouped}.{frac_part}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_numbers_get_two_decimals() {
        assert_eq!(format_number(999.0), "999.00");
        assert_eq!(format_number(0.0), "0.00");
        assert_eq!(format_number(23.125), "23.13");
    }

    #[test]
    fn thousands_are_comma_grouped() {
        assert_eq!(format_number(1_234.5), "1,234.50");
        assert_eq!(format_number(987_654.321), "987,654.32");
    }

    #[test]
    fn millions_and_billions_are_shortened() {
        assert_eq!(format_number(1_500_000.0), "1.5 M");
        assert_eq!(format_number(2_300_000_000.0), "2.3 B");
        assert_eq!(format_number(999_999.0), "999,999.00");
    }

    #[test]
    fn negatives_take_the_plain_branch() {
        assert_eq!(format_number(-1_500_000.0), "-1,500,000.00");
        assert_eq!(format_number(-999.5), "-999.50");
    }
}
