//! Number formatting for cards, axis ticks, and labels.

use num_format::{Locale, ToFormattedString};

/// Integer string of `value`, truncated toward zero (`3.9 -> "3"`, `-3.9 -> "-3"`).
///
/// Non-finite inputs are rendered as `NaN`, `inf` or `-inf`.
pub fn float_to_int_string(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let truncated = value.trunc();
    if truncated == 0.0 {
        // avoids "-0" for values in (-1, 0)
        return "0".to_string();
    }
    format!("{:.0}", truncated)
}

/// Like [`float_to_int_string`], with locale thousands separators (`12345.6 -> "12,345"`).
pub fn float_to_int_string_locale(value: f64, locale_tag: &str) -> String {
    if !value.is_finite() || value.abs() >= i64::MAX as f64 {
        return float_to_int_string(value);
    }
    let (locale, _) = map_locale(locale_tag);
    (value.trunc() as i64).to_formatted_string(locale)
}

/// Map a user-provided locale tag to a `num_format::Locale` and its decimal separator char.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> (&'static Locale, char) {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => (&Locale::de, ','),
        "fr" | "fr_fr" => (&Locale::fr, ','),
        "es" | "es_es" => (&Locale::es, ','),
        "it" | "it_it" => (&Locale::it, ','),
        "pt" | "pt_pt" | "pt_br" => (&Locale::pt, ','),
        "nl" | "nl_nl" => (&Locale::nl, ','),
        _ => (&Locale::en, '.'),
    }
}

/// Format a tick value following a `"0.Nf"` tick format, with the locale's decimal separator.
/// Unknown formats fall back to two decimals.
pub fn format_tick(value: f64, tick_format: Option<&str>, decimal_sep: char) -> String {
    let precision = tick_format
        .and_then(|f| f.strip_prefix("0."))
        .and_then(|f| f.strip_suffix('f'))
        .and_then(|p| p.parse::<usize>().ok())
        .unwrap_or(2);
    let s = format!("{:.*}", precision, value);
    if decimal_sep == '.' {
        s
    } else {
        s.replace('.', &decimal_sep.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_instead_of_rounding() {
        assert_eq!(float_to_int_string(3.9), "3");
        assert_eq!(float_to_int_string(3.0), "3");
        assert_eq!(float_to_int_string(-3.9), "-3");
        assert_eq!(float_to_int_string(-0.4), "0");
        assert_eq!(float_to_int_string(1.0e15 + 0.5), "1000000000000000");
    }

    #[test]
    fn non_finite_values() {
        assert_eq!(float_to_int_string(f64::NAN), "NaN");
        assert_eq!(float_to_int_string(f64::INFINITY), "inf");
    }

    #[test]
    fn locale_grouping() {
        assert_eq!(float_to_int_string_locale(12345.9, "en"), "12,345");
        assert_eq!(float_to_int_string_locale(12345.9, "de"), "12.345");
        assert_eq!(float_to_int_string_locale(-999.9, "en"), "-999");
    }

    #[test]
    fn tick_formatting() {
        assert_eq!(format_tick(1.5, Some("0.2f"), '.'), "1.50");
        assert_eq!(format_tick(1.5, Some("0.1f"), ','), "1,5");
        assert_eq!(format_tick(2.0, None, '.'), "2.00");
        assert_eq!(format_tick(2.0, Some("d"), '.'), "2.00");
    }
}
