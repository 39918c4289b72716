//! Display formatting for card fields.

pub const UNKNOWN: &str = "Unknown";

/// Crawl excerpts keep this many characters before the ellipsis.
pub const CRAWL_EXCERPT_CHARS: usize = 150;

const ROMAN: [&str; 10] = ["", "I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX"];

/// Abbreviate large counts (population, credits): `1.2B`, `200.0K`.
///
/// Absent or zero is "Unknown". Below one thousand the plain number is shown.
pub fn abbreviate(value: Option<f64>) -> String {
    let v = match value {
        Some(v) if v != 0.0 && v.is_finite() => v,
        _ => return UNKNOWN.to_string(),
    };
    const STEPS: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];
    for (threshold, suffix) in STEPS {
        if v >= threshold {
            return format!("{:.1}{suffix}", v / threshold);
        }
    }
    number(v)
}

/// Whole numbers without a fractional part, others as-is: `172`, `1.5`.
pub fn number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

/// Integer part grouped by thousands: `10,465`, `1,600.5`.
pub fn group_thousands(v: f64) -> String {
    let plain = number(v.abs());
    let (int_part, frac_part) = match plain.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (plain.as_str(), None),
    };
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if v < 0.0 { "-" } else { "" };
    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// `Episode IV`; numbers outside I..IX are shown as digits.
pub fn episode_label(episode: Option<i64>) -> String {
    match episode {
        Some(n) if (1..=9).contains(&n) => format!("Episode {}", ROMAN[n as usize]),
        Some(n) => format!("Episode {n}"),
        None => format!("Episode {UNKNOWN}"),
    }
}

/// First 150 characters of the opening crawl plus `...`.
///
/// Text of 150 characters or fewer is returned unchanged, without an ellipsis.
/// Counting is by `char`, never splitting a code point.
pub fn truncate_crawl(crawl: Option<&str>) -> String {
    let Some(text) = crawl.filter(|t| !t.is_empty()) else {
        return String::new();
    };
    if text.chars().count() <= CRAWL_EXCERPT_CHARS {
        return text.to_string();
    }
    let mut out: String = text.chars().take(CRAWL_EXCERPT_CHARS).collect();
    out.push_str("...");
    out
}

/// Year part of an ISO date (`1977-05-25` -> `1977`).
pub fn release_year(date: Option<&str>) -> String {
    date.and_then(|d| d.split('-').next())
        .filter(|y| !y.is_empty())
        .unwrap_or(UNKNOWN)
        .to_string()
}

/// `value + unit` when present and non-zero, else "Unknown".
pub fn with_unit(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) if v != 0.0 => format!("{}{unit}", number(v)),
        _ => UNKNOWN.to_string(),
    }
}

/// Non-empty text, else "Unknown".
pub fn or_unknown(value: Option<&str>) -> String {
    value
        .filter(|s| !s.is_empty())
        .unwrap_or(UNKNOWN)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abbreviation_picks_largest_suffix() {
        assert_eq!(abbreviate(Some(2_000_000_000_000.0)), "2.0T");
        assert_eq!(abbreviate(Some(1_000_000_000.0)), "1.0B");
        assert_eq!(abbreviate(Some(4_500_000_000.0)), "4.5B");
        assert_eq!(abbreviate(Some(200_000.0)), "200.0K");
        assert_eq!(abbreviate(Some(1_000.0)), "1.0K");
        assert_eq!(abbreviate(Some(30_000_000.0)), "30.0M");
    }

    #[test]
    fn abbreviation_small_and_missing() {
        assert_eq!(abbreviate(Some(999.0)), "999");
        assert_eq!(abbreviate(Some(12.5)), "12.5");
        assert_eq!(abbreviate(Some(0.0)), "Unknown");
        assert_eq!(abbreviate(None), "Unknown");
    }

    #[test]
    fn crawl_is_cut_at_150_chars() {
        let long = "a".repeat(151);
        let out = truncate_crawl(Some(&long));
        assert_eq!(out, format!("{}...", "a".repeat(150)));

        let exact = "b".repeat(150);
        assert_eq!(truncate_crawl(Some(&exact)), exact);
        assert_eq!(truncate_crawl(Some("short")), "short");
        assert_eq!(truncate_crawl(None), "");
    }

    #[test]
    fn crawl_counts_characters_not_bytes() {
        let long = "é".repeat(200);
        let out = truncate_crawl(Some(&long));
        assert_eq!(out.chars().count(), 153);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn episodes_use_roman_numerals() {
        assert_eq!(episode_label(Some(4)), "Episode IV");
        assert_eq!(episode_label(Some(9)), "Episode IX");
        assert_eq!(episode_label(Some(12)), "Episode 12");
        assert_eq!(episode_label(None), "Episode Unknown");
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(10465.0), "10,465");
        assert_eq!(group_thousands(120000.0), "120,000");
        assert_eq!(group_thousands(999.0), "999");
        assert_eq!(group_thousands(1600.5), "1,600.5");
        assert_eq!(group_thousands(34.37), "34.37");
    }

    #[test]
    fn small_helpers() {
        assert_eq!(release_year(Some("1977-05-25")), "1977");
        assert_eq!(release_year(None), "Unknown");
        assert_eq!(with_unit(Some(172.0), "cm"), "172cm");
        assert_eq!(with_unit(Some(0.0), "cm"), "Unknown");
        assert_eq!(or_unknown(Some("")), "Unknown");
        assert_eq!(or_unknown(Some("19BBY")), "19BBY");
    }
}
