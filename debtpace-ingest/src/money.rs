//! Lenient money parsing for hand-edited CSVs.

use regex::Regex;
use std::sync::LazyLock;

// Optional sign, optional dollar sign, digits with optional thousands commas.
static MONEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<neg>-)?\s*\$?\s*(?P<num>\d{1,3}(?:,\d{3})+(?:\.\d+)?|\d+(?:\.\d+)?|\.\d+)$")
        .expect("valid money pattern")
});

/// Parse `"$1,234.50"`, `"1234.5"` or `".5"` into a non-negative amount.
///
/// Blank, malformed, non-finite and negative inputs all read as 0.
pub fn parse_money(raw: &str) -> f64 {
    let trimmed = raw.trim();
    let Some(caps) = MONEY_RE.captures(trimmed) else {
        if !trimmed.is_empty() {
            tracing::debug!(value = trimmed, "unparseable money value, using 0");
        }
        return 0.0;
    };

    if caps.name("neg").is_some() {
        return 0.0;
    }

    caps["num"]
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Like [`parse_money`], but blank input stays `None`.
pub fn parse_optional_money(raw: &str) -> Option<f64> {
    if raw.trim().is_empty() {
        None
    } else {
        Some(parse_money(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_money_formats() {
        assert_eq!(parse_money("$1,234.50"), 1234.5);
        assert_eq!(parse_money("1234.5"), 1234.5);
        assert_eq!(parse_money("  $ 40 "), 40.0);
        assert_eq!(parse_money(".5"), 0.5);
        assert_eq!(parse_money("12,000"), 12000.0);
    }

    #[test]
    fn test_parse_money_rejects_to_zero() {
        assert_eq!(parse_money(""), 0.0);
        assert_eq!(parse_money("abc"), 0.0);
        assert_eq!(parse_money("-50"), 0.0);
        assert_eq!(parse_money("-$1,000.00"), 0.0);
        assert_eq!(parse_money("1,23"), 0.0);
        assert_eq!(parse_money("NaN"), 0.0);
    }

    #[test]
    fn test_parse_optional_money() {
        assert_eq!(parse_optional_money("  "), None);
        assert_eq!(parse_optional_money("25"), Some(25.0));
        assert_eq!(parse_optional_money("oops"), Some(0.0));
    }
}
