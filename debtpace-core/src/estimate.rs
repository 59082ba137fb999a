//! Finite-or-never result values.
//!
//! A payoff that never happens is a first-class result, not an error and not
//! `f64::INFINITY`. Keeping it as its own variant means sums and comparisons
//! cannot quietly turn into `NaN`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Either a finite value or "never at this payment".
///
/// Variant order matters: the derived ordering puts every `Finite` value below
/// `Never`, so `Estimate<u32>` compares the way months-to-payoff should.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Estimate<T> {
    Finite(T),
    Never,
}

impl<T> Estimate<T> {
    pub fn is_finite(&self) -> bool {
        matches!(self, Estimate::Finite(_))
    }

    pub fn is_never(&self) -> bool {
        matches!(self, Estimate::Never)
    }

    /// The finite value, if any.
    pub fn finite(self) -> Option<T> {
        match self {
            Estimate::Finite(v) => Some(v),
            Estimate::Never => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Estimate<U> {
        match self {
            Estimate::Finite(v) => Estimate::Finite(f(v)),
            Estimate::Never => Estimate::Never,
        }
    }

    pub fn unwrap_or(self, default: T) -> T {
        self.finite().unwrap_or(default)
    }
}

impl<T> From<Option<T>> for Estimate<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Estimate::Finite(v),
            None => Estimate::Never,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Estimate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Estimate::Finite(v) => v.fmt(f),
            Estimate::Never => write!(f, "never"),
        }
    }
}

const NEVER: &str = "never";

impl<T: Serialize> Serialize for Estimate<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Estimate::Finite(v) => v.serialize(serializer),
            Estimate::Never => serializer.serialize_str(NEVER),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Repr<T> {
    Value(T),
    Text(String),
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Estimate<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Repr::<T>::deserialize(deserializer)? {
            Repr::Value(v) => Ok(Estimate::Finite(v)),
            Repr::Text(s) if s.eq_ignore_ascii_case(NEVER) => Ok(Estimate::Never),
            Repr::Text(s) => Err(serde::de::Error::custom(format!(
                "expected a number or \"never\", got \"{s}\""
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finite_sorts_below_never() {
        assert!(Estimate::Finite(1200u32) < Estimate::Never);
        assert!(Estimate::Finite(3u32) < Estimate::Finite(4u32));
        assert_eq!(
            [Estimate::Never, Estimate::Finite(2u32)].iter().max(),
            Some(&Estimate::Never)
        );
    }

    #[test]
    fn test_serde_shape() {
        let months: Estimate<u32> = Estimate::Finite(26);
        assert_eq!(serde_json::to_string(&months).unwrap(), "26");
        let never: Estimate<f64> = Estimate::Never;
        assert_eq!(serde_json::to_string(&never).unwrap(), "\"never\"");

        let back: Estimate<f64> = serde_json::from_str("\"never\"").unwrap();
        assert!(back.is_never());
        let back: Estimate<f64> = serde_json::from_str("12.5").unwrap();
        assert_eq!(back, Estimate::Finite(12.5));
        assert!(serde_json::from_str::<Estimate<f64>>("\"soon\"").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Estimate::Finite(7u32).to_string(), "7");
        assert_eq!(Estimate::<u32>::Never.to_string(), "never");
    }
}
