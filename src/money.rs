// 💵 Money - Fixed-point amounts
// Receipt totals and item prices are held as whole cents so every
// modulo/ceiling check in the scoring rules is exact integer math.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// PARSE ERROR
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyParseError {
    #[error("amount is empty")]
    Empty,

    #[error("amount '{0}' is not a plain decimal number")]
    InvalidFormat(String),

    #[error("amount '{0}' has more than two decimal places")]
    TooPrecise(String),

    #[error("amount '{0}' is too large")]
    Overflow(String),
}

// ============================================================================
// CENTS
// ============================================================================

/// Non-negative monetary amount in hundredths of the currency unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Cents(u64);

impl Cents {
    pub const ZERO: Cents = Cents(0);

    pub const fn new(cents: u64) -> Self {
        Cents(cents)
    }

    /// Whole units, cents discarded
    pub const fn whole(self) -> u64 {
        self.0 / 100
    }

    /// Fractional part, 0..=99
    pub const fn fraction(self) -> u64 {
        self.0 % 100
    }

    pub const fn is_whole(self) -> bool {
        self.fraction() == 0
    }

    /// True when the amount divides evenly into `step` cents.
    pub const fn is_multiple_of(self, step: u64) -> bool {
        step != 0 && self.0 % step == 0
    }

    /// Multiply by `numerator / denominator` and round up to a whole unit.
    ///
    /// `ceil_ratio(1, 5)` on 12.25 gives 3 (2.45 rounded up).
    pub fn ceil_ratio(self, numerator: u64, denominator: u64) -> u64 {
        let scaled = self.0 as u128 * numerator as u128;
        let divisor = denominator as u128 * 100;
        if divisor == 0 {
            return 0;
        }
        scaled.div_ceil(divisor) as u64
    }
}

impl FromStr for Cents {
    type Err = MoneyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        let (whole, fraction) = match s.split_once('.') {
            Some((w, f)) => (w, f),
            None => (s, ""),
        };

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());

        if whole.is_empty() || !all_digits(whole) || !all_digits(fraction) {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }
        if s.contains('.') && fraction.is_empty() {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }
        if fraction.len() > 2 {
            return Err(MoneyParseError::TooPrecise(s.to_string()));
        }

        let units: u64 = whole
            .parse()
            .map_err(|_| MoneyParseError::Overflow(s.to_string()))?;

        // "3.5" means 50 cents, not 5
        let cents: u64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<u64>().unwrap_or(0) * 10,
            _ => fraction.parse::<u64>().unwrap_or(0),
        };

        units
            .checked_mul(100)
            .and_then(|v| v.checked_add(cents))
            .map(Cents)
            .ok_or_else(|| MoneyParseError::Overflow(s.to_string()))
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.whole(), self.fraction())
    }
}

// Amounts travel as JSON strings ("35.35") to keep their exact value.
impl Serialize for Cents {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Cents {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// TESTS
// ============================================================================
