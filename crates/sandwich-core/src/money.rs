//! # Money Module
//!
//! Fixed-point amounts with two decimal places.
//!
//! - `Money` counts cents.
//! - `Percent` counts hundredths of a percent (`10.00%` is `1000`).
//!
//! Both serialize as decimal strings (`"5.99"`) for human-readable formats
//! and as plain integers for postcard. JSON input may be a number or a string,
//! with at most two fractional digits.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Largest valid `Percent` value (100.00%).
pub const PERCENT_MAX: u32 = 10_000;

// =============================================================================
// FIXED-POINT TEXT
// =============================================================================

/// Parse a decimal string with at most two fractional digits into hundredths.
///
/// Returns `None` for empty input, stray characters, more than two
/// fractional digits, or overflow.
#[must_use]
pub fn parse_hundredths(text: &str) -> Option<i64> {
    let text = text.trim();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    let (whole, frac) = match digits.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (digits, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if frac.len() > 2 || !whole.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let whole: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let frac: i64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().ok()? * 10,
        _ => frac.parse().ok()?,
    };

    let value = whole.checked_mul(100)?.checked_add(frac)?;
    Some(if negative { -value } else { value })
}

/// Format hundredths as a decimal string with exactly two fractional digits.
#[must_use]
pub fn format_hundredths(value: i64) -> String {
    let sign = if value < 0 { "-" } else { "" };
    let abs = value.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

/// Visitor accepting a decimal string or a JSON number.
struct HundredthsVisitor;

impl Visitor<'_> for HundredthsVisitor {
    type Value = i64;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a decimal amount with at most two fractional digits")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
        parse_hundredths(v).ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
        v.checked_mul(100)
            .ok_or_else(|| E::invalid_value(de::Unexpected::Signed(v), &self))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
        i64::try_from(v)
            .ok()
            .and_then(|v| v.checked_mul(100))
            .ok_or_else(|| E::invalid_value(de::Unexpected::Unsigned(v), &self))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
        // Shortest round-trip text keeps "5.99" as typed and exposes extra digits.
        let text = v.to_string();
        parse_hundredths(&text).ok_or_else(|| E::invalid_value(de::Unexpected::Float(v), &self))
    }
}

// =============================================================================
// MONEY
// =============================================================================

/// A non-negative amount of money in cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Zero cents.
    pub const ZERO: Self = Self(0);

    /// Create an amount from cents.
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// The amount in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Multiply by a quantity. `None` on overflow.
    #[must_use]
    pub fn checked_times(self, quantity: u64) -> Option<Self> {
        let quantity = i64::try_from(quantity).ok()?;
        self.0.checked_mul(quantity).map(Self)
    }

    /// Add two amounts. `None` on overflow.
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Sum amounts, or `None` if the total does not fit.
    pub fn checked_sum<I: IntoIterator<Item = Self>>(amounts: I) -> Option<Self> {
        amounts
            .into_iter()
            .try_fold(Self::ZERO, |total, amount| total.checked_add(amount))
    }

    /// Apply a percentage discount, rounding the discount half-up to the cent.
    ///
    /// The result never goes below zero or above the original amount.
    #[must_use]
    pub fn discounted(self, percent: Percent) -> Self {
        if percent.hundredths() == 0 || self.0 <= 0 {
            return self;
        }
        let bps = i128::from(percent.hundredths().min(PERCENT_MAX));
        let cents = i128::from(self.0);
        let discount = (cents * bps + i128::from(PERCENT_MAX / 2)) / i128::from(PERCENT_MAX);
        let total = (cents - discount).max(0);
        Self(i64::try_from(total).unwrap_or(self.0))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_hundredths(self.0))
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&format_hundredths(self.0))
        } else {
            serializer.serialize_i64(self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if !deserializer.is_human_readable() {
            return i64::deserialize(deserializer).map(Self);
        }
        let cents = deserializer.deserialize_any(HundredthsVisitor)?;
        if cents < 0 {
            return Err(de::Error::custom("amount must not be negative"));
        }
        Ok(Self(cents))
    }
}

// =============================================================================
// PERCENT
// =============================================================================

/// A percentage in hundredths of a percent, `0..=100.00`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Percent(u32);

impl Percent {
    /// No discount.
    pub const ZERO: Self = Self(0);

    /// Create a percentage from hundredths, rejecting values above 100%.
    #[must_use]
    pub fn from_hundredths(hundredths: u32) -> Option<Self> {
        (hundredths <= PERCENT_MAX).then_some(Self(hundredths))
    }

    /// Create a whole-number percentage.
    #[must_use]
    pub fn whole(percent: u32) -> Option<Self> {
        Self::from_hundredths(percent.checked_mul(100)?)
    }

    /// The value in hundredths of a percent.
    #[must_use]
    pub const fn hundredths(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_hundredths(i64::from(self.0)))
    }
}

impl Serialize for Percent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&format_hundredths(i64::from(self.0)))
        } else {
            serializer.serialize_u32(self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Percent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if !deserializer.is_human_readable() {
            return u32::deserialize(deserializer).map(Self);
        }
        let hundredths = deserializer.deserialize_any(HundredthsVisitor)?;
        u32::try_from(hundredths)
            .ok()
            .and_then(Self::from_hundredths)
            .ok_or_else(|| de::Error::custom("discount_percent must be between 0 and 100"))
    }
}

// =============================================================================
// TESTS
// =============================================================================
