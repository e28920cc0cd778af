//! Fixed-point money representation.
//!
//! Amounts are stored as signed piasters (1 EGP = 100 piasters), so ledger
//! arithmetic never accumulates floating-point drift: `0.10 + 0.20` is
//! exactly `0.30`, not `0.30000000000000004`. Multiplicative operations
//! round half-away-from-zero to whole piasters immediately, before the
//! result participates in any further arithmetic.
//!
//! Malformed numeric input (NaN, unparsable strings, upstream nulls) is
//! coerced to zero rather than rejected; a single blank optional field must
//! not fail a whole aggregation. Division by exactly zero is the one
//! operation that fails.

use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::{
    CURRENCY_LABEL_AR, CURRENCY_LABEL_EN, DISPLAY_DECIMAL_PRECISION, PIASTERS_PER_POUND,
};
use crate::errors::{MoneyError, Result};

/// Display locale for formatted amounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ar,
    En,
}

/// A monetary amount in Egyptian pounds, stored as whole piasters.
///
/// `Money` is an immutable value type: every operation returns a new
/// instance. Ordering and equality compare the underlying piaster count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Creates a `Money` from a pound amount, rounding to the nearest
    /// piaster. Non-finite input becomes zero.
    pub fn from_pounds(pounds: f64) -> Self {
        match Decimal::from_f64(pounds) {
            Some(value) => Self::from_decimal_pounds(value),
            None => Money(0),
        }
    }

    /// Creates a `Money` directly from piasters.
    #[inline]
    pub const fn from_piasters(piasters: i64) -> Self {
        Money(piasters)
    }

    /// Re-hydrates a nullable database decimal. `None` becomes zero.
    pub fn from_database(value: Option<f64>) -> Self {
        value.map(Self::from_pounds).unwrap_or_default()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    fn from_decimal_pounds(pounds: Decimal) -> Self {
        match pounds.checked_mul(Decimal::from(PIASTERS_PER_POUND)) {
            Some(piasters) => Self::round_piasters(piasters),
            None => Money(0),
        }
    }

    fn round_piasters(piasters: Decimal) -> Self {
        let rounded =
            piasters.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        Money(rounded.to_i64().unwrap_or(0))
    }

    /// Multiplies by a factor (e.g. a commission fraction), rounding the
    /// result to the nearest piaster. Non-finite factors yield zero.
    pub fn multiply(&self, factor: f64) -> Money {
        let Some(factor) = Decimal::from_f64(factor) else {
            return Money(0);
        };
        match Decimal::from(self.0).checked_mul(factor) {
            Some(piasters) => Self::round_piasters(piasters),
            None => Money(0),
        }
    }

    /// Divides by a divisor, rounding the result to the nearest piaster.
    ///
    /// Fails with [`MoneyError::DivisionByZero`] when the divisor is exactly
    /// zero; this is the only fallible money operation.
    pub fn divide(&self, divisor: f64) -> Result<Money> {
        if divisor == 0.0 {
            return Err(MoneyError::DivisionByZero.into());
        }
        let Some(divisor) = Decimal::from_f64(divisor) else {
            return Ok(Money(0));
        };
        match Decimal::from(self.0).checked_div(divisor) {
            Some(piasters) => Ok(Self::round_piasters(piasters)),
            None => Ok(Money(0)),
        }
    }

    /// Applies a percentage, e.g. `percent(7.0)` for a 7% commission.
    pub fn percent(&self, percent: f64) -> Money {
        self.multiply(percent / 100.0)
    }

    #[inline]
    pub const fn abs(&self) -> Money {
        Money(self.0.abs())
    }

    #[inline]
    pub const fn negate(&self) -> Money {
        Money(-self.0)
    }

    pub fn max(&self, other: Money) -> Money {
        Money(self.0.max(other.0))
    }

    pub fn min(&self, other: Money) -> Money {
        Money(self.0.min(other.0))
    }

    /// Clamps negative amounts to zero.
    pub fn non_negative(&self) -> Money {
        if self.0 < 0 {
            Money(0)
        } else {
            *self
        }
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// The amount in pounds. For display only; feeding this back into
    /// further arithmetic reintroduces floating point.
    pub fn to_pounds(&self) -> f64 {
        self.0 as f64 / PIASTERS_PER_POUND as f64
    }

    #[inline]
    pub const fn to_piasters(&self) -> i64 {
        self.0
    }

    /// Fixed-point string with the requested number of decimals, suitable
    /// for database storage or CSV cells.
    pub fn to_fixed(&self, decimals: u32) -> String {
        let mut pounds = Decimal::new(self.0, 2)
            .round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
        pounds.rescale(decimals);
        pounds.to_string()
    }

    /// Locale display: Eastern Arabic numerals for `ar`, Western for `en`.
    pub fn format(&self, locale: Locale) -> String {
        let amount = self.to_fixed(DISPLAY_DECIMAL_PRECISION);
        match locale {
            Locale::Ar => format!("{} {}", to_eastern_numerals(&amount), CURRENCY_LABEL_AR),
            Locale::En => format!("{} {}", amount, CURRENCY_LABEL_EN),
        }
    }

    /// Western numerals with the localized currency label.
    pub fn format_western(&self, locale: Locale) -> String {
        format!(
            "{} {}",
            self.to_fixed(DISPLAY_DECIMAL_PRECISION),
            currency_label(locale)
        )
    }

    /// Thousands-separated display. The Arabic variant uses Eastern
    /// numerals with `٬` group and `٫` decimal separators.
    pub fn format_with_separators(&self, locale: Locale) -> String {
        let fixed = self.to_fixed(2);
        let (sign, unsigned) = match fixed.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", fixed.as_str()),
        };
        let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, "00"));
        match locale {
            Locale::Ar => {
                let grouped = group_thousands(int_part, '٬');
                format!(
                    "{}{}٫{} {}",
                    sign,
                    to_eastern_numerals(&grouped),
                    to_eastern_numerals(frac_part),
                    CURRENCY_LABEL_AR
                )
            }
            Locale::En => {
                let grouped = group_thousands(int_part, ',');
                format!("{}{}.{} {}", sign, grouped, frac_part, CURRENCY_LABEL_EN)
            }
        }
    }

    /// Abbreviated display, e.g. `1.5K EGP` / `2.3M EGP` (`ك`/`م` in Arabic).
    pub fn format_short(&self, locale: Locale) -> String {
        let pounds = self.to_pounds();
        let formatted = if pounds >= 1_000_000.0 {
            format!(
                "{:.1}{}",
                pounds / 1_000_000.0,
                if locale == Locale::Ar { "م" } else { "M" }
            )
        } else if pounds >= 1_000.0 {
            format!(
                "{:.1}{}",
                pounds / 1_000.0,
                if locale == Locale::Ar { "ك" } else { "K" }
            )
        } else {
            format!("{:.2}", pounds)
        };
        format!("{} {}", formatted, currency_label(locale))
    }
}

/// Sums an iterator of amounts without intermediate rounding.
pub fn sum_money<I>(amounts: I) -> Money
where
    I: IntoIterator<Item = Money>,
{
    amounts.into_iter().fold(Money::zero(), |acc, m| acc + m)
}

pub(crate) fn currency_label(locale: Locale) -> &'static str {
    match locale {
        Locale::Ar => CURRENCY_LABEL_AR,
        Locale::En => CURRENCY_LABEL_EN,
    }
}

/// Replaces ASCII digits with Eastern Arabic numerals, leaving every other
/// character in place.
pub(crate) fn to_eastern_numerals(text: &str) -> String {
    text.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => char::from_u32('٠' as u32 + d).unwrap_or(c),
            None => c,
        })
        .collect()
}

fn group_thousands(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(c);
    }
    grouped
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fixed(2))
    }
}

/// Parsing never fails: unparsable input is the zero amount.
impl FromStr for Money {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(s.trim()
            .parse::<Decimal>()
            .map(Money::from_decimal_pounds)
            .unwrap_or_default())
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Money) {
        *self = *self - other;
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        self.negate()
    }
}

/// Serializes as a pound-denominated number, matching the upstream JSON
/// contract for monetary fields.
impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.to_pounds())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a pound amount as a number or string")
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> std::result::Result<Money, E> {
        Ok(Money::from_pounds(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> std::result::Result<Money, E> {
        Ok(Money::from_pounds(value as f64))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> std::result::Result<Money, E> {
        Ok(Money::from_pounds(value as f64))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<Money, E> {
        Ok(value.parse().unwrap_or_default())
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Money, E> {
        Ok(Money::zero())
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Money, E> {
        Ok(Money::zero())
    }
}
