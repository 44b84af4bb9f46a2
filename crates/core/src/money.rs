use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;
use std::sync::OnceLock;

use crate::error::FormatError;

/// Unsigned amount of a debit, kept as an exact decimal so that running
/// totals never drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(Decimal);

impl Money {
    pub fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::from(cents).abs() / Decimal::from(100))
    }

    pub fn from_decimal(decimal: Decimal) -> Self {
        Money(decimal.abs())
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn to_f64(self) -> f64 {
        self.0.to_f64().unwrap_or_default()
    }

    /// `None` when the sum does not fit in a `Decimal`.
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Two-decimal plain form (`1234.50`), rounding half away from zero.
    pub fn fixed2(self) -> String {
        let rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("{rounded:.2}")
    }
}

/// Either a decimal-comma amount, optionally grouped in thousands by
/// periods, or a plain period-decimal amount.
fn amount_pattern() -> &'static Regex {
    static R: OnceLock<Regex> = OnceLock::new();
    R.get_or_init(|| {
        Regex::new(r"^-?(?:(?:[0-9]{1,3}(?:\.[0-9]{3})+|[0-9]+),[0-9]+|[0-9]+(?:\.[0-9]+)?)$")
            .expect("invalid regex")
    })
}

/// Parse a statement amount such as `"-13,50"` or `"1.234,56"` into its
/// magnitude.
///
/// The comma is the decimal separator. When one is present, periods must
/// form three-digit thousands groups and are dropped.
pub fn to_magnitude(value: &str) -> Result<Money, FormatError> {
    let trimmed = value.trim();
    if !amount_pattern().is_match(trimmed) {
        return Err(FormatError::InvalidAmount(value.to_string()));
    }
    let normalized = if trimmed.contains(',') {
        trimmed.replace('.', "").replacen(',', ".", 1)
    } else {
        trimmed.to_string()
    };

    let decimal = Decimal::from_str(&normalized)
        .map_err(|_| FormatError::InvalidAmount(value.to_string()))?;
    Ok(Money(decimal.abs()))
}

/// Brazilian currency form: `R$ 1.234,56`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fixed = self.fixed2();
        let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, c) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(c);
        }

        write!(f, "R$ {grouped},{frac_part}")
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_f64())
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |a, b| a + b)
    }
}
