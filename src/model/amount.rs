//! Monetary amounts held as integer cents.
//!
//! Sales are summed by the store, so amounts never travel as floats once
//! they are accepted. Input is validated at construction: only finite,
//! non-negative values become an `Amount`.

use crate::error::{Error, Result};
use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::Add;

/// A non-negative amount of money in cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(i64);

impl Amount {
    /// Zero.
    pub const ZERO: Self = Self(0);

    /// Largest accepted amount: 100 billion in cents.
    ///
    /// Keeps monthly sums far below `i64::MAX` for any realistic number of
    /// sales.
    pub const MAX: Self = Self(10_000_000_000_000);

    /// Build from cents.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidAmount` for negative input or input above
    /// [`Self::MAX`].
    pub fn from_cents(cents: i64) -> Result<Self> {
        if !(0..=Self::MAX.0).contains(&cents) {
            return Err(Error::InvalidAmount {
                input: cents.to_string(),
            });
        }
        Ok(Self(cents))
    }

    /// Build from a decimal value, rounding half away from zero to cents.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidAmount` if the value is NaN, infinite,
    /// negative, or above [`Self::MAX`].
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn from_decimal(value: f64) -> Result<Self> {
        let invalid = || Error::InvalidAmount {
            input: value.to_string(),
        };

        if !value.is_finite() || value < 0.0 {
            return Err(invalid());
        }

        let cents = (value * 100.0).round();
        if cents > Self::MAX.0 as f64 {
            return Err(invalid());
        }

        // `-0.0` rounds to `-0.0`; the cast folds it to 0.
        Ok(Self(cents as i64))
    }

    /// Parse operator input such as `"100"`, `"19.9"` or `" 0.00 "`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidAmount` if the text is not a finite,
    /// non-negative number.
    pub fn parse(input: &str) -> Result<Self> {
        let value: f64 = input.trim().parse().map_err(|_| Error::InvalidAmount {
            input: input.to_string(),
        })?;

        Self::from_decimal(value).map_err(|_| Error::InvalidAmount {
            input: input.to_string(),
        })
    }

    /// The amount in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// The amount as a decimal (display and JSON only).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl rusqlite::types::FromSql for Amount {
    fn column_result(
        value: rusqlite::types::ValueRef<'_>,
    ) -> rusqlite::types::FromSqlResult<Self> {
        let cents = i64::column_result(value)?;
        if cents < 0 {
            return Err(rusqlite::types::FromSqlError::OutOfRange(cents));
        }
        Ok(Self(cents))
    }
}

impl rusqlite::ToSql for Amount {
    fn to_sql(&self) -> rusqlite::Result<rusqlite::types::ToSqlOutput<'_>> {
        self.0.to_sql()
    }
}
