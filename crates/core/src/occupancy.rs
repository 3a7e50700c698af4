//! Occupancy
//!
//! Per-unit resident counts arrive from forms, spreadsheets and JSON payloads,
//! so a value may be a number or free text. This module is the explicit
//! validation step that turns those raw values into a working [`Roster`],
//! tagging every dropped entry with the reason it was rejected.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::Deserialize;
use smallvec::SmallVec;
use thiserror::Error;

/// Why a raw per-unit entry could not be used.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The value is not interpretable as a number.
    #[error("not a number")]
    NotNumeric,

    /// The value is numeric but negative.
    #[error("negative resident count")]
    Negative,

    /// The value is numeric but not a whole number.
    #[error("not a whole number")]
    Fractional,

    /// The value is a whole number too large for a resident count.
    #[error("resident count out of range")]
    OutOfRange,
}

/// A raw, not-yet-validated resident count for one unit.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawCount {
    /// A whole number, e.g. `3`.
    Count(i64),

    /// A fractional number, e.g. `2.5`. Only integral values are accepted.
    Number(f64),

    /// Free text, e.g. `" 3 "`. Trimmed and parsed as a whole number.
    Text(String),
}

impl RawCount {
    /// Validate this raw value as a non-negative resident count.
    ///
    /// # Errors
    ///
    /// Returns the [`RejectReason`] describing why the value was unusable.
    pub fn to_occupants(&self) -> Result<u32, RejectReason> {
        match self {
            Self::Count(value) => whole_to_occupants(*value),
            Self::Number(value) => float_to_occupants(*value),
            Self::Text(value) => text_to_occupants(value),
        }
    }
}

impl From<i64> for RawCount {
    fn from(value: i64) -> Self {
        Self::Count(value)
    }
}

impl From<&str> for RawCount {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

fn whole_to_occupants(value: i64) -> Result<u32, RejectReason> {
    if value < 0 {
        return Err(RejectReason::Negative);
    }

    u32::try_from(value).map_err(|_overflow| RejectReason::OutOfRange)
}

fn float_to_occupants(value: f64) -> Result<u32, RejectReason> {
    let decimal = Decimal::from_f64_retain(value).ok_or(RejectReason::NotNumeric)?;

    if decimal.is_sign_negative() && !decimal.is_zero() {
        return Err(RejectReason::Negative);
    }

    if decimal != decimal.trunc() {
        return Err(RejectReason::Fractional);
    }

    decimal.to_u32().ok_or(RejectReason::OutOfRange)
}

fn text_to_occupants(value: &str) -> Result<u32, RejectReason> {
    let trimmed = value.trim();

    match trimmed.parse::<i64>() {
        Ok(whole) => whole_to_occupants(whole),
        // Distinguish "2.5" (numeric but fractional) from "two" (not numeric).
        Err(_not_whole) => match trimmed.parse::<f64>() {
            Ok(number) => float_to_occupants(number),
            Err(_not_numeric) => Err(RejectReason::NotNumeric),
        },
    }
}

/// A per-unit entry that was dropped during normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedUnit {
    /// Unit identifier of the dropped entry.
    pub id: String,

    /// Why the entry was dropped.
    pub reason: RejectReason,
}

/// Validated unit roster: unit id mapped to resident count, ordered by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    units: BTreeMap<String, u32>,
}

impl Roster {
    /// Build a roster from raw entries, dropping the ones that do not parse
    /// as a non-negative whole number.
    ///
    /// Dropped entries are returned alongside the roster so the caller can
    /// decide whether to warn, error, or proceed. A later entry for the same
    /// unit id replaces an earlier one.
    pub fn normalize<I>(entries: I) -> (Self, SmallVec<[RejectedUnit; 4]>)
    where
        I: IntoIterator<Item = (String, RawCount)>,
    {
        let mut units = BTreeMap::new();
        let mut rejected = SmallVec::new();

        for (id, raw) in entries {
            match raw.to_occupants() {
                Ok(occupants) => {
                    units.insert(id, occupants);
                }
                Err(reason) => rejected.push(RejectedUnit { id, reason }),
            }
        }

        (Self { units }, rejected)
    }

    /// Number of units in the roster.
    #[must_use]
    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    /// True when the roster has no units.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Total residents across all units.
    #[must_use]
    pub fn total_occupants(&self) -> u64 {
        self.units.values().map(|count| u64::from(*count)).sum()
    }

    /// Iterate units in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.units.iter().map(|(id, count)| (id.as_str(), *count))
    }
}

impl FromIterator<(String, u32)> for Roster {
    fn from_iter<I: IntoIterator<Item = (String, u32)>>(iter: I) -> Self {
        Self {
            units: iter.into_iter().collect(),
        }
    }
}
