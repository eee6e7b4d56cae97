// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-person and line pricing for catalog services.
//!
//! This module provides pure, deterministic pricing calculations with an
//! explicit rounding rule: amounts are rounded half away from zero to
//! whole currency units at the single point where a seasonal factor is
//! applied. Line subtotals are exact integer multiples of the rounded
//! per-person price.

use crate::error::DomainError;
use crate::types::{Money, Service};
use crate::validation::validate_person_count;
use serde::{Deserialize, Serialize};
use time::{Date, Month};

/// The fixed tax rate applied to every package subtotal.
pub const TAX_RATE: f64 = 0.19;

/// The pricing season a calendar date falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Season {
    /// December, January, June, and July.
    High,
    /// All other months.
    Low,
}

impl Season {
    /// Determines the season for a calendar date.
    ///
    /// # Arguments
    ///
    /// * `date` - The date to classify
    #[must_use]
    pub fn for_date(date: Date) -> Self {
        match date.month() {
            Month::December | Month::January | Month::June | Month::July => Self::High,
            _ => Self::Low,
        }
    }
}

/// Computes the per-person price for a service on an optional date.
///
/// The base price is returned unchanged unless the service carries
/// seasonal multipliers AND a date is supplied, in which case the base
/// price is scaled by the high or low season factor for that date's
/// month. Without a date, seasonal adjustment is skipped even when
/// multipliers exist.
///
/// # Arguments
///
/// * `service` - The catalog service
/// * `date` - The selection date, if any
#[must_use]
pub fn price_per_person(service: &Service, date: Option<Date>) -> Money {
    match (service.seasonal_multipliers, date) {
        (Some(multipliers), Some(date)) => {
            let factor: f64 = match Season::for_date(date) {
                Season::High => multipliers.high_season_factor(),
                Season::Low => multipliers.low_season_factor(),
            };
            Money::new(scale(service.base_price.amount(), factor))
        }
        _ => service.base_price,
    }
}

/// Computes the line subtotal for a service selection.
///
/// The subtotal is the per-person price multiplied by the person count.
/// Catalog person bounds are deliberately NOT enforced here; callers
/// that want bounds checking use
/// [`crate::validation::validate_persons_within_bounds`].
///
/// # Arguments
///
/// * `service` - The catalog service
/// * `persons` - The person count (must be at least 1)
/// * `date` - The selection date, if any
///
/// # Errors
///
/// Returns `DomainError::InvalidPersonCount` if `persons` is zero.
pub fn line_subtotal(
    service: &Service,
    persons: u32,
    date: Option<Date>,
) -> Result<Money, DomainError> {
    validate_person_count(persons)?;
    let per_person: Money = price_per_person(service, date);
    Ok(Money::new(per_person.amount() * i64::from(persons)))
}

/// Computes the tax on a subtotal at the fixed [`TAX_RATE`].
///
/// # Arguments
///
/// * `subtotal` - The pre-tax amount
#[must_use]
pub fn tax_on(subtotal: Money) -> Money {
    Money::new(scale(subtotal.amount(), TAX_RATE))
}

/// Scales a whole-unit amount by a factor, rounding half away from zero.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn scale(amount: i64, factor: f64) -> i64 {
    (amount as f64 * factor).round() as i64
}
