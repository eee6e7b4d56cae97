// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// Represents a catalog service identifier.
///
/// Service identifiers are opaque strings assigned by the catalog and
/// are globally unique across categories in practice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceId {
    /// The identifier value.
    value: String,
}

impl ServiceId {
    /// Creates a new `ServiceId`.
    ///
    /// # Arguments
    ///
    /// * `value` - The identifier value
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_owned(),
        }
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for ServiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// The service categories a package can group selections under.
///
/// Categories are fixed domain constants. Their declaration order is the
/// order modules appear in within a package.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    /// Overnight accommodation.
    Lodging,
    /// Food services.
    Meals,
    /// Guided tours.
    Tours,
    /// Astronomical observation sessions.
    Astronomy,
    /// Points of interest visits.
    PointsOfInterest,
}

impl ServiceCategory {
    /// Converts this category to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Lodging => "lodging",
            Self::Meals => "meals",
            Self::Tours => "tours",
            Self::Astronomy => "astronomy",
            Self::PointsOfInterest => "points_of_interest",
        }
    }
}

impl FromStr for ServiceCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lodging" => Ok(Self::Lodging),
            "meals" => Ok(Self::Meals),
            "tours" => Ok(Self::Tours),
            "astronomy" => Ok(Self::Astronomy),
            "points_of_interest" => Ok(Self::PointsOfInterest),
            _ => Err(DomainError::InvalidCategory(s.to_owned())),
        }
    }
}

impl std::fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The currency a service is priced in.
///
/// Colombian pesos are the domain default and carry no minor unit:
/// every monetary amount is a whole number of currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Currency {
    /// Colombian peso.
    #[default]
    Cop,
    /// United States dollar.
    Usd,
}

impl Currency {
    /// Converts this currency to its ISO 4217 code.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cop => "COP",
            Self::Usd => "USD",
        }
    }
}

impl FromStr for Currency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "COP" => Ok(Self::Cop),
            "USD" => Ok(Self::Usd),
            _ => Err(DomainError::InvalidCurrency(s.to_owned())),
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A monetary amount in whole currency units.
///
/// Amounts are signed so that intermediate arithmetic cannot silently
/// wrap, but every validated domain value is non-negative.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money {
    /// The amount in whole currency units.
    amount: i64,
}

impl Money {
    /// Creates a new `Money` value.
    ///
    /// # Arguments
    ///
    /// * `amount` - The amount in whole currency units
    #[must_use]
    pub const fn new(amount: i64) -> Self {
        Self { amount }
    }

    /// The zero amount.
    #[must_use]
    pub const fn zero() -> Self {
        Self { amount: 0 }
    }

    /// Returns the amount in whole currency units.
    #[must_use]
    pub const fn amount(&self) -> i64 {
        self.amount
    }

    /// Returns whether this amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.amount == 0
    }
}

impl std::ops::Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            amount: self.amount + rhs.amount,
        }
    }
}

impl std::ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.amount += rhs.amount;
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, value| acc + value)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.amount)
    }
}

/// Seasonal price multipliers for a service.
///
/// When present on a service, the per-person price is multiplied by the
/// high or low season factor according to the selection date's calendar
/// month. Both factors must be finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeasonalMultipliers {
    /// Factor applied in high season months.
    high_season_factor: f64,
    /// Factor applied in low season months.
    low_season_factor: f64,
}

impl SeasonalMultipliers {
    /// Creates new `SeasonalMultipliers`.
    ///
    /// # Arguments
    ///
    /// * `high_season_factor` - Factor applied in high season months
    /// * `low_season_factor` - Factor applied in low season months
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidSeasonalFactor` if either factor is
    /// not finite or not strictly positive.
    pub fn new(high_season_factor: f64, low_season_factor: f64) -> Result<Self, DomainError> {
        for (name, factor) in [
            ("high_season_factor", high_season_factor),
            ("low_season_factor", low_season_factor),
        ] {
            if !factor.is_finite() || factor <= 0.0 {
                return Err(DomainError::InvalidSeasonalFactor(format!(
                    "{name} must be finite and positive, got {factor}"
                )));
            }
        }
        Ok(Self {
            high_season_factor,
            low_season_factor,
        })
    }

    /// Returns the high season factor.
    #[must_use]
    pub const fn high_season_factor(&self) -> f64 {
        self.high_season_factor
    }

    /// Returns the low season factor.
    #[must_use]
    pub const fn low_season_factor(&self) -> f64 {
        self.low_season_factor
    }
}

/// A catalog service, immutable from the engine's perspective.
///
/// Services are supplied at call time by the caller; the engine never
/// fetches them itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    /// The catalog identifier.
    pub service_id: ServiceId,
    /// The display name.
    pub name: String,
    /// The category this service belongs to.
    pub category: ServiceCategory,
    /// Optional subcategory label.
    pub subcategory: Option<String>,
    /// The base price per person.
    pub base_price: Money,
    /// The currency the price is denominated in.
    pub currency: Currency,
    /// The catalog minimum person count.
    pub min_persons: u32,
    /// The catalog maximum person count.
    pub max_persons: u32,
    /// Optional seasonal price multipliers.
    pub seasonal_multipliers: Option<SeasonalMultipliers>,
}

impl Service {
    /// Creates a new `Service`.
    ///
    /// # Arguments
    ///
    /// * `service_id` - The catalog identifier
    /// * `name` - The display name
    /// * `category` - The category this service belongs to
    /// * `subcategory` - Optional subcategory label
    /// * `base_price` - The base price per person
    /// * `currency` - The currency the price is denominated in
    /// * `min_persons` - The catalog minimum person count
    /// * `max_persons` - The catalog maximum person count
    /// * `seasonal_multipliers` - Optional seasonal price multipliers
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        service_id: ServiceId,
        name: String,
        category: ServiceCategory,
        subcategory: Option<String>,
        base_price: Money,
        currency: Currency,
        min_persons: u32,
        max_persons: u32,
        seasonal_multipliers: Option<SeasonalMultipliers>,
    ) -> Self {
        Self {
            service_id,
            name,
            category,
            subcategory,
            base_price,
            currency,
            min_persons,
            max_persons,
            seasonal_multipliers,
        }
    }
}

/// A package-level date range.
///
/// Independent of per-service selection dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// The check-in date.
    check_in: Date,
    /// The check-out date.
    check_out: Date,
}

impl DateRange {
    /// Creates a new `DateRange`.
    ///
    /// # Arguments
    ///
    /// * `check_in` - The check-in date
    /// * `check_out` - The check-out date
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDateRange` if `check_in` does not
    /// precede `check_out`.
    pub fn new(check_in: Date, check_out: Date) -> Result<Self, DomainError> {
        if check_in >= check_out {
            return Err(DomainError::InvalidDateRange {
                check_in,
                check_out,
            });
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// Returns the check-in date.
    #[must_use]
    pub const fn check_in(&self) -> Date {
        self.check_in
    }

    /// Returns the check-out date.
    #[must_use]
    pub const fn check_out(&self) -> Date {
        self.check_out
    }
}

/// The lifecycle status of a package.
///
/// A package is created in `Draft` and moves forward only along the
/// transitions permitted by [`PackageStatus::can_transition_to`].
/// `Saved`, `PendingPayment`, `Confirmed`, and `Cancelled` are set by
/// operations outside the composition engine (persistence, checkout);
/// the engine accepts and preserves them without touching totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PackageStatus {
    /// In-progress composition. Full editing allowed.
    #[default]
    Draft,
    /// Persisted for later.
    Saved,
    /// Checkout started, awaiting payment.
    PendingPayment,
    /// Payment completed.
    Confirmed,
    /// Abandoned or rejected.
    Cancelled,
}

impl PackageStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Saved => "saved",
            Self::PendingPayment => "pending_payment",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Checks if a transition from this status to another is valid.
    ///
    /// Valid transitions are:
    /// - Draft → Saved | `PendingPayment` | Cancelled
    /// - Saved → `PendingPayment` | Cancelled
    /// - `PendingPayment` → Confirmed | Cancelled
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Draft, Self::Saved | Self::PendingPayment | Self::Cancelled)
                | (Self::Saved, Self::PendingPayment | Self::Cancelled)
                | (Self::PendingPayment, Self::Confirmed | Self::Cancelled)
        )
    }

    /// Returns whether this status is terminal.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Cancelled)
    }
}

impl FromStr for PackageStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "saved" => Ok(Self::Saved),
            "pending_payment" => Ok(Self::PendingPayment),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidStatus(s.to_owned())),
        }
    }
}

impl std::fmt::Display for PackageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
