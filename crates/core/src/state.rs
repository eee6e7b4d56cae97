// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::module::CategoryModule;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tatacoa_package_audit::{AuditEvent, PackageDigest};
use tatacoa_package_domain::{
    DateRange, DomainError, Money, PackageStatus, Service, ServiceCategory, line_subtotal, tax_on,
};
use time::{Date, OffsetDateTime, Time};

/// Represents a package identifier.
///
/// Identifiers are generated by the orchestrator from its session id
/// and a monotonic sequence, so no ambient clock or randomness enters
/// the transition function.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageId {
    /// The identifier value.
    value: String,
}

impl PackageId {
    /// Creates a new `PackageId`.
    ///
    /// # Arguments
    ///
    /// * `value` - The identifier value
    #[must_use]
    pub fn new(value: String) -> Self {
        Self { value }
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for PackageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A catalog service selected into a package.
///
/// `subtotal` is a cached derived value: it always equals the
/// per-person price (computed at selection or persons-update time)
/// multiplied by the person count. Detail updates (date, time, notes)
/// deliberately do not refresh it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedService {
    /// The catalog service as supplied at selection time.
    pub service: Service,
    /// The person count for this selection.
    pub persons: u32,
    /// The selection date, if any.
    pub date: Option<Date>,
    /// The selection time of day, if any.
    pub time: Option<Time>,
    /// Free-form notes, if any.
    pub notes: Option<String>,
    /// The cached line subtotal.
    pub subtotal: Money,
}

impl SelectedService {
    /// Creates a new `SelectedService` with a freshly computed subtotal.
    ///
    /// # Arguments
    ///
    /// * `service` - The catalog service
    /// * `persons` - The person count (must be at least 1)
    /// * `date` - The selection date, if any
    /// * `time` - The selection time of day, if any
    /// * `notes` - Free-form notes, if any
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPersonCount` if `persons` is zero.
    pub fn new(
        service: Service,
        persons: u32,
        date: Option<Date>,
        time: Option<Time>,
        notes: Option<String>,
    ) -> Result<Self, DomainError> {
        let subtotal: Money = line_subtotal(&service, persons, date)?;
        Ok(Self {
            service,
            persons,
            date,
            time,
            notes,
            subtotal,
        })
    }
}

/// The root entity: a package under composition.
///
/// Derived totals (`subtotal`, `taxes`, `total`) are cached fields and
/// are recomputed exclusively through [`PackageAggregate::recompute_totals`],
/// invoked after every structural mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageAggregate {
    /// The package identifier.
    pub package_id: PackageId,
    /// Category modules, at most one per category, in category order.
    pub modules: BTreeMap<ServiceCategory, CategoryModule>,
    /// The package-level headcount. Informational: independent of
    /// per-service person counts and never feeds pricing.
    pub total_persons: u32,
    /// The package-level date range, independent of per-service dates.
    pub date_range: Option<DateRange>,
    /// Sum of all module subtotals.
    pub subtotal: Money,
    /// Tax on the subtotal at the fixed rate.
    pub taxes: Money,
    /// Subtotal plus taxes.
    pub total: Money,
    /// The lifecycle status.
    pub status: PackageStatus,
    /// When the package was created.
    pub created_at: OffsetDateTime,
    /// When the package was last mutated.
    pub updated_at: OffsetDateTime,
    /// When a saved package expires, if an expiry was assigned.
    pub expires_at: Option<OffsetDateTime>,
}

impl PackageAggregate {
    /// Creates a fresh draft package with no selections and zero totals.
    ///
    /// # Arguments
    ///
    /// * `package_id` - The package identifier
    /// * `total_persons` - The initial package-level headcount
    /// * `date_range` - The initial package-level date range, if any
    /// * `now` - The creation timestamp
    #[must_use]
    pub const fn new(
        package_id: PackageId,
        total_persons: u32,
        date_range: Option<DateRange>,
        now: OffsetDateTime,
    ) -> Self {
        Self {
            package_id,
            modules: BTreeMap::new(),
            total_persons,
            date_range,
            subtotal: Money::zero(),
            taxes: Money::zero(),
            total: Money::zero(),
            status: PackageStatus::Draft,
            created_at: now,
            updated_at: now,
            expires_at: None,
        }
    }

    /// Recomputes the cached package totals from the module subtotals.
    ///
    /// This is the single chokepoint for derived totals: it sums every
    /// module subtotal, applies the fixed tax rate, and stamps
    /// `updated_at`.
    ///
    /// # Arguments
    ///
    /// * `now` - The mutation timestamp
    pub fn recompute_totals(&mut self, now: OffsetDateTime) {
        self.subtotal = self.modules.values().map(|module| module.subtotal).sum();
        self.taxes = tax_on(self.subtotal);
        self.total = self.subtotal + self.taxes;
        self.updated_at = now;
    }

    /// Stamps `updated_at` without touching totals.
    ///
    /// Used for mutations that cannot change any subtotal (detail
    /// updates, headcount, date range, status).
    ///
    /// # Arguments
    ///
    /// * `now` - The mutation timestamp
    pub const fn touch(&mut self, now: OffsetDateTime) {
        self.updated_at = now;
    }

    /// Returns the number of selected services across all modules.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.modules.values().map(CategoryModule::item_count).sum()
    }
}

/// The orchestrator-level state and the unit of persistence.
///
/// The package-level headcount and date range survive even when no
/// aggregate exists; they seed a freshly initialized aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageState {
    /// The package under composition, if one exists.
    pub aggregate: Option<PackageAggregate>,
    /// The package-level headcount (defaults to 1).
    pub total_persons: u32,
    /// The package-level date range, if set.
    pub date_range: Option<DateRange>,
}

impl PackageState {
    /// Creates the initial empty state: no package, one person, no
    /// date range.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            aggregate: None,
            total_persons: 1,
            date_range: None,
        }
    }

    /// Converts the state to a digest for audit purposes.
    #[must_use]
    pub fn digest(&self) -> PackageDigest {
        self.aggregate.as_ref().map_or_else(PackageDigest::empty, |aggregate| {
            PackageDigest::new(
                aggregate.modules.len(),
                aggregate.item_count(),
                aggregate.total,
                Some(aggregate.status),
            )
        })
    }
}

impl Default for PackageState {
    fn default() -> Self {
        Self::new()
    }
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail
/// without side effects.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: PackageState,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}
