// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::state::PackageId;
use tatacoa_package_domain::{DateRange, PackageStatus, Service, ServiceId};
use time::{Date, Time};

/// A command represents caller intent as data only.
///
/// Commands are the only way to request package state changes.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Create a fresh draft package if none exists. Idempotent.
    InitializePackage {
        /// The identifier for the new package.
        package_id: PackageId,
    },
    /// Discard the current package and reset the state to its initial
    /// empty form (headcount 1, no date range).
    ClearPackage,
    /// Add a catalog service to the package, replacing any existing
    /// selection of the same service.
    AddService {
        /// The catalog service.
        service: Service,
        /// The person count for this selection.
        persons: u32,
        /// The selection date, if any.
        date: Option<Date>,
        /// The selection time of day, if any.
        time: Option<Time>,
        /// Free-form notes, if any.
        notes: Option<String>,
    },
    /// Remove a selection from every category module that holds it.
    RemoveService {
        /// The service id to remove.
        service_id: ServiceId,
    },
    /// Change a selection's person count and reprice it.
    UpdateServicePersons {
        /// The service id to update.
        service_id: ServiceId,
        /// The new person count.
        persons: u32,
    },
    /// Replace a selection's date. Does not reprice.
    UpdateServiceDate {
        /// The service id to update.
        service_id: ServiceId,
        /// The new date, if any.
        date: Option<Date>,
    },
    /// Replace a selection's time of day. Does not reprice.
    UpdateServiceTime {
        /// The service id to update.
        service_id: ServiceId,
        /// The new time, if any.
        time: Option<Time>,
    },
    /// Replace a selection's notes. Does not reprice.
    UpdateServiceNotes {
        /// The service id to update.
        service_id: ServiceId,
        /// The new notes, if any.
        notes: Option<String>,
    },
    /// Set the package-level headcount. Independent of per-service
    /// person counts; never changes any subtotal.
    SetTotalPersons {
        /// The new headcount.
        persons: u32,
    },
    /// Set the package-level date range. Independent of per-service
    /// dates.
    SetDateRange {
        /// The new date range.
        date_range: DateRange,
    },
    /// Move the package along its lifecycle. Invalid transitions are
    /// ignored.
    SetStatus {
        /// The target status.
        status: PackageStatus,
    },
    /// Recompute the package totals from the cached line subtotals.
    /// Idempotent.
    RecalculatePrices,
}
