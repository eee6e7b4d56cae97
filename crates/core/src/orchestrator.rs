// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The public operation surface of the package engine.
//!
//! One orchestrator is constructed per session and is the sole mutator
//! of its state. Every operation reads the current state, computes the
//! next state through [`apply`](crate::apply), and replaces the whole
//! state atomically, so the aggregate invariants hold after every call.

use crate::apply::apply;
use crate::command::Command;
use crate::error::CoreError;
use crate::state::{PackageAggregate, PackageId, PackageState, TransitionResult};
use tatacoa_package_audit::{Actor, AuditEvent};
use tatacoa_package_domain::{DateRange, Money, PackageStatus, Service, ServiceId};
use time::{Date, OffsetDateTime, Time};

/// Orchestrates package composition for a single session.
///
/// Replaces the marketplace's former global store: each session owns
/// its orchestrator, so concurrent sessions (for example, multiple
/// browser tabs) never share or corrupt each other's package.
#[derive(Debug, Clone)]
pub struct PackageOrchestrator {
    /// The owning session's identifier.
    session_id: String,
    /// The actor attributed on every audit event.
    actor: Actor,
    /// The current state; replaced wholesale on every transition.
    state: PackageState,
    /// Append-only trail of every transition, no-ops included.
    audit_log: Vec<AuditEvent>,
    /// Sequence for generated package identifiers.
    package_seq: u64,
}

impl PackageOrchestrator {
    /// Creates an orchestrator with the initial empty state.
    ///
    /// # Arguments
    ///
    /// * `session_id` - The owning session's identifier
    /// * `actor` - The actor attributed on audit events
    #[must_use]
    pub fn new(session_id: &str, actor: Actor) -> Self {
        Self {
            session_id: session_id.to_owned(),
            actor,
            state: PackageState::new(),
            audit_log: Vec::new(),
            package_seq: 0,
        }
    }

    /// Creates a fresh draft package if none exists.
    ///
    /// Idempotent: when a package is already being composed, this
    /// returns without effect and without consuming an identifier.
    ///
    /// # Errors
    ///
    /// This operation has no preconditions and does not fail in
    /// practice; the `Result` keeps the mutation surface uniform.
    pub fn initialize_package(&mut self) -> Result<(), CoreError> {
        if self.state.aggregate.is_some() {
            return Ok(());
        }
        let package_id: PackageId = self.next_package_id();
        self.dispatch(Command::InitializePackage { package_id })
    }

    /// Discards the current package and resets the state to its
    /// initial empty form (headcount 1, no date range).
    ///
    /// # Errors
    ///
    /// This operation has no preconditions and does not fail in
    /// practice; the `Result` keeps the mutation surface uniform.
    pub fn clear_package(&mut self) -> Result<(), CoreError> {
        self.dispatch(Command::ClearPackage)
    }

    /// Adds a catalog service to the package, initializing the package
    /// first when none exists.
    ///
    /// The two steps are sequential, never recursive: ensure the
    /// aggregate exists, then mutate it. Re-adding an already selected
    /// service replaces the selection in place.
    ///
    /// # Arguments
    ///
    /// * `service` - The catalog service
    /// * `persons` - The person count for this selection
    /// * `date` - The selection date, if any
    /// * `time` - The selection time of day, if any
    /// * `notes` - Free-form notes, if any
    ///
    /// # Errors
    ///
    /// Returns an error if `persons` is zero or the service record is
    /// malformed.
    pub fn add_service(
        &mut self,
        service: Service,
        persons: u32,
        date: Option<Date>,
        time: Option<Time>,
        notes: Option<String>,
    ) -> Result<(), CoreError> {
        self.initialize_package()?;
        self.dispatch(Command::AddService {
            service,
            persons,
            date,
            time,
            notes,
        })
    }

    /// Removes a selection from every category module that holds it,
    /// dropping modules that become empty.
    ///
    /// # Arguments
    ///
    /// * `service_id` - The service id to remove
    ///
    /// # Errors
    ///
    /// This operation is fail-soft: an unknown id leaves the state
    /// unchanged. The `Result` keeps the mutation surface uniform.
    pub fn remove_service(&mut self, service_id: &ServiceId) -> Result<(), CoreError> {
        self.dispatch(Command::RemoveService {
            service_id: service_id.clone(),
        })
    }

    /// Changes a selection's person count and reprices it using the
    /// selection's existing date.
    ///
    /// # Arguments
    ///
    /// * `service_id` - The service id to update
    /// * `persons` - The new person count
    ///
    /// # Errors
    ///
    /// Returns an error if `persons` is zero. An unknown id is
    /// fail-soft.
    pub fn update_service_persons(
        &mut self,
        service_id: &ServiceId,
        persons: u32,
    ) -> Result<(), CoreError> {
        self.dispatch(Command::UpdateServicePersons {
            service_id: service_id.clone(),
            persons,
        })
    }

    /// Replaces a selection's date without repricing it.
    ///
    /// # Arguments
    ///
    /// * `service_id` - The service id to update
    /// * `date` - The new date, if any
    ///
    /// # Errors
    ///
    /// This operation is fail-soft; the `Result` keeps the mutation
    /// surface uniform.
    pub fn update_service_date(
        &mut self,
        service_id: &ServiceId,
        date: Option<Date>,
    ) -> Result<(), CoreError> {
        self.dispatch(Command::UpdateServiceDate {
            service_id: service_id.clone(),
            date,
        })
    }

    /// Replaces a selection's time of day without repricing it.
    ///
    /// # Arguments
    ///
    /// * `service_id` - The service id to update
    /// * `time` - The new time, if any
    ///
    /// # Errors
    ///
    /// This operation is fail-soft; the `Result` keeps the mutation
    /// surface uniform.
    pub fn update_service_time(
        &mut self,
        service_id: &ServiceId,
        time: Option<Time>,
    ) -> Result<(), CoreError> {
        self.dispatch(Command::UpdateServiceTime {
            service_id: service_id.clone(),
            time,
        })
    }

    /// Replaces a selection's notes.
    ///
    /// # Arguments
    ///
    /// * `service_id` - The service id to update
    /// * `notes` - The new notes, if any
    ///
    /// # Errors
    ///
    /// This operation is fail-soft; the `Result` keeps the mutation
    /// surface uniform.
    pub fn update_service_notes(
        &mut self,
        service_id: &ServiceId,
        notes: Option<String>,
    ) -> Result<(), CoreError> {
        self.dispatch(Command::UpdateServiceNotes {
            service_id: service_id.clone(),
            notes,
        })
    }

    /// Sets the package-level headcount.
    ///
    /// Informational only: per-service person counts and every subtotal
    /// stay untouched.
    ///
    /// # Arguments
    ///
    /// * `persons` - The new headcount
    ///
    /// # Errors
    ///
    /// Returns an error if `persons` is zero.
    pub fn set_total_persons(&mut self, persons: u32) -> Result<(), CoreError> {
        self.dispatch(Command::SetTotalPersons { persons })
    }

    /// Sets the package-level date range, independent of per-service
    /// dates.
    ///
    /// # Arguments
    ///
    /// * `date_range` - The new date range
    ///
    /// # Errors
    ///
    /// This operation has no preconditions (the range validates at
    /// construction); the `Result` keeps the mutation surface uniform.
    pub fn set_date_range(&mut self, date_range: DateRange) -> Result<(), CoreError> {
        self.dispatch(Command::SetDateRange { date_range })
    }

    /// Moves the package along its lifecycle.
    ///
    /// Invalid transitions and a missing package are fail-soft; totals
    /// are never touched.
    ///
    /// # Arguments
    ///
    /// * `status` - The target status
    ///
    /// # Errors
    ///
    /// This operation is fail-soft; the `Result` keeps the mutation
    /// surface uniform.
    pub fn set_status(&mut self, status: PackageStatus) -> Result<(), CoreError> {
        self.dispatch(Command::SetStatus { status })
    }

    /// Recomputes the package totals from the cached line subtotals.
    ///
    /// Idempotent: repeated calls leave the totals unchanged.
    ///
    /// # Errors
    ///
    /// This operation has no preconditions; the `Result` keeps the
    /// mutation surface uniform.
    pub fn calculate_prices(&mut self) -> Result<(), CoreError> {
        self.dispatch(Command::RecalculatePrices)
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> &PackageState {
        &self.state
    }

    /// Returns the package under composition, if any.
    #[must_use]
    pub const fn package(&self) -> Option<&PackageAggregate> {
        self.state.aggregate.as_ref()
    }

    /// Returns the package subtotal, or zero when no package exists.
    #[must_use]
    pub fn subtotal(&self) -> Money {
        self.package().map_or_else(Money::zero, |p| p.subtotal)
    }

    /// Returns the package taxes, or zero when no package exists.
    #[must_use]
    pub fn taxes(&self) -> Money {
        self.package().map_or_else(Money::zero, |p| p.taxes)
    }

    /// Returns the package total, or zero when no package exists.
    #[must_use]
    pub fn total(&self) -> Money {
        self.package().map_or_else(Money::zero, |p| p.total)
    }

    /// Returns the number of selected services across all modules.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.package().map_or(0, PackageAggregate::item_count)
    }

    /// Returns the package-level headcount.
    #[must_use]
    pub const fn total_persons(&self) -> u32 {
        self.state.total_persons
    }

    /// Returns the package-level date range, if set.
    #[must_use]
    pub const fn date_range(&self) -> Option<DateRange> {
        self.state.date_range
    }

    /// Returns the owning session's identifier.
    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Returns the audit trail of every transition so far.
    #[must_use]
    pub fn audit_trail(&self) -> &[AuditEvent] {
        &self.audit_log
    }

    /// Takes a snapshot of the durable state for persistence.
    ///
    /// The snapshot holds the aggregate, headcount, and date range;
    /// the audit trail and session identity are not part of it.
    #[must_use]
    pub fn snapshot(&self) -> PackageState {
        self.state.clone()
    }

    /// Restores a previously persisted snapshot, replacing the current
    /// state.
    ///
    /// The audit trail is kept: restoration is part of the session's
    /// history, not a rewrite of it.
    ///
    /// # Arguments
    ///
    /// * `snapshot` - The state to restore
    pub fn restore(&mut self, snapshot: PackageState) {
        self.state = snapshot;
    }

    /// Applies a command and replaces the state on success.
    fn dispatch(&mut self, command: Command) -> Result<(), CoreError> {
        let transition: TransitionResult = apply(
            &self.state,
            command,
            self.actor.clone(),
            OffsetDateTime::now_utc(),
        )?;
        self.state = transition.new_state;
        self.audit_log.push(transition.audit_event);
        Ok(())
    }

    /// Generates the next package identifier for this session.
    fn next_package_id(&mut self) -> PackageId {
        self.package_seq += 1;
        PackageId::new(format!("{}-pkg-{}", self.session_id, self.package_seq))
    }
}
