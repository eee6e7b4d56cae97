// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::module::{CategoryModule, ServiceDetail};
use crate::state::{PackageAggregate, PackageState, SelectedService, TransitionResult};
use tatacoa_package_audit::{Action, Actor, AuditEvent, PackageDigest};
use tatacoa_package_domain::{
    ServiceCategory, ServiceId, validate_person_count, validate_service,
};
use time::OffsetDateTime;

/// Applies a command to the current state, producing a new state and
/// audit event.
///
/// Transitions are atomic: they either succeed completely or fail
/// without side effects. The fail-soft policy applies throughout: a
/// command naming a service id that is not in the package, or acting
/// when no package exists, returns the unchanged state with an audit
/// event rather than an error. Errors arise only from genuine
/// precondition violations.
///
/// # Arguments
///
/// * `state` - The current state (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this operation
/// * `now` - The mutation timestamp, supplied by the caller so the
///   transition stays deterministic
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new state and audit event
/// * `Err(CoreError)` if the command violates a precondition
///
/// # Errors
///
/// Returns an error if:
/// - A person count is zero
/// - A supplied catalog service is malformed
#[allow(clippy::too_many_lines)]
pub fn apply(
    state: &PackageState,
    command: Command,
    actor: Actor,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    let before: PackageDigest = state.digest();

    match command {
        Command::InitializePackage { package_id } => {
            // Idempotent: a second initialization never replaces the
            // package being composed.
            if state.aggregate.is_some() {
                return Ok(no_op(
                    state,
                    actor,
                    "InitializePackage",
                    Some(String::from("Package already initialized")),
                    before,
                    now,
                ));
            }

            let mut new_state: PackageState = state.clone();
            new_state.aggregate = Some(PackageAggregate::new(
                package_id.clone(),
                state.total_persons,
                state.date_range,
                now,
            ));

            let after: PackageDigest = new_state.digest();
            let action: Action = Action::new(
                String::from("InitializePackage"),
                Some(format!("Initialized draft package '{package_id}'")),
            );

            Ok(TransitionResult {
                new_state,
                audit_event: AuditEvent::new(actor, action, before, after, now),
            })
        }
        Command::ClearPackage => {
            // Full reset, not a partial one: headcount and date range
            // return to their defaults alongside the aggregate.
            let new_state: PackageState = PackageState::new();

            let after: PackageDigest = new_state.digest();
            let action: Action = Action::new(
                String::from("ClearPackage"),
                Some(String::from("Discarded package and reset selections")),
            );

            Ok(TransitionResult {
                new_state,
                audit_event: AuditEvent::new(actor, action, before, after, now),
            })
        }
        Command::AddService {
            service,
            persons,
            date,
            time,
            notes,
        } => {
            validate_service(&service)?;

            let Some(aggregate) = &state.aggregate else {
                // The orchestrator initializes before adding; reaching
                // this arm without a package is a caller sequencing
                // mistake and stays fail-soft.
                return Ok(no_op(
                    state,
                    actor,
                    "AddService",
                    Some(String::from("No active package")),
                    before,
                    now,
                ));
            };

            let item: SelectedService =
                SelectedService::new(service, persons, date, time, notes)?;
            let category: ServiceCategory = item.service.category;
            let details: String = format!(
                "Added service '{}' for {} persons to {}",
                item.service.service_id, item.persons, category
            );

            let mut new_aggregate: PackageAggregate = aggregate.clone();
            let module: CategoryModule =
                CategoryModule::upsert(new_aggregate.modules.remove(&category), item);
            new_aggregate.modules.insert(category, module);
            new_aggregate.recompute_totals(now);

            let mut new_state: PackageState = state.clone();
            new_state.aggregate = Some(new_aggregate);

            let after: PackageDigest = new_state.digest();
            let action: Action = Action::new(String::from("AddService"), Some(details));

            Ok(TransitionResult {
                new_state,
                audit_event: AuditEvent::new(actor, action, before, after, now),
            })
        }
        Command::RemoveService { service_id } => {
            let Some(aggregate) = &state.aggregate else {
                return Ok(no_op(
                    state,
                    actor,
                    "RemoveService",
                    Some(String::from("No active package")),
                    before,
                    now,
                ));
            };

            // Service ids are globally unique in practice, but the scan
            // is defensive: every module is checked and emptied modules
            // are dropped from the aggregate.
            let mut new_aggregate: PackageAggregate = aggregate.clone();
            let mut removed: bool = false;
            let categories: Vec<ServiceCategory> =
                new_aggregate.modules.keys().copied().collect();
            for category in categories {
                if let Some(module) = new_aggregate.modules.remove(&category) {
                    let matched: bool = module.contains(&service_id);
                    if let Some(kept) = module.remove(&service_id) {
                        new_aggregate.modules.insert(category, kept);
                    }
                    removed = removed || matched;
                }
            }

            if !removed {
                return Ok(no_op(
                    state,
                    actor,
                    "RemoveService",
                    Some(format!("Service '{service_id}' not in package")),
                    before,
                    now,
                ));
            }

            new_aggregate.recompute_totals(now);

            let mut new_state: PackageState = state.clone();
            new_state.aggregate = Some(new_aggregate);

            let after: PackageDigest = new_state.digest();
            let action: Action = Action::new(
                String::from("RemoveService"),
                Some(format!("Removed service '{service_id}'")),
            );

            Ok(TransitionResult {
                new_state,
                audit_event: AuditEvent::new(actor, action, before, after, now),
            })
        }
        Command::UpdateServicePersons {
            service_id,
            persons,
        } => {
            validate_person_count(persons)?;

            let Some(aggregate) = &state.aggregate else {
                return Ok(no_op(
                    state,
                    actor,
                    "UpdateServicePersons",
                    Some(String::from("No active package")),
                    before,
                    now,
                ));
            };

            let mut new_aggregate: PackageAggregate = aggregate.clone();
            let mut changed: bool = false;
            for module in new_aggregate.modules.values_mut() {
                changed |= module.update_persons(&service_id, persons)?;
            }

            if !changed {
                return Ok(no_op(
                    state,
                    actor,
                    "UpdateServicePersons",
                    Some(format!("Service '{service_id}' not in package")),
                    before,
                    now,
                ));
            }

            new_aggregate.recompute_totals(now);

            let mut new_state: PackageState = state.clone();
            new_state.aggregate = Some(new_aggregate);

            let after: PackageDigest = new_state.digest();
            let action: Action = Action::new(
                String::from("UpdateServicePersons"),
                Some(format!(
                    "Set persons of service '{service_id}' to {persons}"
                )),
            );

            Ok(TransitionResult {
                new_state,
                audit_event: AuditEvent::new(actor, action, before, after, now),
            })
        }
        Command::UpdateServiceDate { service_id, date } => Ok(apply_detail_update(
            state,
            actor,
            now,
            "UpdateServiceDate",
            &service_id,
            ServiceDetail::Date(date),
        )),
        Command::UpdateServiceTime { service_id, time } => Ok(apply_detail_update(
            state,
            actor,
            now,
            "UpdateServiceTime",
            &service_id,
            ServiceDetail::Time(time),
        )),
        Command::UpdateServiceNotes { service_id, notes } => Ok(apply_detail_update(
            state,
            actor,
            now,
            "UpdateServiceNotes",
            &service_id,
            ServiceDetail::Notes(notes),
        )),
        Command::SetTotalPersons { persons } => {
            validate_person_count(persons)?;

            let mut new_state: PackageState = state.clone();
            new_state.total_persons = persons;
            // The headcount is informational: per-service person counts
            // and every subtotal stay untouched.
            if let Some(aggregate) = &mut new_state.aggregate {
                aggregate.total_persons = persons;
                aggregate.touch(now);
            }

            let after: PackageDigest = new_state.digest();
            let action: Action = Action::new(
                String::from("SetTotalPersons"),
                Some(format!("Set package headcount to {persons}")),
            );

            Ok(TransitionResult {
                new_state,
                audit_event: AuditEvent::new(actor, action, before, after, now),
            })
        }
        Command::SetDateRange { date_range } => {
            let mut new_state: PackageState = state.clone();
            new_state.date_range = Some(date_range);
            if let Some(aggregate) = &mut new_state.aggregate {
                aggregate.date_range = Some(date_range);
                aggregate.touch(now);
            }

            let after: PackageDigest = new_state.digest();
            let action: Action = Action::new(
                String::from("SetDateRange"),
                Some(format!(
                    "Set package dates to {} - {}",
                    date_range.check_in(),
                    date_range.check_out()
                )),
            );

            Ok(TransitionResult {
                new_state,
                audit_event: AuditEvent::new(actor, action, before, after, now),
            })
        }
        Command::SetStatus { status } => {
            let Some(aggregate) = &state.aggregate else {
                return Ok(no_op(
                    state,
                    actor,
                    "SetStatus",
                    Some(String::from("No active package")),
                    before,
                    now,
                ));
            };

            if !aggregate.status.can_transition_to(status) {
                return Ok(no_op(
                    state,
                    actor,
                    "SetStatus",
                    Some(format!(
                        "Transition from {} to {} is not permitted",
                        aggregate.status, status
                    )),
                    before,
                    now,
                ));
            }

            let mut new_aggregate: PackageAggregate = aggregate.clone();
            new_aggregate.status = status;
            new_aggregate.touch(now);

            let mut new_state: PackageState = state.clone();
            new_state.aggregate = Some(new_aggregate);

            let after: PackageDigest = new_state.digest();
            let action: Action = Action::new(
                String::from("SetStatus"),
                Some(format!("Moved package to {status}")),
            );

            Ok(TransitionResult {
                new_state,
                audit_event: AuditEvent::new(actor, action, before, after, now),
            })
        }
        Command::RecalculatePrices => {
            let Some(aggregate) = &state.aggregate else {
                return Ok(no_op(
                    state,
                    actor,
                    "RecalculatePrices",
                    Some(String::from("No active package")),
                    before,
                    now,
                ));
            };

            // Re-aggregates the cached line subtotals; per-item prices
            // are only derived at add or persons-update time.
            let mut new_aggregate: PackageAggregate = aggregate.clone();
            new_aggregate.recompute_totals(now);

            let mut new_state: PackageState = state.clone();
            new_state.aggregate = Some(new_aggregate);

            let after: PackageDigest = new_state.digest();
            let action: Action = Action::new(
                String::from("RecalculatePrices"),
                Some(String::from("Recomputed package totals")),
            );

            Ok(TransitionResult {
                new_state,
                audit_event: AuditEvent::new(actor, action, before, after, now),
            })
        }
    }
}

/// Applies a detail-field replacement to whichever module holds the
/// service. Detail updates stamp `updated_at` but never touch totals.
fn apply_detail_update(
    state: &PackageState,
    actor: Actor,
    now: OffsetDateTime,
    name: &str,
    service_id: &ServiceId,
    detail: ServiceDetail,
) -> TransitionResult {
    let before: PackageDigest = state.digest();

    let Some(aggregate) = &state.aggregate else {
        return no_op(
            state,
            actor,
            name,
            Some(String::from("No active package")),
            before,
            now,
        );
    };

    let mut new_aggregate: PackageAggregate = aggregate.clone();
    let mut found: bool = false;
    for module in new_aggregate.modules.values_mut() {
        found |= module.update_detail(service_id, detail.clone());
    }

    if !found {
        return no_op(
            state,
            actor,
            name,
            Some(format!("Service '{service_id}' not in package")),
            before,
            now,
        );
    }

    new_aggregate.touch(now);

    let mut new_state: PackageState = state.clone();
    new_state.aggregate = Some(new_aggregate);

    let after: PackageDigest = new_state.digest();
    let action: Action = Action::new(
        name.to_owned(),
        Some(format!("Updated details of service '{service_id}'")),
    );

    TransitionResult {
        new_state,
        audit_event: AuditEvent::new(actor, action, before, after, now),
    }
}

/// Builds a fail-soft transition: unchanged state, audit event recorded.
fn no_op(
    state: &PackageState,
    actor: Actor,
    name: &str,
    details: Option<String>,
    before: PackageDigest,
    now: OffsetDateTime,
) -> TransitionResult {
    let action: Action = Action::new(name.to_owned(), details);
    let audit_event: AuditEvent =
        AuditEvent::new(actor, action, before.clone(), before, now);
    TransitionResult {
        new_state: state.clone(),
        audit_event,
    }
}
