// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use tatacoa_package_domain::{Money, PackageStatus};
use time::OffsetDateTime;

/// Represents the entity performing an operation.
///
/// An actor is any identifiable entity that initiates a package
/// mutation: a marketplace visitor, a support agent, or a system
/// process restoring a saved package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (e.g., "visitor", "agent", "system").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The type of actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }
}

/// Represents the specific operation performed on a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The name of the operation (e.g., "`AddService`", "`RemoveService`").
    pub name: String,
    /// Optional additional details about the operation.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the operation
    /// * `details` - Optional additional details
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// A condensed view of package state at a point in time.
///
/// Digests capture the figures an auditor compares across a transition:
/// how many category modules and selected items the package held and
/// what it totalled. A digest of the empty state (no package) has zero
/// counts and no status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDigest {
    /// Number of category modules in the package.
    pub module_count: usize,
    /// Number of selected services across all modules.
    pub item_count: usize,
    /// The package total including tax.
    pub total: Money,
    /// The package lifecycle status, if a package exists.
    pub status: Option<PackageStatus>,
}

impl PackageDigest {
    /// Creates a new `PackageDigest`.
    ///
    /// # Arguments
    ///
    /// * `module_count` - Number of category modules
    /// * `item_count` - Number of selected services
    /// * `total` - The package total including tax
    /// * `status` - The package lifecycle status, if a package exists
    #[must_use]
    pub const fn new(
        module_count: usize,
        item_count: usize,
        total: Money,
        status: Option<PackageStatus>,
    ) -> Self {
        Self {
            module_count,
            item_count,
            total,
            status,
        }
    }

    /// The digest of the empty state (no package).
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            module_count: 0,
            item_count: 0,
            total: Money::zero(),
            status: None,
        }
    }
}

/// An immutable audit event representing a package state transition.
///
/// Every successful transition must produce exactly one audit event.
/// Events are immutable once created and capture:
/// - Who performed the operation (actor)
/// - What operation was performed (action)
/// - The package digest before the transition (before)
/// - The package digest after the transition (after)
/// - When the transition was recorded (`recorded_at`)
///
/// Fail-soft no-op transitions record events too, so the trail stays
/// complete even when a mutation had no effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// The actor who initiated this transition.
    pub actor: Actor,
    /// The operation that was performed.
    pub action: Action,
    /// The package digest before the transition.
    pub before: PackageDigest,
    /// The package digest after the transition.
    pub after: PackageDigest,
    /// When the transition was recorded.
    pub recorded_at: OffsetDateTime,
}

impl AuditEvent {
    /// Creates a new `AuditEvent`.
    ///
    /// Once created, an audit event is immutable.
    ///
    /// # Arguments
    ///
    /// * `actor` - The actor who initiated the transition
    /// * `action` - The operation that was performed
    /// * `before` - The package digest before the transition
    /// * `after` - The package digest after the transition
    /// * `recorded_at` - When the transition was recorded
    #[must_use]
    pub const fn new(
        actor: Actor,
        action: Action,
        before: PackageDigest,
        after: PackageDigest,
        recorded_at: OffsetDateTime,
    ) -> Self {
        Self {
            actor,
            action,
            before,
            after,
            recorded_at,
        }
    }

    /// Returns whether this event recorded an effective state change.
    #[must_use]
    pub fn changed_state(&self) -> bool {
        self.before != self.after
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tatacoa_package_domain::PackageStatus;

    fn test_actor() -> Actor {
        Actor::new(String::from("visitor-123"), String::from("visitor"))
    }

    fn digest(items: usize, total: i64) -> PackageDigest {
        PackageDigest::new(
            1,
            items,
            Money::new(total),
            Some(PackageStatus::Draft),
        )
    }

    #[test]
    fn test_actor_creation_requires_all_fields() {
        let actor: Actor = test_actor();

        assert_eq!(actor.id, "visitor-123");
        assert_eq!(actor.actor_type, "visitor");
    }

    #[test]
    fn test_action_creation_with_details() {
        let action: Action = Action::new(
            String::from("AddService"),
            Some(String::from("Added service 'astro-1'")),
        );

        assert_eq!(action.name, "AddService");
        assert_eq!(action.details, Some(String::from("Added service 'astro-1'")));
    }

    #[test]
    fn test_empty_digest_has_no_status() {
        let empty: PackageDigest = PackageDigest::empty();

        assert_eq!(empty.module_count, 0);
        assert_eq!(empty.item_count, 0);
        assert!(empty.total.is_zero());
        assert_eq!(empty.status, None);
    }

    #[test]
    fn test_audit_event_captures_before_and_after() {
        let event: AuditEvent = AuditEvent::new(
            test_actor(),
            Action::new(String::from("AddService"), None),
            PackageDigest::empty(),
            digest(1, 238_000),
            OffsetDateTime::UNIX_EPOCH,
        );

        assert_eq!(event.before, PackageDigest::empty());
        assert_eq!(event.after.item_count, 1);
        assert_eq!(event.after.total, Money::new(238_000));
    }

    #[test]
    fn test_no_op_event_reports_unchanged_state() {
        let unchanged: AuditEvent = AuditEvent::new(
            test_actor(),
            Action::new(String::from("RemoveService"), None),
            digest(2, 476_000),
            digest(2, 476_000),
            OffsetDateTime::UNIX_EPOCH,
        );
        let changed: AuditEvent = AuditEvent::new(
            test_actor(),
            Action::new(String::from("RemoveService"), None),
            digest(2, 476_000),
            digest(1, 238_000),
            OffsetDateTime::UNIX_EPOCH,
        );

        assert!(!unchanged.changed_state());
        assert!(changed.changed_state());
    }
}
