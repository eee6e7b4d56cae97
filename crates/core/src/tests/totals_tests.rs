// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! End-to-end totals scenarios exercising the aggregation arithmetic
//! through the public operation surface.

use crate::orchestrator::PackageOrchestrator;
use crate::tests::helpers::{
    assert_totals_invariants, astronomy_service, date, lodging_service, orchestrator, service,
};
use tatacoa_package_domain::{Money, ServiceCategory, ServiceId};
use time::Month;

#[test]
fn test_two_lodging_services_scenario() {
    // Two lodging services at 200_000 base for 2 and 3 persons:
    // 400_000 + 600_000 = 1_000_000; taxes 190_000; total 1_190_000.
    let mut orchestrator: PackageOrchestrator = orchestrator();

    orchestrator
        .add_service(lodging_service("cabin-1", 200_000), 2, None, None, None)
        .unwrap();
    orchestrator
        .add_service(lodging_service("cabin-2", 200_000), 3, None, None, None)
        .unwrap();

    let package = orchestrator.package().unwrap();
    let module = &package.modules[&ServiceCategory::Lodging];
    assert_eq!(module.items.len(), 2);
    assert_eq!(module.subtotal, Money::new(1_000_000));
    assert_eq!(orchestrator.subtotal(), Money::new(1_000_000));
    assert_eq!(orchestrator.taxes(), Money::new(190_000));
    assert_eq!(orchestrator.total(), Money::new(1_190_000));
    assert_totals_invariants(package);
}

#[test]
fn test_removing_one_of_two_services_recomputes() {
    let mut orchestrator: PackageOrchestrator = orchestrator();
    orchestrator
        .add_service(lodging_service("cabin-1", 200_000), 2, None, None, None)
        .unwrap();
    orchestrator
        .add_service(lodging_service("cabin-2", 200_000), 3, None, None, None)
        .unwrap();

    orchestrator.remove_service(&ServiceId::new("cabin-1")).unwrap();

    let package = orchestrator.package().unwrap();
    let module = &package.modules[&ServiceCategory::Lodging];
    assert_eq!(module.items.len(), 1);
    assert_eq!(module.items[0].service.service_id, ServiceId::new("cabin-2"));
    assert_eq!(module.subtotal, Money::new(600_000));
    assert_eq!(orchestrator.subtotal(), Money::new(600_000));
    assert_eq!(orchestrator.taxes(), Money::new(114_000));
    assert_eq!(orchestrator.total(), Money::new(714_000));
    assert_totals_invariants(package);
}

#[test]
fn test_headcount_change_leaves_totals_unchanged() {
    let mut orchestrator: PackageOrchestrator = orchestrator();
    orchestrator
        .add_service(lodging_service("cabin-1", 200_000), 2, None, None, None)
        .unwrap();
    orchestrator
        .add_service(lodging_service("cabin-2", 200_000), 3, None, None, None)
        .unwrap();

    orchestrator.set_total_persons(4).unwrap();

    assert_eq!(orchestrator.total_persons(), 4);
    assert_eq!(orchestrator.package().unwrap().total_persons, 4);
    assert_eq!(orchestrator.subtotal(), Money::new(1_000_000));
    assert_eq!(orchestrator.taxes(), Money::new(190_000));
    assert_eq!(orchestrator.total(), Money::new(1_190_000));
}

#[test]
fn test_mixed_categories_aggregate_per_module_and_package() {
    let mut orchestrator: PackageOrchestrator = orchestrator();
    orchestrator
        .add_service(lodging_service("cabin-1", 200_000), 2, None, None, None)
        .unwrap();
    orchestrator
        .add_service(service("lunch-1", ServiceCategory::Meals, 35_000), 2, None, None, None)
        .unwrap();
    orchestrator
        .add_service(
            astronomy_service("astro-1", 100_000, 1.3, 0.9),
            2,
            Some(date(2026, Month::December, 20)),
            None,
            None,
        )
        .unwrap();

    let package = orchestrator.package().unwrap();
    assert_eq!(package.modules.len(), 3);
    assert_eq!(
        package.modules[&ServiceCategory::Lodging].subtotal,
        Money::new(400_000)
    );
    assert_eq!(
        package.modules[&ServiceCategory::Meals].subtotal,
        Money::new(70_000)
    );
    assert_eq!(
        package.modules[&ServiceCategory::Astronomy].subtotal,
        Money::new(260_000)
    );
    // 400_000 + 70_000 + 260_000 = 730_000; taxes 138_700.
    assert_eq!(orchestrator.subtotal(), Money::new(730_000));
    assert_eq!(orchestrator.taxes(), Money::new(138_700));
    assert_eq!(orchestrator.total(), Money::new(868_700));
    assert_totals_invariants(package);
}

#[test]
fn test_invariants_hold_after_every_operation() {
    let mut orchestrator: PackageOrchestrator = orchestrator();

    orchestrator
        .add_service(lodging_service("cabin-1", 200_000), 2, None, None, None)
        .unwrap();
    assert_totals_invariants(orchestrator.package().unwrap());

    orchestrator
        .add_service(service("tour-1", ServiceCategory::Tours, 80_000), 4, None, None, None)
        .unwrap();
    assert_totals_invariants(orchestrator.package().unwrap());

    orchestrator
        .update_service_persons(&ServiceId::new("tour-1"), 2)
        .unwrap();
    assert_totals_invariants(orchestrator.package().unwrap());

    orchestrator
        .update_service_notes(&ServiceId::new("cabin-1"), Some(String::from("Ground floor")))
        .unwrap();
    assert_totals_invariants(orchestrator.package().unwrap());

    orchestrator.remove_service(&ServiceId::new("cabin-1")).unwrap();
    assert_totals_invariants(orchestrator.package().unwrap());

    orchestrator.calculate_prices().unwrap();
    assert_totals_invariants(orchestrator.package().unwrap());
}

#[test]
fn test_calculate_prices_is_a_public_idempotent_alias() {
    let mut orchestrator: PackageOrchestrator = orchestrator();
    orchestrator
        .add_service(lodging_service("cabin-1", 200_000), 2, None, None, None)
        .unwrap();
    let total_before: Money = orchestrator.total();

    orchestrator.calculate_prices().unwrap();
    orchestrator.calculate_prices().unwrap();

    assert_eq!(orchestrator.total(), total_before);
}
