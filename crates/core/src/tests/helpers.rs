// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::orchestrator::PackageOrchestrator;
use crate::state::PackageAggregate;
use tatacoa_package_audit::Actor;
use tatacoa_package_domain::{
    Currency, Money, SeasonalMultipliers, Service, ServiceCategory, ServiceId, tax_on,
};
use time::{Date, Month};

pub fn test_actor() -> Actor {
    Actor::new(String::from("visitor-123"), String::from("visitor"))
}

pub fn orchestrator() -> PackageOrchestrator {
    PackageOrchestrator::new("session-abc", test_actor())
}

pub fn service(id: &str, category: ServiceCategory, base_price: i64) -> Service {
    Service::new(
        ServiceId::new(id),
        format!("Test service {id}"),
        category,
        None,
        Money::new(base_price),
        Currency::Cop,
        1,
        10,
        None,
    )
}

pub fn lodging_service(id: &str, base_price: i64) -> Service {
    service(id, ServiceCategory::Lodging, base_price)
}

pub fn astronomy_service(id: &str, base_price: i64, high: f64, low: f64) -> Service {
    let mut service: Service = service(id, ServiceCategory::Astronomy, base_price);
    service.seasonal_multipliers = Some(SeasonalMultipliers::new(high, low).unwrap());
    service
}

pub fn date(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).unwrap()
}

/// Asserts the derived-totals invariants: every module subtotal is the
/// sum of its item subtotals, the package subtotal is the sum of module
/// subtotals, and tax and total follow.
pub fn assert_totals_invariants(package: &PackageAggregate) {
    for module in package.modules.values() {
        let items_sum: Money = module.items.iter().map(|item| item.subtotal).sum();
        assert_eq!(module.subtotal, items_sum);
        assert!(!module.items.is_empty());
    }
    let modules_sum: Money = package.modules.values().map(|module| module.subtotal).sum();
    assert_eq!(package.subtotal, modules_sum);
    assert_eq!(package.taxes, tax_on(package.subtotal));
    assert_eq!(package.total, package.subtotal + package.taxes);
}
