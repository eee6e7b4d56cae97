// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::tests::service;
use crate::types::{Money, Service, ServiceCategory, ServiceId};
use crate::validation::{
    validate_person_count, validate_persons_within_bounds, validate_service,
};

#[test]
fn test_person_count_of_zero_is_rejected() {
    assert!(matches!(
        validate_person_count(0),
        Err(DomainError::InvalidPersonCount { persons: 0 })
    ));
    assert!(validate_person_count(1).is_ok());
    assert!(validate_person_count(40).is_ok());
}

#[test]
fn test_bounds_check_is_opt_in_and_inclusive() {
    let mut service: Service = service("tour-1", ServiceCategory::Tours, 80_000);
    service.min_persons = 2;
    service.max_persons = 6;

    assert!(validate_persons_within_bounds(&service, 2).is_ok());
    assert!(validate_persons_within_bounds(&service, 6).is_ok());
    assert!(matches!(
        validate_persons_within_bounds(&service, 1),
        Err(DomainError::PersonsOutOfBounds { persons: 1, .. })
    ));
    assert!(matches!(
        validate_persons_within_bounds(&service, 7),
        Err(DomainError::PersonsOutOfBounds { persons: 7, .. })
    ));
}

#[test]
fn test_service_with_empty_id_is_rejected() {
    let mut service: Service = service("tour-1", ServiceCategory::Tours, 80_000);
    service.service_id = ServiceId::new("");

    assert!(matches!(
        validate_service(&service),
        Err(DomainError::InvalidServiceId(_))
    ));
}

#[test]
fn test_service_with_empty_name_is_rejected() {
    let mut service: Service = service("tour-1", ServiceCategory::Tours, 80_000);
    service.name = String::new();

    assert!(matches!(
        validate_service(&service),
        Err(DomainError::InvalidServiceName(_))
    ));
}

#[test]
fn test_service_with_negative_price_is_rejected() {
    let mut service: Service = service("tour-1", ServiceCategory::Tours, 80_000);
    service.base_price = Money::new(-1);

    assert!(matches!(
        validate_service(&service),
        Err(DomainError::InvalidBasePrice { amount: -1 })
    ));
}

#[test]
fn test_well_formed_service_passes() {
    let service: Service = service("tour-1", ServiceCategory::Tours, 80_000);

    assert!(validate_service(&service).is_ok());
}
