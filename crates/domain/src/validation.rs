// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::Service;

/// Validates that a person count meets the pricing precondition.
///
/// This is the only quantity rule enforced inside the pricing path.
///
/// # Arguments
///
/// * `persons` - The person count to validate
///
/// # Returns
///
/// * `Ok(())` if the count is at least 1
/// * `Err(DomainError::InvalidPersonCount)` otherwise
///
/// # Errors
///
/// Returns an error if the person count is zero.
pub const fn validate_person_count(persons: u32) -> Result<(), DomainError> {
    if persons == 0 {
        return Err(DomainError::InvalidPersonCount { persons });
    }
    Ok(())
}

/// Validates a person count against a service's catalog bounds.
///
/// The mutation path does NOT call this: out-of-bounds values pass
/// through unchanged, preserving the marketplace's existing behavior.
/// Callers that want enforcement opt in explicitly.
///
/// # Arguments
///
/// * `service` - The catalog service supplying the bounds
/// * `persons` - The person count to validate
///
/// # Returns
///
/// * `Ok(())` if the count is within `min_persons..=max_persons`
/// * `Err(DomainError::PersonsOutOfBounds)` otherwise
///
/// # Errors
///
/// Returns an error if the person count is outside the catalog bounds.
pub fn validate_persons_within_bounds(
    service: &Service,
    persons: u32,
) -> Result<(), DomainError> {
    if persons < service.min_persons || persons > service.max_persons {
        return Err(DomainError::PersonsOutOfBounds {
            service_id: service.service_id.value().to_owned(),
            persons,
            min_persons: service.min_persons,
            max_persons: service.max_persons,
        });
    }
    Ok(())
}

/// Validates a catalog service's basic field constraints.
///
/// Catalog data is supplied by the caller at call time; this check
/// rejects records that could not have come from a well-formed catalog.
///
/// # Arguments
///
/// * `service` - The service to validate
///
/// # Returns
///
/// * `Ok(())` if the service's fields are valid
/// * `Err(DomainError)` if any field is invalid
///
/// # Errors
///
/// Returns an error if:
/// - The service identifier is empty
/// - The service name is empty
/// - The base price is negative
pub fn validate_service(service: &Service) -> Result<(), DomainError> {
    if service.service_id.value().is_empty() {
        return Err(DomainError::InvalidServiceId(String::from(
            "Service identifier cannot be empty",
        )));
    }

    if service.name.is_empty() {
        return Err(DomainError::InvalidServiceName(String::from(
            "Service name cannot be empty",
        )));
    }

    if service.base_price.amount() < 0 {
        return Err(DomainError::InvalidBasePrice {
            amount: service.base_price.amount(),
        });
    }

    Ok(())
}
