// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Date;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Person count must be at least 1.
    InvalidPersonCount {
        /// The invalid count value.
        persons: u32,
    },
    /// Person count is outside the catalog bounds for a service.
    PersonsOutOfBounds {
        /// The service identifier.
        service_id: String,
        /// The requested person count.
        persons: u32,
        /// The catalog minimum.
        min_persons: u32,
        /// The catalog maximum.
        max_persons: u32,
    },
    /// Check-in date must precede check-out date.
    InvalidDateRange {
        /// The check-in date.
        check_in: Date,
        /// The check-out date.
        check_out: Date,
    },
    /// Service identifier is empty or invalid.
    InvalidServiceId(String),
    /// Service name is empty or invalid.
    InvalidServiceName(String),
    /// Service base price is negative.
    InvalidBasePrice {
        /// The invalid amount.
        amount: i64,
    },
    /// A seasonal multiplier factor is not finite and positive.
    InvalidSeasonalFactor(String),
    /// Service category string is not recognized.
    InvalidCategory(String),
    /// Package status string is not recognized.
    InvalidStatus(String),
    /// Currency string is not recognized.
    InvalidCurrency(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPersonCount { persons } => {
                write!(f, "Person count must be at least 1, got {persons}")
            }
            Self::PersonsOutOfBounds {
                service_id,
                persons,
                min_persons,
                max_persons,
            } => {
                write!(
                    f,
                    "Person count {persons} for service '{service_id}' is outside the allowed range {min_persons}-{max_persons}"
                )
            }
            Self::InvalidDateRange {
                check_in,
                check_out,
            } => {
                write!(
                    f,
                    "Check-in date {check_in} must precede check-out date {check_out}"
                )
            }
            Self::InvalidServiceId(msg) => write!(f, "Invalid service identifier: {msg}"),
            Self::InvalidServiceName(msg) => write!(f, "Invalid service name: {msg}"),
            Self::InvalidBasePrice { amount } => {
                write!(f, "Service base price must not be negative, got {amount}")
            }
            Self::InvalidSeasonalFactor(msg) => write!(f, "Invalid seasonal factor: {msg}"),
            Self::InvalidCategory(msg) => write!(f, "Invalid service category: {msg}"),
            Self::InvalidStatus(msg) => write!(f, "Invalid package status: {msg}"),
            Self::InvalidCurrency(msg) => write!(f, "Invalid currency: {msg}"),
        }
    }
}

impl std::error::Error for DomainError {}
