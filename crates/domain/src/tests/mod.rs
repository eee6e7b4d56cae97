// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod validation;

use crate::types::{Currency, Money, SeasonalMultipliers, Service, ServiceCategory, ServiceId};

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

pub fn seasonal_service(id: &str, base_price: i64, high: f64, low: f64) -> Service {
    let mut service: Service = service(id, ServiceCategory::Astronomy, base_price);
    service.seasonal_multipliers = Some(SeasonalMultipliers::new(high, low).unwrap());
    service
}
