// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::state::SelectedService;
use serde::{Deserialize, Serialize};
use tatacoa_package_domain::{DomainError, Money, ServiceCategory, ServiceId, line_subtotal};
use time::{Date, Time};

/// A detail field on a selected service.
///
/// Detail updates replace the field without recomputing the line
/// subtotal; a date change does not re-trigger seasonal repricing.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceDetail {
    /// The selection date.
    Date(Option<Date>),
    /// The selection time of day.
    Time(Option<Time>),
    /// Free-form notes.
    Notes(Option<String>),
}

/// The selections belonging to one service category within a package.
///
/// Items are ordered and unique per service id. Invariant: `subtotal`
/// equals the sum of all item subtotals. A module with zero items is
/// never stored in the aggregate; removal of the last item removes the
/// module itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryModule {
    /// The category this module groups.
    pub category: ServiceCategory,
    /// The selected services, in insertion order.
    pub items: Vec<SelectedService>,
    /// Sum of all item subtotals.
    pub subtotal: Money,
}

impl CategoryModule {
    /// Creates an empty module for a category.
    ///
    /// # Arguments
    ///
    /// * `category` - The category this module groups
    #[must_use]
    pub const fn new(category: ServiceCategory) -> Self {
        Self {
            category,
            items: Vec::new(),
            subtotal: Money::zero(),
        }
    }

    /// Inserts or replaces a selection in a module, creating the module
    /// if it does not exist yet.
    ///
    /// An existing item with the same service id is replaced in place,
    /// preserving its position; otherwise the item is appended. The
    /// module subtotal is recomputed either way.
    ///
    /// # Arguments
    ///
    /// * `existing` - The category's current module, if any
    /// * `item` - The freshly computed selection
    #[must_use]
    pub fn upsert(existing: Option<Self>, item: SelectedService) -> Self {
        let mut module: Self = existing.unwrap_or_else(|| Self::new(item.service.category));
        let position: Option<usize> = module
            .items
            .iter()
            .position(|slot| slot.service.service_id == item.service.service_id);
        match position {
            Some(index) => module.items[index] = item,
            None => module.items.push(item),
        }
        module.recompute_subtotal();
        module
    }

    /// Removes any item matching a service id.
    ///
    /// Returns `None` when the removal empties the module; the caller
    /// must then delete the module from the aggregate.
    ///
    /// # Arguments
    ///
    /// * `service_id` - The service id to remove
    #[must_use]
    pub fn remove(mut self, service_id: &ServiceId) -> Option<Self> {
        self.items
            .retain(|item| &item.service.service_id != service_id);
        if self.items.is_empty() {
            return None;
        }
        self.recompute_subtotal();
        Some(self)
    }

    /// Updates the person count of the item matching a service id.
    ///
    /// The item's subtotal is recomputed from its *existing* date, then
    /// the module subtotal is recomputed. Returns `false` (module
    /// unchanged) when no item matches.
    ///
    /// # Arguments
    ///
    /// * `service_id` - The service id to update
    /// * `persons` - The new person count (must be at least 1)
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPersonCount` if `persons` is zero
    /// and an item matches.
    pub fn update_persons(
        &mut self,
        service_id: &ServiceId,
        persons: u32,
    ) -> Result<bool, DomainError> {
        let Some(item) = self
            .items
            .iter_mut()
            .find(|item| &item.service.service_id == service_id)
        else {
            return Ok(false);
        };
        item.subtotal = line_subtotal(&item.service, persons, item.date)?;
        item.persons = persons;
        self.recompute_subtotal();
        Ok(true)
    }

    /// Replaces a detail field on the item matching a service id.
    ///
    /// Detail updates never recompute any subtotal. Returns `false`
    /// when no item matches.
    ///
    /// # Arguments
    ///
    /// * `service_id` - The service id to update
    /// * `detail` - The replacement field value
    pub fn update_detail(&mut self, service_id: &ServiceId, detail: ServiceDetail) -> bool {
        let Some(item) = self
            .items
            .iter_mut()
            .find(|item| &item.service.service_id == service_id)
        else {
            return false;
        };
        match detail {
            ServiceDetail::Date(date) => item.date = date,
            ServiceDetail::Time(time) => item.time = time,
            ServiceDetail::Notes(notes) => item.notes = notes,
        }
        true
    }

    /// Returns whether an item matching a service id exists.
    #[must_use]
    pub fn contains(&self, service_id: &ServiceId) -> bool {
        self.items
            .iter()
            .any(|item| &item.service.service_id == service_id)
    }

    /// Returns the item matching a service id, if any.
    #[must_use]
    pub fn item(&self, service_id: &ServiceId) -> Option<&SelectedService> {
        self.items
            .iter()
            .find(|item| &item.service.service_id == service_id)
    }

    /// Returns the number of items in this module.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Recomputes the cached module subtotal from the item subtotals.
    fn recompute_subtotal(&mut self) {
        self.subtotal = self.items.iter().map(|item| item.subtotal).sum();
    }
}
