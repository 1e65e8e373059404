//! Vehicle entity.
//!
//! # Responsibility
//! - Define the record stored in the `vehicles` table.
//!
//! # Invariants
//! - `id` is `None` until a repository assigns it on first save.
//! - A persisted id is immutable and never reused for another vehicle.

use serde::{Deserialize, Serialize};

/// Numeric identity assigned by persistence.
pub type VehicleId = i64;

/// Stored vehicle record.
///
/// Domain fields are optional so a full replace can clear them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Storage identity. `None` for values that were never saved.
    pub id: Option<VehicleId>,
    /// Manufacturer, e.g. `Ford`.
    pub make: Option<String>,
    pub model: Option<String>,
    pub colour: Option<String>,
    /// Model year.
    pub year: Option<i32>,
    /// Asking price in minor currency units.
    pub price_pence: Option<i64>,
}

impl Vehicle {
    /// Creates an unsaved vehicle with make and model set.
    pub fn new(make: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            id: None,
            make: Some(make.into()),
            model: Some(model.into()),
            ..Self::default()
        }
    }

    /// Returns whether this value carries a persistence-assigned id.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}
