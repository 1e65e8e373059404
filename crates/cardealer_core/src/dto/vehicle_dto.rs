//! Vehicle transfer object and entity mapping.
//!
//! # Responsibility
//! - Represent a vehicle as clients send and receive it.
//! - Convert between `VehicleDto` and `Vehicle` with explicit field lists.
//!
//! # Invariants
//! - Mapping copies every domain field, including `None` values.
//! - DTO id text never flows into an entity; callers pass identity explicitly.

use crate::model::vehicle::{Vehicle, VehicleId};
use serde::{Deserialize, Serialize};

/// Client-facing vehicle representation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDto {
    /// Decimal id text. Absent on create requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub make: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub colour: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub price_pence: Option<i64>,
}

impl VehicleDto {
    /// Builds an entity from this DTO using the caller-provided identity.
    ///
    /// `self.id` is ignored: create paths pass `None` so storage assigns the
    /// id, update paths pass the already-validated id.
    pub fn to_entity(&self, id: Option<VehicleId>) -> Vehicle {
        Vehicle {
            id,
            make: self.make.clone(),
            model: self.model.clone(),
            colour: self.colour.clone(),
            year: self.year,
            price_pence: self.price_pence,
        }
    }
}

impl From<Vehicle> for VehicleDto {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id.map(|id| id.to_string()),
            make: vehicle.make,
            model: vehicle.model,
            colour: vehicle.colour,
            year: vehicle.year,
            price_pence: vehicle.price_pence,
        }
    }
}

impl From<&Vehicle> for VehicleDto {
    fn from(vehicle: &Vehicle) -> Self {
        Self::from(vehicle.clone())
    }
}
