//! Core inventory logic for the car dealer backend.
//! Owns the vehicle CRUD contract between transfer objects and storage.

pub mod config;
pub mod db;
pub mod dto;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, CoreConfig};
pub use dto::vehicle_dto::VehicleDto;
pub use logging::{
    default_log_level, init_from_config, init_logging, logging_status, LoggingError,
};
pub use model::vehicle::{Vehicle, VehicleId};
pub use repo::vehicle_repo::{RepoError, RepoResult, SqliteVehicleRepository, VehicleRepository};
pub use service::vehicle_service::{
    parse_identifier, ServiceResult, VehicleService, VehicleServiceError,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
