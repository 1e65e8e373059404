//! Vehicle use-case service.
//!
//! # Responsibility
//! - Translate between the DTO-facing contract and the repository contract.
//! - Enforce identifier presence on updates.
//! - Surface missing records as `VehicleServiceError::NotFound`.
//!
//! # Invariants
//! - The service never assigns ids; storage does on create.
//! - No state is held across calls; every operation re-reads storage.
//! - `update` rejects ids `<= 0` before any storage access.

use crate::dto::vehicle_dto::VehicleDto;
use crate::model::vehicle::VehicleId;
use crate::repo::vehicle_repo::{RepoError, VehicleRepository};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::num::ParseIntError;

pub type ServiceResult<T> = Result<T, VehicleServiceError>;

/// Errors from vehicle service operations.
#[derive(Debug)]
pub enum VehicleServiceError {
    /// No vehicle is stored under this id.
    NotFound(VehicleId),
    /// Update id is absent, zero, or negative.
    MissingIdentifier,
    /// Update id text is not an integer.
    InvalidIdentifier {
        value: String,
        source: ParseIntError,
    },
    /// Repository-level failure.
    Repo(RepoError),
}

impl VehicleServiceError {
    /// HTTP status a controller should render for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::MissingIdentifier | Self::InvalidIdentifier { .. } => 400,
            Self::Repo(_) => 500,
        }
    }

    /// Stable machine-readable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "id_not_found",
            Self::MissingIdentifier => "missing_id",
            Self::InvalidIdentifier { .. } => "invalid_id",
            Self::Repo(_) => "storage_error",
        }
    }
}

impl Display for VehicleServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "Vehicle with ID {id} not found"),
            Self::MissingIdentifier => write!(f, "Vehicle ID required"),
            Self::InvalidIdentifier { value, source } => {
                write!(f, "invalid vehicle ID `{value}`: {source}")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for VehicleServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidIdentifier { source, .. } => Some(source),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for VehicleServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Parses DTO id text into a usable vehicle id.
///
/// Absent text and values `<= 0` are `MissingIdentifier`; non-numeric text
/// is `InvalidIdentifier`.
pub fn parse_identifier(value: Option<&str>) -> ServiceResult<VehicleId> {
    let Some(text) = value else {
        return Err(VehicleServiceError::MissingIdentifier);
    };
    let id = text
        .parse::<VehicleId>()
        .map_err(|source| VehicleServiceError::InvalidIdentifier {
            value: text.to_string(),
            source,
        })?;
    if id <= 0 {
        return Err(VehicleServiceError::MissingIdentifier);
    }
    Ok(id)
}

/// CRUD facade over a vehicle repository.
pub struct VehicleService<R: VehicleRepository> {
    repo: R,
}

impl<R: VehicleRepository> VehicleService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Gets one vehicle by id.
    pub fn get_by_id(&self, id: VehicleId) -> ServiceResult<VehicleDto> {
        let vehicle = self
            .repo
            .find_by_id(id)?
            .ok_or(VehicleServiceError::NotFound(id))?;
        Ok(VehicleDto::from(vehicle))
    }

    /// Lists all vehicles in repository order.
    pub fn list_all(&self) -> ServiceResult<Vec<VehicleDto>> {
        let vehicles = self.repo.find_all()?;
        Ok(vehicles.into_iter().map(VehicleDto::from).collect())
    }

    /// Stores a new vehicle and returns it with its assigned id.
    ///
    /// Any id carried by `new_vehicle` is ignored.
    pub fn create(&self, new_vehicle: &VehicleDto) -> ServiceResult<VehicleDto> {
        let saved = self.repo.save(&new_vehicle.to_entity(None))?;
        Ok(VehicleDto::from(saved))
    }

    /// Replaces every field of an existing vehicle.
    ///
    /// # Contract
    /// - id `<= 0` or absent fails with `MissingIdentifier`, checked first.
    /// - Unknown id fails with `NotFound`.
    /// - Fields absent from `update_dto` are cleared in storage.
    pub fn update(&self, update_dto: &VehicleDto) -> ServiceResult<()> {
        let id = parse_identifier(update_dto.id.as_deref())?;
        if !self.repo.exists_by_id(id)? {
            return Err(VehicleServiceError::NotFound(id));
        }
        self.repo.save(&update_dto.to_entity(Some(id)))?;
        Ok(())
    }

    /// Deletes a vehicle by id.
    pub fn delete(&self, id: VehicleId) -> ServiceResult<()> {
        if !self.repo.exists_by_id(id)? {
            return Err(VehicleServiceError::NotFound(id));
        }
        self.repo.delete_by_id(id)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_identifier, VehicleServiceError};
    use crate::repo::vehicle_repo::RepoError;
    use std::error::Error;

    #[test]
    fn parse_identifier_accepts_positive_values() {
        assert_eq!(parse_identifier(Some("1")).unwrap(), 1);
        assert_eq!(parse_identifier(Some("9000")).unwrap(), 9000);
    }

    #[test]
    fn parse_identifier_rejects_absent_zero_and_negative() {
        for value in [None, Some("0"), Some("-5")] {
            let err = parse_identifier(value).unwrap_err();
            assert!(matches!(err, VehicleServiceError::MissingIdentifier));
        }
    }

    #[test]
    fn parse_identifier_surfaces_parse_failure() {
        let err = parse_identifier(Some("abc")).unwrap_err();
        assert!(matches!(
            &err,
            VehicleServiceError::InvalidIdentifier { value, .. } if value == "abc"
        ));
        assert!(err.source().is_some());
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(VehicleServiceError::NotFound(3).status_code(), 404);
        assert_eq!(VehicleServiceError::MissingIdentifier.status_code(), 400);
        assert_eq!(VehicleServiceError::NotFound(3).error_code(), "id_not_found");
        assert_eq!(VehicleServiceError::MissingIdentifier.error_code(), "missing_id");
    }

    #[test]
    fn messages_name_the_vehicle_id() {
        assert_eq!(
            VehicleServiceError::NotFound(12).to_string(),
            "Vehicle with ID 12 not found"
        );
        assert_eq!(
            VehicleServiceError::MissingIdentifier.to_string(),
            "Vehicle ID required"
        );
    }

    #[test]
    fn repo_not_found_maps_to_service_not_found() {
        let err = VehicleServiceError::from(RepoError::NotFound(8));
        assert!(matches!(err, VehicleServiceError::NotFound(8)));
    }
}
