//! Vehicle repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD primitives over the `vehicles` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Ids are assigned by SQLite on insert and never reused.
//! - `save` with an id replaces every stored column for that row.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

use crate::db::DbError;
use crate::model::vehicle::{Vehicle, VehicleId};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const VEHICLE_SELECT_SQL: &str = "SELECT
    id,
    make,
    model,
    colour,
    year,
    price_pence
FROM vehicles";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for vehicle persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(VehicleId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "vehicle not found: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for vehicle CRUD operations.
pub trait VehicleRepository {
    /// Gets one vehicle by id.
    fn find_by_id(&self, id: VehicleId) -> RepoResult<Option<Vehicle>>;
    /// Lists every stored vehicle.
    fn find_all(&self) -> RepoResult<Vec<Vehicle>>;
    /// Inserts when `vehicle.id` is `None`, otherwise replaces the row.
    ///
    /// Returns the stored value, always carrying `Some(id)`.
    fn save(&self, vehicle: &Vehicle) -> RepoResult<Vehicle>;
    /// Returns whether a row with `id` exists.
    fn exists_by_id(&self, id: VehicleId) -> RepoResult<bool>;
    /// Removes one vehicle. Missing rows return `RepoError::NotFound`.
    fn delete_by_id(&self, id: VehicleId) -> RepoResult<()>;
}

/// SQLite-backed vehicle repository.
pub struct SqliteVehicleRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteVehicleRepository<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn insert(&self, vehicle: &Vehicle) -> RepoResult<VehicleId> {
        self.conn.execute(
            "INSERT INTO vehicles (
                make,
                model,
                colour,
                year,
                price_pence
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                vehicle.make.as_deref(),
                vehicle.model.as_deref(),
                vehicle.colour.as_deref(),
                vehicle.year,
                vehicle.price_pence,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!("event=vehicle_insert module=repo status=ok id={id}");
        Ok(id)
    }

    fn replace(&self, id: VehicleId, vehicle: &Vehicle) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO vehicles (
                id,
                make,
                model,
                colour,
                year,
                price_pence
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(id) DO UPDATE SET
                make = excluded.make,
                model = excluded.model,
                colour = excluded.colour,
                year = excluded.year,
                price_pence = excluded.price_pence,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![
                id,
                vehicle.make.as_deref(),
                vehicle.model.as_deref(),
                vehicle.colour.as_deref(),
                vehicle.year,
                vehicle.price_pence,
            ],
        )?;

        debug!("event=vehicle_replace module=repo status=ok id={id}");
        Ok(())
    }
}

impl VehicleRepository for SqliteVehicleRepository<'_> {
    fn find_by_id(&self, id: VehicleId) -> RepoResult<Option<Vehicle>> {
        let vehicle = self
            .conn
            .query_row(
                &format!("{VEHICLE_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_vehicle_row,
            )
            .optional()?;
        Ok(vehicle)
    }

    fn find_all(&self) -> RepoResult<Vec<Vehicle>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{VEHICLE_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut vehicles = Vec::new();

        while let Some(row) = rows.next()? {
            vehicles.push(parse_vehicle_row(row)?);
        }

        Ok(vehicles)
    }

    fn save(&self, vehicle: &Vehicle) -> RepoResult<Vehicle> {
        let id = match vehicle.id {
            Some(id) => {
                self.replace(id, vehicle)?;
                id
            }
            None => self.insert(vehicle)?,
        };

        self.find_by_id(id)?.ok_or(RepoError::NotFound(id))
    }

    fn exists_by_id(&self, id: VehicleId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM vehicles WHERE id = ?1);",
            [id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn delete_by_id(&self, id: VehicleId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM vehicles WHERE id = ?1;", [id])?;

        if changed == 0 {
            debug!("event=vehicle_delete module=repo status=not_found id={id}");
            return Err(RepoError::NotFound(id));
        }

        debug!("event=vehicle_delete module=repo status=ok id={id}");
        Ok(())
    }
}

fn parse_vehicle_row(row: &Row<'_>) -> rusqlite::Result<Vehicle> {
    Ok(Vehicle {
        id: Some(row.get("id")?),
        make: row.get("make")?,
        model: row.get("model")?,
        colour: row.get("colour")?,
        year: row.get("year")?,
        price_pence: row.get("price_pence")?,
    })
}
