#![allow(dead_code)]

use cardealer_core::{RepoError, RepoResult, Vehicle, VehicleId, VehicleRepository};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Default)]
struct State {
    // Insertion order; `find_all` returns rows exactly as stored here.
    rows: Vec<Vehicle>,
    last_id: VehicleId,
    calls: Vec<&'static str>,
    deletes_miss: bool,
}

impl State {
    fn position(&self, id: VehicleId) -> Option<usize> {
        self.rows.iter().position(|row| row.id == Some(id))
    }
}

/// In-memory `VehicleRepository` that records every call it receives.
///
/// Clones share state, so a test can keep a handle after moving one into
/// `VehicleService`.
#[derive(Clone, Default)]
pub struct RecordingRepository {
    state: Rc<RefCell<State>>,
}

impl RecordingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows still report as existing, but `delete_by_id` answers `NotFound`
    /// as if another writer removed them first.
    pub fn with_concurrent_deletes() -> Self {
        let repo = Self::default();
        repo.state.borrow_mut().deletes_miss = true;
        repo
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.state.borrow().calls.clone()
    }

    pub fn row(&self, id: VehicleId) -> Option<Vehicle> {
        let state = self.state.borrow();
        state.position(id).map(|index| state.rows[index].clone())
    }

    pub fn len(&self) -> usize {
        self.state.borrow().rows.len()
    }

    fn record(&self, call: &'static str) {
        self.state.borrow_mut().calls.push(call);
    }
}

impl VehicleRepository for RecordingRepository {
    fn find_by_id(&self, id: VehicleId) -> RepoResult<Option<Vehicle>> {
        self.record("find_by_id");
        Ok(self.row(id))
    }

    fn find_all(&self) -> RepoResult<Vec<Vehicle>> {
        self.record("find_all");
        Ok(self.state.borrow().rows.clone())
    }

    fn save(&self, vehicle: &Vehicle) -> RepoResult<Vehicle> {
        self.record("save");
        let mut state = self.state.borrow_mut();
        let id = match vehicle.id {
            Some(id) => id,
            None => state.last_id + 1,
        };
        state.last_id = state.last_id.max(id);

        let stored = Vehicle {
            id: Some(id),
            ..vehicle.clone()
        };
        match state.position(id) {
            Some(index) => state.rows[index] = stored.clone(),
            None => state.rows.push(stored.clone()),
        }
        Ok(stored)
    }

    fn exists_by_id(&self, id: VehicleId) -> RepoResult<bool> {
        self.record("exists_by_id");
        Ok(self.state.borrow().position(id).is_some())
    }

    fn delete_by_id(&self, id: VehicleId) -> RepoResult<()> {
        self.record("delete_by_id");
        let mut state = self.state.borrow_mut();
        if state.deletes_miss {
            return Err(RepoError::NotFound(id));
        }
        match state.position(id) {
            Some(index) => {
                state.rows.remove(index);
                Ok(())
            }
            None => Err(RepoError::NotFound(id)),
        }
    }
}
