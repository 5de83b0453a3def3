//! Water use-cases.
//!
//! # Invariants
//! - Lists are ordered by `longname`.
//! - Updates never change a record's id; a body whose id differs from the
//!   addressed one is rejected before the store is called.

use crate::logging::EventLog;
use crate::model::water::{Water, WaterDto};
use crate::model::{is_blank, EntityId};
use crate::repo::{CancelSignal, CommitMode, Store, StoreWrite};
use crate::service::codes::{ID_MISMATCH, UNEXPECTED_FAULT, VALIDATION_FAILED, WRITE_DECLINED};
use crate::service::outcome::{declined, fault, rejected, Outcome};
use crate::service::writer::{PrimaryWriter, WritePolicy, WriteRequest};

pub const WATER_POLICY: WritePolicy = WritePolicy {
    kind: "Water",
    bad_request_reason: "WaterDto is null or incorrect format",
    validation_code: None,
    declined_code: WRITE_DECLINED,
    fault_code: UNEXPECTED_FAULT,
};

impl WriteRequest for WaterDto {
    type Entity = Water;

    fn display_name(&self) -> &str {
        &self.longname
    }

    fn to_entity(&self) -> Water {
        WaterDto::to_entity(self)
    }

    fn accept(&mut self, persisted: &Water) {
        self.meta = persisted.meta.clone();
    }
}

pub struct WaterService<'a> {
    waters: &'a dyn Store<Water>,
    log: &'a dyn EventLog,
}

impl<'a> WaterService<'a> {
    pub fn new(waters: &'a dyn Store<Water>, log: &'a dyn EventLog) -> Self {
        Self { waters, log }
    }

    pub fn list(&self, cancel: &CancelSignal) -> Outcome<Vec<Water>> {
        match self.waters.select_all(cancel) {
            Ok(mut waters) => {
                waters.sort_by(|left, right| left.longname.cmp(&right.longname));
                Outcome::Success(waters)
            }
            Err(err) => fault(
                self.log,
                UNEXPECTED_FAULT,
                "Unexpected error occurred while GET Waters".to_string(),
                err,
            ),
        }
    }

    /// Returns the water with `id`, or `None` when nothing is stored under it.
    pub fn get(&self, id: EntityId, cancel: &CancelSignal) -> Outcome<Option<Water>> {
        match self.waters.select_by_id(id, cancel) {
            Ok(water) => Outcome::Success(water),
            Err(err) => fault(
                self.log,
                UNEXPECTED_FAULT,
                format!("Unexpected error occurred while GET Water '{id}'"),
                err,
            ),
        }
    }

    pub fn post(&self, request: Option<WaterDto>, cancel: &CancelSignal) -> Outcome<WaterDto> {
        PrimaryWriter::new(self.waters, self.log, &WATER_POLICY)
            .write(request, cancel, CommitMode::Immediate)
            .map(|written| written.response)
    }

    /// Replaces names of the water stored under `id`.
    pub fn put(
        &self,
        id: EntityId,
        request: Option<WaterDto>,
        cancel: &CancelSignal,
    ) -> Outcome<WaterDto> {
        let request = match request {
            Some(request) if !is_blank(&request.longname) => request,
            _ => return Outcome::BadRequest(WATER_POLICY.bad_request_reason.to_string()),
        };
        if request.meta.id != Some(id) {
            return rejected(
                self.log,
                Some(ID_MISMATCH),
                &format!("Error occurred while PUT Water '{id}' - IDs are not the same"),
                "IDs are not the same",
            );
        }

        let mut water = request.to_entity();
        water.meta.id = Some(id);
        match self.waters.update(&water, cancel) {
            Ok(StoreWrite::Persisted(stored)) => Outcome::Success(WaterDto::from_entity(&stored)),
            Ok(StoreWrite::Declined(reason)) => declined(
                self.log,
                WRITE_DECLINED,
                format!("Error occurred while updating Water '{id}': {reason}"),
            ),
            Err(err) => fault(
                self.log,
                UNEXPECTED_FAULT,
                format!("Unexpected error occurred while updating Water '{id}'"),
                err,
            ),
        }
    }

    /// Removes the water stored under `id` and echoes it back.
    pub fn delete(&self, id: EntityId, cancel: &CancelSignal) -> Outcome<WaterDto> {
        if id.is_nil() {
            return rejected(
                self.log,
                Some(VALIDATION_FAILED),
                "Error occurred while DELETE Water - Id is incorrect",
                "Id is incorrect",
            );
        }

        match self.waters.delete(id, cancel) {
            Ok(StoreWrite::Persisted(removed)) => {
                Outcome::Success(WaterDto::from_entity(&removed))
            }
            Ok(StoreWrite::Declined(reason)) => declined(
                self.log,
                WRITE_DECLINED,
                format!("Error occurred while deleting Water '{id}': {reason}"),
            ),
            Err(err) => fault(
                self.log,
                UNEXPECTED_FAULT,
                format!("Unexpected error occurred while deleting Water '{id}'"),
                err,
            ),
        }
    }
}
