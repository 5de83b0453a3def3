//! Station queries.

use crate::logging::EventLog;
use crate::model::station::Station;
use crate::model::EntityId;
use crate::repo::{CancelSignal, Store};
use crate::service::codes::UNEXPECTED_FAULT;
use crate::service::outcome::{fault, Outcome};

pub struct StationService<'a> {
    stations: &'a dyn Store<Station>,
    log: &'a dyn EventLog,
}

impl<'a> StationService<'a> {
    pub fn new(stations: &'a dyn Store<Station>, log: &'a dyn EventLog) -> Self {
        Self { stations, log }
    }

    /// All stations ordered by `longname`.
    pub fn list(&self, cancel: &CancelSignal) -> Outcome<Vec<Station>> {
        match self.stations.select_all(cancel) {
            Ok(mut stations) => {
                stations.sort_by(|left, right| left.longname.cmp(&right.longname));
                Outcome::Success(stations)
            }
            Err(err) => fault(
                self.log,
                UNEXPECTED_FAULT,
                "Unexpected error occurred while GET Stations".to_string(),
                err,
            ),
        }
    }

    pub fn get(&self, id: EntityId, cancel: &CancelSignal) -> Outcome<Option<Station>> {
        match self.stations.select_by_id(id, cancel) {
            Ok(station) => Outcome::Success(station),
            Err(err) => fault(
                self.log,
                UNEXPECTED_FAULT,
                format!("Unexpected error occurred while GET Station '{id}'"),
                err,
            ),
        }
    }
}
