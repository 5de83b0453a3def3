//! Manufacturer use-cases.

use crate::logging::EventLog;
use crate::model::manufacturer::{Manufacturer, ManufacturerDto};
use crate::repo::{CancelSignal, CommitMode, Store};
use crate::service::codes::{UNEXPECTED_FAULT, VALIDATION_FAILED, WRITE_DECLINED};
use crate::service::outcome::{fault, Outcome};
use crate::service::writer::{PrimaryWriter, WritePolicy, WriteRequest};

pub const MANUFACTURER_POLICY: WritePolicy = WritePolicy {
    kind: "Manufacturer",
    bad_request_reason: "Value null or incorrect format",
    validation_code: Some(VALIDATION_FAILED),
    declined_code: WRITE_DECLINED,
    fault_code: UNEXPECTED_FAULT,
};

impl WriteRequest for ManufacturerDto {
    type Entity = Manufacturer;

    fn display_name(&self) -> &str {
        &self.name
    }

    fn to_entity(&self) -> Manufacturer {
        ManufacturerDto::to_entity(self)
    }

    fn accept(&mut self, persisted: &Manufacturer) {
        self.meta = persisted.meta.clone();
    }
}

pub struct ManufacturerService<'a> {
    manufacturers: &'a dyn Store<Manufacturer>,
    log: &'a dyn EventLog,
}

impl<'a> ManufacturerService<'a> {
    pub fn new(manufacturers: &'a dyn Store<Manufacturer>, log: &'a dyn EventLog) -> Self {
        Self { manufacturers, log }
    }

    /// Lists all manufacturers as response objects.
    pub fn list(&self, cancel: &CancelSignal) -> Outcome<Vec<ManufacturerDto>> {
        match self.manufacturers.select_all(cancel) {
            Ok(manufacturers) => Outcome::Success(
                manufacturers
                    .iter()
                    .map(ManufacturerDto::from_entity)
                    .collect(),
            ),
            Err(err) => fault(
                self.log,
                UNEXPECTED_FAULT,
                "Unexpected error occurred while GET Manufacturers".to_string(),
                err,
            ),
        }
    }

    /// Creates one manufacturer.
    pub fn post(
        &self,
        request: Option<ManufacturerDto>,
        cancel: &CancelSignal,
    ) -> Outcome<ManufacturerDto> {
        PrimaryWriter::new(self.manufacturers, self.log, &MANUFACTURER_POLICY)
            .write(request, cancel, CommitMode::Immediate)
            .map(|written| written.response)
    }
}
