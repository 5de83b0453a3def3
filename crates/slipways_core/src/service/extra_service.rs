//! Extra use-cases.

use crate::logging::EventLog;
use crate::model::extra::{Extra, ExtraDto};
use crate::repo::{CancelSignal, CommitMode, Store};
use crate::service::codes::{EXTRA_WRITE_DECLINED, UNEXPECTED_FAULT};
use crate::service::outcome::Outcome;
use crate::service::writer::{PrimaryWriter, WritePolicy, WriteRequest};

/// Extras reject blank names without logging.
pub const EXTRA_POLICY: WritePolicy = WritePolicy {
    kind: "Extra",
    bad_request_reason: "Extra has not the correct format or is null",
    validation_code: None,
    declined_code: EXTRA_WRITE_DECLINED,
    fault_code: UNEXPECTED_FAULT,
};

impl WriteRequest for ExtraDto {
    type Entity = Extra;

    fn display_name(&self) -> &str {
        &self.name
    }

    fn to_entity(&self) -> Extra {
        ExtraDto::to_entity(self)
    }

    fn accept(&mut self, persisted: &Extra) {
        self.meta = persisted.meta.clone();
    }
}

pub struct ExtraService<'a> {
    extras: &'a dyn Store<Extra>,
    log: &'a dyn EventLog,
}

impl<'a> ExtraService<'a> {
    pub fn new(extras: &'a dyn Store<Extra>, log: &'a dyn EventLog) -> Self {
        Self { extras, log }
    }

    /// Creates one extra.
    pub fn post(&self, request: Option<ExtraDto>, cancel: &CancelSignal) -> Outcome<ExtraDto> {
        PrimaryWriter::new(self.extras, self.log, &EXTRA_POLICY)
            .write(request, cancel, CommitMode::Immediate)
            .map(|written| written.response)
    }
}
