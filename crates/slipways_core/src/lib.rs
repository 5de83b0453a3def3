//! Core domain logic for the slipways registry.
//! Pipelines, stores and the SQLite schema live here; binaries only wire them.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{AppConfig, ConfigError, Environment};
pub use db::{open_db, open_db_in_memory, open_with_config, DbError, DbResult};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status};
pub use logging::{CoreEventLog, EventLog};
pub use model::{EntityId, RecordMeta, RelatedRef};
pub use repo::association_repo::SqliteAssociationStore;
pub use repo::sqlite_store::{SqliteStore, SqliteUnitOfWork};
pub use repo::{
    AssociationStore, CancelSignal, ChildLinkStore, CommitMode, Store, StoreError, StoreResult,
    StoreWrite, UnitOfWork,
};
pub use service::extra_service::ExtraService;
pub use service::manufacturer_service::ManufacturerService;
pub use service::outcome::{Outcome, Response};
pub use service::port_service::PortService;
pub use service::provider_service::ServiceProviderService;
pub use service::slipway_service::SlipwayService;
pub use service::station_service::StationService;
pub use service::water_service::WaterService;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
