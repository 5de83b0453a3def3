//! Write pipelines and queries per entity kind.
//!
//! # Responsibility
//! - Turn store calls into [`outcome::Outcome`] values with exact event codes.
//! - Sequence primary writes, association batches and commits.
//!
//! # Invariants
//! - Pipelines never touch SQL; they only see the traits in [`crate::repo`].
//! - Every failure outcome is logged once, at the point it is classified.

pub mod association;
pub mod codes;
pub mod extra_service;
pub mod manufacturer_service;
pub mod outcome;
pub mod port_service;
pub mod provider_service;
pub mod slipway_service;
pub mod station_service;
pub mod water_service;
pub mod writer;
