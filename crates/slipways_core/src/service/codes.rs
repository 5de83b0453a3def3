//! Numeric event codes emitted through [`crate::logging::EventLog`].
//!
//! Dashboards and alerts key off these values; never renumber them.

/// Request object absent or missing its display name.
pub const VALIDATION_FAILED: u32 = 5000;
/// Store completed an insert/update/delete without applying it.
pub const WRITE_DECLINED: u32 = 5005;
/// Path id and body id of an update disagree.
pub const ID_MISMATCH: u32 = 5555;
/// Extra insert completed without a stored row.
pub const EXTRA_WRITE_DECLINED: u32 = 6600;
/// Fault caught from a store call or an association batch.
pub const UNEXPECTED_FAULT: u32 = 6666;
