//! Employee record registry for a field office: role-partitioned profile
//! intake, dependent records, in-app notifications, and a filtered
//! report/export pipeline.

pub mod config;
pub mod error;
pub mod registry;
pub mod telemetry;
