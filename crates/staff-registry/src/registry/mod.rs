//! Employee record management: profile intake under the field partition
//! policy, dependent records, notifications, and reporting.

pub mod profiles;
pub mod report;
