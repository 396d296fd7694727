//! Data model for the Janus platform API.
//!
//! - [`types`] - VM and availability-zone records as they appear on the wire
//! - [`envelope`] - paginated response envelope and next-page token handling
//! - [`report`] - infrastructure utilization report types and the pure
//!   aggregation that builds them

pub mod envelope;
pub mod report;
pub mod types;

pub use envelope::{ApiEnvelope, PageData, PageToken};
pub use report::{
    build_report, InfrastructureReport, ResourceTotals, StatusCounts, UsedTotals, ZoneTotals,
};
pub use types::{AvailabilityZone, Disk, ResourceUsage, Vm, VmStatus};
