//! Infrastructure utilization report.
//!
//! [`build_report`] folds a full VM scan plus the zone list into nested
//! totals: one overall bucket and one bucket per availability zone. VMs whose
//! zone is missing or unknown to the zone list are excluded from all totals;
//! that is the defined exclusion policy, not an error.
//!
//! Numeric aggregates accumulate at full `f64` precision and are rounded to
//! two decimal places exactly once, in a final pass, so rounding error never
//! compounds across VMs.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{AvailabilityZone, Vm, VmStatus};

const MB_PER_GB: f64 = 1024.0;
const MB_PER_TB: f64 = 1024.0 * 1024.0;

/// VM counts per status bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    /// VMs reported `running`.
    pub running: u64,
    /// VMs reported `stopped`.
    pub stopped: u64,
    /// VMs with any other or absent status.
    pub other: u64,
}

impl StatusCounts {
    fn bump(&mut self, status: VmStatus) {
        match status {
            VmStatus::Running => self.running += 1,
            VmStatus::Stopped => self.stopped += 1,
            VmStatus::Other => self.other += 1,
        }
    }
}

/// Provisioned-capacity totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceTotals {
    /// Provisioned CPU cores.
    pub cpu_cores: u64,
    /// Provisioned memory in GB (converted from MB).
    pub memory_gb: f64,
    /// Provisioned disk in TB (per-VM disks summed in MB, then converted).
    pub disk_tb: f64,
}

/// Used-resource totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UsedTotals {
    /// Used CPU in MHz.
    pub cpu_mhz: f64,
    /// Used memory in GB (converted from MB).
    pub memory_gb: f64,
    /// Used disk in GB (converted from MB).
    pub disk_gb: f64,
}

/// Totals for one grouping: the whole fleet, or a single availability zone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneTotals {
    /// Number of VMs counted into this grouping.
    pub total_vms: u64,
    /// Per-status VM counts.
    pub vms_by_status: StatusCounts,
    /// Provisioned capacity.
    pub total_provisioned: ResourceTotals,
    /// Used resources.
    pub total_used: UsedTotals,
}

impl ZoneTotals {
    fn accumulate(&mut self, vm: &Vm) {
        self.total_vms += 1;
        self.vms_by_status.bump(vm.status);

        self.total_provisioned.cpu_cores += vm.cores;
        self.total_provisioned.memory_gb += vm.memory_mb / MB_PER_GB;
        self.total_provisioned.disk_tb += vm.total_disk_mb() / MB_PER_TB;

        if let Some(cpu) = &vm.cpu_status {
            self.total_used.cpu_mhz += cpu.used_mhz;
        }
        if let Some(memory) = &vm.memory_status {
            self.total_used.memory_gb += memory.used_mb / MB_PER_GB;
        }
        if let Some(storage) = &vm.storage_status {
            self.total_used.disk_gb += storage.used_mb / MB_PER_GB;
        }
    }

    fn finalize(&mut self) {
        self.total_provisioned.memory_gb = round2(self.total_provisioned.memory_gb);
        self.total_provisioned.disk_tb = round2(self.total_provisioned.disk_tb);
        self.total_used.cpu_mhz = round2(self.total_used.cpu_mhz);
        self.total_used.memory_gb = round2(self.total_used.memory_gb);
        self.total_used.disk_gb = round2(self.total_used.disk_gb);
    }
}

/// The complete utilization report.
///
/// A one-shot derived value: built fresh per invocation, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfrastructureReport {
    /// When the report was generated.
    pub report_generated_at: DateTime<Utc>,
    /// Fleet-wide totals.
    pub overall_totals: ZoneTotals,
    /// Per-zone totals, keyed by zone name.
    pub by_availability_zone: BTreeMap<String, ZoneTotals>,
}

/// Fold a full VM scan and the zone list into a report.
///
/// Returns `None` when the fleet is empty — callers surface that as a distinct
/// no-VMs-found outcome rather than a zeroed report.
///
/// # Examples
///
/// ```
/// use janus_model::{build_report, AvailabilityZone, Vm};
///
/// assert!(build_report(&[], &[]).is_none());
///
/// let zone = AvailabilityZone { name: "az-1".to_owned(), ..Default::default() };
/// let vm = Vm { az_name: Some("az-1".to_owned()), cores: 2, ..Default::default() };
/// let report = build_report(&[vm], &[zone]).unwrap();
/// assert_eq!(report.overall_totals.total_provisioned.cpu_cores, 2);
/// ```
#[must_use]
pub fn build_report(
    vms: &[Vm],
    zones: &[AvailabilityZone],
) -> Option<InfrastructureReport> {
    if vms.is_empty() {
        return None;
    }

    let mut by_zone: BTreeMap<String, ZoneTotals> = zones
        .iter()
        .filter(|zone| !zone.name.is_empty())
        .map(|zone| (zone.name.clone(), ZoneTotals::default()))
        .collect();
    let mut overall = ZoneTotals::default();

    for vm in vms {
        // Zone-unknown VMs are excluded from every total, overall included.
        let Some(zone_totals) = vm
            .az_name
            .as_deref()
            .and_then(|name| by_zone.get_mut(name))
        else {
            continue;
        };

        overall.accumulate(vm);
        zone_totals.accumulate(vm);
    }

    overall.finalize();
    for totals in by_zone.values_mut() {
        totals.finalize();
    }

    Some(InfrastructureReport {
        report_generated_at: Utc::now(),
        overall_totals: overall,
        by_availability_zone: by_zone,
    })
}

/// Round to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
