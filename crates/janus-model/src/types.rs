//! VM and availability-zone records as the platform returns them.
//!
//! Records are pass-through: the fields the SDK aggregates are typed, and
//! everything else the server sends is preserved in a flattened map so callers
//! see the full payload.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a VM.
///
/// Only `running` and `stopped` are distinct; every other value the platform
/// reports (and an absent field) buckets as [`VmStatus::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VmStatus {
    /// The VM is powered on.
    Running,
    /// The VM is powered off.
    Stopped,
    /// Any other reported status (suspended, migrating, ...) or none at all.
    #[default]
    #[serde(other)]
    Other,
}

impl VmStatus {
    /// Returns the string value of this enum variant.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Stopped => "stopped",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for VmStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A virtual disk attached to a VM.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Disk {
    /// Provisioned size in MB.
    #[serde(default)]
    pub size_mb: f64,
    /// Fields the SDK does not interpret.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A used-resource gauge nested under `cpu_status` / `memory_status` /
/// `storage_status`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceUsage {
    /// Used CPU in MHz (populated under `cpu_status`).
    #[serde(default)]
    pub used_mhz: f64,
    /// Used memory or storage in MB (populated under `memory_status` and
    /// `storage_status`).
    #[serde(default)]
    pub used_mb: f64,
    /// Fields the SDK does not interpret.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A virtual machine record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Vm {
    /// Platform-assigned unique identifier.
    #[serde(default)]
    pub id: String,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Lifecycle status.
    #[serde(default)]
    pub status: VmStatus,
    /// Name of the availability zone hosting the VM, when known.
    #[serde(default)]
    pub az_name: Option<String>,
    /// Provisioned CPU cores.
    #[serde(default)]
    pub cores: u64,
    /// Provisioned memory in MB.
    #[serde(default)]
    pub memory_mb: f64,
    /// Attached virtual disks.
    #[serde(default)]
    pub disks: Vec<Disk>,
    /// Used CPU gauge.
    #[serde(default)]
    pub cpu_status: Option<ResourceUsage>,
    /// Used memory gauge.
    #[serde(default)]
    pub memory_status: Option<ResourceUsage>,
    /// Used storage gauge.
    #[serde(default)]
    pub storage_status: Option<ResourceUsage>,
    /// Fields the SDK does not interpret.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Vm {
    /// Total provisioned disk across all attached disks, in MB.
    #[must_use]
    pub fn total_disk_mb(&self) -> f64 {
        self.disks.iter().map(|disk| disk.size_mb).sum()
    }
}

/// An availability zone (resource pool), used as the report's grouping key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AvailabilityZone {
    /// Platform-assigned identifier.
    #[serde(default)]
    pub id: String,
    /// Zone name; the key the report groups by.
    #[serde(default)]
    pub name: String,
    /// Fields the SDK does not interpret.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_deserialize_vm_with_all_aggregated_fields() {
        let vm: Vm = serde_json::from_value(serde_json::json!({
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "name": "web-server-01",
            "status": "running",
            "az_name": "az-1",
            "cores": 4,
            "memory_mb": 8192.0,
            "disks": [{"size_mb": 51200.0}, {"size_mb": 102400.0}],
            "cpu_status": {"used_mhz": 1200.5},
            "memory_status": {"used_mb": 4096.0},
            "storage_status": {"used_mb": 30720.0},
            "vendor_field": "opaque"
        }))
        .unwrap();

        assert_eq!(vm.status, VmStatus::Running);
        assert_eq!(vm.cores, 4);
        assert!((vm.total_disk_mb() - 153_600.0).abs() < f64::EPSILON);
        assert_eq!(vm.cpu_status.as_ref().unwrap().used_mhz, 1200.5);
        // Unrecognized fields survive as pass-through.
        assert_eq!(vm.extra["vendor_field"], "opaque");
    }

    #[test]
    fn test_should_bucket_unknown_status_as_other() {
        let vm: Vm =
            serde_json::from_value(serde_json::json!({"id": "a", "status": "migrating"})).unwrap();
        assert_eq!(vm.status, VmStatus::Other);
    }

    #[test]
    fn test_should_default_missing_status_to_other() {
        let vm: Vm = serde_json::from_value(serde_json::json!({"id": "a"})).unwrap();
        assert_eq!(vm.status, VmStatus::Other);
        assert!(vm.az_name.is_none());
        assert_eq!(vm.total_disk_mb(), 0.0);
    }

    #[test]
    fn test_should_round_trip_vm_extra_fields() {
        let raw = serde_json::json!({
            "id": "a",
            "name": "n",
            "custom": {"nested": true}
        });
        let vm: Vm = serde_json::from_value(raw).unwrap();
        let back = serde_json::to_value(&vm).unwrap();
        assert_eq!(back["custom"]["nested"], true);
    }
}
