//! Asset catalog record shapes
//!
//! Field names are the catalog's form field names. `None` fields are left out
//! of the payload entirely so the catalog keeps whatever value it already has.

use serde::{Serialize, Serializer};

/// Device record (`POST /device/`) for clusters, controllers and enclosures
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeviceRecord {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_no: Option<String>,
    pub manufacturer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub osver: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hardware: Option<String>,
    #[serde(rename = "type")]
    pub device_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpucount: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpucore: Option<u32>,
    /// CPU clock in MHz
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpupower: Option<u32>,
    /// Memory in GB
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<f64>,
    #[serde(skip_serializing_if = "is_false", serialize_with = "yes_no")]
    pub is_it_blade_host: bool,
    /// Comma-joined member device names (cluster devices only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub devices_in_cluster: Option<String>,
}

/// Part record (`POST /parts/`) for disks
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartRecord {
    #[serde(rename = "type")]
    pub part_type: String,
    pub name: String,
    pub modelno: String,
    pub serial_no: String,
    /// Capacity in GB
    pub hddsize: String,
    /// Speed label, at most 8 characters on the catalog side
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hddrpm: Option<String>,
    pub firmware: String,
    pub assignment: String,
    pub manufacturer: String,
    /// Name of the device (enclosure) holding the part
    pub device: String,
    pub raid_group: String,
    pub slot: String,
}

/// IP association (`POST /ips/`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IpAssignment {
    pub ipaddress: String,
    pub device: String,
}

impl IpAssignment {
    pub fn new(ipaddress: impl Into<String>, device: impl Into<String>) -> Self {
        Self {
            ipaddress: ipaddress.into(),
            device: device.into(),
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn yes_no<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(if *value { "yes" } else { "no" })
}
