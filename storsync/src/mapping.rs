//! Record mappers: Storage Manager records → asset catalog records
//!
//! Pure functions, no I/O. Model and unit classification is table-driven:
//! each table is scanned in order and the first token contained in the input
//! wins, falling back to a generic rule when nothing matches.
//!
//! Malformed input (an empty field where a number is expected, a number that
//! does not parse) is reported as [`MappingError`] and is meant to abort the
//! sync rather than upload a half-correct record.

use crate::catalog::{DeviceRecord, PartRecord};
use crate::source::{ClusterRecord, ControllerRecord, DiskRecord, EnclosureRecord};
use thiserror::Error;

pub const MANUFACTURER: &str = "Dell Inc.";
pub const OPERATING_SYSTEM: &str = "Storage Center";
pub const OBJECT_CATEGORY: &str = "Storage Infrastructure";
pub const CLUSTER_TYPE: &str = "cluster";
pub const PHYSICAL_TYPE: &str = "physical";
pub const DISK_PART_TYPE: &str = "Hard Disk";
pub const DISK_ASSIGNMENT: &str = "device";

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Source value that could not be turned into a target value
#[derive(Debug, Error, PartialEq)]
pub enum MappingError {
    #[error("{field} is empty")]
    MissingValue { field: &'static str },

    #[error("{field} has unparsable number '{value}'")]
    InvalidNumber { field: &'static str, value: String },
}

// ============================================================================
// Classification tables
// ============================================================================

/// How an enclosure model is presented in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnclosureShape {
    /// Enclosure built into the controller chassis: one `<cluster> - Chassis`
    /// device flagged as a blade host
    Chassis { hardware: &'static str },
    /// Standalone expansion enclosure with a friendly hardware name
    Expansion { hardware: &'static str },
}

/// Enclosure model tokens, first match wins. Unlisted models keep their raw
/// model string as hardware.
pub const ENCLOSURE_MODELS: &[(&str, EnclosureShape)] = &[
    (
        "SC4020",
        EnclosureShape::Chassis {
            hardware: "Dell Storage SC4020 Chassis",
        },
    ),
    (
        "SC200",
        EnclosureShape::Expansion {
            hardware: "Dell Storage SC200 Expansion Enclosure",
        },
    ),
    (
        "SC220",
        EnclosureShape::Expansion {
            hardware: "Dell Storage SC220 Expansion Enclosure",
        },
    ),
];

/// CPU attributes of a known controller family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuProfile {
    pub count: u32,
    pub cores: u32,
    pub clock_mhz: u32,
}

/// Controller model tokens (matched against the uppercased model), first match wins
pub const CONTROLLER_MODELS: &[(&str, CpuProfile)] = &[
    (
        "SC8000",
        CpuProfile {
            count: 2,
            cores: 6,
            clock_mhz: 2500,
        },
    ),
    (
        "SC9000",
        CpuProfile {
            count: 2,
            cores: 8,
            clock_mhz: 3200,
        },
    ),
];

/// Conversion applied to a capacity figure for a given unit token
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CapacityRule {
    /// Multiply into GB
    Scale(f64),
    /// Already GB (or an unhandled unit): keep the figure as written
    AsIs,
}

/// Capacity unit tokens, first match wins; anything else is [`CapacityRule::AsIs`]
pub const CAPACITY_UNITS: &[(&str, CapacityRule)] = &[
    ("TB", CapacityRule::Scale(1000.0)),
    ("GB", CapacityRule::AsIs),
];

/// Speed labels too long for the catalog's 8-character field
pub const SPEED_ABBREVIATIONS: &[(&str, &str)] = &[
    ("Read-Intensive SSD", "RI SSD"),
    ("Write-Intensive SSD", "WI SSD"),
];

/// First table entry whose token occurs in `value`
pub fn classify<'t, T>(table: &'t [(&'static str, T)], value: &str) -> Option<&'t T> {
    table
        .iter()
        .find(|(token, _)| value.contains(token))
        .map(|(_, rule)| rule)
}

// ============================================================================
// Normalization
// ============================================================================

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Leading whitespace-separated token of a `<number> <unit>` string
fn leading_number(field: &'static str, raw: &str) -> Result<(String, f64), MappingError> {
    let token = raw
        .split_whitespace()
        .next()
        .ok_or(MappingError::MissingValue { field })?;
    let number = token
        .parse::<f64>()
        .map_err(|_| MappingError::InvalidNumber {
            field,
            value: raw.to_string(),
        })?;
    Ok((token.to_string(), number))
}

/// `availableMemory` (`"<bytes> <unit>"`) → GB, rounded to 3 decimals
///
/// `"17179869184 bytes"` → `16.0`, `"1610612736 bytes"` → `1.5`.
pub fn normalize_memory(raw: &str) -> Result<f64, MappingError> {
    let (_, bytes) = leading_number("availableMemory", raw)?;
    Ok(round3(bytes / BYTES_PER_GB))
}

/// `manufacturerCapacity` → GB figure as sent to the catalog
///
/// `"2 TB"` → `"2000"`, `"500 GB"` → `"500"`. Units other than TB are not
/// converted.
pub fn normalize_capacity(raw: &str) -> Result<String, MappingError> {
    let (token, number) = leading_number("manufacturerCapacity", raw)?;
    match classify(CAPACITY_UNITS, raw) {
        Some(CapacityRule::Scale(factor)) => Ok(round3(number * factor).to_string()),
        Some(CapacityRule::AsIs) | None => Ok(token),
    }
}

/// Shorten speed labels that overflow the catalog field; others pass through
pub fn abbreviate_speed(label: &str) -> &str {
    SPEED_ABBREVIATIONS
        .iter()
        .find(|(long, _)| *long == label)
        .map(|(_, short)| *short)
        .unwrap_or(label)
}

// ============================================================================
// Mappers
// ============================================================================

/// Storage Center → cluster device (member list is attached by the caller)
pub fn map_cluster(cluster: &ClusterRecord) -> DeviceRecord {
    DeviceRecord {
        name: cluster.name.clone(),
        manufacturer: MANUFACTURER.to_string(),
        os: Some(OPERATING_SYSTEM.to_string()),
        osver: Some(cluster.version.clone()),
        device_type: CLUSTER_TYPE.to_string(),
        ..Default::default()
    }
}

/// Controller → physical device, with CPU attributes for known models
pub fn map_controller(controller: &ControllerRecord) -> Result<DeviceRecord, MappingError> {
    let model = controller.model.to_uppercase();
    let cpu = classify(CONTROLLER_MODELS, &model).copied();

    Ok(DeviceRecord {
        name: format!(
            "{} - Controller - {}",
            controller.sc_name, controller.hardware_serial_number
        ),
        serial_no: Some(controller.service_tag.clone()),
        manufacturer: MANUFACTURER.to_string(),
        os: Some(OPERATING_SYSTEM.to_string()),
        osver: Some(controller.version.clone()),
        hardware: Some(model),
        device_type: PHYSICAL_TYPE.to_string(),
        object_category: Some(OBJECT_CATEGORY.to_string()),
        cpucount: cpu.map(|c| c.count),
        cpucore: cpu.map(|c| c.cores),
        cpupower: cpu.map(|c| c.clock_mhz),
        memory: Some(normalize_memory(&controller.available_memory)?),
        ..Default::default()
    })
}

/// Enclosure → physical device; the chassis-integrated model becomes the
/// cluster's chassis device regardless of its instance name
pub fn map_enclosure(enclosure: &EnclosureRecord) -> DeviceRecord {
    let (name, hardware, is_it_blade_host) = match classify(ENCLOSURE_MODELS, &enclosure.model) {
        Some(EnclosureShape::Chassis { hardware }) => (
            format!("{} - Chassis", enclosure.sc_name),
            hardware.to_string(),
            true,
        ),
        Some(EnclosureShape::Expansion { hardware }) => (
            generic_enclosure_name(enclosure),
            hardware.to_string(),
            false,
        ),
        None => (
            generic_enclosure_name(enclosure),
            enclosure.model.clone(),
            false,
        ),
    };

    DeviceRecord {
        name,
        serial_no: Some(enclosure.service_tag.clone()),
        manufacturer: MANUFACTURER.to_string(),
        hardware: Some(hardware),
        device_type: PHYSICAL_TYPE.to_string(),
        object_category: Some(OBJECT_CATEGORY.to_string()),
        is_it_blade_host,
        ..Default::default()
    }
}

fn generic_enclosure_name(enclosure: &EnclosureRecord) -> String {
    format!("{} - {}", enclosure.sc_name, enclosure.instance_name)
}

/// Disk → part attached to `device_name` (the enclosure's catalog name)
///
/// `speed` is the tier's class label; `None` leaves `hddrpm` out.
pub fn map_disk(
    disk: &DiskRecord,
    device_name: &str,
    speed: Option<&str>,
) -> Result<PartRecord, MappingError> {
    Ok(PartRecord {
        part_type: DISK_PART_TYPE.to_string(),
        name: disk.instance_name.clone(),
        modelno: disk.product.clone(),
        serial_no: disk.serial_number.clone(),
        hddsize: normalize_capacity(&disk.manufacturer_capacity)?,
        hddrpm: speed.map(|label| abbreviate_speed(label).to_string()),
        firmware: disk.revision.clone(),
        assignment: DISK_ASSIGNMENT.to_string(),
        manufacturer: disk.vendor.clone(),
        device: device_name.to_string(),
        raid_group: disk.disk_tier.clone(),
        slot: disk.enclosure_position.clone(),
    })
}
