//! Storage Manager API response types
//!
//! Deserialization is strict: a missing key fails the whole list, which the
//! synchronizer treats as malformed source data.

use serde::{Deserialize, Deserializer};

/// Storage Center (cluster) from `/StorageCenter/StorageCenter`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterRecord {
    pub name: String,
    pub version: String,
    pub instance_id: String,
    pub management_ip: String,
}

/// Disk enclosure from `.../EnclosureList`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnclosureRecord {
    pub instance_name: String,
    pub model: String,
    pub service_tag: String,
    /// Owning Storage Center name
    pub sc_name: String,
}

/// Disk from `.../DiskConfigurationList`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskRecord {
    pub instance_name: String,
    pub product: String,
    pub serial_number: String,
    /// e.g. `1.92 TB`, `600 GB`
    pub manufacturer_capacity: String,
    pub revision: String,
    pub vendor: String,
    /// Source instance name of the owning enclosure
    pub enclosure_name: String,
    #[serde(deserialize_with = "text_or_number")]
    pub disk_tier: String,
    #[serde(deserialize_with = "text_or_number")]
    pub enclosure_position: String,
}

/// Disk folder tier from `.../DiskFolderTierList`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskTierRecord {
    #[serde(deserialize_with = "text_or_number")]
    pub disk_tier: String,
    /// Device class labels, most relevant first (e.g. `Read-Intensive SSD`)
    pub available_disk_classes: Vec<String>,
}

/// Controller from `.../ControllerList`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerRecord {
    pub service_tag: String,
    #[serde(deserialize_with = "text_or_number")]
    pub hardware_serial_number: String,
    pub model: String,
    pub version: String,
    /// e.g. `17179869184 bytes`
    pub available_memory: String,
    pub ip_address: String,
    /// Owning Storage Center name
    pub sc_name: String,
}

/// Accept identifiers the API emits either as JSON strings or numbers
fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrNumber {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    Ok(match TextOrNumber::deserialize(deserializer)? {
        TextOrNumber::Text(s) => s,
        TextOrNumber::Integer(i) => i.to_string(),
        TextOrNumber::Float(f) => f.to_string(),
    })
}
