//! Test doubles for the source and catalog seams
//!
//! `FakeSource` serves canned listings per Storage Center instance id and can
//! be told to fail individual listings. `RecordingCatalog` records every
//! upload in call order and can reject devices by name.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use storsync::catalog::{AssetCatalog, DeviceRecord, IpAssignment, PartRecord, UploadError};
use storsync::source::{
    ClusterRecord, ControllerRecord, DiskRecord, DiskTierRecord, EnclosureRecord, FetchError,
    InventorySource,
};

/// How a faked listing fails
#[derive(Debug, Clone)]
pub enum Failure {
    Network,
    Status(u16, &'static str),
    Decode,
}

impl Failure {
    fn to_error(&self) -> FetchError {
        match self {
            Failure::Network => FetchError::Network("connection reset".to_string()),
            Failure::Status(status, body) => FetchError::Status {
                status: *status,
                body: body.to_string(),
            },
            Failure::Decode => FetchError::Decode("missing field `serviceTag`".to_string()),
        }
    }
}

/// Listings of one Storage Center
#[derive(Debug, Clone, Default)]
pub struct FakeCluster {
    pub enclosures: Vec<EnclosureRecord>,
    pub disks: Vec<DiskRecord>,
    pub tiers: Vec<DiskTierRecord>,
    pub controllers: Vec<ControllerRecord>,
    pub failures: HashMap<&'static str, Failure>,
}

impl FakeCluster {
    pub fn failing(mut self, listing: &'static str, failure: Failure) -> Self {
        self.failures.insert(listing, failure);
        self
    }

    fn listing<T: Clone>(&self, name: &'static str, records: &[T]) -> Result<Vec<T>, FetchError> {
        match self.failures.get(name) {
            Some(failure) => Err(failure.to_error()),
            None => Ok(records.to_vec()),
        }
    }
}

#[derive(Default)]
pub struct FakeSource {
    pub clusters: Vec<ClusterRecord>,
    pub listings: HashMap<String, FakeCluster>,
    pub logouts: AtomicUsize,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cluster(mut self, cluster: ClusterRecord, listings: FakeCluster) -> Self {
        self.listings.insert(cluster.instance_id.clone(), listings);
        self.clusters.push(cluster);
        self
    }

    pub fn logout_count(&self) -> usize {
        self.logouts.load(Ordering::SeqCst)
    }

    fn cluster(&self, id: &str) -> Result<&FakeCluster, FetchError> {
        self.listings.get(id).ok_or_else(|| FetchError::Status {
            status: 404,
            body: format!("no Storage Center {}", id),
        })
    }
}

#[async_trait]
impl InventorySource for FakeSource {
    async fn clusters(&self) -> Result<Vec<ClusterRecord>, FetchError> {
        Ok(self.clusters.clone())
    }

    async fn enclosures(&self, cluster_id: &str) -> Result<Vec<EnclosureRecord>, FetchError> {
        let c = self.cluster(cluster_id)?;
        c.listing("enclosures", &c.enclosures)
    }

    async fn disks(&self, cluster_id: &str) -> Result<Vec<DiskRecord>, FetchError> {
        let c = self.cluster(cluster_id)?;
        c.listing("disks", &c.disks)
    }

    async fn disk_tiers(&self, cluster_id: &str) -> Result<Vec<DiskTierRecord>, FetchError> {
        let c = self.cluster(cluster_id)?;
        c.listing("tiers", &c.tiers)
    }

    async fn controllers(&self, cluster_id: &str) -> Result<Vec<ControllerRecord>, FetchError> {
        let c = self.cluster(cluster_id)?;
        c.listing("controllers", &c.controllers)
    }

    async fn logout(&self) -> Result<(), FetchError> {
        self.logouts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// One recorded catalog call
#[derive(Debug, Clone, PartialEq)]
pub enum Upload {
    Device(DeviceRecord),
    Part(PartRecord),
    Ip(IpAssignment),
}

#[derive(Default)]
pub struct RecordingCatalog {
    uploads: Mutex<Vec<Upload>>,
    rejected_devices: Vec<String>,
}

impl RecordingCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject `create_device` for this name (the call is still recorded)
    pub fn rejecting_device(mut self, name: &str) -> Self {
        self.rejected_devices.push(name.to_string());
        self
    }

    pub fn uploads(&self) -> Vec<Upload> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn devices(&self) -> Vec<DeviceRecord> {
        self.uploads()
            .into_iter()
            .filter_map(|u| match u {
                Upload::Device(d) => Some(d),
                _ => None,
            })
            .collect()
    }

    pub fn parts(&self) -> Vec<PartRecord> {
        self.uploads()
            .into_iter()
            .filter_map(|u| match u {
                Upload::Part(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    pub fn device(&self, name: &str) -> Option<DeviceRecord> {
        self.devices().into_iter().find(|d| d.name == name)
    }

    /// Compact call log: `device:<name>`, `part:<name>`, `ip:<address>-><device>`
    pub fn call_log(&self) -> Vec<String> {
        self.uploads()
            .into_iter()
            .map(|u| match u {
                Upload::Device(d) => format!("device:{}", d.name),
                Upload::Part(p) => format!("part:{}", p.name),
                Upload::Ip(ip) => format!("ip:{}->{}", ip.ipaddress, ip.device),
            })
            .collect()
    }
}

#[async_trait]
impl AssetCatalog for RecordingCatalog {
    async fn create_device(&self, device: &DeviceRecord) -> Result<(), UploadError> {
        self.uploads.lock().unwrap().push(Upload::Device(device.clone()));
        if self.rejected_devices.contains(&device.name) {
            return Err(UploadError::Rejected {
                status: 500,
                body: "{\"code\": 1, \"msg\": \"hardware model required\"}".to_string(),
            });
        }
        Ok(())
    }

    async fn create_part(&self, part: &PartRecord) -> Result<(), UploadError> {
        self.uploads.lock().unwrap().push(Upload::Part(part.clone()));
        Ok(())
    }

    async fn create_ip(&self, ip: &IpAssignment) -> Result<(), UploadError> {
        self.uploads.lock().unwrap().push(Upload::Ip(ip.clone()));
        Ok(())
    }
}

// ============================================================================
// Record builders
// ============================================================================

pub fn cluster(name: &str, instance_id: &str, management_ip: &str) -> ClusterRecord {
    ClusterRecord {
        name: name.to_string(),
        version: "7.4.2.1".to_string(),
        instance_id: instance_id.to_string(),
        management_ip: management_ip.to_string(),
    }
}

pub fn enclosure(sc_name: &str, instance_name: &str, model: &str) -> EnclosureRecord {
    EnclosureRecord {
        instance_name: instance_name.to_string(),
        model: model.to_string(),
        service_tag: format!("TAG-{}", instance_name.replace(' ', "")),
        sc_name: sc_name.to_string(),
    }
}

pub fn disk(name: &str, enclosure_name: &str, tier: &str, capacity: &str) -> DiskRecord {
    DiskRecord {
        instance_name: name.to_string(),
        product: "ST600MM0088".to_string(),
        serial_number: format!("SN-{}", name),
        manufacturer_capacity: capacity.to_string(),
        revision: "TT31".to_string(),
        vendor: "SEAGATE".to_string(),
        enclosure_name: enclosure_name.to_string(),
        disk_tier: tier.to_string(),
        enclosure_position: name.rsplit('-').next().unwrap_or("0").to_string(),
    }
}

pub fn tier(id: &str, classes: &[&str]) -> DiskTierRecord {
    DiskTierRecord {
        disk_tier: id.to_string(),
        available_disk_classes: classes.iter().map(|c| c.to_string()).collect(),
    }
}

pub fn controller(sc_name: &str, serial: &str, model: &str, ip: &str) -> ControllerRecord {
    ControllerRecord {
        service_tag: format!("CTL-{}", serial),
        hardware_serial_number: serial.to_string(),
        model: model.to_string(),
        version: "7.4.2.1".to_string(),
        available_memory: "17179869184 bytes".to_string(),
        ip_address: ip.to_string(),
        sc_name: sc_name.to_string(),
    }
}
