//! Sync orchestrator
//!
//! One pass, strictly sequential, per Storage Center:
//! 1. Enclosures, each followed by its disks (a part needs its device to exist)
//! 2. Controllers, each followed by its IP association
//! 3. The cluster device carrying the member roll-up, then its IP association
//!
//! Enclosures go before controllers because an integrated chassis is an
//! enclosure that the controllers live in. After all clusters the source
//! session is logged out.

use crate::catalog::{AssetCatalog, DeviceRecord, IpAssignment, PartRecord, UploadError};
use crate::error::{SyncError, SyncResult};
use crate::mapping::{map_cluster, map_controller, map_disk, map_enclosure};
use crate::report::{SkippedStage, SyncReport, UploadKind};
use crate::resolver::{disks_in_enclosure, orphan_disks, tier_speed};
use crate::source::{
    ClusterRecord, DiskRecord, DiskTierRecord, EnclosureRecord, FetchError, InventorySource,
};
use tracing::{debug, error, info, warn};

/// Enclosure, disk and tier listings of one Storage Center
#[derive(Debug)]
struct StorageListings {
    enclosures: Vec<EnclosureRecord>,
    disks: Vec<DiskRecord>,
    tiers: Vec<DiskTierRecord>,
}

/// Drives a full source → catalog pass
pub struct Synchronizer<'a> {
    source: &'a dyn InventorySource,
    catalog: &'a dyn AssetCatalog,
}

impl<'a> Synchronizer<'a> {
    pub fn new(source: &'a dyn InventorySource, catalog: &'a dyn AssetCatalog) -> Self {
        Self { source, catalog }
    }

    /// Run one full pass
    ///
    /// # Errors
    /// Returns error (and skips logout) if the cluster or controller listing
    /// cannot be fetched, any listing is malformed, or a record cannot be
    /// mapped. Failed uploads are not errors; they are collected in the report.
    pub async fn run(&self) -> SyncResult<SyncReport> {
        let mut report = SyncReport::new();
        info!(run_id = %report.run_id, "Starting inventory sync");

        let clusters = self
            .source
            .clusters()
            .await
            .map_err(|e| SyncError::fetch("cluster list", e))?;
        info!(count = clusters.len(), "Storage Centers discovered");

        for cluster in &clusters {
            self.sync_cluster(cluster, &mut report).await?;
            report.clusters += 1;
        }

        if let Err(e) = self.source.logout().await {
            warn!(error = %e, "Source logout failed");
        }

        report.finish();
        Ok(report)
    }

    async fn sync_cluster(&self, cluster: &ClusterRecord, report: &mut SyncReport) -> SyncResult<()> {
        info!(cluster = %cluster.name, instance_id = %cluster.instance_id, "Syncing Storage Center");

        // Catalog names of everything uploaded for this cluster, in upload order
        let mut members: Vec<String> = Vec::new();

        if let Some(listings) = self.fetch_storage_listings(cluster, report).await? {
            self.sync_enclosures(&listings, &mut members, report).await?;
        }

        self.sync_controllers(cluster, &mut members, report).await?;

        let mut device = map_cluster(cluster);
        device.devices_in_cluster = Some(members.join(","));
        self.upload_device(&device, report).await;
        self.upload_ip(&IpAssignment::new(&cluster.management_ip, &device.name), report)
            .await;

        debug!(cluster = %cluster.name, members = members.len(), "Storage Center synced");
        Ok(())
    }

    /// Fetch enclosures, disks and tiers; `None` means the stage is skipped
    async fn fetch_storage_listings(
        &self,
        cluster: &ClusterRecord,
        report: &mut SyncReport,
    ) -> SyncResult<Option<StorageListings>> {
        let id = cluster.instance_id.as_str();

        let Some(enclosures) =
            stage_listing(cluster, "enclosure list", self.source.enclosures(id).await, report)?
        else {
            return Ok(None);
        };
        let Some(disks) = stage_listing(cluster, "disk list", self.source.disks(id).await, report)?
        else {
            return Ok(None);
        };
        let Some(tiers) =
            stage_listing(cluster, "disk tier list", self.source.disk_tiers(id).await, report)?
        else {
            return Ok(None);
        };

        Ok(Some(StorageListings {
            enclosures,
            disks,
            tiers,
        }))
    }

    async fn sync_enclosures(
        &self,
        listings: &StorageListings,
        members: &mut Vec<String>,
        report: &mut SyncReport,
    ) -> SyncResult<()> {
        for enclosure in &listings.enclosures {
            let device = map_enclosure(enclosure);
            self.upload_device(&device, report).await;
            members.push(device.name.clone());

            for disk in disks_in_enclosure(enclosure, &listings.disks) {
                let speed = tier_speed(disk, &listings.tiers);
                if speed.is_none() {
                    warn!(
                        disk = %disk.instance_name,
                        disk_tier = %disk.disk_tier,
                        "No tier speed class for disk, uploading without speed"
                    );
                    report.unresolved_speeds.push(disk.instance_name.clone());
                }

                let part = map_disk(disk, &device.name, speed)
                    .map_err(|e| SyncError::mapping(format!("disk {}", disk.instance_name), e))?;
                self.upload_part(&part, report).await;
            }
        }

        for disk in orphan_disks(&listings.enclosures, &listings.disks) {
            warn!(
                disk = %disk.instance_name,
                enclosure = %disk.enclosure_name,
                "Disk references an unknown enclosure, not uploaded"
            );
            report.orphan_disks.push(disk.instance_name.clone());
        }

        Ok(())
    }

    async fn sync_controllers(
        &self,
        cluster: &ClusterRecord,
        members: &mut Vec<String>,
        report: &mut SyncReport,
    ) -> SyncResult<()> {
        let controllers = self
            .source
            .controllers(&cluster.instance_id)
            .await
            .map_err(|e| SyncError::fetch(format!("controller list of {}", cluster.name), e))?;

        for controller in &controllers {
            let device = map_controller(controller).map_err(|e| {
                SyncError::mapping(
                    format!("controller {}", controller.hardware_serial_number),
                    e,
                )
            })?;
            self.upload_device(&device, report).await;
            members.push(device.name.clone());

            self.upload_ip(&IpAssignment::new(&controller.ip_address, &device.name), report)
                .await;
        }

        Ok(())
    }

    async fn upload_device(&self, device: &DeviceRecord, report: &mut SyncReport) {
        let result = self.catalog.create_device(device).await;
        record_upload(UploadKind::Device, &device.name, result, report);
    }

    async fn upload_part(&self, part: &PartRecord, report: &mut SyncReport) {
        let result = self.catalog.create_part(part).await;
        record_upload(UploadKind::Part, &part.name, result, report);
    }

    async fn upload_ip(&self, ip: &IpAssignment, report: &mut SyncReport) {
        let result = self.catalog.create_ip(ip).await;
        record_upload(UploadKind::Ip, &ip.device, result, report);
    }
}

/// Unwrap a listing for the enclosure/disk stage
///
/// Transport and status failures skip the stage; malformed bodies abort.
fn stage_listing<T>(
    cluster: &ClusterRecord,
    listing: &str,
    result: Result<Vec<T>, FetchError>,
    report: &mut SyncReport,
) -> SyncResult<Option<Vec<T>>> {
    match result {
        Ok(records) => Ok(Some(records)),
        Err(FetchError::Decode(message)) => Err(SyncError::MalformedSource {
            listing: format!("{} of {}", listing, cluster.name),
            message,
        }),
        Err(e) => {
            match &e {
                FetchError::Status { status, body } => error!(
                    cluster = %cluster.name,
                    status,
                    body = %body,
                    "Error getting {}, skipping enclosures and disks", listing
                ),
                _ => error!(
                    cluster = %cluster.name,
                    error = %e,
                    "Error getting {}, skipping enclosures and disks", listing
                ),
            }
            report.skipped_stages.push(SkippedStage {
                cluster: cluster.name.clone(),
                reason: format!("{}: {}", listing, e),
            });
            Ok(None)
        }
    }
}

fn record_upload(
    kind: UploadKind,
    name: &str,
    result: Result<(), UploadError>,
    report: &mut SyncReport,
) {
    match result {
        Ok(()) => {
            debug!(kind = %kind, name = %name, "Uploaded");
            report.record_success(kind);
        }
        Err(e) => {
            warn!(kind = %kind, name = %name, error = %e, "Upload failed, continuing");
            report.record_failure(kind, name, &e);
        }
    }
}
