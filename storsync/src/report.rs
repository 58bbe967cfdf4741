//! End-of-run summary of one sync pass

use crate::catalog::UploadError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use tracing::{info, warn};
use uuid::Uuid;

/// Catalog endpoint an upload went to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadKind {
    Device,
    Part,
    Ip,
}

impl fmt::Display for UploadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadKind::Device => write!(f, "device"),
            UploadKind::Part => write!(f, "part"),
            UploadKind::Ip => write!(f, "ip"),
        }
    }
}

/// Upload the catalog did not accept
#[derive(Debug, Clone, Serialize)]
pub struct UploadFailure {
    pub kind: UploadKind,
    /// Device or part name (device name for IP associations)
    pub name: String,
    pub error: String,
}

/// Enclosure/disk stage that was skipped for a cluster
#[derive(Debug, Clone, Serialize)]
pub struct SkippedStage {
    pub cluster: String,
    pub reason: String,
}

/// Counters and problems collected during a pass
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub clusters: usize,
    pub devices_uploaded: usize,
    pub parts_uploaded: usize,
    pub ips_uploaded: usize,
    pub skipped_stages: Vec<SkippedStage>,
    /// Disks whose `enclosureName` matched no listed enclosure
    pub orphan_disks: Vec<String>,
    /// Disks uploaded without a speed label
    pub unresolved_speeds: Vec<String>,
    pub upload_failures: Vec<UploadFailure>,
}

impl SyncReport {
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            finished_at: None,
            clusters: 0,
            devices_uploaded: 0,
            parts_uploaded: 0,
            ips_uploaded: 0,
            skipped_stages: Vec::new(),
            orphan_disks: Vec::new(),
            unresolved_speeds: Vec::new(),
            upload_failures: Vec::new(),
        }
    }

    pub fn record_success(&mut self, kind: UploadKind) {
        match kind {
            UploadKind::Device => self.devices_uploaded += 1,
            UploadKind::Part => self.parts_uploaded += 1,
            UploadKind::Ip => self.ips_uploaded += 1,
        }
    }

    pub fn record_failure(&mut self, kind: UploadKind, name: &str, error: &UploadError) {
        self.upload_failures.push(UploadFailure {
            kind,
            name: name.to_string(),
            error: error.to_string(),
        });
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Uploads attempted, accepted or not
    pub fn uploads_attempted(&self) -> usize {
        self.devices_uploaded + self.parts_uploaded + self.ips_uploaded + self.upload_failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.upload_failures.is_empty() && self.skipped_stages.is_empty()
    }

    /// Log the summary; failures are repeated individually at warn level
    pub fn log_summary(&self) {
        let elapsed_ms = self
            .finished_at
            .map(|end| (end - self.started_at).num_milliseconds())
            .unwrap_or_default();

        info!(
            run_id = %self.run_id,
            clusters = self.clusters,
            devices = self.devices_uploaded,
            parts = self.parts_uploaded,
            ips = self.ips_uploaded,
            failures = self.upload_failures.len(),
            elapsed_ms,
            "Inventory sync finished"
        );

        for stage in &self.skipped_stages {
            warn!(cluster = %stage.cluster, reason = %stage.reason, "Enclosure/disk stage was skipped");
        }
        if !self.orphan_disks.is_empty() {
            warn!(disks = ?self.orphan_disks, "Disks without a matching enclosure were not uploaded");
        }
        if !self.unresolved_speeds.is_empty() {
            warn!(disks = ?self.unresolved_speeds, "Disks uploaded without a speed label");
        }
        for failure in &self.upload_failures {
            warn!(kind = %failure.kind, name = %failure.name, error = %failure.error, "Upload failed");
        }
    }
}

impl Default for SyncReport {
    fn default() -> Self {
        Self::new()
    }
}
