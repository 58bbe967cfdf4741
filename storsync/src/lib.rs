//! storsync library interface
//!
//! Synchronizes Storage Center inventory (clusters, controllers, enclosures,
//! disks) from Storage Manager into an asset catalog.

pub mod catalog;
pub mod error;
pub mod mapping;
pub mod report;
pub mod resolver;
pub mod source;
pub mod sync;

pub use crate::error::{SyncError, SyncResult};
pub use crate::report::SyncReport;
pub use crate::sync::Synchronizer;
