//! Cross-reference resolution within one Storage Center
//!
//! Disks point at their enclosure by the enclosure's source instance name
//! (not its catalog name) and at their speed class by tier identifier.

use crate::source::{DiskRecord, DiskTierRecord, EnclosureRecord};

/// Enclosure whose instance name equals the disk's `enclosureName`
///
/// Instance names are unique within a Storage Center, so at most one matches.
pub fn owning_enclosure<'a>(
    disk: &DiskRecord,
    enclosures: &'a [EnclosureRecord],
) -> Option<&'a EnclosureRecord> {
    enclosures
        .iter()
        .find(|enclosure| enclosure.instance_name == disk.enclosure_name)
}

/// Disks held by `enclosure`, in source listing order
pub fn disks_in_enclosure<'a>(
    enclosure: &'a EnclosureRecord,
    disks: &'a [DiskRecord],
) -> impl Iterator<Item = &'a DiskRecord> + 'a {
    disks
        .iter()
        .filter(move |disk| disk.enclosure_name == enclosure.instance_name)
}

/// Disks that no listed enclosure claims
pub fn orphan_disks<'a>(
    enclosures: &'a [EnclosureRecord],
    disks: &'a [DiskRecord],
) -> impl Iterator<Item = &'a DiskRecord> + 'a {
    disks
        .iter()
        .filter(move |disk| owning_enclosure(disk, enclosures).is_none())
}

/// Speed label for a disk: first device class of the tier with the same identifier
///
/// `None` when no tier matches or the tier lists no classes. Each disk is
/// resolved on its own; nothing carries over from a previously resolved disk.
pub fn tier_speed<'a>(disk: &DiskRecord, tiers: &'a [DiskTierRecord]) -> Option<&'a str> {
    tiers
        .iter()
        .find(|tier| tier.disk_tier == disk.disk_tier)
        .and_then(|tier| tier.available_disk_classes.first())
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enclosure(instance_name: &str) -> EnclosureRecord {
        EnclosureRecord {
            instance_name: instance_name.to_string(),
            model: "SC200".to_string(),
            service_tag: format!("TAG-{}", instance_name),
            sc_name: "SC-01".to_string(),
        }
    }

    fn disk(name: &str, enclosure_name: &str, tier: &str) -> DiskRecord {
        DiskRecord {
            instance_name: name.to_string(),
            product: "ST600MM0088".to_string(),
            serial_number: format!("SN-{}", name),
            manufacturer_capacity: "600 GB".to_string(),
            revision: "TT31".to_string(),
            vendor: "SEAGATE".to_string(),
            enclosure_name: enclosure_name.to_string(),
            disk_tier: tier.to_string(),
            enclosure_position: "0".to_string(),
        }
    }

    fn tier(id: &str, classes: &[&str]) -> DiskTierRecord {
        DiskTierRecord {
            disk_tier: id.to_string(),
            available_disk_classes: classes.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn test_owning_enclosure_exact_match() {
        let enclosures = vec![enclosure("Enclosure - 1"), enclosure("Enclosure - 10")];

        let found = owning_enclosure(&disk("01-01", "Enclosure - 10", "Tier1"), &enclosures);
        assert_eq!(found.map(|e| e.instance_name.as_str()), Some("Enclosure - 10"));

        let missing = owning_enclosure(&disk("01-02", "enclosure - 1", "Tier1"), &enclosures);
        assert!(missing.is_none(), "match is case sensitive");
    }

    #[test]
    fn test_disks_in_enclosure_keeps_order() {
        let enclosures = vec![enclosure("Enclosure - 1"), enclosure("Enclosure - 2")];
        let disks = vec![
            disk("01-03", "Enclosure - 1", "Tier1"),
            disk("02-01", "Enclosure - 2", "Tier1"),
            disk("01-01", "Enclosure - 1", "Tier1"),
        ];

        let names: Vec<&str> = disks_in_enclosure(&enclosures[0], &disks)
            .map(|d| d.instance_name.as_str())
            .collect();
        assert_eq!(names, vec!["01-03", "01-01"]);
    }

    #[test]
    fn test_orphan_disks() {
        let enclosures = vec![enclosure("Enclosure - 1")];
        let disks = vec![
            disk("01-01", "Enclosure - 1", "Tier1"),
            disk("09-01", "Enclosure - 9", "Tier1"),
        ];

        let orphans: Vec<&str> = orphan_disks(&enclosures, &disks)
            .map(|d| d.instance_name.as_str())
            .collect();
        assert_eq!(orphans, vec!["09-01"]);
    }

    #[test]
    fn test_tier_speed_takes_first_class() {
        let tiers = vec![
            tier("Tier1", &["Write-Intensive SSD", "Read-Intensive SSD"]),
            tier("Tier3", &["7K"]),
        ];

        assert_eq!(
            tier_speed(&disk("01-01", "Enclosure - 1", "Tier1"), &tiers),
            Some("Write-Intensive SSD")
        );
        assert_eq!(tier_speed(&disk("01-02", "Enclosure - 1", "Tier3"), &tiers), Some("7K"));
    }

    #[test]
    fn test_tier_speed_unresolved() {
        let tiers = vec![tier("Tier1", &["15K"]), tier("Tier2", &[])];

        assert_eq!(tier_speed(&disk("01-01", "Enclosure - 1", "Tier9"), &tiers), None);
        assert_eq!(tier_speed(&disk("01-02", "Enclosure - 1", "Tier2"), &tiers), None);
    }
}
