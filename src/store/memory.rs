//! In-memory reference `RecordStore` (§3), so the crate is runnable and
//! testable without an external database.

use std::collections::HashMap;
use std::net::IpAddr;

use parking_lot::RwLock;
use tracing::debug;

use super::{ForwardZone, RecordData, RecordStore, ReverseZone, StoredRecord};
use crate::dns::enums::DNSResourceType;
use crate::dns::Name;

#[derive(Default)]
struct ForwardEntry {
    zone: Option<ForwardZone>,
    records: HashMap<Name, Vec<StoredRecord>>,
}

struct ReverseEntry {
    zone: ReverseZone,
    records: HashMap<IpAddr, Vec<StoredRecord>>,
}

#[derive(Default)]
struct Inner {
    forward: HashMap<Name, ForwardEntry>,
    reverse: Vec<ReverseEntry>,
}

/// Reference in-memory store. Cheap to clone-share via `Arc`; internally
/// guarded by a single reader-writer lock since zone data changes rarely and
/// every `Engine::query` only ever reads it.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_forward_zone(&self, zone: ForwardZone) {
        debug!(root = %zone.root.to_text(), "adding forward zone");
        let mut inner = self.inner.write();
        inner.forward.entry(zone.root.clone()).or_default().zone = Some(zone);
    }

    /// `owner` is relative to the zone root (`Name::root()` = apex).
    pub fn add_record(&self, zone_root: &Name, owner: Name, ttl: u32, data: RecordData) {
        let mut inner = self.inner.write();
        inner
            .forward
            .entry(zone_root.clone())
            .or_default()
            .records
            .entry(owner.clone())
            .or_default()
            .push(StoredRecord { owner, ttl, data });
    }

    pub fn add_reverse_zone(&self, zone: ReverseZone) {
        debug!(root = %zone.root_name().to_text(), "adding reverse zone");
        let mut inner = self.inner.write();
        inner.reverse.push(ReverseEntry {
            zone,
            records: HashMap::new(),
        });
    }

    pub fn add_reverse_record(&self, zone_root: &Name, address: IpAddr, ttl: u32, data: RecordData) {
        let mut inner = self.inner.write();
        if let Some(entry) = inner
            .reverse
            .iter_mut()
            .find(|e| e.zone.root_name() == *zone_root)
        {
            entry
                .records
                .entry(address)
                .or_default()
                .push(StoredRecord {
                    owner: Name::root(),
                    ttl,
                    data,
                });
        }
    }
}

impl RecordStore for MemoryStore {
    fn forward_zones(&self) -> Vec<ForwardZone> {
        self.inner
            .read()
            .forward
            .values()
            .filter_map(|e| e.zone.clone())
            .collect()
    }

    fn reverse_zones(&self) -> Vec<ReverseZone> {
        self.inner.read().reverse.iter().map(|e| e.zone.clone()).collect()
    }

    fn records_of_kind(&self, zone_root: &Name, owner: &Name, kind: DNSResourceType) -> Vec<StoredRecord> {
        let inner = self.inner.read();
        inner
            .forward
            .get(zone_root)
            .and_then(|e| e.records.get(owner))
            .map(|recs| recs.iter().filter(|r| r.kind() == kind).cloned().collect())
            .unwrap_or_default()
    }

    fn has_any_record(&self, zone_root: &Name, owner: &Name) -> bool {
        const RELEVANT: [DNSResourceType; 7] = [
            DNSResourceType::A,
            DNSResourceType::AAAA,
            DNSResourceType::CNAME,
            DNSResourceType::MX,
            DNSResourceType::NS,
            DNSResourceType::TXT,
            DNSResourceType::SRV,
        ];
        let inner = self.inner.read();
        inner
            .forward
            .get(zone_root)
            .and_then(|e| e.records.get(owner))
            .map(|recs| recs.iter().any(|r| RELEVANT.contains(&r.kind())))
            .unwrap_or(false)
    }

    fn reverse_records(&self, zone_root: &Name, kind: DNSResourceType, address: IpAddr) -> Vec<StoredRecord> {
        let inner = self.inner.read();
        inner
            .reverse
            .iter()
            .find(|e| e.zone.root_name() == *zone_root)
            .and_then(|e| e.records.get(&address))
            .map(|recs| recs.iter().filter(|r| r.kind() == kind).cloned().collect())
            .unwrap_or_default()
    }

    fn auto_reverse_lookups(&self, address: IpAddr) -> Vec<(Name, Name, StoredRecord)> {
        let inner = self.inner.read();
        let mut out = Vec::new();
        for entry in inner.forward.values() {
            let Some(zone) = &entry.zone else { continue };
            for (owner, recs) in &entry.records {
                for rec in recs {
                    let matches = match &rec.data {
                        RecordData::A { address: a, auto_reverse } => {
                            *auto_reverse && IpAddr::V4(*a) == address
                        }
                        RecordData::Aaaa { address: a, auto_reverse } => {
                            *auto_reverse && IpAddr::V6(*a) == address
                        }
                        _ => false,
                    };
                    if matches {
                        let absolute = owner.with_suffix(&zone.root);
                        out.push((zone.root.clone(), absolute, rec.clone()));
                    }
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn stores_and_retrieves_a_record_at_apex() {
        let store = MemoryStore::new();
        let root = Name::parse("example.com.");
        store.add_forward_zone(ForwardZone {
            root: root.clone(),
            last_modified: 1_700_000_000,
            zsk_pem: None,
        });
        store.add_record(
            &root,
            Name::parse("www"),
            300,
            RecordData::A {
                address: Ipv4Addr::new(192, 0, 2, 1),
                auto_reverse: false,
            },
        );

        let found = store.records_of_kind(&root, &Name::parse("www"), DNSResourceType::A);
        assert_eq!(found.len(), 1);
        assert!(!store.has_any_record(&root, &Name::parse("nope")));
        assert!(store.has_any_record(&root, &Name::parse("www")));
    }

    #[test]
    fn auto_reverse_lookup_crosses_zones() {
        let store = MemoryStore::new();
        let root = Name::parse("example.com.");
        store.add_forward_zone(ForwardZone {
            root: root.clone(),
            last_modified: 0,
            zsk_pem: None,
        });
        store.add_record(
            &root,
            Name::parse("host"),
            300,
            RecordData::A {
                address: Ipv4Addr::new(203, 0, 113, 5),
                auto_reverse: true,
            },
        );

        let hits = store.auto_reverse_lookups(IpAddr::V4(Ipv4Addr::new(203, 0, 113, 5)));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].1, Name::parse("host.example.com."));
    }

    #[test]
    fn reverse_zone_contains_respects_prefix() {
        let zone = ReverseZone {
            network: "192.0.2.0".parse().unwrap(),
            prefix: 24,
            last_modified: 0,
            zsk_pem: None,
        };
        assert!(zone.contains("192.0.2.5".parse().unwrap()));
        assert!(!zone.contains("192.0.3.5".parse().unwrap()));
    }
}
