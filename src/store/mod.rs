//! Record-store façade (§3, §4.4, §6): the typed, read-only contract the
//! engine needs from whatever external database actually owns zone data.

pub mod memory;

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::dns::enums::DNSResourceType;
use crate::dns::name::network_to_reverse_name;
use crate::dns::Name;

pub use memory::MemoryStore;

#[derive(Clone, Debug)]
pub struct ForwardZone {
    pub root: Name,
    pub last_modified: u64,
    pub zsk_pem: Option<Vec<u8>>,
}

#[derive(Clone, Debug)]
pub struct ReverseZone {
    pub network: IpAddr,
    pub prefix: u8,
    pub last_modified: u64,
    pub zsk_pem: Option<Vec<u8>>,
}

impl ReverseZone {
    /// The zone's canonical `.in-addr.arpa` / `.ip6.arpa` owner name (§4.2),
    /// used as the RRSIG signer-name and SOA owner.
    pub fn root_name(&self) -> Name {
        network_to_reverse_name(self.network, self.prefix)
    }

    /// True if `address` falls within this zone's network/prefix.
    pub fn contains(&self, address: IpAddr) -> bool {
        match (self.network, address) {
            (IpAddr::V4(net), IpAddr::V4(addr)) => {
                let mask = if self.prefix == 0 {
                    0
                } else {
                    u32::MAX << (32 - self.prefix as u32)
                };
                (u32::from(net) & mask) == (u32::from(addr) & mask)
            }
            (IpAddr::V6(net), IpAddr::V6(addr)) => {
                let mask: u128 = if self.prefix == 0 {
                    0
                } else {
                    u128::MAX << (128 - self.prefix as u32)
                };
                (u128::from(net) & mask) == (u128::from(addr) & mask)
            }
            _ => false,
        }
    }
}

/// One stored record, owner relative to its zone root (`Name::root()` = `@`).
#[derive(Clone, Debug)]
pub struct StoredRecord {
    pub owner: Name,
    pub ttl: u32,
    pub data: RecordData,
}

impl StoredRecord {
    pub fn kind(&self) -> DNSResourceType {
        self.data.kind()
    }
}

#[derive(Clone, Debug)]
pub enum RecordData {
    A { address: Ipv4Addr, auto_reverse: bool },
    Aaaa { address: Ipv6Addr, auto_reverse: bool },
    Cname(Name),
    Mx { preference: u16, exchange: Name },
    Ns(Name),
    /// Raw free text; chunked into ≤255-octet TXT character-strings at
    /// assembly time (§4.5).
    Txt(Vec<u8>),
    Srv {
        priority: u16,
        weight: u16,
        port: u16,
        target: Name,
    },
    Caa {
        flags: u8,
        tag: String,
        value: Vec<u8>,
    },
    Naptr {
        order: u16,
        preference: u16,
        flags: String,
        service: String,
        regexp: String,
        replacement: Name,
    },
    /// `key_type` is the OpenSSH key-type prefix (`ssh-rsa`, `ssh-ed25519`, …);
    /// the assembler derives the SSHFP algorithm number from it (§4.5).
    Sshfp {
        key_type: String,
        public_key: Vec<u8>,
    },
    Ds {
        key_tag: u16,
        algorithm: u8,
        digest_type: u8,
        digest: Vec<u8>,
    },
    Ptr(Name),
}

impl RecordData {
    pub fn kind(&self) -> DNSResourceType {
        match self {
            RecordData::A { .. } => DNSResourceType::A,
            RecordData::Aaaa { .. } => DNSResourceType::AAAA,
            RecordData::Cname(_) => DNSResourceType::CNAME,
            RecordData::Mx { .. } => DNSResourceType::MX,
            RecordData::Ns(_) => DNSResourceType::NS,
            RecordData::Txt(_) => DNSResourceType::TXT,
            RecordData::Srv { .. } => DNSResourceType::SRV,
            RecordData::Caa { .. } => DNSResourceType::CAA,
            RecordData::Naptr { .. } => DNSResourceType::NAPTR,
            RecordData::Sshfp { .. } => DNSResourceType::SSHFP,
            RecordData::Ds { .. } => DNSResourceType::DS,
            RecordData::Ptr(_) => DNSResourceType::PTR,
        }
    }
}

/// The read-only contract the engine needs from a zone/record backend.
/// `MemoryStore` is the reference implementation; any durable store can
/// implement this trait instead (§3, §6).
pub trait RecordStore: Send + Sync {
    fn forward_zones(&self) -> Vec<ForwardZone>;
    fn reverse_zones(&self) -> Vec<ReverseZone>;

    /// `owner` is relative to `zone_root` (`Name::root()` denotes the apex).
    fn records_of_kind(&self, zone_root: &Name, owner: &Name, kind: DNSResourceType) -> Vec<StoredRecord>;

    /// True if `owner` holds any of {A, AAAA, CNAME, MX, NS, TXT, SRV} (§4.4),
    /// used to distinguish NXDOMAIN from NODATA at a non-delegated empty name.
    fn has_any_record(&self, zone_root: &Name, owner: &Name) -> bool;

    /// `zone_root` is a reverse zone's canonical `.arpa` root (§4.2).
    fn reverse_records(&self, zone_root: &Name, kind: DNSResourceType, address: IpAddr) -> Vec<StoredRecord>;

    /// Every `auto_reverse` address record across all forward zones whose
    /// address equals `address`, as (zone root, absolute owner name, record).
    fn auto_reverse_lookups(&self, address: IpAddr) -> Vec<(Name, Name, StoredRecord)>;
}
