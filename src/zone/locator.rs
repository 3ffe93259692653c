//! Zone locator (§4.3): given a query name, find the most-specific owning
//! forward or reverse zone.

use crate::dns::name::reverse_labels_to_address;
use crate::dns::Name;
use crate::store::{ForwardZone, RecordStore, ReverseZone};

pub enum Located {
    Forward { zone: ForwardZone, relative_owner: Name },
    Reverse { zone: ReverseZone, address: std::net::IpAddr },
}

/// Longest-suffix match among forward zone roots (§4.3). Returns the owning
/// zone and the query name with the zone root stripped (`Name::root()` at
/// the apex).
pub fn locate_forward(store: &dyn RecordStore, qname: &Name) -> Option<(ForwardZone, Name)> {
    store
        .forward_zones()
        .into_iter()
        .filter(|z| qname.has_suffix(&z.root))
        .max_by_key(|z| z.root.label_count())
        .map(|z| {
            let relative = qname.strip_suffix(&z.root).expect("has_suffix already checked");
            (z, relative)
        })
}

/// Decode `qname` as a reverse-DNS name and find the longest-prefix reverse
/// zone containing the resulting address (§4.3). A name that doesn't parse
/// as a reverse-DNS name (wrong suffix, malformed labels) yields `None`.
pub fn locate_reverse(store: &dyn RecordStore, qname: &Name) -> Option<(ReverseZone, std::net::IpAddr)> {
    let (relative, is_v6) = if qname.has_suffix(&Name::in_addr_arpa()) {
        (qname.strip_suffix(&Name::in_addr_arpa())?, false)
    } else if qname.has_suffix(&Name::ip6_arpa()) {
        (qname.strip_suffix(&Name::ip6_arpa())?, true)
    } else {
        return None;
    };

    let address = reverse_labels_to_address(relative.labels(), is_v6)?;

    store
        .reverse_zones()
        .into_iter()
        .filter(|z| z.contains(address))
        .max_by_key(|z| z.prefix)
        .map(|z| (z, address))
}

/// Check the query name's shape first (`in-addr.arpa.`/`ip6.arpa.` suffix
/// means reverse), then dispatch to the matching locator.
pub fn locate(store: &dyn RecordStore, qname: &Name) -> Option<Located> {
    if qname.has_suffix(&Name::in_addr_arpa()) || qname.has_suffix(&Name::ip6_arpa()) {
        locate_reverse(store, qname).map(|(zone, address)| Located::Reverse { zone, address })
    } else {
        locate_forward(store, qname).map(|(zone, relative_owner)| Located::Forward { zone, relative_owner })
    }
}
