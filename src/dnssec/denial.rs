//! Online NSEC denial-of-existence synthesis (§4.6). Unlike the reference
//! codebase's `denial.rs` (which *validates* NSEC/NSEC3 in received
//! responses), this module *synthesises* a minimal single-name NSEC proof —
//! there is no remote answer to validate here, only one to produce.

use crate::dns::enums::DNSResourceType;
use crate::dns::record::{encode_type_bitmap, RData, Record};
use crate::dns::Name;

/// Raw RR-type codes for the NXDOMAIN bitmap: `{RRSIG, NSEC}` (§4.6).
const NXDOMAIN_TYPES: [u16; 2] = [46, 47];

/// Raw RR-type codes for the NODATA bitmap (§4.6): a fixed superset of every
/// type the zone might hold, regardless of which types actually exist at the
/// queried name — including HIP (55), which this engine never stores or
/// emits as a record but which the bitmap still names.
const NODATA_TYPES: [u16; 14] = [
    1,  // A
    2,  // NS
    6,  // SOA
    15, // MX
    16, // TXT
    28, // AAAA
    33, // SRV
    44, // SSHFP
    46, // RRSIG
    47, // NSEC
    48, // DNSKEY
    55, // HIP
    59, // CDS
    60, // CDNSKEY
];

/// Raw RR-type codes for the referral NSEC bitmap (§11): proves a delegated
/// name has no DS records, distinct from the general NODATA bitmap above.
const REFERRAL_TYPES: [u16; 3] = [2, 46, 47]; // NS, RRSIG, NSEC

/// Whether the denial proof should be synthesised for "name does not exist
/// at all" (NXDOMAIN) or "name exists, requested type does not" (NODATA).
pub enum DenialKind {
    NxDomain,
    NoData,
}

/// Build the NSEC record proving non-existence of `qname` or of the queried
/// type at `qname` (§4.6). The next-name field is `qname` with a `\x00`
/// label prepended — the lexicographically smallest successor sufficient to
/// satisfy validators that only check coverage of the queried name.
pub fn synthesize_nsec(qname: &Name, kind: DenialKind) -> Record {
    let next_name = qname.prepend_nul_label();
    let types = match kind {
        DenialKind::NxDomain => NXDOMAIN_TYPES.to_vec(),
        DenialKind::NoData => NODATA_TYPES.to_vec(),
    };
    Record::new(qname.clone(), 86400, RData::Nsec { next_name, types })
}

/// NSEC proving a delegated name carries no DS records (§11, grounded on
/// `lookup_referral`'s inline NSEC construction, bitmap `{NS, RRSIG, NSEC}` —
/// narrower than the general NODATA bitmap since a delegation point is never
/// anything but an NS owner).
pub fn synthesize_referral_nsec(owner: &Name) -> Record {
    let next_name = owner.prepend_nul_label();
    Record::new(
        owner.clone(),
        86400,
        RData::Nsec {
            next_name,
            types: REFERRAL_TYPES.to_vec(),
        },
    )
}

/// Does `bitmap` (an encoded RFC 4034 §4.1.2 type bitmap) have `rtype` set.
#[cfg(test)]
pub(crate) fn bitmap_contains(bitmap: &[u8], rtype: DNSResourceType) -> bool {
    let code = u16::from(rtype);
    let window = (code / 256) as u8;
    if bitmap.is_empty() || bitmap[0] != window {
        return false;
    }
    let len = bitmap[1] as usize;
    let byte_index = (code % 256 / 8) as usize;
    if byte_index >= len {
        return false;
    }
    let bit_index = 7 - (code % 8);
    (bitmap[2 + byte_index] >> bit_index) & 1 == 1
}
