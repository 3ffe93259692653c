//! Typed resource records (§3) and their wire/canonical encodings.
//!
//! RDATA embedded names are never compressed here (legal per RFC 1035 — compression
//! is optional), which makes "canonical" and "ordinary wire" RDATA bytes identical;
//! only the record *owner* name differs between the two encodings (§4.1).

use std::net::{Ipv4Addr, Ipv6Addr};

use super::enums::{DNSResourceClass, DNSResourceType};
use super::error::ParseError;
use super::name::{Name, NameCompressor};
use super::question::{read_bytes, read_u16, read_u32};

#[derive(Clone, Debug, PartialEq)]
pub enum RData {
    A(Ipv4Addr),
    Aaaa(Ipv6Addr),
    Ns(Name),
    Cname(Name),
    Soa {
        mname: Name,
        rname: Name,
        serial: u32,
        refresh: u32,
        retry: u32,
        expire: u32,
        minimum: u32,
    },
    Mx {
        preference: u16,
        exchange: Name,
    },
    /// Each entry is one already-chunked character-string (≤255 octets).
    Txt(Vec<Vec<u8>>),
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
    Sshfp {
        algorithm: u8,
        fp_type: u8,
        fingerprint: Vec<u8>,
    },
    Ds {
        key_tag: u16,
        algorithm: u8,
        digest_type: u8,
        digest: Vec<u8>,
    },
    Cds {
        key_tag: u16,
        algorithm: u8,
        digest_type: u8,
        digest: Vec<u8>,
    },
    Ptr(Name),
    Dnskey {
        flags: u16,
        protocol: u8,
        algorithm: u8,
        public_key: Vec<u8>,
    },
    Cdnskey {
        flags: u16,
        protocol: u8,
        algorithm: u8,
        public_key: Vec<u8>,
    },
    Rrsig {
        type_covered: DNSResourceType,
        algorithm: u8,
        labels: u8,
        original_ttl: u32,
        expiration: u32,
        inception: u32,
        key_tag: u16,
        signer_name: Name,
        signature: Vec<u8>,
    },
    /// `types` holds raw RR-type codes rather than `DNSResourceType`, since the
    /// fixed NODATA bitmap (§4.6) includes codes this crate never constructs
    /// records for (e.g. HIP).
    Nsec {
        next_name: Name,
        types: Vec<u16>,
    },
    Opt {
        udp_payload_size: u16,
        extended_rcode: u8,
        version: u8,
        dnssec_ok: bool,
    },
    /// Unrecognised or not-yet-modeled RR type encountered while parsing a
    /// request; carried only so the message parser can skip past it.
    Raw(Vec<u8>),
}

impl RData {
    pub fn rtype(&self) -> DNSResourceType {
        match self {
            RData::A(_) => DNSResourceType::A,
            RData::Aaaa(_) => DNSResourceType::AAAA,
            RData::Ns(_) => DNSResourceType::NS,
            RData::Cname(_) => DNSResourceType::CNAME,
            RData::Soa { .. } => DNSResourceType::SOA,
            RData::Mx { .. } => DNSResourceType::MX,
            RData::Txt(_) => DNSResourceType::TXT,
            RData::Srv { .. } => DNSResourceType::SRV,
            RData::Caa { .. } => DNSResourceType::CAA,
            RData::Naptr { .. } => DNSResourceType::NAPTR,
            RData::Sshfp { .. } => DNSResourceType::SSHFP,
            RData::Ds { .. } => DNSResourceType::DS,
            RData::Cds { .. } => DNSResourceType::CDS,
            RData::Ptr(_) => DNSResourceType::PTR,
            RData::Dnskey { .. } => DNSResourceType::DNSKEY,
            RData::Cdnskey { .. } => DNSResourceType::CDNSKEY,
            RData::Rrsig { .. } => DNSResourceType::RRSIG,
            RData::Nsec { .. } => DNSResourceType::NSEC,
            RData::Opt { .. } => DNSResourceType::OPT,
            RData::Raw(_) => DNSResourceType::Unknown,
        }
    }

    /// RDATA bytes only — no name compression, ever (see module doc).
    pub fn encode(&self, out: &mut Vec<u8>) {
        match self {
            RData::A(addr) => out.extend(addr.octets()),
            RData::Aaaa(addr) => out.extend(addr.octets()),
            RData::Ns(name) => name.encode_canonical(out),
            RData::Cname(name) => name.encode_canonical(out),
            RData::Ptr(name) => name.encode_canonical(out),
            RData::Soa {
                mname,
                rname,
                serial,
                refresh,
                retry,
                expire,
                minimum,
            } => {
                mname.encode_canonical(out);
                rname.encode_canonical(out);
                out.extend(serial.to_be_bytes());
                out.extend(refresh.to_be_bytes());
                out.extend(retry.to_be_bytes());
                out.extend(expire.to_be_bytes());
                out.extend(minimum.to_be_bytes());
            }
            RData::Mx { preference, exchange } => {
                out.extend(preference.to_be_bytes());
                exchange.encode_canonical(out);
            }
            RData::Txt(chunks) => {
                for chunk in chunks {
                    out.push(chunk.len() as u8);
                    out.extend(chunk);
                }
            }
            RData::Srv {
                priority,
                weight,
                port,
                target,
            } => {
                out.extend(priority.to_be_bytes());
                out.extend(weight.to_be_bytes());
                out.extend(port.to_be_bytes());
                target.encode_canonical(out);
            }
            RData::Caa { flags, tag, value } => {
                out.push(*flags);
                out.push(tag.len() as u8);
                out.extend(tag.as_bytes());
                out.extend(value);
            }
            RData::Naptr {
                order,
                preference,
                flags,
                service,
                regexp,
                replacement,
            } => {
                out.extend(order.to_be_bytes());
                out.extend(preference.to_be_bytes());
                out.push(flags.len() as u8);
                out.extend(flags.as_bytes());
                out.push(service.len() as u8);
                out.extend(service.as_bytes());
                out.push(regexp.len() as u8);
                out.extend(regexp.as_bytes());
                replacement.encode_canonical(out);
            }
            RData::Sshfp {
                algorithm,
                fp_type,
                fingerprint,
            } => {
                out.push(*algorithm);
                out.push(*fp_type);
                out.extend(fingerprint);
            }
            RData::Ds {
                key_tag,
                algorithm,
                digest_type,
                digest,
            }
            | RData::Cds {
                key_tag,
                algorithm,
                digest_type,
                digest,
            } => {
                out.extend(key_tag.to_be_bytes());
                out.push(*algorithm);
                out.push(*digest_type);
                out.extend(digest);
            }
            RData::Dnskey {
                flags,
                protocol,
                algorithm,
                public_key,
            }
            | RData::Cdnskey {
                flags,
                protocol,
                algorithm,
                public_key,
            } => {
                out.extend(flags.to_be_bytes());
                out.push(*protocol);
                out.push(*algorithm);
                out.extend(public_key);
            }
            RData::Rrsig {
                type_covered,
                algorithm,
                labels,
                original_ttl,
                expiration,
                inception,
                key_tag,
                signer_name,
                signature,
            } => {
                out.extend(u16::from(*type_covered).to_be_bytes());
                out.push(*algorithm);
                out.push(*labels);
                out.extend(original_ttl.to_be_bytes());
                out.extend(expiration.to_be_bytes());
                out.extend(inception.to_be_bytes());
                out.extend(key_tag.to_be_bytes());
                signer_name.encode_canonical(out);
                out.extend(signature);
            }
            RData::Nsec { next_name, types } => {
                next_name.encode_canonical(out);
                out.extend(encode_type_bitmap(types));
            }
            RData::Opt { .. } => {}
            RData::Raw(bytes) => out.extend(bytes),
        }
    }

    /// `rdata` is a standalone slice (not compression-relative to the whole
    /// message), since RDATA names are never compression pointers on the way in.
    fn decode(
        rtype: DNSResourceType,
        class_raw: u16,
        ttl_raw: u32,
        rdata: &[u8],
    ) -> Result<RData, ParseError> {
        let mut pos = 0usize;
        Ok(match rtype {
            DNSResourceType::A => {
                let b = read_bytes(rdata, &mut pos, 4)?;
                RData::A(Ipv4Addr::new(b[0], b[1], b[2], b[3]))
            }
            DNSResourceType::AAAA => {
                let b = read_bytes(rdata, &mut pos, 16)?;
                let mut octets = [0u8; 16];
                octets.copy_from_slice(b);
                RData::Aaaa(Ipv6Addr::from(octets))
            }
            DNSResourceType::NS => RData::Ns(Name::decode(rdata, 0)?.0),
            DNSResourceType::CNAME => RData::Cname(Name::decode(rdata, 0)?.0),
            DNSResourceType::PTR => RData::Ptr(Name::decode(rdata, 0)?.0),
            DNSResourceType::OPT => RData::Opt {
                udp_payload_size: class_raw,
                extended_rcode: ((ttl_raw >> 24) & 0xFF) as u8,
                version: ((ttl_raw >> 16) & 0xFF) as u8,
                dnssec_ok: (ttl_raw & 0x8000) != 0,
            },
            _ => RData::Raw(rdata.to_vec()),
        })
    }
}

/// RFC 4034 §4.1.2 type bitmap, single window (every type this engine emits
/// or references is numerically below 256).
pub fn encode_type_bitmap(type_codes: &[u16]) -> Vec<u8> {
    let mut codes: Vec<u16> = type_codes.to_vec();
    codes.sort_unstable();
    codes.dedup();
    let max = *codes.iter().max().unwrap_or(&0);
    let bitmap_len = (max / 8) as usize + 1;
    let mut bitmap = vec![0u8; bitmap_len];
    for code in &codes {
        let byte_index = (*code / 8) as usize;
        let bit_index = 7 - (*code % 8);
        bitmap[byte_index] |= 1 << bit_index;
    }
    let mut out = Vec::with_capacity(2 + bitmap.len());
    out.push(0); // window block 0
    out.push(bitmap.len() as u8);
    out.extend(bitmap);
    out
}

#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    pub name: Name,
    pub class: DNSResourceClass,
    pub ttl: u32,
    pub rdata: RData,
}

impl Record {
    pub fn new(name: Name, ttl: u32, rdata: RData) -> Self {
        Record {
            name,
            class: DNSResourceClass::IN,
            ttl,
            rdata,
        }
    }

    pub fn rtype(&self) -> DNSResourceType {
        self.rdata.rtype()
    }

    /// Ordinary wire encoding: owner may be compressed.
    pub fn encode(&self, out: &mut Vec<u8>, compressor: &mut NameCompressor) {
        self.name.encode_compressed(out, compressor);
        out.extend(u16::from(self.rtype()).to_be_bytes());
        out.extend(u16::from(self.class).to_be_bytes());
        out.extend(self.ttl.to_be_bytes());
        let rdata_start = out.len();
        out.extend([0u8, 0u8]); // rdlength placeholder
        self.rdata.encode(out);
        let rdlength = (out.len() - rdata_start - 2) as u16;
        out[rdata_start..rdata_start + 2].copy_from_slice(&rdlength.to_be_bytes());
    }

    /// Canonical encoding (RFC 4034 §6.2) used as input to RRSIG signatures:
    /// owner uncompressed and lower-case (already guaranteed by `Name`), class
    /// forced to IN, the record's own TTL (not the RRSIG's Original TTL field
    /// — see DESIGN.md).
    pub fn encode_canonical(&self, out: &mut Vec<u8>) {
        self.name.encode_canonical(out);
        out.extend(u16::from(self.rtype()).to_be_bytes());
        out.extend(1u16.to_be_bytes()); // class IN
        out.extend(self.ttl.to_be_bytes());
        let rdata_start = out.len();
        out.extend([0u8, 0u8]);
        self.rdata.encode(out);
        let rdlength = (out.len() - rdata_start - 2) as u16;
        out[rdata_start..rdata_start + 2].copy_from_slice(&rdlength.to_be_bytes());
    }
}

/// Decode one resource record starting at `start` in the full message buffer.
/// Used only for the additional section of an incoming request (to find OPT).
pub fn decode_record(buf: &[u8], start: usize) -> Result<(Record, usize), ParseError> {
    let (name, mut pos) = Name::decode(buf, start)?;
    let type_raw = read_u16(buf, &mut pos)?;
    let class_raw = read_u16(buf, &mut pos)?;
    let ttl_raw = read_u32(buf, &mut pos)?;
    let rdlength = read_u16(buf, &mut pos)? as usize;
    let rdata_bytes = read_bytes(buf, &mut pos, rdlength)?;

    let rtype = DNSResourceType::from(type_raw);
    let rdata = RData::decode(rtype, class_raw, ttl_raw, rdata_bytes)?;
    let class = if rtype == DNSResourceType::OPT {
        DNSResourceClass::IN
    } else {
        DNSResourceClass::from(class_raw)
    };
    let ttl = if rtype == DNSResourceType::OPT { 0 } else { ttl_raw };

    Ok((
        Record {
            name,
            class,
            ttl,
            rdata,
        },
        pos,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_record_roundtrips_wire() {
        let rec = Record::new(Name::parse("www.example.com."), 300, RData::A(Ipv4Addr::new(192, 0, 2, 1)));
        let mut out = Vec::new();
        let mut compressor = NameCompressor::new();
        rec.encode(&mut out, &mut compressor);

        let (decoded, pos) = decode_record(&out, 0).unwrap();
        assert_eq!(pos, out.len());
        assert_eq!(decoded.rdata, RData::A(Ipv4Addr::new(192, 0, 2, 1)));
        assert_eq!(decoded.ttl, 300);
    }

    #[test]
    fn type_bitmap_matches_nodata_superset() {
        // A=1, NS=2, SOA=6, RRSIG=46, NSEC=47
        let bitmap = encode_type_bitmap(&[1, 2, 6, 46, 47]);
        assert_eq!(bitmap[0], 0); // window 0
        let len = bitmap[1] as usize;
        assert_eq!(bitmap.len(), 2 + len);
    }

    #[test]
    fn canonical_encoding_forces_class_in() {
        let rec = Record::new(Name::parse("www.EXAMPLE.com."), 86400, RData::A(Ipv4Addr::new(1, 2, 3, 4)));
        let mut out = Vec::new();
        rec.encode_canonical(&mut out);
        // owner "www.example.com." = 3www7example3com0 -> 18 bytes, then type(2) class(2) ttl(4) rdlen(2) rdata(4)
        assert_eq!(out.len(), 18 + 2 + 2 + 4 + 2 + 4);
        let class_offset = 18 + 2;
        assert_eq!(&out[class_offset..class_offset + 2], &1u16.to_be_bytes());
    }
}
