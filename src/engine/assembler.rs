//! Answer assembler (§4.5–§4.6): per-qtype handlers, CNAME chase, and
//! delegation/referral. Pure builders: every function here returns the RRs
//! it produced rather than mutating a shared response, and the CNAME chase is
//! an explicit depth-bounded loop rather than recursive handler calls.

use std::net::IpAddr;

use ring::digest::{digest, SHA1_FOR_LEGACY_USE_ONLY, SHA256};

use crate::dns::enums::DNSResourceType;
use crate::dns::record::{RData, Record};
use crate::dns::Name;
use crate::dnssec::{cdnskey_rdata, cds_rdata, dnskey_rdata, synthesize_referral_nsec, SigningKey};
use crate::error::EngineError;
use crate::store::{ForwardZone, RecordData, RecordStore, ReverseZone, StoredRecord};

/// Maximum CNAME chain length (§4.5, §8); exceeding it is NODATA, not SERVFAIL.
const MAX_CHASE_DEPTH: u8 = 8;

/// Nameserver/SOA configuration the assembler needs, decided once at startup
/// (§6) rather than threaded through every call as separate arguments.
pub struct AssemblyContext<'a> {
    pub primary_nameserver: &'a Name,
    pub admin_mailbox: &'a Name,
    pub auto_nameservers: &'a [Name],
    pub ksk: &'a SigningKey,
    pub zsk: Option<&'a SigningKey>,
}

/// The three sections the assembler fills, plus whether the name is truly
/// absent (drives the NXDOMAIN/NODATA choice made centrally in `engine/mod.rs`).
#[derive(Default)]
pub struct AssembledSections {
    pub answers: Vec<Record>,
    pub authorities: Vec<Record>,
    pub additionals: Vec<Record>,
    pub nxdomain: bool,
}

/// Build the SOA record for a zone (§4.5, §3): always TTL 86400, fields from
/// configuration plus the zone's own last-modified timestamp as the serial.
pub fn soa_record(owner: &Name, last_modified: u64, ctx: &AssemblyContext) -> Record {
    Record::new(
        owner.clone(),
        86400,
        RData::Soa {
            mname: ctx.primary_nameserver.clone(),
            rname: ctx.admin_mailbox.clone(),
            serial: last_modified as u32,
            refresh: 86400,
            retry: 7200,
            expire: 3_600_000,
            minimum: 172_800,
        },
    )
}

/// SSHFP algorithm-number mapping (§4.5) from an OpenSSH key-type prefix.
fn sshfp_algorithm(key_type: &str) -> u8 {
    if key_type == "ssh-rsa" {
        1
    } else if key_type == "ssh-dsa" {
        2
    } else if key_type.starts_with("ecdsa-sha") {
        3
    } else if key_type == "ssh-ed25519" {
        4
    } else {
        0
    }
}

/// RR types whose stored-record shape maps onto `RData` with no extra
/// per-type logic (§3); NS, TXT, SSHFP, DS, A/AAAA all need bespoke handling
/// and are not covered here.
fn simple_rdata(data: &RecordData) -> Option<RData> {
    match data {
        RecordData::Mx { preference, exchange } => Some(RData::Mx {
            preference: *preference,
            exchange: exchange.clone(),
        }),
        RecordData::Srv {
            priority,
            weight,
            port,
            target,
        } => Some(RData::Srv {
            priority: *priority,
            weight: *weight,
            port: *port,
            target: target.clone(),
        }),
        RecordData::Caa { flags, tag, value } => Some(RData::Caa {
            flags: *flags,
            tag: tag.clone(),
            value: value.clone(),
        }),
        RecordData::Naptr {
            order,
            preference,
            flags,
            service,
            regexp,
            replacement,
        } => Some(RData::Naptr {
            order: *order,
            preference: *preference,
            flags: flags.clone(),
            service: service.clone(),
            regexp: regexp.clone(),
            replacement: replacement.clone(),
        }),
        RecordData::Ns(target) => Some(RData::Ns(target.clone())),
        _ => None,
    }
}

/// RR types that fall through to the CNAME chase when nothing is found at
/// the owner (§4.5). DNSKEY/CDNSKEY/CDS/SOA/CNAME are handled outside the
/// chase entirely; PTR is reverse-only.
fn is_chaseable(qtype: DNSResourceType) -> bool {
    matches!(
        qtype,
        DNSResourceType::A
            | DNSResourceType::AAAA
            | DNSResourceType::MX
            | DNSResourceType::NS
            | DNSResourceType::TXT
            | DNSResourceType::SRV
            | DNSResourceType::CAA
            | DNSResourceType::NAPTR
            | DNSResourceType::SSHFP
            | DNSResourceType::DS
    )
}

/// Direct (non-chasing) lookup for one qtype at one owner (§4.5).
fn fetch_direct(
    store: &dyn RecordStore,
    zone_root: &Name,
    relative_owner: &Name,
    qtype: DNSResourceType,
    current_name: &Name,
    ctx: &AssemblyContext,
) -> Result<Vec<Record>, EngineError> {
    match qtype {
        DNSResourceType::A => Ok(store
            .records_of_kind(zone_root, relative_owner, DNSResourceType::A)
            .into_iter()
            .filter_map(|rec| match rec.data {
                RecordData::A { address, .. } => Some(Record::new(current_name.clone(), rec.ttl, RData::A(address))),
                _ => None,
            })
            .collect()),
        DNSResourceType::AAAA => Ok(store
            .records_of_kind(zone_root, relative_owner, DNSResourceType::AAAA)
            .into_iter()
            .filter_map(|rec| match rec.data {
                RecordData::Aaaa { address, .. } => Some(Record::new(current_name.clone(), rec.ttl, RData::Aaaa(address))),
                _ => None,
            })
            .collect()),
        DNSResourceType::MX | DNSResourceType::SRV | DNSResourceType::CAA | DNSResourceType::NAPTR => Ok(store
            .records_of_kind(zone_root, relative_owner, qtype)
            .iter()
            .filter_map(|rec| simple_rdata(&rec.data).map(|rd| Record::new(current_name.clone(), rec.ttl, rd)))
            .collect()),
        DNSResourceType::TXT => Ok(store
            .records_of_kind(zone_root, relative_owner, DNSResourceType::TXT)
            .into_iter()
            .filter_map(|rec| match rec.data {
                RecordData::Txt(bytes) => {
                    let chunks: Vec<Vec<u8>> = bytes.chunks(255).map(|c| c.to_vec()).collect();
                    Some(Record::new(current_name.clone(), rec.ttl, RData::Txt(chunks)))
                }
                _ => None,
            })
            .collect()),
        DNSResourceType::SSHFP => {
            let mut out = Vec::new();
            for rec in store.records_of_kind(zone_root, relative_owner, DNSResourceType::SSHFP) {
                if let RecordData::Sshfp { key_type, public_key } = &rec.data {
                    let algorithm = sshfp_algorithm(key_type);
                    let sha1 = digest(&SHA1_FOR_LEGACY_USE_ONLY, public_key).as_ref().to_vec();
                    let sha256 = digest(&SHA256, public_key).as_ref().to_vec();
                    out.push(Record::new(
                        current_name.clone(),
                        rec.ttl,
                        RData::Sshfp {
                            algorithm,
                            fp_type: 1,
                            fingerprint: sha1,
                        },
                    ));
                    out.push(Record::new(
                        current_name.clone(),
                        rec.ttl,
                        RData::Sshfp {
                            algorithm,
                            fp_type: 2,
                            fingerprint: sha256,
                        },
                    ));
                }
            }
            Ok(out)
        }
        DNSResourceType::DS => {
            let mut out = Vec::new();
            for rec in store.records_of_kind(zone_root, relative_owner, DNSResourceType::DS) {
                if let RecordData::Ds {
                    key_tag,
                    algorithm,
                    digest_type,
                    digest,
                } = &rec.data
                {
                    if digest.is_empty() {
                        return Err(EngineError::MissingDsDigest {
                            owner: current_name.to_text(),
                        });
                    }
                    out.push(Record::new(
                        current_name.clone(),
                        rec.ttl,
                        RData::Ds {
                            key_tag: *key_tag,
                            algorithm: *algorithm,
                            digest_type: *digest_type,
                            digest: digest.clone(),
                        },
                    ));
                }
            }
            Ok(out)
        }
        DNSResourceType::NS => {
            let mut out: Vec<Record> = store
                .records_of_kind(zone_root, relative_owner, DNSResourceType::NS)
                .iter()
                .filter_map(|rec| simple_rdata(&rec.data).map(|rd| Record::new(current_name.clone(), rec.ttl, rd)))
                .collect();
            if relative_owner.is_root() {
                for ns in ctx.auto_nameservers {
                    out.push(Record::new(current_name.clone(), 86400, RData::Ns(ns.clone())));
                }
            }
            Ok(out)
        }
        _ => Ok(Vec::new()),
    }
}

/// Walk from `relative_owner` up toward (but excluding) the zone apex,
/// looking for the most specific ancestor that holds NS records (§4.3's
/// longest-suffix rule expressed as a walk, since the façade only supports
/// exact-owner lookups — see DESIGN.md).
fn find_delegation(
    store: &dyn RecordStore,
    zone_root: &Name,
    relative_owner: &Name,
) -> Option<(Name, Vec<StoredRecord>)> {
    let labels = relative_owner.labels();
    for start in 0..labels.len() {
        let candidate = Name::from_labels(labels[start..].iter().cloned());
        let ns = store.records_of_kind(zone_root, &candidate, DNSResourceType::NS);
        if !ns.is_empty() {
            return Some((candidate, ns));
        }
    }
    None
}

/// Delegation/referral (§4.5, §11): NS in authority (unsigned), DS-or-NSEC
/// proving their absence, and cross-zone glue in additional.
fn build_referral(
    store: &dyn RecordStore,
    zone: &ForwardZone,
    relative_owner: &Name,
    is_dnssec: bool,
) -> Result<(Vec<Record>, Vec<Record>, bool), EngineError> {
    let mut authorities = Vec::new();
    let mut additionals = Vec::new();

    let Some((delegation_owner, ns_records)) = find_delegation(store, &zone.root, relative_owner) else {
        let nxdomain = !store.has_any_record(&zone.root, relative_owner);
        return Ok((authorities, additionals, nxdomain));
    };

    let absolute_owner = delegation_owner.with_suffix(&zone.root);
    for ns in &ns_records {
        let RecordData::Ns(target) = &ns.data else { continue };
        authorities.push(Record::new(absolute_owner.clone(), ns.ttl, RData::Ns(target.clone())));

        if is_dnssec {
            let ds_records = store.records_of_kind(&zone.root, &delegation_owner, DNSResourceType::DS);
            if ds_records.is_empty() {
                authorities.push(synthesize_referral_nsec(&absolute_owner));
            } else {
                for ds in &ds_records {
                    let RecordData::Ds {
                        key_tag,
                        algorithm,
                        digest_type,
                        digest,
                    } = &ds.data
                    else {
                        continue;
                    };
                    if digest.is_empty() {
                        return Err(EngineError::MissingDsDigest {
                            owner: absolute_owner.to_text(),
                        });
                    }
                    authorities.push(Record::new(
                        absolute_owner.clone(),
                        ds.ttl,
                        RData::Ds {
                            key_tag: *key_tag,
                            algorithm: *algorithm,
                            digest_type: *digest_type,
                            digest: digest.clone(),
                        },
                    ));
                }
            }
        }

        // Cross-zone glue (§11): a fresh zone lookup for the nameserver's own
        // name, which may belong to a different authoritative zone than the
        // one being delegated.
        if let Some((glue_zone, glue_relative)) = crate::zone::locate_forward(store, target) {
            for kind in [DNSResourceType::A, DNSResourceType::AAAA] {
                for rec in store.records_of_kind(&glue_zone.root, &glue_relative, kind) {
                    match rec.data {
                        RecordData::A { address, .. } => {
                            additionals.push(Record::new(target.clone(), rec.ttl, RData::A(address)))
                        }
                        RecordData::Aaaa { address, .. } => {
                            additionals.push(Record::new(target.clone(), rec.ttl, RData::Aaaa(address)))
                        }
                        _ => {}
                    }
                }
            }
        }
    }

    Ok((authorities, additionals, false))
}

/// DNSKEY/CDNSKEY/CDS are apex-only and never participate in the CNAME chase
/// (§4.5, §11).
fn apex_key_answers(qtype: DNSResourceType, zone_root: &Name, owner: &Name, ctx: &AssemblyContext) -> Vec<Record> {
    match qtype {
        DNSResourceType::DNSKEY => {
            let mut out = vec![Record::new(owner.clone(), 86400, dnskey_rdata(257, *ctx.ksk.public_key()))];
            if let Some(zsk) = ctx.zsk {
                out.push(Record::new(owner.clone(), 86400, dnskey_rdata(256, *zsk.public_key())));
            }
            out
        }
        DNSResourceType::CDNSKEY => vec![Record::new(owner.clone(), 86400, cdnskey_rdata(257, *ctx.ksk.public_key()))],
        DNSResourceType::CDS => vec![Record::new(owner.clone(), 86400, cds_rdata(zone_root, ctx.ksk))],
        _ => Vec::new(),
    }
}

/// Assemble the answer/authority/additional sections for a forward-zone
/// query (§4.5). `zone`/`relative_owner` name the zone the query first
/// resolved into; both may change as the CNAME chase crosses zones, but the
/// signing zone used later in `engine/mod.rs` is always the one the request
/// originally located (see DESIGN.md).
pub fn assemble_forward(
    store: &dyn RecordStore,
    initial_zone: ForwardZone,
    initial_relative: Name,
    qtype: DNSResourceType,
    qname: &Name,
    is_dnssec: bool,
    ctx: &AssemblyContext,
) -> Result<AssembledSections, EngineError> {
    if qtype == DNSResourceType::SOA && initial_relative.is_root() {
        return Ok(AssembledSections {
            answers: vec![soa_record(qname, initial_zone.last_modified, ctx)],
            ..Default::default()
        });
    }

    if matches!(
        qtype,
        DNSResourceType::DNSKEY | DNSResourceType::CDNSKEY | DNSResourceType::CDS
    ) {
        let answers = if initial_relative.is_root() {
            apex_key_answers(qtype, &initial_zone.root, qname, ctx)
        } else {
            Vec::new()
        };
        return Ok(AssembledSections {
            answers,
            ..Default::default()
        });
    }

    if qtype == DNSResourceType::CNAME {
        let answers = store
            .records_of_kind(&initial_zone.root, &initial_relative, DNSResourceType::CNAME)
            .into_iter()
            .filter_map(|rec| match rec.data {
                RecordData::Cname(target) => Some(Record::new(qname.clone(), rec.ttl, RData::Cname(target))),
                _ => None,
            })
            .collect();
        return Ok(AssembledSections {
            answers,
            ..Default::default()
        });
    }

    if !is_chaseable(qtype) {
        return Ok(AssembledSections::default());
    }

    let mut zone = initial_zone;
    let mut relative_owner = initial_relative;
    let mut current_name = qname.clone();
    let mut answers = Vec::new();
    let mut depth = 0u8;

    loop {
        let direct = fetch_direct(store, &zone.root, &relative_owner, qtype, &current_name, ctx)?;
        if !direct.is_empty() {
            answers.extend(direct);
            return Ok(AssembledSections {
                answers,
                ..Default::default()
            });
        }

        let cname = store
            .records_of_kind(&zone.root, &relative_owner, DNSResourceType::CNAME)
            .into_iter()
            .find_map(|rec| match rec.data {
                RecordData::Cname(target) => Some((rec.ttl, target)),
                _ => None,
            });

        let Some((ttl, target)) = cname else {
            let (authorities, additionals, nxdomain) = build_referral(store, &zone, &relative_owner, is_dnssec)?;
            return Ok(AssembledSections {
                answers,
                authorities,
                additionals,
                nxdomain,
            });
        };

        depth += 1;
        answers.push(Record::new(current_name.clone(), ttl, RData::Cname(target.clone())));
        if depth > MAX_CHASE_DEPTH {
            // NODATA, not SERVFAIL or infinite work (§4.5, §8).
            return Ok(AssembledSections {
                answers,
                ..Default::default()
            });
        }

        match crate::zone::locate_forward(store, &target) {
            Some((next_zone, next_relative)) => {
                zone = next_zone;
                relative_owner = next_relative;
                current_name = target;
            }
            None => {
                // Alias points outside every authoritative zone: stop here.
                return Ok(AssembledSections {
                    answers,
                    ..Default::default()
                });
            }
        }
    }
}

/// Assemble the answer section for a reverse-zone query (§4.5, §11): SOA and
/// the key triplet only answer at the zone's own `.arpa` root, NS answers the
/// network root from the configured auto-nameserver list (no stored NS
/// lookup), and PTR falls back from a stored record to any `auto_reverse`
/// address record before giving up as NXDOMAIN.
pub fn assemble_reverse(
    store: &dyn RecordStore,
    zone: ReverseZone,
    address: IpAddr,
    qtype: DNSResourceType,
    qname: &Name,
    _is_dnssec: bool,
    ctx: &AssemblyContext,
) -> Result<AssembledSections, EngineError> {
    let zone_root = zone.root_name();
    let at_root = *qname == zone_root;

    if qtype == DNSResourceType::SOA && at_root {
        return Ok(AssembledSections {
            answers: vec![soa_record(&zone_root, zone.last_modified, ctx)],
            ..Default::default()
        });
    }

    if matches!(
        qtype,
        DNSResourceType::DNSKEY | DNSResourceType::CDNSKEY | DNSResourceType::CDS
    ) {
        let answers = if at_root {
            apex_key_answers(qtype, &zone_root, &zone_root, ctx)
        } else {
            Vec::new()
        };
        return Ok(AssembledSections {
            answers,
            ..Default::default()
        });
    }

    if qtype == DNSResourceType::NS && at_root {
        let answers = ctx
            .auto_nameservers
            .iter()
            .map(|ns| Record::new(zone_root.clone(), 86400, RData::Ns(ns.clone())))
            .collect();
        return Ok(AssembledSections {
            answers,
            ..Default::default()
        });
    }

    if qtype == DNSResourceType::PTR {
        let mut answers: Vec<Record> = store
            .reverse_records(&zone_root, DNSResourceType::PTR, address)
            .into_iter()
            .filter_map(|rec| match rec.data {
                RecordData::Ptr(target) => Some(Record::new(qname.clone(), rec.ttl, RData::Ptr(target))),
                _ => None,
            })
            .collect();

        if answers.is_empty() {
            answers.extend(
                store
                    .auto_reverse_lookups(address)
                    .into_iter()
                    .map(|(_, absolute_owner, rec)| Record::new(qname.clone(), rec.ttl, RData::Ptr(absolute_owner))),
            );
        }

        let nxdomain = answers.is_empty();
        return Ok(AssembledSections {
            answers,
            nxdomain,
            ..Default::default()
        });
    }

    Ok(AssembledSections::default())
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use super::*;
    use crate::store::{ForwardZone, MemoryStore};

    fn test_ksk() -> SigningKey {
        // A fixed, valid PKCS#8 P-256 EC private key used only in tests.
        const TEST_KEY_PEM: &str = include_str!("../../tests/fixtures/test_ksk.pem");
        SigningKey::from_pkcs8_pem(TEST_KEY_PEM.as_bytes()).expect("valid test key")
    }

    #[test]
    fn simple_a_lookup_returns_record() {
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

        let ksk = test_ksk();
        let ctx = AssemblyContext {
            primary_nameserver: &Name::parse("ns1.example.com."),
            admin_mailbox: &Name::parse("admin.example.com."),
            auto_nameservers: &[],
            ksk: &ksk,
            zsk: None,
        };

        let result = assemble_forward(
            &store,
            ForwardZone {
                root: root.clone(),
                last_modified: 1_700_000_000,
                zsk_pem: None,
            },
            Name::parse("www"),
            DNSResourceType::A,
            &Name::parse("www.example.com."),
            false,
            &ctx,
        )
        .unwrap();

        assert_eq!(result.answers.len(), 1);
        assert_eq!(result.answers[0].rdata, RData::A(Ipv4Addr::new(192, 0, 2, 1)));
        assert!(result.authorities.is_empty());
    }

    #[test]
    fn cname_chase_follows_alias_in_same_zone() {
        let store = MemoryStore::new();
        let root = Name::parse("example.com.");
        store.add_forward_zone(ForwardZone {
            root: root.clone(),
            last_modified: 0,
            zsk_pem: None,
        });
        store.add_record(&root, Name::parse("alias"), 300, RecordData::Cname(Name::parse("www.example.com.")));
        store.add_record(
            &root,
            Name::parse("www"),
            300,
            RecordData::A {
                address: Ipv4Addr::new(192, 0, 2, 1),
                auto_reverse: false,
            },
        );

        let ksk = test_ksk();
        let ctx = AssemblyContext {
            primary_nameserver: &Name::parse("ns1.example.com."),
            admin_mailbox: &Name::parse("admin.example.com."),
            auto_nameservers: &[],
            ksk: &ksk,
            zsk: None,
        };

        let result = assemble_forward(
            &store,
            ForwardZone {
                root: root.clone(),
                last_modified: 0,
                zsk_pem: None,
            },
            Name::parse("alias"),
            DNSResourceType::A,
            &Name::parse("alias.example.com."),
            false,
            &ctx,
        )
        .unwrap();

        assert_eq!(result.answers.len(), 2);
        assert_eq!(result.answers[0].rdata, RData::Cname(Name::parse("www.example.com.")));
        assert_eq!(result.answers[1].rdata, RData::A(Ipv4Addr::new(192, 0, 2, 1)));
    }

    #[test]
    fn missing_record_triggers_referral_nxdomain_when_no_other_records() {
        let store = MemoryStore::new();
        let root = Name::parse("example.com.");
        store.add_forward_zone(ForwardZone {
            root: root.clone(),
            last_modified: 0,
            zsk_pem: None,
        });

        let ksk = test_ksk();
        let ctx = AssemblyContext {
            primary_nameserver: &Name::parse("ns1.example.com."),
            admin_mailbox: &Name::parse("admin.example.com."),
            auto_nameservers: &[],
            ksk: &ksk,
            zsk: None,
        };

        let result = assemble_forward(
            &store,
            ForwardZone {
                root: root.clone(),
                last_modified: 0,
                zsk_pem: None,
            },
            Name::parse("ghost"),
            DNSResourceType::A,
            &Name::parse("ghost.example.com."),
            false,
            &ctx,
        )
        .unwrap();

        assert!(result.answers.is_empty());
        assert!(result.nxdomain);
    }

    #[test]
    fn reverse_ptr_answers_from_stored_record() {
        let store = MemoryStore::new();
        let zone = ReverseZone {
            network: "192.0.2.0".parse().unwrap(),
            prefix: 24,
            last_modified: 0,
            zsk_pem: None,
        };
        store.add_reverse_zone(zone.clone());
        let address: std::net::IpAddr = "192.0.2.5".parse().unwrap();
        store.add_reverse_record(&zone.root_name(), address, 300, RecordData::Ptr(Name::parse("host.example.com.")));

        let ksk = test_ksk();
        let ctx = AssemblyContext {
            primary_nameserver: &Name::parse("ns1.example.com."),
            admin_mailbox: &Name::parse("admin.example.com."),
            auto_nameservers: &[],
            ksk: &ksk,
            zsk: None,
        };

        let qname = Name::parse("5.2.0.192.in-addr.arpa.");
        let result = assemble_reverse(&store, zone, address, DNSResourceType::PTR, &qname, false, &ctx).unwrap();

        assert_eq!(result.answers.len(), 1);
        assert_eq!(result.answers[0].rdata, RData::Ptr(Name::parse("host.example.com.")));
        assert!(!result.nxdomain);
    }

    #[test]
    fn reverse_ptr_falls_back_to_auto_reverse_then_nxdomain() {
        let store = MemoryStore::new();
        let zone = ReverseZone {
            network: "192.0.2.0".parse().unwrap(),
            prefix: 24,
            last_modified: 0,
            zsk_pem: None,
        };
        store.add_reverse_zone(zone.clone());

        let ksk = test_ksk();
        let ctx = AssemblyContext {
            primary_nameserver: &Name::parse("ns1.example.com."),
            admin_mailbox: &Name::parse("admin.example.com."),
            auto_nameservers: &[],
            ksk: &ksk,
            zsk: None,
        };

        let address: std::net::IpAddr = "192.0.2.9".parse().unwrap();
        let qname = Name::parse("9.2.0.192.in-addr.arpa.");
        let result = assemble_reverse(&store, zone, address, DNSResourceType::PTR, &qname, false, &ctx).unwrap();

        assert!(result.answers.is_empty());
        assert!(result.nxdomain);
    }
}
