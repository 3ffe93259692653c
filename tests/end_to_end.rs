//! End-to-end scenarios against `Engine::query`, each built from wire-format
//! request bytes and asserted against wire-format response bytes, mirroring
//! the six scenarios an authoritative DNSSEC-signing resolver must get right.

use std::net::Ipv4Addr;
use std::sync::Arc;

use mimir::config::Config;
use mimir::dns::enums::{DNSResourceClass, DNSResourceType};
use mimir::dns::record::RData;
use mimir::dns::{DNSHeader, DNSQuestion, Message, Name, Record};
use mimir::store::{ForwardZone, MemoryStore, RecordData, RecordStore, ReverseZone};
use mimir::Engine;

fn test_config() -> Config {
    Config {
        dnssec_key_path: "tests/fixtures/test_ksk.pem".to_string(),
        primary_nameserver: "ns1.as207960.net.".to_string(),
        admin_mailbox: "noc.as207960.net.".to_string(),
        auto_nameservers: Vec::new(),
        nxdomain_synthesizes_noerror: true,
    }
}

fn build_query(qname: &str, qtype: DNSResourceType, dnssec_ok: bool) -> Vec<u8> {
    let mut additionals = Vec::new();
    if dnssec_ok {
        additionals.push(Record::new(
            Name::root(),
            0,
            RData::Opt {
                udp_payload_size: 4096,
                extended_rcode: 0,
                version: 0,
                dnssec_ok: true,
            },
        ));
    }
    let msg = Message {
        header: DNSHeader {
            id: 1,
            rd: true,
            qdcount: 1,
            arcount: additionals.len() as u16,
            ..Default::default()
        },
        questions: vec![DNSQuestion {
            qname: Name::parse(qname),
            qtype,
            qclass: DNSResourceClass::IN,
        }],
        answers: Vec::new(),
        authorities: Vec::new(),
        additionals,
    };
    msg.encode().unwrap()
}

fn has_rrsig_covering(records: &[Record], covered: DNSResourceType) -> bool {
    records
        .iter()
        .any(|r| matches!(&r.rdata, RData::Rrsig { type_covered, .. } if *type_covered == covered))
}

#[test]
fn soa_at_apex() {
    let store = MemoryStore::new();
    let root = Name::parse("example.com.");
    store.add_forward_zone(ForwardZone {
        root: root.clone(),
        last_modified: 1_700_000_000,
        zsk_pem: None,
    });

    let engine = Engine::new(Arc::new(store) as Arc<dyn RecordStore>, &test_config()).unwrap();
    let reply = engine.query(&build_query("example.com.", DNSResourceType::SOA, false));
    let decoded = Message::decode(&reply).unwrap();

    assert_eq!(decoded.header.rcode, 0);
    assert_eq!(decoded.answers.len(), 1);
    match &decoded.answers[0].rdata {
        RData::Soa {
            mname,
            rname,
            serial,
            refresh,
            retry,
            expire,
            minimum,
        } => {
            assert_eq!(mname.to_text(), "ns1.as207960.net.");
            assert_eq!(rname.to_text(), "noc.as207960.net.");
            assert_eq!(*serial, 1_700_000_000);
            assert_eq!(*refresh, 86400);
            assert_eq!(*retry, 7200);
            assert_eq!(*expire, 3_600_000);
            assert_eq!(*minimum, 172_800);
        }
        other => panic!("expected SOA, got {other:?}"),
    }
    assert_eq!(decoded.answers[0].ttl, 86400);
}

#[test]
fn simple_a_with_rrsig() {
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

    let engine = Engine::new(Arc::new(store) as Arc<dyn RecordStore>, &test_config()).unwrap();
    let reply = engine.query(&build_query("www.example.com.", DNSResourceType::A, true));
    let decoded = Message::decode(&reply).unwrap();

    assert_eq!(decoded.header.rcode, 0);
    assert_eq!(decoded.answers.len(), 2);
    assert_eq!(decoded.answers[0].rdata, RData::A(Ipv4Addr::new(192, 0, 2, 1)));
    assert_eq!(decoded.answers[0].ttl, 300);
    assert!(has_rrsig_covering(&decoded.answers, DNSResourceType::A));
}

#[test]
fn nodata_with_proof() {
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

    let engine = Engine::new(Arc::new(store) as Arc<dyn RecordStore>, &test_config()).unwrap();
    let reply = engine.query(&build_query("www.example.com.", DNSResourceType::AAAA, true));
    let decoded = Message::decode(&reply).unwrap();

    assert_eq!(decoded.header.rcode, 0);
    assert!(decoded.answers.is_empty());

    let nsec = decoded
        .authorities
        .iter()
        .find(|r| r.rtype() == DNSResourceType::NSEC)
        .expect("NSEC in authority");
    match &nsec.rdata {
        RData::Nsec { types, .. } => {
            assert!(types.contains(&u16::from(DNSResourceType::A)));
            assert!(!types.contains(&u16::from(DNSResourceType::AAAA)));
        }
        other => panic!("expected NSEC, got {other:?}"),
    }

    assert!(decoded.authorities.iter().any(|r| r.rtype() == DNSResourceType::SOA));
    assert!(has_rrsig_covering(&decoded.authorities, DNSResourceType::NSEC));
    assert!(has_rrsig_covering(&decoded.authorities, DNSResourceType::SOA));
}

#[test]
fn cname_chase_same_zone() {
    let store = MemoryStore::new();
    let root = Name::parse("example.com.");
    store.add_forward_zone(ForwardZone {
        root: root.clone(),
        last_modified: 1_700_000_000,
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

    let engine = Engine::new(Arc::new(store) as Arc<dyn RecordStore>, &test_config()).unwrap();
    let reply = engine.query(&build_query("alias.example.com.", DNSResourceType::A, true));
    let decoded = Message::decode(&reply).unwrap();

    assert_eq!(decoded.header.rcode, 0);
    assert!(decoded.answers.iter().any(|r| matches!(&r.rdata, RData::Cname(target) if target.to_text() == "www.example.com.")));
    assert!(decoded.answers.iter().any(|r| r.rdata == RData::A(Ipv4Addr::new(192, 0, 2, 1))));
    assert!(has_rrsig_covering(&decoded.answers, DNSResourceType::CNAME));
    assert!(has_rrsig_covering(&decoded.answers, DNSResourceType::A));
}

#[test]
fn delegation_with_ds_absent_nsec() {
    let store = MemoryStore::new();
    let root = Name::parse("example.com.");
    store.add_forward_zone(ForwardZone {
        root: root.clone(),
        last_modified: 1_700_000_000,
        zsk_pem: None,
    });
    store.add_record(&root, Name::parse("sub"), 86400, RecordData::Ns(Name::parse("ns.elsewhere.net.")));

    let engine = Engine::new(Arc::new(store) as Arc<dyn RecordStore>, &test_config()).unwrap();
    let reply = engine.query(&build_query("host.sub.example.com.", DNSResourceType::A, true));
    let decoded = Message::decode(&reply).unwrap();

    assert_eq!(decoded.header.rcode, 0);
    assert!(decoded.answers.is_empty());

    let ns = decoded
        .authorities
        .iter()
        .find(|r| r.rtype() == DNSResourceType::NS)
        .expect("NS in authority");
    assert_eq!(ns.name.to_text(), "sub.example.com.");
    assert!(!has_rrsig_covering(&decoded.authorities, DNSResourceType::NS));

    assert!(decoded.authorities.iter().any(|r| r.rtype() == DNSResourceType::NSEC));
    assert!(has_rrsig_covering(&decoded.authorities, DNSResourceType::NSEC));
}

#[test]
fn reverse_ptr_synthesised_from_auto_reverse() {
    let store = MemoryStore::new();
    let reverse_zone = ReverseZone {
        network: "192.0.2.0".parse().unwrap(),
        prefix: 24,
        last_modified: 1_700_000_000,
        zsk_pem: None,
    };
    store.add_reverse_zone(reverse_zone.clone());

    let forward_root = Name::parse("example.com.");
    store.add_forward_zone(ForwardZone {
        root: forward_root.clone(),
        last_modified: 1_700_000_000,
        zsk_pem: None,
    });
    store.add_record(
        &forward_root,
        Name::parse("host"),
        300,
        RecordData::A {
            address: Ipv4Addr::new(192, 0, 2, 5),
            auto_reverse: true,
        },
    );

    let engine = Engine::new(Arc::new(store) as Arc<dyn RecordStore>, &test_config()).unwrap();
    let reply = engine.query(&build_query("5.2.0.192.in-addr.arpa.", DNSResourceType::PTR, true));
    let decoded = Message::decode(&reply).unwrap();

    assert_eq!(decoded.header.rcode, 0);
    assert_eq!(decoded.answers.len(), 2);
    assert!(decoded.answers.iter().any(|r| matches!(&r.rdata, RData::Ptr(target) if target.to_text() == "host.example.com.")));
    assert!(has_rrsig_covering(&decoded.answers, DNSResourceType::PTR));
}
