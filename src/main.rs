//! Thin demo binary (§10.5): not a production server — the RPC transport is
//! explicitly out of scope (§1) — but enough to prove the full pipeline end
//! to end. Loads a `Config`, builds a `MemoryStore` with one example zone,
//! constructs an `Engine`, and issues a representative in-process query.

use std::net::Ipv4Addr;
use std::sync::Arc;

use clap::Parser;
use mimir::config::Config;
use mimir::dns::enums::{DNSResourceClass, DNSResourceType};
use mimir::dns::{DNSHeader, DNSQuestion, Message, Name};
use mimir::engine::Engine;
use mimir::store::{ForwardZone, MemoryStore, RecordData, RecordStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(about = "Authoritative DNS resolver with on-the-fly DNSSEC signing")]
struct Args {
    /// Path to a TOML config file; falls back to built-in defaults if absent.
    #[arg(long, default_value = "mimir.toml")]
    config: String,
}

fn example_store() -> Arc<dyn RecordStore> {
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
    store.add_record(
        &root,
        Name::root(),
        3600,
        RecordData::Mx {
            preference: 10,
            exchange: Name::parse("mail.example.com."),
        },
    );
    Arc::new(store)
}

fn demo_query() -> Vec<u8> {
    let msg = Message {
        header: DNSHeader {
            id: 1,
            rd: true,
            qdcount: 1,
            ..Default::default()
        },
        questions: vec![DNSQuestion {
            qname: Name::parse("www.example.com."),
            qtype: DNSResourceType::A,
            qclass: DNSResourceClass::IN,
        }],
        answers: Vec::new(),
        authorities: Vec::new(),
        additionals: Vec::new(),
    };
    msg.encode().expect("a freshly built query message always encodes")
}

fn main() {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args = Args::parse();
    let config = Config::load(&args.config).unwrap_or_else(|e| {
        info!(error = %e, path = %args.config, "no usable config file, using defaults");
        Config::default()
    });

    let store = example_store();
    let engine = match Engine::new(store, &config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("failed to start: {e}");
            std::process::exit(1);
        }
    };

    let request = demo_query();
    let response = engine.query(&request);
    let decoded = Message::decode(&response).expect("engine always returns a well-formed message");

    info!(
        rcode = decoded.header.rcode,
        answers = decoded.answers.len(),
        "demo query complete"
    );
    for rr in &decoded.answers {
        println!("{} {} {:?}", rr.name.to_text(), rr.ttl, rr.rdata);
    }
}
