//! Top-level dispatch (§4.7, §7): `Engine::query` is the single entry point
//! an RPC front-end calls. Decode, locate, dispatch, synthesize denial proof,
//! sign, encode — one `Result`-returning pipeline with RCODE mapping at the
//! boundary.

mod assembler;

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use crate::config::Config;
use crate::dns::enums::{DnsOpcode, ResponseCode};
use crate::dns::error::ParseError;
use crate::dns::header::DNSHeader;
use crate::dns::message::Message;
use crate::dns::Name;
use crate::dnssec::{sign_section, synthesize_nsec, DenialKind, SigningContext, SigningKey};
use crate::error::EngineError;
use crate::store::RecordStore;
use crate::zone::{self, Located};

use assembler::{assemble_forward, assemble_reverse, soa_record, AssemblyContext};

struct ResponseParts {
    rcode: ResponseCode,
    aa: bool,
    answers: Vec<crate::dns::Record>,
    authorities: Vec<crate::dns::Record>,
    additionals: Vec<crate::dns::Record>,
}

/// The query/answer engine (§1): request-scoped, stateless between calls
/// except for the process-lifetime KSK (§5, §6).
pub struct Engine {
    store: Arc<dyn RecordStore>,
    ksk: SigningKey,
    primary_nameserver: Name,
    admin_mailbox: Name,
    auto_nameservers: Vec<Name>,
    nxdomain_synthesizes_noerror: bool,
}

impl Engine {
    /// Load the KSK once at startup (§5, §6); failure here is a startup
    /// failure, not a per-request one.
    pub fn new(store: Arc<dyn RecordStore>, config: &Config) -> Result<Engine, EngineError> {
        let pem = std::fs::read(&config.dnssec_key_path).map_err(|source| EngineError::KeyLoad {
            path: config.dnssec_key_path.clone(),
            source,
        })?;
        let ksk = SigningKey::from_pkcs8_pem(&pem)?;

        Ok(Engine {
            store,
            ksk,
            primary_nameserver: Name::parse(&config.primary_nameserver),
            admin_mailbox: Name::parse(&config.admin_mailbox),
            auto_nameservers: config.auto_nameservers.iter().map(|s| Name::parse(s)).collect(),
            nxdomain_synthesizes_noerror: config.nxdomain_synthesizes_noerror,
        })
    }

    /// `Query(bytes) -> bytes` (§6): the engine's entire external surface.
    /// Never panics and never returns an empty reply; unrecoverable failures
    /// degrade to a minimal header-only SERVFAIL (§4.8).
    pub fn query(&self, bytes: &[u8]) -> Vec<u8> {
        let id = if bytes.len() >= 2 {
            u16::from_be_bytes([bytes[0], bytes[1]])
        } else {
            0
        };

        match self.try_query(bytes) {
            Ok(msg) => msg.encode().unwrap_or_else(|_| raw_header_bytes(id, ResponseCode::ServerFailure)),
            Err(e) => {
                warn!(error = %e, rcode = ?e.rcode(), "request handling failed");
                raw_header_bytes(id, e.rcode())
            }
        }
    }

    fn try_query(&self, bytes: &[u8]) -> Result<Message, EngineError> {
        let req = Message::decode(bytes)?;

        if DnsOpcode::from_u8(req.header.opcode).map(|op| op.is_implemented()) != Some(true) {
            return Err(EngineError::UnsupportedOpcode(req.header.opcode));
        }

        let question = req
            .questions
            .first()
            .cloned()
            .ok_or(EngineError::Malformed(ParseError::InvalidQuestionSection))?;

        let is_dnssec = req.edns_dnssec_ok();
        debug!(
            qname = %question.qname.to_text(),
            qtype = ?question.qtype,
            dnssec_ok = is_dnssec,
            "handling query"
        );

        let parts = self.handle(&question.qname, question.qtype, is_dnssec)?;

        Ok(Message {
            header: DNSHeader {
                id: req.header.id,
                qr: true,
                opcode: req.header.opcode,
                aa: parts.aa,
                rd: req.header.rd,
                rcode: parts.rcode.to_u8(),
                ..Default::default()
            },
            questions: vec![question],
            answers: parts.answers,
            authorities: parts.authorities,
            additionals: parts.additionals,
        })
    }

    /// PARSE is done by the caller; this is LOCATE through SIGN of the §4.7
    /// state machine.
    fn handle(&self, qname: &Name, qtype: crate::dns::enums::DNSResourceType, is_dnssec: bool) -> Result<ResponseParts, EngineError> {
        let Some(located) = zone::locate(self.store.as_ref(), qname) else {
            return Ok(ResponseParts {
                rcode: ResponseCode::NameError,
                aa: false,
                answers: Vec::new(),
                authorities: Vec::new(),
                additionals: Vec::new(),
            });
        };

        let now = Utc::now().timestamp();

        let (mut sections, zone_root, last_modified, zsk) = match located {
            Located::Forward { zone, relative_owner } => {
                let zsk = self.load_zsk(zone.zsk_pem.as_deref());
                let zone_root = zone.root.clone();
                let last_modified = zone.last_modified;
                let ctx = AssemblyContext {
                    primary_nameserver: &self.primary_nameserver,
                    admin_mailbox: &self.admin_mailbox,
                    auto_nameservers: &self.auto_nameservers,
                    ksk: &self.ksk,
                    zsk: zsk.as_ref(),
                };
                let sections = assemble_forward(self.store.as_ref(), zone, relative_owner, qtype, qname, is_dnssec, &ctx)?;
                (sections, zone_root, last_modified, zsk)
            }
            Located::Reverse { zone, address } => {
                let zsk = self.load_zsk(zone.zsk_pem.as_deref());
                let zone_root = zone.root_name();
                let last_modified = zone.last_modified;
                let ctx = AssemblyContext {
                    primary_nameserver: &self.primary_nameserver,
                    admin_mailbox: &self.admin_mailbox,
                    auto_nameservers: &self.auto_nameservers,
                    ksk: &self.ksk,
                    zsk: zsk.as_ref(),
                };
                let sections = assemble_reverse(self.store.as_ref(), zone, address, qtype, qname, is_dnssec, &ctx)?;
                (sections, zone_root, last_modified, zsk)
            }
        };

        let mut rcode = if sections.nxdomain {
            ResponseCode::NameError
        } else {
            ResponseCode::NoError
        };

        // §4.6/§11: SOA is always appended on an empty reply; NSEC only when
        // DNSSEC was requested. Both get signed below, not separately.
        if sections.answers.is_empty() && sections.authorities.is_empty() {
            if is_dnssec {
                let kind = if rcode == ResponseCode::NameError {
                    DenialKind::NxDomain
                } else {
                    DenialKind::NoData
                };
                sections.authorities.push(synthesize_nsec(qname, kind));
                if rcode == ResponseCode::NameError && self.nxdomain_synthesizes_noerror {
                    rcode = ResponseCode::NoError; // §9 open question, source behaviour
                }
            }
            let ctx = AssemblyContext {
                primary_nameserver: &self.primary_nameserver,
                admin_mailbox: &self.admin_mailbox,
                auto_nameservers: &self.auto_nameservers,
                ksk: &self.ksk,
                zsk: zsk.as_ref(),
            };
            sections.authorities.push(soa_record(&zone_root, last_modified, &ctx));
        }

        if is_dnssec {
            let ctx = SigningContext {
                ksk: Some(&self.ksk),
                zsk: zsk.as_ref(),
            };
            let answer_sigs = sign_section(&sections.answers, &zone_root, now, &ctx, true)?;
            sections.answers.extend(answer_sigs);
            let authority_sigs = sign_section(&sections.authorities, &zone_root, now, &ctx, false)?;
            sections.authorities.extend(authority_sigs);
            let additional_sigs = sign_section(&sections.additionals, &zone_root, now, &ctx, false)?;
            sections.additionals.extend(additional_sigs);
        }

        Ok(ResponseParts {
            rcode,
            aa: true,
            answers: sections.answers,
            authorities: sections.authorities,
            additionals: sections.additionals,
        })
    }

    fn load_zsk(&self, pem: Option<&[u8]>) -> Option<SigningKey> {
        let pem = pem?;
        match SigningKey::from_pkcs8_pem(pem) {
            Ok(key) => Some(key),
            Err(e) => {
                warn!(error = %e, "zone signing key failed to load, falling back to the KSK");
                None
            }
        }
    }
}

/// A minimal 12-byte header-only reply (§4.7: "FORMERR short-circuits to
/// ENCODE with only the header filled"), used for every degenerate case that
/// never reaches a real `Message`.
fn raw_header_bytes(id: u16, rcode: ResponseCode) -> Vec<u8> {
    let mut out = vec![0u8; 12];
    out[0..2].copy_from_slice(&id.to_be_bytes());
    out[2] = 0x80; // QR=1
    out[3] = rcode.to_u8() & 0x0F;
    out
}
