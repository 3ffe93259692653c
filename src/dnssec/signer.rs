//! On-the-fly DNSSEC signer (§4.7): RRSIG construction over canonically
//! sorted RRsets, ECDSA P-256/SHA-256 signing, and DNSKEY/CDS/CDNSKEY
//! emission.

use std::io::Cursor;

use ring::rand::SystemRandom;
use ring::signature::{EcdsaKeyPair, KeyPair, ECDSA_P256_SHA256_FIXED_SIGNING};
use rustls_pemfile::private_key;
use rustls_pki_types::PrivateKeyDer;
use tracing::warn;

use super::key_tag::calculate_key_tag;
use crate::dns::enums::DNSResourceType;
use crate::dns::record::{RData, Record};
use crate::dns::Name;
use crate::error::EngineError;

/// A loaded ECDSA P-256 signing key plus its DNSKEY-ready public key bytes.
pub struct SigningKey {
    key_pair: EcdsaKeyPair,
    /// Raw X‖Y, 64 bytes — the DNSKEY public-key field (§4.5).
    public_key: [u8; 64],
}

impl SigningKey {
    /// Parse a PKCS#8 PEM-encoded EC private key (§6's `dnssec_key_path`
    /// contract: "must be an EC private key, otherwise startup fails").
    pub fn from_pkcs8_pem(pem: &[u8]) -> Result<SigningKey, EngineError> {
        let mut reader = Cursor::new(pem);
        let parsed = private_key(&mut reader)
            .map_err(|e| EngineError::Internal(format!("PEM parse error: {e}")))?
            .ok_or(EngineError::NonEcSigningKey)?;

        let PrivateKeyDer::Pkcs8(pkcs8) = parsed else {
            return Err(EngineError::NonEcSigningKey);
        };

        let rng = SystemRandom::new();
        let key_pair =
            EcdsaKeyPair::from_pkcs8(&ECDSA_P256_SHA256_FIXED_SIGNING, pkcs8.secret_pkcs8_der(), &rng)
                .map_err(|_| EngineError::NonEcSigningKey)?;

        let raw_point = key_pair.public_key().as_ref();
        if raw_point.len() != 65 || raw_point[0] != 0x04 {
            return Err(EngineError::NonEcSigningKey);
        }
        let mut public_key = [0u8; 64];
        public_key.copy_from_slice(&raw_point[1..]);

        Ok(SigningKey { key_pair, public_key })
    }

    pub fn public_key(&self) -> &[u8; 64] {
        &self.public_key
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, EngineError> {
        let rng = SystemRandom::new();
        let signature = self
            .key_pair
            .sign(&rng, message)
            .map_err(|_| EngineError::Internal("ECDSA signing failed".to_string()))?;
        Ok(signature.as_ref().to_vec())
    }
}

/// The signing keys available for one request (§9's `SigningContext`):
/// decided once per request rather than rediscovered inside the signer.
pub struct SigningContext<'a> {
    pub ksk: Option<&'a SigningKey>,
    pub zsk: Option<&'a SigningKey>,
}

impl<'a> SigningContext<'a> {
    /// Which key signs a given RRset (§4.7 step 3): ZSK if present,
    /// otherwise the engine-wide KSK — except DNSKEY RRsets at the apex,
    /// which are always signed by the KSK. Returns the key alongside the
    /// DNSKEY flags value that key was published under (256 for a ZSK, 257
    /// for a KSK), since the key-tag computation (§4.7 step 4) must match
    /// whichever key actually signs.
    fn key_for(&self, rtype: DNSResourceType) -> Option<(u16, &'a SigningKey)> {
        if rtype == DNSResourceType::DNSKEY {
            return self.ksk.map(|k| (257, k)).or_else(|| self.zsk.map(|k| (256, k)));
        }
        self.zsk.map(|k| (256, k)).or_else(|| self.ksk.map(|k| (257, k)))
    }
}

pub fn dnskey_rdata(flags: u16, public_key: [u8; 64]) -> RData {
    RData::Dnskey {
        flags,
        protocol: 3,
        algorithm: 13,
        public_key: public_key.to_vec(),
    }
}

pub fn cdnskey_rdata(flags: u16, public_key: [u8; 64]) -> RData {
    RData::Cdnskey {
        flags,
        protocol: 3,
        algorithm: 13,
        public_key: public_key.to_vec(),
    }
}

/// CDS over the KSK (§4.5): digest = SHA-256(canonical-owner ‖ DNSKEY-RDATA).
pub fn cds_rdata(zone_root: &Name, ksk: &SigningKey) -> RData {
    let key_tag = calculate_key_tag(257, 3, 13, ksk.public_key());
    let mut buf = Vec::new();
    zone_root.encode_canonical(&mut buf);
    dnskey_rdata(257, *ksk.public_key()).encode(&mut buf);
    let digest = ring::digest::digest(&ring::digest::SHA256, &buf);
    RData::Cds {
        key_tag,
        algorithm: 13,
        digest_type: 2,
        digest: digest.as_ref().to_vec(),
    }
}

/// Sign every distinct (owner, type) RRset in one section (§4.7). `sign_ns`
/// controls whether NS RRsets are signed — only true for the answer section
/// (apex NS); delegation NS in authority is left unsigned.
pub fn sign_section(
    records: &[Record],
    zone_root: &Name,
    now: i64,
    ctx: &SigningContext,
    sign_ns: bool,
) -> Result<Vec<Record>, EngineError> {
    // Group by (owner, type) preserving first-seen order (§5: RRs appear in
    // the order the assembler produced them).
    let mut rrsets: Vec<(Name, DNSResourceType, Vec<Record>)> = Vec::new();
    for rec in records {
        let rtype = rec.rtype();
        match rrsets
            .iter_mut()
            .find(|(owner, t, _)| *owner == rec.name && *t == rtype)
        {
            Some((_, _, bucket)) => bucket.push(rec.clone()),
            None => rrsets.push((rec.name.clone(), rtype, vec![rec.clone()])),
        }
    }

    let mut out = Vec::new();
    for (owner, rtype, rrset) in rrsets {
        if rtype == DNSResourceType::NS && !sign_ns {
            continue;
        }
        let Some((flags, key)) = ctx.key_for(rtype) else {
            continue; // no signing key available: skip silently (§4.7)
        };

        out.push(sign_rrset(&owner, rtype, &rrset, zone_root, now, flags, key)?);
    }
    Ok(out)
}

fn sign_rrset(
    owner: &Name,
    rtype: DNSResourceType,
    rrset: &[Record],
    zone_root: &Name,
    now: i64,
    flags: u16,
    key: &SigningKey,
) -> Result<Record, EngineError> {
    let key_tag = calculate_key_tag(flags, 3, 13, key.public_key());
    let inception = (now - 300) as u32;
    let expiration = inception + 87000;
    let labels = owner.label_count() as u8;

    let mut rrsig = RData::Rrsig {
        type_covered: rtype,
        algorithm: 13,
        labels,
        original_ttl: 86400,
        expiration,
        inception,
        key_tag,
        signer_name: zone_root.clone(),
        signature: Vec::new(),
    };

    let mut to_sign = Vec::new();
    rrsig.encode(&mut to_sign);

    let mut encoded_rrs: Vec<Vec<u8>> = rrset
        .iter()
        .map(|rr| {
            let mut buf = Vec::new();
            rr.encode_canonical(&mut buf);
            buf
        })
        .collect();
    // Stable sort by canonical bytes; ties keep insertion order (§4.7 step 5).
    encoded_rrs.sort();
    for rr in encoded_rrs {
        to_sign.extend(rr);
    }

    let signature = key.sign(&to_sign)?;
    if let RData::Rrsig { signature: sig, .. } = &mut rrsig {
        *sig = signature;
    }

    Ok(Record::new(owner.clone(), 86400, rrsig))
}

pub fn warn_no_signing_key(zone_root: &Name) {
    warn!(zone = %zone_root.to_text(), "no signing key available, returning unsigned reply");
}
