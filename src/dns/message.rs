//! Top-level DNS message: header + four sections (§4.1, §6).

use bitstream_io::{BitReader, BitWriter};

use super::common::PacketComponent;
use super::enums::DNSResourceType;
use super::error::ParseError;
use super::header::DNSHeader;
use super::name::NameCompressor;
use super::question::DNSQuestion;
use super::record::{decode_record, Record};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Message {
    pub header: DNSHeader,
    pub questions: Vec<DNSQuestion>,
    pub answers: Vec<Record>,
    pub authorities: Vec<Record>,
    pub additionals: Vec<Record>,
}

impl Message {
    /// Parse a full wire message. Only the header, question section, and the
    /// additional section (to find EDNS0 OPT) are meaningfully interpreted;
    /// unexpected extra records are decoded generically and kept as-is.
    pub fn decode(buf: &[u8]) -> Result<Message, ParseError> {
        let mut header = DNSHeader::default();
        {
            let mut reader = BitReader::endian(buf, bitstream_io::BigEndian);
            header.read(&mut reader)?;
        }
        let mut pos = 12usize; // fixed 12-byte header

        let mut questions = Vec::with_capacity(header.qdcount as usize);
        for _ in 0..header.qdcount {
            let (q, next) = DNSQuestion::decode(buf, pos)?;
            questions.push(q);
            pos = next;
        }

        let mut answers = Vec::with_capacity(header.ancount as usize);
        for _ in 0..header.ancount {
            let (rec, next) = decode_record(buf, pos)?;
            answers.push(rec);
            pos = next;
        }

        let mut authorities = Vec::with_capacity(header.nscount as usize);
        for _ in 0..header.nscount {
            let (rec, next) = decode_record(buf, pos)?;
            authorities.push(rec);
            pos = next;
        }

        let mut additionals = Vec::with_capacity(header.arcount as usize);
        for _ in 0..header.arcount {
            let (rec, next) = decode_record(buf, pos)?;
            additionals.push(rec);
            pos = next;
        }

        Ok(Message {
            header,
            questions,
            answers,
            authorities,
            additionals,
        })
    }

    /// Encode as an ordinary (compressed) wire message.
    pub fn encode(&self) -> Result<Vec<u8>, ParseError> {
        let mut header = self.header.clone();
        header.qdcount = self.questions.len() as u16;
        header.ancount = self.answers.len() as u16;
        header.nscount = self.authorities.len() as u16;
        header.arcount = self.additionals.len() as u16;

        let mut out = Vec::new();
        {
            let mut writer = BitWriter::endian(&mut out, bitstream_io::BigEndian);
            header.write(&mut writer)?;
        }

        let mut compressor = NameCompressor::new();
        for q in &self.questions {
            q.encode(&mut out, &mut compressor);
        }
        for r in &self.answers {
            r.encode(&mut out, &mut compressor);
        }
        for r in &self.authorities {
            r.encode(&mut out, &mut compressor);
        }
        for r in &self.additionals {
            r.encode(&mut out, &mut compressor);
        }
        Ok(out)
    }

    /// Find the EDNS0 OPT pseudo-record in the additional section, if present,
    /// and report whether the DO (DNSSEC OK) bit is set (§6).
    pub fn edns_dnssec_ok(&self) -> bool {
        self.additionals
            .iter()
            .find(|r| r.rtype() == DNSResourceType::OPT)
            .map(|r| matches!(&r.rdata, super::record::RData::Opt { dnssec_ok, .. } if *dnssec_ok))
            .unwrap_or(false)
    }

    pub fn edns_udp_payload_size(&self) -> Option<u16> {
        self.additionals
            .iter()
            .find(|r| r.rtype() == DNSResourceType::OPT)
            .and_then(|r| match &r.rdata {
                super::record::RData::Opt {
                    udp_payload_size, ..
                } => Some(*udp_payload_size),
                _ => None,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::super::enums::{DNSResourceClass, DNSResourceType};
    use super::super::name::Name;
    use super::super::record::RData;
    use super::*;

    #[test]
    fn query_message_roundtrips() {
        let msg = Message {
            header: DNSHeader {
                id: 42,
                rd: true,
                qdcount: 1,
                arcount: 1,
                ..Default::default()
            },
            questions: vec![DNSQuestion {
                qname: Name::parse("example.com."),
                qtype: DNSResourceType::A,
                qclass: DNSResourceClass::IN,
            }],
            answers: Vec::new(),
            authorities: Vec::new(),
            additionals: vec![Record::new(
                Name::root(),
                0,
                RData::Opt {
                    udp_payload_size: 4096,
                    extended_rcode: 0,
                    version: 0,
                    dnssec_ok: true,
                },
            )],
        };

        let bytes = msg.encode().unwrap();
        let decoded = Message::decode(&bytes).unwrap();
        assert_eq!(decoded.header.id, 42);
        assert_eq!(decoded.questions.len(), 1);
        assert!(decoded.edns_dnssec_ok());
        assert_eq!(decoded.edns_udp_payload_size(), Some(4096));
    }

    #[test]
    fn response_with_answer_roundtrips() {
        let mut msg = Message {
            header: DNSHeader {
                id: 7,
                qr: true,
                aa: true,
                qdcount: 1,
                ..Default::default()
            },
            questions: vec![DNSQuestion {
                qname: Name::parse("www.example.com."),
                qtype: DNSResourceType::A,
                qclass: DNSResourceClass::IN,
            }],
            answers: vec![Record::new(
                Name::parse("www.example.com."),
                300,
                RData::A(std::net::Ipv4Addr::new(203, 0, 113, 1)),
            )],
            authorities: Vec::new(),
            additionals: Vec::new(),
        };
        msg.header.ancount = 1;

        let bytes = msg.encode().unwrap();
        let decoded = Message::decode(&bytes).unwrap();
        assert_eq!(decoded.answers.len(), 1);
        assert_eq!(
            decoded.answers[0].rdata,
            RData::A(std::net::Ipv4Addr::new(203, 0, 113, 1))
        );
    }
}
