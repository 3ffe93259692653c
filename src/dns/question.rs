use super::enums::{DNSResourceClass, DNSResourceType};
use super::error::ParseError;
use super::name::{Name, NameCompressor};

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DNSQuestion {
    pub qname: Name,
    pub qtype: DNSResourceType,
    pub qclass: DNSResourceClass,
}

impl DNSQuestion {
    pub fn encode(&self, out: &mut Vec<u8>, compressor: &mut NameCompressor) {
        self.qname.encode_compressed(out, compressor);
        out.extend(u16::from(self.qtype).to_be_bytes());
        out.extend(u16::from(self.qclass).to_be_bytes());
    }

    pub fn decode(buf: &[u8], start: usize) -> Result<(DNSQuestion, usize), ParseError> {
        let (qname, mut pos) = Name::decode(buf, start)?;
        let qtype = read_u16(buf, &mut pos)?.into();
        let qclass = read_u16(buf, &mut pos)?.into();
        Ok((
            DNSQuestion {
                qname,
                qtype,
                qclass,
            },
            pos,
        ))
    }
}

pub(super) fn read_u16(buf: &[u8], pos: &mut usize) -> Result<u16, ParseError> {
    let bytes = buf
        .get(*pos..*pos + 2)
        .ok_or(ParseError::UnexpectedEof)?;
    *pos += 2;
    Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
}

pub(super) fn read_u32(buf: &[u8], pos: &mut usize) -> Result<u32, ParseError> {
    let bytes = buf
        .get(*pos..*pos + 4)
        .ok_or(ParseError::UnexpectedEof)?;
    *pos += 4;
    Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

pub(super) fn read_u8(buf: &[u8], pos: &mut usize) -> Result<u8, ParseError> {
    let b = *buf.get(*pos).ok_or(ParseError::UnexpectedEof)?;
    *pos += 1;
    Ok(b)
}

pub(super) fn read_bytes<'a>(
    buf: &'a [u8],
    pos: &mut usize,
    len: usize,
) -> Result<&'a [u8], ParseError> {
    let slice = buf
        .get(*pos..*pos + len)
        .ok_or(ParseError::UnexpectedEof)?;
    *pos += len;
    Ok(slice)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_roundtrips() {
        let q = DNSQuestion {
            qname: Name::parse("www.example.com."),
            qtype: DNSResourceType::A,
            qclass: DNSResourceClass::IN,
        };
        let mut out = Vec::new();
        let mut compressor = NameCompressor::new();
        q.encode(&mut out, &mut compressor);

        let (decoded, pos) = DNSQuestion::decode(&out, 0).unwrap();
        assert_eq!(decoded, q);
        assert_eq!(pos, out.len());
    }
}
