//! Domain name arithmetic: case folding, suffix matching, wire (de)compression,
//! and reverse-DNS name <-> IP/network conversion (§4.2).

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use super::error::ParseError;

/// A domain name, stored as lower-cased labels with no trailing root label
/// and no embedded dots. Case folding happens once, here, so every other
/// component can compare and hash names directly.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Name {
    labels: Vec<String>,
}

impl Name {
    pub fn root() -> Self {
        Name { labels: Vec::new() }
    }

    pub fn from_labels<I: IntoIterator<Item = String>>(labels: I) -> Self {
        Name {
            labels: labels.into_iter().map(|l| l.to_ascii_lowercase()).collect(),
        }
    }

    /// Parse a presentation-format name (`www.example.com` or `www.example.com.`).
    /// Case-insensitive per §4.2; labels are normalised to lower-case immediately.
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim_end_matches('.');
        if trimmed.is_empty() {
            return Name::root();
        }
        Name {
            labels: trimmed.split('.').map(|l| l.to_ascii_lowercase()).collect(),
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    pub fn is_root(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn to_text(&self) -> String {
        if self.labels.is_empty() {
            ".".to_string()
        } else {
            format!("{}.", self.labels.join("."))
        }
    }

    /// True if `self` equals `suffix` or is a sub-name of it.
    pub fn has_suffix(&self, suffix: &Name) -> bool {
        if suffix.labels.len() > self.labels.len() {
            return false;
        }
        let offset = self.labels.len() - suffix.labels.len();
        self.labels[offset..] == suffix.labels[..]
    }

    /// Strip `suffix` off the end of `self`. Returns the relative owner name
    /// (empty `Name` at the zone apex — callers render that as `@`).
    pub fn strip_suffix(&self, suffix: &Name) -> Option<Name> {
        if !self.has_suffix(suffix) {
            return None;
        }
        let keep = self.labels.len() - suffix.labels.len();
        Some(Name {
            labels: self.labels[..keep].to_vec(),
        })
    }

    pub fn with_suffix(&self, suffix: &Name) -> Name {
        let mut labels = self.labels.clone();
        labels.extend(suffix.labels.iter().cloned());
        Name { labels }
    }

    /// The `\x00`-prefixed successor name used by online NSEC synthesis (§4.6).
    pub fn prepend_nul_label(&self) -> Name {
        let mut labels = Vec::with_capacity(self.labels.len() + 1);
        labels.push("\u{0}".to_string());
        labels.extend(self.labels.iter().cloned());
        Name { labels }
    }

    /// Canonical, uncompressed, lower-cased wire form (RFC 4034 §6.2). Names are
    /// already stored lower-case, so this is just length-prefixed label encoding.
    pub fn encode_canonical(&self, out: &mut Vec<u8>) {
        for label in &self.labels {
            out.push(label.len() as u8);
            out.extend(label.as_bytes());
        }
        out.push(0);
    }

    /// Compressed wire encoding for ordinary responses. `compressor` tracks every
    /// name suffix written so far in the message and its offset.
    pub fn encode_compressed(&self, out: &mut Vec<u8>, compressor: &mut NameCompressor) {
        for start in 0..=self.labels.len() {
            let suffix = &self.labels[start..];
            if let Some(&offset) = compressor.offsets.get(suffix) {
                for label in &self.labels[..start] {
                    out.push(label.len() as u8);
                    out.extend(label.as_bytes());
                }
                out.push(0xC0 | ((offset >> 8) as u8));
                out.push((offset & 0xFF) as u8);
                return;
            }
        }

        let mut offset = out.len();
        for (i, label) in self.labels.iter().enumerate() {
            if offset <= 0x3FFF {
                compressor
                    .offsets
                    .entry(self.labels[i..].to_vec())
                    .or_insert(offset);
            }
            out.push(label.len() as u8);
            out.extend(label.as_bytes());
            offset += 1 + label.len();
        }
        if offset <= 0x3FFF {
            compressor.offsets.entry(Vec::new()).or_insert(offset);
        }
        out.push(0);
    }

    /// Decode a name starting at `start` within the full message buffer,
    /// following compression pointers. Returns the name and the offset just
    /// past the name as it appeared at `start` (not past a followed pointer).
    pub fn decode(buf: &[u8], start: usize) -> Result<(Name, usize), ParseError> {
        let mut labels = Vec::new();
        let mut pos = start;
        let mut end_pos = None;
        let mut jumps = 0;

        loop {
            let len = *buf.get(pos).ok_or(ParseError::UnexpectedEof)?;
            if len == 0 {
                if end_pos.is_none() {
                    end_pos = Some(pos + 1);
                }
                break;
            }
            if len & 0xC0 == 0xC0 {
                let hi = (len & 0x3F) as u16;
                let lo = *buf.get(pos + 1).ok_or(ParseError::UnexpectedEof)? as u16;
                if end_pos.is_none() {
                    end_pos = Some(pos + 2);
                }
                pos = ((hi << 8) | lo) as usize;
                jumps += 1;
                if jumps > 128 {
                    return Err(ParseError::InvalidLabel);
                }
                continue;
            }
            if len > 63 {
                return Err(ParseError::InvalidLabel);
            }
            let label_start = pos + 1;
            let label_end = label_start + len as usize;
            let label_bytes = buf
                .get(label_start..label_end)
                .ok_or(ParseError::UnexpectedEof)?;
            let label =
                String::from_utf8(label_bytes.to_vec()).map_err(|_| ParseError::InvalidLabel)?;
            labels.push(label.to_ascii_lowercase());
            pos = label_end;
        }

        Ok((Name { labels }, end_pos.unwrap()))
    }

    pub fn in_addr_arpa() -> Name {
        Name::from_labels(["in-addr".to_string(), "arpa".to_string()])
    }

    pub fn ip6_arpa() -> Name {
        Name::from_labels(["ip6".to_string(), "arpa".to_string()])
    }
}

/// Tracks name suffixes already written into an in-progress message, so later
/// names can point back at them instead of repeating the bytes (§4.1).
#[derive(Default)]
pub struct NameCompressor {
    offsets: HashMap<Vec<String>, usize>,
}

impl NameCompressor {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Decode a reverse-zone owner name back into the address it denotes.
///
/// `relative` is the name's labels with the `in-addr.arpa`/`ip6.arpa` suffix
/// already stripped. Per §4.2: reverse the remaining labels, right-pad with
/// `"0"` up to a full address, then parse.
pub fn reverse_labels_to_address(relative: &[String], is_v6: bool) -> Option<IpAddr> {
    if is_v6 {
        if relative.len() > 32 || relative.iter().any(|l| l.len() != 1) {
            return None;
        }
        let mut nibbles: Vec<&str> = relative.iter().rev().map(|s| s.as_str()).collect();
        while nibbles.len() < 32 {
            nibbles.push("0");
        }
        let mut text = String::with_capacity(39);
        for (i, chunk) in nibbles.chunks(4).enumerate() {
            if i > 0 {
                text.push(':');
            }
            text.push_str(&chunk.concat());
        }
        text.parse::<Ipv6Addr>().ok().map(IpAddr::V6)
    } else {
        if relative.len() > 4 {
            return None;
        }
        let mut octets: Vec<&str> = relative.iter().rev().map(|s| s.as_str()).collect();
        while octets.len() < 4 {
            octets.push("0");
        }
        octets.join(".").parse::<Ipv4Addr>().ok().map(IpAddr::V4)
    }
}

/// Derive the canonical reverse-zone owner name for a network (§4.2).
pub fn network_to_reverse_name(address: IpAddr, prefix: u8) -> Name {
    match address {
        IpAddr::V4(addr) => {
            let octets = addr.octets();
            let take = prefix.div_ceil(8) as usize;
            let mut labels: Vec<String> = octets[..take.min(4)]
                .iter()
                .rev()
                .map(|o| o.to_string())
                .collect();
            labels.push("in-addr".to_string());
            labels.push("arpa".to_string());
            Name { labels }
        }
        IpAddr::V6(addr) => {
            let hex: String = addr.segments().iter().map(|s| format!("{s:04x}")).collect();
            let take = prefix.div_ceil(4) as usize;
            let mut labels: Vec<String> = hex
                .chars()
                .take(take.min(32))
                .map(|c| c.to_string())
                .collect();
            labels.reverse();
            labels.push("ip6".to_string());
            labels.push("arpa".to_string());
            Name { labels }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_folds_on_parse() {
        assert_eq!(Name::parse("WWW.Example.COM."), Name::parse("www.example.com"));
    }

    #[test]
    fn suffix_and_strip_roundtrip() {
        let zone = Name::parse("example.com.");
        let qname = Name::parse("www.example.com.");
        assert!(qname.has_suffix(&zone));
        let relative = qname.strip_suffix(&zone).unwrap();
        assert_eq!(relative.labels(), &["www".to_string()]);
        assert_eq!(relative.with_suffix(&zone), qname);
    }

    #[test]
    fn apex_strip_is_empty() {
        let zone = Name::parse("example.com.");
        assert!(zone.strip_suffix(&zone).unwrap().is_root());
    }

    #[test]
    fn reverse_v4_roundtrip() {
        let addr: IpAddr = "192.0.2.5".parse().unwrap();
        let owner = network_to_reverse_name(addr, 32);
        assert_eq!(owner.to_text(), "5.2.0.192.in-addr.arpa.");

        let relative = owner.strip_suffix(&Name::in_addr_arpa()).unwrap();
        let decoded = reverse_labels_to_address(relative.labels(), false).unwrap();
        assert_eq!(decoded, addr);
    }

    #[test]
    fn reverse_v4_network_prefix() {
        let addr: IpAddr = "192.0.2.0".parse().unwrap();
        let owner = network_to_reverse_name(addr, 24);
        assert_eq!(owner.to_text(), "2.0.192.in-addr.arpa.");
    }

    #[test]
    fn compression_reuses_suffix_offset() {
        let mut out = Vec::new();
        let mut compressor = NameCompressor::new();
        let zone = Name::parse("example.com.");
        let www = Name::parse("www.example.com.");

        zone.encode_compressed(&mut out, &mut compressor);
        let zone_end = out.len();
        www.encode_compressed(&mut out, &mut compressor);

        // "www" label plus a two-byte pointer back into the zone's encoding.
        assert_eq!(out.len(), zone_end + 1 + 3 + 2);
        assert_eq!(out[out.len() - 2] & 0xC0, 0xC0);
    }

    #[test]
    fn decode_follows_compression_pointer() {
        let mut out = Vec::new();
        let mut compressor = NameCompressor::new();
        Name::parse("example.com.").encode_compressed(&mut out, &mut compressor);
        let pointer_at = out.len();
        Name::parse("www.example.com.").encode_compressed(&mut out, &mut compressor);

        let (decoded, _) = Name::decode(&out, pointer_at).unwrap();
        assert_eq!(decoded, Name::parse("www.example.com."));
    }
}
