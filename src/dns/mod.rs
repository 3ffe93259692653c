pub mod common;
pub mod enums;
pub mod error;
pub mod header;
pub mod message;
pub mod name;
pub mod question;
pub mod record;

pub use enums::{DNSResourceClass, DNSResourceType, DnsOpcode, ResponseCode};
pub use error::ParseError;
pub use header::DNSHeader;
pub use message::Message;
pub use name::{Name, NameCompressor};
pub use question::DNSQuestion;
pub use record::{decode_record, RData, Record};
