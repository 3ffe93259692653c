use thiserror::Error;

use crate::dns::enums::ResponseCode;
use crate::dns::error::ParseError;

/// Unified error type for the engine (§7, §10.2). Every variant maps
/// deterministically to an RCODE at the dispatcher boundary; nothing else in
/// the engine is allowed to propagate a raw error past `Engine::query`.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("malformed request: {0}")]
    Malformed(#[from] ParseError),

    #[error("opcode {0} is not implemented")]
    UnsupportedOpcode(u8),

    #[error("query name is not under any authoritative zone")]
    NotAuthoritative,

    #[error("stored DS record at {owner} has an empty digest")]
    MissingDsDigest { owner: String },

    #[error("DNSSEC signing key is not an EC private key")]
    NonEcSigningKey,

    #[error("failed to load DNSSEC key from {path}: {source}")]
    KeyLoad {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl EngineError {
    /// Map this error to the RCODE the dispatcher should return (§7).
    pub fn rcode(&self) -> ResponseCode {
        match self {
            EngineError::Malformed(_) => ResponseCode::FormatError,
            EngineError::UnsupportedOpcode(_) => ResponseCode::Refused,
            EngineError::NotAuthoritative => ResponseCode::NameError,
            EngineError::MissingDsDigest { .. }
            | EngineError::NonEcSigningKey
            | EngineError::KeyLoad { .. }
            | EngineError::InvalidConfig(_)
            | EngineError::Internal(_) => ResponseCode::ServerFailure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_maps_to_formerr() {
        let err = EngineError::Malformed(ParseError::UnexpectedEof);
        assert_eq!(err.rcode(), ResponseCode::FormatError);
    }

    #[test]
    fn missing_digest_maps_to_servfail() {
        let err = EngineError::MissingDsDigest {
            owner: "sub.example.com.".to_string(),
        };
        assert_eq!(err.rcode(), ResponseCode::ServerFailure);
    }
}
