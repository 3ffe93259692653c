use std::fmt;

/// Errors produced while parsing or encoding a DNS wire message.
///
/// Any variant here maps to FORMERR at the dispatch boundary (see
/// `crate::error::EngineError`); nothing below is fatal to the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    InvalidHeader,
    InvalidLabel,
    InvalidQuestionSection,
    InvalidAnswerSection,
    InvalidAuthoritySection,
    InvalidAdditionalSection,
    UnexpectedEof,
    InvalidBitStream(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidHeader => write!(f, "invalid DNS header"),
            Self::InvalidLabel => write!(f, "invalid domain name label"),
            Self::InvalidQuestionSection => write!(f, "invalid question section"),
            Self::InvalidAnswerSection => write!(f, "invalid answer section"),
            Self::InvalidAuthoritySection => write!(f, "invalid authority section"),
            Self::InvalidAdditionalSection => write!(f, "invalid additional section"),
            Self::UnexpectedEof => write!(f, "unexpected end of message"),
            Self::InvalidBitStream(msg) => write!(f, "bitstream error: {msg}"),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<std::io::Error> for ParseError {
    fn from(e: std::io::Error) -> Self {
        ParseError::InvalidBitStream(e.to_string())
    }
}
