//! Authentication-Results header fields per RFC 8601 (formerly RFC 5451/7001),
//! including the ARC-Authentication-Results variant from RFC 8617.
//!
//! The input is an already-unfolded header value. Comments (CFWS) inside the
//! value are not stripped, so a parenthesised comment containing whitespace
//! will be split into stray tokens.

mod format;
mod parser;
mod registry;
mod types;

pub use format::HeaderFormatter;
pub use parser::{parse, parse_arc, parse_param, MAX_ARC_INSTANCE, SUPPORTED_VERSION};
pub use registry::MethodParams;
pub use types::{
    DkimResult, DmarcResult, DomainKeysResult, GenericResult, IpRevResult, MethodResult,
    Params, ParsedHeader, ResultValue, SenderIdResult, SmtpAuthResult, SpfResult,
};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthResError {
    #[error("unsupported version: {0}")]
    UnsupportedVersion(String),
    #[error("malformed authentication method and value: {0}")]
    MalformedMethod(String),
    #[error("malformed parameter: {0}")]
    MalformedParameter(String),
    #[error("missing ARC instance tag: {0}")]
    MissingInstance(String),
}
