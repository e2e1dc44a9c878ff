//! Authentication-Results header parsing: RFC 8601 and the RFC 8617
//! ARC-Authentication-Results variant.
//!
//! Extracting and unfolding the header from a message is the caller's
//! responsibility. This library takes the header value and returns typed
//! per-method results.

pub mod authres;

pub use authres::{parse, parse_arc, AuthResError, MethodResult, ParsedHeader, ResultValue};
