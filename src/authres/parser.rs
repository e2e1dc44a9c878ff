// ---------------------------------------------------------------------------
// Authentication-Results parsing (RFC 8601, RFC 8617 Section 4.1.1)
// ---------------------------------------------------------------------------

use tracing::{debug, trace};

use super::registry::MethodParams;
use super::types::{MethodResult, Params, ParsedHeader, ResultValue, SenderIdResult};
use super::AuthResError;

/// Instance tag values range from 1 to 50 inclusive.
pub const MAX_ARC_INSTANCE: u32 = 50;

/// Only version 1 of the header is defined.
pub const SUPPORTED_VERSION: &str = "1";

/// Split a `key=value` token on its first `=`.
///
/// Returns the lowercased, trimmed key and the trimmed value.
pub fn parse_param(token: &str) -> Result<(String, String), AuthResError> {
    let (key, value) = token
        .split_once('=')
        .ok_or_else(|| AuthResError::MalformedParameter(token.to_string()))?;
    Ok((key.trim().to_lowercase(), value.trim().to_string()))
}

/// Parse one `;`-delimited segment. `Ok(None)` for a bare `none`.
fn parse_result(segment: &str) -> Result<Option<MethodResult>, AuthResError> {
    let mut fields = segment.split_whitespace();
    let first = match fields.next() {
        Some(f) if f != "none" => f,
        _ => {
            trace!(segment, "skipping empty result segment");
            return Ok(None);
        }
    };

    let (method, raw_value) =
        parse_param(first).map_err(|_| AuthResError::MalformedMethod(first.to_string()))?;
    let value = ResultValue::parse(&raw_value);

    // sender-id carries a single header.* property: the first one written.
    let sender_id = method == SenderIdResult::METHOD;
    let mut header_key: Option<String> = None;

    let mut params = Params::new();
    for field in fields {
        match parse_param(field) {
            Ok((k, v)) => {
                if sender_id && k.starts_with("header.") {
                    match &header_key {
                        Some(first) if *first != k => {
                            trace!(key = %k, first = %first, "ignoring extra header property");
                            continue;
                        }
                        _ => header_key = Some(k.clone()),
                    }
                }
                params.insert(k, v);
            }
            Err(err) => trace!(%err, method = %method, "dropping malformed parameter"),
        }
    }

    Ok(Some(MethodResult::from_params(&method, value, params)))
}

/// Instance number of an `i=<n>` ARC preamble, if valid.
fn arc_instance(preamble: &str) -> Option<u32> {
    let raw = preamble.strip_prefix("i=")?;
    match raw.parse::<u32>() {
        Ok(n) if (1..=MAX_ARC_INSTANCE).contains(&n) => Some(n),
        _ => {
            trace!(preamble, "not an ARC instance tag");
            None
        }
    }
}

/// Parse an unfolded Authentication-Results (or ARC-Authentication-Results)
/// header value.
///
/// Never fails outright: errors are recorded in [`ParsedHeader::error`]
/// alongside whatever results were parsed before the failure.
pub fn parse(value: &str) -> ParsedHeader {
    let parts: Vec<&str> = value.split(';').collect();
    let mut identifier = parts.first().copied().unwrap_or_default().trim();
    let mut instance = 0;
    let mut start = 1;

    // ARC-Authentication-Results: i=<n>; authserv-id; ...
    if let Some(n) = arc_instance(identifier) {
        if let Some(next) = parts.get(1) {
            instance = n;
            identifier = next.trim();
            start = 2;
        }
    }

    // authserv-id [CFWS authres-version]
    if let Some(pos) = identifier.find(char::is_whitespace) {
        let version = identifier[pos..].trim();
        if version != SUPPORTED_VERSION {
            let err = AuthResError::UnsupportedVersion(version.to_string());
            debug!(%err, "rejecting Authentication-Results header");
            return ParsedHeader {
                identifier: String::new(),
                instance,
                results: Vec::new(),
                error: Some(err),
            };
        }
        identifier = &identifier[..pos];
    }

    let mut parsed = ParsedHeader {
        identifier: identifier.to_string(),
        instance,
        results: Vec::new(),
        error: None,
    };

    for part in &parts[start.min(parts.len())..] {
        let segment = part.trim();
        if segment.is_empty() {
            continue;
        }
        match parse_result(segment) {
            Ok(Some(result)) => parsed.results.push(result),
            Ok(None) => {}
            Err(err) => {
                debug!(%err, kept = parsed.results.len(), "stopping at malformed result");
                parsed.error = Some(err);
                break;
            }
        }
    }

    parsed
}

/// Like [`parse`], but the `i=<n>` instance preamble is mandatory.
pub fn parse_arc(value: &str) -> ParsedHeader {
    let parsed = parse(value);
    if parsed.instance != 0 {
        return parsed;
    }
    let preamble = value.split(';').next().unwrap_or_default().trim();
    let err = AuthResError::MissingInstance(preamble.to_string());
    debug!(%err, "rejecting ARC-Authentication-Results header");
    ParsedHeader {
        error: Some(err),
        ..Default::default()
    }
}
