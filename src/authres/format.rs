// ---------------------------------------------------------------------------
// Header rendering
// ---------------------------------------------------------------------------

use super::parser::SUPPORTED_VERSION;
use super::types::MethodResult;

/// Renders results back into an (unfolded) header value.
///
/// ```
/// use email_authres::authres::{HeaderFormatter, MethodResult, ResultValue, SpfResult};
///
/// let spf = MethodResult::Spf(SpfResult {
///     value: ResultValue::Pass,
///     from: "bob@example.com".into(),
///     ..Default::default()
/// });
/// let header = HeaderFormatter::new("mx.example.com").format(&[spf]);
/// assert_eq!(header, "mx.example.com; spf=pass smtp.mailfrom=bob@example.com");
/// ```
#[derive(Debug, Clone)]
pub struct HeaderFormatter {
    identifier: String,
    instance: Option<u32>,
    version: bool,
}

impl HeaderFormatter {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            instance: None,
            version: false,
        }
    }

    /// Prefix with `i=<n>;` for ARC-Authentication-Results.
    pub fn instance(mut self, instance: u32) -> Self {
        self.instance = Some(instance);
        self
    }

    /// Append the explicit ` 1` version after the identifier.
    pub fn version(mut self, enabled: bool) -> Self {
        self.version = enabled;
        self
    }

    pub fn format(&self, results: &[MethodResult]) -> String {
        let mut out = String::new();
        if let Some(i) = self.instance {
            out.push_str(&format!("i={}; ", i));
        }
        out.push_str(&self.identifier);
        if self.version {
            out.push(' ');
            out.push_str(SUPPORTED_VERSION);
        }

        // RFC 8601 Section 2.2: "none" when no method was evaluated.
        if results.is_empty() {
            out.push_str("; none");
            return out;
        }

        for result in results {
            out.push_str("; ");
            out.push_str(&format_result(result));
        }
        out
    }
}

fn format_result(result: &MethodResult) -> String {
    let (value, params) = result.format();
    // Empty fields of registered methods are omitted; generic params are
    // written back exactly as parsed.
    let keep_empty = matches!(result, MethodResult::Generic(_));
    let mut out = format!("{}={}", result.method(), value);
    for (key, val) in &params {
        if val.is_empty() && !keep_empty {
            continue;
        }
        out.push(' ');
        out.push_str(key);
        out.push('=');
        out.push_str(&format_value(val));
    }
    out
}

fn needs_quoting(val: &str) -> bool {
    val.chars()
        .any(|c| c.is_whitespace() || matches!(c, ';' | '(' | ')' | '"' | '\\'))
}

/// Emit `val` as-is, or as an RFC 5322 quoted-string.
fn format_value(val: &str) -> String {
    if !needs_quoting(val) {
        return val.to_string();
    }
    let mut out = String::with_capacity(val.len() + 2);
    out.push('"');
    for c in val.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}
