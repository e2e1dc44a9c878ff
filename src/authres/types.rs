use std::collections::BTreeMap;
use std::fmt;

use super::AuthResError;

/// Parameters of one result segment, keyed by lowercased property name
/// (`reason`, `header.d`, `smtp.mailfrom`, ...).
pub type Params = BTreeMap<String, String>;

// ---------------------------------------------------------------------------
// ResultValue
// ---------------------------------------------------------------------------

/// Verdict of one authentication method (RFC 8601 Section 2.7).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum ResultValue {
    #[default]
    None,
    Pass,
    Fail,
    Policy,
    Neutral,
    TempError,
    PermError,
    HardFail,
    SoftFail,
    /// Any other token, stored lowercased.
    Other(String),
}

impl ResultValue {
    /// Case-insensitive; never fails.
    pub fn parse(s: &str) -> Self {
        let lower = s.to_lowercase();
        match lower.as_str() {
            "none" => ResultValue::None,
            "pass" => ResultValue::Pass,
            "fail" => ResultValue::Fail,
            "policy" => ResultValue::Policy,
            "neutral" => ResultValue::Neutral,
            "temperror" => ResultValue::TempError,
            "permerror" => ResultValue::PermError,
            "hardfail" => ResultValue::HardFail,
            "softfail" => ResultValue::SoftFail,
            _ => ResultValue::Other(lower),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ResultValue::None => "none",
            ResultValue::Pass => "pass",
            ResultValue::Fail => "fail",
            ResultValue::Policy => "policy",
            ResultValue::Neutral => "neutral",
            ResultValue::TempError => "temperror",
            ResultValue::PermError => "permerror",
            ResultValue::HardFail => "hardfail",
            ResultValue::SoftFail => "softfail",
            ResultValue::Other(s) => s,
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, ResultValue::Pass)
    }
}

impl fmt::Display for ResultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Per-method results
// ---------------------------------------------------------------------------

/// `auth=` (SMTP AUTH, RFC 4954).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SmtpAuthResult {
    pub value: ResultValue,
    pub reason: String,
    /// `smtp.auth`
    pub auth: String,
}

/// `dkim=` (RFC 6376).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DkimResult {
    pub value: ResultValue,
    pub reason: String,
    /// `header.d`
    pub domain: String,
    /// `header.i`
    pub identifier: String,
}

/// `domainkeys=` (RFC 4870).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainKeysResult {
    pub value: ResultValue,
    pub reason: String,
    pub domain: String,
    pub from: String,
    pub sender: String,
}

/// `iprev=` (RFC 8601 Section 3).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IpRevResult {
    pub value: ResultValue,
    pub reason: String,
    /// `policy.iprev`
    pub ip: String,
}

/// `sender-id=` (RFC 4406). Carries a single `header.<name>` property.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SenderIdResult {
    pub value: ResultValue,
    pub reason: String,
    /// Header name with the `header.` prefix stripped.
    pub header_key: String,
    pub header_value: String,
}

/// `spf=` (RFC 7208).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpfResult {
    pub value: ResultValue,
    pub reason: String,
    /// `smtp.mailfrom`
    pub from: String,
    /// `smtp.helo`
    pub helo: String,
}

/// `dmarc=` (RFC 7489).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DmarcResult {
    pub value: ResultValue,
    pub reason: String,
    /// `header.from`
    pub from: String,
}

/// Any method without a registered mapping. Keeps every parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenericResult {
    pub method: String,
    pub value: ResultValue,
    pub params: Params,
}

/// One `method=value prop=value ...` entry of the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodResult {
    Auth(SmtpAuthResult),
    Dkim(DkimResult),
    DomainKeys(DomainKeysResult),
    IpRev(IpRevResult),
    SenderId(SenderIdResult),
    Spf(SpfResult),
    Dmarc(DmarcResult),
    Generic(GenericResult),
}

impl MethodResult {
    pub fn method(&self) -> &str {
        match self {
            MethodResult::Auth(_) => "auth",
            MethodResult::Dkim(_) => "dkim",
            MethodResult::DomainKeys(_) => "domainkeys",
            MethodResult::IpRev(_) => "iprev",
            MethodResult::SenderId(_) => "sender-id",
            MethodResult::Spf(_) => "spf",
            MethodResult::Dmarc(_) => "dmarc",
            MethodResult::Generic(r) => &r.method,
        }
    }

    pub fn value(&self) -> &ResultValue {
        match self {
            MethodResult::Auth(r) => &r.value,
            MethodResult::Dkim(r) => &r.value,
            MethodResult::DomainKeys(r) => &r.value,
            MethodResult::IpRev(r) => &r.value,
            MethodResult::SenderId(r) => &r.value,
            MethodResult::Spf(r) => &r.value,
            MethodResult::Dmarc(r) => &r.value,
            MethodResult::Generic(r) => &r.value,
        }
    }

    pub fn reason(&self) -> &str {
        match self {
            MethodResult::Auth(r) => &r.reason,
            MethodResult::Dkim(r) => &r.reason,
            MethodResult::DomainKeys(r) => &r.reason,
            MethodResult::IpRev(r) => &r.reason,
            MethodResult::SenderId(r) => &r.reason,
            MethodResult::Spf(r) => &r.reason,
            MethodResult::Dmarc(r) => &r.reason,
            MethodResult::Generic(r) => r.params.get("reason").map(String::as_str).unwrap_or(""),
        }
    }
}

// ---------------------------------------------------------------------------
// ParsedHeader
// ---------------------------------------------------------------------------

/// Outcome of parsing one header value.
///
/// Parsing never panics or returns early with nothing: when `error` is set,
/// `results` still holds every result parsed before the failing segment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedHeader {
    /// authserv-id
    pub identifier: String,
    /// ARC instance (1-50), 0 for plain Authentication-Results.
    pub instance: u32,
    pub results: Vec<MethodResult>,
    pub error: Option<AuthResError>,
}

impl ParsedHeader {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// First result for `method` (case-insensitive).
    pub fn find(&self, method: &str) -> Option<&MethodResult> {
        self.results
            .iter()
            .find(|r| r.method().eq_ignore_ascii_case(method))
    }

    pub fn into_result(self) -> Result<Self, AuthResError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self),
        }
    }
}
