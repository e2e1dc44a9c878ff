// ---------------------------------------------------------------------------
// Method registry: method name -> typed result constructor
// ---------------------------------------------------------------------------

use super::types::{
    DkimResult, DmarcResult, DomainKeysResult, GenericResult, IpRevResult, MethodResult,
    Params, ResultValue, SenderIdResult, SmtpAuthResult, SpfResult,
};

/// Two-way mapping between a typed result and its `ptype.property` parameters.
///
/// `from_params` never fails: missing keys become empty strings. `to_params`
/// always emits the full key set of the method, empty values included.
pub trait MethodParams: Sized {
    const METHOD: &'static str;

    fn from_params(value: ResultValue, params: &Params) -> Self;

    fn to_params(&self) -> Params;

    fn value(&self) -> &ResultValue;
}

fn param(params: &Params, key: &str) -> String {
    params.get(key).cloned().unwrap_or_default()
}

fn params_of<const N: usize>(pairs: [(&str, &str); N]) -> Params {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl MethodParams for SmtpAuthResult {
    const METHOD: &'static str = "auth";

    fn from_params(value: ResultValue, params: &Params) -> Self {
        SmtpAuthResult {
            value,
            reason: param(params, "reason"),
            auth: param(params, "smtp.auth"),
        }
    }

    fn to_params(&self) -> Params {
        params_of([("reason", self.reason.as_str()), ("smtp.auth", self.auth.as_str())])
    }

    fn value(&self) -> &ResultValue {
        &self.value
    }
}

impl MethodParams for DkimResult {
    const METHOD: &'static str = "dkim";

    fn from_params(value: ResultValue, params: &Params) -> Self {
        DkimResult {
            value,
            reason: param(params, "reason"),
            domain: param(params, "header.d"),
            identifier: param(params, "header.i"),
        }
    }

    fn to_params(&self) -> Params {
        params_of([
            ("reason", self.reason.as_str()),
            ("header.d", self.domain.as_str()),
            ("header.i", self.identifier.as_str()),
        ])
    }

    fn value(&self) -> &ResultValue {
        &self.value
    }
}

impl MethodParams for DomainKeysResult {
    const METHOD: &'static str = "domainkeys";

    fn from_params(value: ResultValue, params: &Params) -> Self {
        DomainKeysResult {
            value,
            reason: param(params, "reason"),
            domain: param(params, "header.d"),
            from: param(params, "header.from"),
            sender: param(params, "header.sender"),
        }
    }

    fn to_params(&self) -> Params {
        params_of([
            ("reason", self.reason.as_str()),
            ("header.d", self.domain.as_str()),
            ("header.from", self.from.as_str()),
            ("header.sender", self.sender.as_str()),
        ])
    }

    fn value(&self) -> &ResultValue {
        &self.value
    }
}

impl MethodParams for IpRevResult {
    const METHOD: &'static str = "iprev";

    fn from_params(value: ResultValue, params: &Params) -> Self {
        IpRevResult {
            value,
            reason: param(params, "reason"),
            ip: param(params, "policy.iprev"),
        }
    }

    fn to_params(&self) -> Params {
        params_of([("reason", self.reason.as_str()), ("policy.iprev", self.ip.as_str())])
    }

    fn value(&self) -> &ResultValue {
        &self.value
    }
}

impl MethodParams for SenderIdResult {
    const METHOD: &'static str = "sender-id";

    fn from_params(value: ResultValue, params: &Params) -> Self {
        // The parser keeps only the first header.* property of a sender-id
        // segment. For hand-built params the smallest key wins.
        let (header_key, header_value) = params
            .iter()
            .find_map(|(k, v)| k.strip_prefix("header.").map(|name| (name, v)))
            .map(|(name, v)| (name.to_string(), v.clone()))
            .unwrap_or_default();
        SenderIdResult {
            value,
            reason: param(params, "reason"),
            header_key,
            header_value,
        }
    }

    fn to_params(&self) -> Params {
        let key = format!("header.{}", self.header_key.to_lowercase());
        params_of([
            ("reason", self.reason.as_str()),
            (key.as_str(), self.header_value.as_str()),
        ])
    }

    fn value(&self) -> &ResultValue {
        &self.value
    }
}

impl MethodParams for SpfResult {
    const METHOD: &'static str = "spf";

    fn from_params(value: ResultValue, params: &Params) -> Self {
        SpfResult {
            value,
            reason: param(params, "reason"),
            from: param(params, "smtp.mailfrom"),
            helo: param(params, "smtp.helo"),
        }
    }

    fn to_params(&self) -> Params {
        params_of([
            ("reason", self.reason.as_str()),
            ("smtp.mailfrom", self.from.as_str()),
            ("smtp.helo", self.helo.as_str()),
        ])
    }

    fn value(&self) -> &ResultValue {
        &self.value
    }
}

impl MethodParams for DmarcResult {
    const METHOD: &'static str = "dmarc";

    fn from_params(value: ResultValue, params: &Params) -> Self {
        DmarcResult {
            value,
            reason: param(params, "reason"),
            from: param(params, "header.from"),
        }
    }

    fn to_params(&self) -> Params {
        params_of([("reason", self.reason.as_str()), ("header.from", self.from.as_str())])
    }

    fn value(&self) -> &ResultValue {
        &self.value
    }
}

macro_rules! impl_from_result {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for MethodResult {
                fn from(r: $ty) -> Self {
                    MethodResult::$variant(r)
                }
            }
        )*
    };
}

impl_from_result! {
    SmtpAuthResult => Auth,
    DkimResult => Dkim,
    DomainKeysResult => DomainKeys,
    IpRevResult => IpRev,
    SenderIdResult => SenderId,
    SpfResult => Spf,
    DmarcResult => Dmarc,
    GenericResult => Generic,
}

type Constructor = fn(ResultValue, &Params) -> MethodResult;

fn construct<T>(value: ResultValue, params: &Params) -> MethodResult
where
    T: MethodParams + Into<MethodResult>,
{
    T::from_params(value, params).into()
}

/// Registered methods. Names are lowercase and unique.
const REGISTRY: &[(&str, Constructor)] = &[
    (SmtpAuthResult::METHOD, construct::<SmtpAuthResult>),
    (DkimResult::METHOD, construct::<DkimResult>),
    (DomainKeysResult::METHOD, construct::<DomainKeysResult>),
    (IpRevResult::METHOD, construct::<IpRevResult>),
    (SenderIdResult::METHOD, construct::<SenderIdResult>),
    (SpfResult::METHOD, construct::<SpfResult>),
    (DmarcResult::METHOD, construct::<DmarcResult>),
];

fn lookup(method: &str) -> Option<Constructor> {
    REGISTRY
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(method))
        .map(|(_, ctor)| *ctor)
}

fn render<T: MethodParams>(r: &T) -> (ResultValue, Params) {
    (r.value().clone(), r.to_params())
}

impl MethodResult {
    /// Build the typed result for `method`, or a [`GenericResult`] holding
    /// `params` unchanged when the method is not registered.
    pub fn from_params(method: &str, value: ResultValue, params: Params) -> Self {
        match lookup(method) {
            Some(ctor) => ctor(value, &params),
            None => MethodResult::Generic(GenericResult {
                method: method.to_string(),
                value,
                params,
            }),
        }
    }

    /// Render back to `(value, params)`.
    pub fn format(&self) -> (ResultValue, Params) {
        match self {
            MethodResult::Auth(r) => render(r),
            MethodResult::Dkim(r) => render(r),
            MethodResult::DomainKeys(r) => render(r),
            MethodResult::IpRev(r) => render(r),
            MethodResult::SenderId(r) => render(r),
            MethodResult::Spf(r) => render(r),
            MethodResult::Dmarc(r) => render(r),
            MethodResult::Generic(r) => (r.value.clone(), r.params.clone()),
        }
    }
}
