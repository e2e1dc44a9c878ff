use email_authres::authres::{
    parse, parse_arc, DkimResult, DmarcResult, HeaderFormatter, IpRevResult, SenderIdResult,
    SmtpAuthResult, SpfResult,
};
use email_authres::{AuthResError, MethodResult, ResultValue};

// -- realistic headers ----------------------------------------------------

#[test]
fn gmail_style_header() {
    let parsed = parse(
        "mx.google.com; \
         dkim=pass header.i=@example.com header.s=20230601 header.b=AbCd; \
         spf=pass smtp.mailfrom=bounce@example.com; \
         dmarc=pass header.from=example.com",
    );
    assert!(parsed.is_ok());
    assert_eq!(parsed.identifier, "mx.google.com");
    assert_eq!(parsed.results.len(), 3);

    let dkim = parsed.find("dkim").unwrap();
    assert_eq!(
        dkim,
        &MethodResult::Dkim(DkimResult {
            value: ResultValue::Pass,
            reason: String::new(),
            domain: String::new(),
            identifier: "@example.com".into(),
        })
    );
    assert_eq!(
        parsed.find("dmarc"),
        Some(&MethodResult::Dmarc(DmarcResult {
            value: ResultValue::Pass,
            reason: String::new(),
            from: "example.com".into(),
        }))
    );
}

#[test]
fn all_registered_methods() {
    let parsed = parse(
        "mail.example.org 1; \
         auth=pass smtp.auth=alice; \
         iprev=pass policy.iprev=192.0.2.200; \
         sender-id=fail header.From=spoof@example.net reason=mismatch; \
         domainkeys=neutral header.d=example.org header.from=a@example.org; \
         spf=softfail smtp.mailfrom=a@example.org smtp.helo=mta.example.org",
    );
    assert!(parsed.is_ok());
    assert_eq!(parsed.identifier, "mail.example.org");

    let methods: Vec<&str> = parsed.results.iter().map(|r| r.method()).collect();
    assert_eq!(methods, ["auth", "iprev", "sender-id", "domainkeys", "spf"]);

    assert_eq!(
        parsed.results[0],
        MethodResult::Auth(SmtpAuthResult {
            value: ResultValue::Pass,
            reason: String::new(),
            auth: "alice".into(),
        })
    );
    assert_eq!(
        parsed.results[1],
        MethodResult::IpRev(IpRevResult {
            value: ResultValue::Pass,
            reason: String::new(),
            ip: "192.0.2.200".into(),
        })
    );
    assert_eq!(
        parsed.results[2],
        MethodResult::SenderId(SenderIdResult {
            value: ResultValue::Fail,
            reason: "mismatch".into(),
            header_key: "from".into(),
            header_value: "spoof@example.net".into(),
        })
    );
    assert_eq!(parsed.results[3].value(), &ResultValue::Neutral);
    assert_eq!(
        parsed.results[4],
        MethodResult::Spf(SpfResult {
            value: ResultValue::SoftFail,
            reason: String::new(),
            from: "a@example.org".into(),
            helo: "mta.example.org".into(),
        })
    );
}

#[test]
fn unknown_method_keeps_params() {
    let parsed = parse("mx.example.com; x-spam=Fail policy.score=9.1 header.x=y");
    let result = &parsed.results[0];
    assert_eq!(result.method(), "x-spam");
    let (value, params) = result.format();
    assert_eq!(value, ResultValue::Fail);
    assert_eq!(params.len(), 2);
    assert_eq!(params["policy.score"], "9.1");
    assert_eq!(params["header.x"], "y");
}

#[test]
fn comment_tokens_are_dropped() {
    // Comments are not stripped; a comment word without '=' is skipped.
    let parsed = parse("mx.example.com; dkim=pass (good) header.d=example.com");
    assert!(parsed.is_ok());
    assert_eq!(
        parsed.results,
        vec![MethodResult::Dkim(DkimResult {
            value: ResultValue::Pass,
            domain: "example.com".into(),
            ..Default::default()
        })]
    );
}

// -- failures -------------------------------------------------------------

#[test]
fn unsupported_version_discards_everything() {
    let parsed = parse("example.com 2; dkim=pass");
    assert_eq!(parsed.error, Some(AuthResError::UnsupportedVersion("2".into())));
    assert_eq!(parsed.identifier, "");
    assert!(parsed.results.is_empty());
    assert!(parsed.into_result().is_err());
}

#[test]
fn malformed_method_keeps_partial_results() {
    let parsed = parse("example.com; spf=pass; oops; dkim=pass");
    assert_eq!(parsed.results.len(), 1);
    assert_eq!(parsed.error, Some(AuthResError::MalformedMethod("oops".into())));
    assert_eq!(
        parsed.error.unwrap().to_string(),
        "malformed authentication method and value: oops"
    );
}

// -- ARC ------------------------------------------------------------------

#[test]
fn arc_header() {
    let parsed = parse_arc("i=1; lists.example.org; spf=pass smtp.mailfrom=example.org");
    assert!(parsed.is_ok());
    assert_eq!(parsed.instance, 1);
    assert_eq!(parsed.identifier, "lists.example.org");
    assert_eq!(parsed.results.len(), 1);
}

#[test]
fn arc_out_of_range_instance() {
    let parsed = parse("i=51; example.com; dkim=pass");
    assert_eq!(parsed.instance, 0);
    assert_eq!(parsed.identifier, "i=51");

    let strict = parse_arc("i=51; example.com; dkim=pass");
    assert_eq!(strict.error, Some(AuthResError::MissingInstance("i=51".into())));
}

#[test]
fn arc_header_with_version() {
    let parsed = parse("i=1; example.com 1; dkim=pass");
    assert!(parsed.is_ok());
    assert_eq!(parsed.instance, 1);
    assert_eq!(parsed.identifier, "example.com");
    assert_eq!(parsed.results.len(), 1);
    assert_eq!(parsed.results[0].method(), "dkim");
}

#[test]
fn arc_header_with_unsupported_version() {
    let parsed = parse("i=2; example.com 2; dkim=pass; spf=pass");
    assert_eq!(parsed.error, Some(AuthResError::UnsupportedVersion("2".into())));
    assert_eq!(parsed.instance, 2);
    assert_eq!(parsed.identifier, "");
    assert!(parsed.results.is_empty());
}

#[test]
fn sender_id_uses_first_header_property() {
    let parsed = parse("mx; sender-id=pass header.sender=a@x.org header.from=b@x.org");
    assert!(parsed.is_ok());
    assert_eq!(
        parsed.results,
        vec![MethodResult::SenderId(SenderIdResult {
            value: ResultValue::Pass,
            reason: String::new(),
            header_key: "sender".into(),
            header_value: "a@x.org".into(),
        })]
    );
}

// -- rendering ------------------------------------------------------------

#[test]
fn render_then_parse() {
    let original = parse(
        "i=2; relay.example.net; dmarc=pass header.from=example.com; \
         iprev=pass policy.iprev=198.51.100.7",
    );
    let header = HeaderFormatter::new(original.identifier.clone())
        .instance(original.instance)
        .format(&original.results);
    assert_eq!(parse(&header), original);
}
