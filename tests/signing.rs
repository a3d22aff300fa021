use {
    bytes::Bytes,
    chrono::{DateTime, NaiveDate, TimeZone, Utc},
    http::{Method, Request},
    regex::Regex,
    scratchstack_aws_signer::{
        authorization_header_value, canonicalize_header_map, canonicalize_headers, canonicalize_text_headers,
        crypto::digest_body, derive_signing_key, sign, string_to_sign, CanonicalRequest, Credentials, SigV4Signer,
        SignerConfig, SigningAlgorithm, SigningOutcome, SigningScope,
    },
};

const ACCESS_KEY: &str = "AKIDEXAMPLE";
const SECRET_KEY: &str = "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY";
const REGION: &str = "us-east-1";
const SERVICE: &str = "dynamodb";
const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2015, 8, 30).unwrap()
}

fn timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2015, 8, 30, 12, 36, 0).unwrap()
}

fn signer() -> SigV4Signer {
    let config = SignerConfig::builder()
        .credentials(Credentials::new(ACCESS_KEY, SECRET_KEY))
        .region(REGION)
        .service(SERVICE)
        .build()
        .unwrap();
    SigV4Signer::new_at(config, date()).unwrap()
}

#[test_log::test]
fn post_vanilla() {
    run(&[("Host", "example.amazonaws.com")], "{}", "host;x-amz-date");
}

#[test_log::test]
fn post_header_key_case() {
    run(&[("HOST", "example.amazonaws.com"), ("My-Header1", "value1")], "{}", "host;my-header1;x-amz-date");
}

#[test_log::test]
fn post_header_value_trim() {
    run(
        &[("Host", "example.amazonaws.com"), ("My-Header1", " value1"), ("My-Header2", "\"a   b   c\"")],
        "{}",
        "host;my-header1;my-header2;x-amz-date",
    );
}

#[test_log::test]
fn post_header_key_duplicate() {
    run(
        &[("Host", "example.amazonaws.com"), ("My-Header1", "value2"), ("My-Header1", "value1")],
        "{}",
        "host;my-header1;my-header1;x-amz-date",
    );
}

#[test_log::test]
fn post_ignored_headers() {
    run(
        &[
            ("Connection", "keep-alive"),
            ("Host", "example.amazonaws.com"),
            ("X-Amzn-Trace-Id", "Root=1-5759e988-bd862e3fe1be46a994272793"),
        ],
        "{}",
        "host;x-amz-date",
    );
}

#[test_log::test]
fn post_small_json() {
    run(&[("Content-Type", "application/x-amz-json-1.0")], r#"{"a":1}"#, "content-type;x-amz-date");
}

#[test_log::test]
fn post_empty_body() {
    run(&[("Content-Type", "application/x-amz-json-1.0")], "", "content-type;x-amz-date");
}

#[test_log::test]
fn post_dynamodb_put_item() {
    run(
        &[
            ("Accept-Encoding", "identity"),
            ("Content-Type", "application/x-amz-json-1.0"),
            ("User-Agent", "load-generator/1.0"),
            ("X-Amz-Target", "DynamoDB_20120810.PutItem"),
        ],
        r#"{"TableName":"Music","Item":{"Artist":{"S":"No One You Know"},"SongTitle":{"S":"Call Me Today"}}}"#,
        "accept-encoding;content-type;user-agent;x-amz-date;x-amz-target",
    );
}

/// Sign a POST request carrying `headers` and `body`, then check the result against a signature
/// computed independently from the public building blocks.
fn run(headers: &[(&str, &str)], body: &'static str, expected_signed_headers: &str) {
    let mut builder = Request::builder().method(Method::POST).uri("/");
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let mut request = builder.body(Bytes::from_static(body.as_bytes())).unwrap();

    let outcome = signer().sign_request_at(&mut request, timestamp()).unwrap();
    let signed = match outcome {
        SigningOutcome::Signed(signed) => signed,
        SigningOutcome::Unsigned => panic!("Request with a body was not signed"),
    };

    let authz = request.headers().get("authorization").unwrap().to_str().unwrap().to_string();
    let grammar = Regex::new(concat!(
        r"^AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20150830/us-east-1/dynamodb/aws4_request, ",
        r"SignedHeaders=([a-z0-9-]+(?:;[a-z0-9-]+)*), Signature=([0-9a-f]{64})$",
    ))
    .unwrap();
    let captures = grammar.captures(&authz).unwrap_or_else(|| panic!("Malformed Authorization header: {}", authz));
    assert_eq!(&captures[1], expected_signed_headers);
    assert_eq!(request.headers().get("x-amz-date").unwrap(), "20150830T123600Z");

    // Recompute from the headers that were actually sent.
    let canonical_headers =
        canonicalize_header_map(request.headers(), &["connection", "x-amzn-trace-id", "authorization"]);
    let body_sha256 = digest_body(&Bytes::from_static(body.as_bytes())).unwrap();
    let creq = CanonicalRequest::new("POST", canonical_headers, body_sha256);
    assert_eq!(creq.signed_headers(), expected_signed_headers);

    let scope = SigningScope::new(date(), REGION, SERVICE);
    let sts = string_to_sign(SigningAlgorithm::HmacSha256, &timestamp(), &scope, &creq.sha256_hex());
    let key = derive_signing_key(SECRET_KEY, date(), REGION, SERVICE);
    let signature = hex::encode(sign(&sts, &key, SigningAlgorithm::HmacSha256));
    assert_eq!(&captures[2], signature);
    assert_eq!(signed.signature(), signature);
    let algorithm = SigningAlgorithm::HmacSha256;
    let expected_authz = authorization_header_value(algorithm, ACCESS_KEY, &scope, expected_signed_headers, &signature);
    assert_eq!(authz, expected_authz);
}

#[test_log::test]
fn canonicalization_is_idempotent() {
    let raw = [
        ("X-Amz-Target", "DynamoDB_20120810.Query"),
        ("content-TYPE", "  application/x-amz-json-1.0 "),
        ("Zeta", "a \t  b"),
        ("alpha", "1"),
        ("Connection", "close"),
    ];
    let ignored = ["connection", "x-amzn-trace-id"];
    let once = canonicalize_headers(raw.iter().map(|(n, v)| (*n, v.as_bytes())), &ignored);
    let twice = canonicalize_headers(once.iter().map(|h| (h.name(), h.value().as_bytes())), &ignored);
    assert_eq!(once, twice);

    let names: Vec<&str> = once.iter().map(|h| h.name()).collect();
    assert_eq!(names, vec!["alpha", "content-type", "x-amz-target", "zeta"]);
    assert_eq!(once[3].value(), "a b");

    // Latin-1 values decode to non-ASCII text; feeding that text back changes nothing.
    let raw: [(&str, &[u8]); 3] =
        [("X-Latin1", b" caf\xe9  au \xa0lait "), ("x-nel", b"a\x85b"), ("Connection", b"close")];
    let once = canonicalize_headers(raw, &ignored);
    let twice = canonicalize_text_headers(once.iter().map(|h| (h.name(), h.value())), &ignored);
    assert_eq!(once, twice);
    assert_eq!(once[0].value(), "caf\u{e9} au \u{a0}lait");
    assert_eq!(once[1].value(), "a\u{85}b");
}

#[test_log::test]
fn key_derivation_is_deterministic() {
    let a = derive_signing_key(SECRET_KEY, date(), REGION, SERVICE);
    let b = derive_signing_key(SECRET_KEY, date(), REGION, SERVICE);
    assert_eq!(a, b);
    assert_ne!(a, derive_signing_key(SECRET_KEY, date(), "us-west-2", SERVICE));
    assert_ne!(a, derive_signing_key(SECRET_KEY, date().succ_opt().unwrap(), REGION, SERVICE));
    assert_eq!(a, SigningScope::new(date(), REGION, SERVICE).derive_key(SECRET_KEY));
    assert_eq!(format!("{:?}", a), "KSigningKey");
}

#[test_log::test]
fn empty_body_digest() {
    assert_eq!(digest_body(&Bytes::new()).unwrap(), EMPTY_SHA256);
    assert_eq!(digest_body(&Vec::<u8>::new()).unwrap(), EMPTY_SHA256);
}

#[test_log::test]
fn bodyless_requests_are_untouched() {
    let mut request =
        Request::builder().method(Method::GET).uri("/").header("Host", "example.amazonaws.com").body(()).unwrap();
    let outcome = signer().sign_request_at(&mut request, timestamp()).unwrap();
    assert_eq!(outcome, SigningOutcome::Unsigned);
    assert_eq!(request.headers().len(), 1);
    assert!(request.headers().get("authorization").is_none());
}

#[test_log::test]
fn published_post_vanilla_example() {
    let config = SignerConfig::builder()
        .credentials(Credentials::new(ACCESS_KEY, SECRET_KEY))
        .region(REGION)
        .service("service")
        .build()
        .unwrap();
    let signer = SigV4Signer::new_at(config, date()).unwrap();
    let mut request = Request::builder()
        .method(Method::POST)
        .uri("/")
        .header("Host", "example.amazonaws.com")
        .body(Bytes::new())
        .unwrap();

    signer.sign_request_at(&mut request, timestamp()).unwrap();
    assert_eq!(
        request.headers().get("authorization").unwrap(),
        "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20150830/us-east-1/service/aws4_request, \
         SignedHeaders=host;x-amz-date, \
         Signature=5da7c1a2acd57cee7505fc6676e4e544621c30862966e37dddb68e92efbe5d6b"
    );
    assert_eq!(request.headers().get("x-amz-date").unwrap(), "20150830T123600Z");
}

#[test_log::test]
fn published_s3_example() {
    let headers = canonicalize_headers(
        [
            ("Host", b"examplebucket.s3.amazonaws.com".as_slice()),
            ("x-amz-content-sha256", EMPTY_SHA256.as_bytes()),
            ("x-amz-date", b"20130524T000000Z".as_slice()),
        ],
        &["connection"],
    );
    let creq = CanonicalRequest::build("GET", "/", "max-keys=2&prefix=J", headers, EMPTY_SHA256);
    assert_eq!(
        creq.to_string(),
        "GET\n/\nmax-keys=2&prefix=J\nhost:examplebucket.s3.amazonaws.com\n\
         x-amz-content-sha256:e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855\n\
         x-amz-date:20130524T000000Z\n\nhost;x-amz-content-sha256;x-amz-date\n\
         e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );

    let date = NaiveDate::from_ymd_opt(2013, 5, 24).unwrap();
    let scope = SigningScope::new(date, "us-east-1", "s3");
    let timestamp = Utc.with_ymd_and_hms(2013, 5, 24, 0, 0, 0).unwrap();
    let sts = string_to_sign(SigningAlgorithm::HmacSha256, &timestamp, &scope, &creq.sha256_hex());
    let key = derive_signing_key("wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY", date, "us-east-1", "s3");
    assert_eq!(
        hex::encode(sign(&sts, &key, SigningAlgorithm::HmacSha256)),
        "34b48302e7b5fa45bde8084f4b7868a86f0a534bc59db6670ed5711ef69dc6f7"
    );
}
