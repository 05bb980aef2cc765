//! End-to-end properties of the signed URL codec through the public API.

use pretty_assertions::assert_eq;
use sealink::{HashAlgorithm, SignatureError, SignerOptions, UrlSigner};

fn signer() -> UrlSigner {
    UrlSigner::with_secret("integration-secret").unwrap()
}

#[test]
fn test_roundtrip_immediately_after_signing() {
    let signer = signer();
    for url in [
        "https://example.com/x",
        "https://example.com/path/deep?existing=1",
        "/relative/path",
        "https://example.com/?a=1&b=2",
    ] {
        for ttl in [None, Some(0), Some(1), Some(3600)] {
            let signed = signer.sign(url, ttl).unwrap();
            assert_eq!(
                signer.verify(&signed),
                Ok(()),
                "roundtrip failed for {url} with ttl {ttl:?}"
            );
        }
    }
}

#[test]
fn test_tamper_sensitivity_every_position() {
    let signer = signer();
    let signed = signer.sign("https://example.com/x?a=1", Some(3600)).unwrap();
    let digest_start = signed.rfind('-').unwrap();

    // Flip each character before the digest suffix; every single-character
    // alteration must fail as invalid.
    for i in 0..digest_start {
        let mut bytes = signed.clone().into_bytes();
        bytes[i] = if bytes[i] == b'x' { b'y' } else { b'x' };
        let tampered = String::from_utf8(bytes).unwrap();
        assert_eq!(
            signer.verify(&tampered),
            Err(SignatureError::InvalidSignature),
            "flip at byte {i} was not detected"
        );
    }
}

#[test]
fn test_tampered_digest_fails_invalid() {
    let signer = signer();
    let signed = signer.sign("https://example.com/x", Some(3600)).unwrap();
    let mut bytes = signed.into_bytes();
    let last = bytes.len() - 1;
    bytes[last] = if bytes[last] == b'0' { b'1' } else { b'0' };
    let tampered = String::from_utf8(bytes).unwrap();
    assert_eq!(
        signer.verify(&tampered),
        Err(SignatureError::InvalidSignature)
    );
}

#[test]
fn test_expiry_enforced() {
    let signer = signer();
    let now = 1_700_000_000_000;
    let signed = signer
        .sign_at("https://example.com/x", Some(1), now)
        .unwrap();

    // Valid within the window, expired once the clock passes it.
    assert_eq!(signer.verify_at(&signed, now), Ok(()));
    assert_eq!(signer.verify_at(&signed, now + 999), Ok(()));
    assert_eq!(
        signer.verify_at(&signed, now + 1_001),
        Err(SignatureError::ExpiredSignature)
    );
}

#[test]
fn test_no_ttl_valid_arbitrarily_far_in_future() {
    let signer = signer();
    let now = 1_700_000_000_000;
    let signed = signer.sign_at("https://example.com/x", Some(0), now).unwrap();

    let ten_years = 10 * 365 * 24 * 3600 * 1000;
    assert_eq!(signer.verify_at(&signed, now + ten_years), Ok(()));
}

#[test]
fn test_signing_twice_produces_distinct_urls_that_both_verify() {
    let signer = signer();
    let now = 1_700_000_000_000;
    let a = signer
        .sign_at("https://example.com/x", Some(3600), now)
        .unwrap();
    let b = signer
        .sign_at("https://example.com/x", Some(3600), now)
        .unwrap();

    assert_ne!(a, b, "nonce must differentiate identical signings");
    assert_eq!(signer.verify_at(&a, now), Ok(()));
    assert_eq!(signer.verify_at(&b, now), Ok(()));
}

#[test]
fn test_verify_rejects_arbitrary_strings() {
    let signer = signer();
    for garbage in [
        "",
        "https://example.com/x",
        "https://example.com/x?signed=exp_123-rndNumber_abc",
        "just some text",
        "-deadbeef",
    ] {
        assert_eq!(
            signer.verify(garbage),
            Err(SignatureError::InvalidSignature),
            "accepted garbage input {garbage:?}"
        );
    }
}

#[test]
fn test_verify_and_strip_recovers_original_url() {
    let signer = signer();
    let url = "https://example.com/download?file=report.pdf";
    let signed = signer.sign(url, Some(3600)).unwrap();
    assert_eq!(signer.verify_and_strip(&signed).unwrap(), url);
}

#[test]
fn test_default_ttl_from_options() {
    let now = 1_700_000_000_000;
    let signer = UrlSigner::new(&SignerOptions::new("k").with_ttl(60)).unwrap();
    let signed = signer.sign_at("https://example.com/x", None, now).unwrap();

    assert_eq!(signer.verify_at(&signed, now + 59_000), Ok(()));
    assert_eq!(
        signer.verify_at(&signed, now + 61_000),
        Err(SignatureError::ExpiredSignature)
    );
}

#[test]
fn test_algorithms_are_not_interchangeable() {
    let sha1 = UrlSigner::new(
        &SignerOptions::new("k").with_algorithm(HashAlgorithm::Sha1),
    )
    .unwrap();
    let sha256 = UrlSigner::new(
        &SignerOptions::new("k").with_algorithm(HashAlgorithm::Sha256),
    )
    .unwrap();

    let signed = sha1.sign("https://example.com/x", None).unwrap();
    assert_eq!(sha1.verify(&signed), Ok(()));
    assert_eq!(
        sha256.verify(&signed),
        Err(SignatureError::InvalidSignature)
    );
}

#[test]
fn test_signers_with_same_options_interoperate() {
    // Stateless by design: any instance with the same secret verifies
    // URLs signed by another.
    let a = signer();
    let b = signer();
    let signed = a.sign("https://example.com/x", Some(3600)).unwrap();
    assert_eq!(b.verify(&signed), Ok(()));
}
