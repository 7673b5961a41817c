//! Integration tests for the credential hasher.

#![cfg(feature = "hasher")]

use std::time::{Duration, Instant};

use piilog::{CredentialHasher, Digest, SaltedHasher, DEFAULT_COST};

fn hasher() -> Box<dyn CredentialHasher> {
    Box::new(SaltedHasher::with_cost(4).unwrap())
}

#[test]
fn independent_hashes_of_same_secret_both_verify() {
    let hasher = hasher();
    let first = hasher.hash("p@ss").unwrap();
    let second = hasher.hash("p@ss").unwrap();

    assert_ne!(first.as_bytes(), second.as_bytes());
    assert!(hasher.verify(first.as_bytes(), "p@ss"));
    assert!(hasher.verify(second.as_bytes(), "p@ss"));
}

#[test]
fn verify_is_false_for_other_secrets() {
    let hasher = hasher();
    let digest = hasher.hash("p@ss").unwrap();
    assert!(!hasher.verify(digest.as_bytes(), "P@ss"));
    assert!(!hasher.verify(digest.as_bytes(), ""));
}

#[test]
fn verify_is_false_for_tampered_digest() {
    let hasher = hasher();
    let mut bytes = hasher.hash("p@ss").unwrap().into_bytes();
    let last = bytes.len() - 1;
    bytes[last] = if bytes[last] == b'0' { b'1' } else { b'0' };
    assert!(!hasher.verify(&bytes, "p@ss"));

    let truncated = &bytes[..bytes.len() - 2];
    assert!(!hasher.verify(truncated, "p@ss"));
}

#[test]
fn verify_is_false_for_foreign_digests() {
    let hasher = hasher();
    let bcrypt_style = Digest::from(
        b"$2b$12$R9h/cIPz0gi.URNNX3kh2OPST9/PgBkqquzi.Ss7KIUgO2t0jWMUW".to_vec(),
    );
    assert!(!hasher.verify(bcrypt_style.as_ref(), "p@ss"));
}

#[test]
fn crafted_high_cost_digest_returns_quickly() {
    let hasher = hasher();
    let crafted = format!("$hs256$31${}${}", "ab".repeat(16), "cd".repeat(32));

    let started = Instant::now();
    assert!(!hasher.verify(crafted.as_bytes(), "p@ss"));
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[test]
fn empty_secret_round_trips() {
    let hasher = hasher();
    let digest = hasher.hash("").unwrap();
    assert!(hasher.verify(digest.as_bytes(), ""));
}

#[test]
fn default_cost_is_used_by_default() {
    assert_eq!(SaltedHasher::default().cost(), DEFAULT_COST);
}
