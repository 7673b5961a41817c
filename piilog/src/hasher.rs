//! Salted, iterated password hashing.
//!
//! The formatter never hashes anything. This module exists for the code that
//! stores credentials next to the records being logged, behind the
//! [`CredentialHasher`] seam so the algorithm can be swapped.
//!
//! [`SaltedHasher`] computes `2^cost` rounds of HMAC-SHA256 keyed by a fresh
//! random salt and encodes the result as
//!
//! ```text
//! $hs256$<cost>$<salt hex>$<hash hex>
//! ```
//!
//! A hasher only verifies digests whose cost is at most its own.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::HashError;

type HmacSha256 = Hmac<Sha256>;

const SCHEME: &str = "hs256";
const SALT_LEN: usize = 16;
const HASH_LEN: usize = 32;
const MIN_COST: u32 = 4;
const MAX_COST: u32 = 31;

/// Cost used by [`SaltedHasher::default`]: 4096 rounds.
pub const DEFAULT_COST: u32 = 12;

/// Opaque output of [`CredentialHasher::hash`].
#[derive(Clone, PartialEq, Eq)]
pub struct Digest(Vec<u8>);

impl Digest {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl From<Vec<u8>> for Digest {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Digest(..)")
    }
}

/// One-way, randomized hashing of secrets.
///
/// Two calls to `hash` with the same secret are expected to return different
/// digests. `verify` must return `false` rather than fail for a digest it
/// cannot parse.
pub trait CredentialHasher {
    fn hash(&self, secret: &str) -> Result<Digest, HashError>;

    fn verify(&self, digest: &[u8], secret: &str) -> bool;
}

/// Iterated HMAC-SHA256 with a per-digest random salt.
#[derive(Clone, Copy, Debug)]
pub struct SaltedHasher {
    cost: u32,
}

impl SaltedHasher {
    /// Uses `2^cost` rounds; `cost` must be within `4..=31`.
    pub fn with_cost(cost: u32) -> Result<Self, HashError> {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(HashError::InvalidCost(cost));
        }
        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for SaltedHasher {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}

impl CredentialHasher for SaltedHasher {
    fn hash(&self, secret: &str) -> Result<Digest, HashError> {
        let mut salt = [0u8; SALT_LEN];
        getrandom::getrandom(&mut salt).map_err(HashError::Entropy)?;
        let hash = stretch(self.cost, &salt, secret.as_bytes());
        let encoded = format!(
            "${SCHEME}${}${}${}",
            self.cost,
            hex::encode(salt),
            hex::encode(hash)
        );
        Ok(Digest(encoded.into_bytes()))
    }

    /// Digests whose recorded cost exceeds this hasher's cost are rejected
    /// without hashing, so a crafted digest cannot make `verify` run longer
    /// than `hash` does.
    fn verify(&self, digest: &[u8], secret: &str) -> bool {
        let Some(parsed) = ParsedDigest::parse(digest) else {
            return false;
        };
        if parsed.cost > self.cost {
            return false;
        }
        let expected = stretch_mac(parsed.cost, &parsed.salt, secret.as_bytes());
        // Constant-time comparison.
        expected.verify_slice(&parsed.hash).is_ok()
    }
}

struct ParsedDigest {
    cost: u32,
    salt: Vec<u8>,
    hash: Vec<u8>,
}

impl ParsedDigest {
    fn parse(digest: &[u8]) -> Option<Self> {
        let text = std::str::from_utf8(digest).ok()?;
        let mut parts = text.strip_prefix('$')?.split('$');
        if parts.next()? != SCHEME {
            return None;
        }
        let cost: u32 = parts.next()?.parse().ok()?;
        let salt = hex::decode(parts.next()?).ok()?;
        let hash = hex::decode(parts.next()?).ok()?;
        if parts.next().is_some()
            || !(MIN_COST..=MAX_COST).contains(&cost)
            || salt.len() != SALT_LEN
            || hash.len() != HASH_LEN
        {
            return None;
        }
        Some(Self { cost, salt, hash })
    }
}

fn stretch(cost: u32, salt: &[u8], secret: &[u8]) -> Vec<u8> {
    stretch_mac(cost, salt, secret)
        .finalize()
        .into_bytes()
        .to_vec()
}

/// Runs all rounds but the last and returns the MAC primed for the final one.
fn stretch_mac(cost: u32, salt: &[u8], secret: &[u8]) -> HmacSha256 {
    let rounds = 1u64 << cost;
    let mut block = new_mac(salt);
    block.update(secret);
    for _ in 1..rounds {
        let previous = block.finalize().into_bytes();
        block = new_mac(salt);
        block.update(&previous);
        block.update(secret);
    }
    block
}

fn new_mac(key: &[u8]) -> HmacSha256 {
    <HmacSha256 as Mac>::new_from_slice(key).expect("HMAC can take key of any size")
}
