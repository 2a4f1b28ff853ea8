//! # Cave Seeds
//!
//! Every random draw during generation derives from one 64-bit seed.
//!
//! ## Determinism Guarantee
//!
//! Text seeds are hashed with 64-bit FNV-1a, so the same string yields the
//! same cave on any platform, any time. The RNG itself is ChaCha8, which is
//! portable and stable across `rand_chacha` releases.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// FNV-1a 64-bit offset basis.
const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;

/// FNV-1a 64-bit prime.
const FNV_PRIME: u64 = 0x0100_0000_01b3;

/// Seed for deterministic cave generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaveSeed(u64);

impl CaveSeed {
    /// Creates a new cave seed.
    #[inline]
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Hashes a text seed into a numeric one.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let hash = text.bytes().fold(FNV_OFFSET, |hash, byte| {
            (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
        });
        Self(hash)
    }

    /// Seeds from the system clock. Not reproducible unless the returned
    /// value is recorded.
    #[must_use]
    pub fn from_clock() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos() as u64);
        Self(nanos).derive(0x5EED)
    }

    /// Returns the raw seed value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Derives a sub-seed for a specific purpose (e.g., a retry attempt).
    ///
    /// Uses a hash function to create independent streams from one seed.
    #[inline]
    #[must_use]
    pub const fn derive(self, purpose: u64) -> Self {
        let mut hash = self.0;
        hash ^= purpose;
        hash = hash.wrapping_mul(0x517c_c1b7_2722_0a95);
        hash ^= hash >> 32;
        Self(hash)
    }

    /// Creates the generator RNG for this seed.
    #[must_use]
    pub fn rng(self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.0)
    }
}

impl Default for CaveSeed {
    fn default() -> Self {
        Self::from_text(cavern_shared::constants::DEFAULT_SEED_TEXT)
    }
}

impl std::fmt::Display for CaveSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

/// Where a seed comes from, as written in a config file.
///
/// In TOML, `seed = 42` is a number and `seed = "hello world"` is text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeedSource {
    /// A numeric seed, used as-is.
    Number(u64),
    /// A text seed, hashed with FNV-1a.
    Text(String),
}

impl SeedSource {
    /// Resolves to a numeric seed.
    #[must_use]
    pub fn resolve(&self) -> CaveSeed {
        match self {
            Self::Number(value) => CaveSeed::new(*value),
            Self::Text(text) => CaveSeed::from_text(text),
        }
    }
}

impl Default for SeedSource {
    fn default() -> Self {
        Self::Text(cavern_shared::constants::DEFAULT_SEED_TEXT.to_string())
    }
}

impl From<u64> for SeedSource {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for SeedSource {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}
