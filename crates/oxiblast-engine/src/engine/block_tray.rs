use std::{array, fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Block, ParseSeedError};

/// Seed for deterministic block generation.
///
/// This is a 128-bit (16-byte) seed used to initialize the random number
/// generator behind the tray. Using the same seed produces the same sequence
/// of blocks, enabling:
///
/// - Reproducible gameplay for debugging
/// - Deterministic testing
/// - Repeatable headless simulations
///
/// # Example
///
/// ```
/// use oxiblast_engine::{BlockTray, TraySeed};
/// use rand::Rng as _;
///
/// // Generate a random seed
/// let seed: TraySeed = rand::rng().random();
///
/// // Two trays with the same seed offer the same blocks
/// let tray1 = BlockTray::with_seed(seed);
/// let tray2 = BlockTray::with_seed(seed);
/// assert_eq!(tray1.blocks(), tray2.blocks());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TraySeed([u8; 16]);

impl TraySeed {
    /// Returns the raw seed bytes.
    #[must_use]
    pub const fn as_bytes(self) -> [u8; 16] {
        self.0
    }

    fn from_hex(hex_str: &str) -> Result<Self, ParseSeedError> {
        if hex_str.len() != 32 {
            return Err(ParseSeedError {
                reason: format!("expected 32 hex characters, got {}", hex_str.len()),
            });
        }
        let num = u128::from_str_radix(hex_str, 16).map_err(|e| ParseSeedError {
            reason: format!("{hex_str} ({e})"),
        })?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl FromStr for TraySeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

/// Formats the seed as the same 32-character hex string the serde
/// representation uses.
impl fmt::Display for TraySeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let num = u128::from_be_bytes(self.0);
        write!(f, "{num:032x}")
    }
}

impl Serialize for TraySeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TraySeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        Self::from_hex(&hex_str).map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `TraySeed` values using the standard random distribution.
///
/// This implementation enables idiomatic seed generation with `rng.random()`.
impl Distribution<TraySeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> TraySeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        TraySeed(seed)
    }
}

/// The tray of blocks currently offered to the player.
///
/// Holds exactly [`BlockTray::SLOTS`] blocks at all times. Each block's shape
/// and color are sampled uniformly and independently. Consuming a slot
/// replaces that slot only; the other offered blocks are untouched.
#[derive(Debug, Clone)]
pub struct BlockTray {
    rng: Pcg32,
    slots: [Block; Self::SLOTS],
}

impl Default for BlockTray {
    fn default() -> Self {
        Self::new()
    }
}

fn random_block(rng: &mut Pcg32) -> Block {
    Block::new(rng.random(), rng.random())
}

impl BlockTray {
    /// Number of blocks offered at a time (3).
    pub const SLOTS: usize = 3;

    /// Creates a tray with a random seed.
    ///
    /// All slots are populated immediately. For deterministic block
    /// generation, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic block
    /// generation.
    #[must_use]
    pub fn with_seed(seed: TraySeed) -> Self {
        let mut rng = Pcg32::from_seed(seed.as_bytes());
        let slots = array::from_fn(|_| random_block(&mut rng));
        Self { rng, slots }
    }

    /// Returns the offered blocks in slot order.
    #[must_use]
    pub const fn blocks(&self) -> &[Block; Self::SLOTS] {
        &self.slots
    }

    /// Returns the block in the given slot, or `None` if the index does not
    /// reference one of the offered blocks.
    #[must_use]
    pub fn block(&self, slot: usize) -> Option<Block> {
        self.slots.get(slot).copied()
    }

    /// Replaces the block in the given slot with a freshly generated one.
    ///
    /// # Panics
    ///
    /// Panics if `slot >= Self::SLOTS`.
    pub fn replace(&mut self, slot: usize) {
        self.slots[slot] = random_block(&mut self.rng);
    }

    #[cfg(test)]
    pub(crate) fn set_blocks(&mut self, blocks: [Block; Self::SLOTS]) {
        self.slots = blocks;
    }
}
