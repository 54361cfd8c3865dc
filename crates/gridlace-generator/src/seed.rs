use std::{
    fmt::{self, Display},
    str::FromStr,
};

use gridlace_core::PuzzleRng;
use rand::SeedableRng as _;
use sha2::{Digest as _, Sha256};

/// A 32-byte seed that reproduces a generation run.
///
/// Displayed and parsed as 64 lowercase hexadecimal digits.
///
/// # Examples
///
/// ```
/// use gridlace_generator::PuzzleSeed;
///
/// let seed: PuzzleSeed = "c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1"
///     .parse()?;
/// assert_eq!(
///     seed.to_string(),
///     "c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1"
/// );
/// assert_ne!(seed.derive(0), seed.derive(1));
/// # Ok::<(), gridlace_generator::ParseSeedError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PuzzleSeed([u8; 32]);

impl PuzzleSeed {
    /// Wraps raw seed bytes.
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Draws a fresh seed from the operating system.
    ///
    /// # Errors
    ///
    /// Returns the [`getrandom::Error`] if the random source is unavailable.
    pub fn random() -> Result<Self, getrandom::Error> {
        let mut bytes = [0; 32];
        getrandom::fill(&mut bytes)?;
        Ok(Self(bytes))
    }

    /// Returns the raw seed bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Derives the seed of attempt number `attempt`.
    ///
    /// This is `SHA-256(seed || attempt)` with the attempt number as a
    /// little-endian `u64`.
    #[must_use]
    pub fn derive(&self, attempt: u64) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(self.0);
        hasher.update(attempt.to_le_bytes());
        Self(hasher.finalize().into())
    }

    /// Creates the random number generator seeded by this seed.
    #[must_use]
    pub fn rng(&self) -> PuzzleRng {
        PuzzleRng::from_seed(self.0)
    }
}

impl Display for PuzzleSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Error returned when parsing a [`PuzzleSeed`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseSeedError {
    /// The string does not hold exactly 64 characters.
    #[display("seed must be 64 hexadecimal digits, got {len} characters")]
    Length {
        /// Number of characters found.
        len: usize,
    },
    /// A character is not a hexadecimal digit.
    #[display("invalid hexadecimal digit {ch:?} in seed")]
    Digit {
        /// The offending character.
        ch: char,
    },
}

impl FromStr for PuzzleSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits: Vec<char> = s.trim().chars().collect();
        if digits.len() != 64 {
            return Err(ParseSeedError::Length { len: digits.len() });
        }
        let mut bytes = [0_u8; 32];
        for (byte, pair) in bytes.iter_mut().zip(digits.chunks_exact(2)) {
            let mut value = 0_u32;
            for &ch in pair {
                let d = ch.to_digit(16).ok_or(ParseSeedError::Digit { ch })?;
                value = value * 16 + d;
            }
            *byte = u8::try_from(value).map_err(|_| ParseSeedError::Digit { ch: pair[0] })?;
        }
        Ok(Self(bytes))
    }
}
