use crate::{Error, Generator};
use pinhole_core::validate::{MAX_SHORTCODE_LENGTH, MIN_SHORTCODE_LENGTH};
use pinhole_core::ShortCode;
use rand::Rng;

/// The 62 symbols random codes are drawn from.
pub const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub const DEFAULT_LENGTH: usize = 6;

/// Draws each character uniformly from [`ALPHABET`] using the thread-local RNG.
///
/// With the default length there are 62^6 (about 5.7e10) codes, so a
/// collision with an existing code is rare at any realistic scale.
#[derive(Debug, Clone)]
pub struct RandomGenerator {
    length: usize,
}

impl RandomGenerator {
    /// Creates a generator producing 6-character codes.
    pub fn new() -> Self {
        Self {
            length: DEFAULT_LENGTH,
        }
    }

    /// Creates a generator producing codes of `length` characters.
    pub fn with_length(length: usize) -> Result<Self, Error> {
        if !(MIN_SHORTCODE_LENGTH..=MAX_SHORTCODE_LENGTH).contains(&length) {
            return Err(Error::InvalidLength {
                length,
                min: MIN_SHORTCODE_LENGTH,
                max: MAX_SHORTCODE_LENGTH,
            });
        }
        Ok(Self { length })
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for RandomGenerator {
    fn generate(&self) -> ShortCode {
        let mut rng = rand::rng();
        let code: String = (0..self.length)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect();
        ShortCode::new_unchecked(code)
    }
}
