pub mod random;
pub mod seq;

pub use random::{RandomGenerator, ALPHABET};
pub use seq::SeqGenerator;

use pinhole_core::ShortCode;
use thiserror::Error;

/// Trait for generating short codes.
///
/// Implementations are pure generators that don't interact with storage.
/// Uniqueness is not guaranteed; the registry probes for collisions and
/// asks for another code when one is taken.
pub trait Generator: Send + Sync + 'static {
    /// Generates a syntactically valid short code.
    fn generate(&self) -> ShortCode;
}

/// Errors raised when configuring a generator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    #[error("invalid code length {length}; expected {min}..={max}")]
    InvalidLength { length: usize, min: usize, max: usize },
    #[error("invalid prefix '{0}'; expected only alphanumeric characters")]
    InvalidPrefix(String),
}
