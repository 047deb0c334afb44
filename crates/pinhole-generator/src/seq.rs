use crate::{Error, Generator};
use pinhole_core::validate::MAX_SHORTCODE_LENGTH;
use pinhole_core::ShortCode;
use std::sync::atomic::{AtomicU64, Ordering};

const COUNTER_WIDTH: usize = 6;

/// A short code generator using a sequential counter.
///
/// This generator produces codes like "pin000000", "pin000001", etc. Codes
/// are predictable, which makes it handy for local runs and demos but a poor
/// choice for public deployments.
#[derive(Debug)]
pub struct SeqGenerator {
    counter: AtomicU64,
    prefix: String,
}

impl Clone for SeqGenerator {
    fn clone(&self) -> Self {
        Self {
            counter: AtomicU64::new(self.counter.load(Ordering::SeqCst)),
            prefix: self.prefix.clone(),
        }
    }
}

impl SeqGenerator {
    /// Creates a new sequential generator with a custom prefix.
    ///
    /// The prefix must be alphanumeric and leave room for the six counter
    /// digits within the 16-character code limit.
    pub fn with_prefix(prefix: impl Into<String>) -> Result<Self, Error> {
        Self::with_offset(prefix, 0)
    }

    /// Creates a new sequential generator starting from a specific counter value.
    pub fn with_offset(prefix: impl Into<String>, offset: u64) -> Result<Self, Error> {
        let prefix = prefix.into();
        if prefix.len() + COUNTER_WIDTH > MAX_SHORTCODE_LENGTH
            || !prefix.bytes().all(|b| b.is_ascii_alphanumeric())
        {
            return Err(Error::InvalidPrefix(prefix));
        }
        Ok(Self {
            counter: AtomicU64::new(offset),
            prefix,
        })
    }
}

impl Generator for SeqGenerator {
    fn generate(&self) -> ShortCode {
        let count = self.counter.fetch_add(1, Ordering::SeqCst);
        // past 999999 the counter widens; wrap to stay inside the length limit
        let limit = 10_u64.pow((MAX_SHORTCODE_LENGTH - self.prefix.len()) as u32);
        let code = format!(
            "{}{:0width$}",
            self.prefix,
            count % limit,
            width = COUNTER_WIDTH
        );
        ShortCode::new_unchecked(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_sequential_codes() {
        let generator = SeqGenerator::with_prefix("pin").unwrap();

        assert_eq!(generator.generate().as_str(), "pin000000");
        assert_eq!(generator.generate().as_str(), "pin000001");
        assert_eq!(generator.generate().as_str(), "pin000002");
    }

    #[test]
    fn with_offset() {
        let generator = SeqGenerator::with_offset("pin", 1000).unwrap();

        assert_eq!(generator.generate().as_str(), "pin001000");
        assert_eq!(generator.generate().as_str(), "pin001001");
    }

    #[test]
    fn empty_prefix_is_allowed() {
        let generator = SeqGenerator::with_prefix("").unwrap();
        assert_eq!(generator.generate().as_str(), "000000");
    }

    #[test]
    fn rejects_invalid_prefix() {
        assert!(SeqGenerator::with_prefix("node-a").is_err());
        assert!(SeqGenerator::with_prefix("abcdefghijk").is_err());
        assert!(SeqGenerator::with_prefix("abcdefghij").is_ok());
    }

    #[test]
    fn codes_stay_within_length_limit() {
        let generator = SeqGenerator::with_offset("abcdefghij", 999_999).unwrap();

        let last = generator.generate();
        let wrapped = generator.generate();
        assert_eq!(last.as_str(), "abcdefghij999999");
        assert_eq!(wrapped.as_str(), "abcdefghij000000");
        assert!(ShortCode::new(wrapped.as_str()).is_ok());
    }

    #[test]
    fn generated_codes_pass_validation() {
        let generator = SeqGenerator::with_offset("pin", 123_456_789).unwrap();
        let code = generator.generate();
        assert!(ShortCode::new(code.as_str()).is_ok());
    }

    #[test]
    fn generator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SeqGenerator>();
    }

    #[test]
    fn clone_preserves_counter_state() {
        let generator = SeqGenerator::with_prefix("pin").unwrap();
        generator.generate();
        generator.generate();

        let cloned = generator.clone();

        assert_eq!(generator.generate().as_str(), "pin000002");
        assert_eq!(cloned.generate().as_str(), "pin000002");
    }
}
