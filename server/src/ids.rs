//! Item id generation.
//!
//! Ids are opaque short strings. Generation sits behind a trait so the store
//! can be driven with deterministic ids in tests.

use rand::{distributions::Alphanumeric, Rng};

/// Default length of generated ids.
pub const DEFAULT_ID_LENGTH: usize = 10;

/// Produces candidate item ids. The store retries on collision, so
/// implementations only need to be "sufficiently unique".
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Random alphanumeric ids of a fixed length.
#[derive(Debug, Clone)]
pub struct ShortIdGenerator {
    length: usize,
}

impl ShortIdGenerator {
    /// Ids of `length` characters, at least one.
    pub fn new(length: usize) -> Self {
        Self {
            length: length.max(1),
        }
    }
}

impl Default for ShortIdGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_ID_LENGTH)
    }
}

impl IdGenerator for ShortIdGenerator {
    fn generate(&self) -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(self.length)
            .map(char::from)
            .collect()
    }
}
