use crc32fast::Hasher;
use std::fmt;

/// Editor-internal identifier attached to every block
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(String);

impl BlockId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generate a document seed from the editor's document key using CRC32
pub fn get_document_seed(document_key: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(document_key.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential block id generator for one editing session
#[derive(Debug, Clone, PartialEq)]
pub struct IdGenerator {
    seed: String, // Document seed (CRC32)
    count: u32,   // Sequential counter
}

impl IdGenerator {
    pub fn new(document_key: &str) -> Self {
        Self {
            seed: get_document_seed(document_key),
            count: 0,
        }
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    /// Generate next sequential ID
    pub fn new_id(&mut self) -> BlockId {
        self.count += 1;
        BlockId(format!("{}-{}", self.seed, self.count))
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Number of ids handed out so far
    pub fn issued(&self) -> u32 {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_seed_generation() {
        let seed1 = get_document_seed("landing");
        let seed2 = get_document_seed("landing");
        assert_eq!(seed1, seed2);

        let seed3 = get_document_seed("pricing");
        assert_ne!(seed1, seed3);
    }

    #[test]
    fn test_sequential_ids() {
        let mut ids = IdGenerator::from_seed("abc".to_string());

        assert_eq!(ids.new_id().as_str(), "abc-1");
        assert_eq!(ids.new_id().as_str(), "abc-2");
        assert_eq!(ids.issued(), 2);
    }

    #[test]
    fn test_cloned_generator_continues_sequence() {
        let mut ids = IdGenerator::new("landing");
        ids.new_id();

        let mut fork = ids.clone();
        assert_eq!(ids.new_id(), fork.new_id());
    }
}
