use crc32fast::Hasher;
use uuid::Uuid;

/// Source of fresh element ids.
pub trait IdSource {
    fn next_id(&mut self) -> String;
}

/// Random v4 ids, used for elements created in a live session.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Derive a stable seed from a page id using CRC32
pub fn page_seed(page_id: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(page_id.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential ids scoped to a page (deterministic, for tests and replays)
#[derive(Debug, Clone)]
pub struct SequentialIds {
    seed: String,
    count: u32,
}

impl SequentialIds {
    pub fn new(page_id: &str) -> Self {
        Self {
            seed: page_seed(page_id),
            count: 0,
        }
    }

    pub fn from_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            count: 0,
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }
}
