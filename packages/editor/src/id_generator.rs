use uuid::Uuid;

/// Session-scoped random seed so ids never collide with ones loaded from storage
pub fn new_session_seed() -> String {
    let uuid = Uuid::new_v4().simple().to_string();
    uuid[..8].to_string()
}

/// Sequential ID generator for component nodes
///
/// Ids look like `{prefix}-{seed}-{n}`. The counter only moves forward, so an
/// id is never handed out twice even after the node carrying it is deleted.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    prefix: String,
    seed: String,
    count: u64,
}

impl IdGenerator {
    pub fn new(prefix: &str) -> Self {
        Self::from_seed(prefix, new_session_seed())
    }

    pub fn from_seed(prefix: &str, seed: impl Into<String>) -> Self {
        Self {
            prefix: prefix.to_string(),
            seed: seed.into(),
            count: 0,
        }
    }

    /// Generate next sequential ID
    pub fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}-{}", self.prefix, self.seed, self.count)
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids() {
        let mut gen = IdGenerator::from_seed("comp", "abc");

        assert_eq!(gen.new_id(), "comp-abc-1");
        assert_eq!(gen.new_id(), "comp-abc-2");
        assert_eq!(gen.seed(), "abc");
    }

    #[test]
    fn test_sessions_get_distinct_seeds() {
        let a = IdGenerator::new("comp");
        let b = IdGenerator::new("comp");

        assert_eq!(a.seed().len(), 8);
        assert_ne!(a.seed(), b.seed());
    }
}
