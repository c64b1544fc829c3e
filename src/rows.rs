use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Key of the row written for `index`.
pub fn row_key(index: usize) -> String {
    index.to_string()
}

/// Source of random cell values.
#[derive(Debug)]
pub struct PayloadGenerator {
    rng: StdRng,
}

impl PayloadGenerator {
    /// Seeded generators produce the same sequence of values on every run.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    pub fn value(&mut self, len: usize) -> Vec<u8> {
        let mut buf = vec![0u8; len];
        self.rng.fill_bytes(&mut buf);
        buf
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn row_keys_are_distinct() {
        let keys: HashSet<String> = (0..10_000).map(row_key).collect();
        assert_eq!(keys.len(), 10_000);
        assert_eq!(row_key(0), "0");
        assert_eq!(row_key(1234), "1234");
    }

    #[test]
    fn values_have_requested_length() {
        let mut payloads = PayloadGenerator::new(None);
        for len in [0, 1, 32, 1024, 1 << 20] {
            assert_eq!(payloads.value(len).len(), len);
        }
    }

    #[test]
    fn seeded_generators_repeat() {
        let mut a = PayloadGenerator::new(Some(7));
        let mut b = PayloadGenerator::new(Some(7));
        assert_eq!(a.value(64), b.value(64));
        assert_ne!(a.value(64), PayloadGenerator::new(Some(8)).value(64));
    }
}
