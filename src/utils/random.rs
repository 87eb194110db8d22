use rand::distr::Alphanumeric;
use rand::{Rng, rng};

/// Source of randomness for zone selection and resource name suffixes
pub trait RandomSource: Send {
    /// Uniform index in `0..len`; `len` is never zero
    fn pick_index(&mut self, len: usize) -> usize;

    /// Lowercase alphanumeric suffix of `len` characters
    fn suffix(&mut self, len: usize) -> String;
}

/// Thread-local RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick_index(&mut self, len: usize) -> usize {
        rng().random_range(0..len)
    }

    fn suffix(&mut self, len: usize) -> String {
        generate_id(len)
    }
}

pub fn generate_id(len: usize) -> String {
    rng()
        .sample_iter(Alphanumeric)
        .take(len)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect()
}

/// Deterministic source that always picks the same index (clamped to the
/// slice) and returns a fixed suffix
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct FixedRandom {
    pub index: usize,
    pub suffix: String,
}

#[cfg(test)]
impl FixedRandom {
    pub fn new(index: usize, suffix: &str) -> Self {
        Self {
            index,
            suffix: suffix.to_string(),
        }
    }
}

#[cfg(test)]
impl RandomSource for FixedRandom {
    fn pick_index(&mut self, len: usize) -> usize {
        self.index.min(len - 1)
    }

    fn suffix(&mut self, _len: usize) -> String {
        self.suffix.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_random_index_in_range() {
        let mut random = ThreadRandom;
        for _ in 0..100 {
            assert!(random.pick_index(3) < 3);
        }
        assert_eq!(random.pick_index(1), 0);
    }

    #[test]
    fn test_generate_id_is_lowercase_alphanumeric() {
        let id = generate_id(16);
        assert_eq!(id.len(), 16);
        assert!(
            id.chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
        );
    }
}
