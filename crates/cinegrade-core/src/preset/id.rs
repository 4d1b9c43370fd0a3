//! Preset identifiers.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Length of generated identifiers.
pub const ID_LEN: usize = 13;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Supplies the per-document identifier written to `crs:UUID`.
pub trait IdSource {
    fn next_id(&mut self) -> String;
}

/// Random 13-character lowercase base-36 identifiers.
#[derive(Debug, Clone)]
pub struct RandomId {
    rng: StdRng,
}

impl RandomId {
    /// Reproducible sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomId {
    fn default() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl IdSource for RandomId {
    fn next_id(&mut self) -> String {
        (0..ID_LEN)
            .map(|_| ALPHABET[self.rng.gen_range(0..ALPHABET.len())] as char)
            .collect()
    }
}

/// Always returns the same identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedId(pub String);

impl FixedId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl IdSource for FixedId {
    fn next_id(&mut self) -> String {
        self.0.clone()
    }
}

impl<T: IdSource + ?Sized> IdSource for &mut T {
    fn next_id(&mut self) -> String {
        (**self).next_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_ids_are_base36() {
        let mut ids = RandomId::default();
        for _ in 0..50 {
            let id = ids.next_id();
            assert_eq!(id.len(), ID_LEN);
            assert!(
                id.bytes().all(|b| b.is_ascii_digit() || b.is_ascii_lowercase()),
                "{id}"
            );
        }
    }

    #[test]
    fn test_seeded_ids_repeat() {
        let a: Vec<_> = {
            let mut ids = RandomId::seeded(7);
            (0..3).map(|_| ids.next_id()).collect()
        };
        let mut ids = RandomId::seeded(7);
        let b: Vec<_> = (0..3).map(|_| ids.next_id()).collect();
        assert_eq!(a, b);
        assert_ne!(a[0], a[1]);
    }

    #[test]
    fn test_fixed_id() {
        let mut ids = FixedId::new("abc");
        assert_eq!(ids.next_id(), "abc");
        assert_eq!(ids.next_id(), "abc");
    }
}
