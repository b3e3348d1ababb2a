use rand::Rng;
use rand::rngs::ThreadRng;

/// Characters a suffix is drawn from
pub const SUFFIX_ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of every generated suffix
pub const SUFFIX_LEN: usize = 6;

/// Source of directory name suffixes.
pub trait SuffixGenerator {
    fn next_suffix(&mut self) -> String;
}

impl<G: SuffixGenerator + ?Sized> SuffixGenerator for &mut G {
    fn next_suffix(&mut self) -> String {
        (**self).next_suffix()
    }
}

impl<G: SuffixGenerator + ?Sized> SuffixGenerator for Box<G> {
    fn next_suffix(&mut self) -> String {
        (**self).next_suffix()
    }
}

/// Uniform random suffixes over [`SUFFIX_ALPHABET`], drawn with replacement.
#[derive(Debug, Clone)]
pub struct RandomSuffix<R = ThreadRng> {
    rng: R,
}

impl RandomSuffix {
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl Default for RandomSuffix {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomSuffix<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> SuffixGenerator for RandomSuffix<R> {
    fn next_suffix(&mut self) -> String {
        (0..SUFFIX_LEN)
            .map(|_| char::from(SUFFIX_ALPHABET[self.rng.random_range(0..SUFFIX_ALPHABET.len())]))
            .collect()
    }
}

/// True if `suffix` has the shape of a generated suffix
pub fn is_valid_suffix(suffix: &str) -> bool {
    suffix.len() == SUFFIX_LEN && suffix.bytes().all(|b| SUFFIX_ALPHABET.contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn suffixes_have_expected_shape() {
        let mut generator = RandomSuffix::new();
        for _ in 0..500 {
            let suffix = generator.next_suffix();
            assert!(is_valid_suffix(&suffix), "bad suffix {suffix:?}");
        }
    }

    #[test]
    fn seeded_generator_is_deterministic() {
        let mut a = RandomSuffix::with_rng(StdRng::seed_from_u64(7));
        let mut b = RandomSuffix::with_rng(StdRng::seed_from_u64(7));
        for _ in 0..10 {
            assert_eq!(a.next_suffix(), b.next_suffix());
        }
    }

    #[test]
    fn draws_cover_the_alphabet() {
        let mut generator = RandomSuffix::with_rng(StdRng::seed_from_u64(42));
        let seen: HashSet<char> = (0..2000)
            .flat_map(|_| generator.next_suffix().chars().collect::<Vec<_>>())
            .collect();
        assert_eq!(seen.len(), SUFFIX_ALPHABET.len());
    }

    #[test]
    fn suffix_validation() {
        assert!(is_valid_suffix("A1B2C3"));
        assert!(!is_valid_suffix("a1b2c3"));
        assert!(!is_valid_suffix("ABCDE"));
        assert!(!is_valid_suffix("ABCDEFG"));
        assert!(!is_valid_suffix("ABC-EF"));
    }
}
