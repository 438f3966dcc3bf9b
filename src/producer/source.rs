use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

pub const MIN_WORD_LEN: usize = 3;
pub const MAX_WORD_LEN: usize = 10;

/// Supplies the items of one stream. Each request owns its own source.
pub trait WordSource: Send {
    fn next_word(&mut self) -> String;
}

/// Lowercase ASCII tokens of random length in `[3, 10]`.
pub struct RandomWords {
    rng: StdRng,
}

impl RandomWords {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomWords {
    fn default() -> Self {
        Self::new()
    }
}

impl WordSource for RandomWords {
    fn next_word(&mut self) -> String {
        let len = self.rng.gen_range(MIN_WORD_LEN..=MAX_WORD_LEN);
        (0..len)
            .map(|_| self.rng.gen_range(b'a'..=b'z') as char)
            .collect()
    }
}

/// Replays a fixed word list, cycling when exhausted. Empty entries are
/// dropped; with nothing left it falls back to random words.
pub struct ScriptedWords {
    words: VecDeque<String>,
    fallback: RandomWords,
}

impl ScriptedWords {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: VecDeque<String> = words
            .into_iter()
            .map(Into::into)
            .filter(|word: &String| !word.is_empty())
            .collect();
        if words.is_empty() {
            log::warn!("Scripted word list is empty, using random words");
        }
        Self {
            words,
            fallback: RandomWords::new(),
        }
    }
}

impl WordSource for ScriptedWords {
    fn next_word(&mut self) -> String {
        match self.words.pop_front() {
            Some(word) => {
                self.words.push_back(word.clone());
                word
            }
            None => self.fallback.next_word(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_words_shape() {
        let mut source = RandomWords::seeded(7);
        for _ in 0..200 {
            let word = source.next_word();
            assert!((MIN_WORD_LEN..=MAX_WORD_LEN).contains(&word.len()), "{word}");
            assert!(word.bytes().all(|b| b.is_ascii_lowercase()), "{word}");
        }
    }

    #[test]
    fn test_seeded_is_deterministic() {
        let mut a = RandomWords::seeded(42);
        let mut b = RandomWords::seeded(42);
        for _ in 0..10 {
            assert_eq!(a.next_word(), b.next_word());
        }
    }

    #[test]
    fn test_scripted_words_cycle() {
        let mut source = ScriptedWords::new(["alpha", "beta"]);
        assert_eq!(source.next_word(), "alpha");
        assert_eq!(source.next_word(), "beta");
        assert_eq!(source.next_word(), "alpha");
    }

    #[test]
    fn test_scripted_words_never_yield_empty() {
        let mut skipping = ScriptedWords::new(["", "alpha", ""]);
        assert_eq!(skipping.next_word(), "alpha");
        assert_eq!(skipping.next_word(), "alpha");

        let mut empty = ScriptedWords::new(Vec::<String>::new());
        for _ in 0..20 {
            let word = empty.next_word();
            assert!((MIN_WORD_LEN..=MAX_WORD_LEN).contains(&word.len()), "{word}");
        }
    }
}
