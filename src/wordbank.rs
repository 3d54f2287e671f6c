use crate::debug_log;
use crate::error::GameError;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use std::collections::BTreeMap;

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/wordbank.txt");

/// Word lists keyed by word length.
pub type WordTable = BTreeMap<usize, Vec<String>>;

/// Parse a newline-delimited word list into a table keyed by length.
///
/// Words are trimmed and lowercased; lines containing anything other than
/// ASCII letters are skipped, as are duplicates.
pub fn load_wordbank_from_str(data: &str) -> WordTable {
    table_from_words(data.lines())
}

fn table_from_words<I, S>(words: I) -> WordTable
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut table = WordTable::new();
    for word in words {
        let word = word.as_ref().trim().to_lowercase();
        if word.is_empty() || !word.chars().all(|c| c.is_ascii_alphabetic()) {
            continue;
        }
        let bucket = table.entry(word.len()).or_default();
        if !bucket.contains(&word) {
            bucket.push(word);
        }
    }
    table
}

/// Pool of target words, drawn without replacement.
///
/// The full table is kept alongside the remaining pool so a new session can
/// start from scratch with [`WordBank::reset`].
#[derive(Debug, Clone)]
pub struct WordBank<R = Pcg32> {
    table: WordTable,
    remaining: WordTable,
    rng: R,
}

impl WordBank<Pcg32> {
    /// Embedded word list with a seeded generator.
    #[must_use]
    pub fn embedded(seed: u64) -> Self {
        Self::with_rng(
            load_wordbank_from_str(EMBEDDED_WORDBANK),
            Pcg32::seed_from_u64(seed),
        )
    }

    #[must_use]
    pub fn seeded(table: WordTable, seed: u64) -> Self {
        Self::with_rng(table, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> WordBank<R> {
    #[must_use]
    pub fn with_rng(table: WordTable, rng: R) -> Self {
        Self {
            remaining: table.clone(),
            table,
            rng,
        }
    }

    pub fn from_words<I, S>(words: I, rng: R) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_rng(table_from_words(words), rng)
    }

    /// Remove and return a uniformly chosen word of `length` letters.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::WordBankExhausted`] when no word of that length
    /// remains in the pool.
    pub fn draw(&mut self, length: usize) -> Result<String, GameError> {
        let pool = self
            .remaining
            .get_mut(&length)
            .filter(|pool| !pool.is_empty())
            .ok_or(GameError::WordBankExhausted { length })?;
        let index = self.rng.random_range(0..pool.len());
        let word = pool.remove(index);
        debug_log!(
            "Drew '{}' ({} {}-letter words left)",
            word,
            pool.len(),
            length
        );
        Ok(word)
    }

    /// Number of words of `length` letters still available.
    pub fn remaining(&self, length: usize) -> usize {
        self.remaining.get(&length).map_or(0, Vec::len)
    }

    /// Word lengths present in the full table.
    pub fn lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.table.keys().copied()
    }

    /// Restore every drawn word.
    pub fn reset(&mut self) {
        self.remaining.clone_from(&self.table);
    }
}
