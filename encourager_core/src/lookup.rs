//! Verse lookup policy: random selection and index clamping.

use crate::{Error, Language, Result, VersePayload, VerseStore};
use rand::Rng;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Source of uniformly random indices
pub trait RandomSource: Send + Sync {
    /// Return an index in `[0, len)`. `len` is never zero.
    fn index_below(&self, len: usize) -> usize;
}

impl<T: RandomSource + ?Sized> RandomSource for Box<T> {
    fn index_below(&self, len: usize) -> usize {
        (**self).index_below(len)
    }
}

/// Process-wide random source backed by the thread-local RNG
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn index_below(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Deterministic random source replaying a fixed script of indices
///
/// Each value is reduced modulo `len`; once the script runs out, 0 is returned.
#[derive(Debug, Default)]
pub struct SequenceRandom {
    values: Mutex<VecDeque<usize>>,
}

impl SequenceRandom {
    pub fn new(values: impl IntoIterator<Item = usize>) -> Self {
        Self {
            values: Mutex::new(values.into_iter().collect()),
        }
    }
}

impl RandomSource for SequenceRandom {
    fn index_below(&self, len: usize) -> usize {
        let next = match self.values.lock() {
            Ok(mut values) => values.pop_front().unwrap_or(0),
            Err(poisoned) => poisoned.into_inner().pop_front().unwrap_or(0),
        };
        next % len
    }
}

/// Looks verses up in a store by language, randomly or by index
pub struct VerseLookup<S, R = ThreadRandom> {
    store: S,
    random: R,
}

impl<S: VerseStore> VerseLookup<S, ThreadRandom> {
    /// Lookup over `store` using the thread RNG
    pub fn with_thread_rng(store: S) -> Self {
        Self::new(store, ThreadRandom)
    }
}

impl<S: VerseStore, R: RandomSource> VerseLookup<S, R> {
    pub fn new(store: S, random: R) -> Self {
        Self { store, random }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Pick a uniformly random verse for `language`
    pub fn pick_random(&self, language: Language) -> Result<VersePayload> {
        let verses = self.store.list(language);
        if verses.is_empty() {
            return Err(Error::EmptyCatalog(language));
        }

        let index = self.random.index_below(verses.len()).min(verses.len() - 1);
        tracing::debug!("Random pick for {}: index {}", language, index);
        Ok(verses[index].clone().with_index(index as i64))
    }

    /// Pick the verse at `index`, clamped into `[0, len - 1]`
    ///
    /// Out-of-range and negative indices are clamped, never rejected. The
    /// returned payload carries the clamped index.
    pub fn pick_by_index(&self, language: Language, index: i64) -> Result<VersePayload> {
        let verses = self.store.list(language);
        if verses.is_empty() {
            return Err(Error::EmptyCatalog(language));
        }

        let last = verses.len() as i64 - 1;
        let safe_index = index.clamp(0, last);
        if safe_index != index {
            tracing::debug!(
                "Clamped index {} to {} for {} ({} verses)",
                index,
                safe_index,
                language,
                verses.len()
            );
        }

        Ok(verses[safe_index as usize].clone().with_index(safe_index))
    }

    /// Random pick when `index` is None, clamped index pick otherwise
    pub fn pick(&self, language: Language, index: Option<i64>) -> Result<VersePayload> {
        match index {
            Some(index) => self.pick_by_index(language, index),
            None => self.pick_random(language),
        }
    }
}
