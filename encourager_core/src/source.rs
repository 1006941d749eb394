//! Where the client gets verses from.
//!
//! The client normally asks the HTTP service; `LocalSource` answers the same
//! requests in-process from a catalog, for offline use.

use crate::{Language, RandomSource, Result, VerseLookup, VersePayload, VerseStore};
use async_trait::async_trait;

/// Asynchronous verse provider used by the client driver
#[async_trait]
pub trait VerseSource: Send + Sync {
    /// Random verse when `index` is None, clamped index pick otherwise
    async fn fetch(&self, language: Language, index: Option<i64>) -> Result<VersePayload>;
}

/// Verse source answering from an in-process lookup
pub struct LocalSource<S, R> {
    lookup: VerseLookup<S, R>,
}

impl<S: VerseStore, R: RandomSource> LocalSource<S, R> {
    pub fn new(lookup: VerseLookup<S, R>) -> Self {
        Self { lookup }
    }
}

#[async_trait]
impl<S: VerseStore, R: RandomSource> VerseSource for LocalSource<S, R> {
    async fn fetch(&self, language: Language, index: Option<i64>) -> Result<VersePayload> {
        self.lookup.pick(language, index)
    }
}
