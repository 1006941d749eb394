//! Persistence port for the daily blessing state.
//!
//! The state machine only sees this trait. `FileRepository` (see `storage`)
//! backs it with files on disk; `MemoryRepository` keeps raw strings in
//! memory for tests and for sessions that must not touch disk.

use crate::{BlessingRecord, Error, Language, Result};
use std::sync::{Mutex, MutexGuard};

/// Storage for the blessing record and the language preference
pub trait BlessingRepository {
    /// Load the last blessing record
    ///
    /// Absent, unreadable and malformed records all return None.
    fn load(&self) -> Option<BlessingRecord>;

    fn save(&self, record: &BlessingRecord) -> Result<()>;

    /// Load the persisted language preference, if one is set and valid
    fn load_language(&self) -> Option<Language>;

    fn save_language(&self, language: Language) -> Result<()>;
}

impl<T: BlessingRepository + ?Sized> BlessingRepository for &T {
    fn load(&self) -> Option<BlessingRecord> {
        (**self).load()
    }

    fn save(&self, record: &BlessingRecord) -> Result<()> {
        (**self).save(record)
    }

    fn load_language(&self) -> Option<Language> {
        (**self).load_language()
    }

    fn save_language(&self, language: Language) -> Result<()> {
        (**self).save_language(language)
    }
}

#[derive(Debug, Default)]
struct MemoryInner {
    record: Option<String>,
    language: Option<String>,
    fail_writes: bool,
    record_writes: usize,
}

/// In-memory repository holding raw serialized values
#[derive(Debug, Default)]
pub struct MemoryRepository {
    inner: Mutex<MemoryInner>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the record slot with raw text (which may be corrupt)
    pub fn with_raw_record(self, raw: impl Into<String>) -> Self {
        self.lock().record = Some(raw.into());
        self
    }

    pub fn with_record(self, record: &BlessingRecord) -> Self {
        let raw = serde_json::to_string(record).unwrap_or_default();
        self.with_raw_record(raw)
    }

    /// Seed the language slot with a raw code
    pub fn with_language(self, code: impl Into<String>) -> Self {
        self.lock().language = Some(code.into());
        self
    }

    /// Make every write fail, as a full or unavailable storage would
    pub fn failing_writes(self) -> Self {
        self.lock().fail_writes = true;
        self
    }

    pub fn raw_record(&self) -> Option<String> {
        self.lock().record.clone()
    }

    pub fn raw_language(&self) -> Option<String> {
        self.lock().language.clone()
    }

    /// Number of successful record writes
    pub fn record_writes(&self) -> usize {
        self.lock().record_writes
    }

    fn lock(&self) -> MutexGuard<'_, MemoryInner> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl BlessingRepository for MemoryRepository {
    fn load(&self) -> Option<BlessingRecord> {
        let raw = self.lock().record.clone()?;
        BlessingRecord::parse(&raw)
    }

    fn save(&self, record: &BlessingRecord) -> Result<()> {
        let mut inner = self.lock();
        if inner.fail_writes {
            return Err(Error::PersistWriteFailure("storage quota exceeded".into()));
        }
        inner.record = Some(record.to_json()?);
        inner.record_writes += 1;
        Ok(())
    }

    fn load_language(&self) -> Option<Language> {
        let raw = self.lock().language.clone()?;
        Language::parse_known(&raw)
    }

    fn save_language(&self, language: Language) -> Result<()> {
        let mut inner = self.lock();
        if inner.fail_writes {
            return Err(Error::PersistWriteFailure("storage quota exceeded".into()));
        }
        inner.language = Some(language.code().to_string());
        Ok(())
    }
}
