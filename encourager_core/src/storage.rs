//! File-backed blessing repository with file locking.
//!
//! The data directory holds one file per key:
//! - `last_blessing_data.json` - the last accepted blessing record
//! - `lang` - the language preference code

use crate::{BlessingRecord, BlessingRepository, Error, Language, Result};
use fs2::FileExt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const RECORD_FILE: &str = "last_blessing_data.json";
pub const LANGUAGE_FILE: &str = "lang";

/// Repository storing each key as a file in a data directory
#[derive(Clone, Debug)]
pub struct FileRepository {
    dir: PathBuf,
}

impl FileRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn record_path(&self) -> PathBuf {
        self.dir.join(RECORD_FILE)
    }

    pub fn language_path(&self) -> PathBuf {
        self.dir.join(LANGUAGE_FILE)
    }
}

/// Read a file under a shared lock
///
/// Returns None if the file doesn't exist or can't be read; failures are
/// logged and otherwise ignored.
fn read_locked(path: &Path) -> Option<String> {
    if !path.exists() {
        tracing::debug!("No file at {:?}", path);
        return None;
    }

    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            tracing::warn!("Unable to open {:?}: {}. Ignoring.", path, e);
            return None;
        }
    };

    if let Err(e) = file.lock_shared() {
        tracing::warn!("Unable to lock {:?}: {}. Ignoring.", path, e);
        return None;
    }

    let mut contents = String::new();
    let mut reader = std::io::BufReader::new(&file);
    let read = reader.read_to_string(&mut contents);
    let _ = file.unlock();

    match read {
        Ok(_) => Some(contents),
        Err(e) => {
            tracing::warn!("Failed to read {:?}: {}. Ignoring.", path, e);
            None
        }
    }
}

/// Atomically replace a file's contents
///
/// Writes to a locked temp file in the same directory, syncs it, then
/// renames it over the original.
fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path.parent().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::Other, "storage path missing parent")
    })?;
    std::fs::create_dir_all(parent)?;

    let temp = NamedTempFile::new_in(parent)?;
    temp.as_file().lock_exclusive()?;

    {
        let mut writer = std::io::BufWriter::new(temp.as_file());
        writer.write_all(contents.as_bytes())?;
        writer.flush()?;
    }

    temp.as_file().sync_all()?;
    temp.as_file().unlock()?;

    temp.persist(path).map_err(|e| Error::Io(e.error))?;
    Ok(())
}

impl BlessingRepository for FileRepository {
    fn load(&self) -> Option<BlessingRecord> {
        let path = self.record_path();
        let contents = read_locked(&path)?;
        let record = BlessingRecord::parse(&contents)?;
        tracing::debug!("Loaded blessing record from {:?}", path);
        Some(record)
    }

    fn save(&self, record: &BlessingRecord) -> Result<()> {
        let path = self.record_path();
        write_atomic(&path, &record.to_json()?)
            .map_err(|e| Error::PersistWriteFailure(format!("{:?}: {}", path, e)))?;
        tracing::debug!("Saved blessing record to {:?}", path);
        Ok(())
    }

    fn load_language(&self) -> Option<Language> {
        let contents = read_locked(&self.language_path())?;
        let language = Language::parse_known(&contents);
        if language.is_none() {
            tracing::warn!("Ignoring unknown stored language {:?}", contents.trim());
        }
        language
    }

    fn save_language(&self, language: Language) -> Result<()> {
        let path = self.language_path();
        write_atomic(&path, language.code())
            .map_err(|e| Error::PersistWriteFailure(format!("{:?}: {}", path, e)))?;
        tracing::debug!("Saved language preference '{}' to {:?}", language, path);
        Ok(())
    }
}
