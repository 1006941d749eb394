#![forbid(unsafe_code)]

//! Core domain model and daily-blessing logic for Encourager.
//!
//! This crate provides:
//! - Domain types (languages, verses, lookup payloads)
//! - The built-in verse catalog and lookup policy
//! - The daily blessing state machine
//! - Persistence (blessing record, language preference)
//! - Clock, countdown, and UI strings

pub mod types;
pub mod error;
pub mod catalog;
pub mod lookup;
pub mod record;
pub mod repository;
pub mod storage;
pub mod clock;
pub mod countdown;
pub mod i18n;
pub mod source;
pub mod daily;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{get_default_catalog, Catalog, VerseStore};
pub use lookup::{RandomSource, SequenceRandom, ThreadRandom, VerseLookup};
pub use record::BlessingRecord;
pub use repository::{BlessingRepository, MemoryRepository};
pub use storage::FileRepository;
pub use clock::{Clock, FixedClock, SystemClock};
pub use countdown::{format_countdown, until_next_midnight};
pub use i18n::{translations, Translations};
pub use source::{LocalSource, VerseSource};
pub use daily::{Command, DailyBlessing, FetchRequest, Phase, Snapshot};
pub use config::Config;
