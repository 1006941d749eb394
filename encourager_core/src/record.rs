//! The persisted blessing record.
//!
//! A record is evidence that the user accepted a verse on a given day. It is
//! never deleted: a record whose timestamp falls on an earlier local calendar
//! date is simply treated as absent.

use crate::{Error, Result, VersePayload};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// The blessing the user accepted, with the moment it was accepted
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlessingRecord {
    pub timestamp: DateTime<FixedOffset>,
    pub verse: VersePayload,
}

impl BlessingRecord {
    pub fn new(timestamp: DateTime<FixedOffset>, verse: VersePayload) -> Self {
        Self { timestamp, verse }
    }

    /// Parse a raw record, reporting why it was rejected
    pub fn parse_strict(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| Error::CorruptPersistedState(e.to_string()))
    }

    /// Parse a raw record, treating any malformed input as absent
    pub fn parse(raw: &str) -> Option<Self> {
        match Self::parse_strict(raw) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("Discarding persisted blessing record: {}", e);
                None
            }
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// True if the record was made on the same local calendar date as `now`
    ///
    /// The record's timestamp is converted into `now`'s offset before the
    /// dates are compared, so crossing local midnight always expires it.
    /// A record written before a daylight saving change is read in the new
    /// offset, which can move a timestamp within an hour of midnight onto
    /// the neighbouring date.
    pub fn is_for_day(&self, now: DateTime<FixedOffset>) -> bool {
        self.timestamp.with_timezone(&now.timezone()).date_naive() == now.date_naive()
    }
}
