//! Core domain types for Encourager.
//!
//! This module defines the fundamental types used throughout the system:
//! - Languages and their switcher order
//! - Verses and the indexed payload served by the lookup

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index value meaning "not a catalog position" (the fallback verse)
pub const FALLBACK_INDEX: i64 = -1;

// ============================================================================
// Language
// ============================================================================

/// Supported verse and interface languages
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Am,
    Fi,
}

impl Language {
    /// All languages, in switcher order
    pub const ALL: [Language; 3] = [Language::En, Language::Am, Language::Fi];

    /// Parse a language code, falling back to English for anything unknown
    pub fn from_code(code: &str) -> Self {
        Self::parse_known(code).unwrap_or_default()
    }

    /// Parse a language code, returning None if it is not supported
    pub fn parse_known(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "en" => Some(Language::En),
            "am" => Some(Language::Am),
            "fi" => Some(Language::Fi),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Am => "am",
            Language::Fi => "fi",
        }
    }

    /// Short label shown on the language switcher
    pub fn label(self) -> &'static str {
        match self {
            Language::En => "EN",
            Language::Am => "አማ",
            Language::Fi => "FI",
        }
    }

    /// Next language in switcher order (en -> am -> fi -> en)
    pub fn next(self) -> Self {
        match self {
            Language::En => Language::Am,
            Language::Am => Language::Fi,
            Language::Fi => Language::En,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ============================================================================
// Verses
// ============================================================================

/// A single verse: text plus its scripture reference
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Verse {
    pub text: String,
    pub reference: String,
}

impl Verse {
    pub fn new(text: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            reference: reference.into(),
        }
    }

    /// Attach a catalog index, producing the wire/persisted shape
    pub fn with_index(self, index: i64) -> VersePayload {
        VersePayload {
            text: self.text,
            reference: self.reference,
            index,
        }
    }
}

/// Verse plus its position in the catalog, as served and persisted
///
/// `index` is [`FALLBACK_INDEX`] when the verse did not come from a catalog.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct VersePayload {
    pub text: String,
    pub reference: String,
    pub index: i64,
}

impl VersePayload {
    pub fn verse(&self) -> Verse {
        Verse::new(self.text.clone(), self.reference.clone())
    }

    /// True when this verse refers to a real catalog position
    pub fn is_catalog_verse(&self) -> bool {
        self.index >= 0
    }
}
