//! Daily blessing state machine.
//!
//! Tracks whether the user has already received today's blessing, which
//! verse it was (by catalog index), and what the client should show.
//!
//! ## Phases
//!
//! - `Init` - nothing loaded yet
//! - `Prompting { loading }` - a verse is offered; `loading` only during the
//!   first fetch
//! - `Celebrating` - the user just said Amen; shown once
//! - `Reflecting` - locked until the next local midnight
//!
//! The machine performs no lookups itself. Transitions return [`Command`]s
//! for a driver to execute, and lookup results come back through
//! [`DailyBlessing::verse_arrived`] tagged with the generation of the request
//! that produced them. Only the latest generation is applied.

use crate::{
    countdown::{format_countdown, until_next_midnight},
    translations, BlessingRecord, BlessingRepository, Clock, Error, Language, Result, Verse,
    VersePayload,
};
use chrono::Duration;
use serde::Serialize;

/// Display state of the daily blessing
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Phase {
    Init,
    Prompting { loading: bool },
    Celebrating,
    Reflecting,
}

/// A verse lookup the driver must perform
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchRequest {
    pub generation: u64,
    pub language: Language,
    /// None for a random pick, Some for a clamped index pick
    pub index: Option<i64>,
}

/// Side effects requested by a transition
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Fetch(FetchRequest),
    /// Begin the 1 Hz countdown
    StartTicker,
    /// Cancel the countdown task
    StopTicker,
    /// Play the one-shot celebration
    Celebrate,
}

/// Read-only view for rendering
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Snapshot {
    pub phase: Phase,
    pub language: Language,
    pub verse: Option<Verse>,
    pub index: Option<i64>,
    pub locked: bool,
    pub accepted: bool,
    pub loading: bool,
    pub countdown: Option<String>,
}

/// Session state for one client
pub struct DailyBlessing<R, C> {
    repository: R,
    clock: C,
    language: Language,
    phase: Phase,
    verse: Option<Verse>,
    index: Option<i64>,
    locked: bool,
    accepted: bool,
    generation: u64,
    pending: Option<u64>,
    ticking: bool,
    remaining: Option<Duration>,
}

impl<R: BlessingRepository, C: Clock> DailyBlessing<R, C> {
    /// Create a session, reading the stored language preference
    ///
    /// `default_language` applies when no valid preference is stored.
    pub fn new(repository: R, clock: C, default_language: Language) -> Self {
        let language = repository.load_language().unwrap_or(default_language);
        Self {
            repository,
            clock,
            language,
            phase: Phase::Init,
            verse: None,
            index: None,
            locked: false,
            accepted: false,
            generation: 0,
            pending: None,
            ticking: false,
            remaining: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Generation of the lookup still awaited, if any
    pub fn pending_generation(&self) -> Option<u64> {
        self.pending
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            language: self.language,
            verse: self.verse.clone(),
            index: self.index,
            locked: self.locked,
            accepted: self.accepted,
            loading: matches!(self.phase, Phase::Prompting { loading: true }),
            countdown: self.remaining.map(format_countdown),
        }
    }

    /// Restore today's blessing or begin fetching a new one
    pub fn start(&mut self) -> Result<Vec<Command>> {
        if self.phase != Phase::Init {
            return Err(Error::State("session already started".into()));
        }

        let now = self.clock.now();
        match self.repository.load() {
            Some(record) if record.is_for_day(now) => {
                tracing::info!(
                    "Restoring today's blessing (index {}) from {}",
                    record.verse.index,
                    record.timestamp
                );
                self.verse = Some(record.verse.verse());
                self.index = Some(record.verse.index);
                self.locked = true;
                self.phase = Phase::Reflecting;
                return Ok(self.start_ticker());
            }
            Some(record) => {
                tracing::info!("Blessing record from {} has expired", record.timestamp);
            }
            None => {
                tracing::debug!("No blessing record for today");
            }
        }

        self.phase = Phase::Prompting { loading: true };
        Ok(vec![self.issue_fetch(None)])
    }

    /// Apply the result of a lookup
    ///
    /// Results for anything but the latest request are discarded.
    pub fn verse_arrived(&mut self, generation: u64, result: Result<VersePayload>) -> Vec<Command> {
        if self.pending != Some(generation) {
            tracing::debug!(
                "Discarding stale lookup response (generation {}, awaiting {:?})",
                generation,
                self.pending
            );
            return Vec::new();
        }
        self.pending = None;

        match result {
            Ok(payload) => {
                self.verse = Some(payload.verse());
                self.index = Some(payload.index);
            }
            Err(e) if self.has_catalog_verse() => {
                tracing::warn!("Verse lookup failed: {}. Keeping the current verse.", e);
            }
            Err(e) => {
                tracing::warn!("Verse lookup failed: {}. Showing the fallback verse.", e);
                self.show_fallback();
            }
        }

        if let Phase::Prompting { loading: true } = self.phase {
            self.phase = Phase::Prompting { loading: false };
        }
        Vec::new()
    }

    /// Switch language, re-fetching the same verse in the new language
    ///
    /// The preference is always persisted, even when the language is
    /// unchanged. Write failures are logged and ignored.
    pub fn change_language(&mut self, language: Language) -> Vec<Command> {
        if let Err(e) = self.repository.save_language(language) {
            tracing::warn!("Failed to persist language preference: {}", e);
        }

        if language == self.language {
            return Vec::new();
        }

        tracing::info!("Switching language {} -> {}", self.language, language);
        self.language = language;

        if self.phase == Phase::Init {
            return Vec::new();
        }

        match self.index {
            Some(index) if index >= 0 => vec![self.issue_fetch(Some(index))],
            Some(_) if self.locked => {
                // Locked on the fallback verse: translate it locally
                self.show_fallback();
                Vec::new()
            }
            _ => {
                self.phase = Phase::Prompting { loading: true };
                vec![self.issue_fetch(None)]
            }
        }
    }

    /// Cycle to the next language in switcher order
    pub fn cycle_language(&mut self) -> Vec<Command> {
        self.change_language(self.language.next())
    }

    /// Accept the offered verse and lock for the rest of the day
    ///
    /// Only valid while prompting with a loaded verse. A failed write keeps
    /// the lock for this session only.
    pub fn accept(&mut self) -> Result<Vec<Command>> {
        let verse = match (&self.phase, &self.verse) {
            (Phase::Prompting { loading: false }, Some(verse)) => verse.clone(),
            _ => {
                return Err(Error::State(format!(
                    "cannot accept while {:?}",
                    self.phase
                )))
            }
        };

        let index = self.index.unwrap_or(crate::FALLBACK_INDEX);
        let record = BlessingRecord::new(self.clock.now(), verse.with_index(index));
        match self.repository.save(&record) {
            Ok(()) => tracing::info!("Accepted blessing (index {})", index),
            Err(e) => tracing::warn!(
                "Failed to persist blessing record: {}. Lock applies to this session only.",
                e
            ),
        }

        self.locked = true;
        self.accepted = true;
        self.phase = Phase::Celebrating;
        Ok(vec![Command::Celebrate])
    }

    /// Dismiss the celebration and settle into reflection
    pub fn next(&mut self) -> Result<Vec<Command>> {
        if self.phase != Phase::Celebrating {
            return Err(Error::State(format!("cannot continue while {:?}", self.phase)));
        }

        self.accepted = false;
        self.phase = Phase::Reflecting;
        Ok(self.start_ticker())
    }

    /// Recompute the countdown to the next local midnight
    ///
    /// Returns None outside `Reflecting`. Never changes the lock or verse.
    pub fn tick(&mut self) -> Option<Duration> {
        if self.phase != Phase::Reflecting {
            return None;
        }
        let remaining = until_next_midnight(self.clock.now());
        self.remaining = Some(remaining);
        Some(remaining)
    }

    /// End the session, cancelling the countdown if it runs
    pub fn close(&mut self) -> Vec<Command> {
        if self.ticking {
            self.ticking = false;
            vec![Command::StopTicker]
        } else {
            Vec::new()
        }
    }

    fn issue_fetch(&mut self, index: Option<i64>) -> Command {
        self.generation += 1;
        self.pending = Some(self.generation);
        Command::Fetch(FetchRequest {
            generation: self.generation,
            language: self.language,
            index,
        })
    }

    fn start_ticker(&mut self) -> Vec<Command> {
        self.remaining = Some(until_next_midnight(self.clock.now()));
        if self.ticking {
            return Vec::new();
        }
        self.ticking = true;
        vec![Command::StartTicker]
    }

    fn has_catalog_verse(&self) -> bool {
        self.verse.is_some() && matches!(self.index, Some(index) if index >= 0)
    }

    fn show_fallback(&mut self) {
        let fallback = translations(self.language).fallback();
        self.verse = Some(fallback.verse());
        self.index = Some(fallback.index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        get_default_catalog, FixedClock, MemoryRepository, SequenceRandom, VerseLookup,
        FALLBACK_INDEX,
    };

    fn clock(at: &str) -> FixedClock {
        FixedClock::at(at).unwrap()
    }

    fn record(at: &str, index: i64) -> BlessingRecord {
        let lookup = VerseLookup::with_thread_rng(get_default_catalog());
        let verse = lookup.pick_by_index(Language::En, index).unwrap();
        BlessingRecord::new(chrono::DateTime::parse_from_rfc3339(at).unwrap(), verse)
    }

    fn fetch_of(commands: &[Command]) -> FetchRequest {
        match commands {
            [Command::Fetch(request)] => request.clone(),
            other => panic!("Expected a single fetch, got {:?}", other),
        }
    }

    /// Answer a fetch from the built-in catalog
    fn answer(request: &FetchRequest) -> Result<VersePayload> {
        VerseLookup::new(get_default_catalog(), SequenceRandom::new([5]))
            .pick(request.language, request.index)
    }

    #[test]
    fn test_startup_without_record_fetches() {
        crate::logging::init_test();
        let repo = MemoryRepository::new();
        let clock = clock("2024-01-01T09:00:00+02:00");
        let mut state = DailyBlessing::new(&repo, &clock, Language::En);

        let commands = state.start().unwrap();
        let request = fetch_of(&commands);
        assert_eq!(request.index, None);
        assert_eq!(request.language, Language::En);
        assert_eq!(state.phase(), Phase::Prompting { loading: true });
        assert!(state.snapshot().loading);
        assert!(!state.is_locked());
    }

    #[test]
    fn test_startup_with_todays_record_reflects_without_fetch() {
        let repo = MemoryRepository::new().with_record(&record("2024-01-01T08:00:00+02:00", 4));
        let clock = clock("2024-01-01T21:00:00+02:00");
        let mut state = DailyBlessing::new(&repo, &clock, Language::En);

        let commands = state.start().unwrap();
        assert_eq!(commands, vec![Command::StartTicker]);
        assert_eq!(state.pending_generation(), None);

        let snapshot = state.snapshot();
        assert_eq!(snapshot.phase, Phase::Reflecting);
        assert!(snapshot.locked);
        assert!(!snapshot.accepted);
        assert_eq!(snapshot.index, Some(4));
        assert_eq!(snapshot.verse.unwrap().reference, "Joshua 1:9");
        assert_eq!(snapshot.countdown.as_deref(), Some("03:00:00"));
    }

    #[test]
    fn test_startup_with_yesterdays_record_expires() {
        let repo = MemoryRepository::new().with_record(&record("2023-12-31T20:00:00+02:00", 4));
        let clock = clock("2024-01-01T09:00:00+02:00");
        let mut state = DailyBlessing::new(&repo, &clock, Language::En);

        let commands = state.start().unwrap();
        fetch_of(&commands);
        assert_eq!(state.phase(), Phase::Prompting { loading: true });
        assert!(!state.is_locked());
    }

    #[test]
    fn test_midnight_expires_record_under_a_minute_old() {
        let repo = MemoryRepository::new().with_record(&record("2024-01-01T23:59:50+00:00", 1));
        let clock = clock("2024-01-02T00:00:05+00:00");
        let mut state = DailyBlessing::new(&repo, &clock, Language::En);

        fetch_of(&state.start().unwrap());
        assert_eq!(state.phase(), Phase::Prompting { loading: true });
    }

    #[test]
    fn test_corrupt_record_behaves_as_absent() {
        for raw in [
            "{ invalid json }",
            r#"{"timestamp":"2024-01-01T08:00:00+02:00"}"#,
            r#"{"timestamp":"2024-01-01T08:00:00+02:00","verse":{"text":"T"}}"#,
        ] {
            let repo = MemoryRepository::new().with_raw_record(raw);
            let clock = clock("2024-01-01T09:00:00+02:00");
            let mut state = DailyBlessing::new(&repo, &clock, Language::En);

            let request = fetch_of(&state.start().unwrap());
            assert_eq!(request.index, None);
            assert_eq!(state.phase(), Phase::Prompting { loading: true });
        }
    }

    #[test]
    fn test_start_twice_is_rejected() {
        let repo = MemoryRepository::new();
        let clock = clock("2024-01-01T09:00:00Z");
        let mut state = DailyBlessing::new(&repo, &clock, Language::En);
        state.start().unwrap();
        assert!(matches!(state.start(), Err(Error::State(_))));
    }

    #[test]
    fn test_verse_arrival_stops_loading() {
        let repo = MemoryRepository::new();
        let clock = clock("2024-01-01T09:00:00Z");
        let mut state = DailyBlessing::new(&repo, &clock, Language::En);

        let request = fetch_of(&state.start().unwrap());
        let commands = state.verse_arrived(request.generation, answer(&request));
        assert!(commands.is_empty());

        let snapshot = state.snapshot();
        assert_eq!(snapshot.phase, Phase::Prompting { loading: false });
        assert_eq!(snapshot.index, Some(5));
        assert_eq!(snapshot.verse.unwrap().reference, "Matthew 11:28");
    }

    #[test]
    fn test_lookup_failure_shows_fallback() {
        let repo = MemoryRepository::new();
        let clock = clock("2024-01-01T09:00:00Z");
        let mut state = DailyBlessing::new(&repo, &clock, Language::En);

        let request = fetch_of(&state.start().unwrap());
        state.verse_arrived(
            request.generation,
            Err(Error::LookupUnreachable("connection refused".into())),
        );

        let snapshot = state.snapshot();
        assert_eq!(snapshot.phase, Phase::Prompting { loading: false });
        assert_eq!(snapshot.index, Some(FALLBACK_INDEX));
        let verse = snapshot.verse.unwrap();
        assert_eq!(verse.text, "The Lord is good to all; he has compassion on all he has made.");
        assert_eq!(verse.reference, "Psalm 145:9");
    }

    #[test]
    fn test_fallback_uses_current_language() {
        let repo = MemoryRepository::new().with_language("fi");
        let clock = clock("2024-01-01T09:00:00Z");
        let mut state = DailyBlessing::new(&repo, &clock, Language::En);

        let request = fetch_of(&state.start().unwrap());
        assert_eq!(request.language, Language::Fi);
        state.verse_arrived(request.generation, Err(Error::LookupUnreachable("down".into())));
        assert_eq!(state.snapshot().verse.unwrap().reference, "Psalmi 145:9");
    }

    #[test]
    fn test_accept_persists_and_celebrates() {
        let repo = MemoryRepository::new();
        let clock = clock("2024-01-01T09:00:00+02:00");
        let mut state = DailyBlessing::new(&repo, &clock, Language::En);

        let request = fetch_of(&state.start().unwrap());
        state.verse_arrived(request.generation, answer(&request));

        let commands = state.accept().unwrap();
        assert_eq!(commands, vec![Command::Celebrate]);
        assert_eq!(state.phase(), Phase::Celebrating);
        assert!(state.snapshot().accepted);
        assert!(state.is_locked());

        let saved = repo.load().unwrap();
        assert_eq!(saved.verse.index, 5);
        assert_eq!(saved.timestamp.to_rfc3339(), "2024-01-01T09:00:00+02:00");
    }

    #[test]
    fn test_accept_only_from_loaded_prompt() {
        let repo = MemoryRepository::new();
        let clock = clock("2024-01-01T09:00:00Z");
        let mut state = DailyBlessing::new(&repo, &clock, Language::En);

        assert!(matches!(state.accept(), Err(Error::State(_))));
        state.start().unwrap();
        // still loading
        assert!(matches!(state.accept(), Err(Error::State(_))));
        assert_eq!(repo.record_writes(), 0);
        assert_eq!(state.phase(), Phase::Prompting { loading: true });
    }

    #[test]
    fn test_accept_with_failing_storage_still_locks() {
        let repo = MemoryRepository::new().failing_writes();
        let clock = clock("2024-01-01T09:00:00Z");
        let mut state = DailyBlessing::new(&repo, &clock, Language::En);

        let request = fetch_of(&state.start().unwrap());
        state.verse_arrived(request.generation, answer(&request));
        state.accept().unwrap();

        assert!(state.is_locked());
        assert_eq!(state.phase(), Phase::Celebrating);
        assert!(repo.load().is_none());
    }

    #[test]
    fn test_accepting_fallback_records_sentinel_index() {
        let repo = MemoryRepository::new();
        let clock = clock("2024-01-01T09:00:00Z");
        let mut state = DailyBlessing::new(&repo, &clock, Language::En);

        let request = fetch_of(&state.start().unwrap());
        state.verse_arrived(request.generation, Err(Error::LookupUnreachable("down".into())));
        state.accept().unwrap();

        assert_eq!(repo.load().unwrap().verse.index, FALLBACK_INDEX);
    }

    #[test]
    fn test_next_moves_to_reflecting_and_starts_ticker() {
        let repo = MemoryRepository::new();
        let clock = clock("2024-01-01T23:00:00Z");
        let mut state = DailyBlessing::new(&repo, &clock, Language::En);

        assert!(matches!(state.next(), Err(Error::State(_))));

        let request = fetch_of(&state.start().unwrap());
        state.verse_arrived(request.generation, answer(&request));
        state.accept().unwrap();

        assert_eq!(state.next().unwrap(), vec![Command::StartTicker]);
        let snapshot = state.snapshot();
        assert_eq!(snapshot.phase, Phase::Reflecting);
        assert!(snapshot.locked);
        assert!(!snapshot.accepted);
        assert_eq!(snapshot.countdown.as_deref(), Some("01:00:00"));

        // no way to accept again today
        assert!(matches!(state.accept(), Err(Error::State(_))));
        assert!(matches!(state.next(), Err(Error::State(_))));
    }

    #[test]
    fn test_tick_only_while_reflecting() {
        let repo = MemoryRepository::new().with_record(&record("2024-01-01T08:00:00Z", 0));
        let clock = clock("2024-01-01T23:59:50Z");
        let mut state = DailyBlessing::new(&repo, &clock, Language::En);
        assert!(state.tick().is_none());

        state.start().unwrap();
        assert_eq!(state.tick(), Some(Duration::seconds(10)));

        clock.advance(Duration::seconds(4));
        assert_eq!(state.tick(), Some(Duration::seconds(6)));
        assert_eq!(state.snapshot().countdown.as_deref(), Some("00:00:06"));
        assert!(state.is_locked());
    }

    #[test]
    fn test_close_stops_ticker_once() {
        let repo = MemoryRepository::new().with_record(&record("2024-01-01T08:00:00Z", 0));
        let clock = clock("2024-01-01T10:00:00Z");
        let mut state = DailyBlessing::new(&repo, &clock, Language::En);
        state.start().unwrap();

        assert_eq!(state.close(), vec![Command::StopTicker]);
        assert!(state.close().is_empty());
    }

    #[test]
    fn test_close_without_ticker_is_noop() {
        let repo = MemoryRepository::new();
        let clock = clock("2024-01-01T10:00:00Z");
        let mut state = DailyBlessing::new(&repo, &clock, Language::En);
        state.start().unwrap();
        assert!(state.close().is_empty());
    }

    #[test]
    fn test_language_switch_while_locked_keeps_index() {
        let repo = MemoryRepository::new().with_record(&record("2024-01-01T08:00:00Z", 3));
        let clock = clock("2024-01-01T10:00:00Z");
        let mut state = DailyBlessing::new(&repo, &clock, Language::En);
        state.start().unwrap();

        let request = fetch_of(&state.change_language(Language::Fi));
        assert_eq!(request.index, Some(3));
        assert_eq!(request.language, Language::Fi);
        // no spinner for a re-translation
        assert_eq!(state.phase(), Phase::Reflecting);

        state.verse_arrived(request.generation, answer(&request));
        let snapshot = state.snapshot();
        assert_eq!(snapshot.phase, Phase::Reflecting);
        assert!(snapshot.locked);
        assert_eq!(snapshot.index, Some(3));
        assert_eq!(snapshot.language, Language::Fi);
        let verse = snapshot.verse.unwrap();
        assert_eq!(verse.text, "Herra on minun paimeneni, ei minulta mitään puutu.");
        assert_eq!(verse.reference, "Psalmi 23:1");
        assert_eq!(repo.raw_language().as_deref(), Some("fi"));
    }

    #[test]
    fn test_language_switch_while_prompting_retranslates() {
        let repo = MemoryRepository::new();
        let clock = clock("2024-01-01T10:00:00Z");
        let mut state = DailyBlessing::new(&repo, &clock, Language::En);

        let request = fetch_of(&state.start().unwrap());
        state.verse_arrived(request.generation, answer(&request));

        let request = fetch_of(&state.change_language(Language::Am));
        assert_eq!(request.index, Some(5));
        assert_eq!(state.phase(), Phase::Prompting { loading: false });

        state.verse_arrived(request.generation, answer(&request));
        assert_eq!(state.snapshot().verse.unwrap().reference, "ማቴዎስ 11፥28");
        assert_eq!(state.snapshot().index, Some(5));
    }

    #[test]
    fn test_language_switch_before_first_verse_refetches_randomly() {
        let repo = MemoryRepository::new();
        let clock = clock("2024-01-01T10:00:00Z");
        let mut state = DailyBlessing::new(&repo, &clock, Language::En);

        let first = fetch_of(&state.start().unwrap());
        let second = fetch_of(&state.change_language(Language::Fi));
        assert_eq!(second.index, None);
        assert_eq!(second.language, Language::Fi);
        assert!(second.generation > first.generation);
        assert_eq!(state.phase(), Phase::Prompting { loading: true });
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let repo = MemoryRepository::new();
        let clock = clock("2024-01-01T10:00:00Z");
        let mut state = DailyBlessing::new(&repo, &clock, Language::En);

        let first = fetch_of(&state.start().unwrap());
        let second = fetch_of(&state.change_language(Language::Fi));

        // newer response lands first, the abandoned one afterwards
        state.verse_arrived(second.generation, answer(&second));
        state.verse_arrived(first.generation, answer(&first));

        let verse = state.snapshot().verse.unwrap();
        assert_eq!(verse.reference, "Matteus 11:28");
    }

    #[test]
    fn test_retranslation_failure_keeps_verse() {
        let repo = MemoryRepository::new().with_record(&record("2024-01-01T08:00:00Z", 7));
        let clock = clock("2024-01-01T10:00:00Z");
        let mut state = DailyBlessing::new(&repo, &clock, Language::En);
        state.start().unwrap();

        let request = fetch_of(&state.change_language(Language::Am));
        state.verse_arrived(request.generation, Err(Error::LookupUnreachable("down".into())));

        let snapshot = state.snapshot();
        assert_eq!(snapshot.index, Some(7));
        assert_eq!(snapshot.verse.unwrap().reference, "Proverbs 3:5");
        assert!(snapshot.locked);
    }

    #[test]
    fn test_language_switch_locked_on_fallback_translates_locally() {
        let repo = MemoryRepository::new();
        let clock = clock("2024-01-01T10:00:00Z");
        let mut state = DailyBlessing::new(&repo, &clock, Language::En);

        let request = fetch_of(&state.start().unwrap());
        state.verse_arrived(request.generation, Err(Error::LookupUnreachable("down".into())));
        state.accept().unwrap();
        state.next().unwrap();

        assert!(state.change_language(Language::Am).is_empty());
        let snapshot = state.snapshot();
        assert_eq!(snapshot.index, Some(FALLBACK_INDEX));
        assert_eq!(snapshot.verse.unwrap().reference, "መዝሙር 145፥9");
        assert_eq!(snapshot.phase, Phase::Reflecting);
    }

    #[test]
    fn test_same_language_persists_without_fetch() {
        let repo = MemoryRepository::new();
        let clock = clock("2024-01-01T10:00:00Z");
        let mut state = DailyBlessing::new(&repo, &clock, Language::En);
        let first = fetch_of(&state.start().unwrap());

        assert!(state.change_language(Language::En).is_empty());
        assert_eq!(repo.raw_language().as_deref(), Some("en"));
        assert_eq!(state.pending_generation(), Some(first.generation));
    }

    #[test]
    fn test_same_language_before_start_persists() {
        let repo = MemoryRepository::new();
        let clock = clock("2024-01-01T10:00:00Z");
        let mut state = DailyBlessing::new(&repo, &clock, Language::Fi);

        assert!(state.change_language(Language::Fi).is_empty());
        assert_eq!(repo.raw_language().as_deref(), Some("fi"));

        // a later session with another default keeps the stored choice
        let state = DailyBlessing::new(&repo, &clock, Language::Am);
        assert_eq!(state.language(), Language::Fi);
    }

    #[test]
    fn test_language_switch_while_celebrating_keeps_index() {
        let repo = MemoryRepository::new();
        let clock = clock("2024-01-01T10:00:00Z");
        let mut state = DailyBlessing::new(&repo, &clock, Language::En);

        let request = fetch_of(&state.start().unwrap());
        state.verse_arrived(request.generation, answer(&request));
        state.accept().unwrap();

        let request = fetch_of(&state.change_language(Language::Fi));
        assert_eq!(request.index, Some(5));
        assert_eq!(state.phase(), Phase::Celebrating);

        state.verse_arrived(request.generation, answer(&request));
        let snapshot = state.snapshot();
        assert_eq!(snapshot.phase, Phase::Celebrating);
        assert!(snapshot.accepted);
        assert!(snapshot.locked);
        assert_eq!(snapshot.index, Some(5));
        assert_eq!(snapshot.verse.unwrap().reference, "Matteus 11:28");

        // the stored record is not rewritten by a translation
        assert_eq!(repo.record_writes(), 1);
        assert_eq!(repo.load().unwrap().verse.reference, "Matthew 11:28");
    }

    #[test]
    fn test_language_change_before_start_only_persists() {
        let repo = MemoryRepository::new();
        let clock = clock("2024-01-01T10:00:00Z");
        let mut state = DailyBlessing::new(&repo, &clock, Language::En);

        assert!(state.cycle_language().is_empty());
        assert_eq!(state.language(), Language::Am);
        assert_eq!(fetch_of(&state.start().unwrap()).language, Language::Am);
    }

    #[test]
    fn test_stored_language_overrides_default() {
        let repo = MemoryRepository::new().with_language("am");
        let clock = clock("2024-01-01T10:00:00Z");
        let state = DailyBlessing::new(&repo, &clock, Language::Fi);
        assert_eq!(state.language(), Language::Am);

        let repo = MemoryRepository::new().with_language("garbage");
        let state = DailyBlessing::new(&repo, &clock, Language::Fi);
        assert_eq!(state.language(), Language::Fi);
    }

    #[test]
    fn test_accept_then_reload_same_day_restores() {
        let repo = MemoryRepository::new();
        let clock = clock("2024-01-01T10:00:00+03:00");

        let mut first = DailyBlessing::new(&repo, &clock, Language::En);
        let request = fetch_of(&first.start().unwrap());
        first.verse_arrived(request.generation, answer(&request));
        first.accept().unwrap();

        clock.advance(Duration::hours(13)); // 23:00 local
        let mut second = DailyBlessing::new(&repo, &clock, Language::En);
        assert_eq!(second.start().unwrap(), vec![Command::StartTicker]);
        assert_eq!(second.snapshot().index, Some(5));

        clock.advance(Duration::hours(1)); // next day
        let mut third = DailyBlessing::new(&repo, &clock, Language::En);
        fetch_of(&third.start().unwrap());
        assert!(!third.is_locked());
    }

    #[test]
    fn test_snapshot_serializes_phase_tag() {
        let repo = MemoryRepository::new();
        let clock = clock("2024-01-01T10:00:00Z");
        let mut state = DailyBlessing::new(&repo, &clock, Language::En);
        state.start().unwrap();

        let json = serde_json::to_value(state.snapshot()).unwrap();
        assert_eq!(json["phase"]["state"], "prompting");
        assert_eq!(json["phase"]["loading"], true);
        assert_eq!(json["language"], "en");
    }
}
