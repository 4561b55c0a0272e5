//! Session manager — one play-through with persist-after-apply semantics.
//!
//! Apply-before-persist order:
//!   1. engine.apply(action)     — pure kernel transition, never fails
//!   2. if the game just ended in daily mode:
//!        streak update (win or loss), then the DailyOutcome write
//!
//! Actions always hand back their `TransitionResult`. A failed write in
//! step 2 is logged and kept in `persist_error()`; the transition from
//! step 1 stays applied and only durability is lost.
//!
//! Starting a new game discards the in-memory one and never touches what
//! is already persisted.

use connections_kernel::actions::Action;
use connections_kernel::catalog::Catalog;
use connections_kernel::domain::{Mode, Phase, Status, TransitionResult};
use connections_kernel::engine::GameEngine;
use connections_kernel::generator::{generate, generate_with};
use connections_kernel::hashing::puzzle_fingerprint;
use connections_kernel::rng::{EntropySource, RandomSource};
use connections_kernel::shuffle::shuffle;
use connections_kernel::state::GameState;

use crate::clock::{Clock, LocalClock};
use crate::config::RuntimeConfig;
use crate::error::{SessionError, StoreError};
use crate::file_store::FileStore;
use crate::progress::{self, DailyOutcome};
use crate::share::format_share;
use crate::store::{KeyValueStore, MemoryStore};
use crate::streaks::{Stats, StreakTracker};

pub struct Session {
    catalog: Catalog,
    config: RuntimeConfig,
    engine: GameEngine,
    store: Box<dyn KeyValueStore>,
    clock: Box<dyn Clock>,
    rng: Box<dyn RandomSource>,
    streaks: StreakTracker,
    celebrate: Option<Box<dyn FnMut(&str)>>,
    persist_error: Option<StoreError>,
}

impl Session {
    /// Build an idle session. Stats are read from `store` once, here.
    pub fn new(
        catalog: Catalog,
        config: RuntimeConfig,
        store: Box<dyn KeyValueStore>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let streaks = StreakTracker::load(store.as_ref());
        Self {
            engine: GameEngine::new(config.game.clone()),
            catalog,
            config,
            store,
            clock,
            rng: Box::new(EntropySource::new()),
            streaks,
            celebrate: None,
            persist_error: None,
        }
    }

    /// Session backed by the configured file store (or memory), local clock.
    pub fn open(catalog: Catalog, config: RuntimeConfig) -> Result<Self, SessionError> {
        let store: Box<dyn KeyValueStore> = match &config.data_path {
            Some(path) => Box::new(FileStore::open(path)?),
            None => Box::new(MemoryStore::new()),
        };
        Ok(Self::new(catalog, config, store, Box::new(LocalClock)))
    }

    /// Replace the source used for decks, hints and random puzzles.
    pub fn with_rng(mut self, rng: Box<dyn RandomSource>) -> Self {
        self.rng = rng;
        self
    }

    /// Fire-and-forget callback run once when a game is won.
    pub fn on_celebrate(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.celebrate = Some(Box::new(f));
        self
    }

    // ── Starting games ─────────────────────────────────────────────

    /// Today's puzzle, or today's finished game if it was already played.
    pub fn start_daily(&mut self) -> Result<&GameState, SessionError> {
        self.start(Mode::Daily, None)
    }

    pub fn start_random(&mut self) -> Result<&GameState, SessionError> {
        self.start(Mode::Random, None)
    }

    /// Start a game. Daily seeds default to today; a random game with a
    /// seed replays that exact puzzle.
    pub fn start(&mut self, mode: Mode, seed: Option<&str>) -> Result<&GameState, SessionError> {
        self.config.game.validate().map_err(SessionError::Config)?;
        self.persist_error = None;
        match mode {
            Mode::Daily => {
                let day = seed
                    .map(str::to_string)
                    .unwrap_or_else(|| self.clock.today());
                let puzzle = generate(&self.catalog, Some(&day), &self.config.game)?;
                let deck = shuffle(&puzzle.names(), self.rng.as_mut());

                if let Some(outcome) = progress::load(self.store.as_ref(), &day) {
                    let fingerprint = puzzle_fingerprint(&puzzle);
                    if outcome.fingerprint.as_deref().is_some_and(|f| f != fingerprint) {
                        log::warn!(
                            "[SESSION] day:{} was played on a different puzzle, keeping stored outcome",
                            day
                        );
                    }
                    log::info!(
                        "[SESSION] daily day:{} already finished status:{}",
                        day,
                        outcome.status.as_str()
                    );
                    return Ok(self.engine.restore_terminal(
                        puzzle,
                        deck,
                        Mode::Daily,
                        &day,
                        outcome.found,
                        outcome.guesses,
                        outcome.status,
                    ));
                }

                log::info!("[SESSION] daily started day:{}", day);
                Ok(self.engine.start(puzzle, deck, Mode::Daily, &day))
            }
            Mode::Random => {
                let (puzzle, puzzle_id) = match seed {
                    Some(s) => (
                        generate(&self.catalog, Some(s), &self.config.game)?,
                        s.to_string(),
                    ),
                    None => (
                        generate_with(&self.catalog, self.rng.as_mut(), &self.config.game)?,
                        self.clock.token(),
                    ),
                };
                let deck = shuffle(&puzzle.names(), self.rng.as_mut());

                log::info!("[SESSION] random started puzzle:{}", puzzle_id);
                Ok(self.engine.start(puzzle, deck, Mode::Random, &puzzle_id))
            }
        }
    }

    // ── Player actions ─────────────────────────────────────────────

    pub fn toggle(&mut self, name: &str) -> TransitionResult {
        self.apply(&Action::Toggle(name.to_string()))
    }

    pub fn submit(&mut self) -> TransitionResult {
        self.apply(&Action::Submit)
    }

    pub fn use_hint(&mut self) -> TransitionResult {
        self.apply(&Action::Hint)
    }

    pub fn give_up(&mut self) -> TransitionResult {
        self.apply(&Action::GiveUp)
    }

    /// Apply one action, then run the end-of-game side effects if this
    /// action ended the game.
    pub fn apply(&mut self, action: &Action) -> TransitionResult {
        let result = self.engine.apply(action, self.rng.as_mut());
        if !result.applied {
            log::debug!("[SESSION] {} ignored in phase {:?}", action.kind(), self.engine.phase());
            return result;
        }

        if let Some(status) = result.entered_terminal {
            if let Err(e) = self.finish(status) {
                self.persist_error = Some(e);
            }
        }
        result
    }

    fn finish(&mut self, status: Status) -> Result<(), StoreError> {
        let (mode, puzzle_id, outcome) = match self.engine.state() {
            Some(s) => (
                s.mode,
                s.puzzle_id.clone(),
                DailyOutcome {
                    day: s.puzzle_id.clone(),
                    status,
                    found: s.found.clone(),
                    guesses: s.guesses.clone(),
                    fingerprint: Some(puzzle_fingerprint(&s.puzzle)),
                },
            ),
            None => return Ok(()),
        };

        log::info!(
            "[SESSION] finished puzzle:{} mode:{:?} status:{} guesses:{}",
            puzzle_id,
            mode,
            status.as_str(),
            outcome.guesses.len()
        );

        if status == Status::Won {
            if let Some(celebrate) = self.celebrate.as_mut() {
                celebrate(&puzzle_id);
            }
        }

        if mode != Mode::Daily {
            return Ok(());
        }

        // Both writes are attempted; the first failure is reported.
        let streak = match status {
            Status::Won => self.streaks.record_win(self.store.as_mut(), &puzzle_id),
            Status::Lost | Status::GaveUp => self.streaks.record_loss(self.store.as_mut()),
        };
        if let Err(e) = &streak {
            log::error!("[SESSION] stats write failed day:{} error:{}", puzzle_id, e);
        }

        let saved = progress::save(self.store.as_mut(), &puzzle_id, &outcome);
        if let Err(e) = &saved {
            log::error!("[SESSION] outcome write failed day:{} error:{}", puzzle_id, e);
        }

        streak?;
        saved?;
        Ok(())
    }

    // ── Read access ────────────────────────────────────────────────

    pub fn state(&self) -> Option<&GameState> {
        self.engine.state()
    }

    pub fn phase(&self) -> Phase {
        self.engine.phase()
    }

    pub fn stats(&self) -> &Stats {
        self.streaks.stats()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn guesses_left(&self) -> u32 {
        let max = self.config.game.max_incorrect;
        self.engine.state().map(|s| s.guesses_left(max)).unwrap_or(max)
    }

    pub fn puzzle_id(&self) -> Option<&str> {
        self.engine.state().map(|s| s.puzzle_id.as_str())
    }

    /// Share text for the current game, guess rows included.
    pub fn share_text(&self) -> Option<String> {
        self.engine
            .state()
            .map(|s| format_share(&s.puzzle, &s.puzzle_id, &s.guesses, &self.config.share))
    }

    /// Write failure from the end of the current game, if any.
    pub fn persist_error(&self) -> Option<&StoreError> {
        self.persist_error.as_ref()
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Tear down the session and hand back its store.
    pub fn into_store(self) -> Box<dyn KeyValueStore> {
        self.store
    }
}
