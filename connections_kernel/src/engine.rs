/// Connections kernel — Engine
///
/// Stateful wrapper around the pure transition layer. `None` state means
/// Idle: no game has been started yet. Every applied transition is checked
/// against the state invariants before it is stored.

use crate::actions::Action;
use crate::domain::{GameConfig, Mode, Phase, Puzzle, PuzzleGroup, Status, TransitionResult};
use crate::invariants::validate_state;
use crate::rng::RandomSource;
use crate::state::{create_initial_state, create_terminal_state, GameState};
use crate::transitions::apply_action;

pub struct GameEngine {
    state: Option<GameState>,
    config: GameConfig,
}

impl GameEngine {
    /// Create a new, idle engine.
    pub fn new(config: GameConfig) -> Self {
        Self {
            state: None,
            config,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.state.as_ref().map(|s| s.phase).unwrap_or(Phase::Idle)
    }

    /// Discard any current game and start a fresh one.
    pub fn start(
        &mut self,
        puzzle: Puzzle,
        deck: Vec<String>,
        mode: Mode,
        puzzle_id: &str,
    ) -> &GameState {
        let state = create_initial_state(puzzle, deck, mode, puzzle_id);
        validate_state(&state, &self.config);
        self.state.insert(state)
    }

    /// Install a finished game rebuilt from a stored outcome.
    ///
    /// Not validated: a stored outcome may predate a catalog change, and a
    /// terminal state never reaches the transition layer again.
    #[allow(clippy::too_many_arguments)]
    pub fn restore_terminal(
        &mut self,
        puzzle: Puzzle,
        deck: Vec<String>,
        mode: Mode,
        puzzle_id: &str,
        found: Vec<PuzzleGroup>,
        guesses: Vec<Vec<String>>,
        status: Status,
    ) -> &GameState {
        let state = create_terminal_state(puzzle, deck, mode, puzzle_id, found, guesses, status);
        self.state.insert(state)
    }

    /// Apply one action. Idle engines and unapplied actions change nothing.
    pub fn apply(&mut self, action: &Action, rng: &mut dyn RandomSource) -> TransitionResult {
        let current = match self.state.as_ref() {
            Some(s) => s,
            None => return TransitionResult::noop(action.kind()),
        };

        let (next, result) = apply_action(current, action, rng, &self.config);
        if result.applied {
            validate_state(&next, &self.config);
            self.state = Some(next);
        }
        result
    }

    /// Apply an ordered sequence of actions.
    pub fn apply_sequence(
        &mut self,
        actions: &[Action],
        rng: &mut dyn RandomSource,
    ) -> Vec<TransitionResult> {
        let mut results = Vec::with_capacity(actions.len());
        for action in actions {
            results.push(self.apply(action, rng));
        }
        results
    }
}
