/// Connections kernel — Invariant Checks
///
/// Two flavours: `validate_*` panics on the first failure and is used by
/// the engine after every applied transition; `try_validate_*` returns
/// `Err(message)` and is used where a bad value must not abort the process.

use std::collections::BTreeSet;

use crate::domain::{GameConfig, Phase, Puzzle, Status};
use crate::state::GameState;
use crate::{GROUP_COUNT, GROUP_SIZE};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Panicking variant of `try_validate_puzzle`.
pub fn validate_puzzle(puzzle: &Puzzle) {
    if let Err(msg) = try_validate_puzzle(puzzle) {
        panic!("Invariant violation: {}", msg);
    }
}

/// Four groups, four names each, unique labels, sixteen distinct names.
pub fn try_validate_puzzle(puzzle: &Puzzle) -> Result<(), String> {
    if puzzle.groups.len() != GROUP_COUNT {
        return Err(format!(
            "[INVARIANT:group_count] expected {} groups, got {}",
            GROUP_COUNT,
            puzzle.groups.len()
        ));
    }

    let mut labels = BTreeSet::new();
    let mut names = BTreeSet::new();
    for g in &puzzle.groups {
        if !labels.insert(g.category.as_str()) {
            return Err(format!(
                "[INVARIANT:unique_categories] {:?} appears twice",
                g.category
            ));
        }
        if g.players.len() != GROUP_SIZE {
            return Err(format!(
                "[INVARIANT:group_size] {:?} has {} players",
                g.category,
                g.players.len()
            ));
        }
        names.extend(g.players.iter().map(String::as_str));
    }

    if names.len() != GROUP_COUNT * GROUP_SIZE {
        return Err(format!(
            "[INVARIANT:disjoint_groups] expected {} unique names, got {}",
            GROUP_COUNT * GROUP_SIZE,
            names.len()
        ));
    }
    Ok(())
}

/// Panicking variant of `try_validate_state`.
pub fn validate_state(state: &GameState, config: &GameConfig) {
    if let Err(msg) = try_validate_state(state, config) {
        panic!("Invariant violation: {}", msg);
    }
}

/// Structural consistency of a live game.
pub fn try_validate_state(state: &GameState, config: &GameConfig) -> Result<(), String> {
    try_validate_puzzle(&state.puzzle)?;
    check_deck(state)?;
    check_selection(state)?;
    check_found(state)?;
    check_budgets(state, config)?;
    check_phase(state, config)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Individual checks (private)
// ---------------------------------------------------------------------------

/// The deck is a permutation of the puzzle's names.
fn check_deck(state: &GameState) -> Result<(), String> {
    let mut deck = state.deck.clone();
    let mut names = state.puzzle.names();
    deck.sort();
    names.sort();
    if deck != names {
        return Err("[INVARIANT:deck_permutation] deck does not match puzzle names".to_string());
    }
    Ok(())
}

/// At most four distinct, unsolved deck names are selected.
fn check_selection(state: &GameState) -> Result<(), String> {
    if state.selected.len() > GROUP_SIZE {
        return Err(format!(
            "[INVARIANT:selection_cap] {} names selected",
            state.selected.len()
        ));
    }
    let unique: BTreeSet<&str> = state.selected.iter().map(String::as_str).collect();
    if unique.len() != state.selected.len() {
        return Err("[INVARIANT:selection_unique] duplicate name in selection".to_string());
    }
    for name in &state.selected {
        if state.revealed.contains(name) {
            return Err(format!(
                "[INVARIANT:selection_unsolved] {:?} is selected but already solved",
                name
            ));
        }
    }
    Ok(())
}

/// Found groups come from the puzzle, once each, and `revealed` is exactly
/// their union.
fn check_found(state: &GameState) -> Result<(), String> {
    let mut labels = BTreeSet::new();
    let mut union = BTreeSet::new();
    for g in &state.found {
        if state.puzzle.group(&g.category) != Some(g) {
            return Err(format!(
                "[INVARIANT:found_in_puzzle] {:?} is not a group of this puzzle",
                g.category
            ));
        }
        if !labels.insert(g.category.as_str()) {
            return Err(format!(
                "[INVARIANT:found_unique] {:?} found twice",
                g.category
            ));
        }
        union.extend(g.players.iter().cloned());
    }
    if union != state.revealed {
        return Err("[INVARIANT:revealed_matches_found] revealed names differ from found groups".to_string());
    }
    Ok(())
}

fn check_budgets(state: &GameState, config: &GameConfig) -> Result<(), String> {
    if state.hints_used > config.max_hints {
        return Err(format!(
            "[INVARIANT:hint_budget] {} hints used, max {}",
            state.hints_used, config.max_hints
        ));
    }
    if state.guesses.iter().any(|g| g.len() != GROUP_SIZE) {
        return Err("[INVARIANT:guess_size] a logged guess is not four names".to_string());
    }
    Ok(())
}

fn check_phase(state: &GameState, config: &GameConfig) -> Result<(), String> {
    let all_found = state.found.len() == GROUP_COUNT;
    let out_of_guesses = state.incorrect_count >= config.max_incorrect;
    let consistent = match state.phase {
        Phase::Idle => false,
        Phase::InProgress => !all_found && !out_of_guesses,
        Phase::Terminal(Status::Won) | Phase::Terminal(Status::GaveUp) => all_found,
        Phase::Terminal(Status::Lost) => out_of_guesses,
    };
    if !consistent {
        return Err(format!(
            "[INVARIANT:phase] {:?} with {} found and {} incorrect",
            state.phase,
            state.found.len(),
            state.incorrect_count
        ));
    }
    Ok(())
}
