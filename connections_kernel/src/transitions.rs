/// Connections kernel — Centralized Transition Logic
///
/// ALL game-state mutation lives here. Every handler is total: an action
/// that does not apply (terminal game, wrong selection size, exhausted
/// hint budget) returns an unapplied result and leaves the state as is.

use crate::actions::Action;
use crate::domain::{GameConfig, Phase, Status, TransitionResult};
use crate::rng::RandomSource;
use crate::shuffle::sample;
use crate::state::GameState;
use crate::{GROUP_COUNT, GROUP_SIZE};

// ---------------------------------------------------------------------------
// Public dispatcher
// ---------------------------------------------------------------------------

/// Apply *action* to *state* and return `(new_state, result)`.
/// The original state is never mutated.
pub fn apply_action(
    state: &GameState,
    action: &Action,
    rng: &mut dyn RandomSource,
    config: &GameConfig,
) -> (GameState, TransitionResult) {
    let mut next = state.clone();

    let result = match action {
        Action::Toggle(name) => apply_toggle(&mut next, name),
        Action::Submit => apply_submit(&mut next, config),
        Action::Hint => apply_hint(&mut next, rng, config),
        Action::GiveUp => apply_give_up(&mut next),
    };

    (next, result)
}

// ---------------------------------------------------------------------------
// Individual transition handlers (private)
// ---------------------------------------------------------------------------

fn apply_toggle(state: &mut GameState, name: &str) -> TransitionResult {
    let kind = "toggle";
    if state.is_terminal()
        || state.revealed.contains(name)
        || !state.deck.iter().any(|n| n == name)
    {
        return TransitionResult::noop(kind);
    }

    if let Some(pos) = state.selected.iter().position(|n| n == name) {
        state.selected.remove(pos);
    } else if state.selected.len() < GROUP_SIZE {
        state.selected.push(name.to_string());
    } else {
        // fifth name: ignored
        return TransitionResult::noop(kind);
    }

    TransitionResult {
        action: kind.to_string(),
        applied: true,
        ..Default::default()
    }
}

fn apply_submit(state: &mut GameState, config: &GameConfig) -> TransitionResult {
    let kind = "submit";
    if state.is_terminal() || state.selected.len() != GROUP_SIZE {
        return TransitionResult::noop(kind);
    }

    let guess = std::mem::take(&mut state.selected);
    state.hint_revealed.clear();
    state.guesses.push(guess.clone());

    let hit = state
        .puzzle
        .groups
        .iter()
        .find(|g| g.matches(&guess))
        .cloned();

    let mut result = TransitionResult {
        action: kind.to_string(),
        applied: true,
        ..Default::default()
    };

    match hit {
        Some(group) => {
            state.revealed.extend(group.players.iter().cloned());
            state.found.push(group.clone());
            result.matched = Some(group);
            if state.found.len() == GROUP_COUNT {
                state.phase = Phase::Terminal(Status::Won);
                result.entered_terminal = Some(Status::Won);
            }
        }
        None => {
            state.incorrect_count += 1;
            result.incorrect = true;
            if state.incorrect_count >= config.max_incorrect {
                reveal_solution(state);
                state.phase = Phase::Terminal(Status::Lost);
                result.entered_terminal = Some(Status::Lost);
            }
        }
    }

    result
}

fn apply_hint(
    state: &mut GameState,
    rng: &mut dyn RandomSource,
    config: &GameConfig,
) -> TransitionResult {
    let kind = "hint";
    if state.is_terminal() || state.hints_used >= config.max_hints {
        return TransitionResult::noop(kind);
    }

    let target = match state
        .puzzle
        .groups
        .iter()
        .find(|g| !state.is_found(&g.category))
    {
        Some(g) => g.clone(),
        None => return TransitionResult::noop(kind),
    };

    let repeat = state.last_hint_category.as_deref() == Some(target.category.as_str());
    let count = if repeat {
        config.hint_repeat_reveal
    } else {
        config.hint_reveal
    };

    let candidates: Vec<String> = target
        .players
        .iter()
        .filter(|p| !state.revealed.contains(*p))
        .cloned()
        .collect();
    let picks = sample(&candidates, count, rng);

    state.hint_revealed = picks.iter().cloned().collect();
    state.hints_used += 1;
    state.last_hint_category = Some(target.category);

    TransitionResult {
        action: kind.to_string(),
        applied: true,
        hinted: picks,
        ..Default::default()
    }
}

fn apply_give_up(state: &mut GameState) -> TransitionResult {
    let kind = "give_up";
    if state.is_terminal() {
        return TransitionResult::noop(kind);
    }

    reveal_solution(state);
    state.phase = Phase::Terminal(Status::GaveUp);

    TransitionResult {
        action: kind.to_string(),
        applied: true,
        entered_terminal: Some(Status::GaveUp),
        ..Default::default()
    }
}

/// Lay the whole puzzle open: every group found, every name revealed.
/// Used when the game ends without a win.
fn reveal_solution(state: &mut GameState) {
    state.revealed = state.puzzle.names().into_iter().collect();
    state.found = state.puzzle.groups.clone();
    state.selected.clear();
    state.hint_revealed.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Mode, Puzzle, PuzzleGroup};
    use crate::rng::SeededSource;
    use crate::state::create_initial_state;

    fn puzzle() -> Puzzle {
        let groups = ["a", "b", "c", "d"]
            .iter()
            .map(|p| PuzzleGroup {
                category: p.to_uppercase(),
                players: (1..=4).map(|i| format!("{}{}", p, i)).collect(),
            })
            .collect();
        Puzzle::new(groups)
    }

    fn fresh() -> GameState {
        let p = puzzle();
        let deck = p.names();
        create_initial_state(p, deck, Mode::Random, "test")
    }

    fn step(state: &GameState, action: Action) -> (GameState, TransitionResult) {
        let mut rng = SeededSource::from_seed_str("transitions");
        apply_action(state, &action, &mut rng, &GameConfig::default())
    }

    fn select(mut state: GameState, names: &[&str]) -> GameState {
        for n in names {
            state = step(&state, Action::Toggle(n.to_string())).0;
        }
        state
    }

    #[test]
    fn test_toggle_adds_and_removes() {
        let s = select(fresh(), &["a1", "b2"]);
        assert_eq!(s.selected, vec!["a1", "b2"]);
        let s = select(s, &["a1"]);
        assert_eq!(s.selected, vec!["b2"]);
    }

    #[test]
    fn test_fifth_toggle_ignored() {
        let s = select(fresh(), &["a1", "b1", "c1", "d1"]);
        let (next, result) = step(&s, Action::Toggle("a2".to_string()));
        assert!(!result.applied);
        assert_eq!(next.selected, vec!["a1", "b1", "c1", "d1"]);
    }

    #[test]
    fn test_toggle_unknown_name_ignored() {
        let (next, result) = step(&fresh(), Action::Toggle("zz".to_string()));
        assert!(!result.applied);
        assert!(next.selected.is_empty());
    }

    #[test]
    fn test_submit_requires_four() {
        let s = select(fresh(), &["a1", "a2", "a3"]);
        let (next, result) = step(&s, Action::Submit);
        assert!(!result.applied);
        assert!(next.guesses.is_empty());
        assert_eq!(next.selected.len(), 3);
    }

    #[test]
    fn test_correct_submit_reveals_group() {
        let s = select(fresh(), &["a3", "a1", "a4", "a2"]);
        let (next, result) = step(&s, Action::Submit);
        assert!(result.applied);
        assert_eq!(result.matched.as_ref().map(|g| g.category.as_str()), Some("A"));
        assert_eq!(next.found.len(), 1);
        assert!(next.revealed.contains("a3"));
        assert!(next.selected.is_empty());
        assert_eq!(next.guesses, vec![vec!["a3", "a1", "a4", "a2"]]);
        assert_eq!(next.phase, Phase::InProgress);
    }

    #[test]
    fn test_revealed_name_cannot_be_selected() {
        let s = select(fresh(), &["a1", "a2", "a3", "a4"]);
        let (s, _) = step(&s, Action::Submit);
        let (next, result) = step(&s, Action::Toggle("a1".to_string()));
        assert!(!result.applied);
        assert!(next.selected.is_empty());
    }

    #[test]
    fn test_four_misses_lose() {
        let mut s = fresh();
        for i in 1..=4 {
            let names: Vec<String> = ["a", "b", "c", "d"].iter().map(|p| format!("{}{}", p, i)).collect();
            let refs: Vec<&str> = names.iter().map(String::as_str).collect();
            s = select(s, &refs);
            let (next, result) = step(&s, Action::Submit);
            assert!(result.incorrect);
            s = next;
            if i < 4 {
                assert_eq!(result.entered_terminal, None);
            } else {
                assert_eq!(result.entered_terminal, Some(Status::Lost));
            }
        }
        assert_eq!(s.incorrect_count, 4);
        assert_eq!(s.phase, Phase::Terminal(Status::Lost));
    }

    #[test]
    fn test_loss_lays_solution_open() {
        let s = select(fresh(), &["b1", "b2", "b3", "b4"]);
        let (mut s, _) = step(&s, Action::Submit);
        for i in 1..=4 {
            let names: Vec<String> = ["a", "b", "c", "d"].iter().map(|p| format!("{}{}", p, i)).collect();
            let extra = format!("a{}", i % 4 + 1);
            let mut misses: Vec<&str> = names.iter().filter(|n| !n.starts_with('b')).map(String::as_str).collect();
            misses.push(extra.as_str());
            s = select(s, &misses);
            s = step(&s, Action::Submit).0;
        }
        assert_eq!(s.phase, Phase::Terminal(Status::Lost));
        assert_eq!(s.found, s.puzzle.groups);
        assert_eq!(s.revealed.len(), 16);
        assert!(s.selected.is_empty());
        assert_eq!(s.guesses.len(), 5);
        crate::invariants::validate_state(&s, &GameConfig::default());
    }

    #[test]
    fn test_all_groups_win() {
        let mut s = fresh();
        let mut last = TransitionResult::default();
        for p in ["d", "b", "a", "c"] {
            let names: Vec<String> = (1..=4).map(|i| format!("{}{}", p, i)).collect();
            let refs: Vec<&str> = names.iter().map(String::as_str).collect();
            s = select(s, &refs);
            let (next, result) = step(&s, Action::Submit);
            s = next;
            last = result;
        }
        assert!(last.is_win());
        assert_eq!(s.found.len(), 4);
        assert_eq!(s.phase, Phase::Terminal(Status::Won));
    }

    #[test]
    fn test_hint_escalates_then_caps() {
        let (s, first) = step(&fresh(), Action::Hint);
        assert_eq!(first.hinted.len(), 2);
        assert!(first.hinted.iter().all(|n| n.starts_with('a')));
        assert_eq!(s.last_hint_category.as_deref(), Some("A"));

        let (s, second) = step(&s, Action::Hint);
        assert_eq!(second.hinted.len(), 3);
        assert_eq!(s.hint_revealed.len(), 3);
        assert!(second.hinted.iter().all(|n| n.starts_with('a')));

        let (s, third) = step(&s, Action::Hint);
        assert!(!third.applied);
        assert_eq!(s.hints_used, 2);
    }

    #[test]
    fn test_hint_moves_to_next_unsolved_group() {
        let s = select(fresh(), &["a1", "a2", "a3", "a4"]);
        let (s, _) = step(&s, Action::Submit);
        let (s, result) = step(&s, Action::Hint);
        assert_eq!(result.hinted.len(), 2);
        assert!(result.hinted.iter().all(|n| n.starts_with('b')));
        assert_eq!(s.last_hint_category.as_deref(), Some("B"));
    }

    #[test]
    fn test_submit_clears_hint_highlight() {
        let (s, _) = step(&fresh(), Action::Hint);
        assert!(!s.hint_revealed.is_empty());
        let s = select(s, &["a1", "b1", "c1", "d1"]);
        let (s, _) = step(&s, Action::Submit);
        assert!(s.hint_revealed.is_empty());
    }

    #[test]
    fn test_give_up_reveals_everything_once() {
        let (s, result) = step(&fresh(), Action::GiveUp);
        assert_eq!(result.entered_terminal, Some(Status::GaveUp));
        assert_eq!(s.found, s.puzzle.groups);
        assert_eq!(s.revealed.len(), 16);

        let (again, result) = step(&s, Action::GiveUp);
        assert!(!result.applied);
        assert_eq!(again, s);
    }

    #[test]
    fn test_terminal_state_ignores_everything() {
        let (s, _) = step(&fresh(), Action::GiveUp);
        for action in [
            Action::Toggle("a1".to_string()),
            Action::Submit,
            Action::Hint,
            Action::GiveUp,
        ] {
            let (next, result) = step(&s, action);
            assert!(!result.applied);
            assert_eq!(next, s);
        }
    }

    #[test]
    fn test_original_state_untouched() {
        let s = fresh();
        let snapshot = s.clone();
        let _ = step(&s, Action::Toggle("a1".to_string()));
        assert_eq!(s, snapshot);
    }
}
