/// Connections kernel — Game State Construction

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::{Mode, Phase, Puzzle, PuzzleGroup, Status};

/// One play-through of one puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub puzzle: Puzzle,
    /// Display order of the sixteen names. Fixed for the whole game.
    pub deck: Vec<String>,
    pub mode: Mode,
    /// Day string for daily games, a timestamp token for random ones.
    pub puzzle_id: String,
    pub phase: Phase,
    /// Candidate guess, insertion ordered, at most four names.
    pub selected: Vec<String>,
    /// Names of solved groups.
    pub revealed: BTreeSet<String>,
    /// Transient hint highlight, cleared by the next submit.
    pub hint_revealed: BTreeSet<String>,
    pub found: Vec<PuzzleGroup>,
    pub guesses: Vec<Vec<String>>,
    pub incorrect_count: u32,
    pub hints_used: u32,
    pub last_hint_category: Option<String>,
}

impl GameState {
    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn is_found(&self, category: &str) -> bool {
        self.found.iter().any(|g| g.category == category)
    }

    /// Deck names not yet solved, in deck order.
    pub fn remaining(&self) -> Vec<&str> {
        self.deck
            .iter()
            .filter(|n| !self.revealed.contains(*n))
            .map(String::as_str)
            .collect()
    }

    pub fn guesses_left(&self, max_incorrect: u32) -> u32 {
        max_incorrect.saturating_sub(self.incorrect_count)
    }
}

/// Fresh, in-progress state for a newly generated puzzle.
pub fn create_initial_state(
    puzzle: Puzzle,
    deck: Vec<String>,
    mode: Mode,
    puzzle_id: &str,
) -> GameState {
    GameState {
        puzzle,
        deck,
        mode,
        puzzle_id: puzzle_id.to_string(),
        phase: Phase::InProgress,
        selected: Vec::new(),
        revealed: BTreeSet::new(),
        hint_revealed: BTreeSet::new(),
        found: Vec::new(),
        guesses: Vec::new(),
        incorrect_count: 0,
        hints_used: 0,
        last_hint_category: None,
    }
}

/// Terminal state rebuilt from a stored outcome.
///
/// `revealed` is the union of the found groups and the incorrect counter is
/// recounted from the guess log. Selection and hints start empty; nothing
/// can change them afterwards.
pub fn create_terminal_state(
    puzzle: Puzzle,
    deck: Vec<String>,
    mode: Mode,
    puzzle_id: &str,
    found: Vec<PuzzleGroup>,
    guesses: Vec<Vec<String>>,
    status: Status,
) -> GameState {
    let revealed = found
        .iter()
        .flat_map(|g| g.players.iter().cloned())
        .collect();
    let incorrect_count = guesses
        .iter()
        .filter(|guess| !puzzle.groups.iter().any(|g| g.matches(guess)))
        .count() as u32;
    GameState {
        phase: Phase::Terminal(status),
        revealed,
        found,
        guesses,
        incorrect_count,
        ..create_initial_state(puzzle, deck, mode, puzzle_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_terminal_state_recounts_misses() {
        let p = puzzle();
        let guesses = vec![
            names(&["a1", "b1", "c1", "d1"]),
            names(&["c4", "c3", "c2", "c1"]),
            names(&["a2", "b2", "c2", "d2"]),
            names(&["a3", "b3", "c3", "d3"]),
            names(&["a4", "b4", "c4", "d4"]),
        ];
        let s = create_terminal_state(
            p.clone(),
            p.names(),
            Mode::Daily,
            "2024-01-01",
            p.groups.clone(),
            guesses,
            Status::Lost,
        );
        assert_eq!(s.incorrect_count, 4);
        assert_eq!(s.guesses_left(4), 0);
        assert_eq!(s.revealed.len(), 16);
    }

    #[test]
    fn test_terminal_win_has_no_misses() {
        let p = puzzle();
        let guesses: Vec<Vec<String>> = p.groups.iter().map(|g| g.players.clone()).collect();
        let s = create_terminal_state(
            p.clone(),
            p.names(),
            Mode::Daily,
            "2024-01-01",
            p.groups.clone(),
            guesses,
            Status::Won,
        );
        assert_eq!(s.incorrect_count, 0);
        assert_eq!(s.phase, Phase::Terminal(Status::Won));
    }
}
