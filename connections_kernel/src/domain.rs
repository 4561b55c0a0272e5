/// Connections kernel — Core Domain Types
///
/// Pure data. Transition logic lives in transitions.rs.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::GROUP_SIZE;

// ── Catalog ────────────────────────────────────────────────────────

/// A labeled pool of candidate names sharing a trait.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Category {
    pub category: String,
    pub players: Vec<String>,
}

// ── Puzzle ─────────────────────────────────────────────────────────

/// The four-name realization of a Category within one puzzle instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PuzzleGroup {
    pub category: String,
    pub players: Vec<String>,
}

impl PuzzleGroup {
    /// True if `names` is exactly this group's player set, in any order.
    pub fn matches(&self, names: &[String]) -> bool {
        if names.len() != GROUP_SIZE || self.players.len() != GROUP_SIZE {
            return false;
        }
        let ours: BTreeSet<&str> = self.players.iter().map(String::as_str).collect();
        let theirs: BTreeSet<&str> = names.iter().map(String::as_str).collect();
        ours == theirs
    }

    pub fn contains(&self, name: &str) -> bool {
        self.players.iter().any(|p| p == name)
    }
}

/// Four pairwise-disjoint groups, sixteen names in total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Puzzle {
    pub groups: Vec<PuzzleGroup>,
}

impl Puzzle {
    pub fn new(groups: Vec<PuzzleGroup>) -> Self {
        Self { groups }
    }

    /// All names, group by group, in puzzle order.
    pub fn names(&self) -> Vec<String> {
        self.groups
            .iter()
            .flat_map(|g| g.players.iter().cloned())
            .collect()
    }

    /// Index of the group holding `name`, if any.
    pub fn group_index_of(&self, name: &str) -> Option<usize> {
        self.groups.iter().position(|g| g.contains(name))
    }

    pub fn group(&self, category: &str) -> Option<&PuzzleGroup> {
        self.groups.iter().find(|g| g.category == category)
    }
}

// ── Game modes and outcomes ────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Seeded by the calendar day, one terminal outcome per day.
    Daily,
    /// Unseeded, replayable, never touches streaks.
    Random,
}

/// How a finished game ended. Serialized as `won | lost | gaveUp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    Won,
    Lost,
    GaveUp,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Won => "won",
            Status::Lost => "lost",
            Status::GaveUp => "gaveUp",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Idle,
    InProgress,
    Terminal(Status),
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Terminal(_))
    }
}

// ── Tunables ───────────────────────────────────────────────────────

/// Game thresholds. Defaults match the shipped game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct GameConfig {
    /// Wrong guesses allowed before the game is lost.
    pub max_incorrect: u32,
    /// Hints allowed per session.
    pub max_hints: u32,
    /// Names highlighted by a hint on a fresh category.
    pub hint_reveal: usize,
    /// Names highlighted when the previous hint targeted the same category.
    pub hint_repeat_reveal: usize,
    /// Reshuffles the generator tries before giving up on the catalog.
    pub max_generation_attempts: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_incorrect: 4,
            max_hints: 2,
            hint_reveal: 2,
            hint_repeat_reveal: 3,
            max_generation_attempts: 100,
        }
    }
}

impl GameConfig {
    /// Reject thresholds no game can be played under.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_incorrect == 0 {
            return Err("max_incorrect must be at least 1".to_string());
        }
        if self.hint_reveal == 0 || self.hint_repeat_reveal == 0 {
            return Err("hints must reveal at least one name".to_string());
        }
        if self.max_generation_attempts == 0 {
            return Err("max_generation_attempts must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Structured outcome of applying one action to a game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionResult {
    pub action: String,
    /// False when the action was a no-op (terminal game, bad selection, ...).
    pub applied: bool,
    /// Group solved by this submit.
    pub matched: Option<PuzzleGroup>,
    /// This submit matched nothing.
    pub incorrect: bool,
    /// Names highlighted by this hint.
    pub hinted: Vec<String>,
    /// Set only on the transition that ended the game.
    pub entered_terminal: Option<Status>,
}

impl TransitionResult {
    pub fn noop(action: &str) -> Self {
        Self {
            action: action.to_string(),
            ..Default::default()
        }
    }

    pub fn is_win(&self) -> bool {
        self.entered_terminal == Some(Status::Won)
    }
}
