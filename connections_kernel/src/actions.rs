/// Connections kernel — Player Actions
///
/// Actions are pure data. They carry intent only; transitions.rs decides
/// what they do to a GameState.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "name", rename_all = "snake_case")]
pub enum Action {
    /// Add or remove one name from the candidate guess.
    Toggle(String),
    /// Submit the four selected names.
    Submit,
    /// Highlight names of the first unsolved group.
    Hint,
    /// Reveal everything and end the game.
    GiveUp,
}

impl Action {
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Toggle(_) => "toggle",
            Action::Submit => "submit",
            Action::Hint => "hint",
            Action::GiveUp => "give_up",
        }
    }
}
