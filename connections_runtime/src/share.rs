//! Share text: one row of colored squares per guess.
//!
//! Each name is colored by the index of the group it belongs to, so a
//! solved guess is a uniform row and a miss shows how it was mixed.

use connections_kernel::domain::Puzzle;

use crate::config::ShareConfig;

const GROUP_COLORS: [&str; 4] = ["🟪", "🟩", "🟦", "🟨"];
const NO_GROUP: &str = "⬛";

/// Square for one name.
pub fn color_for(puzzle: &Puzzle, name: &str) -> &'static str {
    puzzle
        .group_index_of(name)
        .and_then(|i| GROUP_COLORS.get(i).copied())
        .unwrap_or(NO_GROUP)
}

pub fn format_share(
    puzzle: &Puzzle,
    puzzle_id: &str,
    guesses: &[Vec<String>],
    config: &ShareConfig,
) -> String {
    let mut lines = Vec::with_capacity(guesses.len() + 2);
    lines.push(format!("{} #{}", config.title, puzzle_id));
    for guess in guesses {
        lines.push(guess.iter().map(|n| color_for(puzzle, n)).collect::<String>());
    }
    if let Some(link) = &config.link {
        lines.push(link.clone());
    }
    lines.join("\n")
}
