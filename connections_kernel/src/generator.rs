/// Connections kernel — Puzzle Generator
///
/// Rejection sampling over the catalog:
///   1. Shuffle every category
///   2. Greedily accept categories whose pools share no name with the
///      pools already accepted, stop at four
///   3. Fewer than four? Reshuffle and try again (bounded)
///   4. Shuffle each accepted pool with the same source, keep four names
///
/// The same seed always yields the same Puzzle for the same catalog.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::catalog::{Catalog, CatalogError};
use crate::domain::{Category, GameConfig, Puzzle, PuzzleGroup};
use crate::invariants::try_validate_puzzle;
use crate::rng::{EntropySource, RandomSource, SeededSource};
use crate::shuffle::{sample, shuffle};
use crate::{GROUP_COUNT, GROUP_SIZE};

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("catalog rejected: {0}")]
    Catalog(#[from] CatalogError),
    #[error("no four disjoint categories found after {attempts} attempts")]
    NoDisjointSelection { attempts: u32 },
    #[error("generated puzzle violates invariants: {0}")]
    InvariantViolation(String),
}

/// Generate a puzzle. `Some(seed)` is reproducible, `None` is not.
pub fn generate(
    catalog: &Catalog,
    seed: Option<&str>,
    config: &GameConfig,
) -> Result<Puzzle, GeneratorError> {
    match seed {
        Some(s) => generate_with(catalog, &mut SeededSource::from_seed_str(s), config),
        None => generate_with(catalog, &mut EntropySource::new(), config),
    }
}

/// Generate a puzzle drawing from a caller-owned random source.
pub fn generate_with(
    catalog: &Catalog,
    rng: &mut dyn RandomSource,
    config: &GameConfig,
) -> Result<Puzzle, GeneratorError> {
    catalog.validate()?;

    for attempt in 1..=config.max_generation_attempts {
        let shuffled = shuffle(catalog.categories(), rng);
        let picks = pick_disjoint(&shuffled);
        if picks.len() < GROUP_COUNT {
            log::debug!(
                "[GENERATOR] attempt {} accepted only {} disjoint categories, reshuffling",
                attempt,
                picks.len()
            );
            continue;
        }

        let groups: Vec<PuzzleGroup> = picks
            .into_iter()
            .map(|c| PuzzleGroup {
                category: c.category.clone(),
                players: sample(&c.players, GROUP_SIZE, rng),
            })
            .collect();
        let puzzle = Puzzle::new(groups);
        try_validate_puzzle(&puzzle).map_err(GeneratorError::InvariantViolation)?;

        log::debug!("[GENERATOR] puzzle ready after {} attempt(s)", attempt);
        return Ok(puzzle);
    }

    log::error!(
        "[GENERATOR] gave up after {} attempts, catalog of {} categories lacks disjoint pools",
        config.max_generation_attempts,
        catalog.len()
    );
    Err(GeneratorError::NoDisjointSelection {
        attempts: config.max_generation_attempts,
    })
}

/// Greedy scan in order; a category is accepted only if no name in its
/// pool was used by an accepted category.
fn pick_disjoint(shuffled: &[Category]) -> Vec<&Category> {
    let mut used: BTreeSet<&str> = BTreeSet::new();
    let mut picks = Vec::with_capacity(GROUP_COUNT);
    for c in shuffled {
        if c.players.iter().any(|p| used.contains(p.as_str())) {
            continue;
        }
        used.extend(c.players.iter().map(String::as_str));
        picks.push(c);
        if picks.len() == GROUP_COUNT {
            break;
        }
    }
    picks
}
