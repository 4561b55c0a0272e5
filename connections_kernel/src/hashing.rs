/// Connections kernel — Canonical Puzzle Hashing
///
/// Deterministic serialization + SHA-256 of a Puzzle. A stored daily
/// outcome keeps this fingerprint so a reload can tell whether the seed
/// still regenerates the puzzle that was actually played.
///
/// Rules:
///   - generator_version first
///   - groups in puzzle order, players in group order
///   - UTF-8 JSON, no whitespace

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::domain::Puzzle;
use crate::GENERATOR_VERSION;

/// Canonical JSON bytes of a puzzle.
pub fn canonical_serialize(puzzle: &Puzzle) -> Vec<u8> {
    build_canonical_value(puzzle).to_string().into_bytes()
}

/// SHA-256 of the canonical serialization. Lowercase hex.
pub fn puzzle_fingerprint(puzzle: &Puzzle) -> String {
    let digest = Sha256::digest(canonical_serialize(puzzle));
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

fn build_canonical_value(puzzle: &Puzzle) -> Value {
    let groups: Vec<Value> = puzzle
        .groups
        .iter()
        .map(|g| {
            let mut m = Map::new();
            m.insert("category".to_string(), Value::String(g.category.clone()));
            m.insert(
                "players".to_string(),
                Value::Array(g.players.iter().cloned().map(Value::String).collect()),
            );
            Value::Object(m)
        })
        .collect();

    let mut root = Map::new();
    root.insert(
        "generator_version".to_string(),
        Value::Number(GENERATOR_VERSION.into()),
    );
    root.insert("groups".to_string(), Value::Array(groups));
    Value::Object(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PuzzleGroup;

    fn puzzle(first: &str) -> Puzzle {
        Puzzle::new(vec![PuzzleGroup {
            category: "A".to_string(),
            players: vec![first.to_string(), "x".to_string()],
        }])
    }

    #[test]
    fn test_canonical_layout() {
        let json = String::from_utf8(canonical_serialize(&puzzle("p"))).unwrap();
        assert_eq!(
            json,
            r#"{"generator_version":1,"groups":[{"category":"A","players":["p","x"]}]}"#
        );
    }

    #[test]
    fn test_fingerprint_tracks_content() {
        let a = puzzle_fingerprint(&puzzle("p"));
        assert_eq!(a.len(), 64);
        assert_eq!(a, puzzle_fingerprint(&puzzle("p")));
        assert_ne!(a, puzzle_fingerprint(&puzzle("q")));
    }
}
