/// Connections kernel — Category Catalog
///
/// Static, read-only list of categories the generator draws from.
/// Validation here catches authoring defects before any shuffle runs.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::domain::Category;
use crate::{GROUP_COUNT, GROUP_SIZE};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("catalog has {found} categories, need at least {}", GROUP_COUNT)]
    TooFewCategories { found: usize },
    #[error("category label is empty")]
    EmptyLabel,
    #[error("category {0:?} appears more than once")]
    DuplicateCategory(String),
    #[error("category {category:?} has {size} players, need at least {}", GROUP_SIZE)]
    PoolTooSmall { category: String, size: usize },
    #[error("category {category:?} lists {player:?} twice")]
    DuplicatePlayer { category: String, player: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// Parse `[{"category": .., "players": [..]}, ..]` and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let categories: Vec<Category> = serde_json::from_str(json)?;
        let catalog = Self::new(categories);
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Structural checks: enough categories, unique labels, pools of at
    /// least four distinct names.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.categories.len() < GROUP_COUNT {
            return Err(CatalogError::TooFewCategories {
                found: self.categories.len(),
            });
        }

        let mut labels = BTreeSet::new();
        for c in &self.categories {
            if c.category.is_empty() {
                return Err(CatalogError::EmptyLabel);
            }
            if !labels.insert(c.category.as_str()) {
                return Err(CatalogError::DuplicateCategory(c.category.clone()));
            }
            if c.players.len() < GROUP_SIZE {
                return Err(CatalogError::PoolTooSmall {
                    category: c.category.clone(),
                    size: c.players.len(),
                });
            }
            let mut seen = BTreeSet::new();
            for p in &c.players {
                if !seen.insert(p.as_str()) {
                    return Err(CatalogError::DuplicatePlayer {
                        category: c.category.clone(),
                        player: p.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// True if some choice of four categories has pairwise-disjoint pools.
    ///
    /// Exhaustive search, meant for authoring-time checks. A catalog that
    /// fails this can never produce a puzzle.
    pub fn has_disjoint_selection(&self) -> bool {
        let pools: Vec<BTreeSet<&str>> = self
            .categories
            .iter()
            .map(|c| c.players.iter().map(String::as_str).collect())
            .collect();
        let mut chosen = Vec::with_capacity(GROUP_COUNT);
        search_disjoint(&pools, 0, &mut chosen)
    }
}

fn search_disjoint<'a>(
    pools: &'a [BTreeSet<&'a str>],
    start: usize,
    chosen: &mut Vec<&'a BTreeSet<&'a str>>,
) -> bool {
    if chosen.len() == GROUP_COUNT {
        return true;
    }
    for i in start..pools.len() {
        let candidate = &pools[i];
        if chosen.iter().all(|c| c.is_disjoint(candidate)) {
            chosen.push(candidate);
            if search_disjoint(pools, i + 1, chosen) {
                return true;
            }
            chosen.pop();
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat(label: &str, players: &[&str]) -> Category {
        Category {
            category: label.to_string(),
            players: players.iter().map(|p| p.to_string()).collect(),
        }
    }

    fn four_disjoint() -> Vec<Category> {
        vec![
            cat("A", &["a1", "a2", "a3", "a4"]),
            cat("B", &["b1", "b2", "b3", "b4"]),
            cat("C", &["c1", "c2", "c3", "c4"]),
            cat("D", &["d1", "d2", "d3", "d4"]),
        ]
    }

    #[test]
    fn test_valid_catalog_passes() {
        let c = Catalog::new(four_disjoint());
        assert!(c.validate().is_ok());
        assert!(c.has_disjoint_selection());
    }

    #[test]
    fn test_too_few_categories() {
        let c = Catalog::new(four_disjoint()[..3].to_vec());
        assert!(matches!(
            c.validate(),
            Err(CatalogError::TooFewCategories { found: 3 })
        ));
    }

    #[test]
    fn test_small_pool_rejected() {
        let mut cats = four_disjoint();
        cats[2] = cat("C", &["c1", "c2", "c3"]);
        assert!(matches!(
            Catalog::new(cats).validate(),
            Err(CatalogError::PoolTooSmall { size: 3, .. })
        ));
    }

    #[test]
    fn test_duplicate_label_and_player() {
        let mut cats = four_disjoint();
        cats[1].category = "A".to_string();
        assert!(matches!(
            Catalog::new(cats).validate(),
            Err(CatalogError::DuplicateCategory(_))
        ));

        let mut cats = four_disjoint();
        cats[0] = cat("A", &["a1", "a2", "a1", "a4"]);
        assert!(matches!(
            Catalog::new(cats).validate(),
            Err(CatalogError::DuplicatePlayer { .. })
        ));
    }

    #[test]
    fn test_overlapping_catalog_has_no_selection() {
        let mut cats = four_disjoint();
        cats[3] = cat("D", &["d1", "d2", "d3", "a1"]);
        let c = Catalog::new(cats);
        assert!(c.validate().is_ok());
        assert!(!c.has_disjoint_selection());
    }

    #[test]
    fn test_from_json_str() {
        let json = r#"[
            {"category": "A", "players": ["a1", "a2", "a3", "a4"]},
            {"category": "B", "players": ["b1", "b2", "b3", "b4"]},
            {"category": "C", "players": ["c1", "c2", "c3", "c4"]},
            {"category": "D", "players": ["d1", "d2", "d3", "d4", "d5"]}
        ]"#;
        let c = Catalog::from_json_str(json).unwrap();
        assert_eq!(c.len(), 4);
        assert!(matches!(
            Catalog::from_json_str("{not json"),
            Err(CatalogError::Parse(_))
        ));
    }
}
