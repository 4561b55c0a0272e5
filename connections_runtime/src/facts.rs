//! Fun-fact lookup: category label → facts. Shown when a group is found.

use std::collections::BTreeMap;

use connections_kernel::rng::RandomSource;
use connections_kernel::shuffle::draw_index;

#[derive(Debug, Clone, Default)]
pub struct FactBook {
    facts: BTreeMap<String, Vec<String>>,
}

impl FactBook {
    pub fn new(facts: BTreeMap<String, Vec<String>>) -> Self {
        Self { facts }
    }

    /// Parse `{"<category>": ["fact", ..], ..}`.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn facts(&self, category: &str) -> &[String] {
        self.facts.get(category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Any one fact for `category`, chosen uniformly.
    pub fn pick(&self, category: &str, rng: &mut dyn RandomSource) -> Option<&str> {
        let facts = self.facts(category);
        if facts.is_empty() {
            return None;
        }
        Some(facts[draw_index(rng, facts.len())].as_str())
    }
}
