//! Species table: creature identifiers, rarity classes and encounter weights.
//!
//! The table is loaded once at startup and never mutated afterwards. Weights
//! are resolved per rarity class; a class with no configured weight gets an
//! effective weight of 0, which silently makes those species undrawable.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// One drawable creature in the encounter table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Species {
    pub name: String,
    pub rarity: String,
}

/// Errors from weighted selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionError {
    /// Every entry resolves to weight 0, so no draw is well-defined.
    InvalidWeightTable,
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionError::InvalidWeightTable => {
                write!(f, "weight table has zero total weight")
            }
        }
    }
}

impl std::error::Error for SelectionError {}

/// The rarity-weighted encounter table.
#[derive(Debug, Clone)]
pub struct SpeciesTable {
    entries: Vec<Species>,
    weights: Vec<u64>,
    total_weight: u64,
}

impl SpeciesTable {
    /// Builds a table from `name -> rarity` pairs and a rarity weight map.
    ///
    /// Entry order is preserved so seeded draws are reproducible.
    pub fn new(species: Vec<Species>, rarity_weights: &HashMap<String, u32>) -> Self {
        let weights: Vec<u64> = species
            .iter()
            .map(|s| u64::from(rarity_weights.get(&s.rarity).copied().unwrap_or(0)))
            .collect();
        let total_weight = weights.iter().sum();

        Self {
            entries: species,
            weights,
            total_weight,
        }
    }

    /// Loads the species table from a JSON file mapping name to rarity class.
    ///
    /// A missing or malformed file is a fatal startup condition; callers are
    /// expected to abort rather than start a partial engine.
    pub fn load(path: &Path, rarity_weights: &HashMap<String, u32>) -> io::Result<Self> {
        let json = fs::read_to_string(path)?;
        let raw: HashMap<String, String> = serde_json::from_str(&json)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        // Sort for a stable draw order; JSON maps carry none of their own.
        let mut names: Vec<String> = raw.keys().cloned().collect();
        names.sort();

        let species = names
            .into_iter()
            .map(|name| {
                let rarity = raw[&name].clone();
                Species { name, rarity }
            })
            .collect();

        Ok(Self::new(species, rarity_weights))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    /// Draws one species with probability proportional to its rarity weight.
    ///
    /// Each call is independent; the same species may repeat. Weight-0
    /// entries carry no probability mass and can never be returned.
    pub fn select(&self, rng: &mut impl Rng) -> Result<&Species, SelectionError> {
        if self.total_weight == 0 {
            return Err(SelectionError::InvalidWeightTable);
        }

        let draw = rng.gen_range(0..self.total_weight);
        let mut cumulative = 0u64;
        for (species, weight) in self.entries.iter().zip(&self.weights) {
            cumulative += weight;
            if draw < cumulative {
                return Ok(species);
            }
        }

        // total_weight is the sum of the walked weights, so the walk always
        // terminates inside the loop when total_weight > 0.
        unreachable!("draw below total weight must land on an entry")
    }
}
