//! Application configuration.
//!
//! Loaded from a JSON file at startup. A missing file yields the defaults; a
//! malformed file or out-of-range value is a fatal startup error — the
//! engine never starts on partial configuration.

use crate::constants::{DEFAULT_ENCOUNTER_DELAY_SECS, DEFAULT_SHINY_RATE};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

fn default_encounter_delay() -> f64 {
    DEFAULT_ENCOUNTER_DELAY_SECS
}

fn default_shiny_rate() -> u32 {
    DEFAULT_SHINY_RATE
}

fn default_rarity_weights() -> HashMap<String, u32> {
    [
        ("common".to_string(), 60),
        ("uncommon".to_string(), 25),
        ("rare".to_string(), 10),
        ("legendary".to_string(), 5),
    ]
    .into_iter()
    .collect()
}

fn default_species_file() -> PathBuf {
    PathBuf::from("assets/species.json")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_encounter_delay")]
    pub encounter_delay_secs: f64,
    #[serde(default = "default_shiny_rate")]
    pub shiny_rate: u32,
    #[serde(default)]
    pub mute_audio: bool,
    #[serde(default = "default_rarity_weights")]
    pub rarity_weights: HashMap<String, u32>,
    #[serde(default = "default_species_file")]
    pub species_file: PathBuf,
    #[serde(default)]
    pub sprites_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            encounter_delay_secs: default_encounter_delay(),
            shiny_rate: default_shiny_rate(),
            mute_audio: false,
            rarity_weights: default_rarity_weights(),
            species_file: default_species_file(),
            sprites_dir: None,
        }
    }
}

impl Config {
    /// Loads configuration from `path`. An absent file is fine (defaults
    /// apply); anything else that fails is fatal.
    pub fn load(path: &Path) -> io::Result<Self> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(e) => return Err(e),
        };

        let config: Config = serde_json::from_str(&json)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> io::Result<()> {
        if !(self.encounter_delay_secs > 0.0) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "encounter_delay_secs must be positive, got {}",
                    self.encounter_delay_secs
                ),
            ));
        }
        if self.shiny_rate < 1 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "shiny_rate must be at least 1",
            ));
        }
        Ok(())
    }
}
