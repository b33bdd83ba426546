//! Append-only hunt history: one timestamped line per shiny find.

use chrono::Utc;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub struct HuntHistory {
    path: PathBuf,
}

impl HuntHistory {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join("history.log"),
        }
    }

    /// Records a shiny find. Failures bubble up so the caller can report
    /// them once; they never stop the hunt.
    pub fn record_shiny(&self, species: &str, rarity: &str, encounters: u64) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(
            file,
            "{} shiny {} ({}) after {} encounters",
            Utc::now().format("%Y-%m-%d %H:%M:%S"),
            species,
            rarity,
            encounters
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_record_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let history = HuntHistory::new(dir.path());

        history.record_shiny("Moonwyrm", "rare", 1234).unwrap();
        history.record_shiny("Ratling", "common", 8).unwrap();

        let contents = fs::read_to_string(dir.path().join("history.log")).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("shiny Moonwyrm (rare) after 1234 encounters"));
        assert!(lines[1].contains("shiny Ratling (common) after 8 encounters"));
    }
}
