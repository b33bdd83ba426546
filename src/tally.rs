//! Persistence for the lifetime shiny tally.
//!
//! Stored as a checksummed binary file in the platform data directory:
//! version magic (8 bytes), payload length (4 bytes), bincode payload,
//! SHA256 digest (32 bytes). An absent or damaged file loads as zero.

use crate::constants::TALLY_VERSION_MAGIC;
use bincode;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TallyRecord {
    total_shinies: u64,
}

/// Manages the on-disk shiny tally.
pub struct TallyStore {
    path: PathBuf,
}

impl TallyStore {
    /// Creates a store rooted at the platform data directory.
    pub fn new() -> io::Result<Self> {
        let project_dirs = ProjectDirs::from("", "", "idlemon").ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "could not determine data directory")
        })?;

        let data_dir = project_dirs.data_dir();
        fs::create_dir_all(data_dir)?;

        Ok(Self {
            path: data_dir.join("shiny_tally.dat"),
        })
    }

    /// Creates a store at an explicit path.
    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Directory holding the tally file, shared with the hunt history log.
    pub fn data_dir(&self) -> Option<&std::path::Path> {
        self.path.parent()
    }

    /// Loads the tally, defaulting to 0 when the file is absent or fails
    /// verification. Corruption here is never worth refusing to start over.
    pub fn load(&self) -> u64 {
        self.read_verified().unwrap_or(0)
    }

    fn read_verified(&self) -> io::Result<u64> {
        let mut file = fs::File::open(&self.path)?;

        let mut magic_bytes = [0u8; 8];
        file.read_exact(&mut magic_bytes)?;
        if u64::from_le_bytes(magic_bytes) != TALLY_VERSION_MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "tally file has wrong version magic",
            ));
        }

        let mut length_bytes = [0u8; 4];
        file.read_exact(&mut length_bytes)?;
        let data_len = u32::from_le_bytes(length_bytes);

        let mut data = vec![0u8; data_len as usize];
        file.read_exact(&mut data)?;

        let mut stored_checksum = [0u8; 32];
        file.read_exact(&mut stored_checksum)?;

        let mut hasher = Sha256::new();
        hasher.update(magic_bytes);
        hasher.update(length_bytes);
        hasher.update(&data);
        if stored_checksum != hasher.finalize().as_slice() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "tally checksum verification failed",
            ));
        }

        let record: TallyRecord = bincode::deserialize(&data)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(record.total_shinies)
    }

    /// Writes the tally; called after every increment.
    pub fn save(&self, total_shinies: u64) -> io::Result<()> {
        let data = bincode::serialize(&TallyRecord { total_shinies })
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let data_len = data.len() as u32;

        let mut hasher = Sha256::new();
        hasher.update(TALLY_VERSION_MAGIC.to_le_bytes());
        hasher.update(data_len.to_le_bytes());
        hasher.update(&data);
        let checksum = hasher.finalize();

        let mut file = fs::File::create(&self.path)?;
        file.write_all(&TALLY_VERSION_MAGIC.to_le_bytes())?;
        file.write_all(&data_len.to_le_bytes())?;
        file.write_all(&data)?;
        file.write_all(&checksum)?;

        Ok(())
    }
}
