//! Population snapshots on disk.
//!
//! Uses bincode for efficient binary serialization and LZ4 for compression.
//! A snapshot captures the whole container (robots, name counter,
//! generation), so loading one resumes the run exactly where it stopped.

use crate::population::store::Population;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Magic bytes for file format identification.
const MAGIC: &[u8; 4] = b"GENS";

/// Current format version.
const VERSION: u8 = 1;

/// Human-inspectable sidecar describing one snapshot file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SnapshotMeta {
    /// Timestamp when saved (Unix epoch seconds).
    pub timestamp: u64,
    /// Generation number at save time.
    pub generation: u64,
    /// Robots stored in the snapshot.
    pub population_size: usize,
    /// Target capacity of the stored population.
    pub desired_size: usize,
}

impl SnapshotMeta {
    /// Describe a population as of now.
    #[must_use]
    pub fn describe(population: &Population) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            timestamp,
            generation: population.generation(),
            population_size: population.current_size(),
            desired_size: population.desired_size(),
        }
    }
}

/// Save a population snapshot to a file with compression.
///
/// # Errors
///
/// Returns an error if serialization or file I/O fails.
pub fn save_snapshot(population: &Population, path: &Path) -> io::Result<()> {
    let encoded = bincode::serialize(population)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    let compressed = lz4_flex::compress_prepend_size(&encoded);

    let mut file = fs::File::create(path)?;
    file.write_all(MAGIC)?;
    file.write_all(&[VERSION])?;
    file.write_all(&compressed)?;

    Ok(())
}

/// Load a population snapshot from a file.
///
/// # Errors
///
/// Returns an error if the file format is invalid or decompression fails.
pub fn load_snapshot(path: &Path) -> io::Result<Population> {
    let mut file = fs::File::open(path)?;

    let mut magic = [0u8; 4];
    file.read_exact(&mut magic)?;
    if &magic != MAGIC {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "invalid file magic",
        ));
    }

    let mut version = [0u8; 1];
    file.read_exact(&mut version)?;
    if version[0] != VERSION {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("unsupported version: {}", version[0]),
        ));
    }

    let mut compressed = Vec::new();
    file.read_to_end(&mut compressed)?;

    let decompressed = lz4_flex::decompress_size_prepended(&compressed)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    let population: Population = bincode::deserialize(&decompressed)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    Ok(population)
}

/// Get the path for a generation snapshot file.
#[must_use]
pub fn snapshot_path(output_dir: &Path, generation: u64) -> PathBuf {
    output_dir.join(format!("gen_{generation:06}.pop"))
}

/// Write the JSON sidecar for a snapshot.
///
/// # Errors
///
/// Returns an error if serialization or file I/O fails.
pub fn write_meta(meta: &SnapshotMeta, path: &Path) -> io::Result<()> {
    let json = serde_json::to_string_pretty(meta)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)
}

/// Read a snapshot's JSON sidecar.
///
/// # Errors
///
/// Returns an error if the file is missing or not valid metadata JSON.
pub fn read_meta(path: &Path) -> io::Result<SnapshotMeta> {
    let json = fs::read_to_string(path)?;
    serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
