use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use atomicwrites::{AtomicFile, OverwriteBehavior};
use chrono::Utc;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::catalog::CatalogData;

const SNAPSHOT_FORMAT_VERSION: u32 = 1;
const SNAPSHOT_FILE: &str = "catalog.snapshot";
const CHECKSUM_FILE: &str = "catalog.snapshot.sha256";

#[derive(Serialize)]
struct SnapshotEnvelopeRef<'a> {
    version: u32,
    created_at: i64,
    data: &'a CatalogData,
}

#[derive(Deserialize)]
pub(crate) struct SnapshotEnvelope {
    pub version: u32,
    pub created_at: i64,
    pub data: CatalogData,
}

/// Whole-catalog snapshot persistence.
///
/// Snapshots are bincode-encoded, gzip-compressed, and written atomically
/// with a SHA-256 checksum sidecar that is verified on load.
pub(crate) struct SnapshotStore {
    snapshot_path: PathBuf,
    checksum_path: PathBuf,
}

impl SnapshotStore {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        fs::create_dir_all(&data_dir)?;
        Ok(Self {
            snapshot_path: data_dir.join(SNAPSHOT_FILE),
            checksum_path: data_dir.join(CHECKSUM_FILE),
        })
    }

    pub fn save(&self, data: &CatalogData) -> Result<()> {
        let envelope = SnapshotEnvelopeRef {
            version: SNAPSHOT_FORMAT_VERSION,
            created_at: Utc::now().timestamp(),
            data,
        };
        let encoded = bincode::serialize(&envelope)
            .map_err(|e| anyhow!("snapshot serialization failed: {e}"))?;

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&encoded)?;
        let compressed = encoder.finish()?;
        let checksum = format!("{:x}", Sha256::digest(&compressed));

        AtomicFile::new(&self.snapshot_path, OverwriteBehavior::AllowOverwrite)
            .write(|file| file.write_all(&compressed))
            .map_err(|e| anyhow!("snapshot write failed: {e}"))?;
        AtomicFile::new(&self.checksum_path, OverwriteBehavior::AllowOverwrite)
            .write(|file| file.write_all(checksum.as_bytes()))
            .map_err(|e| anyhow!("checksum write failed: {e}"))?;
        Ok(())
    }

    pub fn load(&self) -> Result<Option<SnapshotEnvelope>> {
        if !self.snapshot_path.exists() {
            return Ok(None);
        }

        let compressed = fs::read(&self.snapshot_path)?;
        if self.checksum_path.exists() {
            let expected = fs::read_to_string(&self.checksum_path)?;
            let actual = format!("{:x}", Sha256::digest(&compressed));
            if expected.trim() != actual {
                return Err(anyhow!("snapshot checksum mismatch"));
            }
        }

        let mut decoder = GzDecoder::new(compressed.as_slice());
        let mut encoded = Vec::new();
        decoder.read_to_end(&mut encoded)?;

        let envelope: SnapshotEnvelope = bincode::deserialize(&encoded)
            .map_err(|e| anyhow!("snapshot deserialization failed: {e}"))?;
        if envelope.version != SNAPSHOT_FORMAT_VERSION {
            return Err(anyhow!("unsupported snapshot version: {}", envelope.version));
        }
        Ok(Some(envelope))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_snapshot_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path()).unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path()).unwrap();

        let mut data = CatalogData::default();
        data.counters.exercise = 7;
        store.save(&data).unwrap();

        let envelope = store.load().unwrap().expect("snapshot should exist");
        assert_eq!(envelope.version, SNAPSHOT_FORMAT_VERSION);
        assert_eq!(envelope.data.counters.exercise, 7);
        assert!(envelope.created_at > 0);
    }

    #[test]
    fn test_corrupted_snapshot_fails_checksum() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path()).unwrap();
        store.save(&CatalogData::default()).unwrap();

        let snapshot_path = dir.path().join(SNAPSHOT_FILE);
        let mut bytes = fs::read(&snapshot_path).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0xFF;
        fs::write(&snapshot_path, &bytes).unwrap();

        assert!(store.load().is_err());
    }
}
