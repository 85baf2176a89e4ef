//! On-disk JSON snapshots of the whole store.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::models::{Country, Neighbor};
use crate::store::StoreError;

/// Serialized form of every collection.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub countries: Vec<Country>,
    #[serde(default)]
    pub neighbors: Vec<Neighbor>,
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    countries: &'a [Country],
    neighbors: &'a [Neighbor],
}

/// Load a snapshot; a missing file is an empty store.
pub fn load(path: &Path) -> Result<Snapshot, StoreError> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "No snapshot found, starting empty");
        return Ok(Snapshot::default());
    }

    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Write a snapshot next to `path` and move it into place.
pub fn save(path: &Path, countries: &[Country], neighbors: &[Neighbor]) -> Result<(), StoreError> {
    let tmp = path.with_extension("json.tmp");
    {
        let mut writer = BufWriter::new(File::create(&tmp)?);
        serde_json::to_writer(&mut writer, &SnapshotRef { countries, neighbors })?;
        writer.flush()?;
    }
    fs::rename(&tmp, path)?;

    tracing::debug!(
        path = %path.display(),
        countries = countries.len(),
        neighbors = neighbors.len(),
        "Saved store snapshot"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = load(&dir.path().join("absent.json")).unwrap();
        assert!(snapshot.countries.is_empty());
        assert!(snapshot.neighbors.is_empty());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load(&path), Err(StoreError::Serialization(_))));
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        save(&path, &[], &[]).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
        assert!(load(&path).unwrap().countries.is_empty());
    }
}
