//! JSON-file persistence for collections.
//!
//! Each collection lives in `<data_dir>/<collection>.json` as a JSON array.
//! Writes go to `<collection>.json.tmp`, are fsynced, then renamed over the
//! live file so a crash never leaves a half-written collection behind.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::errors::{StorageError, StorageResult};

#[derive(Debug, Clone)]
pub struct Persistence {
    dir: PathBuf,
}

impl Persistence {
    /// Uses `dir` as the data directory, creating it if needed
    pub fn open(dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StorageError::io(&dir, e))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{}.json", collection))
    }

    /// Reads a collection; a missing file is an empty collection
    pub fn load(&self, collection: &str) -> StorageResult<Vec<Value>> {
        let path = self.path_for(collection);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StorageError::io(path, e)),
        };

        serde_json::from_str(&content).map_err(|e| StorageError::Corrupt {
            path,
            reason: e.to_string(),
        })
    }

    /// Replaces the collection file with `documents`
    pub fn save(&self, collection: &str, documents: &[Value]) -> StorageResult<()> {
        let path = self.path_for(collection);
        let tmp = path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(documents).map_err(|e| StorageError::Corrupt {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        let mut file = File::create(&tmp).map_err(|e| StorageError::io(&tmp, e))?;
        file.write_all(&bytes).map_err(|e| StorageError::io(&tmp, e))?;
        file.sync_all().map_err(|e| StorageError::io(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| StorageError::io(&path, e))?;

        Ok(())
    }
}
