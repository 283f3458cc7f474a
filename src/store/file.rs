use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::error::Result;
use crate::store::kv::{storage_error, KeyValue, KvStore};

/// One JSON file per key under a root directory. Same schema as the
/// in-memory backing, but sessions and plan histories survive restarts.
#[derive(Debug)]
pub struct FileKv {
    root: PathBuf,
}

impl FileKv {
    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl KeyValue for FileKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(storage_error("failed to read key", err)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::write(self.path_for(key), value)
            .map_err(|err| storage_error("failed to write key", err))
    }
}

/// Durable session store rooted at a directory.
pub type FileStore = KvStore<FileKv>;

impl FileStore {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)
            .map_err(|err| storage_error("failed to create store directory", err))?;
        Ok(KvStore::with_backing(FileKv { root }))
    }
}
