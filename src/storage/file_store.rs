//! File Store - a directory-backed key-value store.
//!
//! The [`FileStore`] keeps one record file per key:
//! - Values are written as checksummed records (see [`record`](super::record))
//! - Each write goes to a temporary file, is synced, then renamed into place
//! - Reads verify the checksum before returning the value

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::common::{Error, Result};
use crate::storage::{record, KvStore};

const RECORD_EXT: &str = "kv";
const TEMP_EXT: &str = "tmp";

/// A [`KvStore`] that persists every key as a file in one directory.
///
/// # Directory Layout
/// ```text
/// store/
/// ├── k6170706c65.kv     "apple"  -> [header][value]
/// ├── k62616e616e61.kv   "banana" -> [header][value]
/// └── k.kv               ""       -> [header][value]
/// ```
///
/// File names are `k` followed by the lowercase hex encoding of the key
/// bytes, so any key maps to a portable file name.
///
/// # Durability
/// Every `set` calls `fsync()` on the record before renaming it over the
/// previous version, so a crash leaves either the old or the new value.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a new store directory.
    ///
    /// # Errors
    /// Returns an error if the directory already exists or cannot be created.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        fs::create_dir(&path)?;
        debug!("created file store at {}", path.as_ref().display());

        Ok(Self {
            dir: path.as_ref().to_path_buf(),
        })
    }

    /// Open an existing store directory.
    ///
    /// # Errors
    /// Returns an error if the path doesn't exist or isn't a directory.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let metadata = fs::metadata(&path)?;
        if !metadata.is_dir() {
            return Err(Error::Io(std::io::Error::new(
                ErrorKind::InvalidInput,
                format!("{} is not a directory", path.as_ref().display()),
            )));
        }

        Ok(Self {
            dir: path.as_ref().to_path_buf(),
        })
    }

    /// Open an existing store, or create it if it doesn't exist.
    pub fn open_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::open(path)
        } else {
            Self::create(path)
        }
    }

    /// Directory holding the records.
    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Number of keys stored on disk.
    pub fn key_count(&self) -> Result<usize> {
        let mut count = 0;
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == RECORD_EXT) {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Path of the record file for `key`.
    fn record_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("k{}.{}", hex::encode(key), RECORD_EXT))
    }
}

impl KvStore for FileStore {
    fn get(&mut self, key: &str) -> Result<String> {
        let data = match fs::read(self.record_path(key)) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::KeyNotFound(key.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        record::decode(&data)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.record_path(key);
        let temp = path.with_extension(TEMP_EXT);

        {
            let mut file: File = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp)?;
            file.write_all(&record::encode(value))?;
            file.sync_all()?; // fsync for durability
        }

        fs::rename(&temp, &path)?;
        Ok(())
    }
}
