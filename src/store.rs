//! Persistence for confirmed gamma settings.

use crate::error::GammaError;

use log::debug;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Key-value store for confirmed gamma lines.
///
/// Keys are device data-file paths; values are the last confirmed raw
/// encoded lines. `put` only stages a value in memory; `flush` makes the
/// staged state durable.
pub trait SettingsStore {
    /// Look up the persisted value for a key.
    fn get(&self, key: &str) -> Option<&str>;

    /// Stage a value under a key.
    fn put(&mut self, key: &str, value: &str);

    /// Make staged values durable.
    fn flush(&self) -> Result<(), GammaError>;
}

/// File-backed [`SettingsStore`] serialized as a single JSON object.
///
/// Intended lifecycle: opened once at process start, flushed on each
/// confirmed edit. A missing file on open is the first-run state, not an
/// error; a file that exists but fails to decode is reported, since
/// silently starting empty would discard the user's calibration.
pub struct JsonStore {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl JsonStore {
    /// Open a store at `path`, loading existing contents if present.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, GammaError> {
        let path = path.into();
        let values = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => return Err(err.into()),
        };
        debug!("opened store {} ({} entries)", path.display(), values.len());
        Ok(Self { path, values })
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonStore {
    fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    fn put(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_owned(), value.to_owned());
    }

    fn flush(&self) -> Result<(), GammaError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        // Write-then-rename so a crash mid-flush never truncates the
        // previous store contents.
        let bytes = serde_json::to_vec_pretty(&self.values)?;
        let temp_path = self.path.with_extension("json.tmp");
        {
            let mut file = fs::OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;
            file.write_all(&bytes)?;
            file.sync_all()?;
        }
        fs::rename(&temp_path, &self.path)?;

        debug!(
            "flushed {} entries to {}",
            self.values.len(),
            self.path.display()
        );
        Ok(())
    }
}
