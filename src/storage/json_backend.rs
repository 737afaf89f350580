use std::{
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use crate::{errors::Result, utils::paths};

use super::StateStore;

const TMP_SUFFIX: &str = "tmp";

/// Stores the document as one JSON file, replaced atomically on every save.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store rooted in the application data directory (`SEPARADOR_HOME` or `~/.separador`).
    pub fn new_default() -> Self {
        Self::new(paths::state_file())
    }

    pub fn in_dir(dir: &Path, file_name: &str) -> Self {
        Self::new(dir.join(file_name))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for JsonFileStore {
    fn load_raw(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save_raw(&self, document: &str) -> Result<()> {
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, document)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), bytes = document.len(), "saved state");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

pub(crate) fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

pub(crate) fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        paths::ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in_temp_dir() -> (JsonFileStore, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let store = JsonFileStore::in_dir(&temp.path().join("nested"), "state.json");
        (store, temp)
    }

    #[test]
    fn missing_file_reads_as_first_run() {
        let (store, _guard) = store_in_temp_dir();
        assert_eq!(store.load_raw().expect("load"), None);
    }

    #[test]
    fn save_creates_parent_dirs_and_overwrites() {
        let (store, _guard) = store_in_temp_dir();
        store.save_raw("{\"v\":1}").expect("first save");
        store.save_raw("{\"v\":2}").expect("second save");
        assert_eq!(store.load_raw().expect("load").as_deref(), Some("{\"v\":2}"));
        assert!(!tmp_path(store.path()).exists());
    }

    #[test]
    fn clear_is_idempotent() {
        let (store, _guard) = store_in_temp_dir();
        store.save_raw("{}").expect("save");
        store.clear().expect("clear");
        store.clear().expect("clear again");
        assert_eq!(store.load_raw().expect("load"), None);
    }

    #[test]
    fn tmp_path_appends_suffix() {
        assert_eq!(
            tmp_path(Path::new("/data/state.json")),
            PathBuf::from("/data/state.json.tmp")
        );
        assert_eq!(tmp_path(Path::new("/data/state")), PathBuf::from("/data/state.tmp"));
    }
}
