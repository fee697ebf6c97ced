use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

use crate::{
    directory::Directory,
    errors::{DirectoryError, Result},
    utils::{
        paths::{ensure_dir, PathResolver},
        persistence::{list_backup_files, read_json, unique_backup_name, write_json_atomic},
    },
};

use super::StorageBackend;

const DEFAULT_RETENTION: usize = 5;

#[derive(Clone)]
pub struct JsonStorage {
    root: PathBuf,
    directories_dir: PathBuf,
    backups_dir: PathBuf,
    state_file: PathBuf,
    retention: usize,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>, retention: Option<usize>) -> Result<Self> {
        let app_root = PathResolver::resolve_base(root);
        ensure_dir(&app_root)?;
        let directories_dir = PathResolver::directory_dir_in(&app_root);
        let backups_dir = PathResolver::backup_dir_in(&app_root);
        ensure_dir(&directories_dir)?;
        ensure_dir(&backups_dir)?;
        let state_file = PathResolver::state_file_in(&app_root);
        Ok(Self {
            root: app_root,
            directories_dir,
            backups_dir,
            state_file,
            retention: retention.unwrap_or(DEFAULT_RETENTION).max(1),
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    pub fn directory_path(&self, name: &str) -> PathBuf {
        self.directories_dir
            .join(format!("{}.json", canonical_name(name)))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.directory_path(name).exists()
    }

    fn backup_dir(&self, name: &str) -> PathBuf {
        self.backups_dir.join(canonical_name(name))
    }

    pub fn backup_path(&self, name: &str, backup_name: &str) -> PathBuf {
        self.backup_dir(name).join(backup_name)
    }

    pub fn last_directory(&self) -> Result<Option<String>> {
        Ok(self.read_state()?.last_directory)
    }

    pub fn record_last_directory(&self, name: Option<&str>) -> Result<()> {
        let mut state = self.read_state()?;
        state.last_directory = name.map(canonical_name);
        write_json_atomic(&self.state_file, &state)
    }

    fn read_state(&self) -> Result<StoreState> {
        if self.state_file.exists() {
            read_json(&self.state_file)
        } else {
            Ok(StoreState::default())
        }
    }

    fn backup_existing_file(&self, name: &str, path: &Path) -> Result<()> {
        if !path.exists() {
            return Ok(());
        }
        let dir = self.backup_dir(name);
        ensure_dir(&dir)?;
        let backup_path = dir.join(unique_backup_name(&dir, &canonical_name(name), None));
        fs::copy(path, &backup_path)?;
        self.prune_backups(name)
    }

    fn prune_backups(&self, name: &str) -> Result<()> {
        let backups = self.list_backups(name)?;
        for entry in backups.iter().skip(self.retention) {
            let path = self.backup_path(name, entry);
            if let Err(err) = fs::remove_file(&path) {
                warn!(path = %path.display(), %err, "failed to prune backup");
            }
        }
        Ok(())
    }
}

impl StorageBackend for JsonStorage {
    fn save(&self, directory: &Directory, name: &str) -> Result<()> {
        let path = self.directory_path(name);
        self.backup_existing_file(name, &path)?;
        write_json_atomic(&path, directory)?;
        info!(name = %canonical_name(name), schools = directory.schools.len(), "directory saved");
        Ok(())
    }

    fn load(&self, name: &str) -> Result<Directory> {
        let path = self.directory_path(name);
        if !path.exists() {
            return Err(DirectoryError::StorageError(format!(
                "directory `{}` not found",
                canonical_name(name)
            )));
        }
        let directory: Directory = read_json(&path)?;
        debug!(path = %path.display(), "directory loaded");
        Ok(directory)
    }

    fn list_backups(&self, name: &str) -> Result<Vec<String>> {
        list_backup_files(&self.backup_dir(name))
    }

    fn backup(&self, directory: &Directory, name: &str, note: Option<&str>) -> Result<String> {
        let dir = self.backup_dir(name);
        ensure_dir(&dir)?;
        let file_name = unique_backup_name(&dir, &canonical_name(name), note);
        write_json_atomic(&dir.join(&file_name), directory)?;
        self.prune_backups(name)?;
        info!(backup = %file_name, "directory backup written");
        Ok(file_name)
    }

    fn restore(&self, name: &str, backup_name: &str) -> Result<Directory> {
        let backup_path = self.backup_path(name, backup_name);
        if !backup_path.exists() {
            return Err(DirectoryError::StorageError(format!(
                "backup `{}` not found",
                backup_name
            )));
        }
        let directory: Directory = read_json(&backup_path)?;
        write_json_atomic(&self.directory_path(name), &directory)?;
        info!(backup = %backup_name, "directory restored");
        Ok(directory)
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreState {
    last_directory: Option<String>,
}

/// File-system safe form of a directory name.
pub fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "directory".into()
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn storage_with_temp_dir() -> (JsonStorage, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let storage =
            JsonStorage::new(Some(temp.path().to_path_buf()), Some(2)).expect("json storage");
        (storage, temp)
    }

    #[test]
    fn canonical_names_are_file_safe() {
        assert_eq!(canonical_name(" Tokyo Agency "), "tokyo_agency");
        assert_eq!(canonical_name("东京"), "directory");
    }

    #[test]
    fn missing_directory_is_a_storage_error() {
        let (storage, _guard) = storage_with_temp_dir();
        assert!(matches!(
            storage.load("nothing"),
            Err(DirectoryError::StorageError(_))
        ));
    }

    #[test]
    fn state_file_remembers_last_directory() {
        let (storage, _guard) = storage_with_temp_dir();
        assert_eq!(storage.last_directory().unwrap(), None);
        storage.record_last_directory(Some("Main Office")).unwrap();
        assert_eq!(storage.last_directory().unwrap().as_deref(), Some("main_office"));
    }
}
