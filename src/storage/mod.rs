pub mod json_backend;

use std::path::Path;

use crate::{directory::Directory, errors::Result, utils::persistence};

/// Abstraction over persistence backends capable of storing directories and snapshots.
pub trait StorageBackend: Send + Sync {
    fn save(&self, directory: &Directory, name: &str) -> Result<()>;
    fn load(&self, name: &str) -> Result<Directory>;
    fn list_backups(&self, name: &str) -> Result<Vec<String>>;
    /// Writes a snapshot and returns its file name.
    fn backup(&self, directory: &Directory, name: &str, note: Option<&str>) -> Result<String>;
    fn restore(&self, name: &str, backup_name: &str) -> Result<Directory>;

    fn save_to_path(&self, directory: &Directory, path: &Path) -> Result<()> {
        persistence::write_json_atomic(path, directory)
    }

    fn load_from_path(&self, path: &Path) -> Result<Directory> {
        persistence::read_json(path)
    }
}

pub use json_backend::JsonStorage;
