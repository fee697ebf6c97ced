//! File helpers shared by the directory store and the config manager.

use chrono::{DateTime, NaiveDateTime, Utc};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};

use crate::errors::Result;
use crate::utils::paths::ensure_dir;

pub const BACKUP_EXTENSION: &str = "json";
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const TMP_SUFFIX: &str = "tmp";

pub fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

pub fn write_file(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

/// Serializes `value` as pretty JSON into a sibling temp file, then renames it
/// over `path`.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    let tmp = tmp_path(path);
    write_file(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// Lowercase ASCII words joined by dashes; `None` when nothing usable remains.
pub fn sanitize_note(note: Option<&str>) -> Option<String> {
    let raw = note?.trim();
    if raw.is_empty() {
        return None;
    }
    let mut sanitized = String::new();
    let mut last_dash = false;
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            sanitized.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if (ch.is_whitespace() || matches!(ch, '-' | '.' | '_'))
            && !sanitized.is_empty()
            && !last_dash
        {
            sanitized.push('-');
            last_dash = true;
        }
    }
    let trimmed = sanitized.trim_matches('-').to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// `<prefix>_<YYYYMMDD>_<HHMMSS>[_NN][_note].json`, never naming a file that
/// already exists in `dir`. Later backups within the same second get the `_NN`
/// sequence.
pub fn unique_backup_name(dir: &Path, prefix: &str, note: Option<&str>) -> String {
    let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
    let label = sanitize_note(note);
    let mut name = compose_backup_name(prefix, &timestamp, None, label.as_deref());
    let mut sequence = 1;
    while dir.join(&name).exists() {
        sequence += 1;
        name = compose_backup_name(prefix, &timestamp, Some(sequence), label.as_deref());
    }
    name
}

fn compose_backup_name(
    prefix: &str,
    timestamp: &str,
    sequence: Option<u32>,
    label: Option<&str>,
) -> String {
    let mut name = format!("{prefix}_{timestamp}");
    if let Some(sequence) = sequence {
        name.push_str(&format!("_{sequence:02}"));
    }
    if let Some(label) = label {
        name.push('_');
        name.push_str(label);
    }
    name.push('.');
    name.push_str(BACKUP_EXTENSION);
    name
}

/// Recovers the timestamp embedded by [`unique_backup_name`].
pub fn parse_backup_timestamp(name: &str) -> Option<DateTime<Utc>> {
    let trimmed = name.strip_suffix(&format!(".{}", BACKUP_EXTENSION))?;
    let segments: Vec<&str> = trimmed.split('_').collect();
    segments.windows(2).rev().find_map(|pair| {
        let (date_part, time_part) = (pair[0], pair[1]);
        if !is_digits(date_part, 8) || !is_digits(time_part, 6) {
            return None;
        }
        NaiveDateTime::parse_from_str(&format!("{date_part}{time_part}"), "%Y%m%d%H%M%S")
            .ok()
            .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
    })
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

/// Backup file names in `dir`, newest first.
pub fn list_backup_files(dir: &Path) -> Result<Vec<String>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some(BACKUP_EXTENSION) {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
            entries.push(name.to_string());
        }
    }
    entries.sort_by(|a, b| {
        parse_backup_timestamp(b)
            .cmp(&parse_backup_timestamp(a))
            .then_with(|| b.cmp(a))
    });
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notes_are_slugged() {
        assert_eq!(sanitize_note(Some("  Before Spring Intake! ")), Some("before-spring-intake".into()));
        assert_eq!(sanitize_note(Some("春季")), None);
        assert_eq!(sanitize_note(None), None);
    }

    #[test]
    fn timestamp_survives_notes_with_underscores() {
        let parsed = parse_backup_timestamp("tokyo_agency_20240301_101530_pre-import.json");
        assert_eq!(
            parsed.map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string()),
            Some("2024-03-01 10:15:30".to_string())
        );
        assert_eq!(parse_backup_timestamp("random.json"), None);
    }

    #[test]
    fn backups_in_the_same_second_get_a_sequence() {
        let dir = tempfile::TempDir::new().unwrap();
        let first = unique_backup_name(dir.path(), "main", Some("nightly"));
        write_file(&dir.path().join(&first), "{}").unwrap();
        let second = unique_backup_name(dir.path(), "main", Some("nightly"));
        write_file(&dir.path().join(&second), "{}").unwrap();

        assert_ne!(first, second);
        assert!(parse_backup_timestamp(&second).is_some());
        assert_eq!(list_backup_files(dir.path()).unwrap(), vec![second, first]);

        let sequenced = compose_backup_name("main", "20240301_101530", Some(2), Some("nightly"));
        assert_eq!(sequenced, "main_20240301_101530_02_nightly.json");
        assert!(parse_backup_timestamp(&sequenced).is_some());
    }
}
