//! Line-delimited JSON record files.
//!
//! Every entity kind lives in its own append-only `.jsonl` file under the
//! data directory. Updates are appended as new lines; readers resolve the
//! latest version of each id (see `snapshot::dedup_by_id`).

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{StorageConfig, StorageError};

/// The record files kept in the data directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityType {
    Player,
    Tournament,
    Placement,
    Penalty,
}

impl EntityType {
    pub fn filename(&self) -> &'static str {
        match self {
            EntityType::Player => "players.jsonl",
            EntityType::Tournament => "tournaments.jsonl",
            EntityType::Placement => "placements.jsonl",
            EntityType::Penalty => "penalties.jsonl",
        }
    }
}

fn open_for_append(path: &Path) -> Result<File, StorageError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

/// Write a sibling `.tmp` file through `fill`, then rename it over `path`.
/// Readers see either the old file or the new one, never a partial write.
fn replace_atomically<F>(path: &Path, fill: F) -> Result<(), StorageError>
where
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
{
    let tmp = path.with_extension("jsonl.tmp");
    let result = (|| -> std::io::Result<()> {
        let mut out = BufWriter::new(File::create(&tmp)?);
        fill(&mut out)?;
        out.into_inner().map_err(|e| e.into_error())?.sync_all()?;
        fs::rename(&tmp, path)
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    Ok(result?)
}

/// The `id` field of a raw line, if the line is a JSON object carrying one.
fn line_id(line: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct IdOnly {
        id: String,
    }
    serde_json::from_str::<IdOnly>(line.trim()).ok().map(|r| r.id)
}

/// Serializes records of one type, one JSON object per line.
pub struct JsonlWriter<T> {
    path: PathBuf,
    _record: PhantomData<T>,
}

impl<T: Serialize> JsonlWriter<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _record: PhantomData,
        }
    }

    pub fn for_entity(config: &StorageConfig, entity: EntityType) -> Self {
        Self::new(config.entity_path(entity))
    }

    fn emit<'a>(&self, file: File, records: impl IntoIterator<Item = &'a T>) -> Result<usize, StorageError>
    where
        T: 'a,
    {
        let mut out = BufWriter::new(file);
        let mut written = 0usize;
        for record in records {
            serde_json::to_writer(&mut out, record)?;
            out.write_all(b"\n")?;
            written += 1;
        }
        out.flush()?;
        Ok(written)
    }

    pub fn append(&self, record: &T) -> Result<(), StorageError> {
        self.emit(open_for_append(&self.path)?, std::iter::once(record))?;
        debug!(path = %self.path.display(), "record appended");
        Ok(())
    }
}

impl<T> JsonlWriter<T> {
    /// Drop every line whose `id` equals `id` and return how many went.
    ///
    /// Works on raw lines: lines that do not parse as `T` (older schemas,
    /// hand edits) are carried over byte for byte.
    pub fn remove_id(&self, id: &str) -> Result<usize, StorageError> {
        if !self.path.exists() {
            return Ok(0);
        }

        let content = fs::read_to_string(&self.path)?;
        let mut removed = 0usize;
        let kept: Vec<&str> = content
            .lines()
            .filter(|line| {
                let hit = line_id(line).as_deref() == Some(id);
                removed += usize::from(hit);
                !hit
            })
            .collect();

        if removed == 0 {
            return Ok(0);
        }

        replace_atomically(&self.path, |out| {
            for line in &kept {
                out.write_all(line.as_bytes())?;
                out.write_all(b"\n")?;
            }
            Ok(())
        })?;
        info!(path = %self.path.display(), id, removed, "records removed");
        Ok(removed)
    }
}

/// Reads records of one type back from a `.jsonl` file.
pub struct JsonlReader<T> {
    path: PathBuf,
    _record: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonlReader<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _record: PhantomData,
        }
    }

    pub fn for_entity(config: &StorageConfig, entity: EntityType) -> Self {
        Self::new(config.entity_path(entity))
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load every record. A missing file reads as empty; blank lines are
    /// ignored and malformed ones are logged and skipped.
    pub fn read_all(&self) -> Result<Vec<T>, StorageError> {
        if !self.exists() {
            return Ok(Vec::new());
        }

        let mut records = Vec::new();
        for (lineno, line) in BufReader::new(File::open(&self.path)?).lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<T>(line) {
                Ok(record) => records.push(record),
                Err(e) => warn!(
                    path = %self.path.display(),
                    line = lineno + 1,
                    error = %e,
                    "skipping malformed record"
                ),
            }
        }

        debug!(path = %self.path.display(), count = records.len(), "records loaded");
        Ok(records)
    }

    pub fn read_where<F>(&self, keep: F) -> Result<Vec<T>, StorageError>
    where
        F: Fn(&T) -> bool,
    {
        let mut records = self.read_all()?;
        records.retain(|r| keep(r));
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Player, Tournament, TournamentKind};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn test_config(temp_dir: &TempDir) -> StorageConfig {
        StorageConfig::new(temp_dir.path().to_path_buf())
    }

    fn players(names: &[&str]) -> Vec<Player> {
        names.iter().map(|n| Player::new(n).unwrap()).collect()
    }

    fn write_players(config: &StorageConfig, names: &[&str]) {
        let writer = JsonlWriter::<Player>::for_entity(config, EntityType::Player);
        for player in players(names) {
            writer.append(&player).unwrap();
        }
    }

    #[test]
    fn test_remove_id_rewrites_without_target() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        write_players(&config, &["Yugi", "Kaiba", "Joey"]);
        let kaiba = Player::id_for("Kaiba");

        let writer = JsonlWriter::<Player>::for_entity(&config, EntityType::Player);
        assert_eq!(writer.remove_id(kaiba.as_str()).unwrap(), 1);
        assert_eq!(writer.remove_id(kaiba.as_str()).unwrap(), 0);

        let names: Vec<String> = JsonlReader::<Player>::for_entity(&config, EntityType::Player)
            .read_all()
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Yugi", "Joey"]);
        assert!(!config
            .entity_path(EntityType::Player)
            .with_extension("jsonl.tmp")
            .exists());
    }

    #[test]
    fn test_remove_id_keeps_unparseable_lines() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        write_players(&config, &["Mai", "Rex"]);

        let path = config.entity_path(EntityType::Player);
        let legacy = r#"{"id":"legacy01","handle":"Weevil"}"#;
        let mut raw = fs::read_to_string(&path).unwrap();
        raw.push_str(legacy);
        raw.push('\n');
        raw.push_str("{broken\n");
        fs::write(&path, raw).unwrap();

        let writer = JsonlWriter::<Player>::for_entity(&config, EntityType::Player);
        assert_eq!(writer.remove_id(Player::id_for("Mai").as_str()).unwrap(), 1);

        let after = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = after.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines.contains(&legacy));
        assert!(lines.contains(&"{broken"));
        assert!(after.contains("Rex"));
    }

    #[test]
    fn test_remove_id_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let writer = JsonlWriter::<Player>::new(temp_dir.path().join("nope.jsonl"));
        assert_eq!(writer.remove_id("anything").unwrap(), 0);
    }

    #[test]
    fn test_append_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        let writer = JsonlWriter::<Tournament>::for_entity(&config, EntityType::Tournament);
        let reader = JsonlReader::<Tournament>::for_entity(&config, EntityType::Tournament);
        assert!(!reader.exists());

        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        writer
            .append(&Tournament::new("Locals".to_string(), date, TournamentKind::Veteran))
            .unwrap();
        writer
            .append(&Tournament::new("Newcomers".to_string(), date, TournamentKind::Beginner))
            .unwrap();

        assert!(reader.exists());
        let read = reader.read_all().unwrap();
        assert_eq!(read.len(), 2);
        assert_eq!(read[1].kind, TournamentKind::Beginner);
    }

    #[test]
    fn test_read_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let reader = JsonlReader::<Player>::new(temp_dir.path().join("nope.jsonl"));
        assert!(reader.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_read_skips_blank_and_malformed_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("players.jsonl");
        let good = serde_json::to_string(&Player::new("Weevil").unwrap()).unwrap();
        fs::write(&path, format!("{}\n\n{{not json}}\n{}\n", good, good)).unwrap();

        let read = JsonlReader::<Player>::new(path).read_all().unwrap();
        assert_eq!(read.len(), 2);
    }

    #[test]
    fn test_read_where() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        write_players(&config, &["Yugi", "Yami", "Kaiba"]);

        let ys = JsonlReader::<Player>::for_entity(&config, EntityType::Player)
            .read_where(|p| p.name.starts_with('Y'))
            .unwrap();
        assert_eq!(ys.len(), 2);
    }
}
