//! Top-10 leaderboard persisted as a JSON array.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

pub const LEADERBOARD_CAP: usize = 10;
pub const LEADERBOARD_FILE: &str = "leaderboard.json";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: f64,
    #[serde(default)]
    pub is_shiny: bool,
    pub date: String,
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("leaderboard file {path} is corrupted: {source}")]
    Corrupted {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode leaderboard: {0}")]
    Encode(#[from] serde_json::Error),
}

pub fn display_name(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        "Unknown".to_string()
    } else {
        trimmed.to_string()
    }
}

pub fn new_entry(name: &str, score: f64, is_shiny: bool) -> LeaderboardEntry {
    let date = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default();
    LeaderboardEntry {
        name: display_name(name),
        score,
        is_shiny,
        date,
    }
}

/// Sorts descending by score (ties keep insertion order) and keeps the top entries.
pub fn rank(entries: &mut Vec<LeaderboardEntry>) {
    entries.sort_by(|a, b| b.score.total_cmp(&a.score));
    entries.truncate(LEADERBOARD_CAP);
}

pub fn insert(entries: &mut Vec<LeaderboardEntry>, entry: LeaderboardEntry) {
    entries.push(entry);
    rank(entries);
}

pub fn leaderboard_path(data_dir: &Path) -> PathBuf {
    data_dir.join(LEADERBOARD_FILE)
}

/// Missing file reads as an empty leaderboard.
pub async fn load(path: &Path) -> Result<Vec<LeaderboardEntry>, StorageError> {
    let json = match tokio::fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(StorageError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    let mut entries: Vec<LeaderboardEntry> =
        serde_json::from_str(&json).map_err(|source| StorageError::Corrupted {
            path: path.to_path_buf(),
            source,
        })?;
    rank(&mut entries);
    Ok(entries)
}

pub async fn save(path: &Path, entries: &[LeaderboardEntry]) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| StorageError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
    }
    let json = serde_json::to_string_pretty(entries)?;
    tokio::fs::write(path, json)
        .await
        .map_err(|source| StorageError::Write {
            path: path.to_path_buf(),
            source,
        })
}

/// Appends `entry` to the stored list and writes the ranked result back.
/// An unreadable stored list is replaced.
pub async fn save_score(
    path: &Path,
    entry: LeaderboardEntry,
) -> Result<Vec<LeaderboardEntry>, StorageError> {
    let mut entries = match load(path).await {
        Ok(entries) => entries,
        Err(error) => {
            tracing::warn!(%error, "discarding unreadable leaderboard");
            Vec::new()
        }
    };
    insert(&mut entries, entry);
    save(path, &entries).await?;
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;
    use pretty_assertions::assert_eq;
    use rand::Rng;

    fn entry(name: &str, score: f64) -> LeaderboardEntry {
        LeaderboardEntry {
            name: name.to_string(),
            score,
            is_shiny: false,
            date: "2024-05-01T12:00:00Z".to_string(),
        }
    }

    #[test]
    fn insert_keeps_descending_order_and_cap() {
        let mut rng = create_rng(3);
        let mut entries = Vec::new();
        for i in 0..60 {
            let score = rng.gen_range(0.0..5000.0);
            insert(&mut entries, entry(&format!("p{i}"), score));
            assert!(entries.len() <= LEADERBOARD_CAP);
            assert!(entries.windows(2).all(|w| w[0].score >= w[1].score));
        }
        assert_eq!(entries.len(), LEADERBOARD_CAP);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let mut entries = vec![entry("first", 100.0)];
        insert(&mut entries, entry("second", 100.0));
        insert(&mut entries, entry("top", 300.0));
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["top", "first", "second"]);
    }

    #[test]
    fn blank_names_become_unknown() {
        assert_eq!(new_entry("   ", 1.0, false).name, "Unknown");
        assert_eq!(new_entry("  Ash ", 1.0, true).name, "Ash");
    }

    #[test]
    fn new_entry_date_is_rfc3339() {
        let created = new_entry("Ash", 10.0, false);
        assert!(OffsetDateTime::parse(&created.date, &Rfc3339).is_ok());
    }

    #[test]
    fn json_uses_camel_case_and_shiny_defaults_false() {
        let json = serde_json::to_string(&LeaderboardEntry {
            is_shiny: true,
            ..entry("Ash", 12.5)
        })
        .expect("encode");
        assert!(json.contains("\"isShiny\":true"));

        let decoded: Vec<LeaderboardEntry> =
            serde_json::from_str(r#"[{"name":"Old","score":3,"date":"x"}]"#).expect("decode");
        assert!(!decoded[0].is_shiny);
    }

    #[tokio::test]
    async fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let entries = load(&dir.path().join(LEADERBOARD_FILE))
            .await
            .expect("load");
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn corrupted_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(LEADERBOARD_FILE);
        tokio::fs::write(&path, "{not json").await.expect("write");
        assert!(matches!(
            load(&path).await,
            Err(StorageError::Corrupted { .. })
        ));
    }

    #[tokio::test]
    async fn save_score_persists_ranked_list() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join(LEADERBOARD_FILE);

        save_score(&path, entry("low", 10.0)).await.expect("save");
        let saved = save_score(&path, entry("high", 90.0)).await.expect("save");

        let names: Vec<&str> = saved.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["high", "low"]);
        assert_eq!(load(&path).await.expect("reload"), saved);
    }

    #[tokio::test]
    async fn save_score_replaces_corrupted_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(LEADERBOARD_FILE);
        tokio::fs::write(&path, "garbage").await.expect("write");

        let saved = save_score(&path, entry("fresh", 42.0)).await.expect("save");
        assert_eq!(saved, vec![entry("fresh", 42.0)]);
    }
}
