use std::fs;
use std::path::PathBuf;

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::model::TournamentDetail;

const TOURNAMENTS_SUBDIR: &str = "tournaments";

/// JSON artifact store: one document per scrape target plus one per
/// tournament id, overwritten wholesale on each run.
///
/// Extraction stays pure; whoever assembles a record hands it here
/// explicitly.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Write one pretty-printed JSON document under the artifact directory.
    pub fn save_json<T: Serialize>(&self, name: &str, value: &T) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(name);
        fs::write(&path, serde_json::to_string_pretty(value)?)?;
        debug!(path = %path.display(), "saved artifact");
        Ok(path)
    }

    fn tournament_path(&self, tournament_id: &str) -> PathBuf {
        self.dir
            .join(TOURNAMENTS_SUBDIR)
            .join(format!("{tournament_id}.json"))
    }

    pub fn save_tournament(&self, detail: &TournamentDetail) -> Result<PathBuf> {
        let path = self.tournament_path(&detail.tournament_id);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, serde_json::to_string_pretty(detail)?)?;
        debug!(path = %path.display(), "saved tournament artifact");
        Ok(path)
    }

    pub fn load_tournament(&self, tournament_id: &str) -> Result<Option<TournamentDetail>> {
        let path = self.tournament_path(tournament_id);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&raw)?))
    }

    /// Merge the separately fetched participants list into the tournament's
    /// artifact: read the detail record back, set the list, rewrite the
    /// whole document. Runs sequentially within one tournament's pipeline,
    /// never concurrently for the same id.
    pub fn merge_participants(
        &self,
        tournament_id: &str,
        participants: Vec<String>,
    ) -> Result<TournamentDetail> {
        let mut detail = self
            .load_tournament(tournament_id)?
            .unwrap_or_else(|| TournamentDetail {
                tournament_id: tournament_id.to_string(),
                ..TournamentDetail::default()
            });
        detail.participants = participants;
        self.save_tournament(&detail)?;
        Ok(detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, ArtifactStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_save_and_load_tournament_roundtrip() {
        let (_dir, store) = store();
        let detail = TournamentDetail {
            tournament_id: "demacia-cup".to_string(),
            url: "https://competetft.com/en-US/tournament/demacia-cup/overview".to_string(),
            name: Some("Demacia Cup".to_string()),
            ..TournamentDetail::default()
        };

        store.save_tournament(&detail).unwrap();
        let loaded = store.load_tournament("demacia-cup").unwrap().unwrap();
        assert_eq!(loaded.tournament_id, "demacia-cup");
        assert_eq!(loaded.name.as_deref(), Some("Demacia Cup"));
    }

    #[test]
    fn test_load_missing_tournament() {
        let (_dir, store) = store();
        assert!(store.load_tournament("nope").unwrap().is_none());
    }

    #[test]
    fn test_merge_participants_into_existing_detail() {
        let (_dir, store) = store();
        let detail = TournamentDetail {
            tournament_id: "demacia-cup".to_string(),
            name: Some("Demacia Cup".to_string()),
            ..TournamentDetail::default()
        };
        store.save_tournament(&detail).unwrap();

        let merged = store
            .merge_participants("demacia-cup", vec!["setsuko".to_string(), "Milk".to_string()])
            .unwrap();
        assert_eq!(merged.name.as_deref(), Some("Demacia Cup"));
        assert_eq!(merged.participants, vec!["setsuko", "Milk"]);

        // The rewrite is whole-document: the file now carries both halves.
        let loaded = store.load_tournament("demacia-cup").unwrap().unwrap();
        assert_eq!(loaded.participants.len(), 2);
        assert_eq!(loaded.name.as_deref(), Some("Demacia Cup"));
    }

    #[test]
    fn test_merge_participants_without_prior_detail() {
        let (_dir, store) = store();
        let merged = store
            .merge_participants("fresh", vec!["Dishsoap".to_string()])
            .unwrap();
        assert_eq!(merged.tournament_id, "fresh");
        assert_eq!(merged.participants, vec!["Dishsoap"]);
        assert!(merged.name.is_none());
    }

    #[test]
    fn test_save_json_overwrites_wholesale() {
        let (_dir, store) = store();
        store.save_json("events.json", &vec!["a", "b"]).unwrap();
        let path = store.save_json("events.json", &vec!["c"]).unwrap();
        let raw = std::fs::read_to_string(path).unwrap();
        let parsed: Vec<String> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, vec!["c"]);
    }
}
