// src/snapshot.rs

use crate::error::SnapshotError;
use crate::models::Problem;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// On-disk problem collection used by the command-line driver.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    #[serde(default)]
    pub problems: Vec<Problem>,
}

impl Snapshot {
    pub fn from_json(data: &str) -> Result<Self, SnapshotError> {
        let snapshot: Snapshot = serde_json::from_str(data)?;
        snapshot.check_ids()?;
        Ok(snapshot)
    }

    /// Reads a snapshot, or returns an empty one if the file does not exist yet.
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        if !path.exists() {
            info!("Snapshot {:?} not found, starting empty", path);
            return Ok(Snapshot::default());
        }
        let data = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot = Self::from_json(&data)?;
        debug!("Loaded {} problems from {:?}", snapshot.problems.len(), path);
        Ok(snapshot)
    }

    pub fn save(&self, path: &Path) -> Result<(), SnapshotError> {
        let data = serde_json::to_string_pretty(self)?;
        fs::write(path, data).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Saved {} problems to {:?}", self.problems.len(), path);
        Ok(())
    }

    pub fn next_id(&self) -> i64 {
        self.problems.iter().map(|p| p.id).max().unwrap_or(0) + 1
    }

    pub fn get(&self, id: i64) -> Result<&Problem, SnapshotError> {
        self.problems
            .iter()
            .find(|p| p.id == id)
            .ok_or(SnapshotError::NotFound(id))
    }

    /// Swaps in the record with the same id.
    pub fn replace(&mut self, problem: Problem) -> Result<(), SnapshotError> {
        let slot = self
            .problems
            .iter_mut()
            .find(|p| p.id == problem.id)
            .ok_or(SnapshotError::NotFound(problem.id))?;
        *slot = problem;
        Ok(())
    }

    pub fn insert(&mut self, problem: Problem) -> Result<(), SnapshotError> {
        if self.problems.iter().any(|p| p.id == problem.id) {
            return Err(SnapshotError::DuplicateId(problem.id));
        }
        self.problems.push(problem);
        Ok(())
    }

    fn check_ids(&self) -> Result<(), SnapshotError> {
        let mut seen = HashSet::new();
        for p in &self.problems {
            if !seen.insert(p.id) {
                return Err(SnapshotError::DuplicateId(p.id));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, ProblemDraft, ProblemStatus};
    use crate::scheduler::Scheduler;
    use chrono::NaiveDate;

    fn problem(id: i64) -> Problem {
        Scheduler::default().initialize_problem(
            ProblemDraft {
                id,
                title: "Valid Parentheses".to_string(),
                platform: "LeetCode".to_string(),
                difficulty: Difficulty::Easy,
                topic: "Stack".to_string(),
                url: None,
                notes: Some("use a stack".to_string()),
                status: ProblemStatus::Practicing,
            },
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
        )
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = Snapshot::load(&dir.path().join("problems.json")).unwrap();
        assert!(snapshot.problems.is_empty());
        assert_eq!(snapshot.next_id(), 1);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("problems.json");

        let mut snapshot = Snapshot::default();
        snapshot.insert(problem(4)).unwrap();
        snapshot.save(&path).unwrap();

        let loaded = Snapshot::load(&path).unwrap();
        assert_eq!(loaded, snapshot);
        assert_eq!(loaded.next_id(), 5);
    }

    #[test]
    fn test_reads_camel_case_records() {
        let data = r#"{"problems": [{
            "id": 1, "title": "Two Sum", "platform": "LeetCode",
            "difficulty": "Easy", "topic": "Arrays", "status": "Not Started",
            "easeFactor": 2.5, "interval": 1, "consecutiveCorrect": 0,
            "consecutiveEasy": 0, "isConquered": false,
            "nextReviewDate": "2024-04-02", "attempts": 0, "reviewHistory": []
        }]}"#;
        let snapshot = Snapshot::from_json(data).unwrap();
        let p = &snapshot.problems[0];
        assert_eq!(p.status, ProblemStatus::NotStarted);
        assert_eq!(p.next_review_date, NaiveDate::from_ymd_opt(2024, 4, 2).unwrap());
        assert_eq!(p.last_practiced, None);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut snapshot = Snapshot::default();
        snapshot.insert(problem(1)).unwrap();
        assert!(matches!(
            snapshot.insert(problem(1)),
            Err(SnapshotError::DuplicateId(1))
        ));

        snapshot.problems.push(problem(1));
        let data = serde_json::to_string(&snapshot).unwrap();
        assert!(matches!(
            Snapshot::from_json(&data),
            Err(SnapshotError::DuplicateId(1))
        ));
    }

    #[test]
    fn test_replace_and_get() {
        let mut snapshot = Snapshot::default();
        snapshot.insert(problem(1)).unwrap();

        let mut updated = problem(1);
        updated.attempts = 3;
        snapshot.replace(updated).unwrap();
        assert_eq!(snapshot.get(1).unwrap().attempts, 3);

        assert!(matches!(snapshot.get(9), Err(SnapshotError::NotFound(9))));
        assert!(snapshot.replace(problem(9)).is_err());
    }
}
