// src/batch.rs
//! Caller-side handling of several exports: naming, concurrent parsing and merging.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::Round;
use crate::parser::{parse_round, ParseOptions};
use crate::sheet::DEFAULT_SHEET_NAME;
use crate::utils::error::AppError;

static RESULTS_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^results-").expect("Failed to compile RESULTS_PREFIX_RE"));

/// Name a round should carry. Exports keep the default sheet name, so those
/// are named after the file instead: `results-r3.xls` becomes `r3`.
pub fn round_name_for(sheet_name: &str, path: &Path) -> String {
    if sheet_name != DEFAULT_SHEET_NAME {
        return sheet_name.to_string();
    }
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| sheet_name.to_string());
    RESULTS_PREFIX_RE.replace(&stem, "").into_owned()
}

/// Reads and parses one export, naming the round after the file when needed.
pub async fn parse_file(path: PathBuf, options: ParseOptions) -> Result<Round, AppError> {
    let bytes = tokio::fs::read(&path).await?;
    tracing::debug!("Read {} bytes from {}", bytes.len(), path.display());

    let mut round = tokio::task::spawn_blocking(move || parse_round(&bytes, &options))
        .await
        .map_err(|e| AppError::Processing(format!("Parse task failed: {}", e)))??;

    round.round_name = round_name_for(&round.round_name, &path);
    Ok(round)
}

/// Parses every file concurrently. Results come back in input order, one per file;
/// a failure in one file does not affect the others.
pub async fn parse_files(
    paths: &[PathBuf],
    options: ParseOptions,
) -> Vec<(PathBuf, Result<Round, AppError>)> {
    let handles: Vec<_> = paths
        .iter()
        .cloned()
        .map(|path| (path.clone(), tokio::spawn(parse_file(path, options))))
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for (path, handle) in handles {
        let result = handle
            .await
            .unwrap_or_else(|e| Err(AppError::Processing(format!("Parse task failed: {}", e))));
        results.push((path, result));
    }
    results
}

/// Adds `incoming` rounds to `existing`, skipping names already present, and
/// returns the combined list sorted by round name.
pub fn merge_rounds(existing: Vec<Round>, incoming: Vec<Round>) -> Vec<Round> {
    let mut names: HashSet<String> = existing.iter().map(|r| r.round_name.clone()).collect();
    let mut merged = existing;

    for round in incoming {
        if names.insert(round.round_name.clone()) {
            merged.push(round);
        } else {
            tracing::info!("Skipping duplicate round '{}'", round.round_name);
        }
    }

    merged.sort_by(|a, b| a.round_name.cmp(&b.round_name));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Team;
    use crate::utils::error::{ExtractError, ParseError};

    fn round(name: &str, team: &str) -> Round {
        Round { round_name: name.into(), teams: vec![Team::new(team)] }
    }

    #[test]
    fn test_default_sheet_name_uses_file_stem() {
        assert_eq!(round_name_for("Results", Path::new("/data/results-r3.xls")), "r3");
        assert_eq!(round_name_for("Results", Path::new("Results-Round 2.xlsx")), "Round 2");
        assert_eq!(round_name_for("Results", Path::new("practice.csv")), "practice");
    }

    #[test]
    fn test_declared_sheet_name_is_kept() {
        assert_eq!(round_name_for("Round 4", Path::new("results-r4.xls")), "Round 4");
    }

    #[test]
    fn test_merge_dedupes_and_sorts() {
        let existing = vec![round("r2", "old")];
        let incoming = vec![round("r3", "a"), round("r2", "new"), round("r1", "b"), round("r3", "c")];

        let merged = merge_rounds(existing, incoming);
        let names: Vec<_> = merged.iter().map(|r| r.round_name.as_str()).collect();

        assert_eq!(names, vec!["r1", "r2", "r3"]);
        assert_eq!(merged[1].teams[0].name, "old");
        assert_eq!(merged[2].teams[0].name, "a");
    }

    #[tokio::test]
    async fn test_parse_files_continues_after_failure() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("results-r1.csv");
        let bad = dir.path().join("results-r2.csv");
        let missing = dir.path().join("absent.csv");
        std::fs::write(&good, "Teams,Red,Blue,Green,Gold\nIncome Statement, k USD, Global\n").unwrap();
        std::fs::write(&bad, "no,teams\nhere,1\n").unwrap();

        let results = parse_files(&[good.clone(), bad.clone(), missing.clone()], ParseOptions::default()).await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].0, good);
        assert_eq!(results[0].1.as_ref().unwrap().round_name, "r1");
        assert!(matches!(
            results[1].1,
            Err(AppError::Parse(ParseError::Extract(ExtractError::TeamRowNotFound { .. })))
        ));
        assert!(matches!(results[2].1, Err(AppError::Io(_))));
    }
}
