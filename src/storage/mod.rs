// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};

use crate::model::Round;
use crate::utils::error::StorageError;

const METADATA_SUFFIX: &str = "_meta.json";

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Saves the parsed round as pretty JSON
    pub fn save_round(&self, round: &Round) -> Result<PathBuf, StorageError> {
        let file_path = self.round_path(&self.stem_for(&round.round_name));

        let json = serde_json::to_string_pretty(round)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        fs::write(&file_path, json).map_err(StorageError::IoError)?;

        tracing::info!("Saved round to {}", file_path.display());
        Ok(file_path)
    }

    /// Saves metadata about the round in JSON format
    pub fn save_round_metadata(&self, round: &Round, source: &Path) -> Result<PathBuf, StorageError> {
        let file_path = self
            .base_dir
            .join(format!("{}{}", self.stem_for(&round.round_name), METADATA_SUFFIX));

        let team_names: Vec<&str> = round.teams.iter().map(|t| t.name.as_str()).collect();
        let metadata = serde_json::json!({
            "round_name": round.round_name,
            "source_file": source.display().to_string(),
            "team_count": round.teams.len(),
            "teams": team_names,
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        fs::write(&file_path, metadata_str).map_err(StorageError::IoError)?;

        tracing::info!("Saved metadata to {}", file_path.display());
        Ok(file_path)
    }

    /// File stem for a round. Names that clean up to the same stem get a numeric
    /// suffix, so a round only ever overwrites its own earlier save.
    fn stem_for(&self, round_name: &str) -> String {
        let base = file_stem(round_name);
        let mut stem = base.clone();
        let mut suffix = 2;

        loop {
            let path = self.round_path(&stem);
            let free = match fs::read_to_string(&path) {
                Err(_) => true,
                Ok(content) => serde_json::from_str::<Round>(&content)
                    .map_or(false, |saved| saved.round_name == round_name),
            };
            if free {
                return stem;
            }
            tracing::debug!("{} is taken, trying another name for round '{}'", path.display(), round_name);
            stem = format!("{}_{}", base, suffix);
            suffix += 1;
        }
    }

    fn round_path(&self, stem: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", stem))
    }

    /// Loads every round saved earlier in the base directory.
    /// Files that do not hold a round are skipped with a warning.
    pub fn load_rounds(&self) -> Result<Vec<Round>, StorageError> {
        let mut rounds = Vec::new();

        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            let is_round_file = path.extension().map_or(false, |ext| ext == "json")
                && !path.to_string_lossy().ends_with(METADATA_SUFFIX);
            if !is_round_file {
                continue;
            }

            let content = fs::read_to_string(&path)?;
            match serde_json::from_str::<Round>(&content) {
                Ok(round) => rounds.push(round),
                Err(e) => tracing::warn!("Ignoring {}: {}", path.display(), e),
            }
        }

        tracing::debug!("Loaded {} saved rounds from {}", rounds.len(), self.base_dir.display());
        Ok(rounds)
    }
}

/// File-safe form of a round name.
fn file_stem(round_name: &str) -> String {
    let stem: String = round_name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if stem.is_empty() {
        "round".to_string()
    } else {
        stem
    }
}
