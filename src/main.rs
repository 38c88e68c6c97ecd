// src/main.rs
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use clap::Parser;
use round_extractor::batch;
use round_extractor::extractors::locate_sections;
use round_extractor::sheet::read_sheet;
use round_extractor::storage::StorageManager;
use round_extractor::utils::{self, AppError};
use round_extractor::ParseOptions;

/// Command Line Interface for the simulation round extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Exported result files (xls, xlsx, ods, csv)
    files: Vec<PathBuf>,

    /// Output directory for parsed rounds
    #[arg(short, long, default_value = "./output")]
    output_dir: PathBuf,

    /// Number of leading rows searched for the team names row
    #[arg(long, env = "TEAM_SCAN_ROWS", default_value_t = 50)]
    team_scan_rows: usize,

    /// Debug mode - save annotated sheet dumps showing located sections
    #[arg(short, long)]
    debug: bool,

    /// Print all merged rounds as JSON to stdout
    #[arg(long)]
    stdout: bool,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting processing for args: {:?}", args);

    if args.files.is_empty() {
        return Err(AppError::Config("No input files given".to_string()));
    }
    if args.team_scan_rows == 0 {
        return Err(AppError::Config("--team-scan-rows must be at least 1".to_string()));
    }
    let options = ParseOptions { team_scan_rows: args.team_scan_rows };

    // 3. Initialize storage and pick up rounds parsed in earlier runs
    let storage = StorageManager::new(&args.output_dir)?;
    let existing = storage.load_rounds()?;
    tracing::info!("Found {} previously saved rounds", existing.len());

    // 4. Parse every file; a failing file is logged and skipped
    let mut parsed = Vec::new();
    let mut failure_count = 0;

    for (path, result) in batch::parse_files(&args.files, options).await {
        if args.debug {
            if let Err(e) = write_debug_dump(&path, storage.base_dir()) {
                tracing::warn!("Failed to create debug dump for {}: {}", path.display(), e);
            }
        }

        match result {
            Ok(round) => {
                tracing::info!(
                    "Parsed {} as round '{}' with {} teams",
                    path.display(),
                    round.round_name,
                    round.teams.len()
                );
                parsed.push((path, round));
            }
            Err(e) => {
                tracing::error!("Failed to parse {}: {}", path.display(), e);
                failure_count += 1;
            }
        }
    }

    let success_count = parsed.len();
    tracing::info!("Processing finished. Success: {}, Failures: {}", success_count, failure_count);

    if success_count == 0 {
        return Err(AppError::Processing(format!(
            "Failed to parse any of {} files",
            failure_count
        )));
    }

    // 5. Save the new rounds
    let mut saved_names: HashSet<String> = existing.iter().map(|r| r.round_name.clone()).collect();
    for (path, round) in &parsed {
        if !saved_names.insert(round.round_name.clone()) {
            tracing::warn!("Round '{}' already saved, keeping the earlier version", round.round_name);
            continue;
        }
        match storage.save_round(round) {
            Ok(saved) => tracing::info!("Saved round content to: {}", saved.display()),
            Err(e) => tracing::error!("Failed to save round content: {}", e),
        }
        match storage.save_round_metadata(round, path) {
            Ok(saved) => tracing::info!("Saved round metadata to: {}", saved.display()),
            Err(e) => tracing::error!("Failed to save round metadata: {}", e),
        }
    }

    // 6. Merge with earlier rounds and optionally print
    let merged = batch::merge_rounds(existing, parsed.into_iter().map(|(_, round)| round).collect());
    tracing::info!("{} rounds available", merged.len());

    if args.stdout {
        let json = serde_json::to_string_pretty(&merged)
            .map_err(|e| AppError::Processing(format!("Failed to serialize rounds: {}", e)))?;
        println!("{}", json);
    }

    Ok(())
}

/// Dumps the sheet with its located sections into `<output>/debug/`.
fn write_debug_dump(path: &Path, output_dir: &Path) -> Result<(), AppError> {
    let bytes = std::fs::read(path)?;
    let sheet = read_sheet(&bytes)?;
    let sections = locate_sections(&sheet);

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "sheet".to_string());
    let dump_path = output_dir.join("debug").join(format!("{}_sheet.txt", stem));

    utils::sheet_debug::create_debug_dump(&sheet, &sections, &dump_path)
}
