// src/parser.rs
//! One-pass extraction of a round from an export.
//!
//! Raw rows → team registry → located sections → per-section extraction → [`Round`].
//! Only a missing team names row fails the parse; absent sections, unknown labels and
//! unreadable cells leave their fields at the initialized defaults.

use crate::extractors::{self, build_registry, locate_sections, TEAM_SCAN_ROWS};
use crate::model::{Round, Team};
use crate::sheet::{read_sheet, Sheet};
use crate::utils::error::{ExtractError, ParseError};

/// Tunables of a parse call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// How many leading rows are searched for the team names row.
    pub team_scan_rows: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { team_scan_rows: TEAM_SCAN_ROWS }
    }
}

/// Decodes `bytes` and extracts its first sheet.
pub fn parse_round(bytes: &[u8], options: &ParseOptions) -> Result<Round, ParseError> {
    let sheet = read_sheet(bytes)?;
    Ok(parse_sheet(&sheet, options)?)
}

/// Extracts a round from an already decoded sheet.
pub fn parse_sheet(sheet: &Sheet, options: &ParseOptions) -> Result<Round, ExtractError> {
    let mut teams = build_registry(sheet, options.team_scan_rows)?;

    let sections = locate_sections(sheet);
    tracing::debug!("Located {} sections in sheet '{}'", sections.len(), sheet.name);

    for section in &sections {
        extractors::extract_section(sheet, section, &mut teams);
    }

    let round = assemble(&sheet.name, teams);
    tracing::info!(
        "Parsed round '{}': {} teams, {} sections",
        round.round_name,
        round.teams.len(),
        sections.len()
    );
    Ok(round)
}

/// Finalizes team records and wraps them with the sheet's name.
fn assemble(sheet_name: &str, mut teams: Vec<Team>) -> Round {
    teams.iter_mut().for_each(Team::mirror_legacy_metrics);
    Round {
        round_name: sheet_name.to_string(),
        teams,
    }
}
