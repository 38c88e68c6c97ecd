// src/extractors/teams.rs
use std::collections::HashSet;

use crate::model::Team;
use crate::sheet::{Cell, Sheet};
use crate::utils::error::ExtractError;

/// Rows searched for the team names row.
pub const TEAM_SCAN_ROWS: usize = 50;

/// A row is the team names row once it holds more than this many non-empty strings.
const MIN_TEAM_ROW_STRINGS: usize = 3;

/// Index of the first row, within `scan_rows`, carrying more than three non-empty strings.
pub fn find_team_row(sheet: &Sheet, scan_rows: usize) -> Option<usize> {
    (0..sheet.len().min(scan_rows)).find(|&index| {
        sheet.row(index).iter().filter(|cell| cell.is_non_empty_text()).count() > MIN_TEAM_ROW_STRINGS
    })
}

/// Builds the ordered team list. Position `i` in the result reads column `i + 1`
/// in every section.
pub fn build_registry(sheet: &Sheet, scan_rows: usize) -> Result<Vec<Team>, ExtractError> {
    let team_row = find_team_row(sheet, scan_rows).ok_or(ExtractError::TeamRowNotFound {
        scanned: sheet.len().min(scan_rows),
    })?;

    let teams: Vec<Team> = sheet
        .row(team_row)
        .iter()
        .skip(1)
        .filter(|cell| !matches!(cell, Cell::Empty))
        .map(|cell| cell.to_string().trim().to_string())
        .filter(|name| !name.is_empty())
        .map(Team::new)
        .collect();

    let mut seen = HashSet::new();
    for team in &teams {
        if !seen.insert(team.name.as_str()) {
            tracing::warn!("Duplicate team name '{}' in row {}", team.name, team_row);
        }
    }

    tracing::info!("Found {} teams in row {}", teams.len(), team_row);
    Ok(teams)
}
