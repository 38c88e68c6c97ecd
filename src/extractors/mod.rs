// src/extractors/mod.rs
pub mod costs;
pub mod flat;
pub mod logistics;
pub mod manufacturing;
pub mod margins;
pub mod market;
pub mod section;
pub mod teams;

use crate::model::Team;
use crate::sheet::{Cell, Sheet};
use crate::translate::translate;

// Re-export key extraction types for convenience
pub use costs::CostExtractor;
pub use flat::FlatExtractor;
pub use logistics::LogisticsExtractor;
pub use manufacturing::ManufacturingExtractor;
pub use margins::MarginExtractor;
pub use market::MarketExtractor;
pub use section::{locate_sections, LocatedSection, SectionKind, SECTION_CATALOGUE};
pub use teams::{build_registry, TEAM_SCAN_ROWS};

/// Fills team records from the rows of one located section.
pub trait SectionExtractor {
    fn extract(&self, sheet: &Sheet, section: &LocatedSection, teams: &mut [Team]);
}

/// Runs the extractor matching the section's kind.
pub fn extract_section(sheet: &Sheet, section: &LocatedSection, teams: &mut [Team]) {
    tracing::debug!(
        "Extracting {:?} from rows {}..{}",
        section.kind,
        section.start,
        section.end
    );
    match section.kind {
        SectionKind::Financial(kind, scope) => {
            FlatExtractor { kind, scope }.extract(sheet, section, teams)
        }
        SectionKind::Market(scope) => MarketExtractor { scope }.extract(sheet, section, teams),
        SectionKind::Manufacturing => ManufacturingExtractor.extract(sheet, section, teams),
        SectionKind::Logistics => LogisticsExtractor.extract(sheet, section, teams),
        SectionKind::Costs => CostExtractor.extract(sheet, section, teams),
        SectionKind::Margins => MarginExtractor.extract(sheet, section, teams),
    }
}

/// Canonical label of the row at `index`, or `None` for unlabeled rows.
pub(crate) fn row_label(sheet: &Sheet, index: usize) -> Option<String> {
    sheet.label(index).map(|label| translate(&label))
}

/// Calls `write` for every team whose column in `row` holds a value.
/// Team `i` reads column `i + 1`. Returns the number of values written.
pub(crate) fn write_values<F>(row: &[Cell], teams: &mut [Team], mut write: F) -> usize
where
    F: FnMut(&mut Team, f64),
{
    let mut written = 0;
    for (idx, team) in teams.iter_mut().enumerate() {
        if let Some(value) = row.get(idx + 1).and_then(Cell::to_number) {
            write(team, value);
            written += 1;
        }
    }
    written
}
