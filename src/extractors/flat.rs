// src/extractors/flat.rs
use crate::extractors::{row_label, write_values, LocatedSection, SectionExtractor};
use crate::model::{Scope, StatementKind, Team};
use crate::sheet::Sheet;

/// Label → value extraction for financial statements.
/// A repeated label overwrites the earlier value.
#[derive(Debug, Clone, Copy)]
pub struct FlatExtractor {
    pub kind: StatementKind,
    pub scope: Scope,
}

impl SectionExtractor for FlatExtractor {
    fn extract(&self, sheet: &Sheet, section: &LocatedSection, teams: &mut [Team]) {
        for index in section.body() {
            let Some(label) = row_label(sheet, index) else { continue };
            write_values(sheet.row(index), teams, |team, value| {
                team.financials
                    .statement_mut(self.kind, self.scope)
                    .insert(label.clone(), value);
            });
        }
    }
}
