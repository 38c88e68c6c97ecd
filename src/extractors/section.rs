// src/extractors/section.rs
//! Section catalogue and locator.
//!
//! Each section starts at the first row whose label contains its keyword and runs
//! until the next located section, whatever order the export puts them in.

use std::ops::Range;

use crate::model::{Region, Scope, StatementKind};
use crate::sheet::Sheet;
use crate::translate::translate;

const GLOBAL: Scope = Scope::Global;
const USA: Scope = Scope::Region(Region::Usa);
const ASIA: Scope = Scope::Region(Region::Asia);
const EUROPE: Scope = Scope::Region(Region::Europe);

/// What a section holds, and so which extractor reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Financial(StatementKind, Scope),
    Market(Scope),
    Manufacturing,
    Logistics,
    Costs,
    Margins,
}

#[derive(Debug, Clone, Copy)]
pub struct SectionHeader {
    pub keyword: &'static str,
    pub kind: SectionKind,
}

const fn header(keyword: &'static str, kind: SectionKind) -> SectionHeader {
    SectionHeader { keyword, kind }
}

/// Every section the extractor knows, in lookup order.
pub const SECTION_CATALOGUE: [SectionHeader; 21] = [
    header("Income Statement, k USD, Global", SectionKind::Financial(StatementKind::IncomeStatement, GLOBAL)),
    header("Income Statement, k USD, USA", SectionKind::Financial(StatementKind::IncomeStatement, USA)),
    header("Income Statement, k USD, Asia", SectionKind::Financial(StatementKind::IncomeStatement, ASIA)),
    header("Income Statement, k USD, Europe", SectionKind::Financial(StatementKind::IncomeStatement, EUROPE)),
    header("Balance sheet, k USD, Global", SectionKind::Financial(StatementKind::BalanceSheet, GLOBAL)),
    header("Balance sheet, k USD, USA", SectionKind::Financial(StatementKind::BalanceSheet, USA)),
    header("Balance sheet, k USD, Asia", SectionKind::Financial(StatementKind::BalanceSheet, ASIA)),
    header("Balance sheet, k USD, Europe", SectionKind::Financial(StatementKind::BalanceSheet, EUROPE)),
    header("Parent company's cash flow statement", SectionKind::Financial(StatementKind::CashFlow, GLOBAL)),
    header("Cash flow statement, k USD, USA", SectionKind::Financial(StatementKind::CashFlow, USA)),
    header("Cash flow statement, k USD, Asia", SectionKind::Financial(StatementKind::CashFlow, ASIA)),
    header("Cash flow statement, k USD, Europe", SectionKind::Financial(StatementKind::CashFlow, EUROPE)),
    header("Ratios and key financial indicators", SectionKind::Financial(StatementKind::Ratios, GLOBAL)),
    header("Market report, Global", SectionKind::Market(GLOBAL)),
    header("Market report, USA", SectionKind::Market(USA)),
    header("Market report, Asia", SectionKind::Market(ASIA)),
    header("Market report, Europe", SectionKind::Market(EUROPE)),
    header("Manufacturing details", SectionKind::Manufacturing),
    header("Logistics details", SectionKind::Logistics),
    header("Cost report", SectionKind::Costs),
    header("Margin breakdown", SectionKind::Margins),
];

/// A section found in a sheet: its header row and the exclusive end of its rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedSection {
    pub kind: SectionKind,
    pub keyword: &'static str,
    pub start: usize,
    pub end: usize,
}

impl LocatedSection {
    /// Rows after the header.
    pub fn body(&self) -> Range<usize> {
        (self.start + 1)..self.end
    }

    /// Rows including the header.
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// First row whose column-0 label contains `keyword`, case-insensitively,
/// either as written or after translation.
pub fn find_row(sheet: &Sheet, keyword: &str) -> Option<usize> {
    let needle = keyword.to_lowercase();
    (0..sheet.len()).find(|&index| {
        sheet.label(index).map_or(false, |label| {
            label.to_lowercase().contains(&needle) || translate(&label).to_lowercase().contains(&needle)
        })
    })
}

/// Locates every catalogued section present in the sheet, ordered by position.
/// Missing sections are simply left out.
pub fn locate_sections(sheet: &Sheet) -> Vec<LocatedSection> {
    let mut found: Vec<(usize, &SectionHeader)> = SECTION_CATALOGUE
        .iter()
        .filter_map(|header| find_row(sheet, header.keyword).map(|index| (index, header)))
        .collect();
    found.sort_by_key(|(index, _)| *index);

    let mut sections = Vec::with_capacity(found.len());
    for (pos, (start, header)) in found.iter().enumerate() {
        let end = found.get(pos + 1).map_or(sheet.len(), |(next, _)| *next);
        tracing::debug!("Located section '{}' at rows {}..{}", header.keyword, start, end);
        sections.push(LocatedSection {
            kind: header.kind,
            keyword: header.keyword,
            start: *start,
            end,
        });
    }
    sections
}
