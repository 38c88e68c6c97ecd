// src/extractors/logistics.rs
use crate::extractors::{row_label, write_values, LocatedSection, SectionExtractor};
use crate::model::{LogisticsField, Region, Team};
use crate::sheet::Sheet;

/// Row phrase → logistics field. Matched by substring; the first hit wins.
pub const LOGISTICS_PHRASES: [(&str, LogisticsField); 8] = [
    ("In-house manufacturing", LogisticsField::InHouse),
    ("Contract manufacturing", LogisticsField::Contract),
    ("Imported from", LogisticsField::Imported),
    ("Total products", LogisticsField::Total),
    ("Sales in", LogisticsField::Sales),
    ("Exported to", LogisticsField::Exported),
    ("Production buffer", LogisticsField::ProductionBuffer),
    ("Unsatisfied demand", LogisticsField::UnsatisfiedDemand),
];

pub fn field_for(label: &str) -> Option<LogisticsField> {
    LOGISTICS_PHRASES
        .iter()
        .find(|(phrase, _)| label.contains(phrase))
        .map(|(_, field)| *field)
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogisticsState {
    pub region: Option<Region>,
    pub tech: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogisticsAction {
    Skip,
    Write {
        region: Region,
        tech: String,
        field: LogisticsField,
    },
}

impl LogisticsState {
    pub fn transition(&mut self, label: &str) -> LogisticsAction {
        if label.contains("Tech") {
            // "Tech 1, k units" -> "Tech 1"
            let tech = label.split(',').next().unwrap_or(label).trim();
            self.tech = Some(tech.to_string());
            return LogisticsAction::Skip;
        }

        if let Some(region) = Region::from_label(label) {
            self.region = Some(region);
            return LogisticsAction::Skip;
        }

        match (field_for(label), self.region, &self.tech) {
            (Some(field), Some(region), Some(tech)) => LogisticsAction::Write {
                region,
                tech: tech.clone(),
                field,
            },
            _ => LogisticsAction::Skip,
        }
    }
}

/// Unit flows per region and technology.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogisticsExtractor;

impl SectionExtractor for LogisticsExtractor {
    fn extract(&self, sheet: &Sheet, section: &LocatedSection, teams: &mut [Team]) {
        let mut state = LogisticsState::default();

        for index in section.body() {
            let Some(label) = row_label(sheet, index) else { continue };

            if let LogisticsAction::Write { region, tech, field } = state.transition(&label) {
                write_values(sheet.row(index), teams, |team, v| {
                    team.logistics_entry(region, &tech).set(field, v);
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::test_support::{sheet, teams, whole};
    use crate::extractors::SectionKind;
    use crate::model::LogisticsRecord;

    #[test]
    fn test_first_phrase_wins() {
        assert_eq!(field_for("In-house manufacturing, Sales in USA"), Some(LogisticsField::InHouse));
        assert_eq!(field_for("Sales in Europe"), Some(LogisticsField::Sales));
        assert_eq!(field_for("Unsatisfied demand, k units"), Some(LogisticsField::UnsatisfiedDemand));
        assert_eq!(field_for("Storage"), None);
    }

    #[test]
    fn test_tech_label_drops_annotation() {
        let mut state = LogisticsState::default();
        state.transition("Tech 3, k units");
        assert_eq!(state.tech.as_deref(), Some("Tech 3"));
    }

    #[test]
    fn test_write_needs_region_and_tech() {
        let mut state = LogisticsState::default();
        assert_eq!(state.transition("Sales in USA"), LogisticsAction::Skip);
        state.transition("USA");
        assert_eq!(state.transition("Sales in USA"), LogisticsAction::Skip);
        state.transition("Tech 1");
        assert_eq!(
            state.transition("Sales in USA"),
            LogisticsAction::Write { region: Region::Usa, tech: "Tech 1".into(), field: LogisticsField::Sales }
        );
    }

    #[test]
    fn test_logistics_block() {
        let sheet = sheet(&[
            &["Logistics details"],
            &["USA"],
            &["Tech 1, k units"],
            &["In-house manufacturing", "100", "90"],
            &["Imported from Asia", "20", "x"],
            &["Sales in USA", "110", "80"],
            &["Unsatisfied demand", "5", "0"],
            &["Europe"],
            &["Tech 2"],
            &["Exported to USA", "1,500"],
            &["Storage costs", "9", "9"],
        ]);
        let mut teams = teams(&["Red", "Blue"]);

        LogisticsExtractor.extract(&sheet, &whole(&sheet, SectionKind::Logistics), &mut teams);

        assert_eq!(
            teams[0].logistics.usa["Tech 1"],
            LogisticsRecord {
                in_house: 100.0,
                imported: 20.0,
                sales: 110.0,
                unsatisfied_demand: 5.0,
                ..LogisticsRecord::default()
            }
        );
        assert_eq!(teams[1].logistics.usa["Tech 1"].imported, 0.0);
        assert_eq!(teams[1].logistics.usa["Tech 1"].sales, 80.0);
        assert_eq!(teams[0].logistics.europe["Tech 2"].exported, 1500.0);
        assert!(teams[1].logistics.europe.is_empty());
        assert!(teams[0].logistics.asia.is_empty());
    }
}
