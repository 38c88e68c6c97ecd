// src/extractors/margins.rs
use crate::extractors::{row_label, write_values, LocatedSection, SectionExtractor};
use crate::model::{MarginField, Region, Team};
use crate::sheet::Sheet;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MarginState {
    pub region: Option<Region>,
    pub tech: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarginAction {
    Skip,
    Write {
        region: Region,
        tech: String,
        field: MarginField,
    },
}

/// Region named inside a "Margin breakdown" header, checked in USA, Asia, Europe order.
fn region_named_in(label: &str) -> Option<Region> {
    Region::ALL.into_iter().find(|region| label.contains(region.label()))
}

impl MarginState {
    pub fn transition(&mut self, label: &str) -> MarginAction {
        if label.contains("Margin breakdown") {
            if let Some(region) = region_named_in(label) {
                self.region = Some(region);
            }
            return MarginAction::Skip;
        }

        if label.starts_with("Tech") {
            self.tech = Some(label.to_string());
            return MarginAction::Skip;
        }

        match (self.region, &self.tech, MarginField::from_label(label)) {
            (Some(region), Some(tech), Some(field)) => MarginAction::Write {
                region,
                tech: tech.clone(),
                field,
            },
            _ => MarginAction::Skip,
        }
    }
}

/// Per-technology profitability for each region.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarginExtractor;

impl SectionExtractor for MarginExtractor {
    fn extract(&self, sheet: &Sheet, section: &LocatedSection, teams: &mut [Team]) {
        let mut state = MarginState::default();

        // The header itself names the first region
        for index in section.span() {
            let Some(label) = row_label(sheet, index) else { continue };

            if let MarginAction::Write { region, tech, field } = state.transition(&label) {
                write_values(sheet.row(index), teams, |team, v| {
                    team.margin_entry(region, &tech).set(field, v);
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
    use crate::model::MarginRecord;

    #[test]
    fn test_header_sets_region() {
        let mut state = MarginState::default();
        state.transition("Margin breakdown, k USD, Asia");
        assert_eq!(state.region, Some(Region::Asia));
        state.transition("Margin breakdown, k USD");
        assert_eq!(state.region, Some(Region::Asia));
    }

    #[test]
    fn test_unknown_labels_are_ignored() {
        let mut state = MarginState { region: Some(Region::Usa), tech: Some("Tech 1".into()) };
        assert_eq!(state.transition("Units sold"), MarginAction::Skip);
        assert_eq!(
            state.transition("Gross margin %"),
            MarginAction::Write { region: Region::Usa, tech: "Tech 1".into(), field: MarginField::Margin }
        );
    }

    #[test]
    fn test_usa_breakdown() {
        let sheet = sheet(&[
            &["Margin breakdown, USA"],
            &["Tech 1"],
            &["Sales revenue", "5,000", "4,000"],
            &["Units sold", "10", "10"],
            &["Promotion", "300", "250"],
        ]);
        let mut teams = teams(&["Red", "Blue"]);

        MarginExtractor.extract(&sheet, &whole(&sheet, SectionKind::Margins), &mut teams);

        assert_eq!(
            teams[0].margins.usa["Tech 1"],
            MarginRecord { sales: 5000.0, promotion: 300.0, variable_costs: 0.0, gross_profit: 0.0, margin: 0.0 }
        );
        assert_eq!(teams[1].margins.usa["Tech 1"].sales, 4000.0);
        assert_eq!(teams[1].margins.usa["Tech 1"].promotion, 250.0);
        assert!(teams[0].margins.asia.is_empty());
    }

    #[test]
    fn test_regions_switch_within_section() {
        let sheet = sheet(&[
            &["Margin breakdown, USA"],
            &["Tech 1"],
            &["Gross profit", "1"],
            &["Margin breakdown, Europe"],
            &["Tech 2"],
            &["Total costs of unit sold", "7"],
            &["Gross margin %", "35.5"],
        ]);
        let mut teams = teams(&["Red"]);

        MarginExtractor.extract(&sheet, &whole(&sheet, SectionKind::Margins), &mut teams);

        let margins = &teams[0].margins;
        assert_eq!(margins.usa["Tech 1"].gross_profit, 1.0);
        assert_eq!(margins.europe["Tech 2"].variable_costs, 7.0);
        assert_eq!(margins.europe["Tech 2"].margin, 35.5);
        assert!(margins.europe.get("Tech 1").is_none());
    }

    #[test]
    fn test_no_record_without_known_field() {
        let sheet = sheet(&[&["Margin breakdown, Asia"], &["Tech 3"], &["Units sold", "10"]]);
        let mut teams = teams(&["Red"]);

        MarginExtractor.extract(&sheet, &whole(&sheet, SectionKind::Margins), &mut teams);

        assert!(teams[0].margins.asia.is_empty());
    }
}
