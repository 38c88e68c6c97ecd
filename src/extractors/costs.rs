// src/extractors/costs.rs
use crate::extractors::{row_label, write_values, LocatedSection, SectionExtractor};
use crate::model::{Region, Team};
use crate::sheet::Sheet;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CostState {
    pub region: Option<Region>,
    pub metric: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CostAction {
    Skip,
    /// Write under `key` in the region's cost map.
    Write { region: Region, key: String },
}

impl CostState {
    pub fn transition(&mut self, label: &str) -> CostAction {
        if let Some(region) = Region::from_label(label) {
            self.region = Some(region);
            // A region row may carry the category total for that region
            return match &self.metric {
                Some(metric) => CostAction::Write { region, key: metric.clone() },
                None => CostAction::Skip,
            };
        }

        if label.starts_with("Tech") {
            return match (self.region, &self.metric) {
                (Some(region), Some(metric)) => CostAction::Write {
                    region,
                    key: format!("{} - {}", metric, label),
                },
                _ => CostAction::Skip,
            };
        }

        // Categories vary between simulation setups, so any other label opens one
        self.metric = Some(label.to_string());
        CostAction::Skip
    }
}

/// Cost categories per region, optionally broken out by technology.
#[derive(Debug, Clone, Copy, Default)]
pub struct CostExtractor;

impl SectionExtractor for CostExtractor {
    fn extract(&self, sheet: &Sheet, section: &LocatedSection, teams: &mut [Team]) {
        let mut state = CostState::default();

        for index in section.body() {
            let Some(label) = row_label(sheet, index) else { continue };

            if let CostAction::Write { region, key } = state.transition(&label) {
                write_values(sheet.row(index), teams, |team, v| {
                    team.costs.get_mut(region).insert(key.clone(), v);
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

    #[test]
    fn test_metric_region_tech_transitions() {
        let mut state = CostState::default();
        assert_eq!(state.transition("USA"), CostAction::Skip);
        assert_eq!(state.transition("Tech 1"), CostAction::Skip);
        assert_eq!(state.transition("Production cost per unit, USD"), CostAction::Skip);
        assert_eq!(
            state.transition("Tech 1"),
            CostAction::Write { region: Region::Usa, key: "Production cost per unit, USD - Tech 1".into() }
        );
        assert_eq!(
            state.transition("Asia"),
            CostAction::Write { region: Region::Asia, key: "Production cost per unit, USD".into() }
        );
    }

    #[test]
    fn test_cost_report() {
        let sheet = sheet(&[
            &["Cost report"],
            &["Fixed costs, k USD"],
            &["USA", "1,000", "1,100"],
            &["Asia", "", "900"],
            &["Production cost per unit, USD"],
            &["USA"],
            &["Tech 1", "120", "125"],
            &["Tech 2", "150", "n/a"],
            &["Europe"],
            &["Tech 1", "99", "98"],
        ]);
        let mut teams = teams(&["Red", "Blue"]);

        CostExtractor.extract(&sheet, &whole(&sheet, SectionKind::Costs), &mut teams);

        let red = &teams[0].costs;
        assert_eq!(red.usa["Fixed costs, k USD"], 1000.0);
        assert!(red.asia.is_empty());
        assert_eq!(red.usa["Production cost per unit, USD - Tech 1"], 120.0);
        assert_eq!(red.usa["Production cost per unit, USD - Tech 2"], 150.0);
        assert_eq!(red.europe["Production cost per unit, USD - Tech 1"], 99.0);

        let blue = &teams[1].costs;
        assert_eq!(blue.asia["Fixed costs, k USD"], 900.0);
        assert!(blue.usa.get("Production cost per unit, USD - Tech 2").is_none());
        assert!(blue.usa.get("Production cost per unit, USD").is_none());
    }
}
