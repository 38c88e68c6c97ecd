// src/extractors/market.rs
use crate::extractors::{row_label, write_values, LocatedSection, SectionExtractor};
use crate::model::{Scope, Team};
use crate::sheet::Sheet;

/// Where the market report scan currently is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MarketState {
    /// Outside any sub-block: rows are scope-level metrics.
    #[default]
    Scope,
    /// Under a technology sub-header.
    Tech(String),
    /// Inside the market shares block, where technology rows carry data.
    Shares,
}

/// What to do with the row that caused a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarketAction {
    Skip,
    Share(String),
    Price(String),
    Features(String),
    Demand(String),
    Metric(String),
}

impl MarketState {
    pub fn transition(&mut self, label: &str) -> MarketAction {
        let lower = label.to_lowercase();

        if lower.contains("market shares") {
            *self = MarketState::Shares;
            return MarketAction::Skip;
        }

        if label.starts_with("Tech") {
            if *self == MarketState::Shares {
                return MarketAction::Share(label.to_string());
            }
            *self = MarketState::Tech(label.to_string());
            return MarketAction::Skip;
        }

        match self {
            MarketState::Tech(tech) => {
                // Only these three metrics are kept per technology
                if lower.contains("selling price") {
                    MarketAction::Price(tech.clone())
                } else if lower.contains("number of offered features") {
                    MarketAction::Features(tech.clone())
                } else if lower.contains("demand, k units") {
                    MarketAction::Demand(tech.clone())
                } else {
                    MarketAction::Skip
                }
            }
            MarketState::Shares => MarketAction::Skip,
            MarketState::Scope => MarketAction::Metric(label.to_string()),
        }
    }
}

/// Market report of one scope.
#[derive(Debug, Clone, Copy)]
pub struct MarketExtractor {
    pub scope: Scope,
}

impl SectionExtractor for MarketExtractor {
    fn extract(&self, sheet: &Sheet, section: &LocatedSection, teams: &mut [Team]) {
        let scope = self.scope;
        let region = match scope {
            Scope::Global => None,
            Scope::Region(region) => Some(region),
        };
        let mut state = MarketState::default();

        for index in section.body() {
            let Some(label) = row_label(sheet, index) else { continue };
            let row = sheet.row(index);
            let action = state.transition(&label);
            tracing::trace!("Market row {} '{}' -> {:?} ({:?})", index, label, action, state);

            match action {
                MarketAction::Skip => {}
                MarketAction::Share(tech) => {
                    write_values(row, teams, |team, v| {
                        team.market_share.get_mut(scope).insert(tech.clone(), v);
                    });
                }
                MarketAction::Metric(key) => {
                    write_values(row, teams, |team, v| {
                        team.market.get_mut(scope).insert(key.clone(), v);
                    });
                }
                // Per-technology details have no global slot
                MarketAction::Price(tech) => {
                    if let Some(region) = region {
                        write_values(row, teams, |team, v| {
                            team.prices.get_mut(region).insert(tech.clone(), v);
                        });
                    }
                }
                MarketAction::Features(tech) => {
                    if let Some(region) = region {
                        write_values(row, teams, |team, v| {
                            team.features.get_mut(region).insert(tech.clone(), v);
                        });
                    }
                }
                MarketAction::Demand(tech) => {
                    if let Some(region) = region {
                        write_values(row, teams, |team, v| {
                            team.demand.get_mut(region).insert(tech.clone(), v);
                        });
                    }
                }
            }
        }
    }
}
