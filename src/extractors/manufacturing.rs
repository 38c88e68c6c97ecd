// src/extractors/manufacturing.rs
use crate::extractors::{row_label, write_values, LocatedSection, SectionExtractor};
use crate::model::{ProductionRegion, Region, Team};
use crate::sheet::Sheet;

/// Key of the region-wide capacity usage value.
pub const CAPACITY_TOTAL_KEY: &str = "Total";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManufacturingBlock {
    InHouse,
    Contract,
    CapacityUsage,
}

impl ManufacturingBlock {
    fn from_label(label: &str) -> Option<Self> {
        if label.contains("In-house manufacturing") {
            Some(ManufacturingBlock::InHouse)
        } else if label.contains("Contract manufacturing") {
            Some(ManufacturingBlock::Contract)
        } else if label.contains("Capacity usage") {
            Some(ManufacturingBlock::CapacityUsage)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ManufacturingState {
    pub block: Option<ManufacturingBlock>,
    pub region: Option<ProductionRegion>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManufacturingAction {
    Skip,
    /// Capacity usage of a whole region, carried on the region row.
    RegionTotal(ProductionRegion),
    Tech {
        block: ManufacturingBlock,
        region: ProductionRegion,
        tech: String,
    },
}

impl ManufacturingState {
    pub fn transition(&mut self, label: &str) -> ManufacturingAction {
        if let Some(block) = ManufacturingBlock::from_label(label) {
            self.block = Some(block);
            return ManufacturingAction::Skip;
        }

        if let Some(region) = Region::from_label(label) {
            // Europe has no factories; its rows belong to no production region
            self.region = ProductionRegion::from_region(region);
            return match (self.block, self.region) {
                (Some(ManufacturingBlock::CapacityUsage), Some(region)) => ManufacturingAction::RegionTotal(region),
                _ => ManufacturingAction::Skip,
            };
        }

        if label.starts_with("Tech") {
            if let (Some(block), Some(region)) = (self.block, self.region) {
                return ManufacturingAction::Tech { block, region, tech: label.to_string() };
            }
        }

        ManufacturingAction::Skip
    }
}

/// In-house, contract and capacity figures per production region.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManufacturingExtractor;

impl SectionExtractor for ManufacturingExtractor {
    fn extract(&self, sheet: &Sheet, section: &LocatedSection, teams: &mut [Team]) {
        let mut state = ManufacturingState::default();

        for index in section.body() {
            let Some(label) = row_label(sheet, index) else { continue };
            let row = sheet.row(index);

            match state.transition(&label) {
                ManufacturingAction::Skip => {}
                ManufacturingAction::RegionTotal(region) => {
                    write_values(row, teams, |team, v| {
                        team.manufacturing
                            .get_mut(region)
                            .capacity_usage
                            .insert(CAPACITY_TOTAL_KEY.to_string(), v);
                    });
                }
                ManufacturingAction::Tech { block, region, tech } => {
                    write_values(row, teams, |team, v| {
                        let output = team.manufacturing.get_mut(region);
                        let target = match block {
                            ManufacturingBlock::InHouse => &mut output.in_house,
                            ManufacturingBlock::Contract => &mut output.contract,
                            ManufacturingBlock::CapacityUsage => &mut output.capacity_usage,
                        };
                        target.insert(tech.clone(), v);
                    });
                }
            }
        }
    }
}
