// src/model.rs
//! Output model of one parsed round.
//!
//! Every [`Team`] is created with its full nested shape, so consumers only ever
//! check leaf values. Field names serialize to the camelCase keys reporting code
//! reads (`incomeStatement`, `marketShare`, ...).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Canonical label → value.
pub type Metrics = BTreeMap<String, f64>;

/// Categories of the legacy flat `metrics` mirror.
pub const LEGACY_METRIC_CATEGORIES: [&str; 5] = ["Financials", "Production", "Market", "R&D", "Other"];

/// A geographic market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Usa,
    Asia,
    Europe,
}

impl Region {
    pub const ALL: [Region; 3] = [Region::Usa, Region::Asia, Region::Europe];

    /// Exact match against the canonical region row labels.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "USA" => Some(Region::Usa),
            "Asia" => Some(Region::Asia),
            "Europe" => Some(Region::Europe),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Region::Usa => "USA",
            Region::Asia => "Asia",
            Region::Europe => "Europe",
        }
    }
}

/// Scope of a report: the global aggregate or one region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Global,
    Region(Region),
}

/// Regions with manufacturing capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductionRegion {
    Usa,
    Asia,
}

impl ProductionRegion {
    pub fn from_region(region: Region) -> Option<Self> {
        match region {
            Region::Usa => Some(ProductionRegion::Usa),
            Region::Asia => Some(ProductionRegion::Asia),
            Region::Europe => None,
        }
    }
}

/// One value per scope, global included.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scoped<T> {
    pub global: T,
    pub usa: T,
    pub asia: T,
    pub europe: T,
}

impl<T> Scoped<T> {
    pub fn get(&self, scope: Scope) -> &T {
        match scope {
            Scope::Global => &self.global,
            Scope::Region(region) => match region {
                Region::Usa => &self.usa,
                Region::Asia => &self.asia,
                Region::Europe => &self.europe,
            },
        }
    }

    pub fn get_mut(&mut self, scope: Scope) -> &mut T {
        match scope {
            Scope::Global => &mut self.global,
            Scope::Region(region) => match region {
                Region::Usa => &mut self.usa,
                Region::Asia => &mut self.asia,
                Region::Europe => &mut self.europe,
            },
        }
    }
}

/// One value per region.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Regional<T> {
    pub usa: T,
    pub asia: T,
    pub europe: T,
}

impl<T> Regional<T> {
    pub fn get(&self, region: Region) -> &T {
        match region {
            Region::Usa => &self.usa,
            Region::Asia => &self.asia,
            Region::Europe => &self.europe,
        }
    }

    pub fn get_mut(&mut self, region: Region) -> &mut T {
        match region {
            Region::Usa => &mut self.usa,
            Region::Asia => &mut self.asia,
            Region::Europe => &mut self.europe,
        }
    }
}

/// Cash flow statements. Regional statements only exist in some exports,
/// so they are created on first write.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    pub global: Metrics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usa: Option<Metrics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asia: Option<Metrics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub europe: Option<Metrics>,
}

impl CashFlow {
    pub fn get_mut(&mut self, scope: Scope) -> &mut Metrics {
        match scope {
            Scope::Global => &mut self.global,
            Scope::Region(Region::Usa) => self.usa.get_or_insert_with(Metrics::new),
            Scope::Region(Region::Asia) => self.asia.get_or_insert_with(Metrics::new),
            Scope::Region(Region::Europe) => self.europe.get_or_insert_with(Metrics::new),
        }
    }
}

/// The four flat financial statement kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    IncomeStatement,
    BalanceSheet,
    CashFlow,
    Ratios,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Financials {
    pub income_statement: Scoped<Metrics>,
    pub balance_sheet: Scoped<Metrics>,
    pub cash_flow: CashFlow,
    pub ratios: Metrics,
}

impl Financials {
    /// The flat map a statement row of `kind` in `scope` is written to.
    /// Ratios are global only; their scope is ignored.
    pub fn statement_mut(&mut self, kind: StatementKind, scope: Scope) -> &mut Metrics {
        match kind {
            StatementKind::IncomeStatement => self.income_statement.get_mut(scope),
            StatementKind::BalanceSheet => self.balance_sheet.get_mut(scope),
            StatementKind::CashFlow => self.cash_flow.get_mut(scope),
            StatementKind::Ratios => &mut self.ratios,
        }
    }
}

/// Output of one production region, keyed by technology.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionManufacturing {
    pub in_house: Metrics,
    pub contract: Metrics,
    /// Utilization per technology, plus `"Total"` for the whole region when reported.
    pub capacity_usage: Metrics,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manufacturing {
    pub usa: RegionManufacturing,
    pub asia: RegionManufacturing,
}

impl Manufacturing {
    pub fn get(&self, region: ProductionRegion) -> &RegionManufacturing {
        match region {
            ProductionRegion::Usa => &self.usa,
            ProductionRegion::Asia => &self.asia,
        }
    }

    pub fn get_mut(&mut self, region: ProductionRegion) -> &mut RegionManufacturing {
        match region {
            ProductionRegion::Usa => &mut self.usa,
            ProductionRegion::Asia => &mut self.asia,
        }
    }
}

/// Unit flow of one technology in one region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogisticsRecord {
    pub in_house: f64,
    pub contract: f64,
    pub imported: f64,
    pub total: f64,
    pub sales: f64,
    pub exported: f64,
    pub production_buffer: f64,
    pub unsatisfied_demand: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogisticsField {
    InHouse,
    Contract,
    Imported,
    Total,
    Sales,
    Exported,
    ProductionBuffer,
    UnsatisfiedDemand,
}

impl LogisticsRecord {
    pub fn set(&mut self, field: LogisticsField, value: f64) {
        let slot = match field {
            LogisticsField::InHouse => &mut self.in_house,
            LogisticsField::Contract => &mut self.contract,
            LogisticsField::Imported => &mut self.imported,
            LogisticsField::Total => &mut self.total,
            LogisticsField::Sales => &mut self.sales,
            LogisticsField::Exported => &mut self.exported,
            LogisticsField::ProductionBuffer => &mut self.production_buffer,
            LogisticsField::UnsatisfiedDemand => &mut self.unsatisfied_demand,
        };
        *slot = value;
    }
}

/// Profitability of one technology in one region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginRecord {
    pub sales: f64,
    pub variable_costs: f64,
    pub gross_profit: f64,
    pub margin: f64,
    pub promotion: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarginField {
    Sales,
    VariableCosts,
    GrossProfit,
    Margin,
    Promotion,
}

impl MarginField {
    /// Exact match against the canonical margin row labels.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Sales revenue" => Some(MarginField::Sales),
            "Variable production costs" | "Total costs of unit sold" => Some(MarginField::VariableCosts),
            "Gross profit" => Some(MarginField::GrossProfit),
            "Gross margin %" => Some(MarginField::Margin),
            "Promotion" => Some(MarginField::Promotion),
            _ => None,
        }
    }
}

impl MarginRecord {
    pub fn set(&mut self, field: MarginField, value: f64) {
        let slot = match field {
            MarginField::Sales => &mut self.sales,
            MarginField::VariableCosts => &mut self.variable_costs,
            MarginField::GrossProfit => &mut self.gross_profit,
            MarginField::Margin => &mut self.margin,
            MarginField::Promotion => &mut self.promotion,
        };
        *slot = value;
    }
}

/// One competing team. The name is the join key across rounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub name: String,
    pub financials: Financials,
    pub market: Scoped<Metrics>,
    pub manufacturing: Manufacturing,
    pub logistics: Regional<BTreeMap<String, LogisticsRecord>>,
    /// Keys are a cost category or `"<category> - <technology>"`.
    pub costs: Regional<Metrics>,
    pub margins: Regional<BTreeMap<String, MarginRecord>>,
    pub market_share: Scoped<Metrics>,
    pub features: Regional<Metrics>,
    pub demand: Regional<Metrics>,
    pub prices: Regional<Metrics>,
    pub metrics: BTreeMap<String, Metrics>,
}

impl Team {
    /// A team with every container present and empty.
    pub fn new(name: impl Into<String>) -> Self {
        let metrics = LEGACY_METRIC_CATEGORIES
            .iter()
            .map(|category| (category.to_string(), Metrics::new()))
            .collect();

        Self {
            name: name.into(),
            financials: Financials::default(),
            market: Scoped::default(),
            manufacturing: Manufacturing::default(),
            logistics: Regional::default(),
            costs: Regional::default(),
            margins: Regional::default(),
            market_share: Scoped::default(),
            features: Regional::default(),
            demand: Regional::default(),
            prices: Regional::default(),
            metrics,
        }
    }

    /// Logistics record for `(region, tech)`, created zeroed on first access.
    pub fn logistics_entry(&mut self, region: Region, tech: &str) -> &mut LogisticsRecord {
        self.logistics.get_mut(region).entry(tech.to_string()).or_default()
    }

    /// Margin record for `(region, tech)`, created zeroed on first access.
    pub fn margin_entry(&mut self, region: Region, tech: &str) -> &mut MarginRecord {
        self.margins.get_mut(region).entry(tech.to_string()).or_default()
    }

    /// Copies the global income statement and global market report into the
    /// legacy `metrics` categories read by older consumers.
    pub fn mirror_legacy_metrics(&mut self) {
        let financials = self.financials.income_statement.global.clone();
        self.metrics.entry("Financials".to_string()).or_default().extend(financials);

        let market = self.market.global.clone();
        self.metrics.entry("Market".to_string()).or_default().extend(market);
    }
}

/// One parsed export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    pub round_name: String,
    pub teams: Vec<Team>,
}

impl Round {
    pub fn team(&self, name: &str) -> Option<&Team> {
        self.teams.iter().find(|team| team.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_team_has_full_shape() {
        let team = Team::new("Red");
        let json = serde_json::to_value(&team).unwrap();

        for path in [
            "/financials/incomeStatement/global",
            "/financials/incomeStatement/europe",
            "/financials/balanceSheet/asia",
            "/financials/cashFlow/global",
            "/financials/ratios",
            "/market/usa",
            "/manufacturing/usa/inHouse",
            "/manufacturing/asia/capacityUsage",
            "/logistics/europe",
            "/costs/asia",
            "/margins/usa",
            "/marketShare/global",
            "/features/europe",
            "/demand/usa",
            "/prices/asia",
            "/metrics/R&D",
        ] {
            assert!(json.pointer(path).map_or(false, |v| v.is_object()), "missing {path}");
        }
        // Regional cash flow appears only once written
        assert!(json.pointer("/financials/cashFlow/usa").is_none());
        assert!(json.pointer("/manufacturing/europe").is_none());
    }

    #[test]
    fn test_lazy_records_start_zeroed() {
        let mut team = Team::new("Red");
        team.logistics_entry(Region::Asia, "Tech 2").set(LogisticsField::Sales, 12.0);

        let record = team.logistics.asia["Tech 2"];
        assert_eq!(record.sales, 12.0);
        assert_eq!(record.in_house, 0.0);
        assert_eq!(record.unsatisfied_demand, 0.0);

        team.margin_entry(Region::Usa, "Tech 1").set(MarginField::Promotion, 3.0);
        assert_eq!(
            team.margins.usa["Tech 1"],
            MarginRecord { promotion: 3.0, ..MarginRecord::default() }
        );
    }

    #[test]
    fn test_cash_flow_region_created_on_write() {
        let mut financials = Financials::default();
        financials
            .statement_mut(StatementKind::CashFlow, Scope::Region(Region::Europe))
            .insert("Change in cash".into(), 5.0);

        assert!(financials.cash_flow.usa.is_none());
        assert_eq!(financials.cash_flow.europe.as_ref().unwrap()["Change in cash"], 5.0);
    }

    #[test]
    fn test_margin_field_labels() {
        assert_eq!(MarginField::from_label("Total costs of unit sold"), Some(MarginField::VariableCosts));
        assert_eq!(MarginField::from_label("Variable production costs"), Some(MarginField::VariableCosts));
        assert_eq!(MarginField::from_label("Units sold"), None);
    }

    #[test]
    fn test_legacy_mirror() {
        let mut team = Team::new("Red");
        team.financials.income_statement.global.insert("Sales revenue".into(), 10.0);
        team.market.global.insert("Global market shares, %".into(), 25.0);
        team.mirror_legacy_metrics();

        assert_eq!(team.metrics["Financials"]["Sales revenue"], 10.0);
        assert_eq!(team.metrics["Market"]["Global market shares, %"], 25.0);
        assert!(team.metrics["Other"].is_empty());
    }

    #[test]
    fn test_round_serializes_round_name() {
        let round = Round { round_name: "r1".into(), teams: vec![Team::new("Red")] };
        let json = serde_json::to_value(&round).unwrap();
        assert_eq!(json["roundName"], "r1");
        assert_eq!(round.team("Red").map(|t| t.name.as_str()), Some("Red"));
    }
}
