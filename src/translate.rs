// src/translate.rs
//! Bilingual row-label translation.
//!
//! Exports come in English or Chinese. Every label is mapped onto the English form,
//! which is the key vocabulary of the output model. Lookup is exact after trimming;
//! unknown labels pass through unchanged so they still work as positional markers.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Chinese label → canonical English label.
const LABELS: &[(&str, &str)] = &[
    // Section headers
    ("损益表, 千美元, 全球", "Income Statement, k USD, Global"),
    ("损益表, 千美元, 美国", "Income Statement, k USD, USA"),
    ("损益表, 千美元, 亚洲", "Income Statement, k USD, Asia"),
    ("损益表, 千美元, 欧洲", "Income Statement, k USD, Europe"),
    ("资产负债表, 千美元, 全球", "Balance sheet, k USD, Global"),
    ("资产负债表, 千美元, 美国", "Balance sheet, k USD, USA"),
    ("资产负债表, 千美元, 亚洲", "Balance sheet, k USD, Asia"),
    ("资产负债表, 千美元, 欧洲", "Balance sheet, k USD, Europe"),
    ("母公司现金流量表", "Parent company's cash flow statement"),
    ("现金流量表, 千美元, 美国", "Cash flow statement, k USD, USA"),
    ("现金流量表, 千美元, 亚洲", "Cash flow statement, k USD, Asia"),
    ("现金流量表, 千美元, 欧洲", "Cash flow statement, k USD, Europe"),
    ("比率和关键财务指标", "Ratios and key financial indicators"),
    ("市场报告, 全球", "Market report, Global"),
    ("市场报告, 美国", "Market report, USA"),
    ("市场报告, 亚洲", "Market report, Asia"),
    ("市场报告, 欧洲", "Market report, Europe"),
    ("生产详情", "Manufacturing details"),
    ("物流详情", "Logistics details"),
    ("成本报告", "Cost report"),
    ("利润率明细, 美国", "Margin breakdown, USA"),
    ("利润率明细, 亚洲", "Margin breakdown, Asia"),
    ("利润率明细, 欧洲", "Margin breakdown, Europe"),
    // Regions
    ("全球", "Global"),
    ("美国", "USA"),
    ("亚洲", "Asia"),
    ("欧洲", "Europe"),
    // Technologies
    ("技术 1", "Tech 1"),
    ("技术 2", "Tech 2"),
    ("技术 3", "Tech 3"),
    ("技术 4", "Tech 4"),
    ("内燃机技术", "Tech 1"),
    ("混合动力技术", "Tech 2"),
    ("电动技术", "Tech 3"),
    ("氢动力技术", "Tech 4"),
    // Income statement
    ("销售收入", "Sales revenue"),
    ("可变生产成本", "Variable production costs"),
    ("已售产品总成本", "Total costs of unit sold"),
    ("运输和关税", "Transportation and tariffs"),
    ("研发", "R&D"),
    ("促销", "Promotion"),
    ("行政管理", "Administration"),
    ("息税折旧摊销前利润 (EBITDA)", "Operating profit before depreciation (EBITDA)"),
    ("折旧", "Depreciation"),
    ("息税前利润 (EBIT)", "Operating profit (EBIT)"),
    ("净财务费用", "Net financing expenses"),
    ("税前利润", "Profit before taxes"),
    ("所得税", "Income taxes"),
    ("本回合利润", "Profit for the round"),
    // Balance sheet
    ("固定资产", "Fixed assets"),
    ("存货", "Inventory"),
    ("应收账款", "Receivables"),
    ("现金及现金等价物", "Cash and cash equivalents"),
    ("总资产", "Total assets"),
    ("股本", "Share capital"),
    ("留存收益", "Retained earnings"),
    ("股东权益合计", "Total shareholders' equity"),
    ("长期贷款", "Long-term loans"),
    ("短期贷款", "Short-term loans"),
    ("应付账款", "Payables"),
    ("股东权益和负债合计", "Total shareholders' equity and liabilities"),
    // Cash flow
    ("经营活动现金流", "Cash flow from operations"),
    ("投资活动现金流", "Cash flow from investments"),
    ("融资活动现金流", "Cash flow from financing"),
    ("现金净变动", "Change in cash"),
    // Ratios
    ("累计股东总回报率 (年化), %", "Cumulative total shareholder return (p.a.), %"),
    ("净资产收益率 (ROE)", "Return on equity (ROE)"),
    ("每股收益 (EPS), 美元", "Earnings per share (EPS), USD"),
    ("股价, 美元", "Share price, USD"),
    ("权益比率, %", "Equity ratio, %"),
    // Market report
    ("全球市场份额, %", "Global market shares, %"),
    ("市场份额, %", "Market shares, %"),
    ("按技术划分的市场份额, %", "Market shares by technology, %"),
    ("销售价格, 美元", "Selling price, USD"),
    ("提供的功能数量", "Number of offered features"),
    ("需求, 千台", "Demand, k units"),
    ("销量, 千台", "Sales, k units"),
    // Manufacturing
    ("自主生产, 千台", "In-house manufacturing, k units"),
    ("外包生产, 千台", "Contract manufacturing, k units"),
    ("产能利用率, %", "Capacity usage, %"),
    // Logistics
    ("自主生产", "In-house manufacturing"),
    ("外包生产", "Contract manufacturing"),
    ("进口自", "Imported from"),
    ("产品总数", "Total products"),
    ("销售于", "Sales in"),
    ("出口到", "Exported to"),
    ("生产缓冲", "Production buffer"),
    ("未满足需求", "Unsatisfied demand"),
    // Cost report and margins
    ("单位生产成本, 美元", "Production cost per unit, USD"),
    ("固定成本, 千美元", "Fixed costs, k USD"),
    ("毛利润", "Gross profit"),
    ("毛利率 %", "Gross margin %"),
];

static DICTIONARY: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| LABELS.iter().copied().collect());

/// Returns the canonical form of a raw row label.
pub fn translate(raw: &str) -> String {
    let trimmed = raw.trim();
    DICTIONARY
        .get(trimmed)
        .map(|canonical| canonical.to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translates_known_labels() {
        assert_eq!(translate("销售收入"), "Sales revenue");
        assert_eq!(translate("  美国 "), "USA");
        assert_eq!(translate("内燃机技术"), "Tech 1");
    }

    #[test]
    fn test_unknown_label_passes_through_trimmed() {
        assert_eq!(translate("  Sales revenue  "), "Sales revenue");
        assert_eq!(translate("Something else"), "Something else");
        assert_eq!(translate(""), "");
    }

    #[test]
    fn test_no_partial_matching() {
        assert_eq!(translate("销售收入 (调整)"), "销售收入 (调整)");
    }

    #[test]
    fn test_translation_is_idempotent() {
        for (raw, canonical) in LABELS {
            let once = translate(raw);
            assert_eq!(translate(&once), once, "not idempotent for {raw}");
            assert_eq!(translate(canonical), *canonical);
        }
    }

    #[test]
    fn test_dictionary_keys_are_unique() {
        assert_eq!(DICTIONARY.len(), LABELS.len());
    }
}
