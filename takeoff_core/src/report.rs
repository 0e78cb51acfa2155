//! # Estimate Report
//!
//! Turns a [`ProjectEstimate`] into priced line items. The report is a plain
//! record; rendering it into a document is left to the caller.
//!
//! ## Structure
//!
//! ```text
//! EstimateReport
//! ├── id, generated_at, variant
//! ├── unit_prices
//! ├── line_items
//! │   ├── 6 concrete lines (foundation, columns, slabs, beams, stairs, walls)
//! │   ├── 1 steel line
//! │   └── labor, equipment, overhead
//! └── grand_total (= cost.total_cost)
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::{FormulaVariant, ProjectEstimate};
use crate::rounding::round2;

/// Unit prices used to price quantities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitPrices {
    /// Currency per m³ of concrete
    pub concrete_per_cubic_meter: f64,
    /// Currency per kg of steel
    pub steel_per_kg: f64,
}

impl Default for UnitPrices {
    fn default() -> Self {
        UnitPrices {
            concrete_per_cubic_meter: 350.0,
            steel_per_kg: 3.0,
        }
    }
}

/// Kind of line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCategory {
    Concrete,
    Steel,
    Labor,
    Equipment,
    Overhead,
}

/// One priced line of the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub category: LineCategory,
    pub description: String,
    /// Quantity and unit, absent for percentage lines
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
    pub amount: f64,
}

impl LineItem {
    fn priced(category: LineCategory, description: impl Into<String>, quantity: f64, unit: &str, unit_price: f64) -> Self {
        LineItem {
            category,
            description: description.into(),
            quantity: Some(quantity),
            unit: Some(unit.to_string()),
            unit_price: Some(unit_price),
            amount: round2(quantity * unit_price),
        }
    }

    fn lump(category: LineCategory, description: impl Into<String>, amount: f64) -> Self {
        LineItem {
            category,
            description: description.into(),
            quantity: None,
            unit: None,
            unit_price: None,
            amount: round2(amount),
        }
    }
}

/// Priced report for one project estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateReport {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub variant: FormulaVariant,
    pub unit_prices: UnitPrices,
    pub estimate: ProjectEstimate,
    pub line_items: Vec<LineItem>,
    pub grand_total: f64,
}

impl EstimateReport {
    /// Sum of the line items of one category.
    pub fn subtotal(&self, category: LineCategory) -> f64 {
        round2(
            self.line_items
                .iter()
                .filter(|item| item.category == category)
                .map(|item| item.amount)
                .sum(),
        )
    }
}

/// Build the line-item report for an estimate.
pub fn assemble_report(estimate: &ProjectEstimate, prices: &UnitPrices) -> EstimateReport {
    let mut line_items: Vec<LineItem> = estimate
        .concrete
        .elements()
        .iter()
        .map(|(element, volume)| {
            LineItem::priced(
                LineCategory::Concrete,
                format!("Concrete - {element}"),
                *volume,
                "m3",
                prices.concrete_per_cubic_meter,
            )
        })
        .collect();

    line_items.push(LineItem::priced(
        LineCategory::Steel,
        "Reinforcement steel",
        estimate.steel.total_weight,
        "kg",
        prices.steel_per_kg,
    ));

    let breakdown = &estimate.cost.cost_breakdown;
    line_items.push(LineItem::lump(LineCategory::Labor, "Labor", breakdown.labor));
    line_items.push(LineItem::lump(LineCategory::Equipment, "Equipment", breakdown.equipment));
    line_items.push(LineItem::lump(LineCategory::Overhead, "Overhead", breakdown.overhead));

    EstimateReport {
        id: Uuid::new_v4(),
        generated_at: Utc::now(),
        variant: estimate.variant,
        unit_prices: *prices,
        estimate: *estimate,
        line_items,
        grand_total: estimate.cost.total_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::concrete::ConcreteInput;
    use crate::calculations::pipeline::{estimate_project, ProjectParameters};

    fn reference_estimate(variant: FormulaVariant) -> ProjectEstimate {
        let params = ProjectParameters {
            geometry: ConcreteInput::new(100.0, 2, 0.5, 0.2, 0.15),
            steel_ratio: None,
        };
        estimate_project(&params, &UnitPrices::default(), variant).unwrap()
    }

    #[test]
    fn test_line_items_layout() {
        let report = assemble_report(&reference_estimate(FormulaVariant::B), &UnitPrices::default());
        assert_eq!(report.line_items.len(), 10);
        assert_eq!(report.line_items[0].description, "Concrete - foundation");
        assert_eq!(report.line_items[0].amount, 17500.0);
        assert_eq!(report.line_items[6].category, LineCategory::Steel);
        assert_eq!(report.line_items[9].category, LineCategory::Overhead);
    }

    #[test]
    fn test_subtotals_match_cost() {
        let estimate = reference_estimate(FormulaVariant::B);
        let report = assemble_report(&estimate, &UnitPrices::default());
        let cost = estimate.cost;
        assert!((report.subtotal(LineCategory::Concrete) - cost.concrete_cost).abs() < 0.01);
        assert!((report.subtotal(LineCategory::Steel) - cost.steel_cost).abs() < 0.01);
        assert_eq!(report.subtotal(LineCategory::Labor), cost.cost_breakdown.labor);
        assert_eq!(report.grand_total, cost.total_cost);
    }

    #[test]
    fn test_reports_get_distinct_ids() {
        let estimate = reference_estimate(FormulaVariant::A);
        let first = assemble_report(&estimate, &UnitPrices::default());
        let second = assemble_report(&estimate, &UnitPrices::default());
        assert_ne!(first.id, second.id);
        assert_eq!(first.line_items, second.line_items);
    }

    #[test]
    fn test_report_serialization() {
        let report = assemble_report(&reference_estimate(FormulaVariant::B), &UnitPrices::default());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["variant"], "B");
        assert_eq!(json["lineItems"][7]["category"], "labor");
        assert!(json["lineItems"][7].get("unitPrice").is_none());
        assert_eq!(json["unitPrices"]["steelPerKg"], 3.0);
    }
}
