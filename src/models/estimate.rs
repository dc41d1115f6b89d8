// Construction cost estimate returned by the structured cost call

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostEstimateItem {
    pub category: String,
    pub amount: f64,
    pub description: String,
}

/// A full estimate. Totals come from the model as-is; nothing here re-derives
/// `total_estimated_cost` from the breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostEstimate {
    pub currency: String,
    pub total_estimated_cost: f64,
    pub breakdown: Vec<CostEstimateItem>,
    pub summary: String,
}

impl CostEstimate {
    /// Sum of the breakdown rows, used only for chart proportions
    pub fn breakdown_sum(&self) -> f64 {
        self.breakdown.iter().map(|item| item.amount).sum()
    }
}
